use crate::capability::{classify_user_agent, CapabilityProbe, UserAgentClass};
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, UrlSearchParams, Window};

/// Capability answers taken from the page: WebGL context creation, the user
/// agent and the query string.
pub struct WebProbe {
    window: Window,
    user_agent: UserAgentClass,
    params: Option<UrlSearchParams>,
}

impl WebProbe {
    pub fn new(window: Window) -> Self {
        let user_agent = window
            .navigator()
            .user_agent()
            .map(|ua| classify_user_agent(&ua))
            .unwrap_or_default();
        let params = query_params(&window);
        Self {
            window,
            user_agent,
            params,
        }
    }
}

pub(crate) fn query_params(window: &Window) -> Option<UrlSearchParams> {
    let search = window.location().search().ok()?;
    UrlSearchParams::new_with_str(&search).ok()
}

impl CapabilityProbe for WebProbe {
    fn has_graphics_support(&self) -> bool {
        let Some(document) = self.window.document() else {
            return false;
        };
        let Ok(canvas) = document
            .create_element("canvas")
            .and_then(|element| element.dyn_into::<HtmlCanvasElement>().map_err(Into::into))
        else {
            return false;
        };
        ["webgl", "experimental-webgl"]
            .iter()
            .any(|kind| matches!(canvas.get_context(kind), Ok(Some(_))))
    }

    fn is_legacy_browser_class(&self) -> bool {
        self.user_agent.ie11
    }

    fn is_quirky_mobile_class(&self) -> bool {
        self.user_agent.iphone
    }

    fn is_generic_mobile(&self) -> bool {
        self.user_agent.mobile
    }

    fn query_parameter(&self, name: &str) -> Option<String> {
        self.params.as_ref()?.get(name)
    }
}
