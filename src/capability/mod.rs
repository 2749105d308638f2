//! Host capability facts, resolved once at startup.
//!
//! Hosts implement [`CapabilityProbe`]; the controller only ever sees the
//! immutable [`Capabilities`] snapshot taken from it.

mod user_agent;

pub use user_agent::{classify_user_agent, UserAgentClass};

use std::collections::HashMap;

/// Query parameter that turns on the performance overlay.
pub const DEBUG_PARAM: &str = "debug";

/// Raw capability queries answered by the host environment.
pub trait CapabilityProbe {
    fn has_graphics_support(&self) -> bool;
    /// Hosts without streaming video texture support (IE11 class).
    fn is_legacy_browser_class(&self) -> bool;
    /// Hosts whose background video stalls its own clock (iPhone class).
    fn is_quirky_mobile_class(&self) -> bool;
    fn is_generic_mobile(&self) -> bool;
    fn query_parameter(&self, name: &str) -> Option<String>;
}

/// How a ready video is started on this host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformClass {
    /// Playback clock is driven by the render loop, no explicit play().
    QuirkyMobile,
    /// Autoplay is allowed.
    Desktop,
    /// Playback needs a user gesture first.
    GenericMobile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub graphics: bool,
    pub legacy_browser: bool,
    pub quirky_mobile: bool,
    pub mobile: bool,
    pub debug: bool,
}

impl Capabilities {
    pub fn resolve(probe: &dyn CapabilityProbe) -> Self {
        let capabilities = Self {
            graphics: probe.has_graphics_support(),
            legacy_browser: probe.is_legacy_browser_class(),
            quirky_mobile: probe.is_quirky_mobile_class(),
            mobile: probe.is_generic_mobile(),
            debug: probe
                .query_parameter(DEBUG_PARAM)
                .map(|value| is_truthy_flag(&value))
                .unwrap_or(false),
        };
        log::debug!("Resolved host capabilities: {:?}", capabilities);
        capabilities
    }

    /// A plain desktop host with graphics support.
    pub fn desktop() -> Self {
        Self {
            graphics: true,
            ..Self::default()
        }
    }

    pub fn platform(&self) -> PlatformClass {
        if self.quirky_mobile {
            PlatformClass::QuirkyMobile
        } else if !self.mobile {
            PlatformClass::Desktop
        } else {
            PlatformClass::GenericMobile
        }
    }
}

/// Flags are set by any non-empty value, `?debug=0` included.
pub fn is_truthy_flag(value: &str) -> bool {
    !value.is_empty()
}

/// Probe backed by fixed answers. Used by the native host and by tests.
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    pub graphics: bool,
    pub legacy_browser: bool,
    pub quirky_mobile: bool,
    pub mobile: bool,
    pub params: HashMap<String, String>,
}

impl StaticProbe {
    pub fn with_param(mut self, name: &str, value: &str) -> Self {
        self.params.insert(name.to_string(), value.to_string());
        self
    }
}

impl CapabilityProbe for StaticProbe {
    fn has_graphics_support(&self) -> bool {
        self.graphics
    }

    fn is_legacy_browser_class(&self) -> bool {
        self.legacy_browser
    }

    fn is_quirky_mobile_class(&self) -> bool {
        self.quirky_mobile
    }

    fn is_generic_mobile(&self) -> bool {
        self.mobile
    }

    fn query_parameter(&self, name: &str) -> Option<String> {
        self.params.get(name).cloned()
    }
}
