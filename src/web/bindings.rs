use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::HtmlVideoElement;

#[wasm_bindgen]
extern "C" {
    /// Page-supplied WebGL photosphere renderer.
    pub type PhotosphereRenderer;

    #[wasm_bindgen(method, js_name = setPhotosphere)]
    pub fn set_photosphere(this: &PhotosphereRenderer, src: &str, params: &JsValue);

    #[wasm_bindgen(method, js_name = set360Video)]
    pub fn set_360_video(this: &PhotosphereRenderer, video: &HtmlVideoElement, params: &JsValue);

    #[wasm_bindgen(method, js_name = setDefaultLookDirection)]
    pub fn set_default_look_direction(this: &PhotosphereRenderer, yaw: f64);

    #[wasm_bindgen(method)]
    pub fn render(this: &PhotosphereRenderer, timestamp: f64);

    /// Registers `callback` for `"load"` or `"error"`.
    #[wasm_bindgen(method)]
    pub fn on(this: &PhotosphereRenderer, event: &str, callback: &Function);

    /// Page-supplied spinner shown until the first media is on screen.
    pub type LoadingIndicator;

    #[wasm_bindgen(method)]
    pub fn hide(this: &LoadingIndicator);
}
