use crate::constants::{THEME_ATTRIBUTE, WEBGPU_NAVIGATOR_KEY};
use backdrop_core::{BackdropError, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// True when `navigator.gpu` exists. Reads only; touches no DOM state.
pub fn has_webgpu(window: &web::Window) -> bool {
    js_sys::Reflect::get(&window.navigator(), &JsValue::from_str(WEBGPU_NAVIGATOR_KEY))
        .map(|v| !v.is_undefined() && !v.is_null())
        .unwrap_or(false)
}

pub fn find_canvas(
    document: &web::Document,
    id: &str,
) -> Result<web::HtmlCanvasElement, BackdropError> {
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| BackdropError::MissingCanvas(id.to_string()))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| BackdropError::NotACanvas(id.to_string()))
}

/// Current value of the theme attribute on the root element.
pub fn theme_attribute(document: &web::Document) -> Option<String> {
    document
        .document_element()
        .and_then(|el| el.get_attribute(THEME_ATTRIBUTE))
}

/// Viewport from the canvas CSS box and the device pixel ratio, capped at
/// `max_ratio`.
pub fn measure_viewport(canvas: &web::HtmlCanvasElement, max_ratio: f32) -> Viewport {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let rect = canvas.get_bounding_client_rect();
    Viewport::with_max_ratio(rect.width() as f32, rect.height() as f32, dpr as f32, max_ratio)
}

/// Match the canvas backing store to its CSS size times the capped pixel
/// ratio and return the viewport used.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, max_ratio: f32) -> Viewport {
    let viewport = measure_viewport(canvas, max_ratio);
    let (w_px, h_px) = viewport.backing_size();
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    viewport
}

/// Window inner size in CSS pixels.
pub fn window_size(window: &web::Window) -> (f32, f32) {
    let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    (read(window.inner_width()), read(window.inner_height()))
}

struct Listener {
    target: web::EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web::Event)>,
}

/// Event listeners registered by one backdrop instance. Everything added here
/// is removed again on `clear` or drop.
#[derive(Default)]
pub struct Subscriptions {
    listeners: Vec<Listener>,
}

impl Subscriptions {
    pub fn listen(
        &mut self,
        target: &web::EventTarget,
        event: &'static str,
        passive: bool,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Result<(), JsValue> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let options = web::AddEventListenerOptions::new();
        options.set_passive(passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        self.listeners.push(Listener {
            target: target.clone(),
            event,
            callback,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn clear(&mut self) {
        for l in self.listeners.drain(..) {
            _ = l
                .target
                .remove_event_listener_with_callback(l.event, l.callback.as_ref().unchecked_ref());
        }
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        self.clear();
    }
}
