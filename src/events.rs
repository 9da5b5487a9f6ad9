//! Browser event wiring. Handlers only write input targets or flags; the
//! frame reads them and owns every derived value.

use crate::dom::{self, Subscriptions};
use crate::frame::RenderLoop;
use backdrop_core::{pointer_ndc, scroll_fraction, InputTargets};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Targets written by event handlers and consumed once per frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostInput {
    pub targets: InputTargets,
    pub resize_pending: bool,
}

pub type SharedInput = Rc<RefCell<HostInput>>;

pub fn wire_all(
    window: &web::Window,
    document: &web::Document,
    input: &SharedInput,
    render_loop: &Rc<RefCell<RenderLoop>>,
    subs: &mut Subscriptions,
) -> Result<(), JsValue> {
    wire_pointermove(window, input, subs)?;
    wire_scroll(window, document, input, subs)?;
    wire_resize(window, input, subs)?;
    wire_visibility(document, render_loop, subs)?;
    log::info!("[backdrop] {} listeners attached", subs.len());
    Ok(())
}

fn wire_pointermove(
    window: &web::Window,
    input: &SharedInput,
    subs: &mut Subscriptions,
) -> Result<(), JsValue> {
    let input = input.clone();
    let win = window.clone();
    subs.listen(window, "pointermove", true, move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let (w, h) = dom::window_size(&win);
        input.borrow_mut().targets.pointer =
            pointer_ndc(ev.client_x() as f32, ev.client_y() as f32, w, h);
    })
}

fn scroll_target(window: &web::Window, document: &web::Document) -> f32 {
    let scroll_y = window.scroll_y().unwrap_or(0.0) as f32;
    let doc_h = document
        .document_element()
        .map(|el| el.scroll_height() as f32)
        .unwrap_or(0.0);
    let (_, view_h) = dom::window_size(window);
    scroll_fraction(scroll_y, doc_h, view_h)
}

fn wire_scroll(
    window: &web::Window,
    document: &web::Document,
    input: &SharedInput,
    subs: &mut Subscriptions,
) -> Result<(), JsValue> {
    // Pages that load scrolled start from their real position
    input.borrow_mut().targets.scroll = scroll_target(window, document);
    let input = input.clone();
    let win = window.clone();
    let doc = document.clone();
    subs.listen(window, "scroll", true, move |_| {
        input.borrow_mut().targets.scroll = scroll_target(&win, &doc);
    })
}

fn wire_resize(
    window: &web::Window,
    input: &SharedInput,
    subs: &mut Subscriptions,
) -> Result<(), JsValue> {
    let input = input.clone();
    subs.listen(window, "resize", true, move |_| {
        input.borrow_mut().resize_pending = true;
    })
}

fn wire_visibility(
    document: &web::Document,
    render_loop: &Rc<RefCell<RenderLoop>>,
    subs: &mut Subscriptions,
) -> Result<(), JsValue> {
    let render_loop = Rc::downgrade(render_loop);
    let doc = document.clone();
    subs.listen(document, "visibilitychange", false, move |_| {
        let Some(render_loop) = render_loop.upgrade() else {
            return;
        };
        let mut l = render_loop.borrow_mut();
        if doc.hidden() {
            l.suspend();
        } else {
            l.resume();
        }
    })
}
