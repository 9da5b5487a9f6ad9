#![cfg(target_arch = "wasm32")]
use backdrop_core::{Scene, SceneConfig, Theme};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod render;

use dom::Subscriptions;
use events::HostInput;
use frame::{FrameContext, RenderLoop, SharedFrame};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    Ok(())
}

struct Engine {
    frame: SharedFrame,
    render_loop: Rc<RefCell<RenderLoop>>,
    // Dropping removes every listener
    _subs: Subscriptions,
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.render_loop.borrow_mut().dispose();
    }
}

async fn build(canvas_id: &str, config_json: Option<&str>) -> anyhow::Result<Engine> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    // Checked before anything else so an unsupported browser sees no DOM change
    if !dom::has_webgpu(&window) {
        return Err(backdrop_core::BackdropError::GraphicsUnavailable(
            "navigator.gpu is missing".into(),
        )
        .into());
    }
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::find_canvas(&document, canvas_id)?;
    let config = match config_json {
        Some(json) => SceneConfig::from_json(json)?,
        None => SceneConfig::default(),
    };

    let theme = Theme::from_attribute(dom::theme_attribute(&document).as_deref());
    let viewport = dom::sync_canvas_backing_size(&canvas, config.max_pixel_ratio);
    let scene = Scene::init(config, theme, viewport)?;
    let gpu = render::GpuState::new(&canvas, &document, &scene)
        .await
        .map_err(|e| backdrop_core::BackdropError::GraphicsUnavailable(e.to_string()))?;

    let input = Rc::new(RefCell::new(HostInput::default()));
    let frame = Rc::new(RefCell::new(FrameContext {
        scene,
        gpu,
        canvas,
        input: input.clone(),
        last_instant: None,
    }));
    let render_loop = RenderLoop::new(frame.clone());

    let mut subs = Subscriptions::default();
    events::wire_all(&window, &document, &input, &render_loop, &mut subs)
        .map_err(|e| anyhow::anyhow!("listener setup failed: {:?}", e))?;

    {
        let mut l = render_loop.borrow_mut();
        l.start();
        if document.hidden() {
            l.suspend();
        }
    }
    Ok(Engine {
        frame,
        render_loop,
        _subs: subs,
    })
}

/// Animated page backdrop bound to one canvas. An instance whose setup
/// failed is inert: every method is a no-op.
#[wasm_bindgen]
pub struct Backdrop {
    engine: Option<Engine>,
}

#[wasm_bindgen]
impl Backdrop {
    /// Find the canvas (default `#bg3d`), check WebGPU, build the scene and
    /// start the loop. `config_json` holds optional `SceneConfig` overrides.
    pub async fn init(canvas_id: Option<String>, config_json: Option<String>) -> Backdrop {
        let id = canvas_id.unwrap_or_else(|| constants::DEFAULT_CANVAS_ID.to_string());
        match build(&id, config_json.as_deref()).await {
            Ok(engine) => Backdrop {
                engine: Some(engine),
            },
            Err(e) => {
                log::warn!("[backdrop] disabled: {:#}", e);
                Backdrop { engine: None }
            }
        }
    }

    #[wasm_bindgen(js_name = setTheme)]
    pub fn set_theme(&self, is_dark: bool) {
        self.apply_theme(Theme::from_is_dark(is_dark));
    }

    /// Same as `setTheme` but takes the raw theme attribute value.
    #[wasm_bindgen(js_name = setThemeAttribute)]
    pub fn set_theme_attribute(&self, value: Option<String>) {
        self.apply_theme(Theme::from_attribute(value.as_deref()));
    }

    pub fn start(&self) {
        if let Some(engine) = &self.engine {
            engine.render_loop.borrow_mut().start();
        }
    }

    pub fn stop(&self) {
        if let Some(engine) = &self.engine {
            engine.render_loop.borrow_mut().stop();
        }
    }

    pub fn resize(&self) {
        if let Some(engine) = &self.engine {
            engine.frame.borrow_mut().resize();
        }
    }

    /// Stop, detach listeners and release GPU resources.
    pub fn dispose(&mut self) {
        if self.engine.take().is_some() {
            log::info!("[backdrop] disposed");
        }
    }

    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.engine.is_some()
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.engine
            .as_ref()
            .is_some_and(|e| e.render_loop.borrow().is_running())
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> u32 {
        self.read(|s| s.particles().len())
    }

    #[wasm_bindgen(js_name = connectionCount)]
    pub fn connection_count(&self) -> u32 {
        self.read(|s| s.connections().active())
    }

    #[wasm_bindgen(js_name = decorationCount)]
    pub fn decoration_count(&self) -> u32 {
        self.read(|s| s.decorations().len())
    }
}

impl Backdrop {
    fn apply_theme(&self, theme: Theme) {
        if let Some(engine) = &self.engine {
            engine.frame.borrow_mut().scene.on_theme_change(theme);
        }
    }

    fn read(&self, f: impl FnOnce(&Scene) -> usize) -> u32 {
        self.engine
            .as_ref()
            .map(|e| f(&e.frame.borrow().scene) as u32)
            .unwrap_or(0)
    }
}
