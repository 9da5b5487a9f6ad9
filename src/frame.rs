use crate::constants::clamp_frame_delta;
use crate::dom;
use crate::events::{HostInput, SharedInput};
use crate::render::GpuState;
use backdrop_core::{LoopControl, Scene};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub scene: Scene,
    pub gpu: GpuState,
    pub canvas: web::HtmlCanvasElement,
    pub input: SharedInput,
    /// `None` right after (re)start so the first tick has a zero delta.
    pub last_instant: Option<Instant>,
}

pub type SharedFrame = Rc<RefCell<FrameContext>>;

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = self
            .last_instant
            .map(|prev| (now - prev).as_secs_f32())
            .unwrap_or(0.0);
        self.last_instant = Some(now);
        let dt = Duration::from_secs_f32(clamp_frame_delta(dt_sec));

        let HostInput {
            targets,
            resize_pending,
        } = {
            let mut input = self.input.borrow_mut();
            let snapshot = *input;
            input.resize_pending = false;
            snapshot
        };
        if resize_pending {
            self.resize();
        }

        self.scene.tick(dt, &targets);

        match self.gpu.render(&self.scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost, reconfiguring");
                self.gpu.reconfigure();
            }
            Err(e) => log::error!("[gpu] render error: {:?}", e),
        }
    }

    /// Re-read the canvas size and pixel ratio; updates the backing store,
    /// the camera aspect and the surface.
    pub fn resize(&mut self) {
        let viewport =
            dom::sync_canvas_backing_size(&self.canvas, self.scene.config().max_pixel_ratio);
        self.scene.on_resize(viewport);
        let (w, h) = self.scene.viewport().backing_size();
        self.gpu.resize_if_needed(w, h);
    }
}

/// requestAnimationFrame driver. Running, stopped and hidden-tab states
/// live in [`LoopControl`].
pub struct RenderLoop {
    control: LoopControl,
    frame: SharedFrame,
    handle: Option<i32>,
    callback: Option<Closure<dyn FnMut()>>,
}

impl RenderLoop {
    pub fn new(frame: SharedFrame) -> Rc<RefCell<Self>> {
        let this = Rc::new(RefCell::new(Self {
            control: LoopControl::default(),
            frame: frame.clone(),
            handle: None,
            callback: None,
        }));
        let weak = Rc::downgrade(&this);
        let callback = Closure::wrap(Box::new(move || {
            let Some(this) = weak.upgrade() else {
                return;
            };
            {
                let mut l = this.borrow_mut();
                l.handle = None;
                if !l.control.is_running() {
                    return;
                }
            }
            frame.borrow_mut().frame();
            this.borrow_mut().request_next();
        }) as Box<dyn FnMut()>);
        this.borrow_mut().callback = Some(callback);
        this
    }

    fn request_next(&mut self) {
        if !self.control.is_running() {
            return;
        }
        let (Some(window), Some(callback)) = (web::window(), self.callback.as_ref()) else {
            self.control.stop();
            return;
        };
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => self.handle = Some(id),
            Err(e) => {
                log::error!("[loop] requestAnimationFrame failed: {:?}", e);
                self.control.stop();
            }
        }
    }

    fn cancel_pending(&mut self) {
        if let (Some(id), Some(window)) = (self.handle.take(), web::window()) {
            _ = window.cancel_animation_frame(id);
        }
    }

    /// Schedule the first frame after a start or resume with a zero delta.
    fn kick(&mut self) {
        self.frame.borrow_mut().last_instant = None;
        self.request_next();
    }

    pub fn is_running(&self) -> bool {
        self.control.is_running()
    }

    pub fn start(&mut self) -> bool {
        if !self.control.start() {
            return false;
        }
        self.kick();
        log::info!("[loop] running");
        true
    }

    pub fn stop(&mut self) -> bool {
        if !self.control.stop() {
            return false;
        }
        self.cancel_pending();
        log::info!("[loop] stopped");
        true
    }

    /// Page hidden. Only a running loop is paused.
    pub fn suspend(&mut self) {
        if self.control.suspend() {
            self.cancel_pending();
            log::info!("[loop] suspended");
        }
    }

    /// Page visible again. Restarts only a loop that `suspend` paused.
    pub fn resume(&mut self) {
        if self.control.resume() {
            self.kick();
            log::info!("[loop] resumed");
        }
    }

    /// Stop and release the frame callback. The loop cannot run again.
    pub fn dispose(&mut self) {
        self.stop();
        self.callback = None;
    }
}
