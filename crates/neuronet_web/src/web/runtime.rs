use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use neuronet::animation::{Animation, FrameScheduler};
use neuronet::config::NetworkConfig;

use super::canvas::CanvasSurface;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;
type PointerCallback = Closure<dyn FnMut(web_sys::MouseEvent)>;

/// `requestAnimationFrame` scheduler.
///
/// The callback lives in a shared slot that is filled before the first
/// request; an empty slot means the host is shutting down and no frame is
/// requested.
pub(super) struct RafScheduler {
    window: web_sys::Window,
    callback: FrameCallback,
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Option<i32> {
        let slot = self.callback.borrow();
        let cb = slot.as_ref()?;
        self.window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel_frame(&mut self, handle: i32) {
        let _ = self.window.cancel_animation_frame(handle);
    }
}

struct Mounted {
    anim: Animation<RafScheduler>,
    surface: CanvasSurface,
}

struct PointerListeners {
    on_move: PointerCallback,
    on_leave: PointerCallback,
}

/// A running animation bound to one canvas element.
///
/// Dropping it (or calling [`unmount`](Self::unmount)) cancels the pending
/// frame and detaches the pointer listeners.
pub struct CanvasAnimation {
    canvas: web_sys::HtmlCanvasElement,
    state: Rc<RefCell<Option<Mounted>>>,
    frame_cb: FrameCallback,
    listeners: Option<PointerListeners>,
}

impl CanvasAnimation {
    pub fn mount(canvas: &web_sys::HtmlCanvasElement, cfg: NetworkConfig) -> Result<Self, String> {
        let window = web_sys::window().ok_or("no window".to_string())?;
        cfg.validate().map_err(|e| e.to_string())?;

        canvas.set_width(cfg.width as u32);
        canvas.set_height(cfg.height as u32);
        let surface = CanvasSurface::from_canvas(canvas)?;

        let state: Rc<RefCell<Option<Mounted>>> = Rc::new(RefCell::new(None));
        let frame_cb: FrameCallback = Rc::new(RefCell::new(None));

        // The callback only holds a weak handle so the Rc cycle through the
        // scheduler never keeps the state alive.
        let weak = Rc::downgrade(&state);
        *frame_cb.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            with_mounted(&weak, |m| m.anim.on_frame(&mut m.surface));
        }) as Box<dyn FnMut()>));

        let scheduler = RafScheduler {
            window,
            callback: Rc::clone(&frame_cb),
        };
        let anim = Animation::start(cfg, scheduler).map_err(|e| e.to_string())?;
        *state.borrow_mut() = Some(Mounted { anim, surface });

        let listeners = if cfg.interactive {
            Some(attach_pointer_listeners(canvas, &state)?)
        } else {
            None
        };

        Ok(Self {
            canvas: canvas.clone(),
            state,
            frame_cb,
            listeners,
        })
    }

    /// Rebuild the network at a new canvas size.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let mut state = self.state.borrow_mut();
        match state.as_mut() {
            Some(m) => m
                .anim
                .resize(width as f32, height as f32)
                .map_err(|e| e.to_string()),
            None => Ok(()),
        }
    }

    /// Stop the animation and detach listeners. Safe to call more than once.
    pub fn unmount(&mut self) {
        if let Some(listeners) = self.listeners.take() {
            let _ = self.canvas.remove_event_listener_with_callback(
                "mousemove",
                listeners.on_move.as_ref().unchecked_ref(),
            );
            let _ = self.canvas.remove_event_listener_with_callback(
                "mouseleave",
                listeners.on_leave.as_ref().unchecked_ref(),
            );
        }
        if let Some(mut m) = self.state.borrow_mut().take() {
            m.anim.teardown();
        }
        self.frame_cb.borrow_mut().take();
    }
}

impl Drop for CanvasAnimation {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn with_mounted(weak: &Weak<RefCell<Option<Mounted>>>, f: impl FnOnce(&mut Mounted)) {
    let Some(state) = weak.upgrade() else {
        return;
    };
    let Ok(mut slot) = state.try_borrow_mut() else {
        return;
    };
    if let Some(m) = slot.as_mut() {
        f(m);
    }
}

fn attach_pointer_listeners(
    canvas: &web_sys::HtmlCanvasElement,
    state: &Rc<RefCell<Option<Mounted>>>,
) -> Result<PointerListeners, String> {
    let on_move = {
        let weak = Rc::downgrade(state);
        let canvas = canvas.clone();
        Closure::wrap(Box::new(move |ev: web_sys::MouseEvent| {
            let rect = canvas.get_bounding_client_rect();
            let x = ev.client_x() as f64 - rect.left();
            let y = ev.client_y() as f64 - rect.top();
            with_mounted(&weak, |m| m.anim.pointer_moved(x as f32, y as f32));
        }) as Box<dyn FnMut(web_sys::MouseEvent)>)
    };
    let on_leave = {
        let weak = Rc::downgrade(state);
        Closure::wrap(Box::new(move |_ev: web_sys::MouseEvent| {
            with_mounted(&weak, |m| m.anim.pointer_left());
        }) as Box<dyn FnMut(web_sys::MouseEvent)>)
    };

    canvas
        .add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())
        .map_err(|_| "canvas: failed to attach mousemove".to_string())?;
    if canvas
        .add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())
        .is_err()
    {
        // on_move is about to be dropped; it must not stay registered.
        let _ = canvas
            .remove_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref());
        return Err("canvas: failed to attach mouseleave".to_string());
    }

    Ok(PointerListeners { on_move, on_leave })
}
