use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

mod canvas;
mod component;
mod runtime;

pub use canvas::CanvasSurface;
pub use component::NeuralBackground;
pub use runtime::CanvasAnimation;

/// Mount the demo page: a full-window hero background.
pub fn start() {
    mount_to_body(|| view! { <App /> });
}

fn window_size() -> (u32, u32) {
    let Some(w) = web_sys::window() else {
        return (0, 0);
    };
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32;
    (dim(w.inner_width()), dim(w.inner_height()))
}

#[component]
fn App() -> impl IntoView {
    let (size, set_size) = signal(window_size());

    if let Some(window) = web_sys::window() {
        let cb = Closure::wrap(Box::new(move || {
            set_size.set(window_size());
        }) as Box<dyn FnMut()>);
        match window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref()) {
            // Lives as long as the page.
            Ok(()) => cb.forget(),
            Err(_) => web_sys::console::warn_1(&"neuronet: failed to watch resize".into()),
        }
    }

    let width = Signal::derive(move || size.get().0);
    let height = Signal::derive(move || size.get().1);

    view! {
        <div style="position: fixed; inset: 0; background: linear-gradient(135deg, #111827, #1e3a8a, #111827);">
            <NeuralBackground
                width=width
                height=height
                neuron_count=100
                color="#4FD1C5"
                max_connections=5
                interactive=true
                mouse_radius=180.0
                pulse_enabled=true
            />
        </div>
    }
}
