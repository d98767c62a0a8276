use leptos::html;
use leptos::prelude::*;

use neuronet::config::{Background, Color, NetworkConfig};

use super::runtime::CanvasAnimation;

fn console_warn(msg: &str) {
    web_sys::console::warn_1(&format!("neuronet: {msg}").into());
}

/// Canvas background running the particle network.
///
/// The animation is mounted once the canvas exists and rebuilt whenever
/// `width` or `height` change; it is torn down with the component.
#[component]
pub fn NeuralBackground(
    #[prop(into)] width: Signal<u32>,
    #[prop(into)] height: Signal<u32>,
    #[prop(optional)] neuron_count: Option<usize>,
    #[prop(optional, into)] color: Option<String>,
    #[prop(optional, into)] background_color: Option<String>,
    #[prop(optional)] max_connections: Option<usize>,
    #[prop(default = true)] interactive: bool,
    #[prop(optional)] mouse_radius: Option<f32>,
    #[prop(default = true)] pulse_enabled: bool,
    #[prop(optional)] seed: Option<u64>,
) -> impl IntoView {
    let defaults = NetworkConfig::default();
    let color = match color.as_deref().map(str::parse::<Color>) {
        Some(Ok(c)) => c,
        Some(Err(e)) => {
            console_warn(&e.to_string());
            defaults.color
        }
        None => defaults.color,
    };
    let background = match background_color.as_deref().map(str::parse::<Background>) {
        Some(Ok(b)) => b,
        Some(Err(e)) => {
            console_warn(&e.to_string());
            Background::Transparent
        }
        None => Background::Transparent,
    };
    let base = NetworkConfig {
        neuron_count: neuron_count.unwrap_or(defaults.neuron_count),
        color,
        background,
        max_connections: max_connections.unwrap_or(defaults.max_connections),
        interactive,
        pointer_radius: mouse_radius.unwrap_or(defaults.pointer_radius),
        pulse_enabled,
        seed,
        ..defaults
    };

    let canvas_ref = NodeRef::<html::Canvas>::new();
    let mounted = StoredValue::new_local(None::<CanvasAnimation>);

    Effect::new(move |_| {
        let (w, h) = (width.get(), height.get());
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        mounted.update_value(|slot| match slot.as_mut() {
            Some(anim) => {
                if let Err(e) = anim.resize(w, h) {
                    console_warn(&e);
                }
            }
            None => match CanvasAnimation::mount(&canvas, base.with_size(w as f32, h as f32)) {
                Ok(anim) => *slot = Some(anim),
                Err(e) => console_warn(&e),
            },
        });
    });

    on_cleanup(move || {
        mounted.try_update_value(|slot| {
            if let Some(mut anim) = slot.take() {
                anim.unmount();
            }
        });
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width=move || width.get().to_string()
            height=move || height.get().to_string()
            class="neuronet-canvas"
            style="position: absolute; inset: 0; width: 100%; height: 100%; mix-blend-mode: screen;"
        />
    }
}
