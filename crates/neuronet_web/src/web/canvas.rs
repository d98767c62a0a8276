use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use neuronet::config::Color;
use neuronet::surface::{Point, Surface};

/// [`Surface`] backed by a canvas 2D context.
///
/// Every primitive restores `globalAlpha` to 1.0 so state never leaks between
/// calls.
pub struct CanvasSurface {
    ctx: web_sys::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn from_canvas(canvas: &web_sys::HtmlCanvasElement) -> Result<Self, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "canvas: get_context threw".to_string())?
            .ok_or("canvas: missing 2d context".to_string())?
            .dyn_into::<web_sys::CanvasRenderingContext2d>()
            .map_err(|_| "canvas: context is not 2d".to_string())?;
        Ok(Self { ctx })
    }

    fn circle_path(&self, center: Point, radius: f32) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            0.0,
            std::f64::consts::PI * 2.0,
        );
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx
            .fill_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Color, alpha: f32, line_width: f32) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_stroke_style_str(&color.to_hex());
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_line_width(line_width as f64);
        self.ctx.stroke();
        self.ctx.set_global_alpha(1.0);
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color, alpha: f32) {
        self.circle_path(center, radius);
        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.fill();
        self.ctx.set_global_alpha(1.0);
    }

    #[allow(deprecated)]
    fn fill_glow(&mut self, center: Point, radius: f32, color: Color, inner_alpha: f32, alpha: f32) {
        let (x, y, r) = (center.x as f64, center.y as f64, radius.max(0.0) as f64);
        let Ok(gradient) = self.ctx.create_radial_gradient(x, y, 0.0, x, y, r) else {
            return;
        };
        let _ = gradient.add_color_stop(0.0, &color.to_css_rgba(inner_alpha));
        let _ = gradient.add_color_stop(1.0, "transparent");

        self.circle_path(center, radius);
        self.ctx.set_fill_style(&JsValue::from(gradient));
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.fill();
        self.ctx.set_global_alpha(1.0);
    }
}
