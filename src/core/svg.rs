//! SVG export for recorded frames.

use std::fmt::Write as _;

use crate::surface::DrawCommand;

/// Render a display list as a standalone SVG document.
///
/// Each glow gets its own `<radialGradient>` definition so the inner stop can
/// carry the stroke color.
pub fn render_svg(width: f32, height: f32, commands: &[DrawCommand]) -> String {
    let mut defs = String::new();
    let mut body = String::new();
    let mut glow_id = 0usize;

    for cmd in commands {
        // Writing into a String cannot fail.
        let _ = match cmd {
            DrawCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => writeln!(
                body,
                r#"  <rect x="{x:.2}" y="{y:.2}" width="{width:.2}" height="{height:.2}" fill="{color}"/>"#
            ),
            DrawCommand::Line {
                from,
                to,
                color,
                alpha,
                width,
            } => writeln!(
                body,
                r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{color}" stroke-opacity="{alpha:.3}" stroke-width="{width:.2}"/>"#,
                from.x, from.y, to.x, to.y
            ),
            DrawCommand::Circle {
                center,
                radius,
                color,
                alpha,
            } => writeln!(
                body,
                r#"  <circle cx="{:.2}" cy="{:.2}" r="{radius:.2}" fill="{color}" fill-opacity="{alpha:.3}"/>"#,
                center.x, center.y
            ),
            DrawCommand::Glow {
                center,
                radius,
                color,
                inner_alpha,
                alpha,
            } => {
                glow_id += 1;
                let _ = writeln!(
                    defs,
                    r#"    <radialGradient id="glow{glow_id}"><stop offset="0" stop-color="{color}" stop-opacity="{inner_alpha:.3}"/><stop offset="1" stop-color="{color}" stop-opacity="0"/></radialGradient>"#
                );
                writeln!(
                    body,
                    r#"  <circle cx="{:.2}" cy="{:.2}" r="{radius:.2}" fill="url(#glow{glow_id})" opacity="{alpha:.3}"/>"#,
                    center.x, center.y
                )
            }
        };
    }

    let mut out = String::with_capacity(defs.len() + body.len() + 256);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    if !defs.is_empty() {
        out.push_str("  <defs>\n");
        out.push_str(&defs);
        out.push_str("  </defs>\n");
    }
    out.push_str(&body);
    out.push_str("</svg>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;
    use crate::network::NeuralNetwork;
    use crate::surface::RecordingSurface;

    #[test]
    fn frame_exports_one_element_per_primitive() {
        let cfg = NetworkConfig::default()
            .with_size(200.0, 150.0)
            .with_neuron_count(6)
            .with_seed(21);
        let mut net = NeuralNetwork::new(cfg).unwrap();
        let mut surface = RecordingSurface::new();
        net.tick(&mut surface);

        let svg = render_svg(200.0, 150.0, surface.commands());
        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<line ").count(), surface.lines().count());
        // A fill circle plus a glow circle per neuron.
        assert_eq!(svg.matches("<circle ").count(), 12);
        assert_eq!(svg.matches("<radialGradient ").count(), 6);
        assert!(svg.contains("#4fd1c5"));
    }

    #[test]
    fn empty_frame_is_a_bare_document() {
        let svg = render_svg(10.0, 10.0, &[]);
        assert!(!svg.contains("<defs>"));
        assert_eq!(svg.lines().count(), 2);
    }
}
