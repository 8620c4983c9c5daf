//! SVG builder — accumulates SVG elements and produces the final string.
//!
//! Used for the two things the raster surface cannot do on its own: laying
//! out text and drawing the embedded piece sheet. The resulting documents
//! are rasterized with resvg.

use resvg::{tiny_skia, usvg};

use crate::error::{RenderError, Result};

pub(super) struct SvgBuilder {
    pub(super) elements: Vec<String>,
    width: f64,
    height: f64,
}

impl SvgBuilder {
    pub(super) fn new(width: f64, height: f64) -> Self {
        Self {
            elements: Vec::new(),
            width,
            height,
        }
    }

    pub(super) fn build(self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">"#,
            self.width, self.height, self.width, self.height
        );
        svg.push('\n');
        for el in &self.elements {
            svg.push_str("  ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    pub(super) fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str, stroke: &str, stroke_width: f64) {
        if stroke_width > 0.0 {
            self.elements.push(format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" stroke="{}" stroke-width="{:.1}" stroke-linejoin="round"/>"#,
                x, y, w, h, fill, stroke, stroke_width
            ));
        } else {
            self.elements.push(format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
                x, y, w, h, fill
            ));
        }
    }

    pub(super) fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str, stroke: &str, stroke_width: f64) {
        self.elements.push(format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" stroke="{}" stroke-width="{:.1}"/>"#,
            cx, cy, r, fill, stroke, stroke_width
        ));
    }

    pub(super) fn path(&mut self, d: &str, fill: &str, stroke: &str, stroke_width: f64) {
        self.elements.push(format!(
            r#"<path d="{}" fill="{}" stroke="{}" stroke-width="{:.1}" stroke-linejoin="round" stroke-linecap="round"/>"#,
            d, fill, stroke, stroke_width
        ));
    }

    /// Text centered on (x, y) both horizontally and vertically.
    pub(super) fn centered_text(&mut self, x: f64, y: f64, content: &str, size: f64, family: &str, fill: &str, opacity: f64) {
        let escaped = content
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        self.elements.push(format!(
            r#"<text x="{:.1}" y="{:.1}" font-family="{}" font-size="{:.1}" fill="{}" fill-opacity="{:.3}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
            x, y, family, size, fill, opacity, escaped
        ));
    }

    /// Wrap the elements in a translated group (used to place sprite cells).
    pub(super) fn group(&mut self, dx: f64, dy: f64, inner: SvgBuilder) {
        self.elements.push(format!(r#"<g transform="translate({dx:.1},{dy:.1})">"#));
        self.elements.extend(inner.elements);
        self.elements.push("</g>".to_string());
    }
}

/// Parse `svg` and paint it onto `target`, scaled by `scale`.
pub(super) fn rasterize_onto(
    svg: &str,
    options: &usvg::Options,
    target: &mut tiny_skia::Pixmap,
    scale: f32,
) -> Result<()> {
    let tree = usvg::Tree::from_str(svg, options).map_err(|e| RenderError::Surface(format!("SVG parse error: {e}")))?;
    let mut canvas = target.as_mut();
    resvg::render(&tree, tiny_skia::Transform::from_scale(scale, scale), &mut canvas);
    Ok(())
}
