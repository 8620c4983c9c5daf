//! Drawing surface — the primitives the render stages are written against.
//!
//! [`PixmapSurface`] implements them on a tiny-skia pixmap; text goes through
//! usvg's layout so every font is measured the same way.

use std::sync::Arc;

use resvg::tiny_skia::{self, FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform};
use resvg::usvg;
use tracing::debug;

use super::svg_builder::{rasterize_onto, SvgBuilder};
use crate::error::{RenderError, Result};
use crate::geometry::{Point, Rect};
use crate::model::Color;

/// Painter's-algorithm canvas: every call draws over what is already there.
pub trait Surface {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64);
    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);
    fn stroke_circle(&mut self, center: Point, radius: f64, color: Color, width: f64);
    fn stroke_line(&mut self, from: Point, to: Point, color: Color, width: f64);
    fn fill_polygon(&mut self, points: &[Point], color: Color);
    /// Blit `image` with its top-left corner at (x, y).
    fn draw_image(&mut self, image: &Pixmap, x: f64, y: f64);
    /// Draw `text` centered on `center`.
    fn draw_text(&mut self, text: &str, center: Point, size: f64, color: Color) -> Result<()>;
}

// ═══════════════════════════════════════════════════════════════════════
// Fonts
// ═══════════════════════════════════════════════════════════════════════

/// Face used when no font file is configured.
const FALLBACK_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Font database plus the family name every text element asks for.
#[derive(Clone)]
pub struct FontBook {
    fontdb: Arc<usvg::fontdb::Database>,
    family: String,
}

impl FontBook {
    /// Load the font at `path`, or use the bundled fallback face when `None`.
    /// The fallback is always loaded so missing glyphs can still be drawn.
    pub fn new(path: Option<&str>) -> Result<Self> {
        let mut db = usvg::fontdb::Database::new();

        let family = match path {
            Some(path) => {
                db.load_font_file(path).map_err(|e| RenderError::resource(path, e))?;
                let family = first_family(&db).ok_or_else(|| RenderError::resource(path, "no usable font face"))?;
                debug!(path, family = %family, "loaded font file");
                db.load_font_data(FALLBACK_FONT.to_vec());
                family
            }
            None => {
                db.load_font_data(FALLBACK_FONT.to_vec());
                let family = first_family(&db)
                    .ok_or_else(|| RenderError::Config("bundled fallback font has no usable face".to_string()))?;
                debug!(family = %family, "using bundled fallback font");
                family
            }
        };
        db.set_sans_serif_family(family.clone());

        Ok(Self {
            fontdb: Arc::new(db),
            family,
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    /// Rasterize an SVG document onto `target` with these fonts.
    pub(super) fn rasterize(&self, svg: &str, target: &mut Pixmap, scale: f32) -> Result<()> {
        let mut options = usvg::Options::default();
        options.fontdb = Arc::clone(&self.fontdb);
        rasterize_onto(svg, &options, target, scale)
    }
}

fn first_family(db: &usvg::fontdb::Database) -> Option<String> {
    db.faces()
        .next()
        .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("family", &self.family)
            .field("faces", &self.fontdb.len())
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PixmapSurface
// ═══════════════════════════════════════════════════════════════════════

pub struct PixmapSurface<'a> {
    pixmap: Pixmap,
    fonts: &'a FontBook,
}

impl<'a> PixmapSurface<'a> {
    pub fn new(width: u32, height: u32, fonts: &'a FontBook) -> Result<Self> {
        let pixmap = Pixmap::new(width, height)
            .ok_or_else(|| RenderError::Surface(format!("unable to allocate a {width}x{height} canvas")))?;
        Ok(Self { pixmap, fonts })
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    fn fill_path(&mut self, path: Option<tiny_skia::Path>, color: Color) {
        if let Some(path) = path {
            self.pixmap
                .fill_path(&path, &paint(color), FillRule::Winding, Transform::identity(), None);
        }
    }

    fn stroke_path(&mut self, path: Option<tiny_skia::Path>, color: Color, width: f64) {
        if let Some(path) = path {
            let stroke = Stroke {
                width: width as f32,
                ..Stroke::default()
            };
            self.pixmap
                .stroke_path(&path, &paint(color), &stroke, Transform::identity(), None);
        }
    }
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(rect.x as f32, rect.y as f32, rect.width as f32, rect.height as f32)
}

impl Surface for PixmapSurface<'_> {
    fn clear(&mut self, color: Color) {
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        if let Some(r) = skia_rect(rect) {
            self.pixmap.fill_rect(r, &paint(color), Transform::identity(), None);
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        self.stroke_path(skia_rect(rect).map(PathBuilder::from_rect), color, width);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        if radius <= 0.0 {
            return;
        }
        self.fill_path(
            PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32),
            color,
        );
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, color: Color, width: f64) {
        if radius <= 0.0 {
            return;
        }
        self.stroke_path(
            PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32),
            color,
            width,
        );
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Color, width: f64) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        self.stroke_path(pb.finish(), color, width);
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        if rest.len() < 2 {
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(first.x as f32, first.y as f32);
        for p in rest {
            pb.line_to(p.x as f32, p.y as f32);
        }
        pb.close();
        self.fill_path(pb.finish(), color);
    }

    fn draw_image(&mut self, image: &Pixmap, x: f64, y: f64) {
        self.pixmap.draw_pixmap(
            x.round() as i32,
            y.round() as i32,
            image.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    fn draw_text(&mut self, text: &str, center: Point, size: f64, color: Color) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let mut svg = SvgBuilder::new(self.pixmap.width() as f64, self.pixmap.height() as f64);
        svg.centered_text(
            center.x,
            center.y,
            text,
            size,
            self.fonts.family(),
            &color.hex_rgb(),
            color.opacity(),
        );
        self.fonts.rasterize(&svg.build(), &mut self.pixmap, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fonts() -> FontBook {
        FontBook::new(None).unwrap()
    }

    #[test]
    fn fill_rect_paints_inside_only() {
        let fonts = fonts();
        let mut s = PixmapSurface::new(10, 10, &fonts).unwrap();
        s.fill_rect(Rect::new(0.0, 0.0, 5.0, 10.0), Color::rgba(0, 0, 255, 255));
        let px = s.into_pixmap();
        assert_eq!(px.pixel(2, 5).unwrap().blue(), 255);
        assert_eq!(px.pixel(8, 5).unwrap().alpha(), 0);
    }

    #[test]
    fn later_draws_cover_earlier_ones() {
        let fonts = fonts();
        let mut s = PixmapSurface::new(10, 10, &fonts).unwrap();
        s.clear(Color::rgba(255, 0, 0, 255));
        s.fill_polygon(
            &[Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0), Point::new(0.0, 10.0)],
            Color::rgba(0, 255, 0, 255),
        );
        let px = s.into_pixmap().pixel(5, 5).unwrap();
        assert_eq!((px.red(), px.green()), (0, 255));
    }

    #[test]
    fn degenerate_shapes_are_ignored() {
        let fonts = fonts();
        let mut s = PixmapSurface::new(4, 4, &fonts).unwrap();
        s.fill_rect(Rect::new(1.0, 1.0, 0.0, 0.0), Color::rgba(0, 0, 0, 255));
        s.fill_circle(Point::new(2.0, 2.0), 0.0, Color::rgba(0, 0, 0, 255));
        s.fill_polygon(&[], Color::rgba(0, 0, 0, 255));
        assert!(s.into_pixmap().pixels().iter().all(|p| p.alpha() == 0));
    }

    fn inked(pixmap: &Pixmap) -> usize {
        pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
    }

    #[test]
    fn fallback_font_draws_glyphs() {
        let fonts = fonts();
        assert_eq!(fonts.family(), "DejaVu Sans");

        let mut s = PixmapSurface::new(120, 60, &fonts).unwrap();
        s.draw_text("WWW", Point::new(60.0, 30.0), 30.0, Color::rgba(0, 0, 0, 255)).unwrap();
        assert!(inked(&s.into_pixmap()) > 100);
    }

    #[test]
    fn empty_text_draws_nothing() {
        let fonts = fonts();
        let mut s = PixmapSurface::new(40, 40, &fonts).unwrap();
        s.draw_text("", Point::new(20.0, 20.0), 20.0, Color::rgba(0, 0, 0, 255)).unwrap();
        assert_eq!(inked(&s.into_pixmap()), 0);
    }

    #[test]
    fn missing_font_file_is_a_resource_error() {
        let err = FontBook::new(Some("/definitely/not/here.ttf")).unwrap_err();
        assert!(matches!(err, RenderError::Resource { .. }));
    }
}
