//! Highlighted squares.

use super::surface::Surface;
use crate::error::Result;
use crate::geometry::{BoardGeometry, Point, Rect};
use crate::model::{resolve, HighlightKind, HighlightStyle, HighlightedSquare};
use crate::square::SquareRef;

pub(super) fn render_highlights(
    surface: &mut dyn Surface,
    geometry: &BoardGeometry,
    highlights: &[HighlightedSquare],
    default_style: &HighlightStyle,
) -> Result<()> {
    for high in highlights {
        let square = SquareRef::parse_square(&high.square, geometry.inverted)?;
        let (x, y) = square.coords();
        let style = resolve(high.style.as_ref(), default_style);
        highlight_square(surface, geometry.square_box(x, y), style);
    }
    Ok(())
}

fn highlight_square(surface: &mut dyn Surface, square: Rect, style: &HighlightStyle) {
    match style.kind {
        HighlightKind::Full => surface.fill_rect(square, style.color),
        HighlightKind::Border => {
            // keep the stroke inside the square
            let bw = style.width;
            let inset = Rect::new(square.x + bw / 2.0, square.y + bw / 2.0, square.width - bw, square.height - bw);
            surface.stroke_rect(inset, style.color, bw);
        }
        HighlightKind::Circle => {
            let bb = square.shrink(style.factor);
            surface.stroke_circle(bb.center(), bb.width / 2.0, style.color, style.width);
        }
        HighlightKind::FilledCircle => {
            let bb = square.shrink(style.factor);
            surface.fill_circle(bb.center(), bb.width / 2.0, style.color);
        }
        HighlightKind::Cross => {
            let bb = square.shrink(style.factor);
            let (x, y, w, h) = (bb.x, bb.y, bb.width, bb.height);
            surface.stroke_line(Point::new(x, y), Point::new(x + w, y + h), style.color, style.width);
            surface.stroke_line(Point::new(x + w, y), Point::new(x, y + h), style.color, style.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::testing::{Op, RecordingSurface};
    use crate::error::RenderError;

    fn style(kind: HighlightKind) -> HighlightStyle {
        HighlightStyle::new(kind, "#ff000080", 4.0, 0.5).unwrap()
    }

    fn entry(square: &str, style: Option<HighlightStyle>) -> HighlightedSquare {
        HighlightedSquare { square: square.to_string(), style }
    }

    #[test]
    fn full_fills_the_square() {
        let g = BoardGeometry::drawn(400.0, 0.0, false);
        let mut s = RecordingSurface::default();
        render_highlights(&mut s, &g, &[entry("a8", None)], &style(HighlightKind::Full)).unwrap();
        assert_eq!(s.ops, vec![Op::FillRect(Rect::new(0.0, 0.0, 50.0, 50.0))]);
    }

    #[test]
    fn border_stays_inside_the_square() {
        let g = BoardGeometry::drawn(400.0, 0.0, false);
        let mut s = RecordingSurface::default();
        render_highlights(&mut s, &g, &[entry("a8", Some(style(HighlightKind::Border)))], &style(HighlightKind::Full))
            .unwrap();
        assert_eq!(s.ops, vec![Op::StrokeRect(Rect::new(2.0, 2.0, 46.0, 46.0), 4.0)]);
    }

    #[test]
    fn circles_use_the_shrunk_square() {
        let g = BoardGeometry::drawn(400.0, 0.0, false);
        let mut s = RecordingSurface::default();
        let entries = [
            entry("a8", Some(style(HighlightKind::Circle))),
            entry("a8", Some(style(HighlightKind::FilledCircle))),
        ];
        render_highlights(&mut s, &g, &entries, &style(HighlightKind::Full)).unwrap();
        assert_eq!(
            s.ops,
            vec![
                Op::StrokeCircle(Point::new(25.0, 25.0), 12.5, 4.0),
                Op::FillCircle(Point::new(25.0, 25.0), 12.5),
            ]
        );
    }

    #[test]
    fn cross_strokes_both_diagonals() {
        let g = BoardGeometry::drawn(400.0, 0.0, false);
        let mut s = RecordingSurface::default();
        render_highlights(&mut s, &g, &[entry("a8", None)], &style(HighlightKind::Cross)).unwrap();
        assert_eq!(
            s.ops,
            vec![
                Op::StrokeLine(Point::new(12.5, 12.5), Point::new(37.5, 37.5), 4.0),
                Op::StrokeLine(Point::new(37.5, 12.5), Point::new(12.5, 37.5), 4.0),
            ]
        );
    }

    #[test]
    fn bad_square_aborts() {
        let g = BoardGeometry::drawn(400.0, 0.0, false);
        let mut s = RecordingSurface::default();
        let err = render_highlights(&mut s, &g, &[entry("j9", None)], &style(HighlightKind::Full)).unwrap_err();
        assert!(matches!(err, RenderError::InvalidSquare { .. }));
    }
}
