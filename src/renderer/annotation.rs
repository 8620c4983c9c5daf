//! Annotation badges ("!", "??", "#") in a corner of a square.

use super::constants::ANNOTATION_INSET;
use super::surface::Surface;
use crate::error::Result;
use crate::geometry::{BoardGeometry, Rect};
use crate::model::{resolve, Annotation, AnnotationPosition, AnnotationStyle};
use crate::square::SquareRef;

pub(super) fn render_annotations(
    surface: &mut dyn Surface,
    geometry: &BoardGeometry,
    annotations: &[Annotation],
    default_style: &AnnotationStyle,
) -> Result<()> {
    for annotation in annotations {
        let style = resolve(annotation.style.as_ref(), default_style);
        let square = SquareRef::parse_square(&annotation.square, geometry.inverted)?;
        let (x, y) = square.coords();
        let badge = badge_rect(geometry.square_box(x, y), style);

        let center = badge.center();
        let radius = badge.width / 2.0;
        surface.fill_circle(center, radius, style.border_color);
        surface.fill_circle(center, radius - style.border_width, style.background_color);
        surface.draw_text(&annotation.text, center, style.font_size, style.font_color)?;
    }
    Ok(())
}

/// Badge of `style.size` anchored inside `square`.
pub(super) fn badge_rect(square: Rect, style: &AnnotationStyle) -> Rect {
    let size = style.size;
    let left = square.x + ANNOTATION_INSET;
    let right = square.x + square.width - size - ANNOTATION_INSET;
    let top = square.y + ANNOTATION_INSET;
    let bottom = square.y + square.height - size - ANNOTATION_INSET;

    let (x, y) = match style.position {
        AnnotationPosition::TopLeft => (left, top),
        AnnotationPosition::TopRight => (right, top),
        AnnotationPosition::BottomLeft => (left, bottom),
        AnnotationPosition::BottomRight => (right, bottom),
        AnnotationPosition::Middle => (
            square.x + (square.width - size) / 2.0,
            square.y + (square.height - size) / 2.0,
        ),
    };
    Rect::new(x, y, size, size)
}
