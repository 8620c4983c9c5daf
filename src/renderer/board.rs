//! Border, checkerboard and rank/file label stages.

use resvg::tiny_skia::Pixmap;

use super::constants::*;
use super::surface::Surface;
use crate::error::{RenderError, Result};
use crate::geometry::{BoardGeometry, Point, Rect};
use crate::model::{Board, RankAndFileKind, Settings};

// ═══════════════════════════════════════════════════════════════════════
// Border
// ═══════════════════════════════════════════════════════════════════════

/// Paint the whole canvas in the border color; the board covers the middle later.
pub(super) fn render_border(surface: &mut dyn Surface, settings: &Settings) {
    if let Board::Default { .. } = settings.board {
        surface.clear(settings.border.color);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Board
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn render_board(
    surface: &mut dyn Surface,
    settings: &Settings,
    geometry: &BoardGeometry,
    board_image: Option<&Pixmap>,
) -> Result<()> {
    match &settings.board {
        Board::Default { white, black, .. } => {
            surface.fill_rect(geometry.board_box(), *black);
            for rank in 0..8 {
                for file in 0..8 {
                    if (file + rank) % 2 == 1 {
                        surface.fill_rect(geometry.square_box(file, rank), *white);
                    }
                }
            }
            Ok(())
        }
        Board::Image { path, .. } => {
            let image = board_image
                .ok_or_else(|| RenderError::Config(format!("board image '{path}' was not loaded")))?;
            surface.draw_image(image, 0.0, 0.0);
            Ok(())
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Rank and file labels
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub(super) struct Label {
    pub(super) text: String,
    pub(super) center: Point,
}

pub(super) fn render_rank_and_file(
    surface: &mut dyn Surface,
    settings: &Settings,
    geometry: &BoardGeometry,
) -> Result<()> {
    let style = &settings.rank_and_file;
    for label in rank_and_file_labels(settings, geometry) {
        surface.draw_text(&label.text, label.center, style.font_size, style.font_color)?;
    }
    Ok(())
}

/// Where the 16 labels go; empty when labels are off or do not fit.
pub(super) fn rank_and_file_labels(settings: &Settings, geometry: &BoardGeometry) -> Vec<Label> {
    let style = &settings.rank_and_file;
    let border = settings.border.width;
    if !matches!(settings.board, Board::Default { .. }) || border < MIN_LABEL_BORDER {
        return Vec::new();
    }

    let edge = geometry.edge;
    let inverted = geometry.inverted;
    let rank_text = |n: i32| if inverted { (8 - n).to_string() } else { (n + 1).to_string() };
    let file_text = |n: i32| {
        let c = if inverted { b'h' - n as u8 } else { b'a' + n as u8 };
        (c as char).to_string()
    };

    let mut labels = Vec::with_capacity(16);
    match style.kind {
        RankAndFileKind::None => {}
        RankAndFileKind::InBorder => {
            let board = geometry.board_box();
            for i in 0..8 {
                let rank_box = Rect::new(geometry.origin.x, geometry.square_box(0, i).y, border, edge);
                let file_box = Rect::new(geometry.square_box(i, 0).x, board.y + board.height, edge, border);
                labels.push(Label { text: rank_text(i), center: rank_box.center() });
                labels.push(Label { text: file_text(i), center: file_box.center() });
            }
        }
        RankAndFileKind::InSquares => {
            let diff = (edge - style.font_size - IN_SQUARE_LABEL_PADDING) / 2.0;
            for i in 0..8 {
                let r = geometry.square_box(0, i).center();
                let f = geometry.square_box(i, 0).center();
                labels.push(Label { text: rank_text(i), center: Point::new(r.x - diff, r.y - diff) });
                labels.push(Label { text: file_text(i), center: Point::new(f.x + diff, f.y + diff) });
            }
        }
    }
    labels
}
