//! Embedded piece sheet — twelve piece silhouettes on a 6×2 grid.
//!
//! Row 0 holds the white pieces, row 1 the black ones, both in the order
//! king, queen, bishop, knight, rook, pawn. Each cell is drawn in a
//! 100×100 unit box and the sheet is rasterized at [`SPRITE_CELL_PX`].

use resvg::tiny_skia::Pixmap;
use resvg::usvg;

use super::constants::*;
use super::svg_builder::{rasterize_onto, SvgBuilder};
use crate::error::{RenderError, Result};
use crate::fen::Piece;
use crate::geometry::Rect;

#[derive(Clone, Copy)]
enum Kind {
    King,
    Queen,
    Bishop,
    Knight,
    Rook,
    Pawn,
}

const SHEET_ORDER: [Kind; 6] = [Kind::King, Kind::Queen, Kind::Bishop, Kind::Knight, Kind::Rook, Kind::Pawn];

fn cell_of(piece: Piece) -> (u32, u32) {
    let row = if piece.is_white() { 0 } else { 1 };
    let col = match piece {
        Piece::WhiteKing | Piece::BlackKing => 0,
        Piece::WhiteQueen | Piece::BlackQueen => 1,
        Piece::WhiteBishop | Piece::BlackBishop => 2,
        Piece::WhiteKnight | Piece::BlackKnight => 3,
        Piece::WhiteRook | Piece::BlackRook => 4,
        Piece::WhitePawn | Piece::BlackPawn => 5,
    };
    (col, row)
}

/// Pixel rectangles of every piece in the rasterized sheet.
pub(super) fn sheet_rects() -> Vec<(Piece, Rect)> {
    let cell = SPRITE_CELL_PX as f64;
    Piece::ALL
        .iter()
        .map(|&piece| {
            let (col, row) = cell_of(piece);
            (piece, Rect::new(col as f64 * cell, row as f64 * cell, cell, cell))
        })
        .collect()
}

pub(super) fn sheet_svg() -> String {
    let mut sheet = SvgBuilder::new(
        SPRITE_COLUMNS as f64 * SPRITE_UNITS,
        SPRITE_ROWS as f64 * SPRITE_UNITS,
    );
    for row in 0..SPRITE_ROWS {
        let white = row == 0;
        for (col, kind) in SHEET_ORDER.iter().enumerate() {
            sheet.group(col as f64 * SPRITE_UNITS, row as f64 * SPRITE_UNITS, draw_piece(*kind, white));
        }
    }
    sheet.build()
}

/// Rasterize the embedded sheet.
pub(super) fn sheet_pixmap() -> Result<Pixmap> {
    let width = SPRITE_COLUMNS * SPRITE_CELL_PX;
    let height = SPRITE_ROWS * SPRITE_CELL_PX;
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| RenderError::Surface("unable to allocate the piece sheet".to_string()))?;
    let scale = (SPRITE_CELL_PX as f64 / SPRITE_UNITS) as f32;
    rasterize_onto(&sheet_svg(), &usvg::Options::default(), &mut pixmap, scale)?;
    Ok(pixmap)
}

// ═══════════════════════════════════════════════════════════════════════
// Silhouettes (100×100 cell)
// ═══════════════════════════════════════════════════════════════════════

fn draw_piece(kind: Kind, white: bool) -> SvgBuilder {
    let (fill, stroke) = if white {
        (WHITE_PIECE_FILL, WHITE_PIECE_STROKE)
    } else {
        (BLACK_PIECE_FILL, BLACK_PIECE_STROKE)
    };
    let detail = if white { WHITE_PIECE_STROKE } else { BLACK_PIECE_DETAIL };
    let sw = PIECE_STROKE_WIDTH;

    let mut svg = SvgBuilder::new(SPRITE_UNITS, SPRITE_UNITS);
    match kind {
        Kind::Pawn => {
            svg.path("M40,46 L60,46 L57,54 L66,80 L34,80 L43,54 Z", fill, stroke, sw);
            svg.circle(50.0, 34.0, 12.0, fill, stroke, sw);
            svg.rect(26.0, 80.0, 48.0, 9.0, fill, stroke, sw);
        }
        Kind::Rook => {
            svg.path(
                "M27,18 L36,18 L36,26 L45,26 L45,18 L55,18 L55,26 L64,26 L64,18 L73,18 \
                 L73,36 L65,42 L67,76 L33,76 L35,42 L27,36 Z",
                fill, stroke, sw,
            );
            svg.path("M35,42 L65,42", "none", detail, 2.0);
            svg.rect(23.0, 76.0, 54.0, 12.0, fill, stroke, sw);
        }
        Kind::Bishop => {
            svg.path("M50,18 C65,30 67,46 59,58 L41,58 C33,46 35,30 50,18 Z", fill, stroke, sw);
            svg.path("M50,32 L50,46 M43,39 L57,39", "none", detail, 2.5);
            svg.circle(50.0, 13.0, 5.0, fill, stroke, sw);
            svg.path("M40,58 L60,58 L65,78 L35,78 Z", fill, stroke, sw);
            svg.rect(24.0, 78.0, 52.0, 10.0, fill, stroke, sw);
        }
        Kind::Knight => {
            svg.path(
                "M34,86 L72,86 L70,62 C74,42 68,24 50,17 L46,9 L40,19 \
                 C31,26 23,40 21,53 L28,60 L38,51 L45,49 C40,61 32,71 34,86 Z",
                fill, stroke, sw,
            );
            svg.circle(38.0, 32.0, 3.0, detail, "none", 0.0);
        }
        Kind::Queen => {
            svg.path("M20,34 L33,62 L37,26 L50,58 L63,26 L67,62 L80,34 L71,76 L29,76 Z", fill, stroke, sw);
            for (cx, cy) in [(20.0, 30.0), (37.0, 22.0), (50.0, 20.0), (63.0, 22.0), (80.0, 30.0)] {
                svg.circle(cx, cy, 5.0, fill, stroke, sw);
            }
            svg.rect(25.0, 76.0, 50.0, 11.0, fill, stroke, sw);
        }
        Kind::King => {
            svg.path("M47,8 L53,8 L53,14 L59,14 L59,20 L53,20 L53,30 L47,30 L47,20 L41,20 L41,14 L47,14 Z", fill, stroke, sw);
            svg.path("M30,76 C18,54 28,36 50,40 C72,36 82,54 70,76 Z", fill, stroke, sw);
            svg.path("M36,64 L64,64", "none", detail, 2.0);
            svg.rect(25.0, 76.0, 50.0, 11.0, fill, stroke, sw);
        }
    }
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_has_twelve_distinct_cells() {
        let rects = sheet_rects();
        assert_eq!(rects.len(), 12);
        for (i, (_, a)) in rects.iter().enumerate() {
            for (_, b) in rects.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn white_row_on_top_black_row_below() {
        let rects = sheet_rects();
        let find = |p: Piece| rects.iter().find(|(q, _)| *q == p).map(|(_, r)| *r).unwrap();
        assert_eq!(find(Piece::WhiteKing).y, 0.0);
        assert_eq!(find(Piece::BlackKing).y, SPRITE_CELL_PX as f64);
        assert_eq!(find(Piece::WhitePawn).x, 5.0 * SPRITE_CELL_PX as f64);
    }

    #[test]
    fn every_cell_has_ink() {
        let sheet = sheet_pixmap().unwrap();
        for (piece, rect) in sheet_rects() {
            let (cx, cy) = ((rect.x + rect.width / 2.0) as u32, (rect.y + rect.height * 0.8) as u32);
            let px = sheet.pixel(cx, cy).unwrap();
            assert!(px.alpha() > 0, "{piece} cell is empty");
        }
    }
}
