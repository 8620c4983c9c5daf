//! Piece atlas — the twelve piece images, scaled for the current board.
//!
//! Built fresh at the start of every render and owned by that render.

use std::collections::HashMap;

use resvg::tiny_skia::Pixmap;
use tracing::debug;

use super::images::{crop_and_scale, load_rgba, pixmap_to_rgba};
use super::sprites;
use super::surface::Surface;
use crate::error::{RenderError, Result};
use crate::fen::{BoardRows, Piece};
use crate::geometry::{BoardGeometry, Rect};
use crate::model::{Pieces, PiecesSource};
use crate::square::invert;

#[derive(Debug)]
pub struct PieceAtlas {
    images: HashMap<Piece, Pixmap>,
    size: u32,
}

impl PieceAtlas {
    /// Load and scale all twelve pieces for squares of `edge` pixels.
    pub fn build(pieces: &Pieces, edge: f64) -> Result<Self> {
        let size = (edge * pieces.factor).round().max(1.0) as u32;
        let mut images = HashMap::with_capacity(12);

        match &pieces.source {
            PiecesSource::Embedded => {
                let sheet = pixmap_to_rgba(&sprites::sheet_pixmap()?);
                for (piece, rect) in sprites::sheet_rects() {
                    images.insert(piece, crop_and_scale(&sheet, rect, size)?);
                }
            }
            PiecesSource::Images { pieces } => {
                let declared = declared_pieces(pieces.iter().map(|p| p.piece.as_str()))?;
                for (piece, entry) in declared.into_iter().zip(pieces) {
                    let img = load_rgba(&entry.path)?;
                    let full = Rect::new(0.0, 0.0, img.width() as f64, img.height() as f64);
                    images.insert(piece, crop_and_scale(&img, full, size)?);
                }
            }
            PiecesSource::ImageMap { path, pieces } => {
                let declared = declared_pieces(pieces.iter().map(|p| p.piece.as_str()))?;
                let sheet = load_rgba(path)?;
                for (piece, entry) in declared.into_iter().zip(pieces) {
                    let img = crop_and_scale(&sheet, entry.rect, size)
                        .map_err(|e| RenderError::Config(format!("piece {piece} in '{path}': {e}")))?;
                    images.insert(piece, img);
                }
            }
        }

        debug!(size, pieces = images.len(), "built piece atlas");
        Ok(Self { images, size })
    }

    pub fn get(&self, piece: Piece) -> Option<&Pixmap> {
        self.images.get(&piece)
    }

    /// Edge length of every piece image.
    pub fn size(&self) -> u32 {
        self.size
    }
}

/// Map configured codes to pieces; all twelve must appear exactly once.
fn declared_pieces<'a>(codes: impl Iterator<Item = &'a str>) -> Result<Vec<Piece>> {
    let mut seen = Vec::with_capacity(12);
    for code in codes {
        let piece = Piece::from_code(code)
            .ok_or_else(|| RenderError::Config(format!("unknown piece code '{code}'")))?;
        if seen.contains(&piece) {
            return Err(RenderError::Config(format!("piece {piece} declared twice")));
        }
        seen.push(piece);
    }
    if let Some(missing) = Piece::ALL.iter().find(|p| !seen.contains(p)) {
        return Err(RenderError::Config(format!("piece {missing} is missing")));
    }
    Ok(seen)
}

// ═══════════════════════════════════════════════════════════════════════
// Piece stage
// ═══════════════════════════════════════════════════════════════════════

/// Draw every piece of the normalized position, centered in its square.
pub(super) fn render_pieces(
    surface: &mut dyn Surface,
    geometry: &BoardGeometry,
    board: &BoardRows,
    atlas: &PieceAtlas,
) -> Result<()> {
    for (row, cells) in board.iter().enumerate() {
        // rows[0] is the 8th rank
        let rank = invert(row as i32);
        for (file, cell) in cells.iter().enumerate() {
            let Some(piece) = cell else { continue };
            let image = atlas
                .get(*piece)
                .ok_or_else(|| RenderError::Config(format!("no image for piece {piece}")))?;

            let (mut x, mut y) = (file as i32, rank);
            if geometry.inverted {
                (x, y) = (invert(x), invert(y));
            }
            let square = geometry.square_box(x, y);
            let offset = (square.width - image.width() as f64) / 2.0;
            surface.draw_image(image, square.x + offset, square.y + offset);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImagePiece;

    fn embedded(factor: f64) -> Pieces {
        Pieces {
            factor,
            source: PiecesSource::Embedded,
        }
    }

    #[test]
    fn embedded_atlas_has_all_pieces_at_square_size() {
        let atlas = PieceAtlas::build(&embedded(1.0), 50.0).unwrap();
        for piece in Piece::ALL {
            let img = atlas.get(piece).unwrap();
            assert_eq!((img.width(), img.height()), (50, 50));
        }
    }

    #[test]
    fn factor_scales_pieces() {
        let atlas = PieceAtlas::build(&embedded(0.8), 50.0).unwrap();
        assert_eq!(atlas.size(), 40);
    }

    #[test]
    fn incomplete_declarations_are_rejected() {
        let codes = ["WK", "WQ", "WR", "WB", "WN", "WP", "BK", "BQ", "BR", "BB", "BN"];
        let err = declared_pieces(codes.into_iter()).unwrap_err();
        assert!(err.to_string().contains("BP is missing"), "{err}");

        let dup = ["WK", "WK"];
        assert!(declared_pieces(dup.into_iter()).unwrap_err().to_string().contains("twice"));

        assert!(declared_pieces(["XX"].into_iter()).is_err());
    }

    #[test]
    fn missing_piece_files_fail_fast() {
        let pieces = Pieces {
            factor: 1.0,
            source: PiecesSource::Images {
                pieces: Piece::ALL
                    .iter()
                    .map(|p| ImagePiece {
                        piece: p.code().to_string(),
                        path: format!("/no/such/dir/{}.png", p.code()),
                    })
                    .collect(),
            },
        };
        assert!(matches!(
            PieceAtlas::build(&pieces, 50.0),
            Err(RenderError::Resource { .. })
        ));
    }
}
