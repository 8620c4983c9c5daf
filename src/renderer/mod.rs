//! Board renderer — composes a position and its overlays onto a canvas.
//!
//! Rendering is a fixed set of seven stages run in a configurable order.
//! Each stage paints over whatever earlier stages left behind, so the
//! order decides what ends up on top.

mod annotation;
mod arrows;
mod board;
mod constants;
pub(crate) mod images;
mod highlight;
mod moves;
mod pieces;
mod sprites;
mod surface;
mod svg_builder;

use resvg::tiny_skia::Pixmap;
use tracing::debug;

use crate::error::{RenderError, Result};
use crate::fen::{normalize_fen, validate_fen, BoardRows};
use crate::geometry::BoardGeometry;
use crate::model::{Board, ImageContext, Settings};

pub use arrows::{knight_direction, Hand};
pub use moves::{move_indicators, Indicator};
pub use pieces::PieceAtlas;
pub use surface::{FontBook, PixmapSurface, Surface};

// ═══════════════════════════════════════════════════════════════════════
// Stages
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Border,
    Board,
    RankAndFile,
    Highlight,
    Piece,
    Annotation,
    Move,
}

impl Stage {
    /// Default order, which is also the index order used in settings.
    pub const ALL: [Stage; 7] = [
        Stage::Border,
        Stage::Board,
        Stage::RankAndFile,
        Stage::Highlight,
        Stage::Piece,
        Stage::Annotation,
        Stage::Move,
    ];

    pub fn from_index(index: usize) -> Option<Stage> {
        Stage::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Check a configured order. Empty means the default order; anything else
/// must list each of the seven stage indices exactly once.
pub fn validate_order(order: &[usize]) -> Result<Vec<Stage>> {
    if order.is_empty() {
        return Ok(Stage::ALL.to_vec());
    }
    if order.len() != Stage::ALL.len() {
        return Err(RenderError::InvalidOrder(format!(
            "expected {} stages, got {}",
            Stage::ALL.len(),
            order.len()
        )));
    }

    let mut stages = Vec::with_capacity(order.len());
    for &index in order {
        let stage = Stage::from_index(index)
            .ok_or_else(|| RenderError::InvalidOrder(format!("stage index {index} is out of range 0..=6")))?;
        if stages.contains(&stage) {
            return Err(RenderError::InvalidOrder(format!("stage index {index} appears twice")));
        }
        stages.push(stage);
    }
    Ok(stages)
}

// ═══════════════════════════════════════════════════════════════════════
// Render session
// ═══════════════════════════════════════════════════════════════════════

/// Everything one render pass needs. Built per call and dropped afterwards,
/// so concurrent renders never share a piece atlas.
#[derive(Debug)]
pub struct RenderSession<'a> {
    settings: &'a Settings,
    context: &'a ImageContext,
    geometry: BoardGeometry,
    board: BoardRows,
    atlas: PieceAtlas,
    board_image: Option<&'a Pixmap>,
}

impl<'a> RenderSession<'a> {
    /// Validate `fen` and prepare geometry and pieces. Nothing is drawn yet.
    pub fn new(
        settings: &'a Settings,
        context: &'a ImageContext,
        fen: &str,
        board_image: Option<&'a Pixmap>,
    ) -> Result<Self> {
        validate_fen(fen)?;
        let board = normalize_fen(fen);

        let geometry = match &settings.board {
            Board::Default { size, .. } => BoardGeometry::drawn(*size, settings.border.width, context.inverted),
            Board::Image { path, rect } => {
                let image = board_image
                    .ok_or_else(|| RenderError::Config(format!("board image '{path}' was not loaded")))?;
                BoardGeometry::on_image(*rect, (image.width(), image.height()), context.inverted)
            }
        };
        if !(geometry.edge > 0.0) {
            return Err(RenderError::Config(format!("board is too small (square edge {})", geometry.edge)));
        }

        let atlas = PieceAtlas::build(&settings.pieces, geometry.edge)?;
        debug!(
            edge = geometry.edge,
            canvas = ?geometry.canvas_size(),
            inverted = geometry.inverted,
            "prepared render session"
        );

        Ok(Self {
            settings,
            context,
            geometry,
            board,
            atlas,
            board_image,
        })
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub fn board(&self) -> &BoardRows {
        &self.board
    }

    pub fn atlas(&self) -> &PieceAtlas {
        &self.atlas
    }
}

/// Run `order` against `surface`. The first failing stage aborts the render.
pub fn render(order: &[Stage], session: &RenderSession<'_>, surface: &mut dyn Surface) -> Result<()> {
    let settings = session.settings;
    let context = session.context;
    let geometry = &session.geometry;

    for &stage in order {
        debug!(?stage, "render stage");
        match stage {
            Stage::Border => board::render_border(surface, settings),
            Stage::Board => board::render_board(surface, settings, geometry, session.board_image)?,
            Stage::RankAndFile => board::render_rank_and_file(surface, settings, geometry)?,
            Stage::Highlight => {
                highlight::render_highlights(surface, geometry, &context.highlights, &settings.highlight_style)?
            }
            Stage::Piece => pieces::render_pieces(surface, geometry, &session.board, &session.atlas)?,
            Stage::Annotation => {
                annotation::render_annotations(surface, geometry, &context.annotations, &settings.annotation_style)?
            }
            Stage::Move => moves::render_moves(surface, geometry, &context.moves, &settings.move_style)?,
        }
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// Test support
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
pub(crate) mod testing {
    use resvg::tiny_skia::Pixmap;

    use super::Surface;
    use crate::error::Result;
    use crate::geometry::{Point, Rect};
    use crate::model::Color;

    /// One recorded drawing call. Colors are left out except for `Clear`.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Op {
        Clear(Color),
        FillRect(Rect),
        StrokeRect(Rect, f64),
        FillCircle(Point, f64),
        StrokeCircle(Point, f64, f64),
        StrokeLine(Point, Point, f64),
        FillPolygon(Vec<Point>),
        Image(f64, f64),
        Text(String, Point, f64),
    }

    #[derive(Debug, Default)]
    pub(crate) struct RecordingSurface {
        pub(crate) ops: Vec<Op>,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, color: Color) {
            self.ops.push(Op::Clear(color));
        }
        fn fill_rect(&mut self, rect: Rect, _: Color) {
            self.ops.push(Op::FillRect(rect));
        }
        fn stroke_rect(&mut self, rect: Rect, _: Color, width: f64) {
            self.ops.push(Op::StrokeRect(rect, width));
        }
        fn fill_circle(&mut self, center: Point, radius: f64, _: Color) {
            self.ops.push(Op::FillCircle(center, radius));
        }
        fn stroke_circle(&mut self, center: Point, radius: f64, _: Color, width: f64) {
            self.ops.push(Op::StrokeCircle(center, radius, width));
        }
        fn stroke_line(&mut self, from: Point, to: Point, _: Color, width: f64) {
            self.ops.push(Op::StrokeLine(from, to, width));
        }
        fn fill_polygon(&mut self, points: &[Point], _: Color) {
            self.ops.push(Op::FillPolygon(points.to_vec()));
        }
        fn draw_image(&mut self, _: &Pixmap, x: f64, y: f64) {
            self.ops.push(Op::Image(x, y));
        }
        fn draw_text(&mut self, text: &str, center: Point, size: f64, _: Color) -> Result<()> {
            self.ops.push(Op::Text(text.to_string(), center, size));
            Ok(())
        }
    }
}
