//! Shared constants for the board renderer (all in pixels unless noted).

// ── Rank and file labels ────────────────────────────────────────────
pub(super) const MIN_LABEL_BORDER: f64 = 10.0; // narrower borders get no labels
pub(super) const IN_SQUARE_LABEL_PADDING: f64 = 3.0;

// ── Annotations ─────────────────────────────────────────────────────
pub(super) const ANNOTATION_INSET: f64 = 2.0; // gap between badge and square edge

// ── Castling ────────────────────────────────────────────────────────
pub(super) const CASTLING_KING_SQUARES: f64 = 1.5; // king arrow length, in squares
pub(super) const CASTLING_SHORT_ROOK_SQUARES: f64 = 1.5;
pub(super) const CASTLING_LONG_ROOK_SQUARES: f64 = 2.5;

// ── Embedded piece sheet ────────────────────────────────────────────
pub(super) const SPRITE_COLUMNS: u32 = 6;
pub(super) const SPRITE_ROWS: u32 = 2;
pub(super) const SPRITE_UNITS: f64 = 100.0; // SVG units per cell
pub(super) const SPRITE_CELL_PX: u32 = 160; // rasterized cell size before scaling

pub(super) const WHITE_PIECE_FILL: &str = "#fafafa";
pub(super) const WHITE_PIECE_STROKE: &str = "#1a1a1a";
pub(super) const BLACK_PIECE_FILL: &str = "#1a1a1a";
pub(super) const BLACK_PIECE_STROKE: &str = "#000000";
pub(super) const BLACK_PIECE_DETAIL: &str = "#e0e0e0";
pub(super) const PIECE_STROKE_WIDTH: f64 = 3.0;
