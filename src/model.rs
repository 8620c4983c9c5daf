//! Settings and per-render context records.
//!
//! Settings are plain serde structures, normally loaded from JSON. The
//! embedded `default_settings.json` backs [`Settings::default`].

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};
use crate::geometry::Rect;

const DEFAULT_SETTINGS: &str = include_str!("default_settings.json");

// ═══════════════════════════════════════════════════════════════════════
// Colors
// ═══════════════════════════════════════════════════════════════════════

/// RGBA color, written as "#RRGGBB" or "#RRGGBBAA" in settings files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// "#rrggbb" without alpha, for SVG fill attributes.
    pub fn hex_rgb(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }
}

impl FromStr for Color {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim_start_matches('#');
        let hex = match hex.len() {
            6 => format!("{hex}ff"),
            8 => hex.to_string(),
            _ => return Err(RenderError::InvalidColor(s.to_string())),
        };
        if !hex.is_ascii() {
            return Err(RenderError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| RenderError::InvalidColor(s.to_string()))
        };
        Ok(Color {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: channel(6)?,
        })
    }
}

impl TryFrom<String> for Color {
    type Error = RenderError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        c.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Settings
// ═══════════════════════════════════════════════════════════════════════

/// Everything that controls how a board image looks.
///
/// `order` lists render stage indexes (0 border, 1 board, 2 rank and file,
/// 3 highlights, 4 pieces, 5 annotations, 6 moves). Empty means 0..=6.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub order: Vec<usize>,
    pub border: Border,
    pub board: Board,
    #[serde(default)]
    pub rank_and_file: RankAndFile,
    pub pieces: Pieces,
    #[serde(default)]
    pub font_style: FontStyle,
    pub highlight_style: HighlightStyle,
    pub annotation_style: AnnotationStyle,
    pub move_style: MoveStyle,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Settings> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Settings> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| RenderError::resource(path.display().to_string(), e))?;
        Settings::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::from_json(DEFAULT_SETTINGS).expect("embedded default settings are valid")
    }
}

/// Border drawn around the default board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub width: f64,
    pub color: Color,
}

/// Either a drawn checkerboard or a background image.
/// Border and rank/file labels only apply to the drawn board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Board {
    Default {
        /// Board size without the border; should be divisible by 8.
        size: f64,
        white: Color,
        black: Color,
    },
    Image {
        path: String,
        /// Where the playing field sits inside the image.
        rect: Rect,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankAndFileKind {
    #[default]
    None,
    InBorder,
    InSquares,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankAndFile {
    #[serde(rename = "type")]
    pub kind: RankAndFileKind,
    pub font_color: Color,
    pub font_size: f64,
}

impl Default for RankAndFile {
    fn default() -> Self {
        Self {
            kind: RankAndFileKind::None,
            font_color: Color::rgba(0xff, 0xff, 0xff, 0xff),
            font_size: 14.0,
        }
    }
}

/// Where piece images come from and how large they are drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pieces {
    /// Piece size relative to the square (1.0 fills it).
    #[serde(default = "default_piece_factor")]
    pub factor: f64,
    pub source: PiecesSource,
}

fn default_piece_factor() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PiecesSource {
    /// The piece sheet built into the crate.
    Embedded,
    /// One image file per piece.
    Images { pieces: Vec<ImagePiece> },
    /// One image holding all twelve pieces, located by rectangles.
    ImageMap { path: String, pieces: Vec<ImageMapPiece> },
}

/// `piece` is one of "WK","WQ","WR","WN","WB","WP","BK","BQ","BR","BN","BB","BP".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePiece {
    pub piece: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMapPiece {
    pub piece: String,
    pub rect: Rect,
}

/// Font used for labels and annotations; `None` falls back to the system sans-serif.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FontStyle {
    #[serde(default)]
    pub path: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// Styles
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightKind {
    Full,
    Border,
    Circle,
    FilledCircle,
    Cross,
}

/// `width` is the line width for Border, Circle and Cross.
/// `factor` sizes Circle, FilledCircle and Cross relative to the square.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightStyle {
    #[serde(rename = "type")]
    pub kind: HighlightKind,
    pub color: Color,
    #[serde(default)]
    pub width: f64,
    #[serde(default = "default_style_factor")]
    pub factor: f64,
}

impl HighlightStyle {
    pub fn new(kind: HighlightKind, color: &str, width: f64, factor: f64) -> Result<Self> {
        Ok(Self {
            kind,
            color: color.parse()?,
            width,
            factor,
        })
    }
}

fn default_style_factor() -> f64 {
    0.5
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Middle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationStyle {
    pub position: AnnotationPosition,
    /// Diameter of the annotation badge.
    pub size: f64,
    pub font_color: Color,
    pub font_size: f64,
    pub background_color: Color,
    pub border_color: Color,
    pub border_width: f64,
}

impl AnnotationStyle {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        position: AnnotationPosition,
        size: f64,
        font_size: f64,
        border_width: f64,
        background_color: &str,
        font_color: &str,
        border_color: &str,
    ) -> Result<Self> {
        Ok(Self {
            position,
            size,
            font_color: font_color.parse()?,
            font_size,
            background_color: background_color.parse()?,
            border_color: border_color.parse()?,
            border_width,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    Dotted,
    Arrow,
}

/// `color2` paints the rook's indicator when castling.
/// `padding` separates the two castling indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveStyle {
    #[serde(rename = "type")]
    pub kind: MoveKind,
    pub color: Color,
    pub color2: Color,
    #[serde(default = "default_style_factor")]
    pub factor: f64,
    #[serde(default)]
    pub padding: f64,
}

impl MoveStyle {
    pub fn new(kind: MoveKind, color: &str, color2: &str, factor: f64, padding: f64) -> Result<Self> {
        Ok(Self {
            kind,
            color: color.parse()?,
            color2: color2.parse()?,
            factor,
            padding,
        })
    }
}

/// An item's own style if it has one, otherwise the configured default.
pub fn resolve<'a, T>(style: Option<&'a T>, default: &'a T) -> &'a T {
    style.unwrap_or(default)
}

// ═══════════════════════════════════════════════════════════════════════
// Image context
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightedSquare {
    pub square: String,
    #[serde(default)]
    pub style: Option<HighlightStyle>,
}

/// A very short text (usually "!", "??", "#") drawn in a badge on a square.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub square: String,
    pub text: String,
    #[serde(default)]
    pub style: Option<AnnotationStyle>,
}

/// A move indicator. Either end may be a castling token: "0-0" → "" castles
/// on the bottom rank, "" → "0-0" on the top rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub style: Option<MoveStyle>,
}

/// Overlays for one rendered image, plus whether the board is seen from black's side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageContext {
    #[serde(default)]
    pub highlights: Vec<HighlightedSquare>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub moves: Vec<Move>,
    #[serde(default)]
    pub inverted: bool,
}

impl ImageContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inverted(mut self) -> Self {
        self.inverted = true;
        self
    }

    pub fn add_highlight(&mut self, square: &str) -> &mut Self {
        self.highlights.push(HighlightedSquare {
            square: square.to_string(),
            style: None,
        });
        self
    }

    pub fn add_highlight_with_style(&mut self, square: &str, style: HighlightStyle) -> &mut Self {
        self.highlights.push(HighlightedSquare {
            square: square.to_string(),
            style: Some(style),
        });
        self
    }

    pub fn add_annotation(&mut self, square: &str, text: &str) -> &mut Self {
        self.annotations.push(Annotation {
            square: square.to_string(),
            text: text.to_string(),
            style: None,
        });
        self
    }

    pub fn add_annotation_with_style(&mut self, square: &str, text: &str, style: AnnotationStyle) -> &mut Self {
        self.annotations.push(Annotation {
            square: square.to_string(),
            text: text.to_string(),
            style: Some(style),
        });
        self
    }

    pub fn add_move(&mut self, from: &str, to: &str) -> &mut Self {
        self.moves.push(Move {
            from: from.to_string(),
            to: to.to_string(),
            style: None,
        });
        self
    }

    pub fn add_move_with_style(&mut self, from: &str, to: &str, style: MoveStyle) -> &mut Self {
        self.moves.push(Move {
            from: from.to_string(),
            to: to.to_string(),
            style: Some(style),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_hex_colors() {
        assert_eq!("#ff8000".parse::<Color>().unwrap(), Color::rgba(255, 128, 0, 255));
        assert_eq!("11223344".parse::<Color>().unwrap(), Color::rgba(0x11, 0x22, 0x33, 0x44));
        assert!("#fff".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
        assert!("#ff00000000".parse::<Color>().is_err());
    }

    #[test]
    fn color_serializes_as_hex() {
        let c = Color::rgba(1, 2, 3, 4);
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#01020304\"");
        let back: Color = serde_json::from_str("\"#010203\"").unwrap();
        assert_eq!(back, Color::rgba(1, 2, 3, 255));
    }

    #[test]
    fn embedded_defaults_decode() {
        let s = Settings::default();
        assert!(s.order.is_empty());
        assert!(matches!(s.board, Board::Default { .. }));
        assert_eq!(s.pieces.source, PiecesSource::Embedded);
        assert!(s.font_style.path.is_none());
    }

    #[test]
    fn settings_roundtrip_through_json() {
        let s = Settings::default();
        let json = s.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), s);
    }

    #[test]
    fn unknown_highlight_kind_is_rejected() {
        let json = r##"{"type": "triangle", "color": "#ff0000"}"##;
        assert!(serde_json::from_str::<HighlightStyle>(json).is_err());
    }

    #[test]
    fn resolve_prefers_the_own_style() {
        let default = HighlightStyle::new(HighlightKind::Full, "#000000", 0.0, 1.0).unwrap();
        let own = HighlightStyle::new(HighlightKind::Cross, "#ff0000", 3.0, 0.5).unwrap();
        assert_eq!(resolve(Some(&own), &default), &own);
        assert_eq!(resolve(None, &default), &default);
    }

    #[test]
    fn context_builder_collects_overlays() {
        let mut ctx = ImageContext::new();
        ctx.add_highlight("e4").add_annotation("e4", "!!").add_move("e2", "e4").add_move("0-0", "");
        assert_eq!(ctx.highlights.len(), 1);
        assert_eq!(ctx.annotations[0].text, "!!");
        assert_eq!(ctx.moves[1].from, "0-0");
        assert!(!ctx.inverted);
        assert!(ctx.clone().inverted().inverted);
    }
}
