//! chessimager — renders chess positions to images.
//!
//! A position comes in as a FEN string; highlights, annotations and move
//! indicators (dots or arrows, castling included) can be drawn on top.
//!
//! # Example
//! ```no_run
//! use chessimager::{ImageContext, Imager, Settings};
//!
//! let imager = Imager::new(Settings::default()).unwrap();
//! let mut ctx = ImageContext::new();
//! ctx.add_highlight("e4").add_move("e2", "e4").add_annotation("e4", "!");
//!
//! let png = imager
//!     .render_png("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1", &ctx)
//!     .unwrap();
//! std::fs::write("position.png", png).unwrap();
//! ```

pub mod error;
pub mod fen;
pub mod geometry;
pub mod model;
pub mod renderer;
pub mod square;

use std::path::Path;

use resvg::tiny_skia::Pixmap;
use tracing::debug;

pub use error::{RenderError, Result};
pub use model::*;
pub use renderer::{validate_order, Stage};

use renderer::{images, FontBook, PixmapSurface, RenderSession};

/// Renders positions with one fixed set of settings.
///
/// Fonts and the board background are loaded once, up front. Every render
/// builds its own session, so an `Imager` can be shared between threads.
#[derive(Debug)]
pub struct Imager {
    settings: Settings,
    order: Vec<Stage>,
    fonts: FontBook,
    board_image: Option<Pixmap>,
}

impl Imager {
    /// Apply `settings`, loading every resource they name.
    /// Fails on a bad render order or a missing font or board image.
    pub fn new(settings: Settings) -> Result<Self> {
        let order = validate_order(&settings.order)?;
        let fonts = FontBook::new(settings.font_style.path.as_deref())?;

        let board_image = match &settings.board {
            Board::Image { path, .. } => {
                let image = images::rgba_to_pixmap(&images::load_rgba(path)?)?;
                debug!(path = %path, width = image.width(), height = image.height(), "loaded board image");
                Some(image)
            }
            Board::Default { .. } => None,
        };

        Ok(Self {
            settings,
            order,
            fonts,
            board_image,
        })
    }

    /// Load a settings JSON file and apply it.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(Settings::load(path)?)
    }

    /// Change the stage order; `[]` restores the default.
    /// An invalid order is rejected and the current one kept.
    pub fn set_order(&mut self, order: &[usize]) -> Result<()> {
        self.order = validate_order(order)?;
        self.settings.order = order.to_vec();
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn order(&self) -> &[Stage] {
        &self.order
    }

    /// Render a bare position, seen from white's side.
    pub fn render(&self, fen: &str) -> Result<Pixmap> {
        self.render_with_context(fen, &ImageContext::default())
    }

    /// Render a bare position, seen from black's side.
    pub fn render_inverted(&self, fen: &str) -> Result<Pixmap> {
        self.render_with_context(fen, &ImageContext::new().inverted())
    }

    /// Render a position with the highlights, annotations and moves in `ctx`.
    pub fn render_with_context(&self, fen: &str, ctx: &ImageContext) -> Result<Pixmap> {
        let session = RenderSession::new(&self.settings, ctx, fen, self.board_image.as_ref())?;
        let (width, height) = session.geometry().canvas_size();
        let mut surface = PixmapSurface::new(width, height, &self.fonts)?;
        renderer::render(&self.order, &session, &mut surface)?;
        Ok(surface.into_pixmap())
    }

    /// Same as [`Imager::render_with_context`], encoded as PNG.
    pub fn render_png(&self, fen: &str, ctx: &ImageContext) -> Result<Vec<u8>> {
        self.render_with_context(fen, ctx)?
            .encode_png()
            .map_err(|e| RenderError::Surface(format!("png encoding failed: {e}")))
    }
}
