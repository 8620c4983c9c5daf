//! Raster image helpers — decoding files and moving pixels between
//! `image` buffers (straight alpha) and tiny-skia pixmaps (premultiplied).

use image::imageops::{self, FilterType};
use image::RgbaImage;
use resvg::tiny_skia::{ColorU8, Pixmap};

use crate::error::{RenderError, Result};
use crate::geometry::Rect;

/// Decode an image file into RGBA8.
pub(crate) fn load_rgba(path: &str) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|e| RenderError::resource(path, e))?;
    Ok(img.to_rgba8())
}

pub(crate) fn rgba_to_pixmap(img: &RgbaImage) -> Result<Pixmap> {
    let (w, h) = img.dimensions();
    let mut pixmap = Pixmap::new(w, h)
        .ok_or_else(|| RenderError::Surface(format!("unable to allocate a {w}x{h} image")))?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(img.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}

pub(crate) fn pixmap_to_rgba(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        dst.0 = [c.red(), c.green(), c.blue(), c.alpha()];
    }
    img
}

/// Crop `rect` out of `sheet` and resize it to a `size`×`size` pixmap.
///
/// Every piece source ends up here, so all pieces are scaled the same way.
pub(crate) fn crop_and_scale(sheet: &RgbaImage, rect: Rect, size: u32) -> Result<Pixmap> {
    let (w, h) = sheet.dimensions();
    let (x, y) = (rect.x.round(), rect.y.round());
    let (cw, ch) = (rect.width.round(), rect.height.round());
    if x < 0.0 || y < 0.0 || cw < 1.0 || ch < 1.0 || x + cw > w as f64 || y + ch > h as f64 {
        return Err(RenderError::Config(format!(
            "rectangle {rect:?} does not fit inside a {w}x{h} image"
        )));
    }

    let cropped = imageops::crop_imm(sheet, x as u32, y as u32, cw as u32, ch as u32).to_image();
    let size = size.max(1);
    let scaled = imageops::resize(&cropped, size, size, FilterType::Lanczos3);
    rgba_to_pixmap(&scaled)
}
