//! Fitting downloaded images to the exact card bitmap size

use crate::constants::*;
use crate::types::{CardImage, FitMode, PixelSize};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

/// Resize an image to exactly `target` pixels.
///
/// `Stretch` ignores the source aspect ratio. `Crop` keeps it and trims the
/// overhanging edges evenly. Either way the result is `target` sized; zero
/// target dimensions are raised to one pixel.
pub fn normalize_card(image: &RgbImage, target: PixelSize, mode: FitMode) -> CardImage {
    let width = target.width.max(1);
    let height = target.height.max(1);

    log::debug!(
        "Resizing image {}x{} -> {}x{}px ({:?})",
        image.width(),
        image.height(),
        width,
        height,
        mode
    );

    let mut pixels = match mode {
        FitMode::Stretch => imageops::resize(image, width, height, FilterType::Lanczos3),
        FitMode::Crop => {
            let cropped = center_crop_to_aspect(image, width, height);
            imageops::resize(&cropped, width, height, FilterType::Lanczos3)
        }
    };

    if pixels.dimensions() != (width, height) {
        log::warn!(
            "Size mismatch after resize ({}x{}), forcing {}x{}",
            pixels.width(),
            pixels.height(),
            width,
            height
        );
        pixels = imageops::resize(&pixels, width, height, FilterType::Lanczos3);
    }

    CardImage {
        pixels,
        caption: None,
    }
}

/// Cut the largest centered region of `image` whose aspect ratio matches
/// `width:height`.
///
/// The result is never larger than the source.
fn center_crop_to_aspect(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    let (src_w, src_h) = image.dimensions();
    if src_w == 0 || src_h == 0 {
        return image.clone();
    }

    let src_ratio = src_w as f64 / src_h as f64;
    let target_ratio = width as f64 / height as f64;

    let (crop_w, crop_h) = if src_ratio > target_ratio {
        // Wider than the card: keep full height, trim the sides
        let w = (src_h as f64 * target_ratio).round() as u32;
        (w.clamp(1, src_w), src_h)
    } else {
        // Taller than (or as tall as) the card: keep full width, trim top and bottom
        let h = (src_w as f64 / target_ratio).round() as u32;
        (src_w, h.clamp(1, src_h))
    };

    let left = (src_w - crop_w) / 2;
    let top = (src_h - crop_h) / 2;
    imageops::crop_imm(image, left, top, crop_w, crop_h).to_image()
}

/// Generate the "No Image" stand-in card.
///
/// Light grey with a darker border; the label itself is drawn over the slot
/// when the page is rendered.
pub fn placeholder_card(target: PixelSize) -> CardImage {
    let width = target.width.max(1);
    let height = target.height.max(1);

    let mut pixels = RgbImage::from_pixel(width, height, Rgb(PLACEHOLDER_BACKGROUND));
    for inset in 0..PLACEHOLDER_BORDER_WIDTH {
        if 2 * inset >= width || 2 * inset >= height {
            break;
        }
        let rect = Rect::at(inset as i32, inset as i32).of_size(width - 2 * inset, height - 2 * inset);
        draw_hollow_rect_mut(&mut pixels, rect, Rgb(PLACEHOLDER_BORDER));
    }

    CardImage {
        pixels,
        caption: Some(PLACEHOLDER_LABEL.to_string()),
    }
}
