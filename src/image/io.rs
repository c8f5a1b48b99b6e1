//! Loading frames and edge maps through the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{ImageView, OwnedImage};
use crate::util::{PupilError, PupilResult};
use std::path::Path;

/// Borrows the pixels of a decoded 8-bit grayscale image.
pub fn view_from_gray_image(img: &image::GrayImage) -> PupilResult<ImageView<'_, u8>> {
    ImageView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Copies a decoded 8-bit grayscale image into an owned frame.
pub fn owned_from_gray_image(img: &image::GrayImage) -> PupilResult<OwnedImage> {
    OwnedImage::from_view(view_from_gray_image(img)?)
}

/// Converts any decoded image to an owned luma frame.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> PupilResult<OwnedImage> {
    let gray = img.to_luma8();
    let (width, height) = (gray.width() as usize, gray.height() as usize);
    OwnedImage::new(gray.into_raw(), width, height)
}

fn open(path: &Path) -> PupilResult<image::DynamicImage> {
    image::open(path).map_err(|err| PupilError::ImageIo {
        reason: format!("{}: {err}", path.display()),
    })
}

/// Loads an eye frame from disk as grayscale.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> PupilResult<OwnedImage> {
    owned_from_dynamic_image(&open(path.as_ref())?)
}

/// Loads a binary edge map; pixels above `threshold` become 255, the rest 0.
pub fn load_edge_map<P: AsRef<Path>>(path: P, threshold: u8) -> PupilResult<OwnedImage> {
    let mut edges = load_gray_image(path)?;
    for px in edges.data_mut() {
        *px = if *px > threshold { 255 } else { 0 };
    }
    Ok(edges)
}
