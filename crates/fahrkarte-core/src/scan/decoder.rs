//! QR code detection and decoding over rasterized page images.

use image::{DynamicImage, GrayImage, Luma};
use tracing::{debug, trace};

use crate::pdf::PdfExtractor;

/// Scan a whole document: decode the images of every page in order and
/// accumulate all payloads found. Returns an empty list when the
/// document cannot be loaded or no page carries a readable code.
pub fn scan_document(bytes: &[u8]) -> Vec<String> {
    let extractor = match PdfExtractor::load(bytes) {
        Ok(extractor) => extractor,
        Err(e) => {
            debug!("barcode scan skipped, document unreadable: {e}");
            return Vec::new();
        }
    };

    let mut payloads = Vec::new();
    for page in 1..=extractor.page_count() {
        let images = extractor.page_images(page).unwrap_or_default();
        for image in &images {
            payloads.extend(scan_image(image));
        }
    }

    debug!("scanned {} payloads across {} pages", payloads.len(), extractor.page_count());
    payloads
}

/// Detect and decode all QR codes in one page image.
///
/// Decoding is biased toward recall: when the plain grayscale pass finds
/// nothing, a second pass runs over a mean-threshold binarization of the
/// image, which recovers codes from unevenly lit or low-contrast scans.
pub fn scan_image(image: &DynamicImage) -> Vec<String> {
    let gray = image.to_luma8();

    let payloads = decode_grids(&gray);
    if !payloads.is_empty() {
        return payloads;
    }

    decode_grids(&binarize(&gray))
}

fn decode_grids(gray: &GrayImage) -> Vec<String> {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        width as usize,
        height as usize,
        |x, y| gray.get_pixel(x as u32, y as u32).0[0],
    );

    prepared
        .detect_grids()
        .into_iter()
        .filter_map(|grid| match grid.decode() {
            Ok((_meta, content)) => Some(content),
            Err(e) => {
                trace!("grid decode failed: {e:?}");
                None
            }
        })
        .collect()
}

/// Threshold the image at its mean luminance.
fn binarize(gray: &GrayImage) -> GrayImage {
    let (width, height) = gray.dimensions();
    let total: u64 = gray.pixels().map(|p| u64::from(p.0[0])).sum();
    let count = u64::from(width) * u64::from(height);
    let mean = if count == 0 { 128 } else { (total / count) as u8 };

    GrayImage::from_fn(width, height, |x, y| {
        if gray.get_pixel(x, y).0[0] > mean {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use qrcode::{Color, QrCode};

    /// Render a QR code to a grayscale bitmap: `scale` pixels per module
    /// with a four-module quiet zone.
    fn render_qr(payload: &str, scale: u32) -> DynamicImage {
        let code = QrCode::new(payload.as_bytes()).unwrap();
        let modules = code.width() as u32;
        let colors = code.to_colors();
        let quiet = 4 * scale;
        let size = modules * scale + 2 * quiet;

        let gray = GrayImage::from_fn(size, size, |x, y| {
            let mx = x.checked_sub(quiet).map(|v| v / scale);
            let my = y.checked_sub(quiet).map(|v| v / scale);
            match (mx, my) {
                (Some(mx), Some(my)) if mx < modules && my < modules => {
                    match colors[(my * modules + mx) as usize] {
                        Color::Dark => Luma([0u8]),
                        Color::Light => Luma([255u8]),
                    }
                }
                _ => Luma([255u8]),
            }
        });
        DynamicImage::ImageLuma8(gray)
    }

    #[test]
    fn decodes_generated_qr() {
        let image = render_qr("https://bahn.de/t/ABC123", 8);
        let payloads = scan_image(&image);
        assert_eq!(payloads, vec!["https://bahn.de/t/ABC123".to_string()]);
    }

    #[test]
    fn blank_image_yields_nothing() {
        let blank = DynamicImage::ImageLuma8(GrayImage::from_pixel(64, 64, Luma([255u8])));
        assert!(scan_image(&blank).is_empty());
    }

    #[test]
    fn low_contrast_qr_recovered_by_second_pass() {
        // Compress the dynamic range so the plain pass sees a murky
        // image; the mean-threshold pass restores full contrast.
        let gray = render_qr("OTP0123456789", 8).to_luma8();
        let squashed = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
            Luma([110 + gray.get_pixel(x, y).0[0] / 16])
        });
        let payloads = scan_image(&DynamicImage::ImageLuma8(squashed));
        assert_eq!(payloads, vec!["OTP0123456789".to_string()]);
    }

    #[test]
    fn garbage_document_scans_to_empty() {
        assert!(scan_document(b"not a pdf").is_empty());
    }
}
