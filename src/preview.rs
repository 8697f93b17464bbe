// Preview module for rendering photos as true-color half-block terminal lines

use crate::domain::PhotoRecord;
use image::{DynamicImage, GenericImageView, Pixel};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use std::io;
use std::path::Path;

pub const MAX_IMAGE_WIDTH: u32 = 160;
/// Height is halved because we render 2 pixels per terminal row using half-blocks
pub const MAX_IMAGE_HEIGHT: u32 = 100;

/// A photo decoded and scaled for the terminal
#[derive(Debug, Clone)]
pub struct PhotoPreview {
    pub lines: Vec<Line<'static>>,
    /// Dimensions of the decoded source image
    pub source_width: u32,
    pub source_height: u32,
}

/// Loads an image from a file path
pub fn load_image(path: &Path) -> io::Result<DynamicImage> {
    image::open(path).map_err(|e| io::Error::other(format!("Image loading error: {}", e)))
}

/// Calculates new dimensions to fit image within max width and height while preserving aspect ratio
pub fn calculate_resize_dimensions(
    original_width: u32,
    original_height: u32,
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    if original_width == 0 || original_height == 0 {
        return (0, 0);
    }

    let width_ratio = max_width as f64 / original_width as f64;
    let height_ratio = max_height as f64 / original_height as f64;

    let ratio = width_ratio.min(height_ratio);

    if ratio >= 1.0 {
        (original_width, original_height)
    } else {
        let new_width = ((original_width as f64 * ratio).round() as u32).max(1);
        let new_height = ((original_height as f64 * ratio).round() as u32).max(1);
        (new_width, new_height)
    }
}

/// Converts an image to styled lines using half-block characters.
///
/// Each cell is an upper half block (▀) whose foreground is the upper pixel
/// and background the lower one, so a terminal row shows two pixel rows.
pub fn image_to_halfblock_lines(img: &DynamicImage, width: u32, height: u32) -> Vec<Line<'static>> {
    let height = if height % 2 == 0 { height } else { height + 1 };

    // Triangle is fast enough for camera-sized images
    let img = img.resize_exact(width, height, image::imageops::FilterType::Triangle);
    let img = img.to_rgb8();

    let term_height = height / 2;
    let mut lines = Vec::with_capacity(term_height as usize);

    for y in 0..term_height {
        let upper_y = y * 2;
        let lower_y = upper_y + 1;

        let mut spans = Vec::with_capacity(width as usize);

        for x in 0..width {
            let upper = img.get_pixel(x, upper_y).to_rgb();
            let lower = if lower_y < height {
                img.get_pixel(x, lower_y).to_rgb()
            } else {
                upper
            };

            let style = Style::default()
                .fg(Color::Rgb(upper[0], upper[1], upper[2]))
                .bg(Color::Rgb(lower[0], lower[1], lower[2]));

            spans.push(Span::styled("▀", style));
        }

        lines.push(Line::from(spans));
    }

    lines
}

/// Decodes a photo and scales it to fit `max_width` columns by
/// `max_height` pixel rows
pub fn generate_photo_preview(
    photo: &PhotoRecord,
    max_width: u32,
    max_height: u32,
) -> io::Result<PhotoPreview> {
    let img = load_image(&photo.path)?;
    let (source_width, source_height) = img.dimensions();

    let (width, height) =
        calculate_resize_dimensions(source_width, source_height, max_width, max_height);

    Ok(PhotoPreview {
        lines: image_to_halfblock_lines(&img, width, height),
        source_width,
        source_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PhotoId;
    use chrono::Utc;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_photo(path: &Path) -> PhotoRecord {
        PhotoRecord {
            id: PhotoId(0),
            path: path.to_path_buf(),
            name: "photo.png".to_string(),
            size: fs::metadata(path).map(|m| m.len()).unwrap_or(0),
            taken_at: Utc::now(),
            width: 0,
            height: 0,
        }
    }

    #[test]
    fn test_calculate_resize_dimensions_no_upscale() {
        let (width, height) = calculate_resize_dimensions(40, 30, 80, 40);
        assert_eq!(width, 40);
        assert_eq!(height, 30);
    }

    #[test]
    fn test_calculate_resize_dimensions_zero() {
        let (width, height) = calculate_resize_dimensions(0, 0, 80, 40);
        assert_eq!(width, 0);
        assert_eq!(height, 0);
    }

    #[test]
    fn test_calculate_resize_dimensions_landscape_photo() {
        // 4032×3024 camera frame into a 160×100 box is height-bound
        let (width, height) = calculate_resize_dimensions(4032, 3024, 160, 100);
        assert_eq!(height, 100);
        assert_eq!(width, 133);
    }

    #[test]
    fn test_calculate_resize_dimensions_panorama_keeps_one_row() {
        let (width, height) = calculate_resize_dimensions(20000, 10, 160, 100);
        assert_eq!(width, 160);
        assert_eq!(height, 1);
    }

    #[test]
    fn test_image_to_halfblock_dimensions() {
        let img = DynamicImage::new_rgb8(10, 10);
        let lines = image_to_halfblock_lines(&img, 5, 6);

        assert_eq!(lines.len(), 3);
        for line in &lines {
            assert_eq!(line.spans.len(), 5);
        }
    }

    #[test]
    fn test_image_to_halfblock_odd_height_rounds_up() {
        let img = DynamicImage::new_rgb8(10, 10);
        let lines = image_to_halfblock_lines(&img, 4, 5);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_halfblock_colors() {
        let img = image::RgbImage::from_fn(1, 2, |_, y| {
            if y == 0 {
                image::Rgb([255, 0, 0])
            } else {
                image::Rgb([0, 0, 255])
            }
        });
        let lines = image_to_halfblock_lines(&DynamicImage::ImageRgb8(img), 1, 2);

        let style = lines[0].spans[0].style;
        assert_eq!(style.fg, Some(Color::Rgb(255, 0, 0)));
        assert_eq!(style.bg, Some(Color::Rgb(0, 0, 255)));
    }

    #[test]
    fn test_generate_photo_preview() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photo.png");
        let img = image::RgbImage::from_fn(100, 50, |x, _| image::Rgb([x as u8, 0, 0]));
        img.save(&path).unwrap();

        let preview = generate_photo_preview(&create_test_photo(&path), 50, 50).unwrap();

        assert_eq!((preview.source_width, preview.source_height), (100, 50));
        // 100×50 into 50×50 gives 50×25, padded to 26 pixel rows
        assert_eq!(preview.lines.len(), 13);
        assert_eq!(preview.lines[0].spans.len(), 50);
    }

    #[test]
    fn test_generate_photo_preview_not_an_image() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.jpg");
        fs::write(&path, b"not an image").unwrap();

        let result = generate_photo_preview(&create_test_photo(&path), 50, 50);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_image_nonexistent() {
        let result = load_image(Path::new("/nonexistent/image.png"));
        assert!(result.is_err());
    }
}
