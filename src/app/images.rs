use image::DynamicImage;

use crate::app::api::{ApiClient, FetchError, FetchFailure};

pub const IMAGE_CDN_BASE: &str = "https://image.tmdb.org/t/p";

/// Size tokens the image CDN serves.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageSize {
    W185,
    W342,
    W500,
    W780,
    W1280,
}

impl ImageSize {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageSize::W185 => "w185",
            ImageSize::W342 => "w342",
            ImageSize::W500 => "w500",
            ImageSize::W780 => "w780",
            ImageSize::W1280 => "w1280",
        }
    }
}

/// Builds a CDN URL for an API-provided relative path. Callers handle the
/// missing-path case with a placeholder; there is no URL for it.
pub fn image_url(path: &str, size: ImageSize) -> String {
    format!("{IMAGE_CDN_BASE}/{}{path}", size.as_str())
}

/// Downloads and decodes an image for terminal rendering.
pub fn download_image(api: &ApiClient, url: &str) -> Result<DynamicImage, FetchFailure> {
    let bytes = api.fetch_bytes(url)?;
    image::load_from_memory(&bytes).map_err(|e| FetchFailure {
        url: url.to_string(),
        error: FetchError::Transport(e.to_string()),
        status: None,
        content_type: None,
        preview: String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poster_url_uses_size_token() {
        assert_eq!(
            image_url("/abc123.jpg", ImageSize::W500),
            "https://image.tmdb.org/t/p/w500/abc123.jpg"
        );
    }

    #[test]
    fn backdrop_url_uses_wide_token() {
        assert_eq!(
            image_url("/xyz789.jpg", ImageSize::W1280),
            "https://image.tmdb.org/t/p/w1280/xyz789.jpg"
        );
    }
}
