//! Frame image fetching

use image::DynamicImage;
use std::path::{Path, PathBuf};
use turntable_core::{Error, Result};

/// A decoded turntable frame
#[derive(Debug, Clone)]
pub struct FrameImage {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub image: DynamicImage,
}

/// Trait for fetching frame images by identifier
pub trait FrameFetcher: Send + Sync {
    /// Fetch and decode a single frame
    fn fetch(&self, id: &str) -> Result<FrameImage>;

    /// Name of the transport, for diagnostics
    fn source_name(&self) -> &'static str;
}

/// Fetches frames from a directory on disk
#[derive(Debug, Clone)]
pub struct DirectoryFetcher {
    base: PathBuf,
}

impl DirectoryFetcher {
    /// Create a fetcher rooted at a directory
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// The directory frame identifiers resolve against
    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl FrameFetcher for DirectoryFetcher {
    fn fetch(&self, id: &str) -> Result<FrameImage> {
        let path = self.base.join(id);
        let image = image::open(&path).map_err(|err| Error::Asset {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        Ok(FrameImage {
            id: id.to_owned(),
            width: image.width(),
            height: image.height(),
            image,
        })
    }

    fn source_name(&self) -> &'static str {
        "directory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_an_asset_error() {
        let fetcher = DirectoryFetcher::new("/nonexistent-turntable-assets");
        let result = fetcher.fetch("36_0000_Ultra.jpeg");
        match result {
            Err(Error::Asset { path, .. }) => {
                assert!(path.contains("36_0000_Ultra.jpeg"));
            }
            other => panic!("expected an asset error, got {other:?}"),
        }
    }
}
