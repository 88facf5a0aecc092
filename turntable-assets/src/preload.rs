//! Bulk frame preloading with progress reporting
//!
//! All frames load before the viewer goes interactive. Progress is reported
//! as an integer percentage, 0-100 and monotonically non-decreasing; the
//! first failure aborts the whole preload with no retry.

use crate::fetch::{FrameFetcher, FrameImage};
use turntable_core::{Error, FrameSet, Result};

/// Every frame of a set, fully decoded, in frame-set order
#[derive(Debug, Clone)]
pub struct LoadedFrames {
    frames: Vec<FrameImage>,
}

impl LoadedFrames {
    /// Wrap frames that are already decoded in memory
    ///
    /// The order must match the frame set the viewer will index with.
    pub fn from_frames(frames: Vec<FrameImage>) -> Result<Self> {
        if frames.is_empty() {
            return Err(Error::InvalidData(
                "a loaded frame set must contain at least one frame".to_string(),
            ));
        }
        Ok(Self { frames })
    }

    /// Number of loaded frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Loaded frames are never empty
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Decoded frame at an index, if in range
    pub fn get(&self, index: usize) -> Option<&FrameImage> {
        self.frames.get(index)
    }

    /// Iterate over the decoded frames in order
    pub fn iter(&self) -> impl Iterator<Item = &FrameImage> {
        self.frames.iter()
    }
}

/// Load every frame of a set in order, reporting percentage progress
///
/// The viewer must not proceed to its interactive state on failure: the
/// error is logged once and returned, and no partial set survives.
pub fn preload_frames(
    frames: &FrameSet,
    fetcher: &dyn FrameFetcher,
    mut on_progress: impl FnMut(u8),
) -> Result<LoadedFrames> {
    let total = frames.len();
    log::info!(
        "preloading {total} turntable frames via {}",
        fetcher.source_name()
    );

    let mut loaded = Vec::with_capacity(total);
    for (index, id) in frames.iter().enumerate() {
        let frame = fetcher.fetch(id).map_err(|err| {
            log::error!("frame preload aborted at {}/{total}: {err}", index + 1);
            err
        })?;
        loaded.push(frame);
        on_progress(((index + 1) * 100 / total) as u8);
    }

    log::info!("preloaded {total} turntable frames");
    LoadedFrames::from_frames(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubFetcher {
        fail_at: Option<usize>,
        calls: AtomicUsize,
    }

    impl StubFetcher {
        fn new(fail_at: Option<usize>) -> Self {
            Self {
                fail_at,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl FrameFetcher for StubFetcher {
        fn fetch(&self, id: &str) -> Result<FrameImage> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if Some(call) == self.fail_at {
                return Err(Error::Asset {
                    path: id.to_owned(),
                    reason: "stub failure".to_string(),
                });
            }
            Ok(FrameImage {
                id: id.to_owned(),
                width: 1,
                height: 1,
                image: DynamicImage::new_rgba8(1, 1),
            })
        }

        fn source_name(&self) -> &'static str {
            "stub"
        }
    }

    #[test]
    fn test_progress_is_monotonic_and_ends_at_100() {
        let frames = FrameSet::sequential("f_", ".jpeg", 38).unwrap();
        let fetcher = StubFetcher::new(None);
        let mut reports = Vec::new();

        let loaded = preload_frames(&frames, &fetcher, |percent| reports.push(percent)).unwrap();

        assert_eq!(loaded.len(), 38);
        assert_eq!(reports.len(), 38);
        assert_eq!(*reports.last().unwrap(), 100);
        assert!(reports.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(reports.iter().all(|&percent| percent <= 100));
    }

    #[test]
    fn test_frames_load_in_set_order() {
        let frames = FrameSet::sequential("f_", ".jpeg", 4).unwrap();
        let fetcher = StubFetcher::new(None);
        let loaded = preload_frames(&frames, &fetcher, |_| {}).unwrap();

        assert_eq!(loaded.get(0).unwrap().id, "f_0000.jpeg");
        assert_eq!(loaded.get(3).unwrap().id, "f_0003.jpeg");
    }

    #[test]
    fn test_first_failure_aborts_without_retry() {
        let frames = FrameSet::sequential("f_", ".jpeg", 10).unwrap();
        let fetcher = StubFetcher::new(Some(4));
        let mut reports = Vec::new();

        let result = preload_frames(&frames, &fetcher, |percent| reports.push(percent));

        assert!(result.is_err());
        // Four successes were reported, then the fifth fetch failed once
        assert_eq!(reports.len(), 4);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_empty_loaded_frames_are_rejected() {
        assert!(LoadedFrames::from_frames(Vec::new()).is_err());
    }
}
