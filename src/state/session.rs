/// The in-memory editing session
///
/// One session lives as long as the screen: it owns the selected filter,
/// the slider values, the decoded source pixels and the latest processed
/// output. All mutation goes through the methods here, so the screen
/// controller never pokes at ambient state.
///
/// Photo loading is asynchronous, and a new load supersedes any in-flight
/// one: every load gets a generation token, and completions carrying a
/// stale token are dropped without touching the session.
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::filter::kind::FilterKind;
use crate::filter::params::FilterParams;

/// Where the screen is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nothing picked yet; sliders and filter selection are inert.
    NoImage,
    /// A photo is decoded and filtered output is on screen.
    ImageLoaded,
    /// A new filter was chosen; the source is being reloaded for it.
    FilterChanged,
}

/// All mutable state behind the filter screen.
#[derive(Debug)]
pub struct Session {
    /// The currently selected filter.
    pub filter: FilterKind,
    /// Current slider values. These survive filter changes within the
    /// session; only a fresh photo load resets the image itself.
    pub params: FilterParams,
    /// Path of the picked photo, kept so a filter change can reload it.
    photo_path: Option<PathBuf>,
    /// Decoded source pixels of the current photo.
    source: Option<Arc<RgbaImage>>,
    /// Most recent processed output. Never cleared on failure: the screen
    /// keeps showing the last good image.
    processed: Option<Arc<RgbaImage>>,
    /// Lifecycle phase.
    phase: SessionPhase,
    /// Monotonically increasing load generation; see `begin_load`.
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self {
            filter: FilterKind::default(),
            params: FilterParams::default(),
            photo_path: None,
            source: None,
            processed: None,
            phase: SessionPhase::NoImage,
            generation: 0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn photo_path(&self) -> Option<&Path> {
        self.photo_path.as_deref()
    }

    pub fn source(&self) -> Option<&Arc<RgbaImage>> {
        self.source.as_ref()
    }

    pub fn processed(&self) -> Option<&Arc<RgbaImage>> {
        self.processed.as_ref()
    }

    /// Whether filtered output is on screen, which is what gates the
    /// filter-selection button and the share action.
    pub fn has_output(&self) -> bool {
        self.processed.is_some()
    }

    /// Start loading a photo from `path`.
    ///
    /// Bumps the load generation and returns the token the completion must
    /// present. Any load still in flight is superseded: its token no longer
    /// matches, so its completion will be dropped.
    pub fn begin_load(&mut self, path: PathBuf) -> u64 {
        self.photo_path = Some(path);
        self.generation += 1;
        self.generation
    }

    /// Accept a finished load if its token is still current.
    ///
    /// Returns false (and mutates nothing) for stale completions.
    pub fn finish_load(&mut self, token: u64, pixels: Arc<RgbaImage>) -> bool {
        if token != self.generation {
            return false;
        }
        self.source = Some(pixels);
        self.phase = SessionPhase::ImageLoaded;
        true
    }

    /// Select a new filter.
    ///
    /// The source image is always fully reloaded before the new filter is
    /// applied, so the returned token (when a photo has been picked) starts
    /// that reload exactly like an initial pick.
    pub fn select_filter(&mut self, kind: FilterKind) -> Option<u64> {
        self.filter = kind;
        let path = self.photo_path.clone()?;
        self.phase = SessionPhase::FilterChanged;
        Some(self.begin_load(path))
    }

    /// Store freshly recomputed output.
    pub fn set_processed(&mut self, pixels: Arc<RgbaImage>) {
        self.processed = Some(pixels);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn pixels() -> Arc<RgbaImage> {
        Arc::new(RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255])))
    }

    #[test]
    fn test_initial_phase_is_no_image() {
        let session = Session::new();
        assert_eq!(session.phase(), SessionPhase::NoImage);
        assert!(!session.has_output());
        assert_eq!(session.filter, FilterKind::SepiaTone);
    }

    #[test]
    fn test_load_moves_to_image_loaded() {
        let mut session = Session::new();
        let token = session.begin_load(PathBuf::from("/tmp/a.png"));
        assert!(session.finish_load(token, pixels()));
        assert_eq!(session.phase(), SessionPhase::ImageLoaded);
        assert!(session.source().is_some());
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let mut session = Session::new();
        let first = session.begin_load(PathBuf::from("/tmp/a.png"));
        // A second pick supersedes the first before it completes.
        let second = session.begin_load(PathBuf::from("/tmp/b.png"));

        assert!(!session.finish_load(first, pixels()));
        assert!(session.source().is_none());
        assert_eq!(session.phase(), SessionPhase::NoImage);

        assert!(session.finish_load(second, pixels()));
        assert!(session.source().is_some());
    }

    #[test]
    fn test_filter_change_requires_a_photo() {
        let mut session = Session::new();
        assert_eq!(session.select_filter(FilterKind::Vignette), None);
        // The selection itself still sticks.
        assert_eq!(session.filter, FilterKind::Vignette);
    }

    #[test]
    fn test_filter_change_issues_fresh_load_token() {
        let mut session = Session::new();
        let token = session.begin_load(PathBuf::from("/tmp/a.png"));
        assert!(session.finish_load(token, pixels()));

        let reload = session.select_filter(FilterKind::Edges).unwrap();
        assert_eq!(session.phase(), SessionPhase::FilterChanged);
        assert!(reload > token);

        // The old token can no longer complete a load.
        assert!(!session.finish_load(token, pixels()));
        assert!(session.finish_load(reload, pixels()));
        assert_eq!(session.phase(), SessionPhase::ImageLoaded);
    }

    #[test]
    fn test_params_survive_filter_change() {
        let mut session = Session::new();
        let token = session.begin_load(PathBuf::from("/tmp/a.png"));
        session.finish_load(token, pixels());
        session.params.set_radius(66.0);

        session.select_filter(FilterKind::GaussianBlur);
        assert_eq!(session.params.radius, 66.0);
    }
}
