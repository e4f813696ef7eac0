/// Slider state for the current filter
///
/// These values are plain UI state: they are never persisted on their own,
/// but the exact settings used for an export are recorded as JSON in the
/// export history.
use serde::{Deserialize, Serialize};

/// The three slider values driving the parameter binder.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    /// Filter intensity (0.0 to 1.0)
    /// - 0.0 = no effect for blend-style filters
    /// - 1.0 = full effect
    pub intensity: f32,

    /// Kernel radius in pixels (0.0 to 100.0)
    /// - 0.0 is degenerate but defined: the filter passes the image through
    pub radius: f32,

    /// Block scale in pixels (0.0 to 250.0), used by the mosaic filter
    pub scale: f32,
}

/// Slider ranges, shared with the view so the UI and the clamping logic
/// cannot drift apart.
pub const INTENSITY_RANGE: (f32, f32) = (0.0, 1.0);
pub const RADIUS_RANGE: (f32, f32) = (0.0, 100.0);
pub const SCALE_RANGE: (f32, f32) = (0.0, 250.0);

impl Default for FilterParams {
    /// Starting slider positions, matching the original app.
    fn default() -> Self {
        Self {
            intensity: 0.5,
            radius: 10.0,
            scale: 10.0,
        }
    }
}

impl FilterParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the intensity slider, clamped to its range.
    pub fn set_intensity(&mut self, value: f32) {
        self.intensity = value.clamp(INTENSITY_RANGE.0, INTENSITY_RANGE.1);
    }

    /// Set the radius slider, clamped to its range.
    pub fn set_radius(&mut self, value: f32) {
        self.radius = value.clamp(RADIUS_RANGE.0, RADIUS_RANGE.1);
    }

    /// Set the scale slider, clamped to its range.
    pub fn set_scale(&mut self, value: f32) {
        self.scale = value.clamp(SCALE_RANGE.0, SCALE_RANGE.1);
    }

    /// Convert to JSON string for the export history.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original() {
        let params = FilterParams::default();
        assert_eq!(params.intensity, 0.5);
        assert_eq!(params.radius, 10.0);
        assert_eq!(params.scale, 10.0);
    }

    #[test]
    fn test_setters_clamp_to_range() {
        let mut params = FilterParams::default();

        params.set_intensity(3.0);
        assert_eq!(params.intensity, 1.0);
        params.set_intensity(-1.0);
        assert_eq!(params.intensity, 0.0);

        params.set_radius(250.0);
        assert_eq!(params.radius, 100.0);
        params.set_radius(-5.0);
        assert_eq!(params.radius, 0.0);

        params.set_scale(1000.0);
        assert_eq!(params.scale, 250.0);
    }

    #[test]
    fn test_json_round_trip() {
        let mut params = FilterParams::default();
        params.set_intensity(0.8);
        params.set_radius(42.0);

        let json = params.to_json().unwrap();
        let restored = FilterParams::from_json(&json).unwrap();

        assert_eq!(params, restored);
    }
}
