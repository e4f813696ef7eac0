/// The filter catalog
///
/// Every filter the app offers, together with the set of parameters it
/// accepts. The capability sets are resolved statically per kind, so the
/// rest of the app never has to ask a filter object what it supports at
/// runtime.
use std::fmt;

/// A parameter a filter may accept.
///
/// `Image` is the source image itself and is part of every capability set;
/// the other three correspond to the UI sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKey {
    Image,
    Intensity,
    Radius,
    Scale,
}

/// The ten filters offered by the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    SepiaTone,
    Crystallize,
    Edges,
    GaussianBlur,
    Pixellate,
    UnsharpMask,
    Vignette,
    MotionBlur,
    Vibrance,
    Bloom,
}

impl FilterKind {
    /// All filters, in picker order.
    pub const ALL: [FilterKind; 10] = [
        FilterKind::Crystallize,
        FilterKind::Edges,
        FilterKind::GaussianBlur,
        FilterKind::Pixellate,
        FilterKind::SepiaTone,
        FilterKind::UnsharpMask,
        FilterKind::Vignette,
        FilterKind::MotionBlur,
        FilterKind::Vibrance,
        FilterKind::Bloom,
    ];

    /// Human-readable name shown in the picker and the title bar.
    pub fn display_name(&self) -> &'static str {
        match self {
            FilterKind::SepiaTone => "Sepia Tone",
            FilterKind::Crystallize => "Crystallize",
            FilterKind::Edges => "Edges",
            FilterKind::GaussianBlur => "Gaussian Blur",
            FilterKind::Pixellate => "Pixellate",
            FilterKind::UnsharpMask => "Unsharp Mask",
            FilterKind::Vignette => "Vignette",
            FilterKind::MotionBlur => "Motion Blur",
            FilterKind::Vibrance => "Vibrance",
            FilterKind::Bloom => "Bloom",
        }
    }

    /// Stable identifier used as the persistence key in the usage tables.
    pub fn slug(&self) -> &'static str {
        match self {
            FilterKind::SepiaTone => "sepia_tone",
            FilterKind::Crystallize => "crystallize",
            FilterKind::Edges => "edges",
            FilterKind::GaussianBlur => "gaussian_blur",
            FilterKind::Pixellate => "pixellate",
            FilterKind::UnsharpMask => "unsharp_mask",
            FilterKind::Vignette => "vignette",
            FilterKind::MotionBlur => "motion_blur",
            FilterKind::Vibrance => "vibrance",
            FilterKind::Bloom => "bloom",
        }
    }

    /// The parameters this filter accepts.
    ///
    /// The image parameter is always present and always listed first: the
    /// binder supplies the source image before any slider value.
    pub fn input_keys(&self) -> &'static [ParamKey] {
        use ParamKey::*;
        match self {
            FilterKind::SepiaTone => &[Image, Intensity],
            FilterKind::Crystallize => &[Image, Radius],
            FilterKind::Edges => &[Image, Intensity],
            FilterKind::GaussianBlur => &[Image, Radius],
            FilterKind::Pixellate => &[Image, Scale],
            FilterKind::UnsharpMask => &[Image, Intensity, Radius],
            FilterKind::Vignette => &[Image, Intensity, Radius],
            FilterKind::MotionBlur => &[Image, Radius],
            FilterKind::Vibrance => &[Image, Intensity],
            FilterKind::Bloom => &[Image, Intensity, Radius],
        }
    }

    /// Whether this filter accepts the given parameter.
    pub fn supports(&self, key: ParamKey) -> bool {
        self.input_keys().contains(&key)
    }
}

impl Default for FilterKind {
    /// The filter active when the screen opens, as in the original app.
    fn default() -> Self {
        FilterKind::SepiaTone
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
