/// Filtering module
///
/// This module handles everything between the sliders and the pixels:
/// - The filter catalog and capability sets (kind.rs)
/// - Slider state (params.rs)
/// - The parameter binder that turns sliders into filter inputs (binder.rs)
/// - The filter implementations themselves (ops.rs)
pub mod binder;
pub mod kind;
pub mod ops;
pub mod params;

/// Everything that can go wrong between picking a photo and showing its
/// filtered preview. The UI policy for all of these is the same: keep the
/// last good image, note the failure, move on.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// The picked item had no readable image data.
    #[error("no photo data available")]
    MissingImageData,

    /// The photo bytes could not be decoded into pixels.
    #[error("failed to decode photo: {0}")]
    Decode(String),

    /// The filter produced no output (e.g. an empty source image).
    #[error("filter produced no output")]
    NoOutput,

    /// The output image could not be rendered or written.
    #[error("failed to render output: {0}")]
    Render(String),
}
