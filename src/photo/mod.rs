/// Photo I/O module
///
/// This module handles:
/// - Loading and decoding picked photos (loader.rs)
/// - Exporting filtered output and recording the export history (export.rs)
pub mod export;
pub mod loader;
