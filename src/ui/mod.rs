/// View fragments for the filter screen
///
/// These build pieces of the main view so main.rs stays readable:
/// - Parameter slider rows (controls.rs)
/// - The filter picker grid (picker.rs)
pub mod controls;
pub mod picker;
