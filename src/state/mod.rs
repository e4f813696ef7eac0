/// State management module
///
/// This module handles all application state, including:
/// - The persisted usage database (library.rs)
/// - The in-memory editing session and its state machine (session.rs)
pub mod library;
pub mod session;
