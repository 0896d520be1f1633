//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns and display math from
//! page and component logic to improve reuse and testability.

pub mod dark_mode;
pub mod file_reader;
pub mod format;
pub mod markdown;
pub mod scatter;
pub mod ui_persistence;
