//! Small presentational primitives shared by every page.

pub mod button;
pub mod dialog;
pub mod input;
