//! Terminal output helpers

pub mod display;

pub use display::{GridFormatter, Tone, CLEAR_SCREEN};
