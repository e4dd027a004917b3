//! Color palette generation: HSL/hex conversion, harmony rules, keyword
//! lookup, and dominant-color extraction from images.

pub mod app;
pub mod backends;
pub mod cli;
pub mod color;
pub mod config;
pub mod pipeline;
pub mod tui;
