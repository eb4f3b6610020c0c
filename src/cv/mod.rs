// src/cv/mod.rs
pub mod loader;
pub mod models;

pub use models::{RawDocument, YearWindow};
