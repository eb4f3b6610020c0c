// src/report/mod.rs
pub mod presentation;
pub mod summary;

#[allow(unused_imports)]
pub use presentation::{network_primitives, word_cloud, NetworkDrawing, WordCloudItem};
#[allow(unused_imports)]
pub use summary::{BatchSummary, FrequencyEntry};
