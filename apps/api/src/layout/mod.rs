// Layout: line classification, per-class styling, and the renderers that write the header
// and the model's text into a Document.

pub mod classifier;
pub mod engine;
pub mod header;
pub mod style;

// Re-export the public API consumed by the generation pipeline.
pub use classifier::section_keywords;
pub use engine::{render_body, LayoutStats};
pub use header::render_header;
pub use style::{StyleSheet, StyleSheets};
