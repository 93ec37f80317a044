// Document assembler: cursor/style primitives over an in-memory page model, plus PDF output.
// Rendering is synchronous and CPU-bound; async callers run it inside spawn_blocking.

pub mod document;
pub mod font_metrics;
pub mod pdf;

pub use document::{Document, DrawOp, FontWeight, Rgb};
pub use pdf::{write_pdf, DocumentError, FontSource};
