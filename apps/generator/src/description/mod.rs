// Result pipeline: raw generated text → sections → canonical text + view.
// The canonical text, not the raw backend text, is what export sends.

pub mod fallback;
pub mod render;
pub mod sections;

pub use render::{present, ResultOrigin, ResultView};
