// PDF output: WinAnsi text encoding and the page renderer.

pub mod encoding;
pub mod pdf;

pub use pdf::{render, render_with_report, RenderError, RenderOutput};
