//! Cheat sheet generator: lecture material and topics in, a dense A4 study sheet out.
//!
//! Pipeline: [`prompt`] builds the model prompt, a [`llm_client::TextGenerator`] produces
//! box markup, [`boxes`] parses it and [`render`] lays it out as a PDF.

pub mod boxes;
pub mod config;
pub mod errors;
pub mod layout;
pub mod lecture;
pub mod llm_client;
pub mod pipeline;
pub mod prompt;
pub mod render;

pub use errors::AppError;
pub use pipeline::{generate, render_from_text, GenerationReport};
