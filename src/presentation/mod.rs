//! Presentation data model
//!
//! The outline is the structured intermediate the model produces; slides and
//! decks are what the pipeline assembles from it.

mod models;

pub use models::{Deck, Outline, OutlineSlide, Slide, DEFAULT_TITLE};
