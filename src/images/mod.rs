//! Slide illustrations
//!
//! Searches stock photo APIs for each slide, downloads the first hit next to
//! the deck and embeds it at the top of the slide.

mod download;
mod finder;
mod query;
mod search;

pub use download::download_image;
pub use finder::ImageFinder;
pub use query::{build_search_query, extract_key_concepts};
pub use search::{ImageSearch, ImageSource, PexelsSource, PixabaySource};
