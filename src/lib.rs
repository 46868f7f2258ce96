//! Business-assistant extraction pipeline: clean scraped pages, read business
//! profiles, recommendations and sectioned analyses out of model answers, and
//! pick competitor names out of search hits.
//!
//! The vendor APIs (completion, image, search) are abstracted behind the
//! capability traits in [`session`]; only the page fetcher ships a concrete
//! implementation.

pub mod error;
pub mod fetch;
pub mod parser;
pub mod prompts;
pub mod records;
pub mod session;

pub use error::AssistError;
pub use records::*;
pub use session::Session;
