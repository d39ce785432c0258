//! Helper functions shared by templates, the generator, and commands

mod date;
mod text;
mod url;

pub use date::*;
pub use text::*;
pub use url::*;
