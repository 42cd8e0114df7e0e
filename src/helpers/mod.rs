//! Display helper functions
//!
//! Date formatting and text statistics shared by the generator,
//! the server and the CLI.

mod date;
mod text;

pub use date::*;
pub use text::*;
