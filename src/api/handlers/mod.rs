//! API request handlers.

pub mod image;
pub mod library;
pub mod status;
