//! heroquiz-html — Static preview pages for quiz sets.

pub mod html;

pub use html::{generate_page, page_path, write_page};
