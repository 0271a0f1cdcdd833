//! heroquiz-core — Quiz widgets, scoring, and the page model they run on.
//!
//! Widgets render into any [`traits::Page`]; [`page::MemoryPage`] is the
//! in-memory implementation used by the preview renderer, the terminal
//! player and the tests.

pub mod board;
pub mod config;
pub mod container;
pub mod error;
pub mod layout;
pub mod markup;
pub mod model;
pub mod page;
pub mod parser;
pub mod sanitize;
pub mod score;
pub mod theme;
pub mod traits;
pub mod widget;

pub use board::Board;
pub use error::StructureError;
pub use theme::Theme;
