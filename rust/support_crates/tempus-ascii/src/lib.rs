//! Fixed-capacity ASCII text assembly for hot formatting paths.

pub mod ascii_builder;

pub use ascii_builder::AsciiBuilder;
