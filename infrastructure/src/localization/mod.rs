//! Built-in message catalog

mod catalog;

pub use catalog::StaticLocalizer;
