//! Output formatting for research records

pub mod console;
pub mod formatter;
