//! Progress reporters for research runs

pub mod reporter;
