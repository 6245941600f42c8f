//! Runtime utilities shared between the renderer passes.

pub mod diagnostics;
pub mod visitor;
