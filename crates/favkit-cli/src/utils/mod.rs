//! Small CLI utilities.

pub mod input;
