//! Order-specific store glue: entity wiring, patch/action DTOs, and errors.

mod actions;
mod dtos;
pub mod entity;
pub mod error;

pub use actions::*;
pub use dtos::*;
pub use error::*;
