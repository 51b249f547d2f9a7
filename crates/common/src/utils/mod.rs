//! Common utility macros
//!
//! - **[`macros`]**: declarative macros for name conversions and flag sets

#[macro_use]
pub mod macros;
