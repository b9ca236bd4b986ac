//! Raw string configuration consumed by the generator.
//!
//! Options are CMake-style key/value pairs: every value is a string, lists are
//! `;`-separated and booleans follow CMake truthiness. Typed views over them
//! live in [`crate::ifw::settings`].

mod core;
pub mod keys;

pub use core::{Options, is_true_value};
