//! Typed generator configuration.
//!
//! [`GeneratorSettings`] is the validated view over the raw [`Options`](crate::ifw::Options)
//! the generator needs before any package is resolved, built with [`SettingsBuilder`].

mod builder;
mod core;
mod method;

pub use builder::SettingsBuilder;
pub use core::GeneratorSettings;
pub use method::PackagingMethod;
