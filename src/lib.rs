//! Qt Installer Framework packager library
//!
//! This library turns a project of components and component groups into a
//! Qt Installer Framework installer:
//! - resolves components and groups into IFW packages
//! - writes the installer and package descriptors
//! - runs `repogen` and `binarycreator`
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod ifw;
pub mod project;

// Re-export commonly used types
pub use error::{CliError, PackagerError, Result};
