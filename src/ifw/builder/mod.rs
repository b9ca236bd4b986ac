//! Installer generation.
//!
//! The [`Generator`] drives the pipeline:
//! 1. Writes `config/config.xml` and one `packages/<name>/meta/package.xml` per package
//! 2. Runs `repogen` when a download site is configured
//! 3. Runs `binarycreator`
//! 4. Returns a [`GeneratedInstaller`] with the artifact size and checksum
//!
//! - [`command`] - Command lines and the runner executing them
//! - [`tool_detection`] - Locating `binarycreator` and `repogen`
//! - [`orchestrator`] - The [`Generator`] itself

mod checksum;
pub mod command;
mod orchestrator;
pub mod tool_detection;

pub use command::{CommandLine, CommandOutput, CommandRunner, ProcessRunner};
pub use orchestrator::{GeneratedInstaller, Generator};
pub use tool_detection::{IfwTools, discover_tools};
