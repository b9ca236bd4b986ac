//! Qt Installer Framework generator.
//!
//! Turns a [`Project`](crate::project::Project) of components and component
//! groups into IFW packages, writes their descriptors and runs the IFW tools.
//!
//! # Example
//!
//! ```no_run
//! use ifw_packager::ifw::{Generator, Options, SettingsBuilder};
//! use ifw_packager::project::load_project;
//!
//! # async fn example() -> ifw_packager::Result<()> {
//! let manifest = load_project("installer.toml".as_ref())?;
//! let settings = SettingsBuilder::from_options(&manifest.options).build()?;
//!
//! let mut generator = Generator::new(manifest.project, manifest.options, settings)?;
//! generator.resolve_all();
//! let installer = generator.package_files().await?;
//! println!("SHA256: {:?}", installer.checksum);
//! # Ok(())
//! # }
//! ```

pub mod builder;
mod descriptor;
pub mod error;
mod installer;
mod naming;
pub mod options;
mod package;
mod registry;
pub mod settings;

pub use builder::{
    CommandLine, CommandOutput, CommandRunner, GeneratedInstaller, Generator, ProcessRunner,
};
pub use error::{Error, Result};
pub use installer::{Installer, InstallerConfig};
pub use naming::{DEFAULT_ROOT_PACKAGE_NAME, Naming, NamingPolicy};
pub use options::Options;
pub use package::{Distribution, License, Package, PackageDescriptor, PackageId, PackageSource};
pub use registry::{Registry, ResolveContext};
pub use settings::{GeneratorSettings, PackagingMethod, SettingsBuilder};
