//! Core `GeneratorSettings` struct.

use super::PackagingMethod;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Default output passed to `binarycreator` when no file name is configured.
pub const DEFAULT_OUTPUT_NAME: &str = "installer";

/// File the failing tool command and its output are written to.
pub const DIAGNOSTIC_LOG_NAME: &str = "IFWOutput.log";

/// Validated generator configuration.
///
/// # See Also
///
/// - [`SettingsBuilder`](super::SettingsBuilder) - Builder reading these from options
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    /// Staging directory; descriptors, repository and the diagnostic log live here.
    toplevel: PathBuf,

    method: PackagingMethod,

    /// When set, package names are not qualified with their parent group's name.
    resolve_duplicate_names: bool,

    /// Extra `-p` search directories for both tools.
    packages_directories: Vec<PathBuf>,

    /// Remote repository URL; enables `repogen`.
    download_site: Option<String>,

    online_only: bool,

    /// Output artifacts; only the first is passed to `binarycreator`.
    package_file_names: Vec<PathBuf>,

    /// Per-tool time limit.
    tool_timeout: Option<Duration>,
}

impl GeneratorSettings {
    pub fn toplevel(&self) -> &Path {
        &self.toplevel
    }

    pub fn method(&self) -> PackagingMethod {
        self.method
    }

    pub fn resolve_duplicate_names(&self) -> bool {
        self.resolve_duplicate_names
    }

    pub fn packages_directories(&self) -> &[PathBuf] {
        &self.packages_directories
    }

    pub fn download_site(&self) -> Option<&str> {
        self.download_site.as_deref()
    }

    pub fn online_only(&self) -> bool {
        self.online_only
    }

    pub fn package_file_names(&self) -> &[PathBuf] {
        &self.package_file_names
    }

    pub fn tool_timeout(&self) -> Option<Duration> {
        self.tool_timeout
    }

    /// `<toplevel>/config/config.xml`
    pub fn config_path(&self) -> PathBuf {
        self.toplevel.join("config").join("config.xml")
    }

    /// `<toplevel>/packages`
    pub fn packages_path(&self) -> PathBuf {
        self.toplevel.join("packages")
    }

    /// `<toplevel>/repository`
    pub fn repository_path(&self) -> PathBuf {
        self.toplevel.join("repository")
    }

    /// `<toplevel>/IFWOutput.log`
    pub fn log_path(&self) -> PathBuf {
        self.toplevel.join(DIAGNOSTIC_LOG_NAME)
    }

    /// Output argument for `binarycreator`.
    pub fn output_argument(&self) -> String {
        self.package_file_names
            .first()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| DEFAULT_OUTPUT_NAME.to_string())
    }

    /// Where the installer is expected once `binarycreator` succeeds.
    ///
    /// Tools run inside the toplevel directory, so the default name lands there.
    pub fn output_path(&self) -> PathBuf {
        match self.package_file_names.first() {
            Some(path) => self.toplevel.join(path),
            None => self.toplevel.join(DEFAULT_OUTPUT_NAME),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        toplevel: PathBuf,
        method: PackagingMethod,
        resolve_duplicate_names: bool,
        packages_directories: Vec<PathBuf>,
        download_site: Option<String>,
        online_only: bool,
        package_file_names: Vec<PathBuf>,
        tool_timeout: Option<Duration>,
    ) -> Self {
        Self {
            toplevel,
            method,
            resolve_duplicate_names,
            packages_directories,
            download_site,
            online_only,
            package_file_names,
            tool_timeout,
        }
    }
}
