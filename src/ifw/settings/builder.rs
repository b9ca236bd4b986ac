//! Builder for constructing GeneratorSettings.

use super::{GeneratorSettings, PackagingMethod};
use crate::ifw::{
    error::{Error, ErrorExt, Result},
    options::{Options, keys},
};
use path_absolutize::Absolutize;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Toplevel directory used when neither the option nor an override is set.
pub const DEFAULT_TOPLEVEL: &str = "_ifw";

/// Builder for constructing [`GeneratorSettings`].
///
/// Usually seeded from options with [`SettingsBuilder::from_options`], then
/// adjusted with command-line overrides.
///
/// # Examples
///
/// ```no_run
/// use ifw_packager::ifw::{Options, SettingsBuilder};
///
/// # fn example() -> ifw_packager::ifw::Result<()> {
/// let mut options = Options::new();
/// options.set_option("CPACK_DOWNLOAD_SITE", "https://example.com/repo");
///
/// let settings = SettingsBuilder::from_options(&options)
///     .toplevel("build/ifw")
///     .build()?;
/// assert_eq!(settings.download_site(), Some("https://example.com/repo"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    toplevel: Option<PathBuf>,
    method: Option<String>,
    resolve_duplicate_names: bool,
    packages_directories: Vec<PathBuf>,
    download_site: Option<String>,
    online_only: bool,
    package_file_names: Vec<PathBuf>,
    default_file_name: Option<String>,
    tool_timeout: Option<String>,
}

impl SettingsBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Seeds a builder from the generator options.
    pub fn from_options(options: &Options) -> Self {
        let default_file_name = options.get_non_empty(keys::PACKAGE_FILE_NAME).map(|name| {
            format!(
                "{name}{}",
                options.get_option(keys::EXECUTABLE_SUFFIX).unwrap_or_default()
            )
        });

        Self {
            toplevel: options.get_non_empty(keys::TOPLEVEL_DIRECTORY).map(PathBuf::from),
            method: options.get_non_empty(keys::COMPONENTS_GROUPING).map(String::from),
            resolve_duplicate_names: options.is_option_true(keys::IFW_RESOLVE_DUPLICATE_NAMES),
            packages_directories: options
                .get_list(keys::IFW_PACKAGES_DIRECTORIES)
                .into_iter()
                .map(PathBuf::from)
                .collect(),
            download_site: options.get_non_empty(keys::DOWNLOAD_SITE).map(String::from),
            online_only: options.is_option_true(keys::DOWNLOAD_ALL),
            package_file_names: Vec::new(),
            default_file_name,
            tool_timeout: options.get_non_empty(keys::IFW_TOOL_TIMEOUT).map(String::from),
        }
    }

    /// Sets the staging directory.
    ///
    /// Default: `CPACK_TOPLEVEL_DIRECTORY`, else `_ifw`
    pub fn toplevel<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.toplevel = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the output artifacts.
    ///
    /// Default: `CPACK_PACKAGE_FILE_NAME` + `CMAKE_EXECUTABLE_SUFFIX` inside the
    /// toplevel directory, else the literal `installer`
    pub fn package_file_names(mut self, names: Vec<PathBuf>) -> Self {
        self.package_file_names = names;
        self
    }

    /// Sets the remote repository URL.
    pub fn download_site(mut self, site: impl Into<String>) -> Self {
        self.download_site = Some(site.into());
        self
    }

    /// Requests an online-only installer.
    pub fn online_only(mut self, online_only: bool) -> Self {
        self.online_only = online_only;
        self
    }

    /// Adds an extra package search directory.
    pub fn packages_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.packages_directories.push(path.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the grouping method or timeout option is invalid, or
    /// a path cannot be made absolute.
    pub fn build(self) -> Result<GeneratorSettings> {
        let toplevel = absolute(
            self.toplevel
                .as_deref()
                .unwrap_or_else(|| Path::new(DEFAULT_TOPLEVEL)),
        )?;

        let method = self
            .method
            .as_deref()
            .map_or(Ok(PackagingMethod::default()), PackagingMethod::parse)?;

        let packages_directories = self
            .packages_directories
            .iter()
            .map(|p| absolute(p))
            .collect::<Result<Vec<_>>>()?;

        let package_file_names = if self.package_file_names.is_empty() {
            self.default_file_name
                .map(|name| vec![toplevel.join(name)])
                .unwrap_or_default()
        } else {
            self.package_file_names
                .iter()
                .map(|p| absolute(p))
                .collect::<Result<Vec<_>>>()?
        };

        let tool_timeout = self.tool_timeout.as_deref().map(parse_timeout).transpose()?;

        Ok(GeneratorSettings::new(
            toplevel,
            method,
            self.resolve_duplicate_names,
            packages_directories,
            self.download_site.filter(|s| !s.is_empty()),
            self.online_only,
            package_file_names,
            tool_timeout,
        ))
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path
        .absolutize()
        .fs_context("resolving absolute path", path)?
        .into_owned())
}

fn parse_timeout(value: &str) -> Result<Duration> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Error::InvalidOption {
            key: keys::IFW_TOOL_TIMEOUT.to_string(),
            reason: format!("\"{value}\" is not a positive number of seconds"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_generator_options() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = Options::new();
        options.set_option(keys::TOPLEVEL_DIRECTORY, dir.path().display().to_string());
        options.set_option(keys::DOWNLOAD_SITE, "https://example.com/repo");
        options.set_option(keys::DOWNLOAD_ALL, "ON");
        options.set_option(keys::IFW_RESOLVE_DUPLICATE_NAMES, "TRUE");
        options.set_option(keys::IFW_PACKAGES_DIRECTORIES, "/opt/a;/opt/b");
        options.set_option(keys::COMPONENTS_GROUPING, "ONE_PER_GROUP");
        options.set_option(keys::IFW_TOOL_TIMEOUT, "90");

        let settings = SettingsBuilder::from_options(&options).build().unwrap();

        assert_eq!(settings.toplevel(), dir.path());
        assert_eq!(settings.download_site(), Some("https://example.com/repo"));
        assert!(settings.online_only());
        assert!(settings.resolve_duplicate_names());
        assert_eq!(
            settings.packages_directories(),
            [PathBuf::from("/opt/a"), PathBuf::from("/opt/b")]
        );
        assert_eq!(settings.method(), PackagingMethod::OnePackagePerGroup);
        assert_eq!(settings.tool_timeout(), Some(Duration::from_secs(90)));
        assert_eq!(settings.log_path(), dir.path().join("IFWOutput.log"));
    }

    #[test]
    fn empty_download_site_counts_as_unset() {
        let mut options = Options::new();
        options.set_option(keys::DOWNLOAD_SITE, "");
        let settings = SettingsBuilder::from_options(&options)
            .toplevel("/tmp/ifw")
            .build()
            .unwrap();
        assert_eq!(settings.download_site(), None);
    }

    #[test]
    fn output_defaults_to_literal_installer() {
        let settings = SettingsBuilder::new().toplevel("/tmp/ifw").build().unwrap();
        assert_eq!(settings.output_argument(), "installer");
        assert_eq!(settings.output_path(), PathBuf::from("/tmp/ifw/installer"));
    }

    #[test]
    fn output_name_comes_from_file_name_and_suffix() {
        let mut options = Options::new();
        options.set_option(keys::PACKAGE_FILE_NAME, "demo-1.0-Linux");
        options.set_option(keys::EXECUTABLE_SUFFIX, ".run");
        let settings = SettingsBuilder::from_options(&options)
            .toplevel("/tmp/ifw")
            .build()
            .unwrap();
        assert_eq!(settings.output_argument(), "/tmp/ifw/demo-1.0-Linux.run");
    }

    #[test]
    fn explicit_output_wins_over_options() {
        let mut options = Options::new();
        options.set_option(keys::PACKAGE_FILE_NAME, "ignored");
        let settings = SettingsBuilder::from_options(&options)
            .toplevel("/tmp/ifw")
            .package_file_names(vec![PathBuf::from("/out/setup.run")])
            .build()
            .unwrap();
        assert_eq!(settings.output_argument(), "/out/setup.run");
    }

    #[test]
    fn grouping_defaults_to_one_package_per_component() {
        let settings = SettingsBuilder::new().toplevel("/tmp/ifw").build().unwrap();
        assert_eq!(settings.method(), PackagingMethod::OnePackagePerComponent);

        let mut options = Options::new();
        options.set_option(keys::COMPONENTS_GROUPING, "SOMETIMES");
        let err = SettingsBuilder::from_options(&options)
            .toplevel("/tmp/ifw")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOption { .. }));
    }

    #[test]
    fn rejects_bad_timeout() {
        let mut options = Options::new();
        options.set_option(keys::IFW_TOOL_TIMEOUT, "soon");
        assert!(SettingsBuilder::from_options(&options).build().is_err());
        options.set_option(keys::IFW_TOOL_TIMEOUT, "0");
        assert!(SettingsBuilder::from_options(&options).build().is_err());
    }
}
