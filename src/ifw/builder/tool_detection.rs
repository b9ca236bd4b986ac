//! Qt Installer Framework tool discovery.
//!
//! Tools already marked found in the options are trusted as is. Otherwise
//! `$QTIFWDIR/bin`, `$QTIFWDIR` and then `PATH` are searched, and the result is
//! recorded back into the options (`<exe>-NOTFOUND` when missing).

use crate::ifw::{
    error::{Error, ErrorExt, Result},
    options::{Options, keys},
    settings::GeneratorSettings,
};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Environment variable pointing at a Qt IFW installation.
pub const QTIFWDIR_ENV: &str = "QTIFWDIR";

pub const BINARYCREATOR: &str = "binarycreator";
pub const REPOGEN: &str = "repogen";

/// Located IFW tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfwTools {
    pub binary_creator: PathBuf,
    /// Only needed when a download site is configured.
    pub repo_gen: Option<PathBuf>,
}

impl IfwTools {
    /// Reads the tool locations from options.
    ///
    /// # Errors
    ///
    /// [`Error::ToolNotFound`] when `binarycreator` is missing, or when a download
    /// site is configured and `repogen` is missing.
    pub fn from_options(options: &Options, settings: &GeneratorSettings) -> Result<Self> {
        let binary_creator = found_tool(
            options,
            keys::IFW_BINARYCREATOR_EXECUTABLE_FOUND,
            keys::IFW_BINARYCREATOR_EXECUTABLE,
        )?
        .ok_or(Error::ToolNotFound {
            role: "compiler",
            executable: BINARYCREATOR,
        })?;

        let repo_gen = found_tool(
            options,
            keys::IFW_REPOGEN_EXECUTABLE_FOUND,
            keys::IFW_REPOGEN_EXECUTABLE,
        )?;

        if settings.download_site().is_some() && repo_gen.is_none() {
            return Err(Error::ToolNotFound {
                role: "repository generator",
                executable: REPOGEN,
            });
        }

        log::debug!("Using {} at {}", BINARYCREATOR, binary_creator.display());
        if let Some(repogen) = &repo_gen {
            log::debug!("Using {} at {}", REPOGEN, repogen.display());
        }

        Ok(Self {
            binary_creator,
            repo_gen,
        })
    }
}

/// Fills in the location of every tool not already marked found.
pub fn discover_tools(options: &mut Options) {
    let ifw_dir = std::env::var_os(QTIFWDIR_ENV).map(PathBuf::from);
    for (exe, key, found_key) in [
        (
            BINARYCREATOR,
            keys::IFW_BINARYCREATOR_EXECUTABLE,
            keys::IFW_BINARYCREATOR_EXECUTABLE_FOUND,
        ),
        (
            REPOGEN,
            keys::IFW_REPOGEN_EXECUTABLE,
            keys::IFW_REPOGEN_EXECUTABLE_FOUND,
        ),
    ] {
        if options.is_option_true(found_key) {
            continue;
        }
        match locate(exe, ifw_dir.as_deref()) {
            Some(path) => {
                log::debug!("Found {exe} at: {}", path.display());
                options.set_option(key, path.display().to_string());
                options.set_option(found_key, "ON");
            }
            None => {
                log::debug!("{exe} not found in {QTIFWDIR_ENV} or PATH");
                options.set_option(key, format!("{exe}-NOTFOUND"));
                options.set_option(found_key, "OFF");
            }
        }
    }
}

/// Tools run inside the toplevel directory, so relative paths are anchored to
/// the current directory here. Bare names are left for the `PATH` lookup.
fn found_tool(options: &Options, found_key: &str, key: &str) -> Result<Option<PathBuf>> {
    if !options.is_option_true(found_key) {
        return Ok(None);
    }
    let Some(value) = options.get_non_empty(key) else {
        return Ok(None);
    };

    let path = Path::new(value);
    if path.is_absolute() || path.components().count() < 2 {
        return Ok(Some(path.to_path_buf()));
    }
    Ok(Some(
        path.absolutize()
            .fs_context("resolving tool path", path)?
            .into_owned(),
    ))
}

fn locate(exe: &str, ifw_dir: Option<&Path>) -> Option<PathBuf> {
    if let Some(dir) = ifw_dir {
        for candidate in [dir.join("bin"), dir.to_path_buf()] {
            if let Ok(path) = which::which_in(exe, Some(&candidate), &candidate) {
                return Some(path);
            }
        }
    }
    which::which(exe).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ifw::SettingsBuilder;

    fn settings(site: Option<&str>) -> GeneratorSettings {
        let mut builder = SettingsBuilder::new().toplevel("/tmp/ifw");
        if let Some(site) = site {
            builder = builder.download_site(site);
        }
        builder.build().unwrap()
    }

    fn found(options: &mut Options, found_key: &str, key: &str, path: &str) {
        options.set_option(found_key, "ON");
        options.set_option(key, path);
    }

    #[test]
    fn missing_binarycreator_is_fatal() {
        let err = IfwTools::from_options(&Options::new(), &settings(None)).unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { executable: BINARYCREATOR, .. }));
    }

    #[test]
    fn repogen_is_only_required_with_download_site() {
        let mut options = Options::new();
        found(
            &mut options,
            keys::IFW_BINARYCREATOR_EXECUTABLE_FOUND,
            keys::IFW_BINARYCREATOR_EXECUTABLE,
            "/ifw/bin/binarycreator",
        );

        let tools = IfwTools::from_options(&options, &settings(None)).unwrap();
        assert_eq!(tools.binary_creator, PathBuf::from("/ifw/bin/binarycreator"));
        assert_eq!(tools.repo_gen, None);

        let err = IfwTools::from_options(&options, &settings(Some("https://x"))).unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { executable: REPOGEN, .. }));

        found(
            &mut options,
            keys::IFW_REPOGEN_EXECUTABLE_FOUND,
            keys::IFW_REPOGEN_EXECUTABLE,
            "/ifw/bin/repogen",
        );
        let tools = IfwTools::from_options(&options, &settings(Some("https://x"))).unwrap();
        assert_eq!(tools.repo_gen, Some(PathBuf::from("/ifw/bin/repogen")));
    }

    #[test]
    fn found_flag_without_path_is_not_found() {
        let mut options = Options::new();
        options.set_option(keys::IFW_BINARYCREATOR_EXECUTABLE_FOUND, "ON");
        assert!(IfwTools::from_options(&options, &settings(None)).is_err());
    }

    #[test]
    fn relative_tool_paths_are_anchored_to_the_current_directory() {
        let mut options = Options::new();
        found(
            &mut options,
            keys::IFW_BINARYCREATOR_EXECUTABLE_FOUND,
            keys::IFW_BINARYCREATOR_EXECUTABLE,
            "tools/binarycreator",
        );
        found(
            &mut options,
            keys::IFW_REPOGEN_EXECUTABLE_FOUND,
            keys::IFW_REPOGEN_EXECUTABLE,
            "repogen",
        );

        let tools = IfwTools::from_options(&options, &settings(None)).unwrap();
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(tools.binary_creator, cwd.join("tools").join("binarycreator"));
        assert!(tools.binary_creator.is_absolute());
        assert_eq!(tools.repo_gen, Some(PathBuf::from("repogen")));
    }

    #[test]
    fn discovery_keeps_tools_already_found() {
        let mut options = Options::new();
        found(
            &mut options,
            keys::IFW_BINARYCREATOR_EXECUTABLE_FOUND,
            keys::IFW_BINARYCREATOR_EXECUTABLE,
            "/custom/binarycreator",
        );
        found(
            &mut options,
            keys::IFW_REPOGEN_EXECUTABLE_FOUND,
            keys::IFW_REPOGEN_EXECUTABLE,
            "/custom/repogen",
        );
        discover_tools(&mut options);
        assert_eq!(
            options.get_option(keys::IFW_BINARYCREATOR_EXECUTABLE),
            Some("/custom/binarycreator")
        );
        assert_eq!(options.get_option(keys::IFW_REPOGEN_EXECUTABLE), Some("/custom/repogen"));
    }

    #[cfg(unix)]
    #[test]
    fn locate_searches_ifw_bin_directory() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("bin");
        std::fs::create_dir(&bin).unwrap();
        let tool = bin.join(BINARYCREATOR);
        std::fs::write(&tool, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(locate(BINARYCREATOR, Some(dir.path())), Some(tool));
    }
}
