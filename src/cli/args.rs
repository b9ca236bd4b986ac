//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// Qt Installer Framework packager
#[derive(Parser, Debug)]
#[command(
    name = "ifw_packager",
    version,
    about = "Qt Installer Framework packager for component projects",
    long_about = "Creates a Qt Installer Framework installer from a project file describing components and component groups.

Writes config/config.xml and one package descriptor per package into the toplevel directory,
runs repogen when a download site is configured, then runs binarycreator.

Usage:
  ifw_packager --project installer.toml
  ifw_packager --project installer.toml -D CPACK_DOWNLOAD_SITE=https://example.com/repo
  ifw_packager --project installer.toml --options-file release.toml --output dist/setup

Exit code 0 = every IFW tool exited successfully."
)]
pub struct Args {
    /// Project file declaring components, groups and options
    #[arg(short, long, value_name = "PATH", default_value = "installer.toml")]
    pub project: PathBuf,

    /// Staging directory (default: CPACK_TOPLEVEL_DIRECTORY, else _ifw)
    #[arg(short, long, value_name = "DIR")]
    pub toplevel: Option<PathBuf>,

    /// TOML file of options applied over the project file's [options]
    #[arg(long, value_name = "PATH")]
    pub options_file: Option<PathBuf>,

    /// Set an option, overriding every file (repeatable)
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE")]
    pub defines: Vec<String>,

    /// Installer output path passed to binarycreator
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Log every executed command
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.project.as_os_str().is_empty() {
            return Err("Project path cannot be empty".to_string());
        }

        for definition in &self.defines {
            match definition.split_once('=') {
                Some((key, _)) if !key.trim().is_empty() => {}
                _ => {
                    return Err(format!(
                        "Invalid definition: {definition}. Expected KEY=VALUE"
                    ));
                }
            }
        }

        if self
            .output
            .as_ref()
            .is_some_and(|output| output.as_os_str().is_empty())
        {
            return Err("Output path cannot be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_definitions() {
        let args = Args::try_parse_from([
            "ifw_packager",
            "--project",
            "demo.toml",
            "-D",
            "CPACK_DOWNLOAD_ALL=ON",
            "--define",
            "CPACK_PACKAGE_NAME=demo",
        ])
        .unwrap();

        assert_eq!(args.project, PathBuf::from("demo.toml"));
        assert_eq!(args.defines, ["CPACK_DOWNLOAD_ALL=ON", "CPACK_PACKAGE_NAME=demo"]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn rejects_malformed_definitions() {
        let args = Args::try_parse_from(["ifw_packager", "-D", "NOVALUE"]).unwrap();
        assert!(args.validate().unwrap_err().contains("NOVALUE"));

        let args = Args::try_parse_from(["ifw_packager", "-D", "=x"]).unwrap();
        assert!(args.validate().is_err());
    }

    #[test]
    fn project_defaults_to_installer_toml() {
        let args = Args::try_parse_from(["ifw_packager"]).unwrap();
        assert_eq!(args.project, PathBuf::from("installer.toml"));
        assert_eq!(args.toplevel, None);
    }
}
