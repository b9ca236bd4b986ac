//! Error types for package aggregation and installer generation.

use std::{io, path::PathBuf};

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while naming packages, writing descriptors or running the IFW tools.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required Qt Installer Framework tool could not be located.
    #[error("Cannot find QtIFW {role} \"{executable}\": likely it is not installed, or not in your PATH")]
    ToolNotFound {
        /// What the tool does (e.g. "compiler")
        role: &'static str,
        /// Executable name searched for
        executable: &'static str,
    },

    /// A component or group produced settings no valid package can be built from.
    #[error("Cannot configure package \"{package}\" for {owner}: {reason}")]
    PackageConfigurationFailed {
        /// Canonical package name
        package: String,
        /// Owning entity, e.g. `component "foo"`
        owner: String,
        /// What was wrong with the settings
        reason: String,
    },

    /// An external IFW tool failed to start, exited non-zero or timed out.
    #[error("Problem running IFW command: {command}\nPlease check {} for errors", log_path.display())]
    ExternalToolFailed {
        /// Command line that was attempted
        command: String,
        /// Diagnostic log holding the command and its output
        log_path: PathBuf,
    },

    /// An option holds a value that cannot be interpreted.
    #[error("Invalid value for {key}: {reason}")]
    InvalidOption {
        /// Option key
        key: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Filesystem operation failed on a specific path.
    #[error("{context} {}: {error}", path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        error: io::Error,
    },

    /// Descriptor template could not be registered or rendered.
    #[error("template error: {0}")]
    Template(String),

    /// Option file could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl From<handlebars::RenderError> for Error {
    fn from(error: handlebars::RenderError) -> Self {
        Self::Template(error.to_string())
    }
}

impl From<handlebars::TemplateError> for Error {
    fn from(error: handlebars::TemplateError) -> Self {
        Self::Template(error.to_string())
    }
}

/// Attach a filesystem context (operation + path) to IO results.
pub trait ErrorExt<T> {
    /// Wrap the error as [`Error::Fs`].
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}
