//! IFW Packager - Qt Installer Framework installers for component projects.
//!
//! This binary reads a project file, writes the IFW descriptors and runs
//! `repogen` and `binarycreator` with proper error reporting.

use std::process;

use ifw_packager::cli;

#[tokio::main]
async fn main() {
    let args = cli::parse_args();

    // Initialize logging; RUST_LOG still takes precedence
    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    // Run CLI and get exit code
    let exit_code = match cli::run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
