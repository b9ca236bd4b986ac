//! Command line interface for the IFW packager.
//!
//! Options are layered from the project file's `[options]` table, then the
//! `--options-file`, then `-D` definitions; later sources win.

mod args;

pub use args::Args;

use crate::{
    error::{CliError, Result},
    ifw::{Generator, Options, SettingsBuilder},
    project::{ProjectManifest, load_project},
};

/// Main CLI entry point
pub async fn run(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let ProjectManifest {
        project,
        mut options,
    } = load_project(&args.project)?;
    apply_overrides(&args, &mut options).await?;

    let mut builder = SettingsBuilder::from_options(&options);
    if let Some(toplevel) = &args.toplevel {
        builder = builder.toplevel(toplevel);
    }
    if let Some(output) = &args.output {
        builder = builder.package_file_names(vec![output.clone()]);
    }
    let settings = builder.build()?;

    let mut generator = Generator::new(project, options, settings)?;
    generator.resolve_all();
    log::debug!(
        "Resolved {} packages for project \"{}\"",
        generator.registry().len(),
        generator.project().name()
    );

    let installer = generator.package_files().await?;
    println!("Created {}", installer.path.display());
    if let Some(repository) = &installer.repository {
        println!("Repository: {}", repository.display());
    }
    if let (Some(size), Some(checksum)) = (installer.size, &installer.checksum) {
        println!("Size: {size} bytes");
        println!("SHA256: {checksum}");
    }

    Ok(0)
}

async fn apply_overrides(args: &Args, options: &mut Options) -> Result<()> {
    if let Some(path) = &args.options_file {
        options.read_list_file(path).await?;
    }
    for definition in &args.defines {
        options.define(definition)?;
    }
    Ok(())
}

/// Parse arguments without executing (for testing)
pub fn parse_args() -> Args {
    Args::parse_args()
}
