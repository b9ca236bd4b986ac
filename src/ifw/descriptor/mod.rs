//! Installer and package descriptor rendering.
//!
//! Renders `config/config.xml` and `packages/<name>/meta/package.xml` from
//! handlebars templates. Values are escaped, so names and descriptions may
//! contain markup characters.

mod template;

use super::{
    error::Result,
    installer::InstallerConfig,
    package::Package,
};
use handlebars::Handlebars;
use serde::Serialize;
use template::{CONFIG_TEMPLATE, PACKAGE_TEMPLATE};

#[derive(Serialize)]
struct LicenseData<'a> {
    name: &'a str,
    file: &'a str,
}

#[derive(Serialize)]
struct PackageData<'a> {
    name: &'a str,
    display_name: &'a str,
    description: &'a str,
    version: &'a str,
    release_date: &'a str,
    dependencies: Option<String>,
    script: Option<&'a str>,
    licenses: Vec<LicenseData<'a>>,
    sorting_priority: Option<String>,
    default: Option<String>,
    is_virtual: bool,
    forced_installation: bool,
}

fn registry() -> Result<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(false);
    handlebars.register_template_string("config.xml", CONFIG_TEMPLATE)?;
    handlebars.register_template_string("package.xml", PACKAGE_TEMPLATE)?;
    Ok(handlebars)
}

/// Render the installer's `config.xml`.
pub fn render_installer(config: &InstallerConfig) -> Result<String> {
    Ok(registry()?.render("config.xml", config)?)
}

/// Render a package's `package.xml`.
///
/// `dependencies` are the resolved package names the package depends on.
pub fn render_package(package: &Package, dependencies: &[String]) -> Result<String> {
    let d = package.descriptor();
    let data = PackageData {
        name: package.name(),
        display_name: &d.display_name,
        description: &d.description,
        version: &d.version,
        release_date: &d.release_date,
        dependencies: (!dependencies.is_empty()).then(|| dependencies.join(", ")),
        script: d.script.as_deref(),
        licenses: d
            .licenses
            .iter()
            .map(|l| LicenseData {
                name: &l.name,
                file: &l.file,
            })
            .collect(),
        sorting_priority: d.sorting_priority.map(|p| p.to_string()),
        default: d.default.map(|b| b.to_string()),
        is_virtual: d.is_virtual,
        forced_installation: d.forced_installation,
    };
    Ok(registry()?.render("package.xml", &data)?)
}
