//! The installer: global configuration plus its registered packages.

use super::{
    descriptor,
    error::{ErrorExt, Result},
    naming::Naming,
    options::{Options, keys},
    package::{Package, PackageId},
    registry::Registry,
    settings::GeneratorSettings,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Contents of the installer's `config.xml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InstallerConfig {
    pub name: String,
    pub version: String,
    pub title: String,
    pub publisher: Option<String>,
    pub product_url: Option<String>,
    pub start_menu_dir: String,
    pub target_dir: String,
    pub admin_target_dir: Option<String>,
    pub remote_repository: Option<String>,
}

impl InstallerConfig {
    /// Reads the installer settings, falling back from IFW-specific options to
    /// the generic package options.
    pub fn from_options(options: &Options) -> Self {
        let get = |key: &str| options.get_non_empty(key).map(String::from);

        let name = get(keys::IFW_PACKAGE_NAME)
            .or_else(|| get(keys::PACKAGE_NAME))
            .unwrap_or_else(|| "Your package".to_string());

        let target_dir = get(keys::IFW_TARGET_DIRECTORY).unwrap_or_else(|| {
            format!(
                "@ApplicationsDir@/{}",
                options
                    .get_non_empty(keys::PACKAGE_INSTALL_DIRECTORY)
                    .unwrap_or(name.as_str())
            )
        });

        Self {
            version: get(keys::PACKAGE_VERSION).unwrap_or_else(|| "1.0.0".to_string()),
            title: get(keys::IFW_PACKAGE_TITLE)
                .or_else(|| get(keys::PACKAGE_DESCRIPTION_SUMMARY))
                .unwrap_or_else(|| "Your package description".to_string()),
            publisher: get(keys::IFW_PACKAGE_PUBLISHER).or_else(|| get(keys::PACKAGE_VENDOR)),
            product_url: get(keys::IFW_PRODUCT_URL),
            start_menu_dir: get(keys::IFW_PACKAGE_START_MENU_DIRECTORY)
                .unwrap_or_else(|| name.clone()),
            target_dir,
            admin_target_dir: get(keys::IFW_ADMIN_TARGET_DIRECTORY),
            remote_repository: get(keys::DOWNLOAD_SITE),
            name,
        }
    }
}

/// The installer being generated.
#[derive(Debug)]
pub struct Installer {
    config: InstallerConfig,
    packages: Vec<PackageId>,
}

impl Installer {
    pub fn new(config: InstallerConfig) -> Self {
        Self {
            config,
            packages: Vec::new(),
        }
    }

    pub fn config(&self) -> &InstallerConfig {
        &self.config
    }

    /// Packages shipped by this installer, in registration order.
    pub fn packages(&self) -> &[PackageId] {
        &self.packages
    }

    pub(crate) fn register(&mut self, package: PackageId) {
        if !self.packages.contains(&package) {
            self.packages.push(package);
        }
    }

    /// Writes `<toplevel>/config/config.xml`.
    pub async fn generate_installer_file(&self, settings: &GeneratorSettings) -> Result<PathBuf> {
        let path = settings.config_path();
        let xml = descriptor::render_installer(&self.config)?;
        write_descriptor(&path, &xml).await?;
        log::debug!("Wrote installer configuration {}", path.display());
        Ok(path)
    }

    /// Writes `<toplevel>/packages/<name>/meta/package.xml` for every package.
    pub async fn generate_package_files(
        &self,
        registry: &Registry,
        naming: &Naming<'_>,
        settings: &GeneratorSettings,
    ) -> Result<Vec<PathBuf>> {
        let packages_dir = settings.packages_path();
        let mut written = Vec::with_capacity(self.packages.len());

        for &id in &self.packages {
            let package = registry.package(id);
            let meta = package.descriptor();

            let mut dependencies: Vec<String> = Vec::new();
            for &component in &meta.depends_on {
                let name = naming.component_package_name(component);
                if name != package.name() && !dependencies.contains(&name) {
                    dependencies.push(name);
                }
            }
            for name in &meta.external_dependencies {
                if !dependencies.contains(name) {
                    dependencies.push(name.clone());
                }
            }

            let path = packages_dir
                .join(package.name())
                .join("meta")
                .join("package.xml");
            let xml = descriptor::render_package(package, &dependencies)?;
            write_descriptor(&path, &xml).await?;
            log::debug!("Wrote package descriptor {}", path.display());
            written.push(path);
        }

        Ok(written)
    }

    /// Writes the descriptor of a package outside the registry, such as the
    /// default root package.
    pub async fn generate_default_package_file(
        &self,
        package: &Package,
        settings: &GeneratorSettings,
    ) -> Result<PathBuf> {
        let path = settings
            .packages_path()
            .join(package.name())
            .join("meta")
            .join("package.xml");
        let xml = descriptor::render_package(package, &[])?;
        write_descriptor(&path, &xml).await?;
        log::debug!("Wrote default package descriptor {}", path.display());
        Ok(path)
    }
}

async fn write_descriptor(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating descriptor directory", parent)?;
    }
    tokio::fs::write(path, content)
        .await
        .fs_context("writing descriptor", path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installer_defaults() {
        let config = InstallerConfig::from_options(&Options::new());
        assert_eq!(config.name, "Your package");
        assert_eq!(config.title, "Your package description");
        assert_eq!(config.version, "1.0.0");
        assert_eq!(config.start_menu_dir, "Your package");
        assert_eq!(config.target_dir, "@ApplicationsDir@/Your package");
        assert_eq!(config.remote_repository, None);
    }

    #[test]
    fn installer_prefers_ifw_specific_options() {
        let mut options = Options::new();
        options.set_option(keys::PACKAGE_NAME, "demo");
        options.set_option(keys::IFW_PACKAGE_NAME, "Demo Suite");
        options.set_option(keys::PACKAGE_VENDOR, "Acme");
        options.set_option(keys::IFW_PACKAGE_PUBLISHER, "Acme Corp");
        options.set_option(keys::PACKAGE_INSTALL_DIRECTORY, "Demo-1.0");

        let config = InstallerConfig::from_options(&options);
        assert_eq!(config.name, "Demo Suite");
        assert_eq!(config.publisher.as_deref(), Some("Acme Corp"));
        assert_eq!(config.target_dir, "@ApplicationsDir@/Demo-1.0");
    }

    #[test]
    fn registration_is_unique() {
        let mut installer = Installer::new(InstallerConfig::default());
        installer.register(PackageId(3));
        installer.register(PackageId(3));
        installer.register(PackageId(1));
        assert_eq!(installer.packages(), [PackageId(3), PackageId(1)]);
    }
}
