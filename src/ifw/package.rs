//! Installer packages and their descriptor configuration.

use crate::{
    ifw::{
        error::{Error, Result},
        options::{Options, keys},
    },
    project::{Component, ComponentGroup, ComponentId, GroupId},
};

/// Index of a package in its [`Registry`](super::Registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId(pub(crate) usize);

/// How a package reaches the end user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Distribution {
    /// Built and embedded in the installer.
    Binary,
    /// Published to the remote repository only.
    Downloaded,
    /// Referenced by a package but not built by this run.
    Dependent,
}

/// What a package was created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageSource {
    Component(ComponentId),
    Group(GroupId),
    /// Default package standing in for a project without component packages.
    Root,
    External,
}

/// A `<DisplayName, file>` license pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct License {
    pub name: String,
    pub file: String,
}

/// Contents of a package's `package.xml`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageDescriptor {
    pub display_name: String,
    pub description: String,
    pub version: String,
    pub release_date: String,
    pub script: Option<String>,
    pub licenses: Vec<License>,
    pub sorting_priority: Option<i64>,
    /// `Some(false)` when the component is disabled by default.
    pub default: Option<bool>,
    pub is_virtual: bool,
    pub forced_installation: bool,
    /// Components of this run the package depends on.
    pub depends_on: Vec<ComponentId>,
    /// Package names outside this run the package depends on.
    pub external_dependencies: Vec<String>,
}

/// An installer package.
#[derive(Debug, Clone)]
pub struct Package {
    name: String,
    distribution: Distribution,
    source: PackageSource,
    components: Vec<ComponentId>,
    descriptor: PackageDescriptor,
}

impl Package {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn distribution(&self) -> Distribution {
        self.distribution
    }

    pub fn source(&self) -> PackageSource {
        self.source
    }

    /// Components aggregated by this package.
    pub fn components(&self) -> &[ComponentId] {
        &self.components
    }

    pub fn descriptor(&self) -> &PackageDescriptor {
        &self.descriptor
    }

    pub(crate) fn add_component(&mut self, component: ComponentId) {
        if !self.components.contains(&component) {
            self.components.push(component);
        }
    }

    /// Configures a package from a component's settings.
    ///
    /// Remote-only components produce [`Distribution::Downloaded`] packages.
    pub(crate) fn from_component(
        name: String,
        id: ComponentId,
        component: &Component,
        options: &Options,
    ) -> Result<Self> {
        let owner = format!("component \"{}\"", component.name);
        let option = |suffix: &str| keys::component(&component.name, suffix);

        let mut descriptor = configure_common(&name, &owner, &component.name, option, options)?;
        if descriptor.display_name.is_empty() {
            descriptor.display_name = component
                .display_name
                .clone()
                .unwrap_or_else(|| component.name.clone());
        }
        if descriptor.description.is_empty() {
            descriptor.description = component.description.clone().unwrap_or_default();
        }
        descriptor.default = Some(!component.is_disabled_by_default);
        descriptor.is_virtual = component.is_hidden;
        descriptor.forced_installation = component.is_required;
        descriptor.depends_on = component.dependencies.clone();

        let distribution = if component.is_downloaded {
            Distribution::Downloaded
        } else {
            Distribution::Binary
        };

        Ok(Self {
            name,
            distribution,
            source: PackageSource::Component(id),
            components: vec![id],
            descriptor,
        })
    }

    /// Configures a package from a group's settings. Group packages are always binary.
    pub(crate) fn from_group(
        name: String,
        id: GroupId,
        group: &ComponentGroup,
        options: &Options,
    ) -> Result<Self> {
        let owner = format!("component group \"{}\"", group.name);
        let option = |suffix: &str| keys::group(&group.name, suffix);

        let mut descriptor = configure_common(&name, &owner, &group.name, option, options)?;
        if descriptor.display_name.is_empty() {
            descriptor.display_name = group
                .display_name
                .clone()
                .unwrap_or_else(|| group.name.clone());
        }
        if descriptor.description.is_empty() {
            descriptor.description = group.description.clone().unwrap_or_default();
        }

        Ok(Self {
            name,
            distribution: Distribution::Binary,
            source: PackageSource::Group(id),
            components: Vec::new(),
            descriptor,
        })
    }

    /// Default root package, configured from the project-wide options.
    pub(crate) fn root(name: String, options: &Options) -> Self {
        let get = |key: &str| options.get_non_empty(key).map(String::from);
        Self {
            descriptor: PackageDescriptor {
                display_name: get(keys::PACKAGE_NAME).unwrap_or_else(|| name.clone()),
                description: get(keys::PACKAGE_DESCRIPTION_SUMMARY).unwrap_or_default(),
                version: get(keys::PACKAGE_VERSION).unwrap_or_else(|| "1.0.0".to_string()),
                release_date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
                default: Some(true),
                ..PackageDescriptor::default()
            },
            name,
            distribution: Distribution::Binary,
            source: PackageSource::Root,
            components: Vec::new(),
        }
    }

    /// Placeholder for a package provided outside this run.
    pub(crate) fn dependent(name: String) -> Self {
        Self {
            name,
            distribution: Distribution::Dependent,
            source: PackageSource::External,
            components: Vec::new(),
            descriptor: PackageDescriptor::default(),
        }
    }
}

/// Package names become directories under `packages/`.
fn is_valid_package_name(name: &str) -> bool {
    !matches!(name, "" | "." | "..") && !name.contains(['/', '\\'])
}

/// Reads the per-entity options shared by components and groups.
fn configure_common(
    package: &str,
    owner: &str,
    entity: &str,
    option: impl Fn(&str) -> String,
    options: &Options,
) -> Result<PackageDescriptor> {
    let fail = |reason: String| Error::PackageConfigurationFailed {
        package: package.to_string(),
        owner: owner.to_string(),
        reason,
    };

    if !is_valid_package_name(package) {
        return Err(fail(
            "package names must not be empty, \".\" or \"..\", or contain path separators"
                .to_string(),
        ));
    }

    let version = options
        .get_non_empty(&option("VERSION"))
        .or_else(|| options.get_non_empty(keys::PACKAGE_VERSION))
        .unwrap_or("1.0.0")
        .to_string();

    let release_date = options
        .get_non_empty(&option("RELEASE_DATE"))
        .map(String::from)
        .unwrap_or_else(|| chrono::Utc::now().format("%Y-%m-%d").to_string());

    let license_items = options.get_list(&option("LICENSES"));
    if license_items.len() % 2 != 0 {
        return Err(fail(format!(
            "{} should contain pairs of <display_name> and <file_path>",
            option("LICENSES")
        )));
    }
    let licenses = license_items
        .chunks(2)
        .map(|pair| License {
            name: pair[0].clone(),
            file: pair[1].clone(),
        })
        .collect();

    let sorting_priority = options
        .get_non_empty(&option("PRIORITY"))
        .map(|value| {
            value.trim().parse::<i64>().map_err(|_| {
                fail(format!(
                    "{} must be an integer, got \"{value}\"",
                    option("PRIORITY")
                ))
            })
        })
        .transpose()?;

    log::debug!("Configured package \"{package}\" for {entity}");

    Ok(PackageDescriptor {
        display_name: options
            .get_non_empty(&option("DISPLAY_NAME"))
            .map(String::from)
            .unwrap_or_default(),
        description: options
            .get_non_empty(&option("DESCRIPTION"))
            .map(String::from)
            .unwrap_or_default(),
        version,
        release_date,
        script: options.get_non_empty(&option("SCRIPT")).map(String::from),
        licenses,
        sorting_priority,
        default: None,
        is_virtual: false,
        forced_installation: false,
        depends_on: Vec::new(),
        external_dependencies: options.get_list(&option("DEPENDS")),
    })
}
