//! Canonical package names for components and groups.
//!
//! Names are derived from the entity's own name (or its `..._NAME` override)
//! and its parent group's package name:
//!
//! - an entity already bound to a package keeps that package's name;
//! - a component flattens into its group's package when the packaging method is
//!   one package per group or its `..._COMMON` option is set;
//! - otherwise the name is qualified as `<parent>.<name>` unless duplicate-name
//!   resolution is enabled or the name already starts with the parent's name.

use super::{
    options::{Options, keys},
    registry::Registry,
    settings::{GeneratorSettings, PackagingMethod},
};
use crate::project::{ComponentId, GroupId, Project};

/// Fallback root package name.
pub const DEFAULT_ROOT_PACKAGE_NAME: &str = "root";

/// Settings that steer name derivation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamingPolicy {
    pub method: PackagingMethod,
    pub resolve_duplicate_names: bool,
}

impl From<&GeneratorSettings> for NamingPolicy {
    fn from(settings: &GeneratorSettings) -> Self {
        Self {
            method: settings.method(),
            resolve_duplicate_names: settings.resolve_duplicate_names(),
        }
    }
}

/// Name resolver over a project, its options and the current registry bindings.
#[derive(Debug, Clone, Copy)]
pub struct Naming<'a> {
    project: &'a Project,
    options: &'a Options,
    registry: &'a Registry,
    policy: NamingPolicy,
}

impl<'a> Naming<'a> {
    pub fn new(
        project: &'a Project,
        options: &'a Options,
        registry: &'a Registry,
        policy: NamingPolicy,
    ) -> Self {
        Self {
            project,
            options,
            registry,
            policy,
        }
    }

    /// Root package name.
    ///
    /// `CPACK_IFW_PACKAGE_GROUP` (that group's package name), then
    /// `CPACK_IFW_PACKAGE_NAME`, then `CPACK_PACKAGE_NAME`, then `root`.
    pub fn root_package_name(&self) -> String {
        if let Some(group_name) = self.options.get_non_empty(keys::IFW_PACKAGE_GROUP) {
            return match self.project.find_group(group_name) {
                Some(group) => self.group_package_name(group),
                None => self
                    .options
                    .get_non_empty(&keys::group(group_name, "NAME"))
                    .unwrap_or(group_name)
                    .to_string(),
            };
        }

        self.options
            .get_non_empty(keys::IFW_PACKAGE_NAME)
            .or_else(|| self.options.get_non_empty(keys::PACKAGE_NAME))
            .unwrap_or(DEFAULT_ROOT_PACKAGE_NAME)
            .to_string()
    }

    /// Package name of a component group.
    pub fn group_package_name(&self, group: GroupId) -> String {
        if let Some(package) = self.registry.group_package(group) {
            return package.name().to_string();
        }

        let entity = self.project.group(group);
        let name = self.base_name(&keys::group(&entity.name, "NAME"), &entity.name);

        match entity.parent {
            Some(parent) => self.qualify(&self.group_package_name(parent), name),
            None => name,
        }
    }

    /// Package name of a component.
    pub fn component_package_name(&self, component: ComponentId) -> String {
        if let Some(package) = self.registry.component_package(component) {
            return package.name().to_string();
        }

        let entity = self.project.component(component);
        let name = self.base_name(&keys::component(&entity.name, "NAME"), &entity.name);

        let Some(group) = entity.group else {
            return name;
        };

        let parent = self.group_package_name(group);
        if self.policy.method == PackagingMethod::OnePackagePerGroup
            || self
                .options
                .is_option_true(&keys::component(&entity.name, "COMMON"))
        {
            return parent;
        }

        self.qualify(&parent, name)
    }

    fn base_name(&self, override_key: &str, own: &str) -> String {
        self.options
            .get_non_empty(override_key)
            .unwrap_or(own)
            .to_string()
    }

    fn qualify(&self, parent: &str, name: String) -> String {
        if self.policy.resolve_duplicate_names || name.starts_with(parent) {
            name
        } else {
            format!("{parent}.{name}")
        }
    }
}
