//! Package registry.
//!
//! The registry is the only owner of [`Package`] values. Packages live in an
//! append-only arena addressed by [`PackageId`]; the name, component and group
//! maps are lookup relations into it. A package enters the arena only after it
//! configured successfully, so a failed configuration leaves nothing behind.
//!
//! Distribution sets are views over the arena filtered by each package's
//! [`Distribution`] tag, in insertion order.

use super::{
    installer::Installer,
    naming::{Naming, NamingPolicy},
    options::Options,
    package::{Distribution, Package, PackageId},
};
use crate::project::{ComponentId, GroupId, Project};
use std::collections::{HashMap, HashSet};

/// Read-only inputs shared by every resolution call.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub project: &'a Project,
    pub options: &'a Options,
    pub policy: NamingPolicy,
}

#[derive(Debug, Default)]
pub struct Registry {
    packages: Vec<Package>,
    names: HashMap<String, PackageId>,
    component_packages: HashMap<ComponentId, PackageId>,
    group_packages: HashMap<GroupId, PackageId>,
    resolved_components: HashSet<ComponentId>,
    resolved_groups: HashSet<GroupId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn package(&self, id: PackageId) -> &Package {
        &self.packages[id.0]
    }

    /// Looks a package up by canonical name.
    pub fn find(&self, name: &str) -> Option<&Package> {
        self.names.get(name).map(|id| self.package(*id))
    }

    pub fn component_package(&self, component: ComponentId) -> Option<&Package> {
        self.component_packages
            .get(&component)
            .map(|id| self.package(*id))
    }

    pub fn group_package(&self, group: GroupId) -> Option<&Package> {
        self.group_packages.get(&group).map(|id| self.package(*id))
    }

    /// All packages in insertion order.
    pub fn packages(&self) -> impl Iterator<Item = (PackageId, &Package)> {
        self.packages
            .iter()
            .enumerate()
            .map(|(i, p)| (PackageId(i), p))
    }

    /// Packages of one distribution mode, in insertion order.
    pub fn by_distribution(&self, distribution: Distribution) -> impl Iterator<Item = &Package> {
        self.packages
            .iter()
            .filter(move |p| p.distribution() == distribution)
    }

    /// Names of the packages of one distribution mode, in insertion order.
    pub fn names_of(&self, distribution: Distribution) -> Vec<&str> {
        self.by_distribution(distribution).map(Package::name).collect()
    }

    pub fn has(&self, distribution: Distribution) -> bool {
        self.by_distribution(distribution).next().is_some()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Resolves a component by name, creating its package on first sight.
    ///
    /// Returns `None` only when the project has no such component. A component
    /// whose package fails to configure is still returned; the failure is logged
    /// and its siblings are unaffected.
    pub fn resolve_component(
        &mut self,
        ctx: ResolveContext<'_>,
        installer: &mut Installer,
        project_name: &str,
        component_name: &str,
    ) -> Option<ComponentId> {
        let Some(id) = ctx.project.find_component(component_name) else {
            log::warn!("Component \"{component_name}\" is not declared by project \"{project_name}\"");
            return None;
        };
        if !self.resolved_components.insert(id) {
            return Some(id);
        }

        let component = ctx.project.component(id);
        if let Some(group) = component.group {
            self.resolve_group_id(ctx, installer, project_name, group);
        }

        let name = Naming::new(ctx.project, ctx.options, self, ctx.policy).component_package_name(id);
        log::debug!("Component \"{component_name}\" of project \"{project_name}\" maps to package \"{name}\"");

        if let Some(&existing) = self.names.get(&name) {
            if self.join(existing, &name, &format!("component \"{component_name}\"")) {
                self.component_packages.insert(id, existing);
                self.packages[existing.0].add_component(id);
            }
            return Some(id);
        }

        match Package::from_component(name, id, component, ctx.options) {
            Ok(package) => {
                let pid = self.insert(package);
                self.component_packages.insert(id, pid);
                installer.register(pid);
            }
            Err(err) => log::error!("{err}"),
        }

        Some(id)
    }

    /// Resolves a component group by name, creating its package on first sight.
    ///
    /// Group packages are always [`Distribution::Binary`].
    pub fn resolve_group(
        &mut self,
        ctx: ResolveContext<'_>,
        installer: &mut Installer,
        project_name: &str,
        group_name: &str,
    ) -> Option<GroupId> {
        let Some(id) = ctx.project.find_group(group_name) else {
            log::warn!("Component group \"{group_name}\" is not declared by project \"{project_name}\"");
            return None;
        };
        self.resolve_group_id(ctx, installer, project_name, id);
        Some(id)
    }

    fn resolve_group_id(
        &mut self,
        ctx: ResolveContext<'_>,
        installer: &mut Installer,
        project_name: &str,
        id: GroupId,
    ) {
        if !self.resolved_groups.insert(id) {
            return;
        }

        let group = ctx.project.group(id);
        if let Some(parent) = group.parent {
            self.resolve_group_id(ctx, installer, project_name, parent);
        }

        let name = Naming::new(ctx.project, ctx.options, self, ctx.policy).group_package_name(id);
        log::debug!(
            "Component group \"{}\" of project \"{project_name}\" maps to package \"{name}\"",
            group.name
        );

        if let Some(&existing) = self.names.get(&name) {
            if self.join(existing, &name, &format!("component group \"{}\"", group.name)) {
                self.group_packages.insert(id, existing);
            }
            return;
        }

        match Package::from_group(name, id, group, ctx.options) {
            Ok(package) => {
                let pid = self.insert(package);
                self.group_packages.insert(id, pid);
                installer.register(pid);
            }
            Err(err) => log::error!("{err}"),
        }
    }

    /// Adds a `Dependent` package for every external dependency name that is
    /// not a package of this run. Returns how many were added.
    pub fn collect_dependents(&mut self) -> usize {
        let wanted: Vec<String> = self
            .packages
            .iter()
            .flat_map(|p| p.descriptor().external_dependencies.iter().cloned())
            .collect();

        let mut added = 0;
        for name in wanted {
            if !self.names.contains_key(&name) {
                log::debug!("Package \"{name}\" is provided outside this run");
                self.insert(Package::dependent(name));
                added += 1;
            }
        }
        added
    }

    fn insert(&mut self, package: Package) -> PackageId {
        let id = PackageId(self.packages.len());
        self.names.insert(package.name().to_string(), id);
        self.packages.push(package);
        id
    }

    /// Whether an entity may share the existing package `name`.
    fn join(&self, existing: PackageId, name: &str, owner: &str) -> bool {
        if self.package(existing).distribution() == Distribution::Dependent {
            log::error!(
                "Cannot configure package \"{name}\" for {owner}: the name belongs to an external dependency"
            );
            return false;
        }
        log::debug!("{owner} shares package \"{name}\"");
        true
    }
}
