//! Installable components and component groups of a project.
//!
//! The [`Project`] table owns every [`Component`] and [`ComponentGroup`]; the
//! generator only refers to them through [`ComponentId`] and [`GroupId`].
//! Identities and ancestry are immutable once the table is built.

mod manifest;

pub use manifest::{ProjectManifest, load_project};

use std::collections::HashMap;

/// Errors found while assembling a project table.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// A name was declared twice.
    #[error("{kind} \"{name}\" is declared more than once")]
    Duplicate { kind: &'static str, name: String },

    /// A parent group or dependency does not exist.
    #[error("{kind} \"{name}\" refers to unknown {target_kind} \"{target}\"")]
    UnknownReference {
        kind: &'static str,
        name: String,
        target_kind: &'static str,
        target: String,
    },

    /// Group parents loop back on themselves.
    #[error("component group \"{name}\" is its own ancestor")]
    GroupCycle { name: String },

    /// Empty names cannot be turned into packages.
    #[error("{kind} name must not be empty")]
    EmptyName { kind: &'static str },
}

/// Index of a component in its [`Project`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(usize);

/// Index of a component group in its [`Project`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(usize);

/// A leaf installable unit.
#[derive(Debug, Clone)]
pub struct Component {
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub group: Option<GroupId>,
    /// Only available from the remote repository.
    pub is_downloaded: bool,
    pub is_hidden: bool,
    pub is_required: bool,
    pub is_disabled_by_default: bool,
    pub dependencies: Vec<ComponentId>,
}

/// A node of the group forest.
#[derive(Debug, Clone)]
pub struct ComponentGroup {
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub parent: Option<GroupId>,
    pub components: Vec<ComponentId>,
    pub subgroups: Vec<GroupId>,
}

/// Immutable table of components and groups.
#[derive(Debug, Clone, Default)]
pub struct Project {
    name: String,
    components: Vec<Component>,
    groups: Vec<ComponentGroup>,
    component_index: HashMap<String, ComponentId>,
    group_index: HashMap<String, GroupId>,
}

impl Project {
    /// Project name (used as the install project of every component).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn find_component(&self, name: &str) -> Option<ComponentId> {
        self.component_index.get(name).copied()
    }

    pub fn find_group(&self, name: &str) -> Option<GroupId> {
        self.group_index.get(name).copied()
    }

    pub fn component(&self, id: ComponentId) -> &Component {
        &self.components[id.0]
    }

    pub fn group(&self, id: GroupId) -> &ComponentGroup {
        &self.groups[id.0]
    }

    /// Components in declaration order.
    pub fn components(&self) -> impl Iterator<Item = (ComponentId, &Component)> {
        self.components
            .iter()
            .enumerate()
            .map(|(i, c)| (ComponentId(i), c))
    }

    /// Groups in declaration order.
    pub fn groups(&self) -> impl Iterator<Item = (GroupId, &ComponentGroup)> {
        self.groups.iter().enumerate().map(|(i, g)| (GroupId(i), g))
    }

    pub fn has_components(&self) -> bool {
        !self.components.is_empty()
    }
}

/// Declaration of a component before references are resolved.
#[derive(Debug, Clone, Default)]
pub struct ComponentSpec {
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub group: Option<String>,
    pub downloaded: bool,
    pub hidden: bool,
    pub required: bool,
    pub disabled: bool,
    pub depends: Vec<String>,
}

impl ComponentSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn downloaded(mut self) -> Self {
        self.downloaded = true;
        self
    }

    pub fn depends_on(mut self, component: impl Into<String>) -> Self {
        self.depends.push(component.into());
        self
    }
}

/// Declaration of a group before references are resolved.
#[derive(Debug, Clone, Default)]
pub struct GroupSpec {
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub parent: Option<String>,
}

impl GroupSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn in_group(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

/// Builder for [`Project`].
///
/// Declarations may reference groups and components declared later; all
/// references are checked in [`ProjectBuilder::build`].
///
/// # Examples
///
/// ```
/// use ifw_packager::project::{ComponentSpec, GroupSpec, ProjectBuilder};
///
/// let project = ProjectBuilder::new("demo")
///     .component(ComponentSpec::new("foo").in_group("bar"))
///     .group(GroupSpec::new("bar"))
///     .build()
///     .unwrap();
///
/// let foo = project.find_component("foo").unwrap();
/// assert_eq!(project.component(foo).group, project.find_group("bar"));
/// ```
#[derive(Debug, Default)]
pub struct ProjectBuilder {
    name: String,
    components: Vec<ComponentSpec>,
    groups: Vec<GroupSpec>,
}

impl ProjectBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn component(mut self, spec: ComponentSpec) -> Self {
        self.components.push(spec);
        self
    }

    pub fn group(mut self, spec: GroupSpec) -> Self {
        self.groups.push(spec);
        self
    }

    /// Resolves references and builds the table.
    pub fn build(self) -> Result<Project, ProjectError> {
        let mut group_index = HashMap::new();
        for (i, spec) in self.groups.iter().enumerate() {
            if spec.name.is_empty() {
                return Err(ProjectError::EmptyName { kind: "component group" });
            }
            if group_index.insert(spec.name.clone(), GroupId(i)).is_some() {
                return Err(ProjectError::Duplicate {
                    kind: "component group",
                    name: spec.name.clone(),
                });
            }
        }

        let mut component_index = HashMap::new();
        for (i, spec) in self.components.iter().enumerate() {
            if spec.name.is_empty() {
                return Err(ProjectError::EmptyName { kind: "component" });
            }
            if component_index.insert(spec.name.clone(), ComponentId(i)).is_some() {
                return Err(ProjectError::Duplicate {
                    kind: "component",
                    name: spec.name.clone(),
                });
            }
        }

        let lookup_group = |kind: &'static str, owner: &str, target: &str| {
            group_index
                .get(target)
                .copied()
                .ok_or_else(|| ProjectError::UnknownReference {
                    kind,
                    name: owner.to_string(),
                    target_kind: "component group",
                    target: target.to_string(),
                })
        };

        let mut groups = Vec::with_capacity(self.groups.len());
        for spec in &self.groups {
            let parent = spec
                .parent
                .as_deref()
                .map(|p| lookup_group("component group", &spec.name, p))
                .transpose()?;
            groups.push(ComponentGroup {
                name: spec.name.clone(),
                display_name: spec.display_name.clone(),
                description: spec.description.clone(),
                parent,
                components: Vec::new(),
                subgroups: Vec::new(),
            });
        }

        // A parent chain longer than the number of groups must revisit a group.
        for (i, group) in groups.iter().enumerate() {
            let mut cursor = group.parent;
            let mut steps = 0;
            while let Some(GroupId(p)) = cursor {
                steps += 1;
                if p == i || steps > groups.len() {
                    return Err(ProjectError::GroupCycle {
                        name: group.name.clone(),
                    });
                }
                cursor = groups[p].parent;
            }
        }

        for i in 0..groups.len() {
            let parent = groups[i].parent;
            if let Some(GroupId(p)) = parent {
                groups[p].subgroups.push(GroupId(i));
            }
        }

        let mut components = Vec::with_capacity(self.components.len());
        for (i, spec) in self.components.iter().enumerate() {
            let group = spec
                .group
                .as_deref()
                .map(|g| lookup_group("component", &spec.name, g))
                .transpose()?;
            if let Some(GroupId(g)) = group {
                groups[g].components.push(ComponentId(i));
            }

            let mut dependencies = Vec::with_capacity(spec.depends.len());
            for dep in &spec.depends {
                let id = component_index.get(dep.as_str()).copied().ok_or_else(|| {
                    ProjectError::UnknownReference {
                        kind: "component",
                        name: spec.name.clone(),
                        target_kind: "component",
                        target: dep.clone(),
                    }
                })?;
                dependencies.push(id);
            }

            components.push(Component {
                name: spec.name.clone(),
                display_name: spec.display_name.clone(),
                description: spec.description.clone(),
                group,
                is_downloaded: spec.downloaded,
                is_hidden: spec.hidden,
                is_required: spec.required,
                is_disabled_by_default: spec.disabled,
                dependencies,
            });
        }

        Ok(Project {
            name: self.name,
            components,
            groups,
            component_index,
            group_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_forest_with_child_links() {
        let project = ProjectBuilder::new("demo")
            .group(GroupSpec::new("leaf").in_group("root"))
            .group(GroupSpec::new("root"))
            .component(ComponentSpec::new("a").in_group("leaf"))
            .component(ComponentSpec::new("b").depends_on("a"))
            .build()
            .unwrap();

        let root = project.find_group("root").unwrap();
        let leaf = project.find_group("leaf").unwrap();
        let a = project.find_component("a").unwrap();
        let b = project.find_component("b").unwrap();

        assert_eq!(project.group(root).subgroups, vec![leaf]);
        assert_eq!(project.group(leaf).parent, Some(root));
        assert_eq!(project.group(leaf).components, vec![a]);
        assert_eq!(project.component(b).dependencies, vec![a]);
        assert_eq!(project.component(b).group, None);
    }

    #[test]
    fn rejects_unknown_parent() {
        let err = ProjectBuilder::new("demo")
            .component(ComponentSpec::new("a").in_group("missing"))
            .build()
            .unwrap_err();
        assert!(matches!(err, ProjectError::UnknownReference { ref target, .. } if target == "missing"));
    }

    #[test]
    fn rejects_group_cycles() {
        let err = ProjectBuilder::new("demo")
            .group(GroupSpec::new("x").in_group("y"))
            .group(GroupSpec::new("y").in_group("x"))
            .build()
            .unwrap_err();
        assert!(matches!(err, ProjectError::GroupCycle { .. }));
    }

    #[test]
    fn rejects_duplicates() {
        let err = ProjectBuilder::new("demo")
            .component(ComponentSpec::new("a"))
            .component(ComponentSpec::new("a"))
            .build()
            .unwrap_err();
        assert!(matches!(err, ProjectError::Duplicate { .. }));
    }
}
