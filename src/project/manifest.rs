//! Project description file loading.
//!
//! ```toml
//! [project]
//! name = "demo"
//!
//! [options]
//! CPACK_PACKAGE_NAME = "Demo"
//! CPACK_DOWNLOAD_SITE = "https://example.com/repo"
//!
//! [[group]]
//! name = "tools"
//!
//! [[component]]
//! name = "cli"
//! group = "tools"
//! downloaded = true
//! ```

use super::{ComponentSpec, GroupSpec, Project, ProjectBuilder};
use crate::error::Result;
use crate::ifw::Options;
use anyhow::Context as _;
use serde::Deserialize;
use std::path::Path;

/// A loaded project file: the component table plus its `[options]`.
#[derive(Debug)]
pub struct ProjectManifest {
    pub project: Project,
    pub options: Options,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    project: ProjectSection,
    #[serde(default)]
    options: toml::Table,
    #[serde(default, rename = "group")]
    groups: Vec<GroupEntry>,
    #[serde(default, rename = "component")]
    components: Vec<ComponentEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProjectSection {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GroupEntry {
    name: String,
    display_name: Option<String>,
    description: Option<String>,
    parent: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ComponentEntry {
    name: String,
    display_name: Option<String>,
    description: Option<String>,
    group: Option<String>,
    #[serde(default)]
    downloaded: bool,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    disabled: bool,
    #[serde(default)]
    depends: Vec<String>,
}

/// Load a project file (single read + parse).
pub fn load_project(path: &Path) -> Result<ProjectManifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read project file {}", path.display()))?;
    parse_project(&content)
}

fn parse_project(content: &str) -> Result<ProjectManifest> {
    let file: ManifestFile = toml::from_str(content)?;

    let mut builder = ProjectBuilder::new(file.project.name);
    for entry in file.groups {
        builder = builder.group(GroupSpec {
            name: entry.name,
            display_name: entry.display_name,
            description: entry.description,
            parent: entry.parent,
        });
    }
    for entry in file.components {
        builder = builder.component(ComponentSpec {
            name: entry.name,
            display_name: entry.display_name,
            description: entry.description,
            group: entry.group,
            downloaded: entry.downloaded,
            hidden: entry.hidden,
            required: entry.required,
            disabled: entry.disabled,
            depends: entry.depends,
        });
    }

    let mut options = Options::new();
    options.merge_table(&file.options)?;

    Ok(ProjectManifest {
        project: builder.build()?,
        options,
    })
}
