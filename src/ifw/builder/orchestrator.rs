//! Installer generation orchestration.
//!
//! [`Generator`] owns the project, the options, the package registry and the
//! installer, and drives the strictly ordered generation pipeline.

use super::{
    checksum::artifact_digest,
    command::{CommandLine, CommandRunner, ProcessRunner},
    tool_detection::{IfwTools, discover_tools},
};
use crate::{
    ifw::{
        Error, Result,
        error::ErrorExt,
        installer::{Installer, InstallerConfig},
        naming::{Naming, NamingPolicy},
        options::Options,
        package::{Distribution, Package},
        registry::{Registry, ResolveContext},
        settings::{GeneratorSettings, PackagingMethod},
    },
    project::{ComponentId, GroupId, Project},
};
use std::path::PathBuf;

/// Result of a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedInstaller {
    /// Where `binarycreator` was asked to write the installer.
    pub path: PathBuf,
    /// Remote repository directory, when `repogen` ran.
    pub repository: Option<PathBuf>,
    /// Installer size in bytes, when a regular file was produced.
    pub size: Option<u64>,
    /// Hex-encoded SHA-256 of the installer, when a regular file was produced.
    pub checksum: Option<String>,
}

/// Qt Installer Framework generator.
///
/// # Examples
///
/// ```no_run
/// use ifw_packager::ifw::{Generator, Options, SettingsBuilder};
/// use ifw_packager::project::{ComponentSpec, ProjectBuilder};
///
/// # async fn example() -> ifw_packager::Result<()> {
/// let project = ProjectBuilder::new("demo")
///     .component(ComponentSpec::new("core"))
///     .build()?;
/// let options = Options::new();
/// let settings = SettingsBuilder::from_options(&options).build()?;
///
/// let mut generator = Generator::new(project, options, settings)?;
/// generator.resolve_all();
/// let installer = generator.package_files().await?;
/// println!("Created {}", installer.path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Generator<R: CommandRunner = ProcessRunner> {
    project: Project,
    options: Options,
    settings: GeneratorSettings,
    tools: IfwTools,
    registry: Registry,
    installer: Installer,
    runner: R,
}

impl Generator<ProcessRunner> {
    /// Creates a generator running the IFW tools as child processes inside the
    /// toplevel directory.
    ///
    /// # Errors
    ///
    /// [`Error::ToolNotFound`] when a required tool cannot be located.
    pub fn new(project: Project, options: Options, settings: GeneratorSettings) -> Result<Self> {
        let runner = ProcessRunner::new()
            .working_dir(settings.toplevel())
            .timeout(settings.tool_timeout());
        Self::with_runner(project, options, settings, runner)
    }
}

impl<R: CommandRunner> Generator<R> {
    /// Creates a generator with a custom command runner.
    ///
    /// Tools not already marked found in `options` are searched for first.
    pub fn with_runner(
        project: Project,
        mut options: Options,
        settings: GeneratorSettings,
        runner: R,
    ) -> Result<Self> {
        discover_tools(&mut options);
        let tools = IfwTools::from_options(&options, &settings)?;
        let installer = Installer::new(InstallerConfig::from_options(&options));

        Ok(Self {
            project,
            options,
            settings,
            tools,
            registry: Registry::new(),
            installer,
            runner,
        })
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn installer(&self) -> &Installer {
        &self.installer
    }

    fn policy(&self) -> NamingPolicy {
        NamingPolicy::from(&self.settings)
    }

    fn naming(&self) -> Naming<'_> {
        Naming::new(&self.project, &self.options, &self.registry, self.policy())
    }

    /// Resolves a component, creating its package on first sight.
    pub fn resolve_component(&mut self, project_name: &str, component_name: &str) -> Option<ComponentId> {
        let ctx = ResolveContext {
            project: &self.project,
            options: &self.options,
            policy: NamingPolicy::from(&self.settings),
        };
        self.registry
            .resolve_component(ctx, &mut self.installer, project_name, component_name)
    }

    /// Resolves a component group, creating its package on first sight.
    pub fn resolve_group(&mut self, project_name: &str, group_name: &str) -> Option<GroupId> {
        let ctx = ResolveContext {
            project: &self.project,
            options: &self.options,
            policy: NamingPolicy::from(&self.settings),
        };
        self.registry
            .resolve_group(ctx, &mut self.installer, project_name, group_name)
    }

    /// Resolves every group and component of the project in declaration order,
    /// then records external dependencies.
    ///
    /// In one-package mode everything installs into the root package and no
    /// component packages are created.
    pub fn resolve_all(&mut self) {
        if self.settings.method() != PackagingMethod::OnePackage {
            let project_name = self.project.name().to_string();
            let groups: Vec<String> = self.project.groups().map(|(_, g)| g.name.clone()).collect();
            let components: Vec<String> =
                self.project.components().map(|(_, c)| c.name.clone()).collect();

            for group in &groups {
                self.resolve_group(&project_name, group);
            }
            for component in &components {
                self.resolve_component(&project_name, component);
            }
        }
        self.registry.collect_dependents();
    }

    pub fn root_package_name(&self) -> String {
        self.naming().root_package_name()
    }

    pub fn group_package_name(&self, group: GroupId) -> String {
        self.naming().group_package_name(group)
    }

    pub fn component_package_name(&self, component: ComponentId) -> String {
        self.naming().component_package_name(component)
    }

    /// Install directory of a component, relative to the toplevel directory.
    pub fn component_install_dir_suffix(&self, component_name: &str) -> Option<String> {
        let package = if self.settings.method() == PackagingMethod::OnePackage {
            self.root_package_name()
        } else {
            let id = self.project.find_component(component_name)?;
            self.component_package_name(id)
        };
        Some(format!("packages/{package}/data"))
    }

    /// Install prefix for a project without components. `None` keeps the
    /// default prefix.
    pub fn packaging_install_prefix(&self) -> Option<String> {
        (!self.project.has_components())
            .then(|| format!("packages/{}/data", self.root_package_name()))
    }

    fn packages_args(&self, cmd: &mut CommandLine) {
        cmd.arg("-c")
            .arg(self.settings.config_path().display().to_string())
            .arg("-p")
            .arg(self.settings.packages_path().display().to_string());
        for dir in self.settings.packages_directories() {
            cmd.arg("-p").arg(dir.display().to_string());
        }
    }

    /// `repogen` invocation, when a download site is configured.
    pub fn repogen_command(&self) -> Option<CommandLine> {
        self.settings.download_site()?;
        let mut cmd = CommandLine::new(self.tools.repo_gen.as_ref()?);
        self.packages_args(&mut cmd);

        if !self.settings.online_only() && self.registry.has(Distribution::Downloaded) {
            cmd.arg("-i")
                .arg(self.registry.names_of(Distribution::Downloaded).join(","));
        }
        cmd.arg(self.settings.repository_path().display().to_string());
        Some(cmd)
    }

    /// `binarycreator` invocation.
    pub fn binarycreator_command(&self) -> CommandLine {
        let mut cmd = CommandLine::new(&self.tools.binary_creator);
        self.packages_args(&mut cmd);

        if self.settings.online_only() {
            cmd.arg("--online-only");
        } else if self.registry.has(Distribution::Downloaded) && self.settings.download_site().is_some() {
            cmd.arg("-e")
                .arg(self.registry.names_of(Distribution::Downloaded).join(","));
        } else if self.registry.has(Distribution::Dependent) {
            let mut names = self.registry.names_of(Distribution::Binary);
            names.extend(self.registry.names_of(Distribution::Dependent));
            cmd.arg("-i").arg(names.join(","));
        }

        cmd.arg(self.settings.output_argument());
        cmd
    }

    /// Writes the descriptors and runs the IFW tools.
    ///
    /// # Errors
    ///
    /// Stops at the first stage that fails; a failing tool writes its command
    /// line and output to `<toplevel>/IFWOutput.log` and yields
    /// [`Error::ExternalToolFailed`].
    pub async fn package_files(&mut self) -> Result<GeneratedInstaller> {
        let toplevel = self.settings.toplevel();
        tokio::fs::create_dir_all(toplevel)
            .await
            .fs_context("creating toplevel directory", toplevel)?;

        self.registry.collect_dependents();

        log::info!("- Configuration");
        self.installer.generate_installer_file(&self.settings).await?;
        if self.installer.packages().is_empty() || self.settings.method() == PackagingMethod::OnePackage {
            let root = Package::root(self.root_package_name(), &self.options);
            self.installer
                .generate_default_package_file(&root, &self.settings)
                .await?;
        } else {
            self.installer
                .generate_package_files(&self.registry, &self.naming(), &self.settings)
                .await?;
        }

        let mut repository = None;
        if let Some(cmd) = self.repogen_command() {
            log::info!("- Generate repository");
            self.run_tool(&cmd).await?;
            let path = self.settings.repository_path();
            log::info!("- repository: {} generated", path.display());
            repository = Some(path);
        }

        log::info!("- Generate package");
        let cmd = self.binarycreator_command();
        self.run_tool(&cmd).await?;

        let path = self.settings.output_path();
        let digest = artifact_digest(&path).await?;
        Ok(GeneratedInstaller {
            path,
            repository,
            size: digest.as_ref().map(|(size, _)| *size),
            checksum: digest.map(|(_, checksum)| checksum),
        })
    }

    async fn run_tool(&self, cmd: &CommandLine) -> Result<()> {
        log::debug!("Execute: {cmd}");
        let output = self.runner.run(cmd).await;
        if output.is_success() {
            return Ok(());
        }

        let log_path = self.settings.log_path();
        let report = format!("# Run command: {cmd}\n# Output:\n{}\n", output.output);
        tokio::fs::write(&log_path, report)
            .await
            .fs_context("writing IFW diagnostic log", &log_path)?;

        log::error!(
            "Problem running IFW command: {cmd}\nPlease check {} for errors",
            log_path.display()
        );
        Err(Error::ExternalToolFailed {
            command: cmd.to_string(),
            log_path,
        })
    }
}
