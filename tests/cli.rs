use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/installer.toml")
}

fn packager() -> Command {
    let mut cmd = Command::cargo_bin("ifw_packager").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_describes_usage() {
    packager()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--options-file"))
        .stdout(predicate::str::contains("--define"));
}

#[test]
fn missing_project_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    packager()
        .args(["--project"])
        .arg(dir.path().join("absent.toml"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to read project file"));
}

#[test]
fn malformed_definition_is_rejected() {
    packager()
        .arg("--project")
        .arg(fixture())
        .args(["-D", "CPACK_DOWNLOAD_ALL"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid definition"));
}

#[test]
fn missing_binarycreator_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let empty = dir.path().join("empty");
    std::fs::create_dir(&empty).unwrap();

    packager()
        .env("PATH", &empty)
        .env_remove("QTIFWDIR")
        .arg("--project")
        .arg(fixture())
        .arg("--toplevel")
        .arg(dir.path().join("stage"))
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Cannot find QtIFW compiler \"binarycreator\"",
        ));

    assert!(!dir.path().join("stage").exists());
}

#[cfg(unix)]
mod with_fake_tools {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Installs `binarycreator` and `repogen` scripts under `<ifw>/bin` that
    /// append their arguments to `<ifw>/calls.log`.
    fn install_tools(ifw: &Path, failing: &[&str]) {
        let bin = ifw.join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let log = ifw.join("calls.log");

        for tool in ["binarycreator", "repogen"] {
            let mut script = format!("#!/bin/sh\necho \"{tool} $*\" >> \"{}\"\n", log.display());
            if failing.contains(&tool) {
                script.push_str(&format!("echo \"{tool}: broken repository\"\nexit 2\n"));
            } else if tool == "binarycreator" {
                script.push_str("for last; do :; done\necho installer > \"$last\"\n");
            }
            let path = bin.join(tool);
            std::fs::write(&path, script).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    fn calls(ifw: &Path) -> Vec<String> {
        std::fs::read_to_string(ifw.join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn generates_descriptors_and_runs_binarycreator() {
        let dir = tempfile::tempdir().unwrap();
        let ifw = dir.path().join("ifw");
        let stage = dir.path().join("stage");
        install_tools(&ifw, &[]);

        packager()
            .env("QTIFWDIR", &ifw)
            .arg("--project")
            .arg(fixture())
            .arg("--toplevel")
            .arg(&stage)
            .assert()
            .success()
            .stdout(predicate::str::contains("SHA256:"));

        assert!(stage.join("config/config.xml").is_file());
        for package in ["tools", "core", "tools.cli", "docs"] {
            assert!(
                stage.join("packages").join(package).join("meta/package.xml").is_file(),
                "{package}"
            );
        }
        let cli = std::fs::read_to_string(stage.join("packages/tools.cli/meta/package.xml")).unwrap();
        assert!(cli.contains("<Dependencies>core</Dependencies>"));

        let calls = calls(&ifw);
        assert_eq!(calls.len(), 1);
        assert!(calls[0].starts_with("binarycreator -c "));
        assert!(calls[0].contains(" -i tools,core,tools.cli,org.qt.base "));
        assert!(calls[0].ends_with(" installer"));
        assert!(stage.join("installer").is_file());
    }

    #[test]
    fn download_site_runs_repogen_first() {
        let dir = tempfile::tempdir().unwrap();
        let ifw = dir.path().join("ifw");
        let stage = dir.path().join("stage");
        install_tools(&ifw, &[]);

        packager()
            .env("QTIFWDIR", &ifw)
            .arg("--project")
            .arg(fixture())
            .arg("--toplevel")
            .arg(&stage)
            .args(["-D", "CPACK_DOWNLOAD_SITE=https://example.com/repo"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Repository:"));

        let calls = calls(&ifw);
        assert_eq!(calls.len(), 2);
        assert!(calls[0].starts_with("repogen "));
        assert!(calls[0].contains(" -i docs "));
        assert!(calls[0].ends_with("/repository"));
        assert!(calls[1].contains(" -e docs "));
        assert!(!calls[1].contains(" -i "));
    }

    #[test]
    fn failing_repogen_writes_the_diagnostic_log() {
        let dir = tempfile::tempdir().unwrap();
        let ifw = dir.path().join("ifw");
        let stage = dir.path().join("stage");
        install_tools(&ifw, &["repogen"]);

        packager()
            .env("QTIFWDIR", &ifw)
            .arg("--project")
            .arg(fixture())
            .arg("--toplevel")
            .arg(&stage)
            .args(["-D", "CPACK_DOWNLOAD_SITE=https://example.com/repo"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Problem running IFW command"));

        assert_eq!(calls(&ifw).len(), 1, "binarycreator must not run");
        let log = std::fs::read_to_string(stage.join("IFWOutput.log")).unwrap();
        assert!(log.starts_with("# Run command: "));
        assert!(log.contains("repogen: broken repository"));
    }

    #[test]
    fn output_argument_is_forwarded() {
        let dir = tempfile::tempdir().unwrap();
        let ifw = dir.path().join("ifw");
        let stage = dir.path().join("stage");
        let output = dir.path().join("dist-setup");
        install_tools(&ifw, &[]);

        packager()
            .env("QTIFWDIR", &ifw)
            .arg("--project")
            .arg(fixture())
            .arg("--toplevel")
            .arg(&stage)
            .arg("--output")
            .arg(&output)
            .args(["-D", "CPACK_IFW_COMPONENT_CORE_DEPENDS="])
            .assert()
            .success();

        let calls = calls(&ifw);
        assert!(calls[0].ends_with(&format!(" {}", output.display())));
        assert!(!calls[0].contains(" -i "));
        assert!(output.is_file());
    }

    #[test]
    fn relative_tool_path_resolves_from_the_invocation_directory() {
        let dir = tempfile::tempdir().unwrap();
        let ifw = dir.path().join("ifw");
        install_tools(&ifw, &[]);

        packager()
            .current_dir(dir.path())
            .env_remove("QTIFWDIR")
            .arg("--project")
            .arg(fixture())
            .args(["--toplevel", "stage"])
            .args(["-D", "CPACK_IFW_BINARYCREATOR_EXECUTABLE_FOUND=ON"])
            .args(["-D", "CPACK_IFW_BINARYCREATOR_EXECUTABLE=ifw/bin/binarycreator"])
            .assert()
            .success();

        assert_eq!(calls(&ifw).len(), 1);
        assert!(dir.path().join("stage/installer").is_file());
    }
}
