use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

struct TestEnv {
    tmp: TempDir,
    bin: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            tmp: tempfile::tempdir().expect("tempdir"),
            bin: tempfile::tempdir().expect("bin tempdir"),
        }
    }

    #[cfg(unix)]
    fn write_executable(&self, name: &str, script: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = self.bin.path().join(name);
        fs::write(&path, script).expect("write stub");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod");
    }

    /// Put a fake package manager on PATH. It appends its argv to
    /// `calls.log` and runs `on_init` when invoked as `<name> init ...`.
    #[cfg(unix)]
    fn stub_tool(&self, name: &str, on_init: &str) {
        let script = format!(
            "#!/bin/sh\necho \"{name} $*\" >> \"{log}\"\nif [ \"$1\" = init ]; then\n  {on_init}\nfi\n",
            log = self.calls_log().display(),
        );
        self.write_executable(name, &script);
    }

    fn calls_log(&self) -> std::path::PathBuf {
        self.bin.path().join("calls.log")
    }

    fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.calls_log())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn path(&self) -> &std::path::Path {
        self.tmp.path()
    }

    fn write(&self, name: &str, contents: &str) {
        fs::write(self.path().join(name), contents).expect("write fixture");
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path().join(name)).expect("read file")
    }

    fn upm(&self) -> Command {
        let old_path = std::env::var("PATH").unwrap_or_default();
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_upm"));
        cmd.current_dir(self.path())
            .env("PATH", format!("{}:{}", self.bin.path().display(), old_path))
            .env_remove("UPM_LANGUAGE")
            .env_remove("UPM_CASK_SOURCES")
            .env("NO_COLOR", "1");
        cmd
    }
}

#[test]
fn list_languages_in_registration_order() {
    let env = TestEnv::new();
    env.upm()
        .arg("list-languages")
        .assert()
        .success()
        .stdout("python-poetry\nnodejs-yarn\nelisp-cask\n");
}

#[test]
fn unknown_language_fails() {
    let env = TestEnv::new();
    env.upm()
        .args(["--lang", "nope", "which-language"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no such language: nope"));
}

#[test]
fn autodetect_failure_in_empty_directory() {
    let env = TestEnv::new();
    env.upm()
        .arg("which-language")
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not autodetect"));
}

#[test]
fn detection_prefers_first_registered_backend() {
    let env = TestEnv::new();
    env.write("package.json", "{}");
    env.write("Cask", "(source melpa)\n");

    env.upm()
        .arg("which-language")
        .assert()
        .success()
        .stdout("nodejs-yarn\n");

    env.upm()
        .args(["-l", "elisp-cask", "which-language"])
        .assert()
        .success()
        .stdout("elisp-cask\n");
}

#[test]
fn language_from_environment() {
    let env = TestEnv::new();
    env.upm()
        .env("UPM_LANGUAGE", "elisp-cask")
        .arg("show-specfile")
        .assert()
        .success()
        .stdout("Cask\n");
}

#[test]
fn cask_add_creates_specfile() {
    let env = TestEnv::new();
    env.upm()
        .args(["-l", "elisp-cask", "add", "dash", "magit \"2.90\""])
        .assert()
        .success();

    assert_eq!(
        env.read("Cask"),
        "(source gnu)\n(source melpa)\n(source org)\n(depends-on \"dash\")\n(depends-on \"magit\" \"2.90\")\n"
    );
}

#[test]
fn cask_sources_from_environment() {
    let env = TestEnv::new();
    env.upm()
        .env("UPM_CASK_SOURCES", "melpa")
        .args(["-l", "elisp-cask", "add", "dash"])
        .assert()
        .success();

    assert_eq!(env.read("Cask"), "(source melpa)\n(depends-on \"dash\")\n");
}

#[test]
fn cask_remove_without_specfile_fails() {
    let env = TestEnv::new();
    env.upm()
        .args(["-l", "elisp-cask", "remove", "dash"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cask does not exist"));

    assert!(!env.path().join("Cask").exists());
}

#[test]
fn cask_remove_after_add() {
    let env = TestEnv::new();
    env.write("Cask", "(source melpa)\n(depends-on \"dash\")\n(depends-on \"s\")\n");

    env.upm().args(["remove", "dash"]).assert().success();

    assert_eq!(env.read("Cask"), "(source melpa)\n(depends-on \"s\")\n");
}

#[test]
fn cask_lock_is_unsupported() {
    let env = TestEnv::new();
    env.upm()
        .args(["-l", "elisp-cask", "lock"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("lock is not supported for elisp-cask"));
}

#[test]
fn cask_search_is_unsupported() {
    let env = TestEnv::new();
    env.upm()
        .args(["-l", "elisp-cask", "search", "dash"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not supported"));
}

#[test]
fn yarn_list_lockfile() {
    let env = TestEnv::new();
    env.write("package.json", r#"{"dependencies": {"foo": "^1.0.0"}}"#);
    env.write("yarn.lock", "\"foo@^1.0.0\":\n  version \"1.2.3\"\n");

    env.upm()
        .args(["list", "--lock"])
        .assert()
        .success()
        .stdout("foo 1.2.3\n");

    env.upm()
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""foo": "^1.0.0""#));
}

#[test]
fn poetry_list_specfile_skips_python() {
    let env = TestEnv::new();
    env.write(
        "pyproject.toml",
        "[tool.poetry]\nname = \"demo\"\n\n[tool.poetry.dependencies]\npython = \"^3.8\"\nflask = \"^1.1\"\n",
    );

    env.upm()
        .arg("list")
        .assert()
        .success()
        .stdout("flask ^1.1\n");
}

#[test]
fn malformed_lockfile_is_fatal() {
    let env = TestEnv::new();
    env.write("pyproject.toml", "[tool.poetry]\n");
    env.write("poetry.lock", "[[package]\n");

    env.upm()
        .args(["list", "--lock"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("poetry.lock"));
}

#[cfg(unix)]
#[test]
fn poetry_add_bootstraps_pyproject_and_batches_packages() {
    let env = TestEnv::new();
    env.stub_tool(
        "poetry",
        "printf '[tool.poetry]\\nname = \"demo\"\\n' > pyproject.toml",
    );

    env.upm()
        .args(["-l", "python-poetry", "add", "flask", "requests >=2.0", "django 3.1"])
        .assert()
        .success();

    assert!(env.path().join("pyproject.toml").exists());
    assert_eq!(
        env.calls(),
        vec![
            "poetry init --no-interaction",
            "poetry add django@3.1 flask requests>=2.0",
        ]
    );
}

#[cfg(unix)]
#[test]
fn poetry_add_with_existing_pyproject_skips_init() {
    let env = TestEnv::new();
    env.stub_tool("poetry", "exit 1");
    env.write("pyproject.toml", "[tool.poetry]\n");

    env.upm().args(["add", "flask"]).assert().success();

    assert_eq!(env.calls(), vec!["poetry add flask"]);
}

#[cfg(unix)]
#[test]
fn poetry_remove_lock_and_install() {
    let env = TestEnv::new();
    env.stub_tool("poetry", "exit 1");
    env.write("pyproject.toml", "[tool.poetry]\n");

    env.upm().args(["remove", "flask", "click"]).assert().success();
    env.upm().arg("lock").assert().success();
    env.upm().arg("install").assert().success();

    assert_eq!(
        env.calls(),
        vec!["poetry remove click flask", "poetry lock", "poetry install"]
    );
}

#[cfg(unix)]
#[test]
fn yarn_add_bootstraps_package_json() {
    let env = TestEnv::new();
    env.stub_tool("yarn", "echo '{}' > package.json");

    env.upm()
        .args(["-l", "nodejs-yarn", "add", "left-pad", "react ^18.2.0"])
        .assert()
        .success();

    assert!(env.path().join("package.json").exists());
    assert_eq!(
        env.calls(),
        vec!["yarn init --yes", "yarn add left-pad react@^18.2.0"]
    );
}

#[cfg(unix)]
#[test]
fn yarn_remove_lock_and_install() {
    let env = TestEnv::new();
    env.stub_tool("yarn", "exit 1");
    env.write("package.json", "{}");

    env.upm().args(["remove", "left-pad"]).assert().success();
    env.upm().arg("lock").assert().success();
    env.upm().arg("install").assert().success();

    assert_eq!(
        env.calls(),
        vec!["yarn remove left-pad", "yarn upgrade", "yarn install"]
    );
}

#[cfg(unix)]
#[test]
fn failing_package_manager_is_fatal() {
    let env = TestEnv::new();
    env.write_executable("yarn", "#!/bin/sh\nexit 7\n");
    env.write("package.json", "{}");

    env.upm()
        .arg("install")
        .assert()
        .failure()
        .stderr(predicate::str::contains("yarn install"));
}
