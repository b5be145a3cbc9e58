//! Emacs Lisp packages managed by Cask
//!
//! Cask has no lock step: whatever ends up under `.cask/` after an install is
//! the resolved state. `install` records that state in `packages.txt` so
//! `list --lock` has something to read.

use crate::core::types::{
    LockMap, NameSet, Operation, PkgInfo, PkgName, PkgSpec, PkgVersion, Quirks, SpecMap,
};
use crate::error::{Result, UpmError};
use crate::packages::traits::{LanguageBackend, Locker};
use crate::utils::{fs, process, sanitize};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

const NAME: &str = "elisp-cask";
const SPECFILE: &str = "Cask";
const LOCKFILE: &str = "packages.txt";

/// Prints `name=version` for every package directory on the load path.
const ELISP_INSTALL_CODE: &str = r#"
(dolist (dir load-path)
  (when (string-match "elpa/\\(.+\\)-\\([^-]+\\)" dir)
    (princ (format "%s=%s\n"
                   (match-string 1 dir)
                   (match-string 2 dir)))))
"#;

/// Prints `name=spec` for every runtime and development dependency.
const ELISP_LIST_SPECFILE_CODE: &str = r#"
(let* ((bundle (cask-cli--bundle))
       (deps (append (cask-runtime-dependencies bundle)
                     (cask-development-dependencies bundle))))
  (dolist (d deps)
    (let ((fetcher (cask-dependency-fetcher d))
          (url (cask-dependency-url d))
          (files (cask-dependency-files d))
          (ref (cask-dependency-ref d))
          (branch (cask-dependency-branch d)))
      (princ (format "%S=%s%s%s%s\n"
                     (cask-dependency-name d)
                     (if fetcher (format "%S %S" fetcher url) "")
                     (if files (format ":files %S" files) "")
                     (if ref (format ":ref %S" ref) "")
                     (if branch (format ":branch %S" branch) ""))))))
"#;

static LOCK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([^=\n]+)=(.+)$").expect("Invalid regex pattern"));

pub struct CaskBackend {
    root: PathBuf,
    sources: Vec<String>,
}

impl CaskBackend {
    pub fn new(root: &Path, sources: Vec<String>) -> Self {
        Self {
            root: root.to_path_buf(),
            sources,
        }
    }

    fn cask_eval(&self, code: &str) -> Result<String> {
        let output = process::get_cmd_output(&process::argv(["cask", "eval", code]), &self.root)?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }

    /// Contents of a Cask file that declares only package sources.
    fn template(&self) -> String {
        self.sources
            .iter()
            .map(|source| format!("(source {})\n", source))
            .collect()
    }
}

fn validate_cask_names<'a>(names: impl IntoIterator<Item = &'a PkgName>) -> Result<()> {
    for name in names {
        sanitize::validate_package_name(name.as_str())?;
        if name.as_str().contains(['"', '\\', '(', ')']) {
            return Err(UpmError::InvalidPackageName(format!(
                "{} cannot be written to a Cask file",
                name
            )));
        }
    }
    Ok(())
}

impl LanguageBackend for CaskBackend {
    fn name(&self) -> &str {
        NAME
    }

    fn specfile(&self) -> &str {
        SPECFILE
    }

    fn lockfile(&self) -> &str {
        LOCKFILE
    }

    fn quirks(&self) -> Quirks {
        Quirks::NOT_REPRODUCIBLE
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn detect(&self) -> bool {
        fs::file_exists(&self.specfile_path())
    }

    fn search(&self, _queries: &[String]) -> Result<Vec<PkgInfo>> {
        Err(UpmError::not_implemented(NAME, Operation::Search))
    }

    fn info(&self, _name: &PkgName) -> Result<Option<PkgInfo>> {
        Err(UpmError::not_implemented(NAME, Operation::Info))
    }

    fn add(&self, pkgs: &SpecMap) -> Result<()> {
        validate_cask_names(pkgs.keys())?;

        let path = self.specfile_path();
        let contents = fs::read_optional(&path)?.unwrap_or_else(|| self.template());
        fs::write_atomic(&path, add_dependencies(contents, pkgs).as_bytes())
    }

    fn remove(&self, pkgs: &NameSet) -> Result<()> {
        let path = self.specfile_path();
        fs::require_file(&path)?;

        let contents = fs::read_file(&path)?;
        fs::write_atomic(&path, remove_dependencies(contents, pkgs).as_bytes())
    }

    fn locker(&self) -> Option<&dyn Locker> {
        None
    }

    fn install(&self) -> Result<()> {
        process::run_cmd(&process::argv(["cask", "install"]), &self.root)?;
        let installed = self.cask_eval(ELISP_INSTALL_CODE)?;
        fs::write_atomic(&self.lockfile_path(), installed.as_bytes())
    }

    fn list_specfile(&self) -> Result<SpecMap> {
        let output = self.cask_eval(ELISP_LIST_SPECFILE_CODE)?;
        parse_specfile_listing(&output)
    }

    fn list_lockfile(&self) -> Result<LockMap> {
        let contents = fs::read_file(&self.lockfile_path())?;
        Ok(parse_lockfile(&contents))
    }

    fn guess(&self) -> Result<NameSet> {
        Err(UpmError::not_implemented(NAME, Operation::Guess))
    }
}

/// Append one `depends-on` form per package, starting on a fresh line.
fn add_dependencies(mut contents: String, pkgs: &SpecMap) -> String {
    if !contents.is_empty() && !contents.ends_with('\n') {
        contents.push('\n');
    }

    for (name, spec) in pkgs {
        contents.push_str(&format!("(depends-on \"{}\"", name));
        if !spec.is_empty() {
            contents.push_str(&format!(" {}", spec));
        }
        contents.push_str(")\n");
    }

    contents
}

/// Drop every `depends-on` line naming one of `pkgs`, newline included.
fn remove_dependencies(mut contents: String, pkgs: &NameSet) -> String {
    for name in pkgs {
        let pattern = format!(
            r#"(?m)^ *\(depends-on +"{}".*\)[ \t]*(?:\n|\z)"#,
            regex::escape(name.as_str())
        );
        let re = Regex::new(&pattern).expect("escaped package name yields a valid regex");
        contents = re.replace_all(&contents, "").into_owned();
    }
    contents
}

fn parse_specfile_listing(output: &str) -> Result<SpecMap> {
    let mut pkgs = SpecMap::new();
    for line in output.lines().filter(|l| !l.is_empty()) {
        let Some((name, spec)) = line.split_once('=') else {
            return Err(UpmError::ParseError {
                file: "cask eval output".to_string(),
                message: format!("unexpected output: {}", line),
            });
        };
        pkgs.insert(PkgName::from(name), PkgSpec::from(spec));
    }
    Ok(pkgs)
}

fn parse_lockfile(contents: &str) -> LockMap {
    LOCK_LINE
        .captures_iter(contents)
        .map(|caps| (PkgName::from(&caps[1]), PkgVersion::from(&caps[2])))
        .collect()
}
