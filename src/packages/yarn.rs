//! Node.js packages managed by Yarn
//!
//! Declared dependencies come from `package.json`, pins from `yarn.lock`.
//! Yarn has no registry search of its own, so search and info go through
//! `npm`, which queries the same registry.

use crate::core::types::{
    LockMap, NameSet, Operation, PkgInfo, PkgName, PkgSpec, PkgVersion, Quirks, SpecMap,
};
use crate::error::{Result, UpmError};
use crate::packages::traits::{LanguageBackend, Locker};
use crate::utils::{fs, process, sanitize};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

const NAME: &str = "nodejs-yarn";
const SPECFILE: &str = "package.json";
const LOCKFILE: &str = "yarn.lock";

/// One lockfile entry: the first descriptor's package name (scoped names keep
/// their leading `@`) followed by the indented `version` line. Accepts both
/// the classic `version "x"` and the newer `version: x` spelling.
static LOCK_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^"?(@?[^@ \n]+)@[^\n]*:\n  version:? "?([^"\n]+)"?$"#)
        .expect("Invalid regex pattern")
});

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageJson {
    #[serde(default)]
    dependencies: BTreeMap<String, String>,
    #[serde(default)]
    dev_dependencies: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct NpmSearchResult {
    name: String,
    version: Option<String>,
    description: Option<String>,
    #[serde(default)]
    links: NpmLinks,
}

#[derive(Debug, Default, Deserialize)]
struct NpmLinks {
    homepage: Option<String>,
    repository: Option<String>,
    bugs: Option<String>,
}

pub struct YarnBackend {
    root: PathBuf,
}

impl YarnBackend {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn yarn(&self, args: Vec<String>) -> Result<()> {
        let mut cmd = process::argv(["yarn"]);
        cmd.extend(args);
        process::run_cmd(&cmd, &self.root)
    }
}

impl Locker for YarnBackend {
    fn lock(&self) -> Result<()> {
        self.yarn(process::argv(["upgrade"]))
    }
}

impl LanguageBackend for YarnBackend {
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
        Quirks::NONE
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn detect(&self) -> bool {
        fs::file_exists(&self.specfile_path())
    }

    fn search(&self, queries: &[String]) -> Result<Vec<PkgInfo>> {
        let mut cmd = process::argv(["npm", "search", "--json"]);
        cmd.push(queries.join(" "));
        let output = process::get_cmd_output(&cmd, &self.root)?;
        parse_search(&output)
    }

    fn info(&self, name: &PkgName) -> Result<Option<PkgInfo>> {
        sanitize::validate_package_name(name.as_str())?;

        let cmd = process::argv(["npm", "view", name.as_str(), "--json"]);
        let output = process::capture(&cmd, &self.root)?;

        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stdout.contains("E404") || stderr.contains("E404") {
                return Ok(None);
            }
            return Err(UpmError::SystemCommandFailed {
                command: cmd.join(" "),
                reason: format!("{}: {}", output.status, stderr.trim()),
            });
        }

        parse_view(&output.stdout)
    }

    fn add(&self, pkgs: &SpecMap) -> Result<()> {
        sanitize::validate_package_names(pkgs.keys())?;

        if !fs::file_exists(&self.specfile_path()) {
            self.yarn(process::argv(["init", "--yes"]))?;
        }

        let mut args = process::argv(["add"]);
        args.extend(pkgs.iter().map(|(name, spec)| add_argument(name, spec)));
        self.yarn(args)
    }

    fn remove(&self, pkgs: &NameSet) -> Result<()> {
        fs::require_file(&self.specfile_path())?;
        sanitize::validate_package_names(pkgs)?;

        let mut args = process::argv(["remove"]);
        args.extend(pkgs.iter().map(|name| name.to_string()));
        self.yarn(args)
    }

    fn locker(&self) -> Option<&dyn Locker> {
        Some(self)
    }

    fn install(&self) -> Result<()> {
        self.yarn(process::argv(["install"]))
    }

    fn list_specfile(&self) -> Result<SpecMap> {
        let contents = fs::read_file(&self.specfile_path())?;
        parse_package_json(&contents)
    }

    fn list_lockfile(&self) -> Result<LockMap> {
        let contents = fs::read_file(&self.lockfile_path())?;
        Ok(parse_lockfile(&contents))
    }

    fn guess(&self) -> Result<NameSet> {
        Err(UpmError::not_implemented(NAME, Operation::Guess))
    }
}

fn add_argument(name: &PkgName, spec: &PkgSpec) -> String {
    if spec.is_empty() {
        name.to_string()
    } else {
        format!("{}@{}", name, spec)
    }
}

fn parse_package_json(contents: &str) -> Result<SpecMap> {
    let cfg: PackageJson = serde_json::from_str(contents).map_err(|e| UpmError::ParseError {
        file: SPECFILE.to_string(),
        message: e.to_string(),
    })?;

    Ok(cfg
        .dependencies
        .into_iter()
        .chain(cfg.dev_dependencies)
        .map(|(name, spec)| (PkgName::new(name), PkgSpec::new(spec)))
        .collect())
}

fn parse_lockfile(contents: &str) -> LockMap {
    LOCK_ENTRY
        .captures_iter(contents)
        .map(|caps| (PkgName::from(&caps[1]), PkgVersion::from(&caps[2])))
        .collect()
}

fn npm_error(e: serde_json::Error) -> UpmError {
    UpmError::ParseError {
        file: "npm response".to_string(),
        message: e.to_string(),
    }
}

fn parse_search(output: &[u8]) -> Result<Vec<PkgInfo>> {
    if output.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let results: Vec<NpmSearchResult> = serde_json::from_slice(output).map_err(npm_error)?;

    Ok(results
        .into_iter()
        .map(|pkg| PkgInfo {
            name: pkg.name,
            version: pkg.version.unwrap_or_default(),
            description: pkg.description.unwrap_or_default(),
            homepage_url: pkg.links.homepage.unwrap_or_default(),
            source_code_url: pkg.links.repository.unwrap_or_default(),
            bug_tracker_url: pkg.links.bugs.unwrap_or_default(),
            ..Default::default()
        })
        .collect())
}

/// Read a field that npm writes either as a string or as an object carrying
/// the string under `key`.
fn string_or_field(value: Option<&Value>, key: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Object(map)) => map
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}

fn parse_author(value: Option<&Value>) -> String {
    match value {
        Some(Value::Object(map)) => {
            let field = |k: &str| map.get(k).and_then(Value::as_str).unwrap_or_default();
            let mut parts = Vec::new();
            if !field("name").is_empty() {
                parts.push(field("name").to_string());
            }
            if !field("email").is_empty() {
                parts.push(format!("<{}>", field("email")));
            }
            parts.join(" ")
        }
        other => string_or_field(other, "name"),
    }
}

fn parse_view(output: &[u8]) -> Result<Option<PkgInfo>> {
    let value: Value = serde_json::from_slice(output).map_err(npm_error)?;
    // A version range that matches several releases yields an array; the
    // last entry is the newest.
    let view = match value {
        Value::Array(mut versions) => match versions.pop() {
            Some(v) => v,
            None => return Ok(None),
        },
        Value::Object(_) => value,
        _ => return Ok(None),
    };

    let name = string_or_field(view.get("name"), "");
    if name.is_empty() {
        return Ok(None);
    }

    let dependencies = view
        .get("dependencies")
        .and_then(Value::as_object)
        .map(|deps| deps.keys().cloned().collect())
        .unwrap_or_default();

    Ok(Some(PkgInfo {
        name,
        description: string_or_field(view.get("description"), ""),
        version: string_or_field(view.get("version"), ""),
        homepage_url: string_or_field(view.get("homepage"), ""),
        source_code_url: string_or_field(view.get("repository"), "url"),
        bug_tracker_url: string_or_field(view.get("bugs"), "url"),
        author: parse_author(view.get("author")),
        license: string_or_field(view.get("license"), "type"),
        dependencies,
        ..Default::default()
    }))
}
