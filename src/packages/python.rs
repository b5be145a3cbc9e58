//! Python packages managed by Poetry
//!
//! Declared dependencies live in `pyproject.toml` under `[tool.poetry]`,
//! pins in `poetry.lock`. Registry metadata comes from PyPI's XML-RPC API
//! through a short script run with the configured interpreter.

use crate::core::types::{
    LockMap, NameSet, PkgInfo, PkgName, PkgSpec, PkgVersion, Quirks, SpecMap,
};
use crate::error::{Result, UpmError};
use crate::packages::pypi_map;
use crate::packages::traits::{LanguageBackend, Locker};
use crate::utils::{fs, process, sanitize};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use toml_edit::{DocumentMut, Item};
use walkdir::WalkDir;

const NAME: &str = "python-poetry";
const SPECFILE: &str = "pyproject.toml";
const LOCKFILE: &str = "poetry.lock";

const PYTHON_SEARCH_CODE: &str = r#"
import json
import sys
import xmlrpc.client

query = sys.argv[1]
pypi = xmlrpc.client.ServerProxy("https://pypi.org/pypi")
results = pypi.search({"name": query})
json.dump(results, sys.stdout, indent=2)
print()
"#;

const PYTHON_INFO_CODE: &str = r#"
import json
import sys
import xmlrpc.client

package = sys.argv[1]
pypi = xmlrpc.client.ServerProxy("https://pypi.org/pypi")
releases = pypi.package_releases(package)
if not releases:
    print("{}")
    sys.exit(0)
release, = releases
info = pypi.release_data(package, release)
json.dump(info, sys.stdout, indent=2)
print()
"#;

const PYTHON_STDLIB_CODE: &str = r#"
import sys
print("\n".join(sorted(sys.stdlib_module_names)))
"#;

/// Leading distribution name of a PEP 508 requirement.
static REQUIREMENT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*").expect("Invalid regex pattern"));

/// Environment marker that only applies when an extra is requested.
static EXTRA_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r";.*\bextra\s*==").expect("Invalid regex pattern"));

static DOC_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)doc").expect("Invalid regex pattern"));
static CODE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)code").expect("Invalid regex pattern"));
static TRACK_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)track").expect("Invalid regex pattern"));

static IMPORT_STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:from[ \t]+([A-Za-z_][\w.]*)[ \t]+import\b|import[ \t]+([A-Za-z_][\w.]*(?:[ \t]+as[ \t]+\w+)?(?:[ \t]*,[ \t]*[A-Za-z_][\w.]*(?:[ \t]+as[ \t]+\w+)?)*))",
    )
    .expect("Invalid regex pattern")
});

// Docstrings and other triple-quoted strings are blanked before scanning so
// prose like "import this module" is not read as an import.
static TRIPLE_QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)""".*?"""|'''.*?'''"#).expect("Invalid regex pattern")
});

/// Directories never scanned for imports.
const SKIPPED_DIRS: &[&str] = &["__pycache__", "node_modules", "venv", "env", "site-packages"];

#[derive(Debug, Deserialize)]
struct PypiSearchEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PypiReleaseData {
    author: Option<String>,
    author_email: Option<String>,
    home_page: Option<String>,
    license: Option<String>,
    name: Option<String>,
    project_url: Option<Vec<String>>,
    requires_dist: Option<Vec<String>>,
    summary: Option<String>,
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PoetryLock {
    #[serde(default)]
    package: Vec<PoetryLockPackage>,
}

#[derive(Debug, Deserialize)]
struct PoetryLockPackage {
    name: String,
    version: String,
}

pub struct PoetryBackend {
    root: PathBuf,
    python: String,
}

impl PoetryBackend {
    pub fn new(root: &Path, python: String) -> Self {
        Self {
            root: root.to_path_buf(),
            python,
        }
    }

    fn poetry(&self, args: Vec<String>) -> Result<()> {
        let mut cmd = process::argv(["poetry"]);
        cmd.extend(args);
        process::run_cmd(&cmd, &self.root)
    }

    fn run_python(&self, code: &str, arg: Option<&str>) -> Result<Vec<u8>> {
        let mut cmd = process::argv([self.python.as_str(), "-c", code]);
        cmd.extend(arg.map(str::to_string));
        process::get_cmd_output(&cmd, &self.root)
    }

    fn read_pyproject(&self) -> Result<DocumentMut> {
        let path = self.specfile_path();
        fs::read_file(&path)?
            .parse::<DocumentMut>()
            .map_err(|e| UpmError::ParseError {
                file: SPECFILE.to_string(),
                message: e.to_string(),
            })
    }

    fn stdlib_modules(&self) -> Result<HashSet<String>> {
        let output = self.run_python(PYTHON_STDLIB_CODE, None)?;
        Ok(String::from_utf8_lossy(&output)
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }
}

impl Locker for PoetryBackend {
    fn lock(&self) -> Result<()> {
        self.poetry(process::argv(["lock"]))
    }
}

impl LanguageBackend for PoetryBackend {
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
        // Plenty of non-Poetry projects carry a pyproject.toml
        self.read_pyproject()
            .map(|doc| doc.get("tool").and_then(|t| t.get("poetry")).is_some())
            .unwrap_or(false)
    }

    fn search(&self, queries: &[String]) -> Result<Vec<PkgInfo>> {
        let query = queries.join(" ");
        let output = self.run_python(PYTHON_SEARCH_CODE, Some(&query))?;
        parse_search(&output)
    }

    fn info(&self, name: &PkgName) -> Result<Option<PkgInfo>> {
        let output = self.run_python(PYTHON_INFO_CODE, Some(name.as_str()))?;
        parse_info(&output)
    }

    fn add(&self, pkgs: &SpecMap) -> Result<()> {
        sanitize::validate_package_names(pkgs.keys())?;

        if !fs::file_exists(&self.specfile_path()) {
            self.poetry(process::argv(["init", "--no-interaction"]))?;
        }

        let mut args = process::argv(["add"]);
        args.extend(pkgs.iter().map(|(name, spec)| add_argument(name, spec)));
        self.poetry(args)
    }

    fn remove(&self, pkgs: &NameSet) -> Result<()> {
        fs::require_file(&self.specfile_path())?;
        sanitize::validate_package_names(pkgs)?;

        let mut args = process::argv(["remove"]);
        args.extend(pkgs.iter().map(|name| name.to_string()));
        self.poetry(args)
    }

    fn locker(&self) -> Option<&dyn Locker> {
        Some(self)
    }

    fn install(&self) -> Result<()> {
        // Packages dropped from the lockfile by an interrupted `poetry remove`
        // may stay installed. See <https://github.com/sdispater/poetry/issues/648>.
        self.poetry(process::argv(["install"]))
    }

    fn list_specfile(&self) -> Result<SpecMap> {
        Ok(declared_dependencies(&self.read_pyproject()?))
    }

    fn list_lockfile(&self) -> Result<LockMap> {
        let contents = fs::read_file(&self.lockfile_path())?;
        parse_lockfile(&contents)
    }

    fn guess(&self) -> Result<NameSet> {
        let stdlib = self.stdlib_modules()?;
        guess_from_sources(&self.root, &stdlib)
    }
}

/// Format one `poetry add` argument. Comparison operators attach directly
/// (`flask>=1.0`), anything else goes after `@` (`flask@^1.0`).
fn add_argument(name: &PkgName, spec: &PkgSpec) -> String {
    let spec = spec.as_str().trim();
    if spec.is_empty() {
        name.to_string()
    } else if spec.starts_with(['<', '>', '=', '!']) || spec.starts_with("~=") {
        format!("{}{}", name, spec)
    } else {
        format!("{}@{}", name, spec)
    }
}

fn pypi_error(e: serde_json::Error) -> UpmError {
    UpmError::ParseError {
        file: "PyPI response".to_string(),
        message: e.to_string(),
    }
}

fn parse_search(output: &[u8]) -> Result<Vec<PkgInfo>> {
    let entries: Vec<PypiSearchEntry> = serde_json::from_slice(output).map_err(pypi_error)?;
    Ok(entries
        .into_iter()
        .map(|entry| PkgInfo {
            name: entry.name,
            description: entry.summary.unwrap_or_default(),
            version: entry.version.unwrap_or_default(),
            ..Default::default()
        })
        .collect())
}

fn parse_info(output: &[u8]) -> Result<Option<PkgInfo>> {
    let data: PypiReleaseData = serde_json::from_slice(output).map_err(pypi_error)?;

    let name = data.name.unwrap_or_default();
    if name.is_empty() {
        return Ok(None);
    }

    let mut info = PkgInfo {
        name,
        description: data.summary.unwrap_or_default(),
        version: data.version.unwrap_or_default(),
        homepage_url: data.home_page.unwrap_or_default(),
        license: data.license.unwrap_or_default(),
        ..Default::default()
    };

    for line in data.project_url.unwrap_or_default() {
        let Some((label, url)) = line.split_once(", ") else {
            continue;
        };
        let slot = if DOC_LABEL.is_match(label) {
            &mut info.documentation_url
        } else if CODE_LABEL.is_match(label) {
            &mut info.source_code_url
        } else if TRACK_LABEL.is_match(label) {
            &mut info.bug_tracker_url
        } else {
            continue;
        };
        if slot.is_empty() {
            *slot = url.to_string();
        }
    }

    info.author = compose_author(
        data.author.as_deref().unwrap_or_default(),
        data.author_email.as_deref().unwrap_or_default(),
    );

    info.dependencies = data
        .requires_dist
        .unwrap_or_default()
        .iter()
        .filter(|req| !EXTRA_MARKER.is_match(req))
        .filter_map(|req| REQUIREMENT_NAME.find(req.trim()))
        .map(|m| m.as_str().to_string())
        .collect();

    Ok(Some(info))
}

/// `Name <email>`, with either half left out when missing.
fn compose_author(name: &str, email: &str) -> String {
    let mut parts = Vec::new();
    if !name.is_empty() {
        parts.push(name.to_string());
    }
    if !email.is_empty() {
        parts.push(format!("<{}>", email));
    }
    parts.join(" ")
}

fn spec_of(item: &Item) -> String {
    if let Some(s) = item.as_str() {
        return s.to_string();
    }
    item.as_table_like()
        .and_then(|t| t.get("version"))
        .and_then(Item::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| item.to_string().trim().to_string())
}

fn declared_dependencies(doc: &DocumentMut) -> SpecMap {
    let mut pkgs = SpecMap::new();
    let Some(poetry) = doc.get("tool").and_then(|t| t.get("poetry")) else {
        return pkgs;
    };

    let mut tables: Vec<&Item> = ["dependencies", "dev-dependencies"]
        .iter()
        .filter_map(|key| poetry.get(key))
        .collect();
    if let Some(groups) = poetry.get("group").and_then(Item::as_table_like) {
        tables.extend(groups.iter().filter_map(|(_, g)| g.get("dependencies")));
    }

    for table in tables.into_iter().filter_map(Item::as_table_like) {
        for (name, item) in table.iter() {
            if name == "python" {
                continue;
            }
            pkgs.insert(PkgName::from(name), PkgSpec::new(spec_of(item)));
        }
    }

    pkgs
}

fn parse_lockfile(contents: &str) -> Result<LockMap> {
    let lock: PoetryLock = toml_edit::de::from_str(contents).map_err(|e| UpmError::ParseError {
        file: LOCKFILE.to_string(),
        message: e.to_string(),
    })?;

    Ok(lock
        .package
        .into_iter()
        .map(|p| (PkgName::new(p.name), PkgVersion::new(p.version)))
        .collect())
}

fn is_skipped_dir(entry: &walkdir::DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref())
}

/// Infer distributions from the imports of every Python file under `root`.
/// Relative imports, project-local modules and anything in `stdlib` are
/// ignored.
fn guess_from_sources(root: &Path, stdlib: &HashSet<String>) -> Result<NameSet> {
    let mut local_modules = HashSet::new();
    let mut imports = HashSet::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e))
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "py") {
            continue;
        }

        if let Some(stem) = path.file_stem() {
            local_modules.insert(stem.to_string_lossy().into_owned());
        }
        if let Some(parent) = path.parent().filter(|p| *p != root)
            && let Some(dir) = parent.file_name()
        {
            local_modules.insert(dir.to_string_lossy().into_owned());
        }

        // Unreadable or non-UTF-8 sources are skipped rather than fatal
        let Ok(source) = std::fs::read_to_string(path) else {
            continue;
        };
        let code = TRIPLE_QUOTED.replace_all(&source, "");
        for caps in IMPORT_STATEMENT.captures_iter(&code) {
            if let Some(from) = caps.get(1) {
                imports.insert(from.as_str().to_string());
            } else if let Some(list) = caps.get(2) {
                for item in list.as_str().split(',') {
                    if let Some(module) = item.split_whitespace().next() {
                        imports.insert(module.to_string());
                    }
                }
            }
        }
    }

    let mut guessed = NameSet::new();
    for module in imports {
        let top = module.split('.').next().unwrap_or(&module);
        if stdlib.contains(top) || local_modules.contains(top) {
            continue;
        }
        let package = pypi_map::lookup(&module).unwrap_or(top);
        guessed.insert(PkgName::from(package));
    }

    Ok(guessed)
}

#[cfg(test)]
mod tests;
