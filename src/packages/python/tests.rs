use super::*;

fn backend(root: &Path) -> PoetryBackend {
    PoetryBackend::new(root, "python3".to_string())
}

const PYPROJECT: &str = r#"
[tool.poetry]
name = "demo"
version = "0.1.0"

[tool.poetry.dependencies]
python = "^3.8"
flask = "^1.1"
requests = { version = ">=2.20", extras = ["security"] }
mylib = { git = "https://example.com/mylib.git" }

[tool.poetry.dev-dependencies]
pytest = "^5.2"

[tool.poetry.group.docs.dependencies]
sphinx = "*"
"#;

#[test]
fn list_specfile_merges_sections_and_skips_python() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("pyproject.toml"), PYPROJECT).unwrap();

    let pkgs = backend(dir.path()).list_specfile().unwrap();

    assert!(!pkgs.contains_key(&PkgName::from("python")));
    assert_eq!(pkgs[&PkgName::from("flask")], PkgSpec::from("^1.1"));
    assert_eq!(pkgs[&PkgName::from("requests")], PkgSpec::from(">=2.20"));
    assert_eq!(pkgs[&PkgName::from("pytest")], PkgSpec::from("^5.2"));
    assert_eq!(pkgs[&PkgName::from("sphinx")], PkgSpec::from("*"));
    assert!(pkgs[&PkgName::from("mylib")].as_str().contains("git"));
    assert_eq!(pkgs.len(), 5);
}

#[test]
fn list_specfile_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = backend(dir.path()).list_specfile().unwrap_err();
    assert!(matches!(err, UpmError::IoError { .. }));
}

#[test]
fn malformed_specfile_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("pyproject.toml"), "[tool.poetry\n").unwrap();
    let err = backend(dir.path()).list_specfile().unwrap_err();
    assert!(err.to_string().contains("pyproject.toml"));
}

#[test]
fn list_lockfile_reads_packages() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("poetry.lock"),
        r#"
[[package]]
name = "click"
version = "7.1.2"
description = "Composable command line interface toolkit"
category = "main"
optional = false

[[package]]
name = "flask"
version = "1.1.2"

[metadata]
content-hash = "abc"
"#,
    )
    .unwrap();

    let pkgs = backend(dir.path()).list_lockfile().unwrap();

    assert_eq!(pkgs.len(), 2);
    assert_eq!(pkgs[&PkgName::from("click")], PkgVersion::from("7.1.2"));
    assert_eq!(pkgs[&PkgName::from("flask")], PkgVersion::from("1.1.2"));
}

#[test]
fn detect_requires_poetry_table() {
    let dir = tempfile::tempdir().unwrap();
    let b = backend(dir.path());
    assert!(!b.detect());

    std::fs::write(dir.path().join("pyproject.toml"), "[tool.black]\n").unwrap();
    assert!(!b.detect());

    std::fs::write(dir.path().join("pyproject.toml"), PYPROJECT).unwrap();
    assert!(b.detect());
}

#[test]
fn detect_ignores_lockfile() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("poetry.lock"), "").unwrap();
    assert!(!backend(dir.path()).detect());
}

#[test]
fn remove_without_specfile_fails_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let pkgs: NameSet = [PkgName::from("flask")].into_iter().collect();

    let err = backend(dir.path()).remove(&pkgs).unwrap_err();

    assert!(matches!(err, UpmError::SpecfileMissing { .. }));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn add_argument_shapes() {
    let name = PkgName::from("flask");
    assert_eq!(add_argument(&name, &PkgSpec::default()), "flask");
    assert_eq!(add_argument(&name, &PkgSpec::from(">=1.0")), "flask>=1.0");
    assert_eq!(add_argument(&name, &PkgSpec::from("~=1.0")), "flask~=1.0");
    assert_eq!(add_argument(&name, &PkgSpec::from("^1.0")), "flask@^1.0");
    assert_eq!(add_argument(&name, &PkgSpec::from("latest")), "flask@latest");
}

#[test]
fn parse_search_maps_entries() {
    let output = br#"[
        {"name": "flask", "summary": "A micro framework", "version": "1.1.2", "_pypi_ordering": 0},
        {"name": "flask-cors", "summary": null, "version": "3.0.9"}
    ]"#;

    let results = parse_search(output).unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].name, "flask");
    assert_eq!(results[0].description, "A micro framework");
    assert_eq!(results[1].description, "");
    assert_eq!(results[1].version, "3.0.9");
}

#[test]
fn parse_search_empty_is_not_an_error() {
    assert!(parse_search(b"[]\n").unwrap().is_empty());
}

#[test]
fn parse_search_rejects_garbage() {
    let err = parse_search(b"Traceback (most recent call last)").unwrap_err();
    assert!(err.to_string().contains("PyPI response"));
}

#[test]
fn parse_info_unknown_package_is_none() {
    assert!(parse_info(b"{}\n").unwrap().is_none());
}

#[test]
fn parse_info_drops_extra_dependencies() {
    let output = br#"{
        "name": "demo",
        "requires_dist": ["six >=1.0", "mock >=1.0; extra == 'test'"]
    }"#;

    let info = parse_info(output).unwrap().unwrap();

    assert_eq!(info.dependencies, vec!["six".to_string()]);
}

#[test]
fn parse_info_keeps_non_extra_markers() {
    let output = br#"{
        "name": "demo",
        "requires_dist": ["idna>=2.5", "enum34; python_version < '3.4'", "PySocks!=1.5.7; extra==\"socks\""]
    }"#;

    let info = parse_info(output).unwrap().unwrap();

    assert_eq!(info.dependencies, vec!["idna".to_string(), "enum34".to_string()]);
}

#[test]
fn parse_info_classifies_project_urls() {
    let output = br#"{
        "name": "demo",
        "project_url": [
            "Documentation, https://x/doc",
            "Source Code, https://x/src",
            "Bug Tracker, https://x/bugs",
            "Funding, https://x/fund",
            "Docs mirror, https://y/doc",
            "malformed"
        ]
    }"#;

    let info = parse_info(output).unwrap().unwrap();

    assert_eq!(info.documentation_url, "https://x/doc");
    assert_eq!(info.source_code_url, "https://x/src");
    assert_eq!(info.bug_tracker_url, "https://x/bugs");
}

#[test]
fn parse_info_full_metadata() {
    let output = br#"{
        "name": "flask",
        "summary": "A simple framework",
        "version": "1.1.2",
        "home_page": "https://palletsprojects.com/p/flask/",
        "license": "BSD-3-Clause",
        "author": "Armin Ronacher",
        "author_email": "armin@example.com",
        "requires_dist": null,
        "project_url": null
    }"#;

    let info = parse_info(output).unwrap().unwrap();

    assert_eq!(info.name, "flask");
    assert_eq!(info.description, "A simple framework");
    assert_eq!(info.version, "1.1.2");
    assert_eq!(info.homepage_url, "https://palletsprojects.com/p/flask/");
    assert_eq!(info.license, "BSD-3-Clause");
    assert_eq!(info.author, "Armin Ronacher <armin@example.com>");
    assert!(info.dependencies.is_empty());
}

#[test]
fn author_halves_are_optional() {
    assert_eq!(compose_author("Ada", ""), "Ada");
    assert_eq!(compose_author("", "ada@example.com"), "<ada@example.com>");
    assert_eq!(compose_author("", ""), "");
}

#[test]
fn guess_skips_stdlib_local_and_relative_imports() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("main.py"),
        "import os, sys\nimport numpy as np\nfrom flask import Flask\nfrom . import sibling\nfrom helpers import util\nimport replit.ai.modelfarm\n    import faiss\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("helpers.py"), "import requests\n").unwrap();
    std::fs::create_dir(dir.path().join(".venv")).unwrap();
    std::fs::write(dir.path().join(".venv").join("x.py"), "import hidden_dep\n").unwrap();

    let stdlib: HashSet<String> = ["os", "sys"].iter().map(|s| s.to_string()).collect();
    let guessed = guess_from_sources(dir.path(), &stdlib).unwrap();

    let names: Vec<&str> = guessed.iter().map(PkgName::as_str).collect();
    assert_eq!(
        names,
        vec!["faiss-cpu", "flask", "numpy", "replit-ai-modelfarm", "requests"]
    );
}

#[test]
fn guess_ignores_imports_inside_docstrings() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("app.py"),
        "\"\"\"Usage:\n\nimport this_module\nfrom somewhere import thing\n\"\"\"\nimport flask\nHELP = '''\nimport nothing\n'''\n",
    )
    .unwrap();

    let guessed = guess_from_sources(dir.path(), &HashSet::new()).unwrap();

    let names: Vec<&str> = guessed.iter().map(PkgName::as_str).collect();
    assert_eq!(names, vec!["flask"]);
}

#[test]
fn poetry_backend_is_lockable() {
    let dir = tempfile::tempdir().unwrap();
    let b = backend(dir.path());
    assert!(b.locker().is_some());
    assert!(!b.quirks().is_not_reproducible());
}
