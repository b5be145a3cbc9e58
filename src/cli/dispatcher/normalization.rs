use crate::core::types::{NameSet, PkgName, PkgSpec, SpecMap};

/// Split `add` arguments into name and spec. An argument is either `NAME` or
/// `NAME SPEC`, split at the first run of whitespace.
pub fn parse_package_specs(args: &[String]) -> SpecMap {
    args.iter()
        .map(|arg| arg.trim())
        .filter(|arg| !arg.is_empty())
        .map(|arg| match arg.split_once(char::is_whitespace) {
            Some((name, spec)) => (PkgName::from(name), PkgSpec::from(spec.trim())),
            None => (PkgName::from(arg), PkgSpec::default()),
        })
        .collect()
}

pub fn parse_names(args: &[String]) -> NameSet {
    args.iter()
        .map(|arg| arg.trim())
        .filter(|arg| !arg.is_empty())
        .map(PkgName::from)
        .collect()
}
