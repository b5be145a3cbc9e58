//! Module → PyPI distribution overrides
//!
//! Used when guessing which distribution provides an imported module and the
//! obvious answer (the module's own name) is wrong.

const MODULE_TO_PYPI_PACKAGE_OVERRIDE: &[(&str, &str)] = &[
    ("grpc_status", "grpcio-status"),
    ("nvd3", "python-nvd3"),
    // doesn't declare requires_dist, so nothing else points at it
    ("requirements", "requirements-parser"),
    ("base62", "pybase62"),
    ("faiss", "faiss-cpu"),
    ("graphics", "graphics.py"),
    ("replit.ai.modelfarm", "replit-ai-modelfarm"),
    ("replit.ai", "replit-ai"),
];

/// Look up the distribution for a dotted module path, preferring the longest
/// overridden prefix (`replit.ai.modelfarm.foo` → `replit-ai-modelfarm`).
pub fn lookup(module: &str) -> Option<&'static str> {
    let mut candidate = module;
    loop {
        if let Some((_, package)) = MODULE_TO_PYPI_PACKAGE_OVERRIDE
            .iter()
            .find(|(m, _)| *m == candidate)
        {
            return Some(package);
        }
        match candidate.rfind('.') {
            Some(idx) => candidate = &candidate[..idx],
            None => return None,
        }
    }
}
