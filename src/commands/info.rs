use crate::cli::args::OutputFormat;
use crate::commands::output_json;
use crate::core::types::{PkgInfo, PkgName};
use crate::error::Result;
use crate::packages::LanguageBackend;
use crate::ui as output;

pub fn run(backend: &dyn LanguageBackend, package: &str, format: OutputFormat) -> Result<()> {
    let info = backend.info(&PkgName::from(package))?;

    match (info, format) {
        (Some(info), OutputFormat::Json) => output_json(&info),
        (None, OutputFormat::Json) => output_json(&Option::<PkgInfo>::None),
        (Some(info), OutputFormat::Text) => {
            display_info(&info);
            Ok(())
        }
        (None, OutputFormat::Text) => {
            output::warning(&format!("no such package: {}", package));
            Ok(())
        }
    }
}

fn display_info(info: &PkgInfo) {
    let fields = [
        ("Name", &info.name),
        ("Description", &info.description),
        ("Version", &info.version),
        ("Homepage", &info.homepage_url),
        ("Documentation", &info.documentation_url),
        ("Source code", &info.source_code_url),
        ("Bug tracker", &info.bug_tracker_url),
        ("Author", &info.author),
        ("License", &info.license),
    ];

    for (key, value) in fields {
        if !value.is_empty() {
            output::keyval(key, value);
        }
    }

    if !info.dependencies.is_empty() {
        output::keyval("Dependencies", &info.dependencies.join(", "));
    }
}
