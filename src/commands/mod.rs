pub mod add;
pub mod guess;
pub mod info;
pub mod install;
pub mod language;
pub mod list;
pub mod remove;
pub mod search;

use crate::error::Result;
use serde::Serialize;

/// Print a value as pretty JSON on stdout.
pub(crate) fn output_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
