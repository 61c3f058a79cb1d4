pub mod file;
pub mod flags;
pub mod locale;
pub mod stdin;

use serde_json::Value;
use tracing::debug;

/// Resolve the input document: an explicit `--input` file wins, then
/// anything piped on stdin. `None` means the caller should fall back to
/// individual flags.
pub fn load(path: Option<&str>) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        debug!(path, "reading input file");
        return file::read_value(path).map(Some);
    }

    let piped = stdin::read_stdin()?;
    if piped.is_some() {
        debug!("read input document from stdin");
    }
    Ok(piped)
}
