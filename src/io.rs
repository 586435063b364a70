use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read a whole file once and return it as the input for one run.
///
/// The file is read in a single call and the returned string is never
/// re-read, so a writer appending concurrently cannot change a run halfway
/// through. Any locking against such writers is the caller's business.
///
/// # Errors
/// Returns an error naming the path if the file cannot be read or is not UTF-8.
pub fn read_snapshot(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}
