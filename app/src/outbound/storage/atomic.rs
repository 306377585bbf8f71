//! Atomic replacement of small files inside a capability directory.
//!
//! Contents go to a hidden temporary sibling first and are renamed over the
//! target, so readers see either the old or the new value, never a torn
//! write.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use cap_std::fs::{Dir, OpenOptions};
use tracing::debug;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Replace `file_name` in `dir` with `contents`.
///
/// `file_name` must be a bare file name; nested paths are rejected by
/// `cap-std` before anything is written.
pub(crate) fn replace_file(dir: &Dir, file_name: &str, contents: &[u8]) -> io::Result<()> {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let temp_name = format!(".{file_name}.tmp.{}.{counter}", std::process::id());

    if let Err(err) = write_synced(dir, &temp_name, contents) {
        discard(dir, &temp_name);
        return Err(err);
    }
    if let Err(err) = rename_over(dir, &temp_name, file_name) {
        discard(dir, &temp_name);
        return Err(err);
    }
    if let Err(err) = dir.open(".").and_then(|handle| handle.sync_all()) {
        debug!(error = %err, "directory sync skipped");
    }
    Ok(())
}

fn write_synced(dir: &Dir, temp_name: &str, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(temp_name, &options)?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(windows)]
fn rename_over(dir: &Dir, from: &str, to: &str) -> io::Result<()> {
    match dir.remove_file(to) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(from, dir, to)
}

#[cfg(not(windows))]
fn rename_over(dir: &Dir, from: &str, to: &str) -> io::Result<()> {
    dir.rename(from, dir, to)
}

fn discard(dir: &Dir, temp_name: &str) {
    if let Err(err) = dir.remove_file(temp_name) {
        debug!(error = %err, temp_name, "temporary file left behind");
    }
}
