use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::CleaningPolicy;
use crate::error::DeletionError;

/// Outcome of one pass over the policy's directories.
#[derive(Debug, Default)]
pub struct CleanResult {
    /// Files removed, or that would be removed on a dry run.
    pub deleted_count: usize,
    pub bytes_freed: u64,
    /// Configured directories that existed and were walked.
    pub cleaned: Vec<PathBuf>,
    pub failures: Vec<DeletionError>,
    pub dry_run: bool,
}

/// Deletes every non-excepted file directly inside each configured directory.
///
/// Missing directories are skipped. A file that can't be removed is recorded
/// in `failures` and the pass carries on with the next one.
pub fn clean(policy: &CleaningPolicy) -> CleanResult {
    sweep(policy, false)
}

/// Same walk as [`clean`], but nothing is removed.
pub fn preview(policy: &CleaningPolicy) -> CleanResult {
    sweep(policy, true)
}

/// Splits a file name at its last `.` into `(base name, extension)`.
///
/// The extension keeps its dot. Without a dot the extension is empty and the
/// base name is the whole file name.
pub fn split_file_name(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(dot) => file_name.split_at(dot),
        None => (file_name, ""),
    }
}

/// Exact, case-sensitive match on either the extension or the base name.
pub fn is_preserved(policy: &CleaningPolicy, file_name: &str) -> bool {
    let (base, extension) = split_file_name(file_name);
    policy.extension_exceptions().contains(extension) || policy.name_exceptions().contains(base)
}

fn sweep(policy: &CleaningPolicy, dry_run: bool) -> CleanResult {
    let mut result = CleanResult {
        dry_run,
        ..CleanResult::default()
    };

    for dir in policy.directories() {
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "directory does not exist, skipping");
            continue;
        }
        result.cleaned.push(dir.clone());

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    let path = source.path().map_or_else(|| dir.clone(), Path::to_path_buf);
                    warn!(path = %path.display(), "failed to read directory entry: {source}");
                    result
                        .failures
                        .push(DeletionError::Unreadable { path, source });
                    continue;
                }
            };

            // Links to directories count as subdirectories.
            if entry.file_type().is_dir()
                || (entry.path_is_symlink() && entry.path().is_dir())
            {
                continue;
            }

            let path = entry.path();
            let file_name = entry.file_name().to_string_lossy();
            if is_preserved(policy, &file_name) {
                debug!(path = %path.display(), "keeping excepted file");
                continue;
            }

            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            if dry_run {
                debug!(path = %path.display(), "would delete");
                result.deleted_count += 1;
                result.bytes_freed += size;
                continue;
            }

            match fs::remove_file(path) {
                Ok(()) => {
                    debug!(path = %path.display(), "deleted");
                    result.deleted_count += 1;
                    result.bytes_freed += size;
                }
                Err(source) => {
                    warn!(path = %path.display(), "failed to delete: {source}");
                    result.failures.push(DeletionError::Remove {
                        path: path.to_path_buf(),
                        source,
                    });
                }
            }
        }
    }

    result
}
