use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::clean::{self, CleanResult};
use crate::config::{self, CONFIG_FILE_NAME};
use crate::error::{ConfigError, InitError};
use crate::summary;

const STARTER_CONFIG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!-- Every file directly inside a listed directory is deleted by `customclean clean`,
     unless its name or extension is listed under IGNORE. Subdirectories are left alone.
     Directory paths are relative to this file. -->
<CustomClean>
  <DIRECTORIES>bin</DIRECTORIES>
  <DIRECTORIES>obj</DIRECTORIES>
  <IGNORE>
    <!-- file names without their extension -->
    <NAMEEXCEPTIONS>README</NAMEEXCEPTIONS>
    <!-- extensions, leading dot included -->
    <FILETYPEEXCEPTIONS>.gitignore</FILETYPEEXCEPTIONS>
    <FILETYPEEXCEPTIONS>.keep</FILETYPEEXCEPTIONS>
  </IGNORE>
</CustomClean>
"#;

/// What a finished run hands back to the caller.
#[derive(Debug)]
pub struct Outcome {
    pub result: CleanResult,
    pub report: String,
}

/// Loads the policy under `project_root`, cleans (or previews) and formats
/// the report. The configuration is re-read on every call.
pub fn run(project_root: &Path, dry_run: bool) -> Result<Outcome, ConfigError> {
    let policy = config::load(project_root)?;

    let result = if dry_run {
        clean::preview(&policy)
    } else {
        clean::clean(&policy)
    };
    info!(
        deleted = result.deleted_count,
        failures = result.failures.len(),
        dry_run,
        "clean finished"
    );

    let report = summary::format(&result, &policy);
    Ok(Outcome { result, report })
}

/// Writes a starter `CustomClean.xml` into `project_root`.
pub fn init_config(project_root: &Path, force: bool) -> Result<PathBuf, InitError> {
    if !project_root.is_dir() {
        return Err(InitError::MissingRoot {
            path: project_root.to_path_buf(),
        });
    }

    let path = project_root.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        return Err(InitError::AlreadyExists { path });
    }

    fs::write(&path, STARTER_CONFIG).map_err(|source| InitError::Write {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "wrote starter configuration");
    Ok(path)
}
