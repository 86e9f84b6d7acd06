use quick_xml::events::Event;
use quick_xml::{DeError, Reader};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::ConfigError;

/// Read from directly under the project root on every run.
pub const CONFIG_FILE_NAME: &str = "CustomClean.xml";

/// What to clean and what to leave alone. Built once per run, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleaningPolicy {
    directories: Vec<PathBuf>,
    name_exceptions: BTreeSet<String>,
    extension_exceptions: BTreeSet<String>,
}

impl CleaningPolicy {
    pub fn new<D, N, E>(directories: D, name_exceptions: N, extension_exceptions: E) -> Self
    where
        D: IntoIterator<Item = PathBuf>,
        N: IntoIterator<Item = String>,
        E: IntoIterator<Item = String>,
    {
        Self {
            directories: directories.into_iter().collect(),
            name_exceptions: name_exceptions.into_iter().collect(),
            extension_exceptions: extension_exceptions.into_iter().collect(),
        }
    }

    /// Absolute directories, in document order.
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Base names (final extension stripped) that are never deleted.
    pub fn name_exceptions(&self) -> &BTreeSet<String> {
        &self.name_exceptions
    }

    /// Extensions, leading dot included, that are never deleted.
    pub fn extension_exceptions(&self) -> &BTreeSet<String> {
        &self.extension_exceptions
    }
}

// The root tag is never checked, only its children.
#[derive(Deserialize, Default)]
struct CustomCleanFile {
    #[serde(rename = "DIRECTORIES", default)]
    directories: Vec<String>,
    #[serde(rename = "IGNORE", default)]
    ignore: Vec<IgnoreSection>,
}

#[derive(Deserialize, Default)]
struct IgnoreSection {
    #[serde(rename = "NAMEEXCEPTIONS", default)]
    name_exceptions: Vec<String>,
    #[serde(rename = "FILETYPEEXCEPTIONS", default)]
    filetype_exceptions: Vec<String>,
}

/// Loads `CustomClean.xml` from `project_root`.
///
/// Directories are joined onto `project_root` but not checked for existence;
/// the cleaner skips the ones that are missing.
pub fn load(project_root: &Path) -> Result<CleaningPolicy, ConfigError> {
    let path = project_root.join(CONFIG_FILE_NAME);
    debug!(path = %path.display(), "loading cleaning policy");

    let text = fs::read_to_string(&path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound { path: path.clone() },
        _ => ConfigError::Read {
            path: path.clone(),
            source,
        },
    })?;

    let policy =
        parse(project_root, &text).map_err(|source| ConfigError::Malformed { path, source })?;

    info!(
        directories = policy.directories.len(),
        name_exceptions = policy.name_exceptions.len(),
        extension_exceptions = policy.extension_exceptions.len(),
        "loaded cleaning policy"
    );
    Ok(policy)
}

/// Parses the document text without touching the filesystem.
pub fn parse(project_root: &Path, text: &str) -> Result<CleaningPolicy, DeError> {
    check_single_root(text)?;
    let file: CustomCleanFile = quick_xml::de::from_str(text)?;

    let directories = file
        .directories
        .iter()
        .map(|d| d.trim())
        .filter(|d| !d.is_empty())
        .map(|d| project_root.join(d));

    let mut name_exceptions = BTreeSet::new();
    let mut extension_exceptions = BTreeSet::new();
    for section in file.ignore {
        name_exceptions.extend(section.name_exceptions.iter().map(|n| n.trim().to_string()));
        extension_exceptions.extend(
            section
                .filetype_exceptions
                .iter()
                .map(|e| e.trim().to_string()),
        );
    }

    Ok(CleaningPolicy::new(
        directories,
        name_exceptions,
        extension_exceptions,
    ))
}

/// The deserializer stops at the end of the root element, so anything after
/// it (a second root, stray text) has to be rejected here.
fn check_single_root(text: &str) -> Result<(), DeError> {
    let mut reader = Reader::from_str(text);
    let mut depth = 0usize;
    let mut root_closed = false;

    loop {
        match reader.read_event()? {
            Event::Start(_) | Event::Empty(_) if root_closed => {
                return Err(DeError::Custom(
                    "document has more than one root element".to_string(),
                ));
            }
            Event::Start(_) => depth += 1,
            Event::Empty(_) => {
                if depth == 0 {
                    root_closed = true;
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    root_closed = true;
                }
            }
            Event::Text(t) if depth == 0 && !t.iter().all(u8::is_ascii_whitespace) => {
                return Err(DeError::Custom(
                    "text is not allowed outside the root element".to_string(),
                ));
            }
            Event::CData(_) if depth == 0 => {
                return Err(DeError::Custom(
                    "CDATA is not allowed outside the root element".to_string(),
                ));
            }
            Event::Eof => return Ok(()),
            _ => {}
        }
    }
}
