use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Raised when `CustomClean.xml` can't be turned into a cleaning policy.
/// Nothing is deleted once this happens.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "`{}` could not be found. Ensure that there is a properly formatted CustomClean.xml in the project root directory",
        path.display()
    )]
    NotFound { path: PathBuf },

    #[error("failed to read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "`{}` is not properly formatted XML: {source}",
        path.display()
    )]
    Malformed {
        path: PathBuf,
        #[source]
        source: quick_xml::DeError,
    },
}

/// A single file the cleaner could not get rid of. Collected, never fatal.
#[derive(Debug, Error)]
pub enum DeletionError {
    #[error("could not list entry in `{}`: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("could not delete `{}`: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum InitError {
    #[error("`{}` already exists (use --force to overwrite)", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("project root `{}` is not a directory", path.display())]
    MissingRoot { path: PathBuf },

    #[error("failed to write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
