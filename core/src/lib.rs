//! Pieces shared by every songbook binary.

use std::{path::PathBuf, time::Duration};

use directories::ProjectDirs;

pub mod config;
pub mod errors;
pub mod logger;
pub mod termination;

use errors::DirectoryError;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "songbook")
}

/// Get the directory the config file lives in.
///
/// # Errors
///
/// Fails if the home directory of the current user cannot be determined.
#[inline]
pub fn get_config_dir() -> Result<PathBuf, DirectoryError> {
    project_dirs()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(DirectoryError::Config)
}

/// Get the directory persistent data (like the embedded database) is stored in.
///
/// # Errors
///
/// Fails if the home directory of the current user cannot be determined.
#[inline]
pub fn get_data_dir() -> Result<PathBuf, DirectoryError> {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(DirectoryError::Data)
}

/// Format a duration as `hh:mm:ss.mmm`.
#[must_use]
#[inline]
pub fn format_duration(duration: &Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    let millis = duration.subsec_millis();

    format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
}
