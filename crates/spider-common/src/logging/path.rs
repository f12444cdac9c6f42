//! Log file path resolution.
//!
//! All spider logs live in one folder under the application root, and every
//! log file shares the same base name.

use std::io;
use std::path::{Path, PathBuf};
use std::{env, fs};

use super::LogSetupError;

/// Folder created under the application root.
pub const LOG_FOLDER_NAME: &str = "log";

/// Base name of the log file; rotated segments append a date suffix.
pub const LOG_FILE_NAME: &str = "news_spider.log";

/// Resolve `<app_root>/<folder_name>/<file_base_name>` and make sure the
/// folder exists.
///
/// `<app_root>` is `base_dir` when given, otherwise two levels up from the
/// running executable (e.g. `<app_root>/bin/news-spider`). Exactly one
/// directory level is created; a missing ancestor is an error. Safe to call
/// repeatedly once the folder exists.
pub fn resolve_log_path(
    base_dir: Option<&Path>,
    folder_name: &str,
    file_base_name: &str,
) -> Result<PathBuf, LogSetupError> {
    let app_root = match base_dir {
        Some(dir) => dir.to_path_buf(),
        None => app_root()?,
    };

    let folder = app_root.join(folder_name);
    match fs::create_dir(&folder) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
        Err(e) => {
            return Err(LogSetupError::CreateLogDir {
                path: folder,
                source: e,
            })
        }
    }

    Ok(folder.join(file_base_name))
}

/// [`resolve_log_path`] with the spider defaults.
pub fn default_log_path() -> Result<PathBuf, LogSetupError> {
    resolve_log_path(None, LOG_FOLDER_NAME, LOG_FILE_NAME)
}

fn app_root() -> Result<PathBuf, LogSetupError> {
    let exe = env::current_exe().map_err(LogSetupError::AppRoot)?;
    exe.parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            LogSetupError::AppRoot(io::Error::new(
                io::ErrorKind::NotFound,
                "executable has no grandparent directory",
            ))
        })
}
