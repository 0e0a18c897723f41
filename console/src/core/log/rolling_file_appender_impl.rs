// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Appender that writes every event to the single file `path` (never rotated). The
/// parent folder is created if it doesn't exist.
///
/// Note that if you wrap this up in a non blocking writer, the log file is only
/// written when the worker guard is dropped.
///
/// # Errors
///
/// Returns an error if:
/// - The path has no file name
/// - The folder or the file can't be created
pub fn try_create(path_str: &str) -> miette::Result<RollingFileAppender> {
    let path = PathBuf::from(path_str);

    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!("Can't use {} as a log file, it has no file name.", path.display())
    })?;

    let parent = match path.parent() {
        Some(it) if !it.as_os_str().is_empty() => it.to_path_buf(),
        _ => PathBuf::from("."),
    };

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(&parent)
        .map_err(|err| miette::miette!("Can't open log file {}: {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_missing_parent_folder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("console.log");

        let appender = try_create(path.to_str().unwrap());

        assert!(appender.is_ok());
        assert!(path.exists());
    }

    #[test]
    fn test_rejects_path_without_file_name() {
        assert!(try_create("/").is_err());
    }
}
