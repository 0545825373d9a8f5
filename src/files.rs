//! Capability-scoped file access for context uploads and exports.
//!
//! Every path is resolved by opening its parent directory with ambient
//! authority and operating relative to that handle, so callers never hand
//! raw paths to the standard library.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::error::WorkbenchError;

/// Reads a UTF-8 text file.
///
/// # Errors
///
/// Returns [`WorkbenchError::Io`] when the file cannot be opened or is not
/// valid UTF-8.
pub fn read_text(path: &Utf8Path) -> Result<String, WorkbenchError> {
    let (dir, file_name) = open_parent(path, false)?;
    dir.read_to_string(file_name)
        .map_err(|error| WorkbenchError::Io {
            message: format!("failed to read '{path}': {error}"),
        })
}

/// Reads a file as raw bytes.
///
/// # Errors
///
/// Returns [`WorkbenchError::Io`] when the file cannot be opened.
pub fn read_bytes(path: &Utf8Path) -> Result<Vec<u8>, WorkbenchError> {
    let (dir, file_name) = open_parent(path, false)?;
    dir.read(file_name).map_err(|error| WorkbenchError::Io {
        message: format!("failed to read '{path}': {error}"),
    })
}

/// Writes `contents` to `path`, creating parent directories first.
///
/// Returns the path that was written.
///
/// # Errors
///
/// Returns [`WorkbenchError::Io`] when a directory or the file cannot be
/// created.
pub fn write_bytes(path: &Utf8Path, contents: &[u8]) -> Result<Utf8PathBuf, WorkbenchError> {
    let (dir, file_name) = open_parent(path, true)?;
    dir.write(file_name, contents)
        .map_err(|error| WorkbenchError::Io {
            message: format!("failed to write '{path}': {error}"),
        })?;
    Ok(path.to_path_buf())
}

/// Opens the directory containing `path` and returns it with the file name.
fn open_parent(path: &Utf8Path, create: bool) -> Result<(Dir, &str), WorkbenchError> {
    let file_name = path.file_name().ok_or_else(|| WorkbenchError::Io {
        message: format!("invalid path '{path}': no file name"),
    })?;
    let parent = path.parent().unwrap_or_else(|| Utf8Path::new("."));

    let (root, relative) = if parent.as_str().is_empty() || parent == Utf8Path::new(".") {
        (open_ambient(".")?, Utf8Path::new("."))
    } else if parent.is_absolute() {
        let relative = parent.strip_prefix("/").map_err(|_| WorkbenchError::Io {
            message: format!("failed to normalise directory '{parent}'"),
        })?;
        (open_ambient("/")?, relative)
    } else {
        (open_ambient(".")?, parent)
    };

    if relative.as_str().is_empty() || relative == Utf8Path::new(".") {
        return Ok((root, file_name));
    }

    if create {
        root.create_dir_all(relative)
            .map_err(|error| WorkbenchError::Io {
                message: format!("failed to create directory '{parent}': {error}"),
            })?;
    }

    let dir = root.open_dir(relative).map_err(|error| WorkbenchError::Io {
        message: format!("failed to open directory '{parent}': {error}"),
    })?;
    Ok((dir, file_name))
}

fn open_ambient(path: &str) -> Result<Dir, WorkbenchError> {
    Dir::open_ambient_dir(path, ambient_authority()).map_err(|error| WorkbenchError::Io {
        message: format!("failed to open directory '{path}': {error}"),
    })
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    use super::{read_bytes, read_text, write_bytes};
    use crate::error::WorkbenchError;

    fn temp_path(dir: &TempDir, relative: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().join(relative)).expect("temp path should be UTF-8")
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = temp_path(&dir, "exports/nested/test_cases.xlsx");

        let written = write_bytes(&path, b"PK\x03\x04").expect("write should succeed");

        assert_eq!(written, path);
        assert_eq!(
            read_bytes(&path).expect("read should succeed"),
            b"PK\x03\x04".to_vec()
        );
    }

    #[test]
    fn read_text_reports_missing_file() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = temp_path(&dir, "missing.txt");

        let error = read_text(&path).expect_err("missing file should fail");

        assert!(
            matches!(error, WorkbenchError::Io { ref message } if message.contains("missing.txt")),
            "unexpected error: {error:?}"
        );
    }
}
