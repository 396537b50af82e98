//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use fledge_core::{
    application::{
        ApplicationError,
        ports::{FileInfo, Filesystem},
    },
    error::{FledgeError, FledgeResult},
};
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> FledgeResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> FledgeResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_to_string(&self, path: &Path) -> FledgeResult<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io_error(path, e, "read file")),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_file(&self, path: &Path) -> FledgeResult<bool> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(map_io_error(path, e, "remove file")),
        }
    }

    fn remove_dir_all(&self, path: &Path) -> FledgeResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn list_files(&self, dir: &Path, extension: &str) -> FledgeResult<Vec<FileInfo>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| FledgeError::from(ApplicationError::FilesystemError {
                path: dir.to_path_buf(),
                reason: format!("Failed to list directory: {e}"),
            }))?;

            if !entry.file_type().is_file()
                || entry.path().extension().is_none_or(|ext| ext != extension)
            {
                continue;
            }

            let size = entry
                .metadata()
                .map(|m| m.len())
                .map_err(|e| FledgeError::from(ApplicationError::FilesystemError {
                    path: entry.path().to_path_buf(),
                    reason: format!("Failed to get metadata: {e}"),
                }))?;

            files.push(FileInfo {
                path: entry.into_path(),
                size,
            });
        }

        Ok(files)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> FledgeError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn list_files_filters_by_extension_and_sorts() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("b.apk"), vec![0u8; 2048]).unwrap();
        std::fs::write(tmp.path().join("a.apk"), b"x").unwrap();
        std::fs::write(tmp.path().join("output-metadata.json"), b"{}").unwrap();
        std::fs::create_dir(tmp.path().join("nested.apk")).unwrap();

        let files = LocalFilesystem::new().list_files(tmp.path(), "apk").unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.apk", "b.apk"]);
        assert_eq!(files[1].size, 2048);
    }

    #[test]
    fn missing_dir_lists_nothing() {
        let tmp = TempDir::new().unwrap();
        let files = LocalFilesystem::new()
            .list_files(&tmp.path().join("nope"), "aab")
            .unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn read_and_remove_missing_file() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let path = tmp.path().join("Podfile.lock");

        assert_eq!(fs.read_to_string(&path).unwrap(), None);
        assert!(!fs.remove_file(&path).unwrap());

        fs.write_file(&path, "PODS:").unwrap();
        assert_eq!(fs.read_to_string(&path).unwrap().as_deref(), Some("PODS:"));
        assert!(fs.remove_file(&path).unwrap());
        assert!(!fs.exists(&path));
    }
}
