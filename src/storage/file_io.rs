//! JSON file helpers
//!
//! Writes go to a sibling temp file that is renamed into place, so a crash
//! leaves either the old file or the new one.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::TrackerError;

/// Read JSON from a file, `None` if the file doesn't exist
pub fn read_json_optional<T, P>(path: P) -> Result<Option<T>, TrackerError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    parse_file(path).map(Some)
}

/// Read JSON from a file, returning an error if file doesn't exist
pub fn read_json_required<T, P>(path: P) -> Result<T, TrackerError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(TrackerError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }
    parse_file(path)
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T, TrackerError> {
    let file = File::open(path)
        .map_err(|e| TrackerError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| TrackerError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), TrackerError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_atomic(path.as_ref(), data, false)
}

/// Like [`write_json_atomic`], readable by the owner only on Unix
pub fn write_json_private<T, P>(path: P, data: &T) -> Result<(), TrackerError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_atomic(path.as_ref(), data, true)
}

fn write_atomic<T: Serialize>(path: &Path, data: &T, private: bool) -> Result<(), TrackerError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            TrackerError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| TrackerError::Storage(format!("Failed to create temp file: {}", e)))?;
    if private {
        restrict_permissions(&file)?;
    }

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| TrackerError::Storage(format!("Failed to serialize data: {}", e)))?;
    writer
        .flush()
        .map_err(|e| TrackerError::Storage(format!("Failed to flush data: {}", e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| TrackerError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        TrackerError::Storage(format!("Failed to rename temp file: {}", e))
    })
}

#[cfg(unix)]
fn restrict_permissions(file: &File) -> Result<(), TrackerError> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o600))
        .map_err(|e| TrackerError::Storage(format!("Failed to set permissions: {}", e)))
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File) -> Result<(), TrackerError> {
    Ok(())
}

/// Delete a file, treating "already gone" as success
pub fn remove_if_exists<P: AsRef<Path>>(path: P) -> Result<(), TrackerError> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(TrackerError::Storage(format!(
            "Failed to remove {}: {}",
            path.display(),
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        label: String,
        count: u32,
    }

    fn sample() -> Sample {
        Sample {
            label: "lunch".to_string(),
            count: 3,
        }
    }

    #[test]
    fn test_optional_read_of_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let loaded: Option<Sample> =
            read_json_optional(temp_dir.path().join("missing.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("sample.json");

        write_json_atomic(&path, &sample()).unwrap();
        assert!(!temp_dir.path().join("nested").join("sample.json.tmp").exists());

        let loaded: Sample = read_json_required(&path).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_required_read_of_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_json_required::<Sample, _>(temp_dir.path().join("missing.json"));
        assert!(matches!(result, Err(TrackerError::Storage(_))));
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "not json").unwrap();

        let result = read_json_optional::<Sample, _>(&path);
        assert!(matches!(result, Err(TrackerError::Storage(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_private_write_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        write_json_private(&path, &sample()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_remove_if_exists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gone.json");
        write_json_atomic(&path, &sample()).unwrap();

        remove_if_exists(&path).unwrap();
        assert!(!path.exists());
        remove_if_exists(&path).unwrap();
    }
}
