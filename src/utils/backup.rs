//! Backup artifacts for translated record lists

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;

use crate::core::errors::{Result, TranslationError};
use crate::core::models::Record;

/// Name of the rolling copy of the most recent backup
pub const LATEST_BACKUP_NAME: &str = "latest_translation.json";

/// Timestamped file name for one backup artifact
pub fn backup_file_name() -> String {
    let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S-%3fZ");
    format!("records_translated_{}.json", timestamp)
}

/// Write the translated records to a timestamped backup file and refresh
/// the `latest_translation.json` copy. The directory is created on demand.
/// Returns the backup path.
pub async fn write_backup(dir: &Path, records: &[Record]) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| TranslationError::File {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;

    let backup_path = dir.join(backup_file_name());
    let content = serde_json::to_string_pretty(records)?;

    tokio::fs::write(&backup_path, &content)
        .await
        .map_err(|e| TranslationError::File {
            path: backup_path.display().to_string(),
            message: e.to_string(),
        })?;

    let latest_path = dir.join(LATEST_BACKUP_NAME);
    tokio::fs::copy(&backup_path, &latest_path)
        .await
        .map_err(|e| TranslationError::File {
            path: latest_path.display().to_string(),
            message: e.to_string(),
        })?;

    info!("Backup written to: {}", backup_path.display());
    Ok(backup_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;

    #[test]
    fn test_backup_file_name_shape() {
        let name = backup_file_name();
        assert!(name.starts_with("records_translated_"));
        assert!(name.ends_with("Z.json"));
        // Timestamp separators are flattened so the name stays portable
        assert_eq!(name.matches('.').count(), 1);
        assert_eq!(name.matches(':').count(), 0);
    }

    #[tokio::test]
    async fn test_write_backup_creates_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![
            Record::new("One", "<DIV>x</DIV>"),
            Record::title_only("Two"),
        ];

        let backup_path = write_backup(dir.path(), &records).await.unwrap();

        assert!(backup_path.exists());
        let latest_path = dir.path().join(LATEST_BACKUP_NAME);
        assert!(latest_path.exists());

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&latest_path).unwrap()).unwrap();
        assert_json_eq!(written, serde_json::to_value(&records).unwrap());
    }
}
