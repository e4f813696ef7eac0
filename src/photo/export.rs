/// Export ("share") of the filtered photo
///
/// Writes the processed image as a PNG and records the export in the usage
/// database. The write runs on a blocking worker; the history insert opens
/// its own database connection because rusqlite connections are not Send.
use chrono::Utc;
use image::RgbaImage;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Arc;

use crate::filter::kind::FilterKind;
use crate::filter::params::FilterParams;
use crate::filter::FilterError;

/// Fixed artifact name pre-filled in the save dialog.
pub const SHARE_BASENAME: &str = "InstaPreview.png";

/// Everything an export needs, captured at the moment the user confirmed
/// the save dialog so later UI changes cannot leak into it.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub pixels: Arc<RgbaImage>,
    pub dest: PathBuf,
    pub filter: FilterKind,
    pub params: FilterParams,
    pub db_path: PathBuf,
}

/// Write the PNG and record the export. Returns the written path.
pub async fn export_photo(request: ExportRequest) -> Result<String, FilterError> {
    tokio::task::spawn_blocking(move || export_blocking(request))
        .await
        .map_err(|e| FilterError::Render(format!("export task failed: {e}")))?
}

/// Blocking implementation of the export.
fn export_blocking(request: ExportRequest) -> Result<String, FilterError> {
    request
        .pixels
        .save(&request.dest)
        .map_err(|e| FilterError::Render(e.to_string()))?;

    println!("📸 Exported {}", request.dest.display());

    // History is best-effort: a failed insert must not fail the export the
    // user already has on disk.
    if let Err(e) = record_share(&request) {
        eprintln!("⚠️  Could not record export history: {e:?}");
    }

    Ok(request.dest.to_string_lossy().to_string())
}

/// Insert the export into the shares table through a fresh connection.
fn record_share(request: &ExportRequest) -> rusqlite::Result<()> {
    let conn = Connection::open(&request.db_path)?;
    let settings_json = request
        .params
        .to_json()
        .unwrap_or_else(|_| String::from("{}"));

    conn.execute(
        "INSERT INTO shares (path, filter, settings_json, shared_at) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![
            request.dest.to_string_lossy().to_string(),
            request.filter.slug(),
            settings_json,
            Utc::now().timestamp(),
        ],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[tokio::test]
    async fn test_export_writes_png_and_reports_path() {
        let dir = std::env::temp_dir().join(format!("insta-filter-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let dest = dir.join(SHARE_BASENAME);
        let db_path = dir.join("test.db");

        // The shares table must exist for the history insert
        let conn = Connection::open(&db_path).unwrap();
        conn.execute(
            "CREATE TABLE IF NOT EXISTS shares (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                path TEXT NOT NULL,
                filter TEXT NOT NULL,
                settings_json TEXT NOT NULL,
                shared_at INTEGER NOT NULL
            )",
            [],
        )
        .unwrap();

        let request = ExportRequest {
            pixels: Arc::new(RgbaImage::from_pixel(4, 4, Rgba([9, 8, 7, 255]))),
            dest: dest.clone(),
            filter: FilterKind::Bloom,
            params: FilterParams::default(),
            db_path: db_path.clone(),
        };

        let written = export_photo(request).await.unwrap();
        assert_eq!(written, dest.to_string_lossy());
        assert!(dest.exists());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM shares", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unwritable_destination_is_render_failure() {
        let request = ExportRequest {
            pixels: Arc::new(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]))),
            dest: PathBuf::from("/nonexistent/dir/InstaPreview.png"),
            filter: FilterKind::SepiaTone,
            params: FilterParams::default(),
            db_path: PathBuf::new(),
        };

        let result = export_blocking(request);
        assert!(matches!(result, Err(FilterError::Render(_))));
    }
}
