use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

pub const DB_FILE_NAME: &str = "store_locator.sqlite";

pub fn default_data_dir() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "hellhbbd", "store-locator")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    Ok(project_dirs.data_local_dir().to_path_buf())
}

pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DB_FILE_NAME)
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn default_data_dir_uses_app_directory() {
        let data_dir = default_data_dir().expect("default data dir should resolve");
        let app_dir = data_dir
            .components()
            .filter_map(|part| part.as_os_str().to_str())
            .any(|part| part.contains("store-locator"));

        assert!(app_dir, "data dir should be scoped to the app: {data_dir:?}");
        assert_eq!(
            db_path(&data_dir).file_name().and_then(|name| name.to_str()),
            Some("store_locator.sqlite")
        );
    }

    #[test]
    fn webview_dir_is_created_under_data_dir() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        let temp_dir = std::env::temp_dir().join(format!("store-locator-webview-{nanos}"));

        let webview_dir = ensure_webview_data_dir(&temp_dir).expect("should create webview dir");

        assert!(webview_dir.is_dir());
        assert_eq!(webview_dir, temp_dir.join("webview2"));

        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }
}
