// Screenshot artifact persistence

use std::path::Path;

use crate::error::Result;

/// Writes PNG bytes to `path`, creating the parent directory if absent.
pub async fn write(path: &Path, png: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, png).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("screenshots/result.png");

        write(&path, b"\x89PNG\r\n\x1a\n").await.expect("write");

        let bytes = std::fs::read(&path).expect("read back");
        assert_eq!(bytes, b"\x89PNG\r\n\x1a\n");
    }

    #[tokio::test]
    async fn write_accepts_a_bare_relative_filename() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::env::set_current_dir(dir.path()).expect("chdir");

        write(Path::new("error_screenshot.png"), b"png")
            .await
            .expect("write");

        assert!(Path::new("error_screenshot.png").exists());
    }
}
