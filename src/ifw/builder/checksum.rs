//! Installer artifact checksum.

use crate::ifw::{error::ErrorExt, Result};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Size and hex-encoded SHA-256 of the file at `path`.
///
/// Returns `None` when nothing, or something other than a regular file, was
/// produced there.
pub async fn artifact_digest(path: &Path) -> Result<Option<(u64, String)>> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.is_file() => metadata,
        _ => return Ok(None),
    };

    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening installer for hashing", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading installer for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(Some((metadata.len(), format!("{:x}", hasher.finalize()))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn digests_regular_files_only() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("installer");
        std::fs::write(&file, b"abc").unwrap();

        let (size, checksum) = artifact_digest(&file).await.unwrap().unwrap();
        assert_eq!(size, 3);
        assert_eq!(
            checksum,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );

        assert!(artifact_digest(dir.path()).await.unwrap().is_none());
        assert!(artifact_digest(&dir.path().join("missing")).await.unwrap().is_none());
    }
}
