use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ApiError, Result};

/// Returns the bitebox home directory.
///
/// Resolution order:
/// 1. `BITEBOX_HOME` environment variable (if set and non-empty)
/// 2. The platform config directory (e.g. `~/.config/bitebox`)
/// 3. `.bitebox` in the current directory
pub fn bitebox_home() -> PathBuf {
    if let Ok(root) = std::env::var("BITEBOX_HOME")
        && !root.is_empty()
    {
        return PathBuf::from(root);
    }

    directories::ProjectDirs::from("com", "bitebox", "bitebox")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".bitebox"))
}

/// Write file atomically using a temp file in the same directory and rename.
///
/// Readers see either the previous content or the new content, never a mix.
pub fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| ApiError::Io(e.error))?;
    Ok(())
}
