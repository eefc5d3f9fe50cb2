use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use crate::config::EditorConfig;

/// File appender for `path`. The terminal belongs to the editor, so logs can
/// only go to a file.
pub fn try_create_appender(path: &Path) -> Result<RollingFileAppender> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .with_context(|| format!("Can't use {} as a log file", path.display()))?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(parent)
        .with_context(|| format!("Can't open log file {}", path.display()))
}

/// Install the global subscriber when a log file is configured.
/// Returns whether logging was enabled.
pub fn try_init(config: &EditorConfig) -> Result<bool> {
    let Some(path) = config.log_file.as_deref() else {
        return Ok(false);
    };

    let appender = try_create_appender(path)?;
    tracing_subscriber::fmt()
        .with_writer(appender)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!(err))?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_log_file_disables_logging() {
        assert!(!try_init(&EditorConfig::default()).unwrap());
    }

    #[test]
    fn test_appender_rejects_path_without_file_name() {
        assert!(try_create_appender(Path::new("/")).is_err());
    }

    #[test]
    fn test_appender_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(try_create_appender(&dir.path().join("slate.log")).is_ok());
    }
}
