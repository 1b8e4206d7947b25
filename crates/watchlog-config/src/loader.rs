//! JSON5 config file loading.

use crate::error::ConfigError;
use crate::model::WatchlogConfig;
use log::debug;
use std::path::Path;

/// Load configuration from a JSON5 file.
///
/// A missing file is not an error; defaults apply.
pub fn load_from_path(path: &Path) -> Result<WatchlogConfig, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!("config file missing, using defaults (path={})", path.display());
            return Ok(WatchlogConfig::default());
        }
        Err(err) => return Err(err.into()),
    };
    let config = json5::from_str(&text)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::load_from_path;
    use crate::model::ExportMode;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempdir().expect("tempdir");
        let config = load_from_path(&temp.path().join("absent.json5")).expect("load");
        assert_eq!(config.export.auto_export, false);
        assert_eq!(config.export.mode, ExportMode::DailyAggregate);
    }

    #[test]
    fn json5_file_parses_with_comments() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("watchlog.json5");
        std::fs::write(
            &path,
            "{\n  // enable exports\n  export: { auto_export: true, mode: 'per_item' },\n}\n",
        )
        .expect("write");
        let config = load_from_path(&path).expect("load");
        assert_eq!(config.export.auto_export, true);
        assert_eq!(config.export.mode, ExportMode::PerItem);
    }

    #[test]
    fn invalid_file_is_a_parse_error() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("watchlog.json5");
        std::fs::write(&path, "{ export: ").expect("write");
        assert!(load_from_path(&path).is_err());
    }
}
