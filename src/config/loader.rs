//! 設定ファイルの読み込み

use std::io::ErrorKind;
use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    EngineSettings,
};

/// 設定ファイル名
pub(super) const CONFIG_FILE_NAME: &str = ".translation-guard.json";

/// ワークスペース内の設定ファイルのパス
pub(super) fn config_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(CONFIG_FILE_NAME)
}

/// 設定ファイルを読み込む
///
/// ファイルが無ければ `Ok(None)`。省略されたキーはデフォルト値で補われる。
///
/// # Errors
/// - ファイル読み込みエラー（存在しない場合を除く）
/// - JSON パースエラー
pub(super) fn read_settings(path: &Path) -> Result<Option<EngineSettings>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("Configuration file not found: {:?}", path);
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    tracing::debug!("Loaded configuration from: {:?}", path);
    Ok(Some(serde_json::from_str(&content)?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn test_config_path_is_in_workspace_root() {
        let path = config_path(Path::new("/work"));

        assert_eq!(path, Path::new("/work/.translation-guard.json"));
    }

    #[rstest]
    fn test_read_settings_merges_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = config_path(temp_dir.path());
        fs::write(&path, r#"{"stripTexts": false}"#).unwrap();

        let settings = read_settings(&path).unwrap().unwrap();

        assert!(!settings.strip_texts);
        assert_eq!(settings.primary_locale, "en");
    }

    #[rstest]
    fn test_read_settings_missing_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = read_settings(&config_path(temp_dir.path()));

        assert!(matches!(result, Ok(None)));
    }

    #[rstest]
    #[case::not_json("invalid json")]
    #[case::wrong_type(r#"{"stripTexts": "yes"}"#)]
    fn test_read_settings_parse_error(#[case] content: &str) {
        let temp_dir = TempDir::new().unwrap();
        let path = config_path(temp_dir.path());
        fs::write(&path, content).unwrap();

        let result = read_settings(&path);

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[rstest]
    fn test_read_settings_directory_is_io_error() {
        let temp_dir = TempDir::new().unwrap();

        let result = read_settings(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
