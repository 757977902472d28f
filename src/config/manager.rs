//! 検証エンジンの設定を組み立てる

use std::path::Path;

use super::{
    ConfigError,
    EngineSettings,
    loader,
};

/// ワークスペースの設定とコマンドライン引数から有効な設定を組み立てる
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 検証済みの設定
    current_settings: EngineSettings,
}

impl ConfigManager {
    /// デフォルト設定で作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: EngineSettings::default() }
    }

    /// ワークスペースの `.translation-guard.json` を読み込む
    ///
    /// `workspace_root` が `None`、または設定ファイルが無い場合はデフォルト設定になる。
    /// バリデーションに失敗した場合、現在の設定は変更されない。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, workspace_root: Option<&Path>) -> Result<(), ConfigError> {
        let settings = match workspace_root {
            Some(root) => loader::read_settings(&loader::config_path(root))?.unwrap_or_default(),
            None => EngineSettings::default(),
        };
        self.replace_settings(settings)
    }

    /// 主言語をコマンドライン引数で上書きする
    ///
    /// # Errors
    /// - バリデーションエラー
    pub fn override_primary_locale(&mut self, primary_locale: String) -> Result<(), ConfigError> {
        let settings = EngineSettings { primary_locale, ..self.current_settings.clone() };
        self.replace_settings(settings)
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &EngineSettings {
        &self.current_settings
    }

    /// バリデーションを通った設定だけを反映する
    fn replace_settings(&mut self, settings: EngineSettings) -> Result<(), ConfigError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;
        tracing::debug!("Using settings: {:?}", settings);
        self.current_settings = settings;
        Ok(())
    }
}
