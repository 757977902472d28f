//! translation-guard
//!
//! 翻訳をプライマリロケールの翻訳と整合させる検証エンジン。
//! 置換変数の一致、型の強制変換、プライマリ変更時の古い翻訳の追跡を扱う。

pub mod config;
pub mod consistency;
pub mod locale;
pub mod phrase;
pub mod snapshot;
pub mod text;
pub mod translation;

pub use config::EngineSettings;
pub use locale::{
    LocaleId,
    Locales,
};
pub use phrase::{
    Phrase,
    PhraseId,
};
pub use text::Text;
pub use translation::{
    Counterpart,
    PrimaryTextChanged,
    Translation,
};
