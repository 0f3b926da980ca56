//! 環境変数による設定取得（adapter 層）
//!
//! usecase は環境変数に直接依存せず、ここで組み立てた設定値を受け取る。

use crate::domain::{ColorMode, RenderConfig, SessionConfig};
use common::adapter::{FileJsonLog, NoopLog};
use common::ports::outbound::Log;
use std::env;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

/// JSONL ログの出力先
pub const LOG_FILE_ENV: &str = "MIGRATE_LOG_FILE";
/// 空でなければ色付けを無効にする（https://no-color.org）
pub const NO_COLOR_ENV: &str = "NO_COLOR";

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.is_empty())
}

/// ログファイルのパスを MIGRATE_LOG_FILE から取得
pub fn log_file_path_from_env() -> Option<PathBuf> {
    non_empty_var(LOG_FILE_ENV).map(PathBuf::from)
}

/// NO_COLOR が設定されていれば Never、なければ Auto
pub fn color_mode_from_env() -> ColorMode {
    if non_empty_var(NO_COLOR_ENV).is_some() {
        ColorMode::Never
    } else {
        ColorMode::Auto
    }
}

/// 標準出力向けの表示設定
pub fn render_config_from_env() -> RenderConfig {
    RenderConfig {
        color: color_mode_from_env().resolve(std::io::stdout().is_terminal()),
    }
}

/// 環境変数から Session 設定を組み立てる
pub fn session_config_from_env() -> SessionConfig {
    SessionConfig {
        render: render_config_from_env(),
        ..SessionConfig::default()
    }
}

/// MIGRATE_LOG_FILE があれば FileJsonLog、なければ NoopLog
pub fn logger_from_env() -> Arc<dyn Log> {
    match log_file_path_from_env() {
        Some(path) => Arc::new(FileJsonLog::new(path)),
        None => Arc::new(NoopLog),
    }
}
