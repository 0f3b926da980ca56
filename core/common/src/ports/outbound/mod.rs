//! Outbound ポート: アプリが外界（ログ出力等）を使うための trait

pub mod log;

pub use log::{now_iso8601, Log, LogLevel, LogRecord};
