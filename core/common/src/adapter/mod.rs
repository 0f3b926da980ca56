//! アダプター（ポートの標準実装）

pub mod file_json_log;

pub use file_json_log::{FileJsonLog, NoopLog};
