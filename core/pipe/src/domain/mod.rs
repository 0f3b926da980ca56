//! ドメイン型（pipe を流れるメッセージ・relay の状態・設定値）

pub mod config;
pub mod message;
pub mod relay_state;

pub use config::{ColorMode, RenderConfig, SessionConfig};
pub use message::{Direction, Message, MigrationFile};
pub use relay_state::RelayState;
