//! Outbound ポート: usecase が割り込み源・Sink を使うための trait

pub mod interrupt_source;
pub mod pipe_sink;

pub use interrupt_source::{InterruptSource, InterruptSubscription};
pub use pipe_sink::PipeSink;
