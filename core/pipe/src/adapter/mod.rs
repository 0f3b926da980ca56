//! アダプター（割り込み源・Sink・環境変数の標準実装）

pub mod env;
pub mod error_collector;
pub mod interrupts;
pub mod terminal_sink;

pub use error_collector::ErrorCollector;
pub use interrupts::{InterruptHub, SigintSource, UNHANDLED_INTERRUPT_EXIT_CODE};
pub use terminal_sink::TerminalSink;
