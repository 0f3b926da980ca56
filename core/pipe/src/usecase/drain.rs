//! pipe のドレイン（表示しながら成功判定 / Failure の収集）
//!
//! どちらも producer が pipe を閉じるまでブロックする。Failure を受けても途中で止めない。

use crate::adapter::{ErrorCollector, TerminalSink};
use crate::channel::PipeReceiver;
use crate::domain::RenderConfig;
use crate::ports::outbound::PipeSink;
use std::io::Write;

/// 閉じられるまで全アイテムを sink へ渡す。
/// Failure が 1 つも無く、sink の書き込みもすべて成功したら true。
pub fn drain(pipe: &PipeReceiver, sink: &mut dyn PipeSink) -> bool {
    let mut ok = true;
    for msg in pipe.iter() {
        if msg.is_failure() {
            ok = false;
        }
        // 書けなくても producer を止めないよう読み続ける
        if sink.on_message(msg).is_err() {
            ok = false;
        }
    }
    if sink.on_end().is_err() {
        ok = false;
    }
    ok
}

/// pipe を端末向けに表示し、Failure が無ければ true を返す
pub fn write_pipe<W: Write>(pipe: Option<&PipeReceiver>, out: W, config: RenderConfig) -> bool {
    match pipe {
        Some(pipe) => drain(pipe, &mut TerminalSink::new(out, config)),
        None => true,
    }
}

/// 標準出力へ表示する write_pipe
pub fn write_pipe_stdout(pipe: Option<&PipeReceiver>, config: RenderConfig) -> bool {
    match pipe {
        Some(pipe) => drain(pipe, &mut TerminalSink::stdout(config)),
        None => true,
    }
}

/// Failure の中身だけを到着順に集めて返す（同期的なマイグレーション呼び出し向け）
pub fn read_errors(pipe: Option<&PipeReceiver>) -> Vec<anyhow::Error> {
    let mut collector = ErrorCollector::new();
    if let Some(pipe) = pipe {
        drain(pipe, &mut collector);
    }
    collector.into_errors()
}
