//! pipe の「消費」側を分離する PipeSink
//!
//! ドレインのループは usecase に 1 つだけ置き、表示・収集の違いは sink 実装で吸収する。

use crate::domain::Message;
use common::error::Error;

/// ドレインされたアイテムを受け取る Sink
pub trait PipeSink {
    /// 1 アイテムを処理する。Err を返してもドレインは継続される
    fn on_message(&mut self, msg: Message) -> Result<(), Error>;
    /// pipe が閉じられたとき（flush 等）
    fn on_end(&mut self) -> Result<(), Error> {
        Ok(())
    }
}
