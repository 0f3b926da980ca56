//! Failure だけを集める Sink（同期的な呼び出し側向け）

use crate::domain::Message;
use crate::ports::outbound::PipeSink;
use common::error::Error;

/// 到着順に Failure の中身を溜める。他のアイテムは捨てる
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<anyhow::Error>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_errors(self) -> Vec<anyhow::Error> {
        self.errors
    }
}

impl PipeSink for ErrorCollector {
    fn on_message(&mut self, msg: Message) -> Result<(), Error> {
        if let Some(e) = msg.into_failure() {
            self.errors.push(e);
        }
        Ok(())
    }
}
