//! 端末向けの表示 Sink
//!
//! Text / Other は 1 行、Failure は赤字 + 空行、Migration は向きの記号（緑 `>` / 赤 `<`）+ ファイル名。

use crate::domain::{Direction, Message, RenderConfig};
use crate::ports::outbound::PipeSink;
use common::error::Error;
use std::io::{self, Write};

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// 書き込み先へ進捗を整形して出す Sink
pub struct TerminalSink<W: Write> {
    out: W,
    config: RenderConfig,
}

impl TerminalSink<io::Stdout> {
    /// 標準出力へ表示する
    pub fn stdout(config: RenderConfig) -> Self {
        Self::new(io::stdout(), config)
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, config: RenderConfig) -> Self {
        Self { out, config }
    }

    fn paint(&self, color: &'static str, text: &str) -> String {
        if self.config.color {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn render(&mut self, msg: Message) -> io::Result<()> {
        match msg {
            Message::Text(s) | Message::Other(s) => writeln!(self.out, "{}", s),
            Message::Failure(e) => {
                let line = self.paint(RED, &format!("{:#}", e));
                write!(self.out, "{}\n\n", line)
            }
            Message::Migration(f) => {
                let marker = match f.direction {
                    Direction::Up => self.paint(GREEN, ">"),
                    Direction::Down => self.paint(RED, "<"),
                };
                writeln!(self.out, "{} {}", marker, f.file_name)
            }
        }
    }
}

impl<W: Write> PipeSink for TerminalSink<W> {
    fn on_message(&mut self, msg: Message) -> Result<(), Error> {
        self.render(msg)
            .map_err(|e| Error::io_msg(format!("Failed to write progress: {}", e)))
    }

    fn on_end(&mut self) -> Result<(), Error> {
        self.out
            .flush()
            .map_err(|e| Error::io_msg(format!("Failed to flush progress: {}", e)))
    }
}
