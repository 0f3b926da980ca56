//! pipe 本体（容量 0 のランデブーチャネル）
//!
//! send は受信側が受け取るまでブロックするので、producer が consumer を追い越すことはなく
//! 送信順がそのまま表示順になる。送信側は 1 つだけで、close は送信側を消費して行う。

use crate::domain::Message;
use crossbeam_channel::{Receiver, Sender};

/// pipe 操作のエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PipeError {
    /// 受信側がすでに破棄されている
    #[error("pipe receiver disconnected")]
    Disconnected,
}

/// 新しい pipe を作る
pub fn new() -> (PipeSender, PipeReceiver) {
    let (tx, rx) = crossbeam_channel::bounded(0);
    (PipeSender { tx }, PipeReceiver { rx })
}

/// pipe を閉じる。err があれば先に Failure として送る
pub fn close(pipe: PipeSender, err: Option<anyhow::Error>) {
    pipe.close(err);
}

/// 書き込み側（producer 専用。Clone できない）
#[derive(Debug)]
pub struct PipeSender {
    tx: Sender<Message>,
}

impl PipeSender {
    /// 受信側が受け取るまでブロックして 1 アイテム送る
    pub fn send(&self, msg: impl Into<Message>) -> Result<(), PipeError> {
        self.tx
            .send(msg.into())
            .map_err(|_| PipeError::Disconnected)
    }

    /// 最後のエラー（あれば）を送ってから閉じる。
    /// 受信側がもう居なければエラーは捨てられる（読む者が居ない）。
    pub fn close(self, err: Option<anyhow::Error>) {
        if let Some(e) = err {
            let _ = self.send(Message::Failure(e));
        }
        // self.tx がここで drop され、受信側は閉鎖を観測する
    }
}

/// 読み出し側（consumer / relay 専用）
#[derive(Debug)]
pub struct PipeReceiver {
    rx: Receiver<Message>,
}

impl PipeReceiver {
    /// 次のアイテムを待つ。producer が閉じたら None
    pub fn recv(&self) -> Option<Message> {
        self.rx.recv().ok()
    }

    /// select! で待つための生の受信口
    pub(crate) fn raw(&self) -> &Receiver<Message> {
        &self.rx
    }

    /// 閉じられるまでのアイテムを順に返すイテレータ
    pub fn iter(&self) -> impl Iterator<Item = Message> + '_ {
        self.rx.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_items_arrive_in_send_order() {
        let (tx, rx) = new();
        let producer = thread::spawn(move || {
            for i in 0..5 {
                tx.send(format!("step {}", i)).unwrap();
            }
            tx.close(None);
        });
        let received: Vec<String> = rx
            .iter()
            .map(|m| match m {
                Message::Text(s) => s,
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        producer.join().unwrap();
        assert_eq!(received, vec!["step 0", "step 1", "step 2", "step 3", "step 4"]);
    }

    #[test]
    fn test_close_with_error_sends_failure_last() {
        let (tx, rx) = new();
        let producer = thread::spawn(move || {
            tx.send("working").unwrap();
            close(tx, Some(anyhow::anyhow!("driver failed")));
        });
        assert!(matches!(rx.recv(), Some(Message::Text(_))));
        match rx.recv() {
            Some(Message::Failure(e)) => assert_eq!(e.to_string(), "driver failed"),
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(rx.recv().is_none());
        producer.join().unwrap();
    }

    #[test]
    fn test_send_blocks_until_received() {
        let (tx, rx) = new();
        // 容量 0: 受信側が居なければ try_send は失敗する
        assert!(tx.tx.try_send(Message::text("x")).is_err());
        let producer = thread::spawn(move || tx.send("x").is_ok());
        assert!(matches!(rx.recv(), Some(Message::Text(s)) if s == "x"));
        assert!(producer.join().unwrap());
    }

    #[test]
    fn test_send_after_receiver_dropped_fails() {
        let (tx, rx) = new();
        drop(rx);
        assert_eq!(tx.send("late"), Err(PipeError::Disconnected));
        // close も受信側が無くてもブロックしない
        tx.close(Some(anyhow::anyhow!("ignored")));
    }
}
