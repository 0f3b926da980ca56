//! 割り込み（Ctrl+C 等）を購読する Outbound ポート
//!
//! relay は呼び出しごとに購読を 1 つ取得し、戻るときに drop して購読を解除する。

use crossbeam_channel::Receiver;

/// 割り込み通知の発生源
///
/// 実装は adapter::SigintSource（Ctrl+C）や adapter::InterruptHub（テスト・手動通知）など。
pub trait InterruptSource: Send + Sync {
    /// 以後の割り込みを受け取る購読を作る
    fn subscribe(&self) -> InterruptSubscription;
}

/// 割り込みの購読。drop すると購読解除される
pub struct InterruptSubscription {
    rx: Receiver<()>,
    on_drop: Option<Box<dyn FnOnce() + Send>>,
}

impl InterruptSubscription {
    /// 受信口と購読解除処理から作る
    pub fn new(rx: Receiver<()>, on_drop: impl FnOnce() + Send + 'static) -> Self {
        Self {
            rx,
            on_drop: Some(Box::new(on_drop)),
        }
    }

    /// 何も届かない購読（割り込み源が無い環境向け）
    pub fn never() -> Self {
        Self {
            rx: crossbeam_channel::never(),
            on_drop: None,
        }
    }

    pub(crate) fn receiver(&self) -> &Receiver<()> {
        &self.rx
    }
}

impl Drop for InterruptSubscription {
    fn drop(&mut self) {
        if let Some(f) = self.on_drop.take() {
            f();
        }
    }
}

impl std::fmt::Debug for InterruptSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterruptSubscription")
            .field("pending", &self.rx.len())
            .finish()
    }
}
