//! 割り込み源の実装
//!
//! InterruptHub: 購読の登録簿。notify() で生きている全購読へ 1 回分の割り込みを配る。
//! SigintSource: Ctrl+C（SIGINT）を受けたらプロセス共通の hub へ notify する。
//! 生きている購読が 1 つも無い（relay の外にいる）ときの Ctrl+C は通常どおりプロセスを終了させる。

use crate::ports::outbound::{InterruptSource, InterruptSubscription};
use crossbeam_channel::Sender;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct HubInner {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<(u64, Sender<()>)>>,
}

impl HubInner {
    fn subscribers(&self) -> MutexGuard<'_, Vec<(u64, Sender<()>)>> {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// 割り込み購読の登録簿（Clone は同じ登録簿を共有する）
#[derive(Clone, Default)]
pub struct InterruptHub {
    inner: Arc<HubInner>,
}

impl InterruptHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// 生きている全購読へ割り込みを 1 回配り、配れた数を返す
    pub fn notify(&self) -> usize {
        let mut subs = self.inner.subscribers();
        // 購読は unbounded なので send はブロックしない。受信側が消えたものは掃除する
        subs.retain(|(_, tx)| tx.send(()).is_ok());
        subs.len()
    }

    /// 現在の購読数
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers().len()
    }
}

impl InterruptSource for InterruptHub {
    fn subscribe(&self) -> InterruptSubscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = crossbeam_channel::unbounded();
        self.inner.subscribers().push((id, tx));
        let inner = Arc::clone(&self.inner);
        InterruptSubscription::new(rx, move || {
            inner.subscribers().retain(|(sid, _)| *sid != id);
        })
    }
}

impl std::fmt::Debug for InterruptHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterruptHub")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// 購読者のいない Ctrl+C で終了するときの終了コード（128 + SIGINT）
pub const UNHANDLED_INTERRUPT_EXIT_CODE: i32 = 130;

// ctrlc のハンドラはプロセスに 1 つだけ登録できる
static SIGINT_HUB: Mutex<Option<InterruptHub>> = Mutex::new(None);

/// Ctrl+C を購読者へ配る InterruptSource
#[derive(Clone, Debug)]
pub struct SigintSource {
    hub: InterruptHub,
}

impl SigintSource {
    /// SIGINT ハンドラを登録する（初回のみ。2 回目以降は同じ hub を共有する）。
    /// 他のコードが先に ctrlc ハンドラを登録していた場合は Err。
    ///
    /// 購読が 1 つも無いときに届いた Ctrl+C は `UNHANDLED_INTERRUPT_EXIT_CODE` で即終了する。
    pub fn install() -> Result<Self, ctrlc::Error> {
        let mut slot = SIGINT_HUB
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(hub) = slot.as_ref() {
            return Ok(Self { hub: hub.clone() });
        }
        let hub = InterruptHub::new();
        let handler_hub = hub.clone();
        ctrlc::set_handler(move || {
            if handler_hub.notify() == 0 {
                std::process::exit(UNHANDLED_INTERRUPT_EXIT_CODE);
            }
        })?;
        *slot = Some(hub.clone());
        Ok(Self { hub })
    }

    pub fn hub(&self) -> &InterruptHub {
        &self.hub
    }
}

impl InterruptSource for SigintSource {
    fn subscribe(&self) -> InterruptSubscription {
        self.hub.subscribe()
    }
}
