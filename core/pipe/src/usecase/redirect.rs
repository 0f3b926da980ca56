//! 割り込みを見ながら pipe を別の pipe へ中継する
//!
//! 1 回目の割り込み: producer は止めず（実行中のマイグレーションを途中で切らない）、
//! 警告を 1 行だけ下流へ流す。結果は失敗扱いになる。
//! 2 回目の割り込み: その場で `process::exit(FORCE_QUIT_EXIT_CODE)`。
//! 残りのドレイン・購読解除・接続の後始末は一切行わない（最終手段）。

use crate::channel::{PipeReceiver, PipeSender};
use crate::domain::{Message, RelayState};
use crate::ports::outbound::InterruptSubscription;
use common::adapter::NoopLog;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use crossbeam_channel::select;
use std::sync::Arc;

/// 1 回目の割り込みで下流へ流す警告（先頭の空白は端末に出る `^C` との区切り）
pub const ABORT_WARNING: &str = " Aborting after this migration ... Hit again to force quit.";

/// 2 回目の割り込みで使う終了コード。他の失敗経路では使わない
pub const FORCE_QUIT_EXIT_CODE: i32 = 5;

/// select で待った結果
enum Event {
    Interrupt,
    InterruptsGone,
    Item(Message),
    Closed,
}

/// ログ出力付きの中継
pub struct Redirector {
    logger: Arc<dyn Log>,
}

impl Default for Redirector {
    fn default() -> Self {
        Self::new(Arc::new(NoopLog))
    }
}

impl Redirector {
    pub fn new(logger: Arc<dyn Log>) -> Self {
        Self { logger }
    }

    /// `pipe` が閉じられるまで `redirect` へ中継し、Failure も割り込みも無ければ true。
    ///
    /// `pipe` か `redirect` が無ければ何もせず true を返す（割り込み源が無い経路でも同じ呼び方ができる）。
    /// `interrupts` は戻るときに drop され購読解除される。強制終了経路だけは解除しない。
    pub fn wait_and_redirect(
        &self,
        pipe: Option<&PipeReceiver>,
        redirect: Option<&PipeSender>,
        interrupts: Option<InterruptSubscription>,
    ) -> bool {
        let interrupts = interrupts.unwrap_or_else(InterruptSubscription::never);
        let (pipe, redirect) = match (pipe, redirect) {
            (Some(p), Some(r)) => (p, r),
            _ => return true,
        };

        let mut state = RelayState::new();
        let mut downstream_open = true;
        let mut interrupts_open = true;
        let never = crossbeam_channel::never();

        loop {
            let interrupt_rx = if interrupts_open { interrupts.receiver() } else { &never };
            let event = select! {
                recv(interrupt_rx) -> signal => match signal {
                    Ok(()) => Event::Interrupt,
                    Err(_) => Event::InterruptsGone,
                },
                recv(pipe.raw()) -> item => match item {
                    Ok(msg) => Event::Item(msg),
                    Err(_) => Event::Closed,
                },
            };

            match event {
                Event::Interrupt => {
                    if state.record_interrupt() {
                        self.force_quit(&state);
                    }
                    self.log(
                        LogRecord::now(LogLevel::Warn, "interrupt received")
                            .kind("interrupt")
                            .field("interrupts", serde_json::json!(state.interrupts_received)),
                    );
                    if downstream_open {
                        downstream_open = self.forward(redirect, Message::text(ABORT_WARNING));
                    }
                }
                // 割り込み源が消えた。以後は pipe だけを待つ
                Event::InterruptsGone => interrupts_open = false,
                Event::Item(msg) => {
                    if msg.is_failure() {
                        state.record_failure();
                    }
                    if downstream_open {
                        downstream_open = self.forward(redirect, msg);
                    }
                }
                Event::Closed => break,
            }
        }

        state.outcome()
    }

    /// 下流へ送る。下流が消えていたら false（以後は読み捨てて producer を完走させる）
    fn forward(&self, redirect: &PipeSender, msg: Message) -> bool {
        if redirect.send(msg).is_ok() {
            return true;
        }
        self.log(
            LogRecord::now(LogLevel::Warn, "downstream closed; discarding remaining items")
                .kind("pipe"),
        );
        false
    }

    /// 2 回目の割り込み。戻らない。
    /// process::exit はデストラクタを走らせないので、購読も接続もそのまま残して終了する。
    fn force_quit(&self, state: &RelayState) -> ! {
        self.log(
            LogRecord::now(LogLevel::Error, "force quit")
                .kind("interrupt")
                .field("interrupts", serde_json::json!(state.interrupts_received))
                .field("exit_code", serde_json::json!(FORCE_QUIT_EXIT_CODE)),
        );
        std::process::exit(FORCE_QUIT_EXIT_CODE)
    }

    fn log(&self, record: LogRecord) {
        let _ = self.logger.log(&record.layer("usecase"));
    }
}

/// ログ無しの wait_and_redirect
pub fn wait_and_redirect(
    pipe: Option<&PipeReceiver>,
    redirect: Option<&PipeSender>,
    interrupts: Option<InterruptSubscription>,
) -> bool {
    Redirector::default().wait_and_redirect(pipe, redirect, interrupts)
}
