//! 1 回のマイグレーション実行を表示するセッション
//!
//! producer を別スレッドで走らせ、割り込み中継 → 端末表示 → 経過時間表示までを束ねる。
//! 開始時刻や設定はグローバルに持たず、この Session が保持する。

use crate::adapter::env::{logger_from_env, session_config_from_env};
use crate::adapter::SigintSource;
use crate::channel::{self, PipeSender};
use crate::domain::SessionConfig;
use crate::ports::outbound::InterruptSource;
use crate::usecase::drain::write_pipe;
use crate::usecase::redirect::Redirector;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::io::{self, Write};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// 経過時間を表示用に整形する（60 秒を超えたら分単位）
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs > 60.0 {
        format!("\n{:.4} minutes\n", secs / 60.0)
    } else {
        format!("\n{:.4} seconds\n", secs)
    }
}

/// 成否をプロセス終了コードにする（強制終了の 5 はここでは使わない）
pub fn exit_code(ok: bool) -> i32 {
    if ok {
        0
    } else {
        1
    }
}

/// 1 回の実行結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub ok: bool,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn exit_code(&self) -> i32 {
        exit_code(self.ok)
    }
}

/// 表示セッション（1 回の実行ごとに作る）
pub struct Session {
    config: SessionConfig,
    logger: Arc<dyn Log>,
    interrupts: Option<Arc<dyn InterruptSource>>,
    started: Instant,
}

impl Session {
    /// 割り込み源なしのセッションを作り、開始時刻を記録する
    pub fn new(config: SessionConfig, logger: Arc<dyn Log>) -> Self {
        Self {
            config,
            logger,
            interrupts: None,
            started: Instant::now(),
        }
    }

    /// 環境変数の設定と Ctrl+C ハンドラでセッションを作る。
    /// ハンドラを登録できなければ割り込みなしで続行する。
    pub fn from_env() -> Self {
        let session = Self::new(session_config_from_env(), logger_from_env());
        match SigintSource::install() {
            Ok(source) => session.with_interrupts(Arc::new(source)),
            Err(e) => {
                session.log(
                    LogRecord::now(LogLevel::Warn, "interrupt handler unavailable")
                        .kind("interrupt")
                        .field("error", serde_json::json!(e.to_string())),
                );
                session
            }
        }
    }

    pub fn with_interrupts(mut self, source: Arc<dyn InterruptSource>) -> Self {
        self.interrupts = Some(source);
        self
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// 標準出力へ表示しながら producer を実行する
    pub fn run<F>(self, producer: F) -> RunReport
    where
        F: FnOnce(PipeSender) + Send + 'static,
    {
        self.run_to(producer, io::stdout())
    }

    /// `out` へ表示しながら producer を実行する。
    /// producer は pipe を閉じる責任を持つ（panic した場合も pipe は閉じられ、失敗扱いになる）。
    pub fn run_to<F, W>(self, producer: F, mut out: W) -> RunReport
    where
        F: FnOnce(PipeSender) + Send + 'static,
        W: Write,
    {
        self.log(LogRecord::now(LogLevel::Info, "run started").kind("lifecycle"));

        let (tx, rx) = channel::new();
        let worker = thread::spawn(move || producer(tx));

        let rendered_ok = match self.interrupts.as_ref().filter(|_| self.config.handle_interrupts) {
            Some(source) => {
                let (out_tx, out_rx) = channel::new();
                let subscription = source.subscribe();
                let redirector = Redirector::new(Arc::clone(&self.logger));
                let relay = thread::spawn(move || {
                    let ok = redirector.wait_and_redirect(
                        Some(&rx),
                        Some(&out_tx),
                        Some(subscription),
                    );
                    out_tx.close(None);
                    ok
                });
                let rendered = write_pipe(Some(&out_rx), &mut out, self.config.render);
                let relayed = relay.join().unwrap_or(false);
                rendered && relayed
            }
            None => write_pipe(Some(&rx), &mut out, self.config.render),
        };

        let producer_ok = worker.join().is_ok();
        if !producer_ok {
            self.log(LogRecord::now(LogLevel::Error, "producer panicked").kind("lifecycle"));
        }

        let report = RunReport {
            ok: rendered_ok && producer_ok,
            elapsed: self.elapsed(),
        };
        if self.config.print_elapsed {
            let _ = write!(out, "{}", format_elapsed(report.elapsed));
            let _ = out.flush();
        }
        self.log(
            LogRecord::now(LogLevel::Info, "run finished")
                .kind("lifecycle")
                .field("ok", serde_json::json!(report.ok))
                .field("elapsed_ms", serde_json::json!(report.elapsed.as_millis() as u64)),
        );
        report
    }

    fn log(&self, record: LogRecord) {
        let _ = self.logger.log(&record.layer("usecase"));
    }
}
