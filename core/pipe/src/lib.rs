//! マイグレーション進捗の pipe
//!
//! バックグラウンドで走るマイグレーション（producer）が進捗を pipe に流し、
//! 前面の consumer が表示して全体の成否を決める。Ctrl+C は 1 回目で「今の作業の後に中断」、
//! 2 回目で即時終了（終了コード 5）。
//!
//! ```no_run
//! use pipe::{channel, MigrationFile, Session};
//!
//! let report = Session::from_env().run(|tx| {
//!     let _ = tx.send("migrating to version 3");
//!     let _ = tx.send(MigrationFile::up("3_up.sql"));
//!     channel::close(tx, None);
//! });
//! std::process::exit(report.exit_code());
//! ```

pub mod adapter;
pub mod channel;
pub mod domain;
pub mod ports;
pub mod usecase;

#[cfg(test)]
mod tests;

pub use channel::{PipeError, PipeReceiver, PipeSender};
pub use domain::{Direction, Message, MigrationFile};
pub use ports::outbound::{InterruptSource, InterruptSubscription};
pub use usecase::{
    read_errors, wait_and_redirect, write_pipe, write_pipe_stdout, Session, FORCE_QUIT_EXIT_CODE,
};
