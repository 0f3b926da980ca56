//! ユースケース: pipe のドレイン・割り込み中継・実行セッション

pub mod drain;
pub mod redirect;
pub mod report;

pub use drain::{drain, read_errors, write_pipe, write_pipe_stdout};
pub use redirect::{wait_and_redirect, Redirector, ABORT_WARNING, FORCE_QUIT_EXIT_CODE};
pub use report::{exit_code, format_elapsed, RunReport, Session};
