//! 表示・セッションの設定値

/// 色付け方針
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    Always,
    Never,
    /// 出力先が端末のときだけ色を付ける
    #[default]
    Auto,
}

impl ColorMode {
    /// 出力先が端末かどうかを与えて、実際に色を付けるか決める
    pub fn resolve(self, is_terminal: bool) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => is_terminal,
        }
    }
}

/// TerminalSink の表示設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub color: bool,
}

impl RenderConfig {
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn colored() -> Self {
        Self { color: true }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::plain()
    }
}

/// Session の設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub render: RenderConfig,
    /// 実行中に割り込みを relay で扱うか（false なら producer を直接表示する）
    pub handle_interrupts: bool,
    /// 終了時に経過時間を表示するか
    pub print_elapsed: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            handle_interrupts: true,
            print_elapsed: true,
        }
    }
}
