//! relay / consumer 1 回分の状態

/// 1 回の呼び出しの間だけ生きるカウンタ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayState {
    pub interrupts_received: u32,
    pub error_seen: bool,
}

impl RelayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1 回目の割り込みを受けて「今の作業の後に中断」を待っている状態か
    pub fn abort_requested(&self) -> bool {
        self.interrupts_received > 0
    }

    /// 割り込みを 1 回記録し、強制終了すべきなら true
    pub fn record_interrupt(&mut self) -> bool {
        self.interrupts_received += 1;
        self.interrupts_received > 1
    }

    pub fn record_failure(&mut self) {
        self.error_seen = true;
    }

    /// 失敗も割り込みも無ければ成功
    pub fn outcome(&self) -> bool {
        !self.error_seen && !self.abort_requested()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state_succeeds() {
        let state = RelayState::new();
        assert!(state.outcome());
        assert!(!state.abort_requested());
    }

    #[test]
    fn test_first_interrupt_requests_abort() {
        let mut state = RelayState::new();
        assert!(!state.record_interrupt());
        assert!(state.abort_requested());
        assert!(!state.outcome());
        assert!(state.record_interrupt());
    }

    #[test]
    fn test_failure_marks_outcome() {
        let mut state = RelayState::new();
        state.record_failure();
        assert!(!state.outcome());
        assert!(!state.abort_requested());
    }
}
