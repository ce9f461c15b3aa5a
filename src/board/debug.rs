use std::collections::VecDeque;

use itertools::Itertools as _;

/// Opt-in ring buffer of engine events, for copy-pasting into bug reports.
///
/// Every line is also forwarded to the `log` facade at trace level.
#[derive(Debug, Default)]
pub(crate) struct DebugLog {
    enabled: bool,
    capacity: usize,
    serial: u64,
    lines: VecDeque<String>,
}

impl DebugLog {
    pub(crate) fn new(enabled: bool, capacity: usize) -> Self {
        Self {
            enabled,
            capacity,
            serial: 0,
            lines: VecDeque::new(),
        }
    }

    /// Options are public on the board and may change between events.
    pub(crate) fn configure(&mut self, enabled: bool, capacity: usize) {
        self.enabled = enabled;
        self.capacity = capacity;
    }

    /// Called once per handled gesture or lifecycle call.
    pub(crate) fn next_event(&mut self) {
        self.serial = self.serial.wrapping_add(1);
    }

    pub(crate) fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::trace!("[event {}] {message}", self.serial);
        if !self.enabled {
            return;
        }
        let cap = self.capacity.max(1).min(10_000);
        while self.lines.len() >= cap {
            self.lines.pop_front();
        }
        self.lines
            .push_back(format!("[event {}] {}", self.serial, message));
    }

    pub(crate) fn clear(&mut self) {
        self.lines.clear();
    }

    pub(crate) fn text(&self) -> String {
        self.lines.iter().join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_log_keeps_nothing() {
        let mut log = DebugLog::new(false, 10);
        log.push("hello");
        assert_eq!(log.text(), "");
    }

    #[test]
    fn ring_buffer_drops_oldest() {
        let mut log = DebugLog::new(true, 2);
        for i in 0..3 {
            log.next_event();
            log.push(format!("line {i}"));
        }
        assert_eq!(log.text(), "[event 2] line 1\n[event 3] line 2");
        log.clear();
        assert_eq!(log.text(), "");
    }
}
