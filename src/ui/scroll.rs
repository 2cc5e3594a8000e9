//! Scroll position tracking for the transcript area.
//!
//! Auto-scroll keeps the newest turn in view whenever the transcript
//! changes; any manual scroll away from the bottom takes over until the
//! user returns there.

#[derive(Debug)]
pub struct ScrollState {
    pub offset: u16,
    pub auto_scroll: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            offset: 0,
            auto_scroll: true,
        }
    }
}

impl ScrollState {
    pub fn max_offset(total_lines: u16, available_height: u16) -> u16 {
        total_lines.saturating_sub(available_height)
    }

    /// Snap to the bottom if auto-scroll is on; called after every
    /// transcript change.
    pub fn follow(&mut self, total_lines: u16, available_height: u16) {
        if self.auto_scroll {
            self.offset = Self::max_offset(total_lines, available_height);
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.offset = self.offset.saturating_sub(lines);
        self.auto_scroll = false;
    }

    pub fn scroll_down(&mut self, lines: u16, total_lines: u16, available_height: u16) {
        let max = Self::max_offset(total_lines, available_height);
        self.offset = self.offset.saturating_add(lines).min(max);
        if self.offset >= max {
            self.auto_scroll = true;
        }
    }

    /// Clamp against the current layout; the terminal may have been resized
    /// since the offset was computed.
    pub fn clamped_offset(&self, total_lines: u16, available_height: u16) -> u16 {
        self.offset.min(Self::max_offset(total_lines, available_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_snaps_to_bottom_only_when_auto() {
        let mut scroll = ScrollState::default();
        scroll.follow(30, 10);
        assert_eq!(scroll.offset, 20);

        scroll.scroll_up(5);
        assert!(!scroll.auto_scroll);
        scroll.follow(40, 10);
        assert_eq!(scroll.offset, 15);
    }

    #[test]
    fn scrolling_to_bottom_reenables_auto_scroll() {
        let mut scroll = ScrollState::default();
        scroll.follow(30, 10);
        scroll.scroll_up(3);
        assert!(!scroll.auto_scroll);

        scroll.scroll_down(3, 30, 10);
        assert!(scroll.auto_scroll);
    }

    #[test]
    fn short_transcripts_never_scroll() {
        let mut scroll = ScrollState::default();
        scroll.follow(5, 10);
        assert_eq!(scroll.offset, 0);
        assert_eq!(scroll.clamped_offset(5, 10), 0);
    }

    #[test]
    fn clamp_handles_terminal_growth() {
        let mut scroll = ScrollState::default();
        scroll.follow(30, 10);
        assert_eq!(scroll.offset, 20);
        // Terminal got taller; the stored offset now overshoots.
        assert_eq!(scroll.clamped_offset(30, 25), 5);
    }
}
