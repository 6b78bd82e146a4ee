//! Hidden debug mode toggle.
//!
//! Clicking the app title five times flips debug mode, which exposes the
//! skip control. It only changes what the presentation layer offers and
//! never touches clock or ledger state.

/// Clicks needed to flip debug mode.
pub const UNLOCK_CLICKS: u32 = 5;

#[derive(Debug, Clone, Default)]
pub struct DebugUnlock {
    clicks: u32,
    enabled: bool,
}

impl DebugUnlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one click. Returns the new mode when this click flipped it.
    pub fn register_click(&mut self) -> Option<bool> {
        self.clicks += 1;
        if self.clicks < UNLOCK_CLICKS {
            return None;
        }
        self.clicks = 0;
        self.enabled = !self.enabled;
        Some(self.enabled)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifth_click_toggles() {
        let mut unlock = DebugUnlock::new();
        for _ in 0..4 {
            assert_eq!(unlock.register_click(), None);
        }
        assert_eq!(unlock.register_click(), Some(true));
        assert!(unlock.is_enabled());
    }

    #[test]
    fn next_five_clicks_toggle_back() {
        let mut unlock = DebugUnlock::new();
        for _ in 0..5 {
            unlock.register_click();
        }
        for _ in 0..4 {
            assert_eq!(unlock.register_click(), None);
        }
        assert_eq!(unlock.register_click(), Some(false));
        assert!(!unlock.is_enabled());
    }
}
