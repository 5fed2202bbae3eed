//! Input debouncing
//!
//! The browser delivers a stream of keydown events while a key is held.
//! Only the first press of a hold counts; pointer presses always count.
//! Presses are queued so each tick consumes at most one.

/// Most presses kept waiting for a tick
///
/// A tick takes one press, and one press is at most one phase transition.
/// Two presses inside one frame still flap twice over two ticks; a third
/// is dropped so a burst of clicks can't flap for several frames after
/// the player stopped.
const MAX_PENDING: u8 = 2;

#[derive(Debug, Clone, Default)]
pub struct InputGate {
    key_held: bool,
    pending: u8,
}

impl InputGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key pressed; `repeat` is the platform's auto-repeat flag
    ///
    /// Returns whether the press was accepted.
    pub fn key_down(&mut self, repeat: bool) -> bool {
        if repeat || self.key_held {
            return false;
        }
        self.key_held = true;
        self.push();
        true
    }

    pub fn key_up(&mut self) {
        self.key_held = false;
    }

    /// Click or tap
    pub fn pointer_down(&mut self) -> bool {
        self.push();
        true
    }

    /// Take one queued press for this tick
    pub fn take(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }

    /// Drop queued presses and release the key (e.g. when focus is lost)
    pub fn clear(&mut self) {
        self.pending = 0;
        self.key_held = false;
    }

    fn push(&mut self) {
        self.pending = (self.pending + 1).min(MAX_PENDING);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_key_counts_once() {
        let mut gate = InputGate::new();
        assert!(gate.key_down(false));
        assert!(!gate.key_down(true));
        // Some platforms repeat without setting the flag
        assert!(!gate.key_down(false));
        assert!(gate.take());
        assert!(!gate.take());

        gate.key_up();
        assert!(gate.key_down(false));
        assert!(gate.take());
    }

    #[test]
    fn test_burst_is_capped_at_two() {
        let mut gate = InputGate::new();
        gate.pointer_down();
        gate.pointer_down();
        gate.pointer_down();
        assert!(gate.take());
        assert!(gate.take());
        assert!(!gate.take());
    }

    #[test]
    fn test_clear() {
        let mut gate = InputGate::new();
        gate.key_down(false);
        gate.clear();
        assert!(!gate.take());
        assert!(gate.key_down(false));
    }

    #[test]
    fn test_focus_loss_releases_held_key() {
        let mut gate = InputGate::new();
        assert!(gate.key_down(false));
        assert!(gate.take());
        // Window loses focus with the key down; no keyup ever arrives
        gate.clear();
        assert!(gate.key_down(false));
        assert!(gate.take());
    }
}
