use chip8_vm::emulator::input::NUM_KEYS;
use std::time::{Duration, Instant};

/// Keeps track of which pad keys are held down.
///
/// Terminals only report key presses, and repeat them while a key is held.
/// A key counts as released once it hasn't been reported for `timeout`.
pub struct KeyTracker {
    timeout: Duration,
    held: [Option<Instant>; NUM_KEYS],
}

impl KeyTracker {
    pub fn new(timeout: Duration) -> KeyTracker {
        KeyTracker {
            timeout,
            held: [None; NUM_KEYS],
        }
    }

    /// Record a press of `key` at `now`.
    /// Returns `true` if the key wasn't already held.
    pub fn press(&mut self, key: u8, now: Instant) -> bool {
        match self.held.get_mut(key as usize) {
            Some(slot) => slot.replace(now).is_none(),
            None => false,
        }
    }

    /// Release and return every key that has gone quiet for longer than the timeout.
    pub fn expire(&mut self, now: Instant) -> Vec<u8> {
        let timeout = self.timeout;
        let mut released = Vec::new();
        for (key, slot) in self.held.iter_mut().enumerate() {
            if let Some(pressed_at) = *slot {
                if now.saturating_duration_since(pressed_at) >= timeout {
                    *slot = None;
                    released.push(key as u8);
                }
            }
        }
        released
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    const TIMEOUT: Duration = Duration::from_millis(100);

    #[test]
    fn key_is_released_after_timeout() {
        let start = Instant::now();
        let mut tracker = KeyTracker::new(TIMEOUT);
        assert!(tracker.press(0xA, start));
        assert_eq!(Vec::<u8>::new(), tracker.expire(start + Duration::from_millis(50)));
        assert_eq!(vec![0xA], tracker.expire(start + TIMEOUT));
        assert_eq!(Vec::<u8>::new(), tracker.expire(start + 2 * TIMEOUT));
    }

    #[test]
    fn repeated_presses_keep_key_held() {
        let start = Instant::now();
        let mut tracker = KeyTracker::new(TIMEOUT);
        assert!(tracker.press(3, start));
        assert!(!tracker.press(3, start + Duration::from_millis(80)));
        assert_eq!(Vec::<u8>::new(), tracker.expire(start + Duration::from_millis(150)));
        assert_eq!(vec![3], tracker.expire(start + Duration::from_millis(180)));
    }

    #[test]
    fn keys_expire_independently() {
        let start = Instant::now();
        let mut tracker = KeyTracker::new(TIMEOUT);
        tracker.press(1, start);
        tracker.press(2, start + Duration::from_millis(60));
        assert_eq!(vec![1], tracker.expire(start + Duration::from_millis(120)));
        assert_eq!(vec![2], tracker.expire(start + Duration::from_millis(160)));
    }

    #[test]
    fn out_of_range_keys_are_ignored() {
        let start = Instant::now();
        let mut tracker = KeyTracker::new(TIMEOUT);
        assert!(!tracker.press(16, start));
        assert_eq!(Vec::<u8>::new(), tracker.expire(start + TIMEOUT));
    }
}
