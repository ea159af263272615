use super::instruction::Reg;

pub const NUM_KEYS: usize = 16;

/// The 16-key pad and the wait-for-key latch.
///
/// Keys are addressed by pad index `0x0..=0xF`. Indices outside that
/// range are dropped, since translating physical keys is up to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keypad {
    pressed: [bool; NUM_KEYS],
    waiting: Option<Reg>,
}

impl Keypad {
    pub fn new() -> Keypad {
        Keypad::default()
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed[(key & 0xF) as usize]
    }

    pub fn press(&mut self, key: u8) {
        match self.pressed.get_mut(key as usize) {
            Some(state) => *state = true,
            None => log::warn!("Ignoring press of unknown key {:#x}", key),
        }
    }

    /// Mark `key` as released. If a register was waiting for a key,
    /// the latch is cleared and returned with the key that resolved it.
    pub fn release(&mut self, key: u8) -> Option<(Reg, u8)> {
        match self.pressed.get_mut(key as usize) {
            Some(state) => *state = false,
            None => {
                log::warn!("Ignoring release of unknown key {:#x}", key);
                return None;
            }
        }
        self.waiting.take().map(|reg| (reg, key))
    }

    /// Suspend execution until a key is released.
    pub fn wait_for_key(&mut self, reg: Reg) {
        self.waiting = Some(reg);
    }

    pub fn waiting_for(&self) -> Option<Reg> {
        self.waiting
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn press_and_release_update_state() {
        let mut keypad = Keypad::new();
        keypad.press(0xA);
        assert!(keypad.is_pressed(0xA));
        assert!(!keypad.is_pressed(0xB));
        assert_eq!(None, keypad.release(0xA));
        assert!(!keypad.is_pressed(0xA));
    }

    #[test]
    fn only_release_resolves_latch() {
        let mut keypad = Keypad::new();
        keypad.wait_for_key(Reg(3));
        keypad.press(7);
        assert_eq!(Some(Reg(3)), keypad.waiting_for());
        assert_eq!(Some((Reg(3), 7)), keypad.release(7));
        assert_eq!(None, keypad.waiting_for());
    }

    #[test]
    fn latch_resolves_exactly_once() {
        let mut keypad = Keypad::new();
        keypad.wait_for_key(Reg(0));
        assert_eq!(Some((Reg(0), 1)), keypad.release(1));
        assert_eq!(None, keypad.release(2));
    }

    #[test]
    fn release_without_press_still_resolves_latch() {
        let mut keypad = Keypad::new();
        keypad.wait_for_key(Reg(0xE));
        assert_eq!(Some((Reg(0xE), 0xF)), keypad.release(0xF));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut keypad = Keypad::new();
        keypad.wait_for_key(Reg(1));
        keypad.press(0x10);
        assert_eq!(None, keypad.release(0x10));
        assert_eq!(Some(Reg(1)), keypad.waiting_for());
        assert_eq!(Keypad { pressed: [false; NUM_KEYS], waiting: Some(Reg(1)) }, keypad);
    }
}
