/// Rate at which the host is expected to call [`Timers::tick`].
pub const TIMER_HZ: u32 = 60;

/// The delay and sound countdowns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timers {
    delay: u8,
    sound: u8,
}

impl Timers {
    pub fn new() -> Timers {
        Timers::default()
    }

    /// Count both timers down by one, stopping at zero.
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    pub fn delay(&self) -> u8 {
        self.delay
    }

    pub fn sound(&self) -> u8 {
        self.sound
    }

    pub fn set_delay(&mut self, value: u8) {
        self.delay = value;
    }

    pub fn set_sound(&mut self, value: u8) {
        self.sound = value;
    }

    /// The host should be playing a tone while this is true.
    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}
