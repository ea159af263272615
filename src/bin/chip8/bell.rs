/// Decides on which frames the terminal bell rings.
///
/// A terminal bell is a single short beep, so it is repeated every
/// `interval` frames for as long as the sound timer runs.
pub struct Bell {
    interval: u32,
    frames_since_ring: Option<u32>,
}

impl Bell {
    pub fn new(interval: u32) -> Bell {
        Bell {
            interval: interval.max(1),
            frames_since_ring: None,
        }
    }

    /// Advance one frame. Returns `true` if the bell should ring now.
    pub fn frame(&mut self, sound_active: bool) -> bool {
        if !sound_active {
            self.frames_since_ring = None;
            return false;
        }
        match self.frames_since_ring {
            Some(frames) if frames + 1 < self.interval => {
                self.frames_since_ring = Some(frames + 1);
                false
            }
            _ => {
                self.frames_since_ring = Some(0);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn rings(bell: &mut Bell, frames: &[bool]) -> Vec<bool> {
        frames.iter().map(|&active| bell.frame(active)).collect()
    }

    #[test]
    fn rings_when_sound_starts() {
        let mut bell = Bell::new(3);
        assert_eq!(vec![false, true], rings(&mut bell, &[false, true]));
    }

    #[test]
    fn rings_again_while_sound_lasts() {
        let mut bell = Bell::new(3);
        assert_eq!(
            vec![true, false, false, true, false, false, true],
            rings(&mut bell, &[true; 7])
        );
    }

    #[test]
    fn silence_resets_the_cadence() {
        let mut bell = Bell::new(3);
        assert_eq!(
            vec![true, false, false, true, false],
            rings(&mut bell, &[true, true, false, true, true])
        );
    }

    #[test]
    fn zero_interval_rings_every_frame() {
        let mut bell = Bell::new(0);
        assert_eq!(vec![true, true], rings(&mut bell, &[true, true]));
    }
}
