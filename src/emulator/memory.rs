use super::error::LoadError;

pub const MEM_SIZE: usize = 4096;
pub const PROGRAM_START: u16 = 0x200;
pub const GLYPH_SIZE: u16 = 5;

/// Every address an instruction produces is cut down to 12 bits.
pub const ADDR_MASK: u16 = 0x0FFF;

const FONT_START: u16 = 0;
const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// The 4 KiB address space, with the font in the first 80 bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: [u8; MEM_SIZE],
}

impl Memory {
    pub fn new() -> Memory {
        let mut bytes = [0; MEM_SIZE];
        let font_start = FONT_START as usize;
        bytes[font_start..font_start + FONT.len()].copy_from_slice(&FONT);
        Memory { bytes }
    }

    /// Largest program that fits above `PROGRAM_START`.
    pub const fn capacity() -> usize {
        MEM_SIZE - PROGRAM_START as usize
    }

    /// Copy a program into memory at 0x200.
    pub fn load(&mut self, program: &[u8]) -> Result<(), LoadError> {
        if program.len() > Self::capacity() {
            return Err(LoadError::TooLarge {
                size: program.len(),
                capacity: Self::capacity(),
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + program.len()].copy_from_slice(program);
        log::debug!("Loaded {} bytes at {:#05x}", program.len(), PROGRAM_START);
        Ok(())
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[(addr & ADDR_MASK) as usize]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[(addr & ADDR_MASK) as usize] = value;
    }

    /// Read the big-endian word at `addr`, wrapping past the top of memory.
    pub fn read_word(&self, addr: u16) -> u16 {
        u16::from_be_bytes([self.read(addr), self.read(addr.wrapping_add(1))])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

/// Address of the built-in glyph for the low nibble of `digit`.
pub fn font_address(digit: u8) -> u16 {
    FONT_START + GLYPH_SIZE * u16::from(digit & 0xF)
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn font_occupies_first_80_bytes() {
        let memory = Memory::new();
        assert_eq!(&FONT[..], &memory.as_slice()[..80]);
        assert!(memory.as_slice()[80..].iter().all(|b| *b == 0));
    }

    #[test]
    fn program_is_loaded_at_0x200() {
        let mut memory = Memory::new();
        memory.load(&[0x12, 0x34, 0x56]).unwrap();
        assert_eq!(0x1234, memory.read_word(0x200));
        assert_eq!(0x56, memory.read(0x202));
        assert_eq!(0, memory.read(0x203));
    }

    #[test]
    fn program_filling_all_memory_is_accepted() {
        let mut memory = Memory::new();
        let program = vec![0xAB; Memory::capacity()];
        memory.load(&program).unwrap();
        assert_eq!(0xAB, memory.read(0xFFF));
    }

    #[test]
    fn oversized_program_is_rejected() {
        let mut memory = Memory::new();
        let program = vec![0xAB; Memory::capacity() + 1];
        assert_eq!(
            Err(LoadError::TooLarge { size: 3585, capacity: 3584 }),
            memory.load(&program)
        );
        // Nothing was written
        assert_eq!(0, memory.read(0x200));
    }

    #[test]
    fn addresses_wrap_at_12_bits() {
        let mut memory = Memory::new();
        memory.write(0x1205, 0x77);
        assert_eq!(0x77, memory.read(0x205));
        memory.write(0xFFF, 0x12);
        memory.write(0x000, 0x34);
        assert_eq!(0x1234, memory.read_word(0xFFF));
    }

    #[test]
    fn glyphs_are_five_bytes_apart() {
        assert_eq!(0, font_address(0));
        assert_eq!(5, font_address(1));
        assert_eq!(75, font_address(0xF));
        assert_eq!(10, font_address(0x32));
    }
}
