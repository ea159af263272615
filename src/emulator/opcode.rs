use std::fmt;

/// A raw 16-bit instruction word.
///
/// CHIP-8 instructions are addressed by nibble position, written `HXYN`
/// from the most significant nibble down. The accessors below pull out
/// the fields the instruction set refers to:
/// - `NNN`: the low 12 bits, an address
/// - `NN`: the low byte, a constant
/// - `N`: the low nibble
/// - `X` and `Y`: the second and third nibbles, register identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode(pub u16);

impl Opcode {
    /// Build an opcode from its big-endian byte pair.
    pub fn from_two_u8(left: u8, right: u8) -> Opcode {
        Opcode(u16::from_be_bytes([left, right]))
    }

    /// The instruction family, used for the primary dispatch.
    pub fn high(self) -> u8 {
        (self.0 >> 12) as u8 & 0xF
    }

    pub fn x(self) -> u8 {
        (self.0 >> 8) as u8 & 0xF
    }

    pub fn y(self) -> u8 {
        (self.0 >> 4) as u8 & 0xF
    }

    pub fn n(self) -> u8 {
        self.0 as u8 & 0xF
    }

    pub fn nn(self) -> u8 {
        self.0 as u8
    }

    pub fn nnn(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}
