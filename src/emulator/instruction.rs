use super::opcode::Opcode;
use std::fmt;

/// A wrapper for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - NN: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
/// - PC: Program counter
/// - I: 16 bit register for memory address
/// - VN: One of the 16 available variables (register identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen, // 00E0
    Return, // 00EE
    Goto(Addr), // 1NNN
    Call(Addr), // 2NNN
    IfRegEqConst(Reg, Const), // 3XNN
    IfRegNeqConst(Reg, Const), // 4XNN
    IfRegEqReg(Reg, Reg), // 5XY_
    SetRegToConst(Reg, Const), // 6XNN
    IncRegByConst(Reg, Const), // 7XNN
    SetRegToReg(Reg, Reg), // 8XY0
    BitwiseOr(Reg, Reg), // 8XY1
    BitwiseAnd(Reg, Reg), // 8XY2
    BitwiseXor(Reg, Reg), // 8XY3
    IncRegByReg(Reg, Reg), // 8XY4
    DecRegByReg(Reg, Reg), // 8XY5
    BitshiftRight(Reg, Reg), // 8XY6
    SetVxVyMinusVx(Reg, Reg), // 8XY7
    BitshiftLeft(Reg, Reg), // 8XYE
    IfRegNeqReg(Reg, Reg), // 9XY_
    SetI(Addr), // ANNN
    SetPcToV0PlusAddr(Addr), // BNNN
    SetVxRand(Reg, Const), // CXNN
    Draw(Reg, Reg, Const), // DXYN
    IfKeyEqVx(Reg), // EX9E
    IfKeyNeqVx(Reg), // EXA1
    SetRegToDelayTimer(Reg), // FX07
    SetRegToGetKey(Reg), // FX0A
    SetDelayTimerToReg(Reg), // FX15
    SetSoundTimerToReg(Reg), // FX18
    AddRegToI(Reg), // FX1E
    SetIToSpriteAddrVx(Reg), // FX29
    SetIToBcdOfReg(Reg), // FX33
    RegDump(Reg), // FX55
    RegLoad(Reg), // FX65
    /// Anything the families above don't recognize. Executes as a no-op.
    Nop(Opcode),
}

type Decoder = fn(Opcode) -> Instruction;
type RegPair = fn(Reg, Reg) -> Instruction;
type RegOnly = fn(Reg) -> Instruction;

/// Primary dispatch, indexed by the high nibble.
const FAMILIES: [Decoder; 16] = [
    decode_system,
    decode_goto,
    decode_call,
    decode_if_eq_const,
    decode_if_neq_const,
    decode_if_eq_reg,
    decode_set_const,
    decode_inc_const,
    decode_arithmetic,
    decode_if_neq_reg,
    decode_set_i,
    decode_jump_offset,
    decode_rand,
    decode_draw,
    decode_key,
    decode_misc,
];

/// Secondary dispatch for the 8XYN family, indexed by the low nibble.
const ARITHMETIC: [Option<RegPair>; 16] = [
    Some(Instruction::SetRegToReg as RegPair),
    Some(Instruction::BitwiseOr as RegPair),
    Some(Instruction::BitwiseAnd as RegPair),
    Some(Instruction::BitwiseXor as RegPair),
    Some(Instruction::IncRegByReg as RegPair),
    Some(Instruction::DecRegByReg as RegPair),
    Some(Instruction::BitshiftRight as RegPair),
    Some(Instruction::SetVxVyMinusVx as RegPair),
    None,
    None,
    None,
    None,
    None,
    None,
    Some(Instruction::BitshiftLeft as RegPair),
    None,
];

/// Secondary dispatch for the EXNN family, keyed by the low byte.
const KEY_OPS: [(u8, RegOnly); 2] = [
    (0x9E, Instruction::IfKeyEqVx as RegOnly),
    (0xA1, Instruction::IfKeyNeqVx as RegOnly),
];

/// Secondary dispatch for the FXNN family, keyed by the low byte.
const MISC_OPS: [(u8, RegOnly); 9] = [
    (0x07, Instruction::SetRegToDelayTimer as RegOnly),
    (0x0A, Instruction::SetRegToGetKey as RegOnly),
    (0x15, Instruction::SetDelayTimerToReg as RegOnly),
    (0x18, Instruction::SetSoundTimerToReg as RegOnly),
    (0x1E, Instruction::AddRegToI as RegOnly),
    (0x29, Instruction::SetIToSpriteAddrVx as RegOnly),
    (0x33, Instruction::SetIToBcdOfReg as RegOnly),
    (0x55, Instruction::RegDump as RegOnly),
    (0x65, Instruction::RegLoad as RegOnly),
];

impl Instruction {
    pub fn from_u16(value: u16) -> Instruction {
        Instruction::decode(Opcode(value))
    }

    pub fn from_two_u8(left: u8, right: u8) -> Instruction {
        Instruction::decode(Opcode::from_two_u8(left, right))
    }

    pub fn decode(opcode: Opcode) -> Instruction {
        FAMILIES[opcode.high() as usize](opcode)
    }
}

fn lookup(table: &[(u8, RegOnly)], opcode: Opcode) -> Instruction {
    table
        .iter()
        .find(|(key, _)| *key == opcode.nn())
        .map_or(Instruction::Nop(opcode), |(_, make)| make(Reg(opcode.x())))
}

fn decode_system(opcode: Opcode) -> Instruction {
    match opcode.0 {
        0x00E0 => Instruction::ClearScreen,
        0x00EE => Instruction::Return,
        _ => Instruction::Nop(opcode),
    }
}

fn decode_goto(opcode: Opcode) -> Instruction {
    Instruction::Goto(Addr(opcode.nnn()))
}

fn decode_call(opcode: Opcode) -> Instruction {
    Instruction::Call(Addr(opcode.nnn()))
}

fn decode_if_eq_const(opcode: Opcode) -> Instruction {
    Instruction::IfRegEqConst(Reg(opcode.x()), Const(opcode.nn()))
}

fn decode_if_neq_const(opcode: Opcode) -> Instruction {
    Instruction::IfRegNeqConst(Reg(opcode.x()), Const(opcode.nn()))
}

fn decode_if_eq_reg(opcode: Opcode) -> Instruction {
    Instruction::IfRegEqReg(Reg(opcode.x()), Reg(opcode.y()))
}

fn decode_set_const(opcode: Opcode) -> Instruction {
    Instruction::SetRegToConst(Reg(opcode.x()), Const(opcode.nn()))
}

fn decode_inc_const(opcode: Opcode) -> Instruction {
    Instruction::IncRegByConst(Reg(opcode.x()), Const(opcode.nn()))
}

fn decode_arithmetic(opcode: Opcode) -> Instruction {
    match ARITHMETIC[opcode.n() as usize] {
        Some(make) => make(Reg(opcode.x()), Reg(opcode.y())),
        None => Instruction::Nop(opcode),
    }
}

fn decode_if_neq_reg(opcode: Opcode) -> Instruction {
    Instruction::IfRegNeqReg(Reg(opcode.x()), Reg(opcode.y()))
}

fn decode_set_i(opcode: Opcode) -> Instruction {
    Instruction::SetI(Addr(opcode.nnn()))
}

fn decode_jump_offset(opcode: Opcode) -> Instruction {
    Instruction::SetPcToV0PlusAddr(Addr(opcode.nnn()))
}

fn decode_rand(opcode: Opcode) -> Instruction {
    Instruction::SetVxRand(Reg(opcode.x()), Const(opcode.nn()))
}

fn decode_draw(opcode: Opcode) -> Instruction {
    Instruction::Draw(Reg(opcode.x()), Reg(opcode.y()), Const(opcode.n()))
}

fn decode_key(opcode: Opcode) -> Instruction {
    lookup(&KEY_OPS, opcode)
}

fn decode_misc(opcode: Opcode) -> Instruction {
    lookup(&MISC_OPS, opcode)
}

/// Disassembly in the conventional mnemonic syntax.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Goto(Addr(a)) => write!(f, "JP {:#05x}", a),
            Call(Addr(a)) => write!(f, "CALL {:#05x}", a),
            IfRegEqConst(Reg(x), Const(n)) => write!(f, "SE V{:X}, {:#04x}", x, n),
            IfRegNeqConst(Reg(x), Const(n)) => write!(f, "SNE V{:X}, {:#04x}", x, n),
            IfRegEqReg(Reg(x), Reg(y)) => write!(f, "SE V{:X}, V{:X}", x, y),
            SetRegToConst(Reg(x), Const(n)) => write!(f, "LD V{:X}, {:#04x}", x, n),
            IncRegByConst(Reg(x), Const(n)) => write!(f, "ADD V{:X}, {:#04x}", x, n),
            SetRegToReg(Reg(x), Reg(y)) => write!(f, "LD V{:X}, V{:X}", x, y),
            BitwiseOr(Reg(x), Reg(y)) => write!(f, "OR V{:X}, V{:X}", x, y),
            BitwiseAnd(Reg(x), Reg(y)) => write!(f, "AND V{:X}, V{:X}", x, y),
            BitwiseXor(Reg(x), Reg(y)) => write!(f, "XOR V{:X}, V{:X}", x, y),
            IncRegByReg(Reg(x), Reg(y)) => write!(f, "ADD V{:X}, V{:X}", x, y),
            DecRegByReg(Reg(x), Reg(y)) => write!(f, "SUB V{:X}, V{:X}", x, y),
            BitshiftRight(Reg(x), Reg(y)) => write!(f, "SHR V{:X}, V{:X}", x, y),
            SetVxVyMinusVx(Reg(x), Reg(y)) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            BitshiftLeft(Reg(x), Reg(y)) => write!(f, "SHL V{:X}, V{:X}", x, y),
            IfRegNeqReg(Reg(x), Reg(y)) => write!(f, "SNE V{:X}, V{:X}", x, y),
            SetI(Addr(a)) => write!(f, "LD I, {:#05x}", a),
            SetPcToV0PlusAddr(Addr(a)) => write!(f, "JP V0, {:#05x}", a),
            SetVxRand(Reg(x), Const(n)) => write!(f, "RND V{:X}, {:#04x}", x, n),
            Draw(Reg(x), Reg(y), Const(n)) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            IfKeyEqVx(Reg(x)) => write!(f, "SKP V{:X}", x),
            IfKeyNeqVx(Reg(x)) => write!(f, "SKNP V{:X}", x),
            SetRegToDelayTimer(Reg(x)) => write!(f, "LD V{:X}, DT", x),
            SetRegToGetKey(Reg(x)) => write!(f, "LD V{:X}, K", x),
            SetDelayTimerToReg(Reg(x)) => write!(f, "LD DT, V{:X}", x),
            SetSoundTimerToReg(Reg(x)) => write!(f, "LD ST, V{:X}", x),
            AddRegToI(Reg(x)) => write!(f, "ADD I, V{:X}", x),
            SetIToSpriteAddrVx(Reg(x)) => write!(f, "LD F, V{:X}", x),
            SetIToBcdOfReg(Reg(x)) => write!(f, "LD B, V{:X}", x),
            RegDump(Reg(x)) => write!(f, "LD [I], V{:X}", x),
            RegLoad(Reg(x)) => write!(f, "LD V{:X}, [I]", x),
            Nop(opcode) => write!(f, "NOP ({})", opcode),
        }
    }
}
