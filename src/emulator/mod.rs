//! The CHIP-8 emulator as described at
//! https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

pub mod display;
pub mod error;
pub mod input;
pub mod instruction;
pub mod memory;
pub mod opcode;
pub mod timers;

use display::Display;
use error::{Fault, LoadError};
use input::Keypad;
use instruction::*;
use memory::{Memory, ADDR_MASK, PROGRAM_START};
use opcode::Opcode;
use timers::Timers;

use rand::{rngs::OsRng, RngCore};
use std::fmt;

pub const NUM_REGISTERS: usize = 16;
pub const STACK_SIZE: usize = 16;
const FLAG: usize = 0xF;
const MAX_SPRITE_HEIGHT: usize = 15;

/// Register index of `x`. Only the low nibble names a register.
fn reg(x: u8) -> usize {
    usize::from(x & 0xF)
}

/// The complete machine state.
///
/// The host drives it by calling [`Emulator::step`] for every instruction,
/// [`Emulator::tick_timers`] at 60 Hz, and [`Emulator::press_key`] /
/// [`Emulator::release_key`] as key events arrive.
#[derive(Clone, PartialEq, Eq)]
pub struct Emulator {
    memory: Memory,
    registers: [u8; NUM_REGISTERS],
    i: u16,
    program_counter: u16,
    stack_pointer: u8,
    stack: [u16; STACK_SIZE],
    display: Display,
    timers: Timers,
    keypad: Keypad,
}

impl fmt::Display for Emulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display, f)
    }
}

impl fmt::Debug for Emulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emulator")
            .field("registers", &self.registers)
            .field("i", &self.i)
            .field("program_counter", &self.program_counter)
            .field("stack_pointer", &self.stack_pointer)
            .field("stack", &self.stack)
            .field("timers", &self.timers)
            .field("keypad", &self.keypad)
            .finish()
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Emulator {
    /// Create a new emulator with the font loaded and nothing else.
    pub fn new() -> Emulator {
        Emulator {
            memory: Memory::new(),
            registers: [0; NUM_REGISTERS],
            i: 0,
            program_counter: PROGRAM_START,
            stack_pointer: 0,
            stack: [0; STACK_SIZE],
            display: Display::new(),
            timers: Timers::new(),
            keypad: Keypad::new(),
        }
    }

    /// Create a new emulator and load `program` into it.
    pub fn from_program(program: &[u8]) -> Result<Emulator, LoadError> {
        let mut emulator = Emulator::new();
        emulator.load(program)?;
        Ok(emulator)
    }

    /// Copy a program into memory at 0x200.
    pub fn load(&mut self, program: &[u8]) -> Result<(), LoadError> {
        self.memory.load(program)
    }

    /// Decode the instruction at the program counter without executing it.
    pub fn current_instruction(&self) -> Instruction {
        Instruction::decode(Opcode(self.memory.read_word(self.program_counter)))
    }

    /// Fetch, decode and execute a single instruction.
    ///
    /// Does nothing while the machine is waiting for a key.
    pub fn step(&mut self) -> Result<(), Fault> {
        if let Some(Reg(x)) = self.keypad.waiting_for() {
            log::trace!("Still waiting for a key for V{:X}", x);
            return Ok(());
        }

        let instruction = self.current_instruction();
        log::trace!("{:#05x}: {}", self.program_counter, instruction);
        self.execute_single(instruction)
    }

    /// Execute instructions in order, stopping at the first fault.
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Result<(), Fault> {
        for instruction in instructions {
            self.execute_single(*instruction)?;
        }
        Ok(())
    }

    /// Execute a single instruction as if it had been fetched from the
    /// program counter.
    pub fn execute_single(&mut self, instruction: Instruction) -> Result<(), Fault> {
        match instruction {
            Instruction::ClearScreen => self.display.clear(),

            // Jump back via the stack, then continue after the call site
            Instruction::Return => {
                self.program_counter = self.pop()?;
            }

            Instruction::Goto(Addr(addr)) => {
                self.program_counter = addr & ADDR_MASK;
                return Ok(());
            }

            // Store the current address on the stack, then jump to the specified address
            Instruction::Call(Addr(addr)) => {
                self.push(self.program_counter)?;
                self.program_counter = addr & ADDR_MASK;
                return Ok(());
            }

            Instruction::IfRegEqConst(Reg(x), Const(n)) => {
                self.skip_if(self.registers[reg(x)] == n);
            }

            Instruction::IfRegNeqConst(Reg(x), Const(n)) => {
                self.skip_if(self.registers[reg(x)] != n);
            }

            Instruction::IfRegEqReg(Reg(x), Reg(y)) => {
                self.skip_if(self.registers[reg(x)] == self.registers[reg(y)]);
            }

            Instruction::SetRegToConst(Reg(x), Const(n)) => {
                self.registers[reg(x)] = n;
            }

            Instruction::IncRegByConst(Reg(x), Const(n)) => {
                self.registers[reg(x)] = self.registers[reg(x)].wrapping_add(n);
            }

            Instruction::SetRegToReg(Reg(x), Reg(y)) => {
                self.registers[reg(x)] = self.registers[reg(y)];
            }

            Instruction::BitwiseOr(Reg(x), Reg(y)) => {
                self.registers[reg(x)] |= self.registers[reg(y)];
                self.set_flag(false);
            }

            Instruction::BitwiseAnd(Reg(x), Reg(y)) => {
                self.registers[reg(x)] &= self.registers[reg(y)];
                self.set_flag(false);
            }

            Instruction::BitwiseXor(Reg(x), Reg(y)) => {
                self.registers[reg(x)] ^= self.registers[reg(y)];
                self.set_flag(false);
            }

            Instruction::IncRegByReg(Reg(x), Reg(y)) => {
                let (sum, carry) =
                    self.registers[reg(x)].overflowing_add(self.registers[reg(y)]);
                self.registers[reg(x)] = sum;
                self.set_flag(carry);
            }

            // VF is 1 when there is no borrow
            Instruction::DecRegByReg(Reg(x), Reg(y)) => {
                let (left, right) = (self.registers[reg(x)], self.registers[reg(y)]);
                self.registers[reg(x)] = left.wrapping_sub(right);
                self.set_flag(left >= right);
            }

            // The shifts read VY and write VX
            Instruction::BitshiftRight(Reg(x), Reg(y)) => {
                let source = self.registers[reg(y)];
                self.registers[reg(x)] = source >> 1;
                self.set_flag(source & 0x01 != 0);
            }

            Instruction::SetVxVyMinusVx(Reg(x), Reg(y)) => {
                let (left, right) = (self.registers[reg(x)], self.registers[reg(y)]);
                self.registers[reg(x)] = right.wrapping_sub(left);
                self.set_flag(right >= left);
            }

            Instruction::BitshiftLeft(Reg(x), Reg(y)) => {
                let source = self.registers[reg(y)];
                self.registers[reg(x)] = source << 1;
                self.set_flag(source & 0x80 != 0);
            }

            Instruction::IfRegNeqReg(Reg(x), Reg(y)) => {
                self.skip_if(self.registers[reg(x)] != self.registers[reg(y)]);
            }

            Instruction::SetI(Addr(addr)) => {
                self.i = addr & ADDR_MASK;
            }

            Instruction::SetPcToV0PlusAddr(Addr(addr)) => {
                self.program_counter = (u16::from(self.registers[0]) + addr) & ADDR_MASK;
                return Ok(());
            }

            Instruction::SetVxRand(Reg(x), Const(n)) => {
                let mut random = [0; 1];
                OsRng.try_fill_bytes(&mut random).map_err(Fault::Entropy)?;
                self.registers[reg(x)] = random[0] & n;
            }

            Instruction::Draw(Reg(x), Reg(y), Const(sprite_height)) => {
                // Get sprite, each row is 8 bits
                let height = (sprite_height as usize).min(MAX_SPRITE_HEIGHT);
                let mut sprite = [0; MAX_SPRITE_HEIGHT];
                for (row, byte) in sprite.iter_mut().enumerate().take(height) {
                    *byte = self.memory.read(self.i.wrapping_add(row as u16));
                }

                let collision = self.display.draw(
                    self.registers[reg(x)],
                    self.registers[reg(y)],
                    &sprite[..height],
                );
                self.set_flag(collision);
            }

            Instruction::IfKeyEqVx(Reg(x)) => {
                self.skip_if(self.keypad.is_pressed(self.registers[reg(x)]));
            }

            Instruction::IfKeyNeqVx(Reg(x)) => {
                self.skip_if(!self.keypad.is_pressed(self.registers[reg(x)]));
            }

            Instruction::SetRegToDelayTimer(Reg(x)) => {
                self.registers[reg(x)] = self.timers.delay();
            }

            // Execution stops until `release_key` resolves the latch
            Instruction::SetRegToGetKey(register) => {
                log::debug!("Waiting for a key for V{:X}", register.0);
                self.keypad.wait_for_key(register);
            }

            Instruction::SetDelayTimerToReg(Reg(x)) => {
                self.timers.set_delay(self.registers[reg(x)]);
            }

            Instruction::SetSoundTimerToReg(Reg(x)) => {
                self.timers.set_sound(self.registers[reg(x)]);
            }

            Instruction::AddRegToI(Reg(x)) => {
                self.i = self.i.wrapping_add(u16::from(self.registers[reg(x)])) & ADDR_MASK;
            }

            // Set i to character address. Each font element is 5 bytes wide.
            Instruction::SetIToSpriteAddrVx(Reg(x)) => {
                self.i = memory::font_address(self.registers[reg(x)]);
            }

            Instruction::SetIToBcdOfReg(Reg(x)) => {
                let value = self.registers[reg(x)];
                self.memory.write(self.i, value / 100);
                self.memory.write(self.i.wrapping_add(1), value / 10 % 10);
                self.memory.write(self.i.wrapping_add(2), value % 10);
            }

            // Dump register values up to Vx
            Instruction::RegDump(Reg(x)) => {
                let x = x & 0xF;
                for reg_no in 0..=x {
                    let addr = self.i.wrapping_add(u16::from(reg_no));
                    self.memory.write(addr, self.registers[reg(reg_no)]);
                }
                self.i = self.i.wrapping_add(u16::from(x) + 1) & ADDR_MASK;
            }

            // Load register values up to Vx
            Instruction::RegLoad(Reg(x)) => {
                let x = x & 0xF;
                for reg_no in 0..=x {
                    let addr = self.i.wrapping_add(u16::from(reg_no));
                    self.registers[reg(reg_no)] = self.memory.read(addr);
                }
                self.i = self.i.wrapping_add(u16::from(x) + 1) & ADDR_MASK;
            }

            Instruction::Nop(opcode) => {
                log::debug!(
                    "Skipping unrecognized opcode {} at {:#05x}",
                    opcode,
                    self.program_counter
                );
            }
        };

        self.advance();
        Ok(())
    }

    /// Count both timers down by one. Call this at 60 Hz.
    pub fn tick_timers(&mut self) {
        self.timers.tick();
    }

    pub fn press_key(&mut self, key: u8) {
        log::debug!("Key pressed: {:x}", key);
        self.keypad.press(key);
    }

    /// Release `key`, storing it in the waiting register if the machine
    /// was waiting for a key.
    pub fn release_key(&mut self, key: u8) {
        log::debug!("Key released: {:x}", key);
        if let Some((Reg(x), key)) = self.keypad.release(key) {
            log::debug!("Resuming with V{:X} = {:x}", x, key);
            self.registers[reg(x)] = key;
        }
    }

    pub fn is_waiting_for_key(&self) -> bool {
        self.keypad.waiting_for().is_some()
    }

    /// The register the machine is waiting to fill with a key, if any.
    pub fn waiting_for(&self) -> Option<Reg> {
        self.keypad.waiting_for()
    }

    pub fn is_key_pressed(&self, key: u8) -> bool {
        self.keypad.is_pressed(key)
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn sound_active(&self) -> bool {
        self.timers.sound_active()
    }

    pub fn delay_timer(&self) -> u8 {
        self.timers.delay()
    }

    pub fn sound_timer(&self) -> u8 {
        self.timers.sound()
    }

    pub fn register(&self, register: Reg) -> u8 {
        self.registers[reg(register.0)]
    }

    pub fn registers(&self) -> &[u8; NUM_REGISTERS] {
        &self.registers
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn stack_pointer(&self) -> u8 {
        self.stack_pointer
    }

    pub fn memory(&self) -> &[u8] {
        self.memory.as_slice()
    }

    fn advance(&mut self) {
        self.program_counter = self.program_counter.wrapping_add(2) & ADDR_MASK;
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.advance();
        }
    }

    fn set_flag(&mut self, flag: bool) {
        self.registers[FLAG] = flag as u8;
    }

    // Slot 0 is never written: the pointer is incremented before storing.
    fn push(&mut self, addr: u16) -> Result<(), Fault> {
        let stack_pointer = self.stack_pointer as usize + 1;
        if stack_pointer >= STACK_SIZE {
            log::warn!("Stack overflow at {:#05x}", self.program_counter);
            return Err(Fault::StackOverflow {
                pc: self.program_counter,
                depth: STACK_SIZE - 1,
            });
        }
        self.stack_pointer = stack_pointer as u8;
        self.stack[stack_pointer] = addr;
        Ok(())
    }

    fn pop(&mut self) -> Result<u16, Fault> {
        if self.stack_pointer == 0 {
            log::warn!("Stack underflow at {:#05x}", self.program_counter);
            return Err(Fault::StackUnderflow { pc: self.program_counter });
        }
        let addr = self.stack[self.stack_pointer as usize];
        self.stack_pointer -= 1;
        Ok(addr)
    }
}
