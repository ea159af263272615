/*!

A CHIP-8 virtual machine as specified at https://en.wikipedia.org/wiki/CHIP-8.

# Terminal Frontend

If you want to try the emulator on some programs, there is a ready-to-use implementation
you can run by using `cargo run --release --bin chip8 -- <program>`.
The keypad is mapped onto the left side of the keyboard:

```text
1 2 3 4        1 2 3 C
Q W E R   ->   4 5 6 D
A S D F        7 8 9 E
Z X C V        A 0 B F
```

Press Escape to quit.

# Library

The library is only the machine itself. It never touches a screen, a speaker or a keyboard:
the host loads a program, steps the machine, ticks its timers at 60 Hz, feeds it key events
and reads the framebuffer back.

```rust
use chip8_vm::emulator::Emulator;

// Load a program at address 0x200.
let program = [
    0x60, 0x05, // V0 = 5
    0xF0, 0x29, // I = address of the glyph for V0
    0xD1, 0x15, // Draw 5 rows at (V1, V1)
];
let mut emulator = Emulator::from_program(&program)?;
for _ in 0..3 {
    emulator.step()?;
}
assert!(!emulator.display().is_blank());
emulator.tick_timers();
# Ok::<(), Box<dyn std::error::Error>>(())
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip8_vm::emulator::Emulator;
use chip8_vm::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::new();

// Execute instructions manually
emulator.execute_single(Instruction::ClearScreen)?;

// Or many sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
])?;
assert_eq!(35, emulator.register(Reg(0xB)));
# Ok::<(), Box<dyn std::error::Error>>(())
```

## Waiting for keys

The `FX0A` instruction suspends the machine until a key is *released*.
While suspended, `step` does nothing; the host keeps rendering and ticking
timers, and the next `release_key` stores the key and resumes execution.

```rust
use chip8_vm::emulator::Emulator;
use chip8_vm::emulator::instruction::Reg;

let mut emulator = Emulator::from_program(&[0xF3, 0x0A])?;
emulator.step()?;
assert_eq!(Some(Reg(3)), emulator.waiting_for());

emulator.press_key(0xC);
assert!(emulator.is_waiting_for_key());
emulator.release_key(0xC);
assert_eq!(0xC, emulator.register(Reg(3)));
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

pub mod emulator;

pub use emulator::Emulator;
