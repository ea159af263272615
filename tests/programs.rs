use chip8_vm::emulator::error::Fault;
use chip8_vm::emulator::instruction::{Addr, Instruction, Reg};
use chip8_vm::Emulator;
use pretty_assertions::assert_eq;

/// Step until the program jumps to itself, ticking the timers after every
/// instruction. Returns the number of instructions executed.
fn run_until_halt(emulator: &mut Emulator, limit: usize) -> usize {
    for executed in 0..limit {
        if emulator.current_instruction() == Instruction::Goto(Addr(emulator.program_counter())) {
            return executed;
        }
        emulator.step().unwrap();
        emulator.tick_timers();
    }
    panic!("program did not halt within {} instructions", limit);
}

/// The top left corner of the screen, `width` pixels wide.
fn corner(emulator: &Emulator, width: usize, height: usize) -> Vec<String> {
    emulator
        .to_string()
        .lines()
        .take(height)
        .map(|line| line[..width].to_string())
        .collect()
}

#[test]
fn bcd_digits_are_drawn_by_a_subroutine() {
    let program = [
        0x6A, 0x9D, // 0x200: VA = 157
        0xA3, 0x00, // 0x202: I = 0x300
        0xFA, 0x33, // 0x204: BCD of VA at I
        0xF2, 0x65, // 0x206: load V0..V2 from I
        0x22, 0x10, // 0x208: call 0x210
        0x12, 0x0A, // 0x20A: halt
        0x00, 0x00, // 0x20C
        0x00, 0x00, // 0x20E
        0xF1, 0x29, // 0x210: I = glyph for V1
        0x63, 0x00, // 0x212: V3 = 0
        0x64, 0x00, // 0x214: V4 = 0
        0xD3, 0x45, // 0x216: draw 5 rows at (V3, V4)
        0x00, 0xEE, // 0x218: return
    ];
    let mut emulator = Emulator::from_program(&program).unwrap();

    assert_eq!(10, run_until_halt(&mut emulator, 100));
    assert_eq!(0x20A, emulator.program_counter());
    assert_eq!(0, emulator.stack_pointer());
    assert_eq!(&[1, 5, 7][..], &emulator.registers()[..3]);
    assert_eq!(&[1, 5, 7][..], &emulator.memory()[0x300..0x303]);
    assert_eq!(0, emulator.register(Reg(0xF)));
    assert_eq!(
        vec!["####....", "#.......", "####....", "...#....", "####....", "........"],
        corner(&emulator, 8, 6)
    );
}

#[test]
fn released_key_is_drawn() {
    let program = [
        0xF0, 0x0A, // 0x200: V0 = next released key
        0xF0, 0x29, // 0x202: I = glyph for V0
        0xD1, 0x15, // 0x204: draw 5 rows at (V1, V1)
        0x12, 0x06, // 0x206: halt
    ];
    let mut emulator = Emulator::from_program(&program).unwrap();

    emulator.step().unwrap();
    for _ in 0..10 {
        emulator.step().unwrap();
        emulator.tick_timers();
    }
    emulator.press_key(0xA);
    assert!(emulator.is_key_pressed(0xA));
    assert_eq!(0x202, emulator.program_counter());
    assert!(emulator.display().is_blank());

    emulator.release_key(0xA);
    assert!(!emulator.is_key_pressed(0xA));
    assert_eq!(2, run_until_halt(&mut emulator, 10));
    assert_eq!(
        vec!["####", "#..#", "####", "#..#", "#..#"],
        corner(&emulator, 4, 5)
    );
}

#[test]
fn delay_timer_loop_terminates() {
    let program = [
        0x60, 0x05, // 0x200: V0 = 5
        0xF0, 0x15, // 0x202: delay = V0
        0xF1, 0x07, // 0x204: V1 = delay
        0x31, 0x00, // 0x206: skip if V1 == 0
        0x12, 0x04, // 0x208: jump 0x204
        0x12, 0x0A, // 0x20A: halt
    ];
    let mut emulator = Emulator::from_program(&program).unwrap();

    run_until_halt(&mut emulator, 100);
    assert_eq!(0, emulator.register(Reg(1)));
    assert_eq!(0, emulator.delay_timer());
}

#[test]
fn sound_timer_runs_out() {
    let mut emulator = Emulator::from_program(&[0x60, 0x03, 0xF0, 0x18]).unwrap();
    emulator.step().unwrap();
    emulator.step().unwrap();
    assert!(emulator.sound_active());
    emulator.tick_timers();
    emulator.tick_timers();
    assert!(emulator.sound_active());
    emulator.tick_timers();
    assert!(!emulator.sound_active());
}

#[test]
fn unknown_opcodes_are_skipped() {
    let program = [
        0x81, 0x2F, // unknown arithmetic
        0xE0, 0x00, // unknown key op
        0xF0, 0xFF, // unknown misc op
        0x01, 0x23, // machine code routine
        0x60, 0x01, // V0 = 1
    ];
    let mut emulator = Emulator::from_program(&program).unwrap();
    for _ in 0..5 {
        emulator.step().unwrap();
    }
    assert_eq!(1, emulator.register(Reg(0)));
    assert_eq!(0x20A, emulator.program_counter());
}

#[test]
fn unbounded_recursion_overflows_the_stack() {
    let mut emulator = Emulator::from_program(&[0x22, 0x00]).unwrap();
    for _ in 0..15 {
        emulator.step().unwrap();
    }
    assert_eq!(15, emulator.stack_pointer());
    match emulator.step() {
        Err(Fault::StackOverflow { pc, depth }) => assert_eq!((0x200, 15), (pc, depth)),
        other => panic!("expected a stack overflow, got {:?}", other),
    }
}

#[test]
fn largest_program_loads() {
    let program = vec![0x12; 4096 - 0x200];
    assert!(Emulator::from_program(&program).is_ok());
    assert!(Emulator::from_program(&[0x12; 4096 - 0x200 + 1]).is_err());
}
