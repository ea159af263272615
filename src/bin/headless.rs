use std::path::PathBuf;

use anyhow::Context;
use structopt::StructOpt;

use chip8_vm::emulator::instruction::{Addr, Instruction};
use chip8_vm::Emulator;

/// Instructions executed between two timer ticks.
const INSTRUCTIONS_PER_TICK: usize = 10;
const MAX_INSTRUCTIONS: usize = 10_000_000;

/// Run a CHIP-8 program without input until it halts, then print the screen.
///
/// The program counts as halted when it jumps to itself or waits for a key.
#[derive(StructOpt)]
#[structopt(name = "headless")]
struct Opt {
    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)
        .with_context(|| format!("could not read {}", opt.input.display()))?;

    // Load instructions into emulator memory
    let mut emulator = Emulator::from_program(&program)?;

    let executed = run(&mut emulator)?;
    log::info!("Stopped after {} instructions", executed);

    print!("{}", emulator);
    Ok(())
}

fn run(emulator: &mut Emulator) -> anyhow::Result<usize> {
    for executed in 0..MAX_INSTRUCTIONS {
        if emulator.is_waiting_for_key() {
            log::info!("Program is waiting for a key");
            return Ok(executed);
        }
        if emulator.current_instruction() == Instruction::Goto(Addr(emulator.program_counter())) {
            log::info!("Program jumps to itself at {:#05x}", emulator.program_counter());
            return Ok(executed);
        }

        emulator.step()?;
        if executed % INSTRUCTIONS_PER_TICK == INSTRUCTIONS_PER_TICK - 1 {
            emulator.tick_timers();
        }
    }

    log::warn!("Giving up after {} instructions", MAX_INSTRUCTIONS);
    Ok(MAX_INSTRUCTIONS)
}
