use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use structopt::StructOpt;

use chip8_vm::emulator::timers::TIMER_HZ;
use chip8_vm::Emulator;

mod bell;
mod crossterm_io;
mod key_manager;
mod key_tracker;

use bell::Bell;
use crossterm_io::TerminalScreen;
use key_manager::{HostInput, KeyManager};
use key_tracker::KeyTracker;

/// One frame renders the screen and ticks the timers once.
const FRAME: Duration = Duration::from_nanos(1_000_000_000 / TIMER_HZ as u64);
const INSTRUCTIONS_PER_FRAME: usize = 10;
const RELEASE_TIMEOUT: Duration = Duration::from_millis(250);
/// Frames between two bells while the sound timer runs.
const BELL_INTERVAL: u32 = 15;

/// Run a CHIP-8 program in the terminal. Press Escape to quit.
#[derive(StructOpt, Debug)]
#[structopt(name = "chip8")]
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

    let key_manager = KeyManager::new();
    let mut screen = TerminalScreen::new()?;

    // Start execution
    let result = run(&mut emulator, &key_manager, &mut screen);

    // Leave the alternate screen before reporting anything
    drop(screen);
    if let Err(e) = &result {
        log::error!("Stopped: {}", e);
    }
    result
}

fn run(
    emulator: &mut Emulator,
    key_manager: &KeyManager,
    screen: &mut TerminalScreen,
) -> anyhow::Result<()> {
    let mut keys = KeyTracker::new(RELEASE_TIMEOUT);
    let mut bell = Bell::new(BELL_INTERVAL);

    loop {
        let frame_start = Instant::now();

        screen.render(emulator.display())?;

        for _ in 0..INSTRUCTIONS_PER_FRAME {
            if emulator.is_waiting_for_key() {
                break;
            }
            emulator.step()?;
        }

        emulator.tick_timers();
        if bell.frame(emulator.sound_active()) {
            screen.beep()?;
        }

        let now = Instant::now();
        for input in key_manager.drain() {
            match input {
                HostInput::Quit => return Ok(()),
                HostInput::Pad(key) => {
                    if keys.press(key, now) {
                        emulator.press_key(key);
                    }
                }
            }
        }
        for key in keys.expire(now) {
            emulator.release_key(key);
        }

        if let Some(rest) = FRAME.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
}
