use chip8_vm::emulator::display::{Display, SCREEN_HEIGHT, SCREEN_WIDTH};

use crossterm::event::KeyCode;
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{stdout, Stdout, Write};

const PIXEL_ON: &str = "██";
const PIXEL_OFF: &str = "  ";

/// A terminal showing the framebuffer inside a box, two columns per pixel.
pub struct TerminalScreen {
    stdout: Stdout,
    cells: [[bool; SCREEN_WIDTH]; SCREEN_HEIGHT],
}

impl TerminalScreen {
    pub fn new() -> crossterm::Result<TerminalScreen> {
        let mut stdout = stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;

        let bottom = SCREEN_HEIGHT + 1;
        let right = 2 * SCREEN_WIDTH + 1;
        for y in 0..=bottom {
            for x in 0..=right {
                let c = if y == 0 && x == 0 {
                    '┏'
                } else if y == 0 && x == right {
                    '┓'
                } else if y == bottom && x == 0 {
                    '┗'
                } else if y == bottom && x == right {
                    '┛'
                } else if y == 0 || y == bottom {
                    '━'
                } else if x == 0 || x == right {
                    '┃'
                } else {
                    continue;
                };
                queue!(stdout, cursor::MoveTo(x as u16, y as u16), Print(c))?;
            }
        }
        stdout.flush()?;

        Ok(TerminalScreen {
            stdout,
            cells: [[false; SCREEN_WIDTH]; SCREEN_HEIGHT],
        })
    }

    /// Redraw the pixels that changed since the last call.
    pub fn render(&mut self, display: &Display) -> crossterm::Result<()> {
        for (y, row) in display.rows().iter().enumerate() {
            for (x, &state) in row.iter().enumerate() {
                let old_state = &mut self.cells[y][x];
                if *old_state != state {
                    *old_state = state;
                    queue!(
                        self.stdout,
                        cursor::MoveTo(2 * x as u16 + 1, y as u16 + 1),
                        Print(if state { PIXEL_ON } else { PIXEL_OFF })
                    )?;
                }
            }
        }
        self.stdout.flush()?;
        Ok(())
    }

    /// Ring the terminal bell.
    pub fn beep(&mut self) -> crossterm::Result<()> {
        queue!(self.stdout, Print('\x07'))?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TerminalScreen {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

/// Map the conventional keyboard layout onto the pad:
///
/// ```text
/// 1 2 3 4        1 2 3 C
/// Q W E R   ->   4 5 6 D
/// A S D F        7 8 9 E
/// Z X C V        A 0 B F
/// ```
pub fn key_to_pad(key: KeyCode) -> Option<u8> {
    let c = match key {
        KeyCode::Char(c) => c.to_ascii_lowercase(),
        _ => return None,
    };
    let pad = match c {
        '1' => 0x1,
        '2' => 0x2,
        '3' => 0x3,
        '4' => 0xC,
        'q' => 0x4,
        'w' => 0x5,
        'e' => 0x6,
        'r' => 0xD,
        'a' => 0x7,
        's' => 0x8,
        'd' => 0x9,
        'f' => 0xE,
        'z' => 0xA,
        'x' => 0x0,
        'c' => 0xB,
        'v' => 0xF,
        _ => return None,
    };
    Some(pad)
}
