use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;

type Cells = [[bool; SCREEN_WIDTH]; SCREEN_HEIGHT];
const EMPTY_SCREEN: Cells = [[false; SCREEN_WIDTH]; SCREEN_HEIGHT];

/// The 64x32 monochrome framebuffer.
///
/// Cells only change through [`Display::clear`] and [`Display::draw`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    cells: Cells,
}

impl Display {
    pub fn new() -> Display {
        Display { cells: EMPTY_SCREEN }
    }

    pub fn clear(&mut self) {
        self.cells = EMPTY_SCREEN;
    }

    /// Whether the pixel at (`x`, `y`) is set. Coordinates wrap.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[y % SCREEN_HEIGHT][x % SCREEN_WIDTH]
    }

    /// The framebuffer as rows of pixels, top row first.
    pub fn rows(&self) -> &Cells {
        &self.cells
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell)
    }

    /// XOR `sprite` onto the screen with its top left corner at (`x`, `y`).
    ///
    /// Each byte is one row of eight pixels, most significant bit leftmost.
    /// The start position is taken modulo the screen size, and every pixel
    /// wraps around the edges independently.
    ///
    /// Returns `true` if any pixel went from set to unset.
    pub fn draw(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let x_coord = x as usize % SCREEN_WIDTH;
        let y_coord = y as usize % SCREEN_HEIGHT;

        let mut any_collisions = false;
        for (dy, &row) in sprite.iter().enumerate() {
            let y = (y_coord + dy) % SCREEN_HEIGHT;
            for dx in 0..8 {
                if row >> (7 - dx) & 1 == 0 {
                    continue;
                }
                let cell = &mut self.cells[y][(x_coord + dx) % SCREEN_WIDTH];
                // Set pixel is unset
                if *cell {
                    any_collisions = true;
                }
                *cell = !*cell;
            }
        }

        any_collisions
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            for cell in row.iter() {
                write!(f, "{}", if *cell { "#" } else { "." })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
