//! Rendering layer: all terminal I/O lives here.
//!
//! [`TerminalSurface`] implements the world's [`Surface`] by rasterising
//! every drawn image into a character grid scaled from the 720×480 world
//! canvas.  Images are recognised by their asset path and drawn as a glyph;
//! nothing here reads game state except the overlays.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use pollo_loco::entities::{ImageHandle, Rect};
use pollo_loco::surface::Surface;
use pollo_loco::world::World;

pub const CANVAS_WIDTH: f64 = 720.0;
pub const CANVAS_HEIGHT: f64 = 480.0;
/// Ground strip drawn from the front background layer.
const GROUND_TOP: f64 = 430.0;
const BAR_CELLS: usize = 10;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SKY: Color = Color::Reset;
const C_GROUND: Color = Color::DarkYellow;
const C_CLOUD: Color = Color::Grey;
const C_CHARACTER: Color = Color::Yellow;
const C_CHICKEN: Color = Color::White;
const C_BOSS: Color = Color::Red;
const C_COIN: Color = Color::Yellow;
const C_BOTTLE: Color = Color::Magenta;
const C_DEAD: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell { ch: ' ', color: C_SKY };

/// How an asset shows up in the terminal.
enum Glyph {
    Skip,
    Ground,
    /// One row of `ch` through the middle of the box.
    Band(char, Color),
    Fill(char, Color),
    Bar(char, Color, u32),
}

fn glyph_for(path: &str, mirrored: bool) -> Glyph {
    if path.contains("5_background") {
        if path.contains("1_first_layer") {
            Glyph::Ground
        } else if path.contains("4_clouds") {
            Glyph::Band('~', C_CLOUD)
        } else {
            Glyph::Skip
        }
    } else if path.contains("7_statusbars") {
        let pct = trailing_number(path).unwrap_or(0);
        let (ch, color) = if path.contains("health") {
            ('♥', Color::Red)
        } else if path.contains("coin") {
            ('$', C_COIN)
        } else if path.contains("bottle") {
            ('!', C_BOTTLE)
        } else {
            ('B', C_BOSS)
        };
        Glyph::Bar(ch, color, pct)
    } else if path.contains("2_character_pepe") {
        if path.contains("5_dead") {
            Glyph::Fill('x', C_DEAD)
        } else if mirrored {
            Glyph::Fill('◄', C_CHARACTER)
        } else {
            Glyph::Fill('►', C_CHARACTER)
        }
    } else if path.contains("4_enemie_boss_chicken") {
        let color = if path.contains("5_dead") { C_DEAD } else { C_BOSS };
        Glyph::Fill('#', color)
    } else if path.contains("chicken_") {
        if path.contains("2_dead") {
            Glyph::Band('_', C_DEAD)
        } else if path.contains("chicken_small") {
            Glyph::Fill('c', C_CHICKEN)
        } else {
            Glyph::Fill('C', C_CHICKEN)
        }
    } else if path.contains("8_coin") {
        Glyph::Band('o', C_COIN)
    } else if path.contains("6_salsa_bottle") {
        Glyph::Fill('i', C_BOTTLE)
    } else {
        Glyph::Fill('?', C_HINT)
    }
}

/// `.../blue/60.png` → 60, `.../orange40.png` → 40.
fn trailing_number(path: &str) -> Option<u32> {
    let stem = path.strip_suffix(".png")?;
    let digits: String = stem
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    digits.parse().ok()
}

// ── Surface ───────────────────────────────────────────────────────────────────

pub struct TerminalSurface {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
    offset_x: f64,
}

impl TerminalSurface {
    pub fn new(cols: u16, rows: u16) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cells: vec![BLANK; cols as usize * rows as usize],
            offset_x: 0.0,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        if (cols, rows) != (self.cols, self.rows) {
            *self = Self::new(cols, rows);
        }
    }

    fn col(&self, x: f64) -> i32 {
        ((x + self.offset_x) * f64::from(self.cols) / CANVAS_WIDTH).floor() as i32
    }

    fn row(&self, y: f64) -> i32 {
        (y * f64::from(self.rows) / CANVAS_HEIGHT).floor() as i32
    }

    fn put(&mut self, col: i32, row: i32, cell: Cell) {
        if col < 0 || row < 0 || col >= i32::from(self.cols) || row >= i32::from(self.rows) {
            return;
        }
        let index = row as usize * self.cols as usize + col as usize;
        self.cells[index] = cell;
    }

    fn fill(&mut self, dest: Rect, cell: Cell) {
        let (c0, c1) = (self.col(dest.x), self.col(dest.right()).max(self.col(dest.x) + 1));
        let (r0, r1) = (self.row(dest.y), self.row(dest.bottom()).max(self.row(dest.y) + 1));
        for row in r0..r1 {
            for col in c0..c1 {
                self.put(col, row, cell);
            }
        }
    }

    fn band(&mut self, dest: Rect, cell: Cell) {
        let row = self.row(dest.y + dest.height / 2.0);
        let (c0, c1) = (self.col(dest.x), self.col(dest.right()).max(self.col(dest.x) + 1));
        for col in c0..c1 {
            self.put(col, row, cell);
        }
    }

    fn text(&mut self, col: i32, row: i32, text: &str, color: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, Cell { ch, color });
        }
    }

    /// Centered message box over the frame.
    pub fn overlay(&mut self, lines: &[&str], color: Color) {
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32;
        let top = i32::from(self.rows) / 2 - lines.len() as i32 / 2;
        let left = (i32::from(self.cols) - width) / 2;
        for (i, line) in lines.iter().enumerate() {
            let padded = format!("{:^width$}", line, width = width as usize);
            self.text(left, top + i as i32, &padded, color);
        }
    }

    pub fn hint(&mut self, text: &str) {
        let row = i32::from(self.rows) - 1;
        self.text(1, row, text, C_HINT);
    }

    /// Flush the grid to the terminal.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let mut color = None;
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            for cell in &self.cells[start..start + self.cols as usize] {
                if color != Some(cell.color) {
                    out.queue(style::SetForegroundColor(cell.color))?;
                    color = Some(cell.color);
                }
                out.queue(Print(cell.ch))?;
            }
        }
        out.queue(style::ResetColor)?;
        out.flush()
    }
}

impl Surface for TerminalSurface {
    fn clear(&mut self) {
        self.cells.fill(BLANK);
        self.offset_x = 0.0;
    }

    fn translate(&mut self, dx: f64) {
        self.offset_x += dx;
    }

    fn draw_image(&mut self, image: &ImageHandle, dest: Rect, mirrored: bool) {
        match glyph_for(image.path(), mirrored) {
            Glyph::Skip => {}
            Glyph::Ground => {
                let top = dest.y.max(GROUND_TOP);
                let strip = Rect::new(dest.x, top, dest.width, dest.bottom() - top);
                self.fill(strip, Cell { ch: '▒', color: C_GROUND });
            }
            Glyph::Band(ch, color) => self.band(dest, Cell { ch, color }),
            Glyph::Fill(ch, color) => self.fill(dest, Cell { ch, color }),
            Glyph::Bar(ch, color, pct) => {
                let filled = (pct as usize * BAR_CELLS) / 100;
                let (full, empty) = ("█".repeat(filled), "░".repeat(BAR_CELLS - filled));
                let bar = format!("{} {}{}", ch, full, empty);
                let (col, row) = (self.col(dest.x), self.row(dest.y));
                self.text(col, row, &bar, color);
            }
        }
    }
}

// ── Frames ────────────────────────────────────────────────────────────────────

/// Render one complete frame of a running or finished world.
pub fn render<W: Write>(
    out: &mut W,
    surface: &mut TerminalSurface,
    world: &World,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    surface.resize(cols, rows);
    world.draw(surface);

    if world.is_game_over() {
        surface.overlay(&["GAME OVER", "", "R / Enter : restart   Q : quit"], Color::Red);
    } else if world.has_won() {
        surface.overlay(&["YOU WIN!", "", "R / Enter : restart   Q : quit"], Color::Green);
    } else {
        let sound = if world.is_muted() { "off" } else { "on" };
        surface.hint(&format!(
            "← → : walk   SPACE : jump   D : throw   M : sound ({})   Q : quit",
            sound
        ));
    }
    surface.present(out)
}

/// The start screen shown before the first session.
pub fn render_start<W: Write>(out: &mut W, surface: &mut TerminalSurface) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    surface.resize(cols, rows);
    surface.clear();
    surface.overlay(
        &[
            "EL POLLO LOCO",
            "",
            "ENTER : start",
            "← → : walk   SPACE : jump   D : throw bottle",
            "M : sound on/off   Q : quit",
        ],
        Color::Yellow,
    );
    surface.present(out)
}
