//! Terminal frontend: renders the 320x240 device space onto a character
//! grid and turns line input into synthetic touch coordinates.
//!
//! Every `draw_rect` since the last clear is remembered as a tappable
//! region; a `write_text_at` landing inside one becomes its label. The
//! blocking wait then offers the labelled regions as a numbered prompt
//! and reports the chosen region's center, so the engine's hit-testing
//! sees ordinary touch coordinates.

use anyhow::Result;
use pocket_duel_core::frontend::{Color, Frontend};
use pocket_duel_core::layout::{Rect, SCREEN_H, SCREEN_W};
use std::fmt;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

const CELL_W: i32 = 5;
const CELL_H: i32 = 10;
const GRID_W: usize = (SCREEN_W / CELL_W) as usize;
const GRID_H: usize = (SCREEN_H / CELL_H) as usize;

/// Raised when the player closes stdin or types `q`.
#[derive(Debug)]
pub struct QuitRequested;

impl fmt::Display for QuitRequested {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "quit requested")
    }
}

impl std::error::Error for QuitRequested {}

pub struct ConsoleFrontend {
    grid: Vec<Vec<char>>,
    regions: Vec<(Rect, String)>,
    footer: Vec<String>,
}

impl ConsoleFrontend {
    pub fn new() -> Self {
        Self {
            grid: vec![vec![' '; GRID_W]; GRID_H],
            regions: Vec::new(),
            footer: Vec::new(),
        }
    }

    fn set_cell(&mut self, cx: i32, cy: i32, ch: char) {
        if cx >= 0 && (cx as usize) < GRID_W && cy >= 0 && (cy as usize) < GRID_H {
            self.grid[cy as usize][cx as usize] = ch;
        }
    }

    fn fill_cells(&mut self, rect: Rect, ch: char) {
        let x0 = rect.x / CELL_W;
        let y0 = rect.y / CELL_H;
        let x1 = (rect.x + rect.w - 1).max(rect.x) / CELL_W;
        let y1 = (rect.y + rect.h - 1).max(rect.y) / CELL_H;
        for cy in y0..=y1 {
            for cx in x0..=x1 {
                self.set_cell(cx, cy, ch);
            }
        }
    }

    fn labelled_regions(&self) -> Vec<(Rect, &str)> {
        self.regions
            .iter()
            .filter(|(_, label)| !label.is_empty())
            .map(|(rect, label)| (*rect, label.as_str()))
            .collect()
    }

    fn read_input_line(&self) -> Result<String> {
        print!("tap> ");
        io::stdout().flush().ok();
        let mut buf = String::new();
        let read = io::stdin().read_line(&mut buf)?;
        if read == 0 {
            return Err(QuitRequested.into());
        }
        Ok(buf.trim().to_string())
    }
}

impl Default for ConsoleFrontend {
    fn default() -> Self {
        Self::new()
    }
}

fn fill_char(color: Color) -> char {
    match color {
        Color::Black => ' ',
        Color::White => '#',
        Color::Blue => '~',
        Color::Green => 'g',
        Color::Red => 'r',
        Color::Yellow => '*',
        Color::Brown => '=',
        Color::Gray => '%',
        Color::Magenta => 'm',
    }
}

impl Frontend for ConsoleFrontend {
    fn clear_screen(&mut self, color: Color) {
        let ch = fill_char(color);
        for row in &mut self.grid {
            row.fill(ch);
        }
        self.regions.clear();
        self.footer.clear();
    }

    fn draw_rect(&mut self, rect: Rect) {
        let x0 = rect.x / CELL_W;
        let y0 = rect.y / CELL_H;
        let x1 = (rect.x + rect.w) / CELL_W;
        let y1 = (rect.y + rect.h) / CELL_H;
        for cx in x0..=x1 {
            self.set_cell(cx, y0, '-');
            self.set_cell(cx, y1, '-');
        }
        for cy in y0..=y1 {
            self.set_cell(x0, cy, '|');
            self.set_cell(x1, cy, '|');
        }
        self.set_cell(x0, y0, '+');
        self.set_cell(x1, y0, '+');
        self.set_cell(x0, y1, '+');
        self.set_cell(x1, y1, '+');
        self.regions.push((rect, String::new()));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill_cells(rect, fill_char(color));
    }

    fn write_text_at(&mut self, text: &str, x: i32, y: i32) {
        let cy = y / CELL_H;
        let mut cx = x / CELL_W;
        for ch in text.chars() {
            self.set_cell(cx, cy, ch);
            cx += 1;
        }
        // text placed inside an outlined box labels that region
        if let Some((_, label)) = self
            .regions
            .iter_mut()
            .find(|(rect, label)| label.is_empty() && rect.contains(x, y))
        {
            *label = text.to_string();
        }
    }

    fn write_line(&mut self, text: &str) {
        self.footer.push(text.to_string());
    }

    fn present_frame(&mut self) {
        let mut out = String::with_capacity((GRID_W + 1) * (GRID_H + 2));
        out.push('\n');
        for row in &self.grid {
            out.extend(row.iter());
            out.push('\n');
        }
        for line in &self.footer {
            out.push_str(line);
            out.push('\n');
        }
        print!("{out}");
        io::stdout().flush().ok();
    }

    fn poll_touch(&mut self) -> Option<(i32, i32)> {
        // presses arrive through wait_for_press; nothing to sample
        None
    }

    fn sleep_ms(&mut self, ms: u64) {
        thread::sleep(Duration::from_millis(ms));
    }

    fn wait_for_press(&mut self) -> Result<(i32, i32)> {
        let options: Vec<(Rect, String)> = self
            .labelled_regions()
            .into_iter()
            .map(|(rect, label)| (rect, label.to_string()))
            .collect();
        if !options.is_empty() {
            for (idx, (_, label)) in options.iter().enumerate() {
                println!("  [{}] {}", idx + 1, label);
            }
        }

        loop {
            let line = self.read_input_line()?;
            if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
                return Err(QuitRequested.into());
            }
            if line.eq_ignore_ascii_case("y") || line.eq_ignore_ascii_case("yes") {
                return Ok((SCREEN_W / 2, SCREEN_H / 4));
            }
            if line.eq_ignore_ascii_case("n") || line.eq_ignore_ascii_case("no") {
                return Ok((SCREEN_W / 2, 3 * SCREEN_H / 4));
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts.as_slice() {
                [one] => {
                    if let Ok(choice) = one.parse::<usize>() {
                        if choice >= 1 && choice <= options.len() {
                            return Ok(options[choice - 1].0.center());
                        }
                    }
                    // out of range or not a number: an off-screen tap the
                    // caller will discard
                    return Ok((-1, -1));
                }
                [x, y] => {
                    if let (Ok(px), Ok(py)) = (x.parse::<i32>(), y.parse::<i32>()) {
                        return Ok((px, py));
                    }
                    return Ok((-1, -1));
                }
                _ => {
                    println!("enter a button number, `x y` coordinates, y/n, or q");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocket_duel_core::layout::action_button;

    #[test]
    fn text_inside_an_outline_labels_the_region() {
        let mut fe = ConsoleFrontend::new();
        fe.clear_screen(Color::Black);
        let rect = action_button(0);
        fe.draw_rect(rect);
        fe.write_text_at("Jolt (15)", rect.x + 6, rect.y + 12);
        let labelled = fe.labelled_regions();
        assert_eq!(labelled.len(), 1);
        assert_eq!(labelled[0].1, "Jolt (15)");
    }

    #[test]
    fn text_outside_any_outline_labels_nothing() {
        let mut fe = ConsoleFrontend::new();
        fe.clear_screen(Color::Black);
        fe.draw_rect(action_button(0));
        fe.write_text_at("HP: 40/40", 8, 8);
        assert!(fe.labelled_regions().is_empty());
    }

    #[test]
    fn clear_screen_forgets_regions() {
        let mut fe = ConsoleFrontend::new();
        fe.draw_rect(action_button(0));
        fe.write_text_at("Jolt (15)", action_button(0).x + 6, action_button(0).y + 12);
        fe.clear_screen(Color::Black);
        assert!(fe.labelled_regions().is_empty());
    }

    #[test]
    fn fill_covers_the_scaled_cells() {
        let mut fe = ConsoleFrontend::new();
        fe.clear_screen(Color::Black);
        fe.fill_rect(Rect::new(0, 0, 10, 20), Color::Red);
        assert_eq!(fe.grid[0][0], 'r');
        assert_eq!(fe.grid[1][1], 'r');
        assert_eq!(fe.grid[2][2], ' ');
    }
}
