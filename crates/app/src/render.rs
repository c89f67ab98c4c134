//! Terminal frame drawing: legend, status header, centered grid, and a
//! fixed-height recent-events footer. Everything is queued and flushed
//! once per frame.

use std::io::{self, Write};

use game_core::{CellKind, GameState, Pos};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
    tty::IsTty,
};

const LEGEND: &str = "[P] you  [E] exit  [#] wall  [^] trap (-1 hp)  [+] medkit (+1 hp)  \
                      [D] drone  [H] helper  |  Controls: WASD or arrows, Q to quit";
const FOOTER_LINES: usize = 5;
const FALLBACK_TERMINAL_WIDTH: u16 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Info,
    Narration,
    Good,
    Alert,
}

#[derive(Clone, Debug)]
pub struct Message {
    pub text: String,
    pub tone: Tone,
}

impl Message {
    pub fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: Tone::Info }
    }

    pub fn narration(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: Tone::Narration }
    }

    pub fn good(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: Tone::Good }
    }

    pub fn alert(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: Tone::Alert }
    }
}

pub struct Screen {
    colors_enabled: bool,
}

impl Screen {
    pub fn new() -> Self {
        Self { colors_enabled: io::stdout().is_tty() }
    }

    pub fn draw(&self, state: &GameState, messages: &[Message]) -> io::Result<()> {
        let mut out = io::stdout();
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;

        self.line(&mut out, LEGEND, Some(Color::Cyan))?;
        self.line(
            &mut out,
            &format!(
                "Difficulty: {}   Health: {}/{}   Turn: {}",
                state.difficulty.name,
                state.player.health,
                state.difficulty.max_health,
                state.turns_taken
            ),
            None,
        )?;

        self.grid(&mut out, state)?;

        self.line(&mut out, "=== Recent Events ===", Some(Color::Cyan))?;
        for index in 0..FOOTER_LINES {
            match messages.get(index) {
                Some(message) => self.line(&mut out, &message.text, tone_color(message.tone))?,
                None if index == 0 => self.line(&mut out, "(No recent events)", None)?,
                None => self.line(&mut out, "", None)?,
            }
        }

        out.flush()
    }

    fn grid(&self, out: &mut impl Write, state: &GameState) -> io::Result<()> {
        let size = state.board.size;
        // Two glyph columns per cell, minus the trailing space, plus the
        // row-label gutter.
        let grid_width = 5 + size * 2 - 1;
        let terminal_width =
            terminal::size().map_or(FALLBACK_TERMINAL_WIDTH, |(width, _)| width) as usize;
        let pad = " ".repeat(terminal_width.saturating_sub(grid_width) / 2);

        let column_labels: String =
            (0..size).map(|column| format!("{} ", column % 10)).collect();
        self.line(out, &format!("{pad}     {}", column_labels.trim_end()), None)?;

        for row in 0..size {
            queue!(out, Print(&pad), Print(format!("{row:>2} | ")))?;
            for column in 0..size {
                let pos = Pos { y: row as i32, x: column as i32 };
                let (glyph, color) = self.glyph(state, pos);
                match color.filter(|_| self.colors_enabled) {
                    Some(color) => queue!(
                        out,
                        SetForegroundColor(color),
                        Print(glyph),
                        ResetColor,
                        Print(' ')
                    )?,
                    None => queue!(out, Print(glyph), Print(' '))?,
                }
            }
            queue!(out, Print("\n"))?;
        }
        Ok(())
    }

    /// Fixed symbol set: player and drones overlay whatever cell they stand
    /// on; everything else renders its cell kind.
    fn glyph(&self, state: &GameState, pos: Pos) -> (char, Option<Color>) {
        if state.player.pos == pos {
            return ('P', Some(Color::Green));
        }
        if state.drones.iter().any(|drone| drone.pos == pos) {
            return ('D', Some(Color::Red));
        }
        match state.board.cell_at(pos) {
            CellKind::Wall => ('#', None),
            CellKind::Trap => ('^', Some(Color::Red)),
            CellKind::Medkit => ('+', Some(Color::Green)),
            CellKind::Helper => ('H', Some(Color::Cyan)),
            CellKind::Exit => ('E', Some(Color::Yellow)),
            CellKind::Empty => (' ', None),
        }
    }

    fn line(&self, out: &mut impl Write, text: &str, color: Option<Color>) -> io::Result<()> {
        match color.filter(|_| self.colors_enabled) {
            Some(color) => {
                queue!(out, SetForegroundColor(color), Print(text), ResetColor, Print("\n"))
            }
            None => queue!(out, Print(text), Print("\n")),
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

fn tone_color(tone: Tone) -> Option<Color> {
    match tone {
        Tone::Info => None,
        Tone::Narration => Some(Color::Yellow),
        Tone::Good => Some(Color::Green),
        Tone::Alert => Some(Color::Red),
    }
}
