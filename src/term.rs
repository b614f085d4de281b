use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal, Result};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, read, poll};

use crate::geometry::{Grid, Rect};
use crate::input::is_ctrl_c;
use crate::render::{Paint, Surface};

type Coords = (u16, u16);

/// Columns to the right of the board reserved for the high score list.
const PANEL_WIDTH: u16 = 26;
const PANEL_GAP: u16 = 2;
const PANEL_ROWS: u16 = 8;
const MAX_NAME_LEN: usize = 16;

/// Largest board, in cells, a terminal of `term_size` can show next to the
/// high score panel. Each cell takes two columns.
pub fn max_board_cells(term_size: Coords) -> (i32, i32) {
    let (w, h) = term_size;
    let cols = w.saturating_sub(2 + PANEL_WIDTH) / 2;
    let rows = h.saturating_sub(2);
    (cols as i32, rows as i32)
}

pub fn board_fits(grid: &Grid, term_size: Coords) -> bool {
    let (max_cols, max_rows) = max_board_cells(term_size);
    grid.columns() <= max_cols && grid.rows() <= max_rows
}

pub fn terminal_size() -> Result<Coords> {
    terminal::size()
}

/// How the player left the name prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Entered(String),
    /// Esc: no name given.
    Skipped,
    /// CTRL+C: leave the game altogether.
    Quit,
}

/// Everything the game driver needs from the screen and keyboard besides
/// drawing the board.
pub trait Console: Surface {
    fn flush(&mut self) -> Result<()>;
    fn read_key_blocking(&mut self) -> Result<KeyEvent>;
    /// Every key event that arrived since the last call, oldest first.
    fn read_key_events_queue(&mut self) -> Result<Vec<KeyEvent>>;
    fn show_message(&mut self, lines: &[&str]) -> Result<()>;
    fn hide_message(&mut self) -> Result<()>;
    /// Blocking one-line text input.
    fn prompt(&mut self, question: &str) -> Result<Prompt>;
    fn show_leaderboard(&mut self, lines: &[String]) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Glyph {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Glyph {
    const BLANK: Glyph = Glyph { ch: ' ', fg: Color::Reset, bg: Color::Reset };

    fn text(ch: char) -> Self {
        Glyph { ch, ..Glyph::BLANK }
    }
}

/// Owns the terminal while the game runs. Drawing goes to a pending buffer;
/// `flush` writes only the cells that differ from what is on screen.
pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
    screen: Vec<Glyph>,
    pending: Vec<Glyph>,
    grid: Grid,
    current_msg: Option<Message>,
}

struct Message {
    top_left: Coords,
    width: u16,
    height: u16,
}

impl TermManager {
    pub fn new(grid: Grid) -> Result<Self> {
        let (width, height) = terminal::size()?;
        let stdout = stdout();
        let screen = vec![Glyph::BLANK; width as usize * height as usize];
        let pending = screen.clone();
        Ok(TermManager { width, height, stdout, screen, pending, grid, current_msg: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        self.clear()
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, style::ResetColor, terminal::Clear(ClearType::All))?;
        self.screen.iter_mut().for_each(|g| *g = Glyph::BLANK);
        self.pending.iter_mut().for_each(|g| *g = Glyph::BLANK);
        self.current_msg = None;
        Ok(())
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at_no_save(&mut self, pos: Coords, ch: char) -> Result<()> {
        // To be used for printing messages, where we don't wanna overwrite our
        // local buffer to restore it when the message is hidden
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
    }

    fn index(&self, pos: Coords) -> Option<usize> {
        if pos.0 < self.width && pos.1 < self.height {
            Some(self.width as usize * pos.1 as usize + pos.0 as usize)
        } else {
            None
        }
    }

    fn set(&mut self, pos: Coords, glyph: Glyph) {
        if let Some(i) = self.index(pos) {
            self.pending[i] = glyph;
        }
    }

    fn update(&mut self, pos: Coords, f: impl FnOnce(&mut Glyph)) {
        if let Some(i) = self.index(pos) {
            f(&mut self.pending[i]);
        }
    }

    /// Board cells covered by `rect`, clipped to the board:
    /// `(first column, end column, first row, end row)`.
    fn cell_span(&self, rect: Rect) -> Option<(i32, i32, i32, i32)> {
        let cell = self.grid.cell();
        let c0 = rect.x.div_euclid(cell).max(0);
        let r0 = rect.y.div_euclid(cell).max(0);
        let c1 = (rect.x + rect.w + cell - 1).div_euclid(cell).min(self.grid.columns());
        let r1 = (rect.y + rect.h + cell - 1).div_euclid(cell).min(self.grid.rows());

        if c0 < c1 && r0 < r1 {
            Some((c0, c1, r0, r1))
        } else {
            None
        }
    }

    fn paint_cells(&mut self, rect: Rect, glyph: Glyph) {
        if let Some((c0, c1, r0, r1)) = self.cell_span(rect) {
            for r in r0..r1 {
                for c in c0..c1 {
                    let (x, y) = cell_origin(c, r);
                    self.set((x, y), glyph);
                    self.set((x + 1, y), glyph);
                }
            }
        }
    }

    // Frames a multi-cell region in the margin around it, the way the board
    // border is drawn.
    fn draw_frame_around(&mut self, c0: i32, c1: i32, r0: i32, r1: i32, fg: Color) {
        let (left, right) = ((c0 * 2) as u16, (c1 * 2 + 1) as u16);
        let (top, bottom) = (r0 as u16, (r1 + 1) as u16);
        let glyph = |ch| Glyph { ch, fg, bg: Color::Reset };

        for x in left..=right {
            let ch = if x == left || x == right {'+'} else {'-'};
            self.set((x, top), glyph(ch));
            self.set((x, bottom), glyph(ch));
        }

        for y in top + 1..bottom {
            self.set((left, y), glyph('|'));
            self.set((right, y), glyph('|'));
        }
    }
}

impl Console for TermManager {
    fn read_key_blocking(&mut self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    fn read_key_events_queue(&mut self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    fn flush(&mut self) -> Result<()> {
        let mut wrote = false;

        for i in 0..self.pending.len() {
            let glyph = self.pending[i];
            if glyph == self.screen[i] {
                continue;
            }
            let pos = ((i % self.width as usize) as u16, (i / self.width as usize) as u16);
            queue!(
                self.stdout,
                cursor::MoveTo(pos.0, pos.1),
                style::SetForegroundColor(glyph.fg),
                style::SetBackgroundColor(glyph.bg),
                style::Print(glyph.ch)
            )?;
            self.screen[i] = glyph;
            wrote = true;
        }

        if wrote {
            queue!(self.stdout, style::ResetColor)?;
        }
        self.stdout.flush()?;
        Ok(())
    }

    /// Draws the high score list to the right of the board.
    fn show_leaderboard(&mut self, lines: &[String]) -> Result<()> {
        let x = self.grid.columns() as u16 * 2 + 2 + PANEL_GAP;
        let text_width = (PANEL_WIDTH - PANEL_GAP) as usize;

        let mut rows = vec!["High Scores".to_string(), String::new()];
        if lines.is_empty() {
            rows.push("No scores yet".to_string());
        }
        rows.extend(lines.iter().enumerate().map(|(i, l)| format!("{}. {}", i + 1, l)));

        for y in 0..PANEL_ROWS {
            let row = rows.get(y as usize).map(String::as_str).unwrap_or("");
            let padded: Vec<char> = row.chars().chain(std::iter::repeat(' ')).take(text_width).collect();
            for (dx, ch) in padded.into_iter().enumerate() {
                self.set((x + dx as u16, 1 + y), Glyph::text(ch));
            }
        }

        self.flush()
    }

    fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as u16;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as u16;
        let center = (self.width / 2, self.height / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        queue!(self.stdout, style::ResetColor)?;

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as u16 + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as u16, y), ch)?;
            }
        }

        self.current_msg = Some(Message::new(msg_width, msg_height, top_left));
        self.stdout.flush()?;
        Ok(())
    }

    fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };
        let top_left = msg.top_left();

        // Restore what the message covered
        for y_diff in 0..msg.height() {
            for x_diff in 0..msg.width() {
                let pos = (top_left.0 + x_diff, top_left.1 + y_diff);
                if let Some(i) = self.index(pos) {
                    let glyph = self.screen[i];
                    queue!(
                        self.stdout,
                        cursor::MoveTo(pos.0, pos.1),
                        style::SetForegroundColor(glyph.fg),
                        style::SetBackgroundColor(glyph.bg),
                        style::Print(glyph.ch)
                    )?;
                }
            }
        }

        queue!(self.stdout, style::ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }

    /// Line editor in a message box. Enter submits, Backspace deletes.
    fn prompt(&mut self, question: &str) -> Result<Prompt> {
        let mut input = String::new();

        let answer = loop {
            let field = format!("> {:<width$}", format!("{}_", input), width = MAX_NAME_LEN + 1);
            self.show_message(&[question, "", &*field, "", "Enter to save, Esc to skip"])?;

            let key = self.read_key_blocking()?;
            if is_ctrl_c(&key) {
                break Prompt::Quit;
            }

            match key.code {
                KeyCode::Enter => break Prompt::Entered(input),
                KeyCode::Esc => break Prompt::Skipped,
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) if !c.is_control() && input.chars().count() < MAX_NAME_LEN => {
                    input.push(c)
                }
                _ => {}
            }
        };

        self.hide_message()?;
        Ok(answer)
    }
}

impl Surface for TermManager {
    fn clear(&mut self, rect: Rect) {
        self.paint_cells(rect, Glyph::BLANK);
    }

    fn fill_rect(&mut self, rect: Rect, paint: Paint) {
        self.paint_cells(rect, Glyph { ch: ' ', fg: Color::Reset, bg: color_of(paint) });
    }

    /// Single cells get bracket glyphs, larger regions a frame.
    fn stroke_rect(&mut self, rect: Rect, paint: Paint) {
        let fg = color_of(paint);

        match self.cell_span(rect) {
            Some((c0, c1, r0, r1)) if c1 - c0 == 1 && r1 - r0 == 1 => {
                let (x, y) = cell_origin(c0, r0);
                self.update((x, y), |g| { g.ch = '['; g.fg = fg; });
                self.update((x + 1, y), |g| { g.ch = ']'; g.fg = fg; });
            },
            Some((c0, c1, r0, r1)) => self.draw_frame_around(c0, c1, r0, r1, fg),
            None => {},
        }
    }
}

impl Message {
    pub fn new(width: u16, height: u16, top_left: Coords) -> Self {
        Message { width, height, top_left }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn top_left(&self) -> Coords {
        self.top_left
    }
}

// Terminal position of a board cell's left half, inside the border.
fn cell_origin(c: i32, r: i32) -> Coords {
    ((1 + 2 * c) as u16, (1 + r) as u16)
}

fn color_of(paint: Paint) -> Color {
    match paint {
        Paint::Board => Color::Black,
        Paint::BoardEdge => Color::White,
        Paint::SnakeBody => Color::Green,
        Paint::SnakeEdge => Color::DarkGreen,
        Paint::Food => Color::Red,
        Paint::DeadSnake => Color::DarkGrey,
    }
}
