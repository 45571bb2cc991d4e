/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (grid of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// This eliminates flicker caused by full-screen redraws.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::color::ColorToken;
use crate::domain::round::Round;
use crate::sim::session::{Phase, SessionState};

/// Terminal ink for each token.
fn token_color(token: ColorToken) -> Color {
    match token {
        ColorToken::Red => Color::Rgb { r: 224, g: 60, b: 50 },
        ColorToken::Blue => Color::Rgb { r: 60, g: 130, b: 246 },
        ColorToken::Green => Color::Rgb { r: 40, g: 180, b: 75 },
        ColorToken::Yellow => Color::Rgb { r: 255, g: 220, b: 50 },
        ColorToken::Purple => Color::Rgb { r: 160, g: 80, b: 220 },
        ColorToken::Orange => Color::Rgb { r: 255, g: 140, b: 0 },
        ColorToken::Pink => Color::Rgb { r: 255, g: 120, b: 180 },
        ColorToken::Cyan => Color::Rgb { r: 0, g: 210, b: 210 },
        ColorToken::Brown => Color::Rgb { r: 150, g: 100, b: 50 },
        ColorToken::Lime => Color::Rgb { r: 170, g: 255, b: 60 },
    }
}

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit dark background for all "empty" terminal cells, used for
    /// both Clear and per-cell backgrounds so inter-row gap pixels match.
    const BASE_BG: Color = Color::Rgb { r: 16, g: 16, b: 24 };

    const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::White,
        bg: Cell::BASE_BG,
    };

    /// Sentinel cell used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell {
        ch: '?',
        fg: Color::Magenta,
        bg: Color::Magenta,
    };

    /// Normalize bg: Color::Reset → BASE_BG so that every cell gets an
    /// explicit background color (never terminal-default).
    #[inline]
    fn norm_bg(bg: Color) -> Color {
        match bg {
            Color::Reset => Self::BASE_BG,
            other => other,
        }
    }

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        Cell { ch, fg, bg: Self::norm_bg(bg) }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer {
            width: w,
            height: h,
            cells: vec![Cell::BLANK; w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y) with given colors.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Cell::new(ch, fg, bg));
            cx += 1;
        }
    }

    /// Write a string horizontally centered on the given row.
    fn put_center(&mut self, y: usize, s: &str, fg: Color, bg: Color) {
        let len = s.chars().count();
        let x = self.width.saturating_sub(len) / 2;
        self.put_str(x, y, s, fg, bg);
    }
}

// ── Renderer ──

/// Option swatch geometry: 3 per row, 2 rows.
const SWATCH_W: usize = 10;
const SWATCH_GAP: usize = 4;
const SWATCH_COLS: usize = 3;

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    last_phase: Option<Phase>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_phase: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame: back ≠ front for every cell.
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, session: &SessionState) -> io::Result<()> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        // Detect phase change → clear for clean transition
        let phase_changed = self.last_phase != Some(session.phase);
        if phase_changed {
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
            self.last_phase = Some(session.phase);
        }

        self.front.clear();

        match session.phase {
            Phase::Title => self.compose_title(session),
            Phase::Playing => self.compose_playing(session),
            Phase::Over => self.compose_game_over(session),
        }

        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);

        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        // Set explicit base colors at start of frame (not ResetColor:
        // the terminal's native default may differ from BASE_BG).
        queue!(
            self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }

                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                queue!(self.writer, Print(cell.ch))?;

                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }

    // ── Compose: build front buffer content ──

    fn compose_title(&mut self, s: &SessionState) {
        let title = [
            r" ___  _____  ___  ___   ___  ___     ___  _     _   ___  _  _ ",
            r"/ __||_   _|| _ \/ _ \ / _ \| _ \   / __|| |   /_\ / __|| || |",
            r"\__ \  | |  |   / (_) | (_) |  _/  | (__ | |_ / _ \\__ \| __ |",
            r"|___/  |_|  |_|_\\___/ \___/|_|     \___||____/_/ \_\___/|_||_|",
        ];
        for (i, line) in title.iter().enumerate() {
            self.front.put_center(2 + i, line, Color::Rgb { r: 0, g: 220, b: 220 }, Color::Reset);
        }

        self.front.put_center(7, "◈◈  R E V E R S E   E D I T I O N  ◈◈",
            Color::Rgb { r: 80, g: 255, b: 80 }, Color::Reset);

        let rules_y = 10;
        let lines = [
            "Pick the color the word SAYS — not the color it is written in.",
            "The timer shrinks as your score climbs.",
            "3 correct in a row = Combo Bonus. One miss ends the game.",
        ];
        for (i, line) in lines.iter().enumerate() {
            self.front.put_center(rules_y + i, line, Color::White, Color::Reset);
        }

        // Color strip, purely decorative
        let strip_y = rules_y + 4;
        let strip_w = ColorToken::ALL.len() * 4;
        let x0 = self.front.width.saturating_sub(strip_w) / 2;
        for (i, &tok) in ColorToken::ALL.iter().enumerate() {
            for dx in 0..3 {
                self.front.set(x0 + i * 4 + dx, strip_y, Cell::new('█', token_color(tok), Color::Reset));
            }
        }

        let hi = Color::Rgb { r: 80, g: 255, b: 80 };
        self.front.put_center(strip_y + 3, "ENTER   Start Game", hi, Color::Reset);
        self.front.put_center(strip_y + 4, "  Q     Quit", Color::White, Color::Reset);

        if !s.message.is_empty() {
            let row = self.front.height.saturating_sub(1);
            self.front.put_center(row, &s.message, Color::Black, Color::Rgb { r: 200, g: 180, b: 50 });
        }
    }

    fn compose_playing(&mut self, s: &SessionState) {
        let round = match &s.round {
            Some(r) => r,
            None => return,
        };

        // ── HUD row ──
        let hud = format!(" Score: {:<6}  Streak: {:<3}", s.score, s.streak);
        self.front.put_str(1, 0, &hud, Color::White, Color::Reset);

        let urgent = s.time_left <= s.rules.urgency_from;
        let blink = urgent && (s.anim_tick / 5) % 2 == 0;
        let time_fg = if blink {
            Color::Rgb { r: 255, g: 60, b: 60 }
        } else if urgent {
            Color::Rgb { r: 255, g: 160, b: 60 }
        } else {
            Color::Rgb { r: 80, g: 255, b: 80 }
        };
        let time_str = format!("Time {:>2}s ", s.time_left);
        let tx = self.front.width.saturating_sub(time_str.chars().count() + 1);
        self.front.put_str(tx, 0, &time_str, time_fg, Color::Reset);

        // ── Combo toast ──
        if !s.message.is_empty() {
            self.front.put_center(2, &s.message, Color::Rgb { r: 255, g: 215, b: 0 }, Color::Reset);
        }

        // ── The word, in its ink color ──
        let word_y = 5;
        let ink = token_color(round.ink);
        let spaced: String = round
            .target
            .name()
            .chars()
            .flat_map(|c| [c, ' ', ' '])
            .collect();
        let spaced = spaced.trim_end();
        let rule_w = spaced.chars().count() + 6;
        let rule: String = "━".repeat(rule_w);
        self.front.put_center(word_y, &rule, Color::DarkGrey, Color::Reset);
        self.front.put_center(word_y + 2, spaced, ink, Color::Reset);
        self.front.put_center(word_y + 4, &rule, Color::DarkGrey, Color::Reset);

        // ── Option swatches: 3 × 2 grid, keyed 1-6 ──
        let grid_w = SWATCH_COLS * SWATCH_W + (SWATCH_COLS - 1) * SWATCH_GAP;
        let gx0 = self.front.width.saturating_sub(grid_w) / 2;
        let gy0 = word_y + 7;

        for (i, &opt) in round.options.iter().enumerate() {
            let col = i % SWATCH_COLS;
            let row = i / SWATCH_COLS;
            let x = gx0 + col * (SWATCH_W + SWATCH_GAP);
            let y = gy0 + row * 4;

            let label = format!("[{}]", i + 1);
            self.front.put_str(x + (SWATCH_W - label.len()) / 2, y, &label, Color::White, Color::Reset);

            let block: String = "█".repeat(SWATCH_W);
            self.front.put_str(x, y + 1, &block, token_color(opt), Color::Reset);
            self.front.put_str(x, y + 2, &block, token_color(opt), Color::Reset);
        }

        // ── Help bar ──
        let help_row = self.front.height.saturating_sub(1);
        let help = " 1-6: Pick the color the word SAYS   ESC: Title ";
        self.front.put_str(0, help_row, help, Color::DarkGrey, Color::Reset);
    }

    fn compose_game_over(&mut self, s: &SessionState) {
        let box_art = [
            "╔═══════════════════════════╗",
            "║     ✕  GAME  OVER  ✕      ║",
            "╚═══════════════════════════╝",
        ];
        for (i, l) in box_art.iter().enumerate() {
            self.front.put_center(4 + i, l, Color::Rgb { r: 255, g: 60, b: 60 }, Color::Reset);
        }

        let score = format!("◈ Final Score: {}", s.score);
        self.front.put_center(9, &score, Color::White, Color::Reset);

        // The losing round stays visible so the player sees what was asked.
        if let Some(round) = &s.round {
            let recap = format!(
                "The word said {} (shown in {})",
                round.target.name(),
                round.ink.name()
            );
            self.front.put_center(11, &recap, Color::DarkGrey, Color::Reset);
            self.show_answer_strip(round, 13);
        }

        self.front.put_center(16, "▸ ENTER: Play Again", Color::Rgb { r: 80, g: 255, b: 80 }, Color::Reset);
        self.front.put_center(17, "▸ ESC:   Title      ", Color::DarkGrey, Color::Reset);
    }

    /// Small swatch of the correct answer on the game-over screen.
    fn show_answer_strip(&mut self, round: &Round, y: usize) {
        let label = "Answer: ";
        let total = label.len() + 6;
        let x0 = self.front.width.saturating_sub(total) / 2;
        self.front.put_str(x0, y, label, Color::White, Color::Reset);
        for dx in 0..6 {
            self.front.set(
                x0 + label.len() + dx,
                y,
                Cell::new('█', token_color(round.target), Color::Reset),
            );
        }
    }
}
