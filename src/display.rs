/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session. World coordinates are scaled onto the terminal grid; nothing is
/// ever written back to the simulation.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use pipe_runner::entities::Rect;
use pipe_runner::{GameStatus, Session};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_BIRD: Color = Color::Yellow;
const C_PIPE: Color = Color::Green;
const C_TITLE: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;
const C_BUTTON: Color = Color::Blue;
const C_DANGER: Color = Color::Red;

/// Terminal rows reserved outside the play area (HUD on top, hint below).
const HUD_ROWS: u16 = 1;
const HINT_ROWS: u16 = 1;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, session: &Session) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport::new(session, width, height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match session.status() {
        GameStatus::Menu => draw_menu(out, session, &view)?,
        GameStatus::ConfirmExitFromMenu => {
            draw_menu(out, session, &view)?;
            draw_confirm_exit(out, &view)?;
        }
        GameStatus::Playing => {
            draw_world(out, session, &view)?;
            draw_hud(out, session)?;
        }
        GameStatus::GameOver => {
            draw_world(out, session, &view)?;
            draw_game_over(out, session, &view)?;
        }
        GameStatus::ConfirmExitFromGameOver => {
            draw_world(out, session, &view)?;
            draw_game_over(out, session, &view)?;
            draw_confirm_exit(out, &view)?;
        }
        GameStatus::Exited => {}
    }

    draw_controls_hint(out, session, &view)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── World → terminal mapping ──────────────────────────────────────────────────

struct Viewport {
    cols: u16,
    rows: u16,
    world_w: f32,
    world_h: f32,
}

impl Viewport {
    fn new(session: &Session, cols: u16, rows: u16) -> Self {
        let config = session.config();
        Self {
            cols,
            rows,
            world_w: config.screen_width as f32,
            world_h: config.screen_height as f32,
        }
    }

    fn area_rows(&self) -> u16 {
        self.rows.saturating_sub(HUD_ROWS + HINT_ROWS).max(1)
    }

    fn col(&self, x: f32) -> i32 {
        (x * self.cols as f32 / self.world_w).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        HUD_ROWS as i32 + (y * self.area_rows() as f32 / self.world_h).floor() as i32
    }

    /// Cell span of a rectangle, clipped to the play area. Every visible
    /// rectangle covers at least one cell.
    fn cells(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let left = self.col(rect.left()).max(0);
        let right = self.col(rect.right()).max(left + 1).min(self.cols as i32);
        let top = self.row(rect.top()).max(HUD_ROWS as i32);
        let bottom = self
            .row(rect.bottom())
            .max(top + 1)
            .min((HUD_ROWS + self.area_rows()) as i32);
        if left >= right || top >= bottom {
            return None;
        }
        Some((left as u16, top as u16, (right - left) as u16, (bottom - top) as u16))
    }

    fn center_col(&self, text: &str) -> u16 {
        (self.cols / 2).saturating_sub(text.chars().count() as u16 / 2)
    }
}

// ── Play field ────────────────────────────────────────────────────────────────

fn draw_world<W: Write>(out: &mut W, session: &Session, view: &Viewport) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_PIPE))?;
    for pair in session.stream().pairs() {
        for rect in pair.colliders() {
            fill_rect(out, view, &rect, "█")?;
        }
    }

    out.queue(style::SetForegroundColor(C_BIRD))?;
    fill_rect(out, view, &session.bird().rect(), "●")?;
    Ok(())
}

fn fill_rect<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    glyph: &str,
) -> std::io::Result<()> {
    if let Some((col, row, w, h)) = view.cells(rect) {
        let line = glyph.repeat(w as usize);
        for r in row..row + h {
            out.queue(cursor::MoveTo(col, r))?;
            out.queue(Print(&line))?;
        }
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, session: &Session) -> std::io::Result<()> {
    let score = session.score();
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    if score.high_score() > 0 {
        out.queue(Print(format!(
            "Score:{:>5}  Best:{:>5}",
            score.score(),
            score.high_score()
        )))?;
    } else {
        out.queue(Print(format!("Score:{:>5}", score.score())))?;
    }
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, session: &Session, view: &Viewport) -> std::io::Result<()> {
    let cy = view.rows / 2;

    let title = "P I P E   R U N N E R";
    out.queue(cursor::MoveTo(view.center_col(title), cy.saturating_sub(4)))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print(title))?;

    let best = session.score().high_score();
    if best > 0 {
        let best_line = format!("Best Score: {}", best);
        out.queue(cursor::MoveTo(view.center_col(&best_line), cy.saturating_sub(3)))?;
        out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        out.queue(Print(&best_line))?;
    }

    draw_button(out, view, cy.saturating_sub(1), "Start", "Enter", C_BUTTON)?;
    draw_button(out, view, cy + 1, "Exit", "Esc", C_BUTTON)?;
    Ok(())
}

fn draw_button<W: Write>(
    out: &mut W,
    view: &Viewport,
    row: u16,
    label: &str,
    key: &str,
    color: Color,
) -> std::io::Result<()> {
    let text = format!("[ {:^8} ]  {}", label, key);
    out.queue(cursor::MoveTo(view.center_col(&text), row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(format!("[ {:^8} ]", label)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(format!("  {}", key)))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, session: &Session, view: &Viewport) -> std::io::Result<()> {
    let score = session.score();
    let score_line = format!("Final Score: {:>5}", score.score());
    let best_line = if score.score() == score.high_score() && score.score() > 0 {
        format!("★ NEW BEST: {:>5} ★", score.high_score())
    } else {
        format!("High Score:  {:>5}", score.high_score())
    };

    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", C_DANGER),
        ("║     GAME  OVER     ║", C_DANGER),
        ("╚════════════════════╝", C_DANGER),
    ];

    let total_rows = lines.len() as u16 + 5;
    let start_row = (view.rows / 2).saturating_sub(total_rows / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(view.center_col(msg), start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    out.queue(cursor::MoveTo(view.center_col(&score_line), score_row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(&score_line))?;

    out.queue(cursor::MoveTo(view.center_col(&best_line), score_row + 1))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&best_line))?;

    draw_button(out, view, score_row + 3, "Restart", "R", C_BUTTON)?;
    draw_button(out, view, score_row + 4, "Exit", "Esc", C_BUTTON)?;
    Ok(())
}

// ── Confirm-exit modal ────────────────────────────────────────────────────────

fn draw_confirm_exit<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let msg = "Are you sure you want to exit?";
    let width = msg.chars().count() + 4;
    let cy = view.rows / 2;
    let top = cy.saturating_sub(2);

    let blank = format!("║{}║", " ".repeat(width));
    let frame_top = format!("╔{}╗", "═".repeat(width));
    let frame_bottom = format!("╚{}╝", "═".repeat(width));
    let col = view.center_col(&frame_top);

    out.queue(style::SetForegroundColor(Color::White))?;
    for (i, line) in [&frame_top, &blank, &blank, &blank, &frame_bottom]
        .iter()
        .enumerate()
    {
        out.queue(cursor::MoveTo(col, top + i as u16))?;
        out.queue(Print(line))?;
    }

    out.queue(cursor::MoveTo(view.center_col(msg), top + 1))?;
    out.queue(Print(msg))?;

    let choices = "[ Yes ] Y      [ No ] N";
    out.queue(cursor::MoveTo(view.center_col(choices), top + 3))?;
    out.queue(style::SetForegroundColor(C_DANGER))?;
    out.queue(Print("[ Yes ] Y"))?;
    out.queue(style::SetForegroundColor(C_BUTTON))?;
    out.queue(Print("      [ No ] N"))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, session: &Session, view: &Viewport) -> std::io::Result<()> {
    let hint = match session.status() {
        GameStatus::Menu => "ENTER / SPACE : Start   ESC / Q : Exit",
        GameStatus::Playing => "SPACE / ↑ / W : Flap   ESC : Quit",
        GameStatus::GameOver => "R / ENTER / SPACE : Restart   ESC / Q : Exit",
        GameStatus::ConfirmExitFromMenu | GameStatus::ConfirmExitFromGameOver => {
            "Y / ENTER : Yes   N / ESC : No"
        }
        GameStatus::Exited => return Ok(()),
    };
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}
