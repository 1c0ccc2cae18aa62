/// Rendering layer. All terminal I/O lives here.
///
/// Receives a mutable writer and a `Frame` from the simulation. No game
/// logic is performed; this module only maps the 1600×900 logical play
/// area onto the terminal grid and turns draw commands into terminal
/// commands.
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal, QueueableCommand,
};
use glam::Vec2;
use musou_shooter::assets::SpriteSheet;
use musou_shooter::consts::{HEIGHT, WIDTH};
use musou_shooter::entities::{Backdrop, ImageId, Mood, StageState};
use musou_shooter::render::{DrawCommand, Frame, Hud, Overlay};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_BORDER_SPACE: Color = Color::DarkMagenta;
const C_HUD_SCORE: Color = Color::Blue;
const C_HUD_SCORE_LATE: Color = Color::Red;
const C_HUD_BOSS: Color = Color::Magenta;
const C_HUD_ENHANCED: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

fn image_color(command: &DrawCommand) -> Color {
    match command.image {
        ImageId::Player(_) => Color::White,
        ImageId::PlayerFace(Mood::Joy) => Color::Yellow,
        ImageId::PlayerFace(Mood::Sorrow) => Color::Blue,
        ImageId::Beam(_) => Color::Cyan,
        ImageId::Projectile => Color::Magenta,
        ImageId::Enemy(1) => Color::Green,
        ImageId::Enemy(2) => Color::Red,
        ImageId::Enemy(_) => Color::DarkYellow,
        ImageId::Boss => Color::DarkRed,
        ImageId::Explosion if command.flipped => Color::Red,
        ImageId::Explosion => Color::Yellow,
        ImageId::AreaEffect => Color::DarkGrey,
        ImageId::PulseFlash => Color::Yellow,
        ImageId::Background(_) => Color::DarkGrey,
    }
}

// ── Logical → terminal mapping ────────────────────────────────────────────────

/// Terminal cells available to the play area (inside the border).
struct Viewport {
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn new(width: u16, height: u16) -> Self {
        Viewport {
            left: 1,
            top: 2,
            cols: width.saturating_sub(2).max(1),
            rows: height.saturating_sub(4).max(1),
        }
    }

    /// Cell under a logical position, clamped to the play area.
    fn cell(&self, p: Vec2) -> (u16, u16) {
        let col = (p.x / WIDTH * (self.cols - 1) as f32).round();
        let row = (p.y / HEIGHT * (self.rows - 1) as f32).round();
        (
            self.left + col.clamp(0.0, (self.cols - 1) as f32) as u16,
            self.top + row.clamp(0.0, (self.rows - 1) as f32) as u16,
        )
    }

    /// Left column for a glyph of `len` cells centered on `col`, kept inside.
    fn centered(&self, col: u16, len: u16) -> u16 {
        let right_limit = (self.left + self.cols).saturating_sub(len).max(self.left);
        col.saturating_sub(len / 2).clamp(self.left, right_limit)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, frame: &Frame, sprites: &SpriteSheet) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport::new(width, height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height, frame.hud.stage)?;
    draw_hud(out, &frame.hud, width)?;

    for command in &frame.draws {
        draw_command(out, &view, command, sprites)?;
    }

    draw_controls_hint(out, height)?;

    match frame.overlay {
        Some(Overlay::Failure) => draw_banner(out, width, height, "GAME  OVER", Color::Red)?,
        Some(Overlay::Success) => draw_banner(out, width, height, "GAME CLEAR!", Color::Yellow)?,
        None => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    stage: StageState,
) -> std::io::Result<()> {
    let w = width as usize;
    let color = match stage {
        StageState::Normal => C_BORDER,
        StageState::Stage3 | StageState::Boss => C_BORDER_SPACE,
    };
    out.queue(style::SetForegroundColor(color))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, hud: &Hud, width: u16) -> std::io::Result<()> {
    // Score on the left, red once stage 3 begins
    out.queue(cursor::MoveTo(1, 0))?;
    let score_color = match hud.stage {
        StageState::Normal => C_HUD_SCORE,
        StageState::Stage3 | StageState::Boss => C_HUD_SCORE_LATE,
    };
    out.queue(style::SetForegroundColor(score_color))?;
    out.queue(Print(&hud.score_text))?;

    // Stage in the centre
    let stage_str = match hud.stage {
        StageState::Normal => "[ STAGE 1 ]",
        StageState::Stage3 => "[ STAGE 3 ]",
        StageState::Boss => "[ BOSS ]",
    };
    let sx = (width / 2).saturating_sub(stage_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(score_color))?;
    out.queue(Print(stage_str))?;

    // Enhanced timer and boss hit points on the right
    let mut right = String::new();
    if let Some(ticks) = hud.enhanced_ticks {
        right.push_str(&format!("[HYPER {:>3}] ", ticks));
    }
    if let Some(hp) = hud.boss_hit_points {
        right.push_str(&format!("Boss HP:{:>3}", hp.max(0)));
    }
    if !right.is_empty() {
        let rx = width.saturating_sub(right.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(rx, 0))?;
        let color = if hud.boss_hit_points.is_some() {
            C_HUD_BOSS
        } else {
            C_HUD_ENHANCED
        };
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(&right))?;
    }

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_command<W: Write>(
    out: &mut W,
    view: &Viewport,
    command: &DrawCommand,
    sprites: &SpriteSheet,
) -> std::io::Result<()> {
    let glyph = sprites.glyph(command.image);
    out.queue(style::SetForegroundColor(image_color(command)))?;

    match command.image {
        ImageId::Background(Backdrop::Field) => return Ok(()),
        // Full-screen images become a sparse pattern so entities stay visible
        ImageId::Background(Backdrop::Space) => {
            fill(out, view, glyph, |r, c| (r * 7 + c * 13) % 23 == 0)?
        }
        ImageId::AreaEffect => fill(out, view, glyph, |r, c| (r + c) % 4 == 0)?,
        ImageId::PulseFlash => fill(out, view, glyph, |r, c| (r * 3 + c) % 5 == 0)?,
        _ => {
            if command.inverted {
                out.queue(style::SetAttribute(Attribute::Reverse))?;
            }
            let (col, row) = view.cell(command.rect.center);
            let len = glyph.chars().count() as u16;
            out.queue(cursor::MoveTo(view.centered(col, len), row))?;
            out.queue(Print(glyph))?;
            if command.inverted {
                out.queue(style::SetAttribute(Attribute::NoReverse))?;
            }
        }
    }
    Ok(())
}

fn fill<W: Write>(
    out: &mut W,
    view: &Viewport,
    glyph: &str,
    pattern: impl Fn(u16, u16) -> bool,
) -> std::io::Result<()> {
    for r in 0..view.rows {
        for c in 0..view.cols {
            if pattern(r, c) {
                out.queue(cursor::MoveTo(view.left + c, view.top + r))?;
                out.queue(Print(glyph))?;
            }
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "←↑↓→ / WASD : Move (+Shift: fast)   SPACE : Beam   H : Hyper   E : EMP   ENTER : Gravity   Q : Quit",
    ))?;
    Ok(())
}

// ── End-of-game overlay ───────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let inner = format!("    {:<12}    ", text);
    let bar = "═".repeat(inner.chars().count());
    let lines = [
        format!("╔{}╗", bar),
        format!("║{}║", inner),
        format!("╚{}╝", bar),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    out.queue(style::SetForegroundColor(color))?;
    for (i, line) in lines.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(line))?;
    }
    Ok(())
}
