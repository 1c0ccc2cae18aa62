//! Platform-neutral frame description.
//!
//! The simulation never draws; it hands the front-end an ordered list of
//! "place this image at this rectangle" commands plus the HUD and overlay.

use crate::compute::explosion_flipped;
use crate::entities::{Backdrop, GameState, GameStatus, ImageId, PlayerMode, StageState};
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    pub image: ImageId,
    pub rect: Rect,
    /// Colour-inverted variant (Enhanced player, neutralized enemy).
    pub inverted: bool,
    /// Mirrored variant (explosion animation).
    pub flipped: bool,
}

impl DrawCommand {
    pub fn plain(image: ImageId, rect: Rect) -> Self {
        DrawCommand {
            image,
            rect,
            inverted: false,
            flipped: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    Failure,
    Success,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub score_text: String,
    pub stage: StageState,
    /// Remaining boss hit points, once the boss is up.
    pub boss_hit_points: Option<i32>,
    /// Remaining Enhanced ticks, while Enhanced.
    pub enhanced_ticks: Option<u32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Draw commands in back-to-front order, background first.
    pub draws: Vec<DrawCommand>,
    pub hud: Hud,
    pub overlay: Option<Overlay>,
}

/// Describe the current state as one frame.
pub fn frame(state: &GameState) -> Frame {
    let backdrop = match state.stage {
        StageState::Normal => Backdrop::Field,
        StageState::Stage3 | StageState::Boss => Backdrop::Space,
    };
    let mut draws = vec![DrawCommand::plain(
        ImageId::Background(backdrop),
        Rect::screen(),
    )];

    if state.stage == StageState::Boss {
        if let Some(boss) = &state.boss {
            draws.push(DrawCommand::plain(ImageId::Boss, boss.rect));
        }
    }

    draws.push(DrawCommand {
        image: state.player.image,
        rect: state.player.rect,
        inverted: state.player.mode == PlayerMode::Enhanced,
        flipped: false,
    });
    draws.extend(
        state
            .beams
            .iter()
            .map(|b| DrawCommand::plain(ImageId::Beam(b.facing), b.rect)),
    );
    draws.extend(state.enemies.iter().map(|e| DrawCommand {
        image: ImageId::Enemy(e.art),
        rect: e.rect,
        inverted: e.is_neutralized(),
        flipped: false,
    }));
    draws.extend(
        state
            .projectiles
            .iter()
            .map(|p| DrawCommand::plain(ImageId::Projectile, p.rect)),
    );
    draws.extend(state.explosions.iter().map(|x| DrawCommand {
        image: ImageId::Explosion,
        rect: x.rect,
        inverted: false,
        flipped: explosion_flipped(x),
    }));
    draws.extend(
        state
            .area_effects
            .iter()
            .map(|a| DrawCommand::plain(ImageId::AreaEffect, a.rect)),
    );
    if state.pulse_flash {
        draws.push(DrawCommand::plain(ImageId::PulseFlash, Rect::screen()));
    }

    let overlay = match state.status {
        GameStatus::Lost => Some(Overlay::Failure),
        GameStatus::Won => Some(Overlay::Success),
        GameStatus::Playing | GameStatus::Quit => None,
    };

    Frame {
        draws,
        hud: Hud {
            score_text: state.score.text(),
            stage: state.stage,
            boss_hit_points: state.boss.as_ref().map(|b| b.hit_points),
            enhanced_ticks: (state.player.mode == PlayerMode::Enhanced)
                .then_some(state.player.enhanced_ticks),
        },
        overlay,
    }
}
