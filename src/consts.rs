//! Tuning constants shared by the simulation and the front-end.

// ── Display geometry ─────────────────────────────────────────────────────────

/// Width of the visible play area in logical units.
pub const WIDTH: f32 = 1600.0;
/// Height of the visible play area in logical units.
pub const HEIGHT: f32 = 900.0;

/// Simulation ticks per second.
pub const TICK_RATE: u32 = 50;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_START: (f32, f32) = (900.0, 400.0);
pub const PLAYER_SIZE: (f32, f32) = (100.0, 100.0);
pub const PLAYER_SPEED: f32 = 10.0;
pub const PLAYER_BOOST_SPEED: f32 = 20.0;
/// Ticks an Enhanced activation lasts.
pub const ENHANCED_DURATION: u32 = 500;

// ── Beams & projectiles ──────────────────────────────────────────────────────

pub const BEAM_SIZE: (f32, f32) = (40.0, 40.0);
pub const BEAM_SPEED: f32 = 10.0;
pub const BEAM_DAMAGE: i32 = 20;

pub const PROJECTILE_SPEED: f32 = 6.0;
/// Speed of a projectile after an EMP pulse has disabled it.
pub const PROJECTILE_INACTIVE_SPEED: f32 = 3.0;
pub const PROJECTILE_RADIUS_MIN: f32 = 10.0;
pub const PROJECTILE_RADIUS_MAX: f32 = 50.0;

// ── Enemies & boss ───────────────────────────────────────────────────────────

pub const ENEMY_SIZE: (f32, f32) = (80.0, 60.0);
pub const ENEMY_DESCENT_SPEED: f32 = 6.0;
pub const ENEMY_VARIANTS: u8 = 3;
pub const ENEMY_STOP_MIN: f32 = 50.0;
pub const ENEMY_STOP_MAX: f32 = HEIGHT / 2.0;
pub const ENEMY_FIRE_INTERVAL_MIN: u32 = 50;
pub const ENEMY_FIRE_INTERVAL_MAX: u32 = 300;
pub const FLANKING_FIRE_INTERVAL: u32 = 40;
/// Flanking enemies spawn left of this x or right of `FLANKING_RIGHT_EDGE`.
pub const FLANKING_LEFT_EDGE: f32 = 400.0;
pub const FLANKING_RIGHT_EDGE: f32 = 1200.0;

pub const BOSS_CENTER: (f32, f32) = (WIDTH / 2.0, HEIGHT / 2.0 - 50.0);
pub const BOSS_SIZE: (f32, f32) = (400.0, 400.0);
pub const BOSS_HIT_POINTS: i32 = 25;
pub const BOSS_FIRE_INTERVAL: u32 = 50;

// ── Spawn cadence (ticks) ────────────────────────────────────────────────────

pub const NORMAL_SPAWN_INTERVAL: u64 = 200;
pub const FLANKING_SPAWN_INTERVAL: u64 = 100;

// ── Effects ──────────────────────────────────────────────────────────────────

pub const EXPLOSION_SIZE: (f32, f32) = (80.0, 80.0);
pub const ENEMY_EXPLOSION_LIFE: i32 = 100;
pub const EXPLOSION_LIFE: i32 = 50;
/// Explosion image flips every this many ticks.
pub const EXPLOSION_FRAME_TICKS: i32 = 10;
pub const AREA_EFFECT_LIFE: i32 = 400;

// ── Score ────────────────────────────────────────────────────────────────────

pub const SCORE_ENEMY_KILL: i64 = 20;
pub const SCORE_PROJECTILE_SHOT: i64 = 5;
pub const SCORE_ENHANCED_ABSORB: i64 = 1;

pub const ENHANCED_COST: i64 = 50;
pub const PULSE_COST: i64 = 10;
pub const AREA_EFFECT_COST: i64 = 100;

pub const STAGE3_THRESHOLD: i64 = 500;
pub const BOSS_THRESHOLD: i64 = 800;
