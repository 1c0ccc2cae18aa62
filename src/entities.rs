/// All game entity types: plain data plus a few lookups, no game logic.
use glam::Vec2;

use crate::geometry::Rect;

// ── Orientation ──────────────────────────────────────────────────────────────

/// One of the eight directions the player can face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::NorthEast,
        Direction::North,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// Screen-space key delta (`y` grows downward).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::NorthEast => (1, -1),
            Direction::North => (0, -1),
            Direction::NorthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::SouthWest => (-1, 1),
            Direction::South => (0, 1),
            Direction::SouthEast => (1, 1),
        }
    }

    /// Inverse of [`Direction::delta`]; `None` for `(0, 0)` and anything
    /// outside the unit square.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.delta() == (dx, dy))
    }

    pub fn unit(self) -> Vec2 {
        let (dx, dy) = self.delta();
        Vec2::new(dx as f32, dy as f32).normalize()
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::East => "east",
            Direction::NorthEast => "north_east",
            Direction::North => "north",
            Direction::NorthWest => "north_west",
            Direction::West => "west",
            Direction::SouthWest => "south_west",
            Direction::South => "south",
            Direction::SouthEast => "south_east",
        }
    }
}

// ── Image handles ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mood {
    Joy,
    Sorrow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backdrop {
    Field,
    Space,
}

/// Logical image handle. The front-end resolves it to something drawable;
/// the simulation never looks past the handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageId {
    Player(Direction),
    PlayerFace(Mood),
    Beam(Direction),
    Projectile,
    /// Enemy art variant, 1..=3.
    Enemy(u8),
    Boss,
    Explosion,
    AreaEffect,
    PulseFlash,
    Background(Backdrop),
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerMode {
    Normal,
    Enhanced,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub facing: Direction,
    pub speed: f32,
    pub mode: PlayerMode,
    /// Ticks left in Enhanced mode; zero while Normal.
    pub enhanced_ticks: u32,
    pub image: ImageId,
}

// ── Projectiles ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileStatus {
    Active,
    /// Disabled by an EMP pulse: slowed down and harmless to the player.
    Inactive,
}

/// Enemy-fired shot. Aimed once at spawn, never re-aimed.
#[derive(Clone, Debug)]
pub struct Projectile {
    pub rect: Rect,
    /// Unit direction fixed at spawn.
    pub direction: Vec2,
    pub speed: f32,
    pub status: ProjectileStatus,
}

impl Projectile {
    pub fn velocity(&self) -> Vec2 {
        self.direction * self.speed
    }
}

/// Player-fired shot.
#[derive(Clone, Debug)]
pub struct Beam {
    pub rect: Rect,
    pub velocity: Vec2,
    pub facing: Direction,
    pub damage: i32,
}

// ── Enemies & boss ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyVariant {
    /// Spawns anywhere along the top edge.
    Normal,
    /// Spawns outside the band the boss occupies and fires faster.
    Flanking,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionState {
    Descending,
    Holding,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FireInterval {
    Every(u32),
    Never,
}

impl FireInterval {
    /// Whether a shot is due on `tick`.
    pub fn fires_on(self, tick: u64) -> bool {
        match self {
            FireInterval::Every(0) | FireInterval::Never => false,
            FireInterval::Every(n) => tick % n as u64 == 0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub rect: Rect,
    pub velocity: Vec2,
    /// Vertical center past which the enemy stops descending.
    pub stop_at: f32,
    pub motion: MotionState,
    pub fire_interval: FireInterval,
    pub variant: EnemyVariant,
    /// Art variant, 1..=3.
    pub art: u8,
}

impl Enemy {
    /// An enemy hit by an EMP pulse never fires again and is drawn inverted.
    pub fn is_neutralized(&self) -> bool {
        self.fire_interval == FireInterval::Never
    }
}

#[derive(Clone, Debug)]
pub struct Boss {
    pub rect: Rect,
    pub hit_points: i32,
    pub fire_interval: FireInterval,
}

// ── Effects ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Explosion {
    pub rect: Rect,
    /// Remaining ticks; removed once it drops below zero.
    pub life: i32,
}

/// Full-screen gravity field that destroys projectiles it touches.
#[derive(Clone, Debug)]
pub struct AreaEffect {
    pub rect: Rect,
    pub life: i32,
}

// ── Score & progression ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score(pub i64);

impl Score {
    pub fn value(self) -> i64 {
        self.0
    }

    pub fn text(self) -> String {
        format!("Score: {}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum StageState {
    Normal,
    Stage3,
    Boss,
}

impl StageState {
    /// Enhanced mode, the EMP pulse and the gravity field are only usable
    /// before Stage 3.
    pub fn abilities_enabled(self) -> bool {
        self == StageState::Normal
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Player was hit by an active projectile while Normal.
    Lost,
    /// Boss hit points dropped to zero.
    Won,
    Quit,
}

// ── Master game state ────────────────────────────────────────────────────────

/// The entire game state. Cloneable so the pure update functions can return
/// a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub beams: Vec<Beam>,
    pub enemies: Vec<Enemy>,
    /// Present from the moment the Boss stage begins.
    pub boss: Option<Boss>,
    pub explosions: Vec<Explosion>,
    pub area_effects: Vec<AreaEffect>,
    pub score: Score,
    pub stage: StageState,
    pub status: GameStatus,
    pub tick: u64,
    /// Set on the tick an EMP pulse fires so the flash gets drawn once.
    pub pulse_flash: bool,
}
