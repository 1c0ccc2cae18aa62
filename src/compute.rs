/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`. Side effects are limited to the injected RNG and logging.
use glam::Vec2;
use log::{debug, info, trace};
use rand::Rng;

use crate::consts::*;
use crate::entities::{
    AreaEffect, Beam, Boss, Direction, Enemy, EnemyVariant, Explosion, FireInterval, GameState,
    GameStatus, ImageId, Mood, MotionState, Player, PlayerMode, Projectile, ProjectileStatus,
    Score, StageState,
};
use crate::geometry::{direction_to, on_screen, Rect};
use crate::input::{Action, HeldKeys, InputSnapshot};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state.
pub fn init_state(initial_score: i64) -> GameState {
    GameState {
        player: new_player(),
        projectiles: Vec::new(),
        beams: Vec::new(),
        enemies: Vec::new(),
        boss: None,
        explosions: Vec::new(),
        area_effects: Vec::new(),
        score: Score(initial_score),
        stage: StageState::Normal,
        status: GameStatus::Playing,
        tick: 0,
        pulse_flash: false,
    }
}

pub fn new_player() -> Player {
    let (x, y) = PLAYER_START;
    Player {
        rect: Rect::from_center(x, y, PLAYER_SIZE),
        facing: Direction::East,
        speed: PLAYER_SPEED,
        mode: PlayerMode::Normal,
        enhanced_ticks: 0,
        image: ImageId::Player(Direction::East),
    }
}

/// A beam leaves one player-extent ahead of the player, along its facing.
pub fn spawn_beam(player: &Player) -> Beam {
    let unit = player.facing.unit();
    let center = player.rect.center + player.rect.size() * unit;
    Beam {
        rect: Rect::new(center, Vec2::from(BEAM_SIZE)),
        velocity: unit * BEAM_SPEED,
        facing: player.facing,
        damage: BEAM_DAMAGE,
    }
}

/// A projectile drops from the firer's bottom edge, aimed from the firer's
/// center at where the target is right now.
pub fn spawn_projectile(firer: &Rect, target: &Rect, rng: &mut impl Rng) -> Projectile {
    let radius = rng.gen_range(PROJECTILE_RADIUS_MIN..=PROJECTILE_RADIUS_MAX).round();
    let spawn = Vec2::new(firer.center.x, firer.bottom());
    Projectile {
        rect: Rect::new(spawn, Vec2::splat(radius * 2.0)),
        direction: direction_to(firer, target),
        speed: PROJECTILE_SPEED,
        status: ProjectileStatus::Active,
    }
}

pub fn spawn_enemy(variant: EnemyVariant, rng: &mut impl Rng) -> Enemy {
    let art = rng.gen_range(1..=ENEMY_VARIANTS);
    let stop_at = rng.gen_range(ENEMY_STOP_MIN..=ENEMY_STOP_MAX).round();
    let (x, fire_interval) = match variant {
        EnemyVariant::Normal => (
            rng.gen_range(0.0..=WIDTH),
            FireInterval::Every(rng.gen_range(ENEMY_FIRE_INTERVAL_MIN..=ENEMY_FIRE_INTERVAL_MAX)),
        ),
        EnemyVariant::Flanking => {
            let x = if rng.gen_bool(0.5) {
                rng.gen_range(0.0..=FLANKING_LEFT_EDGE)
            } else {
                rng.gen_range(FLANKING_RIGHT_EDGE..=WIDTH)
            };
            (x, FireInterval::Every(FLANKING_FIRE_INTERVAL))
        }
    };
    Enemy {
        rect: Rect::from_center(x.round(), 0.0, ENEMY_SIZE),
        velocity: Vec2::new(0.0, ENEMY_DESCENT_SPEED),
        stop_at,
        motion: MotionState::Descending,
        fire_interval,
        variant,
        art,
    }
}

pub fn spawn_boss() -> Boss {
    let (x, y) = BOSS_CENTER;
    Boss {
        rect: Rect::from_center(x, y, BOSS_SIZE),
        hit_points: BOSS_HIT_POINTS,
        fire_interval: FireInterval::Every(BOSS_FIRE_INTERVAL),
    }
}

pub fn spawn_explosion(at: &Rect, life: i32) -> Explosion {
    Explosion {
        rect: Rect::new(at.center, Vec2::from(EXPLOSION_SIZE)),
        life,
    }
}

pub fn spawn_area_effect() -> AreaEffect {
    AreaEffect {
        rect: Rect::screen(),
        life: AREA_EFFECT_LIFE,
    }
}

// ── Per-entity motion ────────────────────────────────────────────────────────

/// Move the player according to the held keys.
///
/// The whole step is undone when it would leave the screen on either axis.
/// Facing (and with it the sprite) only changes on a nonzero step.
pub fn advance_player(player: &Player, held: &HeldKeys) -> Player {
    let mut next = player.clone();

    if next.mode == PlayerMode::Enhanced {
        next.enhanced_ticks = next.enhanced_ticks.saturating_sub(1);
        if next.enhanced_ticks == 0 {
            next.mode = PlayerMode::Normal;
        }
    }

    next.speed = if held.boost {
        PLAYER_BOOST_SPEED
    } else {
        PLAYER_SPEED
    };

    let (dx, dy) = held.delta();
    let step = Vec2::new(dx as f32, dy as f32) * next.speed;
    let moved = next.rect.translated(step);
    if on_screen(&moved) {
        next.rect = moved;
    }

    if let Some(facing) = Direction::from_delta(dx, dy) {
        next.facing = facing;
        next.image = ImageId::Player(facing);
    }
    next
}

/// `None` once the projectile has left the screen.
pub fn advance_projectile(projectile: &Projectile) -> Option<Projectile> {
    let rect = projectile.rect.translated(projectile.velocity());
    on_screen(&rect).then(|| Projectile {
        rect,
        ..projectile.clone()
    })
}

/// `None` once the beam has left the screen.
pub fn advance_beam(beam: &Beam) -> Option<Beam> {
    let rect = beam.rect.translated(beam.velocity);
    on_screen(&rect).then(|| Beam {
        rect,
        ..beam.clone()
    })
}

/// Descend until the center passes `stop_at`, then hold position.
pub fn advance_enemy(enemy: &Enemy) -> Enemy {
    let mut next = enemy.clone();
    if next.rect.center.y > next.stop_at {
        next.velocity = Vec2::ZERO;
        next.motion = MotionState::Holding;
    }
    next.rect = next.rect.translated(next.velocity);
    next
}

pub fn advance_explosion(explosion: &Explosion) -> Option<Explosion> {
    let life = explosion.life - 1;
    (life >= 0).then(|| Explosion {
        life,
        ..explosion.clone()
    })
}

pub fn advance_area_effect(effect: &AreaEffect) -> Option<AreaEffect> {
    let life = effect.life - 1;
    (life >= 0).then(|| AreaEffect {
        life,
        ..effect.clone()
    })
}

/// Which of the two explosion images is showing.
pub fn explosion_flipped(explosion: &Explosion) -> bool {
    (explosion.life / EXPLOSION_FRAME_TICKS) % 2 == 1
}

// ── Input-driven state transitions ───────────────────────────────────────────

pub fn fire_beam(state: &GameState) -> GameState {
    let mut beams = state.beams.clone();
    beams.push(spawn_beam(&state.player));
    GameState {
        beams,
        ..state.clone()
    }
}

/// Ability gate shared by every score-bought ability.
fn can_afford(state: &GameState, cost: i64) -> bool {
    state.stage.abilities_enabled() && state.score.value() >= cost
}

/// Enter (or refresh) Enhanced mode for `ENHANCED_COST` points.
pub fn enter_enhanced(state: &GameState) -> GameState {
    if !can_afford(state, ENHANCED_COST) {
        return state.clone();
    }
    info!("enhanced mode for {ENHANCED_DURATION} ticks");
    GameState {
        player: Player {
            mode: PlayerMode::Enhanced,
            enhanced_ticks: ENHANCED_DURATION,
            ..state.player.clone()
        },
        score: Score(state.score.value() - ENHANCED_COST),
        ..state.clone()
    }
}

/// EMP pulse: every enemy alive right now stops firing for good, every
/// projectile alive right now slows down and turns harmless. Anything
/// spawned later is untouched.
pub fn trigger_pulse(state: &GameState) -> GameState {
    if !can_afford(state, PULSE_COST) {
        return state.clone();
    }
    info!(
        "emp pulse: {} enemies, {} projectiles",
        state.enemies.len(),
        state.projectiles.len()
    );
    let enemies = state
        .enemies
        .iter()
        .map(|e| Enemy {
            fire_interval: FireInterval::Never,
            ..e.clone()
        })
        .collect();
    let projectiles = state
        .projectiles
        .iter()
        .map(|p| Projectile {
            speed: PROJECTILE_INACTIVE_SPEED,
            status: ProjectileStatus::Inactive,
            ..p.clone()
        })
        .collect();
    GameState {
        enemies,
        projectiles,
        score: Score(state.score.value() - PULSE_COST),
        pulse_flash: true,
        ..state.clone()
    }
}

/// Raise a gravity field for `AREA_EFFECT_COST` points.
pub fn trigger_area_effect(state: &GameState) -> GameState {
    if !can_afford(state, AREA_EFFECT_COST) {
        return state.clone();
    }
    info!("gravity field for {AREA_EFFECT_LIFE} ticks");
    let mut area_effects = state.area_effects.clone();
    area_effects.push(spawn_area_effect());
    GameState {
        area_effects,
        score: Score(state.score.value() - AREA_EFFECT_COST),
        ..state.clone()
    }
}

pub fn apply_action(state: &GameState, action: Action) -> GameState {
    match action {
        Action::Quit => GameState {
            status: GameStatus::Quit,
            ..state.clone()
        },
        Action::FireBeam => fire_beam(state),
        Action::EnterEnhanced => enter_enhanced(state),
        Action::TriggerPulse => trigger_pulse(state),
        Action::TriggerAreaEffect => trigger_area_effect(state),
    }
}

// ── Per-tick phases ──────────────────────────────────────────────────────────

/// Move the stage forward as the score allows. Never moves backward; both
/// transitions can happen in the same call.
pub fn advance_stage(state: &GameState) -> GameState {
    let mut next = state.clone();
    let score = next.score.value();

    if next.stage == StageState::Normal && score >= STAGE3_THRESHOLD {
        info!("stage 3 reached at score {score}");
        next.stage = StageState::Stage3;
    }

    let boss_alive = next.boss.as_ref().map_or(true, |b| b.hit_points > 0);
    if next.stage == StageState::Stage3 && score >= BOSS_THRESHOLD && boss_alive {
        info!("boss appears at score {score}");
        next.stage = StageState::Boss;
        next.boss = Some(spawn_boss());
    }
    next
}

/// Normal enemies arrive every `NORMAL_SPAWN_INTERVAL` ticks before the boss;
/// once the boss is up, flanking enemies arrive every
/// `FLANKING_SPAWN_INTERVAL` ticks instead.
pub fn spawn_enemies(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut enemies = state.enemies.clone();
    match state.stage {
        StageState::Normal | StageState::Stage3 if state.tick % NORMAL_SPAWN_INTERVAL == 0 => {
            enemies.push(spawn_enemy(EnemyVariant::Normal, rng));
        }
        StageState::Boss if state.tick % FLANKING_SPAWN_INTERVAL == 0 => {
            enemies.push(spawn_enemy(EnemyVariant::Flanking, rng));
        }
        _ => return state.clone(),
    }
    debug!("tick {}: enemy spawned ({} alive)", state.tick, enemies.len());
    GameState {
        enemies,
        ..state.clone()
    }
}

/// Holding enemies (and the boss, once it is up) fire when their interval
/// comes around.
pub fn fire_projectiles(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut projectiles = state.projectiles.clone();
    let target = state.player.rect;

    for enemy in &state.enemies {
        if enemy.motion == MotionState::Holding && enemy.fire_interval.fires_on(state.tick) {
            projectiles.push(spawn_projectile(&enemy.rect, &target, rng));
        }
    }
    if state.stage == StageState::Boss {
        if let Some(boss) = &state.boss {
            if boss.fire_interval.fires_on(state.tick) {
                projectiles.push(spawn_projectile(&boss.rect, &target, rng));
            }
        }
    }

    GameState {
        projectiles,
        ..state.clone()
    }
}

/// Match every `a` against the `b`s still in play, in order.
///
/// Returns hit masks for both sides. With `consume_b` a `b` can take out at
/// most one `a`; without it `b` stays in play (the gravity field).
fn collide_groups(a: &[Rect], b: &[Rect], consume_b: bool) -> (Vec<bool>, Vec<bool>) {
    let mut a_hit = vec![false; a.len()];
    let mut b_hit = vec![false; b.len()];
    for (ai, ra) in a.iter().enumerate() {
        for (bi, rb) in b.iter().enumerate() {
            if consume_b && b_hit[bi] {
                continue;
            }
            if ra.intersects(rb) {
                a_hit[ai] = true;
                b_hit[bi] = true;
            }
        }
    }
    (a_hit, b_hit)
}

fn survivors<T: Clone>(items: &[T], hit: &[bool]) -> Vec<T> {
    items
        .iter()
        .zip(hit)
        .filter(|&(_, &h)| !h)
        .map(|(item, _)| item.clone())
        .collect()
}

fn casualties<'a, T>(items: &'a [T], hit: &'a [bool]) -> impl Iterator<Item = &'a T> {
    items.iter().zip(hit).filter(|&(_, &h)| h).map(|(item, _)| item)
}

/// Resolve every collision pair in a fixed order:
/// enemy×beam, projectile×beam, projectile×gravity field,
/// projectile×player, boss×beam (boss stage only).
///
/// A hit on a Normal player by an active projectile ends the game on the
/// spot; a boss left without hit points wins it.
pub fn resolve_collisions(state: &GameState) -> GameState {
    let mut next = state.clone();
    let mut score = next.score.value();

    // ── Enemy × Beam ─────────────────────────────────────────────────────────
    let enemy_rects: Vec<Rect> = next.enemies.iter().map(|e| e.rect).collect();
    let beam_rects: Vec<Rect> = next.beams.iter().map(|b| b.rect).collect();
    let (killed, used) = collide_groups(&enemy_rects, &beam_rects, true);
    for enemy in casualties(&next.enemies, &killed) {
        next.explosions
            .push(spawn_explosion(&enemy.rect, ENEMY_EXPLOSION_LIFE));
        next.player.image = ImageId::PlayerFace(Mood::Joy);
        score += SCORE_ENEMY_KILL;
        debug!("enemy destroyed at {:?}", enemy.rect.center);
    }
    next.enemies = survivors(&next.enemies, &killed);
    next.beams = survivors(&next.beams, &used);

    // ── Projectile × Beam ────────────────────────────────────────────────────
    let projectile_rects: Vec<Rect> = next.projectiles.iter().map(|p| p.rect).collect();
    let beam_rects: Vec<Rect> = next.beams.iter().map(|b| b.rect).collect();
    let (shot, used) = collide_groups(&projectile_rects, &beam_rects, true);
    for projectile in casualties(&next.projectiles, &shot) {
        next.explosions
            .push(spawn_explosion(&projectile.rect, EXPLOSION_LIFE));
        score += SCORE_PROJECTILE_SHOT;
    }
    next.projectiles = survivors(&next.projectiles, &shot);
    next.beams = survivors(&next.beams, &used);

    // ── Projectile × Gravity field ───────────────────────────────────────────
    let projectile_rects: Vec<Rect> = next.projectiles.iter().map(|p| p.rect).collect();
    let field_rects: Vec<Rect> = next.area_effects.iter().map(|a| a.rect).collect();
    let (crushed, _) = collide_groups(&projectile_rects, &field_rects, false);
    for projectile in casualties(&next.projectiles, &crushed) {
        next.explosions
            .push(spawn_explosion(&projectile.rect, EXPLOSION_LIFE));
        next.player.image = ImageId::PlayerFace(Mood::Sorrow);
    }
    next.projectiles = survivors(&next.projectiles, &crushed);

    // ── Projectile × Player ──────────────────────────────────────────────────
    let player_rect = next.player.rect;
    let (hits, rest): (Vec<Projectile>, Vec<Projectile>) = next
        .projectiles
        .iter()
        .cloned()
        .partition(|p| p.rect.intersects(&player_rect));
    next.projectiles = rest;
    for projectile in &hits {
        if next.player.mode == PlayerMode::Enhanced {
            next.explosions
                .push(spawn_explosion(&projectile.rect, EXPLOSION_LIFE));
            score += SCORE_ENHANCED_ABSORB;
        }
        if projectile.status == ProjectileStatus::Inactive {
            continue;
        }
        if next.player.mode == PlayerMode::Normal {
            info!("player hit at tick {}: game over", next.tick);
            next.player.image = ImageId::PlayerFace(Mood::Sorrow);
            next.status = GameStatus::Lost;
            next.score = Score(score);
            return next;
        }
    }

    // ── Boss × Beam ──────────────────────────────────────────────────────────
    if next.stage == StageState::Boss {
        if let Some(mut boss) = next.boss.take() {
            let (hits, rest): (Vec<Beam>, Vec<Beam>) = next
                .beams
                .iter()
                .cloned()
                .partition(|b| b.rect.intersects(&boss.rect));
            next.beams = rest;
            for beam in &hits {
                next.explosions
                    .push(spawn_explosion(&boss.rect, EXPLOSION_LIFE));
                next.player.image = ImageId::PlayerFace(Mood::Joy);
                boss.hit_points -= beam.damage;
                debug!("boss hit, {} hit points left", boss.hit_points);
            }
            if boss.hit_points <= 0 {
                info!("boss defeated at tick {}", next.tick);
                next.status = GameStatus::Won;
            }
            next.boss = Some(boss);
        }
    }

    next.score = Score(score);
    next
}

/// Move every entity one step and drop the ones that expire or leave the
/// screen.
pub fn advance_entities(state: &GameState, held: &HeldKeys) -> GameState {
    GameState {
        player: advance_player(&state.player, held),
        beams: state.beams.iter().filter_map(advance_beam).collect(),
        enemies: state.enemies.iter().map(advance_enemy).collect(),
        projectiles: state.projectiles.iter().filter_map(advance_projectile).collect(),
        explosions: state.explosions.iter().filter_map(advance_explosion).collect(),
        area_effects: state
            .area_effects
            .iter()
            .filter_map(advance_area_effect)
            .collect(),
        ..state.clone()
    }
}

// ── Per-frame tick (RNG injected) ─────────────────────────────────────────────

/// Advance the simulation by one tick. All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// Phases run in a fixed order: discrete actions (instant effects such as
/// the EMP pulse land here, before anything moves), stage check, enemy
/// spawns, enemy fire, collisions, then motion. A finished game is
/// returned unchanged, and a tick that ends the game skips motion.
pub fn tick(state: &GameState, input: &InputSnapshot, rng: &mut impl Rng) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }
    trace!("tick {}", state.tick);

    // ── 1. Discrete actions ──────────────────────────────────────────────────
    let mut next = GameState {
        pulse_flash: false,
        ..state.clone()
    };
    for &action in &input.actions {
        next = apply_action(&next, action);
        if next.status != GameStatus::Playing {
            return next;
        }
    }

    // ── 2-4. Stage, spawns, fire ─────────────────────────────────────────────
    next = advance_stage(&next);
    next = spawn_enemies(&next, rng);
    next = fire_projectiles(&next, rng);

    // ── 5-6. Collisions ──────────────────────────────────────────────────────
    next = resolve_collisions(&next);
    if next.status != GameStatus::Playing {
        return next;
    }

    // ── 7. Motion ────────────────────────────────────────────────────────────
    next = advance_entities(&next, &input.held);
    next.tick += 1;
    next
}
