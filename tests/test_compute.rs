use approx::assert_abs_diff_eq;
use glam::Vec2;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use musou_shooter::compute::*;
use musou_shooter::consts::*;
use musou_shooter::entities::*;
use musou_shooter::geometry::{on_screen, Rect};
use musou_shooter::input::{Action, HeldKeys, InputSnapshot};

/// Fresh state one tick in, so nothing spawns or fires on its own.
fn make_state() -> GameState {
    let mut s = init_state(0);
    s.tick = 1;
    s
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn enemy_at(x: f32, y: f32) -> Enemy {
    Enemy {
        rect: Rect::from_center(x, y, ENEMY_SIZE),
        velocity: Vec2::ZERO,
        stop_at: 0.0,
        motion: MotionState::Holding,
        fire_interval: FireInterval::Every(50),
        variant: EnemyVariant::Normal,
        art: 1,
    }
}

fn projectile_at(x: f32, y: f32) -> Projectile {
    Projectile {
        rect: Rect::from_center(x, y, (20.0, 20.0)),
        direction: Vec2::Y,
        speed: PROJECTILE_SPEED,
        status: ProjectileStatus::Active,
    }
}

fn beam_at(x: f32, y: f32) -> Beam {
    Beam {
        rect: Rect::from_center(x, y, BEAM_SIZE),
        velocity: Vec2::new(BEAM_SPEED, 0.0),
        facing: Direction::East,
        damage: BEAM_DAMAGE,
    }
}

fn held(up: bool, down: bool, left: bool, right: bool, boost: bool) -> HeldKeys {
    HeldKeys {
        up,
        down,
        left,
        right,
        boost,
    }
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_player() {
    let s = init_state(0);
    assert_eq!(s.player.rect.center, Vec2::new(900.0, 400.0));
    assert_eq!(s.player.facing, Direction::East);
    assert_eq!(s.player.mode, PlayerMode::Normal);
    assert_eq!(s.player.image, ImageId::Player(Direction::East));
}

#[test]
fn init_state_empty_collections() {
    let s = init_state(790);
    assert!(s.enemies.is_empty());
    assert!(s.projectiles.is_empty());
    assert!(s.beams.is_empty());
    assert!(s.boss.is_none());
    assert_eq!(s.score, Score(790));
    assert_eq!(s.stage, StageState::Normal);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.tick, 0);
}

// ── advance_player ────────────────────────────────────────────────────────────

#[test]
fn player_moves_at_base_speed() {
    let p = new_player();
    let p2 = advance_player(&p, &held(false, false, false, true, false));
    assert_eq!(p2.rect.center, Vec2::new(910.0, 400.0));
    assert_eq!(p2.speed, PLAYER_SPEED);
}

#[test]
fn player_boost_doubles_speed() {
    let p = new_player();
    let p2 = advance_player(&p, &held(false, false, false, true, true));
    assert_eq!(p2.rect.center, Vec2::new(920.0, 400.0));
}

#[test]
fn player_diagonal_sets_facing_and_image() {
    let p = new_player();
    let p2 = advance_player(&p, &held(true, false, true, false, false));
    assert_eq!(p2.rect.center, Vec2::new(890.0, 390.0));
    assert_eq!(p2.facing, Direction::NorthWest);
    assert_eq!(p2.image, ImageId::Player(Direction::NorthWest));
}

#[test]
fn opposite_keys_cancel_and_keep_facing() {
    let p = new_player();
    let p2 = advance_player(&p, &held(false, false, true, true, false));
    assert_eq!(p2.rect.center, p.rect.center);
    assert_eq!(p2.facing, Direction::East);
}

#[test]
fn standing_still_keeps_mood_face() {
    let mut p = new_player();
    p.image = ImageId::PlayerFace(Mood::Joy);
    let p2 = advance_player(&p, &HeldKeys::default());
    assert_eq!(p2.image, ImageId::PlayerFace(Mood::Joy));
    let p3 = advance_player(&p2, &held(false, true, false, false, false));
    assert_eq!(p3.image, ImageId::Player(Direction::South));
}

#[test]
fn out_of_bounds_step_is_reverted_on_both_axes() {
    let mut p = new_player();
    // left edge at x=5: one more step left would leave the screen
    p.rect = Rect::from_center(55.0, 400.0, PLAYER_SIZE);
    let p2 = advance_player(&p, &held(true, false, true, false, false));
    assert_eq!(p2.rect.center, Vec2::new(55.0, 400.0));
}

#[test]
fn enhanced_mode_counts_down_to_normal() {
    let mut p = new_player();
    p.mode = PlayerMode::Enhanced;
    p.enhanced_ticks = 2;
    let p2 = advance_player(&p, &HeldKeys::default());
    assert_eq!(p2.mode, PlayerMode::Enhanced);
    assert_eq!(p2.enhanced_ticks, 1);
    let p3 = advance_player(&p2, &HeldKeys::default());
    assert_eq!(p3.mode, PlayerMode::Normal);
    assert_eq!(p3.enhanced_ticks, 0);
}

proptest! {
    #[test]
    fn player_never_leaves_the_screen(
        steps in prop::collection::vec(
            (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()),
            0..300,
        )
    ) {
        let mut p = new_player();
        for (up, down, left, right, boost) in steps {
            p = advance_player(&p, &held(up, down, left, right, boost));
            prop_assert!(on_screen(&p.rect));
        }
    }
}

// ── Beams ─────────────────────────────────────────────────────────────────────

#[test]
fn beam_leaves_ahead_of_player() {
    let b = spawn_beam(&new_player());
    assert_eq!(b.rect.center, Vec2::new(1000.0, 400.0));
    assert_eq!(b.velocity, Vec2::new(BEAM_SPEED, 0.0));
    assert_eq!(b.damage, BEAM_DAMAGE);
    assert_eq!(b.facing, Direction::East);
}

#[test]
fn diagonal_beam_moves_at_beam_speed() {
    let mut p = new_player();
    p.facing = Direction::NorthEast;
    let b = spawn_beam(&p);
    assert_abs_diff_eq!(b.velocity.length(), BEAM_SPEED, epsilon = 1e-4);
    assert!(b.velocity.x > 0.0 && b.velocity.y < 0.0);
}

#[test]
fn beam_moves_then_despawns_off_screen() {
    let b = beam_at(1000.0, 400.0);
    let b2 = advance_beam(&b).expect("still on screen");
    assert_eq!(b2.rect.center, Vec2::new(1010.0, 400.0));

    // right edge at 1595 → 1605 after one step
    let edge = beam_at(1575.0, 400.0);
    assert!(advance_beam(&edge).is_none());
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[test]
fn projectile_flies_a_straight_line_at_fixed_speed() {
    let firer = Rect::from_center(200.0, 100.0, ENEMY_SIZE);
    let target = new_player().rect;
    let mut p = spawn_projectile(&firer, &target, &mut seeded_rng());
    let start = p.rect.center;
    assert_eq!(start, Vec2::new(200.0, 130.0));
    let unit = (target.center - firer.center).normalize();

    for _ in 0..10 {
        p = advance_projectile(&p).expect("still on screen");
    }
    let expected = start + 10.0 * PROJECTILE_SPEED * unit;
    assert_abs_diff_eq!(p.rect.center.x, expected.x, epsilon = 1e-3);
    assert_abs_diff_eq!(p.rect.center.y, expected.y, epsilon = 1e-3);
}

#[test]
fn projectile_radius_is_bounded() {
    let mut rng = seeded_rng();
    let firer = Rect::from_center(200.0, 100.0, ENEMY_SIZE);
    let target = new_player().rect;
    for _ in 0..100 {
        let p = spawn_projectile(&firer, &target, &mut rng);
        let d = p.rect.size().x;
        assert!((2.0 * PROJECTILE_RADIUS_MIN..=2.0 * PROJECTILE_RADIUS_MAX).contains(&d));
        assert_eq!(p.status, ProjectileStatus::Active);
    }
}

#[test]
fn projectile_fired_from_target_center_falls_straight_down() {
    let firer = Rect::from_center(900.0, 400.0, ENEMY_SIZE);
    let p = spawn_projectile(&firer, &new_player().rect, &mut seeded_rng());
    assert_eq!(p.direction, Vec2::Y);
}

#[test]
fn projectile_is_aimed_from_firer_center_not_spawn_edge() {
    // the player starts level with the boss's center, to its right
    let boss = spawn_boss();
    let p = spawn_projectile(&boss.rect, &new_player().rect, &mut seeded_rng());
    assert_eq!(p.rect.center, Vec2::new(boss.rect.center.x, boss.rect.bottom()));
    assert_abs_diff_eq!(p.direction.x, 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(p.direction.y, 0.0, epsilon = 1e-6);
}

#[test]
fn projectile_despawns_off_screen() {
    let p = projectile_at(300.0, HEIGHT - 12.0);
    assert!(advance_projectile(&p).is_none());
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[test]
fn normal_enemy_spawn_ranges() {
    let mut rng = seeded_rng();
    for _ in 0..100 {
        let e = spawn_enemy(EnemyVariant::Normal, &mut rng);
        assert_eq!(e.rect.center.y, 0.0);
        assert!((0.0..=WIDTH).contains(&e.rect.center.x));
        assert!((1..=ENEMY_VARIANTS).contains(&e.art));
        assert!((ENEMY_STOP_MIN..=ENEMY_STOP_MAX).contains(&e.stop_at));
        assert_eq!(e.motion, MotionState::Descending);
        match e.fire_interval {
            FireInterval::Every(n) => {
                assert!((ENEMY_FIRE_INTERVAL_MIN..=ENEMY_FIRE_INTERVAL_MAX).contains(&n))
            }
            FireInterval::Never => panic!("fresh enemy must fire"),
        }
    }
}

#[test]
fn flanking_enemy_avoids_the_boss_band() {
    let mut rng = seeded_rng();
    for _ in 0..100 {
        let e = spawn_enemy(EnemyVariant::Flanking, &mut rng);
        let x = e.rect.center.x;
        assert!(x <= FLANKING_LEFT_EDGE || x >= FLANKING_RIGHT_EDGE, "x = {x}");
        assert_eq!(e.fire_interval, FireInterval::Every(FLANKING_FIRE_INTERVAL));
    }
}

#[test]
fn enemy_descends_then_holds() {
    let mut e = spawn_enemy(EnemyVariant::Normal, &mut seeded_rng());
    e.stop_at = 50.0;
    for _ in 0..20 {
        e = advance_enemy(&e);
    }
    assert_eq!(e.motion, MotionState::Holding);
    assert_eq!(e.velocity, Vec2::ZERO);
    assert_eq!(e.rect.center.y, 54.0);
}

// ── Effects ───────────────────────────────────────────────────────────────────

#[test]
fn explosion_lives_until_life_goes_negative() {
    let x = spawn_explosion(&Rect::from_center(10.0, 10.0, (5.0, 5.0)), 2);
    assert_eq!(x.rect.size(), Vec2::from(EXPLOSION_SIZE));
    let x = advance_explosion(&x).expect("life 1");
    let x = advance_explosion(&x).expect("life 0");
    assert_eq!(x.life, 0);
    assert!(advance_explosion(&x).is_none());
}

#[test]
fn explosion_image_flips_every_ten_ticks() {
    let mut x = spawn_explosion(&Rect::screen(), 15);
    assert!(explosion_flipped(&x));
    x.life = 5;
    assert!(!explosion_flipped(&x));
    x.life = 25;
    assert!(!explosion_flipped(&x));
}

#[test]
fn area_effect_expires() {
    let mut a = spawn_area_effect();
    assert_eq!(a.rect, Rect::screen());
    a.life = 0;
    assert!(advance_area_effect(&a).is_none());
}

// ── Abilities ─────────────────────────────────────────────────────────────────

#[test]
fn enhanced_requires_fifty_points() {
    let mut s = make_state();
    s.score = Score(49);
    let s2 = enter_enhanced(&s);
    assert_eq!(s2.player.mode, PlayerMode::Normal);
    assert_eq!(s2.score, Score(49));

    s.score = Score(50);
    let s3 = enter_enhanced(&s);
    assert_eq!(s3.player.mode, PlayerMode::Enhanced);
    assert_eq!(s3.player.enhanced_ticks, ENHANCED_DURATION);
    assert_eq!(s3.score, Score(0));
}

#[test]
fn pulse_requires_ten_points() {
    let mut s = make_state();
    s.score = Score(9);
    s.enemies.push(enemy_at(300.0, 200.0));
    let s2 = trigger_pulse(&s);
    assert_eq!(s2.enemies[0].fire_interval, FireInterval::Every(50));
    assert!(!s2.pulse_flash);
    assert_eq!(s2.score, Score(9));

    s.score = Score(10);
    let s3 = trigger_pulse(&s);
    assert!(s3.enemies[0].is_neutralized());
    assert!(s3.pulse_flash);
    assert_eq!(s3.score, Score(0));
}

#[test]
fn pulse_disables_live_projectiles() {
    let mut s = make_state();
    s.score = Score(10);
    s.projectiles.push(projectile_at(300.0, 600.0));
    let s2 = trigger_pulse(&s);
    assert_eq!(s2.projectiles[0].status, ProjectileStatus::Inactive);
    assert_eq!(s2.projectiles[0].speed, PROJECTILE_INACTIVE_SPEED);
}

#[test]
fn area_effect_requires_hundred_points() {
    let mut s = make_state();
    s.score = Score(99);
    assert!(trigger_area_effect(&s).area_effects.is_empty());

    s.score = Score(100);
    let s2 = trigger_area_effect(&s);
    assert_eq!(s2.area_effects.len(), 1);
    assert_eq!(s2.score, Score(0));
}

#[test]
fn abilities_are_disabled_from_stage3_on() {
    for stage in [StageState::Stage3, StageState::Boss] {
        let mut s = make_state();
        s.score = Score(1000);
        s.stage = stage;
        s.enemies.push(enemy_at(300.0, 200.0));

        let s2 = apply_action(&s, Action::EnterEnhanced);
        let s2 = apply_action(&s2, Action::TriggerPulse);
        let s2 = apply_action(&s2, Action::TriggerAreaEffect);
        assert_eq!(s2.player.mode, PlayerMode::Normal);
        assert!(!s2.enemies[0].is_neutralized());
        assert!(s2.area_effects.is_empty());
        assert_eq!(s2.score, Score(1000));
    }
}

#[test]
fn beam_fires_in_any_stage() {
    let mut s = make_state();
    s.stage = StageState::Boss;
    let s2 = apply_action(&s, Action::FireBeam);
    assert_eq!(s2.beams.len(), 1);
}

// ── Stage progression ─────────────────────────────────────────────────────────

#[test]
fn stage3_at_five_hundred() {
    let mut s = make_state();
    s.score = Score(499);
    assert_eq!(advance_stage(&s).stage, StageState::Normal);
    s.score = Score(500);
    assert_eq!(advance_stage(&s).stage, StageState::Stage3);
}

#[test]
fn stage3_never_reverts() {
    let mut s = make_state();
    s.stage = StageState::Stage3;
    s.score = Score(0);
    assert_eq!(advance_stage(&s).stage, StageState::Stage3);
}

#[test]
fn boss_needs_eight_hundred() {
    let mut s = make_state();
    s.stage = StageState::Stage3;
    s.score = Score(799);
    let s2 = advance_stage(&s);
    assert_eq!(s2.stage, StageState::Stage3);
    assert!(s2.boss.is_none());
}

#[test]
fn both_transitions_can_happen_at_once() {
    let mut s = make_state();
    s.score = Score(810);
    let s2 = advance_stage(&s);
    assert_eq!(s2.stage, StageState::Boss);
    assert_eq!(s2.boss.as_ref().map(|b| b.hit_points), Some(BOSS_HIT_POINTS));
}

proptest! {
    #[test]
    fn stage_is_monotonic(deltas in prop::collection::vec(-300i64..300, 1..60)) {
        let mut s = make_state();
        let mut prev = s.stage;
        for delta in deltas {
            s.score = Score(s.score.value() + delta);
            s = advance_stage(&s);
            prop_assert!(s.stage >= prev);
            if s.stage == StageState::Boss {
                prop_assert!(s.boss.is_some());
            }
            prev = s.stage;
        }
    }
}

// ── Spawning & firing ─────────────────────────────────────────────────────────

#[test]
fn normal_enemies_every_two_hundred_ticks() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    for (tick, expected) in [(0, 1), (1, 0), (100, 0), (200, 1)] {
        s.tick = tick;
        let s2 = spawn_enemies(&s, &mut rng);
        assert_eq!(s2.enemies.len(), expected, "tick {tick}");
    }
}

#[test]
fn boss_stage_spawns_only_flanking_enemies() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.stage = StageState::Boss;
    s.tick = 200;
    let s2 = spawn_enemies(&s, &mut rng);
    assert_eq!(s2.enemies.len(), 1);
    assert_eq!(s2.enemies[0].variant, EnemyVariant::Flanking);

    s.tick = 100;
    assert_eq!(spawn_enemies(&s, &mut rng).enemies.len(), 1);
    s.tick = 150;
    assert!(spawn_enemies(&s, &mut rng).enemies.is_empty());
}

#[test]
fn holding_enemy_fires_on_its_interval() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.enemies.push(enemy_at(300.0, 200.0));

    s.tick = 100;
    assert_eq!(fire_projectiles(&s, &mut rng).projectiles.len(), 1);
    s.tick = 101;
    assert!(fire_projectiles(&s, &mut rng).projectiles.is_empty());
}

#[test]
fn descending_or_neutralized_enemies_hold_fire() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    let mut descending = enemy_at(300.0, 200.0);
    descending.motion = MotionState::Descending;
    let mut neutralized = enemy_at(600.0, 200.0);
    neutralized.fire_interval = FireInterval::Never;
    s.enemies = vec![descending, neutralized];
    s.tick = 100;
    assert!(fire_projectiles(&s, &mut rng).projectiles.is_empty());
}

#[test]
fn boss_fires_on_its_own_interval() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.stage = StageState::Boss;
    s.boss = Some(spawn_boss());
    s.tick = BOSS_FIRE_INTERVAL as u64;
    assert_eq!(fire_projectiles(&s, &mut rng).projectiles.len(), 1);
}

// ── Collisions ────────────────────────────────────────────────────────────────

#[test]
fn beam_destroys_enemy_for_twenty() {
    let mut s = make_state();
    s.enemies.push(enemy_at(300.0, 300.0));
    s.beams.push(beam_at(300.0, 300.0));
    let s2 = resolve_collisions(&s);
    assert!(s2.enemies.is_empty());
    assert!(s2.beams.is_empty());
    assert_eq!(s2.score, Score(SCORE_ENEMY_KILL));
    assert_eq!(s2.explosions.len(), 1);
    assert_eq!(s2.explosions[0].life, ENEMY_EXPLOSION_LIFE);
    assert_eq!(s2.player.image, ImageId::PlayerFace(Mood::Joy));
}

#[test]
fn one_beam_takes_out_one_enemy() {
    let mut s = make_state();
    s.enemies.push(enemy_at(300.0, 300.0));
    s.enemies.push(enemy_at(310.0, 300.0));
    s.beams.push(beam_at(305.0, 300.0));
    let s2 = resolve_collisions(&s);
    assert_eq!(s2.enemies.len(), 1);
    assert_eq!(s2.score, Score(SCORE_ENEMY_KILL));
}

#[test]
fn beam_destroys_projectile_for_five() {
    let mut s = make_state();
    s.projectiles.push(projectile_at(300.0, 600.0));
    s.beams.push(beam_at(300.0, 600.0));
    let s2 = resolve_collisions(&s);
    assert!(s2.projectiles.is_empty());
    assert!(s2.beams.is_empty());
    assert_eq!(s2.score, Score(SCORE_PROJECTILE_SHOT));
    assert_eq!(s2.explosions[0].life, EXPLOSION_LIFE);
}

#[test]
fn gravity_field_crushes_projectiles_for_nothing() {
    let mut s = make_state();
    s.area_effects.push(spawn_area_effect());
    s.projectiles.push(projectile_at(300.0, 600.0));
    s.projectiles.push(projectile_at(1300.0, 700.0));
    s.enemies.push(enemy_at(300.0, 200.0));
    let s2 = resolve_collisions(&s);
    assert!(s2.projectiles.is_empty());
    assert_eq!(s2.explosions.len(), 2);
    assert_eq!(s2.area_effects.len(), 1);
    assert_eq!(s2.enemies.len(), 1);
    assert_eq!(s2.score, Score(0));
    assert_eq!(s2.player.image, ImageId::PlayerFace(Mood::Sorrow));
}

#[test]
fn enhanced_player_absorbs_projectiles() {
    let mut s = make_state();
    s.player.mode = PlayerMode::Enhanced;
    s.player.enhanced_ticks = 100;
    s.projectiles.push(projectile_at(900.0, 400.0));
    let s2 = resolve_collisions(&s);
    assert_eq!(s2.status, GameStatus::Playing);
    assert!(s2.projectiles.is_empty());
    assert_eq!(s2.score, Score(SCORE_ENHANCED_ABSORB));
    assert_eq!(s2.explosions.len(), 1);
}

#[test]
fn active_projectile_on_normal_player_loses() {
    let mut s = make_state();
    s.projectiles.push(projectile_at(900.0, 400.0));
    let s2 = resolve_collisions(&s);
    assert_eq!(s2.status, GameStatus::Lost);
    assert_eq!(s2.player.image, ImageId::PlayerFace(Mood::Sorrow));
}

#[test]
fn inactive_projectile_is_harmless() {
    let mut s = make_state();
    let mut p = projectile_at(900.0, 400.0);
    p.status = ProjectileStatus::Inactive;
    s.projectiles.push(p);
    let s2 = resolve_collisions(&s);
    assert_eq!(s2.status, GameStatus::Playing);
    assert!(s2.projectiles.is_empty());
    assert_eq!(s2.score, Score(0));
    assert!(s2.explosions.is_empty());
}

#[test]
fn beams_wear_the_boss_down_to_a_win() {
    let mut s = make_state();
    s.stage = StageState::Boss;
    s.boss = Some(spawn_boss());
    s.beams.push(beam_at(700.0, 300.0));
    let s2 = resolve_collisions(&s);
    assert_eq!(s2.boss.as_ref().map(|b| b.hit_points), Some(5));
    assert_eq!(s2.status, GameStatus::Playing);
    assert!(s2.beams.is_empty());

    let mut s3 = s2.clone();
    s3.beams.push(beam_at(700.0, 300.0));
    let s4 = resolve_collisions(&s3);
    assert_eq!(s4.boss.as_ref().map(|b| b.hit_points), Some(-15));
    assert_eq!(s4.status, GameStatus::Won);
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_increments_counter() {
    let mut s = make_state();
    s.tick = 5;
    let s2 = tick(&s, &InputSnapshot::idle(), &mut seeded_rng());
    assert_eq!(s2.tick, 6);
}

#[test]
fn tick_moves_player_with_held_keys() {
    let s = make_state();
    let input = InputSnapshot::holding(held(false, true, false, false, false));
    let s2 = tick(&s, &input, &mut seeded_rng());
    assert_eq!(s2.player.rect.center, Vec2::new(900.0, 410.0));
}

#[test]
fn quit_stops_immediately() {
    let s = make_state();
    let s2 = tick(&s, &InputSnapshot::with_actions(&[Action::Quit]), &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::Quit);
    assert_eq!(s2.tick, s.tick);
}

#[test]
fn finished_game_does_not_advance() {
    let mut s = make_state();
    s.status = GameStatus::Lost;
    s.beams.push(beam_at(300.0, 300.0));
    let s2 = tick(&s, &InputSnapshot::idle(), &mut seeded_rng());
    assert_eq!(s2.tick, s.tick);
    assert_eq!(s2.beams[0].rect.center, Vec2::new(300.0, 300.0));
}

#[test]
fn pulse_flash_lasts_one_tick() {
    let mut s = make_state();
    s.score = Score(10);
    let mut rng = seeded_rng();
    let s2 = tick(&s, &InputSnapshot::with_actions(&[Action::TriggerPulse]), &mut rng);
    assert!(s2.pulse_flash);
    let s3 = tick(&s2, &InputSnapshot::idle(), &mut rng);
    assert!(!s3.pulse_flash);
}
