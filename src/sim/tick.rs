//! Per-frame simulation step
//!
//! Advances the game by one variable-length frame: spawn, integrate, then
//! resolve paddle, wall, center and ball-ball contacts in slot order.

use super::collision::{arc_vs_ball, ball_vs_ball, reaches_center, wall_vs_ball};
use super::state::{Ball, BallSlot, GameEvent, GameState};
use crate::consts::*;

/// Everything that happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
}

impl TickReport {
    fn push(&mut self, event: GameEvent) {
        log::debug!("{:?}", event);
        self.events.push(event);
    }

    pub fn wall_hits(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::WallHit { .. }))
            .count()
    }

    pub fn paddle_hits(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::PaddleHit { .. }))
            .count()
    }

    pub fn balls_lost(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::BallLost { .. }))
            .count()
    }

    pub fn was_reset(&self) -> bool {
        self.events.contains(&GameEvent::Reset)
    }
}

/// Advance the game state by `elapsed` seconds.
///
/// Negative or non-finite `elapsed` is treated as zero.
pub fn tick(state: &mut GameState, elapsed: f32) -> TickReport {
    let mut report = TickReport::default();
    let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };

    if state.health == 0 {
        state.reset();
        log::info!("Out of health, starting over");
        report.push(GameEvent::Reset);
        return report;
    }

    // A new ball joins every SPAWN_INTERVAL wall collisions. Only an empty slot
    // is filled, so the ball is not pinned at its spawn point until the next hit.
    if let Some(slot) = state.due_spawn_slot() {
        if !state.balls[slot].is_active() {
            state.balls[slot] = BallSlot::Active(Ball::spawn_for_parity(slot as u32));
            report.push(GameEvent::BallSpawned { slot });
        }
    }

    let speed = state.speed_multiplier();
    for ball in state.balls.iter_mut().filter_map(BallSlot::ball_mut) {
        ball.pos += elapsed * ball.vel * speed;
    }

    let paddle = state.arc_paddle;
    for slot in 0..MAX_BALLS {
        let Some(mut ball) = state.balls[slot].ball().copied() else {
            continue;
        };

        if let Some(deflected) = arc_vs_ball(paddle, ball) {
            ball = deflected;
            report.push(GameEvent::PaddleHit { slot });
        }

        let (clamped, contacts) = wall_vs_ball(ball);
        ball = clamped;
        state.num_collisions = state.num_collisions.saturating_add(contacts.count());
        for wall in contacts.walls() {
            report.push(GameEvent::WallHit { slot, wall });
        }

        if reaches_center(&ball) {
            ball = Ball::spawn_for_parity(state.num_collisions);
            state.health = state.health.saturating_sub(1);
            state.num_collisions = state.num_collisions.saturating_add(1);
            report.push(GameEvent::BallLost { slot });
        }

        state.balls[slot] = BallSlot::Active(ball);
    }

    resolve_ball_pairs(state, &mut report);

    report
}

/// Pairwise ball contacts, lower index first. Pushes are kept inside the court.
fn resolve_ball_pairs(state: &mut GameState, report: &mut TickReport) {
    let limit = COURT_RADIUS - BALL_RADIUS;
    for i in 0..MAX_BALLS {
        for j in (i + 1)..MAX_BALLS {
            let (BallSlot::Active(a), BallSlot::Active(b)) = (state.balls[i], state.balls[j])
            else {
                continue;
            };
            if let Some((mut a, mut b, _axis)) = ball_vs_ball(a, b) {
                a.pos = a.pos.clamp(-limit, limit);
                b.pos = b.pos.clamp(-limit, limit);
                state.balls[i] = BallSlot::Active(a);
                state.balls[j] = BallSlot::Active(b);
                report.push(GameEvent::BallsCollided { a: i, b: j });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Wall;
    use glam::Vec2;
    use proptest::prelude::*;

    fn active(state: &GameState, slot: usize) -> Ball {
        *state.balls[slot].ball().expect("slot is active")
    }

    /// A state with only slot 0 in play and the paddle parked out of the way
    fn lone_ball(pos: Vec2, vel: Vec2) -> GameState {
        let mut state = GameState::new();
        state.arc_paddle = Vec2::new(0.0, -1.0);
        state.balls[0] = BallSlot::Active(Ball::new(pos, vel));
        state
    }

    #[test]
    fn test_integrates_with_speed_multiplier() {
        let mut state = lone_ball(Vec2::new(3.0, 2.0), Vec2::new(-1.0, 0.5));
        state.num_collisions = 13;
        let speed = state.speed_multiplier();
        tick(&mut state, 0.1);
        let ball = active(&state, 0);
        assert!((ball.pos.x - (3.0 - 0.1 * speed)).abs() < 1e-5);
        assert!((ball.pos.y - (2.0 + 0.05 * speed)).abs() < 1e-5);
    }

    #[test]
    fn test_bounces_between_walls_count_once_each() {
        let mut state = lone_ball(Vec2::new(3.0, 3.0), Vec2::new(1.0, 0.0));
        state.num_collisions = 13;
        let mut contacts = 0;
        let mut last_vx = 1.0;
        for _ in 0..2000 {
            let report = tick(&mut state, 1.0 / 60.0);
            let vx = active(&state, 0).vel.x;
            if vx != last_vx {
                contacts += 1;
                last_vx = vx;
            }
            assert_eq!(report.wall_hits(), report.events.len());
            if contacts == 5 {
                break;
            }
        }
        assert_eq!(contacts, 5);
        assert_eq!(state.num_collisions, 13 + 5);
    }

    #[test]
    fn test_second_ball_after_one_wall_hit() {
        let mut state = lone_ball(Vec2::new(6.79, 0.0), Vec2::new(1.0, 0.0));
        assert_eq!(state.num_collisions, 11);

        let report = tick(&mut state, 0.01);
        assert_eq!(report.wall_hits(), 1);
        assert_eq!(state.num_collisions, 12);
        assert!(!state.balls[1].is_active());

        let report = tick(&mut state, 0.0);
        assert!(report.events.contains(&GameEvent::BallSpawned { slot: 1 }));
        assert_eq!(active(&state, 1), Ball::new(Vec2::new(-6.0, 0.0), Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn test_spawn_happens_once_per_threshold() {
        let mut state = lone_ball(Vec2::new(3.0, 3.0), Vec2::ZERO);
        state.num_collisions = 12;
        let first = tick(&mut state, 0.0);
        assert!(first.events.contains(&GameEvent::BallSpawned { slot: 1 }));
        let second = tick(&mut state, 0.0);
        assert!(!second.events.iter().any(|e| matches!(e, GameEvent::BallSpawned { .. })));
    }

    #[test]
    fn test_all_slots_filled_by_72() {
        let mut state = lone_ball(Vec2::new(3.0, 3.0), Vec2::ZERO);
        for n in (12..=72).step_by(12) {
            state.num_collisions = n;
            let report = tick(&mut state, 0.0);
            let slot = (n / 12) as usize;
            assert!(report.events.contains(&GameEvent::BallSpawned { slot }));
            let expected_x = if slot % 2 == 0 { 6.0 } else { -6.0 };
            assert_eq!(active(&state, slot).pos, Vec2::new(expected_x, 0.0));
            // Park it so later spawns don't land on top of it
            state.balls[slot] =
                BallSlot::Active(Ball::new(Vec2::new(-5.0 + slot as f32, 4.0), Vec2::ZERO));
        }
        assert_eq!(state.active_count(), MAX_BALLS);

        let before = state.clone();
        state.num_collisions = 84;
        let report = tick(&mut state, 0.0);
        assert!(!report.events.iter().any(|e| matches!(e, GameEvent::BallSpawned { .. })));
        assert_eq!(state.balls, before.balls);
    }

    #[test]
    fn test_center_hit_costs_health_and_respawns() {
        let mut state = lone_ball(Vec2::new(0.1, 0.0), Vec2::new(-1.0, 0.0));
        state.num_collisions = 14;
        let report = tick(&mut state, 0.0);
        assert_eq!(report.balls_lost(), 1);
        assert_eq!(state.health, 4);
        assert_eq!(state.num_collisions, 15);
        // Collision count was even when the ball respawned
        assert_eq!(active(&state, 0), Ball::new(Vec2::new(6.0, 0.0), Vec2::new(-1.0, 0.0)));

        state.balls[0] = BallSlot::Active(Ball::new(Vec2::new(0.0, 0.2), Vec2::new(0.0, -1.0)));
        tick(&mut state, 0.0);
        assert_eq!(active(&state, 0), Ball::new(Vec2::new(-6.0, 0.0), Vec2::new(1.0, 0.0)));
        assert_eq!(state.health, 3);
    }

    #[test]
    fn test_health_never_underflows() {
        let mut state = GameState::new();
        state.arc_paddle = Vec2::new(0.0, -1.0);
        state.health = 1;
        state.num_collisions = 13;
        // Two well-separated balls sitting on the hazard in the same frame
        state.balls[0] = BallSlot::Active(Ball::new(Vec2::new(0.3, 0.3), Vec2::ZERO));
        state.balls[1] = BallSlot::Active(Ball::new(Vec2::new(-0.3, -0.3), Vec2::ZERO));
        let report = tick(&mut state, 0.0);
        assert_eq!(report.balls_lost(), 2);
        assert_eq!(state.health, 0);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut state = GameState::new();
        state.health = 0;
        state.num_collisions = 57;
        state.arc_paddle = Vec2::new(-2.0, 1.0);
        for slot in state.balls.iter_mut() {
            *slot = BallSlot::Active(Ball::new(Vec2::new(1.0, 2.0), Vec2::new(0.5, 0.5)));
        }

        let report = tick(&mut state, 0.5);
        assert!(report.was_reset());

        let mut expected = GameState::new();
        expected.arc_paddle = state.arc_paddle;
        assert_eq!(state, expected);
    }

    #[test]
    fn test_paddle_hit_in_tick() {
        let mut state = lone_ball(Vec2::new(1.1, 0.0), Vec2::new(-1.0, 0.0));
        state.arc_paddle = Vec2::new(1.0, 0.0);
        let report = tick(&mut state, 0.0);
        assert_eq!(report.paddle_hits(), 1);
        let ball = active(&state, 0);
        assert!(ball.vel.x > 0.0);
        assert_eq!(ball.vel.y, 0.0);
    }

    #[test]
    fn test_ball_pair_flips_both() {
        let mut state = lone_ball(Vec2::new(3.0, 2.0), Vec2::new(1.0, 0.25));
        state.balls[1] = BallSlot::Active(Ball::new(Vec2::new(3.3, 2.1), Vec2::new(-1.0, -0.5)));
        let report = tick(&mut state, 0.0);
        assert!(report.events.contains(&GameEvent::BallsCollided { a: 0, b: 1 }));
        assert_eq!(active(&state, 0).vel, Vec2::new(-1.0, 0.25));
        assert_eq!(active(&state, 1).vel, Vec2::new(1.0, -0.5));
    }

    #[test]
    fn test_ball_pair_push_stays_in_court() {
        let mut state = lone_ball(Vec2::new(6.8, 0.0), Vec2::ZERO);
        state.balls[1] = BallSlot::Active(Ball::new(Vec2::new(6.6, 0.05), Vec2::ZERO));
        tick(&mut state, 0.0);
        assert!(active(&state, 0).pos.x <= 6.8 + 1e-6);
        assert!((active(&state, 1).pos.x - 6.4).abs() < 1e-5);
    }

    #[test]
    fn test_pair_push_into_wall_is_not_a_wall_hit() {
        let limit = COURT_RADIUS - BALL_RADIUS;
        let mut state = lone_ball(Vec2::new(6.75, 0.0), Vec2::new(0.5, 0.0));
        state.num_collisions = 13;
        state.balls[1] = BallSlot::Active(Ball::new(Vec2::new(6.6, 0.05), Vec2::new(-0.5, 0.0)));
        let report = tick(&mut state, 0.0);

        // Ball 0 is pushed past the right wall and clamped onto it
        assert_eq!(active(&state, 0).pos.x, limit.x);
        assert_eq!(active(&state, 0).vel.x, -0.5);
        assert_eq!(report.wall_hits(), 0);
        assert_eq!(state.num_collisions, 13);
        assert!(report.events.contains(&GameEvent::BallsCollided { a: 0, b: 1 }));
    }

    #[test]
    fn test_bad_elapsed_is_ignored() {
        let mut state = lone_ball(Vec2::new(3.0, 2.0), Vec2::new(-1.0, 0.5));
        state.num_collisions = 13;
        let before = state.clone();
        tick(&mut state, f32::NAN);
        tick(&mut state, f32::INFINITY);
        tick(&mut state, -0.5);
        assert_eq!(state, before);
    }

    #[test]
    fn test_wall_events_name_the_wall() {
        let mut state = lone_ball(Vec2::new(-6.9, 4.9), Vec2::new(-1.0, 1.0));
        state.num_collisions = 13;
        let report = tick(&mut state, 0.0);
        assert!(report.events.contains(&GameEvent::WallHit { slot: 0, wall: Wall::Top }));
        assert!(report.events.contains(&GameEvent::WallHit { slot: 0, wall: Wall::Left }));
        assert_eq!(state.num_collisions, 15);
    }

    fn ball_strategy() -> impl Strategy<Value = Ball> {
        (-9.0f32..9.0, -7.0f32..7.0, -1.0f32..1.0, -1.0f32..1.0)
            .prop_map(|(px, py, vx, vy)| Ball::new(Vec2::new(px, py), Vec2::new(vx, vy)))
    }

    proptest! {
        #[test]
        fn prop_active_balls_stay_in_court(
            balls in proptest::collection::vec(ball_strategy(), MAX_BALLS),
            paddle in (-7.0f32..7.0, -5.0f32..5.0),
            collisions in 13u32..200,
            steps in proptest::collection::vec(0.0f32..0.1, 1..20),
        ) {
            let mut state = GameState::new();
            state.arc_paddle = Vec2::new(paddle.0, paddle.1);
            state.num_collisions = collisions;
            state.health = 1000;
            for (slot, ball) in state.balls.iter_mut().zip(balls) {
                *slot = BallSlot::Active(ball);
            }

            let limit = COURT_RADIUS - BALL_RADIUS;
            for elapsed in steps {
                tick(&mut state, elapsed);
                for (_, ball) in state.active_balls() {
                    prop_assert!(ball.pos.x.abs() <= limit.x + 1e-5);
                    prop_assert!(ball.pos.y.abs() <= limit.y + 1e-5);
                }
            }
        }
    }
}
