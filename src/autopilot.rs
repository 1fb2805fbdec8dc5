//! Scripted paddle steering
//!
//! Plays the game for the headless demo: follow the ball closest to the
//! center, lead it toward the paddle band, and miss by a seeded random angle
//! so sessions are not perfect.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{Ball, GameState};
use crate::{paddle_angle, polar_to_cartesian};

/// Radius the autopilot aims at. Any point along the ray gives the same angle.
const AIM_RADIUS: f32 = 3.0;

pub struct Autopilot {
    rng: Pcg32,
    aim_error: f32,
}

impl Autopilot {
    pub fn new(seed: u64, aim_error: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            aim_error: aim_error.abs(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.autopilot_seed, settings.autopilot_aim_error)
    }

    /// Most dangerous ball: the active one closest to the center
    pub fn threat(state: &GameState) -> Option<&Ball> {
        state
            .active_balls()
            .map(|(_, ball)| ball)
            .min_by(|a, b| {
                a.pos
                    .length()
                    .partial_cmp(&b.pos.length())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Where the ball will be when it reaches the middle of the paddle band,
    /// assuming it keeps its heading. Balls moving away are tracked in place.
    pub fn predict(ball: &Ball, speed: f32) -> Vec2 {
        let band = 0.5 * (PADDLE_INNER_RADIUS + PADDLE_OUTER_RADIUS);
        let vel = ball.vel * speed;
        let closing = -vel.dot(ball.pos.normalize_or_zero());
        if closing <= f32::EPSILON {
            return ball.pos;
        }
        let t = (ball.pos.length() - band).max(0.0) / closing;
        ball.pos + vel * t
    }

    /// Court-space point to aim the paddle at this frame
    pub fn target(&mut self, state: &GameState) -> Vec2 {
        let Some(ball) = Self::threat(state) else {
            return state.arc_paddle;
        };
        let predicted = Self::predict(ball, state.speed_multiplier());
        let error = if self.aim_error > 0.0 {
            self.rng.random_range(-self.aim_error..=self.aim_error)
        } else {
            0.0
        };
        polar_to_cartesian(AIM_RADIUS, paddle_angle(predicted) + error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BallSlot;

    #[test]
    fn test_threat_is_closest_ball() {
        let mut state = GameState::new();
        state.balls[4] = BallSlot::Active(Ball::new(Vec2::new(0.0, -2.0), Vec2::ZERO));
        state.balls[5] = BallSlot::Active(Ball::new(Vec2::new(3.0, 3.0), Vec2::ZERO));
        let threat = Autopilot::threat(&state).unwrap();
        assert_eq!(threat.pos, Vec2::new(0.0, -2.0));
    }

    #[test]
    fn test_predict_head_on() {
        let ball = Ball::new(Vec2::new(6.0, 0.0), Vec2::new(-1.0, 0.0));
        let p = Autopilot::predict(&ball, 3.0);
        assert!((p.x - 1.175).abs() < 1e-5);
        assert!(p.y.abs() < 1e-6);
    }

    #[test]
    fn test_predict_receding_ball() {
        let ball = Ball::new(Vec2::new(2.0, 1.0), Vec2::new(1.0, 0.0));
        assert_eq!(Autopilot::predict(&ball, 2.0), ball.pos);
    }

    #[test]
    fn test_perfect_aim_faces_ball() {
        let mut pilot = Autopilot::new(1, 0.0);
        let state = GameState::new();
        let target = pilot.target(&state);
        assert!(paddle_angle(target).abs() < 1e-5);
        assert!((target.length() - AIM_RADIUS).abs() < 1e-5);
    }

    #[test]
    fn test_aim_error_bounded_and_seeded() {
        let state = GameState::new();
        let mut a = Autopilot::new(42, 0.2);
        let mut b = Autopilot::new(42, 0.2);
        for _ in 0..100 {
            let ta = a.target(&state);
            assert_eq!(ta, b.target(&state));
            assert!(paddle_angle(ta).abs() <= 0.2 + 1e-5);
        }
    }

    #[test]
    fn test_no_balls_holds_position() {
        let mut state = GameState::new();
        state.balls = [BallSlot::Inactive; MAX_BALLS];
        state.arc_paddle = Vec2::new(-2.0, 0.5);
        let mut pilot = Autopilot::new(7, 0.3);
        assert_eq!(pilot.target(&state), Vec2::new(-2.0, 0.5));
    }

    #[test]
    fn test_autopilot_returns_opening_ball() {
        let mut pilot = Autopilot::new(3, 0.0);
        let mut state = GameState::new();
        let mut paddle_hits = 0;
        // Long enough for the first ball to reach the paddle and the wall behind it
        for _ in 0..240 {
            let target = pilot.target(&state);
            state.aim_paddle(target);
            paddle_hits += crate::sim::tick(&mut state, 1.0 / 60.0).paddle_hits();
        }
        assert!(paddle_hits >= 1);
        assert_eq!(state.health, 5);
        assert!(state.num_collisions > 11);
    }
}
