//! Game state and core simulation types
//!
//! Everything the frame step reads or writes lives here. Rendering state does not.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Kinematic state of a ball in play
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Ball {
    pub const fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    /// Spawn point and heading for a given parity.
    ///
    /// Even enters from the right moving left, odd from the left moving right.
    pub fn spawn_for_parity(n: u32) -> Self {
        if n % 2 == 0 {
            Self::new(Vec2::new(6.0, 0.0), Vec2::new(-1.0, 0.0))
        } else {
            Self::new(Vec2::new(-6.0, 0.0), Vec2::new(1.0, 0.0))
        }
    }

    /// The four corners of the ball's square
    pub fn corners(&self) -> [Vec2; 4] {
        let r = BALL_RADIUS;
        [
            Vec2::new(self.pos.x - r.x, self.pos.y - r.y),
            Vec2::new(self.pos.x + r.x, self.pos.y - r.y),
            Vec2::new(self.pos.x - r.x, self.pos.y + r.y),
            Vec2::new(self.pos.x + r.x, self.pos.y + r.y),
        ]
    }
}

/// One of the fixed ball slots
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum BallSlot {
    #[default]
    Inactive,
    Active(Ball),
}

impl BallSlot {
    pub fn ball(&self) -> Option<&Ball> {
        match self {
            BallSlot::Active(ball) => Some(ball),
            BallSlot::Inactive => None,
        }
    }

    pub fn ball_mut(&mut self) -> Option<&mut Ball> {
        match self {
            BallSlot::Active(ball) => Some(ball),
            BallSlot::Inactive => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, BallSlot::Active(_))
    }
}

/// Court wall identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Top,
    Bottom,
    Left,
    Right,
}

/// Things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Health ran out and the session started over
    Reset,
    BallSpawned { slot: usize },
    PaddleHit { slot: usize },
    WallHit { slot: usize, wall: Wall },
    /// Ball reached the center square and was respawned
    BallLost { slot: usize },
    BallsCollided { a: usize, b: usize },
}

/// Session phase, derived from health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Health is gone; the next tick resets
    ResetPending,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Court-space point the paddle points at
    pub arc_paddle: Vec2,
    /// Ball slots in spawn order
    pub balls: [BallSlot; MAX_BALLS],
    pub health: u32,
    /// Wall collisions so far (drives spawns and speed)
    pub num_collisions: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        let mut state = Self {
            arc_paddle: Vec2::new(1.0, 0.0),
            balls: [BallSlot::Inactive; MAX_BALLS],
            health: START_HEALTH,
            num_collisions: START_COLLISIONS,
        };
        state.reset();
        state
    }

    /// Back to the opening position. The paddle target is kept.
    pub fn reset(&mut self) {
        self.health = START_HEALTH;
        self.num_collisions = START_COLLISIONS;
        self.balls = [BallSlot::Inactive; MAX_BALLS];
        self.balls[0] = BallSlot::Active(Ball::spawn_for_parity(0));
    }

    pub fn phase(&self) -> GamePhase {
        if self.health > 0 {
            GamePhase::Playing
        } else {
            GamePhase::ResetPending
        }
    }

    /// Point the paddle at a court-space target. Ignored once health is gone.
    pub fn aim_paddle(&mut self, target: Vec2) {
        if self.health > 0 {
            self.arc_paddle = target;
        }
    }

    /// Active balls with their slot index, in slot order
    pub fn active_balls(&self) -> impl Iterator<Item = (usize, &Ball)> + '_ {
        self.balls
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.ball().map(|b| (i, b)))
    }

    pub fn active_count(&self) -> usize {
        self.balls.iter().filter(|s| s.is_active()).count()
    }

    /// Shared speed multiplier for the current collision count
    pub fn speed_multiplier(&self) -> f32 {
        (self.num_collisions as f32 / SPAWN_INTERVAL as f32 + BASE_SPEED_MULTIPLIER)
            .min(MAX_SPEED_MULTIPLIER)
    }

    /// Slot due to spawn at the current collision count, if any
    pub fn due_spawn_slot(&self) -> Option<usize> {
        let n = self.num_collisions;
        if n != 0 && n <= LAST_SPAWN_COLLISIONS && n % SPAWN_INTERVAL == 0 {
            Some((n / SPAWN_INTERVAL) as usize)
        } else {
            None
        }
    }
}
