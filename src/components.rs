use crate::prelude::*;
use bevy_ecs::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

/// Axis aligned box, `pos` is the top left corner.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Transform {
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.
    }
}

#[derive(Component, Debug)]
pub struct Movement {
    vel: Vec2,
    speed: f32,
}

impl Movement {
    pub fn with_speed(speed: f32) -> Self {
        Self {
            vel: Vec2::ZERO,
            speed,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Direction of travel, always unit length or zero
    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    pub fn set_velocity(&mut self, vel: Vec2) {
        self.vel = vel.normalize_or_zero();
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Horizontal direction pointing away from this side's goal
    pub fn facing(self) -> f32 {
        match self {
            Self::Left => 1.,
            Self::Right => -1.,
        }
    }
}

#[derive(Component, Clone, Copy, Debug)]
pub struct Paddle(pub Side);

#[derive(Component, Debug)]
pub struct Ball;

#[derive(Resource, Clone, Copy, Debug)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn center(&self) -> Vec2 {
        vec2(self.width, self.height) / 2.
    }
}

/// Paddle axes for this frame, -1 up to 1 down
#[derive(Resource, Default, Debug)]
pub struct PaddleInput {
    pub left: f32,
    pub right: f32,
}

impl PaddleInput {
    pub fn axis(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

#[derive(Resource, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn add_point(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn winner(&self, winning_score: u32) -> Option<Side> {
        if self.left >= winning_score {
            Some(Side::Left)
        } else if self.right >= winning_score {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Randomness for serve angles
#[derive(Resource)]
pub struct Serve(pub StdRng);

impl Serve {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}
