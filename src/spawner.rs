use bevy_ecs::{prelude::Entity, world::World};
use rand::Rng;

use crate::prelude::*;

use crate::components::*;

pub const PADDLE_SIZE: Vec2 = Vec2::new(4., 28.);
pub const PADDLE_MARGIN: f32 = 8.;
pub const BALL_SIZE: f32 = 6.;

pub fn spawn_paddle(world: &mut World, side: Side, arena: &Arena) -> Entity {
    let x = match side {
        Side::Left => PADDLE_MARGIN,
        Side::Right => arena.width - PADDLE_MARGIN - PADDLE_SIZE.x,
    };

    world
        .spawn((
            Transform {
                pos: vec2(x, (arena.height - PADDLE_SIZE.y) / 2.),
                size: PADDLE_SIZE,
            },
            Movement::with_speed(0.),
            Paddle(side),
        ))
        .id()
}

/// Puts a ball in the middle heading for a random side.
pub fn spawn_ball(world: &mut World, arena: &Arena, speed: f32) -> Entity {
    let dir = {
        let mut serve = world.resource_mut::<Serve>();
        let x = if serve.0.gen_bool(0.5) { 1. } else { -1. };
        vec2(x, serve.0.gen_range(-0.5..=0.5))
    };

    let mut movement = Movement::with_speed(speed);
    movement.set_velocity(dir);

    world
        .spawn((
            Transform {
                pos: arena.center() - Vec2::splat(BALL_SIZE) / 2.,
                size: Vec2::splat(BALL_SIZE),
            },
            movement,
            Ball,
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paddles_face_each_other() {
        let arena = Arena {
            width: 320.,
            height: 180.,
        };
        let mut world = World::default();
        world.insert_resource(Serve::seeded(1));

        let left = spawn_paddle(&mut world, Side::Left, &arena);
        let right = spawn_paddle(&mut world, Side::Right, &arena);
        let ball = spawn_ball(&mut world, &arena, 100.);

        let left = world.get::<Transform>(left).unwrap();
        let right = world.get::<Transform>(right).unwrap();
        assert!(left.pos.x < right.pos.x);
        assert_eq!(left.center().y, arena.center().y);
        assert_eq!(right.pos.x + right.size.x, arena.width - PADDLE_MARGIN);

        let ball = world.get::<Movement>(ball).unwrap();
        assert_ne!(ball.velocity().x, 0.);
        assert_eq!(ball.speed(), 100.);
    }
}
