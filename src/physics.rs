use crate::{
    components::{Arena, Ball, Movement, Paddle, PaddleInput, Score, Serve, Side, Transform},
    config::Rules,
    prelude::*,
    sound,
};
use bevy_ecs::prelude::*;
use rand::Rng;

/// How steep a ball can leave a paddle when hitting its very edge
const MAX_DEFLECT: f32 = 0.75;

pub fn add_to_world(schedule: &mut Schedule, world: &mut World) {
    world.init_resource::<PaddleInput>();
    world.init_resource::<Score>();
    world.init_resource::<sound::SoundQueue>();
    schedule.add_systems((
        steer_paddles.before(apply_movement),
        apply_movement,
        confine_paddles.after(apply_movement),
        bounce_ball.after(confine_paddles),
        score_goals.after(bounce_ball),
    ));
}

fn steer_paddles(
    input: Res<PaddleInput>,
    rules: Res<Rules>,
    mut query: Query<(&Paddle, &mut Movement)>,
) {
    for (paddle, mut movement) in query.iter_mut() {
        movement.set_speed(rules.paddle_speed);
        movement.set_velocity(vec2(0., input.axis(paddle.0)));
    }
}

fn apply_movement(mut query: Query<(&mut Transform, &Movement)>) {
    for (mut trans, movement) in query.iter_mut() {
        trans.pos += velocity(movement.velocity(), movement.speed());
    }
}

fn confine_paddles(arena: Res<Arena>, mut query: Query<&mut Transform, With<Paddle>>) {
    for mut trans in query.iter_mut() {
        trans.pos.y = trans.pos.y.clamp(0., (arena.height - trans.size.y).max(0.));
    }
}

fn bounce_ball(
    arena: Res<Arena>,
    rules: Res<Rules>,
    mut sounds: ResMut<sound::SoundQueue>,
    mut ball_query: Query<(&mut Transform, &mut Movement), With<Ball>>,
    paddle_query: Query<(&Transform, &Paddle), Without<Ball>>,
) {
    for (mut ball, mut movement) in ball_query.iter_mut() {
        let mut dir = movement.velocity();

        // top and bottom walls
        if ball.pos.y < 0. && dir.y < 0. {
            ball.pos.y = 0.;
            dir.y = -dir.y;
            sounds.push(sound::SoundInfo::at_position("wall", ball.center().x, arena.width));
        } else if ball.pos.y + ball.size.y > arena.height && dir.y > 0. {
            ball.pos.y = arena.height - ball.size.y;
            dir.y = -dir.y;
            sounds.push(sound::SoundInfo::at_position("wall", ball.center().x, arena.width));
        }

        for (paddle, Paddle(side)) in paddle_query.iter() {
            // only bounce when heading towards the paddle's goal
            if dir.x * side.facing() >= 0. {
                continue;
            }
            if !collide(ball.pos, ball.size, paddle.pos, paddle.size) {
                continue;
            }

            let offset = (ball.center().y - paddle.center().y) / (paddle.size.y / 2.);
            dir = vec2(side.facing(), offset.clamp(-1., 1.) * MAX_DEFLECT);
            ball.pos.x = match side {
                Side::Left => paddle.pos.x + paddle.size.x,
                Side::Right => paddle.pos.x - ball.size.x,
            };

            let speed = (movement.speed() * rules.ball_speedup).min(rules.max_ball_speed);
            movement.set_speed(speed);
            sounds.push(sound::SoundInfo::at_position("hit", ball.center().x, arena.width));
            break;
        }

        movement.set_velocity(dir);
    }
}

fn score_goals(
    arena: Res<Arena>,
    rules: Res<Rules>,
    mut score: ResMut<Score>,
    mut serve: ResMut<Serve>,
    mut sounds: ResMut<sound::SoundQueue>,
    mut query: Query<(&mut Transform, &mut Movement), With<Ball>>,
) {
    for (mut ball, mut movement) in query.iter_mut() {
        let scorer = if ball.pos.x + ball.size.x < 0. {
            Side::Right
        } else if ball.pos.x > arena.width {
            Side::Left
        } else {
            continue;
        };

        score.add_point(scorer);
        debug!("Point for {scorer:?}, score is {}:{}", score.left, score.right);
        sounds.push(sound::SoundInfo::at_position("score", ball.center().x, arena.width));

        // serve towards whoever conceded
        let dy = serve.0.gen_range(-0.5..=0.5);
        ball.pos = arena.center() - ball.size / 2.;
        movement.set_speed(rules.ball_speed);
        movement.set_velocity(vec2(-scorer.opponent().facing(), dy));
    }
}

pub fn collide(pos_a: Vec2, size_a: Vec2, pos_b: Vec2, size_b: Vec2) -> bool {
    pos_a.x + size_a.x > pos_b.x
        && pos_a.x < pos_b.x + size_b.x
        && pos_a.y + size_a.y > pos_b.y
        && pos_a.y < pos_b.y + size_b.y
}

fn velocity(vel: Vec2, speed: f32) -> Vec2 {
    vel * speed * TIMESTEP
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawner;

    const ARENA: Arena = Arena {
        width: 320.,
        height: 180.,
    };

    fn setup() -> (World, Schedule) {
        let mut world = World::default();
        let mut schedule = Schedule::default();
        world.insert_resource(ARENA);
        world.insert_resource(Rules::default());
        world.insert_resource(Serve::seeded(7));
        add_to_world(&mut schedule, &mut world);
        (world, schedule)
    }

    fn spawn_ball(world: &mut World, pos: Vec2, dir: Vec2, speed: f32) -> Entity {
        let mut movement = Movement::with_speed(speed);
        movement.set_velocity(dir);
        world
            .spawn((
                Transform {
                    pos,
                    size: Vec2::splat(spawner::BALL_SIZE),
                },
                movement,
                Ball,
            ))
            .id()
    }

    #[test]
    fn ball_bounces_off_the_ceiling() {
        let (mut world, mut schedule) = setup();
        let ball = spawn_ball(&mut world, vec2(100., 0.5), vec2(1., -1.), 150.);

        schedule.run(&mut world);

        let movement = world.get::<Movement>(ball).unwrap();
        assert!(movement.velocity().y > 0.);
        assert_eq!(world.get::<Transform>(ball).unwrap().pos.y, 0.);
        assert_eq!(world.resource::<sound::SoundQueue>().0[0].name, "wall");
    }

    #[test]
    fn paddle_returns_the_ball_faster() {
        let (mut world, mut schedule) = setup();
        spawner::spawn_paddle(&mut world, Side::Left, &ARENA);
        let paddle_x = spawner::PADDLE_MARGIN + spawner::PADDLE_SIZE.x;
        let ball_y = ARENA.height / 2. - spawner::BALL_SIZE / 2.;
        let ball = spawn_ball(&mut world, vec2(paddle_x - 1., ball_y), vec2(-1., 0.), 150.);

        schedule.run(&mut world);

        let movement = world.get::<Movement>(ball).unwrap();
        assert!(movement.velocity().x > 0.);
        assert!(movement.speed() > 150.);
        assert!(world.get::<Transform>(ball).unwrap().pos.x >= paddle_x);
    }

    #[test]
    fn ball_leaving_the_arena_scores_and_reserves() {
        let (mut world, mut schedule) = setup();
        let ball = spawn_ball(&mut world, vec2(-20., 90.), vec2(-1., 0.), 300.);

        schedule.run(&mut world);

        assert_eq!(*world.resource::<Score>(), Score { left: 0, right: 1 });
        let trans = world.get::<Transform>(ball).unwrap();
        assert_eq!(trans.center(), ARENA.center());
        let movement = world.get::<Movement>(ball).unwrap();
        assert_eq!(movement.speed(), Rules::default().ball_speed);
        // the left player conceded, so the serve heads left
        assert!(movement.velocity().x < 0.);
    }

    #[test]
    fn paddles_stay_inside_the_arena() {
        let (mut world, mut schedule) = setup();
        let paddle = spawner::spawn_paddle(&mut world, Side::Right, &ARENA);
        world.resource_mut::<PaddleInput>().right = -1.;

        for _ in 0..FPS * 2 {
            schedule.run(&mut world);
        }

        assert_eq!(world.get::<Transform>(paddle).unwrap().pos.y, 0.);
    }

    #[test]
    fn boxes_touching_edges_do_not_collide() {
        let size = Vec2::splat(4.);
        assert!(collide(Vec2::ZERO, size, vec2(3., 3.), size));
        assert!(!collide(Vec2::ZERO, size, vec2(4., 0.), size));
    }
}
