use super::{game_over::GameOver, transition::Transition, Command, Screen};
use crate::{
    components::{Arena, Ball, Paddle, PaddleInput, Score, Serve, Side, Transform},
    config::Rules,
    graphics::{self, BLACK, GREY, WHITE},
    prelude::*,
    sound::{self, SoundQueue},
    spawner, Context, HEIGHT, WIDTH,
};

use bevy_ecs::prelude::*;

const FADE_FRAMES: u32 = FPS / 3;

pub struct InGame {
    world: World,
    schedule: Schedule,
    transition: Transition,
    /// Set once a winner has been announced, the simulation stops
    finished: bool,
}

impl InGame {
    pub fn new(ctx: &Context) -> Self {
        let rules = ctx.settings.rules.clone();
        let arena = Arena {
            width: WIDTH as f32,
            height: HEIGHT as f32,
        };

        let mut world = World::default();
        let mut schedule = Schedule::default();
        world.insert_resource(arena);
        world.insert_resource(Serve::seeded(rand::random()));
        world.insert_resource(rules.clone());
        crate::physics::add_to_world(&mut schedule, &mut world);

        spawner::spawn_paddle(&mut world, Side::Left, &arena);
        spawner::spawn_paddle(&mut world, Side::Right, &arena);
        spawner::spawn_ball(&mut world, &arena, rules.ball_speed);

        Self {
            world,
            schedule,
            transition: Transition::new(FADE_FRAMES),
            finished: false,
        }
    }

    fn play_sounds(&mut self, ctx: &mut Context) {
        let mut queue = self.world.resource_mut::<SoundQueue>();
        let Some(snd) = ctx.snd.as_mut() else {
            queue.0.clear();
            return;
        };
        for info in queue.drain() {
            sound::play(snd, &ctx.assets, &info, ctx.settings.volume);
        }
    }
}

impl Screen<Context> for InGame {
    fn update(&mut self, ctx: &mut Context) {
        self.transition.tick();
        if self.finished {
            return;
        }

        {
            let mut input = self.world.resource_mut::<PaddleInput>();
            input.left = ctx.controls.left;
            input.right = ctx.controls.right;
        }

        self.schedule.run(&mut self.world);
        self.play_sounds(ctx);

        let score = *self.world.resource::<Score>();
        let winning_score = self.world.resource::<Rules>().winning_score;
        if let Some(winner) = score.winner(winning_score) {
            info!("{winner:?} wins {}:{}", score.left, score.right);
            self.finished = true;
            ctx.request(Command::Play(Box::new(GameOver::new(winner, score))));
        }
    }

    fn draw(&mut self, _ctx: &mut Context, frame: &mut [u8]) {
        graphics::clear(frame, BLACK);

        // net
        let mid = WIDTH as i32 / 2 - 1;
        for y in (0..HEIGHT as i32).step_by(8) {
            graphics::fill_rect(frame, mid, y, 2, 4, GREY);
        }

        let score = *self.world.resource::<Score>();
        let (left, right) = (score.left.to_string(), score.right.to_string());
        let quarter = WIDTH as i32 / 4;
        let scale = 3;
        for (x, text) in [(quarter, &left), (3 * quarter, &right)] {
            let x = x - graphics::text_width(text, scale) / 2;
            graphics::draw_text(frame, x, 8, scale, text, GREY);
        }

        let mut query = self
            .world
            .query_filtered::<&Transform, Or<(With<Paddle>, With<Ball>)>>();
        for trans in query.iter(&self.world) {
            graphics::fill_rect(
                frame,
                trans.pos.x.round() as i32,
                trans.pos.y.round() as i32,
                trans.size.x as i32,
                trans.size.y as i32,
                WHITE,
            );
        }

        graphics::shade(frame, BLACK, 1. - self.transition.alpha());
    }

    fn is_disposed(&self) -> bool {
        self.transition.is_disposed()
    }

    fn dispose(&mut self) {
        self.transition.dispose();
    }

    fn name(&self) -> &'static str {
        "game"
    }
}
