use super::{title::Title, transition::Transition, Command, Screen};
use crate::{
    components::{Score, Side},
    graphics::{self, BLACK, GREY, WHITE},
    input::{Action, Actions},
    prelude::*,
    Context, HEIGHT,
};

const FADE_FRAMES: u32 = FPS / 2;

/// Announces the winner over the final board and sends everyone back to the title.
pub struct GameOver {
    winner: Side,
    score: Score,
    transition: Transition,
}

impl GameOver {
    pub fn new(winner: Side, score: Score) -> Self {
        Self {
            winner,
            score,
            transition: Transition::new(FADE_FRAMES),
        }
    }

    fn headline(&self) -> &'static str {
        match self.winner {
            Side::Left => "LEFT WINS!",
            Side::Right => "RIGHT WINS!",
        }
    }
}

impl Screen<Context> for GameOver {
    fn update(&mut self, ctx: &mut Context) {
        self.transition.tick();
        if self.transition.is_disposed() || !ctx.is_asserted(Action::Confirm) {
            return;
        }

        ctx.request(Command::KillAll);
        ctx.request(Command::Play(Box::new(Title::new())));
    }

    fn draw(&mut self, _ctx: &mut Context, frame: &mut [u8]) {
        let alpha = self.transition.alpha();
        graphics::shade(frame, BLACK, 0.7 * alpha);

        let y = HEIGHT as i32 / 3;
        graphics::draw_text_centered(frame, y, 4, self.headline(), graphics::with_alpha(WHITE, alpha));

        let score = format!("{} - {}", self.score.left, self.score.right);
        let y = y + graphics::text_height(4) + 10;
        graphics::draw_text_centered(frame, y, 2, &score, graphics::with_alpha(WHITE, alpha));

        let y = y + graphics::text_height(2) + 16;
        graphics::draw_text_centered(frame, y, 1, "PRESS SPACE", graphics::with_alpha(GREY, alpha));
    }

    fn is_disposed(&self) -> bool {
        self.transition.is_disposed()
    }

    fn dispose(&mut self) {
        self.transition.dispose();
    }

    fn name(&self) -> &'static str {
        "game over"
    }
}
