use super::{transition::Transition, Kind, Screen};
use crate::{
    graphics::{self, BLACK, GREY, WHITE},
    input::{Action, Actions},
    prelude::*,
    HEIGHT,
};

const FADE_FRAMES: u32 = FPS / 6;
const DIM: f32 = 0.6;
const BLINK: u32 = FPS / 2;

/// Dims whatever is underneath and waits for the player to resume.
pub struct PauseScreen {
    transition: Transition,
    ticks: u32,
}

impl PauseScreen {
    pub fn new() -> Self {
        Self {
            transition: Transition::new(FADE_FRAMES),
            ticks: 0,
        }
    }
}

impl Default for PauseScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Actions> Screen<C> for PauseScreen {
    fn update(&mut self, ctx: &mut C) {
        self.transition.tick();
        self.ticks = self.ticks.wrapping_add(1);

        if self.transition.is_fading_out() || self.transition.is_disposed() {
            return;
        }
        if ctx.is_asserted(Action::Pause) || ctx.is_asserted(Action::Confirm) {
            info!("Resuming");
            self.transition.fade_out();
        }
    }

    fn draw(&mut self, _ctx: &mut C, frame: &mut [u8]) {
        let alpha = self.transition.alpha();
        graphics::shade(frame, BLACK, DIM * alpha);

        let y = HEIGHT as i32 / 2 - graphics::text_height(4);
        graphics::draw_text_centered(frame, y, 4, "PAUSED", graphics::with_alpha(WHITE, alpha));

        if (self.ticks / BLINK) % 2 == 0 {
            graphics::draw_text_centered(
                frame,
                y + graphics::text_height(4) + 8,
                1,
                "PRESS P TO RESUME",
                graphics::with_alpha(GREY, alpha),
            );
        }
    }

    fn is_disposed(&self) -> bool {
        self.transition.is_disposed()
    }

    fn dispose(&mut self) {
        self.transition.dispose();
    }

    fn is_fading_out(&self) -> bool {
        self.transition.is_fading_out()
    }

    fn kind(&self) -> Kind {
        Kind::Pause
    }

    fn name(&self) -> &'static str {
        "pause"
    }
}
