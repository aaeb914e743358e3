use super::{game::InGame, transition::Transition, Command, Screen};
use crate::{
    graphics::{self, Texture, BLACK, GREY, WHITE},
    input::{Action, Actions},
    prelude::*,
    Context, HEIGHT, WIDTH,
};

const FADE_FRAMES: u32 = FPS / 2;
const BLINK: u32 = FPS / 2;
const LOGO: &str = "textures.logo";

pub struct Title {
    transition: Transition,
    ticks: u32,
    logo_missing: bool,
}

impl Title {
    pub fn new() -> Self {
        Self {
            transition: Transition::new(FADE_FRAMES),
            ticks: 0,
            logo_missing: false,
        }
    }
}

impl Default for Title {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen<Context> for Title {
    fn update(&mut self, ctx: &mut Context) {
        self.ticks = self.ticks.wrapping_add(1);

        // the game is queued only once we have fully faded, so it lands on an empty stack
        if self.transition.tick() {
            let game = InGame::new(ctx);
            ctx.request(Command::Play(Box::new(game)));
            return;
        }

        if !self.transition.is_fading_out() && ctx.is_asserted(Action::Confirm) {
            self.transition.fade_out();
        }
    }

    fn draw(&mut self, ctx: &mut Context, frame: &mut [u8]) {
        graphics::clear(frame, BLACK);

        let logo = if self.logo_missing {
            None
        } else {
            ctx.assets.load::<Texture>(LOGO).ok()
        };
        let logo_bottom = match logo {
            Some(handle) => {
                let tex = handle.read();
                let x = (WIDTH as i32 - tex.width() as i32) / 2;
                let y = HEIGHT as i32 / 4;
                graphics::draw_sprite(frame, x, y, &tex);
                y + tex.height() as i32
            }
            None => {
                if !self.logo_missing {
                    warn!("Could not load {LOGO}, drawing the title as text");
                    self.logo_missing = true;
                }
                let y = HEIGHT as i32 / 4;
                graphics::draw_text_centered(frame, y, 8, "PONG", WHITE);
                y + graphics::text_height(8)
            }
        };

        if self.transition.is_fading_out() || (self.ticks / BLINK) % 2 == 0 {
            graphics::draw_text_centered(frame, logo_bottom + 24, 1, "PRESS SPACE TO PLAY", GREY);
        }
        graphics::draw_text_centered(frame, HEIGHT as i32 - 16, 1, "W S   UP DOWN   P PAUSE", GREY);

        graphics::shade(frame, BLACK, 1. - self.transition.alpha());
    }

    fn is_disposed(&self) -> bool {
        self.transition.is_disposed()
    }

    fn dispose(&mut self) {
        self.transition.dispose();
    }

    fn name(&self) -> &'static str {
        "title"
    }
}
