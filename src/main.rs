use crate::prelude::*;
use assets_manager::AssetCache;
use config::Settings;
use input::{Action, Actions, Controls, KeyboardInput};
use kira::manager::{backend::cpal::CpalBackend, AudioManager, AudioManagerSettings};
use screen::{title::Title, Command, ScreenContainer};
use std::time::Instant;

pub mod components;
pub mod physics;

mod config;
mod graphics;
mod input;
mod math;
mod screen;
mod sound;
mod spawner;

use game_loop::{
    game_loop,
    winit::{
        dpi::LogicalSize,
        event::{Event, WindowEvent},
        event_loop::EventLoop,
        window::WindowBuilder,
    },
};
use pixels::{
    wgpu::{Color, RequestAdapterOptions},
    Pixels, PixelsBuilder, SurfaceTexture,
};

const WIDTH: usize = 320;
const HEIGHT: usize = 180;
const TITLE: &str = "Pong";
const DEBUG: bool = cfg!(debug_assertions);

const ASSETS_FOLDER: &str = "assets";

pub mod prelude {
    pub use crate::components;
    pub use crate::math::*;
    pub use crate::physics;
    pub use log::*;

    pub const FPS: u32 = 60;
    pub const TIMESTEP: f32 = 1. / FPS as f32;
}

/// Everything a screen may touch while it is updated or drawn.
pub struct Context {
    pub assets: AssetCache,
    pub controls: Controls,
    pub input: KeyboardInput,
    pub snd: Option<AudioManager<CpalBackend>>,
    pub settings: Settings,
    commands: Vec<Command<Context>>,
}

impl Context {
    /// Queues a change to the screen stack, applied after the current update pass.
    pub fn request(&mut self, command: Command<Context>) {
        self.commands.push(command);
    }
}

impl Actions for Context {
    fn is_asserted(&self, action: Action) -> bool {
        self.controls.is_asserted(action)
    }
}

struct Game {
    ctx: Context,
    screens: ScreenContainer<Context>,
    pixels: Pixels,
    keys: Vec<game_loop::winit::event::KeyboardInput>,
    focus_lost: bool,
    frame_count: u32,
}

impl Game {
    fn new(pixels: Pixels, settings: Settings) -> Result<Self, Box<dyn std::error::Error>> {
        let assets = AssetCache::new(ASSETS_FOLDER)?;
        let snd = match AudioManager::<CpalBackend>::new(AudioManagerSettings::default()) {
            Ok(snd) => Some(snd),
            Err(err) => {
                warn!("No audio, could not start the audio manager: {err:?}");
                None
            }
        };

        let ctx = Context {
            snd,
            assets,
            controls: Controls::default(),
            input: KeyboardInput::default(),
            commands: Vec::new(),
            settings,
        };

        let mut screens = ScreenContainer::with_policy(ctx.settings.cleanup);
        screens.play(Box::new(Title::new()))?;

        Ok(Self {
            ctx,
            screens,
            pixels,
            keys: Vec::new(),
            focus_lost: false,
            frame_count: 0,
        })
    }

    fn update(&mut self) {
        self.ctx.input.capture_keys(&mut self.keys);
        self.ctx.controls = Controls::from_keyboard(&self.ctx.input);
        // losing focus counts as asking for a pause
        self.ctx.controls.pause |= std::mem::take(&mut self.focus_lost);

        self.screens.update(&mut self.ctx);

        for command in std::mem::take(&mut self.ctx.commands) {
            if let Err(err) = self.screens.apply(command) {
                warn!("{err}");
            }
        }
        self.frame_count += 1;
    }

    fn draw(&mut self) {
        let frame = self.pixels.frame_mut();
        graphics::clear(frame, graphics::BLACK);
        self.screens.draw(&mut self.ctx, frame);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter(None, LevelFilter::Warn)
        .parse_env("PONG_LOG")
        .init();

    let settings = Settings::load();

    let event_loop = EventLoop::new();
    let window = {
        let size = LogicalSize::new(WIDTH as f64, HEIGHT as f64);
        let scale = settings.window_scale.max(1.);
        WindowBuilder::new()
            .with_title(TITLE)
            .with_inner_size(LogicalSize::new(size.width * scale, size.height * scale))
            .with_min_inner_size(size)
            .build(&event_loop)?
    };

    let win_size = window.inner_size();
    let surface_texture = SurfaceTexture::new(win_size.width, win_size.height, &window);

    let pixels = PixelsBuilder::new(WIDTH as u32, HEIGHT as u32, surface_texture)
        .request_adapter_options(RequestAdapterOptions {
            power_preference: pixels::wgpu::PowerPreference::HighPerformance,
            ..Default::default()
        })
        .clear_color(Color::BLACK)
        .build()?;

    let game = Game::new(pixels, settings)?;

    let mut frames_drawn = 0;
    let mut start = Instant::now();

    game_loop(
        event_loop,
        window,
        game,
        FPS,
        0.1,
        move |g| {
            g.game.update();
        },
        move |g| {
            g.game.draw();

            if let Err(err) = g.game.pixels.render() {
                error!("Rendering failed: {err}");
                g.exit()
            }

            if !DEBUG {
                return;
            }

            if start.elapsed().as_secs() >= 1 {
                let fps = frames_drawn as f64 / start.elapsed().as_millis() as f64 * 1000.0;
                g.window.set_title(
                    format!("{} - FPS: {:.0} - frame {}", TITLE, fps, g.game.frame_count).as_str(),
                );

                start = Instant::now();
                frames_drawn = 0;
            }
            frames_drawn += 1;
        },
        |g, event| {
            let Event::WindowEvent { event, .. } = event else {
                return;
            };

            match event {
                WindowEvent::CloseRequested | WindowEvent::Destroyed => g.exit(),
                WindowEvent::KeyboardInput { input: key, .. } => {
                    if key.virtual_keycode == Some(input::KeyCode::Escape) {
                        g.exit();
                        return;
                    }
                    g.game.keys.push(*key);
                }
                WindowEvent::Focused(false) => g.game.focus_lost = true,
                WindowEvent::Resized(size) => {
                    if let Err(err) = g.game.pixels.resize_surface(size.width, size.height) {
                        error!("Window resize failed: {err}");
                        g.exit();
                    }
                }
                _ => {}
            }
        },
    )
}
