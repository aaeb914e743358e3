//! Stack of game screens driven once per frame.
//!
//! The stack only changes inside [`ScreenContainer::update`]: new screens are
//! queued with [`ScreenContainer::play`] and finished ones flag themselves
//! through [`Screen::dispose`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    input::{Action, Actions},
    prelude::*,
};

pub mod game;
pub mod game_over;
pub mod pause;
pub mod title;
pub mod transition;


use pause::PauseScreen;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Kind {
    Regular,
    /// The paused-game overlay, at most one lives on the stack
    Pause,
}

pub trait Screen<C> {
    fn update(&mut self, ctx: &mut C);

    fn draw(&mut self, ctx: &mut C, frame: &mut [u8]);

    fn is_disposed(&self) -> bool;

    /// Asks the container to remove this screen.
    fn dispose(&mut self);

    /// While true, the screen below this one keeps getting updated too.
    fn is_fading_out(&self) -> bool {
        false
    }

    fn kind(&self) -> Kind {
        Kind::Regular
    }

    fn name(&self) -> &'static str {
        "screen"
    }
}

/// How many disposed screens a single update removes.
#[derive(Serialize, Deserialize, Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum CleanupPolicy {
    /// The first disposed screen from the bottom, one per frame
    #[default]
    OnePerFrame,
    Sweep,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScreenError {
    #[error("Cannot play screen `{name}`, it has already been disposed")]
    AlreadyDisposed { name: &'static str },
    #[error("Cannot play a pause screen, pause the container instead")]
    PauseViaPlay,
}

/// Work screens want done to the container, applied by the host after the update pass.
pub enum Command<C> {
    Play(Box<dyn Screen<C>>),
    Pause,
    KillAll,
}

pub struct ScreenContainer<C> {
    screens: Vec<Box<dyn Screen<C>>>,
    /// Goes on top during the next update. Playing again before that replaces it.
    pending: Option<Box<dyn Screen<C>>>,
    paused: bool,
    cleanup: CleanupPolicy,
    pause_screen: fn() -> Box<dyn Screen<C>>,
}

fn default_pause_screen<C: Actions + 'static>() -> Box<dyn Screen<C>> {
    Box::new(PauseScreen::new())
}

impl<C: Actions + 'static> ScreenContainer<C> {
    pub fn new() -> Self {
        Self::with_policy(CleanupPolicy::default())
    }

    pub fn with_policy(cleanup: CleanupPolicy) -> Self {
        Self {
            screens: Vec::new(),
            pending: None,
            paused: false,
            cleanup,
            pause_screen: default_pause_screen::<C>,
        }
    }
}

impl<C: Actions + 'static> Default for ScreenContainer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Actions> ScreenContainer<C> {
    /// Queues `screen` to go on top of the stack during the next update.
    pub fn play(&mut self, screen: Box<dyn Screen<C>>) -> Result<(), ScreenError> {
        if screen.kind() == Kind::Pause {
            return Err(ScreenError::PauseViaPlay);
        }
        if screen.is_disposed() {
            return Err(ScreenError::AlreadyDisposed {
                name: screen.name(),
            });
        }

        if let Some(discarded) = self.pending.replace(screen) {
            debug!(
                "Screen `{}` was replaced before it could be played",
                discarded.name()
            );
        }
        Ok(())
    }

    pub fn update(&mut self, ctx: &mut C) {
        self.kill();
        self.admit();

        // Update the screens from top to bottom, stopping when a
        // screen is found that is not fading out.
        for screen in self.screens.iter_mut().rev() {
            screen.update(ctx);
            if !screen.is_fading_out() {
                break;
            }
        }

        if !self.paused && ctx.is_asserted(Action::Pause) {
            self.pause();
        }
    }

    pub fn draw(&mut self, ctx: &mut C, frame: &mut [u8]) {
        for screen in self.screens.iter_mut() {
            screen.draw(ctx, frame);
        }
    }

    /// Pushes a pause screen straight on top. Does nothing if the game is
    /// already paused, returns whether a pause screen was added.
    pub fn pause(&mut self) -> bool {
        if self.paused {
            debug!("Already paused, not stacking another pause screen");
            return false;
        }

        self.screens.push((self.pause_screen)());
        self.paused = true;
        info!("Game paused");
        true
    }

    /// Disposes every screen on the stack. They are removed by the following
    /// updates according to the cleanup policy; the pending screen is untouched.
    pub fn kill_all(&mut self) {
        for screen in self.screens.iter_mut() {
            screen.dispose();
        }
    }

    pub fn apply(&mut self, command: Command<C>) -> Result<(), ScreenError> {
        match command {
            Command::Play(screen) => self.play(screen)?,
            Command::Pause => {
                self.pause();
            }
            Command::KillAll => self.kill_all(),
        }
        Ok(())
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Screens from bottom to top.
    pub fn iter(&self) -> std::slice::Iter<'_, Box<dyn Screen<C>>> {
        self.screens.iter()
    }

    /// The top screen. Callers may dispose it but cannot replace it.
    pub fn peek(&mut self) -> Option<&mut (dyn Screen<C> + 'static)> {
        self.screens.last_mut().map(|screen| &mut **screen)
    }

    /// Screen at `index`, counted from the bottom.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut (dyn Screen<C> + 'static)> {
        self.screens.get_mut(index).map(|screen| &mut **screen)
    }

    fn admit(&mut self) {
        if let Some(screen) = self.pending.take() {
            debug!("Playing screen `{}`", screen.name());
            self.screens.push(screen);
        }
    }

    fn kill(&mut self) {
        match self.cleanup {
            CleanupPolicy::OnePerFrame => {
                if let Some(i) = self.screens.iter().position(|s| s.is_disposed()) {
                    let screen = self.screens.remove(i);
                    self.forget(screen.as_ref());
                }
            }
            CleanupPolicy::Sweep => {
                let (dead, alive) = std::mem::take(&mut self.screens)
                    .into_iter()
                    .partition::<Vec<_>, _>(|s| s.is_disposed());
                self.screens = alive;
                for screen in dead {
                    self.forget(screen.as_ref());
                }
            }
        }
    }

    fn forget(&mut self, screen: &dyn Screen<C>) {
        if screen.kind() == Kind::Pause {
            self.paused = false;
            info!("Game resumed");
        }
        debug!("Removed screen `{}`", screen.name());
    }
}
