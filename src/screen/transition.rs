#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    FadingIn,
    Active,
    FadingOut,
    Done,
}

/// Opacity bookkeeping shared by screens that fade in and out.
/// Finishing a fade out disposes the owning screen.
#[derive(Clone, Debug)]
pub struct Transition {
    phase: Phase,
    alpha: f32,
    step: f32,
    disposed: bool,
}

impl Transition {
    /// `frames` is how many ticks a full fade takes, 0 means instant.
    pub fn new(frames: u32) -> Self {
        let step = if frames == 0 { 1. } else { 1. / frames as f32 };
        Self {
            phase: Phase::FadingIn,
            alpha: 0.,
            step,
            disposed: false,
        }
    }

    /// Advances the fade by one frame. Returns true on the tick a fade out completes.
    pub fn tick(&mut self) -> bool {
        match self.phase {
            Phase::FadingIn => {
                self.alpha = (self.alpha + self.step).min(1.);
                if self.alpha >= 1. {
                    self.phase = Phase::Active;
                }
                false
            }
            Phase::FadingOut => {
                self.alpha = (self.alpha - self.step).max(0.);
                if self.alpha > 0. {
                    return false;
                }
                self.phase = Phase::Done;
                self.disposed = true;
                true
            }
            Phase::Active | Phase::Done => false,
        }
    }

    pub fn fade_out(&mut self) {
        if matches!(self.phase, Phase::FadingIn | Phase::Active) {
            self.phase = Phase::FadingOut;
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_fading_out(&self) -> bool {
        self.phase == Phase::FadingOut
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
    }
}
