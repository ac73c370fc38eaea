//! Trap show/stay/hide cycle
//!
//! A cyclic timer state machine: cool down, play the show cue, stay armed
//! for a while, play the hide cue, repeat with freshly drawn timers. The
//! cue-gated transitions poll the host animator instead of running fixed
//! timers, so the hit volume and the visuals can never drift apart.

use rand::Rng;

use crate::host::AnimationCue;
use crate::tuning::TrapTuning;

/// Phases of the trap cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapPhase {
    /// Retracted, counting down the cooldown
    Ready,
    /// Show cue playing out
    Show,
    /// Fully out; the hit volume is live
    Stay,
    /// Hide cue playing out
    Hide,
}

/// One trap's cycling state. The animator and RNG are lent per call so the
/// cycle itself stays plain data.
#[derive(Debug, Clone)]
pub struct TrapCycle {
    phase: TrapPhase,
    cooldown: f32,
    active_left: f32,
}

impl TrapCycle {
    /// A fresh trap starts retracted with both timers drawn.
    pub fn new<R: Rng>(tune: &TrapTuning, cue: &mut dyn AnimationCue, rng: &mut R) -> Self {
        cue.play(&tune.hide_cue);
        Self {
            phase: TrapPhase::Ready,
            cooldown: tune.interval.draw(rng),
            active_left: tune.active.draw(rng),
        }
    }

    /// Advance the cycle by one step. At most one transition fires per call.
    pub fn tick<R: Rng>(
        &mut self,
        tune: &TrapTuning,
        cue: &mut dyn AnimationCue,
        rng: &mut R,
        dt: f32,
    ) {
        match self.phase {
            TrapPhase::Ready => {
                self.cooldown -= dt;
                if self.cooldown <= 0.0 {
                    self.phase = TrapPhase::Show;
                    cue.play(&tune.show_cue);
                }
            }
            TrapPhase::Show => {
                if cue.is_done(&tune.show_cue) {
                    self.phase = TrapPhase::Stay;
                }
            }
            TrapPhase::Stay => {
                self.active_left -= dt;
                if self.active_left <= 0.0 {
                    self.phase = TrapPhase::Hide;
                    cue.play(&tune.hide_cue);
                }
            }
            TrapPhase::Hide => {
                if cue.is_done(&tune.hide_cue) {
                    self.phase = TrapPhase::Ready;
                    self.cooldown = tune.interval.draw(rng);
                    self.active_left = tune.active.draw(rng);
                }
            }
        }
    }

    /// The hit volume is live only while the trap is fully out.
    pub fn armed(&self) -> bool {
        self.phase == TrapPhase::Stay
    }

    pub fn phase(&self) -> TrapPhase {
        self.phase
    }
}
