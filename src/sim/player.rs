//! Player kinematics and life state
//!
//! Discrete-step movement with per-axis collision resolution: each tick
//! builds a tentative position (move, jump arc, gravity) and then clamps it
//! against the platform geometry, ground first, walls second. Casts go
//! through the injected [`ShapeCast`] provider, which stays a pure read, so
//! resolution is deterministic for a given geometry and input sequence.

use glam::Vec2;

use super::cast::{LayerMask, ShapeCast};
use super::world::Hazard;
use crate::consts::{ELEMENT_BUBBLE_GAIN, MAX_BUBBLE_LIFE, TRAP_BUBBLE_COST};
use crate::host::AnimationCue;
use crate::tuning::PlayerTuning;

/// Horizontal move direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveDir {
    Left,
    #[default]
    None,
    Right,
}

impl MoveDir {
    fn sign(self) -> f32 {
        match self {
            MoveDir::Left => -1.0,
            MoveDir::None => 0.0,
            MoveDir::Right => 1.0,
        }
    }
}

/// Vertical motion mode, mirrored onto the movement cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Grounded,
    Ascending,
    Descending,
}

/// Position and grounded flag reported by [`Player::tick`]
#[derive(Debug, Clone, Copy)]
pub struct StepReport {
    pub pos: Vec2,
    pub grounded: bool,
}

/// What a hazard contact did to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Nothing changed (absorbed, dead, or already unprotected)
    None,
    /// Element picked up; the caller should destroy the entity
    Consumed,
    /// Light hit an unprotected player
    LifeLost,
    /// Trap drained the bubble
    BubbleBurst,
}

/// The player: position, movement intent, jump arc, and life state.
///
/// Life starts at 0 (not alive); the orchestrator grants it with
/// [`Player::set_life`] once the round starts.
pub struct Player {
    pos: Vec2,
    move_dir: MoveDir,
    /// Jump arc stage: 1 ascending, -1 descending, 0 no jump in progress
    jump_dir: i8,
    jump_vel: f32,
    grounded: bool,
    motion: Motion,
    life: u32,
    bubble_life: u32,
    tune: PlayerTuning,
    mask: LayerMask,
    cue: Box<dyn AnimationCue>,
}

impl Player {
    pub fn new(pos: Vec2, tune: PlayerTuning, mask: LayerMask, cue: Box<dyn AnimationCue>) -> Self {
        Self {
            pos,
            move_dir: MoveDir::None,
            jump_dir: 0,
            jump_vel: 0.0,
            grounded: false,
            motion: Motion::Grounded,
            life: 0,
            bubble_life: 0,
            tune,
            mask,
            cue,
        }
    }

    /// Collision radius follows the bubble: inflated while any bubble life
    /// remains, back to the bare shadow when it pops.
    pub fn radius(&self) -> f32 {
        if self.bubble_life > 0 {
            self.tune.bubble_radius
        } else {
            self.tune.shadow_radius
        }
    }

    pub fn set_move_dir(&mut self, dir: MoveDir) {
        self.move_dir = dir;
    }

    /// Clears leftward movement only if that is still the current intent,
    /// so a stale release cannot cancel a newer press.
    pub fn stop_move_left(&mut self) {
        if self.move_dir == MoveDir::Left {
            self.stop_move();
        }
    }

    pub fn stop_move_right(&mut self) {
        if self.move_dir == MoveDir::Right {
            self.stop_move();
        }
    }

    pub fn stop_move(&mut self) {
        self.move_dir = MoveDir::None;
    }

    /// Start a jump. Ignored while a jump arc is in progress; plain free
    /// fall does not block a new jump.
    pub fn jump(&mut self) {
        if self.jump_dir != 0 {
            return;
        }
        self.jump_dir = 1;
        self.jump_vel = self.tune.jump_speed;
        self.grounded = false;
        self.set_motion(Motion::Ascending);
    }

    /// Force-clear the jump arc back to neutral.
    pub fn stop_jump(&mut self) {
        self.jump_dir = 0;
        self.set_motion(Motion::Grounded);
    }

    pub fn is_on_ground(&self) -> bool {
        self.grounded
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    pub fn kill_self(&mut self) {
        self.life = 0;
    }

    pub fn set_life(&mut self, life: u32) {
        self.life = life;
    }

    pub fn life(&self) -> u32 {
        self.life
    }

    pub fn bubble_life(&self) -> u32 {
        self.bubble_life
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn move_dir(&self) -> MoveDir {
        self.move_dir
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// Advance one simulation step. Stage order matters: each stage refines
    /// the tentative position the previous one produced.
    pub fn tick(&mut self, caster: &dyn ShapeCast, dt: f32) -> StepReport {
        let last = self.pos;
        let mut pos = last;
        self.update_move(&mut pos, dt);
        self.update_jump(&mut pos, dt);
        self.update_gravity(&mut pos, dt);
        self.check_ground(caster, last, &mut pos);
        self.check_wall(caster, last, &mut pos);
        self.pos = pos;
        StepReport {
            pos,
            grounded: self.grounded,
        }
    }

    fn update_move(&mut self, pos: &mut Vec2, dt: f32) {
        pos.x += self.move_dir.sign() * self.tune.move_speed * dt;
    }

    fn update_jump(&mut self, pos: &mut Vec2, dt: f32) {
        if self.jump_dir == 0 {
            return;
        }
        pos.y += self.jump_vel * dt;
        self.jump_vel -= self.tune.gravity * dt;
        if self.jump_dir > 0 && self.jump_vel < 0.0 {
            // Apex: the arc tips over into the descent
            self.jump_dir = -1;
            self.set_motion(Motion::Descending);
        }
    }

    /// Free fall applies only when no jump arc is integrating the vertical.
    fn update_gravity(&mut self, pos: &mut Vec2, dt: f32) {
        if self.jump_dir != 0 {
            return;
        }
        pos.y -= self.tune.gravity * dt;
    }

    /// Resolve the vertical move against the ground. Skipped while actively
    /// ascending so the jump can leave the surface.
    fn check_ground(&mut self, caster: &dyn ShapeCast, last: Vec2, pos: &mut Vec2) {
        if self.jump_dir > 0 {
            return;
        }
        let distance = (pos.y - last.y).abs();
        match caster.cast(last, self.radius(), Vec2::NEG_Y, distance, self.mask) {
            Some(hit) => {
                if hit.point.y > last.y {
                    // Landing from above: rest exactly on the surface
                    pos.y = hit.point.y + self.radius();
                } else {
                    // Already resting: do not sink further
                    pos.y = last.y;
                }
                self.jump_dir = 0;
                self.grounded = true;
                self.set_motion(Motion::Grounded);
            }
            None => {
                self.grounded = false;
                self.set_motion(Motion::Descending);
            }
        }
    }

    /// Resolve the horizontal move against walls.
    fn check_wall(&mut self, caster: &dyn ShapeCast, last: Vec2, pos: &mut Vec2) {
        let dx = pos.x - last.x;
        let dir = Vec2::new(dx, 0.0);
        let Some(hit) = caster.cast(last, self.radius(), dir, dx.abs(), self.mask) else {
            return;
        };
        if dx > 0.0 {
            pos.x = if hit.point.x < last.x {
                // Contact behind the start: recover out of the penetration
                hit.point.x - self.radius()
            } else {
                last.x
            };
        } else if dx < 0.0 {
            pos.x = if hit.point.x > last.x {
                hit.point.x + self.radius()
            } else {
                last.x
            };
        } else {
            pos.x = last.x;
        }
    }

    /// Dispatch a hazard contact. Everything here is a no-op once dead.
    pub fn on_hazard_contact(&mut self, hazard: Hazard, caster: &dyn ShapeCast) -> ContactOutcome {
        if !self.is_alive() {
            return ContactOutcome::None;
        }
        match hazard {
            Hazard::Element => {
                self.add_bubble_life(ELEMENT_BUBBLE_GAIN, caster);
                ContactOutcome::Consumed
            }
            Hazard::Light => {
                if self.bubble_life == 0 {
                    self.life = self.life.saturating_sub(1);
                    ContactOutcome::LifeLost
                } else {
                    // The bubble absorbs light hits outright
                    ContactOutcome::None
                }
            }
            Hazard::Trap => {
                self.cue.play(&self.tune.cues.hit);
                if self.bubble_life > 0 {
                    self.remove_bubble_life(TRAP_BUBBLE_COST);
                    ContactOutcome::BubbleBurst
                } else {
                    ContactOutcome::None
                }
            }
        }
    }

    fn add_bubble_life(&mut self, value: u32, caster: &dyn ShapeCast) {
        let old = self.bubble_life;
        self.bubble_life = (self.bubble_life + value).min(MAX_BUBBLE_LIFE);
        if old == 0 && self.bubble_life > 0 {
            self.cue.play(&self.tune.cues.bubble_on);
            // The collider just inflated; it may now penetrate the floor
            self.snap_to_ground(caster);
        }
    }

    fn remove_bubble_life(&mut self, value: u32) {
        let old = self.bubble_life;
        self.bubble_life = self.bubble_life.saturating_sub(value);
        if old > 0 && self.bubble_life == 0 {
            self.cue.play(&self.tune.cues.bubble_off);
        }
    }

    /// Recast downward from just above the current position and lift the
    /// player onto the surface if the radius now overlaps it.
    fn snap_to_ground(&mut self, caster: &dyn ShapeCast) {
        let r = self.radius();
        let start = self.pos + Vec2::new(0.0, r);
        if let Some(hit) = caster.cast(start, r, Vec2::NEG_Y, r * 2.0, self.mask) {
            if hit.point.y > self.pos.y - r {
                self.pos.y = hit.point.y + r;
            }
        }
    }

    pub fn play_death(&mut self) {
        self.cue.play(&self.tune.cues.death);
    }

    /// Whether the death cue has finished playing.
    pub fn death_done(&self) -> bool {
        self.cue.is_done(&self.tune.cues.death)
    }

    fn set_motion(&mut self, motion: Motion) {
        if self.motion == motion {
            return;
        }
        self.motion = motion;
        let name = match motion {
            Motion::Grounded => self.tune.cues.idle.as_str(),
            Motion::Ascending => self.tune.cues.rise.as_str(),
            Motion::Descending => self.tune.cues.fall.as_str(),
        };
        self.cue.play(name);
    }
}
