//! Game balance tuning
//!
//! Every tunable the simulation reads lives here, including the animation
//! cue names and the collision layer index, so no component carries global
//! constants. Hosts may load overrides from JSON; missing fields keep their
//! defaults.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` range for a uniformly drawn duration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimeRange {
    pub min: f32,
    pub max: f32,
}

impl TimeRange {
    /// Draw a duration uniformly from the range
    pub fn draw<R: Rng>(&self, rng: &mut R) -> f32 {
        rng.random_range(self.min..=self.max.max(self.min))
    }
}

/// Per-batch hazard count range with per-round growth
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HazardCounts {
    pub min: u32,
    pub max: u32,
    /// Added to `max` as `floor(round * round_growth)`
    pub round_growth: f32,
}

impl HazardCounts {
    /// Draw a count for the given round, uniformly in the scaled range
    pub fn draw<R: Rng>(&self, round: u32, rng: &mut R) -> u32 {
        let hi = self.max + (round as f32 * self.round_growth) as u32;
        rng.random_range(self.min..=hi.max(self.min))
    }
}

/// Animation cue names the player plays on its own animator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerCues {
    /// Jump ascent
    pub rise: String,
    /// Descent / free fall
    pub fall: String,
    /// Grounded
    pub idle: String,
    /// Bubble gained from zero
    pub bubble_on: String,
    /// Bubble drained to zero
    pub bubble_off: String,
    /// Trap contact flinch
    pub hit: String,
    /// Death sequence
    pub death: String,
}

impl Default for PlayerCues {
    fn default() -> Self {
        Self {
            rise: "jump_up".to_string(),
            fall: "jump_down".to_string(),
            idle: "idle".to_string(),
            bubble_on: "bubble_on".to_string(),
            bubble_off: "bubble_off".to_string(),
            hit: "beattack".to_string(),
            death: "death".to_string(),
        }
    }
}

/// Player movement and collision tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Horizontal run speed (units/sec)
    pub move_speed: f32,
    /// Initial upward speed of a jump
    pub jump_speed: f32,
    /// Downward acceleration; also decelerates the jump arc
    pub gravity: f32,
    /// Collision radius without a bubble
    pub shadow_radius: f32,
    /// Collision radius while any bubble life remains
    pub bubble_radius: f32,
    pub cues: PlayerCues,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            jump_speed: 7.0,
            gravity: 14.0,
            shadow_radius: 0.25,
            bubble_radius: 0.45,
            cues: PlayerCues::default(),
        }
    }
}

/// World streaming and hazard placement tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    /// Platform cell edge length; also the streaming grid pitch
    pub cell_size: f32,
    /// Collision layer the platform cells occupy
    pub platform_layer: u32,
    /// Contact radius of lights and elements, and half-extent of the trap
    /// hit box
    pub hazard_radius: f32,
    /// Downward speed of falling lights (units/sec)
    pub light_fall_speed: f32,
    pub lights: HazardCounts,
    pub traps: HazardCounts,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            platform_layer: 6,
            hazard_radius: 0.4,
            light_fall_speed: 2.0,
            lights: HazardCounts {
                min: 1,
                max: 2,
                round_growth: 0.5,
            },
            traps: HazardCounts {
                min: 1,
                max: 1,
                round_growth: 0.25,
            },
        }
    }
}

/// Trap cycle timing and cue names
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrapTuning {
    /// Cooldown before the trap shows, redrawn each cycle
    pub interval: TimeRange,
    /// How long the trap stays armed, redrawn each cycle
    pub active: TimeRange,
    pub show_cue: String,
    pub hide_cue: String,
}

impl Default for TrapTuning {
    fn default() -> Self {
        Self {
            interval: TimeRange { min: 2.0, max: 5.0 },
            active: TimeRange { min: 1.5, max: 3.0 },
            show_cue: "trap_show".to_string(),
            hide_cue: "trap_hide".to_string(),
        }
    }
}

/// Round lifecycle tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct GameTuning {
    /// Falling below this y kills the player
    pub dead_line: f32,
    /// Life granted at spawn
    pub start_life: u32,
}

impl Default for GameTuning {
    fn default() -> Self {
        Self {
            dead_line: -6.0,
            start_life: 1,
        }
    }
}

/// Complete tuning set handed to the orchestrator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub world: WorldTuning,
    pub trap: TrapTuning,
    pub game: GameTuning,
}

impl Tuning {
    /// Parse a tuning override file; absent fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
