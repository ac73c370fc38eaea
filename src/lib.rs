//! Bubble Fall - simulation core for a side-scrolling endless faller
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player kinematics, world streaming, game states)
//! - `host`: Capabilities the embedding engine provides (spawning, animation cues, UI)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, animation playback, input widgets, and camera smoothing live in the
//! host engine; the simulation reaches them only through the `host` traits.

pub mod host;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game rule constants
pub mod consts {
    /// Fixed simulation timestep for the headless driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Bubble-life ceiling; element pickups never raise the count past this
    pub const MAX_BUBBLE_LIFE: u32 = 2;
    /// Bubble life granted by one consumed element
    pub const ELEMENT_BUBBLE_GAIN: u32 = 2;
    /// Bubble life drained by one trap hit
    pub const TRAP_BUBBLE_COST: u32 = 2;
}
