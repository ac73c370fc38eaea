//! Deterministic round simulation
//!
//! Everything that decides gameplay sits in this module, and it must stay
//! reproducible: ticks advance by a fixed step, randomness comes only from
//! the seeded run RNG, the streamed sequences keep a stable left-to-right
//! order, and the host is reached only through the injected seams. Given the
//! same seed, tuning, and input script, two runs are identical.

pub mod cast;
pub mod game;
pub mod player;
pub mod trap;
pub mod world;

pub use cast::{CastHit, CellCaster, LayerMask, ShapeCast};
pub use game::{Game, GameEvent, InputEvent, RoundPhase};
pub use player::{ContactOutcome, Motion, MoveDir, Player, StepReport};
pub use trap::{TrapCycle, TrapPhase};
pub use world::{
    ContactEvent, ElementPickup, Hazard, LightHazard, PlatformCell, Trap, Viewport, World,
};
