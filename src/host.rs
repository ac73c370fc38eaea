//! Host engine integration
//!
//! The simulation owns no rendering, animation playback, or UI. Everything it
//! needs from the embedding engine is expressed as the traits here; the demo
//! binary and the tests supply stub implementations.

use glam::Vec2;

/// Opaque identifier for an entity the host instantiated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityHandle(pub u64);

/// Resource kinds the simulation asks the host to instantiate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Player,
    PlatformCell,
    Light,
    Trap,
    Element,
}

/// The cue an animator is currently playing
#[derive(Debug, Clone, PartialEq)]
pub struct CueState {
    pub name: String,
    /// Normalized progress; >= 1.0 means the cue has finished
    pub progress: f32,
}

/// One animated entity's cue player, handed out by [`Spawner::animator`]
pub trait AnimationCue {
    /// Start the named cue from the beginning
    fn play(&mut self, cue: &str);

    /// The cue currently playing, if any
    fn current(&self) -> Option<CueState>;

    /// Whether the named cue has finished. A current cue with a different
    /// name counts as finished, as does an animator that has never played.
    fn is_done(&self, name: &str) -> bool {
        match self.current() {
            Some(state) if state.name == name => state.progress >= 1.0,
            _ => true,
        }
    }
}

/// Entity lifecycle requests toward the host scene
pub trait Spawner {
    fn instantiate(&mut self, kind: ResourceKind) -> EntityHandle;
    fn destroy(&mut self, handle: EntityHandle);
    fn set_position(&mut self, handle: EntityHandle, pos: Vec2);
    /// Cue player bound to the entity's animator
    fn animator(&mut self, handle: EntityHandle) -> Box<dyn AnimationCue>;
}

/// The host's round intro/outro UI surface
pub trait ControlSurface {
    /// Start the intro transition
    fn open(&mut self);
    fn is_opened(&self) -> bool;
    /// Reveal the in-round controls
    fn show(&mut self);
    /// Start the outro transition
    fn close(&mut self);
    fn is_closed(&self) -> bool;
}
