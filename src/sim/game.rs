//! Round orchestration
//!
//! The top-level state machine tying the pieces together: it owns the world,
//! the player, the seeded RNG, and the host seams, and advances one round
//! from the intro transition through live play to the reload request. Hosts
//! drive it with [`Game::tick`] at a fixed step and feed input edges through
//! [`Game::apply_input`]; everything else happens inside.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::cast::LayerMask;
use super::player::{ContactOutcome, MoveDir, Player, StepReport};
use super::world::{Viewport, World};
use crate::host::{ControlSurface, EntityHandle, ResourceKind, Spawner};
use crate::tuning::Tuning;

/// Lifecycle phases of one round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Intro transition playing; the world is seeded, no player yet
    Opening,
    /// Player spawned above the corridor, falling toward the row
    Ready,
    /// Live play
    Running,
    /// Player dead, death cue playing out
    Ending,
    /// Outro transition; finishes with a reload request
    End,
}

/// Milestones the host may react to; at most one fires per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PlayerSpawned,
    Started,
    PlayerDied,
    ReloadRequested,
}

/// Host input edges. Press and release map one-to-one onto the player's
/// movement operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PressLeft,
    ReleaseLeft,
    PressRight,
    ReleaseRight,
    PressJump,
    ReleaseJump,
}

/// One round of the game, from intro to reload request.
pub struct Game {
    phase: RoundPhase,
    world: World,
    player: Option<Player>,
    player_handle: Option<EntityHandle>,
    tune: Tuning,
    rng: Pcg32,
    spawner: Box<dyn Spawner>,
    control: Box<dyn ControlSurface>,
    reload_sent: bool,
}

impl Game {
    /// Seed the world for the viewport, kick off the intro transition, and
    /// wait in [`RoundPhase::Opening`].
    pub fn new(
        tune: Tuning,
        view: &Viewport,
        seed: u64,
        mut spawner: Box<dyn Spawner>,
        mut control: Box<dyn ControlSurface>,
    ) -> Self {
        let mut world = World::new(tune.world.clone(), tune.trap.clone());
        world.initialize(view, spawner.as_mut());
        control.open();
        log::info!("round opening, seed {seed}");
        Self {
            phase: RoundPhase::Opening,
            world,
            player: None,
            player_handle: None,
            tune,
            rng: Pcg32::seed_from_u64(seed),
            spawner,
            control,
            reload_sent: false,
        }
    }

    /// Advance the round by one fixed step.
    pub fn tick(&mut self, view: &Viewport, dt: f32) -> Option<GameEvent> {
        match self.phase {
            RoundPhase::Opening => self.tick_opening(view),
            RoundPhase::Ready => self.tick_ready(dt),
            RoundPhase::Running => self.tick_running(view, dt),
            RoundPhase::Ending => self.tick_ending(dt),
            RoundPhase::End => self.tick_end(),
        }
    }

    /// Feed one input edge. Input arriving before the player exists (or
    /// after death) steers nothing and is dropped.
    pub fn apply_input(&mut self, event: InputEvent) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        match event {
            InputEvent::PressLeft => player.set_move_dir(MoveDir::Left),
            InputEvent::ReleaseLeft => player.stop_move_left(),
            InputEvent::PressRight => player.set_move_dir(MoveDir::Right),
            InputEvent::ReleaseRight => player.stop_move_right(),
            InputEvent::PressJump => player.jump(),
            InputEvent::ReleaseJump => player.stop_jump(),
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn player_pos(&self) -> Option<Vec2> {
        self.player.as_ref().map(Player::pos)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Once the intro reports open, drop the player in over the middle of
    /// the seeded run, one cell above the visible top.
    fn tick_opening(&mut self, view: &Viewport) -> Option<GameEvent> {
        if !self.control.is_opened() {
            return None;
        }
        let cells = self.world.cells();
        let anchor = cells.get(cells.len() / 2)?.pos;
        let pos = anchor + Vec2::new(0.0, view.top + self.tune.world.cell_size);

        let handle = self.spawner.instantiate(ResourceKind::Player);
        self.spawner.set_position(handle, pos);
        let cue = self.spawner.animator(handle);
        let mask = LayerMask::layer(self.tune.world.platform_layer);
        let mut player = Player::new(pos, self.tune.player.clone(), mask, cue);
        player.set_life(self.tune.game.start_life);

        self.player = Some(player);
        self.player_handle = Some(handle);
        self.phase = RoundPhase::Ready;
        log::info!("player spawned at {pos}");
        Some(GameEvent::PlayerSpawned)
    }

    /// The drop-in: play begins on the first ground contact.
    fn tick_ready(&mut self, dt: f32) -> Option<GameEvent> {
        let report = self.step_player(dt)?;
        if !report.grounded {
            return None;
        }
        self.control.show();
        self.phase = RoundPhase::Running;
        log::info!("round started");
        Some(GameEvent::Started)
    }

    fn tick_running(&mut self, view: &Viewport, dt: f32) -> Option<GameEvent> {
        self.step_player(dt);
        self.world.tick(view, self.spawner.as_mut(), &mut self.rng);
        self.world.tick_lights(dt, self.spawner.as_mut());
        self.world.tick_traps(dt, &mut self.rng);
        self.dispatch_contacts();
        self.check_dead_line()
    }

    /// The corpse and the hazards keep moving while the death cue plays;
    /// the outro starts once it finishes.
    fn tick_ending(&mut self, dt: f32) -> Option<GameEvent> {
        self.step_player(dt);
        self.world.tick_lights(dt, self.spawner.as_mut());
        self.world.tick_traps(dt, &mut self.rng);
        if !self.player.as_ref().is_some_and(Player::death_done) {
            return None;
        }
        self.control.close();
        self.phase = RoundPhase::End;
        log::info!("death cue finished, closing");
        None
    }

    fn tick_end(&mut self) -> Option<GameEvent> {
        if self.reload_sent || !self.control.is_closed() {
            return None;
        }
        self.reload_sent = true;
        log::info!("round over, requesting reload");
        Some(GameEvent::ReloadRequested)
    }

    /// Step the player against the live geometry and mirror the result onto
    /// its host entity.
    fn step_player(&mut self, dt: f32) -> Option<StepReport> {
        let player = self.player.as_mut()?;
        let report = player.tick(&self.world.caster(), dt);
        if let Some(handle) = self.player_handle {
            self.spawner.set_position(handle, report.pos);
        }
        Some(report)
    }

    /// Sweep the player over the hazards and apply every contact that
    /// opened this step. Consumed pickups are removed back-to-front so the
    /// scan indexes stay valid.
    fn dispatch_contacts(&mut self) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        let events = self.world.scan_contacts(player.pos(), player.radius());
        if events.is_empty() {
            return;
        }

        let mut consumed = Vec::new();
        for event in events {
            match player.on_hazard_contact(event.hazard, &self.world.caster()) {
                ContactOutcome::Consumed => consumed.push(event.index),
                ContactOutcome::LifeLost => {
                    log::info!("light hit, life {}", player.life());
                }
                ContactOutcome::BubbleBurst => {
                    log::info!("trap hit, bubble {}", player.bubble_life());
                }
                ContactOutcome::None => {}
            }
        }
        consumed.sort_unstable();
        for index in consumed.into_iter().rev() {
            self.world.consume_element(index, self.spawner.as_mut());
        }
    }

    /// Falling below the dead line kills; any death ends the round in the
    /// same tick it happened.
    fn check_dead_line(&mut self) -> Option<GameEvent> {
        let player = self.player.as_mut()?;
        if player.pos().y < self.tune.game.dead_line {
            player.kill_self();
        }
        if player.is_alive() {
            return None;
        }
        player.play_death();
        self.phase = RoundPhase::Ending;
        log::info!("player died at {}", player.pos());
        Some(GameEvent::PlayerDied)
    }
}
