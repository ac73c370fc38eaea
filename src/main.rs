//! Bubble Fall demo driver
//!
//! Headless stand-in for a real host: runs one full round at the fixed
//! simulation step with stub spawner/animator/transition seams, a scripted
//! player, and a camera window chasing the player. `RUST_LOG=info` shows
//! the round milestones, `debug` adds per-entity and streaming detail.
//!
//! Usage: `bubble-fall [seed] [tuning.json]`

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;

use bubble_fall::Tuning;
use bubble_fall::consts::SIM_DT;
use bubble_fall::host::{
    AnimationCue, ControlSurface, CueState, EntityHandle, ResourceKind, Spawner,
};
use bubble_fall::sim::{Game, GameEvent, InputEvent, Viewport};

/// Ticks a stub animation cue takes to play out
const CUE_TICKS: u64 = 30;
/// Ticks the intro and outro transitions take
const TRANSITION_TICKS: u64 = 45;
/// Visible window size in world units
const VIEW_WIDTH: f32 = 12.0;
const VIEW_HEIGHT: f32 = 9.0;
/// Horizontal camera chase speed (units/sec)
const CAMERA_SPEED: f32 = 6.0;
/// Tick (after touchdown) where the script turns around and runs off the
/// torn-down left end of the corridor
const TURN_TICK: u64 = 900;
/// Hard cap so a scripted run always terminates
const MAX_TICKS: u64 = 60 * 120;

/// Tick counter shared with every stub seam
type Clock = Rc<Cell<u64>>;

/// Animator that finishes any cue after [`CUE_TICKS`] clock steps
struct DemoCue {
    clock: Clock,
    name: Option<String>,
    started: u64,
}

impl AnimationCue for DemoCue {
    fn play(&mut self, cue: &str) {
        self.name = Some(cue.to_string());
        self.started = self.clock.get();
    }

    fn current(&self) -> Option<CueState> {
        self.name.as_ref().map(|name| CueState {
            name: name.clone(),
            progress: (self.clock.get() - self.started) as f32 / CUE_TICKS as f32,
        })
    }
}

/// Spawner that hands out sequential handles and tallies entity churn
struct DemoSpawner {
    clock: Clock,
    next: u64,
    spawned: Rc<Cell<u64>>,
    destroyed: Rc<Cell<u64>>,
}

impl Spawner for DemoSpawner {
    fn instantiate(&mut self, kind: ResourceKind) -> EntityHandle {
        self.next += 1;
        self.spawned.set(self.spawned.get() + 1);
        log::debug!("spawn {kind:?} as #{}", self.next);
        EntityHandle(self.next)
    }

    fn destroy(&mut self, handle: EntityHandle) {
        self.destroyed.set(self.destroyed.get() + 1);
        log::debug!("destroy #{}", handle.0);
    }

    fn set_position(&mut self, _handle: EntityHandle, _pos: Vec2) {}

    fn animator(&mut self, _handle: EntityHandle) -> Box<dyn AnimationCue> {
        Box::new(DemoCue {
            clock: self.clock.clone(),
            name: None,
            started: 0,
        })
    }
}

/// Intro/outro transitions that take [`TRANSITION_TICKS`] to settle
struct DemoControl {
    clock: Clock,
    opened_at: Option<u64>,
    closed_at: Option<u64>,
}

impl ControlSurface for DemoControl {
    fn open(&mut self) {
        self.opened_at = Some(self.clock.get());
        log::debug!("intro transition started");
    }

    fn is_opened(&self) -> bool {
        self.opened_at
            .is_some_and(|at| self.clock.get() - at >= TRANSITION_TICKS)
    }

    fn show(&mut self) {
        log::debug!("controls shown");
    }

    fn close(&mut self) {
        self.closed_at = Some(self.clock.get());
        log::debug!("outro transition started");
    }

    fn is_closed(&self) -> bool {
        self.closed_at
            .is_some_and(|at| self.clock.get() - at >= TRANSITION_TICKS)
    }
}

fn viewport_at(cam_x: f32) -> Viewport {
    Viewport {
        left: cam_x - VIEW_WIDTH * 0.5,
        right: cam_x + VIEW_WIDTH * 0.5,
        top: VIEW_HEIGHT * 0.5,
    }
}

/// Scripted play, keyed on ticks since touchdown: run right with periodic
/// hops, then turn back left into the torn-down gap.
fn script_input(t: u64, game: &mut Game) {
    if t == TURN_TICK {
        game.apply_input(InputEvent::ReleaseRight);
        game.apply_input(InputEvent::PressLeft);
        return;
    }
    match t % 90 {
        30 => game.apply_input(InputEvent::PressJump),
        60 => game.apply_input(InputEvent::ReleaseJump),
        _ => {}
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .map(|s| s.parse().expect("seed must be an unsigned integer"))
        .unwrap_or(7);
    let tune = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path).expect("tuning file unreadable");
            Tuning::from_json(&json).expect("invalid tuning JSON")
        }
        None => Tuning::default(),
    };

    log::info!("Bubble Fall (headless) starting, seed {seed}");

    let clock: Clock = Rc::new(Cell::new(0));
    let spawned = Rc::new(Cell::new(0u64));
    let destroyed = Rc::new(Cell::new(0u64));
    let spawner = Box::new(DemoSpawner {
        clock: clock.clone(),
        next: 0,
        spawned: spawned.clone(),
        destroyed: destroyed.clone(),
    });
    let control = Box::new(DemoControl {
        clock: clock.clone(),
        opened_at: None,
        closed_at: None,
    });

    let mut cam_x = VIEW_WIDTH * 0.5;
    let mut view = viewport_at(cam_x);
    let mut game = Game::new(tune, &view, seed, spawner, control);

    let mut started_at: Option<u64> = None;
    let mut reloaded = false;
    let mut ticks: u64 = 0;
    while ticks < MAX_TICKS {
        clock.set(ticks);
        if let Some(start) = started_at {
            script_input(ticks - start, &mut game);
        }
        match game.tick(&view, SIM_DT) {
            Some(GameEvent::Started) => {
                started_at = Some(ticks);
                game.apply_input(InputEvent::PressRight);
            }
            Some(GameEvent::ReloadRequested) => {
                reloaded = true;
            }
            _ => {}
        }
        // The window chases the player at a capped speed
        if let Some(pos) = game.player_pos() {
            let step = CAMERA_SPEED * SIM_DT;
            cam_x += (pos.x - cam_x).clamp(-step, step);
            view = viewport_at(cam_x);
        }
        ticks += 1;
        if reloaded {
            break;
        }
    }

    let world = game.world();
    println!("\n== demo summary ==");
    println!("phase: {:?}", game.phase());
    println!("ticks: {ticks} ({:.1}s simulated)", ticks as f32 * SIM_DT);
    println!("rounds generated: {}", world.round());
    println!(
        "live entities: {} cells, {} lights, {} traps, {} pickups",
        world.cells().len(),
        world.lights().len(),
        world.traps().len(),
        world.elements().len(),
    );
    println!(
        "spawned {} entities, destroyed {}",
        spawned.get(),
        destroyed.get()
    );
    if let Some(player) = game.player() {
        println!(
            "player: pos {}, life {}, bubble {}",
            player.pos(),
            player.life(),
            player.bubble_life(),
        );
    }
    if !reloaded {
        println!("tick cap reached before the round finished");
    }
}
