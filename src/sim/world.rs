//! Endless world streaming
//!
//! A rolling window of platform cells and hazard placements keyed to the
//! camera: cells stream in ahead of the window's right edge and are torn
//! down behind its left, one batch per round, with hazard counts that grow
//! as rounds accumulate. The live cell run doubles as the static geometry
//! the player's shape casts resolve against.

use glam::Vec2;
use rand::Rng;

use super::cast::CellCaster;
use super::trap::TrapCycle;
use crate::host::{AnimationCue, EntityHandle, ResourceKind, Spawner};
use crate::tuning::{TrapTuning, WorldTuning};

/// The camera's world-space window driving the streamer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub left: f32,
    pub right: f32,
    /// World-space y of the visible top edge
    pub top: f32,
}

impl Viewport {
    pub fn width(&self) -> f32 {
        (self.right - self.left).abs()
    }
}

/// One fixed-size platform segment of the streamed corridor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformCell {
    pub pos: Vec2,
    pub handle: EntityHandle,
}

/// A falling light, spawned above the visible top of its column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightHazard {
    pub pos: Vec2,
    pub handle: EntityHandle,
    touched: bool,
}

/// A pop-up trap sitting one cell above the platform row
pub struct Trap {
    pub pos: Vec2,
    pub handle: EntityHandle,
    pub cycle: TrapCycle,
    cue: Box<dyn AnimationCue>,
    touched: bool,
}

/// A bubble-life pickup; stays until consumed, the window never scrubs it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementPickup {
    pub pos: Vec2,
    pub handle: EntityHandle,
    touched: bool,
}

/// Closed set of things the player can run into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hazard {
    Element,
    Light,
    Trap,
}

/// An enter-edge contact fired by [`World::scan_contacts`]; `index` points
/// into the per-kind sequence the hazard lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub hazard: Hazard,
    pub index: usize,
}

/// Anything the streaming window tracks, ordered left to right by x
trait Streamed {
    fn x(&self) -> f32;
    fn handle(&self) -> EntityHandle;
}

impl Streamed for PlatformCell {
    fn x(&self) -> f32 {
        self.pos.x
    }

    fn handle(&self) -> EntityHandle {
        self.handle
    }
}

impl Streamed for LightHazard {
    fn x(&self) -> f32 {
        self.pos.x
    }

    fn handle(&self) -> EntityHandle {
        self.handle
    }
}

impl Streamed for Trap {
    fn x(&self) -> f32 {
        self.pos.x
    }

    fn handle(&self) -> EntityHandle {
        self.handle
    }
}

/// The streamed world: the platform run plus the per-kind hazard sequences.
///
/// Every sequence stays sorted ascending by x, so window removal is a prefix
/// scan and the cast provider can window the cell slice. Entities are
/// instantiated and destroyed through the injected [`Spawner`]; the world
/// tracks the returned handles.
pub struct World {
    cells: Vec<PlatformCell>,
    lights: Vec<LightHazard>,
    traps: Vec<Trap>,
    elements: Vec<ElementPickup>,
    round: u32,
    tune: WorldTuning,
    trap_tune: TrapTuning,
}

impl World {
    pub fn new(tune: WorldTuning, trap_tune: TrapTuning) -> Self {
        Self {
            cells: Vec::new(),
            lights: Vec::new(),
            traps: Vec::new(),
            elements: Vec::new(),
            round: 0,
            tune,
            trap_tune,
        }
    }

    /// Seed the starting corridor: a contiguous run covering the view plus
    /// the retain margin, and one pickup about a third in from the run's
    /// right end. Call once before the first [`World::tick`].
    pub fn initialize(&mut self, view: &Viewport, spawner: &mut dyn Spawner) {
        let cell = self.tune.cell_size;
        let count = window_cells(view, cell);
        self.seed_cells(view.left, count + count / 3, spawner);

        let len = self.cells.len();
        let index = (len - len / 3).min(len - 1);
        let pos = self.cells[index].pos + Vec2::new(0.0, cell);
        self.spawn_element(pos, spawner);
    }

    /// Advance the streaming window one step: scrub everything the window
    /// left behind, then top up the run ahead of its right edge. Removal
    /// runs first so the generation trigger reads the updated run.
    pub fn tick<R: Rng>(&mut self, view: &Viewport, spawner: &mut dyn Spawner, rng: &mut R) {
        let cell = self.tune.cell_size;
        let count = window_cells(view, cell);
        let margin = count / 3;

        let remove_left = view.left - cell * margin as f32;
        remove_past(&mut self.cells, remove_left, spawner);
        remove_past(&mut self.lights, remove_left, spawner);
        remove_past(&mut self.traps, remove_left, spawner);

        if self.cells.is_empty() {
            // Only a viewport jump can strand the window off the run
            log::warn!(
                "platform run emptied at view [{:.1}, {:.1}]; reseeding",
                view.left,
                view.right
            );
            self.seed_cells(view.left, count + margin, spawner);
        }

        let Some(last_x) = self.cells.last().map(|c| c.pos.x) else {
            return;
        };
        let generate_right = view.right + cell * margin as f32;
        if last_x <= generate_right {
            self.generate_batch(last_x + cell, view, count, spawner, rng);
        }
    }

    /// One generation batch: `count` cells contiguous to the right of the
    /// run, hazards on columns drawn without replacement from the fresh
    /// batch, a pickup on odd rounds only. Requested hazard counts degrade
    /// to the candidates left, never an error.
    fn generate_batch<R: Rng>(
        &mut self,
        vx: f32,
        view: &Viewport,
        count: usize,
        spawner: &mut dyn Spawner,
        rng: &mut R,
    ) {
        let cell = self.tune.cell_size;
        for i in 0..count {
            self.spawn_cell(Vec2::new(vx + i as f32 * cell, 0.0), spawner);
        }

        // Lights and traps share one shrinking candidate set, so no column
        // carries two hazards within a batch.
        let mut columns: Vec<usize> = (0..count).collect();

        let want = self.tune.lights.draw(self.round, rng) as usize;
        let mut light_cols = draw_columns(&mut columns, want, rng);
        light_cols.sort_unstable();
        for col in &light_cols {
            let pos = Vec2::new(vx + *col as f32 * cell, view.top + cell);
            self.spawn_light(pos, spawner);
        }

        let want = self.tune.traps.draw(self.round, rng) as usize;
        let mut trap_cols = draw_columns(&mut columns, want, rng);
        trap_cols.sort_unstable();
        for col in &trap_cols {
            let pos = Vec2::new(vx + *col as f32 * cell, cell);
            self.spawn_trap(pos, spawner, rng);
        }

        // The pickup draw is independent and may land on a hazard column
        let element = self.round % 2 == 1;
        if element {
            let col = rng.random_range(0..count);
            let pos = Vec2::new(vx + col as f32 * cell, cell);
            self.spawn_element(pos, spawner);
        }

        log::debug!(
            "round {}: {} cells from x {:.1}, {} lights, {} traps{}",
            self.round,
            count,
            vx,
            light_cols.len(),
            trap_cols.len(),
            if element { ", element" } else { "" },
        );
        self.round += 1;
    }

    /// Drop the lights by one step. They fall through the corridor; the
    /// platform row does not stop them, the window scrubs them eventually.
    pub fn tick_lights(&mut self, dt: f32, spawner: &mut dyn Spawner) {
        let fall = self.tune.light_fall_speed * dt;
        for light in &mut self.lights {
            light.pos.y -= fall;
            spawner.set_position(light.handle, light.pos);
        }
    }

    /// Advance every live trap's show/stay/hide cycle.
    pub fn tick_traps<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        for trap in &mut self.traps {
            trap.cycle.tick(&self.trap_tune, trap.cue.as_mut(), rng, dt);
        }
    }

    /// Sweep the player circle over the hazard sequences and report the
    /// contacts that opened this step, in sequence order (elements, lights,
    /// traps). Contacts fire on the enter edge: one event per overlap
    /// episode, and a trap only counts while its hit volume is armed.
    pub fn scan_contacts(&mut self, center: Vec2, radius: f32) -> Vec<ContactEvent> {
        let mut events = Vec::new();
        let reach = radius + self.tune.hazard_radius;

        for (index, element) in self.elements.iter_mut().enumerate() {
            let hit = center.distance_squared(element.pos) < reach * reach;
            if hit && !element.touched {
                events.push(ContactEvent {
                    hazard: Hazard::Element,
                    index,
                });
            }
            element.touched = hit;
        }

        for (index, light) in self.lights.iter_mut().enumerate() {
            let hit = center.distance_squared(light.pos) < reach * reach;
            if hit && !light.touched {
                events.push(ContactEvent {
                    hazard: Hazard::Light,
                    index,
                });
            }
            light.touched = hit;
        }

        let half = Vec2::splat(self.tune.hazard_radius);
        for (index, trap) in self.traps.iter_mut().enumerate() {
            let closest = center.clamp(trap.pos - half, trap.pos + half);
            let hit = trap.cycle.armed() && center.distance_squared(closest) < radius * radius;
            if hit && !trap.touched {
                events.push(ContactEvent {
                    hazard: Hazard::Trap,
                    index,
                });
            }
            trap.touched = hit;
        }

        events
    }

    /// Remove a consumed pickup and hand its entity back to the host.
    pub fn consume_element(&mut self, index: usize, spawner: &mut dyn Spawner) {
        if index >= self.elements.len() {
            return;
        }
        let element = self.elements.remove(index);
        spawner.destroy(element.handle);
    }

    /// The live platform run doubles as the static cast geometry.
    pub fn caster(&self) -> CellCaster<'_> {
        CellCaster::new(&self.cells, self.tune.cell_size, self.tune.platform_layer)
    }

    pub fn cells(&self) -> &[PlatformCell] {
        &self.cells
    }

    pub fn lights(&self) -> &[LightHazard] {
        &self.lights
    }

    pub fn traps(&self) -> &[Trap] {
        &self.traps
    }

    pub fn elements(&self) -> &[ElementPickup] {
        &self.elements
    }

    /// Completed generation batches; the difficulty scale.
    pub fn round(&self) -> u32 {
        self.round
    }

    fn seed_cells(&mut self, left: f32, count: usize, spawner: &mut dyn Spawner) {
        for i in 0..count {
            self.spawn_cell(Vec2::new(left + i as f32 * self.tune.cell_size, 0.0), spawner);
        }
    }

    fn spawn_cell(&mut self, pos: Vec2, spawner: &mut dyn Spawner) {
        let handle = spawner.instantiate(ResourceKind::PlatformCell);
        spawner.set_position(handle, pos);
        self.cells.push(PlatformCell { pos, handle });
    }

    fn spawn_light(&mut self, pos: Vec2, spawner: &mut dyn Spawner) {
        let handle = spawner.instantiate(ResourceKind::Light);
        spawner.set_position(handle, pos);
        self.lights.push(LightHazard {
            pos,
            handle,
            touched: false,
        });
    }

    fn spawn_trap<R: Rng>(&mut self, pos: Vec2, spawner: &mut dyn Spawner, rng: &mut R) {
        let handle = spawner.instantiate(ResourceKind::Trap);
        spawner.set_position(handle, pos);
        let mut cue = spawner.animator(handle);
        let cycle = TrapCycle::new(&self.trap_tune, cue.as_mut(), rng);
        self.traps.push(Trap {
            pos,
            handle,
            cycle,
            cue,
            touched: false,
        });
    }

    fn spawn_element(&mut self, pos: Vec2, spawner: &mut dyn Spawner) {
        let handle = spawner.instantiate(ResourceKind::Element);
        spawner.set_position(handle, pos);
        self.elements.push(ElementPickup {
            pos,
            handle,
            touched: false,
        });
    }
}

/// Cells needed to span the view
fn window_cells(view: &Viewport, cell: f32) -> usize {
    (view.width() / cell).ceil().max(1.0) as usize
}

/// Prefix-scan removal: the run is sorted ascending by x, so everything the
/// window left behind sits at the front.
fn remove_past<T: Streamed>(list: &mut Vec<T>, remove_left: f32, spawner: &mut dyn Spawner) {
    while list.first().is_some_and(|t| t.x() <= remove_left) {
        let gone = list.remove(0);
        spawner.destroy(gone.handle());
    }
}

/// Up to `want` columns drawn uniformly without replacement; under-draws
/// when the candidates run out.
fn draw_columns<R: Rng>(columns: &mut Vec<usize>, want: usize, rng: &mut R) -> Vec<usize> {
    let take = want.min(columns.len());
    (0..take)
        .map(|_| columns.remove(rng.random_range(0..columns.len())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::CueState;
    use crate::tuning::{HazardCounts, TimeRange};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Animator whose every cue reports complete immediately
    #[derive(Default)]
    struct InstantCue(Option<String>);

    impl AnimationCue for InstantCue {
        fn play(&mut self, cue: &str) {
            self.0 = Some(cue.to_string());
        }

        fn current(&self) -> Option<CueState> {
            self.0.as_ref().map(|name| CueState {
                name: name.clone(),
                progress: 1.0,
            })
        }
    }

    #[derive(Default)]
    struct StubSpawner {
        next: u64,
        live: i64,
        destroyed: Vec<EntityHandle>,
    }

    impl Spawner for StubSpawner {
        fn instantiate(&mut self, _kind: ResourceKind) -> EntityHandle {
            self.next += 1;
            self.live += 1;
            EntityHandle(self.next)
        }

        fn destroy(&mut self, handle: EntityHandle) {
            self.live -= 1;
            self.destroyed.push(handle);
        }

        fn set_position(&mut self, _handle: EntityHandle, _pos: Vec2) {}

        fn animator(&mut self, _handle: EntityHandle) -> Box<dyn AnimationCue> {
            Box::new(InstantCue::default())
        }
    }

    fn world_with(tune: WorldTuning) -> World {
        World::new(
            tune,
            TrapTuning {
                interval: TimeRange { min: 0.5, max: 0.5 },
                active: TimeRange { min: 10.0, max: 10.0 },
                ..TrapTuning::default()
            },
        )
    }

    fn counts(min: u32, max: u32) -> HazardCounts {
        HazardCounts {
            min,
            max,
            round_growth: 0.0,
        }
    }

    fn assert_contiguous(cells: &[PlatformCell], cell_size: f32) {
        for pair in cells.windows(2) {
            let gap = pair[1].pos.x - pair[0].pos.x;
            assert!(
                (gap - cell_size).abs() < 1e-3,
                "gap {gap} between x {} and x {}",
                pair[0].pos.x,
                pair[1].pos.x
            );
        }
    }

    #[test]
    fn test_initialize_seeds_run_and_pickup() {
        let mut world = world_with(WorldTuning::default());
        let mut spawner = StubSpawner::default();
        let view = Viewport {
            left: 0.0,
            right: 12.0,
            top: 4.5,
        };

        world.initialize(&view, &mut spawner);

        // 12 window cells plus the 4-cell margin, on the row at y = 0
        assert_eq!(world.cells().len(), 16);
        assert_eq!(world.cells()[0].pos, Vec2::new(0.0, 0.0));
        assert_eq!(world.cells()[15].pos, Vec2::new(15.0, 0.0));
        assert_contiguous(world.cells(), 1.0);

        // The starting pickup sits a third in from the right, one cell up
        assert_eq!(world.elements().len(), 1);
        assert_eq!(world.elements()[0].pos, Vec2::new(11.0, 1.0));
        assert_eq!(world.round(), 0);
    }

    #[test]
    fn test_window_removal_boundary() {
        let mut world = world_with(WorldTuning {
            cell_size: 10.0,
            ..WorldTuning::default()
        });
        let mut spawner = StubSpawner::default();
        let mut rng = Pcg32::seed_from_u64(3);

        // Run seeded from x = -35: cells at -35, -25, -15, ...
        world.initialize(
            &Viewport {
                left: -35.0,
                right: 65.0,
                top: 40.0,
            },
            &mut spawner,
        );
        assert_eq!(world.cells()[0].pos.x, -35.0);

        // Visible 0..100 at cell 10: margin 3 cells, removal at x <= -30
        let view = Viewport {
            left: 0.0,
            right: 100.0,
            top: 40.0,
        };
        world.tick(&view, &mut spawner, &mut rng);

        assert_eq!(world.cells()[0].pos.x, -25.0, "-25 is inside the margin");
        assert!(world.cells().iter().all(|c| c.pos.x > -30.0));
        // The removed cell's entity went back to the host
        assert_eq!(spawner.destroyed.len(), 1);
        assert_contiguous(world.cells(), 10.0);
    }

    #[test]
    fn test_streaming_keeps_run_sorted_and_gap_free() {
        let mut world = world_with(WorldTuning::default());
        let mut spawner = StubSpawner::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut view = Viewport {
            left: 0.0,
            right: 12.0,
            top: 4.5,
        };

        world.initialize(&view, &mut spawner);
        for _ in 0..200 {
            view.left += 0.35;
            view.right += 0.35;
            world.tick(&view, &mut spawner, &mut rng);
            assert_contiguous(world.cells(), 1.0);
            // The run always covers the window
            assert!(world.cells()[0].pos.x <= view.left);
            assert!(world.cells().last().unwrap().pos.x >= view.right);
        }
        assert!(world.round() > 1);
        assert!(!spawner.destroyed.is_empty());

        // Handle bookkeeping balances: every live entity is tracked
        let tracked = world.cells().len()
            + world.lights().len()
            + world.traps().len()
            + world.elements().len();
        assert_eq!(spawner.live as usize, tracked);
    }

    #[test]
    fn test_one_batch_per_tick_and_round_counter() {
        let mut world = world_with(WorldTuning::default());
        let mut spawner = StubSpawner::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let view = Viewport {
            left: 0.0,
            right: 12.0,
            top: 4.5,
        };

        world.initialize(&view, &mut spawner);

        // Rightmost cell at x = 15 is inside the trigger (12 + 4·1 = 16)
        world.tick(&view, &mut spawner, &mut rng);
        assert_eq!(world.round(), 1);
        assert_eq!(world.cells().len(), 16 + 12);

        // The topped-up run is clear of the trigger; nothing more happens
        world.tick(&view, &mut spawner, &mut rng);
        assert_eq!(world.round(), 1);
        assert_eq!(world.cells().len(), 16 + 12);
    }

    #[test]
    fn test_hazards_take_distinct_columns_per_batch() {
        let mut world = world_with(WorldTuning {
            lights: counts(3, 3),
            traps: counts(2, 2),
            ..WorldTuning::default()
        });
        let mut spawner = StubSpawner::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let view = Viewport {
            left: 0.0,
            right: 12.0,
            top: 4.5,
        };

        world.initialize(&view, &mut spawner);
        world.tick(&view, &mut spawner, &mut rng);

        assert_eq!(world.lights().len(), 3);
        assert_eq!(world.traps().len(), 2);

        // Lights drop in from above the visible top; traps sit on the row
        for light in world.lights() {
            assert_eq!(light.pos.y, view.top + 1.0);
        }
        for trap in world.traps() {
            assert_eq!(trap.pos.y, 1.0);
        }

        // One shared candidate set: all five columns are distinct
        let mut xs: Vec<f32> = world
            .lights()
            .iter()
            .map(|l| l.pos.x)
            .chain(world.traps().iter().map(|t| t.pos.x))
            .collect();
        xs.sort_by(f32::total_cmp);
        xs.dedup();
        assert_eq!(xs.len(), 5);

        // Each sequence is itself sorted left to right
        assert!(world.lights().windows(2).all(|p| p[0].pos.x < p[1].pos.x));
        assert!(world.traps().windows(2).all(|p| p[0].pos.x < p[1].pos.x));
    }

    #[test]
    fn test_hazard_placement_degrades_when_columns_run_out() {
        let mut world = world_with(WorldTuning {
            lights: counts(50, 50),
            traps: counts(50, 50),
            ..WorldTuning::default()
        });
        let mut spawner = StubSpawner::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let view = Viewport {
            left: 0.0,
            right: 12.0,
            top: 4.5,
        };

        world.initialize(&view, &mut spawner);
        world.tick(&view, &mut spawner, &mut rng);

        // 12 columns in the batch: lights exhaust them, traps get nothing
        assert_eq!(world.lights().len(), 12);
        assert_eq!(world.traps().len(), 0);
    }

    #[test]
    fn test_element_appears_on_odd_rounds_only() {
        let mut world = world_with(WorldTuning::default());
        let mut spawner = StubSpawner::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut view = Viewport {
            left: 0.0,
            right: 12.0,
            top: 4.5,
        };

        world.initialize(&view, &mut spawner);
        assert_eq!(world.elements().len(), 1);

        // Chase the run's right end so every tick generates a batch
        let mut per_round = vec![world.elements().len()];
        for _ in 0..4 {
            let edge = world.cells().last().unwrap().pos.x;
            view.left = edge - 12.0;
            view.right = edge;
            world.tick(&view, &mut spawner, &mut rng);
            per_round.push(world.elements().len());
        }
        // Rounds 0 and 2 add nothing; rounds 1 and 3 add one each
        assert_eq!(per_round, vec![1, 1, 2, 2, 3]);
    }

    #[test]
    fn test_reseed_after_viewport_jump() {
        let mut world = world_with(WorldTuning::default());
        let mut spawner = StubSpawner::default();
        let mut rng = Pcg32::seed_from_u64(8);

        world.initialize(
            &Viewport {
                left: 0.0,
                right: 12.0,
                top: 4.5,
            },
            &mut spawner,
        );

        // A teleport far right strands the whole run behind the window
        let jumped = Viewport {
            left: 1000.0,
            right: 1012.0,
            top: 4.5,
        };
        world.tick(&jumped, &mut spawner, &mut rng);

        assert!(!world.cells().is_empty());
        assert_eq!(world.cells()[0].pos.x, 1000.0);
        assert_contiguous(world.cells(), 1.0);
    }

    #[test]
    fn test_lights_fall_down_their_columns() {
        let mut world = world_with(WorldTuning {
            lights: counts(2, 2),
            traps: counts(0, 0),
            light_fall_speed: 2.0,
            ..WorldTuning::default()
        });
        let mut spawner = StubSpawner::default();
        let mut rng = Pcg32::seed_from_u64(6);
        let view = Viewport {
            left: 0.0,
            right: 12.0,
            top: 4.5,
        };

        world.initialize(&view, &mut spawner);
        world.tick(&view, &mut spawner, &mut rng);
        let before: Vec<Vec2> = world.lights().iter().map(|l| l.pos).collect();

        world.tick_lights(0.5, &mut spawner);
        for (light, start) in world.lights().iter().zip(&before) {
            assert_eq!(light.pos.x, start.x);
            assert_eq!(light.pos.y, start.y - 1.0);
        }
    }

    #[test]
    fn test_element_contact_fires_once_per_overlap() {
        let mut world = world_with(WorldTuning::default());
        let mut spawner = StubSpawner::default();
        let view = Viewport {
            left: 0.0,
            right: 12.0,
            top: 4.5,
        };

        world.initialize(&view, &mut spawner);
        let target = world.elements()[0].pos;

        let events = world.scan_contacts(target, 0.25);
        assert_eq!(
            events,
            vec![ContactEvent {
                hazard: Hazard::Element,
                index: 0
            }]
        );
        // Still overlapping: the episode already fired
        assert!(world.scan_contacts(target, 0.25).is_empty());
        // Leave and come back: a fresh episode fires again
        assert!(world.scan_contacts(target + Vec2::new(5.0, 0.0), 0.25).is_empty());
        assert_eq!(world.scan_contacts(target, 0.25).len(), 1);

        world.consume_element(0, &mut spawner);
        assert!(world.elements().is_empty());
        assert!(world.scan_contacts(target, 0.25).is_empty());
        assert_eq!(spawner.destroyed.len(), 1);
    }

    #[test]
    fn test_trap_contact_requires_armed_volume() {
        let mut world = world_with(WorldTuning {
            lights: counts(0, 0),
            traps: counts(1, 1),
            ..WorldTuning::default()
        });
        let mut spawner = StubSpawner::default();
        let mut rng = Pcg32::seed_from_u64(13);
        let view = Viewport {
            left: 0.0,
            right: 12.0,
            top: 4.5,
        };

        world.initialize(&view, &mut spawner);
        world.tick(&view, &mut spawner, &mut rng);
        assert_eq!(world.traps().len(), 1);
        let target = world.traps()[0].pos;

        // Retracted: standing on the trap is safe
        assert!(world.scan_contacts(target, 0.25).is_empty());

        // Cooldown 0.5s, instant cues: two ticks reach the armed phase
        world.tick_traps(0.6, &mut rng);
        world.tick_traps(0.1, &mut rng);
        assert!(world.traps()[0].cycle.armed());

        let events = world.scan_contacts(target, 0.25);
        assert_eq!(
            events,
            vec![ContactEvent {
                hazard: Hazard::Trap,
                index: 0
            }]
        );
        // Same overlap episode: no refire
        assert!(world.scan_contacts(target, 0.25).is_empty());
    }
}
