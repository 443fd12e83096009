//! Swarm Collision Demo
//!
//! Headless exercise of the cell-grid collision engine:
//! - A few hundred particles bounce around a bounded arena on different
//!   collision layers with asymmetric masks
//! - A fixed-step loop drives the grid exactly once per simulation tick
//! - Particles churn continuously (random despawns and respawns) to keep
//!   the cell pool and the pending queues busy
//! - Grid statistics and collision-event totals are logged while it runs

use grid_engine::prelude::*;
use log::info;
use rand::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

// Arena bounds, world units
const ARENA_MIN: f32 = -500.0;
const ARENA_MAX: f32 = 500.0;

// Population
const NUM_DRONES: usize = 150;
const NUM_HAZARDS: usize = 50;
const NUM_PICKUPS: usize = 50;

// Simulation settings
const TICK_RATE: f32 = 60.0;
const SIM_SECONDS: f32 = 10.0;
const MIN_SPEED: f32 = 40.0;
const MAX_SPEED: f32 = 160.0;

/// Particle roles, mapped onto collision layers with asymmetric interest:
/// drones hear about hazards and pickups; hazards hear about drones;
/// pickups hear about nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Drone,
    Hazard,
    Pickup,
}

impl Role {
    fn layer(self) -> u32 {
        match self {
            Role::Drone => CollisionLayers::ENEMY,
            Role::Hazard => CollisionLayers::PROJECTILE,
            Role::Pickup => CollisionLayers::PICKUP,
        }
    }

    fn mask(self) -> u32 {
        match self {
            Role::Drone => {
                CollisionLayers::mask(&[CollisionLayers::PROJECTILE, CollisionLayers::PICKUP])
            }
            Role::Hazard => CollisionLayers::mask(&[CollisionLayers::ENEMY]),
            Role::Pickup => CollisionLayers::NONE,
        }
    }
}

/// A bouncing particle tracked by the collision grid
struct Particle {
    role: Role,
    position: Vec2,
    velocity: Vec2,
    contacts_started: u32,
    contacts_ended: u32,
    cells_visited: u32,
}

impl Particle {
    fn random(role: Role, rng: &mut impl Rng) -> Self {
        let heading = rng.gen_range(0.0..std::f32::consts::TAU);
        let speed = rng.gen_range(MIN_SPEED..MAX_SPEED);
        Self {
            role,
            position: Vec2::new(
                rng.gen_range(ARENA_MIN..ARENA_MAX),
                rng.gen_range(ARENA_MIN..ARENA_MAX),
            ),
            velocity: Vec2::new(heading.cos(), heading.sin()) * speed,
            contacts_started: 0,
            contacts_ended: 0,
            cells_visited: 0,
        }
    }
}

impl GridCollider for Particle {
    fn update(&mut self, dt: f32) -> Vec2 {
        self.position += self.velocity * dt;

        // Reflect off the arena walls
        if self.position.x < ARENA_MIN || self.position.x > ARENA_MAX {
            self.velocity.x = -self.velocity.x;
            self.position.x = self.position.x.clamp(ARENA_MIN, ARENA_MAX);
        }
        if self.position.y < ARENA_MIN || self.position.y > ARENA_MAX {
            self.velocity.y = -self.velocity.y;
            self.position.y = self.position.y.clamp(ARENA_MIN, ARENA_MAX);
        }

        self.position
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn layer(&self) -> u32 {
        self.role.layer()
    }

    fn mask(&self) -> u32 {
        self.role.mask()
    }

    fn on_enter_cell(&mut self, _coords: CellCoords) {
        self.cells_visited += 1;
    }

    fn on_collision_started(&mut self, _other: ColliderId) {
        self.contacts_started += 1;
    }

    fn on_collision_ended(&mut self, _other: ColliderId) {
        self.contacts_ended += 1;
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

fn spawn_population(grid: &mut CollisionGrid, rng: &mut impl Rng) -> Vec<ColliderId> {
    let mut ids = Vec::with_capacity(NUM_DRONES + NUM_HAZARDS + NUM_PICKUPS);
    for _ in 0..NUM_DRONES {
        ids.push(grid.insert(Box::new(Particle::random(Role::Drone, rng))));
    }
    for _ in 0..NUM_HAZARDS {
        ids.push(grid.insert(Box::new(Particle::random(Role::Hazard, rng))));
    }
    for _ in 0..NUM_PICKUPS {
        ids.push(grid.insert(Box::new(Particle::random(Role::Pickup, rng))));
    }
    ids
}

fn main() {
    grid_engine::foundation::logging::init_with_default("info");

    let config = GridConfig {
        cell_width: 80.0,
        cell_height: 80.0,
    };
    config.validate().expect("grid configuration is invalid");

    let mut grid = CollisionGrid::new(config.cell_size());
    let mut rng = rand::thread_rng();
    let mut ids = spawn_population(&mut grid, &mut rng);
    info!(
        "spawned {} particles into an {}x{} arena",
        ids.len(),
        (ARENA_MAX - ARENA_MIN) as i32,
        (ARENA_MAX - ARENA_MIN) as i32
    );

    let mut visualizer = GridDebugVisualizer::new();
    let mut timer = Timer::new();
    let mut stepper = FixedStep::new(1.0 / TICK_RATE);
    let total_ticks = (SIM_SECONDS * TICK_RATE) as u64;
    let mut ticks_run: u64 = 0;

    while ticks_run < total_ticks {
        timer.update();

        for _ in 0..stepper.accumulate(timer.delta_time()) {
            grid.update(stepper.step());
            ticks_run += 1;

            // Churn: once a second, despawn a random particle and spawn a
            // replacement, keeping the pending queues and cell pool active
            if ticks_run % TICK_RATE as u64 == 0 {
                if let Some(&victim) = ids.choose(&mut rng) {
                    grid.remove(victim);
                }
                ids.push(grid.insert(Box::new(Particle::random(Role::Drone, &mut rng))));

                let stats = grid.stats();
                let mut central = HashSet::new();
                grid.query_region(
                    CellCoords::new(-2, -2),
                    CellCoords::new(2, 2),
                    &mut central,
                );
                info!(
                    "t={:>2}s tracked={} cells={} pooled={} central={}",
                    ticks_run / TICK_RATE as u64,
                    stats.tracked,
                    stats.live_cells,
                    stats.pooled_cells,
                    central.len()
                );

                visualizer.update(1.0);
                visualizer.draw(&grid);
            }

            if ticks_run >= total_ticks {
                break;
            }
        }

        // Headless stand-in for the render/vsync wait of a real frame
        std::thread::sleep(Duration::from_millis(4));
    }

    report(&grid);
    info!(
        "final debug view: {} shapes over {} occupied cells",
        visualizer.debug_draw().shape_count(),
        grid.cell_count()
    );

    grid.close();
    info!(
        "simulation finished: {} ticks in {:.2}s of wall time ({:.0} loops/s)",
        ticks_run,
        timer.total_time(),
        timer.average_fps()
    );
}

/// Sum and log the event counters across every live particle
fn report(grid: &CollisionGrid) {
    let mut particles = HashSet::new();
    grid.collect_colliders::<Particle>(&mut particles);

    let mut started: u64 = 0;
    let mut ended: u64 = 0;
    let mut visited: u64 = 0;
    for &id in &particles {
        if let Some(particle) = grid.get_as::<Particle>(id) {
            started += u64::from(particle.contacts_started);
            ended += u64::from(particle.contacts_ended);
            visited += u64::from(particle.cells_visited);
        }
    }
    info!(
        "{} live particles: {} contacts started, {} ended, {} cell transitions",
        particles.len(),
        started,
        ended,
        visited
    );
}
