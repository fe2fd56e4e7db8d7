use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, error, info, warn};
use rand::Rng;

use super::enemy::{Enemy, EnemyId, EnemyTier};
use super::game_state::GameState;
use super::pool::EnemyPool;
use crate::config::FormationConfig;
use crate::events::{FormationListener, ListenerId, ObserverList};
use crate::geometry::Vec3;
use crate::services::{AudioCue, Spawner};

/// Heading of the whole formation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Left,
    /// One step toward the player, then reverse
    Descend,
}

impl Direction {
    pub fn is_lateral(self) -> bool {
        self != Direction::Descend
    }

    /// Opposite lateral heading; Descend has none
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
            Direction::Descend => Direction::Descend,
        }
    }

    /// Signed x component (1 right, -1 left, 0 descend)
    pub fn sign(self) -> i8 {
        match self {
            Direction::Right => 1,
            Direction::Left => -1,
            Direction::Descend => 0,
        }
    }
}

/// Outcome of a processed kill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillReport {
    pub points: u32,
    /// The kill emptied the formation
    pub wave_complete: bool,
}

/// Lockstep formation: live enemies, the shared march timer and heading
pub struct FormationEngine {
    config: FormationConfig,
    pool: EnemyPool,
    enemies: Vec<Enemy>,
    march_interval: f32,
    timer: f32,
    direction: Direction,
    resume_direction: Direction,
    initialized: bool,
    spawner: Box<dyn Spawner>,
    audio: Box<dyn AudioCue>,
    listeners: ObserverList<dyn FormationListener>,
}

impl FormationEngine {
    pub fn new(
        config: FormationConfig,
        pool: EnemyPool,
        spawner: Box<dyn Spawner>,
        audio: Box<dyn AudioCue>,
    ) -> Self {
        Self {
            march_interval: config.initial_march_interval,
            config,
            pool,
            enemies: Vec::new(),
            timer: 0.0,
            direction: Direction::Right,
            resume_direction: Direction::Left,
            initialized: false,
            spawner,
            audio,
            listeners: ObserverList::new(),
        }
    }

    pub fn init(&mut self) {
        self.march_interval = self.config.initial_march_interval;
        self.timer = 0.0;
        self.direction = Direction::Right;
        self.resume_direction = Direction::Left;
        self.initialized = true;
    }

    /// Return every live enemy to the pool and reset the march state
    pub fn re_init(&mut self) {
        self.initialized = false;
        for enemy in self.enemies.drain(..) {
            if let Err(err) = self.pool.release(enemy) {
                warn!("re-init could not return enemy: {}", err);
            }
        }
        self.init();
    }

    /// Fill the grid for `level`. Spawning onto a non-empty formation adds to
    /// it; clearing first is the caller's job.
    pub fn spawn_wave(&mut self, level: usize) -> usize {
        let rows = self.config.max_rows.saturating_sub(level);
        let origin = self.spawner.origin();
        let offset_x = self.spawner.offset_x();
        let offset_y = self.spawner.offset_y();
        let mut rng = rand::rng();
        let mut spawned = 0;

        for row in 0..rows {
            for col in 0..self.config.max_columns {
                // TODO: pick the tier from a per-level spawn pattern
                let mut enemy = match self.pool.acquire(EnemyTier::Easy) {
                    Ok(enemy) => enemy,
                    Err(err) => {
                        error!("spawn at row {} col {} failed: {}", row, col, err);
                        continue;
                    }
                };

                let offset = Vec3::new(
                    col as f32 * offset_x,
                    0.0,
                    (-(level as f32) - row as f32) * offset_y,
                );
                let tint = (rng.random(), rng.random(), rng.random());
                enemy.init(origin + offset, tint);
                self.enemies.push(enemy);
                spawned += 1;
            }
        }

        info!("wave {} spawned {} enemies in {} rows", level, spawned, rows);
        spawned
    }

    /// Advance the march timer. Returns the step taken this tick, if any.
    pub fn tick(&mut self, delta: f32, state: GameState) -> Option<Direction> {
        if !self.initialized {
            debug!("formation tick before init ignored");
            return None;
        }
        if state != GameState::Playing {
            return None;
        }

        self.timer += delta;
        if self.timer < self.march_interval {
            return None;
        }

        self.timer = 0.0;
        let step = self.direction;
        self.audio.play_boom();
        self.listeners.notify(|l| l.on_direction_step(step));

        if step == Direction::Descend {
            self.direction = self.resume_direction;
        }
        Some(step)
    }

    /// An enemy touched a side wall. The first contact in a cycle wins.
    pub fn edge_reached(&mut self) {
        if !self.direction.is_lateral() {
            return;
        }
        debug!("edge reached heading {:?}, descending", self.direction);
        self.resume_direction = self.direction.opposite();
        self.direction = Direction::Descend;
    }

    /// Remove a live enemy. `None` if `id` is not in the formation.
    pub fn enemy_killed(&mut self, id: EnemyId) -> Option<KillReport> {
        let Some(index) = self.enemies.iter().position(|e| e.id() == id) else {
            warn!("kill for enemy {:?} not in formation ignored", id);
            return None;
        };

        let enemy = self.enemies.remove(index);
        let points = enemy.points();
        if let Err(err) = self.pool.release(enemy) {
            warn!("killed enemy not returned to pool: {}", err);
        }

        self.march_interval = (self.march_interval - self.config.march_decrement)
            .max(self.config.min_march_interval);
        self.listeners.notify(|l| l.on_enemy_killed(points));

        let wave_complete = self.enemies.is_empty();
        if wave_complete {
            self.listeners.notify(|l| l.on_wave_complete());
        }

        Some(KillReport {
            points,
            wave_complete,
        })
    }

    pub fn add_listener(&mut self, listener: Rc<RefCell<dyn FormationListener>>) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Live enemies, for the front-end's movement response to a step
    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn live_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn march_interval(&self) -> f32 {
        self.march_interval
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn resume_direction(&self) -> Direction {
        self.resume_direction
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &FormationConfig {
        &self.config
    }

    pub fn pool(&self) -> &EnemyPool {
        &self.pool
    }
}
