use std::time::Duration;

/// Grid size and march tempo for the enemy formation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormationConfig {
    pub max_rows: usize,
    pub max_columns: usize,
    /// Seconds between steps at the start of a wave
    pub initial_march_interval: f32,
    /// Seconds shaved off the interval per kill
    pub march_decrement: f32,
    /// The interval never drops below this
    pub min_march_interval: f32,
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            max_rows: 6,
            max_columns: 11,
            initial_march_interval: 1.0,
            march_decrement: 0.02,
            min_march_interval: 0.2,
        }
    }
}

/// What the pool does once a tier has created `hard_max` enemies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapPolicy {
    /// Keep creating, so a wave never comes up short
    #[default]
    Grow,
    /// Refuse the acquisition
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Instances prewarmed per tier
    pub soft_capacity: usize,
    pub hard_max: usize,
    pub cap_policy: CapPolicy,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            soft_capacity: 50,
            hard_max: 50,
            cap_policy: CapPolicy::Grow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub starting_level: usize,
    pub starting_lives: u32,
    /// Wall-clock pause between a player death and the respawn
    pub revival_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_level: 1,
            starting_lives: 3,
            revival_delay: Duration::from_secs(1),
        }
    }
}
