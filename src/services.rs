//! Capabilities the core needs from the rest of the game.

use crate::geometry::Vec3;

/// Placement geometry for a new wave
pub trait Spawner {
    fn origin(&self) -> Vec3;
    fn offset_x(&self) -> f32;
    fn offset_y(&self) -> f32;
}

/// Sound played on every formation step
pub trait AudioCue {
    fn play_boom(&mut self);
}

pub trait Scoreboard {
    fn update_score(&mut self, score: u32, is_hi_score: bool);
    fn update_player_lives(&mut self, lives: u32);
}

pub trait HiScoreStore {
    fn load_hi_score(&mut self) -> u32;
    fn save_hi_score(&mut self, hi_score: u32);
}

pub trait LevelDatabase {
    fn count(&self) -> usize;
    fn get(&self, index: usize) -> Option<&LevelDefinition>;
}

/// The player entity, as far as revival is concerned
pub trait PlayerRig {
    fn respawn_at(&mut self, position: Vec3);
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelDefinition {
    pub name: String,
}

impl LevelDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Fixed spawn origin with uniform column and row spacing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnGrid {
    origin: Vec3,
    offset_x: f32,
    offset_y: f32,
}

impl SpawnGrid {
    pub fn new(origin: Vec3, offset_x: f32, offset_y: f32) -> Self {
        Self {
            origin,
            offset_x,
            offset_y,
        }
    }
}

impl Spawner for SpawnGrid {
    fn origin(&self) -> Vec3 {
        self.origin
    }

    fn offset_x(&self) -> f32 {
        self.offset_x
    }

    fn offset_y(&self) -> f32 {
        self.offset_y
    }
}
