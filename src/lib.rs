// Library exports for testing
pub use config::{CapPolicy, FormationConfig, GameConfig, PoolConfig};
pub use entities::{
    Direction, Enemy, EnemyId, EnemyPool, EnemyTier, FormationEngine, GameState, KillReport,
    Player, Projectile, ProjectileOwner,
};
pub use events::{FormationListener, GameStateListener, ListenerId, ObserverList, StateHandle};
pub use game::{FrameTime, GameManager, GameServices, RevivalSequencer, TickReport};
pub use geometry::{BoundaryMarkers, LevelBounds, Vec3};
pub use level::LevelTable;
pub use persistence::{FileHiScoreStore, MemoryHiScoreStore};
pub use services::{
    AudioCue, HiScoreStore, LevelDatabase, LevelDefinition, PlayerRig, Scoreboard, SpawnGrid,
    Spawner,
};

pub mod config;
pub mod entities;
pub mod error;
pub mod events;
pub mod game;
pub mod geometry;
pub mod input;
pub mod level;
pub mod persistence;
pub mod renderer;
pub mod services;
