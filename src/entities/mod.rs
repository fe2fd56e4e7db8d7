mod enemy;
mod formation;
mod game_state;
mod player;
mod pool;
mod projectile;

// Re-export all public types
pub use enemy::{Enemy, EnemyId, EnemyTier};
pub use formation::{Direction, FormationEngine, KillReport};
pub use game_state::GameState;
pub use player::Player;
pub use pool::EnemyPool;
pub use projectile::{Projectile, ProjectileOwner};
