use super::formation::Direction;
use crate::geometry::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(pub u32);

/// Difficulty tier, one pool reserve per tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyTier {
    Easy,
    Medium,
    Hard,
}

impl EnemyTier {
    pub const ALL: [EnemyTier; 3] = [EnemyTier::Easy, EnemyTier::Medium, EnemyTier::Hard];

    pub fn points(self) -> u32 {
        match self {
            EnemyTier::Easy => 10,
            EnemyTier::Medium => 20,
            EnemyTier::Hard => 30,
        }
    }

    pub fn get_sprite_lines(self) -> [&'static str; 3] {
        match self {
            EnemyTier::Easy => ["  \\|/  ", " {===} ", "  /_\\  "],
            EnemyTier::Medium => ["  <*>  ", " <|||> ", "  <*>  "],
            EnemyTier::Hard => [" [===] ", " |###| ", " [===] "],
        }
    }

    pub fn get_width(self) -> u16 {
        7
    }

    pub fn get_height(self) -> u16 {
        3
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    id: EnemyId,
    tier: EnemyTier,
    active: bool,
    pub position: Vec3,
    /// Cosmetic colour picked at spawn
    pub tint: (u8, u8, u8),
}

impl Enemy {
    pub(crate) fn new(id: EnemyId, tier: EnemyTier) -> Self {
        Self {
            id,
            tier,
            active: false,
            position: Vec3::ZERO,
            tint: (255, 255, 255),
        }
    }

    pub(crate) fn activate(&mut self) {
        self.active = true;
        self.position = Vec3::ZERO;
        self.tint = (255, 255, 255);
    }

    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }

    /// Place a freshly acquired enemy in the formation
    pub fn init(&mut self, position: Vec3, tint: (u8, u8, u8)) {
        self.position = position;
        self.tint = tint;
    }

    pub fn id(&self) -> EnemyId {
        self.id
    }

    pub fn tier(&self) -> EnemyTier {
        self.tier
    }

    pub fn points(&self) -> u32 {
        self.tier.points()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Respond to a formation step. Lateral steps move `stride` along x,
    /// a descend step moves `descent` toward the player (negative z).
    pub fn march(&mut self, direction: Direction, stride: f32, descent: f32) {
        match direction {
            Direction::Right => self.position.x += stride,
            Direction::Left => self.position.x -= stride,
            Direction::Descend => self.position.z -= descent,
        }
    }
}
