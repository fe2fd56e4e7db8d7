use super::projectile::{Projectile, ProjectileOwner};
use crate::geometry::{Vec3, screen_cell};
use crate::services::PlayerRig;

/// Player cannon, in terminal cells
#[derive(Debug, Clone)]
pub struct Player {
    pub x: u16,
    pub y: u16,
    pub fire_cooldown: u8,
    /// Frames of blink left after a respawn
    pub respawn_flash_frames: u8,
}

impl Player {
    pub fn new(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            fire_cooldown: 0,
            respawn_flash_frames: 0,
        }
    }

    pub fn move_left(&mut self, min_x: u16) {
        if self.x > min_x {
            self.x -= 1;
        }
    }

    pub fn move_right(&mut self, max_x: u16) {
        if self.x < max_x {
            self.x += 1;
        }
    }

    pub fn update(&mut self) {
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
        self.respawn_flash_frames = self.respawn_flash_frames.saturating_sub(1);
    }

    pub fn is_flashing(&self) -> bool {
        self.respawn_flash_frames > 0
    }

    pub fn get_sprite_lines(&self) -> [&'static str; 2] {
        ["  ^  ", "[===]"]
    }

    pub fn get_width(&self) -> u16 {
        5
    }

    pub fn get_height(&self) -> u16 {
        2
    }

    /// Fire from the barrel if the cooldown allows it
    pub fn try_fire(&mut self) -> Option<Projectile> {
        if self.fire_cooldown > 0 || self.y == 0 {
            return None;
        }
        self.fire_cooldown = 12;
        Some(Projectile::new(
            self.x + self.get_width() / 2,
            self.y - 1,
            ProjectileOwner::Player,
        ))
    }

    /// Whether a projectile cell overlaps the sprite
    pub fn is_hit_by(&self, projectile: &Projectile) -> bool {
        projectile.x >= self.x
            && projectile.x < self.x + self.get_width()
            && projectile.y >= self.y
            && projectile.y < self.y + self.get_height()
    }
}

impl PlayerRig for Player {
    fn respawn_at(&mut self, position: Vec3) {
        let (x, y) = screen_cell(position);
        self.x = x;
        self.y = y;
        self.fire_cooldown = 0;
        self.respawn_flash_frames = 60;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::cell_position;

    #[test]
    fn test_player_movement_clamped() {
        let mut player = Player::new(1, 20);
        player.move_left(1);
        assert_eq!(player.x, 1);
        player.move_right(2);
        player.move_right(2);
        assert_eq!(player.x, 2);
    }

    #[test]
    fn test_player_fire_cooldown() {
        let mut player = Player::new(10, 20);
        let shot = player.try_fire().unwrap();
        assert_eq!((shot.x, shot.y), (12, 19));
        assert_eq!(shot.owner, ProjectileOwner::Player);
        assert!(player.try_fire().is_none());

        for _ in 0..12 {
            player.update();
        }
        assert!(player.try_fire().is_some());
    }

    #[test]
    fn test_respawn_moves_to_spawn_cell_and_blinks() {
        let mut player = Player::new(3, 4);
        player.fire_cooldown = 9;
        player.respawn_at(cell_position(30, 22));
        assert_eq!((player.x, player.y), (30, 22));
        assert_eq!(player.fire_cooldown, 0);
        assert!(player.is_flashing());
    }

    #[test]
    fn test_player_hit_box() {
        let player = Player::new(10, 20);
        assert!(player.is_hit_by(&Projectile::new(14, 21, ProjectileOwner::Enemy)));
        assert!(!player.is_hit_by(&Projectile::new(15, 21, ProjectileOwner::Enemy)));
        assert!(!player.is_hit_by(&Projectile::new(12, 19, ProjectileOwner::Enemy)));
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_player_stays_in_bounds_x(
                initial_x in 5u16..60,
                moves in prop::collection::vec(prop::bool::ANY, 0..100)
            ) {
                let mut player = Player::new(initial_x, 20);
                for right in moves {
                    if right { player.move_right(60) } else { player.move_left(5) }
                    prop_assert!(player.x >= 5 && player.x <= 60);
                }
            }
        }
    }
}
