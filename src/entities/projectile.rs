#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

/// A shot travelling one terminal row per update
#[derive(Debug, Clone)]
pub struct Projectile {
    pub x: u16,
    pub y: u16,
    pub owner: ProjectileOwner,
}

impl Projectile {
    pub fn new(x: u16, y: u16, owner: ProjectileOwner) -> Self {
        Self { x, y, owner }
    }

    pub fn update(&mut self) {
        match self.owner {
            ProjectileOwner::Player => self.y = self.y.saturating_sub(1),
            ProjectileOwner::Enemy => self.y += 1,
        }
    }

    pub fn is_out_of_bounds(&self, max_x: u16, max_y: u16) -> bool {
        self.y == 0 || self.y >= max_y || self.x >= max_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_projectile_moves_up() {
        let mut projectile = Projectile::new(10, 10, ProjectileOwner::Player);
        projectile.update();
        assert_eq!(projectile.y, 9);
    }

    #[test]
    fn test_enemy_projectile_moves_down() {
        let mut projectile = Projectile::new(10, 10, ProjectileOwner::Enemy);
        projectile.update();
        assert_eq!(projectile.y, 11);
    }

    #[test]
    fn test_projectile_out_of_bounds() {
        assert!(Projectile::new(0, 0, ProjectileOwner::Player).is_out_of_bounds(80, 24));
        assert!(Projectile::new(10, 24, ProjectileOwner::Enemy).is_out_of_bounds(80, 24));
        assert!(Projectile::new(80, 5, ProjectileOwner::Enemy).is_out_of_bounds(80, 24));
        assert!(!Projectile::new(10, 5, ProjectileOwner::Enemy).is_out_of_bounds(80, 24));
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_projectile_moves_in_correct_direction(
                initial_x in 5u16..75,
                initial_y in 5u16..19,
                owner in prop::sample::select(vec![ProjectileOwner::Player, ProjectileOwner::Enemy])
            ) {
                let mut projectile = Projectile::new(initial_x, initial_y, owner);
                projectile.update();

                match owner {
                    ProjectileOwner::Player => prop_assert_eq!(projectile.y, initial_y - 1),
                    ProjectileOwner::Enemy => prop_assert_eq!(projectile.y, initial_y + 1),
                }
                prop_assert_eq!(projectile.x, initial_x);
            }
        }
    }
}
