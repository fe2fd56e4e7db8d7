use std::ops::Add;

/// World-space position: x across, y up, z toward the far wall
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

/// Terminal cell for a world position: x is the column, -z the row
pub fn screen_cell(position: Vec3) -> (u16, u16) {
    (position.x.max(0.0).round() as u16, (-position.z).max(0.0).round() as u16)
}

/// World position on the floor plane for a terminal cell
pub fn cell_position(column: u16, row: u16) -> Vec3 {
    Vec3::new(column as f32, 0.0, -(row as f32))
}

/// World positions of the walls around the play field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryMarkers {
    pub left_wall: Vec3,
    pub right_wall: Vec3,
    pub top_wall: Vec3,
    pub bottom_wall: Vec3,
    pub far_wall: Vec3,
    pub player_spawn: Vec3,
}

/// Play field extents, fixed once the game starts
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LevelBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

impl LevelBounds {
    pub fn from_markers(markers: &BoundaryMarkers) -> Self {
        Self {
            left: markers.left_wall.x,
            right: markers.right_wall.x,
            top: markers.top_wall.y,
            bottom: markers.bottom_wall.y,
            near: markers.player_spawn.z,
            far: markers.far_wall.z,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_pick_the_right_axis_per_wall() {
        let markers = BoundaryMarkers {
            left_wall: Vec3::new(-10.0, 1.0, 2.0),
            right_wall: Vec3::new(10.0, 1.0, 2.0),
            top_wall: Vec3::new(0.0, 8.0, 0.0),
            bottom_wall: Vec3::new(0.0, -1.0, 0.0),
            far_wall: Vec3::new(0.0, 0.0, 30.0),
            player_spawn: Vec3::new(0.0, 0.0, -4.0),
        };
        let bounds = LevelBounds::from_markers(&markers);
        assert_eq!(bounds.left, -10.0);
        assert_eq!(bounds.right, 10.0);
        assert_eq!(bounds.top, 8.0);
        assert_eq!(bounds.bottom, -1.0);
        assert_eq!(bounds.near, -4.0);
        assert_eq!(bounds.far, 30.0);
        assert_eq!(bounds.width(), 20.0);
    }

    #[test]
    fn test_screen_cell_inverts_cell_position() {
        assert_eq!(screen_cell(cell_position(12, 7)), (12, 7));
        assert_eq!(screen_cell(Vec3::new(-3.0, 0.0, 2.0)), (0, 0));
    }

    #[test]
    fn test_vec3_add() {
        let sum = Vec3::new(1.0, 2.0, 3.0) + Vec3::new(0.5, -2.0, -4.0);
        assert_eq!(sum, Vec3::new(1.5, 0.0, -1.0));
    }
}
