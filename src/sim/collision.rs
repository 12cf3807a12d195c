//! Collision detection between the player and the course
//!
//! Hitboxes are deliberately tighter than the drawn sprites so that
//! near-misses read as misses. Saws are tested as circles, everything else
//! as axis-aligned boxes.

use glam::Vec2;

use super::entity::{FinishLine, Obstacle, ObstacleKind, Player};
use crate::consts::{OBSTACLE_HITBOX_MARGIN, PLAYER_HITBOX_MARGIN, SAW_TOLERANCE};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Shrink by `margin` on every side
    pub fn inset(self, margin: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(margin),
            max: self.max - Vec2::splat(margin),
        }
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// What the player touched this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    None,
    Finish,
    /// Index into the obstacle list
    Obstacle(usize),
}

pub fn player_hitbox(player: &Player) -> Aabb {
    Aabb::from_pos_size(player.pos, Vec2::splat(player.size)).inset(PLAYER_HITBOX_MARGIN)
}

pub fn obstacle_hitbox(obstacle: &Obstacle) -> Aabb {
    Aabb::from_pos_size(obstacle.pos, obstacle.size()).inset(OBSTACLE_HITBOX_MARGIN)
}

/// Circles overlap when their centers are closer than the summed radii
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

pub fn player_hits_obstacle(player: &Player, obstacle: &Obstacle) -> bool {
    match obstacle.kind {
        ObstacleKind::Saw { .. } => circles_overlap(
            player.center(),
            player.size / 2.0 - SAW_TOLERANCE,
            obstacle.center(),
            obstacle.size().x / 2.0 - SAW_TOLERANCE,
        ),
        ObstacleKind::Block | ObstacleKind::Spike | ObstacleKind::TripleSpike => {
            player_hitbox(player).overlaps(&obstacle_hitbox(obstacle))
        }
    }
}

pub fn player_reaches_finish(player: &Player, finish: &FinishLine) -> bool {
    player_hitbox(player).max.x >= finish.x
}

/// Check the finish line first, then obstacles in order, stopping at the
/// first hit
pub fn detect(player: &Player, obstacles: &[Obstacle], finish: Option<&FinishLine>) -> Contact {
    if finish.is_some_and(|f| player_reaches_finish(player, f)) {
        return Contact::Finish;
    }

    obstacles
        .iter()
        .position(|o| !o.deleted && player_hits_obstacle(player, o))
        .map_or(Contact::None, Contact::Obstacle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::entity::ShapeKind;

    fn player() -> Player {
        Player::new([1.0; 4], ShapeKind::Square)
    }

    #[test]
    fn test_hitbox_is_inset() {
        let p = player();
        let hitbox = player_hitbox(&p);
        let extent = hitbox.max - hitbox.min;
        assert_eq!(extent, Vec2::splat(PLAYER_SIZE - 2.0 * PLAYER_HITBOX_MARGIN));
        assert!(extent.min_element() > 0.0);
    }

    #[test]
    fn test_block_overlap() {
        let p = player();
        let block = Obstacle::new(ObstacleKind::Block, PLAYER_X + 10.0);
        assert!(player_hits_obstacle(&p, &block));
    }

    #[test]
    fn test_near_miss_is_forgiven() {
        let p = player();
        // Sprites overlap by a few pixels but the hitboxes do not
        let block = Obstacle::new(ObstacleKind::Block, PLAYER_X + PLAYER_SIZE - 4.0);
        assert!(!player_hits_obstacle(&p, &block));
    }

    #[test]
    fn test_jumping_clears_spike() {
        let mut p = player();
        p.pos.y = GROUND_Y - SPIKE_HEIGHT - PLAYER_SIZE - 1.0;
        let spike = Obstacle::new(ObstacleKind::Spike, PLAYER_X);
        assert!(!player_hits_obstacle(&p, &spike));
    }

    #[test]
    fn test_saw_uses_circle() {
        let p = player();
        // Saw sits diagonally: boxes would overlap at the corner, circles do not
        let mut saw = Obstacle::new(ObstacleKind::Saw { rotation: 0.0 }, 0.0);
        saw.pos = p.center() + Vec2::new(20.0, -80.0);
        saw.pos -= saw.size() / 2.0;
        assert!(!player_hits_obstacle(&p, &saw));

        saw.pos = p.pos;
        assert!(player_hits_obstacle(&p, &saw));
    }

    #[test]
    fn test_finish_checked_before_obstacles() {
        let p = player();
        let block = Obstacle::new(ObstacleKind::Block, PLAYER_X);
        let finish = FinishLine::new(PLAYER_X);
        assert_eq!(detect(&p, &[block.clone()], Some(&finish)), Contact::Finish);
        assert_eq!(detect(&p, &[block], None), Contact::Obstacle(0));
    }

    #[test]
    fn test_first_hit_wins() {
        let p = player();
        let far = Obstacle::new(ObstacleKind::Block, 900.0);
        let hit_a = Obstacle::new(ObstacleKind::Spike, PLAYER_X);
        let hit_b = Obstacle::new(ObstacleKind::Block, PLAYER_X + 5.0);
        assert_eq!(detect(&p, &[far, hit_a, hit_b], None), Contact::Obstacle(1));
    }

    #[test]
    fn test_no_contact_on_empty_course() {
        assert_eq!(detect(&player(), &[], None), Contact::None);
        let distant = FinishLine::new(PLAYFIELD_WIDTH);
        assert_eq!(detect(&player(), &[], Some(&distant)), Contact::None);
    }
}
