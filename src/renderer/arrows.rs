//! Arrow shapes — straight arrows and knight "dog-leg" arrows.
//!
//! Shapes are built pointing north from the origin square's center and then
//! rotated into place, so every direction shares one outline.

use std::f64::consts::SQRT_2;

use crate::geometry::{Direction, Point};

/// Which way a knight arrow's elbow bends, seen along the long leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

/// Long-leg direction and elbow side for the eight knight displacements.
pub fn knight_direction(dx: i32, dy: i32) -> Option<(Direction, Hand)> {
    Some(match (dx, dy) {
        (1, 2) => (Direction::North, Hand::Right),
        (-1, 2) => (Direction::North, Hand::Left),
        (1, -2) => (Direction::South, Hand::Left),
        (-1, -2) => (Direction::South, Hand::Right),
        (2, 1) => (Direction::East, Hand::Left),
        (2, -1) => (Direction::East, Hand::Right),
        (-2, 1) => (Direction::West, Hand::Right),
        (-2, -1) => (Direction::West, Hand::Left),
        _ => return None,
    })
}

/// Distance from the origin center to the arrow tip for a straight move.
///
/// `to_next_to_last` is the center-to-center distance from the origin square
/// to the square just before the destination. Adding half a square (half a
/// diagonal for diagonal moves) puts the tip on the destination's near edge
/// or corner.
pub fn straight_reach(to_next_to_last: f64, edge: f64, dir: Direction) -> f64 {
    if dir.is_diagonal() {
        to_next_to_last + edge / 2.0 * SQRT_2
    } else {
        to_next_to_last + edge / 2.0
    }
}

/// Straight arrow whose shaft is `length` long and `width` wide; the head
/// adds another `width` to the reach.
pub fn straight_arrow(origin: Point, length: f64, width: f64, dir: Direction) -> Vec<Point> {
    let Point { x: fx, y: fy } = origin;
    let outline = [
        (fx - width / 2.0, fy),
        (fx - width / 2.0, fy - length),
        (fx - width, fy - length),
        (fx, fy - length - width),
        (fx + width, fy - length),
        (fx + width / 2.0, fy - length),
        (fx + width / 2.0, fy),
    ];
    rotate(&outline, origin, dir)
}

/// L-shaped arrow: two squares along `dir`, then half a square sideways to
/// the destination's edge. The outer elbow corner is chamfered.
pub fn knight_arrow(origin: Point, square: f64, width: f64, dir: Direction, hand: Hand) -> Vec<Point> {
    let Point { x: fx, y: fy } = origin;
    let length = square * 2.0;
    let half = width / 2.0;
    let chamfer = half;

    // built bending right; mirrored for left
    let right = [
        (fx - half, fy),
        (fx - half, fy - length - half + chamfer),
        (fx - half + chamfer, fy - length - half),
        (fx + square / 2.0 - width, fy - length - half),
        (fx + square / 2.0 - width, fy - length - width),
        (fx + square / 2.0, fy - length),
        (fx + square / 2.0 - width, fy - length + width),
        (fx + square / 2.0 - width, fy - length + half),
        (fx + half, fy - length + half),
        (fx + half, fy),
    ];
    let outline: Vec<(f64, f64)> = match hand {
        Hand::Right => right.to_vec(),
        Hand::Left => right.iter().map(|&(x, y)| (2.0 * fx - x, y)).collect(),
    };
    rotate(&outline, origin, dir)
}

fn rotate(outline: &[(f64, f64)], origin: Point, dir: Direction) -> Vec<Point> {
    outline
        .iter()
        .map(|&(x, y)| Point::new(x, y).rotate_about(origin, dir.degrees()))
        .collect()
}

/// The point of `points` farthest from `origin` (the tip, for arrows).
#[cfg(test)]
pub(super) fn farthest_from(points: &[Point], origin: Point) -> Option<Point> {
    points
        .iter()
        .copied()
        .max_by(|a, b| origin.distance(*a).total_cmp(&origin.distance(*b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn knight_table_is_a_bijection() {
        let moves = [(1, 2), (-1, 2), (1, -2), (-1, -2), (2, 1), (2, -1), (-2, 1), (-2, -1)];
        let pairs: HashSet<_> = moves.iter().map(|&(dx, dy)| knight_direction(dx, dy).unwrap()).collect();
        assert_eq!(pairs.len(), 8);
        assert_eq!(knight_direction(1, 2), Some((Direction::North, Hand::Right)));
        assert_eq!(knight_direction(2, 1), Some((Direction::East, Hand::Left)));
        assert_eq!(knight_direction(1, 1), None);
        assert_eq!(knight_direction(3, 1), None);
    }

    #[test]
    fn straight_arrow_tip_is_length_plus_width_away() {
        let o = Point::new(100.0, 100.0);
        let arrow = straight_arrow(o, 40.0, 10.0, Direction::North);
        assert_eq!(arrow.len(), 7);
        assert!(close(farthest_from(&arrow, o).unwrap(), Point::new(100.0, 50.0)));

        let east = straight_arrow(o, 40.0, 10.0, Direction::East);
        assert!(close(farthest_from(&east, o).unwrap(), Point::new(150.0, 100.0)));
    }

    #[test]
    fn diagonal_reach_uses_half_a_diagonal() {
        let reach = straight_reach(0.0, 50.0, Direction::NorthEast);
        assert!((reach - 25.0 * SQRT_2).abs() < 1e-9);
        assert_eq!(straight_reach(50.0, 50.0, Direction::South), 75.0);
    }

    #[test]
    fn knight_arrow_ends_on_the_destination_edge() {
        // g1 -> f3 on 50px squares: two squares up, half a square left
        let o = Point::new(325.0, 375.0);
        let (dir, hand) = knight_direction(-1, 2).unwrap();
        let arrow = knight_arrow(o, 50.0, 10.0, dir, hand);
        let tip = arrow[5];
        assert!(close(tip, Point::new(300.0, 275.0)), "{tip:?}");
    }

    #[test]
    fn mirrored_knight_arrows_differ() {
        let o = Point::new(0.0, 0.0);
        let r = knight_arrow(o, 50.0, 10.0, Direction::North, Hand::Right);
        let l = knight_arrow(o, 50.0, 10.0, Direction::North, Hand::Left);
        assert!(r.iter().zip(&l).any(|(a, b)| !close(*a, *b)));
    }
}
