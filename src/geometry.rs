//! Board coordinate system — square ↔ pixel mapping.

use serde::{Deserialize, Serialize};

use crate::square::{invert, SquareRef};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate around `center`; positive degrees turn clockwise on screen (Y down).
    pub fn rotate_about(self, center: Point, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (dx, dy) = (self.x - center.x, self.y - center.y);
        Point {
            x: center.x + dx * cos - dy * sin,
            y: center.y + dx * sin + dy * cos,
        }
    }

    pub fn distance(self, other: Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

/// Axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Concentric sub-rectangle scaled by `factor` on both axes.
    /// `1.0` returns the rectangle itself, `0.0` its center point.
    pub fn shrink(&self, factor: f64) -> Rect {
        let wf = self.width * (1.0 - factor) / 2.0;
        let hf = self.height * (1.0 - factor) / 2.0;
        Rect {
            x: self.x + wf,
            y: self.y + hf,
            width: self.width - wf * 2.0,
            height: self.height - hf * 2.0,
        }
    }
}

/// Compass direction in degrees, clockwise from north (screen up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Direction of a board displacement; `None` for the zero vector.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        Some(match (dx.signum(), dy.signum()) {
            (0, 1) => Direction::North,
            (1, 1) => Direction::NorthEast,
            (1, 0) => Direction::East,
            (1, -1) => Direction::SouthEast,
            (0, -1) => Direction::South,
            (-1, -1) => Direction::SouthWest,
            (-1, 0) => Direction::West,
            (-1, 1) => Direction::NorthWest,
            _ => return None,
        })
    }

    pub fn degrees(self) -> f64 {
        match self {
            Direction::North => 0.0,
            Direction::NorthEast => 45.0,
            Direction::East => 90.0,
            Direction::SouthEast => 135.0,
            Direction::South => 180.0,
            Direction::SouthWest => 225.0,
            Direction::West => 270.0,
            Direction::NorthWest => 315.0,
        }
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast | Direction::SouthEast | Direction::SouthWest | Direction::NorthWest
        )
    }
}

/// Pixel layout of one board: where the playing field sits and how big a square is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardGeometry {
    /// Top-left corner of the canvas region the board is measured from.
    pub origin: Point,
    /// Offset between `origin` and the first square (the drawn border).
    pub border: f64,
    /// Edge length of one square.
    pub edge: f64,
    pub inverted: bool,
    canvas: (u32, u32),
}

impl BoardGeometry {
    /// A drawn board of `size` pixels surrounded by a `border` on every side.
    pub fn drawn(size: f64, border: f64, inverted: bool) -> Self {
        let total = (size + border * 2.0).round().max(1.0) as u32;
        Self {
            origin: Point::new(0.0, 0.0),
            border,
            edge: size / 8.0,
            inverted,
            canvas: (total, total),
        }
    }

    /// A board painted on a background image; `rect` locates the playing field.
    pub fn on_image(rect: Rect, image_size: (u32, u32), inverted: bool) -> Self {
        Self {
            origin: Point::new(rect.x, rect.y),
            border: 0.0,
            edge: rect.width / 8.0,
            inverted,
            canvas: image_size,
        }
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        self.canvas
    }

    /// Playing-field rectangle (without the border).
    pub fn board_box(&self) -> Rect {
        Rect::new(
            self.origin.x + self.border,
            self.origin.y + self.border,
            self.edge * 8.0,
            self.edge * 8.0,
        )
    }

    /// Rectangle of the square at board coordinates (file, rank); rank 0 is the bottom row.
    pub fn square_box(&self, file: i32, rank: i32) -> Rect {
        Rect::new(
            self.origin.x + self.border + file as f64 * self.edge,
            self.origin.y + self.border + invert(rank) as f64 * self.edge,
            self.edge,
            self.edge,
        )
    }

    pub fn parse(&self, token: &str) -> SquareRef {
        SquareRef::parse(token, self.inverted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn shrink_by_one_is_identity() {
        let r = Rect::new(10.0, 20.0, 40.0, 30.0);
        assert_eq!(r.shrink(1.0), r);
    }

    #[test]
    fn shrink_by_zero_collapses_to_center() {
        let r = Rect::new(10.0, 20.0, 40.0, 30.0);
        let s = r.shrink(0.0);
        assert_eq!(s, Rect::new(30.0, 35.0, 0.0, 0.0));
        assert_eq!(s.center(), r.center());
    }

    #[test]
    fn shrink_half_keeps_center() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(r.shrink(0.5), Rect::new(25.0, 25.0, 50.0, 50.0));
    }

    #[test]
    fn square_boxes_of_drawn_board() {
        let g = BoardGeometry::drawn(400.0, 20.0, false);
        assert_eq!(g.canvas_size(), (440, 440));
        assert_eq!(g.board_box(), Rect::new(20.0, 20.0, 400.0, 400.0));
        // a1 is bottom-left, h8 top-right
        assert_eq!(g.square_box(0, 0), Rect::new(20.0, 370.0, 50.0, 50.0));
        assert_eq!(g.square_box(7, 7), Rect::new(370.0, 20.0, 50.0, 50.0));
    }

    #[test]
    fn inversion_is_resolved_by_the_square() {
        let g = BoardGeometry::drawn(400.0, 0.0, true);
        let (x, y) = g.parse("a1").coords();
        assert_eq!(g.square_box(x, y), Rect::new(350.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn image_board_uses_rect_origin() {
        let g = BoardGeometry::on_image(Rect::new(30.0, 40.0, 320.0, 320.0), (400, 420), false);
        assert_eq!(g.canvas_size(), (400, 420));
        assert_eq!(g.square_box(0, 7), Rect::new(30.0, 40.0, 40.0, 40.0));
    }

    #[test]
    fn directions_from_deltas() {
        assert_eq!(Direction::from_delta(0, 3), Some(Direction::North));
        assert_eq!(Direction::from_delta(-2, -2), Some(Direction::SouthWest));
        assert_eq!(Direction::from_delta(5, 0), Some(Direction::East));
        assert_eq!(Direction::from_delta(0, 0), None);
        assert!(Direction::NorthWest.is_diagonal());
        assert!(!Direction::West.is_diagonal());
    }

    #[test]
    fn rotation_is_clockwise_on_screen() {
        let c = Point::new(0.0, 0.0);
        let up = Point::new(0.0, -1.0);
        let east = up.rotate_about(c, 90.0);
        assert!((east.x - 1.0).abs() < 1e-9 && east.y.abs() < 1e-9);
    }
}
