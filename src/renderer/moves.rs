//! Move indicators — dotted paths, arrows and the castling pair.
//!
//! Geometry is computed as a list of [`Indicator`]s first and only then
//! painted, so every path can be checked without a surface.

use tracing::warn;

use super::arrows::{knight_arrow, knight_direction, straight_arrow, straight_reach};
use super::constants::{CASTLING_KING_SQUARES, CASTLING_LONG_ROOK_SQUARES, CASTLING_SHORT_ROOK_SQUARES};
use super::surface::Surface;
use crate::error::Result;
use crate::geometry::{BoardGeometry, Direction, Point, Rect};
use crate::model::{resolve, Color, Move, MoveKind, MoveStyle};
use crate::square::SquareRef;

/// One drawn mark of a move indicator.
#[derive(Debug, Clone, PartialEq)]
pub enum Indicator {
    Dot { center: Point, radius: f64, color: Color },
    Polygon { points: Vec<Point>, color: Color },
}

impl Indicator {
    fn draw(&self, surface: &mut dyn Surface) {
        match self {
            Indicator::Dot { center, radius, color } => surface.fill_circle(*center, *radius, *color),
            Indicator::Polygon { points, color } => surface.fill_polygon(points, *color),
        }
    }

    fn shifted(self, dy: f64) -> Indicator {
        match self {
            Indicator::Dot { center, radius, color } => Indicator::Dot {
                center: Point::new(center.x, center.y + dy),
                radius,
                color,
            },
            Indicator::Polygon { points, color } => Indicator::Polygon {
                points: points.into_iter().map(|p| Point::new(p.x, p.y + dy)).collect(),
                color,
            },
        }
    }
}

/// Whose back rank a castling token refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wing {
    King,
    Queen,
}

pub(super) fn render_moves(
    surface: &mut dyn Surface,
    geometry: &BoardGeometry,
    moves: &[Move],
    default_style: &MoveStyle,
) -> Result<()> {
    for mv in moves {
        let style = resolve(mv.style.as_ref(), default_style);
        for indicator in move_indicators(geometry, mv, style)? {
            indicator.draw(surface);
        }
    }
    Ok(())
}

/// Indicators for one move, in drawing order.
pub fn move_indicators(geometry: &BoardGeometry, mv: &Move, style: &MoveStyle) -> Result<Vec<Indicator>> {
    let from = geometry.parse(&mv.from).check()?;
    let to = geometry.parse(&mv.to).check()?;

    let indicators = match (&from, &to) {
        (SquareRef::Normal(a), SquareRef::Normal(b)) => normal_move(geometry, a.coords(), b.coords(), style),
        (SquareRef::KingsideCastle, SquareRef::Empty) => castling(geometry, Side::White, Wing::King, style),
        (SquareRef::QueensideCastle, SquareRef::Empty) => castling(geometry, Side::White, Wing::Queen, style),
        (SquareRef::Empty, SquareRef::KingsideCastle) => castling(geometry, Side::Black, Wing::King, style),
        (SquareRef::Empty, SquareRef::QueensideCastle) => castling(geometry, Side::Black, Wing::Queen, style),
        _ => Vec::new(),
    };
    Ok(indicators)
}

// ═══════════════════════════════════════════════════════════════════════
// Normal moves
// ═══════════════════════════════════════════════════════════════════════

fn normal_move(geometry: &BoardGeometry, from: (i32, i32), to: (i32, i32), style: &MoveStyle) -> Vec<Indicator> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let Some(dir) = Direction::from_delta(dx, dy) else {
        return Vec::new();
    };
    let straight = dx == 0 || dy == 0 || dx.abs() == dy.abs();

    match style.kind {
        MoveKind::Dotted => dotted_path(from, dx, dy, straight)
            .into_iter()
            .map(|sq| dot(geometry, sq, style, style.color))
            .collect(),
        MoveKind::Arrow if straight => vec![straight_move_arrow(geometry, from, dx, dy, dir, style)],
        MoveKind::Arrow => match knight_direction(dx, dy) {
            Some((dir, hand)) => {
                let width = indicator_width(geometry, style);
                let origin = center(geometry, from);
                vec![Indicator::Polygon {
                    points: knight_arrow(origin, geometry.edge, width, dir, hand),
                    color: style.color,
                }]
            }
            None => {
                warn!(dx, dy, "no arrow shape for this displacement, nothing drawn");
                Vec::new()
            }
        },
    }
}

/// Squares a dotted move passes through, origin excluded, destination included.
///
/// Non-straight moves walk as an L: vertical first when the horizontal leg
/// is the longer one, horizontal first otherwise.
fn dotted_path(from: (i32, i32), dx: i32, dy: i32, straight: bool) -> Vec<(i32, i32)> {
    let mut path = Vec::new();
    let mut at = from;
    let mut walk = |step: (i32, i32), count: i32| {
        for _ in 0..count {
            at = (at.0 + step.0, at.1 + step.1);
            path.push(at);
        }
    };

    if straight {
        walk((dx.signum(), dy.signum()), dx.abs().max(dy.abs()));
    } else if dx.abs() > dy.abs() {
        walk((0, dy.signum()), dy.abs());
        walk((dx.signum(), 0), dx.abs());
    } else {
        walk((dx.signum(), 0), dx.abs());
        walk((0, dy.signum()), dy.abs());
    }
    path
}

fn straight_move_arrow(
    geometry: &BoardGeometry,
    from: (i32, i32),
    dx: i32,
    dy: i32,
    dir: Direction,
    style: &MoveStyle,
) -> Indicator {
    let steps = dx.abs().max(dy.abs());
    let next_to_last = (from.0 + dx.signum() * (steps - 1), from.1 + dy.signum() * (steps - 1));
    let origin = center(geometry, from);
    let width = indicator_width(geometry, style);
    let reach = straight_reach(origin.distance(center(geometry, next_to_last)), geometry.edge, dir);

    Indicator::Polygon {
        points: straight_arrow(origin, reach - width, width, dir),
        color: style.color,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Castling
// ═══════════════════════════════════════════════════════════════════════

/// King indicator above the back rank in `color`, rook indicator below in `color2`.
fn castling(geometry: &BoardGeometry, side: Side, wing: Wing, style: &MoveStyle) -> Vec<Indicator> {
    let (king, rook) = match (side, wing) {
        (Side::White, Wing::King) => ("e1", "h1"),
        (Side::White, Wing::Queen) => ("e1", "a1"),
        (Side::Black, Wing::King) => ("e8", "h8"),
        (Side::Black, Wing::Queen) => ("e8", "a8"),
    };
    let king = geometry.parse(king).coords();
    let rook = geometry.parse(rook).coords();
    // inversion is already in the coordinates, so is the direction
    let toward_rook = (rook.0 - king.0).signum();

    let width = indicator_width(geometry, style);
    let mut indicators = Vec::new();
    match style.kind {
        MoveKind::Dotted => {
            let offset = width / 2.0 + style.padding;
            let rook_dots = match wing {
                Wing::King => 2,
                Wing::Queen => 3,
            };
            for sq in dotted_path(king, toward_rook * 2, 0, true) {
                indicators.push(dot(geometry, sq, style, style.color).shifted(-offset));
            }
            for sq in dotted_path(rook, -toward_rook * rook_dots, 0, true) {
                indicators.push(dot(geometry, sq, style, style.color2).shifted(offset));
            }
        }
        MoveKind::Arrow => {
            // the head is twice the shaft width
            let offset = width + style.padding;
            let rook_squares = match wing {
                Wing::King => CASTLING_SHORT_ROOK_SQUARES,
                Wing::Queen => CASTLING_LONG_ROOK_SQUARES,
            };
            let (Some(king_dir), Some(rook_dir)) = (
                Direction::from_delta(toward_rook, 0),
                Direction::from_delta(-toward_rook, 0),
            ) else {
                return indicators;
            };

            let king_arrow = Indicator::Polygon {
                points: straight_arrow(center(geometry, king), CASTLING_KING_SQUARES * geometry.edge, width, king_dir),
                color: style.color,
            };
            let rook_arrow = Indicator::Polygon {
                points: straight_arrow(center(geometry, rook), rook_squares * geometry.edge, width, rook_dir),
                color: style.color2,
            };
            indicators.push(king_arrow.shifted(-offset));
            indicators.push(rook_arrow.shifted(offset));
        }
    }
    indicators
}

// ═══════════════════════════════════════════════════════════════════════
// Shared pieces
// ═══════════════════════════════════════════════════════════════════════

fn center(geometry: &BoardGeometry, (x, y): (i32, i32)) -> Point {
    geometry.square_box(x, y).center()
}

/// Dot diameter and arrow shaft width.
fn indicator_width(geometry: &BoardGeometry, style: &MoveStyle) -> f64 {
    Rect::new(0.0, 0.0, geometry.edge, geometry.edge).shrink(style.factor).width
}

fn dot(geometry: &BoardGeometry, (x, y): (i32, i32), style: &MoveStyle, color: Color) -> Indicator {
    let bb = geometry.square_box(x, y).shrink(style.factor);
    Indicator::Dot {
        center: bb.center(),
        radius: bb.width / 2.0,
        color,
    }
}
