//! Algebraic square notation — "e4", castling tokens and the empty square.

use std::fmt;

use crate::error::{RenderError, Result};

/// A board square as written, with the inversion in effect when it was parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Square {
    file: u8,
    rank: u8,
    inverted: bool,
}

impl Square {
    /// Board coordinates: (file, rank), or (7-file, 7-rank) on an inverted board.
    pub fn coords(&self) -> (i32, i32) {
        let (file, rank) = (self.file as i32, self.rank as i32);
        if self.inverted {
            (invert(file), invert(rank))
        } else {
            (file, rank)
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, (b'1' + self.rank) as char)
    }
}

/// The parsed form of a square token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareRef {
    Empty,
    KingsideCastle,
    QueensideCastle,
    Normal(Square),
    Illegal { token: String, reason: String },
}

impl SquareRef {
    /// Parse a square token. Never fails; bad input becomes [`SquareRef::Illegal`].
    pub fn parse(s: &str, inverted: bool) -> SquareRef {
        let s = s.to_lowercase();

        match s.as_str() {
            "" => return SquareRef::Empty,
            "0-0" | "o-o" => return SquareRef::KingsideCastle,
            "0-0-0" | "o-o-o" => return SquareRef::QueensideCastle,
            _ => {}
        }

        let chars: Vec<char> = s.chars().collect();
        let (file, rank) = match chars.as_slice() {
            &[file, rank] => (file, rank),
            _ => {
                return SquareRef::Illegal {
                    token: s,
                    reason: "invalid length of square".to_string(),
                }
            }
        };
        let bad = if !('a'..='h').contains(&file) {
            Some(file)
        } else if !('1'..='8').contains(&rank) {
            Some(rank)
        } else {
            None
        };

        match bad {
            Some(c) => SquareRef::Illegal {
                token: s,
                reason: format!("invalid character in square : {c}"),
            },
            None => SquareRef::Normal(Square {
                file: file as u8 - b'a',
                rank: rank as u8 - b'1',
                inverted,
            }),
        }
    }

    /// Parse a token that must name a real square (highlights, annotations).
    pub fn parse_square(s: &str, inverted: bool) -> Result<Square> {
        match SquareRef::parse(s, inverted) {
            SquareRef::Normal(square) => Ok(square),
            SquareRef::Illegal { token, reason } => Err(RenderError::InvalidSquare { token, reason }),
            _ => Err(RenderError::InvalidSquare {
                token: s.to_string(),
                reason: "expected a square like \"e4\"".to_string(),
            }),
        }
    }

    /// Board coordinates of a [`SquareRef::Normal`] value.
    ///
    /// # Panics
    /// Panics for every other variant; callers must match on the status first.
    pub fn coords(&self) -> (i32, i32) {
        match self {
            SquareRef::Normal(square) => square.coords(),
            other => panic!("coords() called on a non-square token: {other:?}"),
        }
    }

    /// Turn an illegal token into an error, pass everything else through.
    pub fn check(self) -> Result<SquareRef> {
        match self {
            SquareRef::Illegal { token, reason } => Err(RenderError::InvalidSquare { token, reason }),
            other => Ok(other),
        }
    }
}

pub(crate) fn invert(x: i32) -> i32 {
    7 - x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_square_maps_to_its_coordinates() {
        for file in b'a'..=b'h' {
            for rank in b'1'..=b'8' {
                let token = format!("{}{}", file as char, rank as char);
                let (x, y) = ((file - b'a') as i32, (rank - b'1') as i32);
                assert_eq!(SquareRef::parse(&token, false).coords(), (x, y));
                assert_eq!(SquareRef::parse(&token, true).coords(), (7 - x, 7 - y));
            }
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(SquareRef::parse("E4", false).coords(), (4, 3));
        assert_eq!(SquareRef::parse("O-O", false), SquareRef::KingsideCastle);
        assert_eq!(SquareRef::parse("O-O-O", false), SquareRef::QueensideCastle);
    }

    #[test]
    fn fixed_tokens() {
        assert_eq!(SquareRef::parse("", false), SquareRef::Empty);
        assert_eq!(SquareRef::parse("0-0", false), SquareRef::KingsideCastle);
        assert_eq!(SquareRef::parse("o-o", true), SquareRef::KingsideCastle);
        assert_eq!(SquareRef::parse("0-0-0", false), SquareRef::QueensideCastle);
        assert_eq!(SquareRef::parse("o-o-o", false), SquareRef::QueensideCastle);
    }

    #[test]
    fn illegal_tokens_name_the_problem() {
        let cases = [
            ("e44", "invalid length of square"),
            ("i4", "invalid character in square : i"),
            ("a9", "invalid character in square : 9"),
            ("a0", "invalid character in square : 0"),
            ("é4", "invalid character in square : é"),
            ("eé", "invalid character in square : é"),
            ("é", "invalid length of square"),
        ];
        for (token, expected) in cases {
            match SquareRef::parse(token, false) {
                SquareRef::Illegal { token: t, reason } => {
                    assert_eq!(t, token);
                    assert_eq!(reason, expected);
                }
                other => panic!("{token} parsed as {other:?}"),
            }
        }
    }

    #[test]
    fn parse_square_rejects_non_squares() {
        assert!(SquareRef::parse_square("", false).is_err());
        assert!(SquareRef::parse_square("0-0", false).is_err());
        assert!(matches!(
            SquareRef::parse_square("z9", false),
            Err(RenderError::InvalidSquare { .. })
        ));
        assert_eq!(SquareRef::parse_square("h8", false).unwrap().to_string(), "h8");
    }

    #[test]
    #[should_panic(expected = "non-square token")]
    fn coords_on_castling_token_panics() {
        SquareRef::parse("0-0", false).coords();
    }
}
