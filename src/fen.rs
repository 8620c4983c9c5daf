//! FEN placement validation and normalization.

use std::fmt;

use crate::error::{RenderError, Result};

/// One of the twelve piece identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Piece {
    WhiteKing,
    WhiteQueen,
    WhiteRook,
    WhiteBishop,
    WhiteKnight,
    WhitePawn,
    BlackKing,
    BlackQueen,
    BlackRook,
    BlackBishop,
    BlackKnight,
    BlackPawn,
}

impl Piece {
    pub const ALL: [Piece; 12] = [
        Piece::WhiteKing,
        Piece::WhiteQueen,
        Piece::WhiteRook,
        Piece::WhiteBishop,
        Piece::WhiteKnight,
        Piece::WhitePawn,
        Piece::BlackKing,
        Piece::BlackQueen,
        Piece::BlackRook,
        Piece::BlackBishop,
        Piece::BlackKnight,
        Piece::BlackPawn,
    ];

    /// FEN letter → piece (upper case is white).
    pub fn from_fen_char(c: char) -> Option<Piece> {
        Some(match c {
            'K' => Piece::WhiteKing,
            'Q' => Piece::WhiteQueen,
            'R' => Piece::WhiteRook,
            'B' => Piece::WhiteBishop,
            'N' => Piece::WhiteKnight,
            'P' => Piece::WhitePawn,
            'k' => Piece::BlackKing,
            'q' => Piece::BlackQueen,
            'r' => Piece::BlackRook,
            'b' => Piece::BlackBishop,
            'n' => Piece::BlackKnight,
            'p' => Piece::BlackPawn,
            _ => return None,
        })
    }

    /// Configuration code such as "WK" or "BN" (case-insensitive).
    pub fn from_code(code: &str) -> Option<Piece> {
        let code = code.to_uppercase();
        let mut chars = code.chars();
        let (color, kind) = (chars.next()?, chars.next()?);
        if chars.next().is_some() {
            return None;
        }
        let letter = match color {
            'W' => kind,
            'B' => kind.to_ascii_lowercase(),
            _ => return None,
        };
        Piece::from_fen_char(letter)
    }

    pub fn code(self) -> &'static str {
        match self {
            Piece::WhiteKing => "WK",
            Piece::WhiteQueen => "WQ",
            Piece::WhiteRook => "WR",
            Piece::WhiteBishop => "WB",
            Piece::WhiteKnight => "WN",
            Piece::WhitePawn => "WP",
            Piece::BlackKing => "BK",
            Piece::BlackQueen => "BQ",
            Piece::BlackRook => "BR",
            Piece::BlackBishop => "BB",
            Piece::BlackKnight => "BN",
            Piece::BlackPawn => "BP",
        }
    }

    pub fn is_white(self) -> bool {
        self.code().starts_with('W')
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Expanded placement: `rows[0]` is the 8th rank, `rows[r][0]` the a-file.
pub type BoardRows = [[Option<Piece>; 8]; 8];

const VALID_CHARS: &str = "pbnrqkPBNRQK12345678";

/// Check that `fen` has six fields and a well-formed 8×8 placement field.
pub fn validate_fen(fen: &str) -> Result<()> {
    let invalid = |reason: String| RenderError::InvalidFen {
        fen: fen.to_string(),
        reason,
    };

    let fields: Vec<&str> = fen.split(' ').collect();
    if fields.len() < 6 {
        return Err(invalid(format!("expected 6 fields, found {}", fields.len())));
    }

    let ranks: Vec<&str> = fields[0].split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid(format!("expected 8 ranks, found {}", ranks.len())));
    }

    for (i, rank) in ranks.iter().enumerate() {
        if let Some(c) = rank.chars().find(|c| !VALID_CHARS.contains(*c)) {
            return Err(invalid(format!("invalid character '{c}' in rank {}", 8 - i)));
        }
        let width = expanded_width(rank);
        if width != 8 {
            return Err(invalid(format!("rank {} has {width} columns", 8 - i)));
        }
    }

    Ok(())
}

fn expanded_width(rank: &str) -> usize {
    rank.chars()
        .map(|c| c.to_digit(10).map_or(1, |d| d as usize))
        .sum()
}

/// Expand the placement field into 8 fixed-width rows, top rank first.
///
/// Only call on input that passed [`validate_fen`].
pub fn normalize_fen(fen: &str) -> BoardRows {
    let mut rows: BoardRows = [[None; 8]; 8];
    let placement = fen.split(' ').next().unwrap_or_default();

    for (row, rank) in rows.iter_mut().zip(placement.split('/')) {
        let mut file = 0;
        for symbol in rank.chars() {
            match symbol.to_digit(10) {
                Some(skip) => file += skip as usize,
                None => {
                    if file < 8 {
                        row[file] = Piece::from_fen_char(symbol);
                    }
                    file += 1;
                }
            }
        }
    }

    rows
}
