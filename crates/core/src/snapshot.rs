use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::pieces::Piece;
use crate::types::{Cell, Color, Offset, EMPTY};

/// Row-major copy of the board
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Vec<Cell>>,
}

impl BoardSnapshot {
    /// Copy `board` into this snapshot, reusing row buffers
    pub fn fill_from(&mut self, board: &Board) {
        self.width = board.width();
        self.height = board.height();
        self.cells.resize_with(board.height(), Vec::new);
        for (dst, src) in self.cells.iter_mut().zip(board.rows()) {
            dst.clear();
            dst.extend_from_slice(src);
        }
    }

    /// 0/1 grid: 1 where a cell holds a block
    pub fn occupancy(&self) -> Vec<Vec<u8>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|&c| u8::from(c != EMPTY)).collect())
            .collect()
    }
}

impl From<&Board> for BoardSnapshot {
    fn from(board: &Board) -> Self {
        let mut s = Self::default();
        s.fill_from(board);
        s
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub color: Color,
    pub cells: Vec<Offset>,
    pub rotatable: bool,
}

impl PieceSnapshot {
    pub fn fill_from(&mut self, piece: &Piece) {
        self.color = piece.color();
        self.cells.clear();
        self.cells.extend_from_slice(piece.shape());
        self.rotatable = piece.is_rotatable();
    }
}

impl From<&Piece> for PieceSnapshot {
    fn from(piece: &Piece) -> Self {
        Self {
            color: piece.color(),
            cells: piece.shape().to_vec(),
            rotatable: piece.is_rotatable(),
        }
    }
}

impl Default for PieceSnapshot {
    fn default() -> Self {
        Self {
            color: Color::Yellow,
            cells: Vec::new(),
            rotatable: false,
        }
    }
}

/// Everything a renderer or feature extractor needs about one moment of play
///
/// `active` holds board coordinates; `next` holds template offsets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: BoardSnapshot,
    pub active: PieceSnapshot,
    pub next: PieceSnapshot,
    pub episode_id: u64,
    pub pieces_spawned: u64,
    pub lines_cleared_total: u64,
    pub bonus_total: i64,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}
