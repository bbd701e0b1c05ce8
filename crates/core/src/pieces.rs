//! Pieces module - piece templates and pivot rotation
//!
//! A piece is a color, a list of `(row, col)` cells and an optional pivot cell.
//! Rotation turns every cell 90° about the pivot; pieces without a pivot
//! (the 2x2 square) never rotate.
//!
//! Pieces are plain values: the catalog hands out copies, so moving the active
//! piece never touches a template or the next-piece preview.

use arrayvec::ArrayVec;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::types::{Color, Offset, MAX_PIECE_CELLS};

/// Cells of a piece, stored inline
pub type PieceShape = ArrayVec<Offset, MAX_PIECE_CELLS>;

/// A falling piece or a catalog template
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    color: Color,
    shape: PieceShape,
    /// Index into `shape` of the rotation center; `None` for non-rotatable pieces
    pivot: Option<usize>,
}

impl Piece {
    /// Build a piece, validating its shape and pivot
    pub fn new(color: Color, cells: &[Offset], pivot: Option<usize>) -> Result<Self> {
        if cells.is_empty() || cells.len() > MAX_PIECE_CELLS {
            return Err(EngineError::Configuration(format!(
                "piece shape must have 1..={} cells, got {}",
                MAX_PIECE_CELLS,
                cells.len()
            )));
        }
        if let Some(p) = pivot {
            if p >= cells.len() {
                return Err(EngineError::Configuration(format!(
                    "pivot index {} outside shape of {} cells",
                    p,
                    cells.len()
                )));
            }
        }
        check_shape(cells)?;

        Ok(Self {
            color,
            shape: cells.iter().copied().collect(),
            pivot,
        })
    }

    /// Infallible constructor for the built-in templates
    fn template(color: Color, cells: [Offset; 4], pivot: Option<usize>) -> Self {
        Self {
            color,
            shape: ArrayVec::from(cells),
            pivot,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn shape(&self) -> &[Offset] {
        &self.shape
    }

    pub fn pivot_index(&self) -> Option<usize> {
        self.pivot
    }

    /// The rotation center, if the piece rotates
    pub fn pivot_cell(&self) -> Option<Offset> {
        self.pivot.and_then(|i| self.shape.get(i).copied())
    }

    pub fn is_rotatable(&self) -> bool {
        self.pivot.is_some()
    }

    /// Shape shifted by (d_row, d_col)
    pub fn translated(&self, d_row: i32, d_col: i32) -> PieceShape {
        self.shape
            .iter()
            .map(|&(r, c)| (r + d_row, c + d_col))
            .collect()
    }

    /// Shape turned 90° about the pivot; `None` for non-rotatable pieces
    pub fn rotated(&self) -> Option<PieceShape> {
        let (pr, pc) = self.pivot_cell()?;
        Some(
            self.shape
                .iter()
                .map(|&(r, c)| ((c - pc) + pr, -(r - pr) + pc))
                .collect(),
        )
    }

    /// Replace the whole shape at once
    pub(crate) fn set_shape(&mut self, shape: PieceShape) {
        self.shape = shape;
    }

    /// Copy of this template moved to the spawn position of a board
    ///
    /// Every cell moves up one row and right to column `width / 2 - 1`.
    pub fn at_spawn(&self, board_width: usize) -> Self {
        let (d_row, d_col) = spawn_offset(board_width);
        Self {
            color: self.color,
            shape: self.translated(d_row, d_col),
            pivot: self.pivot,
        }
    }

    /// Column span `(min, max)` of the shape
    pub fn column_span(&self) -> (i32, i32) {
        let min = self.shape.iter().map(|&(_, c)| c).min().unwrap_or(0);
        let max = self.shape.iter().map(|&(_, c)| c).max().unwrap_or(0);
        (min, max)
    }
}

/// Offset applied to a template when it spawns
pub fn spawn_offset(board_width: usize) -> Offset {
    let center = (board_width / 2) as i32 - 1;
    (-1, center)
}

/// Reject shapes the leading-edge collision check cannot handle.
///
/// Cells must be distinct and 4-connected, and the cells of every row and of
/// every column must form one unbroken run. Rotation preserves all three.
fn check_shape(cells: &[Offset]) -> Result<()> {
    let invalid = |reason: &str| {
        Err(EngineError::Configuration(format!(
            "piece shape {:?} {}",
            cells, reason
        )))
    };

    for (i, cell) in cells.iter().enumerate() {
        if cells[..i].contains(cell) {
            return invalid("has duplicate cells");
        }
    }

    for &(r, c) in cells {
        let row_run = |col: i32| cells.contains(&(r, col));
        let col_run = |row: i32| cells.contains(&(row, c));
        let (min_c, max_c) = span(cells.iter().filter(|&&(r2, _)| r2 == r).map(|&(_, c2)| c2));
        let (min_r, max_r) = span(cells.iter().filter(|&&(_, c2)| c2 == c).map(|&(r2, _)| r2));
        if !(min_c..=max_c).all(row_run) || !(min_r..=max_r).all(col_run) {
            return invalid("has a gap in a row or column");
        }
    }

    // Flood fill from the first cell.
    let mut reached: ArrayVec<Offset, MAX_PIECE_CELLS> = ArrayVec::new();
    reached.push(cells[0]);
    let mut i = 0;
    while i < reached.len() {
        let (r, c) = reached[i];
        for neighbor in [(r - 1, c), (r + 1, c), (r, c - 1), (r, c + 1)] {
            if cells.contains(&neighbor) && !reached.contains(&neighbor) {
                reached.push(neighbor);
            }
        }
        i += 1;
    }
    if reached.len() != cells.len() {
        return invalid("is not connected");
    }
    Ok(())
}

fn span(values: impl Iterator<Item = i32>) -> (i32, i32) {
    values.fold((i32::MAX, i32::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Built-in catalog selections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogPreset {
    /// Only the 2x2 square
    #[default]
    SquareOnly,
    /// All seven classic tetrominoes
    Classic,
}

impl CatalogPreset {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "square" | "square_only" | "square-only" => Some(CatalogPreset::SquareOnly),
            "classic" => Some(CatalogPreset::Classic),
            _ => None,
        }
    }

    pub fn catalog(&self) -> PieceCatalog {
        match self {
            CatalogPreset::SquareOnly => PieceCatalog::square_only(),
            CatalogPreset::Classic => PieceCatalog::classic(),
        }
    }
}

/// Immutable set of piece templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceCatalog {
    templates: Vec<Piece>,
}

impl PieceCatalog {
    /// Build a catalog from custom templates
    pub fn new(templates: Vec<Piece>) -> Result<Self> {
        if templates.is_empty() {
            return Err(EngineError::Configuration(
                "piece catalog must contain at least one template".to_string(),
            ));
        }
        for piece in &templates {
            // Re-validate: templates may come from deserialized config.
            Piece::new(piece.color, &piece.shape, piece.pivot)?;
        }
        Ok(Self { templates })
    }

    /// The 2x2 square alone
    pub fn square_only() -> Self {
        Self {
            templates: vec![square()],
        }
    }

    /// The seven classic tetrominoes
    pub fn classic() -> Self {
        Self {
            templates: vec![
                // T
                Piece::template(Color::Purple, [(0, 1), (1, 0), (1, 1), (1, 2)], Some(2)),
                // L
                Piece::template(Color::Orange, [(0, 2), (1, 0), (1, 1), (1, 2)], Some(2)),
                // S
                Piece::template(Color::Green, [(0, 1), (0, 2), (1, 0), (1, 1)], Some(3)),
                // J
                Piece::template(Color::Blue, [(0, 0), (1, 0), (1, 1), (1, 2)], Some(2)),
                // Z
                Piece::template(Color::Red, [(0, 0), (0, 1), (1, 1), (1, 2)], Some(2)),
                square(),
                // I
                Piece::template(Color::Cyan, [(0, 0), (0, 1), (0, 2), (0, 3)], Some(2)),
            ],
        }
    }

    pub fn templates(&self) -> &[Piece] {
        &self.templates
    }

    /// Draw a template uniformly at random and return an independent copy
    pub fn spawn<R: Rng + ?Sized>(&self, rng: &mut R) -> Piece {
        let idx = rng.gen_range(0..self.templates.len());
        self.templates[idx].clone()
    }

    /// Check every template fits the board at its spawn position
    pub fn validate_for(&self, board_width: usize, board_height: usize) -> Result<()> {
        for piece in &self.templates {
            let spawned = piece.at_spawn(board_width);
            let (min_col, max_col) = spawned.column_span();
            if min_col < 0 || max_col >= board_width as i32 {
                return Err(EngineError::Configuration(format!(
                    "{:?} piece does not fit a board {} columns wide",
                    piece.color, board_width
                )));
            }
            if spawned.shape.iter().any(|&(r, _)| r >= board_height as i32) {
                return Err(EngineError::Configuration(format!(
                    "{:?} piece does not fit a board {} rows tall",
                    piece.color, board_height
                )));
            }
        }
        Ok(())
    }
}

impl Default for PieceCatalog {
    fn default() -> Self {
        Self::square_only()
    }
}

fn square() -> Piece {
    Piece::template(Color::Yellow, [(0, 0), (0, 1), (1, 0), (1, 1)], None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_square_is_not_rotatable() {
        let square = square();
        assert!(!square.is_rotatable());
        assert_eq!(square.rotated(), None);
    }

    #[test]
    fn test_rotation_keeps_pivot_fixed() {
        for piece in PieceCatalog::classic().templates() {
            let Some(pivot) = piece.pivot_cell() else {
                continue;
            };
            let rotated = piece.rotated().unwrap();
            assert_eq!(rotated[piece.pivot_index().unwrap()], pivot);
        }
    }

    #[test]
    fn test_four_rotations_restore_shape() {
        let mut piece = PieceCatalog::classic().templates()[0].clone();
        let original = piece.shape().to_vec();
        for _ in 0..4 {
            let next = piece.rotated().unwrap();
            piece.set_shape(next);
        }
        assert_eq!(piece.shape(), original.as_slice());
    }

    #[test]
    fn test_spawn_returns_independent_copy() {
        let catalog = PieceCatalog::square_only();
        let mut rng = SmallRng::seed_from_u64(7);
        let mut piece = catalog.spawn(&mut rng);
        let moved = piece.translated(5, 5);
        piece.set_shape(moved);

        assert_eq!(catalog.templates()[0].shape(), &[(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_new_rejects_bad_templates() {
        assert!(Piece::new(Color::Red, &[], None).is_err());
        assert!(Piece::new(Color::Red, &[(0, 0); 5], None).is_err());
        assert!(Piece::new(Color::Red, &[(0, 0), (0, 1)], Some(2)).is_err());
        assert!(PieceCatalog::new(Vec::new()).is_err());
    }

    #[test]
    fn test_new_rejects_gapped_and_duplicate_shapes() {
        // Gap inside a row
        assert!(Piece::new(Color::Cyan, &[(0, 0), (0, 2)], None).is_err());
        // Gap inside a column
        assert!(Piece::new(Color::Cyan, &[(0, 0), (2, 0)], None).is_err());
        // Diagonal neighbours only
        assert!(Piece::new(Color::Cyan, &[(0, 0), (1, 1)], None).is_err());
        assert!(Piece::new(Color::Cyan, &[(0, 0), (0, 1), (0, 1)], None).is_err());
        // U shape: row 0 is broken
        assert!(Piece::new(Color::Red, &[(0, 0), (1, 0), (1, 1), (0, 2)], None).is_err());

        assert!(Piece::new(Color::Blue, &[(3, 3)], None).is_ok());
        assert!(Piece::new(Color::Blue, &[(0, 0), (0, 1), (1, 1)], Some(1)).is_ok());
    }

    #[test]
    fn test_classic_templates_pass_shape_checks() {
        for piece in PieceCatalog::classic().templates() {
            assert!(Piece::new(piece.color(), piece.shape(), piece.pivot_index()).is_ok());
            if let Some(rotated) = piece.rotated() {
                assert!(Piece::new(piece.color(), &rotated, piece.pivot_index()).is_ok());
            }
        }
    }

    #[test]
    fn test_catalog_rejects_gapped_custom_template() {
        let gapped = Piece {
            color: Color::Cyan,
            shape: [(0, 0), (0, 2)].into_iter().collect(),
            pivot: None,
        };
        assert!(matches!(
            PieceCatalog::new(vec![gapped]),
            Err(EngineError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_for_narrow_board() {
        assert!(PieceCatalog::classic().validate_for(10, 20).is_ok());
        // I piece spans four columns from column width/2 - 1.
        assert!(PieceCatalog::classic().validate_for(4, 20).is_err());
        assert!(PieceCatalog::square_only().validate_for(2, 2).is_ok());
    }
}
