//! Engine module - the game manager
//!
//! Owns the board, the falling piece and the next-piece preview, and is the
//! only thing that mutates them. Movement checks only the leading edge of the
//! piece in the direction of travel; rotation validates every rotated cell
//! before committing anything.
//!
//! A freshly spawned piece straddles rows -1 and 0 and is not drawn on the
//! board until its first successful move, so a game-over check right after a
//! landing only sees landed blocks.

use log::{debug, error, info};
use rand::Rng;

use crate::board::Board;
use crate::config::{self, EngineConfig};
use crate::error::Result;
use crate::pieces::{Piece, PieceCatalog, PieceShape};
use crate::rng::{self, PieceRng, PieceSource};
use crate::scoring::{heuristic_score, line_clear_bonus};
use crate::snapshot::GameSnapshot;
use crate::types::{Action, Offset, EMPTY};

/// Direction of a one-cell translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    fn delta(self) -> Offset {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
        }
    }

    /// Whether `cell` is the extremal cell of its row (or column, for Down)
    /// in this direction among `shape`.
    fn leads(self, cell: Offset, shape: &[Offset]) -> bool {
        let (r, c) = cell;
        match self {
            Direction::Left => shape.iter().all(|&(r2, c2)| r2 != r || c2 >= c),
            Direction::Right => shape.iter().all(|&(r2, c2)| r2 != r || c2 <= c),
            Direction::Down => shape.iter().all(|&(r2, c2)| c2 != c || r2 <= r),
        }
    }
}

/// Cells that can collide when the shape moves one step in `direction`:
/// the leftmost (rightmost) cell of each row, or the bottom cell of each column.
fn leading_edge(shape: &[Offset], direction: Direction) -> PieceShape {
    let mut edge = PieceShape::new();
    for &cell in shape {
        if direction.leads(cell, shape) && !edge.contains(&cell) {
            edge.push(cell);
        }
    }
    edge
}

/// Result of one `step`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Board after the action
    pub board: Board,
    /// Whether the action changed the piece position or shape
    pub moved: bool,
    /// Whether a `Down` action landed the piece
    pub landed: bool,
    /// Rows removed by the landing
    pub lines_cleared: usize,
    /// `lines_cleared * 100` on a landing step, otherwise 0
    pub lines_cleared_bonus: i64,
    /// Row 0 holds a landed block (only evaluated on landing)
    pub game_over: bool,
    /// The caller asked to terminate
    pub exit_requested: bool,
}

/// Falling-block game engine
#[derive(Debug, Clone)]
pub struct Engine<R = PieceRng> {
    board: Board,
    active: Piece,
    next: Piece,
    source: PieceSource<R>,
    /// Whether the active piece's footprint is currently drawn on the board
    stamped: bool,
    /// Incremented on every reset
    episode_id: u64,
    pieces_spawned: u64,
    lines_cleared_total: u64,
    bonus_total: i64,
}

impl Engine<PieceRng> {
    /// Engine with a deterministic piece sequence
    pub fn new(width: usize, height: usize, catalog: PieceCatalog, seed: u64) -> Result<Self> {
        Self::with_rng(width, height, catalog, rng::seeded(seed))
    }

    /// Engine built from configuration
    ///
    /// Uses a seeded random source when `config.seed` is set, entropy otherwise.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => rng::seeded(seed),
            None => rng::from_entropy(),
        };
        Self::with_rng(
            config.board_width,
            config.board_height,
            config.piece_catalog()?,
            rng,
        )
    }
}

impl<R: Rng> Engine<R> {
    /// Engine drawing pieces with an injected random source
    pub fn with_rng(width: usize, height: usize, catalog: PieceCatalog, rng: R) -> Result<Self> {
        config::check_board_size(width, height)?;
        catalog.validate_for(width, height)?;

        let mut source = PieceSource::new(catalog, rng);
        let next = source.draw();
        let active = next.at_spawn(width);

        let mut engine = Self {
            board: Board::new(width, height),
            active,
            next,
            source,
            stamped: false,
            episode_id: 0,
            pieces_spawned: 0,
            lines_cleared_total: 0,
            bonus_total: 0,
        };
        engine.reset();
        Ok(engine)
    }

    /// Start a new episode: empty board, fresh active and next pieces
    pub fn reset(&mut self) {
        self.board = Board::new(self.board.width(), self.board.height());
        self.next = self.source.draw();
        self.stamped = false;
        self.pieces_spawned = 0;
        self.lines_cleared_total = 0;
        self.bonus_total = 0;
        self.spawn_next();
        self.episode_id = self.episode_id.wrapping_add(1);

        info!(
            "episode {} started on a {}x{} board",
            self.episode_id,
            self.board.width(),
            self.board.height()
        );
    }

    /// Promote the preview piece to the active piece and draw a new preview
    fn spawn_next(&mut self) {
        let template = std::mem::replace(&mut self.next, self.source.draw());
        self.active = template.at_spawn(self.board.width());
        self.stamped = false;
        self.pieces_spawned += 1;
        debug!(
            "spawned {:?} piece, next is {:?}",
            self.active.color(),
            self.next.color()
        );
    }

    /// Draw the active piece onto the board
    fn stamp(&mut self) {
        let color = self.active.color().cell();
        for &(r, c) in self.active.shape() {
            if r < 0 {
                continue;
            }
            if !self.board.put(r, c, color) {
                error!(
                    "active piece cell ({}, {}) is outside the {}x{} board",
                    r,
                    c,
                    self.board.width(),
                    self.board.height()
                );
            }
        }
        self.stamped = true;
    }

    /// Erase the active piece's footprint, if drawn
    fn lift(&mut self) {
        if !self.stamped {
            return;
        }
        for &(r, c) in self.active.shape() {
            if r >= 0 {
                self.board.put(r, c, EMPTY);
            }
        }
        self.stamped = false;
    }

    /// Replace the active shape and redraw it in one go
    fn commit_shape(&mut self, shape: PieceShape) {
        self.lift();
        self.active.set_shape(shape);
        self.stamp();
    }

    /// Cell is filled by something other than the active piece
    fn is_foreign_block(&self, row: i32, col: i32) -> bool {
        self.board.is_occupied(row, col)
            && !(self.stamped && self.active.shape().contains(&(row, col)))
    }

    /// Any visible cell of the (lifted) active piece is on a block
    fn active_collides(&self) -> bool {
        self.active
            .shape()
            .iter()
            .any(|&(r, c)| r >= 0 && self.board.is_occupied(r, c))
    }

    /// Whether the piece can move one cell in `direction`
    fn can_shift(&self, direction: Direction) -> bool {
        let (dr, dc) = direction.delta();
        let width = self.board.width() as i32;
        let height = self.board.height() as i32;

        leading_edge(self.active.shape(), direction)
            .iter()
            .all(|&(r, c)| {
                let (nr, nc) = (r + dr, c + dc);
                if nc < 0 || nc >= width || nr >= height {
                    return false;
                }
                // Cells above the board never collide.
                nr < 0 || !self.board.is_occupied(nr, nc)
            })
    }

    fn shift(&mut self, direction: Direction) -> bool {
        if !self.can_shift(direction) {
            return false;
        }
        let (dr, dc) = direction.delta();
        let shape = self.active.translated(dr, dc);
        self.commit_shape(shape);
        true
    }

    /// Move the active piece one column left; `false` if blocked
    pub fn move_left(&mut self) -> bool {
        self.shift(Direction::Left)
    }

    /// Move the active piece one column right; `false` if blocked
    pub fn move_right(&mut self) -> bool {
        self.shift(Direction::Right)
    }

    /// Move the active piece one row down
    ///
    /// Returns `true` when the piece could not move and has landed. The landed
    /// footprint stays on the board and the preview piece takes over.
    pub fn move_down(&mut self) -> bool {
        if self.shift(Direction::Down) {
            return false;
        }

        if !self.stamped {
            self.stamp();
        }
        debug!(
            "{:?} piece landed at {:?}",
            self.active.color(),
            self.active.shape()
        );
        self.spawn_next();
        true
    }

    /// Rotate the active piece 90° about its pivot
    ///
    /// All-or-nothing: if any rotated cell leaves the board sideways, drops
    /// below it, or hits a landed block, the shape is left untouched.
    pub fn rotate(&mut self) -> bool {
        let Some(rotated) = self.active.rotated() else {
            return false;
        };

        let width = self.board.width() as i32;
        let height = self.board.height() as i32;
        let valid = rotated.iter().all(|&(r, c)| {
            c >= 0 && c < width && r < height && (r < 0 || !self.is_foreign_block(r, c))
        });
        if !valid {
            return false;
        }

        self.commit_shape(rotated);
        true
    }

    /// Remove filled rows and return how many were removed
    ///
    /// Only landed blocks take part: a falling piece is lifted off the board
    /// for the scan and redrawn afterwards. If the shifted rows would land a
    /// block inside the falling piece, nothing is cleared and 0 is returned;
    /// the rows are cleared on a later call.
    pub fn clear_filled_lines(&mut self) -> usize {
        let was_stamped = self.stamped;
        self.lift();
        let before = was_stamped.then(|| self.board.clone());
        let mut cleared = self.board.clear_full_rows();

        if let Some(before) = before {
            if cleared > 0 && self.active_collides() {
                debug!(
                    "deferring {} line(s): falling piece would overlap shifted blocks",
                    cleared
                );
                self.board = before;
                cleared = 0;
            }
            self.stamp();
        }

        if cleared > 0 {
            self.lines_cleared_total += cleared as u64;
            debug!("cleared {} line(s)", cleared);
        }
        cleared
    }

    /// Empty cells buried in the landed stack
    ///
    /// Scans bottom to top and stops at the first empty row.
    pub fn gaps_in_lines(&self) -> usize {
        if !self.stamped {
            return self.board.count_gaps();
        }
        let mut landed = self.board.clone();
        for &(r, c) in self.active.shape() {
            landed.put(r, c, EMPTY);
        }
        landed.count_gaps()
    }

    /// Clear filled lines, then score the result
    ///
    /// Consumes the filled lines it rewards: calling this twice in a row
    /// scores the second call without those lines.
    pub fn clear_and_score(&mut self) -> i64 {
        let lines = self.clear_filled_lines();
        heuristic_score(lines, self.gaps_in_lines())
    }

    /// True iff row 0 holds any block
    pub fn is_game_over(&self) -> bool {
        self.board
            .row_slice(0)
            .map(|row| row.iter().any(|&c| c != EMPTY))
            .unwrap_or(false)
    }

    /// Apply one controller action
    pub fn step(&mut self, action: Action) -> StepOutcome {
        let mut moved = false;
        let mut landed = false;
        let mut lines_cleared = 0;
        let mut lines_cleared_bonus = 0;
        let mut game_over = false;

        match action {
            Action::Left => moved = self.move_left(),
            Action::Right => moved = self.move_right(),
            Action::Up => moved = self.rotate(),
            Action::Down => {
                if self.move_down() {
                    landed = true;
                    lines_cleared = self.clear_filled_lines();
                    lines_cleared_bonus = line_clear_bonus(lines_cleared);
                    self.bonus_total += lines_cleared_bonus;

                    game_over = self.is_game_over();
                    if game_over {
                        info!(
                            "episode {} over after {} pieces, {} lines",
                            self.episode_id, self.pieces_spawned, self.lines_cleared_total
                        );
                    }
                } else {
                    moved = true;
                }
            }
            Action::Exit => {}
        }

        StepOutcome {
            board: self.board.clone(),
            moved,
            landed,
            lines_cleared,
            lines_cleared_bonus,
            game_over,
            exit_requested: action == Action::Exit,
        }
    }

    /// Put `piece` at its spawn position as the active piece
    ///
    /// The previous active piece is removed from the board. Intended for
    /// setting up positions in tools and tests.
    pub fn set_active_piece(&mut self, piece: &Piece) {
        self.lift();
        self.active = piece.at_spawn(self.board.width());
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for setting up positions.
    ///
    /// Cells under the active piece are not protected.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active_piece(&self) -> &Piece {
        &self.active
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    pub fn catalog(&self) -> &PieceCatalog {
        self.source.catalog()
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    pub fn episode_id(&self) -> u64 {
        self.episode_id
    }

    pub fn pieces_spawned(&self) -> u64 {
        self.pieces_spawned
    }

    pub fn lines_cleared_total(&self) -> u64 {
        self.lines_cleared_total
    }

    pub fn bonus_total(&self) -> i64 {
        self.bonus_total
    }

    /// Whether the active piece is drawn on the board yet
    pub fn is_active_stamped(&self) -> bool {
        self.stamped
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board.fill_from(&self.board);
        out.active.fill_from(&self.active);
        out.next.fill_from(&self.next);
        out.episode_id = self.episode_id;
        out.pieces_spawned = self.pieces_spawned;
        out.lines_cleared_total = self.lines_cleared_total;
        out.bonus_total = self.bonus_total;
        out.game_over = self.is_game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
