//! Pluggable board evaluation interfaces and the combined evaluator.
//!
//! Search delegates static scoring to [`BoardScorer`] implementations so
//! heuristics can be swapped without touching search code. Every scorer
//! reports centipawns from the perspective of the side to move.

use crate::game_state::bitboard::squares;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator::has_legal_move;
use crate::search::endgame_scoring::EndgameScorer;
use crate::search::king_safety::KingSafetyScorer;
use crate::search::pawn_structure::PawnStructureScorer;
use crate::search::piece_square_tables::{square_value, table_for};

/// Score of delivering mate at the root. A mate found `ply` half-moves deep
/// scores `MATE_VALUE - ply`.
pub const MATE_VALUE: i32 = 1_000_000;
/// Any score at or beyond this magnitude is a forced mate.
pub const MATE_THRESHOLD: i32 = MATE_VALUE - 1_000;
/// Score of any drawn position.
pub const STALEMATE_VALUE: i32 = 0;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, game_state: &GameState) -> i32;

    fn name(&self) -> &'static str {
        "unnamed"
    }
}

/// `true` when `score` lies in the reserved mate band.
#[inline]
pub const fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_THRESHOLD
}

/// Converts a white-minus-black score to the mover's perspective.
#[inline]
pub(crate) fn for_side_to_move(game_state: &GameState, white_minus_black: i32) -> i32 {
    white_minus_black * game_state.side_to_move.sign()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }

    #[inline]
    pub fn material_balance_white_minus_black(game_state: &GameState) -> i32 {
        let mut score = 0i32;
        for piece in ALL_PIECE_KINDS {
            let value = Self::piece_value(piece);
            let white_count = game_state.pieces_of(Color::Light, piece).count_ones() as i32;
            let black_count = game_state.pieces_of(Color::Dark, piece).count_ones() as i32;
            score += (white_count - black_count) * value;
        }
        score
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        for_side_to_move(game_state, Self::material_balance_white_minus_black(game_state))
    }

    fn name(&self) -> &'static str {
        "material"
    }
}

/// Piece-square table bonuses. The king always uses its middlegame table;
/// centralization in the endgame belongs to [`EndgameScorer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalScorer;

impl PositionalScorer {
    pub fn positional_white_minus_black(game_state: &GameState) -> i32 {
        let mut score = 0i32;
        for color in ALL_COLORS {
            for kind in ALL_PIECE_KINDS {
                let table = table_for(kind);
                let sum: i32 = squares(game_state.pieces_of(color, kind))
                    .map(|sq| square_value(table, color, sq))
                    .sum();
                score += color.sign() * sum;
            }
        }
        score
    }
}

impl BoardScorer for PositionalScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        for_side_to_move(game_state, Self::positional_white_minus_black(game_state))
    }

    fn name(&self) -> &'static str {
        "positional"
    }
}

/// Owns a list of component scorers and layers terminal-state handling on
/// top of their sum.
pub struct CombinedScorer {
    components: Vec<Box<dyn BoardScorer>>,
}

impl CombinedScorer {
    /// An empty evaluator; every non-terminal position scores zero.
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
        }
    }

    /// Material, positional, pawn structure, king safety and endgame terms.
    pub fn standard() -> Self {
        Self::new()
            .with_scorer(MaterialScorer)
            .with_scorer(PositionalScorer)
            .with_scorer(PawnStructureScorer)
            .with_scorer(KingSafetyScorer)
            .with_scorer(EndgameScorer)
    }

    pub fn with_scorer<S: BoardScorer + 'static>(mut self, scorer: S) -> Self {
        self.add(Box::new(scorer));
        self
    }

    pub fn add(&mut self, scorer: Box<dyn BoardScorer>) {
        self.components.push(scorer);
    }

    pub fn component_names(&self) -> Vec<&'static str> {
        self.components.iter().map(|c| c.name()).collect()
    }

    /// Sum of the components, ignoring mate and draw detection.
    pub fn static_score(&self, game_state: &GameState) -> i32 {
        self.components.iter().map(|c| c.score(game_state)).sum()
    }

    /// Full evaluation from the mover's perspective. A mated mover scores
    /// `-(MATE_VALUE - ply)`; stalemate, threefold repetition and insufficient
    /// material score [`STALEMATE_VALUE`].
    pub fn evaluate(&self, game_state: &mut GameState, ply: u32) -> i32 {
        let can_move = has_legal_move(game_state);
        if !can_move && game_state.is_in_check() {
            return -(MATE_VALUE - ply as i32);
        }
        if !can_move
            || game_state.is_threefold_repetition()
            || game_state.has_insufficient_material()
        {
            return STALEMATE_VALUE;
        }
        self.static_score(game_state)
    }
}

impl Default for CombinedScorer {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for CombinedScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedScorer")
            .field("components", &self.component_names())
            .finish()
    }
}

impl BoardScorer for CombinedScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        self.static_score(game_state)
    }

    fn name(&self) -> &'static str {
        "combined"
    }
}
