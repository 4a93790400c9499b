//! Engine façade bundling an evaluator with search settings.
//!
//! Front ends (the command-line driver, self-play, benches) hold one
//! [`ChessEngine`] and ask it for moves instead of wiring the searcher and
//! scorer together themselves.

use tracing::info;

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::search::alpha_beta::{AlphaBetaSearch, SearchConfig, SearchResult};
use crate::search::board_scoring::CombinedScorer;

pub struct ChessEngine {
    scorer: CombinedScorer,
    config: SearchConfig,
    last_result: Option<SearchResult>,
}

impl ChessEngine {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            scorer: CombinedScorer::standard(),
            config,
            last_result: None,
        }
    }

    /// Replaces the evaluator, keeping the current search settings.
    pub fn with_scorer(mut self, scorer: CombinedScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn name(&self) -> &str {
        "Birch Chess"
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    pub fn set_depth(&mut self, depth: u8) {
        self.config.max_depth = depth;
    }

    pub fn set_node_budget(&mut self, budget: Option<u64>) {
        self.config.node_budget = budget;
    }

    pub fn scorer(&self) -> &CombinedScorer {
        &self.scorer
    }

    /// Result of the most recent [`ChessEngine::search`], if any.
    pub fn last_result(&self) -> Option<SearchResult> {
        self.last_result
    }

    /// Searches `game_state` with the configured depth. The position is
    /// restored before this returns.
    pub fn search(&mut self, game_state: &mut GameState) -> SearchResult {
        let result = AlphaBetaSearch::new(&self.scorer, self.config).run(game_state);
        info!(
            best = %result.best_move.map_or_else(|| "none".to_owned(), |m| m.to_string()),
            score = result.score,
            nodes = result.nodes,
            depth = self.config.max_depth,
            "engine search complete"
        );
        self.last_result = Some(result);
        result
    }

    pub fn best_move(&mut self, game_state: &mut GameState) -> Option<Move> {
        self.search(game_state).best_move
    }

    /// Searches and plays the chosen move in the game. `None` when the side to
    /// move has no legal move.
    pub fn play_best_move(&mut self, game_state: &mut GameState) -> Option<Move> {
        let mv = self.best_move(game_state)?;
        game_state.make_move(mv).then_some(mv)
    }
}

impl Default for ChessEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::board_scoring::{MaterialScorer, MATE_VALUE};

    #[test]
    fn defaults_follow_search_config() {
        let mut engine = ChessEngine::new();
        assert_eq!(engine.config(), SearchConfig::default());
        assert!(engine.last_result().is_none());
        engine.set_depth(2);
        assert_eq!(engine.config().max_depth, 2);
    }

    #[test]
    fn search_records_last_result() {
        let mut engine = ChessEngine::with_config(SearchConfig {
            max_depth: 2,
            node_budget: None,
        });
        let mut game =
            GameState::from_fen("6k1/5ppp/8/8/8/8/8/3R2K1 w - - 0 1").expect("FEN should parse");
        let result = engine.search(&mut game);
        assert_eq!(result.score, MATE_VALUE - 1);
        assert_eq!(engine.last_result(), Some(result));
    }

    #[test]
    fn play_best_move_advances_game() {
        let mut engine = ChessEngine::with_config(SearchConfig {
            max_depth: 1,
            node_budget: None,
        });
        let mut game = GameState::new_game();
        let played = engine.play_best_move(&mut game);
        assert!(played.is_some());
        assert_eq!(game.history_len(), 1);
        assert_eq!(game.side_to_move, Color::Dark);
    }

    #[test]
    fn custom_scorer_is_used() {
        let scorer = CombinedScorer::new().with_scorer(MaterialScorer);
        let mut engine = ChessEngine::new().with_scorer(scorer);
        engine.set_depth(1);
        assert_eq!(engine.scorer().component_names(), vec!["material"]);
        let mut game =
            GameState::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(engine.best_move(&mut game), Some(Move::normal(28, 35)));
    }
}
