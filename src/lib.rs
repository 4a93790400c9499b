//! Crate root module declarations for the Birch Chess engine.
//!
//! Exposes the position model, move generation, search and evaluation,
//! the engine façade, and text utilities so the binary, benches, and
//! external tooling can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod bitboard;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod repetition;
    pub mod undo_state;
}

pub mod moves {
    pub mod attack_tables;
    pub mod move_descriptions;
    pub mod move_list;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_sliders;
    pub mod perft;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod endgame_scoring;
    pub mod game_phase;
    pub mod king_safety;
    pub mod move_ordering;
    pub mod pawn_structure;
    pub mod piece_square_tables;
    pub mod zobrist;
}

pub mod engines {
    pub mod chess_engine;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
    pub mod self_play;
}
