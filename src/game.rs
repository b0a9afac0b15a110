use std::collections::VecDeque;

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::{Error, Result};
use crate::notation::MoveLog;
use crate::types::{Cell, Coord, GameState, Move, Outcome, Phase, Player};

/// Picks one move out of the legal set. The engine never chooses on its own;
/// automated opponents plug their policy in here.
pub trait MoveSelector {
    fn select_move(&self, game: &Game, legal: &[Move]) -> Option<Move>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&self, _game: &Game, legal: &[Move]) -> Option<Move> {
        legal.first().copied()
    }
}

/// One draughts session: the board plus everything needed to continue play.
///
/// Cloning a `Game` yields an independent copy, so hypothetical lines can be
/// explored without touching the live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    current_player: Player,
    phase: Phase,
    moves_to_draw: u32,
    moves_until_draw: u32,
    notation: MoveLog,
    pending: VecDeque<Move>,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self> {
        let board = Board::new(config.width, config.height, config.home_size)?;
        Self::from_board(board, Player::One, config.moves_to_draw)
    }

    /// Starts play from an arbitrary position with `to_move` on turn.
    pub fn from_board(board: Board, to_move: Player, moves_to_draw: u32) -> Result<Self> {
        if moves_to_draw == 0 {
            return Err(Error::InvalidMovesToDraw);
        }
        Ok(Self {
            board,
            current_player: to_move,
            phase: Phase::Turn,
            moves_to_draw,
            moves_until_draw: moves_to_draw,
            notation: MoveLog::new(),
            pending: VecDeque::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell_at(&self, pos: Coord) -> Option<Cell> {
        self.board.cell(pos)
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// `None` while the game is still running.
    pub fn winner(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Ended { outcome } => Some(outcome),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Ended { .. })
    }

    pub fn streak_origin(&self) -> Option<Coord> {
        match self.phase {
            Phase::Streak { origin } => Some(origin),
            _ => None,
        }
    }

    pub fn moves_until_draw(&self) -> u32 {
        self.moves_until_draw
    }

    pub fn notation(&self) -> &[String] {
        self.notation.entries()
    }

    pub fn has_pieces(&self, player: Player) -> bool {
        self.board.has_pieces(player)
    }

    pub fn piece_count(&self, player: Player) -> usize {
        self.board.count(player)
    }

    /// Moves committed to the board that the presentation layer has not taken yet.
    pub fn pending_moves(&self) -> &VecDeque<Move> {
        &self.pending
    }

    pub fn pop_pending_move(&mut self) -> Option<Move> {
        self.pending.pop_front()
    }

    /// Legal moves with mandatory captures enforced.
    pub fn legal_moves(&self) -> Result<Vec<Move>> {
        self.legal_moves_with(true)
    }

    /// Legal moves for the side on turn.
    ///
    /// During a capture streak only further captures by the streaking piece
    /// are returned, whatever `force_capture` says. Otherwise, with
    /// `force_capture` set, any available capture hides all non-captures.
    pub fn legal_moves_with(&self, force_capture: bool) -> Result<Vec<Move>> {
        match self.phase {
            Phase::Ended { .. } => Ok(Vec::new()),
            Phase::Streak { origin } => {
                let captures = self.captures_from(origin);
                if captures.is_empty() {
                    return Err(Error::NoStreakContinuation { origin });
                }
                Ok(captures)
            }
            Phase::Turn => {
                let moves = self.board.candidate_moves(self.current_player);
                if force_capture && moves.iter().any(|m| m.capture) {
                    Ok(moves.into_iter().filter(|m| m.capture).collect())
                } else {
                    Ok(moves)
                }
            }
        }
    }

    /// Plays `from -> to` if it is legal. `Ok(false)` leaves the game untouched.
    pub fn try_move(&mut self, from: Coord, to: Coord) -> Result<bool> {
        let Some(mv) = self.find_legal(from, to)? else {
            return Ok(false);
        };

        self.commit(mv)?;
        Ok(true)
    }

    /// Plays a move the caller already knows to be legal.
    pub fn make_move(&mut self, from: Coord, to: Coord) -> Result<Move> {
        let mv = self
            .find_legal(from, to)?
            .ok_or(Error::IllegalMove { from, to })?;

        self.commit(mv)?;
        Ok(mv)
    }

    /// Lets `selector` choose among the legal moves and plays its choice.
    pub fn play_selected(&mut self, selector: &dyn MoveSelector) -> Result<Move> {
        if self.is_over() {
            return Err(Error::GameOver);
        }
        let legal = self.legal_moves()?;
        let selected = selector
            .select_move(self, &legal)
            .ok_or(Error::NoSelection)?;
        if !legal.contains(&selected) {
            return Err(Error::IllegalMove {
                from: selected.from,
                to: selected.to,
            });
        }

        self.commit(selected)?;
        Ok(selected)
    }

    /// Ends the game in favour of `winner`, whatever the position.
    pub fn technical_defeat(&mut self, winner: Player) {
        self.phase = Phase::Ended {
            outcome: Outcome::Winner(winner),
        };
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            width: self.board.width(),
            height: self.board.height(),
            board: self.board.to_codes(),
            current_player: self.current_player.id(),
            player_one_count: self.piece_count(Player::One) as u32,
            player_two_count: self.piece_count(Player::Two) as u32,
            phase: self.phase.name(),
            streak_origin: self.streak_origin(),
            winner: self.winner().map(Outcome::id),
            moves_until_draw: self.moves_until_draw,
            notation: self.notation.entries().to_vec(),
        }
    }

    fn commit(&mut self, mv: Move) -> Result<()> {
        let mover = self.current_player;
        let from_streak = matches!(self.phase, Phase::Streak { .. });

        let piece = self.board.relocate(mv);
        if mv.to.y == mover.promotion_row(self.board.height()) {
            self.board.crown(mv.to);
        }

        if from_streak {
            self.notation.extend_chain(mv.to);
        } else {
            self.notation.record(mv);
        }

        if mv.capture && !self.captures_from(mv.to).is_empty() {
            self.phase = Phase::Streak { origin: mv.to };
        } else {
            self.phase = Phase::Turn;
            self.current_player = mover.opponent();
        }

        self.pending.push_back(mv);

        if piece.king && !mv.capture && !from_streak {
            self.moves_until_draw -= 1;
            if self.moves_until_draw == 0 {
                self.phase = Phase::Ended {
                    outcome: Outcome::Draw,
                };
                return Ok(());
            }
        } else {
            self.moves_until_draw = self.moves_to_draw;
        }

        let next = self.current_player;
        if !self.board.has_pieces(next) || self.legal_moves()?.is_empty() {
            self.phase = Phase::Ended {
                outcome: Outcome::Winner(mover),
            };
        }

        Ok(())
    }

    fn find_legal(&self, from: Coord, to: Coord) -> Result<Option<Move>> {
        Ok(self
            .legal_moves()?
            .into_iter()
            .find(|m| m.from == from && m.to == to))
    }

    fn captures_from(&self, pos: Coord) -> Vec<Move> {
        self.board
            .moves_from(pos)
            .into_iter()
            .filter(|m| m.capture)
            .collect()
    }

    #[cfg(test)]
    fn set_phase_for_test(&mut self, phase: Phase) {
        self.phase = phase;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedMoveSelector {
        mv: Option<Move>,
    }

    impl MoveSelector for FixedMoveSelector {
        fn select_move(&self, _game: &Game, _legal: &[Move]) -> Option<Move> {
            self.mv
        }
    }

    fn c(x: u8, y: u8) -> Coord {
        Coord::new(x, y)
    }

    fn game_with(pieces: &[(u8, u8, Player, bool)], to_move: Player) -> Game {
        let mut board = Board::empty(8, 8).unwrap();
        for &(x, y, player, king) in pieces {
            board.place(c(x, y), player, king).unwrap();
        }
        Game::from_board(board, to_move, 6).unwrap()
    }

    #[test]
    fn initial_state_is_correct() {
        let game = Game::new(GameConfig::default()).unwrap();
        let state = game.to_game_state();

        assert_eq!(state.current_player, 1);
        assert_eq!(state.player_one_count, 12);
        assert_eq!(state.player_two_count, 12);
        assert_eq!(state.phase, "turn");
        assert_eq!(state.winner, None);
        assert_eq!(state.moves_until_draw, 6);
        assert!(state.notation.is_empty());
        assert_eq!(game.legal_moves().unwrap().len(), 7);
        assert!(game.legal_moves().unwrap().iter().all(|m| !m.capture));
    }

    #[test]
    fn overlapping_home_rows_fail_at_creation() {
        let err = Game::new(GameConfig::new(8, 8, 4)).unwrap_err();

        assert!(err.is_configuration());
    }

    #[test]
    fn simple_move_passes_the_turn() {
        let mut game = Game::new(GameConfig::default()).unwrap();

        assert!(game.try_move(c(2, 2), c(3, 3)).unwrap());

        assert_eq!(game.current_player(), Player::Two);
        assert_eq!(game.phase(), Phase::Turn);
        assert_eq!(game.notation(), ["c3-d4"]);
        assert!(game.cell_at(c(2, 2)).unwrap().is_empty());
        assert_eq!(game.cell_at(c(3, 3)).unwrap().owner, Some(Player::One));
    }

    #[test]
    fn illegal_move_returns_false_and_keeps_game_unchanged() {
        let mut game = Game::new(GameConfig::default()).unwrap();
        let before = game.clone();

        assert!(!game.try_move(c(2, 2), c(4, 4)).unwrap());
        assert!(!game.try_move(c(1, 1), c(2, 2)).unwrap());
        assert!(!game.try_move(c(5, 5), c(4, 4)).unwrap());

        assert_eq!(game, before);
    }

    #[test]
    fn capture_without_continuation_passes_the_turn() {
        let mut game = game_with(
            &[
                (2, 2, Player::One, false),
                (3, 3, Player::Two, false),
                (7, 7, Player::Two, false),
            ],
            Player::One,
        );

        assert!(game.try_move(c(2, 2), c(4, 4)).unwrap());

        assert!(game.cell_at(c(3, 3)).unwrap().is_empty());
        assert_eq!(game.current_player(), Player::Two);
        assert_eq!(game.phase(), Phase::Turn);
        assert_eq!(game.notation(), ["c3:e5"]);
    }

    #[test]
    fn capture_with_continuation_starts_a_streak() {
        let mut game = game_with(
            &[
                (2, 2, Player::One, false),
                (0, 0, Player::One, false),
                (3, 3, Player::Two, false),
                (5, 5, Player::Two, false),
                (1, 7, Player::Two, false),
            ],
            Player::One,
        );

        assert!(game.try_move(c(2, 2), c(4, 4)).unwrap());

        assert_eq!(game.phase(), Phase::Streak { origin: c(4, 4) });
        assert_eq!(game.current_player(), Player::One);
        let moves = game.legal_moves_with(false).unwrap();
        assert_eq!(moves, vec![Move::new(c(4, 4), c(6, 6), true)]);

        // Other pieces may not move during the streak.
        assert!(!game.try_move(c(0, 0), c(1, 1)).unwrap());

        assert!(game.try_move(c(4, 4), c(6, 6)).unwrap());
        assert_eq!(game.notation(), ["c3:e5:g7"]);
        assert_eq!(game.current_player(), Player::Two);
        assert_eq!(game.phase(), Phase::Turn);
        assert!(game.cell_at(c(5, 5)).unwrap().is_empty());
    }

    #[test]
    fn capture_is_mandatory_unless_forcing_is_off() {
        let game = game_with(
            &[
                (2, 2, Player::One, false),
                (6, 2, Player::One, false),
                (3, 3, Player::Two, false),
            ],
            Player::One,
        );

        let forced = game.legal_moves().unwrap();
        let all = game.legal_moves_with(false).unwrap();

        assert_eq!(forced, vec![Move::new(c(2, 2), c(4, 4), true)]);
        assert!(all.contains(&Move::new(c(6, 2), c(7, 3), false)));
        assert!(all.len() > forced.len());

        let mut game = game;
        assert!(!game.try_move(c(6, 2), c(7, 3)).unwrap());
    }

    #[test]
    fn man_is_crowned_on_the_far_row() {
        let mut game = game_with(
            &[(6, 6, Player::One, false), (0, 2, Player::Two, false)],
            Player::One,
        );

        assert!(game.try_move(c(6, 6), c(7, 7)).unwrap());

        assert!(game.cell_at(c(7, 7)).unwrap().king);
    }

    #[test]
    fn crowning_mid_streak_lets_the_new_king_continue() {
        let mut game = game_with(
            &[
                (5, 5, Player::One, false),
                (6, 6, Player::Two, false),
                (3, 3, Player::Two, false),
            ],
            Player::One,
        );

        assert!(game.try_move(c(5, 5), c(7, 7)).unwrap());

        assert!(game.cell_at(c(7, 7)).unwrap().king);
        assert_eq!(game.phase(), Phase::Streak { origin: c(7, 7) });
        let moves = game.legal_moves().unwrap();
        assert!(moves.contains(&Move::new(c(7, 7), c(2, 2), true)));
        assert!(moves.iter().all(|m| m.capture && m.from == c(7, 7)));
    }

    #[test]
    fn capturing_the_last_piece_wins() {
        let mut game = game_with(
            &[(2, 2, Player::One, false), (3, 3, Player::Two, false)],
            Player::One,
        );

        assert!(game.try_move(c(2, 2), c(4, 4)).unwrap());

        assert_eq!(game.winner(), Some(Outcome::Winner(Player::One)));
        assert!(!game.has_pieces(Player::Two));
        assert!(game.legal_moves().unwrap().is_empty());
    }

    #[test]
    fn blocking_the_last_move_wins() {
        let mut game = game_with(
            &[
                (0, 0, Player::One, false),
                (2, 0, Player::One, false),
                (0, 2, Player::One, false),
                (2, 2, Player::One, false),
                (3, 3, Player::One, false),
                (1, 1, Player::Two, false),
            ],
            Player::One,
        );

        assert!(game.try_move(c(0, 2), c(1, 3)).unwrap());

        assert!(game.has_pieces(Player::Two));
        assert_eq!(game.winner(), Some(Outcome::Winner(Player::One)));
        assert_eq!(game.to_game_state().winner, Some(1));
        assert!(!game.try_move(c(1, 1), c(0, 2)).unwrap());
    }

    #[test]
    fn consecutive_king_moves_end_in_a_draw() {
        let mut game = game_with(
            &[(0, 0, Player::One, true), (7, 1, Player::Two, true)],
            Player::One,
        );
        let shuffle = [
            (c(0, 0), c(1, 1)),
            (c(7, 1), c(6, 0)),
            (c(1, 1), c(0, 0)),
            (c(6, 0), c(7, 1)),
            (c(0, 0), c(1, 1)),
            (c(7, 1), c(6, 0)),
        ];

        for (i, (from, to)) in shuffle.into_iter().enumerate() {
            assert_eq!(game.winner(), None, "move {i}");
            assert!(game.try_move(from, to).unwrap(), "move {i}");
            assert_eq!(game.moves_until_draw(), 5 - i as u32);
        }

        assert_eq!(game.winner(), Some(Outcome::Draw));
        assert_eq!(game.to_game_state().winner, Some(0));
    }

    #[test]
    fn man_move_resets_the_draw_countdown() {
        let mut game = game_with(
            &[
                (0, 0, Player::One, true),
                (4, 2, Player::One, false),
                (1, 7, Player::Two, true),
            ],
            Player::One,
        );

        assert!(game.try_move(c(0, 0), c(1, 1)).unwrap());
        assert!(game.try_move(c(1, 7), c(0, 6)).unwrap());
        assert_eq!(game.moves_until_draw(), 4);

        assert!(game.try_move(c(4, 2), c(5, 3)).unwrap());
        assert_eq!(game.moves_until_draw(), 6);
    }

    #[test]
    fn king_capture_resets_the_draw_countdown() {
        let mut game = game_with(
            &[
                (0, 2, Player::One, true),
                (5, 5, Player::Two, false),
                (7, 1, Player::Two, true),
            ],
            Player::One,
        );

        assert!(game.try_move(c(0, 2), c(1, 1)).unwrap());
        assert!(game.try_move(c(7, 1), c(6, 0)).unwrap());
        assert_eq!(game.moves_until_draw(), 4);

        assert!(game.try_move(c(1, 1), c(6, 6)).unwrap());
        assert!(game.cell_at(c(5, 5)).unwrap().is_empty());
        assert_eq!(game.moves_until_draw(), 6);
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn quiet_promotion_counts_as_a_man_move() {
        let mut game = game_with(
            &[
                (0, 0, Player::One, true),
                (6, 6, Player::One, false),
                (7, 1, Player::Two, true),
            ],
            Player::One,
        );

        assert!(game.try_move(c(0, 0), c(1, 1)).unwrap());
        assert!(game.try_move(c(7, 1), c(6, 0)).unwrap());
        assert_eq!(game.moves_until_draw(), 4);

        assert!(game.try_move(c(6, 6), c(7, 7)).unwrap());
        assert!(game.cell_at(c(7, 7)).unwrap().king);
        assert_eq!(game.moves_until_draw(), 6);
    }

    #[test]
    fn make_move_returns_the_committed_move() {
        let mut game = game_with(
            &[
                (2, 2, Player::One, false),
                (3, 3, Player::Two, false),
                (7, 7, Player::Two, false),
            ],
            Player::One,
        );

        let mv = game.make_move(c(2, 2), c(4, 4)).unwrap();

        assert_eq!(mv, Move::new(c(2, 2), c(4, 4), true));
        assert_eq!(game.pending_moves().back(), Some(&mv));
        assert_eq!(
            game.make_move(c(4, 4), c(5, 5)),
            Err(Error::IllegalMove {
                from: c(4, 4),
                to: c(5, 5)
            })
        );
    }

    #[test]
    fn streak_without_continuation_is_an_invariant_violation() {
        let mut game = game_with(
            &[(2, 2, Player::One, false), (7, 7, Player::Two, false)],
            Player::One,
        );
        game.set_phase_for_test(Phase::Streak { origin: c(2, 2) });

        assert_eq!(
            game.legal_moves(),
            Err(Error::NoStreakContinuation { origin: c(2, 2) })
        );
        assert!(game.try_move(c(2, 2), c(3, 3)).is_err());
    }

    #[test]
    fn make_move_rejects_illegal_input() {
        let mut game = Game::new(GameConfig::default()).unwrap();

        assert_eq!(
            game.make_move(c(2, 2), c(2, 3)),
            Err(Error::IllegalMove {
                from: c(2, 2),
                to: c(2, 3)
            })
        );
        assert_eq!(
            game.make_move(c(2, 2), c(3, 3)),
            Ok(Move::new(c(2, 2), c(3, 3), false))
        );
    }

    #[test]
    fn technical_defeat_ends_the_game() {
        let mut game = Game::new(GameConfig::default()).unwrap();

        game.technical_defeat(Player::Two);

        assert_eq!(game.winner(), Some(Outcome::Winner(Player::Two)));
        assert!(game.legal_moves().unwrap().is_empty());
        assert!(!game.try_move(c(2, 2), c(3, 3)).unwrap());
        assert_eq!(
            game.play_selected(&FirstLegalMoveSelector),
            Err(Error::GameOver)
        );
    }

    #[test]
    fn committed_moves_queue_up_in_order() {
        let mut game = Game::new(GameConfig::default()).unwrap();
        game.make_move(c(2, 2), c(3, 3)).unwrap();
        game.make_move(c(5, 5), c(4, 4)).unwrap();

        assert_eq!(game.pending_moves().len(), 2);
        assert_eq!(
            game.pop_pending_move(),
            Some(Move::new(c(2, 2), c(3, 3), false))
        );
        assert_eq!(
            game.pop_pending_move(),
            Some(Move::new(c(5, 5), c(4, 4), false))
        );
        assert_eq!(game.pop_pending_move(), None);
    }

    #[test]
    fn cloned_session_is_independent() {
        let game = Game::new(GameConfig::default()).unwrap();
        let mut fork = game.clone();

        fork.make_move(c(2, 2), c(3, 3)).unwrap();

        assert_eq!(game.current_player(), Player::One);
        assert!(game.notation().is_empty());
        assert_eq!(game.cell_at(c(2, 2)).unwrap().owner, Some(Player::One));
        assert_eq!(fork.current_player(), Player::Two);
    }

    #[test]
    fn selector_moves_are_validated() {
        let mut game = Game::new(GameConfig::default()).unwrap();

        let played = game.play_selected(&FirstLegalMoveSelector).unwrap();
        assert_eq!(game.notation(), [played.to_string()]);

        let bogus = FixedMoveSelector {
            mv: Some(Move::new(c(7, 7), c(6, 6), false)),
        };
        assert_eq!(
            game.play_selected(&bogus),
            Err(Error::IllegalMove {
                from: c(7, 7),
                to: c(6, 6)
            })
        );
        assert_eq!(
            game.play_selected(&FixedMoveSelector { mv: None }),
            Err(Error::NoSelection)
        );
    }
}
