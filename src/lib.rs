use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod notation;
pub mod types;

pub use board::Board;
pub use config::GameConfig;
pub use error::Error;
pub use game::{FirstLegalMoveSelector, Game, MoveSelector};
pub use types::{Cell, Coord, GameState, Move, Outcome, Phase, Player};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Draughts session handed to the JS host.
#[wasm_bindgen]
pub struct DraughtsGame {
    inner: Game,
}

#[wasm_bindgen]
impl DraughtsGame {
    /// `config` may be `undefined` or a partial `{ width, height, home_size,
    /// moves_to_draw }` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<DraughtsGame, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            inner: Game::new(config)?,
        })
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.to_game_state())?)
    }

    pub fn legal_moves(&self, force_capture: bool) -> Result<JsValue, JsValue> {
        let moves = self.inner.legal_moves_with(force_capture)?;
        Ok(serde_wasm_bindgen::to_value(&moves)?)
    }

    pub fn try_move(
        &mut self,
        from_x: u8,
        from_y: u8,
        to_x: u8,
        to_y: u8,
    ) -> Result<bool, JsValue> {
        Ok(self
            .inner
            .try_move(Coord::new(from_x, from_y), Coord::new(to_x, to_y))?)
    }

    pub fn technical_defeat(&mut self, winner: u8) -> Result<(), JsValue> {
        self.inner.technical_defeat(Player::try_from(winner)?);
        Ok(())
    }

    pub fn has_pieces(&self, player: u8) -> Result<bool, JsValue> {
        Ok(self.inner.has_pieces(Player::try_from(player)?))
    }

    pub fn notation(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.notation())?)
    }

    /// Takes the oldest committed move not yet animated; `undefined` when none.
    pub fn next_committed_move(&mut self) -> Result<JsValue, JsValue> {
        match self.inner.pop_pending_move() {
            Some(mv) => Ok(serde_wasm_bindgen::to_value(&mv)?),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Independent copy for exploring moves without touching this session.
    pub fn fork(&self) -> DraughtsGame {
        Self {
            inner: self.inner.clone(),
        }
    }
}
