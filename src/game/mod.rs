//! Game module - level context, turn scheduling and the level director

pub mod messages;
mod state;
mod turn;
mod level;
#[cfg(test)]
pub(crate) mod testing;

pub use messages::{Message, MessageLog};
pub use state::{CharacterSheet, Game, GameState};
pub use turn::{ActionResult, PlayerAction, Prompt, TargetInput};
