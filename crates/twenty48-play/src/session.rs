use std::collections::HashMap;

use log::{debug, info};
use rand::Rng;
use twenty48_engine::engine::{Direction, GridEngine};
use twenty48_engine::input::{Command, InputError};

/// What a single command did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The grid changed and a tile was spawned.
    Moved,
    /// Valid move that changed nothing; no tile was spawned.
    Unchanged,
    Restarted,
    Quit,
}

/// Drives one engine the way a UI would: one command at a time, spawning
/// only after a move that changed the grid.
pub struct Session<R> {
    engine: GridEngine<R>,
    keys: HashMap<String, Direction>,
    moves: u32,
}

impl<R: Rng> Session<R> {
    pub fn new(engine: GridEngine<R>, keys: HashMap<String, Direction>) -> Self {
        Session { engine, keys, moves: 0 }
    }

    pub fn parse(&self, line: &str) -> Result<Command, InputError> {
        Command::parse_with(line, &self.keys)
    }

    pub fn apply(&mut self, cmd: Command) -> Outcome {
        match cmd {
            Command::Move(dir) => {
                if self.engine.make_move(dir) {
                    self.moves += 1;
                    debug!("move {} {dir:?}: score {}", self.moves, self.engine.score());
                    Outcome::Moved
                } else {
                    Outcome::Unchanged
                }
            }
            Command::Restart => {
                info!("restart after {} moves, score {}", self.moves, self.engine.score());
                self.engine.reset();
                self.moves = 0;
                Outcome::Restarted
            }
            Command::Quit => Outcome::Quit,
        }
    }

    pub fn engine(&self) -> &GridEngine<R> {
        &self.engine
    }

    /// Moves that changed the grid since the last (re)start.
    pub fn moves(&self) -> u32 {
        self.moves
    }
}
