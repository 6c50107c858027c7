//! Translates typed input into session commands and tracks the player.
//!
//! The session knows nothing about the player avatar; collision with walls,
//! orbs and the finish is resolved here and reported as commands.

use orb_maze_core::{CellCoord, Command, Direction, Event};
use orb_maze_world::{query, Session};

/// A single line of player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    /// Step one cell in a direction.
    Move(Direction),
    /// Pick the choice at this zero-based index.
    Answer(usize),
    /// Open or close the pause menu.
    Pause,
    /// Start over with a fresh maze.
    Restart,
    /// Print the distance to the next goal.
    Hint,
    /// Let time pass without doing anything.
    Wait,
    /// Leave the game.
    Quit,
}

/// Parses one input line. Returns `None` for unrecognised input.
pub(crate) fn parse_action(line: &str) -> Option<Action> {
    let action = match line.trim().to_ascii_lowercase().as_str() {
        "w" => Action::Move(Direction::North),
        "d" => Action::Move(Direction::East),
        "s" => Action::Move(Direction::South),
        "a" => Action::Move(Direction::West),
        "1" => Action::Answer(0),
        "2" => Action::Answer(1),
        "p" | "esc" => Action::Pause,
        "r" => Action::Restart,
        "h" => Action::Hint,
        "" => Action::Wait,
        "q" => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// Player-side state kept between ticks.
#[derive(Debug)]
pub(crate) struct Driver {
    player: CellCoord,
}

impl Driver {
    /// Places the player on the session's spawn cell.
    pub(crate) fn new(session: &Session) -> Self {
        Self {
            player: query::player_spawn(session),
        }
    }

    /// Cell the player stands on.
    pub(crate) fn player(&self) -> CellCoord {
        self.player
    }

    /// Resolves an action against the current session, moving the player
    /// when allowed, and returns the commands to feed into the next tick.
    pub(crate) fn commands_for(&mut self, session: &Session, action: Action) -> Vec<Command> {
        match action {
            Action::Move(direction) => self.step(session, direction),
            Action::Answer(index) => query::active_question(session)
                .and_then(|view| {
                    view.question
                        .choices()
                        .get(index)
                        .map(|choice| Command::AnswerSubmitted {
                            orb: view.orb,
                            choice: choice.clone(),
                        })
                })
                .into_iter()
                .collect(),
            Action::Pause => vec![Command::PauseToggled],
            Action::Restart => vec![Command::RestartRequested],
            Action::Hint | Action::Wait | Action::Quit => Vec::new(),
        }
    }

    /// Reacts to session events that affect the player.
    pub(crate) fn observe(&mut self, session: &Session, events: &[Event]) {
        if events.contains(&Event::SessionRestarted) {
            self.player = query::player_spawn(session);
        }
    }

    fn step(&mut self, session: &Session, direction: Direction) -> Vec<Command> {
        if !query::movement_enabled(session) {
            return Vec::new();
        }

        let Some(target) = direction.offset(self.player, 1) else {
            return Vec::new();
        };
        if !query::maze(session).is_open(target) {
            return Vec::new();
        }
        self.player = target;

        let mut commands = Vec::new();
        if let Some(orb) = query::orb_at(session, target) {
            commands.push(Command::OrbTriggered { orb });
        }
        if query::finish(session) == Some(target) {
            commands.push(Command::FinishReached);
        }
        commands
    }
}
