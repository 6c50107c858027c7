#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Orb Maze engine.
//!
//! This crate defines the message surface that connects adapters with the
//! authoritative session. Adapters translate raw input into [`Command`] values,
//! the session consumes them through its `tick` entry point once per external
//! time step, and then reports what happened as [`Event`] values that the
//! presentation layer renders. The session never reaches back into adapters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Orb Maze.";

/// Discrete inputs produced by the input layer and fed into a session tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// The player touched a live orb and wants to answer its question.
    OrbTriggered {
        /// Identifier of the orb that was touched.
        orb: OrbId,
    },
    /// The player picked one of the choices of the active question.
    AnswerSubmitted {
        /// Orb whose question is being answered.
        orb: OrbId,
        /// Text of the selected choice.
        choice: String,
    },
    /// Toggles the pause menu.
    PauseToggled,
    /// The player stepped onto the finish cell.
    FinishReached,
    /// Discards the session and builds a fresh one.
    RestartRequested,
}

/// Notifications broadcast by the session after processing a tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A question was drawn and should be presented to the player.
    QuestionShown {
        /// Orb that triggered the question.
        orb: OrbId,
        /// Question drawn from the bank.
        question: QuestionId,
    },
    /// The active question interaction finished.
    QuestionResolved {
        /// Orb the question belonged to.
        orb: OrbId,
        /// How the interaction ended.
        resolution: Resolution,
    },
    /// An orb was answered correctly and removed from the maze.
    OrbCollected {
        /// Identifier of the collected orb.
        orb: OrbId,
        /// Number of orbs collected so far in the session.
        collected: u32,
    },
    /// An orb moved to a new open cell and stays live.
    OrbRespawned {
        /// Identifier of the moved orb.
        orb: OrbId,
        /// Cell the orb now occupies.
        cell: CellCoord,
    },
    /// Player movement must be enabled or disabled by the input layer.
    PlayerMovementChanged {
        /// Whether the player may move.
        enabled: bool,
    },
    /// The pause menu opened or closed.
    PauseChanged {
        /// Whether the session is paused after the toggle.
        paused: bool,
    },
    /// The finish appeared after every orb was collected.
    FinishSpawned {
        /// Cell that holds the finish.
        cell: CellCoord,
    },
    /// The session reached a terminal outcome.
    SessionEnded {
        /// Final result of the session.
        outcome: Outcome,
    },
    /// The whole session was rebuilt from scratch.
    SessionRestarted,
}

/// Ways a question interaction can end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// The submitted choice matched the correct answer.
    Correct,
    /// The submitted choice did not match the correct answer.
    Incorrect,
    /// The question clock ran out before an answer arrived.
    TimedOut,
    /// No question could be drawn, so the interaction was aborted.
    Unavailable,
}

/// Terminal result of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The player reached the finish in time.
    Won,
    /// The main clock ran out.
    Lost,
}

/// Externally visible state of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// The main clock is counting down.
    Running,
    /// A question is on screen and its own clock is counting down.
    QuestionActive,
    /// Both clocks are frozen until the pause is toggled again.
    Paused,
    /// The session is over.
    Ended(Outcome),
}

/// Occupancy of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Impassable cell.
    Wall,
    /// Carved, walkable cell.
    Open,
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Row zero is the bottom edge of the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Cardinal directions used by the carver and by player movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward increasing row indices.
    North,
    /// Toward increasing column indices.
    East,
    /// Toward decreasing row indices.
    South,
    /// Toward decreasing column indices.
    West,
}

impl Direction {
    /// All directions in their canonical order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Moves `cell` by `distance` steps, returning `None` on underflow or overflow.
    #[must_use]
    pub fn offset(self, cell: CellCoord, distance: u32) -> Option<CellCoord> {
        let (column, row) = (cell.column(), cell.row());
        match self {
            Self::North => row.checked_add(distance).map(|row| CellCoord::new(column, row)),
            Self::East => column
                .checked_add(distance)
                .map(|column| CellCoord::new(column, row)),
            Self::South => row.checked_sub(distance).map(|row| CellCoord::new(column, row)),
            Self::West => column
                .checked_sub(distance)
                .map(|column| CellCoord::new(column, row)),
        }
    }
}

/// Unique identifier assigned to an orb.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrbId(u32);

impl OrbId {
    /// Creates a new orb identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Position of a question inside the bank it was loaded into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(usize);

impl QuestionId {
    /// Creates a new question identifier from a load-order index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Load-order index of the question.
    #[must_use]
    pub const fn get(&self) -> usize {
        self.0
    }
}

/// Trivia question gating an orb.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    text: String,
    choices: [String; 2],
    correct_answer: String,
}

impl Question {
    /// Creates a question, rejecting answers that are not one of the choices.
    ///
    /// Identical choices are accepted.
    pub fn new(
        text: impl Into<String>,
        choices: [String; 2],
        correct_answer: impl Into<String>,
    ) -> Result<Self, RecordDefect> {
        let correct_answer = correct_answer.into();
        if !choices.iter().any(|choice| *choice == correct_answer) {
            return Err(RecordDefect::AnswerNotAmongChoices);
        }

        Ok(Self {
            text: text.into(),
            choices,
            correct_answer,
        })
    }

    /// Prompt shown to the player.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The two candidate answers in display order.
    #[must_use]
    pub fn choices(&self) -> &[String; 2] {
        &self.choices
    }

    /// The choice that counts as correct.
    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Reports whether `choice` is the correct answer.
    #[must_use]
    pub fn is_correct(&self, choice: &str) -> bool {
        self.correct_answer == choice
    }
}

/// Policy applied when a question source contains malformed records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// Reject the entire load on the first malformed record.
    Strict,
    /// Skip malformed records and keep the rest.
    #[default]
    Lenient,
}

/// Tuning parameters for a single session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of maze columns.
    pub width: u32,
    /// Number of maze rows.
    pub height: u32,
    /// Number of orbs placed at session start.
    pub orb_count: u32,
    /// Initial value of the main clock in seconds.
    pub game_time: f32,
    /// Seconds added to the main clock for a correct answer.
    pub time_added_by_orb: f32,
    /// Seconds removed from the main clock for an incorrect answer.
    pub time_penalty: f32,
    /// Seconds removed from the main clock when the question clock runs out.
    pub question_time_penalty: f32,
    /// Seconds the player has to answer a question.
    pub question_time_limit: f32,
    /// Seed for every random decision in the session.
    pub rng_seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            orb_count: 5,
            game_time: 60.0,
            time_added_by_orb: 5.0,
            time_penalty: 5.0,
            question_time_penalty: 10.0,
            question_time_limit: 10.0,
            rng_seed: 0x5eed_0f_0b5,
        }
    }
}

/// Failures raised by maze generation and position queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum MazeError {
    /// The grid is too small to have any carvable interior.
    #[error("a {width}x{height} grid has no carvable interior")]
    DegenerateGrid {
        /// Requested number of columns.
        width: u32,
        /// Requested number of rows.
        height: u32,
    },
    /// No open cell could be found.
    #[error("no open cell found after {attempts} attempts")]
    NoOpenCell {
        /// Number of random probes made before giving up.
        attempts: u32,
    },
}

/// Reasons a single question record is malformed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum RecordDefect {
    /// The record does not have the shape of a question object.
    #[error("record is not a question object")]
    Malformed,
    /// The record has no choices at all.
    #[error("choices are missing")]
    MissingChoices,
    /// The record does not have exactly two choices.
    #[error("expected 2 choices, found {0}")]
    WrongChoiceCount(usize),
    /// The correct answer is not one of the choices.
    #[error("correct answer is not one of the choices")]
    AnswerNotAmongChoices,
}

/// Failures raised by the question bank and its loader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum QuestionError {
    /// The bank holds no questions.
    #[error("no questions available")]
    NoQuestionsAvailable,
    /// A record in the question source is malformed.
    #[error("question record {index} is invalid: {reason}")]
    InvalidQuestionRecord {
        /// Zero-based position of the record in the source.
        index: usize,
        /// What is wrong with the record.
        reason: RecordDefect,
    },
}
