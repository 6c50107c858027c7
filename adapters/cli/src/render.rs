//! Plain-text presentation of a session.

use std::fmt::Write as _;

use orb_maze_core::{CellCoord, Event, Outcome, Resolution, SessionState};
use orb_maze_world::{query, Session};

const WALL: char = '#';
const OPEN: char = ' ';
const PLAYER: char = '@';
const ORB: char = 'o';
const FINISH: char = 'F';

/// Key bindings shown when input is not recognised.
pub(crate) const HELP: &str =
    "keys: w/a/s/d move, 1/2 answer, p pause, r restart, h hint, enter wait, q quit";

/// Draws the maze with the top row first, followed by the status lines.
pub(crate) fn frame(session: &Session, player: CellCoord) -> String {
    let maze = query::maze(session);
    let finish = query::finish(session);
    let mut out = String::new();

    for row in (0..maze.height()).rev() {
        for column in 0..maze.width() {
            let cell = CellCoord::new(column, row);
            let glyph = if cell == player {
                PLAYER
            } else if query::orb_at(session, cell).is_some() {
                ORB
            } else if finish == Some(cell) {
                FINISH
            } else if maze.is_open(cell) {
                OPEN
            } else {
                WALL
            };
            out.push(glyph);
        }
        out.push('\n');
    }

    out.push_str(&status(session));
    out
}

/// Clock readouts and, while one is on screen, the active question.
pub(crate) fn status(session: &Session) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Time Left: {}   Orbs: {}/{}",
        query::main_clock(session).ceil(),
        query::collected_orbs(session),
        query::orb_total(session)
    );

    if let Some(view) = query::active_question(session) {
        let [first, second] = view.question.choices();
        let _ = writeln!(out, "Question Time: {}", view.remaining.ceil());
        let _ = writeln!(out, "{}", view.question.text());
        let _ = writeln!(out, "  1) {first}");
        let _ = writeln!(out, "  2) {second}");
    }

    match query::state(session) {
        SessionState::Paused => out.push_str("-- paused (p to resume) --\n"),
        SessionState::Ended(_) => out.push_str("-- r to restart, q to quit --\n"),
        SessionState::Running | SessionState::QuestionActive => {}
    }
    out
}

/// Human-readable line for an event, if it deserves one.
pub(crate) fn describe(event: &Event) -> Option<String> {
    let message = match event {
        Event::QuestionResolved { resolution, .. } => match resolution {
            Resolution::Correct => "Correct!".to_owned(),
            Resolution::Incorrect => "Wrong answer, the orb slipped away.".to_owned(),
            Resolution::TimedOut => "Too slow, the orb slipped away.".to_owned(),
            Resolution::Unavailable => "No questions available, the orb slipped away.".to_owned(),
        },
        Event::OrbCollected { collected, .. } => format!("Orb collected ({collected})."),
        Event::FinishSpawned { .. } => "All orbs collected, the finish has appeared!".to_owned(),
        Event::SessionEnded { outcome } => match outcome {
            Outcome::Won => "Congratulations! You won!".to_owned(),
            Outcome::Lost => "Game Over! You ran out of time!".to_owned(),
        },
        Event::SessionRestarted => "A new maze has been generated.".to_owned(),
        Event::QuestionShown { .. }
        | Event::OrbRespawned { .. }
        | Event::PlayerMovementChanged { .. }
        | Event::PauseChanged { .. } => return None,
    };
    Some(message)
}

/// Distance to the nearest live orb, or to the finish once it is placed.
pub(crate) fn hint(session: &Session, player: CellCoord) -> String {
    let field = query::distance_field(session, player);

    if let Some(finish) = query::finish(session) {
        return match field.distance(finish) {
            Some(steps) => format!("The finish is {steps} steps away."),
            None => "The finish cannot be reached from here.".to_owned(),
        };
    }

    query::orbs(session)
        .filter_map(|orb| field.distance(orb.cell()))
        .min()
        .map_or_else(
            || "No orb can be reached from here.".to_owned(),
            |steps| format!("The nearest orb is {steps} steps away."),
        )
}
