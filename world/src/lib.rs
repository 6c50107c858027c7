#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state for Orb Maze.
//!
//! A [`Session`] owns the maze, the orbs, the question bank and both clocks.
//! Adapters drive it through [`Session::tick`] once per external time step and
//! read it back through the [`query`] module.

pub mod maze;
pub mod navigation;
pub mod orbs;
pub mod positions;

use std::time::Duration;

use log::{debug, info, warn};
use orb_maze_core::{
    CellCoord, Command, Event, OrbId, Outcome, Question, QuestionId, Resolution, SessionConfig,
};
use orb_maze_system_questions::QuestionBank;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{maze::MazeGrid, orbs::OrbRegistry};

/// Question interaction currently on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ActiveQuestion {
    orb: OrbId,
    question: QuestionId,
    remaining: f32,
}

/// What the session returns to when the pause is lifted.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Resume {
    Running,
    Question(ActiveQuestion),
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Running,
    Question(ActiveQuestion),
    Paused(Resume),
    Ended(Outcome),
}

impl From<Resume> for Phase {
    fn from(resume: Resume) -> Self {
        match resume {
            Resume::Running => Phase::Running,
            Resume::Question(active) => Phase::Question(active),
        }
    }
}

/// Represents one play-through: maze, orbs, questions and clocks.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    source: Vec<Question>,
    rng: ChaCha8Rng,
    maze: MazeGrid,
    player_spawn: CellCoord,
    orbs: OrbRegistry,
    bank: QuestionBank,
    phase: Phase,
    main_clock: f32,
    collected: u32,
    finish: Option<CellCoord>,
}

impl Session {
    /// Generates the maze and places the orbs for a new session.
    ///
    /// Every random decision, including those made after restarts, derives
    /// from `config.rng_seed`.
    #[must_use]
    pub fn new(config: SessionConfig, questions: Vec<Question>) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
        Self::build(config, questions, rng)
    }

    fn build(config: SessionConfig, source: Vec<Question>, mut rng: ChaCha8Rng) -> Self {
        let maze = MazeGrid::generate(config.width, config.height, &mut rng);
        let player_spawn = positions::open_cell_near_bottom(&maze);

        let orbs = match OrbRegistry::spawn_all(
            config.orb_count,
            &maze,
            config.time_added_by_orb,
            config.time_penalty,
            &mut rng,
        ) {
            Ok(orbs) => orbs,
            Err(error) => {
                warn!("placing no orbs: {error}");
                OrbRegistry::default()
            }
        };

        let bank = QuestionBank::new(source.clone());
        if bank.is_empty() {
            warn!("question bank is empty, orbs cannot be collected");
        }

        let mut session = Self {
            main_clock: config.game_time,
            config,
            source,
            rng,
            maze,
            player_spawn,
            orbs,
            bank,
            phase: Phase::Running,
            collected: 0,
            finish: None,
        };

        if session.orbs.is_empty() {
            session.finish = Some(positions::open_cell_near_top_right(&session.maze));
        }

        info!(
            "session ready: {}x{} maze, {} orbs, {} questions",
            session.maze.width(),
            session.maze.height(),
            session.orbs.len(),
            session.bank.len()
        );
        session
    }

    /// Advances the session by one external time step.
    ///
    /// Pause toggles take priority: a tick that carries one applies every
    /// toggle and nothing else, deferring clocks and other commands. Otherwise
    /// `dt` is charged to the phase the session was in when the tick began,
    /// expiry is evaluated, and only then are commands applied in order.
    pub fn tick(&mut self, dt: Duration, commands: &[Command], out_events: &mut Vec<Event>) {
        let (toggles, discarded): (Vec<&Command>, Vec<&Command>) = commands
            .iter()
            .partition(|command| matches!(command, Command::PauseToggled));
        if !toggles.is_empty() {
            for command in discarded {
                debug!("discarding {command:?} behind a pause toggle");
            }
            for _ in toggles {
                self.toggle_pause(out_events);
            }
            return;
        }

        self.advance_clocks(dt, out_events);

        for command in commands {
            if matches!(command, Command::RestartRequested) {
                self.restart(out_events);
                return;
            }
            self.apply(command, out_events);
        }

        self.check_main_clock(out_events);
    }

    fn apply(&mut self, command: &Command, out_events: &mut Vec<Event>) {
        match (self.phase, command) {
            (Phase::Running, Command::OrbTriggered { orb }) => self.begin_question(*orb, out_events),
            (Phase::Question(active), Command::AnswerSubmitted { orb, choice })
                if active.orb == *orb =>
            {
                self.resolve_answer(active, choice, out_events);
            }
            (Phase::Running, Command::FinishReached) if self.finish.is_some() => {
                self.end(Outcome::Won, out_events);
            }
            (phase, command) => debug!("ignoring {command:?} while {phase:?}"),
        }
    }

    fn toggle_pause(&mut self, out_events: &mut Vec<Event>) {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused(Resume::Running);
                out_events.push(Event::PauseChanged { paused: true });
                out_events.push(Event::PlayerMovementChanged { enabled: false });
            }
            Phase::Question(active) => {
                self.phase = Phase::Paused(Resume::Question(active));
                out_events.push(Event::PauseChanged { paused: true });
            }
            Phase::Paused(resume) => {
                self.phase = resume.into();
                out_events.push(Event::PauseChanged { paused: false });
                if resume == Resume::Running {
                    out_events.push(Event::PlayerMovementChanged { enabled: true });
                }
            }
            Phase::Ended(outcome) => debug!("ignoring pause toggle after {outcome:?}"),
        }
    }

    fn begin_question(&mut self, orb: OrbId, out_events: &mut Vec<Event>) {
        if self.orbs.live_mut(orb).is_none() {
            debug!("ignoring trigger for orb {} which is not in play", orb.get());
            return;
        }

        match self.bank.draw_random(&mut self.rng) {
            Ok(question) => {
                self.phase = Phase::Question(ActiveQuestion {
                    orb,
                    question,
                    remaining: self.config.question_time_limit,
                });
                out_events.push(Event::PlayerMovementChanged { enabled: false });
                out_events.push(Event::QuestionShown { orb, question });
            }
            Err(error) => {
                warn!("orb {}: {error}, respawning it without penalty", orb.get());
                out_events.push(Event::QuestionResolved {
                    orb,
                    resolution: Resolution::Unavailable,
                });
                self.respawn_orb(orb, out_events);
            }
        }
    }

    fn resolve_answer(&mut self, active: ActiveQuestion, choice: &str, out_events: &mut Vec<Event>) {
        let correct = self
            .bank
            .question(active.question)
            .is_some_and(|question| question.is_correct(choice));

        self.phase = Phase::Running;
        out_events.push(Event::PlayerMovementChanged { enabled: true });

        let Some(orb) = self.orbs.live_mut(active.orb) else {
            return;
        };

        if correct {
            self.main_clock += orb.time_reward();
            orb.collect();
            self.bank.mark_used(active.question);
            self.collected += 1;
            out_events.push(Event::QuestionResolved {
                orb: active.orb,
                resolution: Resolution::Correct,
            });
            out_events.push(Event::OrbCollected {
                orb: active.orb,
                collected: self.collected,
            });
            info!("orb {} collected ({} so far)", active.orb.get(), self.collected);

            if usize::try_from(self.collected).map_or(true, |count| count >= self.orbs.len()) {
                self.spawn_finish(out_events);
            }
        } else {
            let penalty = orb.time_penalty();
            self.apply_penalty(penalty);
            out_events.push(Event::QuestionResolved {
                orb: active.orb,
                resolution: Resolution::Incorrect,
            });
            self.respawn_orb(active.orb, out_events);
        }
    }

    fn expire_question(&mut self, active: ActiveQuestion, out_events: &mut Vec<Event>) {
        self.phase = Phase::Running;
        out_events.push(Event::PlayerMovementChanged { enabled: true });
        self.apply_penalty(self.config.question_time_penalty);
        out_events.push(Event::QuestionResolved {
            orb: active.orb,
            resolution: Resolution::TimedOut,
        });
        self.respawn_orb(active.orb, out_events);
    }

    fn respawn_orb(&mut self, orb: OrbId, out_events: &mut Vec<Event>) {
        let Some(entry) = self.orbs.live_mut(orb) else {
            return;
        };
        match entry.respawn(&self.maze, &mut self.rng) {
            Ok(cell) => out_events.push(Event::OrbRespawned { orb, cell }),
            Err(error) => warn!("orb {} stays in place: {error}", orb.get()),
        }
    }

    fn apply_penalty(&mut self, seconds: f32) {
        self.main_clock = (self.main_clock - seconds).max(0.0);
    }

    fn spawn_finish(&mut self, out_events: &mut Vec<Event>) {
        if self.finish.is_some() {
            return;
        }
        let cell = positions::open_cell_near_top_right(&self.maze);
        self.finish = Some(cell);
        info!("every orb collected, finish placed at {cell:?}");
        out_events.push(Event::FinishSpawned { cell });
    }

    fn advance_clocks(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let elapsed = dt.as_secs_f32();
        match self.phase {
            Phase::Running => self.main_clock -= elapsed,
            Phase::Question(mut active) => {
                active.remaining -= elapsed;
                if active.remaining <= 0.0 {
                    self.expire_question(active, out_events);
                } else {
                    self.phase = Phase::Question(active);
                }
            }
            Phase::Paused(_) | Phase::Ended(_) => return,
        }

        self.check_main_clock(out_events);
    }

    fn check_main_clock(&mut self, out_events: &mut Vec<Event>) {
        if self.phase == Phase::Running && self.main_clock <= 0.0 {
            self.main_clock = 0.0;
            self.end(Outcome::Lost, out_events);
        }
    }

    fn end(&mut self, outcome: Outcome, out_events: &mut Vec<Event>) {
        self.phase = Phase::Ended(outcome);
        info!("session ended: {outcome:?}");
        out_events.push(Event::PlayerMovementChanged { enabled: false });
        out_events.push(Event::SessionEnded { outcome });
    }

    fn restart(&mut self, out_events: &mut Vec<Event>) {
        let seed: u64 = self.rng.gen();
        let mut config = self.config.clone();
        config.rng_seed = seed;
        let source = std::mem::take(&mut self.source);
        *self = Self::build(config, source, ChaCha8Rng::seed_from_u64(seed));
        out_events.push(Event::SessionRestarted);
        out_events.push(Event::PlayerMovementChanged { enabled: true });
    }
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use orb_maze_core::{CellCoord, OrbId, Question, QuestionId, SessionConfig, SessionState};
    use orb_maze_system_questions::QuestionBank;

    use super::{Phase, Resume, Session};
    use crate::{maze::MazeGrid, navigation::DistanceField, orbs::Orb};

    /// Question on screen together with the time left to answer it.
    #[derive(Clone, Copy, Debug)]
    pub struct QuestionView<'a> {
        /// Orb the question belongs to.
        pub orb: OrbId,
        /// Identifier of the question inside the bank.
        pub id: QuestionId,
        /// Prompt and choices to display.
        pub question: &'a Question,
        /// Seconds left on the question clock.
        pub remaining: f32,
    }

    /// Current state of the session.
    #[must_use]
    pub fn state(session: &Session) -> SessionState {
        match session.phase {
            Phase::Running => SessionState::Running,
            Phase::Question(_) => SessionState::QuestionActive,
            Phase::Paused(_) => SessionState::Paused,
            Phase::Ended(outcome) => SessionState::Ended(outcome),
        }
    }

    /// Seconds left on the main clock.
    #[must_use]
    pub fn main_clock(session: &Session) -> f32 {
        session.main_clock
    }

    /// Seconds left on the question clock while a question is on screen,
    /// including while paused over one.
    #[must_use]
    pub fn question_clock(session: &Session) -> Option<f32> {
        active_question(session).map(|view| view.remaining)
    }

    /// Question on screen, including while paused over one.
    #[must_use]
    pub fn active_question(session: &Session) -> Option<QuestionView<'_>> {
        let active = match session.phase {
            Phase::Question(active) | Phase::Paused(Resume::Question(active)) => active,
            _ => return None,
        };
        session
            .bank
            .question(active.question)
            .map(|question| QuestionView {
                orb: active.orb,
                id: active.question,
                question,
                remaining: active.remaining,
            })
    }

    /// Whether the player may currently move.
    #[must_use]
    pub fn movement_enabled(session: &Session) -> bool {
        session.phase == Phase::Running
    }

    /// Number of orbs collected so far.
    #[must_use]
    pub fn collected_orbs(session: &Session) -> u32 {
        session.collected
    }

    /// Number of orbs that were placed at session start.
    #[must_use]
    pub fn orb_total(session: &Session) -> usize {
        session.orbs.len()
    }

    /// Iterates over the orbs still in play.
    pub fn orbs(session: &Session) -> impl Iterator<Item = &Orb> {
        session.orbs.alive()
    }

    /// Looks up an orb, dead or alive.
    #[must_use]
    pub fn orb(session: &Session, id: OrbId) -> Option<&Orb> {
        session.orbs.get(id)
    }

    /// First live orb sitting on `cell`, if any.
    #[must_use]
    pub fn orb_at(session: &Session, cell: CellCoord) -> Option<OrbId> {
        session
            .orbs
            .alive()
            .find(|orb| orb.cell() == cell)
            .map(Orb::id)
    }

    /// Cell holding the finish once it has been placed.
    #[must_use]
    pub fn finish(session: &Session) -> Option<CellCoord> {
        session.finish
    }

    /// Cell where the player starts.
    #[must_use]
    pub fn player_spawn(session: &Session) -> CellCoord {
        session.player_spawn
    }

    /// Provides read-only access to the maze.
    #[must_use]
    pub fn maze(session: &Session) -> &MazeGrid {
        &session.maze
    }

    /// Provides read-only access to the question bank.
    #[must_use]
    pub fn question_bank(session: &Session) -> &QuestionBank {
        &session.bank
    }

    /// Configuration the session was built from.
    #[must_use]
    pub fn config(session: &Session) -> &SessionConfig {
        &session.config
    }

    /// Breadth-first step distances through the maze from `source`.
    #[must_use]
    pub fn distance_field(session: &Session, source: CellCoord) -> DistanceField {
        DistanceField::from_source(&session.maze, source)
    }
}
