//! Game sessions: per-mode state, answer evaluation, and feedback timing.
//!
//! A [`GameSession`] owns one [`Game`] plus the [`Timeline`] its delayed
//! callbacks run on. All state changes happen either in an input method
//! (`tap`, `select_choice`, ...) or while [`GameSession::advance`] fires due
//! timers. Each round runs under its own [`Token`]; moving to a new round
//! cancels the previous token's timers.

use std::collections::BTreeSet;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::EngineError;
use crate::model::GameMode;
use crate::rounds::{
    object_for, ChoiceRound, MatchGenerator, MissingGenerator, RoundGenerator, MAX_NUMBER,
};
use crate::timeline::{Timeline, Timings, Token};

/// Transient feedback shown over a round. Only one can be active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feedback {
    #[default]
    Idle,
    Success,
    TryAgain,
}

impl Feedback {
    pub fn show_success(&self) -> bool {
        *self == Feedback::Success
    }

    pub fn show_try_again(&self) -> bool {
        *self == Feedback::TryAgain
    }
}

/// Result of submitting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// The round is closed while its success message is showing.
    Ignored,
}

/// Result of tapping an object in the tap-to-count game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Already tapped, out of range, or the level is already complete.
    Ignored,
    /// Tap counted; holds the number of objects tapped so far.
    Counted(usize),
    /// The last object of the level was tapped.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerEvent {
    RevealTick,
    SuccessElapsed,
    TryAgainElapsed,
    CycleReset,
}

/// Borrowed scheduling state handed to the per-mode handlers.
struct Ctx<'a> {
    timeline: &'a mut Timeline<TimerEvent>,
    round: &'a mut Token,
    timings: Timings,
    rng: &'a mut StdRng,
}

impl Ctx<'_> {
    fn schedule(&mut self, delay: Duration, event: TimerEvent) {
        self.timeline.schedule(delay, *self.round, event);
    }

    /// Retire the current round's token and its pending timers.
    fn next_round(&mut self) {
        let dropped = self.timeline.cancel(*self.round);
        *self.round = self.timeline.issue_token();
        tracing::debug!(dropped, "round superseded");
    }
}

// ---------------------------------------------------------------------------
// Counting
// ---------------------------------------------------------------------------

/// Step through 1..=10 while the objects for the current number appear one
/// by one.
#[derive(Debug, Clone)]
pub struct CountingGame {
    current: u32,
    visible: u32,
}

impl CountingGame {
    fn new(ctx: &mut Ctx<'_>) -> Self {
        let mut game = Self {
            current: 1,
            visible: 0,
        };
        game.restart_reveal(ctx);
        game
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    /// Number of objects revealed so far, `0..=current`.
    pub fn visible(&self) -> u32 {
        self.visible
    }

    pub fn object(&self) -> &'static str {
        object_for(self.current)
    }

    pub fn can_go_next(&self) -> bool {
        self.current < MAX_NUMBER
    }

    pub fn can_go_previous(&self) -> bool {
        self.current > 1
    }

    fn step(&mut self, forward: bool, ctx: &mut Ctx<'_>) -> bool {
        let moved = if forward && self.can_go_next() {
            self.current += 1;
            true
        } else if !forward && self.can_go_previous() {
            self.current -= 1;
            true
        } else {
            false
        };
        if moved {
            self.restart_reveal(ctx);
        }
        moved
    }

    fn restart_reveal(&mut self, ctx: &mut Ctx<'_>) {
        ctx.next_round();
        self.visible = 0;
        ctx.schedule(ctx.timings.reveal_tick, TimerEvent::RevealTick);
    }

    fn on_timer(&mut self, event: TimerEvent, ctx: &mut Ctx<'_>) {
        if event != TimerEvent::RevealTick {
            return;
        }
        if self.visible < self.current {
            self.visible += 1;
        }
        if self.visible < self.current {
            ctx.schedule(ctx.timings.reveal_tick, TimerEvent::RevealTick);
        }
    }
}

// ---------------------------------------------------------------------------
// Tap to count
// ---------------------------------------------------------------------------

/// Tap each of `level` objects once; levels climb to 10 and then wrap.
#[derive(Debug, Clone)]
pub struct TapCountGame {
    level: u32,
    tapped: BTreeSet<usize>,
    feedback: Feedback,
}

impl TapCountGame {
    fn new() -> Self {
        Self {
            level: 1,
            tapped: BTreeSet::new(),
            feedback: Feedback::Idle,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn tapped_count(&self) -> usize {
        self.tapped.len()
    }

    pub fn is_tapped(&self, index: usize) -> bool {
        self.tapped.contains(&index)
    }

    pub fn object(&self) -> &'static str {
        object_for(self.level)
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    fn tap(&mut self, index: usize, ctx: &mut Ctx<'_>) -> TapOutcome {
        if self.feedback.show_success() || index >= self.level as usize {
            return TapOutcome::Ignored;
        }
        if !self.tapped.insert(index) {
            return TapOutcome::Ignored;
        }
        if self.tapped.len() == self.level as usize {
            self.feedback = Feedback::Success;
            ctx.schedule(ctx.timings.success_window, TimerEvent::SuccessElapsed);
            tracing::debug!(level = self.level, "tap level complete");
            TapOutcome::Completed
        } else {
            TapOutcome::Counted(self.tapped.len())
        }
    }

    fn on_timer(&mut self, event: TimerEvent, ctx: &mut Ctx<'_>) {
        match event {
            TimerEvent::SuccessElapsed if self.level < MAX_NUMBER => {
                self.level += 1;
                self.reset_level(ctx);
            }
            // Top level: keep celebrating for another window, then wrap.
            TimerEvent::SuccessElapsed => {
                ctx.schedule(ctx.timings.success_window, TimerEvent::CycleReset);
            }
            TimerEvent::CycleReset => {
                self.level = 1;
                self.reset_level(ctx);
            }
            _ => {}
        }
    }

    fn reset_level(&mut self, ctx: &mut Ctx<'_>) {
        self.tapped.clear();
        self.feedback = Feedback::Idle;
        ctx.next_round();
    }
}

// ---------------------------------------------------------------------------
// Choice games (match the number, missing number)
// ---------------------------------------------------------------------------

/// A game where each round offers choices and exactly one is right.
#[derive(Debug, Clone)]
pub struct ChoiceGame<G: RoundGenerator> {
    generator: G,
    round: G::Round,
    round_number: u32,
    feedback: Feedback,
    correct: u32,
    attempts: u32,
}

impl<G: RoundGenerator> ChoiceGame<G> {
    fn new(generator: G, ctx: &mut Ctx<'_>) -> Self {
        let round = generator.generate(&mut *ctx.rng);
        Self {
            generator,
            round,
            round_number: 1,
            feedback: Feedback::Idle,
            correct: 0,
            attempts: 0,
        }
    }

    pub fn round(&self) -> &G::Round {
        &self.round
    }

    /// 1-based count of rounds generated in this session.
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    /// Correct answers given this session.
    pub fn correct(&self) -> u32 {
        self.correct
    }

    /// Answers evaluated this session (ignored submissions excluded).
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    fn submit_answer(&mut self, is_correct: bool, ctx: &mut Ctx<'_>) -> Verdict {
        if self.feedback.show_success() {
            return Verdict::Ignored;
        }
        // A new answer replaces any try-again message still showing.
        ctx.timeline
            .cancel_where(|e| *e == TimerEvent::TryAgainElapsed);
        self.attempts += 1;

        if is_correct {
            self.correct += 1;
            self.feedback = Feedback::Success;
            ctx.schedule(ctx.timings.success_window, TimerEvent::SuccessElapsed);
            Verdict::Correct
        } else {
            self.feedback = Feedback::TryAgain;
            ctx.schedule(ctx.timings.try_again_window, TimerEvent::TryAgainElapsed);
            Verdict::Incorrect
        }
    }

    fn on_timer(&mut self, event: TimerEvent, ctx: &mut Ctx<'_>) {
        match event {
            TimerEvent::SuccessElapsed => {
                ctx.next_round();
                self.feedback = Feedback::Idle;
                self.round = self.generator.generate(&mut *ctx.rng);
                self.round_number += 1;
            }
            TimerEvent::TryAgainElapsed if self.feedback.show_try_again() => {
                self.feedback = Feedback::Idle;
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The active game, one variant per mode.
#[derive(Debug, Clone)]
pub enum Game {
    Counting(CountingGame),
    TapCount(TapCountGame),
    MatchNumber(ChoiceGame<MatchGenerator>),
    MissingNumber(ChoiceGame<MissingGenerator>),
}

impl Game {
    pub fn mode(&self) -> GameMode {
        match self {
            Game::Counting(_) => GameMode::Counting,
            Game::TapCount(_) => GameMode::TapCount,
            Game::MatchNumber(_) => GameMode::MatchNumber,
            Game::MissingNumber(_) => GameMode::MissingNumber,
        }
    }

    pub fn feedback(&self) -> Feedback {
        match self {
            Game::Counting(_) => Feedback::Idle,
            Game::TapCount(game) => game.feedback(),
            Game::MatchNumber(game) => game.feedback(),
            Game::MissingNumber(game) => game.feedback(),
        }
    }
}

/// One play-through of a single game mode.
#[derive(Debug)]
pub struct GameSession {
    game: Game,
    timeline: Timeline<TimerEvent>,
    round: Token,
    timings: Timings,
    rng: StdRng,
}

impl GameSession {
    pub fn new(mode: GameMode, timings: Timings, mut rng: StdRng) -> Self {
        let mut timeline = Timeline::new();
        let mut round = timeline.issue_token();
        let mut ctx = Ctx {
            timeline: &mut timeline,
            round: &mut round,
            timings,
            rng: &mut rng,
        };
        let game = match mode {
            GameMode::Counting => Game::Counting(CountingGame::new(&mut ctx)),
            GameMode::TapCount => Game::TapCount(TapCountGame::new()),
            GameMode::MatchNumber => Game::MatchNumber(ChoiceGame::new(MatchGenerator, &mut ctx)),
            GameMode::MissingNumber => {
                Game::MissingNumber(ChoiceGame::new(MissingGenerator, &mut ctx))
            }
        };
        tracing::info!(%mode, "game session started");
        Self {
            game,
            timeline,
            round,
            timings,
            rng,
        }
    }

    /// Deterministic session, for tests and replays.
    pub fn with_seed(mode: GameMode, timings: Timings, seed: u64) -> Self {
        Self::new(mode, timings, StdRng::seed_from_u64(seed))
    }

    pub fn mode(&self) -> GameMode {
        self.game.mode()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn feedback(&self) -> Feedback {
        self.game.feedback()
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    /// Token of the round currently on screen.
    pub fn round_token(&self) -> Token {
        self.round
    }

    /// Session-relative time.
    pub fn now(&self) -> Duration {
        self.timeline.now()
    }

    /// When the next scheduled callback is due, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timeline.next_deadline()
    }

    pub fn next_number(&mut self) -> Result<bool, EngineError> {
        self.counting_step(true, "go to the next number")
    }

    pub fn previous_number(&mut self) -> Result<bool, EngineError> {
        self.counting_step(false, "go to the previous number")
    }

    pub fn tap(&mut self, index: usize) -> Result<TapOutcome, EngineError> {
        let (game, mut ctx) = self.split();
        match game {
            Game::TapCount(game) => Ok(game.tap(index, &mut ctx)),
            other => Err(unsupported(other, "tap an object")),
        }
    }

    /// Pick the choice at `index` in display order.
    pub fn select_choice(&mut self, index: usize) -> Result<Verdict, EngineError> {
        let correct = match &self.game {
            Game::MatchNumber(game) => game.round().choices().get(index).map(|c| c.correct),
            Game::MissingNumber(game) => game.round().choices().get(index).map(|c| c.correct),
            other => return Err(unsupported(other, "select a choice")),
        };
        match correct {
            Some(correct) => self.submit_answer(correct),
            None => {
                tracing::warn!(index, "choice index out of range");
                Ok(Verdict::Ignored)
            }
        }
    }

    /// Evaluate an answer for the current round.
    pub fn submit_answer(&mut self, is_correct: bool) -> Result<Verdict, EngineError> {
        let (game, mut ctx) = self.split();
        let verdict = match game {
            Game::MatchNumber(game) => game.submit_answer(is_correct, &mut ctx),
            Game::MissingNumber(game) => game.submit_answer(is_correct, &mut ctx),
            other => return Err(unsupported(other, "submit an answer")),
        };
        tracing::debug!(?verdict, "answer evaluated");
        Ok(verdict)
    }

    /// Let `by` pass, firing every callback that falls due.
    pub fn advance(&mut self, by: Duration) -> usize {
        let until = self.timeline.now() + by;
        self.advance_to(until)
    }

    /// Move session time forward to `until`. Returns the number of
    /// callbacks that fired.
    pub fn advance_to(&mut self, until: Duration) -> usize {
        let mut fired = 0;
        while let Some((token, event)) = self.timeline.pop_due(until) {
            if token != self.round {
                tracing::debug!(?event, "stale timer dropped");
                continue;
            }
            let (game, mut ctx) = self.split();
            match game {
                Game::Counting(game) => game.on_timer(event, &mut ctx),
                Game::TapCount(game) => game.on_timer(event, &mut ctx),
                Game::MatchNumber(game) => game.on_timer(event, &mut ctx),
                Game::MissingNumber(game) => game.on_timer(event, &mut ctx),
            }
            fired += 1;
        }
        self.timeline.settle(until);
        fired
    }

    fn counting_step(&mut self, forward: bool, action: &'static str) -> Result<bool, EngineError> {
        let (game, mut ctx) = self.split();
        match game {
            Game::Counting(game) => Ok(game.step(forward, &mut ctx)),
            other => Err(unsupported(other, action)),
        }
    }

    fn split(&mut self) -> (&mut Game, Ctx<'_>) {
        (
            &mut self.game,
            Ctx {
                timeline: &mut self.timeline,
                round: &mut self.round,
                timings: self.timings,
                rng: &mut self.rng,
            },
        )
    }
}

fn unsupported(game: &Game, action: &'static str) -> EngineError {
    EngineError::UnsupportedAction {
        mode: game.mode().as_str(),
        action,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(400);
    const SUCCESS: Duration = Duration::from_millis(2000);
    const TRY_AGAIN: Duration = Duration::from_millis(1500);

    fn session(mode: GameMode) -> GameSession {
        GameSession::with_seed(mode, Timings::default(), 42)
    }

    fn counting(session: &GameSession) -> &CountingGame {
        match session.game() {
            Game::Counting(game) => game,
            other => panic!("expected counting, got {:?}", other.mode()),
        }
    }

    fn tap_game(session: &GameSession) -> &TapCountGame {
        match session.game() {
            Game::TapCount(game) => game,
            other => panic!("expected tapCount, got {:?}", other.mode()),
        }
    }

    fn match_game(session: &GameSession) -> &ChoiceGame<MatchGenerator> {
        match session.game() {
            Game::MatchNumber(game) => game,
            other => panic!("expected matchNumber, got {:?}", other.mode()),
        }
    }

    fn correct_index(session: &GameSession) -> usize {
        let choices = match session.game() {
            Game::MatchNumber(game) => game.round().choices(),
            Game::MissingNumber(game) => game.round().choices(),
            other => panic!("not a choice game: {:?}", other.mode()),
        };
        choices.iter().position(|c| c.correct).unwrap()
    }

    fn wrong_index(session: &GameSession) -> usize {
        let right = correct_index(session);
        (0..3).find(|i| *i != right).unwrap()
    }

    // --- counting ---

    #[test]
    fn counting_stays_within_bounds() {
        let mut s = session(GameMode::Counting);
        assert_eq!(s.previous_number(), Ok(false));
        assert_eq!(counting(&s).current(), 1);

        for _ in 0..15 {
            s.next_number().unwrap();
        }
        assert_eq!(counting(&s).current(), 10);
        assert!(!counting(&s).can_go_next());
        assert_eq!(s.next_number(), Ok(false));

        for _ in 0..15 {
            s.previous_number().unwrap();
        }
        assert_eq!(counting(&s).current(), 1);
    }

    #[test]
    fn reveal_shows_exactly_n_objects() {
        let mut s = session(GameMode::Counting);
        for _ in 0..4 {
            s.next_number().unwrap();
        }
        assert_eq!(counting(&s).current(), 5);
        assert_eq!(counting(&s).visible(), 0);

        for i in 1..=5 {
            s.advance(TICK);
            assert_eq!(counting(&s).visible(), i);
        }
        s.advance(Duration::from_secs(60));
        assert_eq!(counting(&s).visible(), 5);
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn reveal_object_i_appears_at_i_ticks() {
        let mut s = session(GameMode::Counting);
        s.next_number().unwrap();
        s.next_number().unwrap();
        s.advance(TICK * 2 - Duration::from_millis(1));
        assert_eq!(counting(&s).visible(), 1);
        s.advance(Duration::from_millis(1));
        assert_eq!(counting(&s).visible(), 2);
    }

    #[test]
    fn count_change_restarts_reveal() {
        let mut s = session(GameMode::Counting);
        for _ in 0..5 {
            s.next_number().unwrap();
        }
        s.advance(TICK * 3);
        assert_eq!(counting(&s).visible(), 3);

        let before = s.round_token();
        s.previous_number().unwrap();
        assert_ne!(s.round_token(), before);
        assert_eq!(counting(&s).visible(), 0);

        // The old chain's next tick was due 400ms after the last one; only
        // the new chain may drive the count.
        s.advance(TICK);
        assert_eq!(counting(&s).visible(), 1);
        s.advance(Duration::from_secs(30));
        assert_eq!(counting(&s).visible(), 5);
    }

    #[test]
    fn counting_rejects_answers() {
        let mut s = session(GameMode::Counting);
        assert!(matches!(
            s.submit_answer(true),
            Err(EngineError::UnsupportedAction { .. })
        ));
        assert!(s.tap(0).is_err());
    }

    // --- tap to count ---

    #[test]
    fn tap_requires_level_unique_taps() {
        let mut s = session(GameMode::TapCount);
        // Level 1 -> 2.
        assert_eq!(s.tap(0), Ok(TapOutcome::Completed));
        s.advance(SUCCESS);
        assert_eq!(tap_game(&s).level(), 2);

        // Level 2 -> 3.
        s.tap(0).unwrap();
        s.tap(1).unwrap();
        s.advance(SUCCESS);
        assert_eq!(tap_game(&s).level(), 3);

        assert_eq!(s.tap(1), Ok(TapOutcome::Counted(1)));
        assert_eq!(s.tap(1), Ok(TapOutcome::Ignored));
        assert_eq!(tap_game(&s).tapped_count(), 1);
        assert_eq!(s.tap(7), Ok(TapOutcome::Ignored));
        assert_eq!(s.tap(0), Ok(TapOutcome::Counted(2)));
        assert_eq!(s.feedback(), Feedback::Idle);
        assert_eq!(s.tap(2), Ok(TapOutcome::Completed));
        assert!(s.feedback().show_success());
    }

    #[test]
    fn tap_success_window_gates_the_next_level() {
        let mut s = session(GameMode::TapCount);
        s.tap(0).unwrap();
        s.advance(SUCCESS - Duration::from_millis(1));
        assert_eq!(tap_game(&s).level(), 1);
        assert!(s.feedback().show_success());
        s.advance(Duration::from_millis(1));
        assert_eq!(tap_game(&s).level(), 2);
        assert_eq!(tap_game(&s).tapped_count(), 0);
        assert_eq!(s.feedback(), Feedback::Idle);
    }

    #[test]
    fn tap_wraps_after_level_ten() {
        let mut s = session(GameMode::TapCount);
        for level in 1..=10 {
            assert_eq!(tap_game(&s).level(), level);
            for i in 0..level as usize {
                s.tap(i).unwrap();
            }
            if level < 10 {
                s.advance(SUCCESS);
            }
        }
        assert!(s.feedback().show_success());

        // Success is held for a second window before wrapping.
        s.advance(SUCCESS);
        assert_eq!(tap_game(&s).level(), 10);
        assert!(s.feedback().show_success());
        assert_eq!(s.tap(3), Ok(TapOutcome::Ignored));

        s.advance(SUCCESS);
        assert_eq!(tap_game(&s).level(), 1);
        assert_eq!(tap_game(&s).tapped_count(), 0);
        assert_eq!(s.feedback(), Feedback::Idle);
    }

    // --- choice games ---

    #[test]
    fn correct_answer_leads_to_a_fresh_round() {
        let mut s = session(GameMode::MatchNumber);
        let token = s.round_token();
        let idx = correct_index(&s);
        assert_eq!(s.select_choice(idx), Ok(Verdict::Correct));
        assert!(s.feedback().show_success());

        s.advance(SUCCESS - Duration::from_millis(1));
        assert_eq!(match_game(&s).round_number(), 1);

        s.advance(Duration::from_millis(1));
        assert_eq!(match_game(&s).round_number(), 2);
        assert_eq!(s.feedback(), Feedback::Idle);
        assert_ne!(s.round_token(), token);
        assert!((3..=8).contains(&match_game(&s).round().target));
    }

    #[test]
    fn submissions_during_success_are_ignored() {
        let mut s = session(GameMode::MissingNumber);
        s.submit_answer(true).unwrap();
        assert_eq!(s.submit_answer(true), Ok(Verdict::Ignored));
        assert_eq!(s.submit_answer(false), Ok(Verdict::Ignored));
        assert!(s.feedback().show_success());
        // Only one new round comes out of it.
        assert_eq!(s.advance(SUCCESS * 3), 1);
    }

    #[test]
    fn wrong_answer_keeps_the_round() {
        let mut s = session(GameMode::MatchNumber);
        let round = match_game(&s).round().clone();
        let idx = wrong_index(&s);
        assert_eq!(s.select_choice(idx), Ok(Verdict::Incorrect));
        assert!(s.feedback().show_try_again());
        assert!(!s.feedback().show_success());

        s.advance(TRY_AGAIN);
        assert_eq!(s.feedback(), Feedback::Idle);
        assert_eq!(match_game(&s).round(), &round);
        assert_eq!(match_game(&s).round_number(), 1);

        let idx = correct_index(&s);
        assert_eq!(s.select_choice(idx), Ok(Verdict::Correct));
        assert_eq!(match_game(&s).attempts(), 2);
        assert_eq!(match_game(&s).correct(), 1);
    }

    #[test]
    fn correct_answer_during_try_again_switches_to_success() {
        let mut s = session(GameMode::MissingNumber);
        s.submit_answer(false).unwrap();
        s.advance(Duration::from_millis(500));
        s.submit_answer(true).unwrap();
        assert!(s.feedback().show_success());

        // The cancelled try-again timer must not clear the success message.
        s.advance(Duration::from_millis(1000));
        assert!(s.feedback().show_success());
        s.advance(Duration::from_millis(1000));
        assert_eq!(s.feedback(), Feedback::Idle);
    }

    #[test]
    fn repeated_wrong_answer_restarts_try_again_window() {
        let mut s = session(GameMode::MatchNumber);
        s.submit_answer(false).unwrap();
        s.advance(Duration::from_millis(1000));
        s.submit_answer(false).unwrap();
        s.advance(Duration::from_millis(1000));
        assert!(s.feedback().show_try_again());
        s.advance(Duration::from_millis(500));
        assert_eq!(s.feedback(), Feedback::Idle);
    }

    #[test]
    fn many_correct_answers_keep_generating_rounds() {
        let mut s = session(GameMode::MissingNumber);
        for n in 1..=50 {
            let idx = correct_index(&s);
            s.select_choice(idx).unwrap();
            s.advance(SUCCESS);
            assert_eq!(s.feedback(), Feedback::Idle);
            match s.game() {
                Game::MissingNumber(game) => assert_eq!(game.round_number(), n + 1),
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn out_of_range_choice_is_ignored() {
        let mut s = session(GameMode::MatchNumber);
        assert_eq!(s.select_choice(9), Ok(Verdict::Ignored));
        assert_eq!(s.feedback(), Feedback::Idle);
    }

    #[test]
    fn custom_timings_are_respected() {
        let timings = Timings {
            reveal_tick: Duration::from_millis(10),
            success_window: Duration::from_millis(20),
            try_again_window: Duration::from_millis(5),
        };
        let mut s = GameSession::with_seed(GameMode::MatchNumber, timings, 1);
        s.submit_answer(true).unwrap();
        s.advance(Duration::from_millis(20));
        assert_eq!(match_game(&s).round_number(), 2);
    }
}
