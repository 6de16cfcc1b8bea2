//! Round lifecycle and scoring.
//!
//! The engine holds exactly one round at a time together with the score that
//! spans rounds. It performs no I/O: the country pool is handed in once it has
//! been fetched, and timer ticks are delivered by the caller.

/// Random index sources.
pub mod random;
mod round;

use tracing::{debug, info};

use crate::models::Country;

pub use random::{FixedSequence, RandomSource, StdRandom};
pub use round::{
    GuessOutcome, HintOutcome, RoundState, TickOutcome, CORRECT_BONUS_SECONDS, CORRECT_POINTS,
    HINT_PENALTY_SECONDS, MAX_HINTS, ROUND_SECONDS, WRONG_PENALTY,
};

/// Drives rounds over a fixed pool of countries.
pub struct RoundEngine<R> {
    pool: Vec<Country>,
    round: RoundState,
    score: u32,
    random: R,
}

impl<R: RandomSource> RoundEngine<R> {
    /// Create an engine with no pool; every operation is a no-op until
    /// [`RoundEngine::load_pool`] is called.
    pub fn new(random: R) -> Self {
        Self {
            pool: Vec::new(),
            round: RoundState::default(),
            score: 0,
            random,
        }
    }

    /// Install the country pool, dropping unplayable records, and start the
    /// first round. Returns how many countries were kept.
    pub fn load_pool(&mut self, countries: Vec<Country>) -> usize {
        let total = countries.len();
        self.pool = countries
            .into_iter()
            .filter(Country::is_playable)
            .collect();
        if self.pool.len() < total {
            debug!(dropped = total - self.pool.len(), "Filtered unplayable countries");
        }
        if self.pool.is_empty() {
            self.round = RoundState {
                round_id: self.round.round_id,
                ..RoundState::default()
            };
        }
        self.start_round();
        self.pool.len()
    }

    /// Whether a round is in progress.
    pub fn is_ready(&self) -> bool {
        self.round.selected.is_some()
    }

    /// Countries available for selection.
    pub fn pool(&self) -> &[Country] {
        &self.pool
    }

    /// Current round.
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// Identifier of the current round.
    pub fn round_id(&self) -> u64 {
        self.round.round_id
    }

    /// Running score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Pick a new country and restore the clock and hint budget.
    /// Does nothing while the pool is empty.
    pub fn start_round(&mut self) {
        if self.pool.is_empty() {
            return;
        }
        let index = self.random.pick(self.pool.len());
        let selected = self.pool[index].clone();
        let round_id = self.round.round_id.wrapping_add(1);
        debug!(round_id, country = %selected.name, "Round started");
        self.round = RoundState::begin(round_id, selected);
    }

    /// Replace the guess text.
    pub fn set_guess(&mut self, text: impl Into<String>) {
        self.round.guess = text.into();
    }

    /// Append a character to the guess text.
    pub fn push_guess_char(&mut self, ch: char) {
        self.round.guess.push(ch);
    }

    /// Remove the last character of the guess text.
    pub fn pop_guess_char(&mut self) {
        self.round.guess.pop();
    }

    /// Submit the text typed so far.
    pub fn submit_current_guess(&mut self) -> GuessOutcome {
        let text = std::mem::take(&mut self.round.guess);
        self.submit_guess(&text)
    }

    /// Compare `text` to the answer, ignoring case but not whitespace.
    ///
    /// A match scores [`CORRECT_POINTS`] and starts the next round; a miss
    /// costs [`WRONG_PENALTY`] without going below zero. The guess text is
    /// cleared either way.
    pub fn submit_guess(&mut self, text: &str) -> GuessOutcome {
        self.round.guess.clear();
        let Some(country) = self.round.selected.as_ref() else {
            return GuessOutcome::NotReady;
        };
        if self.round.is_locked() {
            return GuessOutcome::Locked;
        }

        if text.to_lowercase() != country.name.to_lowercase() {
            self.score = self.score.saturating_sub(WRONG_PENALTY);
            debug!(score = self.score, "Incorrect guess");
            return GuessOutcome::Incorrect;
        }

        let answer = country.clone();
        self.score = self.score.saturating_add(CORRECT_POINTS);
        // The bonus is overwritten by the new round's clock.
        self.round.remaining_seconds = self
            .round
            .remaining_seconds
            .saturating_add(CORRECT_BONUS_SECONDS);
        info!(country = %answer.name, score = self.score, "Correct guess");
        self.start_round();
        GuessOutcome::Correct { answer }
    }

    /// Reveal one more leading character of the answer at the cost of
    /// [`HINT_PENALTY_SECONDS`].
    ///
    /// Spending the last hint locks the round; it is forfeited and the next
    /// round starts before this returns [`HintOutcome::Exhausted`].
    pub fn request_hint(&mut self) -> HintOutcome {
        let Some(answer) = self.round.selected.clone() else {
            return HintOutcome::NotReady;
        };

        if !self.round.is_locked() {
            let revealed = self.round.hint.chars().count();
            if revealed >= answer.name.chars().count() {
                return HintOutcome::FullyRevealed;
            }
            self.round.hint = answer.name.chars().take(revealed + 1).collect();
            self.round.hints_consumed += 1;
            self.round.remaining_seconds = self
                .round
                .remaining_seconds
                .saturating_sub(HINT_PENALTY_SECONDS);
            debug!(
                hints_consumed = self.round.hints_consumed,
                remaining = self.round.remaining_seconds,
                "Hint revealed"
            );
        }

        if self.round.is_locked() {
            let hint = std::mem::take(&mut self.round.hint);
            info!(country = %answer.name, "Hint budget exhausted");
            self.start_round();
            return HintOutcome::Exhausted { hint, answer };
        }

        HintOutcome::Revealed {
            hint: self.round.hint.clone(),
            hints_left: self.round.hints_left(),
        }
    }

    /// Advance the clock by one second. At zero the round is forfeited without
    /// penalty and the next one starts.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(country) = self.round.selected.as_ref() else {
            return TickOutcome::NotReady;
        };
        self.round.remaining_seconds = self.round.remaining_seconds.saturating_sub(1);
        if self.round.remaining_seconds > 0 {
            return TickOutcome::Running {
                remaining: self.round.remaining_seconds,
            };
        }

        let answer = country.clone();
        info!(country = %answer.name, "Round timed out");
        self.start_round();
        TickOutcome::Expired { answer }
    }

    /// Tick only if `round_id` still names the current round.
    pub fn tick_round(&mut self, round_id: u64) -> TickOutcome {
        if !self.is_ready() {
            return TickOutcome::NotReady;
        }
        if round_id != self.round.round_id {
            return TickOutcome::Stale;
        }
        self.tick()
    }

    /// Zero the score and start a fresh round.
    pub fn reset(&mut self) {
        self.score = 0;
        self.start_round();
    }

    /// Zero the score, leaving the round untouched.
    pub fn clear_score(&mut self) {
        self.score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn france() -> Vec<Country> {
        vec![Country::new("France", "f.png")]
    }

    fn engine_with(pool: Vec<Country>, picks: Vec<usize>) -> RoundEngine<FixedSequence> {
        let mut engine = RoundEngine::new(FixedSequence::new(picks));
        engine.load_pool(pool);
        engine
    }

    #[test]
    fn operations_are_inert_before_pool_loads() {
        let mut engine = RoundEngine::new(FixedSequence::new(vec![0]));
        engine.start_round();
        assert!(!engine.is_ready());
        assert_eq!(engine.submit_guess("France"), GuessOutcome::NotReady);
        assert_eq!(engine.request_hint(), HintOutcome::NotReady);
        assert_eq!(engine.tick(), TickOutcome::NotReady);
        assert_eq!(engine.tick_round(0), TickOutcome::NotReady);
        engine.reset();
        assert!(engine.round().selected().is_none());
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn empty_pool_leaves_engine_not_ready() {
        let mut engine = RoundEngine::new(FixedSequence::new(vec![0]));
        let kept = engine.load_pool(vec![Country::new("", "x.png"), Country::new("Chad", " ")]);
        assert_eq!(kept, 0);
        assert!(engine.pool().is_empty());
        assert!(!engine.is_ready());

        let kept = engine.load_pool(vec![Country::new("", "x.png"), Country::new("Chad", "t.png")]);
        assert_eq!(kept, 1);
        assert_eq!(engine.pool().len(), 1);
        assert_eq!(engine.pool()[0].name, "Chad");
    }

    #[test]
    fn start_round_uses_random_source() {
        let pool = vec![
            Country::new("France", "f.png"),
            Country::new("Germany", "g.png"),
            Country::new("Japan", "j.png"),
        ];
        let mut engine = engine_with(pool, vec![2, 1]);
        assert_eq!(engine.round().selected().map(|c| c.name.as_str()), Some("Japan"));
        let first_id = engine.round_id();
        engine.start_round();
        assert_eq!(engine.round().selected().map(|c| c.name.as_str()), Some("Germany"));
        assert_eq!(engine.round_id(), first_id + 1);
        assert_eq!(engine.round().remaining_seconds(), ROUND_SECONDS);
    }

    #[test]
    fn correct_guess_scores_and_starts_new_round() {
        let mut engine = engine_with(france(), vec![0]);
        let first_id = engine.round_id();
        assert_eq!(engine.round().remaining_seconds(), 15);

        let outcome = engine.submit_guess("france");
        assert!(matches!(outcome, GuessOutcome::Correct { ref answer } if answer.name == "France"));
        assert_eq!(engine.score(), 10);
        assert_eq!(engine.round_id(), first_id + 1);
        assert_eq!(engine.round().selected().map(|c| c.name.as_str()), Some("France"));
        // Bonus seconds are overwritten by the new round.
        assert_eq!(engine.round().remaining_seconds(), 15);
        assert_eq!(engine.round().guess(), "");
    }

    #[test]
    fn incorrect_guess_is_floored_at_zero() {
        let mut engine = engine_with(france(), vec![0]);
        let round_id = engine.round_id();
        engine.tick();

        assert_eq!(engine.submit_guess("germany"), GuessOutcome::Incorrect);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.round_id(), round_id);
        assert_eq!(engine.round().remaining_seconds(), 14);

        engine.submit_guess("FRANCE");
        engine.submit_guess("Spain");
        assert_eq!(engine.score(), 9);
    }

    #[test]
    fn guess_comparison_does_not_trim() {
        let mut engine = engine_with(france(), vec![0]);
        assert_eq!(engine.submit_guess(" France"), GuessOutcome::Incorrect);
    }

    #[test]
    fn guess_buffer_is_cleared_after_submission() {
        let mut engine = engine_with(france(), vec![0]);
        for ch in "Spainx".chars() {
            engine.push_guess_char(ch);
        }
        engine.pop_guess_char();
        assert_eq!(engine.round().guess(), "Spain");
        assert_eq!(engine.submit_current_guess(), GuessOutcome::Incorrect);
        assert_eq!(engine.round().guess(), "");

        engine.set_guess("fRaNcE");
        assert!(matches!(
            engine.submit_current_guess(),
            GuessOutcome::Correct { .. }
        ));
    }

    #[test]
    fn four_hints_force_the_next_round() {
        let mut engine = engine_with(france(), vec![0]);
        let first_id = engine.round_id();
        let mut clocks = Vec::new();

        for expected in ["F", "Fr", "Fra"] {
            match engine.request_hint() {
                HintOutcome::Revealed { hint, .. } => assert_eq!(hint, expected),
                other => panic!("unexpected outcome {other:?}"),
            }
            clocks.push(engine.round().remaining_seconds());
        }
        assert_eq!(clocks, vec![13, 11, 9]);
        assert_eq!(engine.round().hints_left(), 1);

        match engine.request_hint() {
            HintOutcome::Exhausted { hint, answer } => {
                assert_eq!(hint, "Fran");
                assert_eq!(answer.name, "France");
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(engine.round_id(), first_id + 1);
        assert_eq!(engine.round().hints_consumed(), 0);
        assert_eq!(engine.round().hint(), "");
        assert_eq!(engine.round().remaining_seconds(), 15);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn short_names_stop_revealing_without_consuming() {
        let mut engine = engine_with(vec![Country::new("Om", "o.png")], vec![0]);
        engine.request_hint();
        engine.request_hint();
        assert_eq!(engine.request_hint(), HintOutcome::FullyRevealed);
        assert_eq!(engine.round().hints_consumed(), 2);
        assert_eq!(engine.round().remaining_seconds(), 11);
    }

    #[test]
    fn hints_reveal_whole_characters() {
        let mut engine = engine_with(vec![Country::new("Åland", "a.png")], vec![0]);
        assert_eq!(
            engine.request_hint(),
            HintOutcome::Revealed {
                hint: "Å".to_string(),
                hints_left: 3
            }
        );
    }

    #[test]
    fn hint_penalty_floors_at_zero_then_expires() {
        let mut engine = engine_with(france(), vec![0]);
        for _ in 0..14 {
            engine.tick();
        }
        assert_eq!(engine.round().remaining_seconds(), 1);
        engine.request_hint();
        assert_eq!(engine.round().remaining_seconds(), 0);

        let round_id = engine.round_id();
        assert!(matches!(engine.tick(), TickOutcome::Expired { .. }));
        assert_eq!(engine.round_id(), round_id + 1);
    }

    #[test]
    fn timer_expiry_starts_new_round_without_penalty() {
        let mut engine = engine_with(france(), vec![0]);
        engine.submit_guess("France");
        let round_id = engine.round_id();

        for expected in (1..15).rev() {
            assert_eq!(engine.tick(), TickOutcome::Running { remaining: expected });
        }
        assert!(matches!(engine.tick(), TickOutcome::Expired { ref answer } if answer.name == "France"));
        assert_eq!(engine.round_id(), round_id + 1);
        assert_eq!(engine.round().remaining_seconds(), ROUND_SECONDS);
        assert_eq!(engine.score(), 10);
    }

    #[test]
    fn stale_ticks_are_ignored() {
        let mut engine = engine_with(france(), vec![0]);
        let old_id = engine.round_id();
        engine.start_round();
        assert_eq!(engine.tick_round(old_id), TickOutcome::Stale);
        assert_eq!(engine.round().remaining_seconds(), ROUND_SECONDS);
        assert_eq!(
            engine.tick_round(engine.round_id()),
            TickOutcome::Running { remaining: 14 }
        );
    }

    #[test]
    fn reset_and_clear_score() {
        let mut engine = engine_with(france(), vec![0]);
        engine.submit_guess("France");
        engine.request_hint();
        let round_id = engine.round_id();

        engine.clear_score();
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.round_id(), round_id);
        assert_eq!(engine.round().hints_consumed(), 1);

        engine.submit_guess("France");
        engine.reset();
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.round().hints_consumed(), 0);
        assert_eq!(engine.round().remaining_seconds(), ROUND_SECONDS);
    }
}
