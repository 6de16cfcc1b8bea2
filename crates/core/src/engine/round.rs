use crate::models::Country;

/// Seconds on the clock at the start of every round.
pub const ROUND_SECONDS: u32 = 15;
/// Seconds added for a correct guess.
pub const CORRECT_BONUS_SECONDS: u32 = 15;
/// Seconds taken for each hint.
pub const HINT_PENALTY_SECONDS: u32 = 2;
/// Hint budget per round.
pub const MAX_HINTS: u32 = 4;
/// Points for a correct guess.
pub const CORRECT_POINTS: u32 = 10;
/// Points lost for a wrong guess.
pub const WRONG_PENALTY: u32 = 1;

/// State of the round in progress. Replaced wholesale when a new round begins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundState {
    pub(crate) round_id: u64,
    pub(crate) selected: Option<Country>,
    pub(crate) guess: String,
    pub(crate) remaining_seconds: u32,
    pub(crate) hint: String,
    pub(crate) hints_consumed: u32,
}

impl RoundState {
    pub(crate) fn begin(round_id: u64, selected: Country) -> Self {
        Self {
            round_id,
            selected: Some(selected),
            guess: String::new(),
            remaining_seconds: ROUND_SECONDS,
            hint: String::new(),
            hints_consumed: 0,
        }
    }

    /// Identifier that changes every time a round starts.
    pub fn round_id(&self) -> u64 {
        self.round_id
    }

    /// The country to be guessed, absent until a pool has loaded.
    pub fn selected(&self) -> Option<&Country> {
        self.selected.as_ref()
    }

    /// Guess text typed so far.
    pub fn guess(&self) -> &str {
        &self.guess
    }

    /// Seconds left on the round clock.
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Leading characters of the answer revealed by hints.
    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// Hints used this round.
    pub fn hints_consumed(&self) -> u32 {
        self.hints_consumed
    }

    /// Hints still available this round.
    pub fn hints_left(&self) -> u32 {
        MAX_HINTS.saturating_sub(self.hints_consumed)
    }

    /// Guessing is closed once the hint budget is spent.
    pub fn is_locked(&self) -> bool {
        self.hints_consumed >= MAX_HINTS
    }
}

/// Result of submitting a guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// No pool has loaded yet.
    NotReady,
    /// The hint budget is spent; guesses are refused.
    Locked,
    /// The guess matched; a new round has started.
    Correct {
        /// The country that was guessed.
        answer: Country,
    },
    /// The guess did not match.
    Incorrect,
}

/// Result of asking for a hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintOutcome {
    /// No pool has loaded yet.
    NotReady,
    /// One more character was revealed.
    Revealed {
        /// Revealed prefix of the answer.
        hint: String,
        /// Hints still available this round.
        hints_left: u32,
    },
    /// The whole name is already shown; nothing was consumed.
    FullyRevealed,
    /// The hint budget ran out and the round was forfeited.
    Exhausted {
        /// Prefix revealed before the round ended.
        hint: String,
        /// The forfeited round's country.
        answer: Country,
    },
}

/// Result of one timer tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No pool has loaded yet.
    NotReady,
    /// The tick belonged to a round that already ended.
    Stale,
    /// The round continues.
    Running {
        /// Seconds left after the tick.
        remaining: u32,
    },
    /// Time ran out; a new round has started.
    Expired {
        /// The country nobody guessed.
        answer: Country,
    },
}
