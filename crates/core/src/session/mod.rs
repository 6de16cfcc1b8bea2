//! Game session owning the round engine and the leaderboard.

use anyhow::Result;
use tracing::info;

use crate::{
    engine::{GuessOutcome, HintOutcome, RandomSource, RoundEngine, TickOutcome},
    leaderboard::Leaderboard,
    models::{Country, LeaderboardEntry},
    storage::KeyValueStore,
};

/// Result of a save-score command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The score was recorded and the running score cleared.
    Saved {
        /// Name the score was saved under.
        player_name: String,
        /// Score that was saved.
        score: u32,
    },
    /// The player name was blank; nothing was recorded.
    EmptyName,
}

/// All mutable state of one play session.
pub struct GameSession<S, R> {
    engine: RoundEngine<R>,
    leaderboard: Leaderboard<S>,
    player_name: String,
}

impl<S: KeyValueStore, R: RandomSource> GameSession<S, R> {
    /// Load the leaderboard from `store`; rounds wait for [`GameSession::load_pool`].
    pub fn new(store: S, random: R) -> Self {
        Self {
            engine: RoundEngine::new(random),
            leaderboard: Leaderboard::load(store),
            player_name: String::new(),
        }
    }

    /// Hand over the fetched countries and start the first round.
    pub fn load_pool(&mut self, countries: Vec<Country>) -> usize {
        let kept = self.engine.load_pool(countries);
        info!(countries = kept, "Session ready");
        kept
    }

    /// Round engine.
    pub fn engine(&self) -> &RoundEngine<R> {
        &self.engine
    }

    /// Mutable access to the round engine, e.g. for guess-buffer edits.
    pub fn engine_mut(&mut self) -> &mut RoundEngine<R> {
        &mut self.engine
    }

    /// Saved scores.
    pub fn leaderboard(&self) -> &Leaderboard<S> {
        &self.leaderboard
    }

    /// Saved scores sorted by descending score.
    pub fn standings(&self) -> Vec<LeaderboardEntry> {
        self.leaderboard.list()
    }

    /// Player name typed so far.
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Replace the player name.
    pub fn set_player_name(&mut self, name: impl Into<String>) {
        self.player_name = name.into();
    }

    /// Append a character to the player name.
    pub fn push_name_char(&mut self, ch: char) {
        self.player_name.push(ch);
    }

    /// Remove the last character of the player name.
    pub fn pop_name_char(&mut self) {
        self.player_name.pop();
    }

    /// Submit the guess typed so far.
    pub fn guess(&mut self) -> GuessOutcome {
        self.engine.submit_current_guess()
    }

    /// Ask for a hint.
    pub fn hint(&mut self) -> HintOutcome {
        self.engine.request_hint()
    }

    /// Deliver a timer tick for `round_id`.
    pub fn tick(&mut self, round_id: u64) -> TickOutcome {
        self.engine.tick_round(round_id)
    }

    /// Save the running score under the typed player name.
    ///
    /// On success the running score and the name field are cleared; the
    /// round in progress continues.
    pub fn save_score(&mut self) -> Result<SaveOutcome> {
        let name = self.player_name.clone();
        let score = self.engine.score();
        if !self.leaderboard.save(&name, score)? {
            return Ok(SaveOutcome::EmptyName);
        }
        info!(player = %name, score, "Score saved");
        self.engine.clear_score();
        self.player_name.clear();
        Ok(SaveOutcome::Saved {
            player_name: name,
            score,
        })
    }

    /// Remove every saved score for `name`.
    pub fn delete_score(&mut self, name: &str) -> Result<usize> {
        let removed = self.leaderboard.delete(name)?;
        info!(player = %name, removed, "Scores deleted");
        Ok(removed)
    }

    /// Zero the score and start over with a fresh round.
    pub fn restart(&mut self) {
        self.engine.reset();
    }
}
