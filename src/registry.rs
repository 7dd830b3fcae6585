//! Store of live matches.
//!
//! A `Registry` is an ordinary value: build one at start-up and hand it to
//! whatever serves requests. Matches are never removed.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::common::GameError;
use crate::config::Rules;
use crate::game::Match;
use crate::ids::{MatchId, PlayerId, SessionToken};

pub struct Registry {
    matches: BTreeMap<MatchId, Match>,
    rules: Rules,
    rng: SmallRng,
}

impl Registry {
    /// Registry creating matches under the default rules.
    pub fn new(rng: SmallRng) -> Self {
        Self::with_rules(Rules::default(), rng)
    }

    pub fn with_rules(rules: Rules, rng: SmallRng) -> Self {
        Registry {
            matches: BTreeMap::new(),
            rules,
            rng,
        }
    }

    /// Deterministic registry; ids and tokens depend only on `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    /// Registry seeded from the thread RNG.
    #[cfg(feature = "std")]
    pub fn from_entropy(rules: Rules) -> Self {
        Self::with_rules(rules, SmallRng::from_rng(&mut rand::rng()))
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Allocate and store an empty match.
    pub fn create_match(&mut self) -> &mut Match {
        let mut id = MatchId::generate(&mut self.rng);
        while self.matches.contains_key(&id) {
            id = MatchId::generate(&mut self.rng);
        }
        let rules = self.rules;
        self.matches.entry(id).or_insert_with(|| Match::new(id, rules))
    }

    pub fn exists(&self, id: &MatchId) -> bool {
        self.matches.contains_key(id)
    }

    pub fn get(&self, id: &MatchId) -> Option<&Match> {
        self.matches.get(id)
    }

    pub fn get_mut(&mut self, id: &MatchId) -> Option<&mut Match> {
        self.matches.get_mut(id)
    }

    /// Seat a new player in match `id`.
    pub fn join(&mut self, id: &MatchId) -> Result<(PlayerId, SessionToken), GameError> {
        let game = self.matches.get_mut(id).ok_or(GameError::UnknownMatch)?;
        let board = game.add_player(&mut self.rng)?;
        Ok((board.player_id(), board.session()))
    }

    pub fn match_ids(&self) -> Vec<MatchId> {
        self.matches.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
