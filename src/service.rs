#![cfg(feature = "std")]

//! In-process implementation of `LobbyApi` over a shared registry.

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::Mutex;

use crate::common::{AttackOutcome, GameError};
use crate::coord::{Coord, Placement};
use crate::ids::{MatchId, PlayerId, SessionToken};
use crate::protocol::{CreatedMatch, JoinedMatch, LobbyApi};
use crate::registry::Registry;
use crate::ship::ShipKind;
use crate::view::MatchView;

/// Every connection serves requests against the same registry. One lock
/// guards all matches, so every operation is atomic.
pub type SharedRegistry = Arc<Mutex<Registry>>;

pub fn shared(registry: Registry) -> SharedRegistry {
    Arc::new(Mutex::new(registry))
}

/// Log a rejection and hand it back as an API error.
fn reject(op: &str, err: GameError) -> anyhow::Error {
    warn!("{} rejected: {} ({})", op, err, err.code());
    anyhow::Error::new(err)
}

#[derive(Clone)]
pub struct RegistryService {
    registry: SharedRegistry,
}

impl RegistryService {
    pub fn new(registry: SharedRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }
}

#[async_trait::async_trait]
impl LobbyApi for RegistryService {
    async fn create_match(&mut self) -> anyhow::Result<CreatedMatch> {
        let mut registry = self.registry.lock().await;
        let match_id = registry.create_match().id();
        let (player_id, session) = registry
            .join(&match_id)
            .map_err(|e| reject("create_match", e))?;
        let state = registry
            .get(&match_id)
            .map(|game| game.export(Some(&player_id)))
            .ok_or_else(|| reject("create_match", GameError::UnknownMatch))?;
        info!("match {} created by player {}", match_id, player_id);
        Ok(CreatedMatch {
            seat: JoinedMatch {
                match_id,
                player_id,
                session,
            },
            state,
        })
    }

    async fn list_matches(&mut self) -> anyhow::Result<Vec<MatchId>> {
        Ok(self.registry.lock().await.match_ids())
    }

    async fn get_match(
        &mut self,
        match_id: MatchId,
        session: Option<SessionToken>,
    ) -> anyhow::Result<MatchView> {
        let registry = self.registry.lock().await;
        let game = registry
            .get(&match_id)
            .ok_or_else(|| reject("get_match", GameError::UnknownMatch))?;
        // An unknown or absent token gets the spectator view.
        let viewer = session
            .as_ref()
            .and_then(|token| game.get_player_by_session(token))
            .map(|board| board.player_id());
        Ok(game.export(viewer.as_ref()))
    }

    async fn join_match(&mut self, match_id: MatchId) -> anyhow::Result<JoinedMatch> {
        let mut registry = self.registry.lock().await;
        let (player_id, session) = registry
            .join(&match_id)
            .map_err(|e| reject("join_match", e))?;
        info!("player {} joined match {}", player_id, match_id);
        Ok(JoinedMatch {
            match_id,
            player_id,
            session,
        })
    }

    async fn place_ship(
        &mut self,
        match_id: MatchId,
        player_id: PlayerId,
        session: Option<SessionToken>,
        ship: &str,
        placement: &str,
    ) -> anyhow::Result<()> {
        let mut registry = self.registry.lock().await;
        let game = registry
            .get_mut(&match_id)
            .ok_or_else(|| reject("place_ship", GameError::UnknownMatch))?;
        let placed = game
            .authorize(&player_id, session.as_ref())
            .and_then(|()| {
                let kind: ShipKind = ship.parse()?;
                let placement: Placement = placement.parse()?;
                game.place_ship(&player_id, kind, placement)?;
                Ok((kind, placement))
            })
            .map_err(|e| reject("place_ship", e))?;
        debug!(
            "match {}: player {} placed {} at {}",
            match_id, player_id, placed.0, placed.1
        );
        Ok(())
    }

    async fn submit_move(
        &mut self,
        match_id: MatchId,
        player_id: PlayerId,
        session: Option<SessionToken>,
        coords: &str,
    ) -> anyhow::Result<AttackOutcome> {
        let mut registry = self.registry.lock().await;
        let game = registry
            .get_mut(&match_id)
            .ok_or_else(|| reject("submit_move", GameError::UnknownMatch))?;
        let (coord, outcome) = game
            .authorize(&player_id, session.as_ref())
            .and_then(|()| {
                let coord: Coord = coords.parse()?;
                let outcome = game.submit_move(&player_id, coord)?;
                Ok((coord, outcome))
            })
            .map_err(|e| reject("submit_move", e))?;
        debug!(
            "match {}: player {} fired at {}: {:?}",
            match_id, player_id, coord, outcome
        );
        if outcome.sunk_all {
            info!("match {} won by player {}", match_id, player_id);
        }
        Ok(outcome)
    }
}
