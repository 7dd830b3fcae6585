//! A two-player match: joining, turn rules, move adjudication and the win.

use alloc::vec::Vec;
use rand::RngCore;

use crate::board::{AttackMark, Board};
use crate::common::{AttackOutcome, BoardError, GameError};
use crate::config::{RepeatAttacks, Rules, TurnOrder, MAX_PLAYERS};
use crate::coord::{Coord, Placement};
use crate::ids::{MatchId, PlayerId, SessionToken};
use crate::ship::ShipKind;
use crate::view::{self, MatchView};

/// Where a match is in its life. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchPhase {
    /// Fewer than two players have joined.
    WaitingForPlayers,
    /// Both players are in; shots are accepted once the target's fleet is
    /// placed.
    PlacementOrPlay,
    /// A winner has been recorded.
    Finished,
}

pub struct Match {
    id: MatchId,
    players: Vec<Board>,
    in_progress: bool,
    winner: Option<PlayerId>,
    rules: Rules,
    last_shooter: Option<PlayerId>,
}

impl Match {
    pub fn new(id: MatchId, rules: Rules) -> Self {
        Match {
            id,
            players: Vec::with_capacity(MAX_PLAYERS),
            in_progress: true,
            winner: None,
            rules,
            last_shooter: None,
        }
    }

    pub fn id(&self) -> MatchId {
        self.id
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Boards in join order.
    pub fn players(&self) -> &[Board] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn phase(&self) -> MatchPhase {
        if self.winner.is_some() {
            MatchPhase::Finished
        } else if self.players.len() < MAX_PLAYERS {
            MatchPhase::WaitingForPlayers
        } else {
            MatchPhase::PlacementOrPlay
        }
    }

    /// Seat a new player with a fresh id and session token.
    pub fn add_player<R: RngCore + ?Sized>(&mut self, rng: &mut R) -> Result<&Board, GameError> {
        if self.players.len() >= MAX_PLAYERS {
            return Err(GameError::MatchFull);
        }
        let board = Board::new(PlayerId::generate(rng), SessionToken::generate(rng));
        self.players.push(board);
        Ok(&self.players[self.players.len() - 1])
    }

    pub fn has_player(&self, player_id: &PlayerId) -> bool {
        self.get_player(player_id).is_some()
    }

    pub fn get_player(&self, player_id: &PlayerId) -> Option<&Board> {
        self.players.iter().find(|b| b.player_id() == *player_id)
    }

    fn position(&self, player_id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|b| b.player_id() == *player_id)
    }

    pub fn get_player_by_session(&self, token: &SessionToken) -> Option<&Board> {
        self.players.iter().find(|b| b.check_session(token))
    }

    /// The other seated player's board, if there is one.
    pub fn opponent_of(&self, player_id: &PlayerId) -> Option<&Board> {
        self.players.iter().find(|b| b.player_id() != *player_id)
    }

    /// Check that `token` was issued to `player_id` in this match.
    pub fn authorize(
        &self,
        player_id: &PlayerId,
        token: Option<&SessionToken>,
    ) -> Result<(), GameError> {
        let board = self.get_player(player_id).ok_or(GameError::UnknownPlayer)?;
        match token {
            Some(token) if board.check_session(token) => Ok(()),
            _ => Err(GameError::Unauthorized),
        }
    }

    /// Place one of `player_id`'s ships.
    pub fn place_ship(
        &mut self,
        player_id: &PlayerId,
        kind: ShipKind,
        placement: Placement,
    ) -> Result<(), GameError> {
        let idx = self.position(player_id).ok_or(GameError::UnknownPlayer)?;
        self.players[idx].place_ship(kind, placement.origin, placement.orientation)?;
        Ok(())
    }

    /// Fire at `coord` on the opponent's board on behalf of `player_id`.
    pub fn submit_move(
        &mut self,
        player_id: &PlayerId,
        coord: Coord,
    ) -> Result<AttackOutcome, GameError> {
        let shooter = self.position(player_id).ok_or(GameError::UnknownPlayer)?;
        let target = self
            .players
            .iter()
            .position(|b| b.player_id() != *player_id)
            .ok_or(GameError::NoOpponent)?;

        // After the win the loser may not fire at all; the winner's target
        // board refuses the shot itself as already defeated.
        if self.winner.is_some() {
            if self.players[target].is_sunk_all() {
                return Err(BoardError::AlreadyDefeated.into());
            }
            return Err(GameError::MatchFinished);
        }

        if self.rules.turn_order == TurnOrder::Alternating {
            let expected = match self.last_shooter {
                None => 0,
                Some(last) if last == *player_id => target,
                Some(_) => shooter,
            };
            if expected != shooter {
                return Err(GameError::NotYourTurn);
            }
        }

        let defender = &mut self.players[target];
        if self.rules.repeat_attacks == RepeatAttacks::Reject
            && defender.attack_mark(coord) != AttackMark::Unattempted
        {
            return Err(BoardError::AlreadyAttacked(coord).into());
        }

        let outcome = defender.register_attack(coord)?;
        self.last_shooter = Some(*player_id);
        if defender.is_sunk_all() {
            self.record_winner(*player_id);
        }
        Ok(outcome)
    }

    /// First winner sticks.
    fn record_winner(&mut self, player_id: PlayerId) {
        if self.winner.is_none() {
            self.winner = Some(player_id);
            self.in_progress = false;
        }
    }

    /// View of the match for `viewer`; only the viewer's own board shows its
    /// ships.
    pub fn export(&self, viewer: Option<&PlayerId>) -> MatchView {
        view::project_match(self, viewer)
    }
}
