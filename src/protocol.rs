//! Request/response messages between a client and the match server, and the
//! operation surface both sides implement.

use serde::{Deserialize, Serialize};

use crate::common::{AttackOutcome, GameError};
use crate::ids::{MatchId, PlayerId, SessionToken};
use crate::view::MatchView;

/// Protocol version checked during handshake and on every frame.
pub const PROTOCOL_VERSION: u16 = 1;

/// Credentials handed out when a player takes a seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinedMatch {
    pub match_id: MatchId,
    pub player_id: PlayerId,
    pub session: SessionToken,
}

/// Result of creating a match: the creator is seated immediately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedMatch {
    pub seat: JoinedMatch,
    pub state: MatchView,
}

/// Operations a client can ask for. Coordinates and ship kinds travel as
/// text and are validated by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    CreateMatch,
    ListMatches,
    GetMatch {
        match_id: MatchId,
        session: Option<SessionToken>,
    },
    JoinMatch {
        match_id: MatchId,
    },
    PlaceShip {
        match_id: MatchId,
        player_id: PlayerId,
        session: Option<SessionToken>,
        ship: String,
        placement: String,
    },
    SubmitMove {
        match_id: MatchId,
        player_id: PlayerId,
        session: Option<SessionToken>,
        coords: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    Created(CreatedMatch),
    Matches(Vec<MatchId>),
    Match(MatchView),
    Joined(JoinedMatch),
    Placed,
    Moved(AttackOutcome),
    /// The request was understood and refused.
    Rejected(GameError),
}

/// Frames exchanged over a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    Handshake { version: u16 },
    HandshakeAck { version: u16 },
    Request { version: u16, seq: u64, body: Request },
    Response { version: u16, seq: u64, body: Response },
}

/// The operations a match server offers, whether called in-process or
/// through a `Stub`. Rejections come back as a `GameError` inside the
/// `anyhow::Error`; anything else is a transport failure.
#[async_trait::async_trait]
pub trait LobbyApi: Send {
    /// Create a match and seat the caller as its first player.
    async fn create_match(&mut self) -> anyhow::Result<CreatedMatch>;

    async fn list_matches(&mut self) -> anyhow::Result<Vec<MatchId>>;

    /// Current state of a match. Ship layouts are only shown for the board
    /// owned by `session`.
    async fn get_match(
        &mut self,
        match_id: MatchId,
        session: Option<SessionToken>,
    ) -> anyhow::Result<MatchView>;

    async fn join_match(&mut self, match_id: MatchId) -> anyhow::Result<JoinedMatch>;

    /// `ship` is a catalog name, `placement` is `"x-y-o"`.
    async fn place_ship(
        &mut self,
        match_id: MatchId,
        player_id: PlayerId,
        session: Option<SessionToken>,
        ship: &str,
        placement: &str,
    ) -> anyhow::Result<()>;

    /// `coords` is `"x-y"`.
    async fn submit_move(
        &mut self,
        match_id: MatchId,
        player_id: PlayerId,
        session: Option<SessionToken>,
        coords: &str,
    ) -> anyhow::Result<AttackOutcome>;
}

/// Recover the rejection carried by an API error, if that is what it is.
pub fn rejection(err: &anyhow::Error) -> Option<GameError> {
    err.downcast_ref::<GameError>().copied()
}
