#![cfg(feature = "std")]

use anyhow::anyhow;

use crate::common::AttackOutcome;
use crate::ids::{MatchId, PlayerId, SessionToken};
use crate::protocol::{
    CreatedMatch, JoinedMatch, LobbyApi, Message, Request, Response, PROTOCOL_VERSION,
};
use crate::transport::Transport;
use crate::view::MatchView;

/// Client proxy: each `LobbyApi` call becomes one request frame.
pub struct Stub<T: Transport> {
    transport: T,
    handshaken: bool,
    next_seq: u64,
}

impl<T: Transport> Stub<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            handshaken: false,
            next_seq: 0,
        }
    }

    async fn ensure_handshake(&mut self) -> anyhow::Result<()> {
        if self.handshaken {
            return Ok(());
        }
        self.transport
            .send(Message::Handshake {
                version: PROTOCOL_VERSION,
            })
            .await?;
        match self.transport.recv().await? {
            Message::HandshakeAck { version } if version == PROTOCOL_VERSION => {
                self.handshaken = true;
                Ok(())
            }
            Message::HandshakeAck { version } => Err(anyhow!(
                "Protocol version mismatch in HandshakeAck: expected {}, got {}",
                PROTOCOL_VERSION,
                version
            )),
            _ => Err(anyhow!("Expected HandshakeAck, got unexpected message")),
        }
    }

    /// Send one request and wait for its response. A `Rejected` reply comes
    /// back as an error wrapping the `GameError`.
    async fn call(&mut self, body: Request) -> anyhow::Result<Response> {
        self.ensure_handshake().await?;
        let seq = self.next_seq;
        self.transport
            .send(Message::Request {
                version: PROTOCOL_VERSION,
                seq,
                body,
            })
            .await?;
        self.next_seq += 1;

        match self.transport.recv().await? {
            Message::Response {
                version,
                seq: resp_seq,
                body,
            } => {
                if version != PROTOCOL_VERSION {
                    return Err(anyhow!(
                        "Protocol version mismatch in Response: expected {}, got {}",
                        PROTOCOL_VERSION,
                        version
                    ));
                }
                if resp_seq != seq {
                    return Err(anyhow!(
                        "Sequence mismatch: expected {}, got {}",
                        seq,
                        resp_seq
                    ));
                }
                match body {
                    Response::Rejected(err) => Err(anyhow::Error::new(err)),
                    other => Ok(other),
                }
            }
            _ => Err(anyhow!("Expected Response, got unexpected message")),
        }
    }
}

fn unexpected(reply: Response) -> anyhow::Error {
    anyhow!("Unexpected response: {:?}", reply)
}

#[async_trait::async_trait]
impl<T: Transport> LobbyApi for Stub<T> {
    async fn create_match(&mut self) -> anyhow::Result<CreatedMatch> {
        match self.call(Request::CreateMatch).await? {
            Response::Created(created) => Ok(created),
            other => Err(unexpected(other)),
        }
    }

    async fn list_matches(&mut self) -> anyhow::Result<Vec<MatchId>> {
        match self.call(Request::ListMatches).await? {
            Response::Matches(ids) => Ok(ids),
            other => Err(unexpected(other)),
        }
    }

    async fn get_match(
        &mut self,
        match_id: MatchId,
        session: Option<SessionToken>,
    ) -> anyhow::Result<MatchView> {
        match self.call(Request::GetMatch { match_id, session }).await? {
            Response::Match(view) => Ok(view),
            other => Err(unexpected(other)),
        }
    }

    async fn join_match(&mut self, match_id: MatchId) -> anyhow::Result<JoinedMatch> {
        match self.call(Request::JoinMatch { match_id }).await? {
            Response::Joined(joined) => Ok(joined),
            other => Err(unexpected(other)),
        }
    }

    async fn place_ship(
        &mut self,
        match_id: MatchId,
        player_id: PlayerId,
        session: Option<SessionToken>,
        ship: &str,
        placement: &str,
    ) -> anyhow::Result<()> {
        let request = Request::PlaceShip {
            match_id,
            player_id,
            session,
            ship: ship.to_string(),
            placement: placement.to_string(),
        };
        match self.call(request).await? {
            Response::Placed => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    async fn submit_move(
        &mut self,
        match_id: MatchId,
        player_id: PlayerId,
        session: Option<SessionToken>,
        coords: &str,
    ) -> anyhow::Result<AttackOutcome> {
        let request = Request::SubmitMove {
            match_id,
            player_id,
            session,
            coords: coords.to_string(),
        };
        match self.call(request).await? {
            Response::Moved(outcome) => Ok(outcome),
            other => Err(unexpected(other)),
        }
    }
}
