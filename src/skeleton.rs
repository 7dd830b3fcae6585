#![cfg(feature = "std")]

use anyhow::anyhow;
use log::{debug, warn};

use crate::protocol::{rejection, LobbyApi, Message, Request, Response, PROTOCOL_VERSION};
use crate::transport::{is_disconnect, Transport};

/// Server side of one connection: answers `Request` frames by calling into a
/// `LobbyApi` implementation.
pub struct Skeleton<A: LobbyApi, T: Transport> {
    api: A,
    transport: T,
    expected_seq: u64,
}

impl<A: LobbyApi, T: Transport> Skeleton<A, T> {
    pub fn new(api: A, transport: T) -> Self {
        Self {
            api,
            transport,
            expected_seq: 0,
        }
    }

    async fn handshake(&mut self) -> anyhow::Result<()> {
        match self.transport.recv().await? {
            Message::Handshake { version } if version == PROTOCOL_VERSION => {
                self.transport
                    .send(Message::HandshakeAck {
                        version: PROTOCOL_VERSION,
                    })
                    .await
            }
            Message::Handshake { version } => {
                warn!(
                    "handshake version mismatch: expected {}, peer sent {}",
                    PROTOCOL_VERSION, version
                );
                Err(anyhow!(
                    "Protocol version mismatch in Handshake: expected {}, got {}",
                    PROTOCOL_VERSION,
                    version
                ))
            }
            other => {
                warn!("expected Handshake, got {:?}", other);
                Err(anyhow!("Expected handshake"))
            }
        }
    }

    /// Serve until the peer goes away. Protocol violations and transport
    /// failures end the session with an error; rejected requests do not.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.handshake().await?;

        loop {
            let msg = match self.transport.recv().await {
                Ok(msg) => msg,
                Err(err) if is_disconnect(&err) => {
                    debug!("peer disconnected: {}", err);
                    return Ok(());
                }
                Err(err) => return Err(err),
            };
            let (version, seq, body) = match msg {
                Message::Request { version, seq, body } => (version, seq, body),
                other => {
                    warn!("expected Request, got {:?}", other);
                    return Err(anyhow!("Expected Request, got unexpected message"));
                }
            };
            if version != PROTOCOL_VERSION {
                warn!(
                    "version mismatch in Request: expected {}, got {} (seq {})",
                    PROTOCOL_VERSION, version, seq
                );
                return Err(anyhow!(
                    "Protocol version mismatch in Request: expected {}, got {}",
                    PROTOCOL_VERSION,
                    version
                ));
            }
            if seq != self.expected_seq {
                warn!(
                    "out-of-order Request: expected seq {}, got {}",
                    self.expected_seq, seq
                );
                return Err(anyhow!(
                    "Out-of-order message: expected seq {}, got {}",
                    self.expected_seq,
                    seq
                ));
            }
            self.expected_seq += 1;

            debug!("seq {}: {:?}", seq, body);
            let reply = self.dispatch(body).await?;
            self.transport
                .send(Message::Response {
                    version: PROTOCOL_VERSION,
                    seq,
                    body: reply,
                })
                .await?;
        }
    }

    async fn dispatch(&mut self, request: Request) -> anyhow::Result<Response> {
        let api = &mut self.api;
        let result = match request {
            Request::CreateMatch => api.create_match().await.map(Response::Created),
            Request::ListMatches => api.list_matches().await.map(Response::Matches),
            Request::GetMatch { match_id, session } => {
                api.get_match(match_id, session).await.map(Response::Match)
            }
            Request::JoinMatch { match_id } => api.join_match(match_id).await.map(Response::Joined),
            Request::PlaceShip {
                match_id,
                player_id,
                session,
                ship,
                placement,
            } => api
                .place_ship(match_id, player_id, session, &ship, &placement)
                .await
                .map(|()| Response::Placed),
            Request::SubmitMove {
                match_id,
                player_id,
                session,
                coords,
            } => api
                .submit_move(match_id, player_id, session, &coords)
                .await
                .map(Response::Moved),
        };
        match result {
            Ok(reply) => Ok(reply),
            Err(err) => match rejection(&err) {
                Some(rejected) => Ok(Response::Rejected(rejected)),
                None => Err(err),
            },
        }
    }
}
