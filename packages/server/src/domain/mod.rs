//! Domain layer: value objects, entities, the signaling registry and the
//! interfaces the outer layers implement.

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use entity::{DisconnectOutcome, JoinOutcome, Membership, Room, Session};
pub use error::{MessagePushError, RepositoryError, ValueObjectError};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use registry::SignalingRegistry;
pub use repository::SessionRepository;
pub use value_object::{Identity, RoomName, SessionId, SessionIdFactory, Timestamp};
