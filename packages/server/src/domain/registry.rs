//! Signaling registry
//!
//! Channel Registry、Identity Index、Room Index をひとつの構造体にまとめたもの。
//! 全ての更新はこの構造体のメソッドを通して行い、呼び出し側（Repository 実装）が
//! 単一のロックで保護する。これにより、切断時のクリーンアップで
//! どのインデックスにも古い参照が残らないことを保証する。
//!
//! ## 不変条件
//!
//! - `identity_to_session` と `session_to_identity` は常に互いの逆写像
//! - Room のメンバーは登録済みのセッションのみを参照する
//! - セッション ID は登録中のセッション間で一意

use std::collections::HashMap;

use super::{
    entity::{DisconnectOutcome, JoinOutcome, Room, Session},
    error::RepositoryError,
    value_object::{Identity, RoomName, SessionId, Timestamp},
};

/// Channel registry, identity index and room index.
#[derive(Debug, Default)]
pub struct SignalingRegistry {
    sessions: HashMap<SessionId, Session>,
    identity_to_session: HashMap<Identity, SessionId>,
    session_to_identity: HashMap<SessionId, Identity>,
    rooms: HashMap<RoomName, Room>,
}

impl SignalingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly accepted channel.
    pub fn register_session(&mut self, session: Session) -> Result<(), RepositoryError> {
        if self.sessions.contains_key(&session.id) {
            return Err(RepositoryError::DuplicateSession(
                session.id.as_str().to_string(),
            ));
        }
        self.sessions.insert(session.id.clone(), session);
        Ok(())
    }

    pub fn contains_session(&self, session_id: &SessionId) -> bool {
        self.sessions.contains_key(session_id)
    }

    pub fn session(&self, session_id: &SessionId) -> Option<&Session> {
        self.sessions.get(session_id)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn identity_of(&self, session_id: &SessionId) -> Option<&Identity> {
        self.session_to_identity.get(session_id)
    }

    pub fn session_of(&self, identity: &Identity) -> Option<&SessionId> {
        self.identity_to_session.get(identity)
    }

    pub fn room(&self, name: &RoomName) -> Option<&Room> {
        self.rooms.get(name)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// Apply a join request from `session_id`.
    ///
    /// 1. Re-point the identity at this session (last writer wins). The
    ///    channel that held the identity before is orphaned, not closed.
    /// 2. Create the room if needed.
    /// 3. Select the members to notify, before the joiner is added.
    /// 4. Add the joiner to the room.
    pub fn join(
        &mut self,
        session_id: &SessionId,
        identity: Identity,
        room_name: RoomName,
        joined_at: Timestamp,
    ) -> Result<JoinOutcome, RepositoryError> {
        if !self.sessions.contains_key(session_id) {
            return Err(RepositoryError::SessionNotFound(
                session_id.as_str().to_string(),
            ));
        }

        let (superseded_session, previous_identity) = self.associate(session_id, &identity);

        let room = self
            .rooms
            .entry(room_name.clone())
            .or_insert_with(|| Room::new(room_name, joined_at));

        let notify_targets = room.notify_targets(&identity, session_id);
        room.add_member(identity, session_id.clone(), joined_at);

        Ok(JoinOutcome {
            notify_targets,
            superseded_session,
            previous_identity,
        })
    }

    /// Point `identity` at `session_id` in both directions.
    ///
    /// Returns the orphaned session and the identity this session held before.
    fn associate(
        &mut self,
        session_id: &SessionId,
        identity: &Identity,
    ) -> (Option<SessionId>, Option<Identity>) {
        let previous_identity = match self.session_to_identity.get(session_id) {
            Some(previous) if previous != identity => {
                let previous = previous.clone();
                if self.identity_to_session.get(&previous) == Some(session_id) {
                    self.identity_to_session.remove(&previous);
                }
                Some(previous)
            }
            _ => None,
        };

        let superseded_session = match self.identity_to_session.get(identity) {
            Some(other) if other != session_id => {
                let other = other.clone();
                self.session_to_identity.remove(&other);
                Some(other)
            }
            _ => None,
        };

        self.identity_to_session
            .insert(identity.clone(), session_id.clone());
        self.session_to_identity
            .insert(session_id.clone(), identity.clone());

        (superseded_session, previous_identity)
    }

    /// Purge every entry referencing `session_id`.
    ///
    /// Safe to call for sessions that never joined and for sessions that were
    /// already purged.
    pub fn remove_session(&mut self, session_id: &SessionId) -> DisconnectOutcome {
        let was_registered = self.sessions.remove(session_id).is_some();

        let identity = self.session_to_identity.remove(session_id);
        self.identity_to_session.retain(|_, s| s != session_id);

        let mut rooms_left: Vec<RoomName> = self
            .rooms
            .values_mut()
            .filter_map(|room| {
                if room.remove_session(session_id).is_empty() {
                    None
                } else {
                    Some(room.name.clone())
                }
            })
            .collect();
        rooms_left.sort();

        DisconnectOutcome {
            was_registered,
            identity,
            rooms_left,
        }
    }
}
