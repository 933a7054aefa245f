//! Entities and operation outcomes of the signaling domain.

use std::collections::BTreeMap;

use super::value_object::{Identity, RoomName, SessionId, Timestamp};

/// A live duplex channel registered in the channel registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub connected_at: Timestamp,
}

impl Session {
    pub fn new(id: SessionId, connected_at: Timestamp) -> Self {
        Self { id, connected_at }
    }
}

/// Room membership of one identity: the channel it joined with and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub session_id: SessionId,
    pub joined_at: Timestamp,
}

/// A named group of identities that see each other's join events.
///
/// Members are keyed by identity, so a later join under the same identity
/// replaces the earlier entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: RoomName,
    pub created_at: Timestamp,
    members: BTreeMap<Identity, Membership>,
}

impl Room {
    pub fn new(name: RoomName, created_at: Timestamp) -> Self {
        Self {
            name,
            created_at,
            members: BTreeMap::new(),
        }
    }

    /// Members sorted by identity
    pub fn members(&self) -> impl Iterator<Item = (&Identity, &Membership)> {
        self.members.iter()
    }

    pub fn member_identities(&self) -> Vec<Identity> {
        self.members.keys().cloned().collect()
    }

    pub fn membership(&self, identity: &Identity) -> Option<&Membership> {
        self.members.get(identity)
    }

    pub fn contains(&self, identity: &Identity) -> bool {
        self.members.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Add (or overwrite) a member, returning the replaced membership if any.
    pub fn add_member(
        &mut self,
        identity: Identity,
        session_id: SessionId,
        joined_at: Timestamp,
    ) -> Option<Membership> {
        self.members.insert(
            identity,
            Membership {
                session_id,
                joined_at,
            },
        )
    }

    /// Remove every member that joined through `session_id`.
    ///
    /// Returns the removed identities.
    pub fn remove_session(&mut self, session_id: &SessionId) -> Vec<Identity> {
        let removed: Vec<Identity> = self
            .members
            .iter()
            .filter(|(_, m)| &m.session_id == session_id)
            .map(|(identity, _)| identity.clone())
            .collect();
        for identity in &removed {
            self.members.remove(identity);
        }
        removed
    }

    /// Sessions to notify when `joiner` joins through `joiner_session`.
    ///
    /// Excludes the joiner's own identity and every entry that shares the
    /// joiner's session, and lists each session once.
    pub fn notify_targets(&self, joiner: &Identity, joiner_session: &SessionId) -> Vec<SessionId> {
        let mut targets: Vec<SessionId> = Vec::new();
        for (identity, membership) in &self.members {
            if identity == joiner || &membership.session_id == joiner_session {
                continue;
            }
            if !targets.contains(&membership.session_id) {
                targets.push(membership.session_id.clone());
            }
        }
        targets
    }
}

/// Result of a join applied to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JoinOutcome {
    /// Sessions that must receive the `joined` notification
    pub notify_targets: Vec<SessionId>,
    /// Channel that previously owned the identity and is now orphaned
    pub superseded_session: Option<SessionId>,
    /// Identity this channel held before re-joining under a different one
    pub previous_identity: Option<Identity>,
}

/// Result of purging a session from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisconnectOutcome {
    /// Whether the session was still registered
    pub was_registered: bool,
    /// Identity associated with the session at the time of the purge
    pub identity: Option<Identity>,
    /// Rooms the session had members in
    pub rooms_left: Vec<RoomName>,
}
