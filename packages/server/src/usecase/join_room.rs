//! UseCase: Room 参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - identity の関連付け、既存メンバーへの joined 通知、参加者への確認応答
//!
//! ### なぜこのテストが必要か
//! - 参加者自身に joined 通知が届いてはいけない
//! - 一部のメンバーへの送信失敗が他のメンバーへの通知を妨げてはいけない
//!
//! ### どのような状況を想定しているか
//! - 正常系：空の Room / 既存メンバーのいる Room への参加
//! - 異常系：送信キューが閉じたメンバーがいる場合、参加前に切断されていた場合

use std::sync::Arc;

use denwa_shared::time::get_timestamp_millis;

use crate::domain::{
    Identity, MessagePushError, MessagePusher, RepositoryError, RoomName, SessionId,
    SessionRepository, Timestamp,
};

use super::{disconnect_session::close_session, error::JoinError};

/// Room 参加処理の結果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JoinReport {
    /// joined 通知を配信したセッション
    pub notified: Vec<SessionId>,
    /// 配信に失敗して切断したセッション
    pub closed: Vec<SessionId>,
    /// identity を奪われたセッション（切断はしない）
    pub superseded_session: Option<SessionId>,
    /// 確認応答を配信できたか
    pub acknowledged: bool,
}

/// Room 参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Room 参加を実行
    ///
    /// # Arguments
    ///
    /// * `session_id` - 参加するセッションの ID
    /// * `identity` - 参加者の identity（email など）
    /// * `room_name` - 参加する Room の名前
    /// * `joined_notification` - 既存メンバーに送る joined メッセージ（JSON）
    /// * `acknowledgement` - 参加者に返す確認応答（JSON）
    ///
    /// # Returns
    ///
    /// * `Ok(JoinReport)` - 参加成功
    /// * `Err(JoinError::SessionClosed)` - セッションが既に閉じられていた
    /// * `Err(JoinError::Repository)` - その他のリポジトリエラー
    pub async fn execute(
        &self,
        session_id: &SessionId,
        identity: Identity,
        room_name: RoomName,
        joined_notification: &str,
        acknowledgement: &str,
    ) -> Result<JoinReport, JoinError> {
        tracing::info!(
            "Session '{}' joins room '{}' as '{}'",
            session_id,
            room_name,
            identity
        );

        // 1. identity の関連付け、Room の作成、通知対象の選定、メンバー追加（単一の排他区間）
        let outcome = self
            .repository
            .join_room(
                session_id,
                identity,
                room_name,
                Timestamp::new(get_timestamp_millis()),
            )
            .await
            .map_err(|e| match e {
                RepositoryError::SessionNotFound(id) => JoinError::SessionClosed(id),
                other => JoinError::Repository(other),
            })?;

        if let Some(superseded) = &outcome.superseded_session {
            tracing::info!(
                "Session '{}' lost its identity to '{}' and is left open",
                superseded,
                session_id
            );
        }

        // 2. 既存メンバーへの joined 通知（送信失敗したメンバーは切断）
        let failed = self
            .message_pusher
            .broadcast(&outcome.notify_targets, joined_notification)
            .await;
        for target in &failed {
            close_session(
                self.repository.as_ref(),
                self.message_pusher.as_ref(),
                target,
            )
            .await;
        }
        let notified: Vec<SessionId> = outcome
            .notify_targets
            .iter()
            .filter(|target| !failed.contains(*target))
            .cloned()
            .collect();

        // 3. 参加者への確認応答
        let acknowledged = match self
            .message_pusher
            .push_to(session_id, acknowledgement)
            .await
        {
            Ok(()) => true,
            Err(MessagePushError::ClientNotFound(_)) => {
                tracing::warn!("Session '{}' vanished before acknowledgement", session_id);
                false
            }
            Err(e) => {
                tracing::warn!("Failed to acknowledge join of '{}': {}", session_id, e);
                close_session(
                    self.repository.as_ref(),
                    self.message_pusher.as_ref(),
                    session_id,
                )
                .await;
                false
            }
        };

        Ok(JoinReport {
            notified,
            closed: failed,
            superseded_session: outcome.superseded_session,
            acknowledged,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            Session, SessionIdFactory, message_pusher::MockMessagePusher,
            repository::MockSessionRepository,
        },
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemorySessionRepository,
        },
    };
    use tokio::sync::mpsc;

    struct Fixture {
        repository: Arc<InMemorySessionRepository>,
        message_pusher: Arc<WebSocketMessagePusher>,
        usecase: JoinRoomUseCase,
    }

    impl Fixture {
        fn new() -> Self {
            let repository = Arc::new(InMemorySessionRepository::default());
            let message_pusher = Arc::new(WebSocketMessagePusher::default());
            let usecase = JoinRoomUseCase::new(repository.clone(), message_pusher.clone());
            Self {
                repository,
                message_pusher,
                usecase,
            }
        }

        async fn connect(&self) -> (SessionId, mpsc::UnboundedReceiver<String>) {
            let id = SessionIdFactory::generate();
            let (tx, rx) = mpsc::unbounded_channel();
            self.repository
                .register_session(Session::new(id.clone(), Timestamp::new(0)))
                .await
                .unwrap();
            self.message_pusher.register_client(id.clone(), tx).await;
            (id, rx)
        }

        async fn join(&self, id: &SessionId, email: &str, room: &str) -> JoinReport {
            self.usecase
                .execute(
                    id,
                    Identity::new(email),
                    RoomName::new(room),
                    &format!("joined:{}", email),
                    &format!("ack:{}", email),
                )
                .await
                .unwrap()
        }
    }

    #[tokio::test]
    async fn test_join_empty_room_only_acknowledges() {
        // テスト項目: 空の Room への参加では確認応答のみが届く
        // given (前提条件):
        let fixture = Fixture::new();
        let (alice, mut alice_rx) = fixture.connect().await;

        // when (操作):
        let report = fixture.join(&alice, "a@x.com", "r1").await;

        // then (期待する結果):
        assert!(report.notified.is_empty());
        assert!(report.acknowledged);
        assert_eq!(alice_rx.recv().await, Some("ack:a@x.com".to_string()));
        assert!(alice_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_join_notifies_others_but_not_self() {
        // テスト項目: 既存メンバーに joined 通知が届き、参加者自身には届かない
        // given (前提条件):
        let fixture = Fixture::new();
        let (alice, mut alice_rx) = fixture.connect().await;
        let (bob, mut bob_rx) = fixture.connect().await;
        fixture.join(&alice, "a@x.com", "r1").await;
        alice_rx.recv().await;

        // when (操作):
        let report = fixture.join(&bob, "b@x.com", "r1").await;

        // then (期待する結果):
        assert_eq!(report.notified, vec![alice.clone()]);
        assert_eq!(alice_rx.recv().await, Some("joined:b@x.com".to_string()));
        assert_eq!(bob_rx.recv().await, Some("ack:b@x.com".to_string()));
        assert!(bob_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_join_closes_members_with_failed_delivery() {
        // テスト項目: 送信に失敗したメンバーは切断され、他のメンバーへの通知は続行される
        // given (前提条件):
        let fixture = Fixture::new();
        let (alice, alice_rx) = fixture.connect().await;
        let (bob, mut bob_rx) = fixture.connect().await;
        let (carol, _carol_rx) = fixture.connect().await;
        fixture.join(&alice, "a@x.com", "r1").await;
        fixture.join(&bob, "b@x.com", "r1").await;
        bob_rx.recv().await;
        drop(alice_rx);

        // when (操作):
        let report = fixture.join(&carol, "c@x.com", "r1").await;

        // then (期待する結果):
        assert_eq!(report.closed, vec![alice.clone()]);
        assert_eq!(report.notified, vec![bob.clone()]);
        assert_eq!(bob_rx.recv().await, Some("joined:c@x.com".to_string()));
        assert!(!fixture.repository.contains_session(&alice).await);
        let room = fixture
            .repository
            .get_room(&RoomName::new("r1"))
            .await
            .unwrap();
        assert!(!room.contains(&Identity::new("a@x.com")));
        assert!(room.contains(&Identity::new("c@x.com")));
    }

    #[tokio::test]
    async fn test_join_with_taken_identity_reports_superseded_session() {
        // テスト項目: 同じ identity で参加すると前のセッションが報告され、切断はされない
        // given (前提条件):
        let fixture = Fixture::new();
        let (first, _first_rx) = fixture.connect().await;
        let (second, _second_rx) = fixture.connect().await;
        fixture.join(&first, "a@x.com", "r1").await;

        // when (操作):
        let report = fixture.join(&second, "a@x.com", "r1").await;

        // then (期待する結果):
        assert_eq!(report.superseded_session, Some(first.clone()));
        assert!(fixture.repository.contains_session(&first).await);
        let identity = Identity::new("a@x.com");
        let holder = fixture.repository.session_of(&identity).await;
        assert_eq!(holder, Some(second));
    }

    #[tokio::test]
    async fn test_join_after_close_fails() {
        // テスト項目: 既に閉じられたセッションからの join はエラーになる
        // given (前提条件):
        let fixture = Fixture::new();
        let (alice, _alice_rx) = fixture.connect().await;
        fixture.repository.remove_session(&alice).await;

        // when (操作):
        let result = fixture
            .usecase
            .execute(
                &alice,
                Identity::new("a@x.com"),
                RoomName::new("r1"),
                "joined",
                "ack",
            )
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(JoinError::SessionClosed(alice.as_str().to_string()))
        );
    }

    #[tokio::test]
    async fn test_join_with_empty_identity_and_room() {
        // テスト項目: 空の identity / Room 名も有効なキーとして扱われる
        // given (前提条件):
        let fixture = Fixture::new();
        let (alice, _alice_rx) = fixture.connect().await;

        // when (操作):
        let report = fixture.join(&alice, "", "").await;

        // then (期待する結果):
        assert!(report.acknowledged);
        let empty = RoomName::new("");
        let room = fixture.repository.get_room(&empty).await.unwrap();
        assert!(room.contains(&Identity::new("")));
    }

    #[tokio::test]
    async fn test_repository_failure_is_not_reported_as_closed_session() {
        // テスト項目: セッション未登録以外のリポジトリエラーは SessionClosed にならず、そのまま返される
        // given (前提条件):
        let mut repository = MockSessionRepository::new();
        repository
            .expect_join_room()
            .returning(|_, _, _, _| Err(RepositoryError::DuplicateSession("s1".to_string())));
        let mut message_pusher = MockMessagePusher::new();
        message_pusher.expect_broadcast().never();
        message_pusher.expect_push_to().never();
        let usecase = JoinRoomUseCase::new(Arc::new(repository), Arc::new(message_pusher));
        let id = SessionId::new("s1".to_string()).unwrap();
        let (identity, room) = (Identity::new("a@x.com"), RoomName::new("r1"));

        // when (操作):
        let result = usecase.execute(&id, identity, room, "{}", "{}").await;

        // then (期待する結果):
        let expected = RepositoryError::DuplicateSession("s1".to_string());
        assert_eq!(result, Err(JoinError::Repository(expected)));
    }
}
