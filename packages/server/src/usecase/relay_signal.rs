//! UseCase: offer / answer の転送処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelaySignalUseCase::execute() メソッド
//! - セッション ID で指定されたピアへのメッセージ転送
//!
//! ### なぜこのテストが必要か
//! - 宛先が存在しない場合、送信者には何も返さず、接続も維持しなければならない
//! - 宛先への送信に失敗した場合、宛先のチャンネルを閉じる必要がある
//!
//! ### どのような状況を想定しているか
//! - 正常系：登録中のピアへの転送
//! - 異常系：存在しないピア、送信キューが閉じたピア

use std::sync::Arc;

use crate::domain::{MessagePushError, MessagePusher, SessionId, SessionRepository};

use super::{disconnect_session::close_session, error::RelayError};

/// offer / answer 転送のユースケース
///
/// メッセージの中身（peerSocketId の書き換えなど）は呼び出し側で組み立て済みのものを受け取る。
pub struct RelaySignalUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelaySignalUseCase {
    /// 新しい RelaySignalUseCase を作成
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 転送を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - 送信者のセッション ID
    /// * `target` - 宛先のセッション ID
    /// * `payload` - 宛先に届ける JSON メッセージ
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 転送成功
    /// * `Err(RelayError::PeerNotFound)` - 宛先が存在しない（何も送られない）
    /// * `Err(RelayError::DeliveryFailed)` - 宛先への送信に失敗し、宛先を切断した
    pub async fn execute(
        &self,
        sender: &SessionId,
        target: &SessionId,
        payload: &str,
    ) -> Result<(), RelayError> {
        if !self.repository.contains_session(target).await {
            return Err(RelayError::PeerNotFound(target.as_str().to_string()));
        }

        match self.message_pusher.push_to(target, payload).await {
            Ok(()) => {
                tracing::debug!("Relayed signal from '{}' to '{}'", sender, target);
                Ok(())
            }
            Err(MessagePushError::ClientNotFound(_)) => {
                Err(RelayError::PeerNotFound(target.as_str().to_string()))
            }
            Err(MessagePushError::PushFailed(e)) => {
                tracing::warn!("Forward to '{}' failed, closing it: {}", target, e);
                close_session(
                    self.repository.as_ref(),
                    self.message_pusher.as_ref(),
                    target,
                )
                .await;
                Err(RelayError::DeliveryFailed(target.as_str().to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{PusherChannel, Session, Timestamp, message_pusher::MockMessagePusher},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemorySessionRepository,
        },
    };
    use tokio::sync::mpsc;

    fn sid(value: &str) -> SessionId {
        SessionId::new(value.to_string()).unwrap()
    }

    async fn repository_with(ids: &[&str]) -> Arc<InMemorySessionRepository> {
        let repository = Arc::new(InMemorySessionRepository::default());
        for id in ids {
            repository
                .register_session(Session::new(sid(id), Timestamp::new(0)))
                .await
                .unwrap();
        }
        repository
    }

    #[tokio::test]
    async fn test_relay_to_live_peer() {
        // テスト項目: 登録中のピアにのみメッセージが届く
        // given (前提条件):
        let repository = repository_with(&["s1", "s2", "s3"]).await;
        let message_pusher = Arc::new(WebSocketMessagePusher::default());
        let mut receivers = Vec::new();
        for id in ["s1", "s2", "s3"] {
            let (tx, rx): (PusherChannel, _) = mpsc::unbounded_channel();
            message_pusher.register_client(sid(id), tx).await;
            receivers.push(rx);
        }
        let usecase = RelaySignalUseCase::new(repository, message_pusher);

        // when (操作):
        let result = usecase.execute(&sid("s1"), &sid("s2"), "offer").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert!(receivers[0].try_recv().is_err());
        assert_eq!(receivers[1].recv().await, Some("offer".to_string()));
        assert!(receivers[2].try_recv().is_err());
    }

    #[tokio::test]
    async fn test_relay_to_unknown_peer_sends_nothing() {
        // テスト項目: 存在しない宛先への転送は PeerNotFound になり、何も送信されない
        // given (前提条件):
        let repository = repository_with(&["s1"]).await;
        let mut message_pusher = MockMessagePusher::new();
        message_pusher.expect_push_to().never();
        message_pusher.expect_unregister_client().never();
        let usecase = RelaySignalUseCase::new(repository.clone(), Arc::new(message_pusher));

        // when (操作):
        let result = usecase.execute(&sid("s1"), &sid("ghost"), "offer").await;

        // then (期待する結果):
        assert_eq!(result, Err(RelayError::PeerNotFound("ghost".to_string())));
        // 送信者のセッションはそのまま
        assert!(repository.contains_session(&sid("s1")).await);
    }

    #[tokio::test]
    async fn test_relay_failure_closes_target() {
        // テスト項目: 宛先への送信に失敗すると宛先が切断される
        // given (前提条件):
        let repository = repository_with(&["s1", "s2"]).await;
        let mut message_pusher = MockMessagePusher::new();
        message_pusher
            .expect_push_to()
            .withf(|id, content| id.as_str() == "s2" && content == "answer")
            .times(1)
            .returning(|_, _| Err(MessagePushError::PushFailed("channel closed".to_string())));
        message_pusher
            .expect_unregister_client()
            .withf(|id| id.as_str() == "s2")
            .times(1)
            .returning(|_| true);
        let usecase = RelaySignalUseCase::new(repository.clone(), Arc::new(message_pusher));

        // when (操作):
        let result = usecase.execute(&sid("s1"), &sid("s2"), "answer").await;

        // then (期待する結果):
        assert_eq!(result, Err(RelayError::DeliveryFailed("s2".to_string())));
        assert!(!repository.contains_session(&sid("s2")).await);
        assert!(repository.contains_session(&sid("s1")).await);
    }

    #[tokio::test]
    async fn test_relay_to_peer_without_queue_is_not_found() {
        // テスト項目: 送信キュー未登録の宛先は PeerNotFound となり、切断されない
        // given (前提条件):
        let repository = repository_with(&["s1", "s2"]).await;
        let mut message_pusher = MockMessagePusher::new();
        message_pusher
            .expect_push_to()
            .times(1)
            .returning(|id, _| Err(MessagePushError::ClientNotFound(id.as_str().to_string())));
        message_pusher.expect_unregister_client().never();
        let usecase = RelaySignalUseCase::new(repository.clone(), Arc::new(message_pusher));

        // when (操作):
        let result = usecase.execute(&sid("s1"), &sid("s2"), "offer").await;

        // then (期待する結果):
        assert_eq!(result, Err(RelayError::PeerNotFound("s2".to_string())));
        assert!(repository.contains_session(&sid("s2")).await);
    }
}
