//! UseCase: セッション接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectSessionUseCase::execute() メソッド
//! - 新しいチャンネルへのセッション ID の割り当てと登録
//!
//! ### なぜこのテストが必要か
//! - セッション ID は call / callAccepted の宛先になるため、登録中のセッション間で一意である必要がある
//! - 接続直後は他のクライアントから見える副作用がないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規チャンネルの接続
//! - 異常系：セッション ID の衝突が続く場合

use std::sync::Arc;

use denwa_shared::time::get_timestamp_millis;

use crate::domain::{
    MessagePusher, PusherChannel, RepositoryError, Session, SessionId, SessionIdFactory,
    SessionRepository, Timestamp,
};

use super::error::ConnectError;

/// セッション ID の生成を試みる回数
const MAX_SESSION_ID_ATTEMPTS: usize = 3;

/// セッション接続のユースケース
pub struct ConnectSessionUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// セッション ID の生成器（テストで差し替え可能）
    generate_id: fn() -> SessionId,
}

impl ConnectSessionUseCase {
    /// 新しい ConnectSessionUseCase を作成
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            generate_id: SessionIdFactory::generate,
        }
    }

    /// セッション接続を実行
    ///
    /// 1. 一意なセッション ID を生成して Repository に登録
    /// 2. 送信キューを MessagePusher に登録
    ///
    /// # Arguments
    ///
    /// * `sender` - クライアントへのメッセージ送信用キュー
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - 登録されたセッション
    /// * `Err(ConnectError)` - セッション ID を割り当てられなかった
    pub async fn execute(&self, sender: PusherChannel) -> Result<Session, ConnectError> {
        let connected_at = Timestamp::new(get_timestamp_millis());

        for _ in 0..MAX_SESSION_ID_ATTEMPTS {
            let session = Session::new((self.generate_id)(), connected_at);
            match self.repository.register_session(session.clone()).await {
                Ok(()) => {
                    self.message_pusher
                        .register_client(session.id.clone(), sender)
                        .await;
                    return Ok(session);
                }
                Err(RepositoryError::DuplicateSession(id)) => {
                    tracing::warn!("Session ID '{}' collided, regenerating", id);
                }
                Err(e) => {
                    tracing::warn!("Failed to register session: {}", e);
                }
            }
        }

        Err(ConnectError::SessionIdExhausted(MAX_SESSION_ID_ATTEMPTS))
    }

    /// 登録中のセッション数を取得
    pub async fn count_sessions(&self) -> usize {
        self.repository.count_sessions().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemorySessionRepository,
    };
    use tokio::sync::mpsc;

    fn create_usecase() -> (
        ConnectSessionUseCase,
        Arc<InMemorySessionRepository>,
        Arc<WebSocketMessagePusher>,
    ) {
        let repository = Arc::new(InMemorySessionRepository::default());
        let message_pusher = Arc::new(WebSocketMessagePusher::default());
        let usecase = ConnectSessionUseCase::new(repository.clone(), message_pusher.clone());
        (usecase, repository, message_pusher)
    }

    fn fixed_id() -> SessionId {
        SessionId::new("fixed".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_connect_session_success() {
        // テスト項目: 新しいチャンネルにセッション ID が割り当てられ、登録される
        // given (前提条件):
        let (usecase, repository, message_pusher) = create_usecase();
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        let session = usecase.execute(tx).await.unwrap();

        // then (期待する結果):
        assert!(repository.contains_session(&session.id).await);
        assert_eq!(usecase.count_sessions().await, 1);
        message_pusher.push_to(&session.id, "ping").await.unwrap();
        assert_eq!(rx.recv().await, Some("ping".to_string()));
    }

    #[tokio::test]
    async fn test_connect_assigns_distinct_ids() {
        // テスト項目: 複数の接続にそれぞれ異なるセッション ID が割り当てられる
        // given (前提条件):
        let (usecase, _repository, _message_pusher) = create_usecase();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        // when (操作):
        let first = usecase.execute(tx1).await.unwrap();
        let second = usecase.execute(tx2).await.unwrap();

        // then (期待する結果):
        assert_ne!(first.id, second.id);
        assert_eq!(usecase.count_sessions().await, 2);
    }

    #[tokio::test]
    async fn test_connect_fails_when_ids_keep_colliding() {
        // テスト項目: セッション ID が衝突し続けるとエラーになり、既存セッションは上書きされない
        // given (前提条件):
        let (mut usecase, _repository, message_pusher) = create_usecase();
        usecase.generate_id = fixed_id;
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        usecase.execute(tx1).await.unwrap();

        // when (操作):
        let result = usecase.execute(tx2).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ConnectError::SessionIdExhausted(MAX_SESSION_ID_ATTEMPTS))
        );
        assert_eq!(usecase.count_sessions().await, 1);
        let pushed = message_pusher.push_to(&fixed_id(), "still mine").await;
        assert!(pushed.is_ok());
        assert_eq!(rx1.recv().await, Some("still mine".to_string()));
    }
}
