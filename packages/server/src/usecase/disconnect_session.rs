//! UseCase: セッション切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectSessionUseCase::execute() メソッド
//! - 切断時に Channel Registry / Identity Index / Room Index から全ての参照が消えること
//!
//! ### なぜこのテストが必要か
//! - 切断済みのチャンネルへの参照が残ると、以降の join 通知や call の転送先として使われてしまう
//! - 切断は読み込みエラー、書き込みエラー、正常終了のどの経路からも呼ばれるため冪等である必要がある
//!
//! ### どのような状況を想定しているか
//! - 正常系：join 済みセッションの切断
//! - エッジケース：join していないセッションの切断、二重の切断
//!
//! 切断時に他のメンバーへの通知は行わない（left メッセージは存在しない）。

use std::sync::Arc;

use crate::domain::{DisconnectOutcome, MessagePusher, SessionId, SessionRepository};

/// セッション切断のユースケース
pub struct DisconnectSessionUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectSessionUseCase {
    /// 新しい DisconnectSessionUseCase を作成
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// セッション切断を実行
    ///
    /// # Arguments
    ///
    /// * `session_id` - 切断するセッションの ID
    ///
    /// # Returns
    ///
    /// 削除された identity と、メンバーから外れた Room の一覧
    pub async fn execute(&self, session_id: &SessionId) -> DisconnectOutcome {
        close_session(
            self.repository.as_ref(),
            self.message_pusher.as_ref(),
            session_id,
        )
        .await
    }
}

/// セッションを閉じる
///
/// インデックスから全ての参照を削除した後、送信キューを破棄する。
/// キューの破棄により接続の送信タスクが終了し、その接続自身の切断処理が走るが、
/// そちらは既に削除済みのため何もしない。
pub(super) async fn close_session(
    repository: &dyn SessionRepository,
    message_pusher: &dyn MessagePusher,
    session_id: &SessionId,
) -> DisconnectOutcome {
    let outcome = repository.remove_session(session_id).await;
    message_pusher.unregister_client(session_id).await;

    if outcome.was_registered {
        tracing::info!(
            "Session '{}' closed (identity: {:?}, rooms: {:?})",
            session_id,
            outcome.identity.as_ref().map(|i| i.as_str()),
            outcome
                .rooms_left
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
        );
    }

    outcome
}
