//! MessagePusher trait 定義
//!
//! クライアントへのメッセージ送信（通知）のインターフェース。
//! 送信はキューへの投入のみで、ネットワーク書き込みは接続ごとの送信タスクが行います。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{MessagePushError, SessionId};

/// クライアントへの送信キュー
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// セッションの送信キューを登録
    async fn register_client(&self, session_id: SessionId, sender: PusherChannel);

    /// セッションの送信キューを破棄する。
    ///
    /// キューが破棄されると送信タスクが終了し、接続が閉じられる。
    /// 登録されていた場合は `true` を返す。
    async fn unregister_client(&self, session_id: &SessionId) -> bool;

    /// 特定のセッションにメッセージを送信
    async fn push_to(&self, target: &SessionId, content: &str) -> Result<(), MessagePushError>;

    /// 複数のセッションにメッセージを送信（ベストエフォート）
    ///
    /// 送信に失敗したセッションのリストを返す。登録されていないセッションはスキップされ、
    /// 失敗には含まれない。
    async fn broadcast(&self, targets: &[SessionId], content: &str) -> Vec<SessionId>;
}
