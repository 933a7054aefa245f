//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - セッションごとの送信キュー（`UnboundedSender`）を管理
//! - クライアントへのメッセージ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の受付と送信タスクの起動は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装はキューへの投入のみを行うため、ロック中にネットワーク書き込みで
//! ブロックすることはありません。キューを破棄すると送信タスクが終了し、接続が閉じられます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessagePushError, MessagePusher, PusherChannel, SessionId};

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// Key: session_id, Value: 送信キュー
    clients: Arc<Mutex<HashMap<SessionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<Mutex<HashMap<SessionId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, session_id: SessionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Session '{}' registered to MessagePusher", session_id);
        clients.insert(session_id, sender);
    }

    async fn unregister_client(&self, session_id: &SessionId) -> bool {
        let mut clients = self.clients.lock().await;
        let removed = clients.remove(session_id).is_some();
        if removed {
            tracing::debug!("Session '{}' unregistered from MessagePusher", session_id);
        }
        removed
    }

    async fn push_to(&self, target: &SessionId, content: &str) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        let sender = clients
            .get(target)
            .ok_or_else(|| MessagePushError::ClientNotFound(target.as_str().to_string()))?;
        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to session '{}'", target);
        Ok(())
    }

    async fn broadcast(&self, targets: &[SessionId], content: &str) -> Vec<SessionId> {
        let clients = self.clients.lock().await;
        let mut failed = Vec::new();

        for target in targets {
            match clients.get(target) {
                Some(sender) => {
                    // ブロードキャストでは一部の送信失敗を許容
                    if let Err(e) = sender.send(content.to_string()) {
                        tracing::warn!("Failed to push message to session '{}': {}", target, e);
                        failed.push(target.clone());
                    } else {
                        tracing::debug!("Broadcasted message to session '{}'", target);
                    }
                }
                None => {
                    tracing::warn!("Session '{}' not found during broadcast, skipping", target);
                }
            }
        }

        failed
    }
}
