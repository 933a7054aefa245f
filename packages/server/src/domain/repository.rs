//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 各メソッドはひとつの排他区間で完結する操作単位です。
//! 複数のインデックスにまたがる更新（join、切断時のクリーンアップ）を
//! 呼び出し側で組み立てる必要はありません。

use async_trait::async_trait;

use super::{
    DisconnectOutcome, Identity, JoinOutcome, RepositoryError, Room, RoomName, Session, SessionId,
    Timestamp,
};

/// Session Repository trait
///
/// Channel Registry / Identity Index / Room Index へのインターフェース。
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// 新しいセッションを登録
    async fn register_session(&self, session: Session) -> Result<(), RepositoryError>;

    /// セッションを参照する全てのエントリを削除（冪等）
    async fn remove_session(&self, session_id: &SessionId) -> DisconnectOutcome;

    /// セッションが登録中かどうか
    async fn contains_session(&self, session_id: &SessionId) -> bool;

    /// 登録中のセッション数を取得
    async fn count_sessions(&self) -> usize;

    /// Room への参加を適用し、通知対象を返す
    async fn join_room(
        &self,
        session_id: &SessionId,
        identity: Identity,
        room_name: RoomName,
        joined_at: Timestamp,
    ) -> Result<JoinOutcome, RepositoryError>;

    /// セッションに関連付けられた identity を取得
    async fn identity_of(&self, session_id: &SessionId) -> Option<Identity>;

    /// identity に関連付けられたセッションを取得
    async fn session_of(&self, identity: &Identity) -> Option<SessionId>;

    /// Room を取得
    async fn get_room(&self, room_name: &RoomName) -> Result<Room, RepositoryError>;

    /// 全ての Room を取得（名前順）
    async fn get_rooms(&self) -> Vec<Room>;
}
