//! UseCase: Room 詳細の取得

use std::sync::Arc;

use crate::domain::{RepositoryError, Room, RoomName, SessionRepository};

use super::error::GetRoomDetailError;

/// Room 詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    repository: Arc<dyn SessionRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// 指定した Room のスナップショットを返す
    pub async fn execute(&self, room_name: RoomName) -> Result<Room, GetRoomDetailError> {
        self.repository
            .get_room(&room_name)
            .await
            .map_err(|e| match e {
                RepositoryError::RoomNotFound(_) => GetRoomDetailError::RoomNotFound,
                other => GetRoomDetailError::Repository(other),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Identity, Session, SessionId, Timestamp, repository::MockSessionRepository},
        infrastructure::repository::InMemorySessionRepository,
    };

    #[tokio::test]
    async fn test_get_room_detail_success() {
        // テスト項目: 既存の Room のメンバーと参加時刻を取得できる
        // given (前提条件):
        let repository = Arc::new(InMemorySessionRepository::default());
        let id = SessionId::new("s1".to_string()).unwrap();
        repository
            .register_session(Session::new(id.clone(), Timestamp::new(0)))
            .await
            .unwrap();
        repository
            .join_room(
                &id,
                Identity::new("a@x.com"),
                RoomName::new("r1"),
                Timestamp::new(42),
            )
            .await
            .unwrap();
        let usecase = GetRoomDetailUseCase::new(repository);

        // when (操作):
        let room = usecase.execute(RoomName::new("r1")).await.unwrap();

        // then (期待する結果):
        assert_eq!(room.name, RoomName::new("r1"));
        let membership = room.membership(&Identity::new("a@x.com")).unwrap();
        assert_eq!(membership.session_id, id);
        assert_eq!(membership.joined_at, Timestamp::new(42));
    }

    #[tokio::test]
    async fn test_get_room_detail_not_found() {
        // テスト項目: 存在しない Room は RoomNotFound を返す
        // given (前提条件):
        let repository = Arc::new(InMemorySessionRepository::default());
        let usecase = GetRoomDetailUseCase::new(repository);

        // when (操作):
        let result = usecase.execute(RoomName::new("nowhere")).await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), GetRoomDetailError::RoomNotFound);
    }

    #[tokio::test]
    async fn test_get_room_detail_keeps_other_repository_errors() {
        // テスト項目: RoomNotFound 以外のリポジトリエラーは Repository エラーとして返される
        // given (前提条件):
        let mut repository = MockSessionRepository::new();
        repository
            .expect_get_room()
            .returning(|_| Err(RepositoryError::SessionNotFound("s1".to_string())));
        let usecase = GetRoomDetailUseCase::new(Arc::new(repository));

        // when (操作):
        let result = usecase.execute(RoomName::new("r1")).await;

        // then (期待する結果):
        let expected = RepositoryError::SessionNotFound("s1".to_string());
        assert_eq!(result, Err(GetRoomDetailError::Repository(expected)));
    }
}
