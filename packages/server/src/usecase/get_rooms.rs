//! UseCase: Room 一覧の取得

use std::sync::Arc;

use crate::domain::{Room, SessionRepository};

/// Room 一覧取得のユースケース
pub struct GetRoomsUseCase {
    repository: Arc<dyn SessionRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// 全ての Room を名前順で返す
    ///
    /// メンバーが全員切断した Room も一覧に残る。
    pub async fn execute(&self) -> Vec<Room> {
        self.repository.get_rooms().await
    }
}
