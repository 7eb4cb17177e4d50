//! UseCase: ルーム一覧・詳細取得処理

use std::sync::Arc;

use crate::domain::{RoomCode, RoomDetail, RoomOverview, RoomRegistry};

/// ルーム一覧・詳細取得のユースケース
///
/// 観測用の読み取り専用サーフェス。書き込みは行わない。
pub struct GetRoomsUseCase {
    /// Registry（状態管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomsUseCase {
    /// 新しい GetRoomsUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// アクティブなルームの一覧を取得する
    pub async fn list(&self) -> Vec<RoomOverview> {
        self.registry.list_rooms().await
    }

    /// ルームの詳細を取得する
    ///
    /// コードは大文字・小文字を区別せず解決する。空・存在しないコードは None。
    pub async fn detail(&self, raw_code: &str) -> Option<RoomDetail> {
        let code = RoomCode::new(raw_code).ok()?;
        self.registry.room_detail(&code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessagePusher, UserId};
    use crate::infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRegistry,
    };
    use std::collections::HashMap;
    use tokio::sync::{Mutex, mpsc};

    fn create_fixture() -> (GetRoomsUseCase, Arc<InMemoryRoomRegistry>, Arc<WebSocketMessagePusher>)
    {
        let clients = Arc::new(Mutex::new(HashMap::new()));
        let pusher = Arc::new(WebSocketMessagePusher::new(clients));
        let registry = Arc::new(InMemoryRoomRegistry::new(pusher.clone()));
        (GetRoomsUseCase::new(registry.clone()), registry, pusher)
    }

    async fn connect(
        registry: &InMemoryRoomRegistry,
        pusher: &WebSocketMessagePusher,
        user_id: &str,
    ) -> crate::domain::ConnectionId {
        let conn = crate::domain::ConnectionId::generate();
        let (tx, _rx) = mpsc::unbounded_channel();
        pusher.register_client(conn.clone(), tx).await;
        registry.register_session(conn.clone()).await;
        registry
            .bind_identity(&conn, UserId::new(user_id).unwrap())
            .await;
        conn
    }

    #[tokio::test]
    async fn test_list_returns_active_rooms() {
        // テスト項目: アクティブなルームだけが一覧に含まれる
        // given (前提条件):
        let (usecase, registry, pusher) = create_fixture();
        let alice = connect(&registry, &pusher, "alice").await;
        let code = registry.create_room(&alice).await.unwrap();

        // when (操作):
        let rooms = usecase.list().await;

        // then (期待する結果):
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].code, code);
        assert_eq!(rooms[0].participant_count, 1);
        assert_eq!(rooms[0].message_count, 0);
    }

    #[tokio::test]
    async fn test_detail_resolves_code_case_insensitively() {
        // テスト項目: 小文字のコードでも詳細を取得できる
        // given (前提条件):
        let (usecase, registry, pusher) = create_fixture();
        let alice = connect(&registry, &pusher, "alice").await;
        let code = registry.create_room(&alice).await.unwrap();

        // when (操作):
        let detail = usecase.detail(&code.as_str().to_ascii_lowercase()).await;

        // then (期待する結果):
        let detail = detail.unwrap();
        assert_eq!(detail.code, code);
        assert_eq!(detail.participants.len(), 1);
        assert_eq!(detail.participants[0].user_id.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_detail_returns_none_for_unknown_or_empty_code() {
        // テスト項目: 存在しない・空のコードの詳細は None になる
        // given (前提条件):
        let (usecase, _registry, _pusher) = create_fixture();

        // when (操作):
        // then (期待する結果):
        assert!(usecase.detail("NOROOM").await.is_none());
        assert!(usecase.detail("  ").await.is_none());
    }
}
