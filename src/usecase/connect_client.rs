//! UseCase: 接続の受け入れ処理

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel, RoomRegistry};

/// 接続受け入れのユースケース
pub struct ConnectClientUseCase {
    /// Registry（状態管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（イベント配信の抽象化）
    pusher: Arc<dyn MessagePusher>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, pusher: Arc<dyn MessagePusher>) -> Self {
        Self { registry, pusher }
    }

    /// 接続の受け入れを実行
    ///
    /// # Arguments
    ///
    /// * `conn` - サーバー側で採番した接続のハンドル
    /// * `sender` - この接続へのイベント送信用チャンネル
    pub async fn execute(&self, conn: ConnectionId, sender: PusherChannel) {
        // 1. 送信チャンネルを登録（以降この接続はイベント配信の対象になる）
        self.pusher.register_client(conn.clone(), sender).await;

        // 2. セッションを作成（userId は set-user-id で後から紐付く）
        self.registry.register_session(conn).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use crate::infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRegistry,
    };
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[tokio::test]
    async fn test_connect_registers_session_and_channel() {
        // テスト項目: 接続の受け入れでセッションと送信チャンネルが登録される
        // given (前提条件):
        let clients = Arc::new(Mutex::new(HashMap::new()));
        let pusher = Arc::new(WebSocketMessagePusher::new(clients));
        let registry = Arc::new(InMemoryRoomRegistry::new(pusher.clone()));
        let usecase = ConnectClientUseCase::new(registry.clone(), pusher.clone());

        // when (操作):
        let conn = ConnectionId::generate();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        usecase.execute(conn.clone(), tx).await;

        // then (期待する結果): セッションが存在し、ルーム作成と配信が通る
        registry
            .bind_identity(&conn, UserId::new("alice").unwrap())
            .await;
        let result = registry.create_room(&conn).await;
        assert!(result.is_ok());

        pusher.push_to(&conn, "ping").await.unwrap();
        assert_eq!(rx.recv().await, Some("ping".to_string()));
    }
}
