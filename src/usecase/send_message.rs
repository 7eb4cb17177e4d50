//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 本文の検証（trim して空なら拒否）とエラー変換
//!
//! ### なぜこのテストが必要か
//! - 空メッセージの排除はクライアント側のガードに頼らない契約
//! - 失敗時に Registry の状態（メッセージログ）が変化しないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：trim 済み本文での送信
//! - 異常系：空白のみの本文、ルーム未参加、identity 未紐付け

use std::sync::Arc;

use crate::domain::{ChatMessage, ConnectionId, MessageContent, RoomError, RoomRegistry};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Registry（状態管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `conn` - 送信した接続
    /// * `raw_text` - クライアントが送信した本文（検証前）
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - ログに追加されたメッセージ
    /// * `Err(SendMessageError)` - 送信失敗
    pub async fn execute(
        &self,
        conn: &ConnectionId,
        raw_text: String,
    ) -> Result<ChatMessage, SendMessageError> {
        // 1. 検証（前後の空白を除去し、空になる本文は拒否）
        let content =
            MessageContent::new(raw_text).map_err(|_| SendMessageError::EmptyMessage)?;

        // 2. ログへ追記し、送信者を含む全参加者へ配信する（Registry が
        //    ルームのクリティカルセクション内で行う）
        let message = self
            .registry
            .append_message(conn, content)
            .await
            .map_err(|e| match e {
                RoomError::IdentityNotBound => SendMessageError::IdentityNotBound,
                _ => SendMessageError::NotInRoom,
            })?;

        Ok(message)
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

    struct Fixture {
        usecase: SendMessageUseCase,
        registry: Arc<InMemoryRoomRegistry>,
        pusher: Arc<WebSocketMessagePusher>,
    }

    fn create_fixture() -> Fixture {
        let clients = Arc::new(Mutex::new(HashMap::new()));
        let pusher = Arc::new(WebSocketMessagePusher::new(clients));
        let registry = Arc::new(InMemoryRoomRegistry::new(pusher.clone()));
        Fixture {
            usecase: SendMessageUseCase::new(registry.clone()),
            registry,
            pusher,
        }
    }

    async fn connect(fixture: &Fixture, user_id: &str) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let conn = ConnectionId::generate();
        let (tx, rx) = mpsc::unbounded_channel();
        fixture.pusher.register_client(conn.clone(), tx).await;
        fixture.registry.register_session(conn.clone()).await;
        fixture
            .registry
            .bind_identity(&conn, UserId::new(user_id).unwrap())
            .await;
        (conn, rx)
    }

    #[tokio::test]
    async fn test_send_message_trims_content() {
        // テスト項目: 本文の前後の空白が除去されて送信される
        // given (前提条件):
        let fixture = create_fixture();
        let (alice, _rx) = connect(&fixture, "alice").await;
        fixture.registry.create_room(&alice).await.unwrap();

        // when (操作):
        let result = fixture.usecase.execute(&alice, "  hi  ".to_string()).await;

        // then (期待する結果):
        let message = result.unwrap();
        assert_eq!(message.content.as_str(), "hi");
        assert_eq!(message.sender.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_send_empty_message_fails_without_side_effects() {
        // テスト項目: 空白のみの本文は拒否され、ログに何も追加されない
        // given (前提条件):
        let fixture = create_fixture();
        let (alice, mut rx) = connect(&fixture, "alice").await;
        let code = fixture.registry.create_room(&alice).await.unwrap();

        // when (操作):
        let result = fixture.usecase.execute(&alice, "   ".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Err(SendMessageError::EmptyMessage));
        let detail = fixture.registry.room_detail(&code).await.unwrap();
        assert_eq!(detail.message_count, 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_send_without_room_fails() {
        // テスト項目: ルーム未参加の接続の送信は NotInRoom になる
        // given (前提条件):
        let fixture = create_fixture();
        let (alice, _rx) = connect(&fixture, "alice").await;

        // when (操作):
        let result = fixture.usecase.execute(&alice, "hi".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Err(SendMessageError::NotInRoom));
    }

    #[tokio::test]
    async fn test_send_without_identity_fails() {
        // テスト項目: identity 未紐付けの接続の送信はエラーになる
        // given (前提条件):
        let fixture = create_fixture();
        let conn = ConnectionId::generate();
        fixture.registry.register_session(conn.clone()).await;

        // when (操作):
        let result = fixture.usecase.execute(&conn, "hi".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Err(SendMessageError::IdentityNotBound));
    }
}
