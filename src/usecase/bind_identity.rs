//! UseCase: ユーザー ID の紐付け
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - BindIdentityUseCase::execute() メソッド
//! - userId の検証とセッションへの記録
//!
//! ### なぜこのテストが必要か
//! - 空の userId を弾くのはコーディネータ側の責務（クライアントの
//!   ガードは信頼しない）
//! - 同じ値の再送が冪等であることを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：初回の紐付け、同じ値の再送
//! - 異常系：空・空白のみの userId

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomRegistry, UserId};

use super::error::BindIdentityError;

/// ユーザー ID 紐付けのユースケース
pub struct BindIdentityUseCase {
    /// Registry（状態管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl BindIdentityUseCase {
    /// 新しい BindIdentityUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ユーザー ID の紐付けを実行
    ///
    /// # Arguments
    ///
    /// * `conn` - 対象の接続
    /// * `raw_user_id` - クライアントが申告した userId（検証前）
    ///
    /// # Returns
    ///
    /// * `Ok(UserId)` - 紐付けた userId
    /// * `Err(BindIdentityError)` - 検証エラー
    pub async fn execute(
        &self,
        conn: &ConnectionId,
        raw_user_id: String,
    ) -> Result<UserId, BindIdentityError> {
        // 1. 検証（空の userId は拒否、それ以外は不透明な値としてそのまま）
        let user_id =
            UserId::new(raw_user_id).map_err(|_| BindIdentityError::EmptyUserId)?;

        // 2. セッションに記録する。別の値への再紐付けは以降の操作にのみ
        //    反映され、送信済みメッセージの送信者は変化しない。
        self.registry.bind_identity(conn, user_id.clone()).await;

        Ok(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRegistry,
    };
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    fn create_test_usecase() -> (BindIdentityUseCase, Arc<InMemoryRoomRegistry>) {
        let clients = Arc::new(Mutex::new(HashMap::new()));
        let pusher = Arc::new(WebSocketMessagePusher::new(clients));
        let registry = Arc::new(InMemoryRoomRegistry::new(pusher));
        (BindIdentityUseCase::new(registry.clone()), registry)
    }

    #[tokio::test]
    async fn test_bind_identity_success() {
        // テスト項目: userId が正常に紐付けられる
        // given (前提条件):
        let (usecase, registry) = create_test_usecase();
        let conn = ConnectionId::generate();
        registry.register_session(conn.clone()).await;

        // when (操作):
        let result = usecase.execute(&conn, "alice".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Ok(UserId::new("alice").unwrap()));
    }

    #[tokio::test]
    async fn test_bind_identity_rejects_empty_user_id() {
        // テスト項目: 空の userId は拒否される
        // given (前提条件):
        let (usecase, registry) = create_test_usecase();
        let conn = ConnectionId::generate();
        registry.register_session(conn.clone()).await;

        // when (操作):
        let result = usecase.execute(&conn, "   ".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Err(BindIdentityError::EmptyUserId));
    }

    #[tokio::test]
    async fn test_bind_identity_is_idempotent_for_same_value() {
        // テスト項目: 同じ値の再送が冪等に処理される
        // given (前提条件):
        let (usecase, registry) = create_test_usecase();
        let conn = ConnectionId::generate();
        registry.register_session(conn.clone()).await;

        // when (操作):
        let first = usecase.execute(&conn, "alice".to_string()).await;
        let second = usecase.execute(&conn, "alice".to_string()).await;

        // then (期待する結果):
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_rebinding_does_not_relabel_sent_messages() {
        // テスト項目: 別の値への再紐付けが送信済みメッセージに影響しない
        // given (前提条件):
        let (usecase, registry) = create_test_usecase();
        let conn = ConnectionId::generate();
        registry.register_session(conn.clone()).await;
        usecase.execute(&conn, "alice".to_string()).await.unwrap();
        let code = registry.create_room(&conn).await.unwrap();
        let sent = registry
            .append_message(&conn, crate::domain::MessageContent::new("hi").unwrap())
            .await
            .unwrap();

        // when (操作): 別の userId に再紐付けしてもう 1 通送る
        usecase.execute(&conn, "alice2".to_string()).await.unwrap();
        let sent_after = registry
            .append_message(&conn, crate::domain::MessageContent::new("again").unwrap())
            .await
            .unwrap();

        // then (期待する結果): 過去のメッセージの送信者は変わらない
        assert_eq!(sent.sender.as_str(), "alice");
        assert_eq!(sent_after.sender.as_str(), "alice2");
        let detail = registry.room_detail(&code).await.unwrap();
        assert_eq!(detail.message_count, 2);
    }
}
