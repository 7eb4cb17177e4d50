//! UseCase: ルーム作成処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreateRoomUseCase::execute() メソッド
//! - ルーム割り当てと room-created の返送
//!
//! ### なぜこのテストが必要か
//! - コードは作成者にのみ返し、ブロードキャストしないことを保証する
//! - identity 未紐付けの接続を弾くことを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルーム作成と room-created の送信
//! - 異常系：identity 未紐付け

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomCode, RoomError, RoomRegistry};
use crate::infrastructure::dto::websocket::ServerEvent;

use super::error::CreateRoomError;

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    /// Registry（状態管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（イベント配信の抽象化）
    pusher: Arc<dyn MessagePusher>,
}

impl CreateRoomUseCase {
    /// 新しい CreateRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, pusher: Arc<dyn MessagePusher>) -> Self {
        Self { registry, pusher }
    }

    /// ルーム作成を実行
    ///
    /// # Arguments
    ///
    /// * `conn` - 作成を要求した接続
    ///
    /// # Returns
    ///
    /// * `Ok(RoomCode)` - 割り当てられたルームコード
    /// * `Err(CreateRoomError)` - 作成失敗
    pub async fn execute(&self, conn: &ConnectionId) -> Result<RoomCode, CreateRoomError> {
        // 1. ルームを割り当てる（作成者が唯一の参加者になる）
        let code = self.registry.create_room(conn).await.map_err(|e| match e {
            RoomError::IdentityNotBound => CreateRoomError::IdentityNotBound,
            _ => CreateRoomError::CodeSpaceExhausted,
        })?;

        // 2. 作成者のみに room-created を返す（ブロードキャストしない）
        let event = serde_json::to_string(&ServerEvent::RoomCreated {
            code: code.as_str().to_string(),
        })
        .expect("server events always serialize");
        if let Err(e) = self.pusher.push_to(conn, &event).await {
            tracing::warn!("Failed to push room-created to '{}': {}", conn, e);
        }

        Ok(code)
    }
}
