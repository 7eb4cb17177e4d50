//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - コードの正規化とエラー変換
//!
//! ### なぜこのテストが必要か
//! - コードは大文字・小文字を区別せず受け付ける契約のため、正規化が
//!   コーディネータ側で行われることを保証する
//! - 失敗時のメッセージに入力コードが含まれることを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：小文字コードでの参加
//! - 異常系：空のコード、存在しないコード、満室

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomCode, RoomError, RoomRegistry, RoomSnapshot};

use super::error::JoinRoomError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Registry（状態管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `conn` - 参加を要求した接続
    /// * `raw_code` - クライアントが入力したルームコード（正規化前）
    ///
    /// # Returns
    ///
    /// * `Ok(RoomSnapshot)` - 参加したルームのスナップショット
    /// * `Err(JoinRoomError)` - 参加失敗
    pub async fn execute(
        &self,
        conn: &ConnectionId,
        raw_code: String,
    ) -> Result<RoomSnapshot, JoinRoomError> {
        // 1. コードを正規化する（クライアントの大文字化は信頼しない）
        let code = RoomCode::new(raw_code).map_err(|_| JoinRoomError::EmptyRoomCode)?;

        // 2. 参加する。スナップショットの送付と presence の配信は
        //    Registry がルームのクリティカルセクション内で行う。
        let snapshot = self
            .registry
            .join_room(conn, code.clone())
            .await
            .map_err(|e| match e {
                RoomError::IdentityNotBound => JoinRoomError::IdentityNotBound,
                RoomError::RoomFull => JoinRoomError::RoomFull(code.as_str().to_string()),
                _ => JoinRoomError::RoomNotFound(code.as_str().to_string()),
            })?;

        Ok(snapshot)
    }
}
