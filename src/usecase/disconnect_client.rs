//! UseCase: 接続切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - セッション破棄と送信チャンネルの登録解除
//!
//! ### なぜこのテストが必要か
//! - 切断経路（正常クローズ・異常切断）を問わず退出処理が 1 回だけ
//!   走ることを保証する
//! - 最後の参加者の切断でルームが回収されることを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルーム所属中の切断、未所属の切断
//! - エッジケース：二重切断（冪等性）

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomCode, RoomRegistry};

/// 接続切断のユースケース
pub struct DisconnectClientUseCase {
    /// Registry（状態管理の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（イベント配信の抽象化）
    pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, pusher: Arc<dyn MessagePusher>) -> Self {
        Self { registry, pusher }
    }

    /// 接続切断を実行
    ///
    /// # Arguments
    ///
    /// * `conn` - 切断された接続
    ///
    /// # Returns
    ///
    /// 退出したルームのコード（どのルームにも属していなければ None）
    pub async fn execute(&self, conn: &ConnectionId) -> Option<RoomCode> {
        // 1. セッションを破棄する。所属ルームからの退出・残った参加者への
        //    user-left 配信・空ルームの削除は Registry が行う。
        let left = self.registry.remove_session(conn).await;

        // 2. 送信チャンネルを登録解除する
        self.pusher.unregister_client(conn).await;

        left
    }
}
