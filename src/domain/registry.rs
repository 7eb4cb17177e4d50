//! Room Registry trait 定義
//!
//! コーディネータの状態（ルームとセッション）に対する操作を定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 配信の契約
//!
//! join / append_message / leave は、ルームの状態遷移と参加者への
//! イベント配信キューイングを同じクリティカルセクション内で行います。
//! これにより、同一ルームの全参加者は同じ全順序でイベントを観測します。
//! ルームをまたぐ順序は保証しません。

use async_trait::async_trait;

use super::entity::{ChatMessage, RoomDetail, RoomOverview, RoomSnapshot};
use super::error::RoomError;
use super::value_object::{ConnectionId, MessageContent, RoomCode, UserId};

#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// 接続のセッションを登録する
    async fn register_session(&self, conn: ConnectionId);

    /// 接続に userId を紐付ける
    ///
    /// 同じ値の再送は冪等。別の値への再紐付けは以降の操作にのみ反映され、
    /// 既にログへ追加されたメッセージの送信者は変化しない。
    async fn bind_identity(&self, conn: &ConnectionId, user_id: UserId);

    /// 新しいルームを作成し、作成者を唯一の参加者として登録する
    ///
    /// 割り当てたコードは呼び出し元にのみ返す（ブロードキャストしない）。
    async fn create_room(&self, conn: &ConnectionId) -> Result<RoomCode, RoomError>;

    /// ルームに参加し、スナップショットを返す
    ///
    /// 成功時、参加者本人には joined-room、全参加者には user-joined が
    /// 配信される。
    async fn join_room(
        &self,
        conn: &ConnectionId,
        code: RoomCode,
    ) -> Result<RoomSnapshot, RoomError>;

    /// メッセージをログに追加し、送信者を含む全参加者に配信する
    async fn append_message(
        &self,
        conn: &ConnectionId,
        content: MessageContent,
    ) -> Result<ChatMessage, RoomError>;

    /// 現在のルームから退出する（どのルームにもいなければ no-op）
    ///
    /// 残った参加者には user-left が配信される。空になったルームは
    /// その場で削除される。
    async fn leave(&self, conn: &ConnectionId) -> Option<RoomCode>;

    /// セッションを破棄する（退出処理を含む）
    ///
    /// 接続クローズ時に必ず 1 回呼ばれる。退出したルームのコードを返す。
    async fn remove_session(&self, conn: &ConnectionId) -> Option<RoomCode>;

    /// アクティブなルームの一覧を取得する
    async fn list_rooms(&self) -> Vec<RoomOverview>;

    /// ルームの詳細を取得する
    async fn room_detail(&self, code: &RoomCode) -> Option<RoomDetail>;
}
