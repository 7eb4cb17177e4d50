//! メッセージ送信（通知）の抽象化
//!
//! コーディネータは「接続 C へイベント E を届ける」という能力だけに
//! 依存します。具体的なトランスポート（WebSocket）は Infrastructure 層が
//! 実装します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::error::MessagePushError;
use super::value_object::ConnectionId;

/// 接続ごとの送信チャンネル
///
/// 送信はキューイングのみでブロックしない。遅いクライアントがルームの
/// クリティカルセクションを塞がないための分離点になる。
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
///
/// Registry・UseCase 層はこの trait に依存し、WebSocket 実装には
/// 依存しない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録する
    async fn register_client(&self, conn: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを登録解除する
    async fn unregister_client(&self, conn: &ConnectionId);

    /// 特定の接続にメッセージを送信する
    async fn push_to(&self, conn: &ConnectionId, content: &str) -> Result<(), MessagePushError>;

    /// 複数の接続にメッセージをブロードキャストする（部分失敗を許容）
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
