//! ドメイン層のエラー型

use thiserror::Error;

/// 値オブジェクト構築時の検証エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("user id must not be empty")]
    EmptyUserId,
    #[error("room code must not be empty")]
    EmptyRoomCode,
    #[error("message must not be empty")]
    EmptyMessage,
}

/// ルーム操作のエラー
///
/// いずれもユーザー操作で回復可能な条件であり、プロセスを落とす
/// ことはない。UseCase 層でユーザー向けのメッセージに変換される。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoomError {
    #[error("room not found")]
    RoomNotFound,
    #[error("room is full")]
    RoomFull,
    #[error("not in a room")]
    NotInRoom,
    #[error("identity not bound")]
    IdentityNotBound,
    #[error("room code space exhausted")]
    CodeSpaceExhausted,
}

/// メッセージ送信（push）のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessagePushError {
    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),
    #[error("failed to push message: {0}")]
    PushFailed(String),
}
