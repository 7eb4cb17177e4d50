//! UseCase 層のエラー型
//!
//! ここで定義する `#[error]` メッセージは、そのままクライアントへ届く
//! `error` イベントの本文になります。構造化されたエラーコードは持たない
//! 契約（単一のメッセージチャンネル）のため、文言が実質的な API です。

use thiserror::Error;

/// ユーザー ID 紐付けのエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindIdentityError {
    #[error("user id must not be empty")]
    EmptyUserId,
}

/// ルーム作成のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CreateRoomError {
    #[error("set a user id before creating a room")]
    IdentityNotBound,
    #[error("could not allocate a unique room code, try again")]
    CodeSpaceExhausted,
}

/// ルーム参加のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JoinRoomError {
    #[error("set a user id before joining a room")]
    IdentityNotBound,
    #[error("room code must not be empty")]
    EmptyRoomCode,
    #[error("room {0} was not found")]
    RoomNotFound(String),
    #[error("room {0} is already full")]
    RoomFull(String),
}

/// メッセージ送信のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendMessageError {
    #[error("set a user id before sending messages")]
    IdentityNotBound,
    #[error("message must not be empty")]
    EmptyMessage,
    #[error("join a room before sending messages")]
    NotInRoom,
}
