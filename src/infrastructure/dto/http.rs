//! HTTP API レスポンス DTO
//!
//! 読み取り専用の観測用エンドポイントで使う表現。メッセージ本文は
//! ここには含めない。

use serde::Serialize;

/// ルーム一覧の 1 エントリ
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub code: String,
    pub participant_count: usize,
    pub message_count: usize,
    pub created_at: String,
}

/// ルーム詳細
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub code: String,
    pub participants: Vec<ParticipantDetailDto>,
    pub message_count: usize,
    pub created_at: String,
}

/// ルーム詳細内の参加者表現
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDetailDto {
    pub user_id: String,
    pub joined_at: String,
}
