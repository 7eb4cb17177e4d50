//! ドメイン層の値オブジェクト
//!
//! 不変条件（空文字の禁止、ルームコードの正規化など）はコンストラクタで
//! 強制し、構築後は常に有効な値として扱います。

use uuid::Uuid;

use super::error::ValidationError;

/// 接続の不透明ハンドル
///
/// WebSocket 接続ごとにサーバー側で採番する。クライアントが申告する
/// userId とは独立で、接続が閉じると失効する。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// 新しい ConnectionId を採番する
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// ルームコード
///
/// 入力時は大文字・小文字を区別せず、常に大文字へ正規化して保持する。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomCode(String);

impl RoomCode {
    /// 入力文字列から RoomCode を生成する
    ///
    /// 前後の空白を除去し、大文字に正規化する。空になる入力はエラー。
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let normalized = raw.into().trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(ValidationError::EmptyRoomCode);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for RoomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// クライアントが申告する不透明な識別子
///
/// 認証はしない。同じ userId を複数の接続が名乗ることもあり、その場合も
/// それぞれ独立した参加者として扱われる。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// 入力文字列から UserId を生成する
    ///
    /// 値は不透明なのでそのまま保持するが、空文字・空白のみは拒否する。
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ValidationError::EmptyUserId);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// メッセージ本文
///
/// 前後の空白を除去した上で保持する。空になる本文は拒否する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let trimmed = raw.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// メッセージ ID（ルーム内で一意）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    /// 新しい MessageId を採番する
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// コーディネータが採番する UTC ミリ秒タイムスタンプ
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
