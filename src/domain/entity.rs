//! ドメイン層のエンティティ
//!
//! Room が持つ不変条件はこのモジュールで強制します：
//! - 参加者は最大 2 名、接続ごとに一意
//! - メッセージログは追記のみで、追加後のメッセージは不変

use super::error::RoomError;
use super::value_object::{ConnectionId, MessageContent, MessageId, RoomCode, Timestamp, UserId};

/// ルームの最大参加者数
pub const ROOM_CAPACITY: usize = 2;

/// チャットメッセージ
///
/// タイムスタンプはコーディネータが受信時に採番した値で、クライアントの
/// 申告値は使わない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender: UserId,
    pub content: MessageContent,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(id: MessageId, sender: UserId, content: MessageContent, timestamp: Timestamp) -> Self {
        Self {
            id,
            sender,
            content,
            timestamp,
        }
    }
}

/// ルームの参加者
///
/// userId は参加時点で接続に紐付いていた値。participant は接続単位で
/// 一意であり、同じ userId の別接続も独立した参加者になる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub conn: ConnectionId,
    pub user_id: UserId,
    pub joined_at: Timestamp,
}

impl Participant {
    pub fn new(conn: ConnectionId, user_id: UserId, joined_at: Timestamp) -> Self {
        Self {
            conn,
            user_id,
            joined_at,
        }
    }
}

/// ルーム
///
/// 最後の参加者が退出した時点で Registry から削除される。削除時には
/// closed が立ち、削除と競合した join が混入するのを防ぐ。
#[derive(Debug, Clone)]
pub struct Room {
    pub code: RoomCode,
    participants: Vec<Participant>,
    messages: Vec<ChatMessage>,
    pub created_at: Timestamp,
    closed: bool,
}

impl Room {
    pub fn new(code: RoomCode, created_at: Timestamp) -> Self {
        Self {
            code,
            participants: Vec::new(),
            messages: Vec::new(),
            created_at,
            closed: false,
        }
    }

    /// 参加者を追加する
    ///
    /// 同じ接続の再追加は no-op。定員（2 名）を超える場合はエラーを返し、
    /// 既存の参加者集合には触れない。
    pub fn add_participant(&mut self, participant: Participant) -> Result<(), RoomError> {
        if self.contains(&participant.conn) {
            return Ok(());
        }
        if self.participants.len() >= ROOM_CAPACITY {
            return Err(RoomError::RoomFull);
        }
        self.participants.push(participant);
        Ok(())
    }

    /// 参加者を削除する
    ///
    /// 削除したかどうかを返す。存在しない接続の削除は no-op（冪等）。
    pub fn remove_participant(&mut self, conn: &ConnectionId) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| &p.conn != conn);
        self.participants.len() != before
    }

    pub fn contains(&self, conn: &ConnectionId) -> bool {
        self.participants.iter().any(|p| &p.conn == conn)
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// 配信対象となる全参加者の接続 ID
    pub fn participant_conns(&self) -> Vec<ConnectionId> {
        self.participants.iter().map(|p| p.conn.clone()).collect()
    }

    /// メッセージをログの末尾に追加する
    pub fn add_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// ルームを削除済みにする
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// 参加直後に参加者本人へ返すルームのスナップショット
///
/// 後から参加した側も、それまでの全メッセージを元の順序で受け取る。
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSnapshot {
    pub code: RoomCode,
    pub messages: Vec<ChatMessage>,
}

/// ルーム一覧用の概要
#[derive(Debug, Clone)]
pub struct RoomOverview {
    pub code: RoomCode,
    pub participant_count: usize,
    pub message_count: usize,
    pub created_at: Timestamp,
}

/// ルーム詳細
#[derive(Debug, Clone)]
pub struct RoomDetail {
    pub code: RoomCode,
    pub participants: Vec<Participant>,
    pub message_count: usize,
    pub created_at: Timestamp,
}
