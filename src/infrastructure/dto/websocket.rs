//! WebSocket ワイヤフォーマット（イベント契約）
//!
//! クライアントとの間で交換する JSON イベントの定義。`type` フィールドで
//! ディスパッチします（kebab-case）。

use serde::{Deserialize, Serialize};

/// クライアント → サーバーのイベント
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// 接続に userId を紐付ける
    #[serde(rename_all = "camelCase")]
    SetUserId { user_id: String },
    /// 新しいルームの作成を要求する
    CreateRoom,
    /// ルームへの参加を要求する
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_code: String },
    /// メッセージを送信する
    ///
    /// roomCode / userId はクライアントの自己申告であり、コーディネータは
    /// 自身のセッション状態のみを信頼する。
    #[serde(rename_all = "camelCase")]
    SendMessage {
        room_code: Option<String>,
        message: String,
        user_id: Option<String>,
    },
}

/// サーバー → クライアントのイベント
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// ルーム作成の応答（作成者のみに届く）
    RoomCreated { code: String },
    /// ルーム参加の応答（参加者本人のみに届く）
    #[serde(rename_all = "camelCase")]
    JoinedRoom {
        room_code: String,
        messages: Vec<MessageDto>,
    },
    /// メッセージのファンアウト（送信者を含む全参加者に届く）
    NewMessage(MessageDto),
    /// 参加による人数変化の通知
    #[serde(rename_all = "camelCase")]
    UserJoined { user_count: usize },
    /// 退出による人数変化の通知
    #[serde(rename_all = "camelCase")]
    UserLeft { user_count: usize },
    /// エラー通知（発生元の接続のみに届く）
    Error { message: String },
}

/// メッセージのワイヤ表現
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: String,
    pub content: String,
    pub sender_id: String,
    /// コーディネータ採番の受信時刻（RFC 3339）
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_event_set_user_id_deserializes() {
        // テスト項目: set-user-id イベントが正しくデシリアライズされる
        // given (前提条件):
        let json = r#"{"type":"set-user-id","userId":"alice"}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::SetUserId {
                user_id: "alice".to_string()
            }
        );
    }

    #[test]
    fn test_client_event_create_room_deserializes() {
        // テスト項目: ペイロードのない create-room イベントがデシリアライズされる
        // given (前提条件):
        let json = r#"{"type":"create-room"}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(event, ClientEvent::CreateRoom);
    }

    #[test]
    fn test_client_event_send_message_tolerates_advisory_fields() {
        // テスト項目: send-message の roomCode / userId は省略できる
        // given (前提条件):
        let json = r#"{"type":"send-message","message":"hi"}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::SendMessage {
                room_code: None,
                message: "hi".to_string(),
                user_id: None,
            }
        );
    }

    #[test]
    fn test_unknown_event_type_is_rejected() {
        // テスト項目: 未知の type を持つイベントはデシリアライズに失敗する
        // given (前提条件):
        let json = r#"{"type":"self-destruct"}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientEvent>(json);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_server_event_new_message_serializes_flat() {
        // テスト項目: new-message イベントがメッセージのフィールドを直接持つ
        // given (前提条件):
        let event = ServerEvent::NewMessage(MessageDto {
            id: "m-1".to_string(),
            content: "hi".to_string(),
            sender_id: "alice".to_string(),
            timestamp: "2023-01-01T00:00:00+00:00".to_string(),
        });

        // when (操作):
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(json["type"], "new-message");
        assert_eq!(json["id"], "m-1");
        assert_eq!(json["content"], "hi");
        assert_eq!(json["senderId"], "alice");
        assert_eq!(json["timestamp"], "2023-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_server_event_presence_serializes_camel_case() {
        // テスト項目: presence イベントのフィールドが userCount になる
        // given (前提条件):
        let event = ServerEvent::UserJoined { user_count: 2 };

        // when (操作):
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(json["type"], "user-joined");
        assert_eq!(json["userCount"], 2);
    }

    #[test]
    fn test_server_event_joined_room_serializes_camel_case() {
        // テスト項目: joined-room イベントが roomCode とメッセージ配列を持つ
        // given (前提条件):
        let event = ServerEvent::JoinedRoom {
            room_code: "AB12CD".to_string(),
            messages: vec![],
        };

        // when (操作):
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(json["type"], "joined-room");
        assert_eq!(json["roomCode"], "AB12CD");
        assert_eq!(json["messages"].as_array().unwrap().len(), 0);
    }
}
