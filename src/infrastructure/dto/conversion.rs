//! DTO とドメインエンティティの変換

use crate::common::time::millis_to_rfc3339;
use crate::domain::{ChatMessage, RoomDetail, RoomOverview};

use super::http::{ParticipantDetailDto, RoomDetailDto, RoomSummaryDto};
use super::websocket::MessageDto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<ChatMessage> for MessageDto {
    fn from(model: ChatMessage) -> Self {
        Self {
            id: model.id.as_str().to_string(),
            content: model.content.into_string(),
            sender_id: model.sender.into_string(),
            timestamp: millis_to_rfc3339(model.timestamp.value()),
        }
    }
}

impl From<RoomOverview> for RoomSummaryDto {
    fn from(model: RoomOverview) -> Self {
        Self {
            code: model.code.into_string(),
            participant_count: model.participant_count,
            message_count: model.message_count,
            created_at: millis_to_rfc3339(model.created_at.value()),
        }
    }
}

impl From<RoomDetail> for RoomDetailDto {
    fn from(model: RoomDetail) -> Self {
        Self {
            code: model.code.into_string(),
            participants: model
                .participants
                .into_iter()
                .map(|p| ParticipantDetailDto {
                    user_id: p.user_id.into_string(),
                    joined_at: millis_to_rfc3339(p.joined_at.value()),
                })
                .collect(),
            message_count: model.message_count,
            created_at: millis_to_rfc3339(model.created_at.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageContent, MessageId, Timestamp, UserId};

    #[test]
    fn test_domain_chat_message_to_dto() {
        // テスト項目: ドメインの ChatMessage が DTO に変換される
        // given (前提条件):
        let message = ChatMessage::new(
            MessageId::generate(),
            UserId::new("alice").unwrap(),
            MessageContent::new("Hello!").unwrap(),
            Timestamp::new(1672531200000),
        );
        let id = message.id.as_str().to_string();

        // when (操作):
        let dto: MessageDto = message.into();

        // then (期待する結果):
        assert_eq!(dto.id, id);
        assert_eq!(dto.content, "Hello!");
        assert_eq!(dto.sender_id, "alice");
        assert!(dto.timestamp.starts_with("2023-01-01T00:00:00"));
    }

    #[test]
    fn test_domain_room_overview_to_dto() {
        // テスト項目: RoomOverview が一覧用 DTO に変換される
        // given (前提条件):
        let overview = RoomOverview {
            code: crate::domain::RoomCode::new("AB12CD").unwrap(),
            participant_count: 2,
            message_count: 5,
            created_at: Timestamp::new(1672531200000),
        };

        // when (操作):
        let dto: RoomSummaryDto = overview.into();

        // then (期待する結果):
        assert_eq!(dto.code, "AB12CD");
        assert_eq!(dto.participant_count, 2);
        assert_eq!(dto.message_count, 5);
        assert!(dto.created_at.starts_with("2023-01-01"));
    }
}
