//! ドメイン層
//!
//! コーディネータの中核となるモデルと、外側のレイヤーが実装すべき
//! インターフェース（Registry / MessagePusher）を定義します。
//! このレイヤーは Infrastructure 層・UI 層に依存しません。

pub mod code;
pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod registry;
pub mod value_object;

pub use code::{CODE_LENGTH, RoomCodeFactory};
pub use entity::{
    ChatMessage, Participant, ROOM_CAPACITY, Room, RoomDetail, RoomOverview, RoomSnapshot,
};
pub use error::{MessagePushError, RoomError, ValidationError};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use registry::RoomRegistry;
pub use value_object::{ConnectionId, MessageContent, MessageId, RoomCode, Timestamp, UserId};
