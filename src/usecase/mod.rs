//! UseCase 層
//!
//! 受信イベントごとに 1 ユースケース。入力の検証とエラー変換を担い、
//! 状態遷移とイベント配信は Registry / MessagePusher に委譲します。

mod bind_identity;
mod connect_client;
mod create_room;
mod disconnect_client;
mod error;
mod get_rooms;
mod join_room;
mod send_message;

pub use bind_identity::BindIdentityUseCase;
pub use connect_client::ConnectClientUseCase;
pub use create_room::CreateRoomUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{BindIdentityError, CreateRoomError, JoinRoomError, SendMessageError};
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use send_message::SendMessageUseCase;
