//! Server state shared across handlers.

use std::sync::Arc;

use crate::domain::MessagePusher;
use crate::usecase::{
    BindIdentityUseCase, ConnectClientUseCase, CreateRoomUseCase, DisconnectClientUseCase,
    GetRoomsUseCase, JoinRoomUseCase, SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（接続受け入れのユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（接続切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// BindIdentityUseCase（ユーザー ID 紐付けのユースケース）
    pub bind_identity_usecase: Arc<BindIdentityUseCase>,
    /// CreateRoomUseCase（ルーム作成のユースケース）
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// GetRoomsUseCase（ルーム一覧・詳細取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// エラーイベントの送信に使う（発生元の接続のみに届ける）
    pub pusher: Arc<dyn MessagePusher>,
}
