//! InMemory Room Registry 実装
//!
//! ドメイン層が定義する RoomRegistry trait の具体的な実装。
//! code → Room のマップをインメモリ DB として使用します。
//!
//! ## ロック方針
//!
//! - `rooms`: code → Room のマップ。ルックアップ・登録・削除とコード
//!   衝突チェックの間だけ短く保持する。
//! - 各 Room は個別の Mutex を持ち、join / leave / send はルーム単位で
//!   直列化される。両方を保持する場合の取得順は必ず rooms → Room。
//!   ルームの削除は rooms ロックを保持したまま Room を closed にするため、
//!   削除済みルームへ join が混入することはない。
//! - `sessions`: 接続ごとの userId と所属ルーム。Room のロックと同時には
//!   保持しない。
//!
//! ## 配信の契約
//!
//! ルームの状態遷移とイベント配信のキューイングは同じクリティカル
//! セクション内で行う。実際の送信は接続ごとの送信キューに委ねられる
//! ため、遅いクライアントがルームを塞ぐことはない。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::common::time::now_millis;
use crate::domain::{
    CODE_LENGTH, ChatMessage, ConnectionId, MessageContent, MessageId, MessagePusher, Participant,
    Room, RoomCode, RoomCodeFactory, RoomDetail, RoomError, RoomOverview, RoomRegistry,
    RoomSnapshot, Timestamp, UserId,
};
use crate::infrastructure::dto::websocket::{MessageDto, ServerEvent};

/// コード長ごとの生成リトライ回数
const CODE_ATTEMPTS_PER_LENGTH: usize = 16;
/// 衝突が続いた場合に広げる最大コード長
const MAX_CODE_LENGTH: usize = 10;

/// 接続ごとのセッション状態
#[derive(Debug, Default)]
struct Session {
    user_id: Option<UserId>,
    current_room: Option<RoomCode>,
}

/// インメモリ Room Registry 実装
pub struct InMemoryRoomRegistry {
    rooms: Mutex<HashMap<RoomCode, Arc<Mutex<Room>>>>,
    sessions: Mutex<HashMap<ConnectionId, Session>>,
    pusher: Arc<dyn MessagePusher>,
}

fn encode(event: &ServerEvent) -> String {
    serde_json::to_string(event).expect("server events always serialize")
}

impl InMemoryRoomRegistry {
    /// 新しい InMemoryRoomRegistry を作成
    pub fn new(pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            sessions: Mutex::new(HashMap::new()),
            pusher,
        }
    }

    /// 接続に紐付いた userId を取得する
    async fn bound_identity(&self, conn: &ConnectionId) -> Result<UserId, RoomError> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(conn)
            .and_then(|s| s.user_id.clone())
            .ok_or(RoomError::IdentityNotBound)
    }

    /// 接続が現在所属しているルームのコードを取得する
    async fn current_room(&self, conn: &ConnectionId) -> Option<RoomCode> {
        let sessions = self.sessions.lock().await;
        sessions.get(conn).and_then(|s| s.current_room.clone())
    }

    /// セッションの所属ルームを更新する
    ///
    /// セッションが既に破棄されていた場合は false を返す。
    async fn set_current_room(&self, conn: &ConnectionId, code: Option<RoomCode>) -> bool {
        let mut sessions = self.sessions.lock().await;
        match sessions.get_mut(conn) {
            Some(session) => {
                session.current_room = code;
                true
            }
            None => false,
        }
    }

    /// 衝突しないコードを引いて空のルームを登録する
    ///
    /// 標準長で規定回数リトライし、衝突が続く場合はコード長を 1 文字ずつ
    /// 広げる。全長で失敗した場合のみ CodeSpaceExhausted を返す。
    async fn allocate_room(&self) -> Result<(RoomCode, Arc<Mutex<Room>>), RoomError> {
        let mut rooms = self.rooms.lock().await;
        for length in CODE_LENGTH..=MAX_CODE_LENGTH {
            for _ in 0..CODE_ATTEMPTS_PER_LENGTH {
                let code = RoomCodeFactory::generate(length);
                if rooms.contains_key(&code) {
                    continue;
                }
                let room = Arc::new(Mutex::new(Room::new(
                    code.clone(),
                    Timestamp::new(now_millis()),
                )));
                rooms.insert(code.clone(), room.clone());
                return Ok((code, room));
            }
            tracing::warn!(
                "Room codes of length {} keep colliding, widening the code space",
                length
            );
        }
        Err(RoomError::CodeSpaceExhausted)
    }

    /// 指定ルームから接続を取り除く
    ///
    /// 空になったルームは closed にして登録から削除する。参加者が残って
    /// いれば user-left を配信する。取り除けたかどうかを返す。
    async fn remove_from_room(&self, conn: &ConnectionId, code: &RoomCode) -> bool {
        let mut rooms = self.rooms.lock().await;
        let Some(room) = rooms.get(code).cloned() else {
            return false;
        };
        let mut room = room.lock().await;
        if !room.remove_participant(conn) {
            return false;
        }
        if room.is_empty() {
            room.close();
            rooms.remove(code);
            tracing::info!("Room '{}' is empty and was deleted", code);
        } else {
            let event = encode(&ServerEvent::UserLeft {
                user_count: room.participant_count(),
            });
            if let Err(e) = self.pusher.broadcast(room.participant_conns(), &event).await {
                tracing::warn!("Failed to broadcast user-left for room '{}': {}", code, e);
            }
        }
        true
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn register_session(&self, conn: ConnectionId) {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(conn, Session::default());
    }

    async fn bind_identity(&self, conn: &ConnectionId, user_id: UserId) {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.entry(conn.clone()).or_default();
        session.user_id = Some(user_id);
    }

    async fn create_room(&self, conn: &ConnectionId) -> Result<RoomCode, RoomError> {
        let user_id = self.bound_identity(conn).await?;

        // 接続は常に高々 1 ルームにしか属さない。既にどこかのルームに
        // いる場合は先に退出する。
        self.leave(conn).await;

        let (code, room) = self.allocate_room().await?;
        {
            let mut room = room.lock().await;
            room.add_participant(Participant::new(
                conn.clone(),
                user_id,
                Timestamp::new(now_millis()),
            ))
            .expect("fresh room has a free slot");
        }

        if !self.set_current_room(conn, Some(code.clone())).await {
            // 作成の途中で接続が閉じられていた場合は作ったルームを破棄する
            self.remove_from_room(conn, &code).await;
            tracing::warn!("Connection '{}' vanished while creating a room", conn);
        }
        Ok(code)
    }

    async fn join_room(
        &self,
        conn: &ConnectionId,
        code: RoomCode,
    ) -> Result<RoomSnapshot, RoomError> {
        let user_id = self.bound_identity(conn).await?;

        // 別のルームにいる場合は先に退出する。同じルームへの再 join は
        // 参加者を増やさず、スナップショットの再送として扱う。
        if let Some(previous) = self.current_room(conn).await
            && previous != code
        {
            self.leave(conn).await;
        }

        let room = {
            let rooms = self.rooms.lock().await;
            rooms.get(&code).cloned().ok_or(RoomError::RoomNotFound)?
        };

        let snapshot = {
            let mut room = room.lock().await;
            if room.is_closed() {
                // 最後の参加者の退出と競合した場合、ルームは削除済み
                return Err(RoomError::RoomNotFound);
            }
            let resend = room.contains(conn);
            if !resend {
                room.add_participant(Participant::new(
                    conn.clone(),
                    user_id,
                    Timestamp::new(now_millis()),
                ))?;
            }

            let snapshot = RoomSnapshot {
                code: room.code.clone(),
                messages: room.messages().to_vec(),
            };

            // スナップショットと presence はルームのクリティカルセクション
            // 内でキューイングし、並行する send と順序が入れ替わらない
            // ようにする。
            let joined = encode(&ServerEvent::JoinedRoom {
                room_code: snapshot.code.as_str().to_string(),
                messages: snapshot.messages.iter().cloned().map(MessageDto::from).collect(),
            });
            if let Err(e) = self.pusher.push_to(conn, &joined).await {
                tracing::warn!("Failed to push joined-room to '{}': {}", conn, e);
            }
            if !resend {
                let presence = encode(&ServerEvent::UserJoined {
                    user_count: room.participant_count(),
                });
                if let Err(e) = self.pusher.broadcast(room.participant_conns(), &presence).await {
                    tracing::warn!("Failed to broadcast user-joined for '{}': {}", code, e);
                }
            }
            snapshot
        };

        if !self.set_current_room(conn, Some(code.clone())).await {
            // 参加の途中で接続が閉じられていた場合は巻き戻す
            self.remove_from_room(conn, &code).await;
            tracing::warn!("Connection '{}' vanished while joining room '{}'", conn, code);
        }
        Ok(snapshot)
    }

    async fn append_message(
        &self,
        conn: &ConnectionId,
        content: MessageContent,
    ) -> Result<ChatMessage, RoomError> {
        let user_id = self.bound_identity(conn).await?;
        let code = self
            .current_room(conn)
            .await
            .ok_or(RoomError::NotInRoom)?;

        let room = {
            let rooms = self.rooms.lock().await;
            rooms.get(&code).cloned().ok_or(RoomError::NotInRoom)?
        };

        let mut room = room.lock().await;
        if room.is_closed() || !room.contains(conn) {
            return Err(RoomError::NotInRoom);
        }

        let message = ChatMessage::new(
            MessageId::generate(),
            user_id,
            content,
            Timestamp::new(now_millis()),
        );
        room.add_message(message.clone());

        // 送信者を含む全参加者に、追記と同じクリティカルセクション内で
        // 配信する。全参加者が同じ全順序を観測する。
        let event = encode(&ServerEvent::NewMessage(MessageDto::from(message.clone())));
        if let Err(e) = self.pusher.broadcast(room.participant_conns(), &event).await {
            tracing::warn!("Failed to broadcast new-message for '{}': {}", code, e);
        }

        Ok(message)
    }

    async fn leave(&self, conn: &ConnectionId) -> Option<RoomCode> {
        let code = {
            let mut sessions = self.sessions.lock().await;
            sessions.get_mut(conn).and_then(|s| s.current_room.take())
        }?;
        self.remove_from_room(conn, &code).await;
        Some(code)
    }

    async fn remove_session(&self, conn: &ConnectionId) -> Option<RoomCode> {
        let left = self.leave(conn).await;
        let mut sessions = self.sessions.lock().await;
        sessions.remove(conn);
        left
    }

    async fn list_rooms(&self) -> Vec<RoomOverview> {
        let rooms = self.rooms.lock().await;
        let mut overviews = Vec::with_capacity(rooms.len());
        for room in rooms.values() {
            let room = room.lock().await;
            overviews.push(RoomOverview {
                code: room.code.clone(),
                participant_count: room.participant_count(),
                message_count: room.messages().len(),
                created_at: room.created_at,
            });
        }
        // 一覧はコード順で返す
        overviews.sort_by(|a, b| a.code.as_str().cmp(b.code.as_str()));
        overviews
    }

    async fn room_detail(&self, code: &RoomCode) -> Option<RoomDetail> {
        let rooms = self.rooms.lock().await;
        let room = rooms.get(code)?;
        let room = room.lock().await;
        Some(RoomDetail {
            code: room.code.clone(),
            participants: room.participants().to_vec(),
            message_count: room.messages().len(),
            created_at: room.created_at,
        })
    }
}
