//! インメモリ実装
//!
//! すべての状態はプロセスメモリ上にのみ存在し、再起動で消える
//! （エフェメラルなルームのセマンティクスに一致）。

pub mod registry;

pub use registry::InMemoryRoomRegistry;
