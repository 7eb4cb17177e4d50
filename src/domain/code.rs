//! ルームコード生成
//!
//! 短く共有しやすいコードを乱数で引きます。一意性の保証は Registry 側の
//! 責務で、ここでは十分に広い空間から一様に引くことだけを保証します。

use rand::Rng;

use super::value_object::RoomCode;

/// 標準のコード長
pub const CODE_LENGTH: usize = 6;

/// コードに使う文字集合（大文字英数字 36 文字）
const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// ルームコードのファクトリ
pub struct RoomCodeFactory;

impl RoomCodeFactory {
    /// 指定長のランダムなコードを生成する
    pub fn generate(length: usize) -> RoomCode {
        let mut rng = rand::rng();
        let code: String = (0..length)
            .map(|_| CODE_CHARSET[rng.random_range(0..CODE_CHARSET.len())] as char)
            .collect();
        RoomCode::new(code).expect("generated code is non-empty")
    }
}
