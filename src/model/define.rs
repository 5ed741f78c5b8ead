use std::fmt;

use serde::{Deserialize, Serialize};

pub type Index = usize;
pub type Rank = usize;

pub const SEAT: usize = 4; // 座席の数
pub const FAMILY: usize = 7; // 牌の種類 (bamboo, characters, dots, dragons, winds, flowers, seasons)
pub const RANK: usize = 10; // 数字 0は未使用
pub const TILE: usize = 4; // 同じ牌の枚数
pub const MELDS: usize = 4; // 和了形の面子の数
pub const HAND: usize = 13; // 配牌の枚数

// [Seat]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Seat {
    #[default]
    East,
    South,
    West,
    North,
}

impl Seat {
    pub const ALL: [Seat; SEAT] = [Seat::East, Seat::South, Seat::West, Seat::North];

    #[inline]
    pub fn index(self) -> Index {
        self as Index
    }

    #[inline]
    pub fn from_index(i: Index) -> Self {
        Self::ALL[i % SEAT]
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Seat::East => "E",
            Seat::South => "S",
            Seat::West => "W",
            Seat::North => "N",
        };
        write!(f, "{}", s)
    }
}

// [Phase]
// 局の進行状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    AwaitingDraw, // ツモ待ち
    AwaitingSelfAction, // ツモ後の和了・槓の選択待ち
    AwaitingDiscard,    // 打牌待ち
    AwaitingClaims,     // 他家の鳴き・和了の選択待ち
    RoundOver,          // 局終了
}
