use std::fmt;

use crate::model::*;

// ゲーム進行上の不変条件違反
// いずれも状態を変更する前に検出して返却する
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// 手牌にない牌の打牌・消費
    TileNotHeld { seat: Seat, tile: Tile },
    /// 提示した候補に含まれないアクションの選択
    IllegalAction { seat: Seat, action: Action },
    /// 槓に必要な枚数が足りない
    KongCount { seat: Seat, tile: Tile, count: usize },
    /// 和了判定時の手牌枚数の不整合
    HandSize { seat: Seat, size: usize },
    /// 牌山が空の状態でのツモ
    WallEmpty,
    /// 配牌に必要な枚数が牌山にない
    WallTooShort { size: usize },
    /// 存在しない牌
    InvalidTile { tile: Tile },
    /// 和了宣言者と和了情報の不一致
    WinnerMismatch { seat: Seat },
    /// 進行状態の不整合
    PhaseMismatch { expected: Phase, actual: Phase },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::TileNotHeld { seat, tile } => {
                write!(f, "seat {} does not hold {}", seat, tile)
            }
            EngineError::IllegalAction { seat, action } => {
                write!(f, "action {} is not a candidate of seat {}", action, seat)
            }
            EngineError::KongCount { seat, tile, count } => {
                write!(f, "seat {} cannot kong {} with {} tiles", seat, tile, count)
            }
            EngineError::HandSize { seat, size } => {
                write!(f, "seat {} has {} tiles at win check", seat, size)
            }
            EngineError::WallEmpty => write!(f, "draw from empty wall"),
            EngineError::WallTooShort { size } => {
                write!(f, "wall of {} tiles is too short to deal", size)
            }
            EngineError::InvalidTile { tile } => write!(f, "invalid tile: {:?}", tile),
            EngineError::WinnerMismatch { seat } => {
                write!(f, "seat {} is not a valid winner of this win", seat)
            }
            EngineError::PhaseMismatch { expected, actual } => {
                write!(f, "expected phase {:?}, but {:?}", expected, actual)
            }
        }
    }
}

impl std::error::Error for EngineError {}

pub type EngineResult<T> = Result<T, EngineError>;
