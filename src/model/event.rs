use super::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    Begin(EventBegin),     // ゲーム開始
    New(EventNew),         // 局開始 (配牌)
    Deal(EventDeal),       // ツモ
    Discard(EventDiscard), // 打牌
    Meld(EventMeld),       // 槓, ポン, チー
    Win(EventWin),         // 局終了 (和了)
    Draw(EventDraw),       // 局終了 (荒牌)
    End(EventEnd),         // ゲーム終了
}

impl Event {
    #[inline]
    pub fn begin(rule: Rule) -> Self {
        Self::Begin(EventBegin { rule })
    }

    #[inline]
    pub fn new(round: usize, dealer: Seat, hands: [Vec<Tile>; SEAT], wall_count: usize) -> Self {
        Self::New(EventNew {
            round,
            dealer,
            hands,
            wall_count,
        })
    }

    #[inline]
    pub fn deal(seat: Seat, tile: Tile, is_replacement: bool) -> Self {
        Self::Deal(EventDeal {
            seat,
            tile,
            is_replacement,
        })
    }

    #[inline]
    pub fn discard(seat: Seat, tile: Tile) -> Self {
        Self::Discard(EventDiscard { seat, tile })
    }

    #[inline]
    pub fn meld(seat: Seat, meld: Meld, from: Option<Seat>) -> Self {
        Self::Meld(EventMeld { seat, meld, from })
    }

    #[inline]
    pub fn win(contexts: Vec<WinContext>, acting: Seat) -> Self {
        Self::Win(EventWin { contexts, acting })
    }

    #[inline]
    pub fn draw(hands: [Vec<Tile>; SEAT]) -> Self {
        Self::Draw(EventDraw { hands })
    }

    #[inline]
    pub fn end() -> Self {
        Self::End(EventEnd {})
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventBegin {
    pub rule: Rule,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventNew {
    pub round: usize,
    pub dealer: Seat,
    pub hands: [Vec<Tile>; SEAT],
    pub wall_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDeal {
    pub seat: Seat,
    pub tile: Tile,
    pub is_replacement: bool, // 嶺上牌 (牌山の末尾からのツモ)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDiscard {
    pub seat: Seat,
    pub tile: Tile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMeld {
    pub seat: Seat,
    pub meld: Meld,
    pub from: Option<Seat>, // 鳴いた捨て牌の持ち主 (暗槓, 加槓はNone)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventWin {
    pub contexts: Vec<WinContext>, // 放銃者から近い順
    pub acting: Seat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraw {
    pub hands: [Vec<Tile>; SEAT],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnd {}
