use super::*;
use crate::util::misc::vec_to_string;

#[derive(Debug, Default, Clone, Serialize)]
pub struct Player {
    pub seat: Seat,             // 座席 (East | South | West | North)
    pub hand: TileTable,        // 手牌 (7x10の配列)
    pub drawn: Option<Tile>,    // ツモ牌
    pub melds: Vec<Meld>,       // 副露一覧
    pub discards: Vec<Discard>, // 捨て牌一覧 (鳴かれた牌は除く)
}

impl Player {
    #[inline]
    pub fn count_tile(&self, t: Tile) -> usize {
        self.hand[t.0.index()][t.1]
    }

    pub fn hand_len(&self) -> usize {
        self.hand.iter().map(|r| r.iter().sum::<usize>()).sum()
    }

    // 手牌 + 副露 * 3
    pub fn effective_len(&self) -> usize {
        self.hand_len() + self.melds.len() * 3
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut hand = vec![];
        for fam in Family::ALL {
            for r in 1..RANK {
                for _ in 0..self.hand[fam.index()][r] {
                    hand.push(Tile(fam, r));
                }
            }
        }
        let drawn = if let Some(d) = self.drawn {
            d.to_string()
        } else {
            "None".to_string()
        };
        writeln!(f, "seat: {}, drawn: {}", self.seat, drawn)?;
        writeln!(f, "hand: {}", vec_to_string(&hand))?;
        writeln!(f, "melds: {}", vec_to_string(&self.melds))?;
        write!(f, "discards: {}", vec_to_string(&self.discards))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Discard {
    pub step: usize,
    pub tile: Tile,
}

impl fmt::Display for Discard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tile)
    }
}
