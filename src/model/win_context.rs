use super::*;

// 和了形の分解 (手牌部分の面子 + 雀頭)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decomposition {
    pub melds: Vec<Meld>,
    pub pair: (Tile, Tile),
}

impl Decomposition {
    pub fn tiles(&self) -> Vec<Tile> {
        let mut tiles: Vec<Tile> = self.melds.iter().flat_map(|m| m.tiles()).collect();
        tiles.push(self.pair.0);
        tiles.push(self.pair.1);
        tiles.sort();
        tiles
    }
}

impl fmt::Display for Decomposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.melds {
            write!(f, "{} ", m)?;
        }
        write!(f, "Pair[{},{}]", self.pair.0, self.pair.1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinContext {
    pub seat: Seat,
    pub winning_tile: Tile,
    pub is_self_draw: bool,
    pub from: Option<Seat>, // 放銃者 (ツモの場合はNone)
    pub decomposition: Decomposition,
    pub melds: Vec<Meld>, // 副露
}
