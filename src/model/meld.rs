use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KongKind {
    Concealed,               // 暗槓
    ExposedFromDiscard,      // 明槓 (手牌3枚 + 捨て牌)
    ExposedFromExistingPong, // 加槓 (ポンに1枚追加)
}

// 面子 Chowの牌は昇順
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "tiles")]
pub enum Meld {
    Pong(Tile),
    Chow(Tile, Tile, Tile),
    Kong(Tile, KongKind),
}

impl Meld {
    pub fn chow(low: Tile) -> Option<Self> {
        if !low.is_suited() {
            return None;
        }
        let mid = low.offset(1)?;
        let high = low.offset(2)?;
        Some(Meld::Chow(low, mid, high))
    }

    pub fn tiles(&self) -> Vec<Tile> {
        match *self {
            Meld::Pong(t) => vec![t; 3],
            Meld::Chow(l, m, h) => vec![l, m, h],
            Meld::Kong(t, _) => vec![t; 4],
        }
    }

    pub fn contains(&self, tile: Tile) -> bool {
        match *self {
            Meld::Pong(t) | Meld::Kong(t, _) => t == tile,
            Meld::Chow(l, m, h) => l == tile || m == tile || h == tile,
        }
    }

    #[inline]
    pub fn is_kong(&self) -> bool {
        matches!(self, Meld::Kong(..))
    }

    // meldを成立させるために手牌から消費する牌 (claimの場合は捨て牌1枚を除く)
    pub fn consumed(&self, claimed: Option<Tile>) -> Vec<Tile> {
        match *self {
            Meld::Kong(t, KongKind::ExposedFromExistingPong) => vec![t],
            _ => {
                let mut tiles = self.tiles();
                if let Some(c) = claimed {
                    if let Some(p) = tiles.iter().position(|&t| t == c) {
                        tiles.remove(p);
                    }
                }
                tiles
            }
        }
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Meld::Pong(_) => "Pong",
            Meld::Chow(..) => "Chow",
            Meld::Kong(_, KongKind::Concealed) => "ConcealedKong",
            Meld::Kong(_, KongKind::ExposedFromDiscard) => "Kong",
            Meld::Kong(_, KongKind::ExposedFromExistingPong) => "PongKong",
        };
        let tiles: Vec<String> = self.tiles().iter().map(|t| t.to_string()).collect();
        write!(f, "{}[{}]", kind, tiles.join(","))
    }
}

#[test]
fn test_meld_consumed() {
    let b2 = Tile(Family::Bamboo, 2);
    assert_eq!(Meld::Pong(b2).consumed(Some(b2)), vec![b2, b2]);
    assert_eq!(Meld::Kong(b2, KongKind::ExposedFromDiscard).consumed(Some(b2)).len(), 3);
    assert_eq!(Meld::Kong(b2, KongKind::Concealed).consumed(None).len(), 4);
    assert_eq!(Meld::Kong(b2, KongKind::ExposedFromExistingPong).consumed(None), vec![b2]);

    let chow = Meld::chow(Tile(Family::Dots, 3)).unwrap();
    assert_eq!(
        chow.consumed(Some(Tile(Family::Dots, 4))),
        vec![Tile(Family::Dots, 3), Tile(Family::Dots, 5)]
    );
    assert!(Meld::chow(Tile(Family::Dots, 8)).is_none());
    assert!(Meld::chow(Tile(Family::Wind, 1)).is_none());
}
