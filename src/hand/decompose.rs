use crate::control::common::*;
use crate::model::*;

// [和了形判定 (面子 + 雀頭)]

// 牌の多重集合を面子と雀頭に分解する
// 面子を1つも含まない場合(雀頭のみ)は和了形とみなさない
pub fn decompose(tiles: &TileTable) -> Option<Decomposition> {
    let d = decompose_table(tiles)?;
    if d.melds.is_empty() {
        return None;
    }
    Some(d)
}

pub fn decompose_tiles(tiles: &[Tile]) -> Option<Decomposition> {
    decompose(&tiles_to_tile_table(tiles))
}

// 副露と合わせて4面子1雀頭になっているかの判定
// 副露が4つの場合は手牌の雀頭のみで和了
pub fn decompose_hand(hand: &TileTable, melds: &[Meld]) -> Option<Decomposition> {
    if melds.len() > MELDS {
        return None;
    }
    let d = decompose_table(hand)?;
    if d.melds.len() + melds.len() != MELDS {
        return None;
    }
    Some(d)
}

fn decompose_table(tt: &TileTable) -> Option<Decomposition> {
    if count_tiles(tt) % 3 != 2 {
        return None;
    }
    let (melds, pair) = search(*tt, None)?;
    Some(Decomposition {
        melds,
        pair: (pair, pair),
    })
}

// 残りの枚数のテーブルを値渡しで再帰
// 最初に残っている牌は 雀頭 -> 刻子 -> 順子 の順に試して,いずれも失敗した場合はその分岐は不成立
fn search(tt: TileTable, pair: Option<Tile>) -> Option<(Vec<Meld>, Tile)> {
    let t = match first_tile(&tt) {
        Some(t) => t,
        None => return pair.map(|p| (vec![], p)),
    };
    let (fi, r) = (t.0.index(), t.1);
    let c = tt[fi][r];

    // 雀頭
    if pair.is_none() && c >= 2 {
        let mut next = tt;
        next[fi][r] -= 2;
        if let Some(res) = search(next, Some(t)) {
            return Some(res);
        }
    }

    // 刻子
    if c >= 3 {
        let mut next = tt;
        next[fi][r] -= 3;
        if let Some((mut melds, p)) = search(next, pair) {
            melds.insert(0, Meld::Pong(t));
            return Some((melds, p));
        }
    }

    // 順子 (数牌のみ, 7まで)
    if t.is_suited() && 1 <= r && r <= 7 && tt[fi][r + 1] > 0 && tt[fi][r + 2] > 0 {
        let mut next = tt;
        next[fi][r] -= 1;
        next[fi][r + 1] -= 1;
        next[fi][r + 2] -= 1;
        if let Some((mut melds, p)) = search(next, pair) {
            melds.insert(0, Meld::Chow(t, Tile(t.0, r + 1), Tile(t.0, r + 2)));
            return Some((melds, p));
        }
    }

    None
}

fn first_tile(tt: &TileTable) -> Option<Tile> {
    for fam in Family::ALL {
        for r in 0..RANK {
            if tt[fam.index()][r] > 0 {
                return Some(Tile(fam, r));
            }
        }
    }
    None
}

#[cfg(test)]
fn tiles(exp: &str) -> Vec<Tile> {
    exp.split_whitespace()
        .map(|s| Tile::from_symbol(s).unwrap())
        .collect()
}

#[test]
fn test_decompose_melds_and_pair() {
    let d = decompose_tiles(&tiles("bamboo1 bamboo2 bamboo3 bamboo2 bamboo2 dots9 dots9 dots9")).unwrap();
    let b = |r| Tile(Family::Bamboo, r);
    assert_eq!(
        d.melds,
        vec![Meld::Chow(b(1), b(2), b(3)), Meld::Pong(Tile(Family::Dots, 9))]
    );
    assert_eq!(d.pair, (b(2), b(2)));
}

#[test]
fn test_decompose_pair_only() {
    assert!(decompose_tiles(&tiles("bamboo2 bamboo2")).is_none());
    // 副露4つなら雀頭のみで和了
    let b2 = Tile(Family::Bamboo, 2);
    let melds = vec![Meld::Pong(Tile(Family::Dots, 1)); 4];
    assert!(decompose_hand(&tiles_to_tile_table(&[b2, b2]), &melds).is_some());
}

#[test]
fn test_decompose_size_mod3() {
    assert!(decompose_tiles(&tiles("bamboo1 bamboo2 bamboo3")).is_none());
    assert!(decompose_tiles(&tiles("bamboo1 bamboo2 bamboo3 dots1 dots1 dots1")).is_none());
    assert!(decompose_tiles(&[]).is_none());
}

#[test]
fn test_decompose_full_hands() {
    let hands = [
        // 111 234 345 345 22
        "bamboo1 bamboo1 bamboo1 bamboo2 bamboo2 bamboo2 bamboo3 bamboo3 bamboo3 bamboo4 bamboo4 bamboo4 bamboo5 bamboo5",
        // 123 234 456 888 44
        "bamboo1 bamboo2 bamboo3 bamboo2 bamboo3 bamboo4 bamboo4 bamboo4 bamboo4 bamboo8 bamboo8 bamboo8 bamboo5 bamboo6",
        // 字牌の刻子
        "dragons1 dragons1 dragons1 winds2 winds2 winds2 winds4 winds4 characters7 characters8 characters9 dots5 dots5 dots5",
    ];
    for h in &hands {
        let ts = tiles(h);
        let d = decompose_tiles(&ts).unwrap_or_else(|| panic!("{}", h));
        assert_eq!(d.melds.len(), 4);
        let mut sorted = ts.clone();
        sorted.sort();
        assert_eq!(d.tiles(), sorted);
    }
}

#[test]
fn test_decompose_rejects() {
    let hands = [
        // 字牌の順子は不可
        "winds1 winds2 winds3 dots1 dots1 dots1 dots2 dots3 dots4 dots6 dots7 dots8 dots9 dots9",
        // 8 9 1 の順子は不可
        "bamboo8 bamboo9 bamboo1 dots1 dots1 dots1 dots2 dots3 dots4 dots6 dots7 dots8 dots9 dots9",
        // 雀頭2つ
        "bamboo1 bamboo1 bamboo2 bamboo2 dots1 dots2 dots3",
    ];
    for h in &hands {
        assert!(decompose_tiles(&tiles(h)).is_none(), "{}", h);
    }
}

#[test]
fn test_decompose_hand_with_melds() {
    // 1副露 + 手牌11枚
    let hand = tiles_to_tile_table(&tiles(
        "bamboo1 bamboo2 bamboo3 dots4 dots5 dots6 characters9 characters9 characters9 winds1 winds1",
    ));
    let melds = vec![Meld::Pong(Tile(Family::Dragon, 3))];
    let d = decompose_hand(&hand, &melds).unwrap();
    assert_eq!(d.melds.len(), 3);
    assert_eq!(d.pair.0, Tile(Family::Wind, 1));
    // 副露なしとしては面子が足りない
    assert!(decompose_hand(&hand, &[]).is_none());
}
