use crate::control::common::*;
use crate::model::*;

// [鳴き・槓の候補検出]
// いずれも手牌(副露を除く)のみを参照し,状態は変更しない

// 手牌に2枚以上あれば捨て牌と合わせてポン可能
pub fn detect_pong(hand: &TileTable, tile: Tile) -> Option<Meld> {
    if count_tile(hand, tile) >= 2 {
        Some(Meld::Pong(tile))
    } else {
        None
    }
}

// 暗槓 (手牌に4枚)
pub fn detect_concealed_kong(hand: &TileTable) -> Vec<Meld> {
    let mut v = vec![];
    for fam in Family::ALL {
        for r in 1..RANK {
            if hand[fam.index()][r] == TILE {
                v.push(Meld::Kong(Tile(fam, r), KongKind::Concealed));
            }
        }
    }
    v
}

// 加槓 (ポン済みの牌を手牌に1枚)
pub fn detect_kong_from_existing_pong(hand: &TileTable, melds: &[Meld]) -> Vec<Meld> {
    let mut v = vec![];
    for m in melds {
        if let Meld::Pong(t) = *m {
            if count_tile(hand, t) >= 1 {
                v.push(Meld::Kong(t, KongKind::ExposedFromExistingPong));
            }
        }
    }
    v
}

// 明槓 (手牌に3枚 + 捨て牌)
pub fn detect_exposed_kong_from_discard(hand: &TileTable, tile: Tile) -> Option<Meld> {
    if count_tile(hand, tile) == 3 {
        Some(Meld::Kong(tile, KongKind::ExposedFromDiscard))
    } else {
        None
    }
}

// チー 捨て牌を含む連続3枚の窓のうち他の2枚を手牌に持っているもの (最大3つ, 昇順)
pub fn detect_chow(hand: &TileTable, tile: Tile) -> Vec<Meld> {
    let mut v = vec![];
    if !tile.is_suited() {
        return v;
    }

    let row = &hand[tile.0.index()];
    let has = |r: usize| r == tile.1 || row[r] > 0;
    for low in tile.1.saturating_sub(2).max(1)..=tile.1 {
        if low + 2 > tile.0.max_rank() {
            break;
        }
        if (low..low + 3).all(has) {
            if let Some(m) = Meld::chow(Tile(tile.0, low)) {
                v.push(m);
            }
        }
    }
    v
}

#[cfg(test)]
fn table(exp: &str) -> TileTable {
    let tiles: Vec<Tile> = exp
        .split_whitespace()
        .map(|s| Tile::from_symbol(s).unwrap())
        .collect();
    tiles_to_tile_table(&tiles)
}

#[test]
fn test_detect_pong() {
    let b2 = Tile(Family::Bamboo, 2);
    assert_eq!(detect_pong(&table("bamboo2 bamboo2 dots1"), b2), Some(Meld::Pong(b2)));
    assert_eq!(detect_pong(&table("bamboo2 dots1 dots1"), b2), None);
    assert_eq!(
        detect_pong(&table("bamboo2 bamboo2 bamboo2"), b2),
        Some(Meld::Pong(b2))
    );
}

#[test]
fn test_detect_kong() {
    let b2 = Tile(Family::Bamboo, 2);
    let w1 = Tile(Family::Wind, 1);
    let hand = table("bamboo2 bamboo2 bamboo2 winds1 winds1 winds1 winds1 dots5");
    assert_eq!(
        detect_exposed_kong_from_discard(&hand, b2),
        Some(Meld::Kong(b2, KongKind::ExposedFromDiscard))
    );
    assert_eq!(detect_exposed_kong_from_discard(&hand, w1), None);
    assert_eq!(detect_concealed_kong(&hand), vec![Meld::Kong(w1, KongKind::Concealed)]);

    let d5 = Tile(Family::Dots, 5);
    let melds = vec![Meld::Pong(d5), Meld::Pong(Tile(Family::Dots, 6))];
    assert_eq!(
        detect_kong_from_existing_pong(&hand, &melds),
        vec![Meld::Kong(d5, KongKind::ExposedFromExistingPong)]
    );
}

#[test]
fn test_detect_chow() {
    let c = |r| Tile(Family::Characters, r);
    let hand = table("characters3 characters4 characters6 characters7");
    let chows = detect_chow(&hand, c(5));
    assert_eq!(
        chows,
        vec![
            Meld::Chow(c(3), c(4), c(5)),
            Meld::Chow(c(4), c(5), c(6)),
            Meld::Chow(c(5), c(6), c(7)),
        ]
    );

    // 端の牌
    let hand = table("characters2 characters3 characters8");
    assert_eq!(detect_chow(&hand, c(1)), vec![Meld::Chow(c(1), c(2), c(3))]);
    let hand = table("characters7 characters8");
    assert_eq!(detect_chow(&hand, c(9)), vec![Meld::Chow(c(7), c(8), c(9))]);

    // 字牌は不可
    let hand = table("dragons1 dragons2");
    assert!(detect_chow(&hand, Tile(Family::Dragon, 3)).is_empty());
    let hand = table("winds2 winds3");
    assert!(detect_chow(&hand, Tile(Family::Wind, 1)).is_empty());
}
