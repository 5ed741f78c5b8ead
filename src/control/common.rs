use crate::model::*;

// [Seat]
#[inline]
pub fn next_seat(seat: Seat, n: usize) -> Seat {
    Seat::from_index(seat.index() + n % SEAT)
}

// fromからtoまでの順方向の距離 (0~3)
#[inline]
pub fn cyclic_distance(from: Seat, to: Seat) -> usize {
    (to.index() + SEAT - from.index()) % SEAT
}

// [TileTable]
#[inline]
pub fn count_tile(tt: &TileTable, t: Tile) -> usize {
    tt[t.0.index()][t.1]
}

#[inline]
pub fn inc_tile(tt: &mut TileTable, t: Tile) {
    tt[t.0.index()][t.1] += 1;
}

// 牌がない場合は何もせずfalseを返却
#[inline]
pub fn dec_tile(tt: &mut TileTable, t: Tile) -> bool {
    let c = &mut tt[t.0.index()][t.1];
    if *c == 0 {
        return false;
    }
    *c -= 1;
    true
}

pub fn count_tiles(tt: &TileTable) -> usize {
    tt.iter().map(|r| r.iter().sum::<usize>()).sum()
}

pub fn tiles_from_tile_table(tt: &TileTable) -> Vec<Tile> {
    let mut tiles = vec![];
    for fam in Family::ALL {
        for r in 1..RANK {
            for _ in 0..tt[fam.index()][r] {
                tiles.push(Tile(fam, r));
            }
        }
    }
    tiles
}

pub fn tiles_to_tile_table(tiles: &[Tile]) -> TileTable {
    let mut tt = TileTable::default();
    for &t in tiles {
        inc_tile(&mut tt, t);
    }
    tt
}

// 存在する牌かどうか
#[inline]
pub fn is_valid_tile(t: Tile) -> bool {
    1 <= t.1 && t.1 <= t.0.max_rank()
}

#[test]
fn test_seat_arithmetic() {
    use Seat::*;
    assert_eq!(next_seat(East, 1), South);
    assert_eq!(next_seat(North, 1), East);
    assert_eq!(next_seat(West, 3), South);
    assert_eq!(next_seat(South, 4), South);
    assert_eq!(cyclic_distance(East, North), 3);
    assert_eq!(cyclic_distance(North, East), 1);
    assert_eq!(cyclic_distance(West, West), 0);
}

#[test]
fn test_tiletable() {
    let tiles = vec![
        Tile(Family::Bamboo, 1),
        Tile(Family::Bamboo, 1),
        Tile(Family::Dots, 9),
        Tile(Family::Dragon, 2),
    ];
    let mut tt = tiles_to_tile_table(&tiles);
    assert_eq!(tiles_from_tile_table(&tt), tiles);
    assert_eq!(count_tile(&tt, Tile(Family::Bamboo, 1)), 2);
    assert_eq!(count_tiles(&tt), 4);
    assert!(dec_tile(&mut tt, Tile(Family::Dragon, 2)));
    assert!(!dec_tile(&mut tt, Tile(Family::Dragon, 2)));
    assert_eq!(count_tiles(&tt), 3);
}
