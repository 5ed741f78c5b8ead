use std::collections::VecDeque;

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::error::*;
use crate::model::*;

// 配牌に必要な枚数 (13x4 + 親の14枚目)
pub const DEAL_SIZE: usize = HAND * SEAT + 1;

// 牌山 通常のツモは先頭から,嶺上牌は末尾から
#[derive(Debug, Clone, Default)]
pub struct Wall {
    tiles: VecDeque<Tile>,
}

impl Wall {
    pub fn new(tiles: Vec<Tile>) -> Self {
        Self {
            tiles: tiles.into(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn draw(&mut self) -> EngineResult<Tile> {
        self.tiles.pop_front().ok_or(EngineError::WallEmpty)
    }

    pub fn draw_replacement(&mut self) -> EngineResult<Tile> {
        self.tiles.pop_back().ok_or(EngineError::WallEmpty)
    }
}

// 局ごとに新しい牌山を生成する
pub trait WallBuilder {
    fn build(&mut self, rule: &Rule, dealer: Seat) -> Vec<Tile>;
}

// シード値に従ってシャッフルし,親のサイコロで開門位置を決める
pub struct ShuffledWall {
    rng: StdRng,
}

impl ShuffledWall {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl WallBuilder for ShuffledWall {
    fn build(&mut self, rule: &Rule, dealer: Seat) -> Vec<Tile> {
        let mut wall = create_wall(rule);
        wall.shuffle(&mut self.rng);
        let dice = roll_dice(&mut self.rng);
        log::debug!("dealer {} rolled {:?}", dealer, dice);
        break_wall(&mut wall, dice);
        wall
    }
}

// ルールで有効な牌をすべて並べた牌山 (未シャッフル)
pub fn create_wall(rule: &Rule) -> Vec<Tile> {
    let mut wall = Vec::new();
    for fam in Family::ALL {
        if !rule.includes(fam) {
            continue;
        }
        // 花牌, 季節牌は1枚ずつ
        let n = if fam.is_bonus() { 1 } else { TILE };
        for r in 1..=fam.max_rank() {
            for _ in 0..n {
                wall.push(Tile(fam, r));
            }
        }
    }
    wall
}

pub fn roll_dice<R: Rng>(rng: &mut R) -> (usize, usize) {
    (rng.gen_range(1..=6), rng.gen_range(1..=6))
}

// 親から(合計-1)%4番目の山の,小さい方の目x2枚目から取り始める
pub fn break_wall(wall: &mut [Tile], dice: (usize, usize)) {
    if wall.is_empty() {
        return;
    }
    let quarter = wall.len() / SEAT;
    let start = (dice.0 + dice.1 - 1) % SEAT * quarter + 2 * dice.0.min(dice.1);
    wall.rotate_left(start % wall.len());
}

// 親から4枚ずつ3周,最後に1枚ずつ配る
pub fn deal(wall: &mut Wall, dealer: Seat) -> EngineResult<[Vec<Tile>; SEAT]> {
    if wall.len() < DEAL_SIZE {
        return Err(EngineError::WallTooShort { size: wall.len() });
    }

    let mut hands: [Vec<Tile>; SEAT] = Default::default();
    for i in 0..4 {
        let n = if i != 3 { 4 } else { 1 };
        for s in 0..SEAT {
            let seat = Seat::from_index(dealer.index() + s);
            for _ in 0..n {
                hands[seat.index()].push(wall.draw()?);
            }
        }
    }
    Ok(hands)
}

// 各プレイヤーがサイコロを2つ振り,合計が最大のプレイヤーが親 (同点は先に振った方)
pub fn roll_first_dealer<R: Rng>(rng: &mut R) -> Seat {
    let mut best = (0, Seat::East);
    for s in Seat::ALL {
        let (d0, d1) = roll_dice(rng);
        if d0 + d1 > best.0 {
            best = (d0 + d1, s);
        }
    }
    best.1
}

#[test]
fn test_create_wall() {
    let rule = Rule::default();
    let wall = create_wall(&rule);
    assert_eq!(wall.len(), rule.wall_size());
    assert_eq!(wall.len(), 136);
    assert_eq!(wall.iter().filter(|&&t| t == Tile(Family::Wind, 4)).count(), 4);

    let rule = Rule {
        honors: false,
        bonus: true,
        ..Default::default()
    };
    let wall = create_wall(&rule);
    assert_eq!(wall.len(), rule.wall_size());
    assert_eq!(wall.len(), 116);
    assert_eq!(wall.iter().filter(|&&t| t == Tile(Family::Season, 3)).count(), 1);
}

#[test]
fn test_shuffled_wall_seed() {
    let rule = Rule::default();
    let w1 = ShuffledWall::new(7).build(&rule, Seat::East);
    let w2 = ShuffledWall::new(7).build(&rule, Seat::East);
    assert_eq!(w1, w2);
    let mut sorted = w1.clone();
    sorted.sort();
    assert_eq!(sorted, create_wall(&rule));
}

#[test]
fn test_break_wall() {
    let mut wall = create_wall(&Rule::default());
    let orig = wall.clone();
    // 合計7 -> 3番目の山, 小さい方の目3 -> 6枚目
    break_wall(&mut wall, (3, 4));
    let start = 2 * 34 + 6;
    assert_eq!(wall[0], orig[start]);
    assert_eq!(wall[wall.len() - 1], orig[start - 1]);
}

#[test]
fn test_deal() {
    let tiles = create_wall(&Rule::default());
    let mut wall = Wall::new(tiles.clone());
    let hands = deal(&mut wall, Seat::South).unwrap();
    for h in &hands {
        assert_eq!(h.len(), HAND);
    }
    // 親(South)が最初の4枚
    assert_eq!(hands[Seat::South.index()][..4], tiles[..4]);
    assert_eq!(hands[Seat::West.index()][..4], tiles[4..8]);
    assert_eq!(hands[Seat::East.index()][..4], tiles[12..16]);
    assert_eq!(wall.len(), 136 - HAND * SEAT);

    assert_eq!(wall.draw_replacement().unwrap(), tiles[135]);
    assert_eq!(wall.draw().unwrap(), tiles[HAND * SEAT]);

    let mut short = Wall::new(tiles[..DEAL_SIZE - 1].to_vec());
    assert_eq!(
        deal(&mut short, Seat::East),
        Err(EngineError::WallTooShort { size: DEAL_SIZE - 1 })
    );
    assert_eq!(short.len(), DEAL_SIZE - 1);
}
