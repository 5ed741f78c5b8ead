// 和了形の分解, 鳴き候補の検出, ランダムなActorによる対局の性質テスト

use proptest::prelude::*;

use mahjong_table::actor::RandomActor;
use mahjong_table::control::actor::Actor;
use mahjong_table::control::common::*;
use mahjong_table::control::engine::MahjongEngine;
use mahjong_table::hand::*;
use mahjong_table::model::*;

const MAX_STEPS: usize = 10_000;

// 数牌と字牌 (花牌, 季節牌は和了形に含まれないため除外)
fn tile_strategy() -> impl Strategy<Value = Tile> {
    (0usize..5, 1usize..=9).prop_map(|(fi, r)| {
        let fam = Family::ALL[fi];
        Tile(fam, 1 + (r - 1) % fam.max_rank())
    })
}

fn suited_strategy() -> impl Strategy<Value = Tile> {
    (0usize..3, 1usize..=9).prop_map(|(fi, r)| Tile(Family::ALL[fi], r))
}

// 必ず和了形になる牌の組み合わせ (4面子 + 1雀頭)
fn complete_hand_strategy() -> impl Strategy<Value = Vec<Tile>> {
    let meld = prop_oneof![
        tile_strategy().prop_map(|t| vec![t; 3]),
        (0usize..3, 1usize..=7).prop_map(|(fi, r)| {
            let fam = Family::ALL[fi];
            vec![Tile(fam, r), Tile(fam, r + 1), Tile(fam, r + 2)]
        }),
    ];
    (prop::collection::vec(meld, MELDS), tile_strategy()).prop_map(|(melds, pair)| {
        let mut tiles: Vec<Tile> = melds.into_iter().flatten().collect();
        tiles.push(pair);
        tiles.push(pair);
        tiles
    })
}

fn new_game(seed: u64) -> MahjongEngine {
    let actors: [Box<dyn Actor>; SEAT] = [
        Box::new(RandomActor::new(seed)),
        Box::new(RandomActor::new(seed.wrapping_add(1))),
        Box::new(RandomActor::new(seed.wrapping_add(2))),
        Box::new(RandomActor::new(seed.wrapping_add(3))),
    ];
    MahjongEngine::new(seed, Rule::default(), actors, vec![])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn decomposition_preserves_tiles(tiles in prop::collection::vec(tile_strategy(), 0..15)) {
        match decompose_tiles(&tiles) {
            Some(d) => {
                prop_assert_eq!(tiles.len() % 3, 2);
                let mut sorted = tiles.clone();
                sorted.sort();
                prop_assert_eq!(d.tiles(), sorted);
                prop_assert_eq!(d.pair.0, d.pair.1);
                prop_assert!(!d.melds.is_empty());
                for m in &d.melds {
                    if let Meld::Chow(l, mid, h) = *m {
                        prop_assert!(l.is_suited());
                        prop_assert_eq!(l.0, h.0);
                        prop_assert_eq!((mid.1, h.1), (l.1 + 1, l.1 + 2));
                    }
                }
            }
            None => {}
        }
    }

    #[test]
    fn wrong_size_never_decomposes(tiles in prop::collection::vec(tile_strategy(), 0..15)) {
        prop_assume!(tiles.len() % 3 != 2);
        prop_assert!(decompose_tiles(&tiles).is_none());
    }

    #[test]
    fn complete_hands_decompose(tiles in complete_hand_strategy()) {
        let d = decompose_tiles(&tiles);
        prop_assert!(d.is_some(), "{:?}", tiles);
        prop_assert_eq!(d.map(|d| d.melds.len()), Some(MELDS));
    }

    #[test]
    fn chow_candidates_bounded(
        hand in prop::collection::vec(tile_strategy(), 0..14),
        tile in tile_strategy(),
    ) {
        let chows = detect_chow(&tiles_to_tile_table(&hand), tile);
        prop_assert!(chows.len() <= 3);
        if !tile.is_suited() {
            prop_assert!(chows.is_empty());
        }
        for m in &chows {
            prop_assert!(m.contains(tile));
            for t in m.consumed(Some(tile)) {
                prop_assert!(hand.contains(&t));
            }
        }
    }

    #[test]
    fn suited_chow_found(hand in prop::collection::vec(suited_strategy(), 0..14), tile in suited_strategy()) {
        // 捨て牌のすぐ上の2枚を持っていれば必ず候補に含まれる
        let tt = tiles_to_tile_table(&hand);
        if let (Some(a), Some(b)) = (tile.offset(1), tile.offset(2)) {
            if count_tile(&tt, a) > 0 && count_tile(&tt, b) > 0 {
                prop_assert!(detect_chow(&tt, tile).contains(&Meld::Chow(tile, a, b)));
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn game_invariants_hold(seed in 1u64..1_000_000) {
        let mut game = new_game(seed);
        let rule = Rule::default();
        game.start_round().unwrap();

        let mut steps = 0;
        loop {
            let phase = game.step().unwrap();
            steps += 1;
            let stg = game.get_stage();

            // 牌の総数は局中不変
            prop_assert_eq!(stg.count_table_tiles() + stg.wall_count, rule.wall_size());
            prop_assert_eq!(stg.wall_count, game.wall().len());

            for pl in &stg.players {
                let n = pl.effective_len();
                if pl.seat == stg.turn && phase != Phase::AwaitingDraw {
                    prop_assert!(n == HAND || n == HAND + 1, "seed {}: {} has {}", seed, pl.seat, n);
                } else {
                    prop_assert_eq!(n, HAND, "seed {}: {}", seed, pl.seat);
                }
                for fam in Family::ALL {
                    for r in 1..RANK {
                        prop_assert!(pl.hand[fam.index()][r] <= TILE);
                    }
                }
            }

            if phase == Phase::RoundOver || steps >= MAX_STEPS {
                break;
            }
        }

        let stg = game.get_stage();
        prop_assert_eq!(stg.phase, Phase::RoundOver, "seed {}: not terminated", seed);
        match stg.result.as_ref() {
            Some(RoundResult::Win { winners, acting }) => {
                prop_assert!(!winners.is_empty());
                prop_assert_eq!(winners[0].seat, *acting);
            }
            Some(RoundResult::Exhausted) => prop_assert_eq!(stg.wall_count, 0),
            None => prop_assert!(false, "seed {}: no result", seed),
        }
    }

    #[test]
    fn multi_round_games_finish(seed in 1u64..1_000_000) {
        let mut game = new_game(seed);
        let summaries = game.run(3).unwrap();
        prop_assert_eq!(summaries.len(), 3);
        for (i, s) in summaries.iter().enumerate() {
            prop_assert_eq!(s.round, i);
        }
    }
}
