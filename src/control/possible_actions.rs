use crate::control::common::*;
use crate::error::*;
use crate::hand::*;
use crate::model::*;

// ツモ後(嶺上ツモを含む)の手番プレイヤーの候補 (ツモ和了, 暗槓, 加槓)
pub fn calc_self_candidates(stg: &Stage, seat: Seat) -> EngineResult<Candidates> {
    let pl = stg.player(seat);
    check_hand_size(pl, HAND + 1)?;

    let mut cands = Candidates {
        win: decompose_hand(&pl.hand, &pl.melds),
        ..Default::default()
    };
    // 嶺上牌がない場合は槓不可
    if stg.wall_count != 0 {
        cands.kongs.extend(detect_concealed_kong(&pl.hand));
        cands.kongs.extend(detect_kong_from_existing_pong(&pl.hand, &pl.melds));
    }
    Ok(cands)
}

// 打牌に対する他家3人の候補 (ロン, 明槓, ポン, チー)
// 下家から順に返却し,すべて同じStageから計算する
pub fn calc_claim_candidates(
    stg: &Stage,
    discarder: Seat,
    tile: Tile,
) -> EngineResult<Vec<(Seat, Candidates)>> {
    let mut res = vec![];
    for i in 1..SEAT {
        let s = next_seat(discarder, i);
        let pl = stg.player(s);
        check_hand_size(pl, HAND)?;

        let mut hand = pl.hand;
        inc_tile(&mut hand, tile);
        let mut cands = Candidates {
            win: decompose_hand(&hand, &pl.melds),
            pong: detect_pong(&pl.hand, tile),
            ..Default::default()
        };
        if stg.wall_count != 0 {
            cands.kongs.extend(detect_exposed_kong_from_discard(&pl.hand, tile));
        }
        if i == 1 {
            cands.chows = detect_chow(&pl.hand, tile);
        }
        res.push((s, cands));
    }
    Ok(res)
}

// 副露を3枚として数えた手牌の枚数が一致しない場合は和了判定を行わない
fn check_hand_size(pl: &Player, size: usize) -> EngineResult<()> {
    let n = pl.effective_len();
    if n != size {
        return Err(EngineError::HandSize { seat: pl.seat, size: n });
    }
    Ok(())
}

#[cfg(test)]
fn stage_with_hands(hands: [&str; SEAT]) -> Stage {
    let mut stg = Stage::default();
    stg.wall_count = 10;
    for s in Seat::ALL {
        let pl = stg.player_mut(s);
        pl.seat = s;
        for sym in hands[s.index()].split_whitespace() {
            inc_tile(&mut pl.hand, Tile::from_symbol(sym).unwrap());
        }
    }
    stg
}

#[test]
fn test_claim_candidates_kong_and_pong() {
    let filler = "dots1 dots2 dots3 dots4 dots5 dots6 dots7 dots8 dots9 winds1";
    let hand_b2 = format!("bamboo2 bamboo2 bamboo2 {}", filler);
    let other = "characters1 characters1 characters5 characters5 characters9 characters9 winds2 winds2 winds3 winds3 winds4 winds4 dragons1";
    let stg = stage_with_hands([other, other, &hand_b2, other]);
    let b2 = Tile(Family::Bamboo, 2);

    let res = calc_claim_candidates(&stg, Seat::East, b2).unwrap();
    let seats: Vec<Seat> = res.iter().map(|r| r.0).collect();
    assert_eq!(seats, vec![Seat::South, Seat::West, Seat::North]);

    let west = &res[1].1;
    assert_eq!(west.kongs, vec![Meld::Kong(b2, KongKind::ExposedFromDiscard)]);
    assert_eq!(west.pong, Some(Meld::Pong(b2)));
    assert!(west.chows.is_empty());
    assert!(res[0].1.is_empty());
    assert!(res[2].1.is_empty());

    // 牌山が空の場合は明槓なし
    let mut stg = stg;
    stg.wall_count = 0;
    let res = calc_claim_candidates(&stg, Seat::East, b2).unwrap();
    assert!(res[1].1.kongs.is_empty());
    assert!(res[1].1.pong.is_some());
}

#[test]
fn test_claim_candidates_chow_next_only() {
    let hand = "dots5 characters6 dots4 dots4 bamboo1 bamboo1 bamboo5 bamboo6 bamboo7 winds1 winds2 winds3 winds4";
    let stg = stage_with_hands([hand, hand, hand, hand]);
    let d3 = Tile(Family::Dots, 3);

    let res = calc_claim_candidates(&stg, Seat::North, d3).unwrap();
    assert_eq!(res[0].0, Seat::East);
    assert_eq!(res[0].1.chows, vec![Meld::chow(d3).unwrap()]);
    assert!(res[1].1.chows.is_empty());
    assert!(res[2].1.chows.is_empty());
}

#[test]
fn test_claim_candidates_win_and_size() {
    let tenpai = "bamboo1 bamboo2 bamboo3 dots4 dots5 dots6 characters7 characters8 characters9 winds1 winds1 winds1 dragons2";
    let other = "characters1 characters1 characters5 characters5 characters9 characters9 winds2 winds2 winds3 winds3 winds4 winds4 dragons1";
    let stg = stage_with_hands([other, other, other, tenpai]);
    let res = calc_claim_candidates(&stg, Seat::South, Tile(Family::Dragon, 2)).unwrap();
    assert_eq!(res[1].0, Seat::North);
    assert!(res[1].1.win.is_some());
    assert!(res[0].1.win.is_none());

    // 14枚のプレイヤーがいる場合は不整合
    let mut stg = stg;
    inc_tile(&mut stg.player_mut(Seat::East).hand, Tile(Family::Dots, 1));
    assert_eq!(
        calc_claim_candidates(&stg, Seat::South, Tile(Family::Dragon, 2)),
        Err(EngineError::HandSize {
            seat: Seat::East,
            size: 14
        })
    );
}

#[test]
fn test_self_candidates() {
    let hand = "bamboo1 bamboo2 bamboo3 dots4 dots5 dots6 characters7 characters8 characters9 winds1 winds1 winds1 winds1 dragons2";
    let other = "characters1 characters1 characters5 characters5 characters9 characters9 winds2 winds2 winds3 winds3 winds4 winds4 dragons1";
    let mut stg = stage_with_hands([hand, other, other, other]);
    let cands = calc_self_candidates(&stg, Seat::East).unwrap();
    assert!(cands.win.is_none());
    assert_eq!(
        cands.kongs,
        vec![Meld::Kong(Tile(Family::Wind, 1), KongKind::Concealed)]
    );

    stg.wall_count = 0;
    assert!(calc_self_candidates(&stg, Seat::East).unwrap().is_empty());
    assert!(calc_self_candidates(&stg, Seat::South).is_err());
}
