use crate::control::common::*;
use crate::model::*;

// 1つの捨て牌に対する鳴き・ロンの解決結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    // winnersは放銃者から近い順, actingは先頭
    Win {
        winners: Vec<(Seat, Decomposition)>,
        acting: Seat,
    },
    Meld {
        seat: Seat,
        meld: Meld,
    },
    Pass,
}

// 優先順位: ロン > 槓, ポン > チー
// claimsは各プレイヤーが自分の候補から選択したアクション
pub fn resolve(discarder: Seat, discard: Tile, claims: &[(Seat, Action)]) -> Outcome {
    let mut claims: Vec<&(Seat, Action)> = claims
        .iter()
        .filter(|(s, a)| {
            if *s == discarder {
                log::warn!("claim from the discarder {} ignored: {}", s, a);
                return false;
            }
            !a.is_skip()
        })
        .collect();
    claims.sort_by_key(|(s, _)| cyclic_distance(discarder, *s));

    // ロン
    let winners: Vec<(Seat, Decomposition)> = claims
        .iter()
        .filter_map(|(s, a)| match a {
            Action::Win(d) => Some((*s, d.clone())),
            _ => None,
        })
        .collect();
    if let Some(&(acting, _)) = winners.first() {
        return Outcome::Win { winners, acting };
    }

    // 槓, ポン (同時に成立することはないが,その場合は放銃者から近い方)
    for (s, a) in &claims {
        if let Action::Kong(m) | Action::Pong(m) = a {
            if m.contains(discard) {
                return Outcome::Meld { seat: *s, meld: *m };
            }
            log::warn!("claim {} by {} does not use {}", a, s, discard);
        }
    }

    // チー (下家のみ)
    let next = next_seat(discarder, 1);
    for (s, a) in &claims {
        if let Action::Chow(m) = a {
            if *s != next {
                log::warn!("chow from non-adjacent seat {} ignored", s);
                continue;
            }
            if m.contains(discard) {
                return Outcome::Meld { seat: *s, meld: *m };
            }
        }
    }

    Outcome::Pass
}

#[cfg(test)]
fn win_of(tiles: &[Tile]) -> Decomposition {
    crate::hand::decompose_tiles(tiles).unwrap()
}

#[test]
fn test_resolve_win_over_pong() {
    use Seat::*;
    let b2 = Tile(Family::Bamboo, 2);
    let d = win_of(&[b2, b2, b2, Tile(Family::Dots, 1), Tile(Family::Dots, 1)]);
    let claims = vec![
        (South, Action::Pong(Meld::Pong(b2))),
        (North, Action::Win(d.clone())),
        (West, Action::Skip),
    ];
    assert_eq!(
        resolve(East, b2, &claims),
        Outcome::Win {
            winners: vec![(North, d)],
            acting: North
        }
    );
}

#[test]
fn test_resolve_pong_over_chow() {
    use Seat::*;
    let c4 = Tile(Family::Characters, 4);
    let chow = Meld::chow(Tile(Family::Characters, 3)).unwrap();
    let claims = vec![
        (West, Action::Chow(chow)),
        (North, Action::Pong(Meld::Pong(c4))),
        (East, Action::Skip),
    ];
    // Westの上家はSouth
    assert_eq!(
        resolve(South, c4, &claims),
        Outcome::Meld {
            seat: North,
            meld: Meld::Pong(c4)
        }
    );
}

#[test]
fn test_resolve_chow_adjacency() {
    use Seat::*;
    let c4 = Tile(Family::Characters, 4);
    let chow = Meld::chow(Tile(Family::Characters, 3)).unwrap();
    assert_eq!(
        resolve(East, c4, &[(West, Action::Chow(chow))]),
        Outcome::Pass
    );
    assert_eq!(
        resolve(East, c4, &[(South, Action::Chow(chow))]),
        Outcome::Meld {
            seat: South,
            meld: chow
        }
    );
}

#[test]
fn test_resolve_multiple_wins() {
    use Seat::*;
    let w1 = Tile(Family::Wind, 1);
    let d = win_of(&[w1, w1, w1, Tile(Family::Dots, 1), Tile(Family::Dots, 1)]);
    let claims = vec![
        (South, Action::Win(d.clone())),
        (East, Action::Win(d.clone())),
        (North, Action::Skip),
    ];
    // Westの打牌: North(1) -> East(2) -> South(3)
    match resolve(West, w1, &claims) {
        Outcome::Win { winners, acting } => {
            assert_eq!(acting, East);
            let seats: Vec<Seat> = winners.iter().map(|w| w.0).collect();
            assert_eq!(seats, vec![East, South]);
        }
        o => panic!("unexpected outcome: {:?}", o),
    }
}

#[test]
fn test_resolve_ignores_discarder() {
    use Seat::*;
    let b2 = Tile(Family::Bamboo, 2);
    let claims = vec![(East, Action::Pong(Meld::Pong(b2))), (South, Action::Skip)];
    assert_eq!(resolve(East, b2, &claims), Outcome::Pass);
    assert_eq!(resolve(East, b2, &[]), Outcome::Pass);
}
