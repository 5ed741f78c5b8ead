// 牌山とActorの選択を固定した局の進行シナリオ

use std::sync::{Arc, Mutex};

use mahjong_table::actor::Nop;
use mahjong_table::control::actor::{Actor, Config};
use mahjong_table::control::common::*;
use mahjong_table::control::engine::MahjongEngine;
use mahjong_table::control::wall::WallBuilder;
use mahjong_table::error::EngineError;
use mahjong_table::listener::Listener;
use mahjong_table::model::*;

fn tiles(exp: &str) -> Vec<Tile> {
    exp.split_whitespace()
        .map(|s| Tile::from_symbol(s).unwrap())
        .collect()
}

// 親(East)から配牌順に並べ,残りをツモ順に続ける
struct ScriptedWall {
    wall: Vec<Tile>,
}

impl ScriptedWall {
    fn new(hands: [&str; SEAT], draws: &str) -> Self {
        let hands = hands.map(tiles);
        let mut wall = vec![];
        for i in 0..4 {
            let (start, n) = if i != 3 { (i * 4, 4) } else { (12, 1) };
            for h in &hands {
                assert_eq!(h.len(), HAND);
                wall.extend_from_slice(&h[start..start + n]);
            }
        }
        wall.extend(tiles(draws));
        Self { wall }
    }
}

impl WallBuilder for ScriptedWall {
    fn build(&mut self, _rule: &Rule, _dealer: Seat) -> Vec<Tile> {
        self.wall.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Pick {
    Skip,
    Win,
    Kong,
    Pong,
    Chow,
}

// picksの順に該当するアクションがあれば選択し,提示された候補を記録する
#[derive(Clone)]
struct Scripted {
    config: Config,
    picks: Vec<Pick>,
    discard: Option<Tile>,
    offered: Arc<Mutex<Vec<Vec<Action>>>>,
}

impl Scripted {
    fn new(pick: Pick, discard: Option<Tile>) -> Self {
        Self::with_picks(&[pick], discard)
    }

    fn with_picks(picks: &[Pick], discard: Option<Tile>) -> Self {
        Self {
            config: Config::new("Scripted", vec![]),
            picks: picks.to_vec(),
            discard,
            offered: Arc::new(Mutex::new(vec![])),
        }
    }
}

impl Actor for Scripted {
    fn select_action(&mut self, _stg: &Stage, _seat: Seat, acts: &[Action]) -> Action {
        self.offered.lock().unwrap().push(acts.to_vec());
        for &pick in &self.picks {
            let found = acts.iter().find(|a| match (pick, a) {
                (Pick::Win, Action::Win(_)) => true,
                (Pick::Kong, Action::Kong(_)) => true,
                (Pick::Pong, Action::Pong(_)) => true,
                (Pick::Chow, Action::Chow(_)) => true,
                _ => false,
            });
            if let Some(a) = found {
                return a.clone();
            }
        }
        Action::Skip
    }

    fn select_discard(&mut self, stg: &Stage, seat: Seat) -> Tile {
        let pl = stg.player(seat);
        if let Some(t) = self.discard {
            if pl.count_tile(t) > 0 {
                return t;
            }
        }
        pl.drawn
            .unwrap_or_else(|| tiles_from_tile_table(&pl.hand)[0])
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}

impl Listener for Scripted {}

// 常に手牌にない牌を打牌
#[derive(Clone)]
struct Cheater {
    config: Config,
}

impl Actor for Cheater {
    fn select_action(&mut self, _stg: &Stage, _seat: Seat, _acts: &[Action]) -> Action {
        Action::Pong(Meld::Pong(Tile(Family::Season, 1)))
    }

    fn select_discard(&mut self, _stg: &Stage, _seat: Seat) -> Tile {
        Tile(Family::Flower, 4)
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}

impl Listener for Cheater {}

fn nop() -> Box<dyn Actor> {
    Box::new(Nop::new())
}

// condを満たすか局が終わるまで進行
fn step_until(game: &mut MahjongEngine, cond: impl Fn(&Stage) -> bool) -> Phase {
    loop {
        let phase = game.step().unwrap();
        if cond(game.get_stage()) || phase == Phase::RoundOver {
            return phase;
        }
    }
}

fn engine(actors: [Box<dyn Actor>; SEAT], wall: ScriptedWall) -> MahjongEngine {
    MahjongEngine::with_wall_builder(Rule::default(), Seat::East, actors, vec![], Box::new(wall))
}

const TENPAI: &str = "bamboo1 bamboo2 bamboo3 dots4 dots5 dots6 characters7 characters8 characters9 winds1 winds1 winds1 dragons2";
const FILLER: &str = "characters1 characters1 characters5 characters5 characters9 characters9 winds2 winds2 winds3 winds3 winds4 winds4 dragons1";
const DISCARDER: &str = "bamboo2 dots1 dots1 dots1 dots5 dots5 dots5 characters2 characters2 characters2 winds1 winds2 dragons1";
const THREE_B2: &str = "bamboo2 bamboo2 bamboo2 characters4 characters6 characters8 dots2 dots4 dots6 dots8 winds2 winds4 dragons2";

#[test]
fn exhaustion_ends_round_without_winner() {
    let wall = ScriptedWall::new([FILLER; SEAT], "dots9 dots9 dots9 dots7 dots7 dots7");
    let mut game = engine([nop(), nop(), nop(), nop()], wall);
    let summary = game.run_round().unwrap();

    assert!(matches!(summary.result, RoundResult::Exhausted));
    let stg = game.get_stage();
    assert_eq!(stg.phase, Phase::RoundOver);
    assert_eq!(stg.wall_count, 0);
    assert!(game.wall().is_empty());
    let n_discards: usize = stg.players.iter().map(|p| p.discards.len()).sum();
    assert_eq!(n_discards, 6);
    assert_eq!(stg.count_table_tiles(), 13 * 4 + 6);
}

#[test]
fn exhaustion_dealer_policy() {
    for (policy, dealer) in [
        (ExhaustionDealer::Keep, Seat::East),
        (ExhaustionDealer::Rotate, Seat::South),
    ] {
        let wall = ScriptedWall::new([FILLER; SEAT], "dots9");
        let rule = Rule {
            exhaustion_dealer: policy,
            ..Default::default()
        };
        let actors = [nop(), nop(), nop(), nop()];
        let mut game = MahjongEngine::with_wall_builder(rule, Seat::East, actors, vec![], Box::new(wall));
        let summaries = game.run(2).unwrap();
        assert_eq!(summaries[0].dealer, Seat::East);
        assert_eq!(summaries[1].dealer, dealer);
        assert_eq!(game.get_stage().dealer, dealer);
    }
}

#[test]
fn self_draw_win() {
    let wall = ScriptedWall::new([TENPAI, FILLER, FILLER, FILLER], "dragons2 dots9 dots9");
    let east = Scripted::new(Pick::Win, None);
    let offered = east.offered.clone();
    let mut game = engine([Box::new(east), nop(), nop(), nop()], wall);

    let summary = game.run_round().unwrap();
    match &summary.result {
        RoundResult::Win { winners, acting } => {
            assert_eq!(*acting, Seat::East);
            assert_eq!(winners.len(), 1);
            let ctx = &winners[0];
            assert!(ctx.is_self_draw);
            assert_eq!(ctx.from, None);
            assert_eq!(ctx.winning_tile, Tile(Family::Dragon, 2));
            assert_eq!(ctx.decomposition.pair.0, Tile(Family::Dragon, 2));
        }
        r => panic!("unexpected result: {:?}", r),
    }
    {
        let offered = offered.lock().unwrap();
        assert_eq!(offered.len(), 1);
        assert!(offered[0][0].is_skip());
    }
    // 勝った親は続投
    let summary = game.run_round();
    assert!(summary.is_ok());
    assert_eq!(game.get_stage().dealer, Seat::East);
}

// 手牌にbamboo2が3枚あるプレイヤーには明槓とポンの両方が提示される
#[test]
fn kong_and_pong_from_discard() {
    let b2 = Tile(Family::Bamboo, 2);
    for pick in [Pick::Kong, Pick::Pong] {
        let wall = ScriptedWall::new([DISCARDER, FILLER, THREE_B2, FILLER], "winds4 dots9 dots9 dots9 dragons3");
        let east = Scripted::new(Pick::Skip, Some(b2));
        let west = Scripted::new(pick, None);
        let offered = west.offered.clone();
        let mut game = engine([Box::new(east), nop(), Box::new(west), nop()], wall);

        game.start_round().unwrap();
        assert_eq!(game.step().unwrap(), Phase::AwaitingSelfAction); // East draw
        assert_eq!(game.step().unwrap(), Phase::AwaitingDiscard);
        assert_eq!(game.step().unwrap(), Phase::AwaitingClaims); // East discards bamboo2
        let wall_len = game.wall().len();
        let phase = game.step().unwrap();

        {
            let offered = offered.lock().unwrap();
            assert_eq!(offered.len(), 1);
            let acts = &offered[0];
            assert!(acts.contains(&Action::Kong(Meld::Kong(b2, KongKind::ExposedFromDiscard))));
            assert!(acts.contains(&Action::Pong(Meld::Pong(b2))));
        }

        let stg = game.get_stage();
        let west = stg.player(Seat::West);
        assert_eq!(stg.turn, Seat::West);
        assert!(stg.player(Seat::East).discards.is_empty());
        match pick {
            Pick::Kong => {
                // 嶺上牌は牌山の末尾
                assert_eq!(phase, Phase::AwaitingSelfAction);
                assert_eq!(west.melds, vec![Meld::Kong(b2, KongKind::ExposedFromDiscard)]);
                assert_eq!(west.count_tile(b2), 0);
                assert_eq!(west.drawn, Some(Tile(Family::Dragon, 3)));
                assert_eq!(west.hand_len(), 13 - 3 + 1);
                assert_eq!(game.wall().len(), wall_len - 1);
            }
            _ => {
                assert_eq!(phase, Phase::AwaitingDiscard);
                assert_eq!(west.melds, vec![Meld::Pong(b2)]);
                assert_eq!(west.count_tile(b2), 1);
                assert_eq!(west.hand_len(), 13 - 2);
                assert_eq!(game.wall().len(), wall_len);
            }
        }
        assert_eq!(stg.count_table_tiles() + stg.wall_count, 13 * 4 + 5);

        // 局の終了まで進行可能
        while game.step().unwrap() != Phase::RoundOver {}
        assert!(matches!(game.get_stage().result, Some(RoundResult::Exhausted)));
    }
}

#[test]
fn ron_beats_pong() {
    let b2 = Tile(Family::Bamboo, 2);
    // Southはbamboo2単騎, Westはbamboo2のポン
    let south = "bamboo3 bamboo4 bamboo5 dots4 dots5 dots6 characters7 characters8 characters9 winds1 winds1 winds1 bamboo2";
    let wall = ScriptedWall::new([DISCARDER, south, THREE_B2, FILLER], "winds4 dots9 dots9");
    let east = Scripted::new(Pick::Skip, Some(b2));
    let south = Scripted::new(Pick::Win, None);
    let west = Scripted::new(Pick::Pong, None);
    let west_offered = west.offered.clone();
    let mut game = engine([Box::new(east), Box::new(south), Box::new(west), nop()], wall);

    let summary = game.run_round().unwrap();
    match &summary.result {
        RoundResult::Win { winners, acting } => {
            assert_eq!(*acting, Seat::South);
            assert_eq!(winners[0].from, Some(Seat::East));
            assert_eq!(winners[0].winning_tile, b2);
            assert!(!winners[0].is_self_draw);
        }
        r => panic!("unexpected result: {:?}", r),
    }
    // Westにも候補は提示されたが,ポンは成立しない
    assert_eq!(west_offered.lock().unwrap().len(), 1);
    assert!(game.get_stage().player(Seat::West).melds.is_empty());
}

#[test]
fn illegal_choices_are_rejected() {
    let b2 = Tile(Family::Bamboo, 2);
    let cheater = || -> Box<dyn Actor> {
        Box::new(Cheater {
            config: Config::new("Cheater", vec![]),
        })
    };

    // 手牌にない牌の打牌
    let wall = ScriptedWall::new([FILLER; SEAT], "dots9 dots9");
    let mut game = engine([cheater(), nop(), nop(), nop()], wall);
    game.start_round().unwrap();
    game.step().unwrap();
    game.step().unwrap();
    let step = game.get_stage().step;
    assert_eq!(
        game.step(),
        Err(EngineError::TileNotHeld {
            seat: Seat::East,
            tile: Tile(Family::Flower, 4)
        })
    );
    let stg = game.get_stage();
    assert_eq!(stg.step, step);
    assert_eq!(stg.phase, Phase::AwaitingDiscard);
    assert_eq!(stg.player(Seat::East).hand_len(), 14);

    // 候補外のアクション
    let wall = ScriptedWall::new([DISCARDER, FILLER, THREE_B2, FILLER], "winds4 dots9 dots9");
    let east = Scripted::new(Pick::Skip, Some(b2));
    let mut game = engine([Box::new(east), nop(), cheater(), nop()], wall);
    game.start_round().unwrap();
    for _ in 0..3 {
        game.step().unwrap();
    }
    assert!(matches!(
        game.step(),
        Err(EngineError::IllegalAction { seat: Seat::West, .. })
    ));
    assert_eq!(game.get_stage().phase, Phase::AwaitingClaims);
    assert_eq!(game.get_stage().player(Seat::East).discards.len(), 1);
}

#[test]
fn short_wall_is_rejected() {
    struct Short;
    impl WallBuilder for Short {
        fn build(&mut self, _rule: &Rule, _dealer: Seat) -> Vec<Tile> {
            vec![Tile(Family::Dots, 1); 20]
        }
    }
    let mut game = MahjongEngine::with_wall_builder(
        Rule::default(),
        Seat::East,
        [nop(), nop(), nop(), nop()],
        vec![],
        Box::new(Short),
    );
    assert_eq!(game.run_round().err(), Some(EngineError::WallTooShort { size: 20 }));
}

#[test]
fn chow_from_previous_seat() {
    let b = |r| Tile(Family::Bamboo, r);
    let east = "bamboo3 dots1 dots1 dots1 dots5 dots5 dots5 characters2 characters2 characters2 winds1 winds2 dragons1";
    let south = "bamboo2 bamboo4 characters4 characters6 characters8 dots2 dots4 dots6 dots8 winds2 winds4 dragons2 dragons3";
    let wall = ScriptedWall::new([east, south, FILLER, FILLER], "winds4 dots9 dots9 dots9");
    let east = Scripted::new(Pick::Skip, Some(b(3)));
    let south = Scripted::new(Pick::Chow, None);
    let offered = south.offered.clone();
    let mut game = engine([Box::new(east), Box::new(south), nop(), nop()], wall);

    game.start_round().unwrap();
    let phase = step_until(&mut game, |stg| !stg.player(Seat::South).melds.is_empty());
    assert_eq!(phase, Phase::AwaitingDiscard);
    assert_eq!(
        offered.lock().unwrap()[0],
        vec![Action::Skip, Action::Chow(Meld::Chow(b(2), b(3), b(4)))]
    );

    let stg = game.get_stage();
    let pl = stg.player(Seat::South);
    assert_eq!(stg.turn, Seat::South);
    assert_eq!(pl.melds, vec![Meld::Chow(b(2), b(3), b(4))]);
    assert_eq!((pl.count_tile(b(2)), pl.count_tile(b(4))), (0, 0));
    assert_eq!(pl.hand_len(), 13 - 2);
    assert_eq!(pl.drawn, None);
    assert!(stg.player(Seat::East).discards.is_empty());
    assert_eq!(stg.count_table_tiles() + stg.wall_count, 13 * 4 + 4);

    // チーした後の打牌
    assert_eq!(game.step().unwrap(), Phase::AwaitingClaims);
    let stg = game.get_stage();
    assert_eq!(stg.player(Seat::South).discards.len(), 1);
    assert_eq!(stg.player(Seat::South).effective_len(), HAND);

    while game.step().unwrap() != Phase::RoundOver {}
    assert!(matches!(game.get_stage().result, Some(RoundResult::Exhausted)));
}

#[test]
fn concealed_kong_takes_replacement() {
    let w1 = Tile(Family::Wind, 1);
    let b9 = Tile(Family::Bamboo, 9);
    let east = "winds1 winds1 winds1 winds1 dots1 dots2 dots3 characters2 characters2 characters2 bamboo5 bamboo7 dragons1";
    let wall = ScriptedWall::new([east, FILLER, FILLER, FILLER], "dragons3 dots9 dots9 bamboo9");
    let east = Scripted::new(Pick::Kong, None);
    let offered = east.offered.clone();
    let mut game = engine([Box::new(east), nop(), nop(), nop()], wall);

    game.start_round().unwrap();
    assert_eq!(game.step().unwrap(), Phase::AwaitingSelfAction);
    assert_eq!(game.get_stage().player(Seat::East).drawn, Some(Tile(Family::Dragon, 3)));
    let wall_len = game.wall().len();

    // 暗槓 -> 嶺上ツモ(牌山の末尾) -> 再度ツモ後の判定
    assert_eq!(game.step().unwrap(), Phase::AwaitingSelfAction);
    {
        let stg = game.get_stage();
        let pl = stg.player(Seat::East);
        assert_eq!(pl.melds, vec![Meld::Kong(w1, KongKind::Concealed)]);
        assert_eq!(pl.count_tile(w1), 0);
        assert_eq!(pl.drawn, Some(b9));
        assert_eq!(pl.hand_len(), 14 - 4 + 1);
        assert_eq!(pl.effective_len(), HAND + 1);
        assert_eq!(stg.turn, Seat::East);
        assert_eq!(stg.wall_count, wall_len - 1);
        assert_eq!(game.wall().len(), wall_len - 1);
    }
    assert_eq!(
        offered.lock().unwrap()[0],
        vec![Action::Skip, Action::Kong(Meld::Kong(w1, KongKind::Concealed))]
    );

    // 嶺上ツモ後は候補がないため問い合わせずに打牌へ
    assert_eq!(game.step().unwrap(), Phase::AwaitingDiscard);
    assert_eq!(offered.lock().unwrap().len(), 1);
    assert_eq!(game.step().unwrap(), Phase::AwaitingClaims);
    assert_eq!(game.get_stage().player(Seat::East).discards[0].tile, b9);

    while game.step().unwrap() != Phase::RoundOver {}
    assert!(matches!(game.get_stage().result, Some(RoundResult::Exhausted)));
}

#[test]
fn pong_upgraded_to_kong() {
    let b2 = Tile(Family::Bamboo, 2);
    let dr3 = Tile(Family::Dragon, 3);
    let west = "bamboo2 bamboo2 characters4 characters6 characters8 dots2 dots4 dots6 dots8 winds2 winds4 dragons2 dragons3";
    let wall = ScriptedWall::new(
        [DISCARDER, FILLER, west, FILLER],
        "winds4 dots9 dots9 dots9 bamboo2 bamboo9",
    );
    let east = Scripted::new(Pick::Skip, Some(b2));
    let west = Scripted::with_picks(&[Pick::Kong, Pick::Pong], Some(dr3));
    let offered = west.offered.clone();
    let mut game = engine([Box::new(east), nop(), Box::new(west), nop()], wall);

    game.start_round().unwrap();
    let phase = step_until(&mut game, |stg| !stg.player(Seat::West).melds.is_empty());
    assert_eq!(phase, Phase::AwaitingDiscard);
    {
        let stg = game.get_stage();
        let pl = stg.player(Seat::West);
        assert_eq!(pl.melds, vec![Meld::Pong(b2)]);
        assert_eq!(pl.count_tile(b2), 0);
        assert!(stg.player(Seat::East).discards.is_empty());
    }

    // 4枚目のbamboo2をツモって加槓
    let phase = step_until(&mut game, |stg| stg.player(Seat::West).melds[0].is_kong());
    assert_eq!(phase, Phase::AwaitingSelfAction);
    let stg = game.get_stage();
    let pl = stg.player(Seat::West);
    assert_eq!(stg.turn, Seat::West);
    assert_eq!(pl.melds, vec![Meld::Kong(b2, KongKind::ExposedFromExistingPong)]);
    assert_eq!(pl.count_tile(b2), 0);
    assert_eq!(pl.count_tile(dr3), 0);
    assert_eq!(pl.drawn, Some(Tile(Family::Bamboo, 9)));
    assert_eq!(pl.effective_len(), HAND + 1);
    assert!(game.wall().is_empty());
    assert_eq!(stg.count_table_tiles(), 13 * 4 + 6);
    let last = offered.lock().unwrap().last().cloned().unwrap();
    assert!(last.contains(&Action::Kong(Meld::Kong(b2, KongKind::ExposedFromExistingPong))));

    while game.step().unwrap() != Phase::RoundOver {}
    assert!(matches!(game.get_stage().result, Some(RoundResult::Exhausted)));
}
