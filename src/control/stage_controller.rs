use crate::control::actor::Actor;
use crate::control::common::*;
use crate::error::*;
use crate::listener::Listener;
use crate::model::*;

// Stageの唯一の所有者
// イベントは検証してから適用するため,エラーの場合Stageは変更されない
#[derive(Debug)]
pub struct StageController {
    stage: Stage,
    actors: [Box<dyn Actor>; SEAT],
    listeners: Vec<Box<dyn Listener>>,
}

impl StageController {
    pub fn new(actors: [Box<dyn Actor>; SEAT], listeners: Vec<Box<dyn Listener>>) -> Self {
        Self {
            stage: Stage::default(),
            actors,
            listeners,
        }
    }

    #[inline]
    pub fn get_stage(&self) -> &Stage {
        &self.stage
    }

    pub fn handle_event(&mut self, event: &Event) -> EngineResult<()> {
        let stg = &mut self.stage;
        match event {
            Event::Begin(e) => event_begin(stg, e),
            Event::New(e) => event_new(stg, e),
            Event::Deal(e) => event_deal(stg, e)?,
            Event::Discard(e) => event_discard(stg, e)?,
            Event::Meld(e) => event_meld(stg, e)?,
            Event::Win(e) => event_win(stg, e)?,
            Event::Draw(e) => event_draw(stg, e)?,
            Event::End(_) => {}
        }
        stg.step += 1;

        if let Event::New(_) = event {
            for s in Seat::ALL {
                self.actors[s.index()].init(s);
            }
        }

        // Actorより先にListenerに通知
        let stg = &self.stage;
        for l in &mut self.listeners {
            l.notify_event(stg, event);
        }
        for a in &mut self.actors {
            a.notify_event(stg, event);
        }
        Ok(())
    }

    // イベントを伴わない進行状態の遷移 (ツモ後のスキップ)
    pub fn set_phase(&mut self, phase: Phase) {
        log::debug!("phase {:?} -> {:?}", self.stage.phase, phase);
        self.stage.phase = phase;
    }

    // 捨て牌に対して誰も鳴かなかった場合は下家のツモ
    pub fn pass_claims(&mut self) -> EngineResult<()> {
        let stg = &mut self.stage;
        expect_phase(stg, Phase::AwaitingClaims)?;
        stg.turn = next_seat(stg.turn, 1);
        stg.last_tile = None;
        stg.phase = Phase::AwaitingDraw;
        log::debug!("claims passed, next turn: {}", stg.turn);
        Ok(())
    }

    // 候補外のアクションはエラー
    pub fn query_action(&mut self, seat: Seat, acts: &[Action]) -> EngineResult<Action> {
        let act = self.actors[seat.index()].select_action(&self.stage, seat, acts);
        if !acts.contains(&act) {
            return Err(EngineError::IllegalAction { seat, action: act });
        }
        Ok(act)
    }

    pub fn query_discard(&mut self, seat: Seat) -> Tile {
        self.actors[seat.index()].select_discard(&self.stage, seat)
    }

    // 候補がないプレイヤーには問い合わせずSkip
    // すべてのプレイヤーの選択が揃うまでStageは変更しない
    pub fn query_claims(
        &mut self,
        cands: &[(Seat, Candidates)],
    ) -> EngineResult<Vec<(Seat, Action)>> {
        let mut claims = vec![];
        for (s, c) in cands {
            let act = if c.is_empty() {
                Action::Skip
            } else {
                self.query_action(*s, &c.actions())?
            };
            claims.push((*s, act));
        }
        Ok(claims)
    }
}

fn expect_phase(stg: &Stage, expected: Phase) -> EngineResult<()> {
    if stg.phase != expected {
        return Err(EngineError::PhaseMismatch {
            expected,
            actual: stg.phase,
        });
    }
    Ok(())
}

fn expect_turn(stg: &Stage, seat: Seat, action: Action) -> EngineResult<()> {
    if stg.turn != seat {
        return Err(EngineError::IllegalAction { seat, action });
    }
    Ok(())
}

fn meld_action(meld: Meld) -> Action {
    match meld {
        Meld::Pong(_) => Action::Pong(meld),
        Meld::Chow(..) => Action::Chow(meld),
        Meld::Kong(..) => Action::Kong(meld),
    }
}

// 手牌からtilesをすべて取り除けるか
fn check_consumed(stg: &Stage, seat: Seat, meld: &Meld, tiles: &[Tile]) -> EngineResult<()> {
    let pl = stg.player(seat);
    let need = tiles_to_tile_table(tiles);
    for &t in tiles {
        if !is_valid_tile(t) {
            return Err(EngineError::InvalidTile { tile: t });
        }
        let count = pl.count_tile(t);
        if count < count_tile(&need, t) {
            if meld.is_kong() {
                return Err(EngineError::KongCount { seat, tile: t, count });
            }
            return Err(EngineError::TileNotHeld { seat, tile: t });
        }
    }
    Ok(())
}

// [Event]
fn event_begin(stg: &mut Stage, event: &EventBegin) {
    *stg = Stage::default();
    stg.rule = event.rule.clone();
}

fn event_new(stg: &mut Stage, event: &EventNew) {
    let rule = std::mem::take(&mut stg.rule);
    let step = stg.step;
    *stg = Stage::default();
    stg.rule = rule;
    stg.step = step;
    stg.round = event.round;
    stg.dealer = event.dealer;
    stg.turn = event.dealer; // 親の14枚目はAwaitingDrawでツモ
    stg.phase = Phase::AwaitingDraw;
    stg.wall_count = event.wall_count;

    for s in Seat::ALL {
        let pl = stg.player_mut(s);
        pl.seat = s;
        pl.hand = tiles_to_tile_table(&event.hands[s.index()]);
    }
}

fn event_deal(stg: &mut Stage, event: &EventDeal) -> EngineResult<()> {
    expect_phase(stg, Phase::AwaitingDraw)?;
    if stg.wall_count == 0 {
        return Err(EngineError::WallEmpty);
    }
    if !is_valid_tile(event.tile) {
        return Err(EngineError::InvalidTile { tile: event.tile });
    }

    let s = event.seat;
    stg.turn = s;
    stg.wall_count -= 1;
    stg.last_tile = None;
    stg.phase = Phase::AwaitingSelfAction;

    let pl = stg.player_mut(s);
    pl.drawn = Some(event.tile);
    inc_tile(&mut pl.hand, event.tile);
    Ok(())
}

fn event_discard(stg: &mut Stage, event: &EventDiscard) -> EngineResult<()> {
    let (s, t) = (event.seat, event.tile);
    expect_phase(stg, Phase::AwaitingDiscard)?;
    if !is_valid_tile(t) {
        return Err(EngineError::InvalidTile { tile: t });
    }
    if stg.turn != s || stg.player(s).count_tile(t) == 0 {
        return Err(EngineError::TileNotHeld { seat: s, tile: t });
    }

    let step = stg.step;
    let pl = stg.player_mut(s);
    dec_tile(&mut pl.hand, t);
    pl.drawn = None;
    pl.discards.push(Discard { step, tile: t });
    stg.last_tile = Some((s, t));
    stg.phase = Phase::AwaitingClaims;
    Ok(())
}

fn event_meld(stg: &mut Stage, event: &EventMeld) -> EngineResult<()> {
    match event.from {
        Some(from) => meld_from_discard(stg, event.seat, event.meld, from),
        None => meld_from_hand(stg, event.seat, event.meld),
    }
}

// 明槓, ポン, チー
fn meld_from_discard(stg: &mut Stage, s: Seat, meld: Meld, from: Seat) -> EngineResult<()> {
    expect_phase(stg, Phase::AwaitingClaims)?;
    let illegal = || EngineError::IllegalAction {
        seat: s,
        action: meld_action(meld),
    };
    let t = match stg.last_tile {
        Some((d, t)) if d == from && d != s && meld.contains(t) => t,
        _ => return Err(illegal()),
    };
    match meld {
        Meld::Kong(_, kind) if kind != KongKind::ExposedFromDiscard => return Err(illegal()),
        // チーは上家の捨て牌で連続した数牌のみ
        Meld::Chow(low, ..) if s != next_seat(from, 1) || Meld::chow(low) != Some(meld) => {
            return Err(illegal())
        }
        _ => {}
    }
    let consumed = meld.consumed(Some(t));
    check_consumed(stg, s, &meld, &consumed)?;

    let pl = stg.player_mut(s);
    for &c in &consumed {
        dec_tile(&mut pl.hand, c);
    }
    pl.melds.push(meld);
    stg.player_mut(from).discards.pop();

    stg.turn = s;
    stg.last_tile = None;
    stg.phase = if meld.is_kong() {
        Phase::AwaitingDraw // 嶺上ツモ
    } else {
        Phase::AwaitingDiscard
    };
    Ok(())
}

// 暗槓, 加槓
fn meld_from_hand(stg: &mut Stage, s: Seat, meld: Meld) -> EngineResult<()> {
    expect_phase(stg, Phase::AwaitingSelfAction)?;
    expect_turn(stg, s, Action::Kong(meld))?;
    let (t, kind) = match meld {
        Meld::Kong(t, kind) if kind != KongKind::ExposedFromDiscard => (t, kind),
        _ => {
            return Err(EngineError::IllegalAction {
                seat: s,
                action: Action::Kong(meld),
            })
        }
    };

    let pong_idx = stg
        .player(s)
        .melds
        .iter()
        .position(|m| *m == Meld::Pong(t));
    if kind == KongKind::ExposedFromExistingPong && pong_idx.is_none() {
        return Err(EngineError::KongCount {
            seat: s,
            tile: t,
            count: stg.player(s).count_tile(t),
        });
    }
    let consumed = meld.consumed(None);
    check_consumed(stg, s, &meld, &consumed)?;

    let pl = stg.player_mut(s);
    for &c in &consumed {
        dec_tile(&mut pl.hand, c);
    }
    pl.drawn = None;
    match (kind, pong_idx) {
        (KongKind::ExposedFromExistingPong, Some(i)) => pl.melds[i] = meld,
        _ => pl.melds.push(meld),
    }
    stg.phase = Phase::AwaitingDraw; // 嶺上ツモ
    Ok(())
}

fn event_win(stg: &mut Stage, event: &EventWin) -> EngineResult<()> {
    // actingは和了者に含まれ,ツモ和了は手番のプレイヤー1人のみ
    let mismatch = EngineError::WinnerMismatch { seat: event.acting };
    if !event.contexts.iter().any(|c| c.seat == event.acting) {
        return Err(mismatch);
    }

    let self_draw = event.contexts.iter().any(|c| c.is_self_draw);
    let expected = if self_draw {
        Phase::AwaitingSelfAction
    } else {
        Phase::AwaitingClaims
    };
    expect_phase(stg, expected)?;
    if self_draw && (event.contexts.len() != 1 || event.acting != stg.turn) {
        return Err(mismatch);
    }

    stg.turn = event.acting;
    stg.phase = Phase::RoundOver;
    stg.result = Some(RoundResult::Win {
        winners: event.contexts.clone(),
        acting: event.acting,
    });
    Ok(())
}

fn event_draw(stg: &mut Stage, _event: &EventDraw) -> EngineResult<()> {
    expect_phase(stg, Phase::AwaitingDraw)?;
    if stg.wall_count != 0 {
        return Err(EngineError::PhaseMismatch {
            expected: Phase::AwaitingDraw,
            actual: stg.phase,
        });
    }
    stg.phase = Phase::RoundOver;
    stg.result = Some(RoundResult::Exhausted);
    Ok(())
}

#[cfg(test)]
mod tests_support {
    use super::*;
    use crate::control::actor::Config;

    #[derive(Clone)]
    pub struct Idle {
        config: Config,
    }

    impl Idle {
        pub fn boxed() -> Box<dyn Actor> {
            Box::new(Self {
                config: Config::new("Idle", vec![]),
            })
        }
    }

    impl Actor for Idle {
        fn select_action(&mut self, _stg: &Stage, _seat: Seat, _acts: &[Action]) -> Action {
            Action::Skip
        }

        fn select_discard(&mut self, stg: &Stage, seat: Seat) -> Tile {
            tiles_from_tile_table(&stg.player(seat).hand)[0]
        }

        fn get_config(&self) -> &Config {
            &self.config
        }
    }

    impl Listener for Idle {}

    pub fn controller(hands: [&str; SEAT], wall_count: usize) -> StageController {
        let actors = [Idle::boxed(), Idle::boxed(), Idle::boxed(), Idle::boxed()];
        let mut ctrl = StageController::new(actors, vec![]);
        let hands = hands.map(|h| {
            h.split_whitespace()
                .map(|s| Tile::from_symbol(s).unwrap())
                .collect::<Vec<Tile>>()
        });
        ctrl.handle_event(&Event::begin(Rule::default())).unwrap();
        ctrl.handle_event(&Event::new(0, Seat::East, hands, wall_count))
            .unwrap();
        ctrl
    }
}

#[test]
fn test_discard_not_held() {
    let hand = "bamboo1 bamboo2 bamboo3 dots4 dots5 dots6 characters7 characters8 characters9 winds1 winds1 winds1 dragons2";
    let mut ctrl = tests_support::controller([hand; SEAT], 10);
    let d1 = Tile(Family::Dots, 1);
    ctrl.handle_event(&Event::deal(Seat::East, d1, false)).unwrap();
    ctrl.set_phase(Phase::AwaitingDiscard);

    let step = ctrl.get_stage().step;
    let bad = Tile(Family::Dots, 9);
    assert_eq!(
        ctrl.handle_event(&Event::discard(Seat::East, bad)),
        Err(EngineError::TileNotHeld {
            seat: Seat::East,
            tile: bad
        })
    );
    // 変更なし
    let stg = ctrl.get_stage();
    assert_eq!(stg.step, step);
    assert_eq!(stg.phase, Phase::AwaitingDiscard);
    assert_eq!(stg.player(Seat::East).hand_len(), 14);
    assert!(stg.player(Seat::East).discards.is_empty());

    ctrl.handle_event(&Event::discard(Seat::East, d1)).unwrap();
    let stg = ctrl.get_stage();
    assert_eq!(stg.phase, Phase::AwaitingClaims);
    assert_eq!(stg.last_tile, Some((Seat::East, d1)));
    assert_eq!(stg.player(Seat::East).hand_len(), 13);
}

#[test]
fn test_claim_pong_and_kong() {
    let east = "bamboo2 dots1 dots2 dots3 dots4 dots5 dots6 dots7 dots8 dots9 winds1 winds2 winds3";
    let three = "bamboo2 bamboo2 bamboo2 characters1 characters2 characters3 characters4 characters5 characters6 characters7 characters8 characters9 winds4";
    let other = "characters1 characters1 characters5 characters5 characters9 characters9 winds2 winds2 winds3 winds3 winds4 winds4 dragons1";
    let b2 = Tile(Family::Bamboo, 2);

    for meld in [Meld::Pong(b2), Meld::Kong(b2, KongKind::ExposedFromDiscard)] {
        let mut ctrl = tests_support::controller([east, other, three, other], 10);
        ctrl.handle_event(&Event::deal(Seat::East, Tile(Family::Dragon, 3), false))
            .unwrap();
        ctrl.set_phase(Phase::AwaitingDiscard);
        ctrl.handle_event(&Event::discard(Seat::East, b2)).unwrap();
        ctrl.handle_event(&Event::meld(Seat::West, meld, Some(Seat::East)))
            .unwrap();

        let stg = ctrl.get_stage();
        let west = stg.player(Seat::West);
        assert_eq!(stg.turn, Seat::West);
        assert_eq!(west.melds, vec![meld]);
        assert!(stg.player(Seat::East).discards.is_empty());
        assert_eq!(stg.last_tile, None);
        if meld.is_kong() {
            assert_eq!(west.count_tile(b2), 0);
            assert_eq!(stg.phase, Phase::AwaitingDraw);
        } else {
            assert_eq!(west.count_tile(b2), 1);
            assert_eq!(stg.phase, Phase::AwaitingDiscard);
        }
        assert_eq!(stg.count_table_tiles(), 13 * 4 + 1);
    }
}

#[test]
fn test_kong_count() {
    let hand = "bamboo2 bamboo2 dots1 dots2 dots3 dots4 dots5 dots6 dots7 dots8 dots9 winds1 winds2";
    let mut ctrl = tests_support::controller([hand; SEAT], 10);
    let b2 = Tile(Family::Bamboo, 2);
    ctrl.handle_event(&Event::deal(Seat::East, b2, false)).unwrap();
    let kong = Meld::Kong(b2, KongKind::Concealed);
    assert_eq!(
        ctrl.handle_event(&Event::meld(Seat::East, kong, None)),
        Err(EngineError::KongCount {
            seat: Seat::East,
            tile: b2,
            count: 3
        })
    );
    assert_eq!(ctrl.get_stage().phase, Phase::AwaitingSelfAction);
    assert!(ctrl.get_stage().player(Seat::East).melds.is_empty());
}

#[test]
fn test_chow_from_discard() {
    let east = "bamboo3 dots1 dots2 dots3 dots4 dots5 dots6 dots7 dots8 dots9 winds1 winds2 winds3";
    let other = "bamboo2 bamboo4 bamboo5 characters1 characters2 characters3 characters4 characters5 characters6 characters7 characters8 characters9 winds4";
    let mut ctrl = tests_support::controller([east, other, other, other], 10);
    let b = |r| Tile(Family::Bamboo, r);
    ctrl.handle_event(&Event::deal(Seat::East, Tile(Family::Dragon, 3), false))
        .unwrap();
    ctrl.set_phase(Phase::AwaitingDiscard);
    ctrl.handle_event(&Event::discard(Seat::East, b(3))).unwrap();

    // 上家以外からのチー
    let chow = Meld::Chow(b(2), b(3), b(4));
    assert_eq!(
        ctrl.handle_event(&Event::meld(Seat::West, chow, Some(Seat::East))),
        Err(EngineError::IllegalAction {
            seat: Seat::West,
            action: Action::Chow(chow)
        })
    );
    // 連続していない順子
    let broken = Meld::Chow(b(3), b(4), b(6));
    assert!(ctrl
        .handle_event(&Event::meld(Seat::South, broken, Some(Seat::East)))
        .is_err());
    let broken = Meld::Chow(b(2), b(3), b(5));
    assert!(ctrl
        .handle_event(&Event::meld(Seat::South, broken, Some(Seat::East)))
        .is_err());
    let stg = ctrl.get_stage();
    assert_eq!(stg.phase, Phase::AwaitingClaims);
    assert_eq!(stg.player(Seat::East).discards.len(), 1);
    assert!(stg.player(Seat::South).melds.is_empty());

    ctrl.handle_event(&Event::meld(Seat::South, chow, Some(Seat::East)))
        .unwrap();
    let stg = ctrl.get_stage();
    let south = stg.player(Seat::South);
    assert_eq!(south.melds, vec![chow]);
    assert_eq!((south.count_tile(b(2)), south.count_tile(b(4))), (0, 0));
    assert_eq!(south.count_tile(b(5)), 1);
    assert!(stg.player(Seat::East).discards.is_empty());
    assert_eq!((stg.turn, stg.phase), (Seat::South, Phase::AwaitingDiscard));
}

#[test]
fn test_win_requires_acting_winner() {
    let hand = "bamboo2 bamboo2 dots1 dots2 dots3 dots4 dots5 dots6 dots7 dots8 dots9 winds1 winds2";
    let mut ctrl = tests_support::controller([hand; SEAT], 10);
    let b2 = Tile(Family::Bamboo, 2);
    ctrl.handle_event(&Event::deal(Seat::East, b2, false)).unwrap();
    let ctx = |seat| WinContext {
        seat,
        winning_tile: b2,
        is_self_draw: true,
        from: None,
        decomposition: crate::hand::decompose_tiles(&[b2; 5]).unwrap(),
        melds: vec![],
    };

    let mismatch = |seat| -> EngineResult<()> { Err(EngineError::WinnerMismatch { seat }) };
    assert_eq!(ctrl.handle_event(&Event::win(vec![], Seat::East)), mismatch(Seat::East));
    assert_eq!(
        ctrl.handle_event(&Event::win(vec![ctx(Seat::East)], Seat::South)),
        mismatch(Seat::South)
    );
    // 手番以外のツモ和了
    assert_eq!(
        ctrl.handle_event(&Event::win(vec![ctx(Seat::South)], Seat::South)),
        mismatch(Seat::South)
    );
    assert_eq!(
        ctrl.handle_event(&Event::win(vec![ctx(Seat::East), ctx(Seat::West)], Seat::East)),
        mismatch(Seat::East)
    );
    let stg = ctrl.get_stage();
    assert_eq!(stg.phase, Phase::AwaitingSelfAction);
    assert!(stg.result.is_none());

    ctrl.handle_event(&Event::win(vec![ctx(Seat::East)], Seat::East))
        .unwrap();
    assert_eq!(ctrl.get_stage().phase, Phase::RoundOver);
}
