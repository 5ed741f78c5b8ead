use rand::prelude::*;
use rand::rngs::StdRng;

use super::{
    actor::Actor,
    claim::{resolve, Outcome},
    common::*,
    possible_actions::*,
    stage_controller::StageController,
    wall::*,
};
use crate::error::*;
use crate::listener::Listener;
use crate::model::*;

// 1局の結果
#[derive(Debug, Clone)]
pub struct RoundSummary {
    pub round: usize,
    pub dealer: Seat,
    pub result: RoundResult,
    pub steps: usize, // 局中のイベント数
}

#[derive(Debug)]
struct NextRoundInfo {
    round: usize,
    dealer: Seat,
}

impl NextRoundInfo {
    fn update(&mut self, rule: &Rule, result: &RoundResult) {
        let rotate = match result.acting_winner() {
            Some(s) => s != self.dealer,
            None => rule.exhaustion_dealer == ExhaustionDealer::Rotate,
        };
        if rotate {
            self.dealer = next_seat(self.dealer, 1);
        }
        self.round += 1;
    }
}

// [Engine]
pub struct MahjongEngine {
    rule: Rule,
    ctrl: StageController,
    builder: Box<dyn WallBuilder>, // 局ごとの牌山生成
    wall: Wall,
    is_begun: bool,
    next_round_info: NextRoundInfo,
}

impl MahjongEngine {
    // seedから牌山と最初の親を決める
    pub fn new(
        seed: u64,
        rule: Rule,
        actors: [Box<dyn Actor>; SEAT],
        listeners: Vec<Box<dyn Listener>>,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let dealer = roll_first_dealer(&mut rng);
        let builder = Box::new(ShuffledWall::new(rng.gen()));
        Self::with_wall_builder(rule, dealer, actors, listeners, builder)
    }

    pub fn with_wall_builder(
        rule: Rule,
        dealer: Seat,
        actors: [Box<dyn Actor>; SEAT],
        listeners: Vec<Box<dyn Listener>>,
        builder: Box<dyn WallBuilder>,
    ) -> Self {
        if rule.joker != JokerRule::None {
            log::warn!("joker rule {:?} is accepted but has no effect", rule.joker);
        }
        Self {
            rule,
            ctrl: StageController::new(actors, listeners),
            builder,
            wall: Wall::default(),
            is_begun: false,
            next_round_info: NextRoundInfo { round: 0, dealer },
        }
    }

    #[inline]
    pub fn get_stage(&self) -> &Stage {
        self.ctrl.get_stage()
    }

    #[inline]
    pub fn wall(&self) -> &Wall {
        &self.wall
    }

    pub fn run(&mut self, n_round: usize) -> EngineResult<Vec<RoundSummary>> {
        let mut summaries = vec![];
        for _ in 0..n_round {
            summaries.push(self.run_round()?);
        }
        self.ctrl.handle_event(&Event::end())?;
        Ok(summaries)
    }

    pub fn run_round(&mut self) -> EngineResult<RoundSummary> {
        self.start_round()?;
        let step0 = self.get_stage().step;
        while self.step()? != Phase::RoundOver {}

        let stg = self.ctrl.get_stage();
        let result = stg.result.clone().unwrap_or(RoundResult::Exhausted);
        let summary = RoundSummary {
            round: stg.round,
            dealer: stg.dealer,
            result,
            steps: stg.step - step0,
        };
        match &summary.result {
            RoundResult::Win { winners, acting } => {
                let seats: Vec<String> = winners.iter().map(|w| w.seat.to_string()).collect();
                log::info!(
                    "round {}: win by [{}] (acting: {})",
                    summary.round,
                    seats.join(","),
                    acting
                );
            }
            RoundResult::Exhausted => log::info!("round {}: exhausted", summary.round),
        }
        self.next_round_info.update(&self.rule, &summary.result);
        Ok(summary)
    }

    // 牌山の生成と配牌
    pub fn start_round(&mut self) -> EngineResult<()> {
        if !self.is_begun {
            self.ctrl.handle_event(&Event::begin(self.rule.clone()))?;
            self.is_begun = true;
        }

        let info = &self.next_round_info;
        let (round, dealer) = (info.round, info.dealer);
        let mut wall = Wall::new(self.builder.build(&self.rule, dealer));
        let hands = deal(&mut wall, dealer)?;
        self.wall = wall;
        log::debug!("round {} start, dealer: {}, wall: {}", round, dealer, self.wall.len());
        self.ctrl
            .handle_event(&Event::new(round, dealer, hands, self.wall.len()))
    }

    // 進行状態を1つ進めて遷移後の状態を返却
    pub fn step(&mut self) -> EngineResult<Phase> {
        match self.get_stage().phase {
            Phase::AwaitingDraw => self.do_draw()?,
            Phase::AwaitingSelfAction => self.do_self_action()?,
            Phase::AwaitingDiscard => self.do_discard()?,
            Phase::AwaitingClaims => self.do_claims()?,
            Phase::RoundOver => {}
        }
        let phase = self.get_stage().phase;
        log::debug!("step {} -> {:?}", self.get_stage().step, phase);
        Ok(phase)
    }

    fn do_draw(&mut self) -> EngineResult<()> {
        let seat = self.get_stage().turn;
        if self.wall.is_empty() {
            let stg = self.get_stage();
            let hands = Seat::ALL.map(|s| tiles_from_tile_table(&stg.player(s).hand));
            return self.ctrl.handle_event(&Event::draw(hands));
        }

        // 嶺上ツモは槓の直後にまとめて行う
        let t = self.wall.draw()?;
        self.ctrl.handle_event(&Event::deal(seat, t, false))
    }

    fn do_replacement_draw(&mut self, seat: Seat) -> EngineResult<()> {
        let t = self.wall.draw_replacement()?;
        self.ctrl.handle_event(&Event::deal(seat, t, true))
    }

    fn do_self_action(&mut self) -> EngineResult<()> {
        let stg = self.get_stage();
        let seat = stg.turn;
        let cands = calc_self_candidates(stg, seat)?;
        let act = if cands.is_empty() {
            Action::Skip
        } else {
            self.ctrl.query_action(seat, &cands.actions())?
        };

        match act {
            Action::Skip => {
                self.ctrl.set_phase(Phase::AwaitingDiscard);
                Ok(())
            }
            Action::Win(decomposition) => {
                let stg = self.get_stage();
                let pl = stg.player(seat);
                let winning_tile = pl.drawn.ok_or(EngineError::PhaseMismatch {
                    expected: Phase::AwaitingDraw,
                    actual: stg.phase,
                })?;
                let ctx = WinContext {
                    seat,
                    winning_tile,
                    is_self_draw: true,
                    from: None,
                    decomposition,
                    melds: pl.melds.clone(),
                };
                self.ctrl.handle_event(&Event::win(vec![ctx], seat))
            }
            Action::Kong(meld) => {
                self.ctrl.handle_event(&Event::meld(seat, meld, None))?;
                self.do_replacement_draw(seat)
            }
            action => Err(EngineError::IllegalAction { seat, action }),
        }
    }

    fn do_discard(&mut self) -> EngineResult<()> {
        let seat = self.get_stage().turn;
        let t = self.ctrl.query_discard(seat);
        self.ctrl.handle_event(&Event::discard(seat, t))
    }

    fn do_claims(&mut self) -> EngineResult<()> {
        let stg = self.get_stage();
        let (discarder, tile) = stg.last_tile.ok_or(EngineError::PhaseMismatch {
            expected: Phase::AwaitingDiscard,
            actual: stg.phase,
        })?;

        // 3人分の候補を同じStageから計算してから問い合わせ
        let cands = calc_claim_candidates(stg, discarder, tile)?;
        let claims = self.ctrl.query_claims(&cands)?;

        match resolve(discarder, tile, &claims) {
            Outcome::Win { winners, acting } => {
                let stg = self.get_stage();
                let contexts = winners
                    .into_iter()
                    .map(|(seat, decomposition)| WinContext {
                        seat,
                        winning_tile: tile,
                        is_self_draw: false,
                        from: Some(discarder),
                        decomposition,
                        melds: stg.player(seat).melds.clone(),
                    })
                    .collect();
                self.ctrl.handle_event(&Event::win(contexts, acting))
            }
            Outcome::Meld { seat, meld } => {
                self.ctrl
                    .handle_event(&Event::meld(seat, meld, Some(discarder)))?;
                if meld.is_kong() {
                    self.do_replacement_draw(seat)?;
                }
                Ok(())
            }
            Outcome::Pass => self.ctrl.pass_claims(),
        }
    }
}

#[test]
fn test_next_round_info() {
    let mut rule = Rule::default();
    let mut info = NextRoundInfo {
        round: 0,
        dealer: Seat::East,
    };
    info.update(&rule, &RoundResult::Exhausted);
    assert_eq!(info.dealer, Seat::East);
    rule.exhaustion_dealer = ExhaustionDealer::Rotate;
    info.update(&rule, &RoundResult::Exhausted);
    assert_eq!(info.dealer, Seat::South);

    let win = |acting| RoundResult::Win {
        winners: vec![],
        acting,
    };
    info.update(&rule, &win(Seat::South));
    assert_eq!(info.dealer, Seat::South);
    info.update(&rule, &win(Seat::North));
    assert_eq!(info.dealer, Seat::West);
    assert_eq!(info.round, 4);
}
