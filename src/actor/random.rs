use rand::prelude::*;
use rand::rngs::StdRng;

use super::*;
use crate::control::common::*;

pub struct RandomActorBuilder;

impl ActorBuilder for RandomActorBuilder {
    fn get_default_config(&self) -> Config {
        Config::new("Random", vec![Arg::int("seed", 0)])
    }

    fn create(&self, config: Config) -> Box<dyn Actor> {
        Box::new(RandomActor::from_config(config))
    }
}

// 和了可能な場合は和了し,それ以外は候補と打牌をランダムに選択
#[derive(Clone)]
pub struct RandomActor {
    config: Config,
    rng: StdRng,
}

impl RandomActor {
    pub fn from_config(config: Config) -> Self {
        let seed = config.args[0].value.as_int().unwrap_or(0) as u64;
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn new(seed: u64) -> Self {
        let mut config = RandomActorBuilder {}.get_default_config();
        config.args[0].value = Variant::Int(seed as i64);
        Self::from_config(config)
    }
}

impl Actor for RandomActor {
    fn select_action(&mut self, _stg: &Stage, _seat: Seat, acts: &[Action]) -> Action {
        if let Some(win) = acts.iter().find(|a| matches!(a, Action::Win(_))) {
            return win.clone();
        }
        acts.choose(&mut self.rng).cloned().unwrap_or(Action::Skip)
    }

    fn select_discard(&mut self, stg: &Stage, seat: Seat) -> Tile {
        let tiles = tiles_from_tile_table(&stg.player(seat).hand);
        match tiles.choose(&mut self.rng) {
            Some(&t) => t,
            None => Tile(Family::Bamboo, 1),
        }
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}

impl Listener for RandomActor {}

#[test]
fn test_random_actor() {
    let b2 = Tile(Family::Bamboo, 2);
    let decomposition = crate::hand::decompose_tiles(&[b2; 5]).unwrap();
    let acts = vec![
        Action::Skip,
        Action::Pong(Meld::Pong(b2)),
        Action::Win(decomposition.clone()),
    ];
    let stg = Stage::default();
    let mut a = RandomActor::new(3);
    for _ in 0..10 {
        assert_eq!(a.select_action(&stg, Seat::East, &acts), Action::Win(decomposition.clone()));
    }
    let acts = &acts[..2];
    for _ in 0..10 {
        assert!(acts.contains(&a.select_action(&stg, Seat::East, acts)));
    }
}
