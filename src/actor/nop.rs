use super::*;

pub struct NopBuilder;

impl ActorBuilder for NopBuilder {
    fn get_default_config(&self) -> Config {
        Config::new("Nop", vec![])
    }

    fn create(&self, config: Config) -> Box<dyn Actor> {
        Box::new(Nop::from_config(config))
    }
}

// 常にSkipし,ツモ切りする
#[derive(Clone)]
pub struct Nop {
    config: Config,
}

impl Nop {
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    pub fn new() -> Self {
        Self::from_config(NopBuilder {}.get_default_config())
    }
}

impl Default for Nop {
    fn default() -> Self {
        Self::new()
    }
}

impl Actor for Nop {
    fn select_action(&mut self, _stg: &Stage, _seat: Seat, _acts: &[Action]) -> Action {
        Action::Skip
    }

    fn select_discard(&mut self, stg: &Stage, seat: Seat) -> Tile {
        let pl = stg.player(seat);
        match pl.drawn {
            Some(t) => t,
            // 鳴いた直後はツモ牌がないため手牌の末尾
            None => last_tile(&pl.hand),
        }
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}

impl Listener for Nop {}

fn last_tile(hand: &TileTable) -> Tile {
    let mut last = Tile(Family::Bamboo, 1);
    for fam in Family::ALL {
        for r in 1..RANK {
            if hand[fam.index()][r] > 0 {
                last = Tile(fam, r);
            }
        }
    }
    last
}
