use super::*;
use crate::control::common::*;
use crate::util::misc::{prompt, vec_to_string};

pub struct ManualBuilder;

impl ActorBuilder for ManualBuilder {
    fn get_default_config(&self) -> Config {
        Config::new("Manual", vec![])
    }

    fn create(&self, config: Config) -> Box<dyn Actor> {
        Box::new(Manual::from_config(config))
    }
}

// 端末からの入力でアクションと打牌を選択
#[derive(Clone)]
pub struct Manual {
    config: Config,
}

impl Manual {
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    fn print_hand(&self, stg: &Stage, seat: Seat) {
        let pl = stg.player(seat);
        let mut hand = pl.hand;
        if let Some(t) = pl.drawn {
            dec_tile(&mut hand, t);
        }
        let mut hand_str = vec_to_string(&tiles_from_tile_table(&hand));
        if let Some(t) = pl.drawn {
            hand_str.push_str(&format!(" {}", t));
        }
        if let Some((s, t)) = stg.last_tile {
            hand_str.push_str(&format!(" ({} from {})", t, s));
        }
        println!("[{}] {} melds: {}", seat, hand_str, vec_to_string(&pl.melds));
    }
}

impl Actor for Manual {
    fn select_action(&mut self, stg: &Stage, seat: Seat, acts: &[Action]) -> Action {
        println!("[Action] select action (empty for Skip)");
        self.print_hand(stg, seat);
        for (i, act) in acts.iter().enumerate() {
            println!("{} => {}", i, act);
        }

        loop {
            let buf = prompt();
            let buf = buf.trim();
            if buf.is_empty() {
                println!();
                return Action::Skip;
            }
            if buf == "!print" {
                println!("{}", stg);
                continue;
            }
            match buf.parse::<usize>() {
                Ok(n) if n < acts.len() => {
                    println!();
                    return acts[n].clone();
                }
                Ok(_) => log::error!("invalid action index"),
                Err(_) => log::error!("input must be a number"),
            }
        }
    }

    fn select_discard(&mut self, stg: &Stage, seat: Seat) -> Tile {
        println!("[Discard] select tile (e.g. bamboo1, empty for drawn tile)");
        self.print_hand(stg, seat);

        let pl = stg.player(seat);
        loop {
            let buf = prompt();
            let buf = buf.trim();
            if buf.is_empty() {
                // ツモ切り
                if let Some(t) = pl.drawn {
                    println!();
                    return t;
                }
                if let Some(&t) = tiles_from_tile_table(&pl.hand).last() {
                    println!();
                    return t;
                }
                continue;
            }
            if buf == "!print" {
                println!("{}", stg);
                continue;
            }
            let t = match Tile::from_symbol(buf) {
                Ok(t) => t,
                Err(e) => {
                    log::error!("{}", e);
                    continue;
                }
            };
            if stg.player(seat).count_tile(t) == 0 {
                log::error!("tile not found: {}", t);
                continue;
            }
            println!();
            return t;
        }
    }

    fn get_config(&self) -> &Config {
        &self.config
    }
}

impl Listener for Manual {}
