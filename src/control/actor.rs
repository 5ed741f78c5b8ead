use std::fmt;

use crate::listener::Listener;
use crate::model::*;
use crate::util::variant::*;

// Actorの名前と引数 "Random(seed=42)" のように表示
#[derive(Debug, Clone)]
pub struct Config {
    pub name: String,
    pub args: Vec<Arg>,
}

impl Config {
    pub fn new(name: &str, args: Vec<Arg>) -> Self {
        Self {
            name: name.to_string(),
            args,
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<String> = self
            .args
            .iter()
            .map(|a| format!("{}={}", a.name, a.value))
            .collect();
        write!(f, "{}({})", self.name, args.join(","))
    }
}

// 座席に着くプレイヤー
// Stageは読み取り専用で,状態の変更はすべてStageControllerが行う
pub trait Actor: Listener + ActorClone + Send {
    // 配牌直後に呼ばれる
    fn init(&mut self, _seat: Seat) {}

    // actsの先頭は常にSkip, acts以外のアクションを返却した場合はエラー
    fn select_action(&mut self, stg: &Stage, seat: Seat, acts: &[Action]) -> Action;

    // 手牌にない牌を返却した場合はエラー
    fn select_discard(&mut self, stg: &Stage, seat: Seat) -> Tile;

    fn get_config(&self) -> &Config;
}

impl fmt::Debug for dyn Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get_config())
    }
}

// Box<dyn Actor>の複製
pub trait ActorClone {
    fn clone_box(&self) -> Box<dyn Actor>;
}

impl<A: Actor + Clone + 'static> ActorClone for A {
    fn clone_box(&self) -> Box<dyn Actor> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Actor> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[test]
fn test_config_display() {
    let conf = Config::new("Random", vec![Arg::int("seed", 3)]);
    assert_eq!(conf.to_string(), "Random(seed=3)");
    assert_eq!(Config::new("Nop", vec![]).to_string(), "Nop()");
}
