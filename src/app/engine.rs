use anyhow::Context;

use crate::actor::create_actor;
use crate::control::{actor::Actor, engine::MahjongEngine};
use crate::listener::*;
use crate::model::*;
use crate::util::misc::*;

// [App]
#[derive(Debug)]
pub struct EngineApp {
    seed: u64,
    rule: Rule,
    n_round: usize,
    write: bool,
    debug: bool,
    quiet: bool,
    names: [String; SEAT], // actor names
}

impl EngineApp {
    pub fn new(args: Vec<String>) -> anyhow::Result<Self> {
        let mut app = Self {
            seed: 0,
            rule: Rule::default(),
            n_round: 1,
            write: false,
            debug: false,
            quiet: false,
            names: ["Nop".into(), "Nop".into(), "Nop".into(), "Nop".into()],
        };

        let mut it = args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-s" => app.seed = next_value(&mut it, s)?,
                "-g" => app.n_round = next_value(&mut it, s)?,
                "-c" => {
                    let path: String = next_value(&mut it, s)?;
                    app.rule = load_rule(&path)?;
                }
                "-r-suited" => app.rule.suited = next_value(&mut it, s)?,
                "-r-honors" => app.rule.honors = next_value(&mut it, s)?,
                "-r-bonus" => app.rule.bonus = next_value(&mut it, s)?,
                "-r-exhaust" => app.rule.exhaustion_dealer = next_value(&mut it, s)?,
                "-w" => app.write = true,
                "-d" => app.debug = true,
                "-q" => app.quiet = true,
                "-0" => app.names[0] = next_value(&mut it, s)?,
                "-1" => app.names[1] = next_value(&mut it, s)?,
                "-2" => app.names[2] = next_value(&mut it, s)?,
                "-3" => app.names[3] = next_value(&mut it, s)?,
                opt => anyhow::bail!("unknown option: {}", opt),
            }
        }

        if app.seed == 0 {
            app.seed = unixtime_now();
            log::info!(
                "Random seed is not specified. Unix timestamp '{}' is used as seed.",
                app.seed
            );
        }

        Ok(app)
    }

    pub fn run(self) -> anyhow::Result<()> {
        if self.debug {
            log::set_max_level(log::LevelFilter::Debug);
        }
        println!("seed: {}", self.seed);

        let mut actors: Vec<Box<dyn Actor>> = vec![];
        for name in &self.names {
            actors.push(create_actor(name)?);
        }
        for (s, a) in actors.iter().enumerate() {
            println!("actor{}: {:?}", s, a);
        }
        println!();
        let actors: [Box<dyn Actor>; SEAT] = actors
            .try_into()
            .map_err(|_| anyhow::anyhow!("{} actors are required", SEAT))?;

        let mut listeners: Vec<Box<dyn Listener>> = vec![];
        if !self.quiet {
            listeners.push(Box::new(EventPrinter::new()));
        }
        if self.write {
            listeners.push(Box::new(EventWriter::new()));
        }

        let start = std::time::Instant::now();
        let mut game = MahjongEngine::new(self.seed, self.rule.clone(), actors, listeners);
        let summaries = game.run(self.n_round).context("game aborted")?;
        for s in &summaries {
            let result = match &s.result {
                RoundResult::Win { winners, acting } => {
                    let seats: Vec<Seat> = winners.iter().map(|w| w.seat).collect();
                    format!("win {} (acting: {})", vec_to_string(&seats), acting)
                }
                RoundResult::Exhausted => "exhausted".to_string(),
            };
            println!(
                "round {:2}, dealer: {}, steps: {:3}, {}",
                s.round, s.dealer, s.steps, result
            );
        }
        println!(
            "total elapsed time: {:8.3}sec",
            start.elapsed().as_nanos() as f32 / 1000000000.0
        );
        Ok(())
    }
}

pub fn load_rule(path: &str) -> anyhow::Result<Rule> {
    let data =
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
    let rule = serde_json::from_str(&data).with_context(|| format!("invalid rule file {}", path))?;
    Ok(rule)
}

#[test]
fn test_engine_app_args() {
    let args: Vec<String> = ["-s", "5", "-g", "3", "-r-bonus", "true", "-r-exhaust", "rotate", "-1", "Random(2)", "-q"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let app = EngineApp::new(args).unwrap();
    assert_eq!(app.seed, 5);
    assert_eq!(app.n_round, 3);
    assert!(app.rule.bonus && app.quiet && !app.write);
    assert_eq!(app.rule.exhaustion_dealer, ExhaustionDealer::Rotate);
    assert_eq!(app.names[1], "Random(2)");

    assert!(EngineApp::new(vec!["-x".to_string()]).is_err());
    assert!(EngineApp::new(vec!["-g".to_string()]).is_err());
}
