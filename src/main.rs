#![warn(rust_2018_idioms)]

use mahjong_table::{app, util};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    util::log::init(log::LevelFilter::Info);

    if args.len() < 2 {
        log::error!("mode not specified");
        return;
    }

    let args2 = args[2..].to_vec();
    let res = match args[1].as_str() {
        "C" => {
            // Calculator (和了形判定モード)
            app::CalculatorApp::new(args2).run()
        }
        "E" => {
            // Engine (bot対戦シミュレーションモード)
            app::EngineApp::new(args2).and_then(|a| a.run())
        }
        m => {
            log::error!("unknown mode: {}", m);
            return;
        }
    };

    if let Err(e) = res {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}
