use super::Listener;
use crate::model::*;
use crate::util::misc::vec_to_string;

// [EventPrinter]
#[derive(Debug, Default)]
pub struct EventPrinter {}

impl EventPrinter {
    pub fn new() -> Self {
        Self {}
    }
}

impl Listener for EventPrinter {
    fn notify_event(&mut self, stg: &Stage, event: &Event) {
        use Event::*;
        print!("(step:{}) ", stg.step);
        match event {
            Begin(e) => {
                println!("Begin {:?}", e.rule);
            }
            New(e) => {
                println!("New round: {}, dealer: {}", e.round, e.dealer);
                println!("{}", stg);
            }
            Deal(e) => {
                let kind = if e.is_replacement { "(replacement)" } else { "" };
                println!("Deal {} {} {}", e.seat, e.tile, kind);
                println!("{}", stg.player(e.seat));
            }
            Discard(e) => {
                println!("Discard {} {}", e.seat, e.tile);
                println!("{}", stg.player(e.seat));
            }
            Meld(e) => {
                match e.from {
                    Some(f) => println!("Meld {} {} from {}", e.seat, e.meld, f),
                    None => println!("Meld {} {}", e.seat, e.meld),
                }
                println!("{}", stg.player(e.seat));
            }
            Win(e) => {
                println!("Win acting: {}", e.acting);
                for ctx in &e.contexts {
                    let how = match ctx.from {
                        Some(f) => format!("ron from {}", f),
                        None => "self draw".to_string(),
                    };
                    println!(
                        "{} {} {}: {} melds: {}",
                        ctx.seat,
                        how,
                        ctx.winning_tile,
                        ctx.decomposition,
                        vec_to_string(&ctx.melds)
                    );
                }
                println!("{}", stg);
            }
            Draw(_) => {
                println!("Draw (wall exhausted)");
                println!("{}", stg);
            }
            End(_) => {
                println!("End");
            }
        }
        println!();
    }
}
