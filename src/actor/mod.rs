mod manual;
mod nop;
mod random;

use crate::control::actor::{Actor, Config};
use crate::listener::Listener;
use crate::model::*;
use crate::util::variant::*;

pub use manual::Manual;
pub use nop::Nop;
pub use random::RandomActor;

trait ActorBuilder {
    fn get_default_config(&self) -> Config;
    fn create(&self, config: Config) -> Box<dyn Actor>;
}

fn builders() -> Vec<Box<dyn ActorBuilder>> {
    vec![
        Box::new(nop::NopBuilder {}),
        Box::new(random::RandomActorBuilder {}),
        Box::new(manual::ManualBuilder {}),
    ]
}

// "Name(arg0,arg1,...)" の形式からActorを生成 空の引数はデフォルト値
pub fn create_actor(exp: &str) -> anyhow::Result<Box<dyn Actor>> {
    let exp = exp.trim();
    let (name, args): (&str, Vec<&str>) = match (exp.find('('), exp.rfind(')')) {
        (Some(l), Some(r)) => {
            if r < l {
                anyhow::bail!("invalid paren: {}", exp);
            }
            (&exp[..l], exp[l + 1..r].split(',').map(|a| a.trim()).collect())
        }
        (None, None) => (exp, vec![]),
        _ => anyhow::bail!("invalid paren: {}", exp),
    };

    for b in builders() {
        let mut conf = b.get_default_config();
        if name != conf.name {
            continue;
        }
        // "Nop()" は引数なし
        let args: Vec<&str> = args.into_iter().filter(|a| !a.is_empty()).collect();
        if conf.args.len() < args.len() {
            anyhow::bail!(
                "expected {} arguments for {}. but {} arguments are provided.",
                conf.args.len(),
                name,
                args.len(),
            );
        }
        for (i, a) in args.iter().enumerate() {
            conf.args[i].value = conf.args[i]
                .value
                .parse_as(a)
                .map_err(|e| anyhow::anyhow!("{}: {}", e, a))?;
        }
        return Ok(b.create(conf));
    }

    anyhow::bail!("unknown actor name: {}", name)
}

#[test]
fn test_create_actor() {
    let a = create_actor("Random(42)").unwrap();
    assert_eq!(format!("{:?}", a), "Random(seed=42)");
    let a = create_actor("Random").unwrap();
    assert_eq!(format!("{:?}", a), "Random(seed=0)");
    assert!(create_actor("Nop()").is_ok());
    assert!(create_actor("Nop(1)").is_err());
    assert!(create_actor("Random(x)").is_err());
    assert!(create_actor("Unknown").is_err());
    assert!(create_actor("Random)1(").is_err());
}
