use std::fs::File;
use std::io::{self, BufRead};

use anyhow::Context;

use crate::hand::decompose_tiles;
use crate::model::*;
use crate::util::misc::*;

#[derive(Debug)]
pub struct CalculatorApp {
    args: Vec<String>,
    detail: bool,
}

impl CalculatorApp {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args,
            detail: false,
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut file_path = "".to_string();
        let mut exps: Vec<String> = vec![];
        let mut it = self.args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-d" => self.detail = true,
                "-f" => file_path = next_value(&mut it, s)?,
                opt if opt.starts_with('-') => anyhow::bail!("unknown option: {}", opt),
                _ => exps.push(s.clone()),
            }
        }

        if file_path.is_empty() == exps.is_empty() {
            print_usage();
            return Ok(());
        }

        if !exps.is_empty() {
            self.process_expression(&exps.join(" "))?;
        } else {
            self.run_from_file(&file_path)?;
        }
        Ok(())
    }

    fn run_from_file(&self, file_path: &str) -> anyhow::Result<()> {
        let file = File::open(file_path).with_context(|| format!("failed to open {}", file_path))?;
        let lines = io::BufReader::new(file).lines();
        for exp in lines.map_while(Result::ok) {
            let e = exp.trim();
            if e.is_empty() || e.starts_with('#') {
                // 空行とコメント行はスキップ
                println!("> {}", exp);
            } else if let Err(e) = self.process_expression(e) {
                log::error!("{}", e);
            }
            println!();
        }
        Ok(())
    }

    fn process_expression(&self, exp: &str) -> anyhow::Result<Verify> {
        let calculator = Calculator::parse(exp)?;
        if self.detail {
            println!("{:?}", calculator);
        }
        Ok(calculator.run())
    }
}

#[derive(Debug, PartialEq)]
enum Verify {
    Ok,
    Error,
    Skip,
}

// "bamboo1 bamboo2 ... [= win|none]"
#[derive(Debug)]
struct Calculator {
    tiles: Vec<Tile>,
    expected: Option<bool>,
}

impl Calculator {
    fn parse(input: &str) -> anyhow::Result<Self> {
        println!("> {}", input);

        let input = input.split('#').next().unwrap_or(""); // コメント削除
        let (exp_tiles, exp_verify) = match input.split_once('=') {
            Some((t, v)) => (t, Some(v.trim())),
            None => (input, None),
        };

        let mut tiles = vec![];
        for sym in exp_tiles.split(|c: char| c == ',' || c.is_whitespace()) {
            if sym.is_empty() {
                continue;
            }
            tiles.push(Tile::from_symbol(sym).map_err(|e| anyhow::anyhow!(e))?);
        }

        let expected = match exp_verify {
            Some("win") => Some(true),
            Some("none") => Some(false),
            Some(v) => anyhow::bail!("invalid verify info: {}", v),
            None => None,
        };

        Ok(Self { tiles, expected })
    }

    fn run(&self) -> Verify {
        let res = decompose_tiles(&self.tiles);
        match &res {
            Some(d) => println!("win: {}", d),
            None => println!("not win hand"),
        }

        let verify = match self.expected {
            Some(e) if e == res.is_some() => Verify::Ok,
            Some(_) => Verify::Error,
            None => Verify::Skip,
        };
        println!("verify: {:?}", verify);
        verify
    }
}

fn print_usage() {
    log::error!(
        r"invalid input
Usage
    $ cargo run C TILES... [-d]
    $ cargo run C -f FILE [-d]
Options
    -d: print debug info
    -f: read expresisons from file instead of commandline tiles
"
    );
}

#[test]
fn test_calculator() {
    let file = File::open("tests/win_hands.txt").unwrap();
    let lines = io::BufReader::new(file).lines();
    for exp in lines.map_while(Result::ok) {
        let e = exp.trim();
        if e.is_empty() || e.starts_with('#') {
            // 空行とコメント行はスキップ
            println!("> {}", exp);
        } else {
            let calculator = Calculator::parse(e).unwrap();
            assert_eq!(Verify::Ok, calculator.run(), "{}", e);
        }
    }
}

#[test]
fn test_calculator_parse() {
    let c = Calculator::parse("bamboo2, bamboo2 = none # pair only").unwrap();
    assert_eq!(c.tiles.len(), 2);
    assert_eq!(c.expected, Some(false));
    assert!(Calculator::parse("bamboo0").is_err());
    assert!(Calculator::parse("bamboo1 = maybe").is_err());
}
