use super::*;

// 牌山から山を一枚引いて決めるジョーカー
// 設定としては受け付けるが和了判定・鳴き判定には影響しない
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JokerRule {
    #[default]
    None,
    DrawnTile, // 引いた牌と同じ牌(残り3枚)
    NextTile,  // 引いた牌の次の牌(4枚)
}

// 荒牌(和了者なし)の場合の親の扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionDealer {
    #[default]
    Keep, // 親続行
    Rotate, // 親流れ
}

impl std::str::FromStr for ExhaustionDealer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keep" => Ok(Self::Keep),
            "rotate" => Ok(Self::Rotate),
            _ => Err(format!("expected 'keep' or 'rotate': '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    pub suited: bool, // 数牌 (bamboo, characters, dots)
    pub honors: bool, // 字牌 (dragons, winds)
    pub bonus: bool,  // 花牌 (flowers, seasons)
    pub joker: JokerRule,
    pub exhaustion_dealer: ExhaustionDealer,
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            suited: true,
            honors: true,
            bonus: false,
            joker: JokerRule::None,
            exhaustion_dealer: ExhaustionDealer::Keep,
        }
    }
}

impl Rule {
    pub fn includes(&self, family: Family) -> bool {
        if family.is_suited() {
            self.suited
        } else if family.is_honor() {
            self.honors
        } else {
            self.bonus
        }
    }

    // 牌山の総数
    pub fn wall_size(&self) -> usize {
        Family::ALL
            .iter()
            .filter(|&&f| self.includes(f))
            .map(|&f| f.max_rank() * if f.is_bonus() { 1 } else { TILE })
            .sum()
    }
}

#[test]
fn test_rule_wall_size() {
    let mut rule = Rule::default();
    assert_eq!(rule.wall_size(), 136);
    rule.bonus = true;
    assert_eq!(rule.wall_size(), 144);
    rule.honors = false;
    assert_eq!(rule.wall_size(), 116);
}

#[test]
fn test_rule_from_json() {
    let rule: Rule = serde_json::from_str(r#"{"bonus": true, "exhaustion_dealer": "rotate"}"#).unwrap();
    assert!(rule.suited && rule.honors && rule.bonus);
    assert_eq!(rule.joker, JokerRule::None);
    assert_eq!(rule.exhaustion_dealer, ExhaustionDealer::Rotate);
}
