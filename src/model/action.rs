use super::*;

// Actorが選択するアクション
// Controller側から提供されたActionの配列から厳密に同じものを返却すること
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Action {
    Skip, // 和了, 槓, 鳴きのスキップ

    Win(Decomposition), // ツモ和了 | ロン
    Kong(Meld),         // 暗槓 | 加槓 | 明槓
    Pong(Meld),         // ポン
    Chow(Meld),         // チー
}

impl Action {
    #[inline]
    pub fn is_skip(&self) -> bool {
        *self == Action::Skip
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Skip => write!(f, "Skip"),
            Action::Win(d) => write!(f, "Win({})", d),
            Action::Kong(m) | Action::Pong(m) | Action::Chow(m) => write!(f, "{}", m),
        }
    }
}

// 1人のプレイヤーがある時点で選択可能なアクションの候補
// 打牌やツモの度に新しく計算し,解決後は破棄する
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    pub win: Option<Decomposition>,
    pub kongs: Vec<Meld>,
    pub pong: Option<Meld>,
    pub chows: Vec<Meld>,
}

impl Candidates {
    pub fn is_empty(&self) -> bool {
        self.win.is_none() && self.kongs.is_empty() && self.pong.is_none() && self.chows.is_empty()
    }

    // 先頭は常にSkip
    pub fn actions(&self) -> Vec<Action> {
        let mut acts = vec![Action::Skip];
        if let Some(d) = &self.win {
            acts.push(Action::Win(d.clone()));
        }
        for &m in &self.kongs {
            acts.push(Action::Kong(m));
        }
        if let Some(m) = self.pong {
            acts.push(Action::Pong(m));
        }
        for &m in &self.chows {
            acts.push(Action::Chow(m));
        }
        acts
    }
}

#[test]
fn test_candidates_actions() {
    let b2 = Tile(Family::Bamboo, 2);
    let cands = Candidates {
        win: None,
        kongs: vec![Meld::Kong(b2, KongKind::ExposedFromDiscard)],
        pong: Some(Meld::Pong(b2)),
        chows: vec![],
    };
    let acts = cands.actions();
    assert_eq!(acts.len(), 3);
    assert!(acts[0].is_skip());
    assert_eq!(acts[1], Action::Kong(Meld::Kong(b2, KongKind::ExposedFromDiscard)));
    assert_eq!(acts[2], Action::Pong(Meld::Pong(b2)));
    assert!(!cands.is_empty());
    assert!(Candidates::default().is_empty());
    assert_eq!(Candidates::default().actions(), vec![Action::Skip]);
}
