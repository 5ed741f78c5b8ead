use super::*;
use crate::util::misc::vec_to_string;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RoundResult {
    Win { winners: Vec<WinContext>, acting: Seat }, // ツモ | ロン (ダブロン, トリロンを含む)
    Exhausted,                                      // 荒牌 (牌山切れ)
}

impl RoundResult {
    pub fn acting_winner(&self) -> Option<Seat> {
        match self {
            RoundResult::Win { acting, .. } => Some(*acting),
            RoundResult::Exhausted => None,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct Stage {
    pub rule: Rule,
    pub round: usize,                     // 局数 (0~)
    pub dealer: Seat,                     // 親
    pub turn: Seat,                       // 手番のプレイヤー
    pub phase: Phase,                     // 進行状態
    pub step: usize,                      // イベント毎に+1する
    pub wall_count: usize,                // 牌山の残り枚数
    pub last_tile: Option<(Seat, Tile)>,  // 鳴き・ロンの対象となる直前の捨て牌
    pub players: [Player; SEAT],          // 各プレイヤー情報
    pub result: Option<RoundResult>,      // 局の結果
}

impl Stage {
    #[inline]
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    #[inline]
    pub fn player_mut(&mut self, seat: Seat) -> &mut Player {
        &mut self.players[seat.index()]
    }

    // 手牌, 捨て牌, 副露の総数 (牌山の残りと合わせて局中は不変)
    pub fn count_table_tiles(&self) -> usize {
        self.players
            .iter()
            .map(|pl| {
                pl.hand_len()
                    + pl.discards.len()
                    + pl.melds.iter().map(|m| m.tiles().len()).sum::<usize>()
            })
            .sum()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "round: {}, dealer: {}, turn: {}, phase: {:?}",
            self.round, self.dealer, self.turn, self.phase,
        )?;
        writeln!(
            f,
            "step: {}, wall_count: {}, last_tile: {:?}",
            self.step, self.wall_count, self.last_tile,
        )?;

        let border = "-".to_string().repeat(80);
        write!(f, "{}", border)?;
        for p in &self.players {
            writeln!(f)?;
            writeln!(f, "{}", p)?;
            write!(f, "{}", border)?;
        }
        if let Some(RoundResult::Win { winners, .. }) = &self.result {
            writeln!(f)?;
            let seats: Vec<Seat> = winners.iter().map(|w| w.seat).collect();
            write!(f, "winners: {}", vec_to_string(&seats))?;
        }
        writeln!(f)
    }
}
