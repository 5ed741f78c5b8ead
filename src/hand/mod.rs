// 和了形の判定と鳴き候補の検出を行うモジュール
mod decompose;
mod detect;

pub use self::{
    decompose::{decompose, decompose_hand, decompose_tiles},
    detect::{
        detect_chow, detect_concealed_kong, detect_exposed_kong_from_discard,
        detect_kong_from_existing_pong, detect_pong,
    },
};
