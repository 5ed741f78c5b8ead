#![warn(rust_2018_idioms)]
// 構造的な意味合いや一貫性を保つために以下の警告は無効化
#![allow(clippy::needless_range_loop)]
#![allow(clippy::single_match)]
#![allow(clippy::new_without_default)]

pub mod actor;
pub mod app;
pub mod control;
pub mod error;
pub mod hand;
pub mod listener;
pub mod model;
pub mod util;
