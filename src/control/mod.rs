// ゲーム進行の制御を行うモジュール
pub mod actor;
pub mod claim;
pub mod common;
pub mod engine;
pub mod possible_actions;
pub mod stage_controller;
pub mod wall;
