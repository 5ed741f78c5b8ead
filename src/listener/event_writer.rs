use serde_json::{json, Value};

use super::Listener;
use crate::model::*;
use crate::util::misc::*;

// [EventWriter]
// 局ごとのイベント列を data/<開始時刻>/<局数>.json に書き出す
#[derive(Debug)]
pub struct EventWriter {
    dir: String,
    round: usize,
    events: Vec<Value>,
}

impl EventWriter {
    pub fn new() -> Self {
        Self {
            dir: format!("data/{}", unixtime_now()),
            round: 0,
            events: vec![],
        }
    }

    fn flush_round(&mut self) {
        let path = format!("{}/{:02}.json", self.dir, self.round);
        let res = serde_json::to_string_pretty(&Value::Array(std::mem::take(&mut self.events)))
            .map_err(anyhow::Error::from)
            .and_then(|data| write_to_file(&path, &data));
        match res {
            Ok(()) => log::debug!("round {} written to {}", self.round, path),
            Err(e) => log::error!("failed to write {}: {}", path, e),
        }
    }
}

impl Default for EventWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Listener for EventWriter {
    fn notify_event(&mut self, _stg: &Stage, event: &Event) {
        match event {
            Event::Begin(_) => self.dir = format!("data/{}", unixtime_now()),
            Event::New(e) => {
                self.round = e.round;
                self.events.clear();
            }
            _ => {}
        }

        self.events.push(json!(event));
        if matches!(event, Event::Win(_) | Event::Draw(_)) {
            self.flush_round();
        }
    }
}
