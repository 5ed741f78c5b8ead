use log::{Level, LevelFilter, Log, Metadata, Record};

// [LEVEL](file:line) message の形式で標準エラー出力に書き出すロガー
// 出力レベルはlog::set_max_levelで変更可能
pub struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };
        eprintln!(
            "[{}]({}:{}) {}",
            level,
            record.file().unwrap_or("?"),
            record.line().unwrap_or(0),
            record.args()
        );
    }

    fn flush(&self) {}
}

// 二回目以降の呼び出しは無視される
pub fn init(level: LevelFilter) {
    if log::set_boxed_logger(Box::new(ConsoleLogger)).is_ok() {
        log::set_max_level(level);
    }
}
