//! 人間向けログ（LogRecord → stderr へ要点のみ出力）と複数出力先への分配

use crate::error::Error;
use crate::ports::outbound::{Log, LogRecord};
use std::sync::Arc;

const FIELDS_SUMMARY_MAX: usize = 400;

/// fields の要点だけを短い文字列にする（巨大化防止）
fn fields_summary(record: &LogRecord) -> String {
    let Some(fields) = record.fields.as_ref().filter(|f| !f.is_empty()) else {
        return String::new();
    };
    let s = serde_json::to_string(fields).unwrap_or_default();
    if s.chars().count() <= FIELDS_SUMMARY_MAX {
        return s;
    }
    let truncated = s.chars().take(FIELDS_SUMMARY_MAX).collect::<String>();
    format!("{}... (len={})", truncated, s.len())
}

/// 1 行に整形する（`[log] <level> <layer>/<kind>: <message> <fields>`）
pub fn format_human(record: &LogRecord) -> String {
    let mut line = format!("[log] {}", record.level.as_str());
    match (&record.layer, &record.kind) {
        (Some(l), Some(k)) => line.push_str(&format!(" {}/{}", l, k)),
        (Some(l), None) => line.push_str(&format!(" {}", l)),
        (None, Some(k)) => line.push_str(&format!(" {}", k)),
        (None, None) => {}
    }
    line.push_str(": ");
    line.push_str(&record.message);
    let summary = fields_summary(record);
    if !summary.is_empty() {
        line.push(' ');
        line.push_str(&summary);
    }
    line
}

/// --verbose 用: stderr に整形して出力する Log 実装
#[derive(Debug, Clone, Default)]
pub struct StderrLog;

impl StderrLog {
    pub fn new() -> Self {
        Self
    }
}

impl Log for StderrLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        eprintln!("{}", format_human(record));
        Ok(())
    }
}

/// 複数の Log に同じレコードを渡す。最初のエラーを返すが、残りへの出力は続ける。
pub struct FanoutLog {
    sinks: Vec<Arc<dyn Log>>,
}

impl FanoutLog {
    pub fn new(sinks: Vec<Arc<dyn Log>>) -> Self {
        Self { sinks }
    }
}

impl Log for FanoutLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let mut first_err = None;
        for sink in &self.sinks {
            if let Err(e) = sink.log(record) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingLog(Mutex<Vec<String>>);
    impl Log for RecordingLog {
        fn log(&self, record: &LogRecord) -> Result<(), Error> {
            self.0.lock().unwrap().push(record.message.clone());
            Ok(())
        }
    }

    struct FailingLog;
    impl Log for FailingLog {
        fn log(&self, _record: &LogRecord) -> Result<(), Error> {
            Err(Error::io_msg("disk full"))
        }
    }

    #[test]
    fn test_format_human() {
        let rec = LogRecord::info("turn stage finished")
            .layer("usecase")
            .kind("perf")
            .field("stage", "embed");
        assert_eq!(
            format_human(&rec),
            r#"[log] info usecase/perf: turn stage finished {"stage":"embed"}"#
        );
        assert_eq!(format_human(&LogRecord::error("boom")), "[log] error: boom");
    }

    #[test]
    fn test_format_human_truncates_large_fields() {
        let rec = LogRecord::info("big").field("text", "x".repeat(1000));
        assert!(format_human(&rec).contains("... (len="));
    }

    #[test]
    fn test_fanout_continues_after_error() {
        let rec = Arc::new(RecordingLog(Mutex::new(Vec::new())));
        let fanout = FanoutLog::new(vec![Arc::new(FailingLog), rec.clone()]);
        let result = fanout.log(&LogRecord::info("hello"));
        assert!(matches!(result, Err(Error::Io(_))));
        assert_eq!(rec.0.lock().unwrap().as_slice(), ["hello".to_string()]);
    }
}
