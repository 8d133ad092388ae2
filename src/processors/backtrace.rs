//! Backtrace origin processor

use super::Processor;
use crate::core::{Event, Value};
use regex::Regex;
use std::backtrace::Backtrace;
use std::sync::OnceLock;

/// Module prefixes that are never reported as the logging call site
const BUILTIN_IGNORED: &[&str] = &[
    "log_pipeline",
    "std",
    "core",
    "alloc",
    "backtrace",
    "rust_begin_unwind",
    "__rust",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Frame {
    pub symbol: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

fn symbol_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*\d+:\s+(.+?)\s*$").expect("static pattern"))
}

fn location_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*at\s+(.+?):(\d+)(?::\d+)?\s*$").expect("static pattern"))
}

/// Parse the display form of a captured backtrace into frames
pub(crate) fn parse_frames(rendered: &str) -> Vec<Frame> {
    let mut frames: Vec<Frame> = Vec::new();
    for line in rendered.lines() {
        if let Some(caps) = symbol_re().captures(line) {
            frames.push(Frame {
                symbol: caps[1].to_string(),
                file: None,
                line: None,
            });
        } else if let Some(caps) = location_re().captures(line) {
            if let Some(frame) = frames.last_mut() {
                frame.file = Some(caps[1].to_string());
                frame.line = caps[2].parse().ok();
            }
        }
    }
    frames
}

/// Records where a log call originated by inspecting the call stack.
///
/// Frames belonging to ignored module prefixes (this crate's own modules
/// plus any caller-configured ones) are skipped; the file and line of the
/// last ignored frame and the module and function of the first non-ignored
/// frame are merged into `extra`. Caller-supplied keys win on conflict.
pub struct BacktraceProcessor {
    ignored_prefixes: Vec<String>,
}

impl BacktraceProcessor {
    pub fn new() -> Self {
        Self {
            ignored_prefixes: Vec::new(),
        }
    }

    /// Additionally skip frames whose symbol starts with `prefix`
    #[must_use]
    pub fn ignore_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.ignored_prefixes.push(prefix.into());
        self
    }

    fn is_ignored(&self, symbol: &str) -> bool {
        BUILTIN_IGNORED
            .iter()
            .any(|prefix| symbol.starts_with(prefix))
            || self
                .ignored_prefixes
                .iter()
                .any(|prefix| symbol.starts_with(prefix.as_str()))
    }

    /// Derive origin fields from parsed frames.
    ///
    /// Returns `(file, line, module, function)` where file/line come from
    /// the last ignored frame and module/function from the first frame
    /// outside the ignore set.
    pub(crate) fn origin(
        &self,
        frames: &[Frame],
    ) -> (Option<String>, Option<u32>, Option<String>, Option<String>) {
        let mut file = None;
        let mut line = None;

        for frame in frames {
            if self.is_ignored(&frame.symbol) {
                if frame.file.is_some() {
                    file = frame.file.clone();
                    line = frame.line;
                }
                continue;
            }

            let (module, function) = match frame.symbol.rfind("::") {
                Some(split) => (
                    Some(frame.symbol[..split].to_string()),
                    Some(frame.symbol[split + 2..].to_string()),
                ),
                None => (None, Some(frame.symbol.clone())),
            };
            return (file, line, module, function);
        }

        (file, line, None, None)
    }
}

impl Default for BacktraceProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for BacktraceProcessor {
    fn process(&self, mut event: Event) -> Event {
        let captured = Backtrace::force_capture();
        let frames = parse_frames(&captured.to_string());
        let (file, line, module, function) = self.origin(&frames);

        if let Some(file) = file {
            event.set_extra_if_absent("file", Value::from(file));
        }
        if let Some(line) = line {
            event.set_extra_if_absent("line", Value::from(line));
        }
        if let Some(module) = module {
            event.set_extra_if_absent("module", Value::from(module));
        }
        if let Some(function) = function {
            event.set_extra_if_absent("function", Value::from(function));
        }
        event
    }

    fn name(&self) -> &str {
        "backtrace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;

    const RENDERED: &str = "\
   0: log_pipeline::core::logger::Logger::log
             at /work/log_pipeline/src/core/logger.rs:120:9
   1: log_pipeline::core::logger::Logger::info
             at /work/log_pipeline/src/core/logger.rs:188:9
   2: app::handlers::login::authenticate
             at /work/app/src/handlers/login.rs:57:5
   3: app::main
             at /work/app/src/main.rs:12:5
";

    #[test]
    fn test_parse_frames() {
        let frames = parse_frames(RENDERED);
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0].symbol, "log_pipeline::core::logger::Logger::log");
        assert_eq!(frames[2].line, Some(57));
        assert_eq!(
            frames[3].file.as_deref(),
            Some("/work/app/src/main.rs")
        );
    }

    #[test]
    fn test_origin_skips_library_frames() {
        let processor = BacktraceProcessor::new();
        let frames = parse_frames(RENDERED);
        let (file, line, module, function) = processor.origin(&frames);

        // Location of the last library frame, identity of the caller.
        assert_eq!(file.as_deref(), Some("/work/log_pipeline/src/core/logger.rs"));
        assert_eq!(line, Some(188));
        assert_eq!(module.as_deref(), Some("app::handlers::login"));
        assert_eq!(function.as_deref(), Some("authenticate"));
    }

    #[test]
    fn test_configured_prefix_is_skipped() {
        let processor = BacktraceProcessor::new().ignore_prefix("app::handlers");
        let frames = parse_frames(RENDERED);
        let (_, _, module, function) = processor.origin(&frames);

        assert_eq!(module.as_deref(), Some("app"));
        assert_eq!(function.as_deref(), Some("main"));
    }

    #[test]
    fn test_caller_extras_take_precedence() {
        let event =
            Event::new(Severity::Info, "m").with_extra_field("file", "supplied-by-caller.rs");
        let processed = BacktraceProcessor::new().process(event);
        assert_eq!(
            processed.extra["file"],
            Value::from("supplied-by-caller.rs")
        );
    }
}
