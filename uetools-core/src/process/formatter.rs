// ============================================================================
// uetools-core/src/process/formatter.rs
// ============================================================================
//
// LINE FORMATTERS: Per-Line Output Policies for External Processes
//
// The process runner passes every output line through a `LineFormatter`
// before echoing it. A formatter may restyle, prefix or drop a line; it
// never sees lines out of order.
//
// KEY COMPONENTS:
// - LineFormatter: The formatting policy trait
// - PassthroughFormatter: Echo lines unchanged
// - UnrealLogFormatter: Colour Unreal Engine log lines by verbosity
// - TimestampFormatter: Prefix another formatter's output with local time
// - parse_log_line: Splits `[timestamp][frame]Category: Verbosity: message`
//
// AI-ASSISTANT-INFO: Formatting policies for streamed process output

use console::style;
use std::fmt;

/// Maps one raw output line to the text to emit.
pub trait LineFormatter {
    /// Returns the formatted line, or `None` to drop it deliberately.
    fn format_line(&mut self, line: &str) -> Option<String>;
}

impl<F> LineFormatter for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn format_line(&mut self, line: &str) -> Option<String> {
        self(line)
    }
}

/// Emits every line unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughFormatter;

impl LineFormatter for PassthroughFormatter {
    fn format_line(&mut self, line: &str) -> Option<String> {
        Some(line.to_string())
    }
}

// ============================================================================
// UNREAL LOG PARSING
// ============================================================================

/// Verbosity of an Unreal Engine log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Fatal,
    Error,
    Warning,
    Display,
    Log,
    Verbose,
    VeryVerbose,
}

impl Verbosity {
    fn parse(word: &str) -> Option<Self> {
        match word {
            "Fatal" => Some(Verbosity::Fatal),
            "Error" => Some(Verbosity::Error),
            "Warning" => Some(Verbosity::Warning),
            "Display" => Some(Verbosity::Display),
            "Log" => Some(Verbosity::Log),
            "Verbose" => Some(Verbosity::Verbose),
            "VeryVerbose" => Some(Verbosity::VeryVerbose),
            _ => None,
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Components of one Unreal Engine log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine<'a> {
    pub timestamp: Option<&'a str>,
    pub frame: Option<&'a str>,
    pub category: Option<&'a str>,
    pub verbosity: Verbosity,
    pub message: &'a str,
}

fn take_bracketed(text: &str) -> Option<(&str, &str)> {
    let inner = text.strip_prefix('[')?;
    let end = inner.find(']')?;
    Some((&inner[..end], &inner[end + 1..]))
}

fn is_category(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Splits an Unreal log line. Lines without a category parse as plain
/// `Log` messages.
pub fn parse_log_line(line: &str) -> LogLine<'_> {
    let mut rest = line;
    let mut timestamp = None;
    let mut frame = None;

    if let Some((inside, after)) = take_bracketed(rest) {
        timestamp = Some(inside);
        rest = after;
        if let Some((inside, after)) = take_bracketed(rest) {
            frame = Some(inside.trim());
            rest = after;
        }
    }

    let mut parsed = LogLine {
        timestamp,
        frame,
        category: None,
        verbosity: Verbosity::Log,
        message: rest,
    };

    if let Some((category, after)) = rest.split_once(": ") {
        if is_category(category) {
            parsed.category = Some(category);
            parsed.message = after;
            if let Some((word, message)) = after.split_once(": ") {
                if let Some(verbosity) = Verbosity::parse(word) {
                    parsed.verbosity = verbosity;
                    parsed.message = message;
                }
            }
        }
    }
    parsed
}

// ============================================================================
// UNREAL LOG FORMATTER
// ============================================================================

/// Colours Unreal Engine output by verbosity.
///
/// With colour disabled, ANSI sequences produced by the child are stripped
/// so the echoed text is plain.
#[derive(Debug, Clone, Copy)]
pub struct UnrealLogFormatter {
    colored: bool,
    hide_verbose: bool,
}

impl UnrealLogFormatter {
    pub fn new(colored: bool) -> Self {
        Self {
            colored,
            hide_verbose: false,
        }
    }

    /// Drops `Verbose` and `VeryVerbose` lines.
    pub fn hide_verbose(mut self, hide: bool) -> Self {
        self.hide_verbose = hide;
        self
    }
}

impl Default for UnrealLogFormatter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl LineFormatter for UnrealLogFormatter {
    fn format_line(&mut self, line: &str) -> Option<String> {
        let parsed = parse_log_line(line);
        if self.hide_verbose && parsed.verbosity >= Verbosity::Verbose {
            return None;
        }
        if !self.colored {
            return Some(strip_ansi_escapes::strip_str(line));
        }

        let styled = match parsed.verbosity {
            Verbosity::Fatal => style(line).red().bold(),
            Verbosity::Error => style(line).red(),
            Verbosity::Warning => style(line).yellow(),
            Verbosity::Verbose | Verbosity::VeryVerbose => style(line).dim(),
            Verbosity::Display | Verbosity::Log => return Some(line.to_string()),
        };
        Some(styled.force_styling(true).to_string())
    }
}

// ============================================================================
// TIMESTAMP FORMATTER
// ============================================================================

/// Prefixes the output of another formatter with the local wall-clock time.
#[derive(Debug, Clone)]
pub struct TimestampFormatter<F> {
    inner: F,
}

impl<F: LineFormatter> TimestampFormatter<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }
}

impl<F: LineFormatter> LineFormatter for TimestampFormatter<F> {
    fn format_line(&mut self, line: &str) -> Option<String> {
        let formatted = self.inner.format_line(line)?;
        Some(format!(
            "[{}] {}",
            chrono::Local::now().format("%H:%M:%S"),
            formatted
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_unreal_line() {
        let parsed = parse_log_line(
            "[2024.03.01-10.15.22:123][  0]LogInit: Warning: Running engine for game: RTSGame",
        );
        assert_eq!(parsed.timestamp, Some("2024.03.01-10.15.22:123"));
        assert_eq!(parsed.frame, Some("0"));
        assert_eq!(parsed.category, Some("LogInit"));
        assert_eq!(parsed.verbosity, Verbosity::Warning);
        assert_eq!(parsed.message, "Running engine for game: RTSGame");
    }

    #[test]
    fn category_without_verbosity_is_log() {
        let parsed = parse_log_line("LogTemp: Display is not a verbosity here");
        assert_eq!(parsed.category, Some("LogTemp"));
        assert_eq!(parsed.verbosity, Verbosity::Log);
        assert_eq!(parsed.message, "Display is not a verbosity here");
    }

    #[test]
    fn free_text_is_plain_log() {
        let parsed = parse_log_line("Compiling shaders (42 remaining)");
        assert_eq!(parsed.category, None);
        assert_eq!(parsed.verbosity, Verbosity::Log);
        assert_eq!(parsed.message, "Compiling shaders (42 remaining)");
    }

    #[test]
    fn hide_verbose_drops_only_verbose_lines() {
        let mut formatter = UnrealLogFormatter::new(false).hide_verbose(true);
        assert_eq!(formatter.format_line("LogNet: Verbose: packet"), None);
        assert_eq!(formatter.format_line("LogNet: VeryVerbose: bits"), None);
        assert_eq!(
            formatter.format_line("LogNet: Error: lost connection").as_deref(),
            Some("LogNet: Error: lost connection")
        );
    }

    #[test]
    fn colored_errors_carry_ansi_codes() {
        let mut formatter = UnrealLogFormatter::new(true);
        let line = formatter.format_line("LogD3D12RHI: Error: device removed").unwrap();
        assert!(line.contains('\u{1b}'));
        assert!(line.contains("device removed"));
        let plain = formatter.format_line("LogInit: Display: ready").unwrap();
        assert_eq!(plain, "LogInit: Display: ready");
    }

    #[test]
    fn uncolored_output_strips_child_ansi() {
        let mut formatter = UnrealLogFormatter::new(false);
        let line = formatter.format_line("\u{1b}[31mred text\u{1b}[0m").unwrap();
        assert_eq!(line, "red text");
    }

    #[test]
    fn timestamp_prefix_wraps_inner_decision() {
        let mut formatter = TimestampFormatter::new(|line: &str| {
            (!line.is_empty()).then(|| line.to_uppercase())
        });
        let line = formatter.format_line("cook started").unwrap();
        assert!(line.ends_with("] COOK STARTED"));
        assert_eq!(line.as_bytes()[0], b'[');
        assert_eq!(line.find(']'), Some(9));
        assert_eq!(formatter.format_line(""), None);
    }
}
