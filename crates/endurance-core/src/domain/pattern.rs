//! Text patterns extracted by the usage scanner.
//!
//! Extraction is purely textual. A pattern is a compiled regex plus the
//! capture group whose text becomes the finding's symbol.

use std::{fmt, sync::OnceLock};

use regex::Regex;

/// Builtin extraction rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPattern {
    /// `emitter.emit(eventTypes.USER_CREATED, ...)` yields `eventTypes.USER_CREATED`.
    Events,
    /// `process.env.API_KEY` yields `process.env.API_KEY`.
    EnvVars,
}

impl ScanPattern {
    /// Every non-overlapping match in `text`, left to right.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let group = self.group();
        self.regex()
            .captures_iter(text)
            .filter_map(|caps| caps.get(group))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Short name used in logs and output headers.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Events => "events",
            Self::EnvVars => "env-vars",
        }
    }

    fn group(&self) -> usize {
        match self {
            Self::Events => 1,
            Self::EnvVars => 0,
        }
    }

    fn regex(&self) -> &'static Regex {
        match self {
            Self::Events => events_regex(),
            Self::EnvVars => env_vars_regex(),
        }
    }
}

impl fmt::Display for ScanPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Matches `emit(<ident>.<ident>[.<ident>...]` with optional whitespace.
fn events_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"\bemit\s*\(\s*([A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)+)")
            .expect("Invalid regex")
    })
}

fn env_vars_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\bprocess\.env\.[A-Za-z_$][\w$]*").expect("Invalid regex"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_from_emitter_call() {
        let found =
            ScanPattern::Events.extract("emitter.emit(eventTypes.USER_CREATED, payload);");
        assert_eq!(found, vec!["eventTypes.USER_CREATED"]);
    }

    #[test]
    fn events_in_textual_order() {
        let text = "\
            this.emit(eventTypes.A);\n\
            emitter.emit( eventTypes.B , x);\n\
            emit(events.nested.C)\n";
        assert_eq!(
            ScanPattern::Events.extract(text),
            vec!["eventTypes.A", "eventTypes.B", "events.nested.C"]
        );
    }

    #[test]
    fn undotted_or_string_events_ignored() {
        let text = "emitter.emit('user.created'); emitter.emit(EVENT); emitter.on(eventTypes.X)";
        assert!(ScanPattern::Events.extract(text).is_empty());
    }

    #[test]
    fn emitter_word_is_not_an_invocation() {
        assert!(ScanPattern::Events.extract("const emitter(x.y)").is_empty());
    }

    #[test]
    fn env_var_repeated() {
        let text = "const a = process.env.API_KEY;\nif (!process.env.API_KEY) throw e;";
        assert_eq!(
            ScanPattern::EnvVars.extract(text),
            vec!["process.env.API_KEY", "process.env.API_KEY"]
        );
    }

    #[test]
    fn env_var_stops_at_identifier_end() {
        assert_eq!(
            ScanPattern::EnvVars.extract("process.env.PORT||3000"),
            vec!["process.env.PORT"]
        );
    }

    #[test]
    fn no_matches_is_empty() {
        assert!(ScanPattern::EnvVars.extract("module.exports = {};").is_empty());
        assert!(ScanPattern::Events.extract("").is_empty());
    }
}
