//! Reporting detail policy
//!
//! Resolves, per reporter name, the verbosity applied to its reports via an
//! ordered list of glob-pattern rules plus a global default level.

use std::fmt;

use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};
use tracing::debug;

#[cfg(test)]
mod tests;

/// Marker rewritten from `::` in configuration patterns
///
/// A rule whose pattern singles out a pad of an element uses the
/// `element-name__pad-name` syntax and takes priority over element-wide
/// rules.
const PAD_SEPARATOR: &str = "__";

/// Verbosity/retention policy axis, orthogonal to severity
///
/// Ordered from least to most detail. `Smart` is a derived policy value:
/// it resolves per report to either full storage or synthetic storage, but
/// it orders above `Monitor` so a smart-stored master no longer accepts
/// shadow attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DetailLevel {
    Unknown,
    None,
    Synthetic,
    Subchain,
    Monitor,
    All,
    Smart,
}

impl DetailLevel {
    /// Parse a lowercase level name from a configuration token
    pub fn from_name(name: &str) -> Option<DetailLevel> {
        match name.to_ascii_lowercase().as_str() {
            "none" => Some(DetailLevel::None),
            "synthetic" => Some(DetailLevel::Synthetic),
            "subchain" => Some(DetailLevel::Subchain),
            "monitor" => Some(DetailLevel::Monitor),
            "all" => Some(DetailLevel::All),
            "smart" => Some(DetailLevel::Smart),
            _ => None,
        }
    }

    /// Map a raw integer configuration token to a level
    pub fn from_ordinal(ordinal: u64) -> Option<DetailLevel> {
        match ordinal {
            0 => Some(DetailLevel::Unknown),
            1 => Some(DetailLevel::None),
            2 => Some(DetailLevel::Synthetic),
            3 => Some(DetailLevel::Subchain),
            4 => Some(DetailLevel::Monitor),
            5 => Some(DetailLevel::All),
            6 => Some(DetailLevel::Smart),
            _ => None,
        }
    }

    /// Parse a configuration token: a level name or a raw integer ordinal
    fn from_token(token: &str) -> Option<DetailLevel> {
        let token = token.trim();
        if token.starts_with(|c: char| c.is_ascii_digit()) {
            token.parse::<u64>().ok().and_then(DetailLevel::from_ordinal)
        } else {
            DetailLevel::from_name(token)
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailLevel::Unknown => write!(f, "unknown"),
            DetailLevel::None => write!(f, "none"),
            DetailLevel::Synthetic => write!(f, "synthetic"),
            DetailLevel::Subchain => write!(f, "subchain"),
            DetailLevel::Monitor => write!(f, "monitor"),
            DetailLevel::All => write!(f, "all"),
            DetailLevel::Smart => write!(f, "smart"),
        }
    }
}

/// A compiled name glob paired with the detail level it selects
#[derive(Debug, Clone)]
pub struct PatternRule {
    pattern: String,
    matcher: GlobMatcher,
    level: DetailLevel,
}

impl PatternRule {
    fn new(pattern: &str, level: DetailLevel) -> Result<PatternRule> {
        let matcher = Glob::new(pattern)
            .with_context(|| format!("Invalid reporting-level pattern: {}", pattern))?
            .compile_matcher();
        Ok(PatternRule {
            pattern: pattern.to_string(),
            matcher,
            level,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn level(&self) -> DetailLevel {
        self.level
    }
}

/// Ordered pattern rules plus the global default detail level
#[derive(Debug, Clone)]
pub struct ReportingPolicy {
    rules: Vec<PatternRule>,
    default_level: DetailLevel,
}

impl Default for ReportingPolicy {
    fn default() -> Self {
        ReportingPolicy {
            rules: Vec::new(),
            default_level: DetailLevel::Synthetic,
        }
    }
}

impl ReportingPolicy {
    pub fn new() -> ReportingPolicy {
        ReportingPolicy::default()
    }

    /// Compile a glob and insert the rule
    ///
    /// Rules singling out a pad (pattern contains `__`) are inserted at the
    /// front so they outrank element-wide rules regardless of registration
    /// order.
    pub fn add_rule(&mut self, pattern: &str, level: DetailLevel) -> Result<()> {
        let rule = PatternRule::new(pattern, level)?;
        if pattern.contains(PAD_SEPARATOR) {
            self.rules.insert(0, rule);
        } else {
            self.rules.push(rule);
        }
        Ok(())
    }

    /// Resolve the level applied to a reporter name
    ///
    /// Returns the level of the first rule, in list order, whose pattern
    /// matches. `Unknown` means no rule matched and the caller falls back
    /// to the global default.
    pub fn resolve(&self, name: &str) -> DetailLevel {
        for rule in &self.rules {
            if rule.matcher.is_match(name) {
                return rule.level;
            }
        }
        DetailLevel::Unknown
    }

    pub fn set_default(&mut self, level: DetailLevel) {
        self.default_level = level;
    }

    pub fn default_level(&self) -> DetailLevel {
        self.default_level
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Parse a reporting-detail configuration string
    ///
    /// Comma-separated tokens: a bare level token sets the default (last
    /// one wins), `pattern:level` adds a rule. `::` inside a token is
    /// rewritten to `__` before the pattern/level split so per-pad
    /// overrides take priority. Malformed tokens are silently dropped;
    /// this leniency is intentional and preserved for backward
    /// compatibility.
    pub fn parse_config(&mut self, text: &str) {
        debug!(config = text, "setting report levels from string");
        for token in text.split(',') {
            let token = token.replace("::", PAD_SEPARATOR);
            if let Some((pattern, level_token)) = token.split_once(':') {
                match DetailLevel::from_token(level_token) {
                    Some(level) => {
                        if self.add_rule(pattern, level).is_err() {
                            debug!(pattern, "dropping rule with invalid pattern");
                        }
                    }
                    None => debug!(token = %token, "dropping rule with unknown level"),
                }
            } else if let Some(level) = DetailLevel::from_token(&token) {
                self.default_level = level;
            } else if !token.trim().is_empty() {
                debug!(token = %token, "dropping unknown level token");
            }
        }
    }
}
