use regex::Regex;

use crate::error::ExportError;

/// Pattern used when no filter is configured.
pub const MATCH_ALL: &str = ".*";

/// Decides which base tables are exported, by regex match on the bare table name.
///
/// The match is anchored at the start of the name (`user_.*` does not select
/// `old_user_log`) but not at the end.
#[derive(Debug, Clone)]
pub struct TableFilter {
    source: String,
    pattern: Regex,
}

impl TableFilter {
    /// Compile `pattern`. A pattern wrapped in `/.../` delimiters has them removed first.
    pub fn new(pattern: &str) -> Result<Self, ExportError> {
        let source = strip_delimiters(pattern);
        let invalid = |e| ExportError::InvalidFilter {
            pattern: pattern.to_string(),
            source: e,
        };
        // The bare pattern must compile on its own; `a)|(b` is only valid once wrapped.
        Regex::new(source).map_err(invalid)?;
        let anchored = Regex::new(&format!("^(?:{source})")).map_err(invalid)?;
        Ok(Self {
            source: source.to_string(),
            pattern: anchored,
        })
    }

    pub fn matches(&self, table_name: &str) -> bool {
        self.pattern.is_match(table_name)
    }

    /// The pattern as configured, without delimiters or the implicit anchor.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

fn strip_delimiters(pattern: &str) -> &str {
    pattern
        .strip_prefix('/')
        .and_then(|rest| rest.strip_suffix('/'))
        .unwrap_or(pattern)
}
