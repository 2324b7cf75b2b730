use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Serialize, Serializer};

/// The exported document: one database, every table that survived the filter.
///
/// Field order is the JSON key order consumers rely on.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaDocument {
    pub database: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub generated_at: DateTime<FixedOffset>,
    pub schema_version: String,
    pub tables: Vec<TableDescriptor>,
}

/// Metadata for a single base table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableDescriptor {
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
    /// Empty when the table has no primary key.
    pub primary_key: Vec<String>,
    pub unique: Vec<UniqueConstraint>,
    pub indexes: Vec<IndexDescriptor>,
    pub foreign_keys: Vec<ForeignKeyDescriptor>,
    pub table_info: TableStats,
    pub ddl: String,
}

/// Metadata for a single column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Dialect-native declared type, e.g. `int(11)` or `varchar(255)`.
    #[serde(rename = "type")]
    pub column_type: String,
    pub nullable: bool,
    pub default: Option<String>,
    pub extra: String,
    pub comment: String,
    /// 1-based.
    pub position: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniqueConstraint {
    pub name: String,
    pub columns: Vec<String>,
}

/// A secondary index. The primary key's own index is never listed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexDescriptor {
    pub name: String,
    pub unique: bool,
    pub columns: Vec<String>,
}

/// `columns[i]` references `ref_columns[i]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForeignKeyDescriptor {
    pub name: String,
    pub columns: Vec<String>,
    pub ref_table: String,
    pub ref_columns: Vec<String>,
    pub on_update: ReferentialAction,
    pub on_delete: ReferentialAction,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableStats {
    pub row_count_est: Option<i64>,
    pub engine: Option<String>,
    pub collation: Option<String>,
}

/// What happens to referencing rows when the referenced row changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferentialAction {
    Cascade,
    Restrict,
    SetNull,
    NoAction,
    SetDefault,
    /// A rule this tool does not know about, reported verbatim.
    Other(String),
}

impl ReferentialAction {
    pub fn parse(rule: &str) -> Self {
        match rule.trim().to_uppercase().as_str() {
            "CASCADE" => ReferentialAction::Cascade,
            "RESTRICT" => ReferentialAction::Restrict,
            "SET NULL" => ReferentialAction::SetNull,
            "NO ACTION" => ReferentialAction::NoAction,
            "SET DEFAULT" => ReferentialAction::SetDefault,
            _ => ReferentialAction::Other(rule.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::Restrict => "RESTRICT",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::NoAction => "NO ACTION",
            ReferentialAction::SetDefault => "SET DEFAULT",
            ReferentialAction::Other(rule) => rule,
        }
    }
}

impl Serialize for ReferentialAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

fn serialize_timestamp<S: Serializer>(
    ts: &DateTime<FixedOffset>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Secs, false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referential_action_parse() {
        assert_eq!(ReferentialAction::parse("CASCADE"), ReferentialAction::Cascade);
        assert_eq!(ReferentialAction::parse("set null"), ReferentialAction::SetNull);
        assert_eq!(ReferentialAction::parse("NO ACTION"), ReferentialAction::NoAction);
        assert_eq!(
            ReferentialAction::parse("SET DEFAULT"),
            ReferentialAction::SetDefault
        );
        assert_eq!(ReferentialAction::parse("RESTRICT"), ReferentialAction::Restrict);
    }

    #[test]
    fn test_unknown_referential_action_kept_verbatim() {
        let action = ReferentialAction::parse("Weird Rule");
        assert_eq!(action, ReferentialAction::Other("Weird Rule".to_string()));
        assert_eq!(serde_json::to_string(&action).unwrap(), r#""Weird Rule""#);
    }

    #[test]
    fn test_null_stats_serialize_as_null() {
        let json = serde_json::to_string(&TableStats::default()).unwrap();
        assert_eq!(json, r#"{"row_count_est":null,"engine":null,"collation":null}"#);
    }

    #[test]
    fn test_timestamp_keeps_numeric_offset() {
        let ts = DateTime::parse_from_rfc3339("2024-03-05T09:30:00+02:00").unwrap();
        let doc = SchemaDocument {
            database: "shop".to_string(),
            generated_at: ts,
            schema_version: "2024-03-05".to_string(),
            tables: vec![],
        };
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(
            json,
            r#"{"database":"shop","generated_at":"2024-03-05T09:30:00+02:00","schema_version":"2024-03-05","tables":[]}"#
        );
    }
}
