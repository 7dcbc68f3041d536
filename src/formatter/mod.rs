//! Output formatting and colorization for h5sh
//!
//! Renders execution results in the configured output format:
//! - Shell format for human-oriented terminal output
//! - JSON formatting (plain and pretty-printed, colorized when enabled)
//! - Table formatting for listings
//! - Color highlighting for errors and group names

use colored_json::to_colored_json_auto;
use serde_json::{json, Value as JsonValue};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::OutputFormat;
use crate::error::Result;
use crate::executor::{EntryInfo, ExecutionResult, NodeSummary, ResultData};

/// Main formatter for execution results
pub struct Formatter {
    /// Output format type
    format_type: OutputFormat,

    /// Colorizer for output highlighting
    colorizer: Colorizer,

    /// Enable colored output
    use_colors: bool,
}

/// Color scheme for output highlighting
pub struct Colorizer {
    enabled: bool,
}

/// ANSI color codes for terminal output
pub struct AnsiColors;

impl Formatter {
    pub fn new(format_type: OutputFormat, use_colors: bool) -> Self {
        Self {
            format_type,
            colorizer: Colorizer::new(use_colors),
            use_colors,
        }
    }

    /// Format an execution result according to the configured format.
    pub fn format(&self, result: &ExecutionResult) -> Result<String> {
        if !result.success {
            return Ok(self.format_error(result));
        }

        match self.format_type {
            OutputFormat::Shell => Ok(self.format_shell(&result.data)),
            OutputFormat::Json => Ok(serde_json::to_string(&to_json(&result.data))
                .unwrap_or_else(|_| "null".to_string())),
            OutputFormat::JsonPretty => Ok(self.format_json_pretty(&result.data)),
            OutputFormat::Table => Ok(self.format_table(&result.data)),
        }
    }

    fn format_error(&self, result: &ExecutionResult) -> String {
        let unknown_error = String::from("Unknown error");
        let message = result.error.as_ref().unwrap_or(&unknown_error);
        self.colorizer.error(message)
    }

    fn format_json_pretty(&self, data: &ResultData) -> String {
        let value = to_json(data);
        if self.use_colors {
            to_colored_json_auto(&value)
                .unwrap_or_else(|_| serde_json::to_string_pretty(&value).unwrap_or_default())
        } else {
            serde_json::to_string_pretty(&value).unwrap_or_default()
        }
    }

    /// Shell format: the compact human-oriented rendering.
    fn format_shell(&self, data: &ResultData) -> String {
        match data {
            ResultData::Listing { entries, long: false } => entries
                .iter()
                .map(|e| self.entry_name(e))
                .collect::<Vec<_>>()
                .join("\n"),

            ResultData::Listing { entries, long: true } => {
                let name_width = entries
                    .iter()
                    .map(|e| e.name.len() + if e.kind == "group" { 1 } else { 0 })
                    .max()
                    .unwrap_or(0);
                entries
                    .iter()
                    .map(|e| {
                        let name = self.entry_name(e);
                        // Pad on the plain name so colors do not skew alignment.
                        let pad = name_width.saturating_sub(
                            e.name.len() + if e.kind == "group" { 1 } else { 0 },
                        );
                        format!(
                            "{}{}  {:<8} {:<12} {:<10} {} attrs",
                            name,
                            " ".repeat(pad),
                            e.kind,
                            shape_label(&e.shape),
                            e.dtype.as_deref().unwrap_or("-"),
                            e.nattrs,
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }

            ResultData::Attributes(attrs) => {
                if attrs.is_empty() {
                    return "(no attributes)".to_string();
                }
                attrs
                    .iter()
                    .map(|a| {
                        format!("{} = {}", self.colorizer.field_name(&a.name), a.value)
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }

            ResultData::Value(value) => value.to_string(),

            ResultData::Node(summary) => self.format_node(summary),

            ResultData::Files(files) => {
                if files.is_empty() {
                    return "(no open files)".to_string();
                }
                files
                    .iter()
                    .map(|f| format!("{}  {}", self.colorizer.field_name(&f.variable), f.path))
                    .collect::<Vec<_>>()
                    .join("\n")
            }

            ResultData::Vars(vars) => {
                if vars.is_empty() {
                    return "(no variables)".to_string();
                }
                vars.iter()
                    .map(|v| {
                        format!(
                            "{}  {:<10} {}",
                            self.colorizer.field_name(&v.name),
                            v.kind,
                            v.detail
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }

            ResultData::Message(msg) => msg.clone(),

            ResultData::None => String::new(),
        }
    }

    fn format_node(&self, summary: &NodeSummary) -> String {
        let mut lines = vec![format!("{} ({})", summary.path, summary.kind)];
        if let Some(shape) = &summary.shape {
            lines.push(format!("  shape: {}", shape_label(&Some(shape.clone()))));
        }
        if let Some(dtype) = &summary.dtype {
            lines.push(format!("  dtype: {dtype}"));
        }
        if let Some(n) = summary.nchildren {
            lines.push(format!("  children: {n}"));
        }
        lines.push(format!("  attributes: {}", summary.nattrs));
        lines.join("\n")
    }

    /// Group names get a trailing slash and a splash of color.
    fn entry_name(&self, entry: &EntryInfo) -> String {
        if entry.kind == "group" {
            self.colorizer.group(&format!("{}/", entry.name))
        } else {
            entry.name.clone()
        }
    }

    fn format_table(&self, data: &ResultData) -> String {
        match data {
            ResultData::Listing { entries, .. } => {
                let rows: Vec<ListingRow> = entries.iter().map(ListingRow::from).collect();
                Table::new(rows).with(Style::rounded()).to_string()
            }
            ResultData::Attributes(attrs) => {
                let rows: Vec<AttrRow> = attrs
                    .iter()
                    .map(|a| AttrRow {
                        name: a.name.clone(),
                        value: a.value.to_string(),
                    })
                    .collect();
                Table::new(rows).with(Style::rounded()).to_string()
            }
            ResultData::Files(files) => {
                let rows: Vec<FileRow> = files
                    .iter()
                    .map(|f| FileRow {
                        variable: f.variable.clone(),
                        path: f.path.clone(),
                    })
                    .collect();
                Table::new(rows).with(Style::rounded()).to_string()
            }
            ResultData::Vars(vars) => {
                let rows: Vec<VarRow> = vars
                    .iter()
                    .map(|v| VarRow {
                        name: v.name.clone(),
                        kind: v.kind.clone(),
                        detail: v.detail.clone(),
                    })
                    .collect();
                Table::new(rows).with(Style::rounded()).to_string()
            }
            other => self.format_shell(other),
        }
    }

    pub fn set_format(&mut self, format_type: OutputFormat) {
        self.format_type = format_type;
    }
}

/// JSON rendering of result data, shared by the json and json-pretty formats.
fn to_json(data: &ResultData) -> JsonValue {
    match data {
        ResultData::Listing { entries, .. } => json!(
            entries
                .iter()
                .map(|e| {
                    json!({
                        "name": e.name,
                        "kind": e.kind,
                        "shape": e.shape,
                        "dtype": e.dtype,
                        "nattrs": e.nattrs,
                    })
                })
                .collect::<Vec<_>>()
        ),
        ResultData::Attributes(attrs) => {
            let map: serde_json::Map<String, JsonValue> = attrs
                .iter()
                .map(|a| (a.name.clone(), a.value.clone()))
                .collect();
            JsonValue::Object(map)
        }
        ResultData::Value(value) => value.clone(),
        ResultData::Node(s) => json!({
            "path": s.path,
            "kind": s.kind,
            "shape": s.shape,
            "dtype": s.dtype,
            "nchildren": s.nchildren,
            "nattrs": s.nattrs,
        }),
        ResultData::Files(files) => json!(
            files
                .iter()
                .map(|f| json!({ "variable": f.variable, "path": f.path }))
                .collect::<Vec<_>>()
        ),
        ResultData::Vars(vars) => json!(
            vars.iter()
                .map(|v| json!({ "name": v.name, "kind": v.kind, "detail": v.detail }))
                .collect::<Vec<_>>()
        ),
        ResultData::Message(msg) => json!(msg),
        ResultData::None => JsonValue::Null,
    }
}

fn shape_label(shape: &Option<Vec<u64>>) -> String {
    match shape {
        Some(dims) => format!(
            "({})",
            dims.iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
        None => "-".to_string(),
    }
}

#[derive(Tabled)]
struct ListingRow {
    name: String,
    kind: String,
    shape: String,
    dtype: String,
    attrs: usize,
}

impl From<&EntryInfo> for ListingRow {
    fn from(e: &EntryInfo) -> Self {
        Self {
            name: e.name.clone(),
            kind: e.kind.clone(),
            shape: shape_label(&e.shape),
            dtype: e.dtype.clone().unwrap_or_else(|| "-".to_string()),
            attrs: e.nattrs,
        }
    }
}

#[derive(Tabled)]
struct AttrRow {
    name: String,
    value: String,
}

#[derive(Tabled)]
struct FileRow {
    variable: String,
    path: String,
}

#[derive(Tabled)]
struct VarRow {
    name: String,
    kind: String,
    detail: String,
}

impl Colorizer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn error(&self, text: &str) -> String {
        if self.enabled {
            format!("{}Error: {}{}", AnsiColors::RED, text, AnsiColors::RESET)
        } else {
            format!("Error: {}", text)
        }
    }

    pub fn group(&self, text: &str) -> String {
        if self.enabled {
            format!("{}{}{}", AnsiColors::BLUE, text, AnsiColors::RESET)
        } else {
            text.to_string()
        }
    }

    pub fn field_name(&self, text: &str) -> String {
        if self.enabled {
            format!("{}{}{}", AnsiColors::CYAN, text, AnsiColors::RESET)
        } else {
            text.to_string()
        }
    }
}

impl AnsiColors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const RED: &'static str = "\x1b[31m";
    pub const BLUE: &'static str = "\x1b[34m";
    pub const CYAN: &'static str = "\x1b[36m";
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(OutputFormat::Shell, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::AttrEntry;

    fn listing() -> ResultData {
        ResultData::Listing {
            entries: vec![
                EntryInfo {
                    name: "grp".to_string(),
                    kind: "group".to_string(),
                    shape: None,
                    dtype: None,
                    nattrs: 2,
                },
                EntryInfo {
                    name: "data".to_string(),
                    kind: "dataset".to_string(),
                    shape: Some(vec![10, 2]),
                    dtype: Some("float32".to_string()),
                    nattrs: 0,
                },
            ],
            long: false,
        }
    }

    #[test]
    fn test_shell_listing_marks_groups() {
        let formatter = Formatter::new(OutputFormat::Shell, false);
        let result = ExecutionResult::ok(listing());
        let out = formatter.format(&result).unwrap();
        assert_eq!(out, "grp/\ndata");
    }

    #[test]
    fn test_json_listing() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let result = ExecutionResult::ok(listing());
        let out = formatter.format(&result).unwrap();
        let parsed: JsonValue = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[1]["shape"], json!([10, 2]));
    }

    #[test]
    fn test_table_listing_has_headers() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let result = ExecutionResult::ok(listing());
        let out = formatter.format(&result).unwrap();
        assert!(out.contains("name"));
        assert!(out.contains("float32"));
    }

    #[test]
    fn test_error_without_colors() {
        let formatter = Formatter::new(OutputFormat::Shell, false);
        let result = ExecutionResult::failure("No such item: nope".to_string());
        let out = formatter.format(&result).unwrap();
        assert_eq!(out, "Error: No such item: nope");
        assert!(!out.contains("\x1b"));
    }

    #[test]
    fn test_error_with_colors() {
        let formatter = Formatter::new(OutputFormat::Shell, true);
        let result = ExecutionResult::failure("boom".to_string());
        assert!(formatter.format(&result).unwrap().contains("\x1b"));
    }

    #[test]
    fn test_attributes_shell() {
        let formatter = Formatter::new(OutputFormat::Shell, false);
        let result = ExecutionResult::ok(ResultData::Attributes(vec![AttrEntry {
            name: "units".to_string(),
            value: json!("counts"),
        }]));
        let out = formatter.format(&result).unwrap();
        assert_eq!(out, "units = \"counts\"");
    }

    #[test]
    fn test_attributes_json_is_object() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let result = ExecutionResult::ok(ResultData::Attributes(vec![AttrEntry {
            name: "units".to_string(),
            value: json!("counts"),
        }]));
        let out = formatter.format(&result).unwrap();
        assert_eq!(out, r#"{"units":"counts"}"#);
    }

    #[test]
    fn test_empty_attrs_placeholder() {
        let formatter = Formatter::new(OutputFormat::Shell, false);
        let result = ExecutionResult::ok(ResultData::Attributes(vec![]));
        assert_eq!(formatter.format(&result).unwrap(), "(no attributes)");
    }
}
