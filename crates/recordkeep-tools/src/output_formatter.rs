//! Rendering of response envelopes for the terminal
//!
//! JSON is the default and the only format meant for scripts; human and text
//! layouts are for people reading a terminal.

use serde_json::Value;
use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

/// Output format preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON envelope
    #[default]
    Json,
    /// Labeled sections with item tables
    Human,
    /// Minimal one-fact-per-line output
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" => Ok(OutputFormat::Human),
            "text" => Ok(OutputFormat::Text),
            _ => Err(format!(
                "Unknown output format '{}'. Valid options: json, human, text",
                s
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

/// Formatter for response envelopes
pub struct ResponseFormatter;

impl ResponseFormatter {
    /// Render a serialized envelope in the requested format
    pub fn format(response: &Value, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::format_json(response),
            OutputFormat::Human => Self::format_human(response),
            OutputFormat::Text => Self::format_text(response),
        }
    }

    fn format_json(response: &Value) -> String {
        serde_json::to_string_pretty(response).unwrap_or_else(|_| response.to_string())
    }

    fn format_human(response: &Value) -> String {
        let Some(obj) = response.as_object() else {
            return Self::format_json(response);
        };
        let mut out = String::new();

        if let Some(store) = obj.get("store").and_then(Value::as_str) {
            let _ = writeln!(out, "📦 Store: {}", store);
        }
        if let Some(op) = obj.get("operation").and_then(Value::as_str) {
            let _ = writeln!(out, "⚙️  Operation: {}", op);
        }
        if let Some(success) = obj.get("success").and_then(Value::as_bool) {
            let _ = writeln!(
                out,
                "Status: {}",
                if success { "✅ Success" } else { "❌ Failed" }
            );
        }
        out.push('\n');

        match obj.get("data") {
            Some(Value::Array(items)) => Self::write_item_table(&mut out, items),
            Some(data) if Self::is_item(data) => Self::write_item_table(&mut out, std::slice::from_ref(data)),
            Some(data) if data.get("processed").is_some() => Self::write_report(&mut out, data),
            Some(Value::Object(map)) => {
                for (key, value) in map {
                    let _ = writeln!(out, "  {}: {}", key, Self::scalar(value));
                }
            }
            Some(Value::Null) | None => {}
            Some(other) => {
                let _ = writeln!(out, "  {}", Self::scalar(other));
            }
        }

        if let Some(warnings) = obj.get("warnings").and_then(Value::as_array)
            && !warnings.is_empty()
        {
            out.push_str("\n⚠️  Warnings:\n");
            for warning in warnings.iter().filter_map(Value::as_str) {
                let _ = writeln!(out, "  • {}", warning);
            }
        }

        if let Some(steps) = obj.get("next_steps").and_then(Value::as_array)
            && !steps.is_empty()
        {
            out.push_str("\n👉 Next Steps:\n");
            for (i, step) in steps.iter().filter_map(Value::as_str).enumerate() {
                let _ = writeln!(out, "  {}. {}", i + 1, step);
            }
        }

        if let Some(count) = obj.get("count").and_then(Value::as_u64) {
            let _ = writeln!(out, "\nCount: {}", count);
        }
        if let Some(took) = obj.get("took_ms").and_then(Value::as_u64) {
            let _ = writeln!(out, "⏱️  Took: {}ms", took);
        }

        out
    }

    fn format_text(response: &Value) -> String {
        let Some(obj) = response.as_object() else {
            return Self::format_json(response);
        };
        let mut out = String::new();

        if let Some(success) = obj.get("success").and_then(Value::as_bool) {
            out.push_str(if success { "✓ " } else { "✗ " });
        }
        if let Some(op) = obj.get("operation").and_then(Value::as_str) {
            out.push_str(op);
        }
        out.push('\n');

        match obj.get("data") {
            Some(Value::Array(items)) => {
                for item in items {
                    let _ = writeln!(out, "{}", Self::item_line(item));
                }
            }
            Some(data) if Self::is_item(data) => {
                let _ = writeln!(out, "{}", Self::item_line(data));
            }
            Some(data) if data.get("processed").is_some() => {
                let processed = data["processed"].as_array().map_or(0, Vec::len);
                let skipped = data["skipped"].as_array().map_or(0, Vec::len);
                let _ = writeln!(out, "processed={} skipped={}", processed, skipped);
            }
            Some(Value::Object(map)) => {
                for (key, value) in map {
                    let _ = writeln!(out, "{}={}", key, Self::scalar(value));
                }
            }
            _ => {}
        }

        if let Some(took) = obj.get("took_ms").and_then(Value::as_u64) {
            let _ = writeln!(out, "({} ms)", took);
        }

        out
    }

    fn is_item(value: &Value) -> bool {
        value.get("name").is_some() && value.get("status").is_some()
    }

    fn item_line(item: &Value) -> String {
        let id = item
            .get("id")
            .and_then(Value::as_u64)
            .map_or_else(|| "-".to_string(), |id| id.to_string());
        format!(
            "#{}\t{}\t{}\t{}",
            id,
            item.get("name").and_then(Value::as_str).unwrap_or_default(),
            item.get("email").and_then(Value::as_str).unwrap_or_default(),
            item.get("status").and_then(Value::as_str).unwrap_or_default(),
        )
    }

    fn write_item_table(out: &mut String, items: &[Value]) {
        if items.is_empty() {
            out.push_str("  (no items)\n");
            return;
        }
        let _ = writeln!(out, "  {:<6} {:<24} {:<32} {}", "ID", "NAME", "EMAIL", "STATUS");
        for item in items {
            let id = item
                .get("id")
                .and_then(Value::as_u64)
                .map_or_else(|| "-".to_string(), |id| id.to_string());
            let _ = writeln!(
                out,
                "  {:<6} {:<24} {:<32} {}",
                id,
                item.get("name").and_then(Value::as_str).unwrap_or_default(),
                item.get("email").and_then(Value::as_str).unwrap_or_default(),
                item.get("status").and_then(Value::as_str).unwrap_or_default(),
            );
        }
    }

    fn write_report(out: &mut String, report: &Value) {
        if let Some(run_id) = report.get("run_id").and_then(Value::as_str) {
            let _ = writeln!(out, "🔁 Run: {}", run_id);
        }
        let total = report.get("total").and_then(Value::as_u64).unwrap_or(0);
        let processed = report["processed"].as_array().map(Vec::as_slice).unwrap_or(&[]);
        let _ = writeln!(out, "📊 Processed {} of {}\n", processed.len(), total);
        Self::write_item_table(out, processed);

        if let Some(skipped) = report.get("skipped").and_then(Value::as_array)
            && !skipped.is_empty()
        {
            out.push_str("\n⏭️  Skipped:\n");
            for entry in skipped {
                let id = entry.get("id").and_then(Value::as_u64).unwrap_or_default();
                let reason = &entry["reason"];
                let kind = reason.get("kind").and_then(Value::as_str).unwrap_or("unknown");
                match reason.get("detail").and_then(Value::as_str) {
                    Some(detail) => {
                        let _ = writeln!(out, "  • #{} {}: {}", id, kind, detail);
                    }
                    None => {
                        let _ = writeln!(out, "  • #{} {}", id, kind);
                    }
                }
            }
        }
    }

    fn scalar(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Array(arr) => format!("[{} items]", arr.len()),
            Value::Object(map) => format!("{{{} fields}}", map.len()),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("HUMAN").unwrap(), OutputFormat::Human);
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert!(OutputFormat::from_str("yaml").is_err());
    }

    #[test]
    fn test_format_json_is_pretty() {
        let response = json!({"success": true, "data": {"id": 1}});
        let formatted = ResponseFormatter::format(&response, OutputFormat::Json);
        assert!(formatted.contains("\"success\": true"));
    }

    #[test]
    fn test_human_item_table() {
        let response = json!({
            "store": "items.json",
            "operation": "list_items",
            "success": true,
            "data": [
                {"id": 1, "name": "Item1", "description": "", "status": "NEW", "email": "item1@email.com"},
                {"id": 2, "name": "Item2", "description": "", "status": "PROCESSED", "email": "item2@email.com"}
            ],
            "count": 2,
            "took_ms": 3
        });
        let formatted = ResponseFormatter::format(&response, OutputFormat::Human);

        assert!(formatted.contains("Store: items.json"));
        assert!(formatted.contains("✅ Success"));
        assert!(formatted.contains("item2@email.com"));
        assert!(formatted.contains("PROCESSED"));
        assert!(formatted.contains("Count: 2"));
        assert!(formatted.contains("3ms"));
    }

    #[test]
    fn test_human_batch_report() {
        let response = json!({
            "operation": "process_all",
            "success": true,
            "data": {
                "run_id": "r-1",
                "total": 2,
                "processed": [{"id": 1, "name": "Item1", "status": "PROCESSED", "email": "a@b.io"}],
                "skipped": [{"id": 2, "reason": {"kind": "failed", "detail": "disk full"}}]
            },
            "took_ms": 120
        });
        let formatted = ResponseFormatter::format(&response, OutputFormat::Human);

        assert!(formatted.contains("Processed 1 of 2"));
        assert!(formatted.contains("#2 failed: disk full"));
    }

    #[test]
    fn test_text_single_item() {
        let response = json!({
            "operation": "get_item",
            "success": true,
            "data": {"id": 4, "name": "Item4", "status": "NEW", "email": "item4@email.com"}
        });
        let formatted = ResponseFormatter::format(&response, OutputFormat::Text);

        assert!(formatted.starts_with("✓ get_item"));
        assert!(formatted.contains("#4\tItem4\titem4@email.com\tNEW"));
    }

    #[test]
    fn test_text_failure() {
        let response = json!({
            "operation": "delete_item",
            "success": false,
            "data": {"error": "Not found: item 9"}
        });
        let formatted = ResponseFormatter::format(&response, OutputFormat::Text);

        assert!(formatted.starts_with("✗ delete_item"));
        assert!(formatted.contains("error=Not found: item 9"));
    }
}
