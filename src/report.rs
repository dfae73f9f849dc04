//! Serializable snapshots of a registry's stub state and call history.

use crate::{Result, StubError};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MethodReport {
    pub method: String,
    pub stubbed: bool,
    pub call_count: usize,
    /// Each call's arguments, rendered with `Debug`
    pub calls: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryReport {
    pub subject: String,
    pub methods: Vec<MethodReport>,
}

impl HistoryReport {
    pub fn method(&self, name: &str) -> Option<&MethodReport> {
        self.methods.iter().find(|m| m.method == name)
    }

    pub fn total_calls(&self) -> usize {
        self.methods.iter().map(|m| m.call_count).sum()
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| StubError::Report(format!("Failed to serialize report: {}", e))),
            ReportFormat::Text => Ok(self.render_text()),
        }
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} ({} calls)", self.subject, self.total_calls());
        for method in &self.methods {
            let marker = if method.stubbed { " [stubbed]" } else { "" };
            let _ = writeln!(
                out,
                "  {}{}: {} call(s)",
                method.method, marker, method.call_count
            );
            for (index, call) in method.calls.iter().enumerate() {
                let _ = writeln!(out, "    #{} ({})", index, call.join(", "));
            }
        }
        out
    }
}
