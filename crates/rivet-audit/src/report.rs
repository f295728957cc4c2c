// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report rendering in the configured output format.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use serde_json::json;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::finding::Finding;

/// Report output format. `All` renders every concrete format.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportFormat {
    #[default]
    Html,
    Json,
    Csv,
    Xml,
    All,
}

impl ReportFormat {
    /// The concrete formats this selection expands to.
    pub fn expand(self) -> Vec<ReportFormat> {
        match self {
            ReportFormat::All => ReportFormat::iter().filter(|f| *f != ReportFormat::All).collect(),
            single => vec![single],
        }
    }

    /// Conventional file extension for a concrete format.
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Html => "html",
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
            ReportFormat::Xml => "xml",
            ReportFormat::All => "",
        }
    }
}

/// Render `findings` in `format`, keyed by concrete format.
///
/// A single format yields one entry; `All` yields one per concrete format.
/// Findings are listed highest score first.
pub fn render_report(findings: &[Finding], format: ReportFormat) -> BTreeMap<ReportFormat, String> {
    let mut sorted: Vec<&Finding> = findings.iter().collect();
    sorted.sort_by(|a, b| b.cvss.total_cmp(&a.cvss).then_with(|| a.id.cmp(&b.id)));

    format
        .expand()
        .into_iter()
        .map(|f| {
            let body = match f {
                ReportFormat::Html => render_html(&sorted),
                ReportFormat::Json => render_json(&sorted),
                ReportFormat::Csv => render_csv(&sorted),
                ReportFormat::Xml | ReportFormat::All => render_xml(&sorted),
            };
            (f, body)
        })
        .collect()
}

fn render_json(findings: &[&Finding]) -> String {
    let rows: Vec<_> = findings
        .iter()
        .map(|f| {
            json!({
                "id": f.id,
                "coordinate": f.coordinate.to_string(),
                "cvss": f.cvss,
                "severity": f.severity().to_string(),
                "description": f.description,
            })
        })
        .collect();
    format!("{:#}\n", json!({ "findings": rows }))
}

fn render_csv(findings: &[&Finding]) -> String {
    let mut out = String::from("id,coordinate,cvss,severity,description\n");
    for f in findings {
        let _ = writeln!(
            out,
            "{},{},{:.1},{},{}",
            csv_field(&f.id),
            csv_field(&f.coordinate.to_string()),
            f.cvss,
            f.severity(),
            csv_field(&f.description)
        );
    }
    out
}

fn render_xml(findings: &[&Finding]) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<findings>\n");
    for f in findings {
        let _ = writeln!(
            out,
            "  <finding id=\"{}\" coordinate=\"{}\" cvss=\"{:.1}\" severity=\"{}\">{}</finding>",
            escape_markup(&f.id),
            escape_markup(&f.coordinate.to_string()),
            f.cvss,
            f.severity(),
            escape_markup(&f.description)
        );
    }
    out.push_str("</findings>\n");
    out
}

fn render_html(findings: &[&Finding]) -> String {
    let mut out = String::from(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Dependency audit</title></head>\n<body>\n",
    );
    let _ = writeln!(out, "<h1>Dependency audit: {} finding(s)</h1>", findings.len());
    out.push_str("<table>\n<tr><th>ID</th><th>Coordinate</th><th>CVSS</th><th>Severity</th><th>Description</th></tr>\n");
    for f in findings {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{:.1}</td><td>{}</td><td>{}</td></tr>",
            escape_markup(&f.id),
            escape_markup(&f.coordinate.to_string()),
            f.cvss,
            f.severity(),
            escape_markup(&f.description)
        );
    }
    out.push_str("</table>\n</body>\n</html>\n");
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn escape_markup(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
