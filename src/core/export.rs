//! Export synthesizer: renders whichever subset of reports loaded into one
//! self-contained HTML document, in a fixed section order. Also produces the
//! minimal landing-page template artifact.

use crate::core::aggregator::Session;
use crate::domain::model::{
    format_usd, CellState, ReportKind, ReportResult, SaleRecord, SimilarDomain,
};
use crate::utils::error::{ReportError, Result};
use std::collections::BTreeMap;

const REPORT_STYLE: &str = "body{font-family:Arial,sans-serif;max-width:1100px;margin:0 auto;\
padding:20px;color:#333}h1,h2{color:#4F46E5}h1{text-align:center}\
.section{margin-bottom:30px;border-bottom:1px solid #e5e7eb;padding-bottom:20px}\
.report-content{line-height:1.6;white-space:pre-line}\
table{width:100%;border-collapse:collapse}th,td{padding:10px;border-bottom:1px solid #e5e7eb}\
th{background:#f3f4f6;text-align:left}td.num{text-align:right}\
.metrics td:first-child{font-weight:600}.no-data{color:#6B7280;font-style:italic}\
footer{text-align:center;margin-top:50px;color:#6B7280;font-size:.9em}";

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn push_metrics(out: &mut String, metrics: &BTreeMap<String, String>) {
    if metrics.is_empty() {
        return;
    }
    out.push_str("<table class=\"metrics\"><tbody>");
    for (label, value) in metrics {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>",
            escape(label),
            escape(value)
        ));
    }
    out.push_str("</tbody></table>");
}

fn push_analysis(out: &mut String, title: &str, content: &str, metrics: &BTreeMap<String, String>) {
    out.push_str(&format!(
        "<div class=\"section\"><h2>{}</h2><div class=\"report-content\">{}</div>",
        escape(title),
        escape(content)
    ));
    push_metrics(out, metrics);
    out.push_str("</div>");
}

fn push_sales(out: &mut String, sales: &[SaleRecord]) {
    out.push_str("<div class=\"section\"><h2>Sales History</h2>");
    if sales.is_empty() {
        out.push_str("<p class=\"no-data\">No sales history found for this domain.</p>");
    } else {
        out.push_str("<table><thead><tr><th>Date</th><th>Price</th></tr></thead><tbody>");
        for sale in sales {
            out.push_str(&format!(
                "<tr><td>{}</td><td class=\"num\">{}</td></tr>",
                sale.date.format("%B %d, %Y"),
                format_usd(sale.price)
            ));
        }
        out.push_str("</tbody></table>");
    }
    out.push_str("</div>");
}

fn push_similar(out: &mut String, domains: &[SimilarDomain]) {
    out.push_str("<div class=\"section\"><h2>Similar Domains</h2>");
    if domains.is_empty() {
        out.push_str("<p class=\"no-data\">No similar domains found.</p>");
    } else {
        out.push_str(
            "<table><thead><tr><th>Domain</th><th>Estimated Price</th></tr></thead><tbody>",
        );
        for domain in domains {
            out.push_str(&format!(
                "<tr><td>{}</td><td class=\"num\">{}</td></tr>",
                escape(&domain.name),
                format_usd(domain.price)
            ));
        }
        out.push_str("</tbody></table>");
    }
    out.push_str("</div>");
}

/// Builds the export document from whichever report kinds are Loaded, in
/// fixed precedence order. The Basic report must be present; every other
/// kind is optional and silently omitted when Idle, Loading or Errored.
pub fn synthesize_report(session: &Session) -> Result<String> {
    let domain = session
        .domain
        .as_ref()
        .ok_or_else(|| ReportError::validation("no domain submitted"))?;

    if session.cell(ReportKind::Basic).state != CellState::Loaded {
        return Err(ReportError::validation(
            "the basic report must be loaded before exporting",
        ));
    }

    let mut out = String::with_capacity(4096);
    out.push_str(&format!(
        "<!DOCTYPE html><html><head><title>Domain Analysis Report - {domain}</title>\
         <style>{REPORT_STYLE}</style></head><body>\
         <h1>Domain Analysis Report: {domain}</h1>",
        domain = escape(&domain.full())
    ));

    for kind in ReportKind::EXPORT_ORDER {
        let cell = session.cell(kind);
        if cell.state != CellState::Loaded {
            continue;
        }
        let result = cell.result.as_ref().ok_or_else(|| ReportError::RenderError {
            message: format!("loaded {} cell has no result attached", kind),
        })?;

        match result {
            ReportResult::Analysis {
                title,
                content,
                metrics,
            } => push_analysis(&mut out, title, content, metrics),
            ReportResult::Sales(sales) => push_sales(&mut out, sales),
            ReportResult::Similar(domains) => push_similar(&mut out, domains),
            // Branding is session-only and never exported.
            ReportResult::Branding { .. } => {}
        }
    }

    out.push_str(&format!(
        "<footer><p>Report generated by domainval on {}</p></footer></body></html>",
        chrono::Utc::now().format("%Y-%m-%d")
    ));
    Ok(out)
}

/// Placeholder landing page carrying only the domain name.
pub fn synthesize_template(session: &Session) -> Result<String> {
    let domain = session
        .domain
        .as_ref()
        .ok_or_else(|| ReportError::validation("no domain submitted"))?;
    let name = escape(&domain.full());

    Ok(format!(
        "<!DOCTYPE html><html><head><title>{name}</title></head><body>\
         <header><h1>{name}</h1></header><main></main></body></html>"
    ))
}
