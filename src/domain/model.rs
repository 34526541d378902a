use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A domain split into its name and top-level suffix.
/// `name_only` is never empty for validated input; `tld` is lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainName {
    pub name_only: String,
    pub tld: String,
}

impl DomainName {
    /// Splits on the last `.`; a missing suffix defaults to `com`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.rsplit_once('.') {
            Some((name, tld)) if !name.is_empty() && !tld.is_empty() => Self {
                name_only: name.to_lowercase(),
                tld: tld.to_lowercase(),
            },
            _ => Self {
                name_only: raw.to_lowercase(),
                tld: "com".to_string(),
            },
        }
    }

    pub fn full(&self) -> String {
        format!("{}.{}", self.name_only, self.tld)
    }

    pub fn is_com(&self) -> bool {
        self.tld == "com"
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.name_only, self.tld)
    }
}

/// Normalized lexical features, recomputed per request.
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    pub length: usize,
    pub vowel_ratio: f64,
    pub consonant_cluster_count: usize,
    pub has_hyphen_or_digit: bool,
    pub tld: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Basic,
    Detailed,
    SalesHistory,
    SimilarDomains,
    Branding,
}

impl ReportKind {
    pub const ALL: [ReportKind; 5] = [
        ReportKind::Basic,
        ReportKind::Detailed,
        ReportKind::SalesHistory,
        ReportKind::SimilarDomains,
        ReportKind::Branding,
    ];

    /// Fixed precedence order used when assembling an export.
    pub const EXPORT_ORDER: [ReportKind; 4] = [
        ReportKind::Basic,
        ReportKind::Detailed,
        ReportKind::SalesHistory,
        ReportKind::SimilarDomains,
    ];
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportKind::Basic => "basic",
            ReportKind::Detailed => "detailed",
            ReportKind::SalesHistory => "sales_history",
            ReportKind::SimilarDomains => "similar_domains",
            ReportKind::Branding => "branding",
        };
        f.write_str(name)
    }
}

/// Heuristic market price in USD. Not a real pricing oracle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    pub amount: f64,
}

/// One historical sale. Collections are kept sorted by date descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub date: NaiveDate,
    pub price: u64,
}

/// A comparable domain with an estimated price. Collections are kept
/// sorted by price descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarDomain {
    pub name: String,
    pub price: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportResult {
    Analysis {
        title: String,
        content: String,
        metrics: BTreeMap<String, String>,
    },
    Sales(Vec<SaleRecord>),
    Similar(Vec<SimilarDomain>),
    Branding {
        image_url: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// Per-(domain, report kind) cache entry owned by the aggregator.
#[derive(Debug, Clone)]
pub struct ReportCell {
    pub state: CellState,
    pub result: Option<ReportResult>,
    pub error: Option<String>,
}

impl ReportCell {
    pub fn idle() -> Self {
        Self {
            state: CellState::Idle,
            result: None,
            error: None,
        }
    }

    pub fn loaded(result: ReportResult) -> Self {
        Self {
            state: CellState::Loaded,
            result: Some(result),
            error: None,
        }
    }

    pub fn errored(message: impl Into<String>) -> Self {
        Self {
            state: CellState::Errored,
            result: None,
            error: Some(message.into()),
        }
    }
}

/// Renders a USD amount with thousands separators, e.g. `$12,500`.
pub fn format_usd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
