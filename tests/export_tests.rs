use chrono::NaiveDate;
use domainval::core::{export, Session};
use domainval::domain::model::{
    CellState, DomainName, ReportCell, ReportKind, ReportResult, SaleRecord, SimilarDomain,
};
use domainval::ReportError;
use std::collections::BTreeMap;

fn empty_session(domain: &str) -> Session {
    Session {
        domain: Some(DomainName::parse(domain)),
        cells: ReportKind::ALL
            .iter()
            .map(|kind| (*kind, ReportCell::idle()))
            .collect(),
    }
}

fn basic_result() -> ReportResult {
    ReportResult::Analysis {
        title: "Basic Analysis: example.com".to_string(),
        content: "A strong, brandable name.".to_string(),
        metrics: BTreeMap::from([("Brandability".to_string(), "82/100".to_string())]),
    }
}

#[test]
fn export_requires_the_basic_report() {
    let session = empty_session("example.com");
    let err = export::synthesize_report(&session).unwrap_err();
    assert!(matches!(err, ReportError::ValidationError { .. }));
}

#[test]
fn export_works_with_basic_alone() {
    let mut session = empty_session("example.com");
    session
        .cells
        .insert(ReportKind::Basic, ReportCell::loaded(basic_result()));

    let html = export::synthesize_report(&session).unwrap();
    assert!(html.contains("Domain Analysis Report: example.com"));
    assert!(html.contains("Basic Analysis: example.com"));
    assert!(html.contains("82/100"));
    assert!(!html.contains("Sales History"));
    assert!(!html.contains("Similar Domains"));
}

#[test]
fn errored_and_loading_kinds_are_silently_omitted() {
    let mut session = empty_session("example.com");
    session
        .cells
        .insert(ReportKind::Basic, ReportCell::loaded(basic_result()));
    session.cells.insert(
        ReportKind::SalesHistory,
        ReportCell::errored("service unavailable"),
    );
    session.cells.insert(
        ReportKind::SimilarDomains,
        ReportCell {
            state: CellState::Loading,
            result: None,
            error: None,
        },
    );

    let html = export::synthesize_report(&session).unwrap();
    assert!(!html.contains("Sales History"));
    assert!(!html.contains("Similar Domains"));
    assert!(!html.contains("service unavailable"));
}

#[test]
fn sections_follow_fixed_precedence_order() {
    let mut session = empty_session("example.com");
    session
        .cells
        .insert(ReportKind::Basic, ReportCell::loaded(basic_result()));
    session.cells.insert(
        ReportKind::Detailed,
        ReportCell::loaded(ReportResult::Analysis {
            title: "Detailed Analysis: example.com".to_string(),
            content: "In depth.".to_string(),
            metrics: BTreeMap::new(),
        }),
    );
    session.cells.insert(
        ReportKind::SalesHistory,
        ReportCell::loaded(ReportResult::Sales(vec![SaleRecord {
            date: NaiveDate::from_ymd_opt(2022, 4, 2).unwrap(),
            price: 3_500,
        }])),
    );
    session.cells.insert(
        ReportKind::SimilarDomains,
        ReportCell::loaded(ReportResult::Similar(vec![SimilarDomain {
            name: "examples.com".to_string(),
            price: 1_200,
        }])),
    );

    let html = export::synthesize_report(&session).unwrap();
    let basic = html.find("Basic Analysis").unwrap();
    let detailed = html.find("Detailed Analysis").unwrap();
    let sales = html.find("Sales History").unwrap();
    let similar = html.find("Similar Domains").unwrap();
    assert!(basic < detailed && detailed < sales && sales < similar);

    assert!(html.contains("April 02, 2022"));
    assert!(html.contains("$3,500"));
    assert!(html.contains("examples.com"));
    assert!(html.contains("$1,200"));
}

#[test]
fn empty_record_lists_render_a_no_data_notice() {
    let mut session = empty_session("example.com");
    session
        .cells
        .insert(ReportKind::Basic, ReportCell::loaded(basic_result()));
    session.cells.insert(
        ReportKind::SalesHistory,
        ReportCell::loaded(ReportResult::Sales(vec![])),
    );
    session.cells.insert(
        ReportKind::SimilarDomains,
        ReportCell::loaded(ReportResult::Similar(vec![])),
    );

    let html = export::synthesize_report(&session).unwrap();
    assert!(html.contains("No sales history found for this domain."));
    assert!(html.contains("No similar domains found."));
    assert!(!html.contains("<thead>"));
}

#[test]
fn branding_never_appears_in_the_export() {
    let mut session = empty_session("example.com");
    session
        .cells
        .insert(ReportKind::Basic, ReportCell::loaded(basic_result()));
    session.cells.insert(
        ReportKind::Branding,
        ReportCell::loaded(ReportResult::Branding {
            image_url: "https://img.example/logo.png".to_string(),
        }),
    );

    let html = export::synthesize_report(&session).unwrap();
    assert!(!html.contains("logo.png"));
}

#[test]
fn narrative_markup_is_escaped() {
    let mut session = empty_session("example.com");
    session.cells.insert(
        ReportKind::Basic,
        ReportCell::loaded(ReportResult::Analysis {
            title: "Basic Analysis: example.com".to_string(),
            content: "<script>alert(1)</script> & more".to_string(),
            metrics: BTreeMap::new(),
        }),
    );

    let html = export::synthesize_report(&session).unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("&amp; more"));
}

#[test]
fn template_carries_only_the_domain() {
    let session = empty_session("my-brand.io");
    let html = export::synthesize_template(&session).unwrap();
    assert!(html.contains("<h1>my-brand.io</h1>"));
    assert!(html.contains("<title>my-brand.io</title>"));
}
