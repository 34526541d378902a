//! Report aggregator: one fetch per report kind, per-(domain, kind) cell
//! state, cache hits for loaded cells, and fallback substitution when the
//! generative service returns unusable structured output. Each in-flight
//! fetch is tagged with the domain it was issued for; completions whose tag
//! no longer matches the current session are dropped so a stale fetch can
//! never contaminate another domain's cells.

use crate::core::fallback;
use crate::core::features::extract_features;
use crate::core::scoring;
use crate::core::validate;
use crate::domain::model::{
    format_usd, CellState, DomainName, Features, ReportCell, ReportKind, ReportResult,
};
use crate::domain::ports::AnalysisService;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::validate_domain;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Per-domain session owned by the aggregator. Cleared in full whenever a
/// new domain is submitted.
#[derive(Debug, Clone)]
pub struct Session {
    pub domain: Option<DomainName>,
    pub cells: HashMap<ReportKind, ReportCell>,
}

impl Session {
    fn new() -> Self {
        Self {
            domain: None,
            cells: ReportKind::ALL
                .iter()
                .map(|kind| (*kind, ReportCell::idle()))
                .collect(),
        }
    }

    pub fn cell(&self, kind: ReportKind) -> &ReportCell {
        // `cells` is a public field, so hand-built sessions may be missing a
        // kind; absent entries read as idle.
        static IDLE: ReportCell = ReportCell {
            state: CellState::Idle,
            result: None,
            error: None,
        };
        self.cells.get(&kind).unwrap_or(&IDLE)
    }
}

pub struct ReportAggregator<S: AnalysisService> {
    service: Arc<S>,
    session: Arc<Mutex<Session>>,
    rng: Arc<Mutex<StdRng>>,
}

impl<S: AnalysisService> Clone for ReportAggregator<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            session: Arc::clone(&self.session),
            rng: Arc::clone(&self.rng),
        }
    }
}

impl<S: AnalysisService> ReportAggregator<S> {
    pub fn new(service: S, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            service: Arc::new(service),
            session: Arc::new(Mutex::new(Session::new())),
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Validates and installs a new domain, resetting every cell to Idle.
    pub async fn submit(&self, raw_domain: &str) -> Result<DomainName> {
        validate_domain(raw_domain)?;
        let domain = DomainName::parse(raw_domain);

        let mut session = self.session.lock().await;
        tracing::info!("starting session for {}", domain);
        session.domain = Some(domain.clone());
        for cell in session.cells.values_mut() {
            *cell = ReportCell::idle();
        }
        Ok(domain)
    }

    pub async fn snapshot(&self) -> Session {
        self.session.lock().await.clone()
    }

    /// Fetches one report kind. Loaded cells are served from cache without
    /// re-fetching; transport failures mark the cell Errored without
    /// touching any other kind.
    pub async fn fetch(&self, kind: ReportKind) -> Result<ReportResult> {
        let issued_for = {
            let mut session = self.session.lock().await;
            let domain = session.domain.clone().ok_or_else(|| {
                ReportError::validation("no domain submitted")
            })?;

            let cell = session.cell(kind);
            if cell.state == CellState::Loaded {
                if let Some(result) = &cell.result {
                    tracing::debug!("cache hit for ({}, {})", domain, kind);
                    return Ok(result.clone());
                }
            }

            session.cells.insert(
                kind,
                ReportCell {
                    state: CellState::Loading,
                    result: None,
                    error: None,
                },
            );
            domain
        };

        let outcome = self.load_report(&issued_for, kind).await;

        let mut session = self.session.lock().await;
        if session.domain.as_ref() != Some(&issued_for) {
            tracing::warn!(
                "discarding stale {} result for {} (session moved on)",
                kind,
                issued_for
            );
            return outcome;
        }

        match &outcome {
            Ok(result) => {
                session.cells.insert(kind, ReportCell::loaded(result.clone()));
            }
            Err(e) => {
                tracing::warn!("{} report failed for {}: {}", kind, issued_for, e);
                session.cells.insert(kind, ReportCell::errored(e.to_string()));
            }
        }
        outcome
    }

    /// Fetches all five kinds concurrently. Per-kind failures are isolated
    /// in their cells and do not abort the others.
    pub async fn fetch_all(&self) {
        let (basic, detailed, sales, similar, branding) = tokio::join!(
            self.fetch(ReportKind::Basic),
            self.fetch(ReportKind::Detailed),
            self.fetch(ReportKind::SalesHistory),
            self.fetch(ReportKind::SimilarDomains),
            self.fetch(ReportKind::Branding),
        );
        let loaded = [&basic, &detailed, &sales, &similar, &branding]
            .iter()
            .filter(|r| r.is_ok())
            .count();
        tracing::info!("{}/5 report kinds loaded", loaded);
    }

    /// Single suspend point per fetch: one service call, then local
    /// validation, scoring and (for the list kinds) fallback substitution.
    async fn load_report(&self, domain: &DomainName, kind: ReportKind) -> Result<ReportResult> {
        // A service-level parse failure is handled exactly like a payload
        // that fails schema validation: the empty object fails the kind's
        // validator and routes to the fallback path.
        let payload = match self.service.fetch_payload(&domain.full(), kind).await {
            Ok(payload) => payload,
            Err(e) if e.is_recoverable() => {
                tracing::warn!("{} service returned unparseable data: {}", kind, e);
                serde_json::Value::Object(Default::default())
            }
            Err(e) => return Err(ReportError::upstream(kind, e.to_string())),
        };

        let mut rng = self.rng.lock().await;
        match kind {
            ReportKind::Basic | ReportKind::Detailed => {
                let content = match validate::validate_narrative(kind, &payload) {
                    Ok(content) => content,
                    Err(e) if e.is_recoverable() => {
                        tracing::warn!("unusable {} narrative, using local analysis: {}", kind, e);
                        fallback::fallback_narrative(
                            domain,
                            kind == ReportKind::Detailed,
                            &mut *rng,
                        )
                    }
                    Err(e) => return Err(e),
                };

                let features = extract_features(domain);
                let (title, metrics) = if kind == ReportKind::Basic {
                    (
                        format!("Basic Analysis: {}", domain),
                        basic_metrics(&features, &mut *rng),
                    )
                } else {
                    (
                        format!("Detailed Analysis: {}", domain),
                        detailed_metrics(domain, &features, &mut *rng),
                    )
                };

                Ok(ReportResult::Analysis {
                    title,
                    content,
                    metrics,
                })
            }
            ReportKind::SalesHistory => match validate::validate_sales(&payload) {
                Ok(sales) => Ok(ReportResult::Sales(sales)),
                Err(e) if e.is_recoverable() => {
                    tracing::warn!("unusable sales response, generating fallback: {}", e);
                    Ok(ReportResult::Sales(fallback::fallback_sales(
                        domain, &mut *rng,
                    )))
                }
                Err(e) => Err(e),
            },
            ReportKind::SimilarDomains => match validate::validate_similar(&payload) {
                Ok(domains) => Ok(ReportResult::Similar(domains)),
                Err(e) if e.is_recoverable() => {
                    tracing::warn!("unusable similar-domains response, generating fallback: {}", e);
                    Ok(ReportResult::Similar(fallback::fallback_similar(
                        domain, &mut *rng,
                    )))
                }
                Err(e) => Err(e),
            },
            // No local substitute exists for an image; an unusable response
            // surfaces as a per-kind upstream failure.
            ReportKind::Branding => validate::validate_image(&payload)
                .map(|image_url| ReportResult::Branding { image_url })
                .map_err(|e| ReportError::upstream(kind, e.to_string())),
        }
    }
}

fn basic_metrics(features: &Features, rng: &mut impl Rng) -> BTreeMap<String, String> {
    let price = scoring::price_estimate(features, rng);
    BTreeMap::from([
        (
            "Estimated Value".to_string(),
            format_usd(price.amount as u64),
        ),
        (
            "Brandability".to_string(),
            format!("{}/100", scoring::brandability(features, rng)),
        ),
        (
            "Memorability".to_string(),
            format!("{}/100", scoring::memorability(features, rng)),
        ),
        (
            "Marketing Potential".to_string(),
            format!("{}/100", scoring::marketing_potential(features, rng)),
        ),
        (
            "SEO Friendliness".to_string(),
            format!("{}/100", scoring::seo_friendliness(features, rng)),
        ),
    ])
}

fn detailed_metrics(
    domain: &DomainName,
    features: &Features,
    rng: &mut impl Rng,
) -> BTreeMap<String, String> {
    let traffic = scoring::monthly_traffic(features, rng);
    let revenue = scoring::annual_revenue(traffic, rng);
    let industries = scoring::classify_industries(&domain.name_only, rng);
    let industry_list = industries
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    BTreeMap::from([
        (
            "Investment Grade".to_string(),
            scoring::investment_grade(domain, rng).to_string(),
        ),
        (
            "TLD Strength".to_string(),
            scoring::tld_strength(&features.tld).to_string(),
        ),
        (
            "Character Count".to_string(),
            format!(
                "{} ({})",
                features.length,
                scoring::character_count_rating(features.length)
            ),
        ),
        (
            "Pronounceability".to_string(),
            scoring::pronounceability(features).to_string(),
        ),
        (
            "Domain Age Potential".to_string(),
            format!("{}/5", rng.random_range(1..=5)),
        ),
        (
            "Development ROI".to_string(),
            format!("{}/5", rng.random_range(1..=5)),
        ),
        (
            "Market Demand".to_string(),
            format!("{}/5", rng.random_range(1..=5)),
        ),
        (
            "Keyword Value".to_string(),
            format!("{}/5", rng.random_range(1..=5)),
        ),
        (
            "Estimated Monthly Traffic".to_string(),
            format!("{} visits", traffic),
        ),
        (
            "Annual Revenue Potential".to_string(),
            format_usd(revenue as u64),
        ),
        ("Relevant Industries".to_string(), industry_list),
        (
            "Growth Trend".to_string(),
            scoring::growth_trend(features, rng).to_string(),
        ),
        (
            "Global Appeal".to_string(),
            scoring::global_appeal(features).to_string(),
        ),
        (
            "Digital Marketing Value".to_string(),
            format!("{}/100", scoring::digital_marketing_value(features, rng)),
        ),
    ])
}
