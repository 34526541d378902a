//! Valuation scoring engine. Every function here is a pure function of the
//! input features and the injected random source, so a seeded `StdRng` makes
//! the whole engine reproducible. The fallback generator reuses these
//! functions to keep its output shape-identical to the generative path.

use crate::domain::model::{DomainName, Features, PriceEstimate};
use rand::Rng;
use std::fmt;

pub const GRADES: [&str; 7] = ["AAA", "AA", "A", "BBB", "BB", "B", "CCC"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pronounceability {
    Easy,
    Good,
    Moderate,
    Difficult,
}

impl fmt::Display for Pronounceability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Pronounceability::Easy => "Easy",
            Pronounceability::Good => "Good",
            Pronounceability::Moderate => "Moderate",
            Pronounceability::Difficult => "Difficult",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TldStrength {
    Excellent,
    Good,
    Average,
}

impl fmt::Display for TldStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TldStrength::Excellent => "Excellent",
            TldStrength::Good => "Good",
            TldStrength::Average => "Average",
        };
        f.write_str(s)
    }
}

/// An industry tag either matched by keyword or picked as a best guess with
/// an attached confidence percentage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndustryMatch {
    pub tag: &'static str,
    pub confidence: Option<u8>,
}

impl fmt::Display for IndustryMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.confidence {
            Some(pct) => write!(f, "{} (~{}%)", self.tag, pct),
            None => f.write_str(self.tag),
        }
    }
}

/// Shared base score for the lexical quality metrics: start at 75 and apply
/// fixed deltas for length bucket, hyphen/digit presence, vowel ratio band
/// and TLD tier.
fn base_score(features: &Features) -> i32 {
    let mut score: i32 = 75;

    if features.length < 5 {
        score -= 5;
    } else if features.length <= 8 {
        score += 5;
    } else if features.length > 12 {
        score -= (features.length as i32 - 12) * 2;
    }

    if features.has_hyphen_or_digit {
        score -= 10;
    }

    if (0.3..=0.5).contains(&features.vowel_ratio) {
        score += 5;
    }

    match features.tld.as_str() {
        "com" | "ai" => score += 10,
        "net" | "org" | "io" => score += 5,
        _ => {}
    }

    score
}

fn jittered(score: i32, jitter: i32, min: i32, max: i32, rng: &mut impl Rng) -> u8 {
    let clamped = score.clamp(min, max);
    let variation = rng.random_range(-jitter..=jitter);
    (clamped + variation).clamp(min, max) as u8
}

/// Brandability score in [1,100], jitter ±5.
pub fn brandability(features: &Features, rng: &mut impl Rng) -> u8 {
    jittered(base_score(features), 5, 1, 100, rng)
}

/// Memorability score in [0,100], jitter ±5.
pub fn memorability(features: &Features, rng: &mut impl Rng) -> u8 {
    jittered(base_score(features), 5, 0, 100, rng)
}

/// Marketing potential score in [1,100], jitter ±5.
pub fn marketing_potential(features: &Features, rng: &mut impl Rng) -> u8 {
    jittered(base_score(features), 5, 1, 100, rng)
}

/// SEO friendliness score in [1,100], jitter ±5.
pub fn seo_friendliness(features: &Features, rng: &mut impl Rng) -> u8 {
    jittered(base_score(features), 5, 1, 100, rng)
}

/// Digital marketing value in [1,100], jitter ±10.
pub fn digital_marketing_value(features: &Features, rng: &mut impl Rng) -> u8 {
    jittered(base_score(features), 10, 1, 100, rng)
}

/// Categorical pronounceability. Rules are evaluated in fixed priority order
/// (cluster-count rules before vowel-ratio rules) so ties resolve the same
/// way every time.
pub fn pronounceability(features: &Features) -> Pronounceability {
    if features.consonant_cluster_count >= 2 {
        return Pronounceability::Difficult;
    }
    if features.consonant_cluster_count == 1 && features.vowel_ratio < 0.3 {
        return Pronounceability::Moderate;
    }
    if features.vowel_ratio < 0.2 {
        return Pronounceability::Moderate;
    }
    if features.vowel_ratio > 0.5 {
        return Pronounceability::Easy;
    }
    Pronounceability::Good
}

/// Base grade index before jitter. Monotonic in name length; longer never
/// grades better.
pub fn investment_grade_index(domain: &DomainName) -> usize {
    let length = domain.name_only.chars().count();
    let is_com = domain.is_com();

    if length <= 5 && is_com {
        0
    } else if length <= 8 && is_com {
        1
    } else if length <= 12 && is_com {
        2
    } else if length <= 15 {
        3
    } else if length <= 20 {
        4
    } else {
        (5 + (length - 20) / 5).min(6)
    }
}

/// Seven-level investment grade with a bounded jitter of at most one rank.
pub fn investment_grade(domain: &DomainName, rng: &mut impl Rng) -> &'static str {
    let index = investment_grade_index(domain) as i32;
    let shift = rng.random_range(-1..=1);
    GRADES[(index + shift).clamp(0, 6) as usize]
}

pub fn tld_strength(tld: &str) -> TldStrength {
    match tld {
        "com" | "ai" => TldStrength::Excellent,
        "net" | "org" | "io" | "co" | "app" | "tech" | "dev" => TldStrength::Good,
        _ => TldStrength::Average,
    }
}

pub fn character_count_rating(count: usize) -> &'static str {
    match count {
        0..=4 => "Excellent",
        5..=6 => "Very Good",
        7..=10 => "Good",
        11..=15 => "Average",
        _ => "Below Average",
    }
}

/// Base price range in USD for a name-length bracket. Bounds strictly
/// decrease as length grows.
pub fn base_price_range(length: usize) -> (f64, f64) {
    match length {
        0..=3 => (10_000.0, 50_000.0),
        4..=5 => (5_000.0, 15_000.0),
        6..=8 => (1_000.0, 5_000.0),
        9..=12 => (500.0, 1_500.0),
        _ => (200.0, 500.0),
    }
}

pub fn tld_multiplier(tld: &str) -> f64 {
    match tld {
        "com" => 1.0,
        "io" | "ai" | "app" => 0.7,
        "co" | "dev" => 0.5,
        "net" | "org" => 0.4,
        _ => 0.3,
    }
}

/// Samples a price from the length-bracket range and applies the TLD
/// multiplier.
pub fn price_estimate(features: &Features, rng: &mut impl Rng) -> PriceEstimate {
    let (min, max) = base_price_range(features.length);
    let base = rng.random_range(min..max);
    PriceEstimate {
        amount: (base * tld_multiplier(&features.tld)).round(),
    }
}

fn length_traffic_multiplier(length: usize) -> f64 {
    match length {
        0..=5 => 3.0,
        6..=8 => 2.0,
        9..=12 => 1.2,
        _ => 0.6,
    }
}

/// Estimated monthly visits for a parked/developed domain of this shape.
pub fn monthly_traffic(features: &Features, rng: &mut impl Rng) -> u64 {
    let base = rng.random_range(500.0..5_000.0);
    (base * tld_multiplier(&features.tld) * length_traffic_multiplier(features.length)).round()
        as u64
}

/// Annual revenue potential from a traffic figure, at a per-visit value
/// sampled in [0.2, 0.7).
pub fn annual_revenue(monthly_visits: u64, rng: &mut impl Rng) -> f64 {
    let per_visit = rng.random_range(0.2..0.7);
    (monthly_visits as f64 * 12.0 * per_visit).round()
}

const INDUSTRY_KEYWORDS: &[(&str, &[&str])] = &[
    ("Technology", &["tech", "app", "soft", "code", "data", "cloud", "dev", "byte"]),
    ("Finance", &["pay", "bank", "fin", "cash", "coin", "fund", "invest"]),
    ("Health & Wellness", &["health", "med", "care", "fit", "well", "vita"]),
    ("E-Commerce", &["shop", "store", "buy", "market", "cart", "deal"]),
    ("Travel", &["travel", "trip", "tour", "fly", "stay", "voyage"]),
    ("Education", &["learn", "edu", "academy", "school", "course", "tutor"]),
    ("Media & Entertainment", &["media", "news", "blog", "video", "play", "game", "film"]),
    ("Food & Beverage", &["food", "eat", "cook", "chef", "taste", "brew"]),
    ("Real Estate", &["home", "house", "estate", "property", "rent"]),
];

/// Case-insensitive keyword membership over a fixed industry table. When
/// nothing matches, picks 2-3 distinct industries as a declared best guess,
/// each with a confidence percentage in [70,99].
pub fn classify_industries(name: &str, rng: &mut impl Rng) -> Vec<IndustryMatch> {
    let lowered = name.to_lowercase();
    let matched: Vec<IndustryMatch> = INDUSTRY_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(tag, _)| IndustryMatch {
            tag,
            confidence: None,
        })
        .collect();

    if !matched.is_empty() {
        return matched;
    }

    let count = rng.random_range(2..=3);
    let mut picked: Vec<IndustryMatch> = Vec::with_capacity(count);
    while picked.len() < count {
        let (tag, _) = INDUSTRY_KEYWORDS[rng.random_range(0..INDUSTRY_KEYWORDS.len())];
        if picked.iter().any(|m| m.tag == tag) {
            continue;
        }
        picked.push(IndustryMatch {
            tag,
            confidence: Some(rng.random_range(70..=99)),
        });
    }
    picked
}

/// Weighted trend pick; premium shapes lean Rising, unwieldy ones Declining.
pub fn growth_trend(features: &Features, rng: &mut impl Rng) -> &'static str {
    let premium_tld = matches!(features.tld.as_str(), "com" | "ai" | "io");
    let (rising, stable) = if premium_tld && features.length <= 8 {
        (60, 30)
    } else if features.length <= 12 {
        (40, 40)
    } else {
        (20, 50)
    };

    let roll = rng.random_range(0..100);
    if roll < rising {
        "Rising"
    } else if roll < rising + stable {
        "Stable"
    } else {
        "Declining"
    }
}

/// Threshold table only; no jitter.
pub fn global_appeal(features: &Features) -> &'static str {
    if features.consonant_cluster_count == 0 && features.length <= 8 && !features.has_hyphen_or_digit
    {
        "High"
    } else if features.length <= 12 {
        "Moderate"
    } else {
        "Niche"
    }
}
