//! Locally-computed substitutes used when the generative service returns
//! unusable output. Built on the same scoring engine as the primary path so
//! fallback records obey the same invariants: non-negative prices, past
//! dates, sales sorted by date descending, similar domains by price
//! descending.

use crate::core::features::extract_features;
use crate::core::scoring;
use crate::domain::model::{DomainName, SaleRecord, SimilarDomain};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use rand::Rng;

const COMMON_TLDS: [&str; 8] = ["com", "net", "org", "io", "co", "app", "dev", "ai"];
const PREFIXES: [&str; 7] = ["get", "try", "my", "best", "top", "pro", "go"];
const SUFFIXES: [&str; 7] = ["app", "hub", "spot", "zone", "pro", "hq", "now"];
const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// How many synthetic sales a domain plausibly has. Shorter premium names
/// trade more often; long or weak names may never have sold.
fn sale_count(domain: &DomainName, rng: &mut impl Rng) -> usize {
    let length = domain.full().chars().count();
    let is_com = domain.is_com();

    if length <= 5 {
        if is_com {
            rng.random_range(3..=5)
        } else {
            rng.random_range(1..=2)
        }
    } else if length <= 10 {
        if is_com {
            rng.random_range(1..=3)
        } else {
            rng.random_range(0..=1)
        }
    } else if rng.random_bool(0.3) {
        1
    } else {
        0
    }
}

fn base_sale_price(domain: &DomainName, rng: &mut impl Rng) -> f64 {
    let length = domain.full().chars().count();
    let is_com = domain.is_com();

    if length <= 4 && is_com {
        rng.random_range(10_000.0..100_000.0)
    } else if length <= 6 && is_com {
        rng.random_range(5_000.0..20_000.0)
    } else if length <= 10 && is_com {
        rng.random_range(1_000.0..5_000.0)
    } else if is_com {
        rng.random_range(500.0..2_000.0)
    } else {
        rng.random_range(200.0..1_000.0)
    }
}

/// Synthesizes a plausible sales history. Zero records is a valid outcome.
pub fn fallback_sales(domain: &DomainName, rng: &mut impl Rng) -> Vec<SaleRecord> {
    let count = sale_count(domain, rng);
    if count == 0 {
        return Vec::new();
    }

    let today = Utc::now().date_naive();
    let base_price = base_sale_price(domain, rng);
    let mut sales = Vec::with_capacity(count);

    for i in 0..count {
        let years_ago = rng.random_range(0..10) + (i as i32) * 2;
        let year = today.year() - years_ago;
        let month = rng.random_range(1..=12);
        let day = rng.random_range(1..=28);

        let date = NaiveDate::from_ymd_opt(year, month, day)
            .filter(|d| *d < today)
            .unwrap_or_else(|| today - Duration::days(30));

        // More recent synthetic sales price higher to show appreciation.
        let multiplier = 0.7 + (i as f64 / count as f64) * 0.5;
        sales.push(SaleRecord {
            date,
            price: (base_price * multiplier).round() as u64,
        });
    }

    sales.sort_by(|a, b| b.date.cmp(&a.date));
    sales
}

fn priced(name: String, tld: &str, rng: &mut impl Rng) -> SimilarDomain {
    let candidate = DomainName {
        name_only: name.clone(),
        tld: tld.to_string(),
    };
    let price = scoring::price_estimate(&extract_features(&candidate), rng);
    SimilarDomain {
        name: format!("{}.{}", name, tld),
        price: price.amount as u64,
    }
}

fn random_tld(rng: &mut impl Rng) -> &'static str {
    COMMON_TLDS[rng.random_range(0..COMMON_TLDS.len())]
}

/// Synthesizes alternate-name and alternate-TLD suggestions, priced by the
/// scoring engine.
pub fn fallback_similar(domain: &DomainName, rng: &mut impl Rng) -> Vec<SimilarDomain> {
    let name = &domain.name_only;
    let mut domains: Vec<SimilarDomain> = Vec::new();

    // Same name under other TLDs.
    for _ in 0..3 {
        let tld = random_tld(rng);
        if tld != domain.tld {
            domains.push(priced(name.clone(), tld, rng));
        }
    }

    for _ in 0..2 {
        let prefix = PREFIXES[rng.random_range(0..PREFIXES.len())];
        domains.push(priced(format!("{}{}", prefix, name), random_tld(rng), rng));
    }

    for _ in 0..2 {
        let suffix = SUFFIXES[rng.random_range(0..SUFFIXES.len())];
        domains.push(priced(format!("{}{}", name, suffix), random_tld(rng), rng));
    }

    if name.chars().count() > 3 {
        if let Some(pos) = name.chars().position(|c| VOWELS.contains(&c)) {
            let vowel = VOWELS[rng.random_range(0..VOWELS.len())];
            let swapped: String = name
                .chars()
                .enumerate()
                .map(|(i, c)| if i == pos { vowel } else { c })
                .collect();
            domains.push(priced(swapped, random_tld(rng), rng));
        }

        let pos = rng.random_range(1..name.chars().count());
        let extra = (b'a' + rng.random_range(0..26u8)) as char;
        let mut inserted: String = name.chars().take(pos).collect();
        inserted.push(extra);
        inserted.extend(name.chars().skip(pos));
        domains.push(priced(inserted, random_tld(rng), rng));
    }

    // Highest-priced entry wins when a variant was generated twice.
    domains.sort_by(|a, b| b.price.cmp(&a.price));
    let mut seen = std::collections::HashSet::new();
    domains.retain(|d| seen.insert(d.name.clone()));
    domains
}

/// Heuristic prose substitute for a failed narrative response, written from
/// the same scores the metrics table carries.
pub fn fallback_narrative(domain: &DomainName, detailed: bool, rng: &mut impl Rng) -> String {
    let features = extract_features(domain);
    let brand = scoring::brandability(&features, rng);
    let memo = scoring::memorability(&features, rng);
    let price = scoring::price_estimate(&features, rng);
    let pronounce = scoring::pronounceability(&features);

    let mut text = format!(
        "\"{}\" is a {}-character .{} domain. Lexical analysis rates its \
         brandability at {}/100 and memorability at {}/100; the name reads \
         as {} to pronounce. Based on comparable names of this length and \
         suffix, its indicative market value is around {}.",
        domain,
        features.length,
        domain.tld,
        brand,
        memo,
        pronounce.to_string().to_lowercase(),
        crate::domain::model::format_usd(price.amount as u64),
    );

    if detailed {
        let industries = scoring::classify_industries(&domain.name_only, rng);
        let tags: Vec<String> = industries.iter().map(|m| m.to_string()).collect();
        text.push_str(&format!(
            " The name fits the {} space, with a {} growth outlook and {} \
             global appeal. Investment grade: {}.",
            tags.join(", "),
            scoring::growth_trend(&features, rng).to_lowercase(),
            scoring::global_appeal(&features).to_lowercase(),
            scoring::investment_grade(domain, rng),
        ));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sales_are_sorted_date_descending_with_past_dates() {
        let today = Utc::now().date_naive();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let sales = fallback_sales(&DomainName::parse("abc.com"), &mut rng);
            assert!(!sales.is_empty());
            for pair in sales.windows(2) {
                assert!(pair[0].date >= pair[1].date);
            }
            for sale in &sales {
                assert!(sale.date < today);
            }
        }
    }

    #[test]
    fn premium_names_have_more_sales_than_weak_ones() {
        let mut rng = StdRng::seed_from_u64(9);
        let premium = fallback_sales(&DomainName::parse("a.com"), &mut rng);
        assert!(premium.len() >= 3);

        // Long names can legitimately come back empty.
        let mut empties = 0;
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let sales = fallback_sales(
                &DomainName::parse("averyverylongdomainname.net"),
                &mut rng,
            );
            assert!(sales.len() <= 1);
            if sales.is_empty() {
                empties += 1;
            }
        }
        assert!(empties > 0);
    }

    #[test]
    fn similar_domains_sorted_by_price_descending() {
        let mut rng = StdRng::seed_from_u64(4);
        let domains = fallback_similar(&DomainName::parse("stellar.io"), &mut rng);
        assert!(!domains.is_empty());
        for pair in domains.windows(2) {
            assert!(pair[0].price >= pair[1].price);
        }
    }

    #[test]
    fn similar_domains_never_suggest_duplicates() {
        let mut rng = StdRng::seed_from_u64(11);
        let domains = fallback_similar(&DomainName::parse("shop.com"), &mut rng);
        let mut names: Vec<_> = domains.iter().map(|d| d.name.clone()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), domains.len());
    }

    #[test]
    fn reproducible_under_fixed_seed() {
        let domain = DomainName::parse("stellar.io");
        let a = fallback_similar(&domain, &mut StdRng::seed_from_u64(2));
        let b = fallback_similar(&domain, &mut StdRng::seed_from_u64(2));
        assert_eq!(a, b);
    }
}
