//! Schema checks for generative-service payloads. The service is an
//! untrusted data source: a missing or mistyped top-level key fails the
//! whole response, while a single bad element is skipped and logged.

use crate::domain::model::{ReportKind, SaleRecord, SimilarDomain};
use crate::utils::error::{ReportError, Result};
use chrono::NaiveDate;
use serde_json::Value;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%B %d, %Y"];

fn parse_sale_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

fn parse_price(value: &Value) -> Option<u64> {
    let price = value.as_f64()?;
    if price.is_finite() && price >= 0.0 {
        Some(price.round() as u64)
    } else {
        None
    }
}

/// Requires a `sales` array. Elements that fail date or price coercion are
/// dropped rather than failing the response. Output is sorted by date
/// descending regardless of input order.
pub fn validate_sales(payload: &Value) -> Result<Vec<SaleRecord>> {
    let sales = payload
        .get("sales")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ReportError::malformed(ReportKind::SalesHistory, "missing or non-array 'sales' key")
        })?;

    let mut records = Vec::with_capacity(sales.len());
    for entry in sales {
        let date = entry
            .get("date")
            .and_then(Value::as_str)
            .and_then(parse_sale_date);
        let price = entry.get("price").and_then(parse_price);

        match (date, price) {
            (Some(date), Some(price)) => records.push(SaleRecord { date, price }),
            _ => tracing::debug!("skipping unparsable sale entry: {}", entry),
        }
    }

    records.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(records)
}

/// Requires a `domains` array; an empty one is a legitimate zero-result.
/// Output is sorted by price descending.
pub fn validate_similar(payload: &Value) -> Result<Vec<SimilarDomain>> {
    let domains = payload
        .get("domains")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ReportError::malformed(
                ReportKind::SimilarDomains,
                "missing or non-array 'domains' key",
            )
        })?;

    let mut records = Vec::with_capacity(domains.len());
    for entry in domains {
        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty());
        let price = entry.get("price").and_then(parse_price);

        match (name, price) {
            (Some(name), Some(price)) => records.push(SimilarDomain {
                name: name.to_string(),
                price,
            }),
            _ => tracing::debug!("skipping unparsable similar-domain entry: {}", entry),
        }
    }

    records.sort_by(|a, b| b.price.cmp(&a.price));
    Ok(records)
}

/// Narrative kinds only need non-empty text content.
pub fn validate_narrative(kind: ReportKind, payload: &Value) -> Result<String> {
    payload
        .get("content")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ReportError::malformed(kind, "missing or empty 'content'"))
}

/// Branding responses carry a URL the core does not inspect beyond presence.
pub fn validate_image(payload: &Value) -> Result<String> {
    payload
        .get("imageUrl")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| ReportError::malformed(ReportKind::Branding, "missing or empty 'imageUrl'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sales_round_trip_preserves_values() {
        let payload = json!({
            "sales": [
                {"date": "2019-03-01", "price": 1200},
                {"date": "2023-11-15", "price": 4800.0}
            ]
        });

        let records = validate_sales(&payload).unwrap();
        assert_eq!(records.len(), 2);
        // Sorted most recent first.
        assert_eq!(records[0].price, 4800);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2023, 11, 15).unwrap());
        assert_eq!(records[1].price, 1200);
    }

    #[test]
    fn sales_accepts_long_date_format() {
        let payload = json!({"sales": [{"date": "March 1, 2019", "price": 500}]});
        let records = validate_sales(&payload).unwrap();
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2019, 3, 1).unwrap());
    }

    #[test]
    fn bad_sale_elements_are_skipped_not_fatal() {
        let payload = json!({
            "sales": [
                {"date": "not a date", "price": 100},
                {"date": "2020-06-01", "price": -5},
                {"date": "2020-06-01", "price": 750}
            ]
        });
        let records = validate_sales(&payload).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price, 750);
    }

    #[test]
    fn missing_sales_key_fails_whole_response() {
        let err = validate_sales(&json!({"records": []})).unwrap_err();
        assert!(err.is_recoverable());

        let err = validate_sales(&json!({"sales": "none"})).unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn empty_domains_array_is_valid() {
        let records = validate_similar(&json!({"domains": []})).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn similar_domains_sorted_by_price_descending() {
        let payload = json!({
            "domains": [
                {"name": "cheap.net", "price": 300},
                {"name": "mid.io", "price": 2000},
                {"name": "top.com", "price": 9000}
            ]
        });
        let records = validate_similar(&payload).unwrap();
        let prices: Vec<u64> = records.iter().map(|d| d.price).collect();
        assert_eq!(prices, vec![9000, 2000, 300]);
    }

    #[test]
    fn missing_domains_key_is_malformed() {
        let err = validate_similar(&json!({})).unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn narrative_requires_content() {
        assert!(validate_narrative(ReportKind::Basic, &json!({"content": "analysis"})).is_ok());
        assert!(validate_narrative(ReportKind::Basic, &json!({"content": "  "})).is_err());
        assert!(validate_narrative(ReportKind::Basic, &json!({})).is_err());
    }

    #[test]
    fn image_url_presence_only() {
        assert_eq!(
            validate_image(&json!({"imageUrl": "https://img.example/x.png"})).unwrap(),
            "https://img.example/x.png"
        );
        assert!(validate_image(&json!({"imageUrl": ""})).is_err());
    }
}
