//! Adapters for the external generative analysis service. The HTTP adapter
//! speaks the OpenAI-compatible chat/image API; the offline adapter returns
//! empty payloads so every kind is served by the local fallback path.

use crate::domain::model::ReportKind;
use crate::domain::ports::AnalysisService;
use crate::utils::error::{ReportError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

pub struct HttpAnalysisService {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl HttpAnalysisService {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        }
    }

    fn prompts(domain: &str, kind: ReportKind) -> (String, String) {
        match kind {
            ReportKind::Basic => (
                "You are a domain name analysis expert with extensive knowledge of domain \
                 valuation, marketability, and business potential."
                    .to_string(),
                format!(
                    "Provide a basic analysis of the domain name \"{domain}\". Include overall \
                     impression and potential use cases, marketability assessment, a value \
                     estimation range in USD, and key strengths and weaknesses."
                ),
            ),
            ReportKind::Detailed => (
                "You are an expert in domain name valuation, branding, and digital marketing. \
                 Provide detailed, data-driven analysis with specific recommendations."
                    .to_string(),
                format!(
                    "Generate a comprehensive analysis for the domain \"{domain}\": market \
                     analysis and relevant industries, comparison with similar domains, SEO and \
                     keyword opportunities, branding potential and target audience, investment \
                     outlook, and a development or selling strategy."
                ),
            ),
            ReportKind::SalesHistory => (
                "You are a domain name sales history database. Generate a plausible, realistic \
                 sales history for the given domain based on its length, keywords and TLD. \
                 Respond ONLY with JSON data."
                    .to_string(),
                format!(
                    "Generate a plausible sales history for the domain name \"{domain}\" as \
                     JSON: {{\"sales\": [{{\"date\": \"YYYY-MM-DD\", \"price\": number}}]}}. \
                     Include between 0 and 5 sales depending on how likely this domain would \
                     have sold before. Dates must be in the past; more recent sales may price \
                     higher to show appreciation."
                ),
            ),
            ReportKind::SimilarDomains => (
                "You are a domain name suggestion API that finds similar, available and \
                 relevant domain names with realistic pricing. Respond ONLY with JSON data."
                    .to_string(),
                format!(
                    "Generate 8-12 domains similar to \"{domain}\" as JSON: {{\"domains\": \
                     [{{\"name\": \"domain-name.tld\", \"price\": number}}]}}. Mix alternate \
                     TLDs, logical variations and brandable alternatives; shorter names and \
                     premium TLDs price higher."
                ),
            ),
            // Branding goes through the image endpoint, not chat.
            ReportKind::Branding => (String::new(), String::new()),
        }
    }

    fn expects_json(kind: ReportKind) -> bool {
        matches!(kind, ReportKind::SalesHistory | ReportKind::SimilarDomains)
    }

    async fn chat_completion(&self, domain: &str, kind: ReportKind) -> Result<Value> {
        let (system, user) = Self::prompts(domain, kind);
        let mut body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "temperature": 0.7,
        });
        if Self::expects_json(kind) {
            body["response_format"] = json!({"type": "json_object"});
        }

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::upstream(kind, format!("HTTP {}", status)));
        }

        let reply: Value = response.json().await?;
        let content = reply
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .ok_or_else(|| ReportError::upstream(kind, "response carried no message content"))?;

        if Self::expects_json(kind) {
            serde_json::from_str(content).map_err(|e| {
                ReportError::malformed(kind, format!("content is not valid JSON: {}", e))
            })
        } else {
            Ok(json!({ "content": content }))
        }
    }

    async fn image_generation(&self, domain: &str) -> Result<Value> {
        let kind = ReportKind::Branding;
        let brand = domain.split('.').next().unwrap_or(domain);
        let body = json!({
            "model": "dall-e-3",
            "prompt": format!(
                "Create a modern, professional logo for a brand called \"{brand}\". Minimal, \
                 memorable, works at different sizes, clean contemporary font, no text other \
                 than the brand name, white background, no borders."
            ),
            "n": 1,
            "size": "1024x1024",
        });

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::upstream(kind, format!("HTTP {}", status)));
        }

        let reply: Value = response.json().await?;
        let url = reply
            .pointer("/data/0/url")
            .and_then(Value::as_str)
            .ok_or_else(|| ReportError::upstream(kind, "response carried no image URL"))?;

        Ok(json!({ "imageUrl": url }))
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn fetch_payload(&self, domain: &str, kind: ReportKind) -> Result<Value> {
        tracing::debug!("requesting {} payload for {}", kind, domain);
        match kind {
            ReportKind::Branding => self.image_generation(domain).await,
            _ => self.chat_completion(domain, kind).await,
        }
    }
}

/// No-network adapter. Every payload comes back empty, which fails schema
/// validation and hands each kind to the scoring-engine fallback; Branding
/// has no local substitute and surfaces as errored.
pub struct OfflineAnalysis;

#[async_trait]
impl AnalysisService for OfflineAnalysis {
    async fn fetch_payload(&self, domain: &str, kind: ReportKind) -> Result<Value> {
        tracing::debug!("offline mode: serving empty {} payload for {}", kind, domain);
        Ok(Value::Object(Default::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn completion_body(content: &str) -> Value {
        json!({"choices": [{"message": {"role": "assistant", "content": content}}]})
    }

    #[tokio::test]
    async fn narrative_content_is_wrapped() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer test-key");
            then.status(200).json_body(completion_body("a strong, brandable name"));
        });

        let service =
            HttpAnalysisService::new(server.base_url(), "test-key".into(), "gpt-4o".into());
        let payload = service
            .fetch_payload("example.com", ReportKind::Basic)
            .await
            .unwrap();

        mock.assert();
        assert_eq!(payload["content"], "a strong, brandable name");
    }

    #[tokio::test]
    async fn structured_content_is_parsed_as_json() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .json_body(completion_body(r#"{"sales": [{"date": "2021-05-01", "price": 1500}]}"#));
        });

        let service =
            HttpAnalysisService::new(server.base_url(), "test-key".into(), "gpt-4o".into());
        let payload = service
            .fetch_payload("example.com", ReportKind::SalesHistory)
            .await
            .unwrap();
        assert_eq!(payload["sales"][0]["price"], 1500);
    }

    #[tokio::test]
    async fn unparseable_structured_content_is_malformed_not_fatal() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(completion_body("sorry, I cannot do that"));
        });

        let service =
            HttpAnalysisService::new(server.base_url(), "test-key".into(), "gpt-4o".into());
        let err = service
            .fetch_payload("example.com", ReportKind::SimilarDomains)
            .await
            .unwrap_err();
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn http_failure_is_an_upstream_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(500);
        });

        let service =
            HttpAnalysisService::new(server.base_url(), "test-key".into(), "gpt-4o".into());
        let err = service
            .fetch_payload("example.com", ReportKind::Basic)
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::UpstreamError { .. }));
    }

    #[tokio::test]
    async fn image_endpoint_yields_image_url_payload() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/images/generations");
            then.status(200)
                .json_body(json!({"data": [{"url": "https://img.example/logo.png"}]}));
        });

        let service =
            HttpAnalysisService::new(server.base_url(), "test-key".into(), "gpt-4o".into());
        let payload = service
            .fetch_payload("example.com", ReportKind::Branding)
            .await
            .unwrap();
        assert_eq!(payload["imageUrl"], "https://img.example/logo.png");
    }
}
