use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::core::error::{Error, Result};
use crate::core::quote::{Quote, QuoteProvider};

/// Client for the Pseudo Markets SmartQuote endpoint.
pub struct SmartQuoteProvider {
    base_url: String,
    client: reqwest::Client,
}

impl SmartQuoteProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("pfm/0.1")
            .timeout(timeout)
            .build()?;
        Ok(SmartQuoteProvider {
            base_url: base_url.to_string(),
            client,
        })
    }
}

#[async_trait]
impl QuoteProvider for SmartQuoteProvider {
    #[instrument(
        name = "SmartQuoteFetch",
        skip(self),
        fields(symbol = %symbol)
    )]
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote> {
        let url = format!("{}/api/Quotes/SmartQuote/{}", self.base_url, symbol);
        debug!("Requesting quote from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Quote(format!("request failed for symbol {symbol}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Quote(format!(
                "HTTP {} for symbol {}",
                response.status(),
                symbol
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::Quote(format!("failed to read body for symbol {symbol}: {e}")))?;

        if text.trim().is_empty() {
            return Err(Error::Quote(format!("empty response for symbol {symbol}")));
        }

        let quote: Quote = serde_json::from_str(&text)
            .map_err(|e| Error::Quote(format!("malformed quote for symbol {symbol}: {e}")))?;

        debug!(price = quote.price, source = %quote.source, "Received quote");
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server(symbol: &str, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        let request_path = format!("/api/Quotes/SmartQuote/{symbol}");

        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn provider(base_url: &str) -> SmartQuoteProvider {
        SmartQuoteProvider::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_successful_quote_fetch() {
        let mock_response = r#"{
            "symbol": "AAPL",
            "price": 150.65,
            "timestamp": "2025-05-12T15:30:00Z",
            "source": "IEX via Pseudo Markets"
        }"#;

        let mock_server = create_mock_server("AAPL", mock_response).await;
        let result = provider(&mock_server.uri()).fetch_quote("AAPL").await.unwrap();

        assert_eq!(result.symbol, "AAPL");
        assert_eq!(result.price, 150.65);
        assert_eq!(result.source, "IEX via Pseudo Markets");
    }

    #[tokio::test]
    async fn test_quote_api_error_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/Quotes/SmartQuote/AAPL"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let result = provider(&mock_server.uri()).fetch_quote("AAPL").await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "Quote unavailable: HTTP 500 Internal Server Error for symbol AAPL"
        );
    }

    #[tokio::test]
    async fn test_quote_api_malformed_response() {
        let mock_response = r#"{"symbol": "AAPL", "price": "not a number"}"#;
        let mock_server = create_mock_server("AAPL", mock_response).await;

        let result = provider(&mock_server.uri()).fetch_quote("AAPL").await;
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("malformed quote for symbol AAPL")
        );
    }

    #[tokio::test]
    async fn test_quote_api_empty_response() {
        let mock_server = create_mock_server("AAPL", "").await;

        let result = provider(&mock_server.uri()).fetch_quote("AAPL").await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "Quote unavailable: empty response for symbol AAPL"
        );
    }

    #[tokio::test]
    async fn test_unreachable_quote_service() {
        // Nothing is listening on this port.
        let result = provider("http://127.0.0.1:9").fetch_quote("AAPL").await;
        assert!(matches!(result, Err(Error::Quote(_))));
    }
}
