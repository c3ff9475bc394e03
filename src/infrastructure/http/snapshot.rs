use crate::domain::entities::alert_record::AlertRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::alert_feed::{AlertFeed, BackendStatus, MarketIndices};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

/// HTTP client for the alert backend's REST surface: the alert snapshot,
/// the market-indices header data, and a health probe.
pub struct AlertApi {
    base_url: String,
    client: reqwest::Client,
}

impl AlertApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .user_agent("alertdesk/0.1")
                .build()
                .unwrap_or_default(),
        }
    }
}

/// Wire shape of one alert as the backend emits it, shared by the snapshot
/// endpoint and the SSE stream payloads.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDto {
    pub stock_code: String,
    #[serde(default)]
    pub buy_sell: Option<String>,
    /// The backend serializes price as a string on some paths and a number
    /// on others.
    #[serde(default)]
    pub price: serde_json::Value,
    #[serde(default)]
    pub scan_name: Option<String>,
    pub alert_date: String,
}

impl AlertDto {
    pub fn into_record(self) -> Result<AlertRecord, DomainError> {
        if self.stock_code.trim().is_empty() {
            return Err(DomainError::Parse("empty stockCode".into()));
        }

        let action = self
            .buy_sell
            .as_deref()
            .unwrap_or("BUY")
            .parse()
            .map_err(DomainError::Parse)?;

        let price = parse_price(&self.price)?;
        let timestamp = parse_alert_date(&self.alert_date)?;

        Ok(AlertRecord::new(
            self.stock_code,
            action,
            price,
            self.scan_name.unwrap_or_default(),
            timestamp,
        ))
    }
}

fn parse_price(value: &serde_json::Value) -> Result<f64, DomainError> {
    let price = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match price {
        Some(p) if p.is_finite() && p > 0.0 => Ok(p),
        _ => Err(DomainError::Parse(format!("bad price: {value}"))),
    }
}

fn parse_alert_date(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    // Backend date columns come through without an offset; treat as UTC
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }
    Err(DomainError::Parse(format!("bad alertDate: {raw}")))
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarketIndicesDto {
    #[serde(default)]
    nifty: f64,
    #[serde(default)]
    banknifty: f64,
    #[serde(default)]
    market_open: bool,
    #[serde(default)]
    nifty_change: f64,
    #[serde(default)]
    nifty_change_percent: f64,
    #[serde(default)]
    banknifty_change: f64,
    #[serde(default)]
    banknifty_change_percent: f64,
}

#[async_trait]
impl AlertFeed for AlertApi {
    async fn recent_alerts(&self, limit: usize) -> Result<Vec<AlertRecord>, DomainError> {
        let resp = self
            .client
            .get(format!("{}/api/alerts", self.base_url))
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(DomainError::Network(format!(
                "alert snapshot returned {}",
                resp.status()
            )));
        }

        let dtos: Vec<AlertDto> = resp.json().await?;

        // A malformed entry is dropped and logged, never a batch failure
        Ok(dtos
            .into_iter()
            .filter_map(|dto| match dto.into_record() {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("dropping malformed snapshot alert: {e}");
                    None
                }
            })
            .collect())
    }

    async fn market_indices(&self) -> Result<MarketIndices, DomainError> {
        let resp = self
            .client
            .get(format!("{}/api/indices", self.base_url))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(DomainError::Network(format!(
                "indices returned {}",
                resp.status()
            )));
        }

        let dto: MarketIndicesDto = resp.json().await?;
        Ok(MarketIndices {
            nifty: dto.nifty,
            banknifty: dto.banknifty,
            market_open: dto.market_open,
            nifty_change: dto.nifty_change,
            nifty_change_percent: dto.nifty_change_percent,
            banknifty_change: dto.banknifty_change,
            banknifty_change_percent: dto.banknifty_change_percent,
        })
    }

    async fn health(&self) -> BackendStatus {
        let probe = self
            .client
            .get(format!("{}/api/alerts", self.base_url))
            .query(&[("limit", "1")])
            .send()
            .await;

        match probe {
            Ok(resp) if resp.status().is_success() => BackendStatus::Active,
            _ => BackendStatus::Inactive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::action::Action;

    fn dto(json: &str) -> AlertDto {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_dto_maps_wire_fields() {
        let record = dto(
            r#"{"stockCode":"TCS","buySell":"SELL","price":"3421.50",
                "scanName":"Positional breakdown","alertDate":"2026-08-24T10:15:00Z"}"#,
        )
        .into_record()
        .unwrap();
        assert_eq!(record.symbol, "TCS");
        assert_eq!(record.action, Action::Sell);
        assert_eq!(record.price, 3421.50);
        assert_eq!(record.source, "Positional breakdown");
        assert_eq!(record.id, "TCS_2026-08-24T10:15:00+00:00");
    }

    #[test]
    fn test_missing_buy_sell_defaults_to_buy() {
        let record = dto(
            r#"{"stockCode":"INFY","price":1500.0,"alertDate":"2026-08-24T10:15:00Z"}"#,
        )
        .into_record()
        .unwrap();
        assert_eq!(record.action, Action::Buy);
    }

    #[test]
    fn test_numeric_and_string_prices() {
        assert!(parse_price(&serde_json::json!(12.5)).is_ok());
        assert!(parse_price(&serde_json::json!("12.5")).is_ok());
        assert!(parse_price(&serde_json::json!("not a price")).is_err());
        assert!(parse_price(&serde_json::json!(0)).is_err());
        assert!(parse_price(&serde_json::json!(null)).is_err());
    }

    #[test]
    fn test_naive_alert_date_accepted() {
        assert!(parse_alert_date("2026-08-24T10:15:00").is_ok());
        assert!(parse_alert_date("2026-08-24 10:15:00").is_ok());
        assert!(parse_alert_date("yesterday").is_err());
    }

    #[test]
    fn test_blank_symbol_rejected() {
        let result = dto(r#"{"stockCode":"  ","price":10,"alertDate":"2026-08-24T10:15:00Z"}"#)
            .into_record();
        assert!(result.is_err());
    }
}
