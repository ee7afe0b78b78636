//! Crypto Fear and Greed Index client (alternative.me)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

use crate::common::errors::{ClientError, Result};
use crate::common::traits::SentimentSource;
use crate::common::types::SentimentReading;
use crate::config::types::SentimentConfig;

const FNG_PATH: &str = "/fng/";

/// Response from `GET /fng/?limit=1`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FngResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub data: Vec<FngEntry>,
}

/// One index entry; all fields arrive as strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FngEntry {
    pub value: String,
    pub value_classification: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl FngEntry {
    /// Convert to a reading, checking the score lies in 0..=100
    pub fn to_reading(&self) -> Result<SentimentReading> {
        let score: i32 = self.value.trim().parse().map_err(|_| {
            ClientError::InvalidResponse(format!("Invalid index value '{}'", self.value))
        })?;
        if !(0..=100).contains(&score) {
            return Err(ClientError::InvalidResponse(format!(
                "Index value {} outside 0-100",
                score
            )));
        }

        let timestamp = self
            .timestamp
            .as_deref()
            .and_then(|ts| ts.trim().parse::<i64>().ok())
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .unwrap_or_else(Utc::now);

        Ok(SentimentReading {
            score,
            classification: self.value_classification.clone(),
            timestamp,
        })
    }
}

struct CachedReading {
    reading: SentimentReading,
    stored_at: Instant,
}

/// Fear and Greed Index client with a freshness window
pub struct FearGreedClient {
    client: Client,
    base_url: String,
    ttl: Duration,
    cached: Mutex<Option<CachedReading>>,
}

impl FearGreedClient {
    /// Create a client; a zero `ttl` fetches on every call
    pub fn new(base_url: &str, ttl: Duration, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            ttl,
            cached: Mutex::new(None),
        })
    }

    pub fn from_config(config: &SentimentConfig, timeout: Duration) -> Result<Self> {
        Self::new(&config.url, config.cache_ttl(), timeout)
    }

    /// Fetch the latest reading, bypassing the cache
    #[instrument(skip(self))]
    pub async fn fetch(&self) -> Result<SentimentReading> {
        let url = format!("{}{}", self.base_url, FNG_PATH);
        debug!("Fetching sentiment index from: {}", url);

        let response = self.client.get(&url).query(&[("limit", "1")]).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::InvalidResponse(format!(
                "Server returned status {}: {}",
                status, body
            )));
        }

        let parsed: FngResponse = response.json().await?;
        let entry = parsed
            .data
            .first()
            .ok_or_else(|| ClientError::InvalidResponse("Index response has no data".to_string()))?;
        let reading = entry.to_reading()?;

        info!(
            score = reading.score,
            classification = %reading.classification,
            "Fear and Greed Index fetched"
        );
        Ok(reading)
    }

    /// Forget the cached reading
    pub fn invalidate(&self) {
        *self.cached.lock() = None;
    }

    fn fresh(&self) -> Option<SentimentReading> {
        self.cached
            .lock()
            .as_ref()
            .filter(|cached| cached.stored_at.elapsed() < self.ttl)
            .map(|cached| cached.reading.clone())
    }
}

#[async_trait]
impl SentimentSource for FearGreedClient {
    async fn current(&self) -> Result<SentimentReading> {
        if let Some(reading) = self.fresh() {
            debug!(score = reading.score, "Serving cached sentiment reading");
            return Ok(reading);
        }

        let reading = self.fetch().await?;
        if !self.ttl.is_zero() {
            *self.cached.lock() = Some(CachedReading {
                reading: reading.clone(),
                stored_at: Instant::now(),
            });
        }
        Ok(reading)
    }

    fn source_name(&self) -> &'static str {
        "Fear and Greed Index"
    }
}
