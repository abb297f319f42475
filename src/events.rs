// src/events.rs
// Typed client for the Meridian events endpoint.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};

const USER_AGENT: &str = "meridian-briefs/0.1";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    pub id: i64,
    pub name: String,
}

/// One fetched event. `publish_date` keeps the upstream offset exactly;
/// an absent/null `publishDate` maps to `None`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Event {
    pub id: i64,
    pub source_id: i64,
    pub url: String,
    pub title: String,
    pub publish_date: Option<DateTime<FixedOffset>>,
    pub content: String,
    pub location: String,
    pub relevance: String,
    pub completeness: String,
    pub summary: String,
}

/// Client for `GET /events`. Stateless; one call is one round trip with no
/// retries and no partial-result recovery.
pub struct EventsClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl EventsClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("reqwest client");
        Self {
            http,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.events_base_url, &config.events_token)
    }

    /// Fetch sources and events, optionally filtered by `date`.
    ///
    /// The filter string is appended verbatim as the only query parameter;
    /// no local format validation. Both returned collections preserve
    /// response order.
    pub async fn get_events(&self, date: Option<&str>) -> Result<(Vec<Source>, Vec<Event>)> {
        let mut url = format!("{}/events", self.base_url.trim_end_matches('/'));
        if let Some(d) = date {
            url.push_str("?date=");
            url.push_str(d);
        }

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::RemoteService {
                status,
                detail: body,
            });
        }

        let root: Value = serde_json::from_str(&body)
            .map_err(|e| Error::response_format("/events", format!("body is not JSON: {e}")))?;

        let sources = root
            .get("sources")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                Error::response_format("/events", "`sources` is missing or not an array")
            })?
            .iter()
            .map(parse_source)
            .collect::<Result<Vec<_>>>()?;

        let events = root
            .get("events")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                Error::response_format("/events", "`events` is missing or not an array")
            })?
            .iter()
            .map(parse_event)
            .collect::<Result<Vec<_>>>()?;

        Ok((sources, events))
    }
}

// ------------------------------------------------------------
// Per-record validation
// ------------------------------------------------------------

fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| Error::response_format("/events", format!("{what} entry is not an object")))
}

fn require_i64(obj: &Map<String, Value>, field: &'static str) -> Result<i64> {
    match obj.get(field) {
        Some(v) => v
            .as_i64()
            .ok_or_else(|| Error::validation(field, format!("expected an integer, got {v}"))),
        None => Err(Error::validation(field, "missing required field")),
    }
}

fn require_str(obj: &Map<String, Value>, field: &'static str) -> Result<String> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(v) => Err(Error::validation(field, format!("expected a string, got {v}"))),
        None => Err(Error::validation(field, "missing required field")),
    }
}

fn parse_source(value: &Value) -> Result<Source> {
    let obj = as_object(value, "sources")?;
    Ok(Source {
        id: require_i64(obj, "id")?,
        name: require_str(obj, "name")?,
    })
}

fn parse_event(value: &Value) -> Result<Event> {
    let obj = as_object(value, "events")?;

    let publish_date = match obj.get("publishDate") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(parse_publish_date(s)?),
        Some(v) => {
            return Err(Error::validation(
                "publishDate",
                format!("expected a string or null, got {v}"),
            ))
        }
    };

    Ok(Event {
        id: require_i64(obj, "id")?,
        source_id: require_i64(obj, "sourceId")?,
        url: require_str(obj, "url")?,
        title: require_str(obj, "title")?,
        publish_date,
        content: require_str(obj, "content")?,
        location: require_str(obj, "location")?,
        relevance: require_str(obj, "relevance")?,
        completeness: require_str(obj, "completeness")?,
        summary: require_str(obj, "summary")?,
    })
}

// ------------------------------------------------------------
// Date normalization
// ------------------------------------------------------------

/// Strict ISO-8601 first, permissive fallback second.
///
/// The offset is kept exactly as given; inputs without one are treated as
/// UTC rather than rejected.
pub(crate) fn parse_publish_date(raw: &str) -> Result<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        debug!(raw, strategy = "rfc3339", "parsed publishDate");
        return Ok(dt);
    }
    match parse_permissive(raw) {
        Some(dt) => {
            debug!(raw, strategy = "permissive", "parsed publishDate via fallback");
            Ok(dt)
        }
        None => Err(Error::validation(
            "publishDate",
            format!("unparseable date `{raw}`"),
        )),
    }
}

fn parse_permissive(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset());
    }
    None
}
