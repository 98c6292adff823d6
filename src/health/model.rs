//! Health payload types shared by probes, the aggregator and the HTTP surface.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Status a single target reports about itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Ok,
    #[default]
    #[serde(other)]
    Error,
}

/// Outcome of checking one target.
///
/// Targets written against case-insensitive decoders sometimes send
/// capitalised keys (`"Status"`), so those are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    #[serde(default, alias = "Bot", alias = "BOT")]
    pub bot: String,
    #[serde(default, alias = "Status", alias = "STATUS")]
    pub status: ProbeStatus,
    #[serde(default, alias = "Connected", alias = "CONNECTED")]
    pub connected: bool,
    #[serde(
        default,
        alias = "Uptime",
        alias = "UPTIME",
        skip_serializing_if = "Option::is_none"
    )]
    pub uptime: Option<String>,
    #[serde(
        default,
        alias = "Error",
        alias = "ERROR",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
}

impl ProbeResult {
    /// A normalized failure for `bot`.
    pub fn failure(bot: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            bot: bot.into(),
            status: ProbeStatus::Error,
            connected: false,
            uptime: None,
            error: Some(error.into()),
        }
    }

    /// A target counts as up only when it reports `ok` and is connected.
    pub fn is_up(&self) -> bool {
        self.status == ProbeStatus::Ok && self.connected
    }
}

/// Overall status of one aggregation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateStatus {
    Ok,
    Degraded,
    Error,
}

impl AggregateStatus {
    fn derive(up: usize, total: usize) -> Self {
        if up == total {
            AggregateStatus::Ok
        } else if up == 0 {
            AggregateStatus::Error
        } else {
            AggregateStatus::Degraded
        }
    }
}

/// Summary of one aggregation cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedHealth {
    pub status: AggregateStatus,
    pub all_up: bool,
    pub total: usize,
    pub up: usize,
    pub down: usize,
    pub bots: Vec<ProbeResult>,
    pub checked_at: String,
}

impl AggregatedHealth {
    /// Reduce per-target results, already in target order, into a summary.
    pub fn from_results(bots: Vec<ProbeResult>, checked_at: DateTime<Utc>) -> Self {
        let total = bots.len();
        let up = bots.iter().filter(|b| b.is_up()).count();
        let status = AggregateStatus::derive(up, total);

        Self {
            status,
            all_up: status == AggregateStatus::Ok,
            total,
            up,
            down: total - up,
            bots,
            checked_at: checked_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn healthy(name: &str) -> ProbeResult {
        ProbeResult {
            bot: name.into(),
            status: ProbeStatus::Ok,
            connected: true,
            uptime: Some("3h".into()),
            error: None,
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 30, 5).unwrap()
    }

    #[test]
    fn test_all_up_is_ok() {
        let summary = AggregatedHealth::from_results(vec![healthy("a"), healthy("b")], at());

        assert_eq!(summary.status, AggregateStatus::Ok);
        assert!(summary.all_up);
        assert_eq!((summary.total, summary.up, summary.down), (2, 2, 0));
        assert_eq!(summary.checked_at, "2026-10-18T12:30:05Z");
    }

    #[test]
    fn test_partial_is_degraded() {
        let summary = AggregatedHealth::from_results(
            vec![ProbeResult::failure("a", "connection refused"), healthy("b")],
            at(),
        );

        assert_eq!(summary.status, AggregateStatus::Degraded);
        assert!(!summary.all_up);
        assert_eq!((summary.total, summary.up, summary.down), (2, 1, 1));
    }

    #[test]
    fn test_none_up_is_error() {
        let summary = AggregatedHealth::from_results(
            vec![ProbeResult::failure("a", "x"), ProbeResult::failure("b", "y")],
            at(),
        );

        assert_eq!(summary.status, AggregateStatus::Error);
        assert_eq!((summary.up, summary.down), (0, 2));
    }

    #[test]
    fn test_ok_but_disconnected_counts_as_down() {
        let mut half = healthy("a");
        half.connected = false;

        let summary = AggregatedHealth::from_results(vec![half, healthy("b")], at());

        assert_eq!(summary.status, AggregateStatus::Degraded);
        assert_eq!(summary.up, 1);
    }

    #[test]
    fn test_wire_shape() {
        let summary = AggregatedHealth::from_results(
            vec![healthy("a"), ProbeResult::failure("b", "failed to decode response")],
            at(),
        );
        let value = serde_json::to_value(&summary).unwrap();

        assert_eq!(value["status"], "degraded");
        assert_eq!(value["all_up"], false);
        assert_eq!(value["total"], 2);
        assert_eq!(value["bots"][0]["status"], "ok");
        assert_eq!(value["bots"][0]["uptime"], "3h");
        assert!(value["bots"][0].get("error").is_none());
        assert_eq!(value["bots"][1]["connected"], false);
        assert!(value["bots"][1].get("uptime").is_none());
    }

    #[test]
    fn test_lenient_upstream_decode() {
        let partial: ProbeResult = serde_json::from_str(r#"{"status":"ok","connected":true}"#).unwrap();
        assert!(partial.is_up());
        assert_eq!(partial.bot, "");

        let odd: ProbeResult = serde_json::from_str(r#"{"status":"starting","connected":true}"#).unwrap();
        assert_eq!(odd.status, ProbeStatus::Error);
        assert!(!odd.is_up());
    }

    #[test]
    fn test_capitalised_keys_decode() {
        let title: ProbeResult =
            serde_json::from_str(r#"{"Status":"ok","Bot":"b","Connected":true,"Uptime":"1h"}"#)
                .unwrap();
        assert!(title.is_up());
        assert_eq!(title.bot, "b");
        assert_eq!(title.uptime.as_deref(), Some("1h"));

        let upper: ProbeResult =
            serde_json::from_str(r#"{"STATUS":"error","CONNECTED":false,"ERROR":"down"}"#).unwrap();
        assert_eq!(upper.error.as_deref(), Some("down"));

        // Serialized form stays lowercase.
        let value = serde_json::to_value(&title).unwrap();
        assert_eq!(value["status"], "ok");
        assert!(value.get("Status").is_none());
    }
}
