use std::cmp::Ordering;
use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::error::AppError;
use crate::fetch::FetchResult;
use crate::firebase::RemoteStore;
use crate::models::Schedule;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub schedules: Vec<Schedule>,
    /// Children present under the key that could not be read as a schedule.
    pub skipped: usize,
}

/// Reads schedule lists out of a remote store.
#[derive(Clone)]
pub struct RecordStore {
    remote: Arc<dyn RemoteStore>,
}

impl RecordStore {
    pub fn new(remote: Arc<dyn RemoteStore>) -> Self {
        Self { remote }
    }

    pub async fn fetch_report(&self, key: &str) -> Result<FetchReport, AppError> {
        let snapshot = self.remote.get_snapshot(key).await?;
        let report = parse_children(snapshot);
        info!(
            "Fetched {} schedules from {} ({} skipped)",
            report.schedules.len(),
            key,
            report.skipped
        );
        Ok(report)
    }

    pub async fn fetch_all(&self, key: &str) -> FetchResult {
        let outcome = self.fetch_report(key).await.map(|report| report.schedules);
        if let Err(e) = &outcome {
            warn!("Failed to fetch {}: {}", key, e);
        }
        FetchResult::Loading.resolve(outcome)
    }
}

/// Immediate children of a snapshot, in Firebase's default child order.
pub fn children(snapshot: Value) -> Vec<(String, Value)> {
    match snapshot {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| compare_keys(a, b));
            entries
        }
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .filter(|(_, item)| !item.is_null())
            .map(|(i, item)| (i.to_string(), item))
            .collect(),
        _ => Vec::new(),
    }
}

/// Keys that read as 32-bit integers sort first, numerically; the rest follow
/// as plain strings.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    match (integer_key(a), integer_key(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.len().cmp(&b.len())),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn integer_key(key: &str) -> Option<i32> {
    if key.starts_with('+') {
        return None;
    }
    key.parse().ok()
}

pub fn parse_children(snapshot: Value) -> FetchReport {
    let mut schedules = Vec::new();
    let mut skipped = 0;

    for (key, child) in children(snapshot) {
        if !child.is_object() {
            warn!("Skipping child {}: not an object", key);
            skipped += 1;
            continue;
        }
        match serde_json::from_value::<Schedule>(child) {
            Ok(schedule) => schedules.push(schedule),
            Err(e) => {
                warn!("Skipping child {}: {}", key, e);
                skipped += 1;
            }
        }
    }

    FetchReport { schedules, skipped }
}
