use chrono::{DateTime, Duration, Utc};
use log::info;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct ScrapingStats {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub total_requests: usize,
    pub successful_requests: usize,
    pub failed_requests: usize,
    pub cache_hits: usize,
    pub bytes_downloaded: usize,
    pub pages_parsed: usize,
    pub records_extracted: usize,
    pub status_codes: HashMap<u16, usize>,
    pub average_response_time: f64, // in milliseconds
}

/// Shared run counters. Clones point at the same numbers.
#[derive(Debug, Clone)]
pub struct StatsTracker {
    stats: Arc<RwLock<ScrapingStats>>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(RwLock::new(ScrapingStats {
                start_time: Utc::now(),
                end_time: None,
                total_requests: 0,
                successful_requests: 0,
                failed_requests: 0,
                cache_hits: 0,
                bytes_downloaded: 0,
                pages_parsed: 0,
                records_extracted: 0,
                status_codes: HashMap::new(),
                average_response_time: 0.0,
            })),
        }
    }

    pub fn record_request(&self, status: u16, size: usize, duration: Duration) {
        let mut stats = self.stats.write();
        stats.total_requests += 1;
        stats.successful_requests += 1;
        *stats.status_codes.entry(status).or_insert(0) += 1;
        stats.bytes_downloaded += size;

        // Averaged over successful requests only.
        let current_total = stats.average_response_time * (stats.successful_requests - 1) as f64;
        let new_duration = duration.num_milliseconds() as f64;
        stats.average_response_time =
            (current_total + new_duration) / stats.successful_requests as f64;
    }

    pub fn record_failure(&self, status: Option<u16>) {
        let mut stats = self.stats.write();
        stats.total_requests += 1;
        stats.failed_requests += 1;
        if let Some(status) = status {
            *stats.status_codes.entry(status).or_insert(0) += 1;
        }
    }

    pub fn record_cache_hit(&self) {
        self.stats.write().cache_hits += 1;
    }

    pub fn record_page(&self, records: usize) {
        let mut stats = self.stats.write();
        stats.pages_parsed += 1;
        stats.records_extracted += records;
    }

    pub fn finish(&self) {
        self.stats.write().end_time = Some(Utc::now());
    }

    pub fn get_stats(&self) -> ScrapingStats {
        self.stats.read().clone()
    }

    pub fn log_summary(&self) {
        let stats = self.stats.read();
        let duration = stats
            .end_time
            .unwrap_or_else(Utc::now)
            .signed_duration_since(stats.start_time);

        info!(
            "Run finished in {} ms: {} requests ({} ok, {} failed, {} cached), {:.2} KB, avg {:.2} ms",
            duration.num_milliseconds(),
            stats.total_requests,
            stats.successful_requests,
            stats.failed_requests,
            stats.cache_hits,
            stats.bytes_downloaded as f64 / 1_000.0,
            stats.average_response_time
        );
        info!(
            "Parsed {} pages into {} records",
            stats.pages_parsed, stats.records_extracted
        );
        for (code, count) in &stats.status_codes {
            info!("  status {}: {}", code, count);
        }
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_counters() {
        let stats = StatsTracker::new();
        let shared = stats.clone();

        shared.record_request(200, 100, Duration::milliseconds(10));
        shared.record_request(200, 50, Duration::milliseconds(30));
        shared.record_failure(Some(503));
        shared.record_cache_hit();
        shared.record_page(25);

        let snapshot = stats.get_stats();
        assert_eq!(snapshot.total_requests, 3);
        assert_eq!(snapshot.successful_requests, 2);
        assert_eq!(snapshot.failed_requests, 1);
        assert_eq!(snapshot.cache_hits, 1);
        assert_eq!(snapshot.bytes_downloaded, 150);
        assert_eq!(snapshot.pages_parsed, 1);
        assert_eq!(snapshot.records_extracted, 25);
        assert_eq!(snapshot.status_codes.get(&200), Some(&2));
        assert_eq!(snapshot.status_codes.get(&503), Some(&1));
        assert!((snapshot.average_response_time - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_finish_sets_end_time() {
        let stats = StatsTracker::new();
        assert!(stats.get_stats().end_time.is_none());
        stats.finish();
        assert!(stats.get_stats().end_time.is_some());
    }
}
