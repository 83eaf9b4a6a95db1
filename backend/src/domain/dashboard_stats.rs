//! Today's dashboard totals.
//!
//! "Today" runs from local midnight of the clock's current date up to now and
//! is re-evaluated on every load. Totals are recomputed from scratch from the
//! rows the store returns; nothing is accumulated between loads. Every load
//! pulls the whole day's rows, which is fine while daily volume stays small.

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use shared::{DashboardStats, StoredEntry};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::clock::Clock;
use crate::domain::errors::FetchError;
use crate::storage::{ServiceStore, StoreError};

/// What the "active staff" card counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveStaffMetric {
    /// Size of the roster at fetch time, whether or not they worked today
    #[default]
    RosterSize,
    /// Distinct staff names among today's entries
    StaffWithEntries,
}

/// Pure aggregation over today's entries
pub fn compute(entries: &[StoredEntry], roster: &[String], metric: ActiveStaffMetric) -> DashboardStats {
    let (cash_total, digital_total) = entries.iter().fold((0.0, 0.0), |(cash, digital), e| {
        (cash + e.entry.payment.cash, digital + e.entry.payment.digital_total())
    });

    let active_staff = match metric {
        ActiveStaffMetric::RosterSize => roster.len(),
        ActiveStaffMetric::StaffWithEntries => entries
            .iter()
            .map(|e| e.entry.staff_name.as_str())
            .collect::<BTreeSet<_>>()
            .len(),
    };

    DashboardStats {
        today_entries: entries.len(),
        cash_total,
        digital_total,
        active_staff,
    }
}

/// Holds the latest stats snapshot and refreshes it from the store
pub struct DashboardStatsAggregator {
    store: Arc<dyn ServiceStore>,
    clock: Arc<dyn Clock>,
    metric: ActiveStaffMetric,
    stats: DashboardStats,
    loading: bool,
}

impl DashboardStatsAggregator {
    pub fn new(store: Arc<dyn ServiceStore>, clock: Arc<dyn Clock>, metric: ActiveStaffMetric) -> Self {
        Self {
            store,
            clock,
            metric,
            stats: DashboardStats::default(),
            loading: false,
        }
    }

    pub fn stats(&self) -> DashboardStats {
        self.stats
    }

    pub fn metric(&self) -> ActiveStaffMetric {
        self.metric
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Mark a load as started and return the start of today's window
    pub fn begin_load(&mut self) -> DateTime<Utc> {
        self.loading = true;
        self.clock.today_start()
    }

    /// Recompute from a fetch result; on failure keep the previous snapshot
    pub fn apply_load(
        &mut self,
        result: Result<Vec<StoredEntry>, StoreError>,
        roster: &[String],
    ) -> Result<DashboardStats, FetchError> {
        self.loading = false;
        match result {
            Ok(entries) => {
                self.stats = compute(&entries, roster, self.metric);
                info!(
                    "Stats refreshed: {} entries, cash {:.2}, digital {:.2}, active staff {}",
                    self.stats.today_entries,
                    self.stats.cash_total,
                    self.stats.digital_total,
                    self.stats.active_staff
                );
                Ok(self.stats)
            }
            Err(err) => {
                warn!("Error fetching today's entries, keeping previous stats: {}", err);
                Err(FetchError::Entries(err))
            }
        }
    }

    /// Fetch today's entries and recompute
    pub async fn load(&mut self, roster: &[String]) -> Result<DashboardStats, FetchError> {
        let since = self.begin_load();
        let store = Arc::clone(&self.store);
        let result = store.list_entries_since(since).await;
        self.apply_load(result, roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use chrono::Duration;
    use crate::storage::InMemoryStore;
    use shared::{NewServiceEntry, PaymentBreakdown};

    fn entry(staff: &str, payment: PaymentBreakdown) -> NewServiceEntry {
        NewServiceEntry {
            bill_no: "B".to_string(),
            customer_name: "Customer".to_string(),
            phone_no: String::new(),
            staff_name: staff.to_string(),
            in_time: "10:00".to_string(),
            out_time: String::new(),
            payment,
            remarks: String::new(),
        }
    }

    fn stored(staff: &str, payment: PaymentBreakdown) -> StoredEntry {
        StoredEntry {
            id: "id".to_string(),
            entry: entry(staff, payment),
            created_at: Utc::now(),
        }
    }

    fn roster() -> Vec<String> {
        vec!["Anita".to_string(), "Meera".to_string(), "Zara".to_string()]
    }

    #[test]
    fn test_compute_totals() {
        let entries = vec![
            stored(
                "Anita",
                PaymentBreakdown { cash: 100.0, card: 0.0, gpay: 0.0, upi: 0.0 },
            ),
            stored(
                "Anita",
                PaymentBreakdown { cash: 0.0, card: 50.0, gpay: 25.0, upi: 25.0 },
            ),
        ];

        let stats = compute(&entries, &roster(), ActiveStaffMetric::RosterSize);

        assert_eq!(stats.today_entries, 2);
        assert_eq!(stats.cash_total, 100.0);
        assert_eq!(stats.digital_total, 100.0);
        assert_eq!(stats.active_staff, 3);

        let stats = compute(&entries, &roster(), ActiveStaffMetric::StaffWithEntries);
        assert_eq!(stats.active_staff, 1);
    }

    #[test]
    fn test_compute_empty() {
        let stats = compute(&[], &[], ActiveStaffMetric::RosterSize);
        assert_eq!(stats, DashboardStats::default());
    }

    #[tokio::test]
    async fn test_load_counts_only_today() {
        let clock = Arc::new(FixedClock::at("2026-10-19T14:05:00+05:30").unwrap());
        let store = InMemoryStore::new();
        let midnight = clock.today_start();

        store.seed_entry(
            entry("Anita", PaymentBreakdown { cash: 999.0, ..Default::default() }),
            midnight - Duration::minutes(1),
        );
        store.seed_entry(
            entry("Anita", PaymentBreakdown { cash: 100.0, ..Default::default() }),
            midnight,
        );
        store.seed_entry(
            entry("Meera", PaymentBreakdown { card: 50.0, gpay: 25.0, upi: 25.0, ..Default::default() }),
            midnight + Duration::hours(3),
        );

        let mut aggregator =
            DashboardStatsAggregator::new(Arc::new(store), clock, ActiveStaffMetric::StaffWithEntries);
        let stats = aggregator.load(&roster()).await.unwrap();

        assert_eq!(stats.today_entries, 2);
        assert_eq!(stats.cash_total, 100.0);
        assert_eq!(stats.digital_total, 100.0);
        assert_eq!(stats.active_staff, 2);
        assert_eq!(aggregator.stats(), stats);
        assert!(!aggregator.is_loading());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_snapshot() {
        let clock = Arc::new(FixedClock::at("2026-10-19T14:05:00+05:30").unwrap());
        let store = InMemoryStore::new();
        store.seed_entry(
            entry("Anita", PaymentBreakdown { cash: 40.0, ..Default::default() }),
            clock.today_start(),
        );
        let mut aggregator =
            DashboardStatsAggregator::new(Arc::new(store.clone()), clock, ActiveStaffMetric::RosterSize);
        let first = aggregator.load(&roster()).await.unwrap();

        store.set_fail_reads(true);
        let err = aggregator.load(&roster()).await.unwrap_err();

        assert!(matches!(err, FetchError::Entries(_)));
        assert_eq!(aggregator.stats(), first);
    }
}
