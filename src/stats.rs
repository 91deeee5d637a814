use crate::layout::LayoutConfig;
use crate::models::StatsResponse;
use crate::storage::ResponseStore;
use rand::Rng;

/// Picks the requested day when it has answers, else the most recent day.
pub fn select_day(days: &[String], requested: Option<&str>) -> Option<String> {
    requested
        .map(str::trim)
        .filter(|wanted| days.iter().any(|day| day.as_str() == *wanted))
        .map(str::to_string)
        .or_else(|| days.first().cloned())
}

pub fn build_stats<R: Rng + ?Sized>(
    store: &ResponseStore,
    layout: &LayoutConfig,
    requested: Option<&str>,
    rng: &mut R,
) -> StatsResponse {
    let days = store.list_days();
    let Some(date) = select_day(&days, requested) else {
        return StatsResponse {
            date: None,
            days,
            total: 0,
            tally: Vec::new(),
            bubbles: Vec::new(),
        };
    };

    let tally = store.tally(&date);
    let total = tally.iter().map(|entry| entry.count).sum();
    let bubbles = layout.layout(&tally, rng);

    StatsResponse {
        date: Some(date),
        days,
        total,
        tally,
        bubbles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryBackend, STORAGE_KEY};
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::Arc;

    fn seeded_store(entries: &[(u32, &str)]) -> ResponseStore {
        let store = ResponseStore::new(Arc::new(MemoryBackend::new()), STORAGE_KEY);
        for (day, answer) in entries {
            let now = NaiveDate::from_ymd_opt(2024, 1, *day)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap();
            store.append_at(answer, now).unwrap();
        }
        store
    }

    #[test]
    fn select_day_prefers_known_request() {
        let days = vec!["2024-01-02".to_string(), "2024-01-01".to_string()];
        assert_eq!(select_day(&days, Some("2024-01-01")).as_deref(), Some("2024-01-01"));
        assert_eq!(select_day(&days, Some("2023-12-31")).as_deref(), Some("2024-01-02"));
        assert_eq!(select_day(&days, None).as_deref(), Some("2024-01-02"));
        assert_eq!(select_day(&[], Some("2024-01-01")), None);
    }

    #[test]
    fn stats_for_requested_day() {
        let store = seeded_store(&[(1, "Coffee"), (1, "coffee "), (1, "Tea"), (2, "Water")]);
        let mut rng = StdRng::seed_from_u64(11);
        let stats = build_stats(&store, &LayoutConfig::default(), Some("2024-01-01"), &mut rng);

        assert_eq!(stats.date.as_deref(), Some("2024-01-01"));
        assert_eq!(stats.days, ["2024-01-02", "2024-01-01"]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.tally.len(), 2);
        assert_eq!(stats.tally[0].text, "Coffee");
        assert_eq!(stats.tally[0].count, 2);
        assert_eq!(stats.bubbles.len(), 2);
        assert_eq!(stats.bubbles[0].diameter, 200.0);
        assert_eq!(stats.bubbles[1].diameter, 60.0);
    }

    #[test]
    fn stats_default_to_latest_day() {
        let store = seeded_store(&[(1, "Coffee"), (3, "Tea")]);
        let mut rng = StdRng::seed_from_u64(5);
        let stats = build_stats(&store, &LayoutConfig::default(), None, &mut rng);
        assert_eq!(stats.date.as_deref(), Some("2024-01-03"));
        assert_eq!(stats.total, 1);
    }

    #[test]
    fn stats_without_data_are_empty() {
        let store = seeded_store(&[]);
        let mut rng = StdRng::seed_from_u64(5);
        let stats = build_stats(&store, &LayoutConfig::default(), Some("2024-01-01"), &mut rng);
        assert_eq!(stats.date, None);
        assert!(stats.days.is_empty());
        assert_eq!(stats.total, 0);
        assert!(stats.bubbles.is_empty());
    }
}
