//! Aggregation of the prediction log into the history summary.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::{Category, PredictionRecord};

/// Number of entries shown under "Últimas 5 Predicciones".
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySummary {
    /// Every category, zero-initialised, in severity order
    pub counts: BTreeMap<Category, usize>,
    pub total: usize,
    /// Most recent first
    pub recent: Vec<PredictionRecord>,
}

impl HistorySummary {
    pub fn count(&self, category: Category) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Summarize the full log, given in append order.
pub fn summarize(records: &[PredictionRecord]) -> HistorySummary {
    let mut counts: BTreeMap<Category, usize> = Category::ALL.iter().map(|c| (*c, 0)).collect();
    for record in records {
        *counts.entry(record.categoria).or_insert(0) += 1;
    }

    let recent = records.iter().rev().take(RECENT_LIMIT).cloned().collect();

    HistorySummary {
        counts,
        total: records.len(),
        recent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PredictionInput;
    use chrono::{TimeZone, Utc};

    fn record(seq: i64, pcr: f64, categoria: Category) -> PredictionRecord {
        let fecha = Utc.timestamp_opt(1_700_000_000 + seq, 0).unwrap();
        PredictionRecord::at(
            fecha,
            PredictionInput {
                pcr,
                fc: 80.0,
                edad: 30.0,
            },
            categoria,
        )
    }

    #[test]
    fn test_empty_log() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert!(summary.recent.is_empty());
        assert!(summary.is_empty());
        assert_eq!(summary.counts.len(), Category::ALL.len());
        assert!(summary.counts.values().all(|&n| n == 0));
        // repeated empty reads agree
        assert_eq!(summary, summarize(&[]));
    }

    #[test]
    fn test_fewer_than_limit_returns_all_newest_first() {
        let records = vec![
            record(0, 1.0, Category::NoEnfermo),
            record(1, 2.0, Category::Leve),
            record(2, 3.0, Category::Leve),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.recent.len(), 3);
        let pcrs: Vec<f64> = summary.recent.iter().map(|r| r.pcr).collect();
        assert_eq!(pcrs, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_more_than_limit_keeps_last_five() {
        let records: Vec<_> = (0..8)
            .map(|i| record(i, i as f64, Category::Aguda))
            .collect();
        let summary = summarize(&records);
        assert_eq!(summary.recent.len(), RECENT_LIMIT);
        let pcrs: Vec<f64> = summary.recent.iter().map(|r| r.pcr).collect();
        assert_eq!(pcrs, vec![7.0, 6.0, 5.0, 4.0, 3.0]);
        // counts still cover the whole log
        assert_eq!(summary.count(Category::Aguda), 8);
        assert_eq!(summary.total, 8);
    }

    #[test]
    fn test_counts_by_category() {
        let records = vec![
            record(0, 1.0, Category::Terminal),
            record(1, 1.0, Category::Leve),
            record(2, 1.0, Category::Terminal),
            record(3, 1.0, Category::Cronica),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.count(Category::Terminal), 2);
        assert_eq!(summary.count(Category::Leve), 1);
        assert_eq!(summary.count(Category::Cronica), 1);
        assert_eq!(summary.count(Category::Aguda), 0);
        assert_eq!(summary.counts.values().sum::<usize>(), summary.total);
    }

    #[test]
    fn test_ordering_follows_append_not_timestamp() {
        // clock skew: the later row carries an older timestamp
        let records = vec![record(10, 1.0, Category::Leve), record(0, 2.0, Category::Leve)];
        let summary = summarize(&records);
        assert_eq!(summary.recent[0].pcr, 2.0);
    }
}
