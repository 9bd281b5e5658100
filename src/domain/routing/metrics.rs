//! Interaction outcome metrics and comparative aggregates.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::domain::foundation::Timestamp;

use super::mode::RoutingMode;

/// Default number of records retained in the outcome history.
pub const DEFAULT_METRICS_CAPACITY: usize = 1000;

/// Outcome metrics for one interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeMetrics {
    pub mode: RoutingMode,
    pub response_time_ms: u64,
    pub engagement_depth: f64,
    pub silence_rate: f64,
    pub fallback_triggered: bool,
    pub timestamp: Timestamp,
}

/// Bounded FIFO history of outcome metrics.
///
/// Pushing beyond capacity evicts the oldest record. Never fails.
#[derive(Debug, Clone)]
pub struct MetricsHistory {
    records: VecDeque<ModeMetrics>,
    capacity: usize,
}

impl MetricsHistory {
    /// Creates an empty history. A zero capacity is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a record, returning the evicted one if the buffer was full.
    pub fn push(&mut self, record: ModeMetrics) -> Option<ModeMetrics> {
        let evicted = if self.records.len() >= self.capacity {
            self.records.pop_front()
        } else {
            None
        };
        self.records.push_back(record);
        evicted
    }

    /// Oldest-first copy of the retained records.
    pub fn snapshot(&self) -> Vec<ModeMetrics> {
        self.records.iter().cloned().collect()
    }

    pub fn comparative(&self) -> ComparativeMetrics {
        ComparativeMetrics::from_records(self.records.iter())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl Default for MetricsHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_METRICS_CAPACITY)
    }
}

/// Aggregates for one mode; explicit `NoData` instead of NaN on an empty subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModeAggregates {
    NoData,
    Data {
        samples: usize,
        mean_response_time_ms: f64,
        mean_engagement_depth: f64,
        mean_silence_rate: f64,
        fallback_rate: f64,
    },
}

impl ModeAggregates {
    /// Aggregates the given records, whatever their mode.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ModeMetrics>) -> Self {
        let mut samples = 0usize;
        let mut response_time = 0.0;
        let mut engagement = 0.0;
        let mut silence = 0.0;
        let mut fallbacks = 0usize;

        for record in records {
            samples += 1;
            response_time += record.response_time_ms as f64;
            engagement += record.engagement_depth;
            silence += record.silence_rate;
            if record.fallback_triggered {
                fallbacks += 1;
            }
        }

        if samples == 0 {
            return ModeAggregates::NoData;
        }

        let n = samples as f64;
        ModeAggregates::Data {
            samples,
            mean_response_time_ms: response_time / n,
            mean_engagement_depth: engagement / n,
            mean_silence_rate: silence / n,
            fallback_rate: fallbacks as f64 / n,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ModeAggregates::NoData)
    }

    pub fn samples(&self) -> usize {
        match self {
            ModeAggregates::NoData => 0,
            ModeAggregates::Data { samples, .. } => *samples,
        }
    }
}

/// Side-by-side aggregates for both modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparativeMetrics {
    pub field: ModeAggregates,
    pub hybrid: ModeAggregates,
}

impl ComparativeMetrics {
    pub fn from_records<'a>(records: impl Iterator<Item = &'a ModeMetrics> + Clone) -> Self {
        Self {
            field: ModeAggregates::from_records(
                records.clone().filter(|r| r.mode == RoutingMode::Field),
            ),
            hybrid: ModeAggregates::from_records(records.filter(|r| r.mode == RoutingMode::Hybrid)),
        }
    }

    /// Aggregates for the given mode.
    pub fn for_mode(&self, mode: RoutingMode) -> &ModeAggregates {
        match mode {
            RoutingMode::Field => &self.field,
            RoutingMode::Hybrid => &self.hybrid,
        }
    }
}
