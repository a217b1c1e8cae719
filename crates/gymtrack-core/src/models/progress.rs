// ABOUTME: Progress chart aggregation over completed set-exercise rows
// ABOUTME: Date range filter and per (date, client) averages and maxima
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// One completed set-exercise row with the session it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSample {
    /// Session date
    pub date: NaiveDate,
    /// Client who performed it
    pub client_id: Uuid,
    /// Client display name
    pub client_name: String,
    /// Performed weight
    pub actual_weight: Option<f64>,
    /// Performed repetitions
    pub actual_reps: Option<i32>,
}

/// One chart point: a client's performance on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressPoint {
    /// Session date
    pub date: NaiveDate,
    /// Client id
    pub client_id: Uuid,
    /// Client display name
    pub client_name: String,
    /// Mean weight over rows that reported a weight
    pub avg_weight: Option<f64>,
    /// Heaviest weight
    pub max_weight: Option<f64>,
    /// Mean reps over rows that reported reps
    pub avg_reps: Option<f64>,
    /// Sum of reps
    pub total_reps: i64,
    /// Completed rows
    pub sets: usize,
}

/// Inclusive date window for progress queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    /// First day included
    pub start: Option<NaiveDate>,
    /// Last day included
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Build a range; a start without an end runs up to `today`
    #[must_use]
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>, today: NaiveDate) -> Self {
        let end = match (start, end) {
            (Some(_), None) => Some(today),
            (_, end) => end,
        };
        Self { start, end }
    }

    /// True when the window ends before it starts and can match nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start > end)
    }
}

#[derive(Default)]
struct Accumulator {
    client_name: String,
    weight_sum: f64,
    weight_count: u32,
    max_weight: Option<f64>,
    reps_sum: i64,
    reps_count: u32,
    rows: usize,
}

/// Aggregate completed rows into chart points sorted by date, then client name
#[must_use]
pub fn aggregate_progress(samples: &[ProgressSample]) -> Vec<ProgressPoint> {
    let mut buckets: BTreeMap<(NaiveDate, Uuid), Accumulator> = BTreeMap::new();

    for sample in samples {
        let acc = buckets.entry((sample.date, sample.client_id)).or_default();
        if acc.client_name.is_empty() {
            acc.client_name.clone_from(&sample.client_name);
        }
        acc.rows += 1;
        if let Some(weight) = sample.actual_weight {
            acc.weight_sum += weight;
            acc.weight_count += 1;
            acc.max_weight = Some(acc.max_weight.map_or(weight, |m| m.max(weight)));
        }
        if let Some(reps) = sample.actual_reps {
            acc.reps_sum += i64::from(reps);
            acc.reps_count += 1;
        }
    }

    let mut points: Vec<ProgressPoint> = buckets
        .into_iter()
        .map(|((date, client_id), acc)| ProgressPoint {
            date,
            client_id,
            client_name: acc.client_name,
            avg_weight: (acc.weight_count > 0).then(|| acc.weight_sum / f64::from(acc.weight_count)),
            max_weight: acc.max_weight,
            avg_reps: (acc.reps_count > 0).then(|| acc.reps_sum as f64 / f64::from(acc.reps_count)),
            total_reps: acc.reps_sum,
            sets: acc.rows,
        })
        .collect();

    points.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.client_name.cmp(&b.client_name)));
    points
}
