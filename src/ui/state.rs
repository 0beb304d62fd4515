//! Presentation-side buffers fed from snapshots and notable events

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::simulation::events::NotableEvent;
use crate::simulation::snapshot::Snapshot;

/// Most recent notable events, oldest dropped first
#[derive(Debug, Clone)]
pub struct LogBook {
    entries: VecDeque<NotableEvent>,
    capacity: usize,
}

impl LogBook {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, event: NotableEvent) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(event);
    }

    /// Newest first
    pub fn recent(&self) -> impl Iterator<Item = &NotableEvent> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One chart sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorePoint {
    /// Milliseconds since the session started
    pub timestamp: u64,
    pub stock_score: f64,
}

/// Ring buffer of stock-score samples
#[derive(Debug, Clone)]
pub struct ScoreHistory {
    points: VecDeque<ScorePoint>,
    capacity: usize,
}

impl ScoreHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn sample(&mut self, timestamp: u64, snapshot: &Snapshot) {
        if self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(ScorePoint {
            timestamp,
            stock_score: snapshot.stock_score(),
        });
    }

    pub fn points(&self) -> impl Iterator<Item = &ScorePoint> {
        self.points.iter()
    }

    pub fn latest(&self) -> Option<&ScorePoint> {
        self.points.back()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Everything a front end renders besides the snapshot itself
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub log: LogBook,
    pub chart: ScoreHistory,
    /// Display-only advisory text; never fed back into the simulation
    pub headline: String,
}

impl Dashboard {
    pub fn new(log_capacity: usize, chart_capacity: usize) -> Self {
        Self {
            log: LogBook::new(log_capacity),
            chart: ScoreHistory::new(chart_capacity),
            headline: String::new(),
        }
    }
}
