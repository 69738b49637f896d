//! The analysis run: history in, [`AnalysisResult`] out.
//!
//! ```text
//! MatchHistorySource::load
//!   → FeatureSchema::extract (per match)
//!   → aggregate ┐ (scoped threads, shared borrows)
//!   → fit_and_score ┘
//!   → drivers::derive
//!   → AnalysisResult
//! ```
//!
//! Nothing is cached between runs; the model is fit from scratch every time.

use std::{
    any::Any,
    sync::mpsc,
    thread::{self, JoinHandle},
    time::Duration,
};

use laneiq_analysis::{
    aggregate::{self, TrendPoint},
    drivers,
    insights::OutcomeSplit,
    playstyle,
};
use laneiq_data::{MatchEntry, MatchHistorySource};
use laneiq_features::{DisplayStats, FeatureSchema, FeatureVector, TerritoryMetrics, TimelineSeries};
use laneiq_training::{ForestSummary, ImportanceMap, ModelScore, TrainError, fit_and_score};

use crate::{
    AnalysisConfig, AnalysisError, AnalysisResult, ModelStatus,
    progress::{self, AnalysisEvent, ProgressReporter},
    result,
};

/// Runs one analysis, reporting progress to `reporter`.
///
/// The terminal event is left to the caller (see [`ProgressReporter::finish`]).
///
/// # Errors
///
/// Fails when the source cannot deliver a valid, non-empty history, when the configuration
/// is invalid, or when the model hits a non-recoverable error. Short and one-sided
/// histories are recovered and flagged in [`AnalysisResult::model_status`].
pub fn analyze<S>(
    source: &S,
    schema: &FeatureSchema,
    config: &AnalysisConfig,
    reporter: &mut ProgressReporter,
) -> Result<AnalysisResult, AnalysisError>
where
    S: MatchHistorySource + ?Sized,
{
    config.aggregate.validate()?;

    reporter.progress("Loading match history", progress::INGESTION);
    let history = source.load()?;
    if history.is_empty() {
        return Err(AnalysisError::NoData);
    }
    let entries = history.entries()?;
    let orphans = history.orphan_timeline_count();
    if orphans > 0 {
        tracing::warn!(orphans, "ignoring timelines without a matching match record");
    }
    tracing::info!(matches = entries.len(), "analyzing match history");

    let Extracted {
        vectors,
        labels,
        mut display,
        incomplete_timelines,
    } = Extracted::new(schema, &entries, reporter);

    reporter.progress("Aggregating history and fitting model", progress::MODELING);
    let sample_weights = config.aggregate.recency.weights(vectors.len());
    let (aggregated, score) = thread::scope(|s| {
        let aggregator = s.spawn(|| {
            aggregate::aggregate(schema, &vectors, &labels, &config.aggregate)
                .map(|(baseline, trend)| (baseline, trend.iter().collect::<Vec<TrendPoint>>()))
        });
        let trainer = s.spawn(|| {
            fit_and_score(
                schema,
                &vectors,
                &labels,
                &sample_weights,
                vectors.first(),
                &config.forest,
            )
        });
        (join(aggregator), join(trainer))
    });
    let (baseline, performance_trends) = aggregated?;
    let record = HistoryRecord::new(&labels);
    let model = ModelOutcome::new(schema, score, record.win_rate)?;

    reporter.progress("Deriving win drivers", progress::DRIVERS);
    let latest_entry = &entries[0];
    let latest = &vectors[0];
    let duration_minutes = latest_entry.record.duration_minutes();
    let opponent = schema.extract_opponent(latest_entry.record, latest_entry.timeline);
    let analysis = drivers::derive(
        schema,
        latest,
        &baseline,
        opponent.as_ref(),
        model.importances.scores(),
        latest_entry.record.win,
        &config.drivers,
    );

    let result = AnalysisResult {
        status: model.status.status(),
        model_status: model.status,
        win_probability: model.win_probability,
        win_rate: record.win_rate,
        total_matches: vectors.len(),
        wins: record.wins,
        losses: record.losses,
        weighted_averages: baseline.to_map(schema),
        latest_features: latest.to_map(schema),
        win_drivers: analysis.win_drivers,
        skill_focus: analysis.skill_gaps,
        performance_trends,
        performance_insights: OutcomeSplit::new(schema, &vectors, &labels),
        player_moods: playstyle::playstyle_tags(schema, &vectors, &labels, &display),
        last_match_stats: display.swap_remove(0),
        enemy_stats: latest_entry
            .record
            .opponent
            .as_ref()
            .map(|opponent| DisplayStats::from_player(opponent, duration_minutes)),
        category_importance: result::category_importance(schema, &model.importances),
        feature_importance: result::feature_importance(&model.importances),
        match_timeline_series: latest_entry
            .timeline
            .map(TimelineSeries::from_timeline)
            .filter(|series| !series.is_empty()),
        territory_metrics: latest_entry.timeline.and_then(|timeline| {
            TerritoryMetrics::from_timeline(timeline, latest_entry.record.team_id)
        }),
        incomplete_timelines,
        forest: model.forest,
    };
    reporter.progress("Done", progress::DONE);
    tracing::info!(
        model_status = ?result.model_status,
        win_probability = result.win_probability,
        drivers = result.win_drivers.len(),
        "analysis complete"
    );
    Ok(result)
}

/// Per-match model inputs, newest first.
struct Extracted {
    vectors: Vec<FeatureVector>,
    labels: Vec<bool>,
    display: Vec<DisplayStats>,
    incomplete_timelines: Vec<String>,
}

impl Extracted {
    fn new(
        schema: &FeatureSchema,
        entries: &[MatchEntry<'_>],
        reporter: &mut ProgressReporter,
    ) -> Self {
        let total = entries.len();
        let mut extracted = Self {
            vectors: Vec::with_capacity(total),
            labels: Vec::with_capacity(total),
            display: Vec::with_capacity(total),
            incomplete_timelines: vec![],
        };
        for (i, entry) in entries.iter().enumerate() {
            let vector = schema.extract(entry.record, entry.timeline);
            if !vector.timeline_complete {
                tracing::debug!(
                    match_id = %vector.match_id,
                    "timeline features fell back to defaults"
                );
                extracted.incomplete_timelines.push(vector.match_id.clone());
            }
            extracted.vectors.push(vector);
            extracted.labels.push(entry.record.win);
            extracted.display.push(DisplayStats::from_player(
                &entry.record.player,
                entry.record.duration_minutes(),
            ));
            reporter.extraction(i + 1, total);
        }
        extracted
    }
}

struct HistoryRecord {
    wins: usize,
    losses: usize,
    win_rate: f32,
}

impl HistoryRecord {
    #[expect(clippy::cast_precision_loss)]
    fn new(labels: &[bool]) -> Self {
        let wins = labels.iter().filter(|w| **w).count();
        let losses = labels.len() - wins;
        let win_rate = if labels.is_empty() {
            0.0
        } else {
            wins as f32 / labels.len() as f32
        };
        Self {
            wins,
            losses,
            win_rate,
        }
    }
}

/// Model score, or the fallback used when no model could be fit.
struct ModelOutcome {
    status: ModelStatus,
    win_probability: f32,
    importances: ImportanceMap,
    forest: Option<ForestSummary>,
}

impl ModelOutcome {
    fn new(
        schema: &FeatureSchema,
        score: Result<ModelScore, TrainError>,
        win_rate: f32,
    ) -> Result<Self, AnalysisError> {
        let (status, win_probability) = match score {
            Ok(score) => {
                return Ok(Self {
                    status: ModelStatus::Fitted,
                    win_probability: score.win_probability,
                    importances: score.importances,
                    forest: Some(score.summary),
                });
            }
            Err(TrainError::InsufficientHistory { required, actual }) => {
                tracing::warn!(
                    required,
                    actual,
                    "history too short to fit a model, using win rate"
                );
                (ModelStatus::InsufficientHistory, win_rate)
            }
            Err(TrainError::DegenerateLabelSet { label }) => {
                tracing::warn!(label, "every match has the same outcome, skipping the model");
                (ModelStatus::DegenerateLabelSet, if label { 1.0 } else { 0.0 })
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            status,
            win_probability,
            importances: ImportanceMap::uniform(schema),
            forest: None,
        })
    }
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    match handle.join() {
        Ok(value) => value,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

/// Runs [`analyze`] on a worker thread and streams its events.
///
/// The stream always ends with exactly one `result` or `error` event.
#[must_use]
pub fn spawn_analysis<S>(source: S, config: AnalysisConfig) -> AnalysisStream
where
    S: MatchHistorySource + 'static,
{
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        let mut reporter = ProgressReporter::new(tx);
        let schema = FeatureSchema::standard();
        let outcome = analyze(&source, &schema, &config, &mut reporter);
        if let Err(err) = &outcome {
            tracing::error!(%err, "analysis failed");
        }
        reporter.finish(outcome);
    });
    AnalysisStream {
        rx,
        handle: Some(handle),
        finished: false,
    }
}

/// Consumer side of a running analysis.
///
/// Yields events until the terminal one. A worker that goes quiet for longer than the
/// receive timeout, or stops without a terminal event, produces a synthetic `error` event.
#[derive(Debug)]
pub struct AnalysisStream {
    rx: mpsc::Receiver<AnalysisEvent>,
    handle: Option<JoinHandle<()>>,
    finished: bool,
}

impl AnalysisStream {
    /// Waits for the next event, blocking indefinitely.
    pub fn recv(&mut self) -> Option<AnalysisEvent> {
        if self.finished {
            return None;
        }
        let event = match self.rx.recv() {
            Ok(event) => event,
            Err(mpsc::RecvError) => self.stopped(),
        };
        Some(self.observe(event))
    }

    /// Waits at most `timeout` for the next event.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<AnalysisEvent> {
        if self.finished {
            return None;
        }
        let event = match self.rx.recv_timeout(timeout) {
            Ok(event) => event,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                tracing::warn!(?timeout, "analysis stalled");
                Self::error(&AnalysisError::Stalled { timeout })
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => self.stopped(),
        };
        Some(self.observe(event))
    }

    fn error(err: &AnalysisError) -> AnalysisEvent {
        AnalysisEvent::Error {
            message: err.to_string(),
        }
    }

    /// The worker hung up without a terminal event; it has dropped its sender, so joining
    /// does not block for long.
    fn stopped(&mut self) -> AnalysisEvent {
        if let Some(handle) = self.handle.take() {
            reap(handle);
        }
        Self::error(&AnalysisError::WorkerStopped)
    }

    fn observe(&mut self, event: AnalysisEvent) -> AnalysisEvent {
        if event.is_terminal() {
            self.finished = true;
            // a stalled worker is left to finish on its own; its events are dropped
            if let Some(handle) = self.handle.take().filter(JoinHandle::is_finished) {
                reap(handle);
            }
        }
        event
    }
}

fn reap(handle: JoinHandle<()>) {
    if let Err(payload) = handle.join() {
        tracing::warn!(panic = panic_message(&*payload), "analysis worker panicked");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

impl Iterator for AnalysisStream {
    type Item = AnalysisEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_from_payload() {
        let payload: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(panic_message(&*payload), "static message");
        let payload: Box<dyn Any + Send> = Box::new(String::from("formatted 42"));
        assert_eq!(panic_message(&*payload), "formatted 42");
        let payload: Box<dyn Any + Send> = Box::new(42_u32);
        assert_eq!(panic_message(&*payload), "unknown panic");
    }
}
