use laneiq_data::{FrameSnapshot, PlayerStats, RawMatchRecord, RawTimelineRecord};

use crate::territory::TerritoryMetrics;

/// A match prepared for feature extraction.
///
/// Holds the raw record and timeline together with values that several feature sources
/// share (duration, territory metrics), so they are computed once per match.
#[derive(Debug, Clone)]
pub struct MatchContext<'a> {
    record: &'a RawMatchRecord,
    timeline: Option<&'a RawTimelineRecord>,
    duration_minutes: f32,
    territory: Option<TerritoryMetrics>,
}

impl<'a> MatchContext<'a> {
    #[must_use]
    pub fn new(record: &'a RawMatchRecord, timeline: Option<&'a RawTimelineRecord>) -> Self {
        let territory =
            timeline.and_then(|timeline| TerritoryMetrics::from_timeline(timeline, record.team_id));
        Self {
            record,
            timeline,
            duration_minutes: record.duration_minutes(),
            territory,
        }
    }

    #[must_use]
    pub fn record(&self) -> &'a RawMatchRecord {
        self.record
    }

    #[must_use]
    pub fn player(&self) -> &'a PlayerStats {
        &self.record.player
    }

    #[must_use]
    pub fn opponent(&self) -> Option<&'a PlayerStats> {
        self.record.opponent.as_ref()
    }

    #[must_use]
    pub fn timeline(&self) -> Option<&'a RawTimelineRecord> {
        self.timeline
    }

    #[must_use]
    pub fn duration_minutes(&self) -> f32 {
        self.duration_minutes
    }

    #[must_use]
    pub fn territory(&self) -> Option<&TerritoryMetrics> {
        self.territory.as_ref()
    }

    /// `value` divided by the match duration in minutes.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn per_minute(&self, value: u32) -> f32 {
        value as f32 / self.duration_minutes
    }

    /// Subject and opponent snapshots at the last frame not after `minute`.
    ///
    /// Returns `None` without a timeline, without a frame at or before `minute`, or when
    /// that frame has no opponent snapshot.
    #[must_use]
    pub fn lane_snapshots_at(&self, minute: u32) -> Option<(&'a FrameSnapshot, &'a FrameSnapshot)> {
        let frame = self.timeline?.frame_at(minute)?;
        Some((&frame.player, frame.opponent.as_ref()?))
    }
}
