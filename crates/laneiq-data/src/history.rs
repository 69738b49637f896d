use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{record::RawMatchRecord, timeline::RawTimelineRecord};

/// A player's match history as delivered by the data-fetch collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchHistory {
    /// Completed matches, newest first by end time
    pub matches: Vec<RawMatchRecord>,
    /// Timelines for some or all of the matches
    #[serde(default)]
    pub timelines: Vec<RawTimelineRecord>,
}

/// A match record paired with its timeline, if one was delivered.
#[derive(Debug, Clone, Copy)]
pub struct MatchEntry<'a> {
    pub record: &'a RawMatchRecord,
    pub timeline: Option<&'a RawTimelineRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum HistoryError {
    #[display("duplicate match id '{match_id}' in match history")]
    DuplicateMatch { match_id: String },
    #[display("duplicate timeline for match '{match_id}'")]
    DuplicateTimeline { match_id: String },
    #[display(
        "match '{match_id}' ended after the match listed before it; history must be newest-first"
    )]
    NotNewestFirst { match_id: String },
}

impl MatchHistory {
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Pairs every match with its timeline and validates the history.
    ///
    /// Timelines whose match id does not appear in `matches` are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a match id or timeline id appears twice, or if the matches are
    /// not ordered newest-first by end time.
    pub fn entries(&self) -> Result<Vec<MatchEntry<'_>>, HistoryError> {
        let mut timelines = HashMap::with_capacity(self.timelines.len());
        for timeline in &self.timelines {
            if timelines
                .insert(timeline.match_id.as_str(), timeline)
                .is_some()
            {
                return Err(HistoryError::DuplicateTimeline {
                    match_id: timeline.match_id.clone(),
                });
            }
        }

        let mut seen = HashSet::with_capacity(self.matches.len());
        for record in &self.matches {
            if !seen.insert(record.match_id.as_str()) {
                return Err(HistoryError::DuplicateMatch {
                    match_id: record.match_id.clone(),
                });
            }
        }

        if let Some(pair) = self
            .matches
            .windows(2)
            .find(|pair| pair[1].game_end > pair[0].game_end)
        {
            return Err(HistoryError::NotNewestFirst {
                match_id: pair[1].match_id.clone(),
            });
        }

        Ok(self
            .matches
            .iter()
            .map(|record| MatchEntry {
                record,
                timeline: timelines.get(record.match_id.as_str()).copied(),
            })
            .collect())
    }

    /// Number of delivered timelines that do not belong to any listed match.
    #[must_use]
    pub fn orphan_timeline_count(&self) -> usize {
        let ids = self
            .matches
            .iter()
            .map(|m| m.match_id.as_str())
            .collect::<HashSet<_>>();
        self.timelines
            .iter()
            .filter(|t| !ids.contains(t.match_id.as_str()))
            .count()
    }
}
