//! Raw match data consumed by the laneiq analysis pipeline.
//!
//! These types describe what the external data-fetch collaborator hands over: one
//! [`RawMatchRecord`] per completed match (newest first) and, optionally, a
//! [`RawTimelineRecord`] with per-minute snapshots for the same match.
//!
//! # Data Structure
//!
//! ```text
//! MatchHistory
//! ├─ matches: Vec<RawMatchRecord>          (newest first)
//! │   ├─ match id, timestamps, duration, team side, win flag
//! │   ├─ player: PlayerStats               (subject)
//! │   └─ opponent: Option<PlayerStats>     (opposing laner)
//! └─ timelines: Vec<RawTimelineRecord>     (paired by match id, may be missing)
//!     └─ frames: Vec<TimelineFrame>
//!         ├─ minute
//!         ├─ player: FrameSnapshot         (gold, xp, position)
//!         └─ opponent: Option<FrameSnapshot>
//! ```
//!
//! # Serialization
//!
//! All types use camelCase JSON field names. Every numeric stat defaults to zero when it is
//! absent, so partially populated records deserialize cleanly; values of the wrong type are
//! rejected at this boundary.
//!
//! ```json
//! {
//!   "matches": [
//!     {
//!       "matchId": "EUW1_1234",
//!       "gameEnd": "2025-01-01T12:30:00Z",
//!       "gameDurationSecs": 1800,
//!       "teamId": 100,
//!       "win": true,
//!       "player": { "kills": 5, "goldEarned": 11000, "challenges": { "soloKills": 2 } },
//!       "opponent": { "kills": 2, "goldEarned": 9000 }
//!     }
//!   ],
//!   "timelines": []
//! }
//! ```

pub use self::{
    history::{HistoryError, MatchEntry, MatchHistory},
    record::{Challenges, InvalidTeamId, PlayerStats, RawMatchRecord, TeamSide},
    source::{MatchHistorySource, UpstreamDataError},
    timeline::{FrameSnapshot, MapPosition, RawTimelineRecord, TimelineFrame},
};

pub mod history;
pub mod record;
pub mod source;
pub mod timeline;
