//! Display-ready values derived from match records.
//!
//! Everything here is a pure function of its inputs; the current time is
//! always passed in explicitly except in [`time_ago_now`].

use std::fmt;

use chrono::Utc;

use crate::{
    ARENA_QUEUE_ID, QueueType,
    lol_match::MatchSummary,
    stats::{percentage, round_to},
};

/// KDA of a single game. A zero-death game has no ratio and is shown as
/// `Perfect`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kda {
    Perfect { takedowns: u32 },
    /// `(kills + assists) / deaths`, rounded to 2 decimals.
    Ratio(f64),
}

impl Kda {
    pub fn new(kills: u32, deaths: u32, assists: u32) -> Self {
        if deaths == 0 {
            Kda::Perfect {
                takedowns: kills + assists,
            }
        } else {
            Kda::Ratio(round_to(kda_value(kills, deaths, assists), 2))
        }
    }

    pub fn is_perfect(&self) -> bool {
        matches!(self, Kda::Perfect { .. })
    }

    /// Numeric value, `Perfect` counting as kills + assists.
    pub fn value(&self) -> f64 {
        match self {
            Kda::Perfect { takedowns } => f64::from(*takedowns),
            Kda::Ratio(ratio) => *ratio,
        }
    }

    /// One-decimal label used by scoreboards.
    pub fn short_label(&self) -> String {
        match self {
            Kda::Perfect { .. } => "Perfect".to_string(),
            Kda::Ratio(ratio) => format!("{ratio:.1}"),
        }
    }
}

impl fmt::Display for Kda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kda::Perfect { .. } => f.write_str("Perfect"),
            Kda::Ratio(ratio) => write!(f, "{ratio:.2}"),
        }
    }
}

/// Unrounded KDA with the zero-death case replaced by kills + assists.
pub fn kda_value(kills: u32, deaths: u32, assists: u32) -> f64 {
    let takedowns = f64::from(kills + assists);
    if deaths == 0 {
        takedowns
    } else {
        takedowns / f64::from(deaths)
    }
}

/// Share of the team's kills the player took part in, 0 when the team has
/// no kills.
pub fn kill_participation(kills: u32, assists: u32, team_total_kills: u32) -> u32 {
    percentage(kills + assists, team_total_kills)
}

pub fn creep_score(total_minions_killed: u32, neutral_minions_killed: u32) -> u32 {
    total_minions_killed + neutral_minions_killed
}

/// Arena has no team win flag: a top-4 placement counts as a win.
pub fn is_win(queue_id: u16, placement: u8, win: bool) -> bool {
    if queue_id == ARENA_QUEUE_ID {
        (1..=4).contains(&placement)
    } else {
        win
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceTag {
    Mvp,
    Strong,
    Struggled,
    Balanced,
}

impl PerformanceTag {
    /// Rules are checked in order, the first one matching wins.
    pub fn evaluate(
        kills: u32,
        deaths: u32,
        assists: u32,
        kill_participation: u32,
        win: bool,
    ) -> Option<Self> {
        let kda = kda_value(kills, deaths, assists);
        let kp = kill_participation;

        if kda >= 5.0 && kp >= 60 {
            Some(Self::Mvp)
        } else if kda >= 3.5 || (kda >= 2.5 && kp >= 55) {
            Some(Self::Strong)
        } else if kda < 1.0 || (deaths >= 8 && kda < 1.5) {
            Some(Self::Struggled)
        } else if win && kda >= 1.5 && kp >= 35 {
            Some(Self::Balanced)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerformanceTag::Mvp => "MVP",
            PerformanceTag::Strong => "Strong",
            PerformanceTag::Struggled => "Struggled",
            PerformanceTag::Balanced => "Balanced",
        }
    }
}

impl fmt::Display for PerformanceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MultiKill {
    Double,
    Triple,
    Quadra,
    Penta,
}

impl MultiKill {
    pub fn highest(double: u32, triple: u32, quadra: u32, penta: u32) -> Option<Self> {
        if penta > 0 {
            Some(Self::Penta)
        } else if quadra > 0 {
            Some(Self::Quadra)
        } else if triple > 0 {
            Some(Self::Triple)
        } else if double > 0 {
            Some(Self::Double)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MultiKill::Double => "DOUBLE",
            MultiKill::Triple => "TRIPLE",
            MultiKill::Quadra => "QUADRA",
            MultiKill::Penta => "PENTA",
        }
    }
}

/// `32m 05s`
pub fn format_duration(secs: u64) -> String {
    format!("{}m {:02}s", secs / 60, secs % 60)
}

/// `32:05`
pub fn format_duration_compact(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Coarse elapsed time: minutes under an hour, hours under a day, days
/// otherwise. Timestamps in the future count as `0m ago`.
pub fn time_ago(timestamp_ms: i64, now_ms: i64) -> String {
    let minutes = now_ms.saturating_sub(timestamp_ms).max(0) / 60_000;
    if minutes < 60 {
        return format!("{minutes}m ago");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }

    format!("{}d ago", hours / 24)
}

pub fn time_ago_now(timestamp_ms: i64) -> String {
    time_ago(timestamp_ms, Utc::now().timestamp_millis())
}

pub fn queue_name(queue_id: u16) -> &'static str {
    QueueType::from(queue_id).display_name()
}

/// `1st`, `2nd`, `3rd`, `4th`...
pub fn placement_label(placement: u8) -> String {
    match placement {
        1 => "1st".to_string(),
        2 => "2nd".to_string(),
        3 => "3rd".to_string(),
        n => format!("{n}th"),
    }
}

/// Abbreviate large numbers: 12345 → `12.3k`.
pub fn format_number(n: u64) -> String {
    if n >= 1_000 {
        format!("{:.1}k", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Everything a match history row shows, computed once.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCard {
    pub match_id: String,
    pub champion_name: String,
    pub queue_name: &'static str,
    pub is_win: bool,
    pub outcome: String,
    pub score: String,
    pub kda: Kda,
    pub kill_participation: u32,
    pub creep_score: u32,
    pub performance_tag: Option<PerformanceTag>,
    pub duration: String,
    pub time_ago: String,
}

impl MatchCard {
    pub fn new(summary: &MatchSummary, now_ms: i64) -> Self {
        let is_win = summary.is_win();
        let outcome = if summary.is_arena() && summary.placement > 0 {
            placement_label(summary.placement)
        } else if is_win {
            "Victory".to_string()
        } else {
            "Defeat".to_string()
        };

        Self {
            match_id: summary.match_id.clone(),
            champion_name: summary.champion_name.clone(),
            queue_name: queue_name(summary.queue_id),
            is_win,
            outcome,
            score: format!("{} / {} / {}", summary.kills, summary.deaths, summary.assists),
            kda: summary.kda(),
            kill_participation: summary.kill_participation(),
            creep_score: summary.creep_score(),
            performance_tag: summary.performance_tag(),
            duration: format_duration(summary.game_duration_sec),
            time_ago: time_ago(summary.game_end_timestamp, now_ms),
        }
    }
}
