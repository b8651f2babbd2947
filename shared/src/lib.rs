//! Shared domain types and pure match logic used by every matchlens component.
//!
//! Nothing in this crate performs I/O: the backend client lives in
//! `matchlens-backend-api` and the orchestration in the root crate.

use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub mod assets;
pub mod display;
pub mod errors;
pub mod lol_match;
pub mod stats;

use errors::InvalidRegion;

/// Queue id of the Arena game mode (8 duos, placement based).
pub const ARENA_QUEUE_ID: u16 = 1700;

/// User-facing regions accepted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Region {
    Na,
    Euw,
    Kr,
    Jp,
    Br,
    Oce,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Na,
        Region::Euw,
        Region::Kr,
        Region::Jp,
        Region::Br,
        Region::Oce,
    ];

    /// Value sent as the `region` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Na => "NA",
            Region::Euw => "EUW",
            Region::Kr => "KR",
            Region::Jp => "JP",
            Region::Br => "BR",
            Region::Oce => "OCE",
        }
    }

    /// Regional routing value (account-v1, match-v5).
    pub fn routing(&self) -> &'static str {
        match self {
            Region::Na | Region::Br | Region::Oce => "americas",
            Region::Euw => "europe",
            Region::Kr | Region::Jp => "asia",
        }
    }

    /// Platform routing value (summoner-v4, league-v4).
    pub fn platform(&self) -> &'static str {
        match self {
            Region::Na => "na1",
            Region::Euw => "euw1",
            Region::Kr => "kr",
            Region::Jp => "jp1",
            Region::Br => "br1",
            Region::Oce => "oc1",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = InvalidRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NA" | "NA1" => Ok(Region::Na),
            "EUW" | "EUW1" => Ok(Region::Euw),
            "KR" => Ok(Region::Kr),
            "JP" | "JP1" => Ok(Region::Jp),
            "BR" | "BR1" => Ok(Region::Br),
            "OCE" | "OC1" => Ok(Region::Oce),
            _ => Err(InvalidRegion(s.to_string())),
        }
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.as_str().to_string()
    }
}

impl TryFrom<String> for Region {
    type Error = InvalidRegion;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueType {
    /// Ranked Solo/Duo
    SoloDuo,
    /// Ranked Flex
    Flex,
    /// 5v5 Howling Abyss ARAM
    Aram,
    /// 2v2v2v2v2v2v2v2 Arena
    Arena,
    Normal,
}

impl From<u16> for QueueType {
    fn from(value: u16) -> Self {
        match value {
            420 => Self::SoloDuo,
            440 => Self::Flex,
            450 => Self::Aram,
            ARENA_QUEUE_ID => Self::Arena,
            _ => Self::Normal,
        }
    }
}

impl QueueType {
    pub fn display_name(&self) -> &'static str {
        match self {
            QueueType::SoloDuo => "Ranked Solo/Duo",
            QueueType::Flex => "Ranked Flex",
            QueueType::Aram => "ARAM",
            QueueType::Arena => "Arena",
            QueueType::Normal => "Normal",
        }
    }
}

/// A resolved Riot account. `puuid` is the only stable key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
    #[serde(default)]
    pub profile_icon_id: Option<u32>,
}

impl Account {
    /// `GameName#TAG`, for display only.
    pub fn riot_id(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line)
    }
}

pub const SOLO_QUEUE_TYPE: &str = "RANKED_SOLO_5x5";
pub const FLEX_QUEUE_TYPE: &str = "RANKED_FLEX_SR";

const APEX_TIERS: [&str; 3] = ["MASTER", "GRANDMASTER", "CHALLENGER"];

/// Standing of an account in one ranked queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub queue_type: String,
    pub tier: String,
    pub rank: String,
    pub league_points: u32,
    pub wins: u32,
    pub losses: u32,
}

impl RankedEntry {
    pub fn is_ranked_solo_duo(&self) -> bool {
        self.queue_type.eq(SOLO_QUEUE_TYPE)
    }

    pub fn is_ranked_flex(&self) -> bool {
        self.queue_type.eq(FLEX_QUEUE_TYPE)
    }

    /// Short queue label, `None` for queues that are not displayed.
    pub fn queue_label(&self) -> Option<&'static str> {
        match self.queue_type.as_str() {
            SOLO_QUEUE_TYPE => Some("Solo/Duo"),
            FLEX_QUEUE_TYPE => Some("Flex"),
            _ => None,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn win_rate(&self) -> u32 {
        stats::percentage(self.wins, self.total_games())
    }

    pub fn is_apex(&self) -> bool {
        APEX_TIERS.contains(&self.tier.to_uppercase().as_str())
    }

    /// `Gold II`, or just `Master` for apex tiers which have no division.
    pub fn display_tier(&self) -> String {
        let mut chars = self.tier.chars();
        let tier = match chars.next() {
            Some(first) => format!("{first}{}", chars.as_str().to_lowercase()),
            None => String::new(),
        };

        if self.is_apex() {
            tier
        } else {
            format!("{tier} {}", self.rank)
        }
    }
}

/// Entries worth a badge, Solo/Duo first. Empty means "Unranked".
pub fn ranked_badges(entries: &[RankedEntry]) -> Vec<&RankedEntry> {
    let mut badges: Vec<&RankedEntry> = entries
        .iter()
        .filter(|e| e.queue_label().is_some())
        .collect();
    badges.sort_by_key(|e| !e.is_ranked_solo_duo());
    badges
}

/// A player bookmarked on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritePlayer {
    pub id: i64,
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
    pub region: String,
    pub saved_at: NaiveDateTime,
}

impl FavoritePlayer {
    pub fn region(&self) -> Result<Region, InvalidRegion> {
        self.region.parse()
    }
}

/// Body of a favorite creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFavorite {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
    pub region: Region,
}

impl NewFavorite {
    pub fn for_account(account: &Account, region: Region) -> Self {
        Self {
            puuid: account.puuid.clone(),
            game_name: account.game_name.clone(),
            tag_line: account.tag_line.clone(),
            region,
        }
    }
}
