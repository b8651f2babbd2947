use serde::{Deserialize, Serialize};

use crate::{
    ARENA_QUEUE_ID, QueueType,
    display::{self, Kda, MultiKill, PerformanceTag},
};

/// Lightweight roster entry shown next to a match summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchParticipant {
    pub summoner_name: String,
    pub riot_id_tagline: Option<String>,
    pub champion_name: String,
    pub puuid: String,
}

/// One match seen from one player's perspective.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchSummary {
    pub match_id: String,
    pub champion_name: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub win: bool,
    pub game_duration_sec: u64,
    /// Epoch milliseconds.
    pub game_end_timestamp: i64,
    pub champion_level: u32,
    pub summoner1_id: u32,
    pub summoner2_id: u32,
    /// Fixed item slots, 0 = empty.
    pub items: Vec<u32>,
    pub total_minions_killed: u32,
    pub neutral_minions_killed: u32,
    pub queue_id: u16,
    pub team_total_kills: u32,
    pub allies: Vec<MatchParticipant>,
    pub enemies: Vec<MatchParticipant>,
    pub primary_rune_id: u32,
    pub secondary_rune_style_id: u32,
    /// Arena only.
    pub augments: Vec<u32>,
    /// Arena placement 1-8, 0 for every other mode.
    pub placement: u8,
}

impl MatchSummary {
    pub fn queue_type(&self) -> QueueType {
        self.queue_id.into()
    }

    pub fn is_arena(&self) -> bool {
        self.queue_id == ARENA_QUEUE_ID
    }

    pub fn is_win(&self) -> bool {
        display::is_win(self.queue_id, self.placement, self.win)
    }

    pub fn kda(&self) -> Kda {
        Kda::new(self.kills, self.deaths, self.assists)
    }

    pub fn kill_participation(&self) -> u32 {
        display::kill_participation(self.kills, self.assists, self.team_total_kills)
    }

    pub fn creep_score(&self) -> u32 {
        display::creep_score(self.total_minions_killed, self.neutral_minions_killed)
    }

    pub fn performance_tag(&self) -> Option<PerformanceTag> {
        PerformanceTag::evaluate(
            self.kills,
            self.deaths,
            self.assists,
            self.kill_participation(),
            self.is_win(),
        )
    }

    /// Item ids of the occupied slots.
    pub fn filled_items(&self) -> impl Iterator<Item = u32> + '_ {
        self.items.iter().copied().filter(|id| *id > 0)
    }

    pub fn picked_augments(&self) -> impl Iterator<Item = u32> + '_ {
        self.augments.iter().copied().filter(|id| *id > 0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamObjectives {
    pub baron_kills: u32,
    pub dragon_kills: u32,
    pub tower_kills: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchTeam {
    pub team_id: u16,
    pub win: bool,
    pub bans: Vec<i32>,
    pub objectives: TeamObjectives,
}

/// Full scoreboard line of one player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchDetailParticipant {
    pub summoner_name: String,
    pub riot_id_tagline: Option<String>,
    pub champion_name: String,
    pub puuid: String,
    pub team_id: u16,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub champion_level: u32,
    pub total_damage_dealt_to_champions: u64,
    pub total_damage_taken: u64,
    pub gold_earned: u32,
    pub items: Vec<u32>,
    pub total_minions_killed: u32,
    pub neutral_minions_killed: u32,
    pub summoner1_id: u32,
    pub summoner2_id: u32,
    pub primary_rune_id: u32,
    pub secondary_rune_style_id: u32,
    pub wards_placed: u32,
    pub wards_killed: u32,
    pub vision_wards_bought_in_game: u32,
    pub double_kills: u32,
    pub triple_kills: u32,
    pub quadra_kills: u32,
    pub penta_kills: u32,
    pub win: bool,
    pub placement: u8,
    /// Arena duo grouping.
    pub player_subteam_id: u8,
}

impl MatchDetailParticipant {
    pub fn kda(&self) -> Kda {
        Kda::new(self.kills, self.deaths, self.assists)
    }

    pub fn creep_score(&self) -> u32 {
        display::creep_score(self.total_minions_killed, self.neutral_minions_killed)
    }

    pub fn multi_kill(&self) -> Option<MultiKill> {
        MultiKill::highest(
            self.double_kills,
            self.triple_kills,
            self.quadra_kills,
            self.penta_kills,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchDetail {
    pub match_id: String,
    pub queue_id: u16,
    pub game_duration_sec: u64,
    pub game_end_timestamp: i64,
    pub game_mode: String,
    pub game_version: String,
    pub teams: Vec<MatchTeam>,
    pub participants: Vec<MatchDetailParticipant>,
}

impl MatchDetail {
    pub fn queue_type(&self) -> QueueType {
        self.queue_id.into()
    }

    pub fn is_arena(&self) -> bool {
        self.queue_id == ARENA_QUEUE_ID
    }

    pub fn participant(&self, puuid: &str) -> Option<&MatchDetailParticipant> {
        self.participants.iter().find(|p| p.puuid == puuid)
    }

    pub fn is_win_for(&self, participant: &MatchDetailParticipant) -> bool {
        display::is_win(self.queue_id, participant.placement, participant.win)
    }

    pub fn team_participants(&self, team_id: u16) -> Vec<&MatchDetailParticipant> {
        self.participants
            .iter()
            .filter(|p| p.team_id == team_id)
            .collect()
    }

    /// Kills of the participant's team (or Arena duo).
    pub fn team_kills_of(&self, participant: &MatchDetailParticipant) -> u32 {
        self.participants
            .iter()
            .filter(|p| {
                if self.is_arena() {
                    p.player_subteam_id == participant.player_subteam_id
                } else {
                    p.team_id == participant.team_id
                }
            })
            .map(|p| p.kills)
            .sum()
    }

    pub fn kill_participation_of(&self, participant: &MatchDetailParticipant) -> u32 {
        display::kill_participation(
            participant.kills,
            participant.assists,
            self.team_kills_of(participant),
        )
    }

    /// Highest champion damage of the match, never below 1 so it can be used
    /// as a bar scale.
    pub fn max_damage(&self) -> u64 {
        self.participants
            .iter()
            .map(|p| p.total_damage_dealt_to_champions)
            .max()
            .unwrap_or(0)
            .max(1)
    }

    /// Extract short patch version (e.g., "14.24" from "14.24.632.8043")
    pub fn patch_version(&self) -> &str {
        self.game_version
            .match_indices('.')
            .nth(1)
            .map(|(idx, _)| &self.game_version[..idx])
            .unwrap_or(&self.game_version)
    }

    /// Arena duos ordered by placement, first place first.
    pub fn arena_teams(&self) -> Vec<ArenaTeam<'_>> {
        let mut teams: Vec<ArenaTeam<'_>> = Vec::new();

        for participant in &self.participants {
            match teams
                .iter_mut()
                .find(|t| t.subteam_id == participant.player_subteam_id)
            {
                Some(team) => team.players.push(participant),
                None => teams.push(ArenaTeam {
                    subteam_id: participant.player_subteam_id,
                    placement: participant.placement,
                    players: vec![participant],
                }),
            }
        }

        teams.sort_by_key(|t| match t.placement {
            0 => 99,
            p => p,
        });
        teams
    }
}

#[derive(Debug, Clone)]
pub struct ArenaTeam<'a> {
    pub subteam_id: u8,
    /// Placement of the first member seen.
    pub placement: u8,
    pub players: Vec<&'a MatchDetailParticipant>,
}

impl ArenaTeam<'_> {
    pub fn contains(&self, puuid: &str) -> bool {
        self.players.iter().any(|p| p.puuid == puuid)
    }
}
