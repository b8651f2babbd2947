//! Plain text views printed by the CLI.

use std::{collections::HashMap, fmt};

use matchlens_shared::{
    FavoritePlayer,
    assets::{
        augment_icon_url, champion_icon_url, item_icon_url, keystone_icon_url, profile_icon_url,
        tier_icon_url, unranked_icon_url,
    },
    display::{
        MatchCard, format_duration, format_number, placement_label, queue_name, time_ago,
    },
    lol_match::{MatchDetail, MatchDetailParticipant},
};

use crate::player::{LoadStatus, PlayerPage};

/// Asset metadata resolved for one rendering pass.
#[derive(Debug, Clone, Copy)]
pub struct AssetContext<'a> {
    pub version: &'a str,
    pub augments: &'a HashMap<u32, String>,
    pub now_ms: i64,
    /// Print icon URLs next to names.
    pub show_icons: bool,
}

pub struct PlayerView<'a> {
    pub page: &'a PlayerPage,
    pub assets: AssetContext<'a>,
    /// Failed favorite toggle, shown next to the fan-out failures.
    pub toggle_error: Option<&'a str>,
}

impl fmt::Display for PlayerView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page = self.page;
        let assets = self.assets;

        match &page.status {
            LoadStatus::Idle => return writeln!(f, "Search for a player to get started."),
            LoadStatus::Loading => return writeln!(f, "Loading player data..."),
            LoadStatus::Error(message) => return writeln!(f, "Error: {message}"),
            LoadStatus::Done => {}
        }

        let Some(account) = &page.account else {
            return writeln!(f, "No player loaded.");
        };

        let star = if page.is_favorite { " ★" } else { "" };
        let region = page
            .request
            .as_ref()
            .map(|r| r.region.as_str())
            .unwrap_or_default();
        writeln!(f, "{}{star}  [{region}]", account.riot_id())?;
        if let Some(icon) = account.profile_icon_id.filter(|_| assets.show_icons) {
            writeln!(f, "  icon: {}", profile_icon_url(icon, assets.version))?;
        }

        let badges = page.ranked_badges();
        if badges.is_empty() {
            write!(f, "  Unranked")?;
            if assets.show_icons {
                write!(f, " ({})", unranked_icon_url())?;
            }
            writeln!(f)?;
        }
        for entry in badges {
            write!(
                f,
                "  {}: {} {} LP, {}W {}L ({}%)",
                entry.queue_label().unwrap_or_default(),
                entry.display_tier(),
                entry.league_points,
                entry.wins,
                entry.losses,
                entry.win_rate()
            )?;
            if assets.show_icons {
                write!(f, " ({})", tier_icon_url(&entry.tier))?;
            }
            writeln!(f)?;
        }

        if let Some(stats) = page.stats.as_ref().filter(|s| !s.is_empty()) {
            writeln!(
                f,
                "\nLast {} games: {}W {}L ({}%)  {} / {} / {}  KDA {:.2}",
                stats.total_games,
                stats.wins,
                stats.losses,
                stats.win_rate,
                stats.average_kills,
                stats.average_deaths,
                stats.average_assists,
                stats.average_kda
            )?;
        }

        let champions = page.top_champions();
        if !champions.is_empty() {
            writeln!(f, "Top champions:")?;
            for champion in champions {
                writeln!(
                    f,
                    "  {:<14} {} games  {}%  KDA {:.2}",
                    champion.champion_name,
                    champion.games,
                    champion.win_rate(),
                    champion.kda()
                )?;
            }
        }

        for failure in &page.failures {
            writeln!(f, "(!) {} unavailable: {}", failure.source, failure.message)?;
        }
        if let Some(message) = self.toggle_error {
            writeln!(f, "(!) favorite not updated: {message}")?;
        }

        writeln!(f)?;
        if page.matches.is_empty() {
            return writeln!(f, "No recent matches.");
        }

        for summary in &page.matches {
            let card = MatchCard::new(summary, assets.now_ms);
            write!(
                f,
                "{:<8} {:<16} {:<14} {:<12} {:>8} KP {:>3}%  CS {:>3}  {:>7}  {}",
                card.outcome,
                card.queue_name,
                card.champion_name,
                card.score,
                card.kda.to_string(),
                card.kill_participation,
                card.creep_score,
                card.duration,
                card.time_ago
            )?;
            if let Some(tag) = card.performance_tag {
                write!(f, "  [{tag}]")?;
            }
            writeln!(f, "  {}", card.match_id)?;

            if assets.show_icons {
                writeln!(
                    f,
                    "    {}",
                    champion_icon_url(&summary.champion_name, assets.version)
                )?;
                for item in summary.filled_items() {
                    writeln!(f, "    item {item}: {}", item_icon_url(item, assets.version))?;
                }
                if let Some(keystone) = keystone_icon_url(summary.primary_rune_id) {
                    writeln!(f, "    keystone: {keystone}")?;
                }
            }
            if summary.is_arena() {
                for augment in summary.picked_augments() {
                    match augment_icon_url(assets.augments, augment) {
                        Some(url) if assets.show_icons => {
                            writeln!(f, "    augment {augment}: {url}")?
                        }
                        _ => writeln!(f, "    augment {augment}")?,
                    }
                }
            }
        }
        Ok(())
    }
}

pub struct MatchView<'a> {
    pub detail: &'a MatchDetail,
    /// Highlighted player.
    pub puuid: Option<&'a str>,
    pub assets: AssetContext<'a>,
}

impl MatchView<'_> {
    fn participant_line(
        &self,
        f: &mut fmt::Formatter<'_>,
        p: &MatchDetailParticipant,
    ) -> fmt::Result {
        let detail = self.detail;
        let marker = if self.puuid == Some(p.puuid.as_str()) {
            ">"
        } else {
            " "
        };
        let name = match &p.riot_id_tagline {
            Some(tag) if !tag.is_empty() => format!("{}#{tag}", p.summoner_name),
            _ => p.summoner_name.clone(),
        };
        let bar_len =
            (p.total_damage_dealt_to_champions * 20 / detail.max_damage()).min(20) as usize;

        write!(
            f,
            "{marker} {:<22} {:<12} lvl {:>2}  {:>2}/{:>2}/{:>2} {:>7}  KP {:>3}%  {:>6} dmg {:<20}  {:>6} gold  CS {:>3}  wards {}/{}/{}",
            name,
            p.champion_name,
            p.champion_level,
            p.kills,
            p.deaths,
            p.assists,
            p.kda().short_label(),
            detail.kill_participation_of(p),
            format_number(p.total_damage_dealt_to_champions),
            "#".repeat(bar_len),
            format_number(u64::from(p.gold_earned)),
            p.creep_score(),
            p.wards_placed,
            p.wards_killed,
            p.vision_wards_bought_in_game
        )?;
        if let Some(multi) = p.multi_kill() {
            write!(f, "  {}", multi.label())?;
        }
        writeln!(f)
    }
}

impl fmt::Display for MatchView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detail = self.detail;
        let me = self.puuid.and_then(|puuid| detail.participant(puuid));

        write!(
            f,
            "{}  {}  patch {}  {}",
            queue_name(detail.queue_id),
            format_duration(detail.game_duration_sec),
            detail.patch_version(),
            time_ago(detail.game_end_timestamp, self.assets.now_ms)
        )?;
        if let Some(me) = me {
            let outcome = if detail.is_arena() && me.placement > 0 {
                placement_label(me.placement)
            } else if detail.is_win_for(me) {
                "Victory".to_string()
            } else {
                "Defeat".to_string()
            };
            write!(f, "  {outcome}")?;
        }
        writeln!(f, "\n")?;

        if detail.is_arena() {
            for team in detail.arena_teams() {
                let label = match team.placement {
                    0 => "?".to_string(),
                    p => placement_label(p),
                };
                writeln!(f, "{label}")?;
                for p in &team.players {
                    self.participant_line(f, p)?;
                }
            }
            return Ok(());
        }

        for team in &detail.teams {
            let outcome = if team.win { "Victory" } else { "Defeat" };
            writeln!(
                f,
                "{} ({outcome})  barons {}  dragons {}  towers {}",
                if team.team_id == 100 { "Blue" } else { "Red" },
                team.objectives.baron_kills,
                team.objectives.dragon_kills,
                team.objectives.tower_kills
            )?;
            for p in detail.team_participants(team.team_id) {
                self.participant_line(f, p)?;
            }
            writeln!(f)?;
        }

        if detail.teams.is_empty() {
            for p in &detail.participants {
                self.participant_line(f, p)?;
            }
        }
        Ok(())
    }
}

pub struct FavoritesView<'a>(pub &'a [FavoritePlayer]);

impl fmt::Display for FavoritesView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No favorites yet.");
        }
        for favorite in self.0 {
            writeln!(
                f,
                "{}#{}  [{}]  saved {}  {}",
                favorite.game_name,
                favorite.tag_line,
                favorite.region,
                favorite.saved_at.format("%Y-%m-%d"),
                favorite.puuid
            )?;
        }
        Ok(())
    }
}
