//! Aggregates over a window of recent matches.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::lol_match::MatchSummary;

/// Number of recent games aggregated by default.
pub const DEFAULT_MATCH_WINDOW: usize = 10;

/// Number of champions kept by [`aggregate_champions`].
pub const TOP_CHAMPIONS: usize = 3;

/// `round(100 * part / whole)`, 0 when `whole` is 0.
pub fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (100.0 * f64::from(part) / f64::from(whole)).round() as u32
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// KDA over summed totals: a zero-death window counts as kills + assists.
pub fn summed_kda(kills: u32, deaths: u32, assists: u32) -> f64 {
    crate::display::kda_value(kills, deaths, assists)
}

/// Overall statistics of a player over the recent match window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub total_games: u32,
    pub wins: u32,
    pub losses: u32,
    /// 0-100. Server side values may carry decimals and are rounded.
    #[serde(deserialize_with = "rounded_percentage")]
    pub win_rate: u32,
    pub average_kills: f64,
    pub average_deaths: f64,
    pub average_assists: f64,
    pub average_kda: f64,
}

impl PlayerStats {
    /// No games: nothing to show, not an error.
    pub fn is_empty(&self) -> bool {
        self.total_games == 0
    }
}

fn rounded_percentage<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(value.clamp(0.0, 100.0).round() as u32)
}

#[derive(Debug, Default)]
struct Totals {
    games: u32,
    wins: u32,
    kills: u32,
    deaths: u32,
    assists: u32,
}

impl Totals {
    fn add(&mut self, summary: &MatchSummary) {
        self.games += 1;
        if summary.win {
            self.wins += 1;
        }
        self.kills += summary.kills;
        self.deaths += summary.deaths;
        self.assists += summary.assists;
    }

    fn average(&self, sum: u32) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            round_to(f64::from(sum) / f64::from(self.games), 1)
        }
    }
}

pub fn aggregate_stats(matches: &[MatchSummary]) -> PlayerStats {
    let mut totals = Totals::default();
    for summary in matches {
        totals.add(summary);
    }

    PlayerStats {
        total_games: totals.games,
        wins: totals.wins,
        losses: totals.games - totals.wins,
        win_rate: percentage(totals.wins, totals.games),
        average_kills: totals.average(totals.kills),
        average_deaths: totals.average(totals.deaths),
        average_assists: totals.average(totals.assists),
        average_kda: summed_kda(totals.kills, totals.deaths, totals.assists),
    }
}

/// Rollup of the games played on one champion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChampionStats {
    pub champion_name: String,
    pub games: u32,
    pub wins: u32,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
}

impl ChampionStats {
    pub fn losses(&self) -> u32 {
        self.games - self.wins
    }

    pub fn win_rate(&self) -> u32 {
        percentage(self.wins, self.games)
    }

    pub fn kda(&self) -> f64 {
        summed_kda(self.kills, self.deaths, self.assists)
    }
}

/// Most played champions of the window, at most [`TOP_CHAMPIONS`]. Ties keep
/// the order in which the champions were first seen.
pub fn aggregate_champions(matches: &[MatchSummary]) -> Vec<ChampionStats> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<ChampionStats> = Vec::new();

    for summary in matches {
        let slot = *index
            .entry(summary.champion_name.as_str())
            .or_insert_with(|| {
                groups.push(ChampionStats {
                    champion_name: summary.champion_name.clone(),
                    games: 0,
                    wins: 0,
                    kills: 0,
                    deaths: 0,
                    assists: 0,
                });
                groups.len() - 1
            });

        let group = &mut groups[slot];
        group.games += 1;
        if summary.win {
            group.wins += 1;
        }
        group.kills += summary.kills;
        group.deaths += summary.deaths;
        group.assists += summary.assists;
    }

    groups.sort_by(|a, b| b.games.cmp(&a.games));
    groups.truncate(TOP_CHAMPIONS);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(champion: &str, kills: u32, deaths: u32, assists: u32, win: bool) -> MatchSummary {
        MatchSummary {
            champion_name: champion.to_string(),
            kills,
            deaths,
            assists,
            win,
            ..Default::default()
        }
    }

    #[test]
    fn empty_window_yields_zeroed_stats() {
        let stats = aggregate_stats(&[]);
        assert!(stats.is_empty());
        assert_eq!(stats.win_rate, 0);
        assert_eq!(stats.losses, 0);
        assert_eq!(stats.average_kills, 0.0);
        assert_eq!(stats.average_kda, 0.0);
    }

    #[test]
    fn stats_use_summed_totals() {
        let matches = vec![
            game("Ahri", 10, 0, 5, true),
            game("Lux", 2, 4, 8, false),
            game("Ahri", 3, 3, 3, true),
        ];

        let stats = aggregate_stats(&matches);
        assert_eq!(stats.total_games, 3);
        assert_eq!(stats.wins, 2);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.win_rate, 67);
        assert_eq!(stats.average_kills, 5.0);
        assert_eq!(stats.average_deaths, 2.3);
        assert_eq!(stats.average_assists, 5.3);
        // (15 + 16) / 7, not the mean of the per-game ratios
        assert_eq!(stats.average_kda, 31.0 / 7.0);
    }

    #[test]
    fn deathless_window_kda_is_takedowns() {
        let stats = aggregate_stats(&[game("Ahri", 4, 0, 6, true), game("Ahri", 1, 0, 1, false)]);
        assert_eq!(stats.average_kda, 12.0);
        assert_eq!(stats.win_rate, 50);
    }

    #[test]
    fn win_rate_stays_within_bounds() {
        let all_wins: Vec<_> = (0..7).map(|_| game("Lux", 1, 1, 1, true)).collect();
        assert_eq!(aggregate_stats(&all_wins).win_rate, 100);

        let all_losses: Vec<_> = (0..7).map(|_| game("Lux", 1, 1, 1, false)).collect();
        assert_eq!(aggregate_stats(&all_losses).win_rate, 0);
    }

    #[test]
    fn champions_sorted_by_games_with_win_rate() {
        let matches = vec![
            game("Lux", 1, 1, 1, false),
            game("Ahri", 5, 2, 5, true),
            game("Ahri", 5, 2, 5, false),
            game("Ahri", 5, 2, 5, true),
            game("Ahri", 5, 2, 5, false),
            game("Ahri", 5, 2, 5, true),
        ];

        let champions = aggregate_champions(&matches);
        assert_eq!(champions.len(), 2);
        assert_eq!(champions[0].champion_name, "Ahri");
        assert_eq!(champions[0].games, 5);
        assert_eq!(champions[0].win_rate(), 60);
        assert_eq!(champions[0].losses(), 2);
        assert_eq!(champions[0].kda(), 5.0);
        assert_eq!(champions[1].champion_name, "Lux");
    }

    #[test]
    fn champion_ties_keep_first_seen_order_and_top_three() {
        let matches = vec![
            game("Zed", 1, 1, 1, true),
            game("Ahri", 1, 1, 1, true),
            game("Lux", 1, 1, 1, true),
            game("Jinx", 1, 1, 1, true),
            game("Jinx", 1, 1, 1, true),
        ];

        let names: Vec<_> = aggregate_champions(&matches)
            .into_iter()
            .map(|c| c.champion_name)
            .collect();
        assert_eq!(names, vec!["Jinx", "Zed", "Ahri"]);
    }

    #[test]
    fn server_win_rate_is_rounded_on_decode() {
        let stats: PlayerStats = serde_json::from_str(
            r#"{"totalGames":3,"wins":2,"losses":1,"winRate":66.7,"averageKills":5.0,"averageDeaths":2.3,"averageAssists":5.3,"averageKda":4.43}"#,
        )
        .unwrap();
        assert_eq!(stats.win_rate, 67);
    }
}
