use clap::{Parser, Subcommand};
use matchlens_shared::Region;

#[derive(Parser, Debug)]
#[command(name = "matchlens")]
#[command(about = "League of Legends match history viewer", long_about = None)]
pub struct Cli {
    /// Print asset icon URLs next to names
    #[arg(long, global = true)]
    pub icons: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a player's rank, stats and recent matches
    Player {
        /// NA, EUW, KR, JP, BR or OCE
        region: Region,
        game_name: String,
        tag: String,

        /// Number of recent matches (defaults to MATCH_COUNT)
        #[arg(short, long)]
        count: Option<usize>,

        /// Add the player to favorites, or remove them if already saved
        #[arg(long)]
        toggle_favorite: bool,
    },

    /// Show the full scoreboard of a match
    Match {
        region: Region,
        match_id: String,

        /// Highlight this player
        #[arg(long)]
        puuid: Option<String>,
    },

    /// Manage saved players
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesAction>,
    },

    /// Open a client route such as /player/EUW/Name/TAG
    Open { route: String },
}

#[derive(Subcommand, Debug)]
pub enum FavoritesAction {
    List,
    Remove { puuid: String },
}
