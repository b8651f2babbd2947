use std::process::ExitCode;

use clap::Parser;
use matchlens::{
    App, AppError, PlayerRequest,
    cli::{Cli, Commands, FavoritesAction},
    config::Config,
    logging,
    routes::Route,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    if let Err(e) = logging::init() {
        eprintln!("{e}");
    }

    match run(cli).await {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("❌ {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String, AppError> {
    let config = Config::from_env()?;
    info!("🔎 Using backend at {}", config.backend_base_url);

    let match_count = match &cli.command {
        Commands::Player {
            count: Some(count), ..
        } if *count > 0 => *count,
        _ => config.match_count,
    };
    let app = App::from_config(&config, match_count, cli.icons);

    let output = match cli.command {
        Commands::Player {
            region,
            game_name,
            tag,
            toggle_favorite,
            ..
        } => {
            app.player_page(PlayerRequest::new(region, game_name, tag), toggle_favorite)
                .await
        }
        Commands::Match {
            region,
            match_id,
            puuid,
        } => app.match_page(region, &match_id, puuid.as_deref()).await,
        Commands::Favorites { action } => match action {
            None | Some(FavoritesAction::List) => app.favorites_page().await,
            Some(FavoritesAction::Remove { puuid }) => app.remove_favorite(&puuid).await,
        },
        Commands::Open { route } => app.open(&Route::parse(&route)?).await,
    };

    app.metrics().log_summary();
    output
}
