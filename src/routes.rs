//! Client routes: `/`, `/player/:region/:gameName/:tag` and
//! `/match/:region/:matchId?puuid=...`.

use std::{fmt, str::FromStr};

use matchlens_shared::Region;
use urlencoding::{decode, encode};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Player {
        region: Region,
        game_name: String,
        tag: String,
    },
    Match {
        region: Region,
        match_id: String,
        /// Player whose perspective is highlighted, if any.
        puuid: Option<String>,
    },
}

fn segment(raw: &str, path: &str) -> Result<String, AppError> {
    let decoded = decode(raw).map_err(|_| AppError::InvalidRoute(path.to_string()))?;
    if decoded.is_empty() {
        return Err(AppError::InvalidRoute(path.to_string()));
    }
    Ok(decoded.into_owned())
}

impl Route {
    pub fn parse(path: &str) -> Result<Self, AppError> {
        let (path_part, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };

        let parts: Vec<&str> = path_part
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match parts.as_slice() {
            [] => Ok(Route::Home),
            ["player", region, game_name, tag] => Ok(Route::Player {
                region: region.parse()?,
                game_name: segment(game_name, path)?,
                tag: segment(tag, path)?,
            }),
            ["match", region, match_id] => {
                let puuid = query
                    .into_iter()
                    .flat_map(|q| q.split('&'))
                    .filter_map(|pair| pair.split_once('='))
                    .find(|(key, _)| *key == "puuid")
                    .map(|(_, value)| segment(value, path))
                    .transpose()?;

                Ok(Route::Match {
                    region: region.parse()?,
                    match_id: segment(match_id, path)?,
                    puuid,
                })
            }
            _ => Err(AppError::InvalidRoute(path.to_string())),
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Player {
                region,
                game_name,
                tag,
            } => format!("/player/{region}/{}/{}", encode(game_name), encode(tag)),
            Route::Match {
                region,
                match_id,
                puuid,
            } => {
                let mut path = format!("/match/{region}/{}", encode(match_id));
                if let Some(puuid) = puuid {
                    path.push_str(&format!("?puuid={}", encode(puuid)));
                }
                path
            }
        }
    }
}

impl FromStr for Route {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}
