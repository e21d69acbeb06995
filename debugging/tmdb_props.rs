//! Call one catalog operation and print the raw JSON it returns.
//! Usage:
//!   cargo run --bin tmdb_props -- movie <tmdb_id>
//!   cargo run --bin tmdb_props -- cast <tmdb_id>
//!   cargo run --bin tmdb_props -- images <tmdb_id>
//!   cargo run --bin tmdb_props -- list <popular|top_rated|now_playing|upcoming>
//! Requires TMDB_API_TOKEN in the environment (.env supported).

use anyhow::{Context, Result};
use dotenvy::dotenv;
use moviedeck::config::Config;
use moviedeck::tmdb::{MovieCatalog, TmdbClient};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Operation {
    Movie,
    Cast,
    Images,
    List,
}

impl FromStr for Operation {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "movie" => Ok(Operation::Movie),
            "cast" => Ok(Operation::Cast),
            "images" => Ok(Operation::Images),
            "list" => Ok(Operation::List),
            _ => Err(anyhow::anyhow!(
                "operation must be one of 'movie', 'cast', 'images', 'list'"
            )),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let mut args = env::args().skip(1);
    let op: Operation = args
        .next()
        .context("missing operation (movie|cast|images|list)")?
        .parse()?;
    let target = args.next().context("missing movie id or list type")?;

    let config = Config::from_env()?;
    let client = TmdbClient::from_config(&config)?;

    let value = match op {
        Operation::List => client.get_movies_list(&target).await?,
        _ => {
            let id: u64 = target
                .parse()
                .with_context(|| format!("'{}' is not a TMDB movie id", target))?;
            match op {
                Operation::Movie => client.get_single_movie(id).await?,
                Operation::Cast => client.get_single_movie_cast(id).await?,
                _ => client.get_movie_images(id).await?,
            }
        }
    };

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
