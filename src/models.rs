//! Lenient views of catalog JSON, used only for rendering.
//!
//! Every field is optional so a sparse upstream record still renders.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Movie {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Credit {
    pub name: Option<String>,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Image {
    pub file_path: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ImageSet {
    #[serde(deserialize_with = "lenient_list")]
    pub backdrops: Vec<Image>,
    #[serde(deserialize_with = "lenient_list")]
    pub posters: Vec<Image>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct MovieList {
    #[serde(deserialize_with = "lenient_list")]
    pub results: Vec<Movie>,
}

/// Categories of curated lists TMDB offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListType {
    #[default]
    Popular,
    TopRated,
    NowPlaying,
    Upcoming,
}

impl ListType {
    pub const ALL: [ListType; 4] = [
        ListType::Popular,
        ListType::TopRated,
        ListType::NowPlaying,
        ListType::Upcoming,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListType::Popular => "popular",
            ListType::TopRated => "top_rated",
            ListType::NowPlaying => "now_playing",
            ListType::Upcoming => "upcoming",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ListType::Popular => "Popular",
            ListType::TopRated => "Top rated",
            ListType::NowPlaying => "Now playing",
            ListType::Upcoming => "Upcoming",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == input)
    }
}

/// Reads a lenient view out of raw JSON; shape mismatches become the default.
pub fn view<T: for<'de> Deserialize<'de> + Default>(value: &Value) -> T {
    T::deserialize(value).unwrap_or_default()
}

/// Reads each array element on its own, dropping the ones that do not fit.
pub fn view_list<T: for<'de> Deserialize<'de>>(value: &Value) -> Vec<T> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| T::deserialize(item).ok())
                .collect()
        })
        .unwrap_or_default()
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: for<'a> Deserialize<'a>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(view_list(&raw))
}
