use axum::http::StatusCode;
use maud::{html, Markup, DOCTYPE};

use crate::models::{Credit, ImageSet, ListType, Movie};
use crate::tmdb::{image_url, BACKDROP_SIZE, POSTER_SIZE};

const MAX_CAST: usize = 12;

fn page(title: &str, body: Markup) -> String {
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " · Moviedeck" }
            }
            body {
                header {
                    a href="/" { "Moviedeck" }
                }
                main { (body) }
            }
        }
    };
    markup.into_string()
}

fn poster(path: Option<&str>, alt: &str) -> Markup {
    html! {
        @match path {
            Some(p) => {
                img class="poster" src=(image_url(p, POSTER_SIZE)) alt=(alt);
            }
            None => {
                div class="poster placeholder" { "No poster" }
            }
        }
    }
}

pub fn home_page(movies: &[Movie], selected: ListType) -> String {
    page(
        selected.label(),
        html! {
            nav class="list-types" {
                @for t in ListType::ALL {
                    @if t == selected {
                        a class="active" href={ "/?list_type=" (t.as_str()) } { (t.label()) }
                    } @else {
                        a href={ "/?list_type=" (t.as_str()) } { (t.label()) }
                    }
                }
            }
            h1 { (selected.label()) " movies" }
            @if movies.is_empty() {
                p { "No movies to show." }
            } @else {
                ul class="movies" {
                    @for movie in movies {
                        @let title = movie.title.as_deref().unwrap_or("Untitled");
                        li {
                            @if let Some(id) = movie.id {
                                a href={ "/movie/" (id) } {
                                    (poster(movie.poster_path.as_deref(), title))
                                    span { (title) }
                                }
                            } @else {
                                (poster(movie.poster_path.as_deref(), title))
                                span { (title) }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn movie_page(movie: &Movie, cast: &[Credit], images: &ImageSet) -> String {
    let title = movie.title.as_deref().unwrap_or("Untitled");
    let backdrop = images
        .backdrops
        .first()
        .map(|b| b.file_path.as_str())
        .or(movie.backdrop_path.as_deref());
    let poster_path = movie
        .poster_path
        .as_deref()
        .or_else(|| images.posters.first().map(|p| p.file_path.as_str()));

    page(
        title,
        html! {
            @if let Some(b) = backdrop {
                img class="backdrop" src=(image_url(b, BACKDROP_SIZE)) alt="";
            }
            article class="movie" {
                (poster(poster_path, title))
                h1 { (title) }
                @if let Some(date) = &movie.release_date {
                    p class="release-date" { "Released " (date) }
                }
                @if let Some(overview) = &movie.overview {
                    p class="overview" { (overview) }
                }
            }
            @if !cast.is_empty() {
                h2 { "Cast" }
                ul class="cast" {
                    @for credit in cast.iter().take(MAX_CAST) {
                        li {
                            strong { (credit.name.as_deref().unwrap_or("Unknown")) }
                            @if let Some(character) = &credit.character {
                                " as " (character)
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    page(
        "Error",
        html! {
            h1 { (status.as_u16()) " " (status.canonical_reason().unwrap_or("Error")) }
            p { (message) }
            a href="/" { "Back to the list" }
        },
    )
}
