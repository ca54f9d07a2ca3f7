// src/app/gallery.rs
use std::collections::HashSet;

use crate::app::types::GenreOption;
use crate::tmdb::{Genre, MovieSummary};

/// Populate the filter options from the fetched catalog. A second call is a
/// no-op so user selections survive repaints and late re-derivations.
pub fn init_genre_options(options: &mut Vec<GenreOption>, catalog: &[Genre]) {
    if !options.is_empty() {
        return;
    }
    options.extend(catalog.iter().map(|g| GenreOption {
        id: g.id,
        name: g.name.clone(),
        selected: false,
    }));
}

pub fn toggle_genre(options: &mut [GenreOption], id: u64) {
    for opt in options.iter_mut() {
        if opt.id == id {
            opt.selected = !opt.selected;
        }
    }
}

pub fn clear_selection(options: &mut [GenreOption]) {
    for opt in options.iter_mut() {
        opt.selected = false;
    }
}

pub fn selected_ids(options: &[GenreOption]) -> HashSet<u64> {
    options
        .iter()
        .filter(|o| o.selected)
        .map(|o| o.id)
        .collect()
}

/// Indices of movies whose genre set intersects `selected` (OR semantics),
/// in original relative order. An empty selection keeps everything.
pub fn filter(movies: &[MovieSummary], selected: &HashSet<u64>) -> Vec<usize> {
    if selected.is_empty() {
        return (0..movies.len()).collect();
    }
    movies
        .iter()
        .enumerate()
        .filter(|(_, m)| m.genre_ids.iter().any(|g| selected.contains(g)))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64, genre_ids: &[u64]) -> MovieSummary {
        MovieSummary {
            id,
            title: format!("movie-{id}"),
            overview: String::new(),
            release_date: None,
            vote_average: 0.0,
            vote_count: 0,
            popularity: 0.0,
            poster_path: None,
            backdrop_path: None,
            genre_ids: genre_ids.to_vec(),
        }
    }

    fn genre(id: u64, name: &str) -> Genre {
        Genre { id, name: name.to_string() }
    }

    #[test]
    fn empty_selection_is_identity() {
        let movies = vec![movie(1, &[28]), movie(2, &[]), movie(3, &[35, 18])];
        assert_eq!(filter(&movies, &HashSet::new()), vec![0, 1, 2]);
    }

    #[test]
    fn single_genre_matches_exactly_the_members() {
        let movies = vec![movie(1, &[28, 12]), movie(2, &[35]), movie(3, &[28])];
        let sel: HashSet<u64> = [28].into_iter().collect();
        assert_eq!(filter(&movies, &sel), vec![0, 2]);
    }

    #[test]
    fn multiple_genres_use_or_semantics() {
        let movies = vec![movie(1, &[28]), movie(2, &[35]), movie(3, &[18]), movie(4, &[])];
        let sel: HashSet<u64> = [28, 18].into_iter().collect();
        // matches either genre, never requires both, keeps order
        assert_eq!(filter(&movies, &sel), vec![0, 2]);
    }

    #[test]
    fn toggle_flips_one_flag_independently() {
        let mut options = Vec::new();
        init_genre_options(&mut options, &[genre(28, "Action"), genre(35, "Comedy")]);

        toggle_genre(&mut options, 35);
        assert!(!options[0].selected);
        assert!(options[1].selected);

        toggle_genre(&mut options, 35);
        assert!(!options[1].selected);
    }

    #[test]
    fn clear_resets_every_flag() {
        let mut options = Vec::new();
        init_genre_options(&mut options, &[genre(28, "Action"), genre(35, "Comedy")]);
        toggle_genre(&mut options, 28);
        toggle_genre(&mut options, 35);

        clear_selection(&mut options);
        assert!(options.iter().all(|o| !o.selected));
    }

    #[test]
    fn init_is_idempotent_and_keeps_selections() {
        let catalog = vec![genre(28, "Action"), genre(35, "Comedy")];
        let mut options = Vec::new();
        init_genre_options(&mut options, &catalog);
        toggle_genre(&mut options, 28);

        init_genre_options(&mut options, &catalog);
        assert_eq!(options.len(), 2);
        assert!(options[0].selected, "re-init must not drop user selection");
    }

    #[test]
    fn selected_ids_reflects_flags() {
        let mut options = Vec::new();
        init_genre_options(&mut options, &[genre(28, "Action"), genre(35, "Comedy")]);
        toggle_genre(&mut options, 35);
        let sel = selected_ids(&options);
        assert_eq!(sel, [35].into_iter().collect());
    }
}
