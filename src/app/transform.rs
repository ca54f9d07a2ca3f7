// src/app/transform.rs
use std::cmp::Ordering;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::app::types::{SortKey, SortOrder};
use crate::tmdb::MovieSummary;

/// One compiled query pattern is enough: the UI re-derives results every
/// keystroke, always with the current query.
static QUERY_RE: Lazy<Mutex<Option<(String, Regex)>>> = Lazy::new(|| Mutex::new(None));

/// Filter + stable sort. Returns indices into `movies` in render order.
pub fn transform(
    movies: &[MovieSummary],
    query: &str,
    sort_key: SortKey,
    sort_order: SortOrder,
) -> Vec<usize> {
    let needle = query.to_lowercase();
    let mut out: Vec<usize> = movies
        .iter()
        .enumerate()
        .filter(|(_, m)| matches_query(m, &needle))
        .map(|(i, _)| i)
        .collect();

    out.sort_by(|&a, &b| {
        let ord = compare(&movies[a], &movies[b], sort_key);
        match sort_order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });

    out
}

fn matches_query(movie: &MovieSummary, needle: &str) -> bool {
    needle.is_empty()
        || movie.title.to_lowercase().contains(needle)
        || movie.overview.to_lowercase().contains(needle)
}

/// Empty release dates come through the wire as `""`; treat them as absent.
fn date_key(movie: &MovieSummary) -> Option<&str> {
    movie.release_date.as_deref().filter(|d| !d.is_empty())
}

fn compare(a: &MovieSummary, b: &MovieSummary, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => cmp_str_ci(&a.title, &b.title),
        SortKey::ReleaseDate => cmp_opt_str_ci(date_key(a), date_key(b)),
        SortKey::VoteAverage => cmp_f64(a.vote_average, b.vote_average),
        SortKey::Popularity => cmp_f64(a.popularity, b.popularity),
    }
}

fn cmp_str_ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

// Missing values sort before everything; the direction flip in `transform`
// keeps the rule symmetric.
fn cmp_opt_str_ci(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => cmp_str_ci(a, b),
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

// ---- highlighting ----

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightSpan {
    pub text: String,
    pub matched: bool,
}

/// Split `text` into plain/matched spans on case-insensitive occurrences of
/// the literal `query`. Metacharacters are escaped, so `C++` matches `c++`
/// and nothing else. Never panics; no match (or an empty query) yields the
/// whole text as one plain span.
pub fn highlight(text: &str, query: &str) -> Vec<HighlightSpan> {
    if query.is_empty() || text.is_empty() {
        return vec![HighlightSpan {
            text: text.to_string(),
            matched: false,
        }];
    }

    let Some(re) = query_regex(query) else {
        return vec![HighlightSpan {
            text: text.to_string(),
            matched: false,
        }];
    };

    let mut spans = Vec::new();
    let mut last = 0usize;
    for m in re.find_iter(text) {
        if m.start() > last {
            spans.push(HighlightSpan {
                text: text[last..m.start()].to_string(),
                matched: false,
            });
        }
        spans.push(HighlightSpan {
            text: m.as_str().to_string(),
            matched: true,
        });
        last = m.end();
    }
    if last < text.len() {
        spans.push(HighlightSpan {
            text: text[last..].to_string(),
            matched: false,
        });
    }
    if spans.is_empty() {
        spans.push(HighlightSpan {
            text: text.to_string(),
            matched: false,
        });
    }
    spans
}

fn query_regex(query: &str) -> Option<Regex> {
    let mut cached = QUERY_RE.lock().ok()?;
    if let Some((q, re)) = cached.as_ref() {
        if q == query {
            return Some(re.clone());
        }
    }
    let re = Regex::new(&format!("(?i){}", regex::escape(query))).ok()?;
    *cached = Some((query.to_string(), re.clone()));
    Some(re)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64, title: &str, overview: &str) -> MovieSummary {
        MovieSummary {
            id,
            title: title.to_string(),
            overview: overview.to_string(),
            release_date: None,
            vote_average: 0.0,
            vote_count: 0,
            popularity: 0.0,
            poster_path: None,
            backdrop_path: None,
            genre_ids: Vec::new(),
        }
    }

    fn titles(movies: &[MovieSummary], order: &[usize]) -> Vec<String> {
        order.iter().map(|&i| movies[i].title.clone()).collect()
    }

    #[test]
    fn empty_query_matches_all_in_original_order() {
        let movies = vec![movie(1, "B", ""), movie(2, "A", ""), movie(3, "C", "")];
        let order = transform(&movies, "", SortKey::Popularity, SortOrder::Ascending);
        // equal popularity: stable sort keeps fetch order
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn filters_title_and_overview_case_insensitively() {
        let movies = vec![
            movie(1, "Mars Attacks", "aliens"),
            movie(2, "Avatar", "blue planet"),
            movie(3, "Quiet", "a MARble story"),
        ];
        let order = transform(&movies, "mar", SortKey::Popularity, SortOrder::Ascending);
        assert_eq!(titles(&movies, &order), vec!["Mars Attacks", "Quiet"]);
    }

    #[test]
    fn filtering_never_adds_entries() {
        let movies = vec![
            movie(1, "Mars Attacks", ""),
            movie(2, "Avatar", ""),
            movie(3, "March", ""),
        ];
        let all = transform(&movies, "", SortKey::Title, SortOrder::Ascending);
        let some = transform(&movies, "mar", SortKey::Title, SortOrder::Ascending);
        assert!(some.iter().all(|i| all.contains(i)));
    }

    #[test]
    fn mar_query_filters_then_sorts_by_title() {
        let movies = vec![
            movie(1, "Mars Attacks", ""),
            movie(2, "Avatar", ""),
            movie(3, "March", ""),
        ];
        // unsorted key keeps relative fetch order
        let by_pop = transform(&movies, "mar", SortKey::Popularity, SortOrder::Ascending);
        assert_eq!(titles(&movies, &by_pop), vec!["Mars Attacks", "March"]);

        let by_title = transform(&movies, "mar", SortKey::Title, SortOrder::Ascending);
        assert_eq!(titles(&movies, &by_title), vec!["March", "Mars Attacks"]);
    }

    #[test]
    fn title_sort_is_case_insensitive() {
        let movies = vec![movie(1, "alpha", ""), movie(2, "Beta", ""), movie(3, "ALMA", "")];
        let order = transform(&movies, "", SortKey::Title, SortOrder::Ascending);
        assert_eq!(titles(&movies, &order), vec!["ALMA", "alpha", "Beta"]);
    }

    #[test]
    fn descending_reverses_ascending_without_equal_keys() {
        let mut movies = vec![
            movie(1, "A", ""),
            movie(2, "B", ""),
            movie(3, "C", ""),
        ];
        movies[0].vote_average = 3.0;
        movies[1].vote_average = 1.0;
        movies[2].vote_average = 2.0;

        let asc = transform(&movies, "", SortKey::VoteAverage, SortOrder::Ascending);
        let mut rev = asc.clone();
        rev.reverse();
        let desc = transform(&movies, "", SortKey::VoteAverage, SortOrder::Descending);
        assert_eq!(desc, rev);
    }

    #[test]
    fn missing_dates_sort_first_ascending_last_descending() {
        let mut movies = vec![
            movie(1, "Dated", ""),
            movie(2, "Undated", ""),
            movie(3, "Empty", ""),
        ];
        movies[0].release_date = Some("2001-05-01".into());
        movies[2].release_date = Some(String::new());

        let asc = transform(&movies, "", SortKey::ReleaseDate, SortOrder::Ascending);
        assert_eq!(titles(&movies, &asc), vec!["Undated", "Empty", "Dated"]);

        let desc = transform(&movies, "", SortKey::ReleaseDate, SortOrder::Descending);
        assert_eq!(titles(&movies, &desc)[0], "Dated");
    }

    #[test]
    fn stable_sort_preserves_order_of_equal_keys() {
        let mut movies = vec![movie(1, "X", ""), movie(2, "Y", ""), movie(3, "Z", "")];
        for m in &mut movies {
            m.popularity = 7.5;
        }
        let asc = transform(&movies, "", SortKey::Popularity, SortOrder::Ascending);
        assert_eq!(asc, vec![0, 1, 2]);
        let desc = transform(&movies, "", SortKey::Popularity, SortOrder::Descending);
        assert_eq!(desc, vec![0, 1, 2]);
    }

    #[test]
    fn highlight_marks_each_occurrence() {
        let spans = highlight("Mars Attacks on mars", "mar");
        let marked: Vec<&str> = spans
            .iter()
            .filter(|s| s.matched)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(marked, vec!["Mar", "mar"]);
        // reassembly is lossless
        let joined: String = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(joined, "Mars Attacks on mars");
    }

    #[test]
    fn highlight_empty_query_is_noop() {
        let spans = highlight("anything", "");
        assert_eq!(
            spans,
            vec![HighlightSpan { text: "anything".into(), matched: false }]
        );
    }

    #[test]
    fn highlight_escapes_regex_metacharacters() {
        for q in [".", "*", "+", "(", ")", "a.c", "(?i)", "[a-z]"] {
            let spans = highlight("plain text without those literals", q);
            assert!(
                spans.iter().all(|s| !s.matched),
                "query {q:?} must not match"
            );
        }
        // and a literal metacharacter in the text does match
        let spans = highlight("C++ rocks", "c++");
        assert!(spans.iter().any(|s| s.matched && s.text == "C++"));
    }

    #[test]
    fn highlight_whitespace_query_never_panics() {
        let spans = highlight("a b", "   ");
        let joined: String = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(joined, "a b");
    }
}
