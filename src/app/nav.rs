// src/app/nav.rs
use crate::tmdb::MovieSummary;

pub type MovieId = u64;

/// Id sequence in render order — what the detail view pages through.
pub fn result_ids(movies: &[MovieSummary], order: &[usize]) -> Vec<MovieId> {
    order.iter().filter_map(|&i| movies.get(i)).map(|m| m.id).collect()
}

/// Prev/next position within the sequence the user was browsing when they
/// opened the detail view. The sequence is inherited from the originating
/// view; without one (direct entry) it resolves lazily to the default
/// popular-movies order, fetched by the caller only in that case.
pub struct Navigator {
    sequence: Vec<MovieId>,
    awaiting_fallback: bool,
}

impl Navigator {
    pub fn new(inherited: Option<Vec<MovieId>>) -> Self {
        match inherited {
            Some(seq) if !seq.is_empty() => Self {
                sequence: seq,
                awaiting_fallback: false,
            },
            _ => Self {
                sequence: Vec::new(),
                awaiting_fallback: true,
            },
        }
    }

    /// True until a fallback sequence arrives; the caller uses this to
    /// decide whether to issue the extra popular-movies fetch at all.
    pub fn needs_fallback(&self) -> bool {
        self.awaiting_fallback
    }

    /// Install the default sequence. Ignored when an inherited sequence
    /// exists — navigation context always wins over the fallback.
    pub fn resolve_fallback(&mut self, ids: Vec<MovieId>) {
        if self.awaiting_fallback {
            self.sequence = ids;
            self.awaiting_fallback = false;
        }
    }

    pub fn sequence(&self) -> &[MovieId] {
        &self.sequence
    }

    pub fn current_index(&self, id: MovieId) -> Option<usize> {
        self.sequence.iter().position(|&x| x == id)
    }

    pub fn previous(&self, id: MovieId) -> Option<MovieId> {
        let idx = self.current_index(id)?;
        if idx == 0 {
            return None;
        }
        self.sequence.get(idx - 1).copied()
    }

    pub fn next(&self, id: MovieId) -> Option<MovieId> {
        let idx = self.current_index(id)?;
        self.sequence.get(idx + 1).copied()
    }
}
