use strsim::jaro_winkler;

use crate::chart::ChartEntry;
use crate::spotify::CatalogTrack;

const FUZZY_THRESHOLD: f64 = 0.85;

/// Picks the catalog track for a chart entry out of ranked search results.
pub trait TrackSelector: Send + Sync {
    fn select<'a>(
        &self,
        entry: &ChartEntry,
        candidates: &'a [CatalogTrack],
    ) -> Option<&'a CatalogTrack>;
}

/// Highest-ranked search result wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstResult;

impl TrackSelector for FirstResult {
    fn select<'a>(
        &self,
        _entry: &ChartEntry,
        candidates: &'a [CatalogTrack],
    ) -> Option<&'a CatalogTrack> {
        candidates.first()
    }
}

/// First result whose title and one of whose artists equal the entry's,
/// ignoring case and surrounding whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatch;

impl TrackSelector for ExactMatch {
    fn select<'a>(
        &self,
        entry: &ChartEntry,
        candidates: &'a [CatalogTrack],
    ) -> Option<&'a CatalogTrack> {
        candidates.iter().find(|track| is_exact_match(entry, track))
    }
}

/// Best similarity score at or above the threshold.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatch {
    pub threshold: f64,
}

impl Default for FuzzyMatch {
    fn default() -> Self {
        Self {
            threshold: FUZZY_THRESHOLD,
        }
    }
}

impl TrackSelector for FuzzyMatch {
    fn select<'a>(
        &self,
        entry: &ChartEntry,
        candidates: &'a [CatalogTrack],
    ) -> Option<&'a CatalogTrack> {
        let mut best_match: Option<&CatalogTrack> = None;
        let mut best_score: f64 = 0.0;

        for track in candidates {
            let score = calculate_similarity(entry, track);
            if score > best_score && score >= self.threshold {
                best_score = score;
                best_match = Some(track);
            }
        }

        best_match
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MatchStrategy {
    /// Take the top search result
    #[default]
    First,
    /// Require the same title and artist
    Exact,
    /// Accept the closest title/artist above 85% similarity
    Fuzzy,
}

impl MatchStrategy {
    pub fn selector(self) -> Box<dyn TrackSelector> {
        match self {
            MatchStrategy::First => Box::new(FirstResult),
            MatchStrategy::Exact => Box::new(ExactMatch),
            MatchStrategy::Fuzzy => Box::new(FuzzyMatch::default()),
        }
    }
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStrategy::First => write!(f, "first"),
            MatchStrategy::Exact => write!(f, "exact"),
            MatchStrategy::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

/// Similarity between a chart entry and a catalog track.
/// Weighted 50% title + 50% artist, using the best-scoring credited artist.
pub fn calculate_similarity(entry: &ChartEntry, track: &CatalogTrack) -> f64 {
    let title_score = jaro_winkler(&normalize(&entry.title), &normalize(&track.name));

    let entry_artist = normalize(&entry.artist);
    let artist_score = track
        .artists
        .iter()
        .map(|artist| jaro_winkler(&entry_artist, &normalize(artist)))
        .fold(0.0, f64::max);

    title_score * 0.5 + artist_score * 0.5
}

pub fn is_exact_match(entry: &ChartEntry, track: &CatalogTrack) -> bool {
    let title_match = normalize(&entry.title) == normalize(&track.name);
    let entry_artist = normalize(&entry.artist);
    let artist_match = track
        .artists
        .iter()
        .any(|artist| normalize(artist) == entry_artist);

    title_match && artist_match
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
