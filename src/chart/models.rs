/// One (title, artist) pair from a chart listing. Rank is the position in the
/// surrounding sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartEntry {
    pub title: String,
    pub artist: String,
}

impl ChartEntry {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }

    /// Free-text catalog query for this entry.
    pub fn search_query(&self) -> String {
        format!("{} {}", self.title, self.artist)
    }
}

impl std::fmt::Display for ChartEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.title, self.artist)
    }
}
