/// A search hit from the music catalog.
#[derive(Debug, Clone)]
pub struct CatalogTrack {
    /// Spotify track URI, e.g. `spotify:track:4uLU6hMCjMI75M1A2tKUQC`.
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album: String,
    pub popularity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Private,
    Public,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSpec {
    pub name: String,
    pub description: String,
    pub visibility: Visibility,
}

impl PlaylistSpec {
    /// Name and description for the chart playlist of `date` (`YYYY-MM-DD`).
    pub fn for_chart_date(date: &str) -> Self {
        Self {
            name: format!("{} top 100 songs", date),
            description: format!("Billboard Hot 100 for {}", date),
            visibility: Visibility::Private,
        }
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

#[cfg(test)]
impl CatalogTrack {
    pub fn mock(id: &str, name: &str, artist: &str) -> Self {
        Self {
            id: format!("spotify:track:{}", id),
            name: name.to_string(),
            artists: vec![artist.to_string()],
            album: "Mock Album".to_string(),
            popularity: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playlist_spec_for_chart_date() {
        let spec = PlaylistSpec::for_chart_date("2023-06-15");

        assert_eq!(spec.name, "2023-06-15 top 100 songs");
        assert_eq!(spec.description, "Billboard Hot 100 for 2023-06-15");
        assert_eq!(spec.visibility, Visibility::Private);
        assert!(!spec.is_public());
    }
}
