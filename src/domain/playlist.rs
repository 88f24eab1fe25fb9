use std::fmt;

pub fn playlist_name(date: &str) -> String {
    format!("MYI {date}")
}

pub fn playlist_description(date: &str) -> String {
    format!("generated playlist from date chosen as:{date}")
}

/// A freshly created, still empty playlist on the streaming service.
#[derive(Debug, Clone)]
pub struct CreatedPlaylist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub track_count: usize,
}

impl fmt::Display for PlaylistSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} tracks, id {})", self.name, self.track_count, self.id)
    }
}
