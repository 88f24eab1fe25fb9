use std::fmt;

/// A chart title resolved to the top catalog search hit for it. The id is the
/// bare track identifier, with no guarantee the hit is the intended song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTrack {
    pub title: String,
    pub id: String,
}

impl fmt::Display for ResolvedTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.id)
    }
}
