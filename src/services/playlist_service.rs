use async_trait::async_trait;

use crate::domain::playlist::{
    CreatedPlaylist, PlaylistSummary, playlist_description, playlist_name,
};
use crate::domain::track::ResolvedTrack;
use crate::services::error::PlaylistError;

/// The streaming-service operations playlist assembly needs. `SpotifyClient`
/// is the real implementation; tests substitute an offline fake.
#[async_trait]
pub trait MusicBackend {
    async fn current_user_id(&self) -> Result<String, PlaylistError>;
    async fn search_track(&self, title: &str) -> Result<Option<ResolvedTrack>, PlaylistError>;
    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
    ) -> Result<CreatedPlaylist, PlaylistError>;
    async fn add_tracks(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> Result<(), PlaylistError>;
}

pub struct PlaylistService<B> {
    backend: B,
}

impl<B: MusicBackend> PlaylistService<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Resolves each title to its top search hit and creates a public
    /// playlist holding the hits in chart order. Titles without a catalog
    /// match are skipped with a warning. Every run creates a fresh playlist.
    pub async fn build(
        &self,
        date: &str,
        titles: Vec<String>,
    ) -> Result<PlaylistSummary, PlaylistError> {
        let user_id = self.backend.current_user_id().await?;

        let mut track_ids = Vec::with_capacity(titles.len());
        for title in &titles {
            match self.backend.search_track(title).await? {
                Some(track) => {
                    tracing::info!("Resolved {track}");
                    track_ids.push(track.id);
                }
                None => tracing::warn!("No catalog match for {title:?}, skipping"),
            }
        }

        let playlist = self
            .backend
            .create_playlist(&user_id, &playlist_name(date), &playlist_description(date))
            .await?;

        if !track_ids.is_empty() {
            self.backend.add_tracks(&playlist.id, &track_ids).await?;
        }

        Ok(PlaylistSummary {
            id: playlist.id,
            name: playlist.name,
            track_count: track_ids.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeBackend {
        hits: HashMap<String, String>,
        playlist_counter: AtomicUsize,
        created: Mutex<Vec<(String, String, String)>>,
        added: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl FakeBackend {
        fn with_hits(hits: &[(&str, &str)]) -> Self {
            Self {
                hits: hits
                    .iter()
                    .map(|(title, id)| (title.to_string(), id.to_string()))
                    .collect(),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl MusicBackend for FakeBackend {
        async fn current_user_id(&self) -> Result<String, PlaylistError> {
            Ok("listener".to_owned())
        }

        async fn search_track(&self, title: &str) -> Result<Option<ResolvedTrack>, PlaylistError> {
            Ok(self.hits.get(title).map(|id| ResolvedTrack {
                title: title.to_owned(),
                id: id.clone(),
            }))
        }

        async fn create_playlist(
            &self,
            user_id: &str,
            name: &str,
            description: &str,
        ) -> Result<CreatedPlaylist, PlaylistError> {
            assert_eq!(user_id, "listener");
            let id = format!(
                "playlist-{}",
                self.playlist_counter.fetch_add(1, Ordering::SeqCst)
            );
            self.created.lock().unwrap().push((
                id.clone(),
                name.to_owned(),
                description.to_owned(),
            ));
            Ok(CreatedPlaylist {
                id,
                name: name.to_owned(),
            })
        }

        async fn add_tracks(
            &self,
            playlist_id: &str,
            track_ids: &[String],
        ) -> Result<(), PlaylistError> {
            self.added
                .lock()
                .unwrap()
                .push((playlist_id.to_owned(), track_ids.to_vec()));
            Ok(())
        }
    }

    fn titles(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[tokio::test]
    async fn resolved_tracks_keep_chart_order() {
        let service = PlaylistService::new(FakeBackend::with_hits(&[
            ("Song A", "aaa111"),
            ("Song B", "bbb222"),
        ]));

        let summary = service
            .build("2005-06-13", titles(&["Song A", "Song B"]))
            .await
            .unwrap();

        assert_eq!(summary.name, "MYI 2005-06-13");
        assert_eq!(summary.track_count, 2);

        let added = service.backend.added.lock().unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].1, vec!["aaa111".to_owned(), "bbb222".to_owned()]);
    }

    #[tokio::test]
    async fn unmatched_titles_are_skipped() {
        let service = PlaylistService::new(FakeBackend::with_hits(&[
            ("Song A", "aaa111"),
            ("Song B", "bbb222"),
        ]));

        let summary = service
            .build("2005-06-13", titles(&["Song A", "Gone Missing", "Song B"]))
            .await
            .unwrap();

        assert_eq!(summary.track_count, 2);
        let added = service.backend.added.lock().unwrap();
        assert_eq!(added[0].1, vec!["aaa111".to_owned(), "bbb222".to_owned()]);
    }

    #[tokio::test]
    async fn empty_chart_still_creates_an_empty_playlist() {
        let service = PlaylistService::new(FakeBackend::default());

        let summary = service.build("1999-01-01", Vec::new()).await.unwrap();

        assert_eq!(summary.track_count, 0);
        assert_eq!(service.backend.created.lock().unwrap().len(), 1);
        assert!(service.backend.added.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn repeated_runs_create_distinct_playlists() {
        let service = PlaylistService::new(FakeBackend::with_hits(&[("Song A", "aaa111")]));

        let first = service
            .build("2005-06-13", titles(&["Song A"]))
            .await
            .unwrap();
        let second = service
            .build("2005-06-13", titles(&["Song A"]))
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn description_embeds_the_chosen_date() {
        let service = PlaylistService::new(FakeBackend::default());
        service.build("2005-06-13", Vec::new()).await.unwrap();

        let created = service.backend.created.lock().unwrap();
        assert!(created[0].2.contains("2005-06-13"));
    }

    #[tokio::test]
    async fn repeated_titles_are_searched_again() {
        let service = PlaylistService::new(FakeBackend::with_hits(&[("Song A", "aaa111")]));

        let summary = service
            .build("2005-06-13", titles(&["Song A", "Song A"]))
            .await
            .unwrap();

        assert_eq!(summary.track_count, 2);
        let added = service.backend.added.lock().unwrap();
        assert_eq!(added[0].1, vec!["aaa111".to_owned(), "aaa111".to_owned()]);
    }
}
