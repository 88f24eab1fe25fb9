use async_trait::async_trait;
use rspotify::model::{PlayableId, PlaylistId, SearchResult, SearchType, TrackId, UserId};
use rspotify::{AuthCodeSpotify, prelude::*};

use crate::domain::playlist::CreatedPlaylist;
use crate::domain::track::ResolvedTrack;
use crate::infrastructure::auth::TokenProvider;
use crate::services::error::PlaylistError;
use crate::services::playlist_service::MusicBackend;

pub struct SpotifyClient {
    client: AuthCodeSpotify,
}

impl SpotifyClient {
    /// Obtains an access token from the provider and wraps an authenticated
    /// client around it. The token is held for the rest of the run.
    pub async fn connect(tokens: &dyn TokenProvider) -> Result<Self, PlaylistError> {
        let token = tokens.obtain().await?;
        Ok(Self {
            client: AuthCodeSpotify::from_token(token),
        })
    }
}

#[async_trait]
impl MusicBackend for SpotifyClient {
    async fn current_user_id(&self) -> Result<String, PlaylistError> {
        let user = self.client.current_user().await?;
        Ok(user.id.id().to_owned())
    }

    async fn search_track(&self, title: &str) -> Result<Option<ResolvedTrack>, PlaylistError> {
        let result = self
            .client
            .search(title, SearchType::Track, None, None, Some(1), None)
            .await?;

        let SearchResult::Tracks(page) = result else {
            return Ok(None);
        };

        Ok(page
            .items
            .into_iter()
            .next()
            .and_then(|track| track.id)
            .map(|id| ResolvedTrack {
                title: title.to_owned(),
                id: id.id().to_owned(),
            }))
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
    ) -> Result<CreatedPlaylist, PlaylistError> {
        let user = UserId::from_id(user_id)?;
        let playlist = self
            .client
            .user_playlist_create(user, name, Some(true), Some(false), Some(description))
            .await?;

        Ok(CreatedPlaylist {
            id: playlist.id.id().to_owned(),
            name: playlist.name,
        })
    }

    async fn add_tracks(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> Result<(), PlaylistError> {
        let playlist = PlaylistId::from_id(playlist_id)?;
        let items = track_ids
            .iter()
            .map(|id| TrackId::from_id(id.as_str()).map(PlayableId::Track))
            .collect::<Result<Vec<_>, _>>()?;

        self.client.playlist_add_items(playlist, items, None).await?;
        Ok(())
    }
}
