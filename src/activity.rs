use crate::api::request::TimeRange;
use crate::api::response::{Artist, TopItems, Track};
use crate::api::Spotify;
use crate::Error;

/// The track the user can't get enough of lately
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentTrack {
    pub artist: String,
    pub artist_url: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitySummary {
    pub recent_track: RecentTrack,
    pub top_genre_long_term: String,
    pub top_genre_short_term: String,
}

impl ActivitySummary {
    /// Fetch the most played track and the top genres of the long and short term.
    ///
    /// The three reads run concurrently; any failure aborts the whole summary.
    pub async fn fetch(spotify: &Spotify) -> Result<Self, Error> {
        let (tracks, long_term, short_term) = futures::try_join!(
            spotify.top_tracks(TimeRange::Short, 1),
            spotify.top_artists(TimeRange::Long, 1),
            spotify.top_artists(TimeRange::Short, 1),
        )?;

        Ok(Self {
            recent_track: RecentTrack::from_top(tracks)?,
            top_genre_long_term: top_genre(long_term, TimeRange::Long)?,
            top_genre_short_term: top_genre(short_term, TimeRange::Short)?,
        })
    }
}

impl RecentTrack {
    fn from_top(top: TopItems<Track>) -> Result<Self, Error> {
        let track = top
            .items
            .into_iter()
            .next()
            .ok_or_else(|| Error::DataShape(format!("no top tracks for {}", TimeRange::Short)))?;

        // Credit the album artist, the track artist only covers albums without one
        let artist = track
            .album
            .artists
            .into_iter()
            .next()
            .or_else(|| track.artists.into_iter().next())
            .ok_or_else(|| Error::DataShape(format!("track `{}` has no artists", track.name)))?;

        Ok(Self {
            artist: artist.name,
            artist_url: artist.external_urls.spotify,
            title: track.name,
            url: track.external_urls.spotify,
        })
    }
}

fn top_genre(top: TopItems<Artist>, range: TimeRange) -> Result<String, Error> {
    let artist = top
        .items
        .into_iter()
        .next()
        .ok_or_else(|| Error::DataShape(format!("no top artists for {range}")))?;

    artist
        .genres
        .into_iter()
        .next()
        .ok_or_else(|| {
            Error::DataShape(format!("top artist `{}` for {range} has no genres", artist.name))
        })
}
