use serde::Deserialize;

#[macro_export]
macro_rules! pares {
    ($value: expr) => {
        {
            let jd = &mut serde_json::Deserializer::from_str($value);
            serde_path_to_error::deserialize(jd)
        }
    };
}

pub use crate::pares;

/// Known external URLs for an object
#[derive(Default, Debug, Clone, Deserialize, PartialEq)]
pub struct ExternalUrls {
    /// The Spotify URL for the object.
    pub spotify: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimplifiedArtist {
    /// Known external URLs for this artist.
    pub external_urls: ExternalUrls,
    /// The name of the artist.
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Artist {
    /// Known external URLs for this artist.
    pub external_urls: ExternalUrls,
    /// A list of the genres the artist is associated with. If not yet classified, the array is
    /// empty.
    #[serde(default = "Vec::new")]
    pub genres: Vec<String>,
    pub id: String,
    /// The name of the artist.
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimplifiedAlbum {
    /// The artists of the album.
    #[serde(default = "Vec::new")]
    pub artists: Vec<SimplifiedArtist>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Track {
    /// The album on which the track appears.
    pub album: SimplifiedAlbum,
    /// The artists who performed the track.
    #[serde(default = "Vec::new")]
    pub artists: Vec<SimplifiedArtist>,
    /// Known external URLs for this track.
    pub external_urls: ExternalUrls,
    pub id: String,
    /// The name of the track.
    pub name: String,
}

/// Page returned by `/me/top/{type}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopItems<T> {
    /// The maximum number of items in the response (as set in the query or by default).
    #[serde(default)]
    pub limit: usize,
    /// The offset of the items returned (as set in the query or by default)
    #[serde(default)]
    pub offset: usize,
    /// The total number of items available to return.
    #[serde(default)]
    pub total: usize,
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorData {
    pub status: u16,
    pub message: String,
}

/// Regular error object of the spotify web api
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: ErrorData,
}
