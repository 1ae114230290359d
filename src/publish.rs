use crate::activity::ActivitySummary;
use crate::gist::{Gist, GistUpdate, Gists};
use crate::Error;

pub const CANONICAL_FILENAME: &str = "spotify-activity.md";

fn genre_search(genre: &str) -> String {
    format!(
        "https://duckduckgo.com/?q={}",
        urlencoding::encode(&format!("{genre} music"))
    )
}

/// Escape text placed inside markup, attribute values included
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn link(href: &str, text: &str) -> String {
    format!("<a href=\"{}\">{}</a>", escape(href), escape(text))
}

/// Render the summary into the gist text
pub fn render(summary: &ActivitySummary) -> String {
    let track = &summary.recent_track;
    let long_term = &summary.top_genre_long_term;
    let short_term = &summary.top_genre_short_term;

    format!(
        "Currently, I can't get enough of the song {} by {} on Spotify.\n\
         \n\
         My most listened genre is {}.\n\
         Still, I've been listening to a lot of {} lately.\n",
        link(&track.url, &track.title),
        link(&track.artist_url, &track.artist),
        link(&genre_search(long_term), long_term),
        link(&genre_search(short_term), short_term),
    )
}

/// Writes the summary into the first file of a single gist
#[derive(Debug, Clone)]
pub struct Publisher {
    gists: Gists,
    gist_id: String,
    filename: String,
}

impl Publisher {
    pub fn new<S: Into<String>>(gists: Gists, gist_id: S) -> Self {
        Self {
            gists,
            gist_id: gist_id.into(),
            filename: CANONICAL_FILENAME.to_string(),
        }
    }

    pub fn with_filename<S: Into<String>>(mut self, filename: S) -> Self {
        self.filename = filename.into();
        self
    }

    /// Build the update that renames the gist's first file and replaces its content
    pub fn prepare(&self, gist: &Gist, content: String) -> Result<GistUpdate, Error> {
        let (current, _) = gist
            .first_file()
            .ok_or_else(|| Error::DocumentNotFound(format!("gist {} has no files", gist.id)))?;

        Ok(GistUpdate::default().rename(current.as_str(), self.filename.as_str(), content))
    }

    pub async fn publish(&self, summary: &ActivitySummary) -> Result<Gist, Error> {
        let gist = self.gists.get(&self.gist_id).await?;
        let update = self.prepare(&gist, render(summary))?;

        log::info!("Updating gist {} as {}", self.gist_id, self.filename);
        self.gists.update(&self.gist_id, &update).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::activity::RecentTrack;

    fn summary() -> ActivitySummary {
        ActivitySummary {
            recent_track: RecentTrack {
                artist: "Slowdive".into(),
                artist_url: "https://open.spotify.com/artist/a1".into(),
                title: "Alison".into(),
                url: "https://open.spotify.com/track/t1".into(),
            },
            top_genre_long_term: "shoegaze".into(),
            top_genre_short_term: "hip hop".into(),
        }
    }

    const RENDERED: &str = "Currently, I can't get enough of the song \
        <a href=\"https://open.spotify.com/track/t1\">Alison</a> by \
        <a href=\"https://open.spotify.com/artist/a1\">Slowdive</a> on Spotify.\n\
        \n\
        My most listened genre is \
        <a href=\"https://duckduckgo.com/?q=shoegaze%20music\">shoegaze</a>.\n\
        Still, I've been listening to a lot of \
        <a href=\"https://duckduckgo.com/?q=hip%20hop%20music\">hip hop</a> lately.\n";

    #[test]
    fn render_links_track_artist_and_genres() {
        assert_eq!(render(&summary()), RENDERED);
    }

    #[test]
    fn render_escapes_link_text() {
        let mut summary = summary();
        summary.recent_track.title = "<3".into();
        summary.recent_track.artist = "Simon & Garfunkel".into();
        summary.top_genre_long_term = "r&b".into();

        let rendered = render(&summary);

        assert!(rendered.contains("<a href=\"https://open.spotify.com/track/t1\">&lt;3</a>"));
        assert!(rendered.contains(">Simon &amp; Garfunkel</a>"));
        let genre = "<a href=\"https://duckduckgo.com/?q=r%26b%20music\">r&amp;b</a>";
        assert!(rendered.contains(genre));
        assert!(!rendered.contains("<3"));
    }

    #[test]
    fn prepare_targets_only_the_first_file() {
        let gist: Gist = serde_json::from_value(json!({
            "id": "abc",
            "files": {
                "notes.md": {"filename": "notes.md", "content": "a"},
                "other.md": {"filename": "other.md", "content": "b"},
            },
        }))
        .unwrap();

        let update = Publisher::new(Gists::new("gh"), "abc")
            .prepare(&gist, "text".into())
            .unwrap();

        assert_eq!(update, GistUpdate::default().rename("notes.md", CANONICAL_FILENAME, "text"));
    }

    #[test]
    fn prepare_rejects_gist_without_files() {
        let gist: Gist = serde_json::from_value(json!({"id": "abc", "files": {}})).unwrap();
        let err = Publisher::new(Gists::new("gh"), "abc")
            .prepare(&gist, "text".into())
            .unwrap_err();

        assert_eq!(err, Error::DocumentNotFound("gist abc has no files".into()));
    }

    #[tokio::test]
    async fn publish_renames_and_rewrites_first_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gists/abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "abc",
                "files": {"file1.md": {"filename": "file1.md", "content": "old"}},
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/gists/abc"))
            .and(body_json(json!({
                "files": {"file1.md": {"filename": CANONICAL_FILENAME, "content": RENDERED}},
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "abc",
                "files": {
                    CANONICAL_FILENAME: {"filename": CANONICAL_FILENAME, "content": RENDERED},
                },
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gists = Gists::new("gh").with_base_url(server.uri());
        let gist = Publisher::new(gists, "abc").publish(&summary()).await.unwrap();

        assert_eq!(gist.id, "abc");
        assert_eq!(gist.files.len(), 1);
        let (name, file) = gist.first_file().unwrap();
        assert_eq!(name, CANONICAL_FILENAME);
        assert_eq!(file.content.as_deref(), Some(RENDERED));
    }

    #[tokio::test]
    async fn failed_fetch_never_updates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let gists = Gists::new("gh").with_base_url(server.uri());
        let err = Publisher::new(gists, "abc").publish(&summary()).await.unwrap_err();

        assert!(matches!(err, Error::DocumentNotFound(_)));
    }
}
