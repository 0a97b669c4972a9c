//! Top songs

use super::placeholder;
use crate::backend::schema::{Song, TopSongsResponse};
use crate::backend::{fetch, Endpoint, FetchResult};
use crate::dashboard::Dashboard;
use crate::document::{ids, Document};
use crate::format::{escape_html, format_number};

pub fn render_top_songs(songs: &[Song]) -> String {
    if songs.is_empty() {
        return placeholder("No songs played yet");
    }

    songs
        .iter()
        .enumerate()
        .map(|(index, song)| {
            format!(
                r#"<div class="song-item"><div class="song-rank">#{}</div><div class="song-info"><div class="song-title">{}</div><div class="song-artist">{}</div></div><div class="song-plays">{} plays</div></div>"#,
                index + 1,
                escape_html(&song.title),
                escape_html(&song.artist),
                format_number(song.plays),
            )
        })
        .collect()
}

pub async fn load(dashboard: &Dashboard) -> FetchResult<()> {
    let limit = dashboard.settings().music_limit;
    let response: TopSongsResponse =
        fetch(dashboard.backend(), Endpoint::TopSongs { limit }).await?;

    let html = render_top_songs(&response.top_songs);
    dashboard.document().write().await.set_html(ids::MUSIC, html);

    Ok(())
}

pub fn show_error(doc: &mut Document) {
    doc.set_html(ids::MUSIC, placeholder("Error loading data"));
}
