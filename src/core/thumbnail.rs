use crate::domain::model::Record;
use url::Url;

const THUMBNAIL_BASE: &str = "https://img.youtube.com/vi";
const THUMBNAIL_QUALITY: &str = "hqdefault.jpg";

/// 從影片連結取出 YouTube 影片 ID
///
/// `youtube.com` hosts carry the id in the `v` query parameter, `youtu.be`
/// short links in the first path segment. Anything unparsable yields `None`.
pub fn youtube_video_id(video_url: &str) -> Option<String> {
    let parsed = Url::parse(video_url).ok()?;
    let host = parsed.host_str()?;

    let id = if host.contains("youtube.com") {
        parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
    } else if host.contains("youtu.be") {
        parsed
            .path_segments()
            .and_then(|mut segments| segments.next())
            .map(str::to_string)
    } else {
        None
    };

    id.filter(|id| !id.is_empty())
}

pub fn thumbnail_url_for_id(video_id: &str) -> String {
    format!("{}/{}/{}", THUMBNAIL_BASE, video_id, THUMBNAIL_QUALITY)
}

/// A non-empty thumbnail supplied by the backend wins; otherwise derive one from the link.
pub fn resolve_thumbnail(video_url: Option<&str>, api_thumbnail: Option<&str>) -> Option<String> {
    if let Some(thumbnail) = api_thumbnail.filter(|t| !t.is_empty()) {
        return Some(thumbnail.to_string());
    }

    video_url
        .and_then(youtube_video_id)
        .map(|id| thumbnail_url_for_id(&id))
}

pub fn thumbnail_for(record: &Record) -> Option<String> {
    resolve_thumbnail(record.get_str("url"), record.get_str("thumbnail_url"))
}
