// file: src/report/render.rs
// description: self-contained html page for the grouped dataset
// reference: string assembly with std::fmt::Write

use crate::report::grouper::ChannelGroup;
use crate::utils::template::{escape_html, format_number, pluralize};
use std::fmt::Write;

const AVATAR_PLACEHOLDER: &str = r#"<div class="channel-avatar missing">👤</div>"#;
const THUMBNAIL_PLACEHOLDER: &str =
    r#"<div class="video-thumbnail missing">Miniature non disponible</div>"#;
const AVATAR_FALLBACK_JS: &str = r#"this.onerror=null; this.outerHTML='<div class=\'channel-avatar missing\'>👤</div>'"#;
const THUMBNAIL_FALLBACK_JS: &str = r#"this.onerror=null; this.outerHTML='<div class=\'video-thumbnail missing\'>Miniature non disponible</div>'"#;
const UNTITLED: &str = "Sans titre";

const STYLE: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif;
            background-color: #0f0f0f;
            color: #fff;
            padding: 20px;
        }
        .header { text-align: center; margin-bottom: 40px; padding: 20px; background-color: #1a1a1a; border-radius: 12px; }
        .header h1 {
            font-size: 2.5em;
            margin-bottom: 10px;
            background: linear-gradient(45deg, #ff0000, #ff4444);
            -webkit-background-clip: text;
            -webkit-text-fill-color: transparent;
        }
        .stats { display: flex; justify-content: center; gap: 40px; margin-top: 20px; }
        .stat { text-align: center; }
        .stat-value { font-size: 2em; font-weight: bold; color: #ff4444; }
        .stat-label { font-size: 0.9em; color: #aaa; }
        .channel-section { margin-bottom: 60px; background-color: #1a1a1a; border-radius: 12px; padding: 20px; border: 1px solid #2a2a2a; }
        .channel-header { display: flex; align-items: center; gap: 20px; margin-bottom: 20px; padding-bottom: 20px; border-bottom: 2px solid #333; }
        .channel-avatar { width: 80px; height: 80px; border-radius: 50%; object-fit: cover; border: 3px solid #ff4444; }
        .channel-avatar.missing { background-color: #333; display: flex; align-items: center; justify-content: center; font-size: 36px; color: #666; }
        .channel-info { flex: 1; }
        .channel-name { font-size: 1.8em; font-weight: bold; margin-bottom: 5px; }
        .video-count { font-size: 1.1em; color: #aaa; }
        .video-count span { color: #ff4444; font-weight: bold; }
        .videos-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 15px; }
        .video-item { position: relative; background-color: #222; border-radius: 8px; overflow: hidden; transition: transform 0.3s, box-shadow 0.3s; }
        .video-item:hover { transform: translateY(-4px); box-shadow: 0 8px 20px rgba(255, 68, 68, 0.3); }
        .video-thumbnail { width: 100%; aspect-ratio: 16/9; object-fit: cover; }
        .video-thumbnail.missing {
            background-color: #333; display: flex; align-items: center; justify-content: center;
            color: #666; font-size: 14px; text-align: center; padding: 10px;
        }
        .video-views {
            position: absolute; bottom: 5px; right: 5px;
            background-color: rgba(0, 0, 0, 0.8); color: #fff;
            padding: 2px 6px; border-radius: 4px; font-size: 12px;
        }
        .timestamp { text-align: center; color: #666; font-size: 0.9em; margin-top: 40px; }
"#;

/// Builds the whole page. `generated_at` is printed verbatim in the footer.
pub fn render_html(groups: &[ChannelGroup<'_>], title: &str, generated_at: &str) -> String {
    let total_videos: usize = groups.iter().map(ChannelGroup::len).sum();
    let title = escape_html(title);
    let mut html = String::with_capacity(4096 + total_videos * 512);

    // fmt::Write for String never fails
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Visualisation Base de Données YouTube - {title}</title>
    <style>{STYLE}    </style>
</head>
<body>
    <div class="header">
        <h1>{title} - Base de Données</h1>
        <div class="stats">
            <div class="stat">
                <div class="stat-value">{channels}</div>
                <div class="stat-label">YouTubers</div>
            </div>
            <div class="stat">
                <div class="stat-value">{videos}</div>
                <div class="stat-label">Vidéos</div>
            </div>
        </div>
    </div>
"#,
        channels = groups.len(),
        videos = format_number(total_videos as u64),
    );

    for group in groups {
        render_channel(&mut html, group);
    }

    let _ = write!(
        html,
        r#"
    <div class="timestamp">
        Généré le {}
    </div>
</body>
</html>"#,
        escape_html(generated_at)
    );

    html
}

fn render_channel(html: &mut String, group: &ChannelGroup<'_>) {
    let name = escape_html(&group.key.channel_title);
    let count = group.len();

    html.push_str(
        r#"
    <div class="channel-section">
        <div class="channel-header">"#,
    );

    match group.key.avatar() {
        Some(url) => {
            let _ = write!(
                html,
                r#"
            <img src="{}" alt="{}" class="channel-avatar"
                 onerror="{}">"#,
                escape_html(url),
                name,
                AVATAR_FALLBACK_JS
            );
        }
        None => {
            let _ = write!(html, "\n            {}", AVATAR_PLACEHOLDER);
        }
    }

    let _ = write!(
        html,
        r#"
            <div class="channel-info">
                <div class="channel-name">{}</div>
                <div class="video-count"><span>{}</span> {}</div>
            </div>
        </div>

        <div class="videos-grid">"#,
        name,
        count,
        pluralize(count, "vidéo")
    );

    for video in &group.videos {
        let title = escape_html(video.title().unwrap_or(UNTITLED));
        let _ = write!(
            html,
            r#"
            <div class="video-item" title="{}">"#,
            title
        );

        match video.thumbnail_url() {
            Some(url) => {
                let _ = write!(
                    html,
                    r#"
                <img src="{}" alt="{}" class="video-thumbnail"
                     onerror="{}">"#,
                    escape_html(url),
                    title,
                    THUMBNAIL_FALLBACK_JS
                );
            }
            None => {
                let _ = write!(html, "\n                {}", THUMBNAIL_PLACEHOLDER);
            }
        }

        let _ = write!(
            html,
            r#"
                <div class="video-views">{} vues</div>
            </div>"#,
            format_number(video.view_count())
        );
    }

    html.push_str(
        r#"
        </div>
    </div>"#,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VideoRecord;
    use crate::report::group_by_channel;
    use serde_json::json;

    fn records() -> Vec<VideoRecord> {
        serde_json::from_value(json!([
            {
                "id": "v1", "channelId": "A", "channelTitle": "Alpha & Co",
                "channelAvatarUrl": "https://yt3.ggpht.com/a.jpg",
                "thumbnailUrl": "https://i.ytimg.com/vi/v1/hq.jpg",
                "title": "Le \"meilleur\" clip", "viewCount": 1234567
            },
            {"id": "v2", "channelId": "A", "channelTitle": "Alpha & Co",
             "channelAvatarUrl": "https://yt3.ggpht.com/a.jpg"},
            {"id": "v3", "channelId": "B", "channelTitle": "Beta", "viewCount": 1}
        ]))
        .unwrap()
    }

    #[test]
    fn test_page_structure_and_totals() {
        let data = records();
        let html = render_html(&group_by_channel(&data), "LaVideoLaPlusVue", "01/02/2026 à 10:00:00");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</html>"));
        assert!(html.contains(r#"<div class="stat-value">2</div>"#));
        assert!(html.contains(r#"<div class="stat-value">3</div>"#));
        assert_eq!(html.matches(r#"<div class="channel-section">"#).count(), 2);
        assert!(html.contains("Généré le 01/02/2026 à 10:00:00"));
    }

    #[test]
    fn test_channel_header_variants() {
        let data = records();
        let html = render_html(&group_by_channel(&data), "t", "now");

        assert!(html.contains(r#"<img src="https://yt3.ggpht.com/a.jpg" alt="Alpha &amp; Co" class="channel-avatar""#));
        assert!(html.contains(AVATAR_PLACEHOLDER));
        assert!(html.contains("<span>2</span> vidéos"));
        assert!(html.contains("<span>1</span> vidéo</div>"));
    }

    #[test]
    fn test_video_tiles() {
        let data = records();
        let html = render_html(&group_by_channel(&data), "t", "now");

        assert!(html.contains(r#"title="Le &quot;meilleur&quot; clip""#));
        assert!(html.contains("1 234 567 vues"));
        assert!(html.contains("0 vues"));
        assert!(html.contains(r#"title="Sans titre""#));
        assert_eq!(html.matches(THUMBNAIL_PLACEHOLDER).count(), 2);
    }

    #[test]
    fn test_empty_dataset_renders() {
        let html = render_html(&[], "t", "now");
        assert!(html.contains(r#"<div class="stat-value">0</div>"#));
        assert!(!html.contains("channel-section\">"));
    }
}
