//! Self-contained Leaflet map documents.
//!
//! The document pulls Leaflet and Leaflet.markercluster from their CDNs and
//! adds one marker per record to a single cluster layer. Everything else is
//! inlined so the output can be opened straight from disk or embedded in an
//! iframe `srcdoc`.

use crate::domain::{Coordinates, LocationRecord};
use std::fmt::Write as _;

const LEAFLET_CSS: &str = "https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css";
const LEAFLET_JS: &str = "https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js";
const CLUSTER_CSS: &str = "https://unpkg.com/leaflet.markercluster@1.4.1/dist/MarkerCluster.css";
const CLUSTER_DEFAULT_CSS: &str =
    "https://unpkg.com/leaflet.markercluster@1.4.1/dist/MarkerCluster.Default.css";
const CLUSTER_JS: &str =
    "https://unpkg.com/leaflet.markercluster@1.4.1/dist/leaflet.markercluster.js";

/// Centre of Japan
pub const DEFAULT_CENTER: Coordinates = Coordinates::new(36.2048, 138.2529);
pub const DEFAULT_ZOOM: u8 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    /// Used when no record matches and there is nothing to average.
    pub default_center: Coordinates,
    pub zoom_start: u8,
    pub tile_url: String,
    pub attribution: String,
    pub title: String,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            default_center: DEFAULT_CENTER,
            zoom_start: DEFAULT_ZOOM,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; OpenStreetMap contributors".to_string(),
            title: "Taquerias en Japon".to_string(),
        }
    }
}

/// Renders the full HTML document for `records`, centred on `center`.
pub fn render_document(
    records: &[&LocationRecord],
    center: Coordinates,
    options: &MapOptions,
) -> String {
    let mut markers = String::new();
    for record in records {
        let _ = writeln!(
            markers,
            "      L.marker([{:.6}, {:.6}]).bindPopup({}).addTo(cluster);",
            record.coordinates.latitude,
            record.coordinates.longitude,
            js_string(&popup_html(record)),
        );
    }

    let title = escape_html(&options.title);
    let count = records.len();

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{title} ({count} locations)</title>
  <link rel="stylesheet" href="{LEAFLET_CSS}" crossorigin="anonymous" />
  <link rel="stylesheet" href="{CLUSTER_CSS}" />
  <link rel="stylesheet" href="{CLUSTER_DEFAULT_CSS}" />
  <script src="{LEAFLET_JS}" crossorigin="anonymous"></script>
  <script src="{CLUSTER_JS}"></script>
  <style>
    html, body {{ height: 100%; margin: 0; }}
    #map {{ position: absolute; inset: 0; }}
  </style>
</head>
<body>
  <div id="map"></div>
  <script>
    (function () {{
      var map = L.map('map').setView([{lat:.6}, {lon:.6}], {zoom});
      L.tileLayer({tiles}, {{ attribution: {attribution}, maxZoom: 19 }}).addTo(map);
      var cluster = L.markerClusterGroup();
{markers}      map.addLayer(cluster);
    }})();
  </script>
</body>
</html>
"#,
        lat = center.latitude,
        lon = center.longitude,
        zoom = options.zoom_start,
        tiles = js_string(&options.tile_url),
        attribution = js_string(&options.attribution),
    )
}

/// Popup label for one record. Optional fields that are absent drop their line.
pub fn popup_html(record: &LocationRecord) -> String {
    let mut lines = vec![format!("<b>{}</b>", escape_html(&record.name_primary))];

    if let Some(name) = &record.name_secondary {
        lines.push(escape_html(name));
    }
    if let Some(address) = &record.address_primary {
        lines.push(format!("Address: {}", escape_html(address)));
    }
    if let Some(address) = &record.address_secondary {
        lines.push(escape_html(address));
    }
    lines.push(format!("Rating: {}", format_rating(record.rating)));
    lines.push(format!("Reviews: {}", record.reviews));
    if let Some(url) = record.webpage.as_deref().filter(|url| is_web_url(url)) {
        lines.push(format!(
            r#"<a href="{}" target="_blank" rel="noopener">Website</a>"#,
            escape_html(url)
        ));
    }

    lines.join("<br>")
}

/// The rating exactly as stored, keeping one decimal for whole numbers.
pub fn format_rating(rating: f64) -> String {
    let text = rating.to_string();
    if text.contains('.') || !rating.is_finite() {
        text
    } else {
        format!("{text}.0")
    }
}

fn is_web_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// A JavaScript string literal that cannot close the surrounding `<script>`.
fn js_string(text: &str) -> String {
    serde_json::Value::String(text.to_string())
        .to_string()
        .replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> LocationRecord {
        LocationRecord {
            coordinates: Coordinates::new(35.6595, 139.7005),
            name_primary: "タコス渋谷".to_string(),
            name_secondary: Some("Tacos <El> Pata".to_string()),
            address_primary: Some("渋谷区".to_string()),
            address_secondary: None,
            rating: 4.5,
            reviews: 100,
            webpage: Some("https://example.com/?a=1&b=2".to_string()),
        }
    }

    #[test]
    fn popup_lists_fields_and_link() {
        let popup = popup_html(&record());

        assert!(popup.starts_with("<b>タコス渋谷</b><br>"));
        assert!(popup.contains("Tacos &lt;El&gt; Pata"));
        assert!(popup.contains("Address: 渋谷区"));
        assert!(popup.contains("Rating: 4.5<br>Reviews: 100"));
        assert!(popup.contains(r#"href="https://example.com/?a=1&amp;b=2""#));
    }

    #[test]
    fn popup_shows_rating_unrounded() {
        let mut record = record();
        record.rating = 4.25;
        assert!(popup_html(&record).contains("Rating: 4.25<br>"));

        record.rating = 4.35;
        assert!(popup_html(&record).contains("Rating: 4.35<br>"));

        record.rating = 4.0;
        assert!(popup_html(&record).contains("Rating: 4.0<br>"));
    }

    #[test]
    fn popup_skips_non_web_links() {
        let mut record = record();
        record.webpage = Some("javascript:alert(1)".to_string());

        let popup = popup_html(&record);
        assert!(!popup.contains("href"));
        assert!(popup.ends_with("Reviews: 100"));
    }

    #[test]
    fn document_has_one_marker_per_record_in_one_cluster() {
        let first = record();
        let mut second = record();
        second.coordinates = Coordinates::new(34.6937, 135.5023);

        let html = render_document(&[&first, &second], first.coordinates, &MapOptions::default());

        assert_eq!(html.matches("L.marker(").count(), 2);
        assert_eq!(html.matches("L.markerClusterGroup()").count(), 1);
        assert!(html.contains("L.marker([34.693700, 135.502300])"));
        assert!(html.contains("setView([35.659500, 139.700500], 5)"));
        assert!(html.contains("(2 locations)"));
    }

    #[test]
    fn popup_cannot_close_script_element() {
        let mut record = record();
        record.name_primary = "</script><script>alert(1)".to_string();
        record.address_primary = None;
        record.name_secondary = None;

        let html = render_document(&[&record], record.coordinates, &MapOptions::default());
        assert_eq!(html.matches("</script>").count(), 3);
    }

    #[test]
    fn empty_document_still_has_map_and_cluster() {
        let options = MapOptions::default();
        let html = render_document(&[], options.default_center, &options);

        assert_eq!(html.matches("L.marker(").count(), 0);
        assert!(html.contains("L.markerClusterGroup()"));
        assert!(html.contains("setView([36.204800, 138.252900], 5)"));
    }
}
