use std::sync::LazyLock;
use scraper::{Html, Selector};
use url::Url;
use crate::config::DiscoveryConfig;
use crate::extract::table::{selector, stripped_text};
use crate::models::TrackSource;
use tracing::debug;

static PANEL: LazyLock<Selector> = LazyLock::new(|| selector(".panel.panel-primary"));
static PANEL_HEADING: LazyLock<Selector> = LazyLock::new(|| selector("div.panel-heading"));
static TRACK_LINK: LazyLock<Selector> = LazyLock::new(|| selector("a.list-group-item"));

pub const DEFAULT_BASE_URL: &str = "http://atw";

/// Which panels of the index page hold tracks, and which tracks to leave out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryRules {
    pub base_url: String,
    pub panels: Vec<String>,
    /// Case-insensitive substrings that remove a track from discovery.
    pub exclude_keywords: Vec<String>,
    /// Lower-case substrings that keep a track out of the default selection.
    pub default_exclude: Vec<String>,
}

impl Default for DiscoveryRules {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            panels: vec![
                "Support (IFS EE)".into(),
                "Support (IFS Cloud)".into(),
                "Projects".into(),
            ],
            exclude_keywords: vec!["TestARest".into(), "TAR".into()],
            default_exclude: vec![
                "integrity".into(),
                "dictionary".into(),
                "updates".into(),
                "specific".into(),
            ],
        }
    }
}

impl DiscoveryRules {
    /// Defaults overlaid with whatever the config sets.
    pub fn from_config(config: Option<&DiscoveryConfig>) -> Self {
        let mut rules = Self::default();
        if let Some(config) = config {
            if let Some(base) = &config.base_url {
                rules.base_url = base.clone();
            }
            if let Some(panels) = &config.panels {
                rules.panels = panels.clone();
            }
            if let Some(keywords) = &config.exclude_keywords {
                rules.exclude_keywords = keywords.clone();
            }
            if let Some(words) = &config.default_exclude {
                rules.default_exclude = words.clone();
            }
        }
        rules
    }

    fn is_excluded(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.exclude_keywords
            .iter()
            .any(|k| lower.contains(&k.to_lowercase()))
    }
}

/// List the tracks linked from the index page's track panels.
///
/// Links resolve against `base_url`. A name seen twice keeps its first
/// position and the later URL.
pub fn discover_tracks(index_markup: &str, base_url: &str, rules: &DiscoveryRules) -> Vec<TrackSource> {
    let doc = Html::parse_document(index_markup);
    let base = Url::parse(base_url).ok();
    let mut found: Vec<TrackSource> = Vec::new();

    for panel in doc.select(&PANEL) {
        let Some(heading) = panel.select(&PANEL_HEADING).next() else {
            continue;
        };
        let title = stripped_text(heading);
        if !rules.panels.iter().any(|p| *p == title) {
            continue;
        }

        for link in panel.select(&TRACK_LINK) {
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            let name = stripped_text(link);
            if rules.is_excluded(&name) {
                debug!(track = %name, "Track excluded by keyword");
                continue;
            }
            let url = match &base {
                Some(base) => match base.join(href.trim()) {
                    Ok(u) => String::from(u),
                    Err(_) => continue,
                },
                None => format!("{}{}", base_url, href),
            };

            match found.iter_mut().find(|t| t.name == name) {
                Some(existing) => existing.url = url,
                None => found.push(TrackSource::new(name, url)),
            }
        }
    }

    found
}

/// The tracks preselected when the user does not choose any.
pub fn default_selection(tracks: &[TrackSource], rules: &DiscoveryRules) -> Vec<TrackSource> {
    tracks
        .iter()
        .filter(|t| {
            let lower = t.name.to_lowercase();
            !rules
                .default_exclude
                .iter()
                .any(|w| lower.contains(&w.to_lowercase()))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"
        <html><body>
        <div class="panel panel-primary">
          <div class="panel-heading"> Support (IFS Cloud) </div>
          <div class="list-group">
            <a class="list-group-item" href="/track/cloud-24r1"> Cloud 24R1 </a>
            <a class="list-group-item" href="/track/cloud-tar">Cloud TAR Run</a>
            <a class="list-group-item" href="/track/data-dict">Cloud Dictionary</a>
            <a class="list-group-item">No Link</a>
          </div>
        </div>
        <div class="panel panel-primary">
          <div class="panel-heading">Internal</div>
          <a class="list-group-item" href="/track/internal">Internal Track</a>
        </div>
        <div class="panel panel-default">
          <div class="panel-heading">Projects</div>
          <a class="list-group-item" href="/track/not-primary">Not Primary</a>
        </div>
        <div class="panel panel-primary">
          <div class="panel-heading">Projects</div>
          <a class="list-group-item" href="/track/proj-a">Project A</a>
          <a class="list-group-item" href="/track/testarest">Nightly testarest</a>
          <a class="list-group-item" href="/track/cloud-24r1-new">Cloud 24R1</a>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_discovers_tracks_in_target_panels() {
        let tracks = discover_tracks(INDEX, "http://atw", &DiscoveryRules::default());
        let names: Vec<&str> = tracks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Cloud 24R1", "Cloud Dictionary", "Project A"]);
        assert_eq!(tracks[2].url, "http://atw/track/proj-a");
    }

    #[test]
    fn test_duplicate_name_keeps_last_url_at_first_position() {
        let tracks = discover_tracks(INDEX, "http://atw", &DiscoveryRules::default());
        assert_eq!(tracks[0].name, "Cloud 24R1");
        assert_eq!(tracks[0].url, "http://atw/track/cloud-24r1-new");
    }

    #[test]
    fn test_exclude_keywords_are_case_insensitive() {
        let tracks = discover_tracks(INDEX, "http://atw", &DiscoveryRules::default());
        assert!(tracks.iter().all(|t| !t.name.to_lowercase().contains("testarest")));
        assert!(tracks.iter().all(|t| !t.name.contains("TAR")));
    }

    #[test]
    fn test_custom_panels() {
        let rules = DiscoveryRules {
            panels: vec!["Internal".into()],
            ..Default::default()
        };
        let tracks = discover_tracks(INDEX, "http://atw", &rules);
        assert_eq!(tracks, vec![TrackSource::new("Internal Track", "http://atw/track/internal")]);
    }

    #[test]
    fn test_empty_index() {
        assert!(discover_tracks("<html></html>", "http://atw", &DiscoveryRules::default()).is_empty());
    }

    #[test]
    fn test_default_selection_drops_excluded_words() {
        let tracks = vec![
            TrackSource::new("Cloud 24R1", "http://atw/1"),
            TrackSource::new("Cloud Dictionary", "http://atw/2"),
            TrackSource::new("Data Integrity Check", "http://atw/3"),
            TrackSource::new("Customer Specific", "http://atw/4"),
            TrackSource::new("Monthly Updates", "http://atw/5"),
        ];
        let selected = default_selection(&tracks, &DiscoveryRules::default());
        assert_eq!(selected, vec![TrackSource::new("Cloud 24R1", "http://atw/1")]);
    }

    #[test]
    fn test_default_exclude_words_are_case_insensitive() {
        let rules = DiscoveryRules {
            default_exclude: vec!["Integrity".into()],
            ..Default::default()
        };
        let tracks = vec![
            TrackSource::new("Data Integrity Check", "http://atw/1"),
            TrackSource::new("Cloud 24R1", "http://atw/2"),
        ];
        let selected = default_selection(&tracks, &rules);
        assert_eq!(selected, vec![TrackSource::new("Cloud 24R1", "http://atw/2")]);
    }

    #[test]
    fn test_rules_from_config_overlay() {
        let config = DiscoveryConfig {
            base_url: Some("http://atw.local".into()),
            exclude_keywords: Some(vec![]),
            ..Default::default()
        };
        let rules = DiscoveryRules::from_config(Some(&config));
        assert_eq!(rules.base_url, "http://atw.local");
        assert!(rules.exclude_keywords.is_empty());
        assert_eq!(rules.panels.len(), 3);
        assert_eq!(DiscoveryRules::from_config(None), DiscoveryRules::default());
    }
}
