//! Ticker frame and display-page construction.
//!
//! Everything here is pure: given events, a dictionary and a probe, the
//! same cards come out. Sorting (intensity descending, tsunami grade
//! descending) happens here, before pagination - the paginator itself
//! never reorders.

use indexmap::IndexMap;
use pagination::{paginate, Page, SurfaceProbe};
use placename::dict::KanaDict;
use placename::resolver::resolve;
use quake_core::{EarlyWarningReport, Event, Intensity, TsunamiGrade, TsunamiStatus};
use serde::Serialize;

/// How observation points are named on the ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingMode {
    /// Raw observation-point addresses, as reported.
    ByStation,
    /// Canonical municipalities with readings.
    ByMunicipality,
}

/// Separator between labels on one page (full-width space).
const LABEL_SEPARATOR: &str = "　";

/// One paginated summary card.
#[derive(Debug, Clone, Serialize)]
pub struct EventCard {
    pub id: String,
    pub time: String,
    pub epicenter: String,
    pub magnitude: Option<f64>,
    pub depth: Option<f64>,
    pub max_scale: Option<String>,
    pub tsunami: TsunamiStatus,
    pub pages: Vec<Page>,
}

/// An early-warning alert card, delivered out of band.
#[derive(Debug, Clone, Serialize)]
pub struct AlertCard {
    pub correlation_id: String,
    pub hypocenter: Option<String>,
    pub max_scale: Option<String>,
    pub magnitude: Option<f64>,
}

/// One SSE frame.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TickerFrame {
    /// The current event cards after a poll.
    Events { new_event: bool, cards: Vec<EventCard> },
    /// An admitted early warning.
    Alert { card: AlertCard },
    /// Nothing to show; `message` doubles as the error banner when the
    /// whole poll failed.
    NoData { message: String },
    /// Playback position update.
    Playback {
        state: String,
        page: usize,
        total: usize,
    },
}

impl TickerFrame {
    pub fn alert(warning: &EarlyWarningReport) -> Self {
        Self::Alert {
            card: AlertCard {
                correlation_id: warning.correlation_id.clone(),
                hypocenter: warning.hypocenter.clone(),
                max_scale: warning.max_scale.map(|s| s.label().to_string()),
                magnitude: warning.magnitude,
            },
        }
    }

    /// The explicit no-data state. `feed_failed` selects the error banner
    /// wording for a poll where every fetch failed or came back empty.
    pub fn no_data(feed_failed: bool) -> Self {
        let message = if feed_failed {
            "地震情報の取得に失敗しました"
        } else {
            "表示できる地震情報はありません"
        };
        Self::NoData {
            message: message.to_string(),
        }
    }
}

/// Build the cards for one poll's events.
///
/// Returns the cards plus the municipality keys whose reading resolved to
/// blank - the caller proposes those to the override table.
pub fn build_cards(
    events: &[Event],
    mode: NamingMode,
    dict: &KanaDict,
    probe: &dyn SurfaceProbe,
) -> (Vec<EventCard>, Vec<String>) {
    let mut missing = Vec::new();
    let cards = events
        .iter()
        .map(|event| {
            let (card, mut card_missing) = build_card(event, mode, dict, probe);
            missing.append(&mut card_missing);
            card
        })
        .collect();
    (cards, missing)
}

fn build_card(
    event: &Event,
    mode: NamingMode,
    dict: &KanaDict,
    probe: &dyn SurfaceProbe,
) -> (EventCard, Vec<String>) {
    let (mut groups, missing) = point_groups(event, mode, dict);
    groups.extend(tsunami_groups(event));
    let pages = assemble_pages(&groups, probe);

    let card = EventCard {
        id: event.id.clone(),
        time: event.time.clone(),
        epicenter: event.epicenter.clone(),
        magnitude: event.magnitude,
        depth: event.depth,
        max_scale: event.max_scale.map(|s| s.label().to_string()),
        tsunami: event.tsunami,
        pages,
    };
    (card, missing)
}

/// Group display labels by intensity, descending.
///
/// A point seen at several intensities sits in the group of its highest
/// one; within a group, labels keep first-seen order.
fn point_groups(
    event: &Event,
    mode: NamingMode,
    dict: &KanaDict,
) -> (Vec<(String, Vec<String>)>, Vec<String>) {
    let mut best: IndexMap<String, Intensity> = IndexMap::new();
    for point in &event.points {
        let Some(scale) = point.scale else { continue };
        let key = match mode {
            NamingMode::ByStation => point.address.clone(),
            NamingMode::ByMunicipality => resolve(&point.address, &point.prefecture, dict),
        };
        let entry = best.entry(key).or_insert(scale);
        if scale > *entry {
            *entry = scale;
        }
    }

    let mut buckets: Vec<(Intensity, Vec<String>)> = Vec::new();
    let mut missing = Vec::new();
    for (key, scale) in best {
        let label = match mode {
            NamingMode::ByStation => key,
            NamingMode::ByMunicipality => {
                let reading = dict.lookup(&key);
                let name = key.split_once('_').map(|(_, tail)| tail).unwrap_or(&key);
                if reading.is_empty() {
                    missing.push(key.clone());
                    name.to_string()
                } else {
                    format!("{}（{}）", name, reading)
                }
            }
        };

        match buckets.iter_mut().find(|(bucket, _)| *bucket == scale) {
            Some((_, labels)) => labels.push(label),
            None => buckets.push((scale, vec![label])),
        }
    }

    buckets.sort_by(|a, b| b.0.cmp(&a.0));

    let groups = buckets
        .into_iter()
        .map(|(scale, labels)| (scale.label().to_string(), labels))
        .collect();
    (groups, missing)
}

fn grade_heading(grade: TsunamiGrade) -> &'static str {
    match grade {
        TsunamiGrade::MajorWarning => "大津波警報",
        TsunamiGrade::Warning => "津波警報",
        TsunamiGrade::Advisory => "津波注意報",
    }
}

/// Tsunami forecast areas (grade descending) and observed stations.
fn tsunami_groups(event: &Event) -> Vec<(String, Vec<String>)> {
    let mut groups = Vec::new();

    if let Some(forecast) = &event.forecast {
        for grade in [
            TsunamiGrade::MajorWarning,
            TsunamiGrade::Warning,
            TsunamiGrade::Advisory,
        ] {
            let areas = forecast.areas(grade);
            if !areas.is_empty() {
                groups.push((grade_heading(grade).to_string(), areas.to_vec()));
            }
        }
    }

    if let Some(observation) = &event.observation {
        if !observation.stations.is_empty() {
            let labels = observation
                .stations
                .iter()
                .map(|station| match station.height {
                    Some(height) => format!("{} {}m", station.name, height),
                    None => station.name.clone(),
                })
                .collect();
            groups.push(("津波観測".to_string(), labels));
        }
    }

    groups
}

/// Paginate each group and number the flattened sequence 1..=total.
fn assemble_pages(groups: &[(String, Vec<String>)], probe: &dyn SurfaceProbe) -> Vec<Page> {
    let mut pages = Vec::new();
    for (heading, items) in groups {
        for chunk in paginate(items, LABEL_SEPARATOR, probe) {
            pages.push(Page {
                heading: heading.clone(),
                items: chunk,
                index: 0,
                total: 0,
            });
        }
    }

    let total = pages.len();
    for (position, page) in pages.iter_mut().enumerate() {
        page.index = position + 1;
        page.total = total;
    }
    pages
}
