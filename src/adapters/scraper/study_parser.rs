use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::domain::study::{Study, StudyMap};
use crate::error::{MonitorError, Result};

const CARD_SELECTOR: &str = "div[data-study-id]";
const ID_ATTR: &str = "data-study-id";
const REWARD_SELECTOR: &str = "span.study-reward";
const PLACES_SELECTOR: &str = "span.places-left";
const DURATION_SELECTOR: &str = "span.study-duration";

/// Why a single study card was left out of the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkippedCard {
    MissingId,
    MissingField { id: String, field: &'static str },
}

impl std::fmt::Display for SkippedCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingId => write!(f, "card has an empty {ID_ATTR}"),
            Self::MissingField { id, field } => write!(f, "study {id} has no {field}"),
        }
    }
}

struct CardSelectors {
    card: Selector,
    reward: Selector,
    places: Selector,
    duration: Selector,
}

impl CardSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            card: selector(CARD_SELECTOR)?,
            reward: selector(REWARD_SELECTOR)?,
            places: selector(PLACES_SELECTOR)?,
            duration: selector(DURATION_SELECTOR)?,
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| MonitorError::Parse {
        reason: format!("invalid CSS selector {css:?}: {e}"),
    })
}

/// Extract every study card from the studies page.
///
/// Malformed cards are logged and skipped; they never abort the page.
/// When an identifier repeats, the later card wins.
pub fn parse_studies(html: &str) -> Result<StudyMap> {
    let selectors = CardSelectors::new()?;
    let document = Html::parse_document(html);

    let mut studies = StudyMap::new();
    let mut skipped = 0usize;

    for card in document.select(&selectors.card) {
        match parse_card(card, &selectors) {
            Ok(study) => {
                studies.insert(study.id.clone(), study);
            }
            Err(reason) => {
                skipped += 1;
                warn!(%reason, "Skipping malformed study card");
            }
        }
    }

    debug!(studies = studies.len(), skipped, "Parsed studies page");
    Ok(studies)
}

/// The identifier is the attribute value exactly as written; only an empty
/// value is rejected. Whitespace is significant, so `" A "` and `"A"` are
/// distinct studies.
fn parse_card(
    card: ElementRef<'_>,
    selectors: &CardSelectors,
) -> std::result::Result<Study, SkippedCard> {
    let id = card
        .value()
        .attr(ID_ATTR)
        .filter(|id| !id.is_empty())
        .ok_or(SkippedCard::MissingId)?
        .to_string();

    let missing = |field| SkippedCard::MissingField {
        id: id.clone(),
        field,
    };
    let reward = field_text(card, &selectors.reward).ok_or_else(|| missing("reward"))?;
    let places_left = field_text(card, &selectors.places).ok_or_else(|| missing("places left"))?;
    let duration = field_text(card, &selectors.duration);

    Ok(Study {
        id,
        reward,
        places_left,
        duration,
    })
}

fn field_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let text = card
        .select(selector)
        .next()?
        .text()
        .collect::<String>()
        .trim()
        .to_string();
    if text.is_empty() { None } else { Some(text) }
}
