//! Best-effort field extraction from the current document.
//!
//! Every field is resolved through an ordered fallback chain; a chain that
//! misses entirely degrades to `None` (or empty) instead of failing. The
//! chains are plain lists of steps combined by first-non-empty-wins, so each
//! step can be exercised independently of live document state.

use crate::document::DocumentSurface;
use crate::identity::resolve_identity;
use crate::model::MetadataRecord;
use chrono::Utc;
use log::debug;

/// Heading selectors for the primary watch-page layout, most specific first.
const HEADING_SELECTORS: &[&str] = &[
    "h1.title yt-formatted-string",
    "#title h1",
    "h1.ytd-watch-metadata",
];
/// Heading selector for the short-form layout.
const SHORT_FORM_HEADING: &str = "yt-shorts-video-title-view-model h2";
/// Page-metadata title tag.
const OG_TITLE: &str = r#"meta[property="og:title"]"#;
/// Trailing site-name suffix stripped from the raw document title.
const TITLE_SUFFIX: &str = " - YouTube";

/// Author selectors, tried in order.
const AUTHOR_SELECTORS: &[&str] = &[
    "#channel-name a",
    "ytd-channel-name a",
    "ytd-channel-name yt-formatted-string a",
];

/// Duration metadata tags, tried after the live media element.
const DURATION_META_SELECTORS: &[&str] = &[
    r#"meta[itemprop="duration"]"#,
    r#"meta[property="og:video:duration"]"#,
];

/// Tag metadata selector; one element per tag.
const TAG_SELECTOR: &str = r#"meta[property="og:video:tag"]"#;

/// A single step in a fallback chain.
type FieldStep<'a> = Box<dyn Fn() -> Option<String> + 'a>;

/// First step yielding a non-empty trimmed value wins.
fn run_chain(steps: &[FieldStep<'_>]) -> Option<String> {
    steps.iter().find_map(|step| {
        step()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

/// Build a record from the current document state.
///
/// Returns `None` only when no item id is resolvable from the location at
/// extraction time (the identity raced away since the caller's guard);
/// individual field misses never fail the extraction.
pub fn extract(doc: &dyn DocumentSurface) -> Option<MetadataRecord> {
    let location = doc.location();
    let identity = resolve_identity(&location);
    let item_id = identity.item_id?;

    let record = MetadataRecord {
        item_id,
        kind: identity.kind,
        location,
        title: title_of(doc),
        author: author_of(doc),
        duration_seconds: duration_of(doc),
        tags: tags_of(doc),
        captured_at: Utc::now(),
    };
    debug!(
        "extracted record (item_id={}, kind={:?}, title_len={})",
        record.item_id,
        record.kind,
        record.title.len()
    );
    Some(record)
}

/// Title chain: primary headings, short-form heading, page metadata, raw
/// document title with the site suffix stripped.
fn title_of(doc: &dyn DocumentSurface) -> String {
    let steps: [FieldStep<'_>; 4] = [
        Box::new(|| first_selector_text(doc, HEADING_SELECTORS)),
        Box::new(|| doc.query_text(SHORT_FORM_HEADING)),
        Box::new(|| doc.query_attr(OG_TITLE, "content")),
        Box::new(|| doc.document_title().map(|title| strip_site_suffix(&title))),
    ];
    run_chain(&steps).unwrap_or_default()
}

/// Author chain: ordered selectors, first non-empty text wins.
fn author_of(doc: &dyn DocumentSurface) -> Option<String> {
    first_selector_text(doc, AUTHOR_SELECTORS)
}

/// Duration chain: live media element if finite and positive, else metadata
/// tags parsed as non-negative whole seconds.
fn duration_of(doc: &dyn DocumentSurface) -> Option<u32> {
    if let Some(seconds) = doc.media_duration_seconds() {
        if seconds.is_finite() && seconds > 0.0 {
            return Some(seconds.round() as u32);
        }
    }
    DURATION_META_SELECTORS.iter().find_map(|selector| {
        doc.query_attr(selector, "content")
            .and_then(|raw| raw.trim().parse::<u32>().ok())
    })
}

/// All tag metadata contents, empties filtered out.
fn tags_of(doc: &dyn DocumentSurface) -> Vec<String> {
    doc.query_attr_all(TAG_SELECTOR, "content")
        .into_iter()
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn first_selector_text(doc: &dyn DocumentSurface, selectors: &[&str]) -> Option<String> {
    selectors.iter().find_map(|selector| {
        doc.query_text(selector)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    })
}

fn strip_site_suffix(title: &str) -> String {
    title
        .strip_suffix(TITLE_SUFFIX)
        .unwrap_or(title)
        .trim()
        .to_string()
}
