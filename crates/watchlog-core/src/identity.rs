//! Identity resolution from the current location.

use crate::model::ItemKind;
use regex::Regex;
use url::Url;

/// Query parameter carrying the item id on primary watch pages.
const ITEM_PARAM: &str = "v";
/// Alternate short-form route: a path segment id of at least 6 characters
/// drawn from the id alphabet.
const ALTERNATE_ROUTE_PATTERN: &str = r"^/shorts/([A-Za-z0-9_-]{6,})(?:/.*)?$";

/// Identity resolved from a location reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Canonical item id, or `None` when no item route matched.
    pub item_id: Option<String>,
    /// Navigation variant the location maps to.
    pub kind: ItemKind,
}

impl Identity {
    fn unknown() -> Self {
        Self {
            item_id: None,
            kind: ItemKind::Unknown,
        }
    }
}

/// Resolve `(item_id, kind)` from a location reference.
///
/// Tries the primary query-parameter pattern first, then the alternate
/// short-form path pattern. Pure function of the input; unparseable
/// locations resolve to unknown.
pub fn resolve_identity(location: &str) -> Identity {
    let Ok(parsed) = Url::parse(location) else {
        return Identity::unknown();
    };

    let primary = parsed
        .query_pairs()
        .find_map(|(name, id)| (name == ITEM_PARAM).then(|| id.into_owned()))
        .filter(|id| !id.is_empty());
    if let Some(id) = primary {
        return Identity {
            item_id: Some(id),
            kind: ItemKind::Primary,
        };
    }

    let Ok(route) = Regex::new(ALTERNATE_ROUTE_PATTERN) else {
        return Identity::unknown();
    };
    if let Some(captures) = route.captures(parsed.path()) {
        return Identity {
            item_id: Some(captures[1].to_string()),
            kind: ItemKind::Alternate,
        };
    }

    Identity::unknown()
}
