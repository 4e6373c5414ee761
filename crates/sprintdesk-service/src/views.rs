//! Read-only filtered views over the in-memory tables. Natural row order
//! (insertion order) is kept, except the history view which sorts by
//! change timestamp descending.

use sprintdesk_core::history::{HistoryEntry, HistoryFilter};
use sprintdesk_core::request::{Request, RequestFilter};

pub fn filter_requests<'a>(requests: &'a [Request], filter: &RequestFilter) -> Vec<&'a Request> {
    requests.iter().filter(|r| filter.matches(r)).collect()
}

pub fn filter_history<'a>(
    history: &'a [HistoryEntry],
    filter: &HistoryFilter,
) -> Vec<&'a HistoryEntry> {
    history.iter().filter(|e| filter.matches(e)).collect()
}

/// Newest first; rows with an unparseable timestamp sink to the end.
pub fn sort_history_desc(entries: &mut [&HistoryEntry]) {
    entries.sort_by(|a, b| match (a.parsed_fecha_cambio(), b.parsed_fecha_cambio()) {
        (Some(ta), Some(tb)) => tb.cmp(&ta),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
