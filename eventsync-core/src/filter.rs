//! Venue selection of CRM events.

use crate::models::CrmEvent;

/// Returns the online events listed under `venue`, in input order.
///
/// Venue membership is an exact string match; status is compared
/// case-insensitively against `"online"`.
pub fn filter_by_venue<'a>(events: &'a [CrmEvent], venue: &str) -> Vec<&'a CrmEvent> {
    events
        .iter()
        .filter(|event| event.venues.iter().any(|v| v == venue) && event.is_online())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: u64, venues: &[&str], status: &str) -> CrmEvent {
        CrmEvent::new(id, format!("Event {}", id))
            .with_venues(venues.iter().map(|v| v.to_string()).collect())
            .with_status(status)
    }

    #[test]
    fn test_matches_venue_and_online_status() {
        let events = vec![event(1, &["A", "B"], "Online")];
        let selected = filter_by_venue(&events, "B");
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].event_id, 1);
    }

    #[test]
    fn test_offline_excluded() {
        let events = vec![event(1, &["A", "B"], "offline")];
        assert!(filter_by_venue(&events, "B").is_empty());
    }

    #[test]
    fn test_exact_membership_only() {
        let events = vec![
            event(1, &["Dubai World Trade Centre"], "online"),
            event(2, &["dubai world trade centre"], "online"),
            event(3, &["Dubai World Trade Centre "], "online"),
        ];
        let selected = filter_by_venue(&events, "Dubai World Trade Centre");
        let ids: Vec<u64> = selected.iter().map(|e| e.event_id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_preserves_input_order() {
        let events = vec![
            event(3, &["A"], "online"),
            event(1, &["B"], "online"),
            event(2, &["A"], "ONLINE"),
        ];
        let ids: Vec<u64> = filter_by_venue(&events, "A")
            .iter()
            .map(|e| e.event_id)
            .collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn test_empty_input() {
        assert!(filter_by_venue(&[], "A").is_empty());
    }
}
