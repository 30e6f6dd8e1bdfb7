//! Calendar name resolution from slot values.

use nextevent_core::CalendarType;
use tracing::debug;

use crate::envelope::{ER_SUCCESS_MATCH, Slot};

/// Name of the slot carrying the spoken calendar name.
pub const CALENDAR_NAME_SLOT: &str = "calendar_name";

/// Picks the text to match against calendar names.
///
/// A successful entity resolution from the first authority wins over the raw
/// value, so synonyms ("meeting", "council") land on the canonical name.
pub fn calendar_name_text(slot: &Slot) -> Option<&str> {
    let authority = slot
        .resolutions
        .as_ref()
        .and_then(|r| r.resolutions_per_authority.first());
    let resolved = authority
        .filter(|a| a.status.code == ER_SUCCESS_MATCH)
        .and_then(|a| a.values.first())
        .map(|v| v.value.name.as_str())
        .filter(|name| !name.is_empty());

    debug!(
        value = ?slot.value,
        code = ?authority.map(|a| a.status.code.as_str()),
        resolved = ?resolved,
        "Resolving calendar name"
    );

    resolved.or(slot.value.as_deref())
}

/// Resolves a slot to a calendar type, [`CalendarType::None`] when nothing
/// matches.
pub fn resolve_calendar(slot: Option<&Slot>) -> CalendarType {
    slot.and_then(calendar_name_text)
        .map(CalendarType::from_name)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::ResolutionAuthority;

    #[test]
    fn raw_value_without_resolutions() {
        let slot = Slot::new(CALENDAR_NAME_SLOT, Some("Meetings"));
        assert_eq!(calendar_name_text(&slot), Some("Meetings"));
        assert_eq!(resolve_calendar(Some(&slot)), CalendarType::Meetings);
    }

    #[test]
    fn successful_match_wins() {
        let slot = Slot::new(CALENDAR_NAME_SLOT, Some("council"))
            .with_resolution(ResolutionAuthority::new(ER_SUCCESS_MATCH, &["Meetings"]));
        assert_eq!(calendar_name_text(&slot), Some("Meetings"));
        assert_eq!(resolve_calendar(Some(&slot)), CalendarType::Meetings);
    }

    #[test]
    fn no_match_falls_back_to_value() {
        let slot = Slot::new(CALENDAR_NAME_SLOT, Some("parks"))
            .with_resolution(ResolutionAuthority::new("ER_SUCCESS_NO_MATCH", &[]));
        assert_eq!(calendar_name_text(&slot), Some("parks"));
        assert_eq!(resolve_calendar(Some(&slot)), CalendarType::None);
    }

    #[test]
    fn empty_resolved_name_falls_back_to_value() {
        let slot = Slot::new(CALENDAR_NAME_SLOT, Some("meetings"))
            .with_resolution(ResolutionAuthority::new(ER_SUCCESS_MATCH, &[""]));
        assert_eq!(calendar_name_text(&slot), Some("meetings"));
        assert_eq!(resolve_calendar(Some(&slot)), CalendarType::Meetings);
    }

    #[test]
    fn only_first_authority_counts() {
        let slot = Slot::new(CALENDAR_NAME_SLOT, Some("parks"))
            .with_resolution(ResolutionAuthority::new("ER_SUCCESS_NO_MATCH", &[]))
            .with_resolution(ResolutionAuthority::new(ER_SUCCESS_MATCH, &["Meetings"]));
        assert_eq!(resolve_calendar(Some(&slot)), CalendarType::None);
    }

    #[test]
    fn missing_slot_or_value_is_none() {
        assert_eq!(resolve_calendar(None), CalendarType::None);
        let slot = Slot::new(CALENDAR_NAME_SLOT, None);
        assert_eq!(resolve_calendar(Some(&slot)), CalendarType::None);
    }

    #[test]
    fn none_name_is_not_a_calendar() {
        let slot = Slot::new(CALENDAR_NAME_SLOT, Some("None"));
        assert_eq!(resolve_calendar(Some(&slot)), CalendarType::None);
    }
}
