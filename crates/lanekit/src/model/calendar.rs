//! Calendar projection of scheduled cards.
//!
//! The board's calendar view shows two families of events: cards scheduled
//! over an explicit span, and cards that merely have a due date. This
//! module is the pure projection behind that view; fetching the cards and
//! rendering the widget belong to the host.

use chrono::{DateTime, Duration, Utc};

use crate::id::ItemId;

/// A card as the calendar sees it: identity, label, and whichever dates it
/// carries.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledCard {
    /// The card's identifier.
    pub id: ItemId,
    /// Display title.
    pub title: String,
    /// Scheduled span start, if the card is scheduled.
    pub start_at: Option<DateTime<Utc>>,
    /// Scheduled span end; defaults to the due date when absent.
    pub end_at: Option<DateTime<Utc>>,
    /// Due date, if any.
    pub due_at: Option<DateTime<Utc>>,
    /// Host-defined color tag.
    pub color: Option<String>,
}

/// What a calendar event represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarEventKind {
    /// The card's scheduled span.
    Scheduled,
    /// The card's due date, rendered as a short marker event.
    Due,
}

/// One event on the calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    /// The card this event belongs to.
    pub id: ItemId,
    /// Display title (unmodified card title; the host localizes any due
    /// marker it wants to show).
    pub title: String,
    /// Event start.
    pub start: DateTime<Utc>,
    /// Event end.
    pub end: DateTime<Utc>,
    /// Whether the event spans exactly one day.
    pub all_day: bool,
    /// Scheduled span or due marker.
    pub kind: CalendarEventKind,
    /// Host-defined color tag, forwarded from the card.
    pub color: Option<String>,
}

/// Span granted to a due-date marker event.
fn due_span() -> Duration {
    Duration::hours(1)
}

fn push_event(
    events: &mut Vec<CalendarEvent>,
    card: &ScheduledCard,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    kind: CalendarEventKind,
) {
    events.push(CalendarEvent {
        id: card.id.clone(),
        title: card.title.clone(),
        start,
        end,
        all_day: end - start == Duration::hours(24),
        kind,
        color: card.color.clone(),
    });
}

/// Project cards onto calendar events for the interval `[start, end)`.
///
/// - Cards with a scheduled span that intersects the interval produce a
///   [`CalendarEventKind::Scheduled`] event over their own span. A missing
///   span end falls back to the due date.
/// - Cards whose due date falls inside the interval produce a one-hour
///   [`CalendarEventKind::Due`] marker starting at the due date.
///
/// A card can contribute both events. Output is sorted by card id, which
/// keeps the projection stable across refetches.
pub fn events_in_interval(
    cards: &[ScheduledCard],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<CalendarEvent> {
    let mut events = Vec::new();

    for card in cards {
        if let Some(card_start) = card.start_at {
            let card_end = card.end_at.or(card.due_at).unwrap_or(card_start);
            if card_start < end && card_end > start {
                push_event(&mut events, card, card_start, card_end, CalendarEventKind::Scheduled);
            }
        }

        if let Some(due) = card.due_at {
            if start <= due && due < end {
                push_event(&mut events, card, due, due + due_span(), CalendarEventKind::Due);
            }
        }
    }

    events.sort_by(|a, b| a.id.cmp(&b.id));
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn card(id: &str) -> ScheduledCard {
        ScheduledCard {
            id: ItemId::from(id),
            title: format!("card {id}"),
            start_at: None,
            end_at: None,
            due_at: None,
            color: None,
        }
    }

    #[test]
    fn test_scheduled_card_inside_interval() {
        let mut scheduled = card("a");
        scheduled.start_at = Some(at(10, 9));
        scheduled.end_at = Some(at(10, 17));

        let events = events_in_interval(&[scheduled], at(1, 0), at(31, 0));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, CalendarEventKind::Scheduled);
        assert_eq!(events[0].start, at(10, 9));
        assert!(!events[0].all_day);
    }

    #[test]
    fn test_scheduled_card_outside_interval() {
        let mut scheduled = card("a");
        scheduled.start_at = Some(at(1, 0));
        scheduled.end_at = Some(at(2, 0));

        let events = events_in_interval(&[scheduled], at(10, 0), at(20, 0));
        assert!(events.is_empty());
    }

    #[test]
    fn test_due_marker_spans_one_hour() {
        let mut due = card("a");
        due.due_at = Some(at(12, 15));

        let events = events_in_interval(&[due], at(1, 0), at(31, 0));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, CalendarEventKind::Due);
        assert_eq!(events[0].end - events[0].start, Duration::hours(1));
    }

    #[test]
    fn test_card_contributes_both_events() {
        let mut both = card("a");
        both.start_at = Some(at(5, 8));
        both.end_at = Some(at(5, 12));
        both.due_at = Some(at(6, 18));

        let events = events_in_interval(&[both], at(1, 0), at(31, 0));
        assert_eq!(events.len(), 2);
        assert!(events.iter().any(|e| e.kind == CalendarEventKind::Scheduled));
        assert!(events.iter().any(|e| e.kind == CalendarEventKind::Due));
    }

    #[test]
    fn test_all_day_detection() {
        let mut full_day = card("a");
        full_day.start_at = Some(at(4, 0));
        full_day.end_at = Some(at(5, 0));

        let events = events_in_interval(&[full_day], at(1, 0), at(31, 0));
        assert!(events[0].all_day);
    }

    #[test]
    fn test_events_sorted_by_id() {
        let mut c1 = card("zz");
        c1.due_at = Some(at(3, 0));
        let mut c2 = card("aa");
        c2.due_at = Some(at(4, 0));

        let events = events_in_interval(&[c1, c2], at(1, 0), at(31, 0));
        assert_eq!(events[0].id, ItemId::from("aa"));
        assert_eq!(events[1].id, ItemId::from("zz"));
    }

    #[test]
    fn test_missing_span_end_falls_back_to_due() {
        let mut open_ended = card("a");
        open_ended.start_at = Some(at(2, 0));
        open_ended.due_at = Some(at(8, 0));

        // Interval covers the fallback end but not the start-only span.
        let events = events_in_interval(&[open_ended], at(5, 0), at(6, 0));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, CalendarEventKind::Scheduled);
        assert_eq!(events[0].end, at(8, 0));
    }
}
