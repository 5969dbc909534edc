//! Calendar event model and the ticket-to-event mapping.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::ticket::{Ticket, TravelMode};

/// Assumed trip length when the arrival time could not be extracted.
const DEFAULT_TRIP_DURATION_HOURS: i64 = 1;

/// A calendar event mirroring one trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Provider-assigned id; absent until the event is created remotely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub timezone: String,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default)]
    pub reminder_minutes: Vec<i32>,
}

impl CalendarEvent {
    /// Build a trip event from an extracted ticket.
    ///
    /// Requires a departure time; without one there is nothing to anchor
    /// the event to. The end time falls back to departure plus a fixed
    /// duration when no arrival time was extracted.
    pub fn from_ticket(ticket: &Ticket, timezone: impl Into<String>) -> Option<Self> {
        let start_time = ticket.departure_time?;
        let end_time = ticket
            .arrival_time
            .filter(|end| *end > start_time)
            .unwrap_or(start_time + Duration::hours(DEFAULT_TRIP_DURATION_HOURS));

        let title = match ticket.route() {
            Some(route) => format!("{} {route}", mode_label(ticket.travel_mode)),
            None => format!("{} ({})", mode_label(ticket.travel_mode), ticket.file_name),
        };

        let mut details = Vec::new();
        if let Some(train) = &ticket.train_number {
            details.push(train.clone());
        }
        if let Some(carriage) = &ticket.carriage_number {
            details.push(format!("Wagen {carriage}"));
        }
        if let Some(seat) = &ticket.seat_number {
            details.push(format!("Platz {seat}"));
        }
        if let Some(name) = &ticket.passenger_name {
            details.push(name.clone());
        }

        Some(Self {
            id: None,
            title,
            description: if details.is_empty() { None } else { Some(details.join(", ")) },
            start_time,
            end_time,
            location: ticket.departure_location.clone(),
            timezone: timezone.into(),
            is_all_day: false,
            reminder_minutes: Vec::new(),
        })
    }
}

fn mode_label(mode: TravelMode) -> &'static str {
    match mode {
        TravelMode::Train => "Zug",
        TravelMode::Bus => "Bus",
        TravelMode::Flight => "Flug",
        TravelMode::Ferry => "Fähre",
        TravelMode::Unknown => "Reise",
    }
}
