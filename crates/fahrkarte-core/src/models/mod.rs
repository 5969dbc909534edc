//! Data models: tickets, account sessions, calendar events.

pub mod auth;
pub mod calendar;
pub mod ticket;

pub use auth::{AuthOutcome, AuthPhase, AuthSession, AuthToken, User};
pub use calendar::CalendarEvent;
pub use ticket::{Ticket, TravelMode};
