use chrono::{DateTime, Utc};

use crate::models::{PossibleRoute, SimplifiedProvider};

/// Build every itinerary that takes one provider per hop.
///
/// `offers[i]` holds the flights available for hop `i`. A combination is kept
/// only when each flight lands strictly before the next one takes off.
/// Itineraries come out in lexicographic order of the offer indices.
pub fn itineraries(offers: &[Vec<SimplifiedProvider>]) -> Vec<PossibleRoute> {
    if offers.is_empty() {
        return Vec::new();
    }

    let mut routes = Vec::new();
    let mut chosen: Vec<&SimplifiedProvider> = Vec::with_capacity(offers.len());
    extend(offers, &mut chosen, &mut routes);
    routes
}

fn extend<'a>(
    offers: &'a [Vec<SimplifiedProvider>],
    chosen: &mut Vec<&'a SimplifiedProvider>,
    routes: &mut Vec<PossibleRoute>,
) {
    let hop = chosen.len();
    if hop == offers.len() {
        routes.push(summarize(chosen));
        return;
    }

    for candidate in &offers[hop] {
        let connects = chosen
            .last()
            .is_none_or(|previous| previous.flight_end < candidate.flight_start);
        if connects {
            chosen.push(candidate);
            extend(offers, chosen, routes);
            chosen.pop();
        }
    }
}

fn summarize(chosen: &[&SimplifiedProvider]) -> PossibleRoute {
    let total_price: f64 = chosen.iter().map(|p| p.price).sum();

    let first_takeoff = chosen.iter().map(|p| p.flight_start).min();
    let last_landing = chosen.iter().map(|p| p.flight_end).max();
    let total_duration = match (first_takeoff, last_landing) {
        (Some(start), Some(end)) => format_duration(start, end),
        _ => format_minutes(0),
    };

    PossibleRoute {
        total_price: format!("{:.2}", total_price),
        total_duration,
        providers: chosen.iter().map(|p| (*p).clone()).collect(),
    }
}

/// Elapsed time between two instants, rounded to the nearest minute
pub fn format_duration(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let millis = (end - start).num_milliseconds().max(0);
    format_minutes((millis + 30_000) / 60_000)
}

/// Render minutes as "N days, N hours, N minutes", leaving out zero days and hours
pub fn format_minutes(total_minutes: i64) -> String {
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes % (24 * 60)) / 60;
    let minutes = total_minutes % 60;

    let mut out = String::new();
    if days > 0 {
        out.push_str(&format!("{} days, ", days));
    }
    if hours > 0 {
        out.push_str(&format!("{} hours, ", hours));
    }
    out.push_str(&format!("{} minutes", minutes));
    out
}
