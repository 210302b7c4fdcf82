use std::fmt::Write;

use super::prelude::*;

const NO_DESCRIPTION: &str = "No description";

/// Instructions for the assistant that enumerate the whole catalog.
pub fn catalog_system_prompt(catalog: &[Location]) -> String {
    let count = catalog.len();
    let mut listing = String::new();
    for (i, l) in catalog.iter().enumerate() {
        let description = if l.description.trim().is_empty() {
            NO_DESCRIPTION
        } else {
            l.description.as_str()
        };
        let _ = writeln!(listing, "{}. {}: {}", i + 1, l.display_title(), description);
    }
    if listing.is_empty() {
        listing.push_str("No locations available in the database.\n");
    }
    let plural = if count == 1 { "" } else { "s" };
    format!(
        "You are HKTAP AI, an assistant for discovering locations in Hong Kong. \
You have access to a database of {count} locations in Hong Kong.

Available Locations:
{listing}
Your role:
- Help users find and learn about locations in Hong Kong
- Suggest locations from the database that match the user's preferences
- Answer questions about Hong Kong tourism and local spots
- When the user asks to plan a day, a trip or an itinerary, call the `{tool}` tool \
with a title and the ordered events (title, location, startTime, endTime and an optional description)

Base all recommendations on the locations listed above. If a user asks about a location \
that is not in the database, say so and suggest similar alternatives from the database.

Current database contains {count} location{plural}.",
        tool = super::CREATE_SCHEDULE_TOOL,
    )
}
