use super::prelude::*;

const CRLF: &str = "\r\n";
const PRODUCT_ID: &str = "-//HKTAP//Schedule Export//EN";

/// iCalendar representation of a schedule.
///
/// Text fields are copied through unescaped. Only the `DTSTAMP`
/// lines depend on the time of the export.
pub fn export_calendar(schedule: &Schedule) -> Vec<u8> {
    export_calendar_at(schedule, Timestamp::now())
}

pub fn export_calendar_at(schedule: &Schedule, generated_at: Timestamp) -> Vec<u8> {
    let dtstamp = generated_at.to_calendar_utc();
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_owned(),
        "VERSION:2.0".to_owned(),
        format!("PRODID:{PRODUCT_ID}"),
        "CALSCALE:GREGORIAN".to_owned(),
        "METHOD:PUBLISH".to_owned(),
    ];
    for (index, event) in schedule.events.iter().enumerate() {
        lines.extend([
            "BEGIN:VEVENT".to_owned(),
            format!("UID:{}", schedule.event_uid(index)),
            format!("DTSTAMP:{dtstamp}"),
            format!("DTSTART:{}", event.start.to_calendar_utc()),
            format!("DTEND:{}", event.end.to_calendar_utc()),
            format!("SUMMARY:{}", event.title),
            format!("LOCATION:{}", event.location),
            format!("DESCRIPTION:{}", event.description.as_deref().unwrap_or_default()),
            "END:VEVENT".to_owned(),
        ]);
    }
    lines.push("END:VCALENDAR".to_owned());
    let mut ics = lines.join(CRLF);
    ics.push_str(CRLF);
    ics.into_bytes()
}
