use super::*;

/// Looks up a stored schedule and renders it as iCalendar file.
pub fn export_schedule_calendar(
    store: &dyn ScheduleRepo,
    schedule_id: &str,
) -> Result<(Schedule, Vec<u8>)> {
    let schedule = store.get_schedule(schedule_id).map_err(usecases::Error::from)?;
    let ics = usecases::export_calendar(&schedule);
    debug!(
        "Exported {} event(s) of schedule {}",
        schedule.events.len(),
        schedule.id
    );
    Ok((schedule, ics))
}
