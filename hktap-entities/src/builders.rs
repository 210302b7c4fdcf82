pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{location_builder::*, schedule_builder::*};

pub mod location_builder {

    use super::*;
    use crate::{geo::*, id::*, location::*, time::*};

    #[derive(Debug)]
    pub struct LocationBuild {
        location: Location,
    }

    impl LocationBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.location.id = id.into();
            self
        }
        pub fn title(mut self, title: &str) -> Self {
            self.location.title = title.into();
            self
        }
        pub fn description(mut self, desc: &str) -> Self {
            self.location.description = desc.into();
            self
        }
        pub fn category(mut self, category: &str) -> Self {
            self.location.category = category.into();
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.location.pos = pos;
            self
        }
        pub fn photo(mut self, photo: Option<&str>) -> Self {
            self.location.photo = photo.map(Into::into);
            self
        }
        pub fn votes(mut self, votes: u64) -> Self {
            self.location.votes = votes;
            self
        }
        pub fn created_at(mut self, created_at: Timestamp) -> Self {
            self.location.created_at = created_at;
            self
        }
        pub fn finish(self) -> Location {
            self.location
        }
    }

    impl Builder for Location {
        type Build = LocationBuild;
        fn build() -> Self::Build {
            LocationBuild {
                location: Location {
                    id: Id::new(),
                    pos: MapPoint::try_from_lat_lng_deg(22.2855, 114.1577).unwrap_or_default(),
                    title: "".into(),
                    description: "".into(),
                    category: "".into(),
                    photo: None,
                    votes: 0,
                    created_at: Timestamp::now(),
                },
            }
        }
    }
}

pub mod schedule_builder {

    use super::*;
    use crate::{id::*, schedule::*, time::*};

    #[derive(Debug)]
    pub struct ScheduleBuild {
        schedule: Schedule,
    }

    impl ScheduleBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.schedule.id = id.into();
            self
        }
        pub fn title(mut self, title: &str) -> Self {
            self.schedule.title = title.into();
            self
        }
        pub fn event(mut self, title: &str, location: &str, start: &str, end: &str) -> Self {
            self.schedule.events.push(ScheduleEvent {
                title: title.into(),
                location: location.into(),
                start: start.parse().expect("start"),
                end: end.parse().expect("end"),
                description: None,
            });
            self
        }
        pub fn description(mut self, description: &str) -> Self {
            if let Some(event) = self.schedule.events.last_mut() {
                event.description = Some(description.into());
            }
            self
        }
        pub fn finish(self) -> Schedule {
            self.schedule
        }
    }

    impl Builder for Schedule {
        type Build = ScheduleBuild;
        fn build() -> Self::Build {
            ScheduleBuild {
                schedule: Schedule {
                    id: Id::new(),
                    title: "".into(),
                    events: vec![],
                    created_at: Timestamp::now(),
                },
            }
        }
    }
}
