use crate::{geo::*, id::*, time::*};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id          : Id,
    pub pos         : MapPoint,
    pub title       : String,
    pub description : String,
    pub category    : String,
    // Opaque reference to the captured image, i.e. a data URI or URL
    pub photo       : Option<String>,
    pub votes       : u64,
    pub created_at  : Timestamp,
}

impl Location {
    pub const UNTITLED: &'static str = "Untitled Location";

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            Self::UNTITLED
        } else {
            &self.title
        }
    }

    pub fn has_photo(&self) -> bool {
        self.photo
            .as_deref()
            .map(|photo| !photo.trim().is_empty())
            .unwrap_or(false)
    }
}
