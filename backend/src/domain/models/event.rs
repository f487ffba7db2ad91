//! Domain model for a church event.
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub location: String,
    /// Free-text event type, e.g. "Culto" or "Estudo Bíblico"
    pub category: String,
    pub description: Option<String>,
    /// Head count, recorded after the event took place
    pub attendance: Option<u32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub category: String,
    pub description: Option<String>,
    pub attendance: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventUpdate {
    pub title: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub description: Option<Option<String>>,
    pub attendance: Option<Option<u32>>,
}

impl Event {
    pub fn from_new(id: String, new: NewEvent, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            date: new.date,
            location: new.location,
            category: new.category,
            description: new.description,
            attendance: new.attendance,
            created_at,
        }
    }

    pub fn apply(&mut self, update: EventUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(attendance) = update.attendance {
            self.attendance = attendance;
        }
    }
}
