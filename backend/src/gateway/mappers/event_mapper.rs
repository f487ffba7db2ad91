use crate::domain::models::{Event, EventUpdate, NewEvent};
use crate::gateway::rows::{EventPatchRow, EventRow, NewEventRow};
use crate::gateway::{Collection, RemoteError};

use super::{format_timestamp, parse_count, parse_timestamp};

pub struct EventMapper;

impl EventMapper {
    pub fn to_domain(row: EventRow) -> Result<Event, RemoteError> {
        let attendance = row
            .attendance
            .map(|value| parse_count(Collection::Events, "attendance", value))
            .transpose()?;

        Ok(Event {
            date: parse_timestamp(Collection::Events, "date", &row.date)?,
            created_at: parse_timestamp(Collection::Events, "created_at", &row.created_at)?,
            attendance,
            id: row.id,
            title: row.title,
            location: row.location,
            category: row.kind,
            description: row.description,
        })
    }

    pub fn to_insert_row(event: &NewEvent) -> NewEventRow {
        NewEventRow {
            title: event.title.clone(),
            date: format_timestamp(event.date),
            location: event.location.clone(),
            kind: event.category.clone(),
            description: event.description.clone(),
            attendance: event.attendance.map(i64::from),
        }
    }

    pub fn to_patch_row(changes: &EventUpdate) -> EventPatchRow {
        EventPatchRow {
            title: changes.title.clone(),
            date: changes.date.map(format_timestamp),
            location: changes.location.clone(),
            kind: changes.category.clone(),
            description: changes.description.clone(),
            attendance: changes.attendance.map(|count| count.map(i64::from)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_to_domain_maps_type_to_category() {
        let event = EventMapper::to_domain(EventRow {
            id: "ev-1".to_string(),
            title: "Culto de Celebração".to_string(),
            date: "2026-10-25T19:00:00-03:00".to_string(),
            location: "Templo".to_string(),
            kind: "Culto".to_string(),
            description: None,
            attendance: Some(180),
            created_at: "2026-10-01T12:00:00+00:00".to_string(),
        })
        .unwrap();

        assert_eq!(event.category, "Culto");
        assert_eq!(event.attendance, Some(180));
        assert_eq!(event.date.to_rfc3339(), "2026-10-25T22:00:00+00:00");
    }

    #[test]
    fn test_patch_row_renames_category() {
        let patch = EventMapper::to_patch_row(&EventUpdate {
            category: Some("Estudo Bíblico".to_string()),
            attendance: Some(Some(30)),
            ..Default::default()
        });

        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({ "type": "Estudo Bíblico", "attendance": 30 })
        );
    }
}
