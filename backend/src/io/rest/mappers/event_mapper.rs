use shared::{CreateEventRequest, Event as EventDto, UpdateEventRequest};

use crate::domain::models::{Event, EventUpdate, NewEvent};
use crate::io::rest::error::ApiError;

use super::parse_timestamp;

pub struct EventMapper;

impl EventMapper {
    pub fn to_dto(domain: Event) -> EventDto {
        EventDto {
            id: domain.id,
            title: domain.title,
            date: domain.date.to_rfc3339(),
            location: domain.location,
            category: domain.category,
            description: domain.description,
            attendance: domain.attendance,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_new(request: CreateEventRequest) -> Result<NewEvent, ApiError> {
        Ok(NewEvent {
            date: parse_timestamp("date", &request.date)?,
            title: request.title,
            location: request.location,
            category: request.category,
            description: request.description,
            attendance: request.attendance,
        })
    }

    pub fn to_update(request: UpdateEventRequest) -> Result<EventUpdate, ApiError> {
        Ok(EventUpdate {
            date: request
                .date
                .as_deref()
                .map(|value| parse_timestamp("date", value))
                .transpose()?,
            title: request.title,
            location: request.location,
            category: request.category,
            description: request.description,
            attendance: request.attendance,
        })
    }
}
