//! Event service
//!
//! Event administration: creation, activation and attendance lists.

use elithe_core::entities::Event;
use elithe_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{AttendanceEntryResponse, CreateEventRequest, EventResponse};

use super::attendance::required;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Event service
pub struct EventService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventService<'a> {
    /// Create a new EventService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new event, optionally making it the active one
    #[instrument(skip(self, request))]
    pub async fn create_event(&self, request: CreateEventRequest) -> ServiceResult<EventResponse> {
        let name = required(&request.name, "Event name is required")?;
        let destination = required(&request.destination, "Destination is required")?;

        let event = Event::new(
            self.ctx.generate_id(),
            name.to_string(),
            destination.to_string(),
            request.date,
        );
        self.ctx.event_repo().create(&event).await?;

        info!(event_id = %event.id, date = %event.date, "Event created");

        if request.activate {
            return self.activate(event.id).await;
        }

        Ok(EventResponse::from(&event))
    }

    /// Make an event the single active one
    #[instrument(skip(self))]
    pub async fn activate(&self, event_id: Snowflake) -> ServiceResult<EventResponse> {
        let event = self
            .ctx
            .event_repo()
            .activate(event_id)
            .await?
            .ok_or(DomainError::EventNotFound(event_id))?;

        Ok(EventResponse::from(&event))
    }

    /// Get the event currently accepting confirmations
    #[instrument(skip(self))]
    pub async fn get_active(&self) -> ServiceResult<EventResponse> {
        let event = self
            .ctx
            .event_repo()
            .find_active()
            .await?
            .ok_or(DomainError::NoActiveEvent)?;

        Ok(EventResponse::from(&event))
    }

    /// Get an event by ID
    #[instrument(skip(self))]
    pub async fn get_event(&self, event_id: Snowflake) -> ServiceResult<EventResponse> {
        let event = self
            .ctx
            .event_repo()
            .find_by_id(event_id)
            .await?
            .ok_or(DomainError::EventNotFound(event_id))?;

        Ok(EventResponse::from(&event))
    }

    /// List all events, newest ride first
    #[instrument(skip(self))]
    pub async fn list_events(&self) -> ServiceResult<Vec<EventResponse>> {
        let events = self.ctx.event_repo().list().await?;
        Ok(events.iter().map(EventResponse::from).collect())
    }

    /// List the confirmations of an event in confirmation order
    #[instrument(skip(self))]
    pub async fn list_attendance(
        &self,
        event_id: Snowflake,
    ) -> ServiceResult<Vec<AttendanceEntryResponse>> {
        if self.ctx.event_repo().find_by_id(event_id).await?.is_none() {
            return Err(DomainError::EventNotFound(event_id).into());
        }

        let entries = self.ctx.confirmation_repo().list_attendance(event_id).await?;
        Ok(entries.iter().map(AttendanceEntryResponse::from).collect())
    }
}
