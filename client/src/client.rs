// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Client for the schedule and event endpoints.

use std::sync::Arc;

use reqwest::Method;
use sittersync_core::{Event, PersistRequest, Schedule, ScheduleSet, ViewSelection};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::HttpClient;
use crate::types::{Ack, CompletePatch, CreatedEvent, NewSchedule, UpdatedSchedule};

/// Client for the SitterSync schedule service.
///
/// # Example
///
/// ```ignore
/// use sittersync_client::{AuthMethod, ClientConfig, ScheduleClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig {
///     base_url: "http://localhost:3000/api".to_string(),
///     auth: AuthMethod::Bearer {
///         token: "id-token".to_string(),
///     },
///     ..Default::default()
/// };
///
/// let client = ScheduleClient::new(config)?;
/// let schedules = client.own_schedules().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleClient {
    http: Arc<HttpClient>,
}

impl ScheduleClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = HttpClient::new(config)?;
        Ok(Self {
            http: Arc::new(http),
        })
    }

    /// Creates a schedule owned by the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_schedule(&self, title: &str) -> Result<Schedule, ClientError> {
        let req = self
            .http
            .build_request(Method::POST, "/schedule")
            .json(&NewSchedule { title });
        let resp = self.http.execute(req).await?;
        HttpClient::read_json(resp).await
    }

    /// Fetches every schedule the caller owns or has been shared.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn own_schedules(&self) -> Result<ScheduleSet, ClientError> {
        let req = self.http.build_request(Method::GET, "/schedule/self");
        let resp = self.http.execute(req).await?;
        HttpClient::read_json(resp).await
    }

    /// Fetches one schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_schedule(&self, schedule_id: &str) -> Result<Schedule, ClientError> {
        let req = self.schedule_request(Method::GET, "/schedule", schedule_id)?;
        let resp = self.http.execute(req).await?;
        HttpClient::read_json(resp).await
    }

    /// Replaces a schedule, returning the stored version.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_schedule(&self, schedule: &Schedule) -> Result<Schedule, ClientError> {
        let req = self
            .schedule_request(Method::PUT, "/schedule", &schedule.id)?
            .json(schedule);
        let resp = self.http.execute(req).await?;
        let body: UpdatedSchedule = HttpClient::read_json(resp).await?;
        Self::ensure_success(body.success)?;
        Ok(body.updated_schedule)
    }

    /// Deletes a schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_schedule(&self, schedule_id: &str) -> Result<(), ClientError> {
        let req = self.schedule_request(Method::DELETE, "/schedule", schedule_id)?;
        let resp = self.http.execute(req).await?;
        let body: Ack = HttpClient::read_json(resp).await?;
        Self::ensure_success(body.success)
    }

    /// Adds an event to a schedule, returning the stored event.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_event(&self, schedule_id: &str, event: &Event) -> Result<Event, ClientError> {
        let req = self
            .schedule_request(Method::POST, "/event", schedule_id)?
            .json(&Self::wire_event(event));
        let resp = self.http.execute(req).await?;
        let body: CreatedEvent = HttpClient::read_json(resp).await?;
        Self::ensure_success(body.success)?;
        Ok(body.new_event)
    }

    /// Replaces an event, returning the schedule that now holds it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_event(
        &self,
        schedule_id: &str,
        event: &Event,
    ) -> Result<Schedule, ClientError> {
        self.rewrite_event(Method::PUT, schedule_id, event).await
    }

    /// Removes an event, returning the schedule without it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_event(
        &self,
        schedule_id: &str,
        event: &Event,
    ) -> Result<Schedule, ClientError> {
        self.rewrite_event(Method::DELETE, schedule_id, event).await
    }

    /// Sets the completion flag of an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn complete_event(
        &self,
        schedule_id: &str,
        event_id: &str,
        completed: bool,
    ) -> Result<Schedule, ClientError> {
        let req = self
            .schedule_request(Method::PUT, "/event/complete", schedule_id)?
            .json(&CompletePatch::new(event_id, completed));
        let resp = self.http.execute(req).await?;
        let body: UpdatedSchedule = HttpClient::read_json(resp).await?;
        Self::ensure_success(body.success)?;
        Ok(body.updated_schedule)
    }

    /// Sends one write queued by the controller.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn send(&self, request: &PersistRequest) -> Result<(), ClientError> {
        match request {
            PersistRequest::CreateEvent { schedule_id, event } => {
                self.create_event(schedule_id, event).await.map(drop)
            }
            PersistRequest::UpdateEvent { schedule_id, event } => {
                self.update_event(schedule_id, event).await.map(drop)
            }
            PersistRequest::DeleteEvent { schedule_id, event } => {
                self.delete_event(schedule_id, event).await.map(drop)
            }
            PersistRequest::CompleteEvent {
                schedule_id,
                event_id,
                completed,
            } => self
                .complete_event(schedule_id, event_id, *completed)
                .await
                .map(drop),
            PersistRequest::UpdateSchedule(schedule) => {
                self.update_schedule(schedule).await.map(drop)
            }
            PersistRequest::DeleteSchedule { schedule_id } => {
                self.delete_schedule(schedule_id).await
            }
        }
    }

    async fn rewrite_event(
        &self,
        method: Method,
        schedule_id: &str,
        event: &Event,
    ) -> Result<Schedule, ClientError> {
        let req = self
            .schedule_request(method, "/event", schedule_id)?
            .json(&Self::wire_event(event));
        let resp = self.http.execute(req).await?;
        let body: UpdatedSchedule = HttpClient::read_json(resp).await?;
        Self::ensure_success(body.success)?;
        Ok(body.updated_schedule)
    }

    fn schedule_request(
        &self,
        method: Method,
        path: &str,
        schedule_id: &str,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        if schedule_id == ViewSelection::ALL {
            return Err(ClientError::AllSchedules);
        }
        Ok(self
            .http
            .build_request(method, path)
            .query(&[("id", schedule_id)]))
    }

    /// The event as stored, without the view-only parent tag.
    fn wire_event(event: &Event) -> Event {
        event.clone().detached()
    }

    fn ensure_success(success: bool) -> Result<(), ClientError> {
        match success {
            true => Ok(()),
            false => Err(ClientError::InvalidResponse(
                "response did not report success".to_string(),
            )),
        }
    }
}
