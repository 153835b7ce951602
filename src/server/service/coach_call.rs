//! One-on-one coach call booking.
//!
//! A member may hold one non-cancelled call per UTC day. When a calendar is configured the
//! slot must be free on the coach's calendar, and a calendar event with a meeting link is
//! created after booking.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::CoachCallStatus;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::coach_call::CoachCallRepository,
    error::AppError,
    integration::{calendar::NewCalendarEvent, email::EmailMessage, Integrations},
    model::{
        coach_call::{BookCoachCallParams, CallSlot, CoachCall},
        user::User,
    },
};

pub struct CoachCallService<'a> {
    pub db: &'a DatabaseConnection,
    pub integrations: &'a Integrations,
    pub call_minutes: i64,
}

impl<'a> CoachCallService<'a> {
    pub fn new(db: &'a DatabaseConnection, integrations: &'a Integrations, call_minutes: i64) -> Self {
        Self {
            db,
            integrations,
            call_minutes,
        }
    }

    /// Books a call for `user`.
    ///
    /// # Returns
    /// - `Ok(CoachCall)` - Scheduled call
    /// - `Err(AppError::BadRequest)` - Start is in the past or off a slot boundary
    /// - `Err(AppError::Conflict)` - Member already has a call that day, or the coach is busy
    /// - `Err(AppError::IntegrationErr)` - Calendar could not be queried
    pub async fn book(
        &self,
        user: &User,
        params: BookCoachCallParams,
        now: DateTime<Utc>,
    ) -> Result<CoachCall, AppError> {
        let slot = CallSlot::new(params.starts_at, self.call_minutes);

        if slot.starts_at <= now {
            return Err(AppError::BadRequest(
                "Calls must be booked in the future".to_string(),
            ));
        }
        if !slot.is_aligned(self.call_minutes) {
            return Err(AppError::BadRequest(format!(
                "Calls start on {}-minute boundaries",
                self.call_minutes
            )));
        }

        let repo = CoachCallRepository::new(self.db);
        let (day_start, day_end) = slot.day_bounds();
        if repo
            .exists_in_window(params.user_id, day_start, day_end)
            .await?
        {
            return Err(AppError::Conflict(
                "You already have a call booked that day".to_string(),
            ));
        }

        match self.integrations.calendar.as_ref() {
            Some(calendar) => {
                if !calendar.is_free(slot.starts_at, slot.ends_at).await? {
                    return Err(AppError::Conflict(
                        "That slot is no longer available".to_string(),
                    ));
                }
            }
            None => tracing::debug!("Calendar disabled, skipping availability check"),
        }

        let call = repo.create(params.user_id, slot, params.topic).await?;
        tracing::info!(
            "Booked coach call {} for user {} at {}",
            call.id,
            call.user_id,
            call.starts_at
        );

        let call = self.create_calendar_event(call, user).await;
        self.send_confirmation(&call, user).await;

        Ok(call)
    }

    pub async fn get_mine(&self, user_id: i32) -> Result<Vec<CoachCall>, AppError> {
        Ok(CoachCallRepository::new(self.db)
            .get_all(Some(user_id))
            .await?)
    }

    pub async fn get_all(&self) -> Result<Vec<CoachCall>, AppError> {
        Ok(CoachCallRepository::new(self.db).get_all(None).await?)
    }

    /// Cancels a scheduled call. Members may only cancel their own.
    ///
    /// The calendar event is removed on a best-effort basis.
    pub async fn cancel(&self, id: i32, requester: &User) -> Result<CoachCall, AppError> {
        let repo = CoachCallRepository::new(self.db);

        let call = repo
            .find_by_id(id)
            .await?
            .filter(|call| requester.admin || call.user_id == requester.id)
            .ok_or_else(|| AppError::NotFound("Coach call not found".to_string()))?;

        match call.status {
            CoachCallStatus::Cancelled => return Ok(call),
            CoachCallStatus::Completed => {
                return Err(AppError::BadRequest(
                    "Completed calls cannot be cancelled".to_string(),
                ))
            }
            CoachCallStatus::Scheduled => {}
        }

        let cancelled = repo
            .set_status(call.id, CoachCallStatus::Cancelled)
            .await?
            .ok_or_else(|| AppError::NotFound("Coach call not found".to_string()))?;
        tracing::info!("Cancelled coach call {}", cancelled.id);

        if let (Some(calendar), Some(event_id)) = (
            self.integrations.calendar.as_ref(),
            cancelled.calendar_event_id.as_deref(),
        ) {
            if let Err(e) = calendar.delete_event(event_id).await {
                tracing::warn!(
                    "Failed to remove calendar event for coach call {}: {}",
                    cancelled.id,
                    e
                );
            }
        }

        Ok(cancelled)
    }

    /// Marks a scheduled call as held.
    pub async fn complete(&self, id: i32) -> Result<CoachCall, AppError> {
        let repo = CoachCallRepository::new(self.db);

        let call = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Coach call not found".to_string()))?;

        if call.status == CoachCallStatus::Cancelled {
            return Err(AppError::BadRequest(
                "Cancelled calls cannot be completed".to_string(),
            ));
        }

        repo.set_status(call.id, CoachCallStatus::Completed)
            .await?
            .ok_or_else(|| AppError::NotFound("Coach call not found".to_string()))
    }

    async fn create_calendar_event(&self, call: CoachCall, user: &User) -> CoachCall {
        let Some(calendar) = self.integrations.calendar.as_ref() else {
            return call;
        };

        let created = match calendar
            .create_event(NewCalendarEvent {
                summary: format!("Coach call with {}", user.name),
                description: call.topic.clone().unwrap_or_default(),
                start: call.starts_at,
                end: call.ends_at,
                attendee_email: user.email.clone(),
                request_id: format!("coach-call-{}", call.id),
            })
            .await
        {
            Ok(created) => created,
            Err(e) => {
                tracing::warn!(
                    "Failed to create calendar event for coach call {}: {}",
                    call.id,
                    e
                );
                return call;
            }
        };

        match CoachCallRepository::new(self.db)
            .set_calendar_event(call.id, created.id, created.meeting_url)
            .await
        {
            Ok(Some(updated)) => updated,
            Ok(None) => call,
            Err(e) => {
                tracing::warn!(
                    "Failed to store calendar event for coach call {}: {}",
                    call.id,
                    e
                );
                call
            }
        }
    }

    async fn send_confirmation(&self, call: &CoachCall, user: &User) {
        let Some(email) = self.integrations.email.as_ref() else {
            tracing::debug!("Email disabled, skipping confirmation for coach call {}", call.id);
            return;
        };
        let Some(to) = user.email.clone() else {
            return;
        };

        let link = call
            .meeting_url
            .as_deref()
            .map(|url| format!(r#"<p><a href="{}">Join the call</a></p>"#, url))
            .unwrap_or_default();
        let html = format!(
            "<h1>Your coach call is booked</h1><p>{} to {} UTC</p>{}",
            call.starts_at.format("%A %-d %B %Y, %H:%M"),
            call.ends_at.format("%H:%M"),
            link
        );

        if let Err(e) = email
            .send(EmailMessage {
                to,
                subject: "Coach call confirmed".to_string(),
                html,
            })
            .await
        {
            tracing::warn!("Failed to email confirmation for coach call {}: {}", call.id, e);
        }
    }
}
