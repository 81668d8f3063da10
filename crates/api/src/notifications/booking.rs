//! Event-to-email routing for booking confirmations.

use async_trait::async_trait;
use bucketlist_events::delivery::email::EmailError;
use bucketlist_events::{BookingConfirmed, BookingEvent, EmailDelivery, EventEnvelope};
use tokio::sync::broadcast;

/// Something that can deliver a booking confirmation.
#[async_trait]
pub trait ConfirmationMailer: Send + Sync {
    async fn send_booking_confirmation(&self, booking: &BookingConfirmed)
        -> Result<(), EmailError>;
}

#[async_trait]
impl ConfirmationMailer for EmailDelivery {
    async fn send_booking_confirmation(
        &self,
        booking: &BookingConfirmed,
    ) -> Result<(), EmailError> {
        EmailDelivery::send_booking_confirmation(self, booking).await
    }
}

/// Turns `booking.confirmed` events into confirmation emails.
pub struct BookingNotifier<M> {
    mailer: M,
}

impl<M: ConfirmationMailer> BookingNotifier<M> {
    pub fn new(mailer: M) -> Self {
        Self { mailer }
    }

    /// Run the delivery loop.
    ///
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](bucketlist_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<EventEnvelope>) {
        loop {
            match receiver.recv().await {
                Ok(envelope) => self.handle_event(&envelope.event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Booking notifier lagged, emails were skipped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, booking notifier shutting down");
                    break;
                }
            }
        }
    }

    /// Mail confirmations. Cancellations send nothing.
    pub async fn handle_event(&self, event: &BookingEvent) {
        let BookingEvent::Confirmed(booking) = event else {
            return;
        };

        if let Err(e) = self.mailer.send_booking_confirmation(booking).await {
            tracing::warn!(
                error = %e,
                booking_id = booking.booking_id,
                reference = %booking.reference,
                "Booking confirmation email failed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use bucketlist_events::{BookingCancelled, EventBus};
    use chrono::{NaiveDate, NaiveTime};

    use super::*;

    /// Records references; fails for the configured reference.
    #[derive(Clone, Default)]
    struct RecordingMailer {
        sent: Arc<Mutex<Vec<String>>>,
        fail_for: Option<String>,
    }

    #[async_trait]
    impl ConfirmationMailer for RecordingMailer {
        async fn send_booking_confirmation(
            &self,
            booking: &BookingConfirmed,
        ) -> Result<(), EmailError> {
            if self.fail_for.as_deref() == Some(booking.reference.as_str()) {
                return Err(EmailError::Build("smtp down".into()));
            }
            self.sent.lock().unwrap().push(booking.reference.clone());
            Ok(())
        }
    }

    fn confirmed(reference: &str) -> BookingEvent {
        BookingEvent::Confirmed(BookingConfirmed {
            booking_id: 1,
            reference: reference.to_string(),
            contact_name: "Asha Rao".to_string(),
            contact_email: "asha@example.com".to_string(),
            experience_title: "Rafting in Rishikesh".to_string(),
            activity_name: "16 km run".to_string(),
            booking_date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            participants: 2,
            total_amount: 300_000,
            currency: "INR".to_string(),
            is_offline: false,
        })
    }

    #[tokio::test]
    async fn confirmed_events_are_mailed_and_others_ignored() {
        let mailer = RecordingMailer::default();
        let notifier = BookingNotifier::new(mailer.clone());

        notifier.handle_event(&confirmed("BKL-AAAA2222")).await;
        notifier
            .handle_event(&BookingEvent::Cancelled(BookingCancelled {
                booking_id: 2,
                reference: "BKL-BBBB3333".to_string(),
                time_slot_id: 1,
                booking_date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
                participants: 1,
            }))
            .await;

        assert_eq!(*mailer.sent.lock().unwrap(), vec!["BKL-AAAA2222".to_string()]);
    }

    #[tokio::test]
    async fn mail_failure_is_swallowed_and_loop_continues() {
        let mailer = RecordingMailer {
            fail_for: Some("BKL-FAIL2222".to_string()),
            ..RecordingMailer::default()
        };
        let bus = EventBus::new(16);
        let handle = tokio::spawn(BookingNotifier::new(mailer.clone()).run(bus.subscribe()));

        bus.publish(confirmed("BKL-FAIL2222"), None);
        bus.publish(confirmed("BKL-OK222222"), Some(5));
        drop(bus);

        handle.await.unwrap();
        assert_eq!(*mailer.sent.lock().unwrap(), vec!["BKL-OK222222".to_string()]);
    }
}
