use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{error, info};

/// Domain events emitted by the service layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    QuotationCreated { quot_no: String, quot_id: i64 },
    QuotationReplaced { quot_no: String, quot_id: i64 },
    QuotationDeleted { quot_no: String },
    CompanyDeleted { company_id: i64 },
}

/// Cloneable handle for publishing events onto the in-process channel.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Background consumer. Events are observational only; losing one never
/// affects persisted state.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    while let Some(event) = receiver.recv().await {
        match &event {
            Event::QuotationCreated { quot_no, quot_id } => {
                info!(quot_no = %quot_no, quot_id = %quot_id, "quotation created");
            }
            Event::QuotationReplaced { quot_no, quot_id } => {
                info!(quot_no = %quot_no, quot_id = %quot_id, "quotation replaced");
            }
            Event::QuotationDeleted { quot_no } => {
                info!(quot_no = %quot_no, "quotation deleted");
            }
            Event::CompanyDeleted { company_id } => {
                info!(company_id = %company_id, "company deleted");
            }
        }
    }
    error!("event channel closed; consumer exiting");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_delivers_event() {
        let (tx, mut rx) = mpsc::channel(4);
        let sender = EventSender::new(tx);
        sender
            .send(Event::QuotationDeleted {
                quot_no: "QT-1".into(),
            })
            .await
            .expect("send should succeed");
        match rx.recv().await {
            Some(Event::QuotationDeleted { quot_no }) => assert_eq!(quot_no, "QT-1"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn send_fails_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sender = EventSender::new(tx);
        let result = sender
            .send(Event::QuotationDeleted {
                quot_no: "QT-2".into(),
            })
            .await;
        assert!(result.is_err());
    }
}
