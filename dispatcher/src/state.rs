//! Session status map
//!
//! Every write goes through one lock and is published while the lock is held,
//! so subscribers see each recipient's changes in the order they were applied.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use shared::{RecipientId, RequestStatus};
use crate::error::{DispatcherError, DispatcherResult};
use crate::types::StatusChange;

const EVENT_CAPACITY: usize = 256;

/// Status map shared between the tracker and its dispatch tasks
pub type SharedStatusMap = Arc<RwLock<HashMap<RecipientId, RequestStatus>>>;

/// Status per recipient plus the change feed
#[derive(Clone)]
pub struct StatusBoard {
    statuses: SharedStatusMap,
    events: broadcast::Sender<StatusChange>,
}

impl StatusBoard {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            statuses: Arc::new(RwLock::new(HashMap::new())),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StatusChange> {
        self.events.subscribe()
    }

    pub async fn get(&self, recipient: &RecipientId) -> Option<RequestStatus> {
        self.statuses.read().await.get(recipient).copied()
    }

    pub async fn snapshot(&self) -> HashMap<RecipientId, RequestStatus> {
        self.statuses.read().await.clone()
    }

    /// Create the `Pending` entry; refused when any entry already exists
    pub async fn begin(&self, recipient: &RecipientId) -> DispatcherResult<()> {
        let mut statuses = self.statuses.write().await;
        if statuses.contains_key(recipient) {
            return Err(DispatcherError::AlreadyRequested {
                recipient: recipient.clone(),
            });
        }

        statuses.insert(recipient.clone(), RequestStatus::Pending);
        self.publish(recipient, RequestStatus::Pending);
        Ok(())
    }

    /// Move a recipient from `from` to `to`, only if it is still at `from`
    pub async fn transition(
        &self,
        recipient: &RecipientId,
        from: RequestStatus,
        to: RequestStatus,
    ) -> DispatcherResult<()> {
        let mut statuses = self.statuses.write().await;
        let current = statuses.get(recipient).copied();

        if current != Some(from) || !from.can_transition_to(to) {
            return Err(match current {
                None => DispatcherError::UnknownRecipient {
                    recipient: recipient.clone(),
                },
                Some(_) => DispatcherError::InvalidTransition {
                    recipient: recipient.clone(),
                    from: current,
                    to,
                },
            });
        }

        statuses.insert(recipient.clone(), to);
        self.publish(recipient, to);
        Ok(())
    }

    fn publish(&self, recipient: &RecipientId, status: RequestStatus) {
        // No subscribers is fine
        let _ = self.events.send(StatusChange::now(recipient.clone(), status));
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_begin_refuses_existing_entry() {
        let board = StatusBoard::new();
        let id = RecipientId::new("bank_0");

        board.begin(&id).await.unwrap();
        assert_eq!(board.get(&id).await, Some(RequestStatus::Pending));

        let second = board.begin(&id).await;
        assert!(matches!(second, Err(DispatcherError::AlreadyRequested { .. })));
        assert_eq!(board.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn test_transition_checks_current_state() {
        let board = StatusBoard::new();
        let id = RecipientId::new("bank_1");

        let unknown = board.transition(&id, RequestStatus::Pending, RequestStatus::Sent).await;
        assert!(matches!(unknown, Err(DispatcherError::UnknownRecipient { .. })));

        board.begin(&id).await.unwrap();
        let skipped = board.transition(&id, RequestStatus::Sent, RequestStatus::Partial).await;
        assert!(matches!(skipped, Err(DispatcherError::InvalidTransition { .. })));

        board.transition(&id, RequestStatus::Pending, RequestStatus::Sent).await.unwrap();
        board.transition(&id, RequestStatus::Sent, RequestStatus::Partial).await.unwrap();
        assert_eq!(board.get(&id).await, Some(RequestStatus::Partial));

        let after_terminal = board.transition(&id, RequestStatus::Partial, RequestStatus::Available).await;
        assert!(after_terminal.is_err());
    }

    #[tokio::test]
    async fn test_changes_are_published_in_order() {
        let board = StatusBoard::new();
        let mut events = board.subscribe();
        let id = RecipientId::new("bank_2");

        board.begin(&id).await.unwrap();
        board.transition(&id, RequestStatus::Pending, RequestStatus::Failed).await.unwrap();

        assert_eq!(events.recv().await.unwrap().status, RequestStatus::Pending);
        let last = events.recv().await.unwrap();
        assert_eq!(last.status, RequestStatus::Failed);
        assert_eq!(last.recipient, id);
    }
}
