use crate::models::contact::{ContactMessage, ValidContact};
use chrono::Utc;
use std::sync::{PoisonError, RwLock};
use uuid::Uuid;

/// In-process store of contact form submissions.
///
/// Owned by the application and shared through `web::Data`; contents are
/// lost on restart.
#[derive(Debug, Default)]
pub struct ContactInbox {
    messages: RwLock<Vec<ContactMessage>>,
}

impl ContactInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a submission and returns the stored message.
    pub fn push(&self, contact: ValidContact) -> ContactMessage {
        let message = ContactMessage {
            id: Uuid::new_v4().to_string(),
            name: contact.name,
            email: contact.email,
            subject: contact.subject,
            message: contact.message,
            timestamp: Utc::now().to_rfc3339(),
            read: false,
        };

        self.messages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.clone());
        message
    }

    /// All messages, latest first.
    pub fn newest_first(&self) -> Vec<ContactMessage> {
        let messages = self.messages.read().unwrap_or_else(PoisonError::into_inner);
        messages.iter().rev().cloned().collect()
    }

    /// Removes a message; `false` when the id is unknown.
    pub fn remove(&self, id: &str) -> bool {
        let mut messages = self.messages.write().unwrap_or_else(PoisonError::into_inner);
        match messages.iter().position(|m| m.id == id) {
            Some(index) => {
                messages.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn mark_read(&self, id: &str) -> Option<ContactMessage> {
        let mut messages = self.messages.write().unwrap_or_else(PoisonError::into_inner);
        let message = messages.iter_mut().find(|m| m.id == id)?;
        message.read = true;
        Some(message.clone())
    }

    pub fn len(&self) -> usize {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
