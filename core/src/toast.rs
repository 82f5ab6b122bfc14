//! Observable list of toast notifications.
//!
//! # Design
//! The queue lives inside a `tokio::sync::watch` channel owned by
//! `ToastStore`. Every mutation replaces what subscribers see with the whole
//! ordered list, never a diff, and a fresh subscriber starts from the list
//! as it is at subscribe time. Clones of the store share one queue.
//! Expiry is the display layer's business; items stay until removed.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToastType {
    #[default]
    Default,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToastItem {
    /// Unique among all items ever created by any store.
    pub id: String,
    pub message: String,
    pub toast_type: ToastType,
}

#[derive(Debug, Clone)]
pub struct ToastStore {
    items: Arc<watch::Sender<Vec<ToastItem>>>,
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastStore {
    pub fn new() -> Self {
        let (items, _) = watch::channel(Vec::new());
        Self {
            items: Arc::new(items),
        }
    }

    /// A receiver that always holds the current list.
    pub fn subscribe(&self) -> watch::Receiver<Vec<ToastItem>> {
        self.items.subscribe()
    }

    /// Snapshot of the list, oldest first.
    pub fn items(&self) -> Vec<ToastItem> {
        self.items.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn toast(&self, message: impl Into<String>) -> ToastItem {
        self.push(ToastType::Default, message.into())
    }

    pub fn warn(&self, message: impl Into<String>) -> ToastItem {
        self.push(ToastType::Warning, message.into())
    }

    /// Removes the first item equal to `item`. Returns false, without
    /// notifying anyone, when there is no such item.
    pub fn remove_toast(&self, item: &ToastItem) -> bool {
        self.items.send_if_modified(|items| {
            match items.iter().position(|existing| existing == item) {
                Some(index) => {
                    items.remove(index);
                    true
                }
                None => false,
            }
        })
    }

    pub fn clear(&self) {
        self.items.send_if_modified(|items| {
            let had_items = !items.is_empty();
            items.clear();
            had_items
        });
    }

    fn push(&self, toast_type: ToastType, message: String) -> ToastItem {
        let item = ToastItem {
            id: format!("toast-{}", Uuid::new_v4().simple()),
            message,
            toast_type,
        };
        let pushed = item.clone();
        self.items.send_modify(move |items| items.push(item));
        pushed
    }
}
