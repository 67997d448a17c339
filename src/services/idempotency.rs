use {
    std::{
        collections::HashMap,
        sync::{Arc, Mutex, PoisonError},
    },
    tokio::sync::OwnedMutexGuard,
};

struct Slot {
    mutex: Arc<tokio::sync::Mutex<()>>,
    /// Holders plus waiters. The slot is dropped from the table at zero.
    users: usize,
}

type Table = Arc<Mutex<HashMap<String, Slot>>>;

/// One async mutex per idempotency key. Entries exist only while someone
/// holds or waits for them.
#[derive(Default, Clone)]
pub struct KeyedLocks {
    table: Table,
}

/// Counts one user of a slot from before it starts waiting, so a waiter
/// cancelled mid-await still gives its slot back.
struct Ticket {
    key: String,
    table: Table,
}

/// Held for the whole create sequence of one key.
pub struct KeyGuard {
    // Field order matters: release the mutex, then the ticket.
    _guard: OwnedMutexGuard<()>,
    _ticket: Ticket,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, key: &str) -> KeyGuard {
        let (ticket, mutex) = Ticket::take(&self.table, key);
        let guard = mutex.lock_owned().await;
        KeyGuard {
            _guard: guard,
            _ticket: ticket,
        }
    }

    /// Number of keys currently locked or awaited.
    pub fn active(&self) -> usize {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Ticket {
    fn take(table: &Table, key: &str) -> (Self, Arc<tokio::sync::Mutex<()>>) {
        let mut slots = table.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = slots.entry(key.to_string()).or_insert_with(|| Slot {
            mutex: Arc::default(),
            users: 0,
        });
        slot.users += 1;
        let ticket = Self {
            key: key.to_string(),
            table: table.clone(),
        };
        (ticket, slot.mutex.clone())
    }
}

impl Drop for Ticket {
    fn drop(&mut self) {
        let mut slots = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(slot) = slots.get_mut(&self.key) {
            slot.users -= 1;
            if slot.users == 0 {
                slots.remove(&self.key);
            }
        }
    }
}
