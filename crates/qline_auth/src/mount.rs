//! Page-mount lifetime.
//!
//! A [`Mount`] lives as long as the page that started an auth check. Checks
//! hold a [`MountToken`] and must drop any redirect decision once the token
//! reports the page is gone.

use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug)]
pub struct Mount {
    id: Uuid,
    tx: watch::Sender<bool>,
}

impl Mount {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(true);
        Self {
            id: Uuid::new_v4(),
            tx,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn token(&self) -> MountToken {
        MountToken {
            id: self.id,
            rx: self.tx.subscribe(),
        }
    }

    /// Marks the page as gone. Dropping the mount has the same effect.
    pub fn unmount(self) {
        drop(self);
    }
}

impl Default for Mount {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.tx.send_replace(false);
        debug!(mount_id = %self.id, "Page unmounted");
    }
}

#[derive(Debug, Clone)]
pub struct MountToken {
    id: Uuid,
    rx: watch::Receiver<bool>,
}

impl MountToken {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_mounted(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the page is unmounted. Returns immediately if it
    /// already is.
    pub async fn unmounted(&self) {
        let mut rx = self.rx.clone();
        // Err means the sender is gone, which only happens after Drop flipped the flag
        let _ = rx.wait_for(|mounted| !*mounted).await;
    }
}
