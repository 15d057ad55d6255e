//! Game flow orchestration - bridges pure domain logic with the stores.
//!
//! The service is stateless; every call takes an explicit [`SessionContext`]
//! naming the session it operates on. There is deliberately no process-wide
//! session registry at this layer.

mod actions;
mod lifecycle;
mod scheduler;
mod timer;
mod votes;


use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::EngineConfig;
use crate::domain::session::SessionId;
use crate::protocol::Notification;
use crate::store::{SessionStore, TransientStore};

pub use scheduler::{PhaseStep, SessionRuntime};
pub use timer::{PhaseTimer, TimerSignal};

/// Game flow service - fine-grained submission methods plus the scheduler
/// transition used by the per-session runtime.
#[derive(Default, Clone, Copy)]
pub struct GameFlowService;

/// Explicit per-session context passed into every scheduler/resolver/tally
/// call.
#[derive(Clone)]
pub struct SessionContext {
    pub session_id: SessionId,
    pub sessions: Arc<dyn SessionStore>,
    pub transient: Arc<dyn TransientStore>,
    pub notifier: broadcast::Sender<Notification>,
    pub config: Arc<EngineConfig>,
}

impl SessionContext {
    /// Fan a notification out to the session's subscriber group. A session
    /// with no live subscribers is not an error.
    pub fn notify(&self, notification: Notification) {
        let _ = self.notifier.send(notification);
    }
}
