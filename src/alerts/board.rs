use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{AlertHandle, AlertLifetime, AlertSpec, AlertSurface};

#[derive(Debug, Clone)]
pub struct VisibleAlert {
    pub handle: AlertHandle,
    pub spec: AlertSpec,
    pub shown_at: DateTime<Utc>,
}

#[derive(Default)]
struct BoardState {
    visible: Vec<VisibleAlert>,
    history: Vec<VisibleAlert>,
}

/// In-process alert surface: an ordered list of what is on screen plus everything ever shown.
#[derive(Clone, Default)]
pub struct AlertBoard {
    state: Arc<Mutex<BoardState>>,
}

impl AlertBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// On-screen alerts, oldest first.
    pub fn visible(&self) -> Vec<VisibleAlert> {
        self.lock().visible.clone()
    }

    pub fn history(&self) -> Vec<VisibleAlert> {
        self.lock().history.clone()
    }

    pub fn get(&self, handle: AlertHandle) -> Option<VisibleAlert> {
        self.lock().visible.iter().find(|a| a.handle == handle).cloned()
    }

    /// 1-based, matching what the console prints.
    pub fn nth(&self, position: usize) -> Option<VisibleAlert> {
        position
            .checked_sub(1)
            .and_then(|index| self.lock().visible.get(index).cloned())
    }

    pub fn is_visible(&self, handle: AlertHandle) -> bool {
        self.lock().visible.iter().any(|a| a.handle == handle)
    }
}

impl AlertSurface for AlertBoard {
    fn show(&self, spec: AlertSpec) -> AlertHandle {
        let handle = AlertHandle::new();
        log::info!(
            "[{:?}] {}: {} ({})",
            spec.severity,
            spec.summary,
            spec.detail,
            handle
        );

        if let AlertLifetime::Timed(life) = spec.lifetime {
            // Without a runtime the alert simply stays until removed.
            if let Ok(runtime) = tokio::runtime::Handle::try_current() {
                let board = self.clone();
                runtime.spawn(async move {
                    tokio::time::sleep(life).await;
                    board.remove(handle);
                });
            }
        }

        let alert = VisibleAlert {
            handle,
            spec,
            shown_at: Utc::now(),
        };
        let mut state = self.lock();
        state.history.push(alert.clone());
        state.visible.push(alert);
        handle
    }

    fn remove(&self, handle: AlertHandle) {
        let mut state = self.lock();
        let before = state.visible.len();
        state.visible.retain(|a| a.handle != handle);
        if state.visible.len() < before {
            log::debug!("Alert {} removed", handle);
        } else {
            log::debug!("Alert {} already gone", handle);
        }
    }
}
