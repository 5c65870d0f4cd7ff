use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::alerts::{ActionEffect, AlertAction, AlertHandle, AlertSpec, AlertSurface, Severity};
use crate::config::PollerSettings;
use crate::error::TransportResult;
use crate::models::{Notification, NotificationId};

pub const NEW_NOTIFICATION_SUMMARY: &str = "Nueva notificación";
pub const ACK_SUCCESS_SUMMARY: &str = "Éxito";
pub const ACK_SUCCESS_DETAIL: &str = "Notificación marcada como atendida";
pub const ACK_FAILURE_SUMMARY: &str = "Error";
pub const ACK_FAILURE_DETAIL: &str = "No se pudo marcar la notificación como atendida";

pub const VIEW_ACTION: AlertAction = AlertAction {
    id: "ver",
    label: "Ver",
    effect: ActionEffect::View,
};
pub const ACKNOWLEDGE_ACTION: AlertAction = AlertAction {
    id: "atendido",
    label: "Atendido",
    effect: ActionEffect::Acknowledge,
};
pub const DISMISS_ACTION: AlertAction = AlertAction {
    id: "cerrar",
    label: "Cerrar",
    effect: ActionEffect::Dismiss,
};

#[async_trait]
pub trait NotificationTransport: Send + Sync {
    async fn fetch_all(&self) -> TransportResult<Vec<Notification>>;
    async fn acknowledge(&self, id: &NotificationId) -> TransportResult<Notification>;
}

/// Point-in-time view of where the user currently is.
pub trait RouteObserver: Send + Sync {
    fn current_path(&self) -> String;
}

/// A route cell the navigation layer writes and the poller reads.
#[derive(Clone, Default)]
pub struct SharedRoute {
    path: Arc<RwLock<String>>,
}

impl SharedRoute {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            path: Arc::new(RwLock::new(initial.into())),
        }
    }

    pub fn set(&self, path: impl Into<String>) {
        *self.path.write().unwrap_or_else(PoisonError::into_inner) = path.into();
    }
}

impl RouteObserver for SharedRoute {
    fn current_path(&self) -> String {
        self.path.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PollerError {
    #[error("polling interval must be greater than zero")]
    ZeroInterval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The current route opts out of notifications; nothing was fetched.
    Suppressed,
    /// The fetch failed; already logged.
    Failed,
    /// This many alerts were shown.
    Shown(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Viewed,
    Acknowledged,
    AcknowledgeFailed,
    Dismissed,
    /// The handle does not belong to a live notification alert.
    UnknownAlert,
}

struct PollerInner {
    transport: Arc<dyn NotificationTransport>,
    route: Arc<dyn RouteObserver>,
    surface: Arc<dyn AlertSurface>,
    settings: PollerSettings,
    displayed: Mutex<HashMap<AlertHandle, Notification>>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

/// Periodically turns pending notifications into sticky alerts and handles the
/// view / acknowledge / dismiss actions on them.
#[derive(Clone)]
pub struct NotificationPoller {
    inner: Arc<PollerInner>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl NotificationPoller {
    pub fn new(
        transport: Arc<dyn NotificationTransport>,
        route: Arc<dyn RouteObserver>,
        surface: Arc<dyn AlertSurface>,
        settings: PollerSettings,
    ) -> Self {
        Self {
            inner: Arc::new(PollerInner {
                transport,
                route,
                surface,
                settings,
                displayed: Mutex::new(HashMap::new()),
                timer: Mutex::new(None),
            }),
        }
    }

    /// Polls right away, then once per interval until [`stop`](Self::stop).
    /// Must be called inside a tokio runtime.
    pub fn start(&self) -> Result<(), PollerError> {
        let period = self.inner.settings.interval;
        if period.is_zero() {
            return Err(PollerError::ZeroInterval);
        }

        let mut timer = lock(&self.inner.timer);
        if timer.is_some() {
            log::warn!("Notification polling already running");
            return Ok(());
        }

        *timer = Some(tokio::spawn(run_timer(Arc::downgrade(&self.inner), period)));
        log::info!("Notification polling started, every {:?}", period);
        Ok(())
    }

    /// Cancels the timer. Cycles already in flight still finish.
    pub fn stop(&self) {
        if let Some(timer) = lock(&self.inner.timer).take() {
            timer.abort();
            log::info!("Notification polling stopped");
        }
    }

    pub fn is_active(&self) -> bool {
        lock(&self.inner.timer).is_some()
    }

    /// Number of notification alerts still on screen.
    pub fn displayed_count(&self) -> usize {
        lock(&self.inner.displayed).len()
    }

    pub fn notification_for(&self, handle: AlertHandle) -> Option<Notification> {
        lock(&self.inner.displayed).get(&handle).cloned()
    }

    /// One polling cycle. Every pending notification gets its own alert, even one
    /// already on screen from an earlier cycle.
    pub async fn poll_once(&self) -> PollOutcome {
        let path = self.inner.route.current_path();
        if path.starts_with(&self.inner.settings.suppressed_prefix) {
            log::debug!("Skipping notifications on {}", path);
            return PollOutcome::Suppressed;
        }

        let notifications = match self.inner.transport.fetch_all().await {
            Ok(list) => list,
            Err(err) => {
                log::error!("Failed to load notifications: {}", err);
                return PollOutcome::Failed;
            }
        };

        let mut shown = 0;
        for notification in notifications.into_iter().filter(|n| n.pending) {
            self.present(notification);
            shown += 1;
        }
        PollOutcome::Shown(shown)
    }

    fn present(&self, notification: Notification) -> AlertHandle {
        let spec = AlertSpec::sticky(
            Severity::Info,
            NEW_NOTIFICATION_SUMMARY,
            notification.description.clone(),
            self.inner.settings.nominal_lifetime,
        )
        .with_action(VIEW_ACTION)
        .with_action(ACKNOWLEDGE_ACTION)
        .with_action(DISMISS_ACTION);

        // Held across show() so an action on the new alert always finds its notification.
        let mut displayed = lock(&self.inner.displayed);
        let handle = self.inner.surface.show(spec);
        log::info!("Showing notification {} as alert {}", notification.id, handle);
        displayed.insert(handle, notification);
        handle
    }

    /// Runs the action the user picked on a notification alert.
    ///
    /// Acknowledge is not guarded against repeats: two calls on the same alert
    /// before the first settles both reach the server.
    pub async fn trigger(&self, handle: AlertHandle, effect: ActionEffect) -> ActionOutcome {
        let Some(notification) = self.notification_for(handle) else {
            log::warn!("Alert {} has no notification behind it", handle);
            return ActionOutcome::UnknownAlert;
        };

        match effect {
            ActionEffect::View => {
                log::info!("Viewing notification {}: {}", notification.id, notification.description);
                ActionOutcome::Viewed
            }
            ActionEffect::Dismiss => {
                self.withdraw(handle);
                ActionOutcome::Dismissed
            }
            ActionEffect::Acknowledge => self.acknowledge(handle, &notification).await,
        }
    }

    async fn acknowledge(&self, handle: AlertHandle, notification: &Notification) -> ActionOutcome {
        let life = self.inner.settings.feedback_lifetime;
        match self.inner.transport.acknowledge(&notification.id).await {
            Ok(_) => {
                self.inner.surface.show(AlertSpec::timed(
                    Severity::Success,
                    ACK_SUCCESS_SUMMARY,
                    ACK_SUCCESS_DETAIL,
                    life,
                ));
                self.withdraw(handle);
                ActionOutcome::Acknowledged
            }
            Err(err) => {
                log::error!("Failed to acknowledge notification {}: {}", notification.id, err);
                self.inner.surface.show(AlertSpec::timed(
                    Severity::Error,
                    ACK_FAILURE_SUMMARY,
                    ACK_FAILURE_DETAIL,
                    life,
                ));
                ActionOutcome::AcknowledgeFailed
            }
        }
    }

    fn withdraw(&self, handle: AlertHandle) {
        lock(&self.inner.displayed).remove(&handle);
        self.inner.surface.remove(handle);
    }
}

async fn run_timer(inner: Weak<PollerInner>, period: Duration) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        // The poller was dropped without stop(); nothing left to feed.
        let Some(strong) = inner.upgrade() else { break };
        let poller = NotificationPoller { inner: strong };
        tokio::spawn(async move {
            poller.poll_once().await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::AlertBoard;
    use crate::error::TransportError;
    use crate::models::RecordId;

    struct FixedTransport {
        notifications: Vec<Notification>,
    }

    #[async_trait]
    impl NotificationTransport for FixedTransport {
        async fn fetch_all(&self) -> TransportResult<Vec<Notification>> {
            Ok(self.notifications.clone())
        }

        async fn acknowledge(&self, _id: &NotificationId) -> TransportResult<Notification> {
            Err(TransportError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        }
    }

    fn poller_with(notifications: Vec<Notification>, path: &str) -> (NotificationPoller, AlertBoard) {
        let board = AlertBoard::new();
        let poller = NotificationPoller::new(
            Arc::new(FixedTransport { notifications }),
            Arc::new(SharedRoute::new(path)),
            Arc::new(board.clone()),
            PollerSettings::default(),
        );
        (poller, board)
    }

    fn pending(id: i64, text: &str) -> Notification {
        Notification {
            id: RecordId::Number(id),
            description: text.to_string(),
            pending: true,
        }
    }

    #[tokio::test]
    async fn test_alert_carries_three_actions() {
        let (poller, board) = poller_with(vec![pending(1, "Mesa 3 pide la cuenta")], "/pedidos");

        assert_eq!(poller.poll_once().await, PollOutcome::Shown(1));

        let alert = &board.visible()[0];
        assert!(alert.spec.lifetime.is_sticky());
        let ids: Vec<&str> = alert.spec.actions.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["ver", "atendido", "cerrar"]);
        assert_eq!(
            poller.notification_for(alert.handle).map(|n| n.id),
            Some(RecordId::Number(1))
        );
    }

    #[tokio::test]
    async fn test_view_changes_nothing() {
        let (poller, board) = poller_with(vec![pending(4, "Mesa 1 llama")], "/");
        poller.poll_once().await;
        let handle = board.visible()[0].handle;

        assert_eq!(poller.trigger(handle, ActionEffect::View).await, ActionOutcome::Viewed);
        assert!(board.is_visible(handle));
        assert_eq!(poller.displayed_count(), 1);
        assert_eq!(board.history().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_handle_is_ignored() {
        let (poller, board) = poller_with(Vec::new(), "/");
        let outcome = poller.trigger(AlertHandle::new(), ActionEffect::Acknowledge).await;
        assert_eq!(outcome, ActionOutcome::UnknownAlert);
        assert!(board.history().is_empty());
    }

    #[test]
    fn test_shared_route_updates() {
        let route = SharedRoute::new("/");
        let reader: Arc<dyn RouteObserver> = Arc::new(route.clone());
        route.set("/mesa/7");
        assert_eq!(reader.current_path(), "/mesa/7");
    }

    #[tokio::test]
    async fn test_start_is_idempotent() {
        let (poller, _board) = poller_with(Vec::new(), "/");
        assert!(!poller.is_active());
        poller.start().unwrap();
        poller.start().unwrap();
        assert!(poller.is_active());
        poller.stop();
        poller.stop();
        assert!(!poller.is_active());
    }

    #[tokio::test]
    async fn test_zero_interval_is_rejected() {
        let board = AlertBoard::new();
        let poller = NotificationPoller::new(
            Arc::new(FixedTransport { notifications: Vec::new() }),
            Arc::new(SharedRoute::new("/")),
            Arc::new(board),
            PollerSettings {
                interval: Duration::ZERO,
                ..PollerSettings::default()
            },
        );

        assert_eq!(poller.start(), Err(PollerError::ZeroInterval));
        assert!(!poller.is_active());
    }

    /// Looks the notification up from another thread the moment its alert appears,
    /// the way a user clicking on a multi-threaded runtime would.
    #[derive(Default)]
    struct EagerSurface {
        inner: AlertBoard,
        poller: std::sync::OnceLock<NotificationPoller>,
        lookups: Mutex<Vec<std::thread::JoinHandle<Option<Notification>>>>,
    }

    impl AlertSurface for EagerSurface {
        fn show(&self, spec: AlertSpec) -> AlertHandle {
            let handle = self.inner.show(spec);
            if let Some(poller) = self.poller.get().cloned() {
                let lookup = std::thread::spawn(move || poller.notification_for(handle));
                self.lookups.lock().unwrap().push(lookup);
            }
            handle
        }

        fn remove(&self, handle: AlertHandle) {
            self.inner.remove(handle);
        }
    }

    #[tokio::test]
    async fn test_new_alert_is_actionable_as_soon_as_it_shows() {
        let surface = Arc::new(EagerSurface::default());
        let poller = NotificationPoller::new(
            Arc::new(FixedTransport {
                notifications: vec![pending(1, "uno"), pending(2, "dos")],
            }),
            Arc::new(SharedRoute::new("/")),
            surface.clone(),
            PollerSettings::default(),
        );
        assert!(surface.poller.set(poller.clone()).is_ok());

        assert_eq!(poller.poll_once().await, PollOutcome::Shown(2));

        let lookups: Vec<_> = surface.lookups.lock().unwrap().drain(..).collect();
        assert_eq!(lookups.len(), 2);
        let found: Vec<Option<RecordId>> = lookups
            .into_iter()
            .map(|l| l.join().unwrap().map(|n| n.id))
            .collect();
        assert_eq!(found, vec![Some(RecordId::Number(1)), Some(RecordId::Number(2))]);
    }
}
