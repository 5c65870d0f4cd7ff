pub mod notification_poller;

pub use notification_poller::{
    ActionOutcome, NotificationPoller, NotificationTransport, PollOutcome, PollerError, RouteObserver,
    SharedRoute,
};
