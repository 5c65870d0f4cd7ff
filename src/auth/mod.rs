pub mod guard;
pub mod storage;
pub mod store;

pub use guard::{auth_guard, GuardDecision, RouteTarget, LOGIN_PATH};
pub use storage::KeyValueStorage;
pub use store::{AuthStore, USER_DATA_KEY};
