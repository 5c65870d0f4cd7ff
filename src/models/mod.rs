pub mod common;
pub mod notification;
pub mod order;
pub mod product;
pub mod user;

pub use common::{Record, RecordId};
pub use notification::{CreateNotification, Notification, NotificationId};
pub use order::{OrderDetail, OrderRef};
pub use product::Product;
pub use user::Credentials;

pub type Category = Record;
pub type Table = Record;
pub type Waiter = Record;
pub type Reservation = Record;
pub type Order = Record;
pub type MenuEntry = Record;
pub type Employee = Record;
