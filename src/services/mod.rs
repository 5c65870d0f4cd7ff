pub mod api;
pub mod crud;
pub mod login;
pub mod notification;
pub mod order;
pub mod product;
pub mod resources;

pub use api::ApiClient;
pub use login::LoginService;
pub use notification::NotificationService;
pub use order::OrderService;
pub use product::ProductService;
pub use resources::{
    CategoryService, EmployeeService, MenuService, ReservationService, TableService, WaiterService,
};
