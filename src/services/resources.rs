use crate::config::Endpoint;
use crate::error::TransportResult;
use crate::models::{Category, Employee, MenuEntry, RecordId, Reservation, Table, Waiter};
use crate::services::api::ApiClient;
use crate::services::crud::Collection;

#[derive(Clone)]
pub struct CategoryService {
    collection: Collection<Category>,
}

impl CategoryService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            collection: Collection::new(api, Endpoint::Categorias, "categories"),
        }
    }

    pub async fn get_all(&self) -> TransportResult<Vec<Category>> {
        self.collection.get_all().await
    }

    pub async fn create(&self, category: &Category) -> TransportResult<Category> {
        self.collection.create(category).await
    }

    pub async fn update(&self, id: &RecordId, category: &Category) -> TransportResult<Category> {
        self.collection.update(id, category).await
    }

    pub async fn delete(&self, id: &RecordId) -> TransportResult<()> {
        self.collection.delete(id).await
    }
}

#[derive(Clone)]
pub struct ReservationService {
    collection: Collection<Reservation>,
}

impl ReservationService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            collection: Collection::new(api, Endpoint::Reservas, "reservations"),
        }
    }

    pub async fn get_all(&self) -> TransportResult<Vec<Reservation>> {
        self.collection.get_all().await
    }

    pub async fn create(&self, reservation: &Reservation) -> TransportResult<Reservation> {
        self.collection.create(reservation).await
    }

    pub async fn update(&self, id: &RecordId, reservation: &Reservation) -> TransportResult<Reservation> {
        self.collection.update(id, reservation).await
    }

    pub async fn delete(&self, id: &RecordId) -> TransportResult<()> {
        self.collection.delete(id).await
    }
}

#[derive(Clone)]
pub struct TableService {
    collection: Collection<Table>,
}

impl TableService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            collection: Collection::new(api, Endpoint::Mesas, "tables"),
        }
    }

    pub async fn get_all(&self) -> TransportResult<Vec<Table>> {
        self.collection.get_all().await
    }
}

#[derive(Clone)]
pub struct WaiterService {
    collection: Collection<Waiter>,
}

impl WaiterService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            collection: Collection::new(api, Endpoint::Meseros, "waiters"),
        }
    }

    pub async fn get_all(&self) -> TransportResult<Vec<Waiter>> {
        self.collection.get_all().await
    }

    pub async fn get_by_id(&self, id: &RecordId) -> TransportResult<Waiter> {
        self.collection.get_by_id(id).await
    }
}

/// The backend publishes two fixed menus.
#[derive(Clone)]
pub struct MenuService {
    first: Collection<MenuEntry>,
    second: Collection<MenuEntry>,
}

impl MenuService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            first: Collection::new(api.clone(), Endpoint::Menu1, "menu 1 entries"),
            second: Collection::new(api, Endpoint::Menu2, "menu 2 entries"),
        }
    }

    pub async fn get_menu1(&self) -> TransportResult<Vec<MenuEntry>> {
        self.first.get_all().await
    }

    pub async fn get_menu2(&self) -> TransportResult<Vec<MenuEntry>> {
        self.second.get_all().await
    }
}

#[derive(Clone)]
pub struct EmployeeService {
    collection: Collection<Employee>,
}

impl EmployeeService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            collection: Collection::new(api, Endpoint::Empleados, "employees"),
        }
    }

    pub async fn get_all(&self) -> TransportResult<Vec<Employee>> {
        self.collection.get_all().await
    }

    pub async fn get_by_id(&self, id: &RecordId) -> TransportResult<Employee> {
        self.collection.get_by_id(id).await
    }

    pub async fn create(&self, employee: &Employee) -> TransportResult<Employee> {
        self.collection.create(employee).await
    }

    pub async fn update(&self, id: &RecordId, employee: &Employee) -> TransportResult<Employee> {
        self.collection.update(id, employee).await
    }

    pub async fn delete(&self, id: &RecordId) -> TransportResult<()> {
        self.collection.delete(id).await
    }
}
