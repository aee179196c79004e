use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

// ─── Domain types ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Full user record. Never serialized directly; responses go through
/// [`SafeUser`] so the password hash stays inside the store.
#[derive(Debug, Clone)]
pub struct User {
    pub id: u64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub status: UserStatus,
}

/// User shape exposed by the API.
#[derive(Debug, Clone, Serialize)]
pub struct SafeUser {
    pub id: u64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub status: UserStatus,
}

impl From<&User> for SafeUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            created_at: user.created_at,
            last_login: user.last_login,
            status: user.status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Service {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price_per_hour: f64,
    pub icon: String,
    pub created_at: DateTime<Utc>,
    pub status: ServiceStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub id: u64,
    pub user_id: u64,
    pub service_id: u64,
    pub location: String,
    pub booking_date: NaiveDate,
    pub time_slot: String,
    pub duration_hours: u32,
    pub total_cost: f64,
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_needs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Created,
    Paid,
}

/// Mock checkout order. No gateway behind it; paying one just flips
/// the linked booking to confirmed.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentOrder {
    pub id: String,
    pub booking_id: u64,
    pub amount: f64,
    pub currency: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

// ─── Write-side inputs ───────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: u64,
    pub service_id: u64,
    pub location: String,
    pub booking_date: NaiveDate,
    pub time_slot: String,
    pub duration_hours: u32,
    pub total_cost: f64,
    pub custom_needs: Option<String>,
}

// ─── Store ───────────────────────────────────────────────────────

/// Flat in-memory data store with auto-incrementing ids. Everything is
/// process-lifetime only; a restart starts from the seed catalog again.
pub struct DataStore {
    inner: RwLock<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    users: Vec<User>,
    services: Vec<Service>,
    bookings: Vec<Booking>,
    orders: Vec<PaymentOrder>,
    next_user_id: u64,
    next_service_id: u64,
    next_booking_id: u64,
}

/// The service catalog shipped with the platform.
const SEED_SERVICES: &[(&str, &str, f64, &str)] = &[
    (
        "Drone for Videography",
        "Professional aerial videography for events, real estate, and commercial projects",
        150.00,
        "video",
    ),
    (
        "Drone for Photoshoot",
        "High-quality aerial photography for weddings, portraits, and landscapes",
        120.00,
        "camera",
    ),
    (
        "Drone for Agriculture",
        "Crop monitoring, field mapping, and precision agriculture services",
        200.00,
        "wheat",
    ),
    (
        "Drone for Surveillance",
        "Security monitoring and surveillance for properties and events",
        180.00,
        "shield",
    ),
    (
        "Drone for Inspection",
        "Infrastructure inspection for buildings, towers, and industrial facilities",
        220.00,
        "search",
    ),
    (
        "Drone for Custom Needs",
        "Customized drone services tailored to your specific requirements",
        175.00,
        "settings",
    ),
];

impl DataStore {
    /// Empty store, no catalog.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                next_user_id: 1,
                next_service_id: 1,
                next_booking_id: 1,
                ..StoreInner::default()
            }),
        }
    }

    /// Store pre-loaded with the drone service catalog.
    pub fn seeded() -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.write();
            let now = Utc::now();
            for (name, description, price, icon) in SEED_SERVICES {
                let id = inner.next_service_id;
                inner.next_service_id += 1;
                inner.services.push(Service {
                    id,
                    name: (*name).into(),
                    description: (*description).into(),
                    price_per_hour: *price,
                    icon: (*icon).into(),
                    created_at: now,
                    status: ServiceStatus::Active,
                });
            }
        }
        store
    }

    // ── Users ───────────────────────────────────────────────────

    pub fn users(&self) -> Vec<User> {
        self.inner.read().users.clone()
    }

    pub fn user(&self, id: u64) -> Option<User> {
        self.inner.read().users.iter().find(|u| u.id == id).cloned()
    }

    pub fn user_by_email(&self, email: &str) -> Option<User> {
        let needle = email.to_lowercase();
        self.inner
            .read()
            .users
            .iter()
            .find(|u| u.email == needle)
            .cloned()
    }

    /// Stores the email lowercased so lookups are case-insensitive.
    pub fn create_user(&self, new: NewUser) -> User {
        let mut inner = self.inner.write();
        let id = inner.next_user_id;
        inner.next_user_id += 1;
        let user = User {
            id,
            full_name: new.full_name,
            email: new.email.to_lowercase(),
            phone: new.phone,
            password_hash: Some(new.password_hash),
            created_at: Utc::now(),
            last_login: None,
            status: UserStatus::Active,
        };
        inner.users.push(user.clone());
        user
    }

    pub fn record_login(&self, id: u64) -> Option<User> {
        let mut inner = self.inner.write();
        let user = inner.users.iter_mut().find(|u| u.id == id)?;
        user.last_login = Some(Utc::now());
        Some(user.clone())
    }

    // ── Services ────────────────────────────────────────────────

    pub fn active_services(&self) -> Vec<Service> {
        self.inner
            .read()
            .services
            .iter()
            .filter(|s| s.status == ServiceStatus::Active)
            .cloned()
            .collect()
    }

    pub fn service(&self, id: u64) -> Option<Service> {
        self.inner
            .read()
            .services
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    // ── Bookings ────────────────────────────────────────────────

    pub fn bookings(&self) -> Vec<Booking> {
        self.inner.read().bookings.clone()
    }

    pub fn bookings_for_user(&self, user_id: u64) -> Vec<Booking> {
        self.inner
            .read()
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn booking(&self, id: u64) -> Option<Booking> {
        self.inner
            .read()
            .bookings
            .iter()
            .find(|b| b.id == id)
            .cloned()
    }

    pub fn create_booking(&self, new: NewBooking) -> Booking {
        let mut inner = self.inner.write();
        let id = inner.next_booking_id;
        inner.next_booking_id += 1;
        let now = Utc::now();
        let booking = Booking {
            id,
            user_id: new.user_id,
            service_id: new.service_id,
            location: new.location,
            booking_date: new.booking_date,
            time_slot: new.time_slot,
            duration_hours: new.duration_hours,
            total_cost: new.total_cost,
            status: BookingStatus::Pending,
            custom_needs: new.custom_needs,
            payment_type: None,
            payment_id: None,
            created_at: now,
            updated_at: now,
        };
        inner.bookings.push(booking.clone());
        booking
    }

    pub fn update_booking_status(&self, id: u64, status: BookingStatus) -> Option<Booking> {
        let mut inner = self.inner.write();
        let booking = inner.bookings.iter_mut().find(|b| b.id == id)?;
        booking.status = status;
        booking.updated_at = Utc::now();
        Some(booking.clone())
    }

    /// Attach payment metadata and confirm the booking in one step.
    pub fn attach_payment(&self, id: u64, payment_type: &str, payment_id: &str) -> Option<Booking> {
        let mut inner = self.inner.write();
        let booking = inner.bookings.iter_mut().find(|b| b.id == id)?;
        booking.payment_type = Some(payment_type.into());
        booking.payment_id = Some(payment_id.into());
        booking.status = BookingStatus::Confirmed;
        booking.updated_at = Utc::now();
        Some(booking.clone())
    }

    // ── Payment orders ──────────────────────────────────────────

    pub fn create_order(&self, id: String, booking_id: u64, amount: f64, currency: String) -> PaymentOrder {
        let order = PaymentOrder {
            id,
            booking_id,
            amount,
            currency,
            status: OrderStatus::Created,
            created_at: Utc::now(),
        };
        self.inner.write().orders.push(order.clone());
        order
    }

    pub fn order(&self, id: &str) -> Option<PaymentOrder> {
        self.inner.read().orders.iter().find(|o| o.id == id).cloned()
    }

    pub fn mark_order_paid(&self, id: &str) -> Option<PaymentOrder> {
        let mut inner = self.inner.write();
        let order = inner.orders.iter_mut().find(|o| o.id == id)?;
        order.status = OrderStatus::Paid;
        Some(order.clone())
    }

    /// (users, services, bookings), as shown by the health endpoint.
    pub fn counts(&self) -> (usize, usize, usize) {
        let inner = self.inner.read();
        (inner.users.len(), inner.services.len(), inner.bookings.len())
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────
