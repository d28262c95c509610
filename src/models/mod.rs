pub mod booking;
pub mod cleaner;
pub mod customer;
pub mod linen;
pub mod service_type;

// Re-export only the types we actually use
pub use booking::{Booking, BookingListRow};
pub use cleaner::Cleaner;
pub use customer::Customer;
pub use linen::{LinenProduct, LinenUsageItem};
pub use service_type::ServiceType;
