//! Database models
//!
//! One module per collection, each with the stored entity plus its
//! create/update payload types.

pub mod serde_helpers;

pub mod feedback;
pub mod inventory_item;
pub mod menu_item;
pub mod order;
pub mod reservation;
pub mod user;

pub use feedback::{Feedback, FeedbackCreate, FeedbackUpdate};
pub use inventory_item::{
    InventoryCategory, InventoryItem, InventoryItemCreate, InventoryItemUpdate, RestockRequest,
    StockUnit, Supplier,
};
pub use menu_item::{
    Ingredient, MenuCategory, MenuItem, MenuItemCreate, MenuItemUpdate, NutritionalInfo,
};
pub use order::{
    Address, Order, OrderCreate, OrderItem, OrderItemInput, PaymentDetails, PaymentReceipt,
    PaymentRequest, RefundReceipt,
};
pub use reservation::{Reservation, ReservationCreate, ReservationUpdate};
pub use user::{ProfileUpdate, User, UserCreate, UserPublic};
