//! Restaurant operations backend
//!
//! # Module structure
//!
//! ```text
//! api-server/src/
//! ├── core/          # Config, state, HTTP server
//! ├── auth/          # JWT auth, roles, password hashing
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # Models and repositories (embedded SurrealDB)
//! ├── orders/        # Order lifecycle manager
//! ├── reservations/  # Reservation availability engine
//! └── utils/         # Errors, logging, validation helpers
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod reservations;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService, Role};
pub use core::{Config, Server, ServerState};
pub use orders::{OrderError, OrderManager};
pub use reservations::{ReservationEngine, ReservationError};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger;

/// Load `.env` and initialize logging; call once at startup
pub fn setup_environment() {
    dotenv::dotenv().ok();
    utils::logger::init_logger();
}
