pub mod endpoints;
pub mod error;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::{HttpSettings, build_router};
pub use state::AppState;
