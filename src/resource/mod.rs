pub mod handlers;
pub mod params;
pub mod response;
pub mod router;

pub use response::ListResponse;
pub use router::{route, Operation, Resource};
