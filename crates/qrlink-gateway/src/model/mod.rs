mod health;
mod link;

pub use health::HealthResponse;
pub use link::{
    CreateShortUrlRequest, CreateShortUrlResponse, ErrorResponse, StatsResponse,
    UpdateUrlRequest, UpdateUrlResponse,
};
