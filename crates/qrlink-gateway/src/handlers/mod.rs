mod health;
mod link;

pub use health::health_handler;
pub use link::{
    create_short_url_handler, redirect_handler, stats_handler, update_url_handler,
};
