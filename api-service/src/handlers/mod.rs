pub mod calculator;
pub mod greeting;
pub mod health;
pub mod metrics;
pub mod process;

pub use calculator::calculate;
pub use greeting::hello_async;
pub use health::health_check;
pub use self::metrics::metrics_endpoint;
pub use process::process_data;
