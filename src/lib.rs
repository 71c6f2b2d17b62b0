pub mod client;
pub mod core;
pub mod http;
pub mod relay;
pub mod session;
pub mod util;
