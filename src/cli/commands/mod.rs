mod bin;
mod bins;
mod config;
mod ping;

pub use self::bin::bin;
pub use self::bins::bins;
pub use self::config::config;
pub use self::ping::ping;
