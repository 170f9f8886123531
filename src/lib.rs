//! Client for the DMI-TCAT query bin API
//!
//! ```no_run
//! use tcat::{Credentials, Tcat};
//!
//! let mut tcat = Tcat::new("https://tcat.example.org", Credentials::new("user", "pass"), false)?;
//! for name in tcat.bins(false)?.to_vec() {
//!     let bin = tcat.get_bin(&name, false)?;
//!     println!("{}: {} tweets", bin.bin, bin.notweets);
//! }
//! # Ok::<(), tcat::TcatError>(())
//! ```

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;

pub use api::{Credentials, QueryBin, Tcat};
pub use error::{Result, TcatError};
