//! A library wrapper for the `ipset` command line utility.
//! Support the following commands:
//! * create
//! * destroy
//! * flush
//! * add
//! * del
//! * test
//! * list
//!
//! Every command spawns `ipset` and waits for it. `list` uses the xml output
//! of the utility and returns the sets as plain values, see [`IpSet`].
//! A failed command returns [`Error::Cmd`] carrying the output of the utility.
//!
//! # Example
//! ```no_run
//! use ipset_exec::{Error, Session};
//! use ipset_exec::types::HashNet;
//!
//! fn main() -> Result<(), Error> {
//!     let session = Session::new();
//!     session.create_typed::<HashNet>("test", &["timeout", "300"])?;
//!     session.add("test", "10.21.0.0/16", &["timeout", "60"])?;
//!
//!     if let Some(set) = session.get("test")? {
//!         println!("{} {} members", set.name, set.members.len());
//!         assert!(set.contains_entry("10.21.0.0/16"));
//!     }
//!
//!     session.del("test", "10.21.0.0/16")?;
//!     session.destroy("test")
//! }
//! ```

pub use model::{Header, IpSet, Member};
pub use runner::{CommandRunner, Runner};
pub use session::Session;
pub use types::Error;

mod model;
mod runner;
mod session;
pub mod types;
mod xml;
