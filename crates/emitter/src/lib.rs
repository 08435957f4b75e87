//! Deterministic artifact rendering: the PUSH4 contract from a resolved
//! function table, and the proxy lookup contract from pixel data plus a
//! fixed selector layout. Same inputs, byte-identical output.

mod contract;
mod error;
mod layout;
mod proxy;
mod remap;

pub use contract::{render_push4, DEFAULT_AUTHORIZED_ADDRESS};
pub use error::{EmitError, Result};
pub use layout::deployed_layout;
pub use proxy::render_proxy;
pub use remap::{remap_by_column, RemapEntry};
