//! Session tokens for the media-session framework.
//!
//! A [`SessionToken`] names a media session, or a service that provides one,
//! without holding a live connection to it.  Tokens are resolved against a
//! [`PackageRegistry`], packed into a [`TransferRecord`] to cross a process
//! boundary, and restored on the other side through a [`HandleAdapter`].

pub mod context;
pub mod handle;
pub mod handle_table;
pub mod record;
pub mod registry;
pub mod token;
pub mod token_type;

pub use context::TokenContext;
pub use handle::{EndpointId, HandleAdapter, ProxyAdapter, ProxyHandle, RawHandle, SessionHandle};
pub use handle_table::HandleTable;
pub use record::TransferRecord;
pub use registry::{session_id_from_component, ComponentInfo, PackageRegistry, StaticRegistry};
pub use token::{SessionToken, TokenBuilder};
pub use token_type::TokenType;
