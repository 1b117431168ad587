//! Capture, dispatch, and queueing of tile sync updates.
//!
//! This is the session layer of tilesync. The authoritative side calls
//! [`capture`]/[`encode_update`] to snapshot an entity into bytes; the
//! receiving side calls [`decode_update`] on any thread, then hands the
//! envelope to the world-owning context through a [`DispatchQueue`]
//! (or [`dispatch`]es directly when it already is that context).

pub mod error;
pub mod inbound;
pub mod outbound;
pub mod queue;

#[cfg(feature = "async")]
pub mod mailbox;

pub use error::{PushError, Result};
pub use inbound::{decode_update, dispatch, DispatchOutcome, DropReason};
pub use outbound::{capture, encode_update};
pub use queue::{DispatchHandle, DispatchQueue, DrainReport};

#[cfg(feature = "async")]
pub use mailbox::{AsyncDispatchHandle, AsyncDispatchQueue};
