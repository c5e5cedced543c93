//! # Menu Board Client
//!
//! Everything that runs on the admin and display devices: the HTTP remote,
//! the sync client, the publish pipeline and the display state machines.

pub mod cache;
pub mod display;
pub mod error;
pub mod profile;
pub mod publish;
pub mod remote;
pub mod sync;

pub use cache::DocumentCache;
pub use error::{ClientError, PublishError};
pub use profile::{AdminProfile, ProfileStore};
pub use publish::PublishPipeline;
pub use remote::{HttpMenuRemote, MenuRemote};
pub use sync::{SyncClient, SyncOutcome, SyncSource};
