//! Resolve live Kubernetes objects from a resource type tag, a name and a
//! namespace, and resolve pods to the controllers owning them.
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use kube_target::{session, Resolver, SessionConfig};
//!
//! let client = session::connect(&SessionConfig::default()).await?;
//! let resolver = Resolver::new(client);
//! let target = resolver.get_target("configmaps", "settings", "default").await?;
//! println!("{}", target.kind());
//! # Ok(())
//! # }
//! ```

mod error;
pub mod kind;
pub mod resolver;
pub mod resource;
pub mod session;
#[cfg(test)]
mod testing;

pub use error::{Error, Result};
pub use kind::{ControllerKind, ResourceType};
pub use resolver::{get_containers, Resolver};
pub use resource::AnyResource;
pub use session::{Session, SessionConfig, SessionError};
