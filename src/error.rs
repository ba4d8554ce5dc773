use std::fmt::{self, Display};

use thiserror::Error;

use crate::kind::ControllerKind;

/// Renders the optional `in the namespace` clause of a fetch failure
struct NamespaceClause<'a>(Option<&'a str>);

impl Display for NamespaceClause<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let Some(ns) = self.0 {
			write!(f, " in the namespace '{}'", ns)?;
		}
		Ok(())
	}
}

#[derive(Error, Debug)]
pub enum Error {
	/// Read against the cluster failed.
	///
	/// `source` is `None` when the API answered "not found", and holds the
	/// transport error otherwise. Both render the same message.
	#[error("the {kind} '{name}'{} doesn't exist", NamespaceClause(.namespace.as_deref()))]
	NotFound {
		kind: String,
		name: String,
		namespace: Option<String>,
		#[source]
		source: Option<kube::Error>,
	},
	#[error("the resource type '{0}' is not supported")]
	UnsupportedResourceType(String),
	#[error("can't find the {kind} for the pod '{pod}' in namespace '{namespace}'")]
	OwnerResolution {
		kind: ControllerKind,
		pod: String,
		namespace: String,
	},
	#[error("the pod '{pod}' in namespace '{namespace}' has no owner reference")]
	MissingOwnerReference { pod: String, namespace: String },
}
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
	/// True when the API itself reported the object as absent
	pub fn is_not_found(&self) -> bool {
		matches!(self, Error::NotFound { source: None, .. })
	}

	/// True for any read failure other than an API not-found
	pub fn is_transport(&self) -> bool {
		matches!(self, Error::NotFound { source: Some(_), .. })
	}
}
