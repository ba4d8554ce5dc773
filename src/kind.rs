use std::{
	fmt::{self, Display},
	str::FromStr,
};

use clap::ValueEnum;

use crate::error::{Error, Result};

/// Resource type tag accepted by dynamic dispatch
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceType {
	Namespaces,
	ConfigMaps,
	Secrets,
	Deployments,
	DaemonSets,
	StatefulSets,
	ReplicaSets,
	Services,
	ServiceAccounts,
	Roles,
	ClusterRoles,
}

impl ResourceType {
	pub const ALL: [ResourceType; 11] = [
		ResourceType::Namespaces,
		ResourceType::ConfigMaps,
		ResourceType::Secrets,
		ResourceType::Deployments,
		ResourceType::DaemonSets,
		ResourceType::StatefulSets,
		ResourceType::ReplicaSets,
		ResourceType::Services,
		ResourceType::ServiceAccounts,
		ResourceType::Roles,
		ResourceType::ClusterRoles,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			ResourceType::Namespaces => "namespaces",
			ResourceType::ConfigMaps => "configmaps",
			ResourceType::Secrets => "secrets",
			ResourceType::Deployments => "deployments",
			ResourceType::DaemonSets => "daemonsets",
			ResourceType::StatefulSets => "statefulsets",
			ResourceType::ReplicaSets => "replicasets",
			ResourceType::Services => "services",
			ResourceType::ServiceAccounts => "serviceaccounts",
			ResourceType::Roles => "roles",
			ResourceType::ClusterRoles => "clusterroles",
		}
	}

	/// Cluster-scoped kinds ignore the namespace part of an identity
	pub fn is_cluster_scoped(self) -> bool {
		matches!(self, ResourceType::Namespaces | ResourceType::ClusterRoles)
	}
}

impl FromStr for ResourceType {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		ResourceType::ALL
			.iter()
			.copied()
			.find(|ty| ty.as_str() == s)
			.ok_or_else(|| Error::UnsupportedResourceType(s.to_owned()))
	}
}

impl Display for ResourceType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Controller kinds a pod owner can be resolved to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum ControllerKind {
	#[value(name = "deployment", alias = "deployments")]
	Deployment,
	#[value(name = "daemonset", alias = "daemonsets")]
	DaemonSet,
	#[value(name = "statefulset", alias = "statefulsets")]
	StatefulSet,
	#[value(name = "replicaset", alias = "replicasets")]
	ReplicaSet,
}

impl ControllerKind {
	pub fn as_str(self) -> &'static str {
		match self {
			ControllerKind::Deployment => "deployment",
			ControllerKind::DaemonSet => "daemonset",
			ControllerKind::StatefulSet => "statefulset",
			ControllerKind::ReplicaSet => "replicaset",
		}
	}
}

impl FromStr for ControllerKind {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		Ok(match s {
			"deployment" | "deployments" => ControllerKind::Deployment,
			"daemonset" | "daemonsets" => ControllerKind::DaemonSet,
			"statefulset" | "statefulsets" => ControllerKind::StatefulSet,
			"replicaset" | "replicasets" => ControllerKind::ReplicaSet,
			_ => return Err(Error::UnsupportedResourceType(s.to_owned())),
		})
	}
}

impl Display for ControllerKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
