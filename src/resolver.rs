//! Resolution of live objects from `(type, name, namespace)` identities,
//! and of pod owners to their controllers.

use k8s_openapi::api::{
	apps::v1::{DaemonSet, Deployment, ReplicaSet, StatefulSet},
	core::v1::{ConfigMap, Namespace, Pod, Secret, Service, ServiceAccount},
	rbac::v1::{ClusterRole, Role},
};

use crate::{
	error::{Error, Result},
	kind::{ControllerKind, ResourceType},
	resource::AnyResource,
	session::{ClusterObject, NamespacedObject, Session},
};

fn fetch_failed<K: NamespacedObject>(
	name: &str,
	namespace: &str,
	source: Option<kube::Error>,
) -> Error {
	Error::NotFound {
		kind: K::kind(&()).to_lowercase(),
		name: name.to_owned(),
		namespace: Some(namespace.to_owned()),
		source,
	}
}

fn fetch_cluster_failed<K: ClusterObject>(
	name: &str,
	source: Option<kube::Error>,
) -> Error {
	Error::NotFound {
		kind: K::kind(&()).to_lowercase(),
		name: name.to_owned(),
		namespace: None,
		source,
	}
}

/// Facade over a shared [`Session`].
///
/// Every call is a single read against the session, nothing is cached and
/// no state is kept between calls, so one resolver may be used from many
/// tasks at once.
#[derive(Clone, Debug)]
pub struct Resolver<S> {
	session: S,
}

impl<S: Session> Resolver<S> {
	pub fn new(session: S) -> Self {
		Self { session }
	}

	pub fn session(&self) -> &S {
		&self.session
	}

	async fn fetch<K: NamespacedObject>(&self, name: &str, namespace: &str) -> Result<K> {
		log::trace!("Reading {} {} in {}", K::kind(&()), name, namespace);
		match self.session.get_namespaced::<K>(name, namespace).await {
			Ok(Some(obj)) => Ok(obj),
			Ok(None) => Err(fetch_failed::<K>(name, namespace, None)),
			Err(e) => Err(fetch_failed::<K>(name, namespace, Some(e))),
		}
	}

	async fn fetch_cluster<K: ClusterObject>(&self, name: &str) -> Result<K> {
		log::trace!("Reading {} {}", K::kind(&()), name);
		match self.session.get_cluster::<K>(name).await {
			Ok(Some(obj)) => Ok(obj),
			Ok(None) => Err(fetch_cluster_failed::<K>(name, None)),
			Err(e) => Err(fetch_cluster_failed::<K>(name, Some(e))),
		}
	}

	pub async fn get_pod(&self, name: &str, namespace: &str) -> Result<Pod> {
		self.fetch(name, namespace).await
	}

	pub async fn get_namespace(&self, name: &str) -> Result<Namespace> {
		self.fetch_cluster(name).await
	}

	pub async fn get_config_map(&self, name: &str, namespace: &str) -> Result<ConfigMap> {
		self.fetch(name, namespace).await
	}

	pub async fn get_secret(&self, name: &str, namespace: &str) -> Result<Secret> {
		self.fetch(name, namespace).await
	}

	pub async fn get_deployment(&self, name: &str, namespace: &str) -> Result<Deployment> {
		self.fetch(name, namespace).await
	}

	pub async fn get_daemon_set(&self, name: &str, namespace: &str) -> Result<DaemonSet> {
		self.fetch(name, namespace).await
	}

	pub async fn get_stateful_set(&self, name: &str, namespace: &str) -> Result<StatefulSet> {
		self.fetch(name, namespace).await
	}

	pub async fn get_replica_set(&self, name: &str, namespace: &str) -> Result<ReplicaSet> {
		self.fetch(name, namespace).await
	}

	pub async fn get_service(&self, name: &str, namespace: &str) -> Result<Service> {
		self.fetch(name, namespace).await
	}

	pub async fn get_service_account(
		&self,
		name: &str,
		namespace: &str,
	) -> Result<ServiceAccount> {
		self.fetch(name, namespace).await
	}

	pub async fn get_role(&self, name: &str, namespace: &str) -> Result<Role> {
		self.fetch(name, namespace).await
	}

	/// Cluster roles are cluster-scoped, `_namespace` is accepted for
	/// uniformity with the other fetches and ignored
	pub async fn get_cluster_role(&self, name: &str, _namespace: &str) -> Result<ClusterRole> {
		self.fetch_cluster(name).await
	}

	/// Fetch an object by its resource type tag, e.g. `configmaps`
	pub async fn get_target(&self, tag: &str, name: &str, namespace: &str) -> Result<AnyResource> {
		let ty: ResourceType = tag.parse()?;
		self.get_target_typed(ty, name, namespace).await
	}

	pub async fn get_target_typed(
		&self,
		ty: ResourceType,
		name: &str,
		namespace: &str,
	) -> Result<AnyResource> {
		log::trace!("Dispatching {} {}", ty, name);
		Ok(match ty {
			ResourceType::Namespaces => self.get_namespace(name).await?.into(),
			ResourceType::ConfigMaps => self.get_config_map(name, namespace).await?.into(),
			ResourceType::Secrets => self.get_secret(name, namespace).await?.into(),
			ResourceType::Deployments => self.get_deployment(name, namespace).await?.into(),
			// The daemonsets tag maps to the deployment fetch deliberately
			ResourceType::DaemonSets => self.get_deployment(name, namespace).await?.into(),
			ResourceType::StatefulSets => self.get_stateful_set(name, namespace).await?.into(),
			ResourceType::ReplicaSets => self.get_replica_set(name, namespace).await?.into(),
			ResourceType::Services => self.get_service(name, namespace).await?.into(),
			ResourceType::ServiceAccounts => {
				self.get_service_account(name, namespace).await?.into()
			}
			ResourceType::Roles => self.get_role(name, namespace).await?.into(),
			ResourceType::ClusterRoles => self.get_cluster_role(name, namespace).await?.into(),
		})
	}

	pub async fn get_deployment_from_pod(&self, pod: &Pod) -> Result<Deployment> {
		let (name, namespace) = owner_of(ControllerKind::Deployment, pod)?;
		self.get_deployment(name, namespace).await
	}

	pub async fn get_daemon_set_from_pod(&self, pod: &Pod) -> Result<DaemonSet> {
		let (name, namespace) = owner_of(ControllerKind::DaemonSet, pod)?;
		self.get_daemon_set(name, namespace).await
	}

	pub async fn get_stateful_set_from_pod(&self, pod: &Pod) -> Result<StatefulSet> {
		let (name, namespace) = owner_of(ControllerKind::StatefulSet, pod)?;
		self.get_stateful_set(name, namespace).await
	}

	pub async fn get_replica_set_from_pod(&self, pod: &Pod) -> Result<ReplicaSet> {
		let (name, namespace) = owner_of(ControllerKind::ReplicaSet, pod)?;
		self.get_replica_set(name, namespace).await
	}

	/// Resolve the controller of `kind` which owns `pod`
	pub async fn get_owner(&self, kind: ControllerKind, pod: &Pod) -> Result<AnyResource> {
		Ok(match kind {
			ControllerKind::Deployment => self.get_deployment_from_pod(pod).await?.into(),
			ControllerKind::DaemonSet => self.get_daemon_set_from_pod(pod).await?.into(),
			ControllerKind::StatefulSet => self.get_stateful_set_from_pod(pod).await?.into(),
			ControllerKind::ReplicaSet => self.get_replica_set_from_pod(pod).await?.into(),
		})
	}
}

/// Name and namespace of the controller recorded as the pod's first owner.
///
/// Owners are always in the pod's namespace for every supported kind.
fn owner_of(kind: ControllerKind, pod: &Pod) -> Result<(&str, &str)> {
	let pod_name = pod.metadata.name.as_deref().unwrap_or_default();
	let namespace = pod.metadata.namespace.as_deref().unwrap_or_default();

	let owner = pod
		.metadata
		.owner_references
		.as_deref()
		.and_then(|refs| refs.first())
		.ok_or_else(|| Error::MissingOwnerReference {
			pod: pod_name.to_owned(),
			namespace: namespace.to_owned(),
		})?;

	if owner.name.is_empty() || namespace.is_empty() {
		return Err(Error::OwnerResolution {
			kind,
			pod: pod_name.to_owned(),
			namespace: namespace.to_owned(),
		});
	}
	log::trace!("Pod {} is owned by {} {}", pod_name, owner.kind, owner.name);
	Ok((&owner.name, namespace))
}

/// Names of the containers declared in the pod spec, in declaration order
pub fn get_containers(pod: &Pod) -> Vec<String> {
	pod.spec
		.iter()
		.flat_map(|spec| spec.containers.iter())
		.map(|container| container.name.clone())
		.collect()
}
