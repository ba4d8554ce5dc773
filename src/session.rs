//! Authenticated handle to the cluster API.
//!
//! Resolution only needs one capability from the cluster: read a single
//! object of a known kind by name. [`Session`] captures exactly that, so the
//! resolver can run against a live [`kube::Client`] or any other backend.

use std::{fmt::Debug, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use k8s_openapi::{ClusterResourceScope, NamespaceResourceScope};
use kube::{
	config::{InClusterError, KubeConfigOptions, Kubeconfig, KubeconfigError},
	Api, Client, Config, Resource,
};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Statically typed object which can be read from the cluster
pub trait Object:
	Resource<DynamicType = ()> + Clone + DeserializeOwned + Debug + Send + Sync + 'static
{
}
impl<K> Object for K where
	K: Resource<DynamicType = ()> + Clone + DeserializeOwned + Debug + Send + Sync + 'static
{
}

pub trait NamespacedObject: Object + Resource<Scope = NamespaceResourceScope> {}
impl<K> NamespacedObject for K where K: Object + Resource<Scope = NamespaceResourceScope> {}

pub trait ClusterObject: Object + Resource<Scope = ClusterResourceScope> {}
impl<K> ClusterObject for K where K: Object + Resource<Scope = ClusterResourceScope> {}

/// Point-in-time reads against the cluster.
///
/// `Ok(None)` means the API reported the object as absent; every other
/// failure is an `Err`. Implementations issue one read per call and keep no
/// state between calls.
#[async_trait]
pub trait Session: Send + Sync {
	async fn get_namespaced<K: NamespacedObject>(
		&self,
		name: &str,
		namespace: &str,
	) -> Result<Option<K>, kube::Error>;

	async fn get_cluster<K: ClusterObject>(&self, name: &str) -> Result<Option<K>, kube::Error>;
}

#[async_trait]
impl Session for Client {
	async fn get_namespaced<K: NamespacedObject>(
		&self,
		name: &str,
		namespace: &str,
	) -> Result<Option<K>, kube::Error> {
		Api::<K>::namespaced(self.clone(), namespace)
			.get_opt(name)
			.await
	}

	async fn get_cluster<K: ClusterObject>(&self, name: &str) -> Result<Option<K>, kube::Error> {
		Api::<K>::all(self.clone()).get_opt(name).await
	}
}

#[async_trait]
impl<S: Session> Session for &S {
	async fn get_namespaced<K: NamespacedObject>(
		&self,
		name: &str,
		namespace: &str,
	) -> Result<Option<K>, kube::Error> {
		(**self).get_namespaced(name, namespace).await
	}

	async fn get_cluster<K: ClusterObject>(&self, name: &str) -> Result<Option<K>, kube::Error> {
		(**self).get_cluster(name).await
	}
}

#[async_trait]
impl<S: Session> Session for Arc<S> {
	async fn get_namespaced<K: NamespacedObject>(
		&self,
		name: &str,
		namespace: &str,
	) -> Result<Option<K>, kube::Error> {
		(**self).get_namespaced(name, namespace).await
	}

	async fn get_cluster<K: ClusterObject>(&self, name: &str) -> Result<Option<K>, kube::Error> {
		(**self).get_cluster(name).await
	}
}

#[derive(Error, Debug)]
pub enum SessionError {
	#[error("failed to load kubeconfig: {0}")]
	Kubeconfig(#[from] KubeconfigError),
	#[error("failed to load in-cluster config: {0}")]
	InCluster(#[from] InClusterError),
	#[error("failed to create client: {0}")]
	Client(#[from] kube::Error),
}

/// How to reach the cluster
#[derive(Clone, Debug, Default)]
pub struct SessionConfig {
	/// Kubeconfig file to use, in-cluster configuration is used when unset
	pub kubeconfig: Option<PathBuf>,
}

/// Build a client once, to be shared by every resolver call
pub async fn connect(config: &SessionConfig) -> Result<Client, SessionError> {
	let config = match &config.kubeconfig {
		Some(path) => {
			log::debug!("Loading kubeconfig from {}", path.display());
			let kubeconfig = Kubeconfig::read_from(path)?;
			Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await?
		}
		None => {
			log::debug!("Using in-cluster config");
			Config::incluster()?
		}
	};
	log::debug!("Connecting to {}", config.cluster_url);
	Ok(Client::try_from(config)?)
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use k8s_openapi::api::core::v1::Pod;

	use super::*;
	use crate::Resolver;

	// Nothing listens on port 1, reads fail with connection refused
	const KUBECONFIG: &str = "\
apiVersion: v1
kind: Config
clusters:
- name: local
  cluster:
    server: http://127.0.0.1:1
contexts:
- name: local
  context:
    cluster: local
    user: local
    namespace: ns1
current-context: local
users:
- name: local
  user:
    token: not-a-real-token
";

	fn kubeconfig_file() -> tempfile::NamedTempFile {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(KUBECONFIG.as_bytes()).unwrap();
		file
	}

	#[tokio::test]
	async fn connect_with_kubeconfig() {
		let file = kubeconfig_file();
		let client = connect(&SessionConfig {
			kubeconfig: Some(file.path().to_owned()),
		})
		.await
		.unwrap();
		assert_eq!(client.default_namespace(), "ns1");
	}

	#[tokio::test]
	async fn missing_kubeconfig() {
		let dir = tempfile::tempdir().unwrap();
		let err = connect(&SessionConfig {
			kubeconfig: Some(dir.path().join("absent.yaml")),
		})
		.await
		.err()
		.unwrap();
		assert!(matches!(err, SessionError::Kubeconfig(_)), "{:?}", err);
		assert!(err.to_string().starts_with("failed to load kubeconfig"));
	}

	#[tokio::test]
	async fn unreachable_cluster_is_transport_failure() {
		let file = kubeconfig_file();
		let client = connect(&SessionConfig {
			kubeconfig: Some(file.path().to_owned()),
		})
		.await
		.unwrap();

		let direct = client.get_namespaced::<Pod>("x", "ns1").await;
		assert!(direct.is_err());

		let err = Resolver::new(client).get_pod("x", "ns1").await.unwrap_err();
		assert!(err.is_transport());
		assert_eq!(
			err.to_string(),
			"the pod 'x' in the namespace 'ns1' doesn't exist"
		);
	}
}
