//! In-memory session for resolver tests

use std::{
	collections::BTreeMap,
	io,
	sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use kube::Resource;
use serde::Serialize;
use serde_json::Value;

use crate::session::{ClusterObject, NamespacedObject, Object, Session};

type Key = (String, Option<String>, String);

/// Objects keyed by (kind, namespace, name), stored the way the API serves them
#[derive(Default)]
pub struct MemorySession {
	objects: BTreeMap<Key, Value>,
	failing: bool,
	reads: AtomicUsize,
}

impl MemorySession {
	pub fn with<K: Resource<DynamicType = ()> + Serialize>(mut self, obj: K) -> Self {
		let meta = obj.meta();
		let key = (
			K::kind(&()).into_owned(),
			meta.namespace.clone(),
			meta.name.clone().unwrap_or_default(),
		);
		let value = serde_json::to_value(&obj).expect("object should serialize");
		self.objects.insert(key, value);
		self
	}

	/// Every read fails as if the API server was unreachable
	pub fn failing(mut self) -> Self {
		self.failing = true;
		self
	}

	/// Number of reads issued so far, failed ones included
	pub fn reads(&self) -> usize {
		self.reads.load(Ordering::SeqCst)
	}

	fn read<K: Object>(&self, name: &str, namespace: Option<&str>) -> Result<Option<K>, kube::Error> {
		self.reads.fetch_add(1, Ordering::SeqCst);
		if self.failing {
			return Err(kube::Error::Service(Box::new(io::Error::new(
				io::ErrorKind::ConnectionRefused,
				"connection refused",
			))));
		}
		let key = (
			K::kind(&()).into_owned(),
			namespace.map(ToOwned::to_owned),
			name.to_owned(),
		);
		self.objects
			.get(&key)
			.map(|value| serde_json::from_value(value.clone()))
			.transpose()
			.map_err(kube::Error::SerdeError)
	}
}

#[async_trait]
impl Session for MemorySession {
	async fn get_namespaced<K: NamespacedObject>(
		&self,
		name: &str,
		namespace: &str,
	) -> Result<Option<K>, kube::Error> {
		self.read(name, Some(namespace))
	}

	async fn get_cluster<K: ClusterObject>(&self, name: &str) -> Result<Option<K>, kube::Error> {
		self.read(name, None)
	}
}
