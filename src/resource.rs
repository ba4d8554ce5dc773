use k8s_openapi::{
	api::{
		apps::v1::{DaemonSet, Deployment, ReplicaSet, StatefulSet},
		core::v1::{ConfigMap, Namespace, Secret, Service, ServiceAccount},
		rbac::v1::{ClusterRole, Role},
	},
	apimachinery::pkg::apis::meta::v1::ObjectMeta,
	Resource,
};
use serde::Serialize;

macro_rules! any_resource {
	($($variant:ident),+ $(,)?) => {
		/// Object returned by dynamic dispatch, narrowed back with `TryFrom`
		#[derive(Clone, Debug, PartialEq, Serialize)]
		#[serde(untagged)]
		pub enum AnyResource {
			$($variant($variant),)+
		}

		impl AnyResource {
			/// API kind of the wrapped object, e.g. `Deployment`
			pub fn kind(&self) -> &'static str {
				match self {
					$(AnyResource::$variant(_) => <$variant as Resource>::KIND,)+
				}
			}

			pub fn metadata(&self) -> &ObjectMeta {
				match self {
					$(AnyResource::$variant(v) => &v.metadata,)+
				}
			}
		}

		$(
			impl From<$variant> for AnyResource {
				fn from(v: $variant) -> Self {
					AnyResource::$variant(v)
				}
			}

			impl TryFrom<AnyResource> for $variant {
				type Error = AnyResource;

				fn try_from(v: AnyResource) -> Result<Self, AnyResource> {
					match v {
						AnyResource::$variant(v) => Ok(v),
						other => Err(other),
					}
				}
			}
		)+
	};
}

any_resource!(
	Namespace,
	ConfigMap,
	Secret,
	Deployment,
	DaemonSet,
	StatefulSet,
	ReplicaSet,
	Service,
	ServiceAccount,
	Role,
	ClusterRole,
);

impl AnyResource {
	pub fn name(&self) -> Option<&str> {
		self.metadata().name.as_deref()
	}
}
