use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kube_target::{get_containers, session, ControllerKind, Resolver, SessionConfig};
use serde::Serialize;

#[derive(Parser)]
#[command(version, about = "Resolve live objects of a Kubernetes cluster")]
struct Opts {
	/// Kubeconfig to use, in-cluster configuration is used when unset
	#[arg(long, global = true)]
	kubeconfig: Option<PathBuf>,
	/// Log debug output
	#[arg(short, long, global = true)]
	verbose: bool,
	#[command(subcommand)]
	sub: SubCommand,
}

#[derive(Subcommand)]
enum SubCommand {
	/// Fetch an object by resource type tag, e.g. `deployments`
	Get {
		tag: String,
		name: String,
		#[arg(short, long, default_value = "default")]
		namespace: String,
	},
	/// Fetch a pod
	Pod {
		name: String,
		#[arg(short, long, default_value = "default")]
		namespace: String,
	},
	/// Fetch the controller owning a pod
	Owner {
		kind: ControllerKind,
		pod: String,
		#[arg(short, long, default_value = "default")]
		namespace: String,
	},
	/// List container names of a pod
	Containers {
		pod: String,
		#[arg(short, long, default_value = "default")]
		namespace: String,
	},
}

fn print_json(value: &impl Serialize) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
	let opts = Opts::parse();

	env_logger::Builder::from_env(
		env_logger::Env::default().default_filter_or(if opts.verbose { "debug" } else { "warn" }),
	)
	.init();

	let config = SessionConfig {
		kubeconfig: opts.kubeconfig,
	};
	let client = session::connect(&config)
		.await
		.context("failed to connect to cluster")?;
	let resolver = Resolver::new(client);

	match opts.sub {
		SubCommand::Get {
			tag,
			name,
			namespace,
		} => print_json(&resolver.get_target(&tag, &name, &namespace).await?)?,
		SubCommand::Pod { name, namespace } => {
			print_json(&resolver.get_pod(&name, &namespace).await?)?
		}
		SubCommand::Owner {
			kind,
			pod,
			namespace,
		} => {
			let pod = resolver.get_pod(&pod, &namespace).await?;
			print_json(&resolver.get_owner(kind, &pod).await?)?
		}
		SubCommand::Containers { pod, namespace } => {
			let pod = resolver.get_pod(&pod, &namespace).await?;
			for name in get_containers(&pod) {
				println!("{}", name);
			}
		}
	}
	Ok(())
}
