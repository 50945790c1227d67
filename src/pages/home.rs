use leptos::prelude::*;

use crate::components::force_graph::{ForceGraphCanvas, GraphData, GraphLink, GraphNode};

/// Generate a forest of `clusters` random trees over `n` nodes, so there is
/// more than one component to highlight.
fn generate_sample_data(n: usize, clusters: usize) -> GraphData {
	let nodes: Vec<GraphNode> = (0..n)
		.map(|i| GraphNode {
			id: i.to_string(),
			label: if i < clusters {
				Some(format!("Cluster {}", i))
			} else {
				None
			},
		})
		.collect();

	// Node i belongs to cluster i % clusters and links to an earlier member.
	let links: Vec<GraphLink> = (clusters..n)
		.map(|i| {
			let (cluster, earlier) = (i % clusters, i / clusters);
			let pick = (rand_simple(i) * (earlier as f64)) as usize;
			GraphLink::new(i.to_string(), (pick * clusters + cluster).to_string())
		})
		.collect();

	GraphData { nodes, links }
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph_data = Signal::derive(move || generate_sample_data(100, 4));

	view! {
		<div class="fullscreen-graph">
			<ForceGraphCanvas data=graph_data fullscreen=true />
			<div class="graph-overlay">
				<h1>"Cluster Highlighting"</h1>
				<p class="subtitle">
					"Click or drag a node to light up its cluster. Click the background to clear. Scroll to zoom."
				</p>
				<a href="/interactions">"Interaction graph"</a>
				" "
				<a href="/connections">"Connection graph"</a>
			</div>
		</div>
	}
}
