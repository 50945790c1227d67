use leptos::prelude::*;

use crate::components::force_graph::{ForceGraphCanvas, GraphData};
use crate::interactions::{
	InteractionError, Profiles, build_interaction_graph, connection_graph, parse_profiles,
};

const SAMPLE_PROFILES: &str = include_str!("../../data/sample_profiles.json");

type Builder = fn(&Profiles) -> Result<GraphData, InteractionError>;

/// Follow and comment relations of the bundled sample profiles.
#[component]
pub fn Interactions() -> impl IntoView {
	profile_graph("Interaction Graph", "relations", |p| {
		Ok(build_interaction_graph(p))
	})
}

/// Who met whom under the same post in the bundled sample profiles.
#[component]
pub fn Connections() -> impl IntoView {
	profile_graph("Connection Graph", "connections", connection_graph)
}

fn profile_graph(title: &'static str, noun: &'static str, build: Builder) -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{move || {
				parse_profiles(SAMPLE_PROFILES)
					.and_then(|profiles| build(&profiles))
					.map(|data| {
						let summary = format!(
							"{} users, {} {noun}",
							data.nodes.len(),
							data.links.len()
						);
						view! {
							<div class="fullscreen-graph">
								<ForceGraphCanvas data=data fullscreen=true />
								<div class="graph-overlay">
									<h1>{title}</h1>
									<p class="subtitle">{summary}</p>
									<a href="/">"Back"</a>
								</div>
							</div>
						}
					})
			}}
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::highlight::{Graph, Palette, connected_component};

	fn component_sizes(data: &GraphData, starts: &[&str]) -> (Vec<usize>, usize) {
		let palette = Palette::default();
		let mut g = Graph::new();
		for node in &data.nodes {
			g.add_node(node.id.clone(), palette.default.clone());
		}
		for link in &data.links {
			g.add_edge(link.source.clone(), link.target.clone());
		}
		let sizes = starts
			.iter()
			.map(|start| connected_component(&g, &start.to_string()).unwrap().len())
			.collect();
		(sizes, g.len())
	}

	#[test]
	fn bundled_profiles_parse() {
		let profiles = parse_profiles(SAMPLE_PROFILES).unwrap();
		assert_eq!(profiles.len(), 6);
	}

	#[test]
	fn bundled_profiles_form_three_communities() {
		let data = build_interaction_graph(&parse_profiles(SAMPLE_PROFILES).unwrap());

		let (sizes, total) = component_sizes(&data, &["@ana.k", "@gallery_nord", "@kilnworks"]);

		assert_eq!(sizes, vec![5, 4, 2]);
		assert_eq!(sizes.iter().sum::<usize>(), total);
	}

	#[test]
	fn bundled_connections_form_three_groups() {
		let data = connection_graph(&parse_profiles(SAMPLE_PROFILES).unwrap()).unwrap();

		let (sizes, total) = component_sizes(&data, &["@ana.k", "@hana.art", "@kilnworks"]);

		assert_eq!(data.links.len(), 7);
		assert_eq!(data.links.iter().filter(|l| !l.directed).count(), 2);
		assert_eq!(sizes, vec![4, 3, 2]);
		assert_eq!(sizes.iter().sum::<usize>(), total);
	}
}
