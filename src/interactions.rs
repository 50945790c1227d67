//! Builds canvas graphs from scraped profile data.
//!
//! The input is a JSON object keyed by user handle:
//!
//! ```json
//! { "@alice": { "following": ["@bob"], "followers": [], "commenters": ["@carol"] } }
//! ```
//!
//! Missing lists are treated as empty and unknown fields such as
//! `hashtags` are ignored.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use thiserror::Error;

use crate::components::force_graph::{GraphData, GraphLink, GraphNode, Relation};

/// Scraped lists for one user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
	/// Handles this user follows.
	pub following: Vec<String>,
	/// Handles following this user.
	pub followers: Vec<String>,
	/// Handles that commented on this user's posts.
	pub commenters: Vec<String>,
	/// Handles whose posts this user commented on.
	pub commented_on: Vec<String>,
	/// Handles met under the same post, as the post author or a fellow
	/// commenter.
	pub connections: Vec<String>,
}

/// Profiles keyed by handle, in a stable order.
pub type Profiles = BTreeMap<String, Profile>;

/// Errors raised while turning profile data into a graph.
#[derive(Error, Debug)]
pub enum InteractionError {
	/// The profile JSON could not be parsed.
	#[error("invalid profile data: {0}")]
	Json(#[from] serde_json::Error),

	/// The requested user has no profile.
	#[error("no profile for user {0}")]
	UnknownUser(String),

	/// No profile lists a connection to anyone else.
	#[error("profiles contain no connections")]
	NoConnections,
}

/// Parses the profile JSON.
pub fn parse_profiles(json: &str) -> Result<Profiles, InteractionError> {
	Ok(serde_json::from_str(json)?)
}

// Links keyed by (source, target, relation); the value is `directed`.
type Links<'a> = BTreeMap<(&'a str, &'a str, Relation), bool>;

// A relation present in both directions becomes one undirected link,
// oriented from the smaller handle.
fn insert_link<'a>(links: &mut Links<'a>, from: &'a str, to: &'a str, relation: Relation, mutual: bool) {
	if mutual {
		links.insert((from.min(to), from.max(to), relation), false);
	} else {
		links.insert((from, to, relation), true);
	}
}

/// Graph of every follow and comment relation in `profiles`.
///
/// A mutual follow between two known profiles becomes one undirected link.
/// Follow and comment links between the same pair are kept apart. Self
/// relations are dropped, as are repeated links.
pub fn build_interaction_graph(profiles: &Profiles) -> GraphData {
	let mut handles = BTreeSet::new();
	let mut links = Links::new();

	for (user, profile) in profiles {
		handles.insert(user.as_str());

		for other in &profile.following {
			handles.insert(other.as_str());
			if other == user {
				continue;
			}
			let mutual = profiles
				.get(other)
				.is_some_and(|p| p.following.iter().any(|f| f == user));
			insert_link(&mut links, user, other, Relation::Follows, mutual);
		}

		for commenter in &profile.commenters {
			handles.insert(commenter.as_str());
			if commenter != user {
				insert_link(&mut links, commenter, user, Relation::CommentedOn, false);
			}
		}

		for target in &profile.commented_on {
			handles.insert(target.as_str());
			if target != user {
				insert_link(&mut links, user, target, Relation::CommentedOn, false);
			}
		}
	}

	to_graph_data(handles, links)
}

/// Graph of the `connections` lists: who met whom under a post.
///
/// Only handles taking part in a connection become nodes. Connections
/// listed on both sides become one undirected link.
pub fn connection_graph(profiles: &Profiles) -> Result<GraphData, InteractionError> {
	let mut handles = BTreeSet::new();
	let mut links = Links::new();

	for (user, profile) in profiles {
		for other in &profile.connections {
			if other == user {
				continue;
			}
			let mutual = profiles
				.get(other)
				.is_some_and(|p| p.connections.iter().any(|c| c == user));
			handles.extend([user.as_str(), other.as_str()]);
			insert_link(&mut links, user, other, Relation::Connection, mutual);
		}
	}

	if links.is_empty() {
		return Err(InteractionError::NoConnections);
	}
	Ok(to_graph_data(handles, links))
}

/// Follow neighborhood of a single user: who they follow and who follows
/// them. A follow in both directions becomes one undirected link.
pub fn ego_graph(profiles: &Profiles, user: &str) -> Result<GraphData, InteractionError> {
	let profile = profiles
		.get(user)
		.ok_or_else(|| InteractionError::UnknownUser(user.to_string()))?;

	let mut handles = BTreeSet::from([user]);
	let mut links = Links::new();
	for other in &profile.following {
		handles.insert(other.as_str());
		let mutual = profile.followers.contains(other);
		insert_link(&mut links, user, other, Relation::Follows, mutual);
	}
	for other in &profile.followers {
		handles.insert(other.as_str());
		let mutual = profile.following.contains(other);
		insert_link(&mut links, other, user, Relation::Follows, mutual);
	}

	Ok(to_graph_data(handles, links))
}

fn to_graph_data(handles: BTreeSet<&str>, links: Links<'_>) -> GraphData {
	GraphData {
		nodes: handles
			.into_iter()
			.map(|h| GraphNode {
				id: h.to_string(),
				label: Some(h.to_string()),
			})
			.collect(),
		links: links
			.into_iter()
			.map(|((source, target, relation), directed)| GraphLink {
				source: source.to_string(),
				target: target.to_string(),
				directed,
				relation,
			})
			.collect(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn links(data: &GraphData) -> Vec<(&str, &str, Relation, bool)> {
		data.links
			.iter()
			.map(|l| (l.source.as_str(), l.target.as_str(), l.relation, l.directed))
			.collect()
	}

	fn ids(data: &GraphData) -> Vec<&str> {
		data.nodes.iter().map(|n| n.id.as_str()).collect()
	}

	#[test]
	fn missing_lists_default_to_empty() {
		let profiles = parse_profiles(r#"{"@a": {"following": ["@b"], "hashtags": ["x"]}}"#).unwrap();

		assert_eq!(profiles["@a"].following, vec!["@b"]);
		assert!(profiles["@a"].commenters.is_empty());
		assert!(profiles["@a"].connections.is_empty());
	}

	#[test]
	fn malformed_json_is_an_error() {
		let err = parse_profiles("{not json").unwrap_err();
		assert!(matches!(err, InteractionError::Json(_)));
	}

	#[test]
	fn mutual_follow_is_one_undirected_edge() {
		let profiles = parse_profiles(
			r#"{
				"@b": {"following": ["@a", "@c"]},
				"@a": {"following": ["@b"]}
			}"#,
		)
		.unwrap();

		let data = build_interaction_graph(&profiles);

		assert_eq!(ids(&data), vec!["@a", "@b", "@c"]);
		assert_eq!(
			links(&data),
			vec![
				("@a", "@b", Relation::Follows, false),
				("@b", "@c", Relation::Follows, true),
			]
		);
	}

	#[test]
	fn comment_beside_mutual_follow_stays_separate() {
		let profiles = parse_profiles(
			r#"{
				"@a": {"following": ["@b"], "commenters": ["@b"]},
				"@b": {"following": ["@a"]}
			}"#,
		)
		.unwrap();

		let data = build_interaction_graph(&profiles);

		assert_eq!(
			links(&data),
			vec![
				("@a", "@b", Relation::Follows, false),
				("@b", "@a", Relation::CommentedOn, true),
			]
		);
	}

	#[test]
	fn comments_and_self_relations() {
		let profiles = parse_profiles(
			r#"{
				"@a": {"following": ["@a"], "commenters": ["@a", "@x", "@x"]},
				"@x": {"commentedOn": ["@a", "@y"]}
			}"#,
		)
		.unwrap();

		let data = build_interaction_graph(&profiles);

		assert_eq!(ids(&data), vec!["@a", "@x", "@y"]);
		assert_eq!(
			links(&data),
			vec![
				("@x", "@a", Relation::CommentedOn, true),
				("@x", "@y", Relation::CommentedOn, true),
			]
		);
	}

	#[test]
	fn connections_become_links() {
		let profiles = parse_profiles(r#"{"@a": {"connections": ["@b"]}}"#).unwrap();

		let data = connection_graph(&profiles).unwrap();

		assert_eq!(ids(&data), vec!["@a", "@b"]);
		assert_eq!(links(&data), vec![("@a", "@b", Relation::Connection, true)]);
	}

	#[test]
	fn reciprocal_connections_collapse() {
		let profiles = parse_profiles(
			r#"{
				"@post": {"connections": ["@c1", "@c2", "@post"]},
				"@c1": {"connections": ["@post", "@c2"]},
				"@c2": {"connections": ["@post", "@c1"]},
				"@loner": {"following": ["@c1"]}
			}"#,
		)
		.unwrap();

		let data = connection_graph(&profiles).unwrap();

		assert_eq!(ids(&data), vec!["@c1", "@c2", "@post"]);
		assert_eq!(
			links(&data),
			vec![
				("@c1", "@c2", Relation::Connection, false),
				("@c1", "@post", Relation::Connection, false),
				("@c2", "@post", Relation::Connection, false),
			]
		);
	}

	#[test]
	fn profiles_without_connections_are_rejected() {
		let profiles = parse_profiles(r#"{"@a": {"following": ["@b"], "connections": ["@a"]}}"#).unwrap();

		let err = connection_graph(&profiles).unwrap_err();
		assert!(matches!(err, InteractionError::NoConnections));
	}

	#[test]
	fn ego_graph_orients_follow_edges() {
		let profiles = parse_profiles(
			r#"{"@me": {"following": ["@f1"], "followers": ["@f2", "@f1"]}}"#,
		)
		.unwrap();

		let data = ego_graph(&profiles, "@me").unwrap();

		assert_eq!(ids(&data), vec!["@f1", "@f2", "@me"]);
		assert_eq!(
			links(&data),
			vec![
				("@f1", "@me", Relation::Follows, false),
				("@f2", "@me", Relation::Follows, true),
			]
		);
	}

	#[test]
	fn ego_graph_of_unknown_user() {
		let err = ego_graph(&Profiles::new(), "@ghost").unwrap_err();
		assert!(matches!(err, InteractionError::UnknownUser(u) if u == "@ghost"));
	}
}
