//! Browser entry point: starts logging and mounts the app.

// Dependencies are used by the library crate.
#![allow(unused_crate_dependencies)]

use cluster_graph_canvas::{App, init_logging};
use leptos::prelude::*;

fn main() {
	init_logging();
	mount_to_body(App);
}
