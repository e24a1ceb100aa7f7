//! Simple example demonstrating graphstore usage
//!
//! Run with: RUST_LOG=graphstore=debug cargo run --example simple_store

use graphstore::{CallerId, ChannelSink, GraphStore, StoreConfig, SystemClock};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🦀 graphstore Example\n");

    // 1. Build a store wired to the environment
    let (sink, mut events) = ChannelSink::channel();
    let mut store = GraphStore::builder()
        .config(StoreConfig::from_env()?)
        .clock(SystemClock::new())
        .sink(sink)
        .build();

    let alice = CallerId::from("alice");
    let bob = CallerId::from("bob");

    // 2. Create vertices and edges
    println!("📊 Building graph...");
    let docs = store.create_vertex(&alice, "design doc")?;
    let code = store.create_vertex(&alice, "implementation")?;
    let review = store.create_vertex(&bob, "review notes")?;

    store.create_edge(docs, code, 10, "describes")?;
    store.create_edge(review, code, 3, "comments-on")?;
    store.create_edge(review, docs, 1, "references")?;

    println!(
        "  ✅ Graph built: {} vertices, {} edges\n",
        store.total_vertices(),
        store.total_edges()
    );

    // 3. Query
    println!("🔍 Querying graph...");
    for &dst in store.get_adjacent_vertices(review)? {
        let edge = store.get_edge(review, dst)?;
        let vertex = store.get_vertex(dst)?;
        println!("  review → {} ({}, weight {})", vertex.data, edge.edge_type, edge.weight);
    }
    println!("  alice owns {:?}", store.get_user_vertices(&alice));

    // 4. Ownership-checked delete
    println!("\n🗑️  Deleting...");
    if let Err(err) = store.delete_vertex(&bob, docs) {
        println!("  bob cannot delete: {err}");
    }
    store.delete_vertex(&alice, docs)?;
    println!(
        "  docs live: {}, record kept: {}",
        store.vertex_exists(docs),
        store.get_vertex(docs).is_ok()
    );

    // 5. Drain notifications
    println!("\n📣 Events:");
    drop(store);
    while let Some(event) = events.recv().await {
        println!("  {event:?}");
    }

    println!("\n✨ Example complete!");

    Ok(())
}
