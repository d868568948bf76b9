// src/crawl/mod.rs
// =============================================================================
// The concurrent crawl engine.
//
// Leaves first:
// - normalize: resolve a link against its page
// - scope: strip fragments, dedupe, same-host check
// - registry: the shared visited set (atomic check-and-claim)
// - barrier: counted completion barrier for the task tree
// - node: the result tree and its text rendering
// - visitor: one task per page, fanning out recursively
// - sprinter: owns a crawl, drives it, returns the tree
// =============================================================================

mod barrier;
mod node;
mod normalize;
mod registry;
mod scope;
mod sprinter;
mod visitor;

pub use node::CrawlNode;
pub use sprinter::{CrawlState, Sprinter};
