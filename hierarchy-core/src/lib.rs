//! # Hierarchy Core
//!
//! `hierarchy-core` is the library behind the `export-hierarchy` and `seed-hierarchy`
//! tools. It talks to the Enlight hierarchy service over gRPC and maintains a local
//! lookup file mapping node names to node ids.
//!
//! ## Key Components
//!
//! * **[`HierarchyClient`](client::HierarchyClient):** A connected client for the hierarchy
//!   service. The exporter and the seeder only depend on the
//!   [`HierarchyApi`](client::HierarchyApi) trait it implements.
//! * **[`LookupTable`](lookup::LookupTable) & [`LookupFile`](lookup::LookupFile):** The
//!   nested `functional location -> asset -> point -> id` table and its JSON file.
//! * **[`export_hierarchy`](export::export_hierarchy):** Builds a lookup table from the
//!   hierarchy below a root node.
//! * **[`seed_hierarchy`](seed::seed_hierarchy):** Creates a functional location, an asset
//!   and its inspection points when the lookup table does not know them.
//! * **[`Settings`](config::Settings):** Connection, identity and file locations.
//!
//! ## Feature Flags (Internal use only)
//!
//! * `gen-proto`: Enables the binary that regenerates the gRPC bindings from
//!   `proto/hierarchy.proto`.
//!
//! ## Re-exports
//!
//! This crate re-exports `tonic` so consumers use a compatible version.
pub mod client;
pub mod config;
pub mod export;
pub mod grpc;
pub mod lookup;
pub mod model;
pub mod seed;

// Re-exports
pub use tonic;

/// Type alias for the standard boxed error used in generic bounds.
type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
