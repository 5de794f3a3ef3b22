//! # gRPC Bindings
//!
//! Prost messages, the tonic client and the server stub for the `hierarchy.v1.Hierarchy`
//! service. The server stub only backs in-process tests.
//!
//! The bindings under `generated/` are produced from `proto/hierarchy.proto` by the
//! `generate-hierarchy-service` binary (feature `gen-proto`) and committed, so building
//! this crate does not require `protoc`.
mod generated;

pub use generated::hierarchy_v1 as pb;
