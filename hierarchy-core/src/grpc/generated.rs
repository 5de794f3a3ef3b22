#[allow(clippy::all)]
pub mod hierarchy_v1 {
    include!("generated/hierarchy.v1.rs");
}
