//! Stack headroom for the recursive parts of resolution.
//!
//! Nesting depth follows the input, so the resolver's descent into groups
//! and the clone, compare and print paths of nested `Value::List`s all run
//! through [`ensure_sufficient_stack`]. Dropping a value needs no guard; it
//! unnests iteratively.

/// Headroom below which a fresh segment is allocated.
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 128 * 1024;

/// Size of each fresh segment.
#[cfg(not(target_arch = "wasm32"))]
const SEGMENT: usize = 2 * 1024 * 1024;

/// Run `f` on a stack with at least `RED_ZONE` bytes left.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

/// wasm32 cannot switch stacks; nesting there is bounded by the host stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
