//! Stack growth for recursive parsing and formula resolution.
//!
//! Three code paths recurse on user-controlled input: the expression parser
//! (nested parentheses), the interpreter (nested operators), and the tree
//! walker (a formula whose lookup forces another formula, and so on). Each
//! wraps its recursive step in [`ensure_sufficient_stack`].
//!
//! - **Native targets**: `stacker` grows the stack on demand.
//! - **WASM targets**: plain call; the host manages the stack.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn resolve(&self, path: &DocPath) -> Result<Value, Failure> {
///     ensure_sufficient_stack(|| self.resolve_inner(path))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
