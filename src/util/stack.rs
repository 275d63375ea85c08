/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;
/// Size of each new stack segment.
const GROW_SIZE: usize = 4 * 1024 * 1024;

/// Runs `f`, switching to a freshly allocated stack segment first if the
/// current one is nearly exhausted.
///
/// The parser and the evaluator recurse once per nesting level of the
/// program; each level passes through here so deep programs do not overflow
/// the native stack.
///
/// # Example
/// ```
/// use water::util::stack::guarded;
///
/// fn depth(n: u32) -> u32 {
///     if n == 0 { 0 } else { guarded(|| 1 + depth(n - 1)) }
/// }
///
/// assert_eq!(depth(100_000), 100_000);
/// ```
pub fn guarded<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROW_SIZE, f)
}
