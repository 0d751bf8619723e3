/// Stack space that must remain before recursing further (100 KiB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each additional stack segment (1 MiB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, first moving onto a freshly allocated stack segment if less than
/// the red zone remains on the current one.
///
/// Wrap every recursion point whose depth is controlled by user input.
///
/// # Example
/// ```
/// use gjuha::util::stack::ensure_sufficient_stack;
///
/// fn depth(n: u64) -> u64 {
///     ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
/// }
///
/// assert_eq!(depth(100_000), 100_000);
/// ```
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_results_through() {
        let result: Result<i32, &str> = ensure_sufficient_stack(|| Ok(7));
        assert_eq!(result, Ok(7));
    }

    #[test]
    fn deep_recursion_on_a_small_thread_stack() {
        fn count(n: u32) -> u32 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { count(n - 1) + 1 })
        }

        let handle = std::thread::Builder::new().stack_size(256 * 1024)
                                                .spawn(|| count(200_000))
                                                .unwrap();
        assert_eq!(handle.join().unwrap(), 200_000);
    }
}
