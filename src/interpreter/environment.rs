use crate::interpreter::value::core::Value;

/// Smallest table allocated on first insertion.
pub const MIN_CAPACITY: usize = 8;

/// FNV-1a offset basis (32 bit).
const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
/// FNV-1a prime (32 bit).
const FNV_PRIME: u32 = 16_777_619;

#[derive(Debug, Clone)]
struct Entry<'src> {
    key:   &'src str,
    value: Value<'src>,
}

/// One lexical scope: an open-addressed hash table of bindings plus an
/// optional, non-owning link to the enclosing scope.
///
/// Names are hashed with FNV-1a over their bytes and collisions are resolved
/// by linear probing. The table doubles (starting at [`MIN_CAPACITY`]) before
/// an insertion would push occupancy past 75%.
///
/// # Example
/// ```
/// use gjuha::interpreter::{environment::Environment, value::core::Value};
///
/// let mut globals = Environment::new();
/// globals.define("x", Value::Number(1.0));
///
/// let mut frame = Environment::with_enclosing(&globals);
/// frame.define("y", Value::Number(2.0));
///
/// assert_eq!(frame.get("x"), Some(&Value::Number(1.0)));
/// assert_eq!(frame.get("y"), Some(&Value::Number(2.0)));
/// assert!(globals.get("y").is_none());
/// ```
#[derive(Debug, Default)]
pub struct Environment<'src, 'env> {
    entries:   Vec<Option<Entry<'src>>>,
    count:     usize,
    enclosing: Option<&'env Environment<'src, 'env>>,
}

impl<'src, 'env> Environment<'src, 'env> {
    /// Creates an empty root scope.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries:   Vec::new(),
               count:     0,
               enclosing: None, }
    }

    /// Creates an empty scope whose lookups fall back to `enclosing`.
    #[must_use]
    pub const fn with_enclosing(enclosing: &'env Environment<'src, 'env>) -> Self {
        Self { entries:   Vec::new(),
               count:     0,
               enclosing: Some(enclosing), }
    }

    /// Binds `name` to `value` in this scope only, overwriting any existing
    /// binding here.
    ///
    /// Outer scopes are never searched or modified: defining a name that an
    /// enclosing scope already binds shadows it.
    pub fn define(&mut self, name: &'src str, value: Value<'src>) {
        if (self.count + 1) * 4 > self.capacity() * 3 {
            let new_capacity = if self.capacity() < MIN_CAPACITY {
                MIN_CAPACITY
            } else {
                self.capacity() * 2
            };
            self.adjust_capacity(new_capacity);
        }

        let index = find_slot(&self.entries, name, hash_key(name));
        let slot = &mut self.entries[index];
        if slot.is_none() {
            self.count += 1;
        }
        *slot = Some(Entry { key: name, value });
    }

    /// Looks `name` up in this scope, then in each enclosing scope outward.
    ///
    /// Returns the first match, or `None` once the whole chain is exhausted.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value<'src>> {
        let hash = hash_key(name);
        let mut scope = Some(self);

        while let Some(env) = scope {
            if !env.entries.is_empty()
               && let Some(entry) = &env.entries[find_slot(&env.entries, name, hash)]
            {
                return Some(&entry.value);
            }
            scope = env.enclosing;
        }

        None
    }

    /// The number of bindings held directly by this scope.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if this scope holds no bindings of its own.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The number of slots in this scope's table.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Rehashes every live entry into a fresh table of `capacity` slots.
    fn adjust_capacity(&mut self, capacity: usize) {
        tracing::debug!(from = self.capacity(), to = capacity, bindings = self.count, "growing environment");

        let mut entries = Vec::with_capacity(capacity);
        entries.resize_with(capacity, || None);

        for entry in std::mem::take(&mut self.entries).into_iter().flatten() {
            let index = find_slot(&entries, entry.key, hash_key(entry.key));
            entries[index] = Some(entry);
        }

        self.entries = entries;
    }
}

/// FNV-1a over the raw bytes of `key`.
///
/// ## Example
/// ```
/// use gjuha::interpreter::environment::hash_key;
///
/// assert_eq!(hash_key(""), 2_166_136_261);
/// assert_eq!(hash_key("a"), 0xe40c_292c);
/// ```
#[must_use]
pub fn hash_key(key: &str) -> u32 {
    key.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
                   (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
               })
}

/// Finds the slot holding `key`, or the empty slot where it belongs.
/// `hash` must be `hash_key(key)`.
///
/// The table must be non-empty and contain at least one free slot, which the
/// load factor guarantees.
fn find_slot(entries: &[Option<Entry<'_>>], key: &str, hash: u32) -> usize {
    let capacity = entries.len();
    let mut index = hash as usize % capacity;

    loop {
        match &entries[index] {
            None => return index,
            Some(entry) if entry.key == key => return index,
            Some(_) => index = (index + 1) % capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_definition_allocates_minimum_capacity() {
        let mut env = Environment::new();
        assert_eq!(env.capacity(), 0);
        assert!(env.get("x").is_none());

        env.define("x", Value::Number(1.0));
        assert_eq!(env.capacity(), MIN_CAPACITY);
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn redefinition_overwrites_in_place() {
        let mut env = Environment::new();
        env.define("x", Value::Number(1.0));
        env.define("x", Value::from("dy"));

        assert_eq!(env.len(), 1);
        assert_eq!(env.get("x"), Some(&Value::from("dy")));
    }

    #[test]
    fn resizing_preserves_every_binding() {
        let names = (0..20).map(|i| format!("emri{i}")).collect::<Vec<_>>();
        let mut env = Environment::new();

        for (i, name) in names.iter().enumerate() {
            env.define(name, Value::Number(f64::from(u8::try_from(i).unwrap())));
        }
        // Overwrite a few in reverse order after the table has grown.
        for name in names.iter().rev().step_by(3) {
            env.define(name, Value::from(name.as_str()));
        }

        assert_eq!(env.len(), 20);
        assert_eq!(env.capacity(), 32);
        for (i, name) in names.iter().enumerate() {
            let expected = if (19 - i) % 3 == 0 {
                Value::from(name.as_str())
            } else {
                Value::Number(f64::from(u8::try_from(i).unwrap()))
            };
            assert_eq!(env.get(name), Some(&expected), "binding {name}");
        }
    }

    #[test]
    fn load_factor_triggers_doubling() {
        let names = ["a", "b", "c", "d", "e", "f", "g"];
        let mut env = Environment::new();

        for name in &names[..6] {
            env.define(name, Value::Bool(true));
        }
        assert_eq!(env.capacity(), 8);

        env.define(names[6], Value::Bool(true));
        assert_eq!(env.capacity(), 16);
    }

    #[test]
    fn inner_definition_shadows_without_mutating_outer() {
        let mut globals = Environment::new();
        globals.define("x", Value::Number(1.0));

        {
            let mut frame = Environment::with_enclosing(&globals);
            frame.define("x", Value::Number(2.0));
            assert_eq!(frame.get("x"), Some(&Value::Number(2.0)));
        }

        assert_eq!(globals.get("x"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn lookup_walks_the_whole_chain() {
        let mut root = Environment::new();
        root.define("rrenja", Value::Number(1.0));
        let middle = Environment::with_enclosing(&root);
        let inner = Environment::with_enclosing(&middle);

        assert_eq!(inner.get("rrenja"), Some(&Value::Number(1.0)));
        assert!(inner.get("mungon").is_none());
    }

    #[test]
    fn lookup_through_a_long_chain() {
        fn descend(env: &Environment<'_, '_>, depth: usize) -> bool {
            if depth == 0 {
                return env.get("rrenja") == Some(&Value::Number(1.0)) && env.get("mungon").is_none();
            }
            let frame = Environment::with_enclosing(env);
            descend(&frame, depth - 1)
        }

        let handle = std::thread::Builder::new().stack_size(16 * 1024 * 1024)
                                                .spawn(|| {
                                                    let mut root = Environment::new();
                                                    root.define("rrenja", Value::Number(1.0));
                                                    descend(&root, 20_000)
                                                })
                                                .unwrap();
        assert!(handle.join().unwrap());
    }
}
