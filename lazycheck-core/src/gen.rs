//! Generator combinators for property-based testing.
//!
//! Generators are explicit, first-class values that can be composed with
//! combinator functions. A [`Gen`] handle is cheap to clone: clones share
//! the underlying computation behind an atomically reference-counted
//! pointer, so generators can be reused across concurrently running
//! trials without duplicating closure state.

use crate::data::{Seed, Size};
use crate::error::{Error, Result};
use crate::seq::Seq;
use crate::shrinkable::Shrinkable;
use std::sync::Arc;

/// How many rejected candidates `Gen::filter` tolerates before giving up.
const FILTER_ATTEMPTS: usize = 100;

/// A generator for test data of type `T`.
///
/// A generator is a shared computation from `(Size, Seed)` to a
/// [`Shrinkable`] and an optional diagnostic name. The name travels with
/// the handle and is used for reporting only; it never affects generation.
pub struct Gen<T> {
    runner: Arc<dyn Fn(Size, Seed) -> Shrinkable<T> + Send + Sync>,
    name: Option<String>,
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Gen {
            runner: Arc::clone(&self.runner),
            name: self.name.clone(),
        }
    }
}

impl<T: 'static> Gen<T> {
    /// Create a new generator from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Size, Seed) -> Shrinkable<T> + Send + Sync + 'static,
    {
        Gen {
            runner: Arc::new(f),
            name: None,
        }
    }

    /// Create a generator from a fallible function.
    ///
    /// Running a generator is total: a returned `Err` is parked in the
    /// produced [`Shrinkable`] and surfaces only when the value is
    /// demanded, so callers never special-case the invocation itself.
    pub fn from_fallible<F>(f: F) -> Self
    where
        F: Fn(Size, Seed) -> Result<Shrinkable<T>> + Send + Sync + 'static,
    {
        Gen::new(move |size, seed| match f(size, seed) {
            Ok(shrinkable) => shrinkable,
            Err(error) => Shrinkable::lambda(move || Err(error.clone())),
        })
    }

    /// Generate a shrinkable value using the given size and seed.
    pub fn run(&self, size: Size, seed: Seed) -> Shrinkable<T> {
        (self.runner)(size, seed)
    }

    /// The diagnostic name carried by this handle, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Return a copy of this generator carrying a diagnostic name.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Gen {
            runner: self.runner,
            name: Some(name.into()),
        }
    }

    /// Create a generator that always produces the same value.
    pub fn constant(value: T) -> Self
    where
        T: Clone + Send + Sync,
    {
        Gen::new(move |_size, _seed| Shrinkable::just(value.clone()))
    }

    /// Create a generator that can inspect the size parameter.
    pub fn sized<F>(f: F) -> Self
    where
        F: Fn(Size) -> Gen<T> + Send + Sync + 'static,
    {
        Gen::new(move |size, seed| f(size).run(size, seed))
    }

    /// Map a function over the generated values.
    ///
    /// The function is applied to the value and, lazily and recursively,
    /// to every shrink candidate, preserving the shrink tree's shape. The
    /// diagnostic name carries over.
    pub fn map<U, F>(&self, f: F) -> Gen<U>
    where
        U: 'static,
        F: Fn(T) -> U + Clone + Send + Sync + 'static,
    {
        let inner = self.clone();
        Gen {
            runner: Arc::new(move |size, seed| inner.run(size, seed).map(f.clone())),
            name: self.name.clone(),
        }
    }

    /// Bind/flatmap for dependent generation.
    ///
    /// The seed is split so the two stages draw from independent streams.
    /// Shrinking tries smaller inputs (re-running `f`) before the output's
    /// own candidates.
    pub fn bind<U, F>(&self, f: F) -> Gen<U>
    where
        U: 'static,
        F: Fn(T) -> Gen<U> + Send + Sync + 'static,
    {
        let inner = self.clone();
        let f = Arc::new(f);
        Gen {
            runner: Arc::new(move |size, seed| {
                let (first_seed, second_seed) = seed.split();
                let f = Arc::clone(&f);
                inner
                    .run(size, first_seed)
                    .and_then(move |value| f(value).run(size, second_seed))
            }),
            name: self.name.clone(),
        }
    }

    /// Filter generated values by a predicate.
    ///
    /// Retries with fresh seeds and growing size while the predicate
    /// rejects; after too many rejections the generator produces a
    /// deferred [`Error::FilterExhausted`]. The shrink tree of an accepted
    /// value is pruned so every candidate stays inside the domain.
    pub fn filter<P>(&self, pred: P) -> Gen<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let inner = self.clone();
        let pred = Arc::new(pred);
        Gen {
            runner: Arc::new(move |size, seed| {
                let mut seed = seed;
                let mut size = size;
                for _ in 0..FILTER_ATTEMPTS {
                    let (attempt_seed, next_seed) = seed.split();
                    let candidate = inner.run(size, attempt_seed);
                    let pred = Arc::clone(&pred);
                    if let Some(accepted) = candidate.filter(move |value| (*pred)(value)) {
                        return accepted;
                    }
                    seed = next_seed;
                    size = Size::new(size.get() + 1);
                }
                Shrinkable::lambda(move || {
                    Err(Error::FilterExhausted {
                        attempts: FILTER_ATTEMPTS,
                    })
                })
            }),
            name: self.name.clone(),
        }
    }
}

/// Primitive generators.
impl Gen<bool> {
    /// Generate a random boolean; `true` shrinks to `false`.
    pub fn bool() -> Self {
        Gen::new(|_size, seed| {
            let (value, _) = seed.next_bool();
            if value {
                Shrinkable::with(|| Ok(true), || Seq::singleton(Shrinkable::just(false)))
            } else {
                Shrinkable::just(false)
            }
        })
    }
}

impl Gen<i64> {
    /// Generate an integer uniformly in `[min, max]`.
    ///
    /// Values shrink toward the in-range point closest to zero, via a lazy
    /// binary-search tree whose candidates all stay inside the range.
    pub fn int_range(min: i64, max: i64) -> Self {
        debug_assert!(min <= max);
        Gen::new(move |_size, seed| {
            let span = max.wrapping_sub(min) as u64;
            let (offset, _) = if span == u64::MAX {
                seed.next_u64()
            } else {
                seed.next_bounded(span + 1)
            };
            let value = min.wrapping_add(offset as i64);

            let origin = if min > 0 {
                min
            } else if max < 0 {
                max
            } else {
                0
            };
            shrink_towards(origin, value)
        })
    }

    /// Generate a positive integer.
    pub fn positive() -> Self {
        Self::int_range(1, i64::MAX)
    }

    /// Generate a natural number (including zero).
    pub fn natural() -> Self {
        Self::int_range(0, i64::MAX)
    }
}

/// A lazy shrink tree for `value` whose candidates binary-search toward
/// `origin`: first the origin itself, then successively closer points.
/// Every candidate lies between `origin` and `value`.
pub fn shrink_towards(origin: i64, value: i64) -> Shrinkable<i64> {
    Shrinkable::with(
        move || Ok(value),
        move || {
            let diff = value as i128 - origin as i128;
            Seq::unfold(diff, move |remaining| {
                if *remaining == 0 {
                    return None;
                }
                let candidate = (value as i128 - *remaining) as i64;
                *remaining /= 2;
                Some(candidate)
            })
            .map(move |candidate| shrink_towards(origin, candidate))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shrink_values(shrinkable: &Shrinkable<i64>) -> Vec<i64> {
        shrinkable
            .shrinks()
            .filter_map(|candidate| candidate.value().ok())
            .collect()
    }

    #[test]
    fn generation_is_deterministic() {
        let gen = Gen::int_range(0, 1000);
        for raw_seed in [0u64, 1, 42, 9999] {
            let a = gen.run(Size::new(50), Seed::from_u64(raw_seed));
            let b = gen.run(Size::new(50), Seed::from_u64(raw_seed));
            assert_eq!(a.value(), b.value());
            assert_eq!(shrink_values(&a), shrink_values(&b));
        }
    }

    #[test]
    fn int_range_respects_bounds() {
        let gen = Gen::int_range(-7, 13);
        let mut seed = Seed::from_u64(3);
        for _ in 0..500 {
            let (trial, next) = seed.split();
            let value = gen.run(Size::new(10), trial).value().unwrap();
            assert!((-7..=13).contains(&value));
            seed = next;
        }
    }

    #[test]
    fn positive_and_natural_respect_their_bounds() {
        let mut seed = Seed::from_u64(21);
        for _ in 0..200 {
            let (trial, next) = seed.split();

            let positive = Gen::positive().run(Size::new(10), trial);
            assert!(positive.value().unwrap() >= 1);
            // Shrinking never leaves the range either.
            assert!(shrink_values(&positive).into_iter().all(|c| c >= 1));

            let natural = Gen::natural().run(Size::new(10), trial);
            assert!(natural.value().unwrap() >= 0);

            seed = next;
        }
    }

    #[test]
    fn shrink_towards_candidates_stay_in_range() {
        let tree = shrink_towards(0, 87);
        let candidates = shrink_values(&tree);
        assert_eq!(candidates.first(), Some(&0));
        for candidate in candidates {
            assert!((0..87).contains(&candidate));
        }
    }

    #[test]
    fn shrink_towards_negative_values() {
        let tree = shrink_towards(0, -12);
        let candidates = shrink_values(&tree);
        assert_eq!(candidates.first(), Some(&0));
        for candidate in candidates {
            assert!((-12..=0).contains(&candidate));
        }
    }

    #[test]
    fn map_applies_pointwise_to_two_levels() {
        let gen = Gen::int_range(0, 100);
        let doubled = gen.map(|n| n * 2);

        let seed = Seed::from_u64(17);
        let size = Size::new(20);
        let plain = gen.run(size, seed);
        let mapped = doubled.run(size, seed);

        assert_eq!(mapped.value().unwrap(), plain.value().unwrap() * 2);
        assert_eq!(
            shrink_values(&mapped),
            shrink_values(&plain)
                .into_iter()
                .map(|n| n * 2)
                .collect::<Vec<_>>()
        );

        // Depth two: each candidate's own candidates are mapped as well.
        let plain_children: Vec<_> = plain.shrinks().collect();
        let mapped_children: Vec<_> = mapped.shrinks().collect();
        for (p, m) in plain_children.iter().zip(&mapped_children) {
            assert_eq!(
                shrink_values(m),
                shrink_values(p)
                    .into_iter()
                    .map(|n| n * 2)
                    .collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn bool_shrinks_true_to_false() {
        // Scan seeds until both outcomes have been observed.
        let gen = Gen::bool();
        let mut saw_true = false;
        let mut saw_false = false;
        for raw_seed in 0..64 {
            let shrinkable = gen.run(Size::new(0), Seed::from_u64(raw_seed));
            match shrinkable.value().unwrap() {
                true => {
                    saw_true = true;
                    let candidates: Vec<bool> = shrinkable
                        .shrinks()
                        .filter_map(|c| c.value().ok())
                        .collect();
                    assert_eq!(candidates, vec![false]);
                }
                false => {
                    saw_false = true;
                    assert!(shrinkable.shrinks().next().is_none());
                }
            }
        }
        assert!(saw_true && saw_false);
    }

    #[test]
    fn constant_always_produces_the_value() {
        let gen = Gen::constant(7i64);
        for raw_seed in 0..10 {
            let shrinkable = gen.run(Size::new(5), Seed::from_u64(raw_seed));
            assert_eq!(shrinkable.value(), Ok(7));
            assert!(shrinkable.shrinks().next().is_none());
        }
    }

    #[test]
    fn from_fallible_defers_the_error() {
        let gen: Gen<i64> = Gen::from_fallible(|_size, _seed| {
            Err(Error::GeneratorFailed {
                reason: "unsatisfiable".to_string(),
            })
        });

        // Running never fails; demanding the value does.
        let shrinkable = gen.run(Size::new(0), Seed::from_u64(0));
        assert_eq!(
            shrinkable.value(),
            Err(Error::GeneratorFailed {
                reason: "unsatisfiable".to_string(),
            })
        );
    }

    #[test]
    fn filter_keeps_values_and_candidates_in_domain() {
        let gen = Gen::int_range(0, 100).filter(|n| n % 2 == 0);
        let mut seed = Seed::from_u64(11);
        for _ in 0..50 {
            let (trial, next) = seed.split();
            let shrinkable = gen.run(Size::new(10), trial);
            let value = shrinkable.value().unwrap();
            assert_eq!(value % 2, 0);
            for candidate in shrink_values(&shrinkable) {
                assert_eq!(candidate % 2, 0);
            }
            seed = next;
        }
    }

    #[test]
    fn filter_exhaustion_is_a_deferred_error() {
        let gen = Gen::int_range(0, 100).filter(|_| false);
        let shrinkable = gen.run(Size::new(0), Seed::from_u64(0));
        assert_eq!(
            shrinkable.value(),
            Err(Error::FilterExhausted { attempts: 100 })
        );
    }

    #[test]
    fn bind_splits_the_seed_between_stages() {
        let gen = Gen::int_range(1, 10).bind(|n| Gen::int_range(0, n));
        let seed = Seed::from_u64(5);
        let a = gen.run(Size::new(10), seed).value().unwrap();
        let b = gen.run(Size::new(10), seed).value().unwrap();
        assert_eq!(a, b);
        assert!((0..=10).contains(&a));
    }

    #[test]
    fn names_travel_with_handles() {
        let gen = Gen::int_range(0, 10).with_name("small int");
        assert_eq!(gen.name(), Some("small int"));
        assert_eq!(gen.map(|n| n + 1).name(), Some("small int"));
        assert_eq!(Gen::int_range(0, 10).name(), None);
    }

    #[test]
    fn sized_generators_see_the_size() {
        let gen = Gen::sized(|size| Gen::int_range(0, size.get() as i64));
        let value = gen.run(Size::new(3), Seed::from_u64(8)).value().unwrap();
        assert!((0..=3).contains(&value));
    }
}
