//! The shrink-search loop: counterexample minimization.

use crate::error::ShrinkStep;
use crate::shrinkable::Shrinkable;

/// Outcome of a shrink search: the locally minimal failing value, the
/// progression of committed steps (step 0 is the original failure), and
/// how many shrinks were committed.
#[derive(Debug)]
pub struct Minimized<T> {
    pub value: T,
    pub steps: Vec<ShrinkStep>,
    pub shrinks_performed: usize,
}

/// Search `shrinkable`'s lazy candidates for a locally minimal failing
/// value, depth-first and first-failure-wins.
///
/// `origin` is `shrinkable`'s already-known-failing value; `fails` returns
/// `true` when a value makes the predicate fail. Candidates are pulled in
/// order; on the first failing candidate the remaining siblings are
/// discarded and the search recurses into that candidate's own sequence.
/// The search stops when no candidate fails or `shrink_limit` is hit.
///
/// The result is locally minimal, not globally minimal: there is no
/// backtracking past a committed candidate. Work is bounded by the depth
/// reached times the candidates actually pulled, never by the full tree.
/// Candidates whose value is a deferred generation error are skipped.
pub fn minimize<T, F>(
    origin: T,
    shrinkable: &Shrinkable<T>,
    shrink_limit: usize,
    mut fails: F,
) -> Minimized<T>
where
    T: std::fmt::Debug + 'static,
    F: FnMut(&T) -> bool,
{
    let mut steps = vec![ShrinkStep {
        counterexample: format!("{origin:?}"),
        step: 0,
        variable_name: None,
    }];
    let mut value = origin;
    let mut frontier = shrinkable.shrinks();
    let mut performed = 0;

    while performed < shrink_limit {
        let mut committed = false;
        while let Some(candidate) = frontier.next() {
            let candidate_value = match candidate.value() {
                Ok(v) => v,
                Err(_) => continue,
            };
            if fails(&candidate_value) {
                performed += 1;
                steps.push(ShrinkStep {
                    counterexample: format!("{candidate_value:?}"),
                    step: performed,
                    variable_name: None,
                });
                value = candidate_value;
                frontier = candidate.shrinks();
                committed = true;
                break;
            }
        }
        if !committed {
            break;
        }
    }

    Minimized {
        value,
        steps,
        shrinks_performed: performed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gen::shrink_towards;
    use crate::seq::Seq;

    #[test]
    fn finds_the_boundary_of_a_threshold_predicate() {
        let tree = shrink_towards(0, 100);
        let result = minimize(100, &tree, 1000, |v| *v >= 13);

        assert_eq!(result.value, 13);
        assert!(result.shrinks_performed > 0);
        assert_eq!(result.steps.first().unwrap().counterexample, "100");
        assert_eq!(result.steps.last().unwrap().counterexample, "13");
    }

    #[test]
    fn result_is_locally_minimal() {
        let tree = shrink_towards(0, 87);
        let fails = |v: &i64| *v >= 29;
        let result = minimize(87, &tree, 1000, fails);

        assert!(fails(&result.value));

        // None of the result's own direct candidates still fail.
        let rebuilt = shrink_towards(0, result.value);
        for candidate in rebuilt.shrinks() {
            let value = candidate.value().unwrap();
            assert!(!fails(&value), "candidate {value} still fails");
        }
    }

    #[test]
    fn terminates_on_strictly_decreasing_weight() {
        // Every edge strictly decreases the magnitude, so the search must
        // bottom out even with a generous limit.
        let tree = shrink_towards(0, 1_000_000);
        let result = minimize(1_000_000, &tree, usize::MAX, |v| *v > 0);
        assert_eq!(result.value, 1);
    }

    #[test]
    fn respects_the_shrink_limit() {
        let tree = shrink_towards(0, 100);
        let result = minimize(100, &tree, 1, |v| *v >= 13);
        assert_eq!(result.shrinks_performed, 1);
        assert_eq!(result.value, 50);
    }

    #[test]
    fn first_failing_candidate_wins() {
        // Candidates in order: 5 passes, 8 fails, 2 would fail but is
        // never examined because the search commits to 8.
        let tree = Shrinkable::with(
            || Ok(10),
            || {
                Seq::from_vec(vec![
                    Shrinkable::just(5),
                    Shrinkable::just(8),
                    Shrinkable::just(2),
                ])
            },
        );

        let result = minimize(10, &tree, 1000, |v| *v % 2 == 0);
        assert_eq!(result.value, 8);
        assert_eq!(result.shrinks_performed, 1);
    }

    #[test]
    fn error_candidates_are_skipped() {
        let tree = Shrinkable::with(
            || Ok(10),
            || {
                Seq::from_vec(vec![
                    Shrinkable::lambda(|| {
                        Err(crate::error::Error::GeneratorFailed {
                            reason: "broken candidate".to_string(),
                        })
                    }),
                    Shrinkable::just(4),
                ])
            },
        );

        let result = minimize(10, &tree, 1000, |v| *v % 2 == 0);
        assert_eq!(result.value, 4);
    }
}
