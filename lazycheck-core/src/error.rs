//! Error types and test outcomes.

use crate::data::Replay;
use std::fmt;
use thiserror::Error;

/// Errors raised while producing a value.
///
/// These are `Clone` because a failed generation is parked inside the
/// produced [`Shrinkable`](crate::shrinkable::Shrinkable) and re-surfaced
/// every time the value is demanded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Generator failed to produce a value.
    #[error("generator failed: {reason}")]
    GeneratorFailed { reason: String },

    /// A filtered generator ran out of retry attempts.
    #[error("filter predicate rejected {attempts} candidates in a row")]
    FilterExhausted { attempts: usize },
}

/// Result type for lazycheck operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A shrinking step in the failure progression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShrinkStep {
    /// The counterexample value at this step.
    pub counterexample: String,
    /// The step number (0 = original, 1+ = shrink attempts).
    pub step: usize,
    /// Optional variable name for this input (e.g., "xs", "n", "input").
    pub variable_name: Option<String>,
}

/// Outcome of a property test.
#[derive(Debug, Clone, PartialEq)]
pub enum TestResult {
    /// Test passed successfully.
    Pass {
        tests_run: usize,
        property_name: Option<String>,
        module_path: Option<String>,
    },

    /// Test failed with a counterexample.
    Fail {
        counterexample: String,
        tests_run: usize,
        shrinks_performed: usize,
        property_name: Option<String>,
        module_path: Option<String>,
        /// The shrinking progression showing how we reached the minimal counterexample.
        shrink_steps: Vec<ShrinkStep>,
        /// Coordinates for reproducing the failing trial.
        replay: Option<Replay>,
    },

    /// A trial aborted because generation itself failed. Distinct from a
    /// predicate failure: there is no counterexample to shrink.
    Error {
        error: Error,
        tests_run: usize,
        property_name: Option<String>,
        module_path: Option<String>,
        replay: Option<Replay>,
    },
}

impl TestResult {
    /// True when this outcome is a predicate failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, TestResult::Fail { .. })
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestResult::Pass {
                tests_run,
                property_name,
                module_path,
            } => {
                if let Some(module) = module_path {
                    writeln!(f, "━━━ {} ━━━", module)?;
                }

                let prop_name = property_name.as_deref().unwrap_or("property");
                write!(f, "  ✓ {} passed {} tests.", prop_name, tests_run)
            }
            TestResult::Fail {
                counterexample,
                tests_run,
                shrinks_performed,
                property_name,
                module_path,
                shrink_steps,
                replay,
            } => {
                if let Some(module) = module_path {
                    writeln!(f, "━━━ {} ━━━", module)?;
                }

                let prop_name = property_name.as_deref().unwrap_or("property");
                writeln!(
                    f,
                    "  ✗ {} failed after {} tests and {} shrinks.",
                    prop_name, tests_run, shrinks_performed
                )?;

                if !shrink_steps.is_empty() {
                    writeln!(f)?;
                    writeln!(f, "    Shrinking progression:")?;
                    for step in shrink_steps {
                        match (&step.variable_name, step.step) {
                            (Some(name), step_num) => writeln!(
                                f,
                                "      │ forAll {} = {} -- {}",
                                step_num, step.counterexample, name
                            )?,
                            (None, 0) => {
                                writeln!(f, "      │ Original: {}", step.counterexample)?
                            }
                            (None, step_num) => {
                                writeln!(f, "      │ Step {}: {}", step_num, step.counterexample)?
                            }
                        }
                    }
                    writeln!(f)?;
                }

                if let Some(replay) = replay {
                    writeln!(f, "    Reproduce with: {}", replay)?;
                }

                write!(f, "    Minimal counterexample: {}", counterexample)
            }
            TestResult::Error {
                error,
                tests_run,
                property_name,
                module_path,
                replay,
            } => {
                if let Some(module) = module_path {
                    writeln!(f, "━━━ {} ━━━", module)?;
                }

                let prop_name = property_name.as_deref().unwrap_or("property");
                writeln!(
                    f,
                    "  ⚐ {} aborted after {} tests: {}",
                    prop_name, tests_run, error
                )?;
                if let Some(replay) = replay {
                    writeln!(f, "    Reproduce with: {}", replay)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Seed, Size};

    #[test]
    fn failure_reporting_includes_progression_and_replay() {
        let result = TestResult::Fail {
            counterexample: "7".to_string(),
            tests_run: 1,
            shrinks_performed: 2,
            property_name: Some("example".to_string()),
            module_path: Some("lazycheck_core::error::tests".to_string()),
            shrink_steps: vec![
                ShrinkStep {
                    counterexample: "20".to_string(),
                    step: 0,
                    variable_name: Some("n".to_string()),
                },
                ShrinkStep {
                    counterexample: "10".to_string(),
                    step: 1,
                    variable_name: Some("n".to_string()),
                },
                ShrinkStep {
                    counterexample: "7".to_string(),
                    step: 2,
                    variable_name: Some("n".to_string()),
                },
            ],
            replay: Some(Replay {
                seed: Seed::from_u64(42),
                size: Size::new(10),
            }),
        };

        let output = format!("{result}");
        assert!(output.contains("failed after 1 tests and 2 shrinks"));
        assert!(output.contains("forAll 0 = 20 -- n"));
        assert!(output.contains("Reproduce with:"));
        assert!(output.contains("Minimal counterexample: 7"));
    }

    #[test]
    fn error_display_names_the_failure() {
        let err = Error::FilterExhausted { attempts: 100 };
        assert_eq!(
            err.to_string(),
            "filter predicate rejected 100 candidates in a row"
        );
    }
}
