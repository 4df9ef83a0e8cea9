//! Property definitions and the trial runner.

use crate::context::Context;
use crate::data::{Config, Seed, Size};
use crate::error::TestResult;
use crate::gen::Gen;
use crate::shrink::minimize;

/// A property that can be tested with generated inputs.
pub struct Property<T> {
    generator: Gen<T>,
    condition: Box<dyn Fn(&T) -> bool>,
    variable_name: Option<String>,
}

impl<T> Property<T>
where
    T: 'static + std::fmt::Debug,
{
    /// Create a property that checks a boolean condition.
    pub fn for_all<F>(generator: Gen<T>, condition: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        Property {
            generator,
            condition: Box::new(condition),
            variable_name: None,
        }
    }

    /// Create a property that checks a boolean condition with a named variable.
    pub fn for_all_named<F>(generator: Gen<T>, variable_name: &str, condition: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        let mut property = Property::for_all(generator, condition);
        property.variable_name = Some(variable_name.to_string());
        property
    }

    /// Run this property with a random seed.
    pub fn run(&self, config: &Config) -> TestResult {
        self.run_seeded(Seed::random(), config)
    }

    /// Run this property from a fixed seed, reproducing a prior run exactly.
    pub fn run_seeded(&self, seed: Seed, config: &Config) -> TestResult {
        self.run_with_context(seed, config, None, None)
    }

    /// Run this property with context information for reporting.
    pub fn run_with_context(
        &self,
        seed: Seed,
        config: &Config,
        property_name: Option<&str>,
        module_path: Option<&str>,
    ) -> TestResult {
        let mut seed = seed;

        for test_num in 0..config.test_limit {
            // Ramp size linearly over the run so early trials stay small.
            let size = Size::new((test_num * config.size_limit) / config.test_limit);
            let (trial_seed, next_seed) = seed.split();
            seed = next_seed;

            let mut ctx = Context::new(trial_seed, size);
            let shrinkable = ctx.draw(&self.generator);

            let value = match shrinkable.value() {
                Ok(value) => value,
                Err(error) => {
                    // Generation failed: a trial error, not a counterexample.
                    return TestResult::Error {
                        error,
                        tests_run: test_num + 1,
                        property_name: property_name.map(str::to_string),
                        module_path: module_path.map(str::to_string),
                        replay: Some(ctx.replay()),
                    };
                }
            };

            if (self.condition)(&value) {
                continue;
            }

            let minimized = minimize(value, &shrinkable, config.shrink_limit, |candidate| {
                !(self.condition)(candidate)
            });

            let mut shrink_steps = minimized.steps;
            if let Some(name) = &self.variable_name {
                for step in &mut shrink_steps {
                    step.variable_name = Some(name.clone());
                }
            }

            return TestResult::Fail {
                counterexample: format!("{:?}", minimized.value),
                tests_run: test_num + 1,
                shrinks_performed: minimized.shrinks_performed,
                property_name: property_name.map(str::to_string),
                module_path: module_path.map(str::to_string),
                shrink_steps,
                replay: Some(ctx.replay()),
            };
        }

        TestResult::Pass {
            tests_run: config.test_limit,
            property_name: property_name.map(str::to_string),
            module_path: module_path.map(str::to_string),
        }
    }
}

/// Create a property that checks a boolean condition.
pub fn for_all<T, F>(generator: Gen<T>, condition: F) -> Property<T>
where
    T: 'static + std::fmt::Debug,
    F: Fn(&T) -> bool + 'static,
{
    Property::for_all(generator, condition)
}

/// Create a property that checks a boolean condition with a named variable.
pub fn for_all_named<T, F>(generator: Gen<T>, variable_name: &str, condition: F) -> Property<T>
where
    T: 'static + std::fmt::Debug,
    F: Fn(&T) -> bool + 'static,
{
    Property::for_all_named(generator, variable_name, condition)
}
