//! Example demonstrating counterexample shrinking.

use lazycheck_core::*;

fn main() {
    println!("Testing shrink search behavior");
    println!();

    // Integer shrinking: the search should converge to the predicate boundary.
    println!("Threshold predicate (should fail and shrink to exactly 50)");
    let int_gen = Gen::int_range(0, 100);
    let int_prop = for_all_named(int_gen, "value", |&value| value < 50);
    match int_prop.run_seeded(Seed::from_u64(42), &Config::default()) {
        TestResult::Fail {
            counterexample,
            shrinks_performed,
            ..
        } => {
            println!(
                "Minimal counterexample: {}, shrinks: {}",
                counterexample, shrinks_performed
            );
        }
        result => println!("Unexpected result: {:?}", result),
    }
    println!();

    // Shrinking is local: committing to the first failing candidate.
    println!("Manual shrink search over a lazy tree");
    let tree = shrink_towards(0, 1000);
    let result = minimize(1000, &tree, 1000, |v| *v >= 137);
    println!("Started at 1000, minimized to {}", result.value);
    for step in &result.steps {
        println!("  step {}: {}", step.step, step.counterexample);
    }
    println!();

    // Full reporting, including replay coordinates.
    println!("Full failure report:");
    let prop = for_all_named(Gen::int_range(-20, 20), "x", |&x| x == 0);
    let result = prop.run_with_context(
        Seed::from_u64(7),
        &Config::default().with_tests(50),
        Some("everything_is_zero"),
        Some("demos::shrinking"),
    );
    println!("{result}");
}
