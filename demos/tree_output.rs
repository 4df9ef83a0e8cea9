//! Demo of lazy shrink tree rendering.

use lazycheck_core::*;

fn main() {
    println!("Shrink Tree Rendering Demo");
    println!("==========================");
    println!();

    // An integer's binary-search shrink tree, two levels deep.
    println!("1. Integer generator (range 0-20)");
    let gen = Gen::int_range(0, 20);
    let tree = gen.run(Size::new(10), Seed::from_u64(42));

    println!("Generated: {}", tree.value().unwrap());
    println!();
    println!("Tree structure (depth 2):");
    print!("{}", tree.render(2));
    println!();

    // The same tree after mapping: shape is preserved, values transformed.
    println!("2. Mapped generator (n * 100)");
    let mapped = gen.map(|n| n * 100);
    let mapped_tree = mapped.run(Size::new(10), Seed::from_u64(42));
    print!("{}", mapped_tree.render(1));
    println!();

    // The tree is lazy: rendering depth 1 of an enormous domain is instant.
    println!("3. A huge domain, shallow render");
    let huge = shrink_towards(0, i64::MAX / 3);
    print!("{}", huge.render(1));
}
