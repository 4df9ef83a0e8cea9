//! Example demonstrating the generator combinators.

use lazycheck_core::*;

fn main() {
    println!("Generator combinators");
    println!("=====================");
    println!();

    let seed = Seed::from_u64(2024);
    let size = Size::new(50);

    // Primitives.
    let n = Gen::int_range(0, 100).run(size, seed).value().unwrap();
    println!("int_range(0, 100): {n}");

    let b = Gen::bool().run(size, seed).value().unwrap();
    println!("bool: {b}");

    // map: transforms values and the whole shrink tree.
    let even = Gen::int_range(0, 50).map(|n| n * 2);
    println!("doubled: {}", even.run(size, seed).value().unwrap());

    // bind: dependent generation with independent seed streams.
    let pair = Gen::int_range(1, 9).bind(|len| Gen::int_range(0, len * 10));
    println!("dependent: {}", pair.run(size, seed).value().unwrap());

    // filter: retries until the predicate accepts, shrinks stay in-domain.
    let multiple_of_three = Gen::int_range(0, 100).filter(|n| n % 3 == 0);
    println!(
        "multiple of three: {}",
        multiple_of_three.run(size, seed).value().unwrap()
    );

    // Named generators show up in draw logs.
    let named = Gen::int_range(0, 10).with_name("die roll");
    let mut ctx = Context::new(seed, size);
    ctx.on_generate(|draw| {
        println!(
            "drew #{} from {}",
            draw.index,
            draw.name.as_deref().unwrap_or("<anonymous>")
        )
    });
    let roll = ctx.draw(&named).value().unwrap();
    println!("rolled: {roll} (replay with {})", ctx.replay());
}
