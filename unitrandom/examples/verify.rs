use unitrandom::{Algorithm, GnuRandom, UnitSource};

// Usage: verify [ALGORITHM] [SEED] [COUNT]
// With the glibc source the raw values can be diffed against a C program
// running `srand(seed); rand();` in a loop.
fn main() {
    let args: Vec<String> = std::env::args().collect();

    let algorithm: Algorithm = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(Algorithm::Glibc);
    let seed: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1);
    let count: u64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(20);

    println!("First {} values of {} for seed {}:", count, algorithm, seed);

    if algorithm == Algorithm::Glibc {
        let mut rng = GnuRandom::with_seed(seed as u32);
        for i in 0..count {
            let raw = rng.next_u31();
            println!("  [{}] = {:10} -> {}", i, raw, raw as f64 / 2147483648.0);
        }
        return;
    }

    let mut source = algorithm.build(seed, count);
    for (i, v) in source.draws(count).enumerate() {
        println!("  [{}] = {}", i, v);
    }
}
