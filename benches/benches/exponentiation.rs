use arithm::{fix_mod_pow::FixModPow, modpow_prod::ModPowProd, PGroup};
use ark_std::rand::{rngs::StdRng, RngCore, SeedableRng};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use num::BigUint;
use test_utils::{bench_groups, STAT_DIST};

fn random_exponent<R: RngCore>(rng: &mut R, bytes: usize) -> BigUint {
    let mut buf = vec![0u8; bytes];
    rng.fill_bytes(&mut buf);
    BigUint::from_bytes_be(&buf)
}

fn modp2048_modulus() -> BigUint {
    match PGroup::named("modp2048").unwrap() {
        PGroup::ModP(g) => g.modulus().clone(),
        _ => unreachable!(),
    }
}

fn fixed_base(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0u64);
    let modulus = modp2048_modulus();
    let basis = random_exponent(&mut rng, 256) % &modulus;
    let exponents = (0..16)
        .map(|_| random_exponent(&mut rng, 256))
        .collect::<Vec<_>>();

    c.bench_function("modpow 2048 bits", |b| {
        b.iter(|| {
            for e in &exponents {
                black_box(basis.modpow(black_box(e), &modulus));
            }
        })
    });

    let mut table_group = c.benchmark_group("Fixed base table");
    for width in [2, 4, 8, 12] {
        table_group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, &width| {
            b.iter(|| FixModPow::new(black_box(&basis), &modulus, 16, Some(width)).unwrap())
        });
    }
    table_group.finish();

    let mut exp_group = c.benchmark_group("Fixed base exponentiation");
    for width in [2, 4, 8, 12] {
        let fmp = FixModPow::new(&basis, &modulus, 16, Some(width)).unwrap();
        exp_group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, _| {
            b.iter(|| {
                for e in &exponents {
                    black_box(fmp.mod_pow(black_box(e)).unwrap());
                }
            })
        });
    }
    exp_group.finish();
}

fn simultaneous(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0u64);
    let modulus = modp2048_modulus();
    let mut group = c.benchmark_group("Power product");
    for width in [2, 4, 8] {
        let bases = (0..width)
            .map(|_| random_exponent(&mut rng, 256) % &modulus)
            .collect::<Vec<_>>();
        let exponents = (0..width)
            .map(|_| random_exponent(&mut rng, 256))
            .collect::<Vec<_>>();
        let mpp = ModPowProd::new(&bases, &modulus).unwrap();
        group.bench_with_input(
            BenchmarkId::new("table", width),
            &width,
            |b, _| b.iter(|| mpp.mod_pow_prod(black_box(&exponents)).unwrap()),
        );
        group.bench_with_input(
            BenchmarkId::new("naive", width),
            &width,
            |b, _| b.iter(|| ModPowProd::naive(black_box(&bases), &exponents, &modulus).unwrap()),
        );
    }
    group.finish();
}

fn group_exponentiation(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0u64);
    for group in bench_groups() {
        let element = group.random_element(&mut rng, STAT_DIST);
        let fixed = element.fixed(16).unwrap();
        let exponent = group.pring().random_element(&mut rng, STAT_DIST);
        c.bench_function(&format!("Exponentiation in {}", group), |b| {
            b.iter(|| element.exp(black_box(&exponent)).unwrap())
        });
        c.bench_function(&format!("Fixed exponentiation in {}", group), |b| {
            b.iter(|| fixed.exp(black_box(&exponent)).unwrap())
        });
    }
}

criterion_group!(benches, fixed_base, simultaneous, group_exponentiation);
criterion_main!(benches);
