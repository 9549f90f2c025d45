use ark_std::rand::{rngs::StdRng, SeedableRng};
use benches::WIDTHS;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sha2::Sha256;
use test_utils::{bench_groups, STAT_DIST};
use verifiable_encryption::{ElGamal, ElGamalZKPoKWriteIn};

fn elgamal(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0u64);
    for group in bench_groups() {
        let eg = ElGamal::new(true, group.clone(), STAT_DIST);
        let (pk, sk) = eg.gen(&mut rng).unwrap();

        let mut enc_group = c.benchmark_group(format!("ElGamal encryption in {}", group));
        for width in WIDTHS {
            let wpk = eg.wide_public_key(&pk, width).unwrap();
            let m = wpk.message_group().random_element(&mut rng, STAT_DIST);
            enc_group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, _| {
                b.iter(|| eg.encrypt(&wpk, black_box(&m), &mut rng).unwrap())
            });
        }
        enc_group.finish();

        let mut dec_group = c.benchmark_group(format!("ElGamal decryption in {}", group));
        for width in WIDTHS {
            let wpk = eg.wide_public_key(&pk, width).unwrap();
            let wsk = eg.wide_private_key(&sk, width).unwrap();
            let m = wpk.message_group().random_element(&mut rng, STAT_DIST);
            let ciphertext = eg.encrypt(&wpk, &m, &mut rng).unwrap();
            dec_group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, _| {
                b.iter(|| eg.decrypt(&wsk, black_box(&ciphertext)).unwrap())
            });
        }
        dec_group.finish();
    }
}

fn write_in(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0u64);
    let label = b"bench";
    for group in bench_groups() {
        let eg = ElGamalZKPoKWriteIn::<Sha256>::write_in(false, group.clone(), STAT_DIST);
        let (pk, sk) = eg.gen(&mut rng).unwrap();

        let mut wi_group = c.benchmark_group(format!("Write-in encryption in {}", group));
        for width in WIDTHS {
            let wpk = eg.wide_public_key(&pk, width).unwrap();
            let wsk = eg.wide_private_key(&sk, width).unwrap();
            let m = wpk.message_group().random_element(&mut rng, STAT_DIST);
            wi_group.bench_with_input(BenchmarkId::new("encrypt", width), &width, |b, _| {
                b.iter(|| eg.encrypt(label, &wpk, black_box(&m), &mut rng).unwrap())
            });
            let ciphertext = eg.encrypt(label, &wpk, &m, &mut rng).unwrap();
            wi_group.bench_with_input(BenchmarkId::new("decrypt", width), &width, |b, _| {
                b.iter(|| {
                    eg.decrypt(label, &wpk, &wsk, black_box(&ciphertext))
                        .unwrap()
                })
            });
        }
        wi_group.finish();
    }
}

criterion_group!(benches, elgamal, write_in);
criterion_main!(benches);
