use arithm::PGroupElement;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use benches::{discrete_log_instance, WIDTHS};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use crypto_utils::ByteTree;
use schnorr_pok::{SigmaProofOr, ZKPoK};
use sha2::Sha256;
use test_utils::{bench_groups, STAT_DIST};

fn schnorr(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0u64);
    let label = ByteTree::leaf(b"bench".to_vec());
    for group in bench_groups() {
        let mut proof_group = c.benchmark_group(format!("Proof generation in {}", group));
        let mut proofs = vec![];
        for width in WIDTHS {
            let (sp, y, w) = discrete_log_instance(&group, width, &mut rng);
            proof_group.bench_with_input(
                BenchmarkId::from_parameter(format!("{} elements", width)),
                &width,
                |b, _| {
                    b.iter(|| {
                        sp.prove::<Sha256, _>(&label, black_box(&y), black_box(&w), &mut rng, STAT_DIST)
                            .unwrap()
                    })
                },
            );
            let bytes = sp
                .prove::<Sha256, _>(&label, &y, &w, &mut rng, STAT_DIST)
                .unwrap();
            proofs.push((sp, y, bytes));
        }
        proof_group.finish();

        let mut verif_group = c.benchmark_group(format!("Proof verification in {}", group));
        for (width, (sp, y, bytes)) in WIDTHS.iter().zip(proofs.iter()) {
            verif_group.bench_with_input(
                BenchmarkId::from_parameter(format!("{} elements", width)),
                width,
                |b, _| b.iter(|| assert!(sp.verify::<Sha256>(&label, black_box(y), black_box(bytes)))),
            );
        }
        verif_group.finish();
    }
}

fn or_proof(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0u64);
    let label = ByteTree::leaf(b"bench".to_vec());
    for group in bench_groups() {
        let mut or_group = c.benchmark_group(format!("Or proof in {}", group));
        for branches in [2, 4, 8] {
            let (sp, y, w) = discrete_log_instance(&group, 1, &mut rng);
            let or = SigmaProofOr::repeated(sp, branches).unwrap();
            let instances = (0..branches)
                .map(|i| {
                    if i == 0 {
                        y.clone()
                    } else {
                        group.random_element(&mut rng, STAT_DIST)
                    }
                })
                .collect::<Vec<PGroupElement>>();
            let witness = (w, 0);
            or_group.bench_with_input(
                BenchmarkId::new("prove", branches),
                &branches,
                |b, _| {
                    b.iter(|| {
                        or.prove::<Sha256, _>(&label, &instances, &witness, &mut rng, STAT_DIST)
                            .unwrap()
                    })
                },
            );
            let bytes = or
                .prove::<Sha256, _>(&label, &instances, &witness, &mut rng, STAT_DIST)
                .unwrap();
            or_group.bench_with_input(
                BenchmarkId::new("verify", branches),
                &branches,
                |b, _| b.iter(|| assert!(or.verify::<Sha256>(&label, &instances, black_box(&bytes)))),
            );
        }
        or_group.finish();
    }
}

criterion_group!(benches, schnorr, or_proof);
criterion_main!(benches);
