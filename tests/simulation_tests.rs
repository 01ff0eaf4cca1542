#[cfg(test)]
mod tests {
    use coinflip_engine::{
        binomial, build, generate, simulate_seeded, summarize, test_fair_coin, Outcome,
        SimulationConfig, TrialRun, Verdict,
    };
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    // ========== Fixed Scenarios ==========

    #[test]
    fn scenario_a_balanced_seed_is_fair() {
        // First seed whose 100 fair flips land exactly 50 heads
        let config = SimulationConfig::new(100, 0.5);
        let report = (0..10_000u64)
            .map(|seed| simulate_seeded(&config, seed).expect("test: simulate"))
            .find(|r| r.summary().success_count() == 50)
            .expect("test: some seed yields 50 heads");

        assert!(report.test().p_value() >= 0.05);
        assert!(!report.test().reject_null());
        assert_eq!(report.test().verdict().as_str(), "fair coin");
    }

    #[test]
    fn scenario_b_ninety_heads_is_biased() {
        let run = TrialRun::with_successes(100, 90, 0.5).expect("test: forced run");
        let summary = summarize(&run).expect("test: summarize");
        let result = test_fair_coin(&summary).expect("test: hypothesis");

        assert_eq!(summary.success_count(), 90);
        assert!(result.p_value() < 0.05);
        assert_eq!(result.verdict(), Verdict::BiasedCoin);
        assert_eq!(result.verdict().as_str(), "biased coin");
    }

    #[test]
    fn scenario_c_single_trial() {
        for seed in 0..20 {
            let report = simulate_seeded(&SimulationConfig::new(1, 0.5), seed)
                .expect("test: n = 1 must not fail");
            let k = report.summary().success_count();
            assert!(k <= 1);
            assert_eq!(report.summary().cumulative_successes(), &[k]);
            assert_eq!(report.test().p_value(), 1.0);
        }
    }

    #[test]
    fn scenario_d_zero_trials_rejected() {
        let err = generate(0, 0.5, &mut rng(0)).expect_err("test: n = 0");
        assert!(err.is_invalid_parameter(), "expected InvalidParameter, got {err:?}");

        let err = simulate_seeded(&SimulationConfig::new(0, 0.5), 0).expect_err("test: no report");
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn scenario_e_certain_heads() {
        let report = simulate_seeded(&SimulationConfig::new(10, 1.0), 5).expect("test: simulate");
        assert!(report.run().outcomes().iter().all(|o| *o == Outcome::Heads));
        assert_eq!(report.summary().success_count(), 10);
        assert!(report.test().p_value() < 0.05);
        assert_eq!(report.test().verdict(), Verdict::BiasedCoin);
    }

    #[test]
    fn export_table_matches_outcomes() {
        let report = simulate_seeded(&SimulationConfig::new(37, 0.3), 21).expect("test: simulate");
        let csv = report.to_csv();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("trial_index,outcome"));
        for (i, (line, outcome)) in lines.zip(report.run().outcomes()).enumerate() {
            assert_eq!(line, format!("{},{}", i + 1, outcome.label()));
        }
        assert_eq!(csv.lines().count(), 38);
    }

    #[test]
    fn pipeline_never_reaches_invalid_state_from_public_inputs() {
        for n in [1u32, 2, 3, 10, 61, 500, 1000] {
            for p in [0.0, 0.01, 0.5, 0.99, 1.0] {
                let stage_run = generate(n, p, &mut rng(u64::from(n))).expect("test: generate");
                let summary = summarize(&stage_run).expect("test: summarize");
                let result = test_fair_coin(&summary).expect("test: hypothesis");
                build(stage_run, summary, result).expect("test: build");
            }
        }
    }

    // ========== Properties ==========

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn generated_runs_hold_invariants(n in 1u32..=1000, p in 0.0f64..=1.0, seed in any::<u64>()) {
            let report = simulate_seeded(&SimulationConfig::new(n, p), seed).expect("test: simulate");
            let summary = report.summary();
            let result = report.test();

            prop_assert_eq!(report.run().outcomes().len(), n as usize);
            prop_assert_eq!(summary.success_count() + summary.failure_count(), n);

            let cumulative = summary.cumulative_successes();
            prop_assert_eq!(cumulative.len(), n as usize);
            prop_assert!(cumulative.windows(2).all(|w| w[0] <= w[1]));
            prop_assert!(cumulative[0] <= 1);
            prop_assert_eq!(cumulative[cumulative.len() - 1], summary.success_count());

            prop_assert!((0.0..=1.0).contains(&result.p_value()));
            let ci = result.confidence_interval();
            prop_assert!(0.0 <= ci.lower && ci.lower <= ci.upper && ci.upper <= 1.0);
            prop_assert_eq!(result.reject_null(), result.p_value() < 0.05);

            let rows = report.rows();
            prop_assert!(rows.iter().enumerate().all(|(i, r)| r.trial_index as usize == i + 1));
        }

        #[test]
        fn p_value_symmetric_about_half(n in 1u32..=1000, k_frac in 0.0f64..=1.0) {
            let k = ((n as f64) * k_frac).round() as u32;
            let low = TrialRun::with_successes(n, k, 0.5).expect("test: run k");
            let high = TrialRun::with_successes(n, n - k, 0.5).expect("test: run n - k");
            let a = test_fair_coin(&summarize(&low).expect("test: summarize")).expect("test: k");
            let b = test_fair_coin(&summarize(&high).expect("test: summarize")).expect("test: n - k");
            prop_assert_eq!(a.p_value().to_bits(), b.p_value().to_bits());
        }

        #[test]
        fn summarize_and_test_are_idempotent(n in 1u32..=300, seed in any::<u64>()) {
            let run = generate(n, 0.5, &mut rng(seed)).expect("test: generate");
            let s1 = summarize(&run).expect("test: summarize");
            let s2 = summarize(&run).expect("test: summarize");
            prop_assert_eq!(&s1, &s2);
            let t1 = test_fair_coin(&s1).expect("test: test");
            let t2 = test_fair_coin(&s2).expect("test: test");
            prop_assert_eq!(t1.p_value().to_bits(), t2.p_value().to_bits());
            prop_assert_eq!(t1, t2);
        }

        #[test]
        fn log_space_matches_direct_summation(n in 1u32..=60, k_frac in 0.0f64..=1.0, p in 0.05f64..0.95) {
            let k = ((n as f64) * k_frac).round() as u32;
            let direct = binomial::two_sided_p_value_with(k, n, p, binomial::PmfMethod::Direct);
            let logged = binomial::two_sided_p_value_with(k, n, p, binomial::PmfMethod::LogSpace);
            prop_assert!((direct - logged).abs() <= 1e-9_f64.max(1e-9 * direct.abs()));
        }
    }
}
