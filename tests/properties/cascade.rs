//! Property tests for the deploy cascade.

use proptest::prelude::*;

use crate::common::*;
use hsc::domain::ports::NoopEventSink;
use hsc::{
    plan_cascade, CompiledRecord, CompiledRegistry, DeployDecision, DeployOptions, DeployReason,
    DeployUseCase, DeployedRecord, DeployedRegistry, Payload, Tier,
};

/// Per module: (compiled payload id, prior deployed payload id if any)
fn module_states() -> impl Strategy<Value = Vec<(u8, Option<u8>)>> {
    proptest::collection::vec((0u8..3, proptest::option::of(0u8..3)), 1..8)
}

fn materialize(states: &[(u8, Option<u8>)]) -> Vec<(Payload, Option<DeployedRecord>)> {
    states
        .iter()
        .enumerate()
        .map(|(i, (compiled, prior))| {
            let payload = Payload::new(format!("p{}", compiled));
            let prior = prior.map(|p| DeployedRecord::new(Payload::new(format!("p{}", p)), format!("Am{}", i)));
            (payload, prior)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: once module i deploys, every module j > i deploys too.
    #[test]
    fn property_cascade_is_monotonic(states in module_states(), force_all in any::<bool>()) {
        let modules = materialize(&states);
        let decisions = plan_cascade(modules.iter().map(|(p, r)| (p, r.as_ref())), force_all);

        prop_assert_eq!(decisions.len(), modules.len());
        if let Some(first) = decisions.iter().position(|d| d.is_deploy()) {
            prop_assert!(decisions[first..].iter().all(|d| d.is_deploy()));
        }
    }

    /// PROPERTY: forceAll redeploys every module.
    #[test]
    fn property_force_all_deploys_everything(states in module_states()) {
        let modules = materialize(&states);
        let decisions = plan_cascade(modules.iter().map(|(p, r)| (p, r.as_ref())), true);

        prop_assert!(decisions.iter().all(|d| *d == DeployDecision::Deploy(DeployReason::Forced)));
    }

    /// PROPERTY: without force, the first deployment is caused by the module itself.
    #[test]
    fn property_first_deploy_has_own_reason(states in module_states()) {
        let modules = materialize(&states);
        let decisions = plan_cascade(modules.iter().map(|(p, r)| (p, r.as_ref())), false);

        if let Some(first) = decisions.iter().position(|d| d.is_deploy()) {
            let (payload, prior) = &modules[first];
            let expected = match prior {
                None => DeployReason::NotDeployed,
                Some(record) => {
                    prop_assert_ne!(record.payload(), payload);
                    DeployReason::PayloadChanged
                }
            };
            prop_assert_eq!(decisions[first], DeployDecision::Deploy(expected));
            prop_assert!(decisions[..first].iter().all(|d| *d == DeployDecision::Skip));
        } else {
            for (payload, prior) in &modules {
                prop_assert_eq!(prior.as_ref().map(|r| r.payload()), Some(payload));
            }
        }
    }

    /// PROPERTY: a deploy run makes the planned decisions, and every
    /// dependent it deploys receives the root address of that run.
    #[test]
    fn property_deploy_run_follows_plan(
        compiled_ids in proptest::collection::vec(0u8..3, 3),
        prior_ids in proptest::collection::vec(proptest::option::of(0u8..3), 3),
        force in any::<bool>(),
    ) {
        let ws = Workspace::three_modules();
        let chain = FakeChain::new();
        chain.set_live_version("v1");

        let mut compiled = CompiledRegistry::new();
        compiled.set_tool_version("v1");
        let mut prior = DeployedRegistry::new();
        prior.set_tool_version(Some("v1".to_string()));
        let tiers = [(META, Tier::Root), (DB, Tier::DependentPrimary), (CMD, Tier::Regular)];
        for (i, (key, tier)) in tiers.into_iter().enumerate() {
            compiled.insert(
                key,
                CompiledRecord::new(Payload::new(format!("p{}", compiled_ids[i])), key, tier, i),
            );
            if let Some(p) = prior_ids[i] {
                prior.insert(key, DeployedRecord::new(Payload::new(format!("p{}", p)), format!("AmPrior{}", i)));
            }
        }
        if prior_ids[0].is_some() {
            prior.set_root_address("AmPrior0");
        }

        let report = DeployUseCase::new(&chain, ws.compiled_repo(), ws.deployed_repo())
            .reconcile(
                &compiled,
                prior.clone(),
                &DeployOptions::new().with_force(force),
                &NoopEventSink,
            )
            .unwrap();

        prop_assert!(!report.drift.forces_redeploy());
        prop_assert_eq!(report.force_all, force);
        let planned = plan_cascade(
            compiled
                .deploy_order()
                .iter()
                .map(|&(key, record)| (record.payload(), prior.get(key))),
            force,
        );
        let decisions: Vec<_> = report.outcomes.iter().map(|o| o.decision).collect();
        prop_assert_eq!(&decisions, &planned);

        let root_address = report.root_address.clone().unwrap();
        for deployment in chain.deployments.borrow().iter() {
            if deployment.address != root_address {
                prop_assert_eq!(&deployment.args, &vec![root_address.clone()]);
            }
        }
        prop_assert_eq!(chain.deploy_count(), report.deployed_count());
    }
}
