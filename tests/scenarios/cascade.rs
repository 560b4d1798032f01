//! Scenario: source edits and the one-directional cascade

use crate::common::*;
use hsc::{DeployDecision, DeployOptions, DeployReason};

fn deployed_once() -> (Workspace, SourceCompiler, FakeChain) {
    let ws = Workspace::three_modules();
    let compiler = SourceCompiler::default();
    let chain = FakeChain::new();
    ws.compile_with(&compiler, &ws.modules(), "v1").unwrap();
    ws.deploy_with(&chain, &DeployOptions::new()).unwrap();
    chain.clear_log();
    (ws, compiler, chain)
}

/// SCENARIO C: only the regular module changes
#[test]
fn scenario_regular_change_redeploys_only_that_module() {
    let (ws, compiler, chain) = deployed_once();
    let before = ws.deployed();

    ws.write_source(CMD, "cmd v2");
    let compiled = ws.compile_with(&compiler, &ws.modules(), "v1").unwrap();
    assert_eq!(compiled.changed.iter().collect::<Vec<_>>(), vec![CMD]);

    let report = ws.deploy_with(&chain, &DeployOptions::new()).unwrap();

    assert_eq!(report.deployed_keys(), vec![CMD]);
    assert_eq!(chain.deployments.borrow()[0].args, vec!["Am1".to_string()]);
    assert_eq!(chain.call_count(), 1, "version sync after a deployment");

    let after = ws.deployed();
    assert_eq!(after.get(META), before.get(META));
    assert_eq!(after.get(DB), before.get(DB));
    assert_eq!(after.get(CMD).unwrap().address(), "Am4");
    assert_eq!(after.root_address(), Some("Am1"));
}

/// SCENARIO D: only the root changes, everything after it cascades
#[test]
fn scenario_root_change_cascades_to_every_module() {
    let (ws, compiler, chain) = deployed_once();

    ws.write_source(META, "meta v2");
    ws.compile_with(&compiler, &ws.modules(), "v1").unwrap();
    let report = ws.deploy_with(&chain, &DeployOptions::new()).unwrap();

    let decisions: Vec<_> = report.outcomes.iter().map(|o| o.decision).collect();
    assert_eq!(
        decisions,
        vec![
            DeployDecision::Deploy(DeployReason::PayloadChanged),
            DeployDecision::Deploy(DeployReason::Cascade),
            DeployDecision::Deploy(DeployReason::Cascade),
        ]
    );

    let deployments = chain.deployments.borrow();
    assert_eq!(deployments.len(), 3);
    assert_eq!(deployments[1].args, vec!["Am4".to_string()]);
    assert_eq!(deployments[2].args, vec!["Am4".to_string()]);
    assert_eq!(chain.calls.borrow()[0].address, "Am4");
    assert_eq!(ws.deployed().root_address(), Some("Am4"));
}

/// A primary change cascades to regulars but leaves the root alone
#[test]
fn scenario_primary_change_keeps_root_address() {
    let (ws, compiler, chain) = deployed_once();

    ws.write_source(DB, "db v2");
    ws.compile_with(&compiler, &ws.modules(), "v1").unwrap();
    let report = ws.deploy_with(&chain, &DeployOptions::new()).unwrap();

    assert_eq!(report.deployed_keys(), vec![DB, CMD]);
    assert_eq!(report.root_address.as_deref(), Some("Am1"));
}

/// Removing a module from the set prunes it from both registries
#[test]
fn scenario_retired_module_is_pruned() {
    let (ws, compiler, chain) = deployed_once();

    let compiled = ws
        .compile_with(&compiler, &ws.modules_without_cmd(), "v1")
        .unwrap();
    assert_eq!(compiled.pruned, vec![CMD.to_string()]);

    let report = ws.deploy_with(&chain, &DeployOptions::new()).unwrap();

    assert_eq!(report.pruned, vec![CMD.to_string()]);
    assert_eq!(chain.deploy_count(), 0);
    let deployed = ws.deployed();
    assert!(!deployed.contains(CMD));
    assert_eq!(deployed.root_address(), Some("Am1"));
}
