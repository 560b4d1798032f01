//! Scenario: the live target or local state drifts from the registries

use crate::common::*;
use hsc::{DeployOptions, DriftStatus};

fn deployed_once() -> (Workspace, SourceCompiler, FakeChain) {
    let ws = Workspace::three_modules();
    let compiler = SourceCompiler::default();
    let chain = FakeChain::new();
    ws.compile_with(&compiler, &ws.modules(), "v1").unwrap();
    ws.deploy_with(&chain, &DeployOptions::new()).unwrap();
    chain.clear_log();
    (ws, compiler, chain)
}

/// Someone re-stamped the live root: everything is redeployed
#[test]
fn scenario_remote_version_mismatch_redeploys_all() {
    let (ws, _compiler, chain) = deployed_once();
    chain.set_live_version("v0-hotfix");

    let report = ws.deploy_with(&chain, &DeployOptions::new()).unwrap();

    assert!(matches!(report.drift, DriftStatus::RemoteMismatch { .. }));
    assert_eq!(chain.deploy_count(), 3);
    assert_eq!(chain.call_count(), 1);
    assert_eq!(chain.live_version.borrow().as_deref(), Some("v1"));
}

/// An unreachable target during the drift check fails safe
#[test]
fn scenario_failed_drift_query_redeploys_all() {
    let (ws, _compiler, chain) = deployed_once();
    chain.query_fails.set(true);

    let report = ws.deploy_with(&chain, &DeployOptions::new()).unwrap();

    assert!(matches!(report.drift, DriftStatus::QueryFailed { .. }));
    assert!(report.force_all);
    assert_eq!(chain.deploy_count(), 3);
}

/// A new tool version makes the local deployed state stale
#[test]
fn scenario_tool_version_bump_redeploys_all_without_querying() {
    let (ws, compiler, chain) = deployed_once();

    ws.compile_with(&compiler, &ws.modules(), "v2").unwrap();
    let report = ws.deploy_with(&chain, &DeployOptions::new()).unwrap();

    assert!(matches!(report.drift, DriftStatus::LocalStale { .. }));
    assert_eq!(chain.queries.get(), 0);
    assert_eq!(chain.deploy_count(), 3);
    assert_eq!(ws.deployed().tool_version(), Some("v2"));
}

/// A dry run reports the plan but touches nothing
#[test]
fn scenario_dry_run_changes_nothing() {
    let (ws, compiler, chain) = deployed_once();
    let before = ws.deployed();

    ws.write_source(DB, "db v2");
    ws.compile_with(&compiler, &ws.modules(), "v1").unwrap();
    let report = ws
        .deploy_with(&chain, &DeployOptions::new().with_dry_run(true))
        .unwrap();

    assert_eq!(report.deployed_keys(), vec![DB, CMD]);
    assert_eq!(chain.deploy_count(), 0);
    assert_eq!(chain.call_count(), 0);
    assert_eq!(ws.deployed(), before);
}
