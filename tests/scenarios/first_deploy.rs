//! Scenario: first deployment and an identical re-run
//!
//! Journey: a developer compiles three modules and deploys them to a fresh
//! target, then runs deploy again without touching anything.

use crate::common::*;
use hsc::{DeployDecision, DeployOptions, DeployReason};

/// SCENARIO A: empty registries, root + primary + regular
#[test]
fn scenario_first_deploy_deploys_everything_in_order() {
    let ws = Workspace::three_modules();
    let compiler = SourceCompiler::default();
    let chain = FakeChain::new();

    let compiled = ws.compile_with(&compiler, &ws.modules(), "v1").unwrap();
    assert_eq!(compiled.changed.len(), 3);

    let report = ws.deploy_with(&chain, &DeployOptions::new()).unwrap();

    let deployments = chain.deployments.borrow();
    let order: Vec<_> = deployments.iter().map(|d| d.payload.as_str()).collect();
    assert_eq!(
        order,
        vec!["bytecode(meta v1)", "bytecode(db v1)", "bytecode(cmd v1)"]
    );
    assert!(deployments[0].args.is_empty(), "root takes no constructor args");
    assert_eq!(deployments[1].args, vec!["Am1".to_string()]);
    assert_eq!(deployments[2].args, vec!["Am1".to_string()]);

    let calls = chain.calls.borrow();
    assert_eq!(calls.len(), 1, "exactly one version sync");
    assert_eq!(calls[0].function, "setVersion");
    assert_eq!(calls[0].address, "Am1");
    assert_eq!(calls[0].args, vec!["v1".to_string()]);

    assert_eq!(report.root_address.as_deref(), Some("Am1"));
    assert_eq!(
        report.outcomes[0].decision,
        DeployDecision::Deploy(DeployReason::Forced)
    );

    let deployed = ws.deployed();
    assert_eq!(deployed.root_address(), Some("Am1"));
    assert_eq!(deployed.tool_version(), Some("v1"));
    assert_eq!(deployed.get(META).unwrap().address(), "Am1");
    assert_eq!(deployed.get(DB).unwrap().address(), "Am2");
    assert_eq!(deployed.get(CMD).unwrap().address(), "Am3");
}

/// SCENARIO B: identical re-run is a no-op, registry re-persisted unchanged
#[test]
fn scenario_identical_rerun_is_a_noop() {
    let ws = Workspace::three_modules();
    let compiler = SourceCompiler::default();
    let chain = FakeChain::new();

    ws.compile_with(&compiler, &ws.modules(), "v1").unwrap();
    ws.deploy_with(&chain, &DeployOptions::new()).unwrap();
    let before = ws.deployed();
    let before_text = std::fs::read_to_string(ws.deployed_repo().path()).unwrap();

    let recompiled = ws.compile_with(&compiler, &ws.modules(), "v1").unwrap();
    assert!(recompiled.changed.is_empty());

    chain.clear_log();
    let report = ws.deploy_with(&chain, &DeployOptions::new()).unwrap();

    assert_eq!(chain.deploy_count(), 0);
    assert_eq!(chain.call_count(), 0);
    assert_eq!(chain.queries.get(), 1, "drift query is still issued");
    assert!(report.is_noop());
    assert!(report.drift.is_in_sync());
    assert_eq!(ws.deployed(), before);
    assert_eq!(
        std::fs::read_to_string(ws.deployed_repo().path()).unwrap(),
        before_text
    );
}

/// A failing compile leaves the previous registry on disk
#[test]
fn scenario_compile_error_keeps_last_good_registry() {
    let ws = Workspace::three_modules();
    let compiler = SourceCompiler::default();

    ws.compile_with(&compiler, &ws.modules(), "v1").unwrap();
    let before = ws.compiled();

    ws.write_source(META, "meta v2");
    ws.write_source(CMD, "syntax error here");
    let err = ws
        .compile_with(&compiler, &ws.modules(), "v2")
        .unwrap_err();

    assert!(err.to_string().contains(CMD));
    assert_eq!(ws.compiled(), before);
}

/// A rejected deployment aborts the run and keeps the deployed registry
#[test]
fn scenario_rejected_deploy_keeps_last_good_registry() {
    let ws = Workspace::three_modules();
    let compiler = SourceCompiler::default();
    let chain = FakeChain::new();

    ws.compile_with(&compiler, &ws.modules(), "v1").unwrap();
    ws.deploy_with(&chain, &DeployOptions::new()).unwrap();
    let before = ws.deployed();

    ws.write_source(DB, "db v2");
    ws.compile_with(&compiler, &ws.modules(), "v1").unwrap();
    *chain.reject_payload.borrow_mut() = Some("cmd".to_string());

    let err = ws.deploy_with(&chain, &DeployOptions::new()).unwrap_err();

    assert!(err.to_string().contains(CMD));
    assert_eq!(ws.deployed(), before);

    // Retrying after the fix reconciles from the last persisted state.
    *chain.reject_payload.borrow_mut() = None;
    chain.clear_log();
    ws.deploy_with(&chain, &DeployOptions::new()).unwrap();
    assert_eq!(chain.deploy_count(), 2);
}

/// An unfunded signing account stops the run before anything is submitted
#[test]
fn scenario_unfunded_account_deploys_nothing() {
    let ws = Workspace::three_modules();
    let chain = FakeChain::new();
    chain.unfunded.set(true);
    ws.compile_with(&SourceCompiler::default(), &ws.modules(), "v1")
        .unwrap();

    let err = ws.deploy_with(&chain, &DeployOptions::new()).unwrap_err();

    assert!(matches!(err, hsc::HscError::InsufficientBalance { .. }));
    assert!(err.to_string().contains("AmDeployer"));
    assert_eq!(chain.deploy_count(), 0);
    assert_eq!(chain.queries.get(), 0);
    assert!(!ws.deployed_repo().path().exists());
}
