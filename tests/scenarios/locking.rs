//! Scenario: overlapping runs on the same project
//!
//! Journey: one deploy is still running when a second deploy (or compile)
//! starts. The second run must refuse instead of overwriting the first
//! run's records with a stale view of the registry.

use crate::common::*;
use hsc::domain::ports::{RegistryError, RegistryRepository};
use hsc::{DeployOptions, HscError};

#[test]
fn scenario_deploy_refuses_while_another_run_holds_the_registry() {
    let ws = Workspace::three_modules();
    let chain = FakeChain::new();
    ws.compile_with(&SourceCompiler::default(), &ws.modules(), "v1")
        .unwrap();
    ws.deploy_with(&chain, &DeployOptions::new()).unwrap();
    let before = ws.deployed();

    ws.write_source(CMD, "cmd v2");
    ws.compile_with(&SourceCompiler::default(), &ws.modules(), "v1")
        .unwrap();
    chain.clear_log();

    let other_run = ws.deployed_repo().lock().unwrap();
    let err = ws.deploy_with(&chain, &DeployOptions::new()).unwrap_err();

    assert!(matches!(
        err,
        HscError::Registry(RegistryError::Locked { ref path }) if path == ws.deployed_repo().path()
    ));
    assert_eq!(chain.deploy_count(), 0, "nothing submitted while locked");
    assert_eq!(chain.queries.get(), 0);
    assert_eq!(ws.deployed(), before);

    drop(other_run);
    let report = ws.deploy_with(&chain, &DeployOptions::new()).unwrap();
    assert_eq!(report.deployed_keys(), vec![CMD]);
}

#[test]
fn scenario_compile_refuses_while_another_run_holds_the_registry() {
    let ws = Workspace::three_modules();
    let compiler = SourceCompiler::default();

    let other_run = ws.compiled_repo().lock().unwrap();
    let err = ws.compile_with(&compiler, &ws.modules(), "v1").unwrap_err();

    assert!(matches!(
        err,
        HscError::Registry(RegistryError::Locked { .. })
    ));
    assert_eq!(compiler.invocations.get(), 0);
    assert!(!ws.compiled_repo().path().exists());

    drop(other_run);
    assert!(ws.compile_with(&compiler, &ws.modules(), "v1").is_ok());
}

#[test]
fn scenario_compile_and_deploy_lock_different_registries() {
    let ws = Workspace::three_modules();
    ws.compile_with(&SourceCompiler::default(), &ws.modules(), "v1")
        .unwrap();

    let _compile_run = ws.compiled_repo().lock().unwrap();
    let report = ws.deploy_with(&FakeChain::new(), &DeployOptions::new());

    assert!(report.is_ok());
}
