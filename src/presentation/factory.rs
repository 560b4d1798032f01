//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up from a
//! resolved `Config`. This is the dependency injection point for the CLI.

use std::sync::Arc;

use crate::application::{CompileUseCase, DeployUseCase};
use crate::config::Config;
use crate::domain::ports::ReconcileEventSink;
use crate::infrastructure::{
    AergoCliClient, AergoLuaCompiler, ConsoleEventSink, JsonEventSink, Poller, Signer,
    TomlCompiledRegistryRepository, TomlDeployedRegistryRepository,
};
use crate::ui::detect_capabilities;

/// Concrete CompileUseCase with all dependencies
pub type ConcreteCompileUseCase = CompileUseCase<AergoLuaCompiler, TomlCompiledRegistryRepository>;

/// Concrete DeployUseCase with all dependencies
pub type ConcreteDeployUseCase =
    DeployUseCase<AergoCliClient, TomlCompiledRegistryRepository, TomlDeployedRegistryRepository>;

pub fn create_compiler(config: &Config) -> AergoLuaCompiler {
    AergoLuaCompiler::discover(
        config.build.compiler.as_deref(),
        &config.build.compiler_search_roots,
    )
}

pub fn create_target_client(config: &Config) -> AergoCliClient {
    let signer = Signer {
        account: config.target.account.clone(),
        keystore: config.target.keystore.clone(),
        password: config.target.password.clone(),
    };
    AergoCliClient::new(&config.target.cli, &config.target.endpoint, signer).with_poller(
        Poller::new(config.target.poll_interval(), config.target.timeout()),
    )
}

pub fn create_compiled_repository(config: &Config) -> TomlCompiledRegistryRepository {
    TomlCompiledRegistryRepository::with_path(&config.registry.compiled)
}

pub fn create_deployed_repository(config: &Config) -> TomlDeployedRegistryRepository {
    TomlDeployedRegistryRepository::with_path(&config.registry.deployed)
}

/// Create a compile use case with all dependencies wired up
pub fn create_compile_use_case(config: &Config) -> ConcreteCompileUseCase {
    CompileUseCase::new(create_compiler(config), create_compiled_repository(config))
}

/// Create a deploy use case with all dependencies wired up
pub fn create_deploy_use_case(config: &Config) -> ConcreteDeployUseCase {
    DeployUseCase::new(
        create_target_client(config),
        create_compiled_repository(config),
        create_deployed_repository(config),
    )
}

/// Event sink for the requested output mode
pub fn create_event_sink(json: bool, verbose: u8) -> Arc<dyn ReconcileEventSink> {
    if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stdout(detect_capabilities(), verbose))
    }
}
