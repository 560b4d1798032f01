//! Isolated project workspace backed by a temp directory.

use std::path::{Path, PathBuf};

use hsc::domain::ports::{Compiler, RegistryRepository, TargetClient};
use hsc::infrastructure::{TomlCompiledRegistryRepository, TomlDeployedRegistryRepository};
use hsc::{
    CompileOptions, CompileReport, CompileUseCase, CompiledRegistry, DeployOptions,
    DeployReport, DeployUseCase, DeployedRegistry, HscResult, Module, ModuleSet, Tier,
};
use tempfile::TempDir;

pub const META: &str = "meta.lua";
pub const DB: &str = "db.lua";
pub const CMD: &str = "cmd.lua";

pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Workspace with root, primary and one regular module source
    pub fn three_modules() -> Self {
        let ws = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        std::fs::create_dir_all(ws.source_dir()).unwrap();
        ws.write_source(META, "meta v1");
        ws.write_source(DB, "db v1");
        ws.write_source(CMD, "cmd v1");
        ws
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root().join("sc")
    }

    pub fn write_source(&self, key: &str, content: &str) {
        std::fs::write(self.source_dir().join(key), content).unwrap();
    }

    pub fn modules(&self) -> ModuleSet {
        let dir = self.source_dir();
        ModuleSet::new(vec![
            Module::new(META, Tier::Root, dir.join(META)),
            Module::new(DB, Tier::DependentPrimary, dir.join(DB)),
            Module::new(CMD, Tier::Regular, dir.join(CMD)),
        ])
        .unwrap()
    }

    /// Same set without the regular module
    pub fn modules_without_cmd(&self) -> ModuleSet {
        let dir = self.source_dir();
        ModuleSet::new(vec![
            Module::new(META, Tier::Root, dir.join(META)),
            Module::new(DB, Tier::DependentPrimary, dir.join(DB)),
        ])
        .unwrap()
    }

    pub fn compiled_repo(&self) -> TomlCompiledRegistryRepository {
        TomlCompiledRegistryRepository::with_path(self.root().join("hsc.compiled.toml"))
    }

    pub fn deployed_repo(&self) -> TomlDeployedRegistryRepository {
        TomlDeployedRegistryRepository::with_path(self.root().join("hsc.deployed.toml"))
    }

    pub fn compiled(&self) -> CompiledRegistry {
        self.compiled_repo().load().unwrap()
    }

    pub fn deployed(&self) -> DeployedRegistry {
        self.deployed_repo().load().unwrap()
    }

    pub fn compile_with(
        &self,
        compiler: impl Compiler,
        modules: &ModuleSet,
        version: &str,
    ) -> HscResult<CompileReport> {
        CompileUseCase::new(compiler, self.compiled_repo())
            .execute(modules, &CompileOptions::new(version))
    }

    pub fn deploy_with(
        &self,
        client: impl TargetClient,
        options: &DeployOptions,
    ) -> HscResult<DeployReport> {
        DeployUseCase::new(client, self.compiled_repo(), self.deployed_repo()).execute(options)
    }
}
