//! Property tests for registry persistence.

use proptest::prelude::*;

use hsc::domain::ports::RegistryRepository;
use hsc::infrastructure::{TomlCompiledRegistryRepository, TomlDeployedRegistryRepository};
use hsc::{CompiledRecord, CompiledRegistry, DeployedRecord, DeployedRegistry, Payload, Tier};

fn key() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z_]{1,12}\\.lua").unwrap()
}

fn payload() -> impl Strategy<Value = Payload> {
    // any printable text, including quotes and newlines
    proptest::string::string_regex("[ -~\n]{1,64}")
        .unwrap()
        .prop_map(Payload::new)
}

fn tier() -> impl Strategy<Value = Tier> {
    prop_oneof![
        Just(Tier::Root),
        Just(Tier::DependentPrimary),
        Just(Tier::Regular),
    ]
}

fn compiled_registry() -> impl Strategy<Value = CompiledRegistry> {
    (
        proptest::option::of("v[0-9]\\.[0-9]"),
        proptest::collection::btree_map(key(), (payload(), tier()), 0..6),
    )
        .prop_map(|(version, modules)| {
            let mut registry = CompiledRegistry::new();
            if let Some(version) = version {
                registry.set_tool_version(version);
            }
            for (order, (key, (payload, tier))) in modules.into_iter().enumerate() {
                let source = format!("sc/{}", key);
                registry.insert(key, CompiledRecord::new(payload, source, tier, order));
            }
            registry
        })
}

fn deployed_registry() -> impl Strategy<Value = DeployedRegistry> {
    (
        proptest::option::of("v[0-9]\\.[0-9]"),
        proptest::option::of("Am[A-Za-z0-9]{8}"),
        proptest::collection::btree_map(key(), (payload(), "Am[A-Za-z0-9]{8}"), 0..6),
    )
        .prop_map(|(version, root, modules)| {
            let mut registry = DeployedRegistry::new();
            registry.set_tool_version(version);
            if let Some(root) = root {
                registry.set_root_address(root);
            }
            for (key, (payload, address)) in modules {
                registry.insert(key, DeployedRecord::new(payload, address));
            }
            registry
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: save then load reproduces the compiled registry.
    #[test]
    fn property_compiled_registry_round_trips(registry in compiled_registry()) {
        let dir = tempfile::tempdir().unwrap();
        let repo = TomlCompiledRegistryRepository::with_path(dir.path().join("c.toml"));

        repo.save(&registry).unwrap();
        prop_assert_eq!(repo.load().unwrap(), registry);
    }

    /// PROPERTY: save then load reproduces the deployed registry.
    #[test]
    fn property_deployed_registry_round_trips(registry in deployed_registry()) {
        let dir = tempfile::tempdir().unwrap();
        let repo = TomlDeployedRegistryRepository::with_path(dir.path().join("d.toml"));

        repo.save(&registry).unwrap();
        prop_assert_eq!(repo.load().unwrap(), registry);
    }
}
