//! Fallback-chain tests: environment variables and the host property source

use std::collections::HashMap;

use changelog_params::{
    EngineSettings, ExpressionExpander, ParameterRegistry, PropertySource, ScopeNode,
};
use pretty_assertions::assert_eq;

struct HostProperties;

impl PropertySource for HostProperties {
    fn property(&self, key: &str) -> Option<String> {
        match key {
            "product.name" => Some("migrator".to_string()),
            "product.version" => Some("4.2".to_string()),
            _ => None,
        }
    }
}

#[test]
fn environment_variables_resolve_for_any_scope() {
    let registry = ParameterRegistry::new();
    let expected = std::env::var("PATH").ok();

    let scope = ScopeNode::new("doc.xml");
    assert_eq!(registry.get("PATH", None), expected);
    assert_eq!(registry.get("PATH", Some(&scope)), expected);
}

#[test]
fn stored_definitions_take_precedence_over_the_environment() {
    let mut registry = ParameterRegistry::new();
    registry.set("PATH", "overridden");

    assert_eq!(registry.get("PATH", None), Some("overridden".to_string()));
}

#[test]
fn host_property_source_is_the_last_fallback() {
    let mut registry = ParameterRegistry::new();
    registry.set_property_source(Box::new(HostProperties));

    assert_eq!(
        registry.get("product.name", None),
        Some("migrator".to_string())
    );
    assert_eq!(registry.get("product.flavor", None), None);
}

#[test]
fn property_backed_placeholders_expand() {
    let mut registry = ParameterRegistry::new();
    registry.set_property_source(Box::new(HostProperties));

    let expander = ExpressionExpander::new(&registry, &EngineSettings::default());
    assert_eq!(
        expander.expand("${product.name} ${product.version}", None).unwrap(),
        "migrator 4.2"
    );
}

#[test]
fn map_property_source_round_trips() {
    let mut properties = HashMap::new();
    properties.insert("region".to_string(), "eu-west-1".to_string());

    let mut registry = ParameterRegistry::new();
    registry.set_property_source(Box::new(properties));

    assert_eq!(registry.get("region", None), Some("eu-west-1".to_string()));
}
