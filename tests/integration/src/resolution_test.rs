//! End-to-end resolution test
//!
//! Exercises the complete flow a document loader drives: settings from a
//! TOML file -> scope tree assembly -> parameter registration -> template
//! expansion.

use std::fs;
use std::rc::Rc;

use changelog_params::{
    ContextExpression, EngineSettings, Error, ExpressionExpander, Labels, MissingPropertyMode,
    ParameterRegistry, PlatformList, ScopeNode,
};
use changelog_test_utils::h2_registry;
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

/// Write an engine settings file the way a host would ship one.
fn settings_file(content: &str) -> (TempDir, EngineSettings) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("engine.toml");
    fs::write(&path, content).unwrap();
    let settings = EngineSettings::load(&path).unwrap();
    (temp, settings)
}

/// Simulates loading this inclusion tree:
///
/// ```text
/// db/changelog-master.xml          (schema defined globally)
///  - db/tables/accounts.xml        (table.name=accounts, local)
///     - db/templates/audit.xml
///  - db/tables/orders.xml          (table.name=orders, local)
///     - db/templates/audit.xml
/// ```
struct LoadedTree {
    registry: ParameterRegistry,
    audit_under_accounts: Rc<ScopeNode>,
    audit_under_orders: Rc<ScopeNode>,
}

fn load_tree() -> LoadedTree {
    let mut registry = h2_registry();

    let master = ScopeNode::new("db/changelog-master.xml");
    registry.set("schema", "public");

    let mut branches = Vec::new();
    for (table_path, table_name) in [
        ("db/tables/accounts.xml", "accounts"),
        ("db/tables/orders.xml", "orders"),
    ] {
        let table = ScopeNode::new(table_path);
        table.set_parent(Rc::clone(&master));
        registry.set_filtered(
            "table.name",
            table_name,
            ContextExpression::parse("junit"),
            Labels::parse("junitLabel"),
            PlatformList::parse("baddb, h2"),
            false,
            Some(&table),
        );

        let audit = ScopeNode::new("db/templates/audit.xml");
        audit.set_parent(Rc::clone(&table));
        branches.push(audit);
    }

    let audit_under_orders = branches.pop().unwrap();
    let audit_under_accounts = branches.pop().unwrap();
    LoadedTree {
        registry,
        audit_under_accounts,
        audit_under_orders,
    }
}

#[test]
fn shared_template_expands_per_branch() {
    let (_temp, settings) = settings_file("missing_property_mode = \"THROW\"\n");
    let tree = load_tree();
    let expander = ExpressionExpander::new(&tree.registry, &settings);

    let template = "create table ${schema}.${table.name}_audit";
    assert_eq!(
        expander
            .expand(template, Some(&tree.audit_under_accounts))
            .unwrap(),
        "create table public.accounts_audit"
    );
    assert_eq!(
        expander
            .expand(template, Some(&tree.audit_under_orders))
            .unwrap(),
        "create table public.orders_audit"
    );
}

#[test]
fn local_values_stay_invisible_at_the_master_level() {
    let (_temp, settings) = settings_file("missing_property_mode = \"THROW\"\n");
    let tree = load_tree();
    let expander = ExpressionExpander::new(&tree.registry, &settings);

    let master = ScopeNode::new("db/changelog-master.xml");
    let err = expander
        .expand("${table.name}", Some(&master))
        .unwrap_err();
    assert!(matches!(err, Error::UnresolvedPlaceholder { ref name } if name == "table.name"));
}

#[rstest]
#[case("missing_property_mode = \"EMPTY\"\n", "value: ")]
#[case("missing_property_mode = \"PRESERVE\"\n", "value: ${nothing}")]
fn lenient_policies_from_the_settings_file_apply(
    #[case] content: &str,
    #[case] expected: &str,
) {
    let (_temp, settings) = settings_file(content);
    let tree = load_tree();
    let expander = ExpressionExpander::new(&tree.registry, &settings);

    assert_eq!(
        expander
            .expand("value: ${nothing}", Some(&tree.audit_under_accounts))
            .unwrap(),
        expected
    );
}

#[test]
fn escaped_markers_survive_expansion_end_to_end() {
    let (_temp, settings) =
        settings_file("missing_property_mode = \"THROW\"\nsupport_escaping = true\n");
    let tree = load_tree();
    let expander = ExpressionExpander::new(&tree.registry, &settings);

    assert_eq!(
        expander
            .expand(
                "insert into ${schema}.notes values ('${:schema}')",
                Some(&tree.audit_under_accounts)
            )
            .unwrap(),
        "insert into public.notes values ('${schema}')"
    );
}

#[test]
fn absent_settings_file_defaults_to_preserve() {
    let temp = TempDir::new().unwrap();
    let settings = EngineSettings::load(&temp.path().join("missing.toml")).unwrap();
    assert_eq!(settings.missing_property_mode, MissingPropertyMode::Preserve);

    let tree = load_tree();
    let expander = ExpressionExpander::new(&tree.registry, &settings);
    assert_eq!(
        expander
            .expand("${nothing}", Some(&tree.audit_under_accounts))
            .unwrap(),
        "${nothing}"
    );
}

/// Independent registries over the same scope tree do not observe each
/// other's definitions — isolation between runs is per-instance.
#[test]
fn independent_registries_are_isolated() {
    let scope = ScopeNode::new("db/changelog-master.xml");

    let mut first = ParameterRegistry::for_platform("h2");
    first.set("run.id", "first");
    let mut second = ParameterRegistry::for_platform("h2");
    second.set("run.id", "second");

    assert_eq!(first.get("run.id", Some(&scope)), Some("first".to_string()));
    assert_eq!(second.get("run.id", Some(&scope)), Some("second".to_string()));
}
