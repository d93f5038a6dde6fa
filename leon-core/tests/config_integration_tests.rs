use anyhow::Result;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

use leon_core::config::{RuleSet, SanitizerRecord};
use leon_core::{RuleKind, SanitizerRegistry};

#[test]
fn test_load_default_rules() {
    let rule_set = RuleSet::load_default_rules().unwrap();
    assert_eq!(rule_set.rules.len(), 2);

    let wt_mc = rule_set.find("wt_mc").unwrap();
    assert_eq!(wt_mc.kind, RuleKind::Parameter);
    assert_eq!(wt_mc.parameter_name.as_deref(), Some("wt_mc"));
    assert_eq!(wt_mc.description, "Webtrekk");

    let ga_utm = rule_set.find("ga_* & utm_*").unwrap();
    assert_eq!(ga_utm.kind, RuleKind::Pattern);
    assert_eq!(ga_utm.pattern.as_deref(), Some("[?&](?:ga|utm)_[^=]*=.[^&]*"));
}

#[test]
fn test_load_from_yaml_file() -> Result<()> {
    let yaml_content = r#"
rules:
  - kind: parameter
    name: fbclid
    description: "Facebook click identifier"
    parameter_name: fbclid
  - kind: pattern
    name: mailchimp
    pattern: "[?&]mc_(?:cid|eid)=[^&]*"
    enabled: false
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let rule_set = RuleSet::load_from_file(file.path())?;

    assert_eq!(rule_set.rules.len(), 2);
    assert_eq!(rule_set.rules[0].name, "fbclid");
    assert!(rule_set.rules[0].enabled);
    assert_eq!(rule_set.rules[1].kind, RuleKind::Pattern);
    assert!(!rule_set.rules[1].enabled);
    Ok(())
}

#[test]
fn test_load_from_json_file() -> Result<()> {
    let json_content = r#"{"rules":[{"kind":"parameter","name":"gclid","parameter_name":"gclid"}]}"#;
    let mut file = Builder::new().suffix(".json").tempfile()?;
    file.write_all(json_content.as_bytes())?;

    let rule_set = RuleSet::load_from_file(file.path())?;
    assert_eq!(rule_set.rules, vec![SanitizerRecord::parameter("gclid", "", "gclid")]);
    Ok(())
}

#[test]
fn test_load_from_file_rejects_invalid_rules() -> Result<()> {
    let yaml_content = r#"
rules:
  - kind: pattern
    name: broken
    pattern: "(unclosed"
  - kind: parameter
    name: broken
    parameter_name: ""
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;

    let err = RuleSet::load_from_file(file.path()).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Rule validation failed"));
    assert!(message.contains("Duplicate rule name found: 'broken'."));
    assert!(message.contains("empty `parameter_name`"));
    Ok(())
}

#[test]
fn test_load_missing_file_fails_with_context() {
    let err = RuleSet::load_from_file("/definitely/not/here/rules.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read rules file"));
}

#[test]
fn test_save_and_reload_user_records() -> Result<()> {
    let mut registry = SanitizerRegistry::with_defaults()?;
    registry.add_user_sanitizer(RuleKind::Parameter, "fbclid", "Facebook", "fbclid")?;
    registry.add_user_sanitizer(RuleKind::Pattern, "igshid", "Instagram", "[?&]igshid=[^&]*")?;
    registry.set_enabled("igshid", false)?;

    for suffix in [".yaml", ".json"] {
        let file = Builder::new().suffix(suffix).tempfile()?;
        registry.user_records().save_to_file(file.path())?;

        let reloaded = RuleSet::load_from_file(file.path())?;
        assert_eq!(reloaded, registry.user_records());

        let rebuilt = SanitizerRegistry::with_user_rules(&reloaded)?;
        let names: Vec<&str> = rebuilt.list().map(|e| e.sanitizer.name()).collect();
        assert_eq!(names, vec!["wt_mc", "ga_* & utm_*", "fbclid", "igshid"]);
        assert!(!rebuilt.get("igshid").unwrap().enabled);
    }
    Ok(())
}

#[test]
fn test_saved_yaml_omits_the_unused_value_field() -> Result<()> {
    let rule_set = RuleSet {
        rules: vec![SanitizerRecord::parameter("fbclid", "", "fbclid")],
    };
    let yaml = rule_set.to_string_for(std::path::Path::new("rules.yaml"))?;
    assert!(yaml.contains("parameter_name: fbclid"));
    assert!(!yaml.contains("pattern"));
    Ok(())
}
