//! Loading policies from configuration.

use pactguard::{ConditionRole, ContractPolicy, ContractViolation, Defect, Profile, ViolationPolicy};

#[test]
fn test_policy_from_json() {
    let policy: ContractPolicy = serde_json::from_str(r#"{"pre": "raise", "post": "skip"}"#).unwrap();
    assert_eq!(
        policy,
        ContractPolicy::new(ViolationPolicy::Raise, ViolationPolicy::Skip)
    );
}

#[test]
fn test_policy_names_are_lowercase() {
    let json = serde_json::to_string(&ContractPolicy::uniform(ViolationPolicy::Terminate)).unwrap();
    assert_eq!(json, r#"{"pre":"terminate","post":"terminate"}"#);
    assert!(serde_json::from_str::<ViolationPolicy>(r#""Raise""#).is_err());
}

#[test]
fn test_profile_fields_default_to_false() {
    let profile: Profile = serde_json::from_str(r#"{"optimized": true}"#).unwrap();
    assert_eq!(profile, Profile::release());

    let profile: Profile = serde_json::from_str("{}").unwrap();
    assert_eq!(profile, Profile::debug());
}

#[test]
fn test_profile_drives_contract_policy() {
    let release = Profile::release();
    assert_eq!(
        ContractPolicy::for_profile(&release),
        ContractPolicy::uniform(ViolationPolicy::Terminate)
    );

    let testing = Profile::debug().with_testing(true);
    let policy = ContractPolicy::for_profile(&testing).with_post(release.sensitive_policy());
    assert_eq!(policy.pre, ViolationPolicy::Raise);
    assert_eq!(policy.post, ViolationPolicy::Skip);
}

#[test]
fn test_defect_serializes_for_structured_reports() {
    let defect = Defect::Violation {
        role: ConditionRole::Precondition,
        violation: ContractViolation::new("input > 0", "src/f.rs", 12),
    };
    let value = serde_json::to_value(defect).unwrap();
    assert_eq!(value["kind"], "violation");
    assert_eq!(value["role"], "precondition");
    assert_eq!(value["violation"]["condition"], "input > 0");
    assert_eq!(value["violation"]["line"], 12);
}
