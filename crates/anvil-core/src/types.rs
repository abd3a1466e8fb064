//! Template request types
//!
//! The request is the transient input to one generation run. Field names
//! follow the camelCase wire format the operator tooling submits, so a
//! request captured from the web form deserializes unchanged.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Deployment environments a bundle can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    It,
    Uat,
    Prod,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Dev => write!(f, "dev"),
            Environment::It => write!(f, "it"),
            Environment::Uat => write!(f, "uat"),
            Environment::Prod => write!(f, "prod"),
        }
    }
}

impl Environment {
    /// Whether change-ticket tracking applies to this environment
    pub fn requires_assignment_group(&self) -> bool {
        matches!(self, Environment::Uat | Environment::Prod)
    }
}

/// Target operating system platforms
///
/// Serialized in capitalized form because the platform name is spliced
/// verbatim into generated role paths and job names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OsPlatform {
    Linux,
    Windows,
}

impl std::fmt::Display for OsPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OsPlatform::Linux => write!(f, "Linux"),
            OsPlatform::Windows => write!(f, "Windows"),
        }
    }
}

/// One cluster of target hosts sharing a role set and playbook
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmGroup {
    /// Group number, unique within the request (1-based)
    pub group_number: u32,

    /// Optional region tag; empty or absent means "no region"
    #[serde(default)]
    pub region: Option<String>,

    /// Target hostnames in inventory order
    pub hostnames: Vec<String>,

    /// Role IDs in execution order
    pub roles: Vec<i64>,

    /// Platform override for this group; defaults to the request platform
    #[serde(default)]
    pub os_platform: Option<OsPlatform>,
}

impl VmGroup {
    /// Region key for grouping; `None` and the empty string collapse to ""
    pub fn region_key(&self) -> &str {
        self.region.as_deref().unwrap_or("")
    }

    /// Platform this group's role variables resolve against
    pub fn effective_platform(&self, request_platform: OsPlatform) -> OsPlatform {
        self.os_platform.unwrap_or(request_platform)
    }
}

/// One bundle-generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRequest {
    pub environment: Environment,
    pub os_platform: OsPlatform,
    pub vm_groups: Vec<VmGroup>,

    // Application metadata, emitted into every pipeline job
    pub metta_application: String,
    pub metta_component: String,
    pub shield_team: String,
    pub app_context_subscription_name: String,
    pub app_context_name: String,
    pub arm_subscription_id: String,

    /// Source vault path for LDAP secret replication
    #[serde(default)]
    pub source_path: Option<String>,

    /// Target identifier for LDAP secret replication
    #[serde(default)]
    pub target_identifier: Option<String>,

    /// Change-ticket assignment group, only honored for uat/prod
    #[serde(default)]
    pub assignment_group: Option<String>,
}

impl TemplateRequest {
    /// Parse a request from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Parse a request from a JSON document
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Validate structural requirements before generation is attempted
    ///
    /// Enum-typed fields are already enforced at parse time; this checks
    /// the rules the type system cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.vm_groups.is_empty() {
            return Err(Error::invalid_request("at least one VM group is required"));
        }

        for group in &self.vm_groups {
            if group.group_number == 0 {
                return Err(Error::invalid_request(
                    "VM group numbers must be positive",
                ));
            }
            if group.hostnames.is_empty() {
                return Err(Error::invalid_request(format!(
                    "VM group {} has no hostnames",
                    group.group_number
                )));
            }
            if group.roles.is_empty() {
                return Err(Error::invalid_request(format!(
                    "VM group {} has no roles",
                    group.group_number
                )));
            }
        }

        require_field("mettaApplication", &self.metta_application)?;
        require_field("mettaComponent", &self.metta_component)?;
        require_field("shieldTeam", &self.shield_team)?;
        require_field(
            "appContextSubscriptionName",
            &self.app_context_subscription_name,
        )?;
        require_field("appContextName", &self.app_context_name)?;
        require_field("armSubscriptionId", &self.arm_subscription_id)?;

        Ok(())
    }
}

fn require_field(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_request(format!("{name} is required")));
    }
    Ok(())
}

/// Returns the value of an optional field only when it is actually supplied
/// (present and non-empty).
pub fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> TemplateRequest {
        TemplateRequest {
            environment: Environment::Dev,
            os_platform: OsPlatform::Linux,
            vm_groups: vec![VmGroup {
                group_number: 1,
                region: None,
                hostnames: vec!["host1".to_string()],
                roles: vec![5],
                os_platform: None,
            }],
            metta_application: "billing".to_string(),
            metta_component: "api".to_string(),
            shield_team: "payments".to_string(),
            app_context_subscription_name: "sub-name".to_string(),
            app_context_name: "ctx-name".to_string(),
            arm_subscription_id: "0000-1111".to_string(),
            source_path: None,
            target_identifier: None,
            assignment_group: None,
        }
    }

    #[test]
    fn test_validate_accepts_complete_request() {
        assert!(sample_request().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_vm_groups() {
        let mut request = sample_request();
        request.vm_groups.clear();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_group_without_hostnames() {
        let mut request = sample_request();
        request.vm_groups[0].hostnames.clear();
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("hostnames"));
    }

    #[test]
    fn test_validate_rejects_group_without_roles() {
        let mut request = sample_request();
        request.vm_groups[0].roles.clear();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_metadata() {
        let mut request = sample_request();
        request.arm_subscription_id = "   ".to_string();
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("armSubscriptionId"));
    }

    #[test]
    fn test_effective_platform_defaults_to_request() {
        let request = sample_request();
        assert_eq!(
            request.vm_groups[0].effective_platform(request.os_platform),
            OsPlatform::Linux
        );

        let mut group = request.vm_groups[0].clone();
        group.os_platform = Some(OsPlatform::Windows);
        assert_eq!(
            group.effective_platform(request.os_platform),
            OsPlatform::Windows
        );
    }

    #[test]
    fn test_region_key_collapses_empty() {
        let mut group = sample_request().vm_groups[0].clone();
        assert_eq!(group.region_key(), "");
        group.region = Some(String::new());
        assert_eq!(group.region_key(), "");
        group.region = Some("cus".to_string());
        assert_eq!(group.region_key(), "cus");
    }

    #[test]
    fn test_from_yaml_camel_case() {
        let yaml = r#"
environment: uat
osPlatform: Windows
vmGroups:
  - groupNumber: 1
    region: cus
    hostnames: [vm1, vm2]
    roles: [3, 7]
mettaApplication: billing
mettaComponent: api
shieldTeam: payments
appContextSubscriptionName: sub
appContextName: ctx
armSubscriptionId: arm-1
assignmentGroup: CHG0001
"#;
        let request = TemplateRequest::from_yaml(yaml).unwrap();
        assert_eq!(request.environment, Environment::Uat);
        assert_eq!(request.os_platform, OsPlatform::Windows);
        assert_eq!(request.vm_groups[0].region.as_deref(), Some("cus"));
        assert_eq!(request.vm_groups[0].roles, vec![3, 7]);
        assert_eq!(request.assignment_group.as_deref(), Some("CHG0001"));
    }

    #[test]
    fn test_from_json_matches_wire_format() {
        let json = r#"{
            "environment": "dev",
            "osPlatform": "Linux",
            "vmGroups": [{"groupNumber": 1, "hostnames": ["h1"], "roles": [5]}],
            "mettaApplication": "app",
            "mettaComponent": "comp",
            "shieldTeam": "team",
            "appContextSubscriptionName": "sub",
            "appContextName": "ctx",
            "armSubscriptionId": "arm"
        }"#;
        let request = TemplateRequest::from_json(json).unwrap();
        assert_eq!(request.environment, Environment::Dev);
        assert!(request.source_path.is_none());
    }

    #[test]
    fn test_supplied_filters_empty() {
        assert_eq!(supplied(&None), None);
        assert_eq!(supplied(&Some(String::new())), None);
        assert_eq!(supplied(&Some("path".to_string())), Some("path"));
    }

    #[test]
    fn test_environment_display() {
        assert_eq!(Environment::Dev.to_string(), "dev");
        assert_eq!(Environment::Prod.to_string(), "prod");
    }

    #[test]
    fn test_requires_assignment_group() {
        assert!(!Environment::Dev.requires_assignment_group());
        assert!(!Environment::It.requires_assignment_group());
        assert!(Environment::Uat.requires_assignment_group());
        assert!(Environment::Prod.requires_assignment_group());
    }
}
