use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use crate::error::PublishError;

/// Descriptor file name, relative to the project directory
pub const PACKAGE_FILE: &str = "package.json";

/// Kind of WeWeb package being published. Selects the upload namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    WwObject,
    Section,
}

impl ObjectType {
    /// Path segment of the control-plane collection for this type
    pub fn collection(&self) -> &'static str {
        match self {
            ObjectType::WwObject => "wwobjects",
            ObjectType::Section => "sectionbases",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::WwObject => "wwObject",
            ObjectType::Section => "section",
        }
    }
}

impl FromStr for ObjectType {
    type Err = PublishError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wwObject" => Ok(ObjectType::WwObject),
            "section" => Ok(ObjectType::Section),
            other => Err(PublishError::UnknownObjectType(other.to_string())),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `name` and `type` fields of `package.json`.
///
/// `kind` is kept as the raw string so a descriptor with an unsupported
/// type still loads; `object_type()` is where it gets rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    pub name: String,
    pub kind: String,
}

#[derive(Deserialize)]
struct RawPackage {
    #[serde(default)]
    name: Option<Value>,
    #[serde(rename = "type", default)]
    kind: Option<Value>,
}

fn non_empty_string(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

impl PackageDescriptor {
    /// Load `package.json` from `project_dir`.
    pub fn load(project_dir: &Path) -> Result<Self, PublishError> {
        let path = project_dir.join(PACKAGE_FILE);
        let contents = std::fs::read_to_string(&path).map_err(|_| {
            PublishError::ConfigInvalid(format!(
                "./{} not found or incorrect format.",
                PACKAGE_FILE
            ))
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, PublishError> {
        let raw: RawPackage = serde_json::from_str(contents).map_err(|_| {
            PublishError::ConfigInvalid(format!(
                "./{} not found or incorrect format.",
                PACKAGE_FILE
            ))
        })?;

        let name = non_empty_string(raw.name).ok_or_else(|| {
            PublishError::ConfigInvalid(format!("\"name\" not found in {}.", PACKAGE_FILE))
        })?;
        let kind = non_empty_string(raw.kind).ok_or_else(|| {
            PublishError::ConfigInvalid(format!("\"type\" not found in {}.", PACKAGE_FILE))
        })?;

        Ok(Self { name, kind })
    }

    pub fn object_type(&self) -> Result<ObjectType, PublishError> {
        self.kind.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_descriptor() {
        let desc = PackageDescriptor::parse(
            r#"{"name": "nav", "type": "section", "version": "1.0.0", "scripts": {}}"#,
        )
        .expect("valid descriptor");
        assert_eq!(desc.name, "nav");
        assert_eq!(desc.object_type().unwrap(), ObjectType::Section);
    }

    #[test]
    fn test_parse_missing_name() {
        let err = PackageDescriptor::parse(r#"{"type": "section"}"#).unwrap_err();
        assert!(matches!(err, PublishError::ConfigInvalid(ref m) if m.contains("\"name\"")));
    }

    #[test]
    fn test_parse_missing_type() {
        let err = PackageDescriptor::parse(r#"{"name": "nav"}"#).unwrap_err();
        assert!(matches!(err, PublishError::ConfigInvalid(ref m) if m.contains("\"type\"")));
    }

    #[test]
    fn test_parse_rejects_empty_and_non_string_fields() {
        assert!(PackageDescriptor::parse(r#"{"name": "", "type": "section"}"#).is_err());
        assert!(PackageDescriptor::parse(r#"{"name": 3, "type": "section"}"#).is_err());
        assert!(PackageDescriptor::parse(r#"{"name": "nav", "type": null}"#).is_err());
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = PackageDescriptor::parse("{ not json").unwrap_err();
        assert!(matches!(
            err,
            PublishError::ConfigInvalid(ref m) if m.contains("incorrect format")
        ));
    }

    #[test]
    fn test_unknown_type_loads_but_does_not_resolve() {
        let desc = PackageDescriptor::parse(r#"{"name": "nav", "type": "widget"}"#).unwrap();
        let err = desc.object_type().unwrap_err();
        assert!(matches!(err, PublishError::UnknownObjectType(ref t) if t == "widget"));
    }

    #[test]
    fn test_object_type_round_trips_through_str() {
        for t in [ObjectType::WwObject, ObjectType::Section] {
            assert_eq!(t.as_str().parse::<ObjectType>().unwrap(), t);
        }
        // Case matters
        assert!("WWOBJECT".parse::<ObjectType>().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PackageDescriptor::load(dir.path()).unwrap_err();
        assert!(matches!(err, PublishError::ConfigInvalid(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(PACKAGE_FILE),
            r#"{"name": "button", "type": "wwObject"}"#,
        )
        .unwrap();
        let desc = PackageDescriptor::load(dir.path()).unwrap();
        assert_eq!(desc.name, "button");
        assert_eq!(desc.object_type().unwrap(), ObjectType::WwObject);
    }
}
