//! S.M.A.R.T. report structures for drive health telemetry
//!
//! This module defines the attribute records and self-test capability types
//! that make up a drive's captured S.M.A.R.T. report, as produced by the
//! monitoring daemon on each polling cycle.

use serde::{Deserialize, Serialize};

/// Custom serialization module for Vec<TestCapability> to keep the wire format
/// stable: capabilities travel as an array of [name, supported] pairs.
mod test_capability_serde {
    use super::TestCapability;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(caps: &[TestCapability], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let vec: Vec<(&str, bool)> = caps
            .iter()
            .map(|c| (c.name.as_str(), c.supported))
            .collect();
        vec.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<TestCapability>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let vec: Vec<(String, bool)> = Vec::deserialize(deserializer)?;
        Ok(vec
            .into_iter()
            .map(|(name, supported)| TestCapability { name, supported })
            .collect())
    }
}

/// One self-test the drive does or does not support
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestCapability {
    /// Test name as reported by the drive (e.g., "short", "long")
    pub name: String,
    /// Whether the drive supports this test
    pub supported: bool,
}

/// One S.M.A.R.T. attribute record from a drive report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attribute {
    /// ATA attribute identifier (1-255)
    pub number: u8,
    /// ATA attribute flags bitfield
    pub flags: u16,
    /// Raw sensor value, vendor-specific width
    pub raw_value: i64,
    /// Failure boundary the normalized value is compared against
    pub threshold: i64,
    /// Attribute classification (e.g., "Pre-fail", "Old_age")
    pub attr_type: String,
    /// Update frequency tag (e.g., "Always", "Offline")
    pub updated_freq: String,
    /// Current normalized value
    pub value: i64,
    /// When the attribute last failed ("-" while healthy)
    pub when_failed: String,
    /// Worst normalized value ever recorded
    pub worst: i64,
}

/// A drive's captured S.M.A.R.T. report
///
/// Reports are immutable snapshots; the daemon replaces the whole report on
/// each capture rather than mutating fields in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Smart {
    /// When this report was captured (ISO 8601)
    pub last_captured: String,
    /// Attribute records in controller order
    pub attributes: Vec<Attribute>,
    /// Drive firmware revision
    pub firmware: String,
    /// Interface type (e.g., "sat", "nvme")
    pub interface: String,
    /// Informational messages emitted during the capture
    pub messages: Vec<String>,
    /// Whether the drive is S.M.A.R.T. capable
    pub smart_capable: bool,
    /// Whether S.M.A.R.T. is enabled on the drive
    pub smart_enabled: bool,
    /// Overall assessment (e.g., "PASS", "FAIL", "Warn")
    pub assessment: String,
    /// Self-test capabilities, pair-encoded on the wire
    #[serde(with = "test_capability_serde")]
    pub test_capabilities: Vec<TestCapability>,
}

impl Attribute {
    /// Validate a single attribute record
    ///
    /// Normalized values live in the 0-255 range defined by the ATA
    /// specification. Out-of-range telemetry still decodes; this check is
    /// what flags it.
    pub fn validate(&self) -> crate::Result<()> {
        if self.number == 0 {
            return Err(crate::HddmonError::Validation(
                "Attribute number must be at least 1".to_string(),
            )
            .into());
        }

        if !(0..=255).contains(&self.value) {
            return Err(crate::HddmonError::Validation(format!(
                "normalized value {} is outside the 0-255 range",
                self.value
            ))
            .into());
        }

        if !(0..=255).contains(&self.worst) {
            return Err(crate::HddmonError::Validation(format!(
                "worst value {} is outside the 0-255 range",
                self.worst
            ))
            .into());
        }

        if !(0..=255).contains(&self.threshold) {
            return Err(crate::HddmonError::Validation(format!(
                "threshold {} is outside the 0-255 range",
                self.threshold
            ))
            .into());
        }

        Ok(())
    }
}

impl Smart {
    /// Whether the drive supports the named self-test
    pub fn supports_test(&self, name: &str) -> bool {
        self.test_capabilities
            .iter()
            .any(|c| c.name == name && c.supported)
    }

    /// Look up an attribute record by its ATA identifier
    pub fn attribute(&self, number: u8) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.number == number)
    }

    /// Validate the report
    ///
    /// Attribute identifiers must be unique within one report, and every
    /// record must pass its own range checks.
    pub fn validate(&self) -> crate::Result<()> {
        let mut numbers = std::collections::HashSet::new();
        for attribute in &self.attributes {
            if !numbers.insert(attribute.number) {
                return Err(crate::HddmonError::Validation(format!(
                    "Duplicate attribute number {} in report",
                    attribute.number
                ))
                .into());
            }
        }

        for (index, attribute) in self.attributes.iter().enumerate() {
            if let Err(e) = attribute.validate() {
                let error_msg = e.to_string();
                let clean_msg = error_msg
                    .strip_prefix("Validation error: ")
                    .unwrap_or(&error_msg);

                return Err(crate::HddmonError::Validation(format!(
                    "Attribute #{} (id: {}): {}",
                    index + 1,
                    attribute.number,
                    clean_msg
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_attribute(number: u8) -> Attribute {
        Attribute {
            number,
            flags: 50,
            raw_value: 0,
            threshold: 36,
            attr_type: "Pre-fail".to_string(),
            updated_freq: "Always".to_string(),
            value: 100,
            when_failed: "-".to_string(),
            worst: 100,
        }
    }

    fn sample_smart() -> Smart {
        Smart {
            last_captured: "2020-03-01T18:22:08.925239".to_string(),
            attributes: vec![
                sample_attribute(5),
                sample_attribute(9),
                sample_attribute(194),
            ],
            firmware: "CC43".to_string(),
            interface: "sat".to_string(),
            messages: Vec::new(),
            smart_capable: true,
            smart_enabled: true,
            assessment: "PASS".to_string(),
            test_capabilities: vec![
                TestCapability {
                    name: "short".to_string(),
                    supported: true,
                },
                TestCapability {
                    name: "long".to_string(),
                    supported: true,
                },
                TestCapability {
                    name: "conveyance".to_string(),
                    supported: false,
                },
            ],
        }
    }

    #[test]
    fn test_attribute_wire_field_names() {
        let json = serde_json::to_string(&sample_attribute(5)).unwrap();
        assert_eq!(
            json,
            "{\"number\":5,\"flags\":50,\"raw_value\":0,\"threshold\":36,\
             \"attr_type\":\"Pre-fail\",\"updated_freq\":\"Always\",\
             \"value\":100,\"when_failed\":\"-\",\"worst\":100}"
        );
    }

    #[test]
    fn test_capabilities_pair_encoded() {
        let smart = sample_smart();
        let value = serde_json::to_value(&smart).unwrap();

        assert_eq!(value["test_capabilities"][0][0], "short");
        assert_eq!(value["test_capabilities"][0][1], true);
        assert_eq!(value["test_capabilities"][2][0], "conveyance");
        assert_eq!(value["test_capabilities"][2][1], false);

        let decoded: Smart = serde_json::from_value(value).unwrap();
        assert_eq!(decoded.test_capabilities, smart.test_capabilities);
    }

    #[test]
    fn test_attribute_order_preserved_through_round_trip() {
        let smart = sample_smart();
        let json = serde_json::to_string(&smart).unwrap();
        let decoded: Smart = serde_json::from_str(&json).unwrap();

        let numbers: Vec<u8> = decoded.attributes.iter().map(|a| a.number).collect();
        assert_eq!(numbers, vec![5, 9, 194]);
        assert_eq!(decoded, smart);
    }

    #[test]
    fn test_duplicate_attribute_numbers_flagged() {
        let mut smart = sample_smart();
        smart.attributes.push(sample_attribute(5));

        let err = smart.validate().unwrap_err().to_string();
        assert!(err.contains("Duplicate attribute number 5"));
    }

    #[test]
    fn test_out_of_range_normalized_value_flagged() {
        let mut smart = sample_smart();
        smart.attributes[0].value = 300;

        // Still representable and decodable; only validation complains
        let json = serde_json::to_string(&smart).unwrap();
        let decoded: Smart = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.attributes[0].value, 300);

        let err = smart.validate().unwrap_err().to_string();
        assert!(err.contains("normalized value"));
        assert!(err.contains("id: 5"));
    }

    #[test]
    fn test_supports_test_requires_both_presence_and_support() {
        let smart = sample_smart();
        assert!(smart.supports_test("short"));
        assert!(smart.supports_test("long"));
        assert!(!smart.supports_test("conveyance"));
        assert!(!smart.supports_test("selective"));
    }

    #[test]
    fn test_attribute_lookup() {
        let smart = sample_smart();
        assert_eq!(smart.attribute(9).map(|a| a.number), Some(9));
        assert!(smart.attribute(199).is_none());
    }
}
