//! Disk image structures
//!
//! Shapes describing the cloning images the daemon can apply to drives, as
//! reported from the image store.

use serde::{Deserialize, Serialize};

/// Checksum of one file tree inside a partition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Md5SumData {
    pub root_path: String,
    pub md5_sum: String,
}

/// One partition inside a disk image
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartitionData {
    pub index: u32,
    pub start_sector: u64,
    pub end_sector: u64,
    pub filesystem: String,
    pub part_type: String,
    pub flags: Vec<String>,
}

/// A cloning image with its partition layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageData {
    pub name: String,
    pub part_table: String,
    pub partitions: Vec<PartitionData>,
    pub path: String,
}

impl PartitionData {
    /// Number of sectors the partition spans
    pub fn sector_count(&self) -> u64 {
        self.end_sector.saturating_sub(self.start_sector)
    }

    /// Validate the partition bounds
    pub fn validate(&self) -> crate::Result<()> {
        if self.start_sector > self.end_sector {
            return Err(crate::HddmonError::Validation(format!(
                "start sector {} is past end sector {}",
                self.start_sector, self.end_sector
            ))
            .into());
        }

        Ok(())
    }
}

impl ImageData {
    /// Validate the image description
    pub fn validate(&self) -> crate::Result<()> {
        if self.name.is_empty() {
            return Err(
                crate::HddmonError::Validation("Image name cannot be empty".to_string()).into(),
            );
        }

        for (index, partition) in self.partitions.iter().enumerate() {
            if let Err(e) = partition.validate() {
                let error_msg = e.to_string();
                let clean_msg = error_msg
                    .strip_prefix("Validation error: ")
                    .unwrap_or(&error_msg);

                return Err(crate::HddmonError::Validation(format!(
                    "Partition #{}: {}",
                    index + 1,
                    clean_msg
                ))
                .into());
            }
        }

        Ok(())
    }
}
