use itertools::Itertools;
use serde::Serialize;
use std::collections::HashSet;

use crate::domain::ZoneRecord;
use crate::error::EnvelopeError;

/// Validated thermal zoning table, in file order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneTable {
    records: Vec<ZoneRecord>,
}

impl ZoneTable {
    /// Commune names must be unique across the table.
    pub fn new(records: Vec<ZoneRecord>) -> Result<Self, EnvelopeError> {
        let mut seen = HashSet::new();
        for record in &records {
            record.validate()?;
            if !seen.insert(record.commune.as_str()) {
                return Err(EnvelopeError::Configuration(format!(
                    "commune '{}' appears more than once in the zone table",
                    record.commune
                )));
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[ZoneRecord] {
        &self.records
    }

    pub fn find(&self, commune: &str) -> Option<&ZoneRecord> {
        self.records.iter().find(|r| r.commune == commune)
    }

    /// Distinct regions, in table order.
    pub fn regions(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.region.as_str()).unique().collect()
    }

    /// Communes of one region, in table order.
    pub fn communes(&self, region: &str) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| r.region == region)
            .map(|r| r.commune.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
