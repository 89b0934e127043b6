//! Scan payloads and mode dispatch.
//!
//! The host reports each barcode scan as an item plus a mode string
//! (`add`, `remove` or `return`). Everything keyed on the mode goes through the
//! exhaustive matches here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MotionError, Result};
use crate::planner::Direction;

/// Demand tier used by slot assignment. Items without one count as medium.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Demand {
    High,
    #[default]
    Medium,
    Low,
}

/// Scanned item as sent by the host.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ScanItem {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "assignedLocation")]
    pub assigned_location: Option<String>,
    #[serde(default)]
    pub demand: Option<Demand>,
}

impl ScanItem {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.assigned_location = Some(location.to_string());
        self
    }

    pub fn with_demand(mut self, demand: Demand) -> Self {
        self.demand = Some(demand);
        self
    }

    /// Display name, falling back to the id.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(MotionError::MalformedScan {
                reason: "missing item id".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ScanMode {
    #[serde(rename = "add")]
    StockIn,
    #[serde(rename = "remove")]
    StockOut,
    #[serde(rename = "return")]
    Return,
}

impl ScanMode {
    pub fn direction(self) -> Direction {
        match self {
            ScanMode::StockIn | ScanMode::Return => Direction::Outbound,
            ScanMode::StockOut => Direction::Inbound,
        }
    }

    /// Box colour (0xRRGGBB).
    pub fn color(self) -> u32 {
        match self {
            ScanMode::StockIn => 0x00ffcc,
            ScanMode::StockOut => 0xff3333,
            ScanMode::Return => 0xffaa00,
        }
    }

    /// Status text shown once the box arrives.
    pub fn status_label(self) -> &'static str {
        match self {
            ScanMode::StockIn => "Restocked",
            ScanMode::StockOut => "Dispatched",
            ScanMode::Return => "Processing Return",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScanMode::StockIn => "add",
            ScanMode::StockOut => "remove",
            ScanMode::Return => "return",
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanMode {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "add" => Ok(ScanMode::StockIn),
            "remove" => Ok(ScanMode::StockOut),
            "return" => Ok(ScanMode::Return),
            other => Err(MotionError::UnknownMode {
                mode: other.to_string(),
            }),
        }
    }
}
