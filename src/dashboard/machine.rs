use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dashboard::error::DashboardError;

pub const DELETE_CONFIRMATION_MESSAGE: &str =
    "Apakah Anda yakin ingin menghapus mesin vending ini?";

const BADGE_BASE_CLASSES: &str = "px-2 py-1 rounded";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MachineId(pub u32);

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Operational status of a vending machine.
///
/// Labels are the page's Indonesian ones; the English names are accepted as
/// aliases on input. Unknown labels are kept verbatim so they can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MachineStatus {
    Active,
    Inactive,
    Maintenance,
    Other(String),
}

impl MachineStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Active" | "Aktif" => MachineStatus::Active,
            "Inactive" | "Non-Aktif" => MachineStatus::Inactive,
            "Maintenance" => MachineStatus::Maintenance,
            other => MachineStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MachineStatus::Active => "Aktif",
            MachineStatus::Inactive => "Non-Aktif",
            MachineStatus::Maintenance => "Maintenance",
            MachineStatus::Other(raw) => raw,
        }
    }

    fn color_classes(&self) -> Option<&'static str> {
        match self {
            MachineStatus::Active => Some("bg-green-200 text-green-800"),
            MachineStatus::Inactive => Some("bg-gray-200 text-gray-800"),
            MachineStatus::Maintenance => Some("bg-yellow-200 text-yellow-800"),
            MachineStatus::Other(_) => None,
        }
    }

    pub fn badge(&self) -> StatusBadge {
        StatusBadge {
            color_classes: self.color_classes(),
            text: self.as_str().to_string(),
        }
    }
}

impl From<String> for MachineStatus {
    fn from(raw: String) -> Self {
        MachineStatus::parse(&raw)
    }
}

impl From<MachineStatus> for String {
    fn from(status: MachineStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBadge {
    pub color_classes: Option<&'static str>,
    pub text: String,
}

impl StatusBadge {
    /// Full class attribute for the badge `<span>`.
    pub fn class_list(&self) -> String {
        match self.color_classes {
            Some(colors) => format!("{colors} {BADGE_BASE_CLASSES}"),
            None => BADGE_BASE_CLASSES.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineRecord {
    pub id: MachineId,
    pub name: String,
    pub location: String,
    pub status: MachineStatus,
}

/// Field values of the add/edit modal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: String,
}

impl MachineForm {
    pub fn from_record(record: &MachineRecord) -> Self {
        MachineForm {
            name: record.name.clone(),
            location: record.location.clone(),
            status: record.status.as_str().to_string(),
        }
    }

    /// Name and location are trimmed, status is taken as submitted.
    pub fn trimmed(self) -> Self {
        MachineForm {
            name: self.name.trim().to_string(),
            location: self.location.trim().to_string(),
            status: self.status,
        }
    }
}

/// Asked before a machine is removed. Answering `false` cancels the delete.
pub trait ConfirmPrompt {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DeleteOutcome {
    Deleted,
    Declined,
}

/// A record together with its 1-based position in the table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineRow {
    pub position: usize,
    #[serde(flatten)]
    pub record: MachineRecord,
    pub badge_class: String,
    pub badge_text: String,
}

impl MachineRow {
    fn new(position: usize, record: &MachineRecord) -> Self {
        let badge = record.status.badge();
        MachineRow {
            position,
            record: record.clone(),
            badge_class: badge.class_list(),
            badge_text: badge.text,
        }
    }
}

/// Ordered in-memory list of machines. Ids come from a counter and are never reused.
#[derive(Debug, Clone)]
pub struct MachineRegistry {
    records: Vec<MachineRecord>,
    next_id: u32,
}

impl Default for MachineRegistry {
    fn default() -> Self {
        MachineRegistry {
            records: Vec::new(),
            next_id: 1,
        }
    }
}

impl MachineRegistry {
    pub fn records(&self) -> &[MachineRecord] {
        &self.records
    }

    pub fn get(&self, id: MachineId) -> Option<&MachineRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn insert(&mut self, form: MachineForm) -> &MachineRecord {
        let id = MachineId(self.next_id);
        self.next_id += 1;
        self.records.push(MachineRecord {
            id,
            name: form.name,
            location: form.location,
            status: MachineStatus::parse(&form.status),
        });
        &self.records[self.records.len() - 1]
    }

    pub fn update(
        &mut self,
        id: MachineId,
        form: MachineForm,
    ) -> Result<&MachineRecord, DashboardError> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(DashboardError::MachineNotFound(id))?;
        record.name = form.name;
        record.location = form.location;
        record.status = MachineStatus::parse(&form.status);
        Ok(&*record)
    }

    pub fn remove(&mut self, id: MachineId) -> Result<MachineRecord, DashboardError> {
        let index = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or(DashboardError::MachineNotFound(id))?;
        Ok(self.records.remove(index))
    }

    pub fn rows(&self) -> Vec<MachineRow> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| MachineRow::new(index + 1, record))
            .collect()
    }

    pub fn row(&self, id: MachineId) -> Option<MachineRow> {
        self.records
            .iter()
            .position(|record| record.id == id)
            .map(|index| MachineRow::new(index + 1, &self.records[index]))
    }
}
