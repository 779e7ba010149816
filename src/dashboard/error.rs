use thiserror::Error;

use crate::dashboard::machine::MachineId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    #[error("Machine not found: {0}")]
    MachineNotFound(MachineId),
}
