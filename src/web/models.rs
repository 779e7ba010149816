use serde::{Deserialize, Serialize};

use crate::dashboard::SubmitOutcome;
use crate::dashboard::machine::{DeleteOutcome, MachineRow};
use crate::dashboard::notification::ClickTarget;

#[derive(Debug, Deserialize)]
pub struct NotificationClickRequest {
    pub target: ClickTarget,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationClickResponse {
    pub open: bool,
}

#[derive(Debug, Deserialize)]
pub struct NavigationRequest {
    pub section: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationResponse {
    pub active_section: String,
    pub header_title: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteMachineQuery {
    /// Answer to the delete confirmation. Missing means declined.
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMachineResponse {
    pub outcome: DeleteOutcome,
    pub remaining: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitMachineResponse {
    #[serde(flatten)]
    pub outcome: SubmitOutcome,
    pub machine: MachineRow,
}
