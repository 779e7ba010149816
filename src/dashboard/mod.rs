//! In-memory model of the vending dashboard page.
//!
//! The page is rendered from a [`DashboardSnapshot`]; every user action goes
//! through one of the [`Dashboard`] methods below.

use serde::Serialize;
use tracing::{debug, info};

pub mod chart;
pub mod error;
pub mod machine;
pub mod modal;
pub mod navigator;
pub mod notification;

use chart::{ChartView, WaterQualityCharts};
use error::DashboardError;
use machine::{
    ConfirmPrompt, DELETE_CONFIRMATION_MESSAGE, DeleteOutcome, MachineForm, MachineId,
    MachineRegistry, MachineRow,
};
use modal::{EditState, MachineModal};
use navigator::{SectionNavigator, SectionSpec, SectionView};
use notification::{ClickTarget, Notification, NotificationDropdown, NotificationFeed, NotificationLevel};

#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub sections: Vec<SectionSpec>,
    pub notification_capacity: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            sections: navigator::default_sections(),
            notification_capacity: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "machineId", rename_all = "camelCase")]
pub enum SubmitOutcome {
    Added(MachineId),
    Updated(MachineId),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsView {
    pub open: bool,
    pub entries: Vec<Notification>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub header_title: String,
    pub active_section: String,
    pub sections: Vec<SectionView>,
    pub notifications: NotificationsView,
    pub charts: Vec<ChartView>,
    pub machines: Vec<MachineRow>,
    pub modal: MachineModal,
}

pub struct Dashboard {
    dropdown: NotificationDropdown,
    feed: NotificationFeed,
    navigator: SectionNavigator,
    charts: WaterQualityCharts,
    machines: MachineRegistry,
    modal: MachineModal,
}

impl Dashboard {
    pub fn new(settings: DashboardSettings, charts: WaterQualityCharts) -> Self {
        Dashboard {
            dropdown: NotificationDropdown::default(),
            feed: NotificationFeed::new(settings.notification_capacity),
            navigator: SectionNavigator::new(settings.sections),
            charts,
            machines: MachineRegistry::default(),
            modal: MachineModal::default(),
        }
    }

    pub fn machines(&self) -> &MachineRegistry {
        &self.machines
    }

    pub fn modal(&self) -> &MachineModal {
        &self.modal
    }

    pub fn charts(&self) -> &WaterQualityCharts {
        &self.charts
    }

    pub fn notifications(&self) -> NotificationsView {
        NotificationsView {
            open: self.dropdown.is_open(),
            entries: self.feed.entries(),
        }
    }

    pub fn click_notifications(&mut self, target: ClickTarget) -> bool {
        let open = self.dropdown.click(target);
        debug!(?target, open, "Notification dropdown clicked.");
        open
    }

    pub fn navigate(&mut self, section_id: &str) -> String {
        let title = self.navigator.navigate(section_id);
        debug!(section = %section_id, %title, "Navigated to section.");
        title
    }

    pub fn open_add_modal(&mut self) {
        self.modal.open_add();
    }

    pub fn open_edit_modal(&mut self, id: MachineId) -> Result<(), DashboardError> {
        let record = self
            .machines
            .get(id)
            .ok_or(DashboardError::MachineNotFound(id))?;
        self.modal.open_edit(record);
        Ok(())
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    /// Saves the modal form. The modal is closed whatever the outcome.
    pub fn submit_machine(&mut self, form: MachineForm) -> Result<SubmitOutcome, DashboardError> {
        let form = form.trimmed();
        let edit = self.modal.edit_state();
        self.modal.close();

        match edit {
            EditState::Editing(id) => {
                let record = self.machines.update(id, form)?;
                info!(machine_id = %id, name = %record.name, status = %record.status, "Vending machine updated.");
                let message = format!("Machine \"{}\" updated", record.name);
                self.feed.push(NotificationLevel::Info, message);
                Ok(SubmitOutcome::Updated(id))
            }
            EditState::Idle => {
                let record = self.machines.insert(form);
                let id = record.id;
                info!(machine_id = %id, name = %record.name, status = %record.status, "Vending machine added.");
                let message = format!("Machine \"{}\" added", record.name);
                self.feed.push(NotificationLevel::Info, message);
                Ok(SubmitOutcome::Added(id))
            }
        }
    }

    pub fn delete_machine<P: ConfirmPrompt + ?Sized>(
        &mut self,
        id: MachineId,
        prompt: &P,
    ) -> Result<DeleteOutcome, DashboardError> {
        if self.machines.get(id).is_none() {
            return Err(DashboardError::MachineNotFound(id));
        }
        if !prompt.confirm(DELETE_CONFIRMATION_MESSAGE) {
            debug!(machine_id = %id, "Delete declined.");
            return Ok(DeleteOutcome::Declined);
        }

        let removed = self.machines.remove(id)?;
        if self.modal.edit_state() == EditState::Editing(id) {
            self.modal.close();
        }
        info!(machine_id = %id, name = %removed.name, "Vending machine deleted.");
        self.feed.push(
            NotificationLevel::Warning,
            format!("Machine \"{}\" deleted", removed.name),
        );
        Ok(DeleteOutcome::Deleted)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            header_title: self.navigator.header_title(),
            active_section: self.navigator.active().to_string(),
            sections: self.navigator.sections(),
            notifications: self.notifications(),
            charts: self.charts.views(),
            machines: self.machines.rows(),
            modal: self.modal.clone(),
        }
    }
}
