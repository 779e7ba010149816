use serde::Serialize;

use crate::dashboard::machine::{MachineForm, MachineId, MachineRecord};

pub const ADD_MACHINE_TITLE: &str = "Tambah Mesin Vending";
pub const EDIT_MACHINE_TITLE: &str = "Edit Mesin Vending";

/// Which record, if any, a submit will overwrite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "machineId", rename_all = "camelCase")]
pub enum EditState {
    #[default]
    Idle,
    Editing(MachineId),
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineModal {
    visible: bool,
    title: String,
    form: MachineForm,
    edit: EditState,
}

impl MachineModal {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn form(&self) -> &MachineForm {
        &self.form
    }

    pub fn edit_state(&self) -> EditState {
        self.edit
    }

    pub fn open_add(&mut self) {
        self.title = ADD_MACHINE_TITLE.to_string();
        self.form = MachineForm::default();
        self.edit = EditState::Idle;
        self.visible = true;
    }

    pub fn open_edit(&mut self, record: &MachineRecord) {
        self.title = EDIT_MACHINE_TITLE.to_string();
        self.form = MachineForm::from_record(record);
        self.edit = EditState::Editing(record.id);
        self.visible = true;
    }

    /// Hides the modal, clears the form and leaves edit mode.
    pub fn close(&mut self) {
        self.visible = false;
        self.form = MachineForm::default();
        self.edit = EditState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::machine::MachineStatus;

    fn record() -> MachineRecord {
        MachineRecord {
            id: MachineId(4),
            name: "Mesin Lobi".to_string(),
            location: "Gedung A".to_string(),
            status: MachineStatus::Maintenance,
        }
    }

    #[test]
    fn test_open_edit_prefills_form() {
        let mut modal = MachineModal::default();
        modal.open_edit(&record());

        assert!(modal.is_visible());
        assert_eq!(modal.title, EDIT_MACHINE_TITLE);
        assert_eq!(modal.form().name, "Mesin Lobi");
        assert_eq!(modal.form().status, "Maintenance");
        assert_eq!(modal.edit_state(), EditState::Editing(MachineId(4)));
    }

    #[test]
    fn test_open_add_after_edit_resets_state() {
        let mut modal = MachineModal::default();
        modal.open_edit(&record());
        modal.open_add();

        assert_eq!(modal.title, ADD_MACHINE_TITLE);
        assert_eq!(modal.form(), &MachineForm::default());
        assert_eq!(modal.edit_state(), EditState::Idle);
    }

    #[test]
    fn test_close_clears_everything_but_title() {
        let mut modal = MachineModal::default();
        modal.open_edit(&record());
        modal.close();

        assert!(!modal.is_visible());
        assert_eq!(modal.form(), &MachineForm::default());
        assert_eq!(modal.edit_state(), EditState::Idle);
    }
}
