//! Farm and field management page
//!
//! Holds the farm and field lists plus one draft per form. A form whose
//! selected pointer is unset is in create mode; set means edit mode.
//! Write failures are logged and swallowed so the dialog stays open with
//! whatever was typed.

use shared::{
    payload_issues, Farm, FarmDraft, FarmInput, FarmPayload, Field, FieldDraft, FieldInput,
    FieldPayload,
};

use crate::api::ApiClient;

/// Which form a dialog belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Farm,
    Field,
}

/// An entity opened for editing
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Farm(Farm),
    Field(Field),
}

/// What a submit did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
    /// The request failed; the dialog is still open
    Failed,
    /// No dialog was open
    NothingOpen,
}

/// Farm management page state
#[derive(Debug, Default)]
pub struct FarmManagement {
    farms: Vec<Farm>,
    fields: Vec<Field>,
    farm_draft: FarmDraft,
    field_draft: FieldDraft,
    selected_farm: Option<Farm>,
    selected_field: Option<Field>,
    open_dialog: Option<FormKind>,
}

impl FarmManagement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn farms(&self) -> &[Farm] {
        &self.farms
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Fields belonging to one farm
    pub fn fields_of(&self, farm_id: i64) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(move |f| f.farm_id == farm_id)
    }

    pub fn farm_draft(&self) -> &FarmDraft {
        &self.farm_draft
    }

    pub fn field_draft(&self) -> &FieldDraft {
        &self.field_draft
    }

    pub fn selected_farm(&self) -> Option<&Farm> {
        self.selected_farm.as_ref()
    }

    pub fn selected_field(&self) -> Option<&Field> {
        self.selected_field.as_ref()
    }

    pub fn open_dialog(&self) -> Option<FormKind> {
        self.open_dialog
    }

    /// True when the given form would update rather than create
    pub fn is_editing(&self, kind: FormKind) -> bool {
        match kind {
            FormKind::Farm => self.selected_farm.is_some(),
            FormKind::Field => self.selected_field.is_some(),
        }
    }

    /// Fetch both lists. A failed fetch leaves that list as it was.
    pub async fn load(&mut self, api: &ApiClient) {
        self.refresh_farms(api).await;
        self.refresh_fields(api).await;
    }

    async fn refresh_farms(&mut self, api: &ApiClient) {
        match api.list_farms().await {
            Ok(farms) => {
                tracing::debug!(count = farms.len(), "farms loaded");
                self.farms = farms;
            }
            Err(e) => tracing::error!("Error fetching farms: {}", e),
        }
    }

    async fn refresh_fields(&mut self, api: &ApiClient) {
        match api.list_fields().await {
            Ok(fields) => {
                tracing::debug!(count = fields.len(), "fields loaded");
                self.fields = fields;
            }
            Err(e) => tracing::error!("Error fetching fields: {}", e),
        }
    }

    /// Open an empty form. A new field keeps the selected farm as its parent.
    pub fn begin_create(&mut self, kind: FormKind) {
        self.reset(kind);
        self.open_dialog = Some(kind);
    }

    /// Open a form pre-filled from an existing entity
    pub fn begin_edit(&mut self, entity: Entity) {
        match entity {
            Entity::Farm(farm) => {
                self.farm_draft = FarmDraft::from(&farm);
                self.selected_farm = Some(farm);
                self.open_dialog = Some(FormKind::Farm);
            }
            Entity::Field(field) => {
                self.field_draft = FieldDraft::from(&field);
                self.selected_farm = self.farms.iter().find(|f| f.id == field.farm_id).cloned();
                self.selected_field = Some(field);
                self.open_dialog = Some(FormKind::Field);
            }
        }
    }

    /// Pick the farm new fields are attached to
    pub fn select_farm(&mut self, farm: Farm) {
        self.selected_farm = Some(farm);
    }

    pub fn update_farm(&mut self, input: FarmInput, value: impl Into<String>) {
        self.farm_draft.set(input, value);
    }

    pub fn update_field(&mut self, input: FieldInput, value: impl Into<String>) {
        self.field_draft.set(input, value);
    }

    /// Close the open dialog and drop its draft
    pub fn cancel(&mut self) {
        if let Some(kind) = self.open_dialog.take() {
            self.reset(kind);
        }
    }

    fn reset(&mut self, kind: FormKind) {
        match kind {
            FormKind::Farm => {
                self.farm_draft = FarmDraft::default();
                self.selected_farm = None;
            }
            FormKind::Field => {
                self.field_draft = FieldDraft::default();
                self.selected_field = None;
            }
        }
    }

    /// Body the farm form would send right now
    pub fn farm_payload(&self) -> FarmPayload {
        self.farm_draft.to_payload(self.selected_farm.as_ref().map(|f| f.id))
    }

    /// Body the field form would send right now
    pub fn field_payload(&self) -> FieldPayload {
        // An edited field stays under its own farm
        let farm_id = match &self.selected_field {
            Some(field) => Some(field.farm_id),
            None => self.selected_farm.as_ref().map(|f| f.id),
        };
        self.field_draft.to_payload(self.selected_field.as_ref().map(|f| f.id), farm_id)
    }

    /// Save the open form, then re-fetch its list and return to create mode
    pub async fn submit(&mut self, api: &ApiClient) -> SaveOutcome {
        match self.open_dialog {
            Some(FormKind::Farm) => self.submit_farm(api).await,
            Some(FormKind::Field) => self.submit_field(api).await,
            None => SaveOutcome::NothingOpen,
        }
    }

    async fn submit_farm(&mut self, api: &ApiClient) -> SaveOutcome {
        let payload = self.farm_payload();
        warn_on_issues("farm", &payload_issues(&payload));

        let editing = payload.id.is_some();
        let saved = if editing {
            api.update_farm(&payload).await
        } else {
            api.create_farm(&payload).await
        };

        match saved {
            Ok(farm) => {
                tracing::info!(farm_id = farm.id, editing, "farm saved");
                self.refresh_farms(api).await;
                self.open_dialog = None;
                self.reset(FormKind::Farm);
                outcome(editing)
            }
            Err(e) => {
                tracing::error!("Error saving farm: {}", e);
                SaveOutcome::Failed
            }
        }
    }

    async fn submit_field(&mut self, api: &ApiClient) -> SaveOutcome {
        let payload = self.field_payload();
        warn_on_issues("field", &payload_issues(&payload));

        let editing = payload.id.is_some();
        let saved = if editing {
            api.update_field(&payload).await
        } else {
            api.create_field(&payload).await
        };

        match saved {
            Ok(field) => {
                tracing::info!(
                    field_id = field.id,
                    farm_id = field.farm_id,
                    editing,
                    "field saved"
                );
                self.refresh_fields(api).await;
                self.open_dialog = None;
                self.reset(FormKind::Field);
                outcome(editing)
            }
            Err(e) => {
                tracing::error!("Error saving field: {}", e);
                SaveOutcome::Failed
            }
        }
    }
}

fn outcome(editing: bool) -> SaveOutcome {
    if editing {
        SaveOutcome::Updated
    } else {
        SaveOutcome::Created
    }
}

fn warn_on_issues(kind: &str, issues: &[String]) {
    for issue in issues {
        tracing::warn!(kind, %issue, "payload may be rejected by the backend");
    }
}
