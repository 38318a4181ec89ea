// 📝 Create-vendor form: edit, validate, submit

use crate::client::{FetchError, VendorApi};
use crate::schema::{validate_form, ValidationError, VendorFormData};
use crate::vendor::{
    Criticality, ServiceCategory, Vendor, VendorPayload, VendorStatus, VendorType,
};

pub const SUCCESS_MESSAGE: &str = "Vendor Added";
pub const FAILURE_MESSAGE: &str = "Failed to add vendor. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Type,
    Criticality,
    Status,
    Contact,
    Service,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Name,
        FormField::Type,
        FormField::Criticality,
        FormField::Status,
        FormField::Contact,
        FormField::Service,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Vendor Name",
            FormField::Type => "Vendor Type",
            FormField::Criticality => "Criticality",
            FormField::Status => "Status",
            FormField::Contact => "Contact Email",
            FormField::Service => "Service Provided",
        }
    }

    /// Key used in validation errors for this field.
    pub fn key(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Type => "type",
            FormField::Criticality => "criticality",
            FormField::Status => "status",
            FormField::Contact => "contact",
            FormField::Service => "serviceProvided",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, FormField::Name | FormField::Contact)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Failure(String),
}

#[derive(Debug, Default)]
pub struct VendorForm {
    data: VendorFormData,
    focus: usize,
    errors: Vec<ValidationError>,
    notification: Option<Notification>,
    submitting: bool,
}

/// Step to the next (or previous) option, starting from the first when unset.
fn cycle<T: Copy + PartialEq>(all: &[T], current: Option<T>, forward: bool) -> Option<T> {
    let len = all.len();
    let idx = match current.and_then(|c| all.iter().position(|v| *v == c)) {
        None if forward => 0,
        None => len - 1,
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
    };
    all.get(idx).copied()
}

impl VendorForm {
    pub fn new() -> Self {
        VendorForm::default()
    }

    pub fn data(&self) -> &VendorFormData {
        &self.data
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn error_for(&self, field: FormField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field.key())
            .map(|e| e.message.as_str())
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn focused(&self) -> FormField {
        FormField::ALL[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FormField::ALL.len();
    }

    pub fn focus_previous(&mut self) {
        self.focus = (self.focus + FormField::ALL.len() - 1) % FormField::ALL.len();
    }

    /// Display value of a field ("" when unset).
    pub fn value(&self, field: FormField) -> String {
        let d = &self.data;
        match field {
            FormField::Name => d.name.clone(),
            FormField::Contact => d.contact.clone(),
            FormField::Type => d.vendor_type.map(|v| v.to_string()).unwrap_or_default(),
            FormField::Criticality => d.criticality.map(|v| v.to_string()).unwrap_or_default(),
            FormField::Status => d.status.map(|v| v.to_string()).unwrap_or_default(),
            FormField::Service => d.service_provided.map(|v| v.to_string()).unwrap_or_default(),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.data.name = name.into();
    }

    pub fn set_contact(&mut self, contact: impl Into<String>) {
        self.data.contact = contact.into();
    }

    pub fn set_vendor_type(&mut self, value: VendorType) {
        self.data.vendor_type = Some(value);
    }

    pub fn set_criticality(&mut self, value: Criticality) {
        self.data.criticality = Some(value);
    }

    pub fn set_status(&mut self, value: VendorStatus) {
        self.data.status = Some(value);
    }

    pub fn set_service(&mut self, value: ServiceCategory) {
        self.data.service_provided = Some(value);
    }

    /// Type into the focused text field; ignored on drop-downs.
    pub fn input_char(&mut self, c: char) {
        match self.focused() {
            FormField::Name => self.data.name.push(c),
            FormField::Contact => self.data.contact.push(c),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focused() {
            FormField::Name => {
                self.data.name.pop();
            }
            FormField::Contact => {
                self.data.contact.pop();
            }
            _ => {}
        }
    }

    /// Move the focused drop-down to its next/previous option.
    pub fn cycle_option(&mut self, forward: bool) {
        let focused = self.focused();
        let d = &mut self.data;
        match focused {
            FormField::Type => d.vendor_type = cycle(VendorType::ALL, d.vendor_type, forward),
            FormField::Criticality => {
                d.criticality = cycle(Criticality::ALL, d.criticality, forward)
            }
            FormField::Status => d.status = cycle(VendorStatus::ALL, d.status, forward),
            FormField::Service => {
                d.service_provided = cycle(ServiceCategory::ALL, d.service_provided, forward)
            }
            FormField::Name | FormField::Contact => {}
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate and hand back the payload to send. Returns `None` when the
    /// form is invalid or a submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<VendorPayload> {
        if self.submitting {
            return None;
        }
        self.notification = None;

        match validate_form(&self.data) {
            Ok(payload) => {
                self.errors.clear();
                self.submitting = true;
                Some(payload)
            }
            Err(errors) => {
                tracing::debug!(count = errors.len(), "create form blocked by validation");
                self.errors = errors;
                None
            }
        }
    }

    /// Apply the API's answer to a submission started by `begin_submit`.
    pub fn finish_submit(&mut self, result: Result<Vendor, FetchError>) -> Option<Vendor> {
        self.submitting = false;

        match result {
            Ok(vendor) => {
                tracing::info!(id = %vendor.id, "vendor submitted");
                self.notification = Some(Notification::Success(SUCCESS_MESSAGE.to_string()));
                self.data = VendorFormData::default();
                self.focus = 0;
                Some(vendor)
            }
            Err(e) => {
                tracing::warn!(error = %e, "vendor submit failed");
                self.notification = Some(Notification::Failure(FAILURE_MESSAGE.to_string()));
                None
            }
        }
    }

    /// Validate, then submit synchronously through `api`. Invalid forms never
    /// reach the API. Returns the created vendor on success.
    pub fn submit(&mut self, api: &dyn VendorApi) -> Option<Vendor> {
        let payload = self.begin_submit()?;
        let result = api.add_vendor(&payload);
        self.finish_submit(result)
    }
}
