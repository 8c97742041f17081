//! Conditional fields: which inputs each step shows for the current answers.

use super::model::{FileField, FormRecord, TextField, options};
use super::step::Step;

/// GST number and certificate are shown only for GST-registered businesses.
pub fn gst_fields_visible(record: &FormRecord) -> bool {
    record.gst_registered == options::GST_YES
}

/// FSSAI number, expiry and licence are shown only for catering.
pub fn fssai_fields_visible(record: &FormRecord) -> bool {
    record.business_service == options::CATERING
}

/// A field rendered on a step page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibleField {
    Text(TextField),
    File(FileField),
    PartnershipAgreement,
}

/// The fields a step page shows, in display order.
pub fn visible_fields(step: Step, record: &FormRecord) -> Vec<VisibleField> {
    use VisibleField::{File, Text};

    let mut fields = Vec::new();
    match step.get() {
        1 => fields.extend(
            [
                TextField::OwnerName,
                TextField::CompanyEmail,
                TextField::Password,
                TextField::ConfirmPassword,
            ]
            .map(Text),
        ),
        2 => {
            fields.extend([TextField::BusinessService, TextField::DisplayName].map(Text));
            fields.push(File(FileField::DisplayImage));
            fields.extend(
                [
                    TextField::BusinessLocation,
                    TextField::HouseNo,
                    TextField::AreaStreet,
                    TextField::Pincode,
                    TextField::City,
                    TextField::State,
                ]
                .map(Text),
            );
        }
        3 => {
            fields.extend([TextField::PanNumber, TextField::PanName].map(Text));
            fields.push(File(FileField::PanDoc));
            fields.push(Text(TextField::GstRegistered));
            if gst_fields_visible(record) {
                fields.push(Text(TextField::GstNumber));
                fields.push(File(FileField::GstDoc));
            }
            if fssai_fields_visible(record) {
                fields.push(Text(TextField::FssaiNumber));
                fields.push(Text(TextField::FssaiExpiry));
                fields.push(File(FileField::FssaiDoc));
            }
        }
        4 => {
            fields.extend(
                [
                    TextField::BankName,
                    TextField::AccountType,
                    TextField::AccountHolderName,
                    TextField::AccountNumber,
                    TextField::ConfirmAccountNumber,
                    TextField::IfscCode,
                ]
                .map(Text),
            );
            fields.push(File(FileField::BankDoc));
        }
        _ => fields.push(VisibleField::PartnershipAgreement),
    }
    fields
}
