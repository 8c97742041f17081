//! Registration record and typed field identifiers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::step::Step;
use crate::error::FlowError;

/// Every answer collected by the five onboarding steps.
///
/// Stored under `onboardingFormData` as a camelCase JSON object. Keys missing
/// from a stored object fall back to their defaults, so the record is always
/// complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormRecord {
    // Step 1
    pub owner_name: String,
    pub company_email: String,
    pub password: String,
    pub confirm_password: String,
    // Step 2
    pub business_service: String,
    pub display_name: String,
    pub business_location: String,
    pub house_no: String,
    pub area_street: String,
    pub pincode: String,
    pub city: String,
    pub state: String,
    pub display_image_name: String,
    // Step 3
    pub pan_number: String,
    pub pan_name: String,
    pub gst_registered: String,
    pub gst_number: String,
    pub fssai_number: String,
    pub fssai_expiry: String,
    pub pan_doc_name: String,
    pub gst_doc_name: String,
    pub fssai_doc_name: String,
    // Step 4
    pub bank_name: String,
    pub account_type: String,
    pub account_holder_name: String,
    pub account_number: String,
    pub confirm_account_number: String,
    pub ifsc_code: String,
    pub bank_doc_name: String,
    // Step 5
    pub partnership_agreed: bool,
}

impl Default for FormRecord {
    fn default() -> Self {
        Self {
            owner_name: String::new(),
            company_email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            business_service: String::new(),
            display_name: String::new(),
            business_location: String::new(),
            house_no: String::new(),
            area_street: String::new(),
            pincode: String::new(),
            city: String::new(),
            state: String::new(),
            display_image_name: String::new(),
            pan_number: String::new(),
            pan_name: String::new(),
            // The GST selector starts on "No".
            gst_registered: options::GST_NO.to_string(),
            gst_number: String::new(),
            fssai_number: String::new(),
            fssai_expiry: String::new(),
            pan_doc_name: String::new(),
            gst_doc_name: String::new(),
            fssai_doc_name: String::new(),
            bank_name: String::new(),
            account_type: String::new(),
            account_holder_name: String::new(),
            account_number: String::new(),
            confirm_account_number: String::new(),
            ifsc_code: String::new(),
            bank_doc_name: String::new(),
            partnership_agreed: false,
        }
    }
}

impl FormRecord {
    /// Current value of a text field.
    pub fn text(&self, field: TextField) -> &str {
        use TextField::*;
        match field {
            OwnerName => &self.owner_name,
            CompanyEmail => &self.company_email,
            Password => &self.password,
            ConfirmPassword => &self.confirm_password,
            BusinessService => &self.business_service,
            DisplayName => &self.display_name,
            BusinessLocation => &self.business_location,
            HouseNo => &self.house_no,
            AreaStreet => &self.area_street,
            Pincode => &self.pincode,
            City => &self.city,
            State => &self.state,
            PanNumber => &self.pan_number,
            PanName => &self.pan_name,
            GstRegistered => &self.gst_registered,
            GstNumber => &self.gst_number,
            FssaiNumber => &self.fssai_number,
            FssaiExpiry => &self.fssai_expiry,
            BankName => &self.bank_name,
            AccountType => &self.account_type,
            AccountHolderName => &self.account_holder_name,
            AccountNumber => &self.account_number,
            ConfirmAccountNumber => &self.confirm_account_number,
            IfscCode => &self.ifsc_code,
        }
    }

    pub(crate) fn text_mut(&mut self, field: TextField) -> &mut String {
        use TextField::*;
        match field {
            OwnerName => &mut self.owner_name,
            CompanyEmail => &mut self.company_email,
            Password => &mut self.password,
            ConfirmPassword => &mut self.confirm_password,
            BusinessService => &mut self.business_service,
            DisplayName => &mut self.display_name,
            BusinessLocation => &mut self.business_location,
            HouseNo => &mut self.house_no,
            AreaStreet => &mut self.area_street,
            Pincode => &mut self.pincode,
            City => &mut self.city,
            State => &mut self.state,
            PanNumber => &mut self.pan_number,
            PanName => &mut self.pan_name,
            GstRegistered => &mut self.gst_registered,
            GstNumber => &mut self.gst_number,
            FssaiNumber => &mut self.fssai_number,
            FssaiExpiry => &mut self.fssai_expiry,
            BankName => &mut self.bank_name,
            AccountType => &mut self.account_type,
            AccountHolderName => &mut self.account_holder_name,
            AccountNumber => &mut self.account_number,
            ConfirmAccountNumber => &mut self.confirm_account_number,
            IfscCode => &mut self.ifsc_code,
        }
    }

    /// Display name of an uploaded file, or `""` when none is attached.
    pub fn file(&self, field: FileField) -> &str {
        match field {
            FileField::DisplayImage => &self.display_image_name,
            FileField::PanDoc => &self.pan_doc_name,
            FileField::GstDoc => &self.gst_doc_name,
            FileField::FssaiDoc => &self.fssai_doc_name,
            FileField::BankDoc => &self.bank_doc_name,
        }
    }

    pub(crate) fn file_mut(&mut self, field: FileField) -> &mut String {
        match field {
            FileField::DisplayImage => &mut self.display_image_name,
            FileField::PanDoc => &mut self.pan_doc_name,
            FileField::GstDoc => &mut self.gst_doc_name,
            FileField::FssaiDoc => &mut self.fssai_doc_name,
            FileField::BankDoc => &mut self.bank_doc_name,
        }
    }
}

/// Free-text and select fields of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    OwnerName,
    CompanyEmail,
    Password,
    ConfirmPassword,
    BusinessService,
    DisplayName,
    BusinessLocation,
    HouseNo,
    AreaStreet,
    Pincode,
    City,
    State,
    PanNumber,
    PanName,
    GstRegistered,
    GstNumber,
    FssaiNumber,
    FssaiExpiry,
    BankName,
    AccountType,
    AccountHolderName,
    AccountNumber,
    ConfirmAccountNumber,
    IfscCode,
}

impl TextField {
    /// All text fields, in form order.
    pub const ALL: [TextField; 24] = [
        Self::OwnerName,
        Self::CompanyEmail,
        Self::Password,
        Self::ConfirmPassword,
        Self::BusinessService,
        Self::DisplayName,
        Self::BusinessLocation,
        Self::HouseNo,
        Self::AreaStreet,
        Self::Pincode,
        Self::City,
        Self::State,
        Self::PanNumber,
        Self::PanName,
        Self::GstRegistered,
        Self::GstNumber,
        Self::FssaiNumber,
        Self::FssaiExpiry,
        Self::BankName,
        Self::AccountType,
        Self::AccountHolderName,
        Self::AccountNumber,
        Self::ConfirmAccountNumber,
        Self::IfscCode,
    ];

    /// JSON key of the field in the persisted record.
    pub fn as_str(&self) -> &'static str {
        use TextField::*;
        match self {
            OwnerName => "ownerName",
            CompanyEmail => "companyEmail",
            Password => "password",
            ConfirmPassword => "confirmPassword",
            BusinessService => "businessService",
            DisplayName => "displayName",
            BusinessLocation => "businessLocation",
            HouseNo => "houseNo",
            AreaStreet => "areaStreet",
            Pincode => "pincode",
            City => "city",
            State => "state",
            PanNumber => "panNumber",
            PanName => "panName",
            GstRegistered => "gstRegistered",
            GstNumber => "gstNumber",
            FssaiNumber => "fssaiNumber",
            FssaiExpiry => "fssaiExpiry",
            BankName => "bankName",
            AccountType => "accountType",
            AccountHolderName => "accountHolderName",
            AccountNumber => "accountNumber",
            ConfirmAccountNumber => "confirmAccountNumber",
            IfscCode => "ifscCode",
        }
    }

    /// The step whose page shows this field.
    pub fn step(&self) -> Step {
        use TextField::*;
        let n = match self {
            OwnerName | CompanyEmail | Password | ConfirmPassword => 1,
            BusinessService | DisplayName | BusinessLocation | HouseNo | AreaStreet | Pincode
            | City | State => 2,
            PanNumber | PanName | GstRegistered | GstNumber | FssaiNumber | FssaiExpiry => 3,
            BankName | AccountType | AccountHolderName | AccountNumber | ConfirmAccountNumber
            | IfscCode => 4,
        };
        Step::clamped(n)
    }

    /// Whether the shell should mask the value.
    pub fn is_secret(&self) -> bool {
        matches!(
            self,
            Self::Password | Self::ConfirmPassword | Self::AccountNumber
        )
    }
}

impl std::fmt::Display for TextField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextField {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FlowError::UnknownField(s.to_string()))
    }
}

/// Upload slots. Only the chosen file's display name is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileField {
    DisplayImage,
    PanDoc,
    GstDoc,
    FssaiDoc,
    BankDoc,
}

impl FileField {
    pub const ALL: [FileField; 5] = [
        Self::DisplayImage,
        Self::PanDoc,
        Self::GstDoc,
        Self::FssaiDoc,
        Self::BankDoc,
    ];

    /// JSON key of the file-name field in the persisted record.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DisplayImage => "displayImageName",
            Self::PanDoc => "panDocName",
            Self::GstDoc => "gstDocName",
            Self::FssaiDoc => "fssaiDocName",
            Self::BankDoc => "bankDocName",
        }
    }

    pub fn step(&self) -> Step {
        let n = match self {
            Self::DisplayImage => 2,
            Self::PanDoc | Self::GstDoc | Self::FssaiDoc => 3,
            Self::BankDoc => 4,
        };
        Step::clamped(n)
    }
}

impl std::fmt::Display for FileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileField {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FlowError::UnknownField(s.to_string()))
    }
}

/// Known values of the select fields. The record accepts any string.
pub mod options {
    pub const GST_YES: &str = "Yes";
    pub const GST_NO: &str = "No";

    /// The only business service that requires an FSSAI licence.
    pub const CATERING: &str = "catering";

    /// `(value, label)` pairs for the business service selector.
    pub const BUSINESS_SERVICES: &[(&str, &str)] = &[
        ("catering", "Catering"),
        ("mehendi", "Mehendi"),
        ("makeup", "Makeup"),
        ("private_theaters", "Private Theaters"),
    ];

    pub const BANKS: &[(&str, &str)] = &[
        ("sbi", "State Bank of India"),
        ("hdfc", "HDFC Bank"),
        ("icici", "ICICI Bank"),
        ("axis", "Axis Bank"),
        ("other", "Other"),
    ];

    pub const ACCOUNT_TYPES: &[(&str, &str)] = &[("savings", "Savings"), ("current", "Current")];

    /// Tag shown on the business preview card: first letter upper-cased and
    /// the first underscore turned into a space.
    pub fn service_preview_label(service: &str) -> String {
        if service.is_empty() {
            return "Select Service".to_string();
        }
        let mut chars = service.chars();
        let head: String = chars.next().into_iter().flat_map(char::to_uppercase).collect();
        let tail = chars.as_str().replacen('_', " ", 1);
        format!("{head}{tail}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_blank_except_gst() {
        let record = FormRecord::default();
        for field in TextField::ALL {
            if field == TextField::GstRegistered {
                assert_eq!(record.text(field), "No");
            } else {
                assert_eq!(record.text(field), "", "{field} should start empty");
            }
        }
        for field in FileField::ALL {
            assert_eq!(record.file(field), "");
        }
        assert!(!record.partnership_agreed);
    }

    #[test]
    fn json_keys_match_field_names() {
        let json = serde_json::to_value(FormRecord::default()).unwrap();
        let obj = json.as_object().unwrap();
        for field in TextField::ALL {
            assert!(obj.contains_key(field.as_str()), "missing {field}");
        }
        for field in FileField::ALL {
            assert!(obj.contains_key(field.as_str()), "missing {field}");
        }
        assert!(obj.contains_key("partnershipAgreed"));
        assert_eq!(obj.len(), TextField::ALL.len() + FileField::ALL.len() + 1);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let record: FormRecord =
            serde_json::from_str(r#"{"ownerName":"Asha","partnershipAgreed":true}"#).unwrap();
        assert_eq!(record.owner_name, "Asha");
        assert!(record.partnership_agreed);
        assert_eq!(record.gst_registered, "No");
        assert_eq!(record.pan_doc_name, "");
    }

    #[test]
    fn text_mut_targets_the_named_field() {
        let mut record = FormRecord::default();
        *record.text_mut(TextField::IfscCode) = "SBIN0001234".to_string();
        assert_eq!(record.ifsc_code, "SBIN0001234");
        assert_eq!(record.text(TextField::IfscCode), "SBIN0001234");

        *record.file_mut(FileField::BankDoc) = "cheque.pdf".to_string();
        assert_eq!(record.bank_doc_name, "cheque.pdf");
    }

    #[test]
    fn field_names_parse() {
        for field in TextField::ALL {
            assert_eq!(field.as_str().parse::<TextField>().unwrap(), field);
        }
        for field in FileField::ALL {
            assert_eq!(field.as_str().parse::<FileField>().unwrap(), field);
        }
        assert_eq!(
            "favouriteColour".parse::<TextField>().unwrap_err(),
            FlowError::UnknownField("favouriteColour".to_string())
        );
        // A file slot is not a text field.
        assert!("panDocName".parse::<TextField>().is_err());
    }

    #[test]
    fn fields_belong_to_steps() {
        assert_eq!(TextField::OwnerName.step().get(), 1);
        assert_eq!(TextField::Pincode.step().get(), 2);
        assert_eq!(TextField::GstNumber.step().get(), 3);
        assert_eq!(TextField::IfscCode.step().get(), 4);
        assert_eq!(FileField::DisplayImage.step().get(), 2);
        assert_eq!(FileField::BankDoc.step().get(), 4);
    }

    #[test]
    fn service_preview_label_formats_value() {
        assert_eq!(options::service_preview_label(""), "Select Service");
        assert_eq!(options::service_preview_label("catering"), "Catering");
        assert_eq!(
            options::service_preview_label("private_theaters"),
            "Private theaters"
        );
    }
}
