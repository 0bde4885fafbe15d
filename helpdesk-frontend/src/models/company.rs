use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::validation::not_blank;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Review,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn is_decided(&self) -> bool {
        matches!(self, ApplicationStatus::Approved | ApplicationStatus::Rejected)
    }
}

/// A company asking to join the platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyApplication {
    pub id: String,
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub industry: String,
    pub employees: String,
    pub description: String,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub admin_email: String,
    pub industry: String,
    pub status: CompanyStatus,
    pub users: u32,
    pub tickets: u32,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CompanyApplicationRequest {
    #[validate(
        length(min = 1, max = 120, message = "Company name is required"),
        custom(function = "not_blank")
    )]
    pub company_name: String,
    #[validate(
        length(min = 1, message = "Contact name is required"),
        custom(function = "not_blank")
    )]
    pub contact_name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(
        length(min = 1, message = "Industry is required"),
        custom(function = "not_blank")
    )]
    pub industry: String,
    #[serde(default)]
    pub employees: String,
    #[serde(default)]
    pub description: String,
}

/// Fields a company admin may change on their own company.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CompanySettingsUpdate {
    #[validate(custom(function = "not_blank"))]
    pub industry: Option<String>,
    #[validate(email(message = "A valid email is required"))]
    pub admin_email: Option<String>,
}

/// Platform overview for the company management page.
#[derive(Debug, Serialize)]
pub struct CompanyOverview {
    pub pending_applications: usize,
    pub active_companies: usize,
    pub total_users: u32,
    pub total_tickets: u32,
    pub applications: Vec<CompanyApplication>,
    pub companies: Vec<Company>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(company_name: &str) -> CompanyApplicationRequest {
        CompanyApplicationRequest {
            company_name: company_name.to_string(),
            contact_name: "Ana Ruiz".to_string(),
            email: "ana@example.com".to_string(),
            industry: "Retail".to_string(),
            employees: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn whitespace_company_name_is_rejected() {
        let errors = request("   ").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("company_name"));
        assert!(request("Northwind").validate().is_ok());
    }

    #[test]
    fn settings_update_checks_present_fields_only() {
        assert!(CompanySettingsUpdate::default().validate().is_ok());

        let update = CompanySettingsUpdate {
            industry: Some(" ".to_string()),
            admin_email: Some("not-an-email".to_string()),
        };
        let errors = update.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("industry"));
        assert!(fields.contains_key("admin_email"));
    }

    #[test]
    fn decided_statuses() {
        assert!(ApplicationStatus::Approved.is_decided());
        assert!(ApplicationStatus::Rejected.is_decided());
        assert!(!ApplicationStatus::Review.is_decided());
    }
}
