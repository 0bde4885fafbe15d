//! Company applications and approved companies, held in memory.

use super::error::StoreError;
use crate::models::{
    ApplicationStatus, Company, CompanyApplication, CompanyApplicationRequest, CompanyOverview,
    CompanySettingsUpdate, CompanyStatus,
};
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

pub struct CompanyRegistry {
    inner: RwLock<Inner>,
}

struct Inner {
    applications: Vec<CompanyApplication>,
    companies: Vec<Company>,
    next_application: u32,
    next_company: u32,
}

impl CompanyRegistry {
    pub fn new(applications: Vec<CompanyApplication>, companies: Vec<Company>) -> Self {
        let next_application = applications.len() as u32 + 1;
        let next_company = companies.len() as u32 + 1;
        Self {
            inner: RwLock::new(Inner {
                applications,
                companies,
                next_application,
                next_company,
            }),
        }
    }

    pub fn seeded() -> Self {
        let now = Utc::now();
        Self::new(seed_applications(now), seed_companies(now))
    }

    /// Files a new application. Names are unique across pending
    /// applications and registered companies (case-insensitive).
    pub async fn apply(
        &self,
        request: CompanyApplicationRequest,
    ) -> Result<CompanyApplication, StoreError> {
        let mut inner = self.inner.write().await;
        let name = request.company_name.trim().to_string();
        let lowered = name.to_lowercase();

        let taken = inner
            .companies
            .iter()
            .any(|c| c.name.to_lowercase() == lowered)
            || inner.applications.iter().any(|a| {
                a.company_name.to_lowercase() == lowered && a.status != ApplicationStatus::Rejected
            });
        if taken {
            return Err(StoreError::CompanyAlreadyRegistered(name));
        }

        let application = CompanyApplication {
            id: format!("APP-{:03}", inner.next_application),
            company_name: name,
            contact_name: request.contact_name,
            email: request.email,
            industry: request.industry,
            employees: request.employees,
            description: request.description,
            status: ApplicationStatus::Pending,
            submitted_at: Utc::now(),
        };
        inner.next_application += 1;
        inner.applications.push(application.clone());

        tracing::info!(
            application_id = %application.id,
            company = %application.company_name,
            "Company application submitted"
        );
        Ok(application)
    }

    pub async fn overview(&self) -> CompanyOverview {
        let inner = self.inner.read().await;
        let applications: Vec<CompanyApplication> = inner
            .applications
            .iter()
            .filter(|a| !a.status.is_decided())
            .cloned()
            .collect();

        CompanyOverview {
            pending_applications: applications.len(),
            active_companies: inner
                .companies
                .iter()
                .filter(|c| c.status == CompanyStatus::Active)
                .count(),
            total_users: inner.companies.iter().map(|c| c.users).sum(),
            total_tickets: inner.companies.iter().map(|c| c.tickets).sum(),
            applications,
            companies: inner.companies.clone(),
        }
    }

    /// The registered company with this name (case-insensitive).
    pub async fn company(&self, name: &str) -> Result<Company, StoreError> {
        let inner = self.inner.read().await;
        inner
            .companies
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| StoreError::CompanyNotFound(name.to_string()))
    }

    pub async fn update_company(
        &self,
        name: &str,
        update: CompanySettingsUpdate,
    ) -> Result<Company, StoreError> {
        let mut inner = self.inner.write().await;
        let company = inner
            .companies
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| StoreError::CompanyNotFound(name.to_string()))?;

        if let Some(industry) = update.industry {
            company.industry = industry.trim().to_string();
        }
        if let Some(admin_email) = update.admin_email {
            company.admin_email = admin_email;
        }

        tracing::info!(company_id = %company.id, "Company settings updated");
        Ok(company.clone())
    }

    /// Approves an undecided application and registers the company.
    pub async fn approve(&self, id: &str) -> Result<Company, StoreError> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;
        let application = undecided_mut(&mut inner.applications, id)?;
        application.status = ApplicationStatus::Approved;

        let company = Company {
            id: format!("CMP-{:03}", inner.next_company),
            name: application.company_name.clone(),
            admin_email: application.email.clone(),
            industry: application.industry.clone(),
            status: CompanyStatus::Active,
            users: 0,
            tickets: 0,
            joined_at: Utc::now(),
        };
        inner.next_company += 1;
        inner.companies.push(company.clone());

        tracing::info!(application_id = %id, company_id = %company.id, "Company application approved");
        Ok(company)
    }

    pub async fn reject(&self, id: &str) -> Result<CompanyApplication, StoreError> {
        let mut inner = self.inner.write().await;
        let application = undecided_mut(&mut inner.applications, id)?;
        application.status = ApplicationStatus::Rejected;

        tracing::info!(application_id = %id, "Company application rejected");
        Ok(application.clone())
    }
}

fn undecided_mut<'a>(
    applications: &'a mut [CompanyApplication],
    id: &str,
) -> Result<&'a mut CompanyApplication, StoreError> {
    let application = applications
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or_else(|| StoreError::ApplicationNotFound(id.to_string()))?;
    if application.status.is_decided() {
        return Err(StoreError::ApplicationAlreadyDecided(id.to_string()));
    }
    Ok(application)
}

fn seed_applications(now: DateTime<Utc>) -> Vec<CompanyApplication> {
    let seed = |id: &str,
                company_name: &str,
                contact_name: &str,
                email: &str,
                industry: &str,
                employees: &str,
                description: &str,
                status: ApplicationStatus,
                age_days: i64| CompanyApplication {
        id: id.to_string(),
        company_name: company_name.to_string(),
        contact_name: contact_name.to_string(),
        email: email.to_string(),
        industry: industry.to_string(),
        employees: employees.to_string(),
        description: description.to_string(),
        status,
        submitted_at: now - Duration::days(age_days),
    };

    vec![
        seed(
            "APP-001",
            "TechStart Solutions",
            "John Smith",
            "john@techstart.com",
            "Technology",
            "50-100",
            "Software development company specializing in web applications",
            ApplicationStatus::Pending,
            3,
        ),
        seed(
            "APP-002",
            "Global Finance Corp",
            "Sarah Johnson",
            "sarah@globalfinance.com",
            "Finance",
            "200-500",
            "Financial services company providing investment solutions",
            ApplicationStatus::Review,
            4,
        ),
        seed(
            "APP-003",
            "Healthcare Plus",
            "Dr. Mike Davis",
            "mike@healthcareplus.com",
            "Healthcare",
            "100-200",
            "Healthcare provider network",
            ApplicationStatus::Pending,
            5,
        ),
    ]
}

fn seed_companies(now: DateTime<Utc>) -> Vec<Company> {
    let seed = |id: &str,
                name: &str,
                admin_email: &str,
                industry: &str,
                status: CompanyStatus,
                users: u32,
                tickets: u32,
                age_days: i64| Company {
        id: id.to_string(),
        name: name.to_string(),
        admin_email: admin_email.to_string(),
        industry: industry.to_string(),
        status,
        users,
        tickets,
        joined_at: now - Duration::days(age_days),
    };

    vec![
        seed(
            "CMP-001",
            "UniValle",
            "empresa@gmail.com",
            "Education",
            CompanyStatus::Active,
            150,
            1250,
            400,
        ),
        seed(
            "CMP-002",
            "RetailMax",
            "admin@retailmax.com",
            "Retail",
            CompanyStatus::Active,
            85,
            890,
            210,
        ),
        seed(
            "CMP-003",
            "OldCorp",
            "contact@oldcorp.com",
            "Manufacturing",
            CompanyStatus::Inactive,
            12,
            45,
            700,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str) -> CompanyApplicationRequest {
        CompanyApplicationRequest {
            company_name: name.to_string(),
            contact_name: "Ana Ruiz".to_string(),
            email: "ana@example.com".to_string(),
            industry: "Logistics".to_string(),
            employees: "10-50".to_string(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn overview_counts_seed_data() {
        let overview = CompanyRegistry::seeded().overview().await;
        assert_eq!(overview.pending_applications, 3);
        assert_eq!(overview.active_companies, 2);
        assert_eq!(overview.total_users, 247);
        assert_eq!(overview.total_tickets, 2185);
    }

    #[tokio::test]
    async fn approve_registers_company() {
        let registry = CompanyRegistry::seeded();
        let company = registry.approve("APP-001").await.unwrap();
        assert_eq!(company.id, "CMP-004");
        assert_eq!(company.name, "TechStart Solutions");
        assert_eq!(company.status, CompanyStatus::Active);

        let overview = registry.overview().await;
        assert_eq!(overview.pending_applications, 2);
        assert_eq!(overview.active_companies, 3);
    }

    #[tokio::test]
    async fn decided_application_cannot_be_decided_again() {
        let registry = CompanyRegistry::seeded();
        registry.reject("APP-002").await.unwrap();
        assert_eq!(
            registry.approve("APP-002").await,
            Err(StoreError::ApplicationAlreadyDecided("APP-002".to_string()))
        );
        assert_eq!(
            registry.reject("APP-002").await,
            Err(StoreError::ApplicationAlreadyDecided("APP-002".to_string()))
        );
    }

    #[tokio::test]
    async fn unknown_application_is_not_found() {
        assert_eq!(
            CompanyRegistry::seeded().approve("APP-999").await,
            Err(StoreError::ApplicationNotFound("APP-999".to_string()))
        );
    }

    #[tokio::test]
    async fn apply_rejects_duplicate_names() {
        let registry = CompanyRegistry::seeded();
        assert_eq!(
            registry.apply(request("univalle")).await,
            Err(StoreError::CompanyAlreadyRegistered("univalle".to_string()))
        );
        assert!(registry.apply(request("Healthcare Plus")).await.is_err());

        let application = registry.apply(request("  Andes Cargo ")).await.unwrap();
        assert_eq!(application.id, "APP-004");
        assert_eq!(application.company_name, "Andes Cargo");
        assert_eq!(application.status, ApplicationStatus::Pending);
    }

    #[tokio::test]
    async fn rejected_name_can_reapply() {
        let registry = CompanyRegistry::seeded();
        registry.reject("APP-003").await.unwrap();
        assert!(registry.apply(request("Healthcare Plus")).await.is_ok());
    }

    #[tokio::test]
    async fn company_settings_update_in_place() {
        let registry = CompanyRegistry::seeded();
        let update = CompanySettingsUpdate {
            industry: Some(" Higher Education ".to_string()),
            admin_email: None,
        };

        let company = registry.update_company("univalle", update).await.unwrap();
        assert_eq!(company.industry, "Higher Education");
        assert_eq!(company.admin_email, "empresa@gmail.com");
        assert_eq!(registry.company("UniValle").await, Ok(company));
    }

    #[tokio::test]
    async fn unknown_company_is_not_found() {
        assert_eq!(
            CompanyRegistry::seeded().company("Sistema").await,
            Err(StoreError::CompanyNotFound("Sistema".to_string()))
        );
    }
}
