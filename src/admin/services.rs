//! Hotel Services

use std::fmt;

use mockall::automock;
use tracing::info;

use crate::admin::{AdminError, RecordId, next_id, require};

/// Whether a service is offered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ServiceStatus {
    /// Offered to guests
    #[default]
    Active,

    /// Hidden from guests
    Inactive,
}

impl ServiceStatus {
    /// The other status.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        })
    }
}

/// A service offered by the hotel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelService {
    /// Record id
    pub id: RecordId,

    /// Display name
    pub name: String,

    /// Marketing description
    pub description: String,

    /// Grouping, e.g. "Wellness"
    pub category: String,

    /// Free-text pricing, e.g. "Treatments from $150"
    pub pricing: String,

    /// Current status
    pub status: ServiceStatus,
}

/// Editable fields of a service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceDraft {
    /// Display name
    pub name: String,

    /// Marketing description
    pub description: String,

    /// Grouping
    pub category: String,

    /// Free-text pricing
    pub pricing: String,
}

/// Store of hotel services.
#[automock]
pub trait ServicesRepository {
    /// All services, in creation order.
    fn list(&self) -> Vec<HotelService>;

    /// A single service.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] if no service has this id.
    fn get(&self, id: RecordId) -> Result<HotelService, AdminError>;

    /// Adds an [`ServiceStatus::Active`] service with the next free id.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::MissingRequiredData`] if the name is blank.
    fn create(&mut self, draft: ServiceDraft) -> Result<HotelService, AdminError>;

    /// Replaces a service's editable fields, keeping its id and status.
    ///
    /// # Errors
    ///
    /// Returns an error if the service does not exist or the name is blank.
    fn update(&mut self, id: RecordId, draft: ServiceDraft) -> Result<HotelService, AdminError>;

    /// Removes a service, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] if no service has this id.
    fn delete(&mut self, id: RecordId) -> Result<HotelService, AdminError>;

    /// Flips a service between active and inactive.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] if no service has this id.
    fn toggle_status(&mut self, id: RecordId) -> Result<HotelService, AdminError>;
}

/// Services held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryServicesRepository {
    services: Vec<HotelService>,
}

impl InMemoryServicesRepository {
    /// The services the admin panel starts with.
    pub fn seeded() -> Self {
        let service = |id, name: &str, description: &str, category: &str, pricing: &str| {
            HotelService {
                id,
                name: name.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                pricing: pricing.to_string(),
                status: ServiceStatus::Active,
            }
        };

        Self {
            services: vec![
                service(
                    1,
                    "Luxury Spa & Wellness",
                    "Indulge in our world-class spa featuring therapeutic treatments and wellness programs",
                    "Wellness",
                    "Treatments from $150",
                ),
                service(
                    2,
                    "Fine Dining & Culinary",
                    "Experience culinary excellence with our Michelin-starred restaurant",
                    "Dining",
                    "Prix fixe from $85",
                ),
                service(
                    3,
                    "Concierge Services",
                    "Our dedicated concierge team provides personalized services",
                    "Guest Services",
                    "Complimentary for guests",
                ),
                service(
                    4,
                    "Recreation & Fitness",
                    "Stay active with our state-of-the-art fitness facilities",
                    "Recreation",
                    "Included with stay",
                ),
            ],
        }
    }

    fn find_mut(&mut self, id: RecordId) -> Result<&mut HotelService, AdminError> {
        self.services
            .iter_mut()
            .find(|service| service.id == id)
            .ok_or(AdminError::NotFound(id))
    }
}

impl ServicesRepository for InMemoryServicesRepository {
    fn list(&self) -> Vec<HotelService> {
        self.services.clone()
    }

    fn get(&self, id: RecordId) -> Result<HotelService, AdminError> {
        self.services
            .iter()
            .find(|service| service.id == id)
            .cloned()
            .ok_or(AdminError::NotFound(id))
    }

    fn create(&mut self, draft: ServiceDraft) -> Result<HotelService, AdminError> {
        require("name", &draft.name)?;

        let service = HotelService {
            id: next_id(self.services.iter().map(|service| service.id))?,
            name: draft.name,
            description: draft.description,
            category: draft.category,
            pricing: draft.pricing,
            status: ServiceStatus::Active,
        };

        info!(id = service.id, name = %service.name, "service created");

        self.services.push(service.clone());

        Ok(service)
    }

    fn update(&mut self, id: RecordId, draft: ServiceDraft) -> Result<HotelService, AdminError> {
        require("name", &draft.name)?;

        let service = self.find_mut(id)?;

        service.name = draft.name;
        service.description = draft.description;
        service.category = draft.category;
        service.pricing = draft.pricing;

        info!(id, name = %service.name, "service updated");

        Ok(service.clone())
    }

    fn delete(&mut self, id: RecordId) -> Result<HotelService, AdminError> {
        let position = self
            .services
            .iter()
            .position(|service| service.id == id)
            .ok_or(AdminError::NotFound(id))?;

        let service = self.services.remove(position);

        info!(id, name = %service.name, "service deleted");

        Ok(service)
    }

    fn toggle_status(&mut self, id: RecordId) -> Result<HotelService, AdminError> {
        let service = self.find_mut(id)?;

        service.status = service.status.toggled();

        info!(id, status = %service.status, "service status changed");

        Ok(service.clone())
    }
}
