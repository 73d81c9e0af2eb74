// libs/doctor-cell/src/services/recommendation.rs
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{Disease, DoctorError, DoctorSummary};
use crate::services::directory::DoctorDirectory;

/// Disease-name -> specialty mapping. Names are unique case-insensitively;
/// the catalog is read-only from the reservation core's point of view and
/// populated by an external seeding process.
pub struct DiseaseCatalog {
    diseases: RwLock<HashMap<String, Disease>>,
}

impl DiseaseCatalog {
    pub fn new() -> Self {
        Self {
            diseases: RwLock::new(HashMap::new()),
        }
    }

    pub async fn seed(&self, name: &str, specialty: &str) -> Disease {
        let disease = Disease {
            id: Uuid::new_v4(),
            name: name.to_string(),
            specialty: specialty.to_string(),
        };

        let mut diseases = self.diseases.write().await;
        diseases.insert(name.to_lowercase(), disease.clone());
        disease
    }

    pub async fn find(&self, name: &str) -> Option<Disease> {
        let diseases = self.diseases.read().await;
        diseases.get(&name.to_lowercase()).cloned()
    }
}

impl Default for DiseaseCatalog {
    fn default() -> Self {
        Self::new()
    }
}

pub struct RecommendationService {
    catalog: Arc<DiseaseCatalog>,
    directory: Arc<DoctorDirectory>,
}

impl RecommendationService {
    pub fn new(catalog: Arc<DiseaseCatalog>, directory: Arc<DoctorDirectory>) -> Self {
        Self { catalog, directory }
    }

    /// Disease name -> specialty -> filtered doctor summaries.
    pub async fn recommend(
        &self,
        disease_name: &str,
        city: Option<&str>,
    ) -> Result<Vec<DoctorSummary>, DoctorError> {
        let disease = self
            .catalog
            .find(disease_name)
            .await
            .ok_or(DoctorError::DiseaseNotFound)?;

        if disease.specialty.trim().is_empty() {
            debug!("Disease {} has no specialty mapped", disease.name);
            return Err(DoctorError::DiseaseNotFound);
        }

        let doctors = self.directory.list_by_specialty(&disease.specialty, city).await;
        if doctors.is_empty() {
            return Err(DoctorError::NoDoctorsFound);
        }

        info!(
            "Recommended {} {} doctors for disease {}",
            doctors.len(),
            disease.specialty,
            disease.name
        );
        Ok(doctors)
    }
}
