//! Map-backed contact directory and job board.
//!
//! In production these collaborators are remote services owned by the host
//! application; the map-backed implementations here serve embedded use and
//! tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use relata_core::{Contact, ContactDirectory, JobBoard, JobOpportunity, Result};

/// Map-backed implementation of [`ContactDirectory`].
#[derive(Default)]
pub struct InMemoryContactDirectory {
    contacts: RwLock<HashMap<Uuid, Contact>>,
}

impl InMemoryContactDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a contact.
    pub fn insert(&self, contact: Contact) {
        self.contacts.write().unwrap().insert(contact.id, contact);
    }
}

#[async_trait]
impl ContactDirectory for InMemoryContactDirectory {
    async fn get_contact(&self, id: Uuid) -> Result<Option<Contact>> {
        Ok(self.contacts.read().unwrap().get(&id).cloned())
    }
}

/// Map-backed implementation of [`JobBoard`].
#[derive(Default)]
pub struct InMemoryJobBoard {
    jobs: RwLock<HashMap<Uuid, JobOpportunity>>,
}

impl InMemoryJobBoard {
    /// Create an empty job board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a job posting.
    pub fn insert(&self, job: JobOpportunity) {
        self.jobs.write().unwrap().insert(job.id, job);
    }

    /// Mark a job as archived. Returns false when the id is unknown.
    pub fn archive(&self, id: Uuid) -> bool {
        match self.jobs.write().unwrap().get_mut(&id) {
            Some(job) => {
                job.archived = true;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl JobBoard for InMemoryJobBoard {
    async fn get_job(&self, id: Uuid) -> Result<Option<JobOpportunity>> {
        Ok(self.jobs.read().unwrap().get(&id).cloned())
    }
}
