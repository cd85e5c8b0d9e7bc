//! In-memory template catalog implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use relata_core::{
    new_v7, CreateTemplateRequest, Error, MessageTemplate, Result, TemplateCatalog,
    UpdateTemplateRequest,
};

/// Map-backed implementation of [`TemplateCatalog`].
#[derive(Default)]
pub struct InMemoryTemplateCatalog {
    templates: RwLock<HashMap<Uuid, MessageTemplate>>,
}

impl InMemoryTemplateCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TemplateCatalog for InMemoryTemplateCatalog {
    async fn create(&self, req: CreateTemplateRequest) -> Result<Uuid> {
        if req.name.trim().is_empty() {
            return Err(Error::Validation("template name must not be empty".to_string()));
        }
        let id = new_v7();
        let now = Utc::now();
        let template = MessageTemplate {
            id,
            name: req.name,
            body: req.body,
            tone: req.tone,
            created_at_utc: now,
            updated_at_utc: now,
        };
        self.templates.write().unwrap().insert(id, template);
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> Result<Option<MessageTemplate>> {
        Ok(self.templates.read().unwrap().get(&id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<MessageTemplate>> {
        Ok(self
            .templates
            .read()
            .unwrap()
            .values()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<MessageTemplate>> {
        let mut templates: Vec<MessageTemplate> =
            self.templates.read().unwrap().values().cloned().collect();
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(templates)
    }

    async fn update(&self, id: Uuid, req: UpdateTemplateRequest) -> Result<()> {
        let mut templates = self.templates.write().unwrap();
        let template = templates
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("template {}", id)))?;

        if let Some(name) = req.name {
            template.name = name;
        }
        if let Some(body) = req.body {
            template.body = body;
        }
        if let Some(tone) = req.tone {
            template.tone = Some(tone);
        }
        template.updated_at_utc = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.templates.write().unwrap().remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_request(name: &str) -> CreateTemplateRequest {
        CreateTemplateRequest {
            name: name.to_string(),
            body: "Hi [Contact Name]".to_string(),
            tone: Some("warm".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let catalog = InMemoryTemplateCatalog::new();
        let id = catalog.create(catalog_request("intro")).await.unwrap();

        let template = catalog.get(id).await.unwrap().unwrap();
        assert_eq!(template.name, "intro");
        assert_eq!(template.tone.as_deref(), Some("warm"));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let catalog = InMemoryTemplateCatalog::new();
        let err = catalog.create(catalog_request("   ")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_by_name() {
        let catalog = InMemoryTemplateCatalog::new();
        catalog.create(catalog_request("follow-up")).await.unwrap();

        assert!(catalog.get_by_name("follow-up").await.unwrap().is_some());
        assert!(catalog.get_by_name("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_ordered_by_name() {
        let catalog = InMemoryTemplateCatalog::new();
        catalog.create(catalog_request("zeta")).await.unwrap();
        catalog.create(catalog_request("alpha")).await.unwrap();

        let names: Vec<String> = catalog
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn test_update_fields() {
        let catalog = InMemoryTemplateCatalog::new();
        let id = catalog.create(catalog_request("intro")).await.unwrap();

        catalog
            .update(
                id,
                UpdateTemplateRequest {
                    body: Some("New body".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let template = catalog.get(id).await.unwrap().unwrap();
        assert_eq!(template.body, "New body");
        assert_eq!(template.name, "intro");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let catalog = InMemoryTemplateCatalog::new();
        let err = catalog
            .update(Uuid::new_v4(), UpdateTemplateRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let catalog = InMemoryTemplateCatalog::new();
        let id = catalog.create(catalog_request("intro")).await.unwrap();
        catalog.delete(id).await.unwrap();
        catalog.delete(id).await.unwrap();
        assert!(catalog.get(id).await.unwrap().is_none());
    }
}
