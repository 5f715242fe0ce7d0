//! Firestore REST v1 client.
//!
//! Documents live under
//! `{base}/v1/projects/{project}/databases/(default)/documents/{collection}`.
//! Each document carries a full resource path in its `name` attribute; the
//! last path segment is the document id. Task names are stored as a single
//! Firestore `stringValue` field called `name` — no further schema is
//! assumed, and listed documents without a usable `name` field are skipped.

use serde::{Deserialize, Serialize};
use url::Url;

use taskdeck_types::{Task, TaskId, TaskName};

use crate::{StoreError, TaskStore, error_from_response, http_client};

/// Firestore-backed implementation of [`TaskStore`].
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: reqwest::Client,
    documents_root: String,
    collection: String,
    api_key: Option<String>,
}

impl RemoteStore {
    /// Build a store rooted at `base_url` (the public endpoint or an
    /// emulator host). The API key, when present, rides along as the `key`
    /// query parameter on every request.
    pub fn new(
        base_url: &str,
        project_id: &str,
        collection: &str,
        api_key: Option<String>,
    ) -> Result<Self, StoreError> {
        let base = base_url.trim_end_matches('/');
        if let Err(source) = Url::parse(base) {
            return Err(StoreError::Endpoint {
                url: base_url.to_string(),
                source,
            });
        }

        Ok(Self {
            client: http_client().clone(),
            documents_root: format!("{base}/v1/projects/{project_id}/databases/(default)/documents"),
            collection: collection.to_string(),
            api_key,
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.documents_root, self.collection)
    }

    fn document_url(&self, id: &TaskId) -> String {
        format!("{}/{}/{}", self.documents_root, self.collection, id)
    }

    fn with_key(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.query(&[("key", key.as_str())]),
            None => request,
        }
    }
}

impl TaskStore for RemoteStore {
    async fn list_all(&self) -> Result<Vec<Task>, StoreError> {
        let response = self
            .with_key(self.client.get(self.collection_url()))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: ListDocumentsResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        let mut tasks = Vec::with_capacity(body.documents.len());
        for doc in body.documents {
            let path = doc.name.clone();
            match doc.into_task() {
                Some(task) => tasks.push(task),
                None => {
                    tracing::warn!(document = %path, "Skipping document without a usable name field");
                }
            }
        }

        tracing::debug!(count = tasks.len(), "Listed tasks");
        Ok(tasks)
    }

    async fn create(&self, name: &TaskName) -> Result<Task, StoreError> {
        let response = self
            .with_key(
                self.client
                    .post(self.collection_url())
                    .json(&TaskDocumentBody::new(name)),
            )
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let doc: Document = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        let id = doc
            .document_id()
            .ok_or_else(|| StoreError::Decode(format!("document path has no id: {}", doc.name)))?;

        tracing::debug!(id, "Created task");
        Ok(Task::new(TaskId::new(id), name.clone()))
    }

    async fn update(&self, id: &TaskId, name: &TaskName) -> Result<(), StoreError> {
        // currentDocument.exists makes the write fail on a missing id
        // instead of upserting.
        let response = self
            .with_key(
                self.client
                    .patch(self.document_url(id))
                    .query(&[
                        ("updateMask.fieldPaths", "name"),
                        ("currentDocument.exists", "true"),
                    ])
                    .json(&TaskDocumentBody::new(name)),
            )
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        tracing::debug!(%id, "Updated task");
        Ok(())
    }

    async fn delete(&self, id: &TaskId) -> Result<(), StoreError> {
        let response = self
            .with_key(self.client.delete(self.document_url(id)))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        tracing::debug!(%id, "Deleted task");
        Ok(())
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Document>,
}

#[derive(Debug, Deserialize)]
struct Document {
    /// Full resource path, e.g.
    /// `projects/p/databases/(default)/documents/tasks/<id>`.
    name: String,
    #[serde(default)]
    fields: Option<DocumentFields>,
}

impl Document {
    fn document_id(&self) -> Option<&str> {
        self.name.rsplit('/').next().filter(|id| !id.is_empty())
    }

    fn into_task(self) -> Option<Task> {
        let id = TaskId::new(self.document_id()?);
        let raw = self.fields?.name?.string_value;
        let name = TaskName::new(raw).ok()?;
        Some(Task::new(id, name))
    }
}

#[derive(Debug, Default, Deserialize)]
struct DocumentFields {
    name: Option<StringValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StringValue {
    string_value: String,
}

#[derive(Debug, Serialize)]
struct TaskDocumentBody<'a> {
    fields: TaskFields<'a>,
}

impl<'a> TaskDocumentBody<'a> {
    fn new(name: &'a TaskName) -> Self {
        Self {
            fields: TaskFields {
                name: StringValueRef {
                    string_value: name.as_str(),
                },
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct TaskFields<'a> {
    name: StringValueRef<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StringValueRef<'a> {
    string_value: &'a str,
}
