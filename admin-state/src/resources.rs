//! The in-memory list behind an admin table and the CRUD calls that keep it
//! in step with the backend.
//!
//! Every operation records a failure in [`CollectionState::error`] and also
//! returns it, so callers can both render the message and branch on it.

use payloads::{APIClient, ClientError, Resource, requests::FormData};

use crate::{ResourceCollection, StateCell};

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionState<R: Resource> {
    pub collection: ResourceCollection<R>,
    /// True until the initial fetch has finished.
    pub is_loading: bool,
    /// Message from the most recent failed call.
    pub error: Option<String>,
    load_started: bool,
}

impl<R: Resource> Default for CollectionState<R> {
    fn default() -> Self {
        Self {
            collection: ResourceCollection::new(),
            is_loading: true,
            error: None,
            load_started: false,
        }
    }
}

impl<R: Resource> CollectionState<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<R> {
        self.collection.to_vec()
    }

    /// Claim the initial fetch. Returns false if it was already claimed.
    pub fn begin_load(&mut self) -> bool {
        if self.load_started {
            return false;
        }
        self.load_started = true;
        self.is_loading = true;
        true
    }

    pub fn finish_load(&mut self, result: Result<Vec<R>, &ClientError>) {
        match result {
            Ok(records) => self.collection.replace_all(records),
            Err(e) => self.error = Some(e.to_string()),
        }
        self.is_loading = false;
    }

    pub fn record_error(&mut self, e: &ClientError) {
        self.error = Some(e.to_string());
    }
}

/// Fetch the full list, once per state lifetime. Later calls return
/// immediately.
pub async fn load<R, C>(client: &APIClient, cell: &C)
where
    R: Resource,
    C: StateCell<CollectionState<R>>,
{
    let mut claimed = false;
    cell.reduce(|state| claimed = state.begin_load());
    if !claimed {
        return;
    }

    match client.list::<R>().await {
        Ok(records) => {
            tracing::debug!("Fetched {} {}", records.len(), R::COLLECTION);
            cell.reduce(|state| state.finish_load(Ok(records)));
        }
        Err(e) => {
            tracing::error!("Error fetching {}: {e:#}", R::COLLECTION);
            cell.reduce(|state| state.finish_load(Err(&e)));
        }
    }
}

/// Create a record and append it to the list. Returns the server's message.
pub async fn create<R, C>(
    client: &APIClient,
    cell: &C,
    form: &FormData,
) -> Result<String, ClientError>
where
    R: Resource,
    C: StateCell<CollectionState<R>>,
{
    match client.create::<R>(form).await {
        Ok(saved) => {
            tracing::debug!("Created {} {}", R::SINGULAR, saved.record.id());
            cell.reduce(|state| state.collection.push(saved.record));
            Ok(saved.message)
        }
        Err(e) => {
            tracing::error!("Error creating {}: {e:#}", R::SINGULAR);
            cell.reduce(|state| state.record_error(&e));
            Err(e)
        }
    }
}

/// Update a record, replacing it where it sits in the list.
pub async fn update<R, C>(
    client: &APIClient,
    cell: &C,
    id: &R::Id,
    form: &FormData,
) -> Result<String, ClientError>
where
    R: Resource,
    C: StateCell<CollectionState<R>>,
{
    match client.update::<R>(id, form).await {
        Ok(saved) => {
            tracing::debug!("Updated {} {id}", R::SINGULAR);
            cell.reduce(|state| {
                state.collection.replace(id, saved.record);
            });
            Ok(saved.message)
        }
        Err(e) => {
            tracing::error!("Error updating {} {id}: {e:#}", R::SINGULAR);
            cell.reduce(|state| state.record_error(&e));
            Err(e)
        }
    }
}

/// Delete a record and drop it from the list.
pub async fn delete<R, C>(
    client: &APIClient,
    cell: &C,
    id: &R::Id,
) -> Result<String, ClientError>
where
    R: Resource,
    C: StateCell<CollectionState<R>>,
{
    match client.delete::<R>(id).await {
        Ok(body) => {
            tracing::debug!("Deleted {} {id}", R::SINGULAR);
            cell.reduce(|state| {
                state.collection.remove(id);
            });
            Ok(body.message)
        }
        Err(e) => {
            tracing::error!("Error deleting {} {id}: {e:#}", R::SINGULAR);
            cell.reduce(|state| state.record_error(&e));
            Err(e)
        }
    }
}
