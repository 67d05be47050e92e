use admin_state::{CollectionState, Session, StateCell, resources};
use payloads::requests::FormData;
use payloads::{Category, ClientError, Product, Resource};
use yew::prelude::*;
use yewdux::prelude::*;

use super::{HookCell, use_session, use_state_cell};
use crate::{State, get_api_client};

/// Handle to one admin table's records.
///
/// The mutation methods consume a clone of the handle so the returned future
/// can be spawned.
pub struct ResourcesHandle<R: Resource> {
    cell: HookCell<CollectionState<R>>,
    session: Session,
    dispatch: Dispatch<State>,
}

impl<R: Resource> Clone for ResourcesHandle<R> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
            session: self.session.clone(),
            dispatch: self.dispatch.clone(),
        }
    }
}

impl<R: Resource> ResourcesHandle<R> {
    pub fn state(&self) -> CollectionState<R> {
        self.cell.get()
    }

    pub async fn create(self, form: FormData) -> Result<(), ClientError> {
        let client = get_api_client(&self.session);
        let message = resources::create(&client, &self.cell, &form).await?;
        self.notify(message);
        Ok(())
    }

    pub async fn update(self, id: R::Id, form: FormData) -> Result<(), ClientError> {
        let client = get_api_client(&self.session);
        let message = resources::update(&client, &self.cell, &id, &form).await?;
        self.notify(message);
        Ok(())
    }

    pub async fn delete(self, id: R::Id) -> Result<(), ClientError> {
        let client = get_api_client(&self.session);
        let message = resources::delete(&client, &self.cell, &id).await?;
        self.notify(message);
        Ok(())
    }

    pub fn dismiss_error(&self) {
        self.cell.reduce(|state| state.error = None);
    }

    fn notify(&self, message: String) {
        self.dispatch
            .reduce_mut(|state| state.notice = Some(message).filter(|m| !m.is_empty()));
    }
}

/// Load a resource's records on mount and expose CRUD calls that keep the
/// local list in step with the backend.
#[hook]
pub fn use_resources<R: Resource + 'static>() -> ResourcesHandle<R> {
    let session = use_session();
    let cell = use_state_cell(CollectionState::<R>::new);
    let (_, dispatch) = use_store::<State>();

    {
        let cell = cell.clone();
        let session = session.clone();
        use_effect_with((), move |_| {
            yew::platform::spawn_local(async move {
                let client = get_api_client(&session);
                resources::load(&client, &cell).await;
            });
        });
    }

    ResourcesHandle {
        cell,
        session,
        dispatch,
    }
}

#[hook]
pub fn use_products() -> ResourcesHandle<Product> {
    use_resources::<Product>()
}

#[hook]
pub fn use_categories() -> ResourcesHandle<Category> {
    use_resources::<Category>()
}
