mod auth;
mod backend;
mod categories;
mod form_modal;
mod products;
