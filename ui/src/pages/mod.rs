pub mod categories;
pub mod login;
pub mod not_found;
pub mod products;

pub use categories::CategoriesPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use products::ProductsPage;
