//! Data-access services (one per table) and request validation.

mod articles;
mod comments;
mod users;
mod validation;
pub use articles::ArticlesService;
pub use comments::CommentsService;
pub use users::UsersService;
pub use validation::RequestValidator;
