// Campaign CRUD, lifecycle, analytics, and attached generated images.

pub mod handlers;
pub mod validation;
