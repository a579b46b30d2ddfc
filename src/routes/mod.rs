pub mod assignments;
pub mod auth;
pub mod classes;
pub mod courses;
pub mod files;
pub mod grades;
pub mod submissions;
pub mod users;

pub use assignments::configure_assignments_routes;
pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use courses::configure_courses_routes;
pub use files::configure_file_routes;
pub use grades::configure_grades_routes;
pub use submissions::configure_submissions_routes;
pub use users::configure_user_routes;
