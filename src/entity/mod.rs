//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。
//!
//! 所有表都带 `deleted_at` 软删除列；存储层的每条查询都显式拼上
//! `deleted_at IS NULL` 过滤，绝不依赖隐式全局过滤器。

pub mod prelude;

pub mod assignments;
pub mod classes;
pub mod courses;
pub mod enrollments;
pub mod files;
pub mod grades;
pub mod submissions;
pub mod users;
