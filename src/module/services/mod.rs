//! Application services for module orchestration.

mod modules;

pub use modules::{CreateModuleRequest, ModuleService, ModuleServiceError, ModuleServiceResult};
