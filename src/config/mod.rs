mod loader;
mod model;
pub mod presets;
mod template;
pub mod validation;

pub use loader::{
    ConfigLoader, FileConfigLoader, FileSystem, LOCAL_CONFIG_NAME, RealFileSystem, TemplateLoader,
};
pub use model::{DEFAULT_TEMPLATE_DIR, I18nConfig, ProjectConfig, TargetsConfig};
pub use template::{
    Category, CodeStyleRules, ForbiddenRules, KeyStyle, NamingRules, RuleTemplate,
    StructureRules, TEMPLATE_VERSION,
};
