//! Modules that ship with phizy-stack

mod auth;
mod database;
mod email;

pub use auth::AuthModule;
pub use database::DatabaseModule;
pub use email::EmailModule;

use super::ModuleContext;
use crate::error::Result;

/// Copy a module's template tree over the project
pub(crate) async fn copy_module_template(ctx: &ModuleContext<'_>, name: &str) -> Result<()> {
    ctx.progress
        .set_text(&format!("Copying {} templates...", name));
    crate::templates::copy_dir(&ctx.templates.module(name), ctx.project_root).await?;
    Ok(())
}
