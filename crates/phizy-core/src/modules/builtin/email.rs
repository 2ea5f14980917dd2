//! Transactional email via Resend and React Email

use super::copy_module_template;
use crate::error::Result;
use crate::modules::{cleanup, CleanupPlan, Module, ModuleContext};
use crate::project::env;
use async_trait::async_trait;
use colored::Colorize;

const PACKAGES: &[&str] = &["resend", "@react-email/components"];

const ENV_KEYS: &[&str] = &[
    "DEFAULT_EMAIL_SENDER_NAME",
    "DEFAULT_EMAIL_SENDER_EMAIL",
    "TWO_FA_EMAIL",
    "VERIFICATION_EMAIL",
    "RESET_PASSWORD_EMAIL",
    "RESEND_API_KEY",
];

const ENV_BLOCK: &str = r#"
# Email Configuration
DEFAULT_EMAIL_SENDER_NAME="My App"
DEFAULT_EMAIL_SENDER_EMAIL="no-reply@example.com"
TWO_FA_EMAIL="2fa@example.com"
VERIFICATION_EMAIL="verification@example.com"
RESET_PASSWORD_EMAIL="reset-password@example.com"
RESEND_API_KEY="your-resend-api-key"
"#;

pub struct EmailModule;

#[async_trait(?Send)]
impl Module for EmailModule {
    fn name(&self) -> &'static str {
        "email"
    }

    fn description(&self) -> &'static str {
        "Transactional email with Resend and React Email templates"
    }

    async fn initialize(&self, ctx: &ModuleContext<'_>) -> Result<Option<String>> {
        ctx.progress.set_text("Installing Resend packages...");
        ctx.packages.install(ctx.project_root, PACKAGES).await?;

        copy_module_template(ctx, self.name()).await?;
        env::append(&ctx.env_path(), ENV_BLOCK).await?;

        let mut steps = vec![
            "1. Open your `.env` file and set newly added environment variables. For example:\n"
                .cyan()
                .to_string(),
        ];
        steps.extend(
            ENV_BLOCK
                .lines()
                .filter(|line| line.contains('='))
                .map(|line| format!("   {}", line).bold().to_string()),
        );
        steps.push(
            "\n2. Link your domain to Resend. (https://resend.com/emails)"
                .cyan()
                .to_string(),
        );
        steps.push("3. Use the sendEmail function to send emails.\n".cyan().to_string());
        Ok(Some(steps.join("\n")))
    }

    async fn remove(&self, ctx: &ModuleContext<'_>) -> Result<()> {
        cleanup(
            ctx,
            &CleanupPlan {
                packages: PACKAGES,
                paths: &["templates/emails", "lib/email.ts"],
                env_keys: ENV_KEYS,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_block_declares_every_removed_key() {
        for key in ENV_KEYS {
            assert!(
                ENV_BLOCK.contains(&format!("\n{}=", key)),
                "{} missing from env block",
                key
            );
        }
        let declared = ENV_BLOCK.lines().filter(|l| l.contains('=')).count();
        assert_eq!(declared, ENV_KEYS.len());
    }
}
