//! Authentication with better-auth, backed by the database and email modules

use super::copy_module_template;
use crate::error::{Result, StackError};
use crate::modules::{cleanup, CleanupPlan, Module, ModuleContext};
use crate::project::env;
use crate::project::patch::{self, Insertion};
use async_trait::async_trait;
use colored::Colorize;

const PACKAGES: &[&str] = &["better-auth", "argon2", "react-hot-toast"];

const LAYOUT_FILE: &str = "app/layout.tsx";
const SCHEMA_FILE: &str = "prisma/schema.prisma";

const TOASTER_IMPORT: Insertion<'static> = Insertion {
    marker: "import { Toaster }",
    anchor: "import \"./globals.css\";",
    text: "\nimport { Toaster } from \"react-hot-toast\";",
};

const TOASTER_ELEMENT: Insertion<'static> = Insertion {
    marker: "<Toaster",
    anchor: "<body className={`antialiased`}>",
    text: "\n        <div>\n          <Toaster\n            toastOptions={{ style: { background: \"#232323\", color: \"#fff\" } }}\n          />\n        </div>",
};

/// Patterns undoing the two insertions above
const TOASTER_PATTERNS: &[&str] = &[
    r#"\n?import\s*\{\s*Toaster\s*\}\s*from\s*["']react-hot-toast["'];"#,
    r"\n?[ \t]*<div>\s*<Toaster[^>]*/>\s*</div>",
];

const ENV_KEYS: &[&str] = &[
    "APP_NAME",
    "NEXT_PUBLIC_APP_URL",
    "BETTER_AUTH_SECRET",
    "GITHUB_CLIENT_ID",
    "GITHUB_CLIENT_SECRET",
    "GOOGLE_CLIENT_ID",
    "GOOGLE_CLIENT_SECRET",
];

const ENV_BLOCK: &str = r#"
# App Configuration
APP_NAME="Your App Name"
NEXT_PUBLIC_APP_URL="http://localhost:3000"
BETTER_AUTH_SECRET="your-secret-key-here"

# OAuth Providers (Optional)
GITHUB_CLIENT_ID="your-github-client-id"
GITHUB_CLIENT_SECRET="your-github-client-secret"
GOOGLE_CLIENT_ID="your-google-client-id"
GOOGLE_CLIENT_SECRET="your-google-client-secret"
"#;

const REMOVED_DIRS: &[&str] = &[
    "app/api/auth",
    "app/auth",
    "services/auth",
    "prisma/auth",
    "lib/auth",
    "lib/validations",
    "components/auth",
];

const REMOVED_FILES: &[&str] = &[
    "middleware.ts",
    "lib/validations/auth.schema.ts",
    "lib/auth.ts",
    "lib/auth-client.ts",
    "lib/resend.ts",
    "lib/routes.ts",
    "services/user.service.ts",
    "components/ui/loading.tsx",
    "actions/auth.action.ts",
    "public/github.svg",
    "public/google.svg",
];

pub struct AuthModule;

impl AuthModule {
    fn cancelled() -> StackError {
        StackError::Cancelled("Auth module installation cancelled by user".to_string())
    }

    /// Strip the Toaster from the root layout; failures only warn
    fn unpatch_layout(ctx: &ModuleContext<'_>) {
        let layout = ctx.path(LAYOUT_FILE);
        if !layout.is_file() {
            return;
        }

        let result = std::fs::read_to_string(&layout)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                patch::strip_patterns(&content, TOASTER_PATTERNS).map_err(|e| e.to_string())
            })
            .and_then(|stripped| std::fs::write(&layout, stripped).map_err(|e| e.to_string()));

        match result {
            Ok(()) => ctx.progress.succeed("Removed Toaster from layout"),
            Err(e) => {
                tracing::warn!("Failed to unpatch {}: {}", layout.display(), e);
                ctx.progress
                    .warn(&format!("Failed to remove Toaster from layout: {}", e));
            }
        }
    }
}

#[async_trait(?Send)]
impl Module for AuthModule {
    fn name(&self) -> &'static str {
        "auth"
    }

    fn description(&self) -> &'static str {
        "Authentication with better-auth, OAuth providers and 2FA"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["database", "email"]
    }

    async fn initialize(&self, ctx: &ModuleContext<'_>) -> Result<Option<String>> {
        if ctx.path(SCHEMA_FILE).is_file()
            && !ctx
                .prompter
                .confirm("Warning: The auth module will modify your Prisma schema. Do you want to continue?")?
        {
            return Err(Self::cancelled());
        }

        ctx.progress
            .info("The auth module will install the following packages:");
        for package in PACKAGES {
            ctx.progress.info(&format!("- {}", package));
        }
        if !ctx.prompter.confirm("Do you want to proceed?")? {
            return Err(Self::cancelled());
        }

        ctx.progress.start("Installing auth packages...");
        ctx.packages.install(ctx.project_root, PACKAGES).await?;

        copy_module_template(ctx, self.name()).await?;

        if patch::insert_into_file(&ctx.path(LAYOUT_FILE), &[TOASTER_IMPORT, TOASTER_ELEMENT])? {
            tracing::debug!("Added Toaster to {}", LAYOUT_FILE);
        }

        env::append(&ctx.env_path(), ENV_BLOCK).await?;

        let env_lines: Vec<String> = ENV_BLOCK
            .trim_start()
            .lines()
            .map(|line| format!("   {}", line))
            .collect();
        let steps = [
            "1. Open your `.env` file and set the newly added environment variables:\n"
                .cyan()
                .to_string(),
            env_lines.join("\n").bold().to_string(),
            "\n2. After setting the environment variables, run the following command:\n"
                .cyan()
                .to_string(),
            "   npx prisma generate\n".bold().to_string(),
        ];
        Ok(Some(steps.join("\n")))
    }

    async fn remove(&self, ctx: &ModuleContext<'_>) -> Result<()> {
        let paths: Vec<&str> = REMOVED_DIRS.iter().chain(REMOVED_FILES).copied().collect();
        cleanup(
            ctx,
            &CleanupPlan {
                packages: PACKAGES,
                paths: &paths,
                env_keys: ENV_KEYS,
            },
        )
        .await?;

        Self::unpatch_layout(ctx);
        Ok(())
    }
}
