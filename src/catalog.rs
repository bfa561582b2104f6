//! The files that make up a generated project.
//!
//! [`PROJECT_TREE`] is plain data: every entry names a path relative to the
//! target directory, its content, and when it is included. The orchestrator
//! walks it in definition order.

use std::path::{Component, Path, PathBuf};

use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::interpolate::interpolate;

/// Content of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    /// Written byte for byte.
    Static(&'static str),
    /// Passed through [`interpolate`] with the configuration's template context.
    Template(&'static str),
}

/// Which configurations an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Include {
    Always,
    WithBilling,
    WithoutBilling,
}

impl Include {
    pub fn matches(&self, config: &Configuration) -> bool {
        match self {
            Include::Always => true,
            Include::WithBilling => config.billing,
            Include::WithoutBilling => !config.billing,
        }
    }
}

/// One file of the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateEntry {
    pub path: &'static str,
    pub content: Content,
    pub include: Include,
}

impl TemplateEntry {
    const fn new(path: &'static str, content: Content, include: Include) -> Self {
        Self { path, content, include }
    }

    const fn fixed(path: &'static str, content: &'static str) -> Self {
        Self::new(path, Content::Static(content), Include::Always)
    }

    const fn template(path: &'static str, content: &'static str) -> Self {
        Self::new(path, Content::Template(content), Include::Always)
    }

    const fn only(self, include: Include) -> Self {
        Self { include, ..self }
    }

    /// Returns the final file content for `context`.
    pub fn render(&self, context: &serde_json::Value) -> String {
        match self.content {
            Content::Static(content) => content.to_string(),
            Content::Template(template) => interpolate(template, context),
        }
    }

    /// Joins the entry path onto `root`.
    ///
    /// # Errors
    /// * `Error::UnsafePathError` if the path is empty, absolute or contains `.`/`..`
    pub fn target(&self, root: &Path) -> Result<PathBuf> {
        let relative = Path::new(self.path);
        if self.path.is_empty()
            || !relative.components().all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(Error::UnsafePathError {
                path: self.path.to_string(),
                reason: "catalog paths must stay inside the target directory".to_string(),
            });
        }
        Ok(root.join(relative))
    }
}

macro_rules! payload {
    ($path:literal) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/", $path))
    };
}

/// Every file a project can contain, in the order it is written.
pub const PROJECT_TREE: &[TemplateEntry] = &[
    // Manifest and tooling
    TemplateEntry::template("package.json", payload!("package.json")).only(Include::WithBilling),
    TemplateEntry::template("package.json", payload!("package.nobilling.json"))
        .only(Include::WithoutBilling),
    TemplateEntry::fixed("tsconfig.json", payload!("tsconfig.json")),
    TemplateEntry::fixed("next.config.mjs", payload!("next.config.mjs")),
    TemplateEntry::fixed(".gitignore", payload!("gitignore")),
    TemplateEntry::template("README.md", payload!("README.md")),
    // Environment templates, one per deployment tier
    TemplateEntry::template(".env.development.example", payload!("env/development")),
    TemplateEntry::template(".env.preview.example", payload!("env/preview")),
    TemplateEntry::template(".env.production.example", payload!("env/production")),
    // Database
    TemplateEntry::template(
        "supabase/migrations/0001_init.sql",
        payload!("supabase/migrations/0001_init.sql"),
    ),
    // Shared clients
    TemplateEntry::fixed("lib/supabase/client.ts", payload!("lib/supabase/client.ts")),
    TemplateEntry::fixed("lib/supabase/server.ts", payload!("lib/supabase/server.ts")),
    TemplateEntry::fixed("lib/stripe.ts", payload!("lib/stripe.ts")).only(Include::WithBilling),
    // Pages
    TemplateEntry::template("app/layout.tsx", payload!("app/layout.tsx")),
    TemplateEntry::fixed("app/globals.css", payload!("app/globals.css")),
    TemplateEntry::template("app/page.tsx", payload!("app/page.tsx")),
    TemplateEntry::fixed("app/login/page.tsx", payload!("app/login/page.tsx")),
    TemplateEntry::fixed("app/signup/page.tsx", payload!("app/signup/page.tsx")),
    TemplateEntry::fixed("app/auth/callback/route.ts", payload!("app/auth/callback/route.ts")),
    TemplateEntry::template("app/dashboard/page.tsx", payload!("app/dashboard/page.tsx")),
    TemplateEntry::template("app/pricing/page.tsx", payload!("app/pricing/page.tsx"))
        .only(Include::WithBilling),
    // API endpoints
    TemplateEntry::template("app/api/health/route.ts", payload!("app/api/health/route.ts")),
    TemplateEntry::fixed("app/api/events/route.ts", payload!("app/api/events/route.ts")),
    TemplateEntry::fixed("app/api/leads/route.ts", payload!("app/api/leads/route.ts")),
    TemplateEntry::template("app/api/checkout/route.ts", payload!("app/api/checkout/route.ts"))
        .only(Include::WithBilling),
    TemplateEntry::fixed(
        "app/api/webhooks/stripe/route.ts",
        payload!("app/api/webhooks/stripe/route.ts"),
    )
    .only(Include::WithBilling),
    // CI and hosting
    TemplateEntry::template(".github/workflows/deploy.yml", payload!("github/workflows/deploy.yml")),
    TemplateEntry::template("netlify.toml", payload!("netlify.toml")),
];

/// Returns the entries that apply to `config`, in definition order.
pub fn entries_for(config: &Configuration) -> impl Iterator<Item = &'static TemplateEntry> + '_ {
    PROJECT_TREE.iter().filter(move |entry| entry.include.matches(config))
}
