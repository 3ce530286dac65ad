use anyhow::{Context, Result};

use super::{
    config_model::{BackendServer, Database, DotEnvyConfig, Site, Supabase},
    stage::Stage,
};

const DEFAULT_PLANS_FUNCTION: &str = "supabase-functions-get-plans";
const DEFAULT_CHECKOUT_FUNCTION: &str = "supabase-functions-create-checkout";

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();
    load_from(|key| std::env::var(key).ok())
}

pub(crate) fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<DotEnvyConfig> {
    let required = |key: &str| -> Result<String> {
        lookup(key)
            .filter(|value| !value.trim().is_empty())
            .with_context(|| format!("{key} is invalid"))
    };
    let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let backend_server = BackendServer {
        port: required("SERVER_PORT_BACKEND")?
            .parse()
            .context("SERVER_PORT_BACKEND is not a port")?,
        body_limit: required("SERVER_BODY_LIMIT")?
            .parse()
            .context("SERVER_BODY_LIMIT is not a number")?,
        timeout: required("SERVER_TIMEOUT")?
            .parse()
            .context("SERVER_TIMEOUT is not a number")?,
    };

    let database = Database {
        url: required("DATABASE_URL")?,
    };

    let supabase = Supabase {
        project_url: required("SUPABASE_PROJECT_URL")?,
        anon_key: required("SUPABASE_ANON_KEY")?,
        jwt_secret: required("SUPABASE_JWT_SECRET")?,
        plans_function: optional("PLANS_FUNCTION_NAME")
            .unwrap_or_else(|| DEFAULT_PLANS_FUNCTION.to_string()),
        checkout_function: optional("CHECKOUT_FUNCTION_NAME")
            .unwrap_or_else(|| DEFAULT_CHECKOUT_FUNCTION.to_string()),
        request_timeout: match optional("SUPABASE_REQUEST_TIMEOUT") {
            Some(raw) => raw
                .parse()
                .context("SUPABASE_REQUEST_TIMEOUT is not a number")?,
            None => 10,
        },
    };

    let site = Site {
        base_url: required("SITE_URL")?.trim_end_matches('/').to_string(),
        desktop_app_download_url: optional("DESKTOP_APP_DOWNLOAD_URL"),
    };

    let stage = match optional("STAGE") {
        Some(raw) => Stage::try_from(&raw)?,
        None => Stage::default(),
    };

    Ok(DotEnvyConfig {
        backend_server,
        database,
        supabase,
        site,
        stage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("SERVER_PORT_BACKEND", "8080"),
            ("SERVER_BODY_LIMIT", "10"),
            ("SERVER_TIMEOUT", "30"),
            ("DATABASE_URL", "postgres://localhost:5432/db"),
            ("SUPABASE_PROJECT_URL", "https://example.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon-key"),
            ("SUPABASE_JWT_SECRET", "supersecretjwtsecretforunittesting123"),
            ("SITE_URL", "https://metagen.example/"),
        ])
    }

    fn load_vars(vars: &HashMap<&'static str, &'static str>) -> Result<DotEnvyConfig> {
        load_from(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn loads_defaults_for_optional_values() {
        let config = load_vars(&base_vars()).unwrap();

        assert_eq!(config.backend_server.port, 8080);
        assert_eq!(config.supabase.plans_function, "supabase-functions-get-plans");
        assert_eq!(
            config.supabase.checkout_function,
            "supabase-functions-create-checkout"
        );
        assert_eq!(config.supabase.request_timeout, 10);
        assert_eq!(config.site.base_url, "https://metagen.example");
        assert!(config.site.desktop_app_download_url.is_none());
        assert_eq!(config.stage, Stage::Local);
    }

    #[test]
    fn missing_required_value_fails() {
        let mut vars = base_vars();
        vars.remove("SUPABASE_ANON_KEY");

        let err = load_vars(&vars).unwrap_err();
        assert!(err.to_string().contains("SUPABASE_ANON_KEY"));
    }

    #[test]
    fn invalid_stage_fails() {
        let mut vars = base_vars();
        vars.insert("STAGE", "staging-ish");

        assert!(load_vars(&vars).is_err());
    }

    #[test]
    fn parses_production_stage() {
        let mut vars = base_vars();
        vars.insert("STAGE", "production");

        let config = load_vars(&vars).unwrap();
        assert!(config.stage.secure_cookies());
    }
}
