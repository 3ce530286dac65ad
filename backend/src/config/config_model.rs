use super::stage::Stage;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub backend_server: BackendServer,
    pub database: Database,
    pub supabase: Supabase,
    pub site: Site,
    pub stage: Stage,
}

#[derive(Debug, Clone)]
pub struct BackendServer {
    pub port: u16,
    /// MiB.
    pub body_limit: u64,
    /// Seconds.
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Supabase {
    pub project_url: String,
    pub anon_key: String,
    pub jwt_secret: String,
    pub plans_function: String,
    pub checkout_function: String,
    pub request_timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Site {
    /// Public origin of the web app, used for checkout return urls.
    pub base_url: String,
    pub desktop_app_download_url: Option<String>,
}
