/// Longest message body accepted, counted in chars after trimming.
pub const MAX_MESSAGE_LEN: usize = 2000;

pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;
pub const ALLOWED_AVATAR_TYPES: [&str; 4] =
    ["image/jpeg", "image/jpg", "image/png", "image/webp"];

pub const DEFAULT_PAGE_LIMIT: i64 = 50;

pub struct Env {
    pub jwt_secret: String,
    /// Absent means the in-memory store backs everything.
    pub database_url: Option<String>,
    /// Absent disables the profile read-through cache.
    pub redis_url: Option<String>,
    pub frontend_url: String,
    pub upload_dir: String,
    pub upload_base_url: String,
    pub ip: String,
    pub port: u16,
}

impl Env {
    fn new() -> Self {
        let jwt_secret = std::env::var("SECRET_KEY")
            .expect("SECRET_KEY must be set in .env file or environment variable");

        let database_url = std::env::var("DATABASE_URL").ok();
        let redis_url = std::env::var("REDIS_URL").ok();

        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());
        let upload_dir =
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads/avatars".to_string());
        let upload_base_url = std::env::var("UPLOAD_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080/uploads/avatars".to_string());
        let ip = std::env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid u16 integer");
        Env {
            jwt_secret,
            database_url,
            redis_url,
            frontend_url,
            upload_dir,
            upload_base_url,
            ip,
            port,
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
