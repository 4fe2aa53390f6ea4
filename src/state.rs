use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::auth::jwt::JwtService;
use crate::config::Config;
use crate::likes::registry::DynLikeRegistry;

pub type DbPool = Pool<SqliteConnectionManager>;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    pub jwt: JwtService,
    pub likes: DynLikeRegistry,
}
