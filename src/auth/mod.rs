pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod session_context;
pub mod utils;

pub use claims::Claims;
pub use jwt::JwtService;
pub use middleware::{AdminUser, AuthMiddleware, AuthenticatedUser};
pub use session_context::{AuthSession, AuthUser, SessionContext};
pub use utils::{require_admin, require_owner_or_admin};
