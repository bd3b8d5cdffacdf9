// Route path constants - single source of truth for all HTTP paths

pub const HEALTH: &str = "/health";
pub const JOURNEYS: &str = "/api/get/{from}/{destination}";
pub const BOOKINGS: &str = "/api/post";
pub const VIEW_ROUTES: &str = "/api/views";
pub const VIEW: &str = "/views";
pub const SHELL: &str = "/";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
