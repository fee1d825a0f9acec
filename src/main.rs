use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web, web::Data};
use portfolio_backend::analytics::AnalyticsStore;
use portfolio_backend::auth::AdminAuth;
use portfolio_backend::config::AppConfig;
use portfolio_backend::handlers::validation::disposable::DisposableDomains;
use portfolio_backend::handlers::validation::dnsmx::TrustDnsMxResolver;
use portfolio_backend::handlers::validation::plausibility::EmailChecker;
use portfolio_backend::inbox::ContactInbox;
use portfolio_backend::openapi::ApiDoc;
use portfolio_backend::portfolio::PortfolioStore;
use portfolio_backend::routes::{self, health::ServiceInfo};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Portfolio Backend Entry Point
///
/// Configures and launches the Actix-web HTTP server with:
/// - REST endpoints under `/api` (health, contact, auth, analytics, admin)
/// - CORS restricted to the configured frontend origins
/// - Swagger UI for API documentation
/// - Environment configuration via `.env` file
/// - Shared application state: email checker, contact inbox, analytics
///   counters, portfolio content, admin auth
///
/// # Endpoints
/// - API: `/api/...` (configured in routes)
/// - Swagger UI: `/swagger-ui/`
/// - OpenAPI spec: `/api-docs/openapi.json`
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    portfolio_backend::logger::init_logger();

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;
    if config.admin.is_none() {
        warn!("ADMIN_USERNAME, ADMIN_PASSWORD or JWT_SECRET missing; admin login disabled");
    }

    let disposable =
        DisposableDomains::builtin().extend(config.extra_disposable_domains.iter());
    info!(
        disposable_domains = disposable.len(),
        dns_timeout_secs = config.dns_timeout.as_secs(),
        "email checker ready"
    );

    let resolver = Arc::new(TrustDnsMxResolver::new(config.dns_timeout));
    let checker = Data::new(
        EmailChecker::new(resolver, config.dns_timeout).with_disposable_domains(disposable),
    );
    let inbox = Data::new(ContactInbox::new());
    let analytics = Data::new(AnalyticsStore::new());
    let portfolio = Data::new(PortfolioStore::new());
    let auth = Data::new(AdminAuth::new(config.admin.clone(), config.jwt_ttl_hours));
    let service_info = Data::new(ServiceInfo::new(config.environment.clone()));

    info!(
        host = %config.host,
        port = config.port,
        environment = %config.environment,
        cors_origins = ?config.cors_origins,
        "portfolio backend starting"
    );

    let cors_origins = config.cors_origins.clone();

    HttpServer::new(move || {
        let openapi = ApiDoc::openapi();

        App::new()
            .wrap(routes::cors(&cors_origins))
            .wrap(Logger::default())
            .app_data(checker.clone())
            .app_data(inbox.clone())
            .app_data(analytics.clone())
            .app_data(portfolio.clone())
            .app_data(auth.clone())
            .app_data(service_info.clone())
            .configure(routes::configure)
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
            .default_service(web::route().to(routes::not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
