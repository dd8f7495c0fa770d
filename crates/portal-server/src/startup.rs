use crate::{
    authentication::{
        validate_user_access, BaseUrl, IdentityClient, PermissionsClient, RedirectPolicy,
        SessionTtl,
    },
    configuration::ApplicationSettings,
    routes::{callback, health_check, not_found, session, sign_in, sign_out, whoami},
    Configuration,
};
use actix_session::{
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
    SessionMiddleware,
};
use actix_web::{
    cookie::Key,
    middleware::from_fn,
    web::{self, ServiceConfig},
    App, HttpResponse, HttpServer,
};
use anyhow::{anyhow, Context as _};
use portal_shared::{
    const_config::path::{
        PATH_API_PREFIX, PATH_AUTH_CALLBACK, PATH_AUTH_SESSION, PATH_AUTH_SIGN_IN,
        PATH_HEALTH_CHECK, PATH_VERSION,
    },
    telemetry,
    uac::FuncaoRequirements,
};
use secrecy::ExposeSecret as _;
use std::{
    net::{SocketAddr, TcpListener},
    str::FromStr,
};
use tracing::{info, instrument};
use tracing_actix_web::TracingLogger;

pub struct ApiServerBuilder {
    pub configuration: Configuration,
    requirements: FuncaoRequirements,
    pkg_version: &'static str,
}

/// Initializes Tracing
pub fn initialize_tracing<Sink, D, N>(
    subscriber_name: N,
    default_env_filter_directive: D,
    sink: Sink,
) where
    Sink: for<'b> tracing_subscriber::fmt::MakeWriter<'b> + Send + Sync + 'static,
    D: AsRef<str>,
    N: Into<String>,
{
    let subscriber =
        telemetry::get_subscriber(subscriber_name.into(), default_env_filter_directive, sink);
    telemetry::init_subscriber(subscriber).expect("failed to initialize the subscriber");
}

/// For servers that do not mount any collaborator routes
pub fn no_routes(_cfg: &mut ServiceConfig) {}

pub struct RunnableApiServer(actix_web::dev::Server);

impl RunnableApiServer {
    pub async fn run(self) -> anyhow::Result<()> {
        self.0.await.context("api server crashed")
    }
}

impl ApiServerBuilder {
    pub fn new(configuration: Configuration, pkg_version: &'static str) -> Self {
        Self {
            configuration,
            requirements: FuncaoRequirements::default(),
            pkg_version,
        }
    }

    /// Funcoes required by paths under the protected scope. Collaborator
    /// routes mounted as protected resources must be registered here
    pub fn requirements_mut(&mut self) -> &mut FuncaoRequirements {
        &mut self.requirements
    }

    #[instrument(err(Debug), skip_all)]
    pub fn build_runnable_api_server<FOpen, FProtected>(
        self,
        addr: SocketAddr,
        open_resource: FOpen,
        protected_resource: FProtected,
    ) -> anyhow::Result<(RunnableApiServer, u16)>
    where
        FOpen: Fn(&mut ServiceConfig) + Send + Clone + 'static,
        FProtected: Fn(&mut ServiceConfig) + Send + Clone + 'static,
    {
        let Self {
            configuration,
            requirements,
            pkg_version,
        } = self;
        let application = &configuration.application;

        let identity = web::Data::new(
            IdentityClient::new(&configuration.identity_provider, &application.base_url)
                .context("failed to create identity provider client")?,
        );
        info!(redirect_uri = %identity.redirect_uri(), "Identity provider client ready");
        let permissions = web::Data::new(
            PermissionsClient::new(&configuration.permissions_webhook)
                .context("failed to create permissions webhook client")?,
        );
        let redirect = web::Data::new(RedirectPolicy::new(
            application.landing_path.clone(),
            application.error_path.clone(),
        ));
        let session_ttl = web::Data::new(SessionTtl(configuration.session.ttl()));
        let base_url = web::Data::new(BaseUrl(application.base_url.clone()));
        let requirements = web::Data::new(requirements);

        let secret_key = Key::try_from(application.hmac_secret.expose_secret().as_bytes())
            .map_err(|e| anyhow!("hmac_secret is not usable as a cookie key: {e:?}"))?;
        let cookie_secure = application.cookie_secure;
        let cookie_name = configuration.session.cookie_name.clone();
        let cookie_ttl = configuration.session.cookie_ttl();

        let listener = TcpListener::bind(addr)
            .with_context(|| format!("failed to bind to address: {}", addr))?;
        let port = listener
            .local_addr()
            .context("failed to get local address of listener")?
            .port();
        info!(?port, "Port assigned to the server is {port}");

        let server = HttpServer::new(move || {
            // The cookie is the whole session, nothing is kept server side
            let session_middleware =
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_name(cookie_name.clone())
                    .cookie_secure(cookie_secure)
                    .cookie_content_security(CookieContentSecurity::Private)
                    .session_lifecycle(PersistentSession::default().session_ttl(cookie_ttl))
                    .build();

            App::new()
                .wrap(session_middleware)
                .wrap(TracingLogger::default())
                .service(
                    web::scope(PATH_API_PREFIX)
                        .wrap(from_fn(validate_user_access))
                        .configure(protected_resource.clone())
                        .route("/signout", web::post().to(sign_out))
                        .route("/whoami", web::get().to(whoami)),
                )
                .configure(open_resource.clone())
                .route(PATH_AUTH_SIGN_IN.path, web::get().to(sign_in))
                .route(PATH_AUTH_CALLBACK.path, web::get().to(callback))
                .route(PATH_AUTH_SESSION.path, web::get().to(session))
                .route(PATH_HEALTH_CHECK.path, web::get().to(health_check))
                .route(
                    PATH_VERSION.path,
                    web::get().to(move || async move {
                        HttpResponse::Ok().body(pkg_version.to_string())
                    }),
                )
                .app_data(identity.clone())
                .app_data(permissions.clone())
                .app_data(redirect.clone())
                .app_data(session_ttl.clone())
                .app_data(base_url.clone())
                .app_data(requirements.clone())
                .default_service(web::route().to(not_found))
        })
        .listen(listener)
        .context("Failed to bind HTTP Server to listener")?
        .run();
        info!(
            version = pkg_version,
            "API Server prepared to be run at version {}", pkg_version
        );
        Ok((RunnableApiServer(server), port))
    }
}

pub fn get_socket_address(app_config: &ApplicationSettings) -> anyhow::Result<SocketAddr> {
    let address = format!("{}:{}", app_config.host, app_config.port);
    info!("Socket address to parse is: {address}");
    let result = SocketAddr::from_str(&address)
        .with_context(|| format!("failed to parse address: {address}"))?;
    Ok(result)
}
