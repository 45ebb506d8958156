mod telemetry;

use attenda_api::Application;
use attenda_infra::{run_migration, setup_context};
use telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("attenda_server".into(), "info".into());
    init_subscriber(subscriber);

    if let Err(e) = run_migration().await {
        tracing::error!("Database migration failed: {:?}", e);
        return Err(std::io::Error::new(std::io::ErrorKind::Other, e));
    }

    let context = setup_context().await;

    let app = Application::new(context).await?;
    app.start().await
}
