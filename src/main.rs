mod clients;
mod costing;
mod database;
mod error;
mod handlers;
mod models;
mod pricing;
mod stock;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use dotenvy::dotenv;
use std::env;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use clients::{EmailClient, InvoicingClient, PaymentsClient};
use database::{create_database_pool, Database};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub email: EmailClient,
    pub invoicing: InvoicingClient,
    pub payments: PaymentsClient,
}

impl AppState {
    fn from_env(db: Database) -> Self {
        let email = EmailClient::new(
            env::var("EMAIL_SERVICE_URL").expect("EMAIL_SERVICE_URL must be set"),
            &env::var("EMAIL_SERVICE_KEY").unwrap_or_default(),
        );
        let invoicing = InvoicingClient::new(
            env::var("INVOICE_API_URL").expect("INVOICE_API_URL must be set"),
            &env::var("INVOICE_API_KEY").unwrap_or_default(),
        );
        let payments = PaymentsClient::new(
            env::var("PAYMENT_LINK_URL").expect("PAYMENT_LINK_URL must be set"),
            &env::var("PAYMENT_LINK_KEY").unwrap_or_default(),
        );

        AppState {
            db,
            email,
            invoicing,
            payments,
        }
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    env_logger::init();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let db = create_database_pool(&database_url)
        .await
        .expect("Failed to connect to database");

    let state = AppState::from_env(db);
    let app = create_router(state);

    // Get port from environment or use default
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);

    log::info!("brightwork admin server starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

fn create_router(state: AppState) -> Router {
    Router::new()
        // Dashboard
        .route("/dashboard", get(handlers::dashboard))

        // Bookings
        .route("/bookings", get(handlers::bookings::bookings_list))
        .route("/bookings", post(handlers::bookings::create_booking))
        .route("/bookings/:id", get(handlers::bookings::booking_detail))
        .route("/bookings/:id", put(handlers::bookings::update_booking))
        .route("/bookings/:id", delete(handlers::bookings::delete_booking))
        .route("/bookings/:id/assign", post(handlers::bookings::assign_cleaner))
        .route("/bookings/:id/duplicate", post(handlers::bookings::duplicate_booking))
        .route("/bookings/:id/cancel", post(handlers::bookings::cancel_booking))
        .route("/bookings/:id/payment-status", post(handlers::bookings::set_payment_status))
        .route("/bookings/:id/linen", post(handlers::bookings::adjust_linen))

        // Dispatch
        .route("/bookings/:id/invoice", post(handlers::invoices::send_invoice))
        .route("/bookings/:id/email", post(handlers::invoices::send_booking_email))
        .route("/bookings/:id/payment-link", post(handlers::invoices::create_payment_link))

        // Bulk operations
        .route("/bookings/bulk/airbnb", post(handlers::bookings::bulk_create_airbnb))
        .route("/bookings/bulk/edit", post(handlers::bookings::bulk_edit))

        // End-of-tenancy wizard
        .route("/quotes/end-of-tenancy", post(handlers::quotes::quote_end_of_tenancy))
        .route("/bookings/end-of-tenancy", post(handlers::quotes::create_end_of_tenancy_booking))

        // Customers
        .route("/customers", get(handlers::customers::customers_list))
        .route("/customers", post(handlers::customers::create_customer))
        .route("/customers/:id", get(handlers::customers::customer_detail))
        .route("/customers/:id", put(handlers::customers::update_customer))

        // Catalog snapshots
        .route("/cleaners", get(handlers::cleaners::cleaners_list))
        .route("/service-types", get(handlers::service_types_list))
        .route("/linen/products", get(handlers::linen::products_list))

        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
