use crate::backend::{CustomerDirectory, ReservationStore, SalonDirectory, WorkingHoursCatalog};
use crate::configuration::Configuration;
use crate::configuration_handler::ConfigurationHandler;
use crate::http::start_server;
use crate::local_store::{LocalCustomers, LocalReservations, LocalSalons, LocalWorkingHours};
use crate::scheduler::ReservationScheduler;
use clap::Parser;

mod backend;
mod configuration;
mod configuration_handler;
mod error;
mod http;
mod interval;
mod local_store;
mod request;
mod scheduler;
mod types;

#[cfg(test)]
mod testutils;

#[derive(Clone)]
struct AppState<S, C, W, R>
where
    S: SalonDirectory,
    C: CustomerDirectory,
    W: WorkingHoursCatalog,
    R: ReservationStore,
{
    salons: S,
    customers: C,
    working_hours: W,
    reservations: R,
    scheduler: ReservationScheduler<S, C, W, R>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "salon_booking=info".into()),
        )
        .init();

    let configuration = ConfigurationHandler::parse();

    let salons = LocalSalons::default();
    let customers = LocalCustomers::default();
    let working_hours = LocalWorkingHours::default();
    let reservations = LocalReservations::default();
    if configuration.seed_example_data() {
        local_store::insert_example_data(&salons, &customers, &working_hours).await;
    }

    let scheduler = ReservationScheduler::new(
        salons.clone(),
        customers.clone(),
        working_hours.clone(),
        reservations.clone(),
    );
    let state = AppState {
        salons,
        customers,
        working_hours,
        reservations,
        scheduler,
    };

    let listener = tokio::net::TcpListener::bind(configuration.bind_address())
        .await
        .unwrap();
    start_server(state, listener).await;
}
