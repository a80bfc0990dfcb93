use crate::backend::{CustomerDirectory, ReservationStore, SalonDirectory, WorkingHoursCatalog};
use crate::error::BookingError;
use crate::interval::TimeInterval;
use crate::request::{parse_date, parse_time, RawBookingRequest};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{
    routing::{delete, get},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
struct NewSalonRequest {
    name: String,
    address: String,
    phone: String,
    email: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewCustomerRequest {
    first_name: String,
    last_name: String,
    phone: String,
    email: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewWindowRequest {
    salon_id: u32,
    date: String,
    start_time: String,
    end_time: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SalonDateQuery {
    salon_id: Option<u32>,
    date: Option<NaiveDate>,
}

/// Optional reservation list filters; any combination may be supplied.
/// `startDate`/`endDate` bound the reservation date inclusively.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReservationFilter {
    salon_id: Option<u32>,
    customer_id: Option<u32>,
    date: Option<NaiveDate>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = match &self {
            BookingError::MissingParameters(_)
            | BookingError::InvalidParameters { .. }
            | BookingError::InvalidTimeOrder
            | BookingError::OutsideWorkingHours => StatusCode::BAD_REQUEST,
            BookingError::NotFound { .. } | BookingError::NoWorkingHours { .. } => {
                StatusCode::NOT_FOUND
            }
            BookingError::OverlappingReservation(_) => StatusCode::CONFLICT,
            BookingError::PersistenceFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if !self.is_client_error() {
            tracing::error!(error = %self, "reservation could not be persisted");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn router<S, C, W, R>(state: AppState<S, C, W, R>) -> Router
where
    S: SalonDirectory,
    C: CustomerDirectory,
    W: WorkingHoursCatalog,
    R: ReservationStore,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/reservations", get(get_reservations).post(schedule_reservation))
        .route("/reservations/:id", delete(delete_reservation))
        .route("/salons", get(get_salons).post(add_salon))
        .route("/salons/:id", get(get_salon).delete(delete_salon))
        .route("/customers", get(get_customers).post(add_customer))
        .route("/customers/:id", get(get_customer).delete(delete_customer))
        .route("/working-hours", get(get_working_hours).post(add_working_hours))
        .route(
            "/working-hours/:id",
            get(get_working_window).delete(delete_working_hours),
        )
        .with_state(state)
        .layer(cors)
}

pub async fn start_server<S, C, W, R>(state: AppState<S, C, W, R>, listener: TcpListener)
where
    S: SalonDirectory,
    C: CustomerDirectory,
    W: WorkingHoursCatalog,
    R: ReservationStore,
{
    tracing::info!(address = %listener.local_addr().unwrap(), "listening");
    axum::serve(listener, router(state)).await.unwrap();
}

async fn schedule_reservation<S, C, W, R>(
    State(state): State<AppState<S, C, W, R>>,
    Json(raw): Json<RawBookingRequest>,
) -> Response
where
    S: SalonDirectory,
    C: CustomerDirectory,
    W: WorkingHoursCatalog,
    R: ReservationStore,
{
    match state.scheduler.schedule(&raw).await {
        Ok(reservation) => (StatusCode::CREATED, Json(reservation)).into_response(),
        Err(error) => error.into_response(),
    }
}

async fn get_reservations<S, C, W, R>(
    State(state): State<AppState<S, C, W, R>>,
    Query(query): Query<ReservationFilter>,
) -> Response
where
    S: SalonDirectory,
    C: CustomerDirectory,
    W: WorkingHoursCatalog,
    R: ReservationStore,
{
    let mut reservations = match (query.salon_id, query.date) {
        (Some(salon_id), Some(date)) => {
            state.reservations.find_by_salon_and_date(salon_id, date).await
        }
        _ => state.reservations.reservations().await,
    };
    reservations.retain(|reservation| {
        query.salon_id.map_or(true, |id| reservation.salon.id == id)
            && query.customer_id.map_or(true, |id| reservation.customer.id == id)
            && query.date.map_or(true, |date| reservation.interval.date == date)
            && query
                .start_date
                .map_or(true, |date| reservation.interval.date >= date)
            && query
                .end_date
                .map_or(true, |date| reservation.interval.date <= date)
    });
    Json(reservations).into_response()
}

async fn delete_reservation<S, C, W, R>(
    State(state): State<AppState<S, C, W, R>>,
    Path(id): Path<Uuid>,
) -> Response
where
    S: SalonDirectory,
    C: CustomerDirectory,
    W: WorkingHoursCatalog,
    R: ReservationStore,
{
    match state.reservations.delete_by_id(id).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(error) => (StatusCode::NOT_FOUND, Json(json!({ "error": error }))).into_response(),
    }
}

async fn get_salons<S, C, W, R>(State(state): State<AppState<S, C, W, R>>) -> Response
where
    S: SalonDirectory,
    C: CustomerDirectory,
    W: WorkingHoursCatalog,
    R: ReservationStore,
{
    Json(state.salons.salons().await).into_response()
}

async fn add_salon<S, C, W, R>(
    State(state): State<AppState<S, C, W, R>>,
    Json(request): Json<NewSalonRequest>,
) -> Response
where
    S: SalonDirectory,
    C: CustomerDirectory,
    W: WorkingHoursCatalog,
    R: ReservationStore,
{
    let salon = state
        .salons
        .add_salon(request.name, request.address, request.phone, request.email)
        .await;
    (StatusCode::CREATED, Json(salon)).into_response()
}

async fn get_salon<S, C, W, R>(
    State(state): State<AppState<S, C, W, R>>,
    Path(id): Path<u32>,
) -> Response
where
    S: SalonDirectory,
    C: CustomerDirectory,
    W: WorkingHoursCatalog,
    R: ReservationStore,
{
    match state.salons.find_by_id(id).await {
        Some(salon) => Json(salon).into_response(),
        None => BookingError::NotFound { entity: "salon", id }.into_response(),
    }
}

async fn delete_salon<S, C, W, R>(
    State(state): State<AppState<S, C, W, R>>,
    Path(id): Path<u32>,
) -> Response
where
    S: SalonDirectory,
    C: CustomerDirectory,
    W: WorkingHoursCatalog,
    R: ReservationStore,
{
    match state.salons.remove_salon(id).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(error) => (StatusCode::NOT_FOUND, Json(json!({ "error": error }))).into_response(),
    }
}

async fn get_customers<S, C, W, R>(State(state): State<AppState<S, C, W, R>>) -> Response
where
    S: SalonDirectory,
    C: CustomerDirectory,
    W: WorkingHoursCatalog,
    R: ReservationStore,
{
    Json(state.customers.customers().await).into_response()
}

async fn add_customer<S, C, W, R>(
    State(state): State<AppState<S, C, W, R>>,
    Json(request): Json<NewCustomerRequest>,
) -> Response
where
    S: SalonDirectory,
    C: CustomerDirectory,
    W: WorkingHoursCatalog,
    R: ReservationStore,
{
    let customer = state
        .customers
        .add_customer(
            request.first_name,
            request.last_name,
            request.phone,
            request.email,
        )
        .await;
    (StatusCode::CREATED, Json(customer)).into_response()
}

async fn get_customer<S, C, W, R>(
    State(state): State<AppState<S, C, W, R>>,
    Path(id): Path<u32>,
) -> Response
where
    S: SalonDirectory,
    C: CustomerDirectory,
    W: WorkingHoursCatalog,
    R: ReservationStore,
{
    match state.customers.find_by_id(id).await {
        Some(customer) => Json(customer).into_response(),
        None => BookingError::NotFound {
            entity: "customer",
            id,
        }
        .into_response(),
    }
}

async fn delete_customer<S, C, W, R>(
    State(state): State<AppState<S, C, W, R>>,
    Path(id): Path<u32>,
) -> Response
where
    S: SalonDirectory,
    C: CustomerDirectory,
    W: WorkingHoursCatalog,
    R: ReservationStore,
{
    match state.customers.remove_customer(id).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(error) => (StatusCode::NOT_FOUND, Json(json!({ "error": error }))).into_response(),
    }
}

async fn get_working_hours<S, C, W, R>(
    State(state): State<AppState<S, C, W, R>>,
    Query(query): Query<SalonDateQuery>,
) -> Response
where
    S: SalonDirectory,
    C: CustomerDirectory,
    W: WorkingHoursCatalog,
    R: ReservationStore,
{
    let windows = match (query.salon_id, query.date) {
        (Some(salon_id), Some(date)) => {
            state.working_hours.find_by_date_and_salon(date, salon_id).await
        }
        _ => {
            let mut windows = state.working_hours.working_windows().await;
            windows.retain(|window| {
                query.salon_id.map_or(true, |id| window.salon_id == id)
                    && query.date.map_or(true, |date| window.interval.date == date)
            });
            windows
        }
    };
    Json(windows).into_response()
}

async fn add_working_hours<S, C, W, R>(
    State(state): State<AppState<S, C, W, R>>,
    Json(request): Json<NewWindowRequest>,
) -> Response
where
    S: SalonDirectory,
    C: CustomerDirectory,
    W: WorkingHoursCatalog,
    R: ReservationStore,
{
    // Same syntactic rules as a booking request, including start < end.
    let interval = match parse_window_interval(&request) {
        Ok(interval) => interval,
        Err(error) => return error.into_response(),
    };
    let window = state.working_hours.add_window(request.salon_id, interval).await;
    (StatusCode::CREATED, Json(window)).into_response()
}

fn parse_window_interval(request: &NewWindowRequest) -> Result<TimeInterval, BookingError> {
    let date = parse_date(&request.date, "date")?;
    let start = parse_time(&request.start_time, "startTime")?;
    let end = parse_time(&request.end_time, "endTime")?;
    TimeInterval::new(date, start, end)
}

async fn get_working_window<S, C, W, R>(
    State(state): State<AppState<S, C, W, R>>,
    Path(id): Path<u32>,
) -> Response
where
    S: SalonDirectory,
    C: CustomerDirectory,
    W: WorkingHoursCatalog,
    R: ReservationStore,
{
    match state.working_hours.find_by_id(id).await {
        Some(window) => Json(window).into_response(),
        None => BookingError::NotFound {
            entity: "working window",
            id,
        }
        .into_response(),
    }
}

async fn delete_working_hours<S, C, W, R>(
    State(state): State<AppState<S, C, W, R>>,
    Path(id): Path<u32>,
) -> Response
where
    S: SalonDirectory,
    C: CustomerDirectory,
    W: WorkingHoursCatalog,
    R: ReservationStore,
{
    match state.working_hours.remove_window(id).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(error) => (StatusCode::NOT_FOUND, Json(json!({ "error": error }))).into_response(),
    }
}
