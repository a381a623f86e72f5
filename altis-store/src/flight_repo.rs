use altis_core::manifest::{AirplaneId, Flight, FlightId, ManifestEntry};
use altis_core::repository::{FlightRepository, RepositoryError};
use altis_core::Seat;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresFlightRepository {
    pool: PgPool,
}

impl PostgresFlightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct FlightRow {
    flight_id: i64,
    takeoff_date_time: chrono::DateTime<chrono::Utc>,
    takeoff_airport: String,
    landing_date_time: chrono::DateTime<chrono::Utc>,
    landing_airport: String,
    airplane_id: i64,
}

#[derive(sqlx::FromRow)]
struct ManifestRow {
    boarding_pass_id: i64,
    purchase_id: i64,
    passenger_id: i64,
    seat_type_id: i64,
    seat_id: Option<i64>,
    dni: String,
    name: String,
    age: i32,
    country: String,
}

#[derive(sqlx::FromRow)]
struct SeatRow {
    seat_id: i64,
    seat_row: i32,
    seat_column: i32,
    seat_type_id: i64,
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            flight_id: row.flight_id,
            takeoff_date_time: row.takeoff_date_time,
            takeoff_airport: row.takeoff_airport,
            landing_date_time: row.landing_date_time,
            landing_airport: row.landing_airport,
            airplane_id: row.airplane_id,
        }
    }
}

impl From<ManifestRow> for ManifestEntry {
    fn from(row: ManifestRow) -> Self {
        ManifestEntry {
            passenger_id: row.passenger_id,
            dni: row.dni.into(),
            name: row.name,
            age: row.age,
            country: row.country,
            boarding_pass_id: row.boarding_pass_id,
            purchase_id: row.purchase_id,
            seat_type_id: row.seat_type_id,
            seat_id: row.seat_id,
        }
    }
}

impl From<SeatRow> for Seat {
    fn from(row: SeatRow) -> Self {
        Seat::new(row.seat_id, row.seat_row, row.seat_column, row.seat_type_id)
    }
}

/// Connectivity failures become `Unavailable`, everything else is a query error.
pub fn map_sqlx_error(err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => {
            tracing::warn!("Database unreachable: {}", err);
            RepositoryError::Unavailable(err.to_string())
        }
        other => RepositoryError::Query(other.to_string()),
    }
}

#[async_trait]
impl FlightRepository for PostgresFlightRepository {
    async fn get_flight(&self, flight_id: FlightId) -> Result<Option<Flight>, RepositoryError> {
        let row = sqlx::query_as::<_, FlightRow>(
            r#"
            SELECT flight_id, takeoff_date_time, takeoff_airport,
                   landing_date_time, landing_airport, airplane_id
            FROM flight
            WHERE flight_id = $1
            "#,
        )
        .bind(flight_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Flight::from))
    }

    async fn list_manifest(&self, flight_id: FlightId) -> Result<Vec<ManifestEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, ManifestRow>(
            r#"
            SELECT
                bp.boarding_pass_id, bp.purchase_id, bp.passenger_id,
                bp.seat_type_id, bp.seat_id,
                p.dni, p.name, p.age, p.country
            FROM boarding_pass bp
            JOIN passenger p ON p.passenger_id = bp.passenger_id
            WHERE bp.flight_id = $1
            ORDER BY bp.boarding_pass_id
            "#,
        )
        .bind(flight_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ManifestEntry::from).collect())
    }

    async fn list_seats(&self, airplane_id: AirplaneId) -> Result<Vec<Seat>, RepositoryError> {
        let rows = sqlx::query_as::<_, SeatRow>(
            r#"
            SELECT seat_id, seat_row, seat_column, seat_type_id
            FROM seat
            WHERE airplane_id = $1
            ORDER BY seat_row, seat_column
            "#,
        )
        .bind(airplane_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Seat::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectivity_errors_map_to_unavailable() {
        assert!(matches!(map_sqlx_error(sqlx::Error::PoolTimedOut), RepositoryError::Unavailable(_)));
        assert!(matches!(map_sqlx_error(sqlx::Error::PoolClosed), RepositoryError::Unavailable(_)));

        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(map_sqlx_error(sqlx::Error::Io(io)), RepositoryError::Unavailable(_)));
    }

    #[test]
    fn test_other_errors_map_to_query() {
        assert!(matches!(map_sqlx_error(sqlx::Error::RowNotFound), RepositoryError::Query(_)));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::ColumnNotFound("seat_row".into())),
            RepositoryError::Query(_)
        ));
    }

    #[test]
    fn test_seat_rows_start_unoccupied() {
        let seat = Seat::from(SeatRow { seat_id: 4, seat_row: 2, seat_column: 3, seat_type_id: 1 });
        assert_eq!((seat.id, seat.row, seat.column, seat.seat_type_id), (4, 2, 3, 1));
        assert!(!seat.occupied);
    }
}
