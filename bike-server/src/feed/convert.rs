//! Conversion from feed records to domain stations.

use tracing::debug;

use super::client::StationDto;
use crate::domain::{Coordinate, InvalidCoordinate, Station, StationId, StationStatus};

impl TryFrom<StationDto> for Station {
    type Error = InvalidCoordinate;

    fn try_from(dto: StationDto) -> Result<Self, Self::Error> {
        let coordinate = Coordinate::parse(
            dto.latitude.unwrap_or(f64::NAN),
            dto.longitude.unwrap_or(f64::NAN),
        )?;

        Ok(Station {
            id: StationId::new(dto.sno),
            name: dto.sna,
            address: dto.ar,
            area: dto.sarea,
            total_slots: dto.total,
            available_bikes: dto.available_rent_bikes,
            available_slots: dto.available_return_bikes,
            coordinate,
            updated_at: dto.update_time,
            status: StationStatus::from_code(&dto.act),
        })
    }
}

/// Convert feed records, silently dropping those with unusable coordinates.
///
/// Order of the surviving records is preserved.
pub fn validate_stations(records: Vec<StationDto>) -> Vec<Station> {
    let total = records.len();
    let stations: Vec<Station> = records
        .into_iter()
        .filter_map(|dto| {
            let id = dto.sno.clone();
            Station::try_from(dto)
                .map_err(|e| debug!(station = %id, error = %e, "dropping station record"))
                .ok()
        })
        .collect();

    let dropped = total - stations.len();
    if dropped > 0 {
        debug!(dropped, kept = stations.len(), "discarded invalid station records");
    }

    stations
}
